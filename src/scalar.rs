use crate::{error::Cause, input::Temporal};
use chrono::{Datelike, NaiveDateTime};
use core::fmt::Debug;

/// The earliest year a coerced value may have.
pub const MIN_YEAR: i32 = 1753;

/// The latest year a coerced value may have.
pub const MAX_YEAR: i32 = 9999;

/// The bounds in [MIN_YEAR] and [MAX_YEAR], as they are spelled in error messages.
pub(crate) const YEAR_RANGE_TEXT: &str = "between January 1, 1753 and December 31, 9999";

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";
pub(crate) const DATE_SHAPE: &str = "YYYY-MM-DD";
pub(crate) const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Returns true if `value` falls within [MIN_YEAR] and [MAX_YEAR], inclusive.
pub(crate) fn in_year_range(value: &impl Datelike) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&value.year())
}

/// Matches the start of `text` against `shape` and returns the rest of `text`. Every letter but
/// `T` in `shape` stands for one ASCII digit; any other byte stands for itself.
pub(crate) fn strip_shape<'a>(text: &'a str, shape: &str) -> Option<&'a str> {
    let head = text.get(..shape.len())?;
    let matches = head.bytes().zip(shape.bytes()).all(|(t, s)| match s {
        b'T' => t == b'T',
        s if s.is_ascii_alphabetic() => t.is_ascii_digit(),
        s => t == s,
    });
    matches.then(|| &text[shape.len()..])
}

/// The calendar granularity a [`Coercer`](crate::Coercer) works at. It decides the canonical type,
/// how text is parsed and formatted, and how native values are projected onto the canonical type.
///
/// Implemented by [LocalDate] and [LocalDateTime].
pub trait Scalar: Sized {
    /// The canonical in-memory value.
    type Canonical: Datelike + Copy + PartialEq + Debug;

    /// The scalar's name, as used in error messages.
    const NAME: &'static str;

    /// What the canonical text format is called in error messages, e.g. `date`.
    const FORMAT_NAME: &'static str;

    /// A canonical text example, used in error messages.
    const EXAMPLE: &'static str;

    /// Parses ISO-8601 text into the canonical value. Fields are fixed-width ASCII digits; signs,
    /// padding and surrounding whitespace are rejected.
    fn parse_text(text: &str) -> Result<Self::Canonical, Cause>;

    /// Formats the canonical value as canonical text.
    fn format(value: &Self::Canonical) -> String;

    /// Projects a wall-clock date-time (e.g. an instant already resolved in a time zone) onto the
    /// canonical value.
    fn from_local(local: NaiveDateTime) -> Self::Canonical;

    /// Projects a temporal value onto the canonical value, or returns `None` if it lacks the
    /// required fields.
    fn from_temporal(temporal: &Temporal) -> Option<Self::Canonical>;

    /// Returns the sentence describing the expected text format, e.g. `Expected to be in the ISO
    /// local date format, such as '2011-12-03'`.
    fn expected_format() -> String {
        format!(
            "Expected to be in the ISO local {} format, such as '{}'",
            Self::FORMAT_NAME,
            Self::EXAMPLE
        )
    }
}

/// A calendar date without time of day or offset, such as `2011-12-03`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LocalDate;

/// A calendar date with time of day but without offset, such as `2011-12-03T10:15:30`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LocalDateTime;
