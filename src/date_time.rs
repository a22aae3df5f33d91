use crate::{
    error::Cause,
    input::Temporal,
    scalar::{strip_shape, LocalDateTime, Scalar, DATE_TIME_FORMAT},
};
use chrono::{FixedOffset, NaiveDateTime, Timelike};

/// Seconds may be omitted, as in `2011-12-03T10:15`.
const DATE_TIME_MINUTES_FORMAT: &str = "%Y-%m-%dT%H:%M";

const DATE_TIME_SHAPE: &str = "YYYY-MM-DDTHH:MM";
const SECONDS_SHAPE: &str = ":SS";
const OFFSET_SHAPE: &str = "HH:MM";

/// Splits `text` into its local part and an optional `Z`, `+HH:MM` or `-HH:MM` suffix. `rest` is
/// the tail of `text` after the seconds, so it cannot hold the date's dashes.
fn split_offset<'a>(text: &'a str, rest: &str) -> Result<&'a str, Cause> {
    let Some(at) = rest.find(['Z', '+', '-']) else {
        return Ok(text);
    };
    let (local, offset) = text.split_at(text.len() - rest.len() + at);
    if offset != "Z" {
        // the sign is ASCII, so slicing past it is on a char boundary
        if strip_shape(&offset[1..], OFFSET_SHAPE) != Some("") {
            return Err(Cause::Shape {
                shape: OFFSET_SHAPE,
            });
        }
        offset.parse::<FixedOffset>()?;
    }
    Ok(local)
}

impl Scalar for LocalDateTime {
    type Canonical = NaiveDateTime;

    const NAME: &'static str = "LocalDateTime";
    const FORMAT_NAME: &'static str = "date-time";
    const EXAMPLE: &'static str = "2011-12-03T10:15:30";

    /// Parses `YYYY-MM-DDTHH:MM[:SS[.fraction]]`. After the seconds, a `Z` or `+HH:MM` offset is
    /// tolerated and dropped, keeping the wall-clock fields as written. Leap seconds are rejected.
    fn parse_text(text: &str) -> Result<NaiveDateTime, Cause> {
        let rest = strip_shape(text, DATE_TIME_SHAPE).ok_or(Cause::Shape {
            shape: DATE_TIME_SHAPE,
        })?;
        if rest.is_empty() {
            return Ok(NaiveDateTime::parse_from_str(
                text,
                DATE_TIME_MINUTES_FORMAT,
            )?);
        }

        let rest = strip_shape(rest, SECONDS_SHAPE).ok_or(Cause::Shape {
            shape: SECONDS_SHAPE,
        })?;
        let local = split_offset(text, rest)?;
        let value = NaiveDateTime::parse_from_str(local, DATE_TIME_FORMAT)?;
        if value.nanosecond() >= 1_000_000_000 {
            return Err(Cause::LeapSecond);
        }
        Ok(value)
    }

    fn format(value: &NaiveDateTime) -> String {
        value.format(DATE_TIME_FORMAT).to_string()
    }

    fn from_local(local: NaiveDateTime) -> NaiveDateTime {
        local
    }

    fn from_temporal(temporal: &Temporal) -> Option<NaiveDateTime> {
        match temporal {
            Temporal::DateTime(date_time) => Some(*date_time),
            Temporal::Zoned(zoned) => Some(zoned.naive_local()),
            Temporal::Date(_) | Temporal::Time(_) => None,
        }
    }
}
