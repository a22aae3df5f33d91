use crate::{
    error::{Cause, CoercionError, ErrorKind},
    input::{Literal, Value},
    scalar::{in_year_range, LocalDate, LocalDateTime, Scalar, YEAR_RANGE_TEXT},
};
use chrono::{DateTime, Local, Offset, TimeZone, Utc};
use core::{fmt::Display, marker::PhantomData};

/// Coerces [LocalDate] values to and from their accepted input shapes.
pub type DateCoercer<Z = Local> = Coercer<LocalDate, Z>;

/// Coerces [LocalDateTime] values to and from their accepted input shapes.
pub type DateTimeCoercer<Z = Local> = Coercer<LocalDateTime, Z>;

/// A stateless coercer for the scalar `S`, resolving absolute instants in the time zone `Z`.
///
/// It offers the three operations a query engine needs from a custom scalar:
///
/// - [serialize](Coercer::serialize): a native value into canonical text, for output.
/// - [parse_value](Coercer::parse_value): a native value decoded from wire input (e.g. a
///   variable) into the canonical value.
/// - [parse_literal](Coercer::parse_literal): a literal written inline in a query into the
///   canonical value.
///
/// Both parse operations accept text in the scalar's ISO-8601 format or an integer number of
/// milliseconds since Epoch, and reject any value whose year is not between [MIN_YEAR] and
/// [MAX_YEAR], inclusive.
///
/// [MIN_YEAR]: crate::MIN_YEAR
/// [MAX_YEAR]: crate::MAX_YEAR
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use localscalar::prelude::*;
///
/// let coercer = DateCoercer::new();
/// let date = coercer.parse_value(&"2011-12-03".into()).unwrap();
/// assert_eq!(NaiveDate::from_ymd_opt(2011, 12, 3).unwrap(), date);
/// assert_eq!("2011-12-03", coercer.serialize(&date.into()).unwrap());
///
/// let err = coercer.parse_literal(&Literal::string("1752-12-01")).unwrap_err();
/// assert_eq!(ErrorKind::ParseLiteral, err.kind());
/// ```
#[derive(Debug, Clone)]
pub struct Coercer<S: Scalar, Z: TimeZone = Local> {
    zone: Z,
    scalar: PhantomData<S>,
}

impl<S: Scalar> Coercer<S, Local> {
    /// Returns a coercer that resolves instants in the system's local time zone.
    pub fn new() -> Self {
        Self::with_zone(Local)
    }
}

impl<S: Scalar> Default for Coercer<S, Local> {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts a float to whole milliseconds, truncating toward zero.
fn float_millis(value: f64) -> Option<i64> {
    // i64::MAX is not representable as f64; the cast rounds it up to 2^63
    const BOUND: f64 = i64::MAX as f64;
    (value.is_finite() && (-BOUND..BOUND).contains(&value)).then(|| value.trunc() as i64)
}

impl<S: Scalar, Z: TimeZone> Coercer<S, Z> {
    /// Returns a coercer that resolves instants and epoch milliseconds in `zone`.
    pub fn with_zone(zone: Z) -> Self {
        Self {
            zone,
            scalar: PhantomData,
        }
    }

    /// Returns the time zone instants are resolved in.
    pub fn zone(&self) -> &Z {
        &self.zone
    }

    /// Serializes `input` into canonical text.
    ///
    /// Accepts [Value::Temporal] values carrying the scalar's fields, [Value::Instant] values
    /// (resolved in this coercer's time zone) and [Value::String] values in the scalar's format,
    /// which are re-formatted canonically.
    ///
    /// # Errors
    ///
    /// Returns a [CoercionError] of kind [ErrorKind::Serialize] if text does not parse, if a
    /// temporal value lacks the scalar's fields, or if `input` has any other shape.
    pub fn serialize(&self, input: &Value) -> Result<String, CoercionError> {
        self.do_serialize(input).map_err(Self::log_rejection)
    }

    /// Parses a native input value into the canonical value.
    ///
    /// Accepts [Value::String] in the scalar's format and [Value::Int] (or [Value::Float],
    /// truncated) milliseconds since Epoch, resolved in this coercer's time zone.
    ///
    /// # Errors
    ///
    /// Returns a [CoercionError] of kind [ErrorKind::ParseValue] if text does not parse, if the
    /// number is not a representable instant, if the year is out of range, or if `input` has any
    /// other shape.
    pub fn parse_value(&self, input: &Value) -> Result<S::Canonical, CoercionError> {
        self.do_parse_value(input).map_err(Self::log_rejection)
    }

    /// Parses a query literal into the canonical value.
    ///
    /// Accepts [Literal::String] in the scalar's format and [Literal::Int] milliseconds since
    /// Epoch, resolved in this coercer's time zone.
    ///
    /// # Errors
    ///
    /// Returns a [CoercionError] of kind [ErrorKind::ParseLiteral] under the same conditions as
    /// [Coercer::parse_value], including integers that do not fit in 64 bits.
    pub fn parse_literal(&self, input: &Literal) -> Result<S::Canonical, CoercionError> {
        self.do_parse_literal(input).map_err(Self::log_rejection)
    }

    fn log_rejection(err: CoercionError) -> CoercionError {
        tracing::debug!(
            scalar = S::NAME,
            kind = %err.kind(),
            reason = err.message(),
            "rejected input"
        );
        err
    }

    /// Resolves `instant` in this coercer's time zone, or returns `None` if the wall-clock time
    /// falls outside the calendar chrono can represent.
    fn resolve_instant(&self, instant: &DateTime<Utc>) -> Option<S::Canonical> {
        let utc = instant.naive_utc();
        let offset = self.zone.offset_from_utc_datetime(&utc).fix();
        utc.checked_add_offset(offset).map(S::from_local)
    }

    fn resolve_millis(&self, millis: i64) -> Option<S::Canonical> {
        DateTime::from_timestamp_millis(millis).and_then(|instant| self.resolve_instant(&instant))
    }

    fn do_serialize(&self, input: &Value) -> Result<String, CoercionError> {
        let err = |message: String| CoercionError::new(ErrorKind::Serialize, message);

        let value = match input {
            Value::Temporal(temporal) => S::from_temporal(temporal).ok_or_else(|| {
                err(format!("Failed to serialize value {input} as a {}.", S::NAME))
                    .with_cause(Cause::MissingFields { scalar: S::NAME })
            })?,
            Value::Instant(instant) => self.resolve_instant(instant).ok_or_else(|| {
                err(format!("Failed to serialize value {input} as a {}.", S::NAME))
            })?,
            Value::String(text) => S::parse_text(text).map_err(|cause| {
                err(format!(
                    "Error parsing value '{text}' to serialize as a {}. {}",
                    S::NAME,
                    S::expected_format()
                ))
                .with_cause(cause)
            })?,
            Value::Null
            | Value::Boolean(_)
            | Value::Int(_)
            | Value::Float(_)
            | Value::List(_) => {
                return Err(err(format!(
                    "Failed to serialize value {input} as a {}. Expected a type 'String', 'Instant' or 'Temporal' but was '{}'.",
                    S::NAME,
                    input.type_name()
                )))
            }
        };
        Ok(S::format(&value))
    }

    fn do_parse_value(&self, input: &Value) -> Result<S::Canonical, CoercionError> {
        let err = |message: String| CoercionError::new(ErrorKind::ParseValue, message);
        let millis_err = |number: &dyn Display| {
            err(format!(
                "Error parsing value '{number}'. Expected to be in milliseconds since Epoch"
            ))
        };

        let value = match input {
            Value::String(text) => S::parse_text(text).map_err(|cause| {
                err(format!(
                    "Error parsing value '{text}'. {}",
                    S::expected_format()
                ))
                .with_cause(cause)
            })?,
            Value::Int(millis) => self
                .resolve_millis(*millis)
                .ok_or_else(|| millis_err(millis))?,
            Value::Float(number) => float_millis(*number)
                .and_then(|millis| self.resolve_millis(millis))
                .ok_or_else(|| millis_err(number))?,
            Value::Null | Value::Boolean(_) | Value::Temporal(_) | Value::Instant(_) | Value::List(_) => {
                return Err(err(format!(
                    "Error parsing value {input} of type '{}' as it is the incorrect type. Expected a string or an integer.",
                    input.type_name()
                )))
            }
        };

        if !in_year_range(&value) {
            return Err(err(format!(
                "{} value {input} must be {YEAR_RANGE_TEXT}. Received: {}",
                S::NAME,
                S::format(&value)
            )));
        }
        Ok(value)
    }

    fn do_parse_literal(&self, input: &Literal) -> Result<S::Canonical, CoercionError> {
        let err = |message: String| CoercionError::new(ErrorKind::ParseLiteral, message);

        let value = match input {
            Literal::String(text) => S::parse_text(text).map_err(|cause| {
                err(format!(
                    "Error parsing literal '{text}'. {}",
                    S::expected_format()
                ))
                .with_cause(cause)
            })?,
            Literal::Int(digits) => digits
                .parse::<i64>()
                .ok()
                .and_then(|millis| self.resolve_millis(millis))
                .ok_or_else(|| {
                    err(format!(
                        "Error parsing literal '{digits}'. Expected to be in milliseconds since Epoch"
                    ))
                })?,
            Literal::Float(_)
            | Literal::Boolean(_)
            | Literal::Null
            | Literal::Enum(_)
            | Literal::Variable(_)
            | Literal::List(_)
            | Literal::Object(_) => {
                return Err(err(format!(
                    "Error parsing {} literal {input} as it is the incorrect type. Expected a string or an integer.",
                    input.kind_name()
                )))
            }
        };

        if !in_year_range(&value) {
            return Err(err(format!(
                "{} literal {input} must be {YEAR_RANGE_TEXT}. Received: {}",
                S::NAME,
                S::format(&value)
            )));
        }
        Ok(value)
    }
}
