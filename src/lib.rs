//! # localscalar
//!
//! Coercers for two custom query-language scalars: a local date (`2011-12-03`) and a local
//! date-time (`2011-12-03T10:15:30`), neither carrying a UTC offset.
//!
//! A query engine hands each coercer untrusted input and gets back either a canonical
//! [chrono](https://docs.rs/chrono) value or an error whose message can be shown to the client
//! as-is. The same coercer turns native values back into canonical text for output.
//!
//! ## Examples
//!
//! Parse input from a variable, and serialize the result:
//!
//! ```
//! use chrono::NaiveDate;
//! use localscalar::prelude::*;
//!
//! let coercer = DateCoercer::new();
//! let date = coercer.parse_value(&"2011-12-03".into()).unwrap();
//! assert_eq!(NaiveDate::from_ymd_opt(2011, 12, 3).unwrap(), date);
//! assert_eq!("2011-12-03", coercer.serialize(&date.into()).unwrap());
//! ```
//!
//! Input out of range is rejected with a message naming the input, the bound and what was
//! received:
//!
//! ```
//! use localscalar::prelude::*;
//!
//! let coercer = DateTimeCoercer::new();
//! let err = coercer.parse_value(&"1752-12-01T23:59:59".into()).unwrap_err();
//! assert_eq!(
//!     "LocalDateTime value 1752-12-01T23:59:59 must be between January 1, 1753 and \
//!      December 31, 9999. Received: 1752-12-01T23:59:59",
//!     err.to_string()
//! );
//! ```
//!
//! Integers are milliseconds since Epoch. They (and [Value::Instant]s) are resolved into calendar
//! fields in the system's local time zone, unless another zone is given:
//!
//! ```
//! use chrono::{FixedOffset, NaiveDate};
//! use localscalar::prelude::*;
//!
//! let tokyo = DateCoercer::<FixedOffset>::with_zone(FixedOffset::east_opt(9 * 3600).unwrap());
//! let date = tokyo.parse_literal(&Literal::int(1_323_010_800_000)).unwrap();
//! assert_eq!(NaiveDate::from_ymd_opt(2011, 12, 5).unwrap(), date);
//! ```
//!
//! ## Accepted shapes
//!
//! | Operation | Accepts | Returns |
//! |---|---|---|
//! | [serialize](Coercer::serialize) | [Value::String], [Value::Instant], [Value::Temporal] | canonical text |
//! | [parse_value](Coercer::parse_value) | [Value::String], [Value::Int], [Value::Float] | canonical value |
//! | [parse_literal](Coercer::parse_literal) | [Literal::String], [Literal::Int] | canonical value |
//!
//! Anything else is rejected with a [CoercionError] naming the shapes that would have been
//! accepted.
//!
//! ## Canonical text
//!
//! - [LocalDate]: `YYYY-MM-DD`
//! - [LocalDateTime]: `YYYY-MM-DDTHH:MM:SS`, followed by a fraction of 3, 6 or 9 digits when the
//!   sub-second part is not zero.
//!
//! Date-time text may also omit the seconds, or carry a `Z` or `+HH:MM` offset after the seconds,
//! which is dropped. Every field is fixed-width ASCII digits; leap seconds are rejected.
//!
//! ## Year range
//!
//! Parsed values must fall between January 1, [MIN_YEAR] and December 31, [MAX_YEAR], inclusive.
//! Values out of range are rejected, never clamped.
//!
//! ## Prelude
//!
//! Use it with:
//!
//! ```
//! use localscalar::prelude::*;
//! ```
#![warn(missing_docs)]

mod coercer;
mod date;
mod date_time;
mod error;
mod input;
mod scalar;

pub use crate::coercer::{Coercer, DateCoercer, DateTimeCoercer};
pub use crate::error::{Cause, CoercionError, ErrorKind, LiteralError};
pub use crate::input::{Literal, Temporal, Value};
pub use crate::scalar::{LocalDate, LocalDateTime, Scalar, MAX_YEAR, MIN_YEAR};

/// A convenience module appropriate for glob imports (`use localscalar::prelude::*;`).
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::Coercer;
    #[doc(no_inline)]
    pub use crate::CoercionError;
    #[doc(no_inline)]
    pub use crate::DateCoercer;
    #[doc(no_inline)]
    pub use crate::DateTimeCoercer;
    #[doc(no_inline)]
    pub use crate::ErrorKind;
    #[doc(no_inline)]
    pub use crate::Literal;
    #[doc(no_inline)]
    pub use crate::LocalDate;
    #[doc(no_inline)]
    pub use crate::LocalDateTime;
    #[doc(no_inline)]
    pub use crate::Scalar;
    #[doc(no_inline)]
    pub use crate::Temporal;
    #[doc(no_inline)]
    pub use crate::Value;
}
