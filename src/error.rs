use core::fmt::{self, Display};

/// The operation that rejected an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Raised by [`Coercer::serialize`](crate::Coercer::serialize).
    Serialize,
    /// Raised by [`Coercer::parse_value`](crate::Coercer::parse_value).
    ParseValue,
    /// Raised by [`Coercer::parse_literal`](crate::Coercer::parse_literal).
    ParseLiteral,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorKind::Serialize => "serialize",
            ErrorKind::ParseValue => "parse value",
            ErrorKind::ParseLiteral => "parse literal",
        })
    }
}

/// The underlying failure behind a [`CoercionError`], when there is one.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Cause {
    /// Text did not match the expected format.
    #[error(transparent)]
    Parse(#[from] chrono::ParseError),

    /// Text did not have the fixed-width shape of the format. Letters in the shape stand for
    /// ASCII digits.
    #[error("Text does not have the shape {shape}")]
    Shape {
        /// The expected shape, e.g. `YYYY-MM-DD`.
        shape: &'static str,
    },

    /// Text named a leap second, which canonical values cannot hold.
    #[error("Leap seconds are not supported")]
    LeapSecond,

    /// A temporal value lacks the date or time fields the scalar needs.
    #[error("Temporal value does not carry the fields of a {scalar}")]
    MissingFields {
        /// The scalar's name.
        scalar: &'static str,
    },
}

/// A rejected input. The message is meant for the client that supplied the input: it names the
/// offending input and what was expected instead.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct CoercionError {
    kind: ErrorKind,
    message: String,
    #[source]
    cause: Option<Cause>,
}

impl CoercionError {
    pub(crate) fn new(kind: ErrorKind, message: String) -> Self {
        Self {
            kind,
            message,
            cause: None,
        }
    }

    pub(crate) fn with_cause(mut self, cause: impl Into<Cause>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Returns the operation that failed.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the human-readable message. This is also the [Display] output.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the underlying failure, if any.
    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }
}

/// Errors from parsing query-syntax text into a [`Literal`](crate::Literal).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LiteralError {
    /// The text was empty or whitespace.
    #[error("Literal should not be empty")]
    Empty,

    /// A string literal had no closing quote.
    #[error("String literal should be terminated with a closing double quote: {text}")]
    UnterminatedString {
        /// The literal's text.
        text: String,
    },

    /// A string literal used an escape sequence that is not supported.
    #[error("Unknown escape sequence `\\{escape}` in string literal {text}")]
    UnknownEscape {
        /// The character after the backslash.
        escape: char,
        /// The literal's text.
        text: String,
    },

    /// Lists, objects and anything else that is not a scalar literal.
    #[error("Unsupported literal syntax `{text}`. Expected a string, number, boolean, null, enum or variable")]
    Unsupported {
        /// The literal's text.
        text: String,
    },
}
