use crate::{error::LiteralError, scalar::DATE_TIME_FORMAT};
use chrono::{
    DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc,
};
use core::{
    fmt::{self, Display},
    str::FromStr,
};
use std::time::SystemTime;

/// A native value that already carries calendar and/or clock fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Temporal {
    /// A calendar date.
    Date(NaiveDate),
    /// A time of day with no date.
    Time(NaiveTime),
    /// A calendar date with a time of day.
    DateTime(NaiveDateTime),
    /// A date-time with a fixed UTC offset. Its own wall-clock fields are used; the offset is not
    /// applied.
    Zoned(DateTime<FixedOffset>),
}

impl Display for Temporal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Temporal::Date(date) => write!(f, "{date}"),
            Temporal::Time(time) => write!(f, "{time}"),
            Temporal::DateTime(date_time) => {
                write!(f, "{}", date_time.format(DATE_TIME_FORMAT))
            }
            Temporal::Zoned(zoned) => {
                f.write_str(&zoned.to_rfc3339_opts(SecondsFormat::AutoSi, false))
            }
        }
    }
}

/// A native input value, as handed over by a host after decoding wire input (variables,
/// arguments) or as returned by a resolver for serialization.
///
/// Only some shapes are accepted by each operation; the rest exist so that the host can pass
/// whatever it has and get a precise error back.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An absent value.
    Null,
    /// A boolean.
    Boolean(bool),
    /// An integer, interpreted as milliseconds since the Unix epoch.
    Int(i64),
    /// A floating point number, truncated to whole milliseconds since the Unix epoch.
    Float(f64),
    /// Text, expected in the ISO-8601 format of the scalar.
    String(String),
    /// A value already carrying date and/or time fields.
    Temporal(Temporal),
    /// An absolute point in time, resolved into calendar fields through the coercer's time zone.
    Instant(DateTime<Utc>),
    /// A list of values.
    List(Vec<Value>),
}

impl Value {
    /// Returns the name of this value's shape, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Boolean(_) => "Boolean",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::Temporal(_) => "Temporal",
            Value::Instant(_) => "Instant",
            Value::List(_) => "List",
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(value) => write!(f, "{value}"),
            Value::Int(value) => write!(f, "{value}"),
            Value::Float(value) => write!(f, "{value}"),
            Value::String(value) => f.write_str(value),
            Value::Temporal(value) => write!(f, "{value}"),
            Value::Instant(value) => {
                f.write_str(&value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            Value::List(values) => {
                f.write_str("[")?;
                for (idx, value) in values.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::Temporal(Temporal::Date(value))
    }
}

impl From<NaiveTime> for Value {
    fn from(value: NaiveTime) -> Self {
        Value::Temporal(Temporal::Time(value))
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::Temporal(Temporal::DateTime(value))
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Value::Temporal(Temporal::Zoned(value))
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Instant(value)
    }
}

impl From<SystemTime> for Value {
    fn from(value: SystemTime) -> Self {
        Value::Instant(value.into())
    }
}

/// A value node from query syntax, i.e. a value written inline in a query rather than passed as a
/// variable.
///
/// Numbers keep their source text, so integers of any size can be represented; whether they fit
/// is decided when they are coerced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// A string, unescaped.
    String(String),
    /// An integer, as decimal text.
    Int(String),
    /// A float, as its source text.
    Float(String),
    /// `true` or `false`.
    Boolean(bool),
    /// `null`.
    Null,
    /// An enum value name.
    Enum(String),
    /// A variable reference, without the leading `$`.
    Variable(String),
    /// A list of literals.
    List(Vec<Literal>),
    /// An object of named literals, in source order.
    Object(Vec<(String, Literal)>),
}

impl Literal {
    /// Returns a string literal.
    pub fn string(value: impl Into<String>) -> Self {
        Literal::String(value.into())
    }

    /// Returns an integer literal for `value`.
    pub fn int(value: i64) -> Self {
        Literal::Int(value.to_string())
    }

    /// Returns the name of this literal's node kind, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Literal::String(_) => "StringValue",
            Literal::Int(_) => "IntValue",
            Literal::Float(_) => "FloatValue",
            Literal::Boolean(_) => "BooleanValue",
            Literal::Null => "NullValue",
            Literal::Enum(_) => "EnumValue",
            Literal::Variable(_) => "Variable",
            Literal::List(_) => "ListValue",
            Literal::Object(_) => "ObjectValue",
        }
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in value.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}

impl Display for Literal {
    /// Renders the literal back in query syntax.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(value) => write_escaped(f, value),
            Literal::Int(text) | Literal::Float(text) | Literal::Enum(text) => f.write_str(text),
            Literal::Boolean(value) => write!(f, "{value}"),
            Literal::Null => f.write_str("null"),
            Literal::Variable(name) => write!(f, "${name}"),
            Literal::List(values) => {
                f.write_str("[")?;
                for (idx, value) in values.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str("]")
            }
            Literal::Object(fields) => {
                f.write_str("{")?;
                for (idx, (name, value)) in fields.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

fn is_name(text: &str) -> bool {
    let mut chars = text.chars();
    matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

fn is_int(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    match digits.as_bytes() {
        [] => false,
        [b'0'] => true,
        [b'0', ..] => false,
        bytes => bytes.iter().all(u8::is_ascii_digit),
    }
}

fn is_float(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    // rust's float parser also takes "inf", "NaN" and ".5", none of which are literals
    digits.starts_with(|c: char| c.is_ascii_digit())
        && digits.contains(['.', 'e', 'E'])
        && digits.parse::<f64>().is_ok()
}

fn unescape(text: &str) -> Result<String, LiteralError> {
    let inner = text
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(|| LiteralError::UnterminatedString {
            text: text.to_owned(),
        })?;

    let mut unescaped = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let escaped = match chars.next() {
                    Some('"') => '"',
                    Some('\\') => '\\',
                    Some('/') => '/',
                    Some('n') => '\n',
                    Some('r') => '\r',
                    Some('t') => '\t',
                    Some(escape) => {
                        return Err(LiteralError::UnknownEscape {
                            escape,
                            text: text.to_owned(),
                        })
                    }
                    // the backslash escaped the closing quote
                    None => {
                        return Err(LiteralError::UnterminatedString {
                            text: text.to_owned(),
                        })
                    }
                };
                unescaped.push(escaped);
            }
            // an unescaped quote means the string ended early
            '"' => {
                return Err(LiteralError::Unsupported {
                    text: text.to_owned(),
                })
            }
            c => unescaped.push(c),
        }
    }
    Ok(unescaped)
}

impl FromStr for Literal {
    type Err = LiteralError;

    /// Parses a single scalar literal from query syntax: a double-quoted string, an integer, a
    /// float, `true`, `false`, `null`, a `$variable` or an enum name. Surrounding whitespace is
    /// ignored. Lists and objects are not supported.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Err(LiteralError::Empty);
        }

        let literal = match text {
            "true" => Literal::Boolean(true),
            "false" => Literal::Boolean(false),
            "null" => Literal::Null,
            _ if text.starts_with('"') => Literal::String(unescape(text)?),
            _ if is_int(text) => Literal::Int(text.to_owned()),
            _ if is_float(text) => Literal::Float(text.to_owned()),
            _ if is_name(text) => Literal::Enum(text.to_owned()),
            _ => match text.strip_prefix('$') {
                Some(name) if is_name(name) => Literal::Variable(name.to_owned()),
                _ => {
                    return Err(LiteralError::Unsupported {
                        text: text.to_owned(),
                    })
                }
            },
        };
        Ok(literal)
    }
}
