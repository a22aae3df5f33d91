use crate::{
    error::Cause,
    input::Temporal,
    scalar::{strip_shape, LocalDate, Scalar, DATE_FORMAT, DATE_SHAPE},
};
use chrono::{NaiveDate, NaiveDateTime};

impl Scalar for LocalDate {
    type Canonical = NaiveDate;

    const NAME: &'static str = "LocalDate";
    const FORMAT_NAME: &'static str = "date";
    const EXAMPLE: &'static str = "2011-12-03";

    fn parse_text(text: &str) -> Result<NaiveDate, Cause> {
        match strip_shape(text, DATE_SHAPE) {
            Some("") => Ok(NaiveDate::parse_from_str(text, DATE_FORMAT)?),
            _ => Err(Cause::Shape { shape: DATE_SHAPE }),
        }
    }

    fn format(value: &NaiveDate) -> String {
        value.format(DATE_FORMAT).to_string()
    }

    fn from_local(local: NaiveDateTime) -> NaiveDate {
        local.date()
    }

    fn from_temporal(temporal: &Temporal) -> Option<NaiveDate> {
        match temporal {
            Temporal::Date(date) => Some(*date),
            Temporal::DateTime(date_time) => Some(date_time.date()),
            Temporal::Zoned(zoned) => Some(zoned.date_naive()),
            Temporal::Time(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::{Cause, ErrorKind},
        input::{Literal, Value},
        DateCoercer,
    };
    use chrono::{
        DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
    };
    use rstest::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    /// Milliseconds since Epoch of local midnight on the given date.
    fn local_midnight_millis(date: NaiveDate) -> i64 {
        let midnight: NaiveDateTime = date.and_hms_opt(0, 0, 0).unwrap();
        Local
            .from_local_datetime(&midnight)
            .earliest()
            .unwrap()
            .timestamp_millis()
    }

    #[fixture]
    fn coercer() -> DateCoercer {
        DateCoercer::new()
    }

    #[rstest]
    fn test_parse_value_string(coercer: DateCoercer) {
        assert_eq!(Ok(ymd(2011, 12, 3)), coercer.parse_value(&"2011-12-03".into()));
    }

    #[rstest]
    fn test_parse_value_number(coercer: DateCoercer) {
        let date = ymd(2016, 12, 6);
        let millis = local_midnight_millis(date);
        assert_eq!(Ok(date), coercer.parse_value(&Value::Int(millis)));
    }

    #[rstest]
    fn test_parse_value_float(coercer: DateCoercer) {
        let date = ymd(2016, 12, 6);
        let millis = local_midnight_millis(date) as f64 + 0.75;
        assert_eq!(Ok(date), coercer.parse_value(&Value::Float(millis)));
    }

    #[rstest]
    #[case("2011-12-03T")]
    #[case("2011-12-3x")]
    #[case("2011-02-30")]
    #[case("03/12/2011")]
    #[case("")]
    #[case("2011-1-3")]
    #[case("2011-12-3")]
    #[case(" 2011-12-03")]
    #[case("2011-12-03 ")]
    #[case("+2011-12-03")]
    #[case("02011-12-03")]
    fn test_parse_value_string_bad_format(coercer: DateCoercer, #[case] text: &str) {
        let err = coercer.parse_value(&text.into()).unwrap_err();
        assert_eq!(ErrorKind::ParseValue, err.kind());
        assert_eq!(
            format!(
                "Error parsing value '{text}'. Expected to be in the ISO local date format, such as '2011-12-03'"
            ),
            err.message()
        );
        assert!(err.cause().is_some());
    }

    #[rstest]
    #[case("2011-1-3", Cause::Shape { shape: "YYYY-MM-DD" })]
    #[case("+2011-12-03", Cause::Shape { shape: "YYYY-MM-DD" })]
    fn test_parse_value_string_bad_shape(
        coercer: DateCoercer,
        #[case] text: &str,
        #[case] expected: Cause,
    ) {
        let err = coercer.parse_value(&text.into()).unwrap_err();
        assert_eq!(Some(&expected), err.cause());
    }

    #[rstest]
    fn test_parse_value_too_early(coercer: DateCoercer) {
        let err = coercer.parse_value(&"1752-12-01".into()).unwrap_err();
        assert_eq!(ErrorKind::ParseValue, err.kind());
        assert_eq!(
            "LocalDate value 1752-12-01 must be between January 1, 1753 and December 31, 9999. Received: 1752-12-01",
            err.message()
        );
    }

    #[rstest]
    fn test_parse_value_too_late(coercer: DateCoercer) {
        // day after the last valid day
        let millis = local_midnight_millis(ymd(10000, 1, 1));
        let err = coercer.parse_value(&Value::Int(millis)).unwrap_err();
        assert_eq!(
            format!(
                "LocalDate value {millis} must be between January 1, 1753 and December 31, 9999. Received: +10000-01-01"
            ),
            err.message()
        );
    }

    #[rstest]
    #[case(i64::MAX)]
    #[case(i64::MIN)]
    fn test_parse_value_millis_out_of_range(coercer: DateCoercer, #[case] millis: i64) {
        let err = coercer.parse_value(&Value::Int(millis)).unwrap_err();
        assert_eq!(
            format!("Error parsing value '{millis}'. Expected to be in milliseconds since Epoch"),
            err.message()
        );
    }

    #[rstest]
    fn test_parse_value_float_not_finite(coercer: DateCoercer) {
        let err = coercer.parse_value(&Value::Float(f64::NAN)).unwrap_err();
        assert_eq!(
            "Error parsing value 'NaN'. Expected to be in milliseconds since Epoch",
            err.message()
        );
    }

    #[rstest]
    #[case(Value::Boolean(true), "Error parsing value true of type 'Boolean' as it is the incorrect type. Expected a string or an integer.")]
    #[case(Value::Null, "Error parsing value null of type 'Null' as it is the incorrect type. Expected a string or an integer.")]
    #[case(ymd(2011, 12, 3).into(), "Error parsing value 2011-12-03 of type 'Temporal' as it is the incorrect type. Expected a string or an integer.")]
    fn test_parse_value_bad_type(
        coercer: DateCoercer,
        #[case] value: Value,
        #[case] expected: &str,
    ) {
        let err = coercer.parse_value(&value).unwrap_err();
        assert_eq!(ErrorKind::ParseValue, err.kind());
        assert_eq!(expected, err.message());
        assert_eq!(None, err.cause());
    }

    #[rstest]
    fn test_parse_literal_string(coercer: DateCoercer) {
        assert_eq!(
            Ok(ymd(2011, 12, 3)),
            coercer.parse_literal(&Literal::string("2011-12-03"))
        );
    }

    #[rstest]
    fn test_parse_literal_number(coercer: DateCoercer) {
        let date = ymd(2016, 12, 6);
        let millis = local_midnight_millis(date);
        assert_eq!(Ok(date), coercer.parse_literal(&Literal::int(millis)));
    }

    #[rstest]
    fn test_parse_literal_string_bad_format(coercer: DateCoercer) {
        let err = coercer
            .parse_literal(&Literal::string("2011-12-03T"))
            .unwrap_err();
        assert_eq!(ErrorKind::ParseLiteral, err.kind());
        assert_eq!(
            "Error parsing literal '2011-12-03T'. Expected to be in the ISO local date format, such as '2011-12-03'",
            err.message()
        );
    }

    #[rstest]
    fn test_parse_literal_too_early(coercer: DateCoercer) {
        let err = coercer
            .parse_literal(&Literal::string("1752-12-01"))
            .unwrap_err();
        assert_eq!(ErrorKind::ParseLiteral, err.kind());
        assert_eq!(
            "LocalDate literal \"1752-12-01\" must be between January 1, 1753 and December 31, 9999. Received: 1752-12-01",
            err.message()
        );
    }

    #[rstest]
    fn test_parse_literal_too_late(coercer: DateCoercer) {
        let millis = local_midnight_millis(ymd(10000, 1, 1));
        let err = coercer.parse_literal(&Literal::int(millis)).unwrap_err();
        assert_eq!(
            format!(
                "LocalDate literal {millis} must be between January 1, 1753 and December 31, 9999. Received: +10000-01-01"
            ),
            err.message()
        );
    }

    #[rstest]
    fn test_parse_literal_int_overflow(coercer: DateCoercer) {
        let literal = Literal::Int("99999999999999999999".to_string());
        let err = coercer.parse_literal(&literal).unwrap_err();
        assert_eq!(
            "Error parsing literal '99999999999999999999'. Expected to be in milliseconds since Epoch",
            err.message()
        );
    }

    #[rstest]
    #[case(Literal::Boolean(true), "Error parsing BooleanValue literal true as it is the incorrect type. Expected a string or an integer.")]
    #[case(Literal::Float("1.5".to_string()), "Error parsing FloatValue literal 1.5 as it is the incorrect type. Expected a string or an integer.")]
    #[case(Literal::Enum("TODAY".to_string()), "Error parsing EnumValue literal TODAY as it is the incorrect type. Expected a string or an integer.")]
    #[case(Literal::List(vec![Literal::string("2011-12-03")]), "Error parsing ListValue literal [\"2011-12-03\"] as it is the incorrect type. Expected a string or an integer.")]
    fn test_parse_literal_bad_type(
        coercer: DateCoercer,
        #[case] literal: Literal,
        #[case] expected: &str,
    ) {
        let err = coercer.parse_literal(&literal).unwrap_err();
        assert_eq!(ErrorKind::ParseLiteral, err.kind());
        assert_eq!(expected, err.message());
    }

    #[rstest]
    fn test_serialize_local_date(coercer: DateCoercer) {
        assert_eq!(Ok("2011-12-03".to_string()), coercer.serialize(&ymd(2011, 12, 3).into()));
    }

    #[rstest]
    fn test_serialize_temporal_with_time(coercer: DateCoercer) {
        let date_time = ymd(2011, 12, 3).and_hms_opt(23, 59, 59).unwrap();
        assert_eq!(Ok("2011-12-03".to_string()), coercer.serialize(&date_time.into()));

        // the zoned value's own calendar fields are used, not the instant in another zone
        let zoned = FixedOffset::west_opt(10 * 3600)
            .unwrap()
            .from_local_datetime(&date_time)
            .unwrap();
        assert_eq!(Ok("2011-12-03".to_string()), coercer.serialize(&zoned.into()));
    }

    #[rstest]
    fn test_serialize_instant(coercer: DateCoercer) {
        let noon = ymd(2011, 12, 3).and_hms_opt(12, 0, 0).unwrap();
        let instant: DateTime<Utc> = Local
            .from_local_datetime(&noon)
            .earliest()
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(Ok("2011-12-03".to_string()), coercer.serialize(&instant.into()));
    }

    #[test]
    fn test_serialize_instant_in_zone() {
        let instant = Utc.with_ymd_and_hms(2011, 12, 3, 22, 0, 0).unwrap();
        let east = DateCoercer::<FixedOffset>::with_zone(FixedOffset::east_opt(5 * 3600).unwrap());
        let west = DateCoercer::<FixedOffset>::with_zone(FixedOffset::west_opt(5 * 3600).unwrap());
        assert_eq!(Ok("2011-12-04".to_string()), east.serialize(&instant.into()));
        assert_eq!(Ok("2011-12-03".to_string()), west.serialize(&instant.into()));
    }

    #[rstest]
    fn test_serialize_string(coercer: DateCoercer) {
        assert_eq!(Ok("2011-12-03".to_string()), coercer.serialize(&"2011-12-03".into()));
    }

    #[rstest]
    fn test_serialize_bad_string(coercer: DateCoercer) {
        let err = coercer.serialize(&"2011-12-03X".into()).unwrap_err();
        assert_eq!(ErrorKind::Serialize, err.kind());
        assert_eq!(
            "Error parsing value '2011-12-03X' to serialize as a LocalDate. Expected to be in the ISO local date format, such as '2011-12-03'",
            err.message()
        );
        assert_eq!(Some(&Cause::Shape { shape: "YYYY-MM-DD" }), err.cause());
    }

    #[rstest]
    #[case(Value::Boolean(true), "Failed to serialize value true as a LocalDate. Expected a type 'String', 'Instant' or 'Temporal' but was 'Boolean'.")]
    #[case(Value::Int(1323475200000), "Failed to serialize value 1323475200000 as a LocalDate. Expected a type 'String', 'Instant' or 'Temporal' but was 'Int'.")]
    fn test_serialize_bad_type(
        coercer: DateCoercer,
        #[case] value: Value,
        #[case] expected: &str,
    ) {
        let err = coercer.serialize(&value).unwrap_err();
        assert_eq!(ErrorKind::Serialize, err.kind());
        assert_eq!(expected, err.message());
    }

    #[rstest]
    fn test_serialize_bad_temporal_type(coercer: DateCoercer) {
        let time = NaiveTime::from_hms_opt(10, 15, 30).unwrap();
        let err = coercer.serialize(&time.into()).unwrap_err();
        assert_eq!("Failed to serialize value 10:15:30 as a LocalDate.", err.message());
        assert_eq!(
            Some(&Cause::MissingFields {
                scalar: "LocalDate"
            }),
            err.cause()
        );
    }

    #[rstest]
    #[case("1753-01-01")]
    #[case("2011-12-03")]
    #[case("2024-02-29")]
    #[case("9999-12-31")]
    fn test_round_trip(coercer: DateCoercer, #[case] text: &str) {
        let date = coercer.parse_value(&text.into()).unwrap();
        assert_eq!(Ok(text.to_string()), coercer.serialize(&date.into()));
    }
}
