use chrono::{TimeZone, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use localscalar::{
    Coercer, CoercionError, DateCoercer, DateTimeCoercer, Literal, LiteralError, Scalar, Value,
};
use tracing_subscriber::EnvFilter;

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("{0}")]
    Coercion(#[from] CoercionError),

    #[error("{0}")]
    UnparseableLiteral(#[from] LiteralError),
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum, Debug)]
enum ScalarArg {
    /// `YYYY-MM-DD`
    Date,
    /// `YYYY-MM-DDTHH:MM:SS[.fraction]`
    DateTime,
}

/// The value to parse. Exactly one is required.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct InputArg {
    /// Parse ISO-8601 text.
    #[arg(long, value_name = "TEXT")]
    text: Option<String>,

    /// Parse a number of milliseconds since Epoch.
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    millis: Option<i64>,
}

impl InputArg {
    fn to_value(&self) -> Value {
        // the group is exclusive, so at most one of these is set
        if let Some(text) = &self.text {
            return Value::String(text.clone());
        }
        if let Some(millis) = self.millis {
            return Value::Int(millis);
        }
        // clap requires one of them; null is rejected by the coercer rather than panicking here
        Value::Null
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The scalar to coerce to.
    #[arg(short, long, value_enum, global = true, default_value_t = ScalarArg::Date)]
    scalar: ScalarArg,

    /// Resolve epoch milliseconds in UTC instead of the system's local time zone.
    #[arg(long, global = true)]
    utc: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Re-serializes ISO-8601 text as canonical text
    Serialize {
        /// The text to serialize
        text: String,
    },

    /// Parses a variable value (text or epoch milliseconds) into a canonical value
    ParseValue {
        #[command(flatten)]
        input: InputArg,
    },

    /// Parses a literal written in query syntax, such as `"2011-12-03"` or `1323475200000`
    ParseLiteral {
        /// The literal, e.g. a double-quoted string or an integer
        #[arg(allow_hyphen_values = true)]
        literal: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match do_work(cli) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

fn do_work(cli: Cli) -> Result<String, CliError> {
    match (cli.scalar, cli.utc) {
        (ScalarArg::Date, false) => run(&DateCoercer::new(), cli.command),
        (ScalarArg::Date, true) => run(&DateCoercer::<Utc>::with_zone(Utc), cli.command),
        (ScalarArg::DateTime, false) => run(&DateTimeCoercer::new(), cli.command),
        (ScalarArg::DateTime, true) => run(&DateTimeCoercer::<Utc>::with_zone(Utc), cli.command),
    }
}

fn run<S: Scalar, Z: TimeZone>(
    coercer: &Coercer<S, Z>,
    command: Commands,
) -> Result<String, CliError> {
    let output = match command {
        Commands::Serialize { text } => coercer.serialize(&Value::String(text))?,
        Commands::ParseValue { input } => S::format(&coercer.parse_value(&input.to_value())?),
        Commands::ParseLiteral { literal } => {
            let literal: Literal = literal.parse()?;
            S::format(&coercer.parse_literal(&literal)?)
        }
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rstest::*;

    fn work(args: &[&str]) -> Result<String, CliError> {
        let cli = Cli::try_parse_from(std::iter::once("localscalar").chain(args.iter().copied())).unwrap();
        do_work(cli)
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[rstest]
    #[case(&["serialize", "2011-12-03"], "2011-12-03")]
    #[case(&["--scalar", "date-time", "serialize", "2011-12-03T10:15:30+01:00"], "2011-12-03T10:15:30")]
    #[case(&["parse-value", "--text", "2011-12-03"], "2011-12-03")]
    #[case(&["--utc", "parse-value", "--millis", "1323475200000"], "2011-12-10")]
    #[case(&["-s", "date-time", "--utc", "parse-value", "--millis", "-6847804800000"], "1753-01-01T00:00:00")]
    #[case(&["--utc", "parse-literal", "1323475200000"], "2011-12-10")]
    #[case(&["parse-literal", "\"2011-12-03\""], "2011-12-03")]
    fn test_ok(#[case] args: &[&str], #[case] expected: &str) {
        assert_eq!(expected, work(args).unwrap());
    }

    #[rstest]
    #[case(
        &["parse-value", "--text", "1752-12-01"],
        "LocalDate value 1752-12-01 must be between January 1, 1753 and December 31, 9999. Received: 1752-12-01"
    )]
    #[case(
        &["parse-literal", "true"],
        "Error parsing BooleanValue literal true as it is the incorrect type. Expected a string or an integer."
    )]
    #[case(
        &["parse-literal", "[1]"],
        "Unsupported literal syntax `[1]`. Expected a string, number, boolean, null, enum or variable"
    )]
    fn test_err(#[case] args: &[&str], #[case] expected: &str) {
        assert_eq!(expected, work(args).unwrap_err().to_string());
    }

    #[test]
    fn test_missing_input_is_rejected() {
        let input = InputArg {
            text: None,
            millis: None,
        };
        assert_eq!(Value::Null, input.to_value());

        let err = run(
            &DateCoercer::<Utc>::with_zone(Utc),
            Commands::ParseValue { input },
        )
        .unwrap_err();
        assert_eq!(
            "Error parsing value null of type 'Null' as it is the incorrect type. Expected a string or an integer.",
            err.to_string()
        );
    }

    #[test]
    fn test_parse_value_requires_input() {
        assert!(Cli::try_parse_from(["localscalar", "parse-value"]).is_err());
        assert!(Cli::try_parse_from([
            "localscalar",
            "parse-value",
            "--text",
            "2011-12-03",
            "--millis",
            "0"
        ])
        .is_err());
    }
}
