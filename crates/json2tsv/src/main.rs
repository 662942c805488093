//! json2tsv: read one JSON document from stdin and write one TSV record per
//! container and scalar to stdout.
//!
//! ```text
//! $ echo '{"a":[1,"x"]}' | json2tsv -n
//! 	o
//! .a	a
//! .a[0]	n	1
//! .a[1]	s	x
//! ```

use std::io::{self, BufWriter, Read, Write};

use jsonevents::{
    ErrorSource, ParserError, parse_reader,
    tsv::{TsvOptions, TsvWriter},
};
use thiserror::Error;
use tracing::debug;

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_USAGE: i32 = 2;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Parse(ParserError<io::Error, io::Error>),
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("unrecognized argument '{0}'")]
    Usage(String),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => EXIT_USAGE,
            CliError::Parse(_) | CliError::Io(_) => EXIT_FAILURE,
        }
    }

    /// A closed stdout ends the program without a message.
    fn is_broken_pipe(&self) -> bool {
        let io = match self {
            CliError::Io(e) => e,
            CliError::Parse(e) => match e.error_source() {
                ErrorSource::Sink(e) => e,
                _ => return false,
            },
            CliError::Usage(_) => return false,
        };
        io.kind() == io::ErrorKind::BrokenPipe
    }
}

impl From<ParserError<io::Error, io::Error>> for CliError {
    fn from(e: ParserError<io::Error, io::Error>) -> Self {
        CliError::Parse(e)
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Convert(TsvOptions),
    Help,
    Version,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Command, CliError> {
    let mut options = TsvOptions::default();
    for arg in args {
        match arg.as_str() {
            "-n" => options.show_indices = true,
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            _ => return Err(CliError::Usage(arg)),
        }
    }
    Ok(Command::Convert(options))
}

fn run<R: Read, W: Write>(input: R, output: W, options: TsvOptions) -> Result<(), CliError> {
    let mut writer = TsvWriter::new(output, options);
    parse_reader(input, &mut writer)?;
    writer.flush()?;
    Ok(())
}

fn print_help() {
    eprintln!("json2tsv {VERSION} - convert JSON to tab-separated records\n");
    eprintln!("USAGE:");
    eprintln!("    json2tsv [-n] < input.json\n");
    eprintln!("OPTIONS:");
    eprintln!("    -n                Show array indices instead of []");
    eprintln!("    -h, --help        Print this help");
    eprintln!("    -V, --version     Print the version\n");
    eprintln!("Each record is: path TAB type TAB value, with type one of");
    eprintln!("a (array), o (object), s (string), b (bool), n (number), ? (null).");
    eprintln!("RUST_LOG controls diagnostic output on stderr.");
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let result = parse_args(std::env::args().skip(1)).and_then(|command| match command {
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Version => {
            println!("json2tsv {VERSION}");
            Ok(())
        }
        Command::Convert(options) => {
            debug!(?options, "converting stdin");
            run(io::stdin().lock(), BufWriter::new(io::stdout().lock()), options)
        }
    });

    match result {
        Ok(()) => std::process::exit(EXIT_SUCCESS),
        Err(e) if e.is_broken_pipe() => std::process::exit(EXIT_FAILURE),
        Err(e) => {
            eprintln!("error: {e}");
            if matches!(e, CliError::Usage(_)) {
                eprintln!("usage: json2tsv [-n] < input.json");
            }
            std::process::exit(e.exit_code());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use jsonevents::ErrorKind;

    use super::*;

    fn args(list: &[&str]) -> Result<Command, CliError> {
        parse_args(list.iter().map(|s| (*s).to_string()))
    }

    fn convert(input: &str, show_indices: bool) -> Result<String, CliError> {
        let mut out = Vec::new();
        run(Cursor::new(input), &mut out, TsvOptions { show_indices })?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn parses_flags() {
        assert_eq!(args(&[]).unwrap(), Command::Convert(TsvOptions::default()));
        assert_eq!(
            args(&["-n"]).unwrap(),
            Command::Convert(TsvOptions { show_indices: true })
        );
        assert_eq!(args(&["-n", "--help"]).unwrap(), Command::Help);
        assert_eq!(args(&["-V"]).unwrap(), Command::Version);
    }

    #[test]
    fn unknown_flag_is_a_usage_error() {
        let err = args(&["-x"]).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_USAGE);
        assert_eq!(err.to_string(), "unrecognized argument '-x'");
        assert!(args(&["input.json"]).is_err());
    }

    #[test]
    fn converts_document() {
        assert_eq!(
            convert(r#"{"a":[1,"x"]}"#, true).unwrap(),
            "\to\t\n.a\ta\t\n.a[0]\tn\t1\n.a[1]\ts\tx\n"
        );
        assert_eq!(
            convert(r#"{"a":[1,"x"]}"#, false).unwrap(),
            "\to\t\n.a\ta\t\n.a[]\tn\t1\n.a[]\ts\tx\n"
        );
    }

    #[test]
    fn empty_input_writes_nothing() {
        assert_eq!(convert("  \n", false).unwrap(), "");
    }

    #[test]
    fn invalid_input_fails() {
        let err = convert("[1,]", false).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_FAILURE);
        assert!(!err.is_broken_pipe());
        let CliError::Parse(parse) = &err else {
            panic!("expected a parse error, got {err:?}");
        };
        assert_eq!(parse.kind(), ErrorKind::InvalidSyntax);
        assert_eq!(err.to_string(), "syntax error: invalid character ']' at 1:4");
    }

    #[test]
    fn closed_output_is_quiet() {
        struct Closed;
        impl Write for Closed {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::ErrorKind::BrokenPipe.into())
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let err = run(Cursor::new("[1]"), Closed, TsvOptions::default()).unwrap_err();
        assert!(err.is_broken_pipe());
        assert_eq!(err.exit_code(), EXIT_FAILURE);
    }
}
