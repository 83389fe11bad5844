use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use quiz_core::model::{QuestionBank, QuizSettings};
use services::{Clock, LineSource, QuizRunner};
use storage::repository::Storage;
use tracing_subscriber::EnvFilter;

mod menu;

use menu::Menu;

const TIME_LIMIT_ENV: &str = "QUIZ_TIME_LIMIT_SECS";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidTimeLimit { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidTimeLimit { raw } => write!(
                f,
                "invalid time limit: {raw} (expected {}-{} seconds)",
                QuizSettings::MIN_TIME_LIMIT_SECS,
                QuizSettings::MAX_TIME_LIMIT_SECS
            ),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--time-limit <secs>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --time-limit {}", QuizSettings::DEFAULT_TIME_LIMIT_SECS);
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  {TIME_LIMIT_ENV}, RUST_LOG");
}

#[derive(Debug, PartialEq, Eq)]
enum Parsed {
    Run(Args),
    Help,
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    settings: QuizSettings,
}

impl Args {
    /// Flags override the environment value, which overrides the default.
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env_time_limit: Option<String>,
    ) -> Result<Parsed, ArgsError> {
        let mut settings = match env_time_limit {
            Some(raw) => parse_time_limit(raw)?,
            None => QuizSettings::default(),
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--time-limit" => {
                    let value = require_value(args, "--time-limit")?;
                    settings = parse_time_limit(value)?;
                }
                "--help" | "-h" => return Ok(Parsed::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Parsed::Run(Self { settings }))
    }
}

fn parse_time_limit(raw: String) -> Result<QuizSettings, ArgsError> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .and_then(|secs| QuizSettings::with_time_limit_secs(secs).ok())
        .ok_or(ArgsError::InvalidTimeLimit { raw })
}

fn init_tracing() {
    // Logs go to stderr so they never interleave with prompts on stdout.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv, std::env::var(TIME_LIMIT_ENV).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    let args = match parsed {
        Parsed::Run(args) => args,
        Parsed::Help => {
            print_usage();
            return Ok(());
        }
    };

    let storage = Storage::in_memory();
    let runner = QuizRunner::new(
        Clock::default_clock(),
        QuestionBank::seeded()?,
        Arc::clone(&storage.users),
    )
    .with_settings(args.settings);

    // The stdin lock lives only for this scope and is released on every return path.
    let stdin = io::stdin();
    let mut input = LineSource::new(stdin.lock());
    let stdout = io::stdout();
    let mut out = stdout.lock();

    Menu::new(&runner, &mut input, &mut out).run()?;
    out.flush()?;
    Ok(())
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
