use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use envdoc::render::{OutputFormat, render_diff, render_issues, render_schema};
use envdoc::schema::Schema;
use envdoc::{EnvLoader, Error, Mode, ParseReport};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILE: &str = ".env";
const LOG_ENV: &str = "ENVDOC_LOG";

/// Parse and validate .env files
#[derive(Debug, Parser)]
#[command(name = "envdoc", version, args_conflicts_with_subcommands = true)]
struct Cli {
    /// Escalate warnings to errors and require UPPER_SNAKE_CASE keys.
    #[arg(short, long, global = true, env = "ENVDOC_STRICT")]
    strict: bool,

    /// Print parser diagnostics to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// File to validate when no subcommand is given.
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate a .env file (the default)
    Validate {
        file: Option<PathBuf>,
    },
    /// Generate a schema from a .env file
    Schema(SchemaArgs),
    /// Compare two .env files
    Compare(CompareArgs),
}

#[derive(Debug, Args)]
struct SchemaArgs {
    file: Option<PathBuf>,

    /// Output format (json|yaml|text).
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    /// Output file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Show sensitive values in the generated examples.
    #[arg(long)]
    unmask: bool,
}

#[derive(Debug, Args)]
struct CompareArgs {
    left: Option<PathBuf>,
    right: Option<PathBuf>,

    /// First env file.
    #[arg(long = "env1", conflicts_with = "left")]
    env1: Option<PathBuf>,

    /// Second env file.
    #[arg(long = "env2", conflicts_with = "right")]
    env2: Option<PathBuf>,

    /// Output format (json|yaml|text).
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mode = Mode::from(cli.strict);
    let result = match cli.command {
        None => validate(&file_or_default(cli.file), mode),
        Some(Command::Validate { file }) => validate(&file_or_default(file), mode),
        Some(Command::Schema(args)) => schema(args, mode),
        Some(Command::Compare(args)) => compare(args, mode),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("envdoc: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("envdoc=debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn file_or_default(file: Option<PathBuf>) -> PathBuf {
    file.unwrap_or_else(|| PathBuf::from(DEFAULT_FILE))
}

fn load(path: &Path, mode: Mode) -> Result<ParseReport, Error> {
    EnvLoader::new().path(path).mode(mode).load()
}

fn exit_code(report: &ParseReport) -> ExitCode {
    if report.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn validate(path: &Path, mode: Mode) -> Result<ExitCode, Error> {
    let report = load(path, mode)?;

    print!("{}", render_issues(&report));
    if report.is_clean() {
        println!(
            "✓ {} is valid! Found {} environment variables.",
            path.display(),
            report.env.len()
        );
    }

    Ok(exit_code(&report))
}

fn schema(args: SchemaArgs, mode: Mode) -> Result<ExitCode, Error> {
    let path = file_or_default(args.file);
    let report = load(&path, mode)?;
    eprint!("{}", render_issues(&report));

    let schema = Schema::generate(&report.env, args.unmask);
    let rendered = render_schema(&schema, args.format)?;

    match args.output {
        Some(output) => {
            std::fs::write(&output, rendered).map_err(|source| Error::Write {
                path: output.clone(),
                source,
            })?;
            eprintln!("✓ Schema written to {}", output.display());
        }
        None => println!("{rendered}"),
    }

    Ok(exit_code(&report))
}

fn compare(args: CompareArgs, mode: Mode) -> Result<ExitCode, Error> {
    let (Some(left), Some(right)) = (args.left.or(args.env1), args.right.or(args.env2)) else {
        eprintln!("envdoc: you must provide two env files (either as args or flags)");
        eprintln!("Try `envdoc compare --help`.");
        return Ok(ExitCode::FAILURE);
    };

    let reports = EnvLoader::new()
        .paths([&left, &right])
        .mode(mode)
        .load_all()?;

    for (path, report) in &reports {
        if !report.is_clean() {
            println!("=== Parse Issues: {} ===", path.display());
            print!("{}", render_issues(report));
            println!();
        }
    }

    let mut reports = reports.into_iter().map(|(_, report)| report);
    let (Some(left_report), Some(right_report)) = (reports.next(), reports.next()) else {
        return Ok(ExitCode::FAILURE);
    };
    let diffs = envdoc::diff::compare(&left_report.env, &right_report.env);
    let rendered = render_diff(
        &diffs,
        &left.display().to_string(),
        &right.display().to_string(),
        args.format,
    )?;
    print!("{rendered}");
    if args.format != OutputFormat::Text {
        println!();
    }

    Ok(ExitCode::SUCCESS)
}
