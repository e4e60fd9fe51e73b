use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use regex::Regex;
use tabpipe::{MatcherSet, RangeSpec, StreamOptions, decode_escapes, process_stream};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "tabpipe",
    version,
    about = "Re-tokenize screen-oriented text streams into aligned tables"
)]
struct Cli {
    /// Input file; standard input when omitted.
    #[arg(short, long, env = "TABPIPE_INPUT")]
    input: Option<PathBuf>,

    /// Output file; standard output when omitted.
    #[arg(short, long, env = "TABPIPE_OUTPUT")]
    output: Option<PathBuf>,

    /// Maximum output lines per cell before content is dropped.
    #[arg(
        short = 'l',
        long,
        default_value_t = 1,
        env = "TABPIPE_MAX_LINES_PER_ROW"
    )]
    max_lines_per_row: usize,

    /// Show table borders.
    #[arg(short, long, env = "TABPIPE_BORDERS")]
    borders: bool,

    /// Rows to keep: a single index or start:stop[:step], negatives count
    /// from the end.
    #[arg(long, default_value = "0:", env = "TABPIPE_ROW_RANGE")]
    row_range: String,

    /// Columns to keep: a single index or start:stop[:step], negatives count
    /// from the end.
    #[arg(short, long, default_value = "0:", env = "TABPIPE_COLUMN_RANGE")]
    column_range: String,

    /// Pattern extracting header cells; every non-overlapping match becomes
    /// one cell.
    #[arg(
        long,
        default_value = tabpipe::DEFAULT_CELL_PATTERN,
        env = "TABPIPE_HEADER_PATTERN"
    )]
    header_pattern: String,

    /// Pattern extracting row cells; every non-overlapping match becomes
    /// one cell.
    #[arg(
        short,
        long,
        default_value = tabpipe::DEFAULT_CELL_PATTERN,
        env = "TABPIPE_ROW_PATTERN"
    )]
    row_pattern: String,

    /// Keep only rows matching every rule index:pattern[:flags], rules
    /// separated by commas. Escape a literal : in the pattern as \:.
    #[arg(short = 'f', long, env = "TABPIPE_ROW_FILTER")]
    row_filter: Option<String>,

    /// Stream separator; escape sequences like \x1b are decoded.
    #[arg(long, default_value = r"\x1b[2J\x1b[H", env = "TABPIPE_SEP")]
    sep: String,

    /// Parse but hide the header line.
    #[arg(short = 'z', long, env = "TABPIPE_HIDE_HEADER")]
    hide_header: bool,

    /// Log the tokenized header and every surviving row to stderr.
    #[arg(short, long, env = "TABPIPE_VERBOSE")]
    verbose: bool,

    /// Print a completion script for the given shell and exit.
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,
}

fn build_options(cli: &Cli) -> Result<StreamOptions> {
    let mut options = StreamOptions::defaults().context("failed to build default options")?;

    options.separator =
        decode_escapes(&cli.sep).map_err(|error| anyhow!("invalid --sep: {error}"))?;
    options.header_pattern =
        Regex::new(&cli.header_pattern).context("failed to parse --header-pattern")?;
    options.row_pattern = Regex::new(&cli.row_pattern).context("failed to parse --row-pattern")?;
    options.row_range =
        RangeSpec::from_str(&cli.row_range).context("failed to parse --row-range")?;
    options.column_range =
        RangeSpec::from_str(&cli.column_range).context("failed to parse --column-range")?;
    if let Some(spec) = cli.row_filter.as_deref() {
        options.row_filter =
            MatcherSet::from_str(spec).context("failed to parse --row-filter")?;
    }
    options.hide_header = cli.hide_header;
    options.borders = cli.borders;
    options.max_lines_per_row = cli.max_lines_per_row.max(1);

    Ok(options)
}

fn run(cli: &Cli) -> Result<()> {
    let options = build_options(cli)?;

    let reader: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open '{}'", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };
    let writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create '{}'", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    let report = process_stream(reader, writer, &options)?;
    tracing::debug!(
        tables = report.table_count,
        rows = report.row_count,
        "stream processed"
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(shell) = cli.completion {
        let mut command = Cli::command();
        let name = command.get_name().to_string();
        clap_complete::generate(shell, &mut command, name, &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    let default_level = if cli.verbose {
        "tabpipe=debug"
    } else {
        "tabpipe=warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(1)
        }
    }
}
