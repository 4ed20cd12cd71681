// zrecon CLI - reconcile a new-system export against a legacy admin export

mod exit_codes;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use serde::Serialize;

use zrecon_engine::{reconcile, Mode, OutputRecord, SingleKeyRecord};
use zrecon_io::{ColumnSpec, SourceError};

use exit_codes::{EXIT_CONFIG, EXIT_READ, EXIT_SUCCESS, EXIT_USAGE, EXIT_WRITE};

#[derive(Parser)]
#[command(name = "zrecon")]
#[command(about = "Reconcile a new-system export against a legacy admin export")]
#[command(version)]
#[command(after_help = "\
Examples:
  zrecon export.xlsx admin.yaml
  zrecon export.xlsx admin.yaml --only accounts --output out
  zrecon export.csv admin.csv --key-column guid --all-columns --json
  zrecon export.csv admin.csv --key-column guid \\
      --columns zuora_account_number_for_client,subscription_number_created_1 \\
      --admin-columns client_business_id,zuora_account_number")]
struct Cli {
    /// New-system export (.xlsx, .xls, .yaml, .yml or .csv)
    input: PathBuf,

    /// Legacy admin export (.xlsx, .xls, .yaml, .yml or .csv)
    admin: PathBuf,

    /// Which datasets to build
    #[arg(long, value_enum, default_value_t = OnlyArg::All)]
    only: OnlyArg,

    /// Output directory for the JSON files
    #[arg(long, default_value = "output")]
    output: PathBuf,

    /// Settings document (default: probe the zrecon.yml locations)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Shared lookup (key) column name in both exports
    #[arg(long)]
    key_column: Option<String>,

    /// Field columns to extract from the input export (skips the picker)
    #[arg(long, value_delimiter = ',', requires = "key_column")]
    columns: Vec<String>,

    /// Field columns to extract from the admin export (skips the picker)
    #[arg(long, value_delimiter = ',', requires = "key_column")]
    admin_columns: Vec<String>,

    /// Extract every non-key column from both exports (skips the picker)
    #[arg(long, requires = "key_column", conflicts_with_all = ["columns", "admin_columns"])]
    all_columns: bool,

    /// Print the combined report as JSON to stdout
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OnlyArg {
    Accounts,
    Subscriptions,
    All,
}

impl From<OnlyArg> for Mode {
    fn from(arg: OnlyArg) -> Self {
        match arg {
            OnlyArg::Accounts => Mode::Accounts,
            OnlyArg::Subscriptions => Mode::Subscriptions,
            OnlyArg::All => Mode::All,
        }
    }
}

/// Combined report, one dataset per requested mode. Skipped datasets are
/// omitted from the JSON entirely.
#[derive(Default, Serialize)]
struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    accounts: Option<Vec<OutputRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subscriptions: Option<Vec<OutputRecord>>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {message}");
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {hint}");
            }
            ExitCode::from(code)
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let (input_spec, admin_spec) = column_specs(&cli)?;

    let settings = match &cli.config {
        Some(path) => zrecon_config::load_from(path),
        None => zrecon_config::discover(),
    }
    .map_err(|e| CliError::config(e.to_string()))?;

    let input = read_source(&cli.input, &input_spec)?;
    let admin = read_source(&cli.admin, &admin_spec)?;

    let mode = Mode::from(cli.only);
    let mut report = Report::default();

    if mode.includes_accounts() {
        let rows = reconcile(&input, &admin, &settings, Mode::Accounts);
        summarize("accounts", input.len(), &rows);
        report.accounts = Some(rows);
    }
    if mode.includes_subscriptions() {
        let rows = reconcile(&input, &admin, &settings, Mode::Subscriptions);
        summarize("subscriptions", input.len(), &rows);
        report.subscriptions = Some(rows);
    }

    write_report(&cli.output, &report)?;

    if cli.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::write(format!("JSON serialization error: {e}")))?;
        println!("{json}");
    }

    Ok(())
}

/// Column selection for the two exports. Named flags make the run
/// non-interactive; without them each export gets the stdin picker.
fn column_specs(cli: &Cli) -> Result<(ColumnSpec, ColumnSpec), CliError> {
    let Some(key) = cli.key_column.clone() else {
        if cli.all_columns || !cli.columns.is_empty() || !cli.admin_columns.is_empty() {
            // clap's `requires` already rejects this; kept for direct callers.
            return Err(CliError::usage("--columns/--all-columns require --key-column"));
        }
        return Ok((ColumnSpec::Interactive, ColumnSpec::Interactive));
    };

    let input_spec = if cli.columns.is_empty() {
        ColumnSpec::All { key: key.clone() }
    } else {
        ColumnSpec::Named { key: key.clone(), fields: cli.columns.clone() }
    };
    let admin_spec = if cli.admin_columns.is_empty() {
        ColumnSpec::All { key }
    } else {
        ColumnSpec::Named { key, fields: cli.admin_columns.clone() }
    };

    Ok((input_spec, admin_spec))
}

fn read_source(path: &Path, spec: &ColumnSpec) -> Result<Vec<SingleKeyRecord>, CliError> {
    zrecon_io::read_records(path, spec).map_err(|e| match e {
        SourceError::UnsupportedFileType(_) => CliError::usage(e.to_string())
            .with_hint("supported extensions: .xlsx, .xls, .yaml, .yml, .csv"),
        other => CliError::read(other.to_string()),
    })
}

fn summarize(dataset: &str, input_count: usize, rows: &[OutputRecord]) {
    eprintln!("{dataset}: {} row(s) from {input_count} input record(s)", rows.len());
    if rows.is_empty() && input_count > 0 {
        eprintln!("warning: {dataset} reconciled to 0 rows; check the admin export keys");
    }
}

fn write_report(dir: &Path, report: &Report) -> Result<(), CliError> {
    std::fs::create_dir_all(dir)
        .map_err(|e| CliError::write(format!("cannot create {}: {e}", dir.display())))?;

    if let Some(rows) = &report.accounts {
        write_json(&dir.join("accounts.json"), rows)?;
    }
    if let Some(rows) = &report.subscriptions {
        write_json(&dir.join("subscriptions.json"), rows)?;
    }
    Ok(())
}

fn write_json(path: &Path, rows: &[OutputRecord]) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(rows)
        .map_err(|e| CliError::write(format!("JSON serialization error: {e}")))?;
    std::fs::write(path, json)
        .map_err(|e| CliError::write(format!("cannot write {}: {e}", path.display())))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self { code: EXIT_CONFIG, message: msg.into(), hint: None }
    }

    pub fn read(msg: impl Into<String>) -> Self {
        Self { code: EXIT_READ, message: msg.into(), hint: None }
    }

    pub fn write(msg: impl Into<String>) -> Self {
        Self { code: EXIT_WRITE, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
