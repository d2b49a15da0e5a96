use clap::{Parser, Subcommand};
use royalbit_sheetlens::cli;
use royalbit_sheetlens::error::LensResult;
use royalbit_sheetlens::excel::{DEFAULT_PREVIEW_COLS, DEFAULT_PREVIEW_ROWS};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sheetlens")]
#[command(about = "Read-only Excel inspector: sheet statistics, cached values, formula search.")]
#[command(long_about = "Sheetlens - Read-only Excel workbook inspector
Shows formulas and the values Excel cached on last save. Never recalculates.

COMMANDS:
  sheets   - List sheet names
  summary  - Per-sheet extents, non-empty cells and formula counts
  preview  - Grid of cached values (formulas are not shown)
  cells    - Every non-empty cell of a sheet with its formula
  search   - Case-insensitive substring search over formula text
  export   - Write the sheet summary as JSON or YAML

EXAMPLES:
  sheetlens summary plan.xlsx
  sheetlens preview plan.xlsx \"Week 1\" --rows 10 --cols 6
  sheetlens search plan.xlsx SUM
  sheetlens export plan.xlsx summary.json

The workbook argument falls back to $SHEETLENS_WORKBOOK.
Log verbosity follows $RUST_LOG (default: warnings only).")]
#[command(version)]
struct Cli {
    /// Show verbose output and debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List sheet names in workbook order
    Sheets {
        /// Path to Excel file (.xlsx, .xlsm, .xls, .xlsb, .ods)
        #[arg(env = "SHEETLENS_WORKBOOK")]
        file: PathBuf,
    },

    /// Show per-sheet statistics and workbook totals
    Summary {
        /// Path to Excel file
        #[arg(env = "SHEETLENS_WORKBOOK")]
        file: PathBuf,
    },

    #[command(long_about = "Preview the cached values of a sheet.

Shows the values Excel stored on last save, starting at A1, clipped to the
sheet's extent and to --rows/--cols. Formula text is never shown here; use
'cells' or 'search' for that.")]
    /// Preview cached values of a sheet
    Preview {
        /// Path to Excel file
        file: PathBuf,

        /// Sheet name
        sheet: String,

        /// Maximum rows to show
        #[arg(short, long, default_value_t = DEFAULT_PREVIEW_ROWS)]
        rows: u32,

        /// Maximum columns to show
        #[arg(short, long, default_value_t = DEFAULT_PREVIEW_COLS)]
        cols: u32,
    },

    /// List every non-empty cell of a sheet with value and formula
    Cells {
        /// Path to Excel file
        file: PathBuf,

        /// Sheet name
        sheet: String,
    },

    #[command(long_about = "Search formula text across all sheets.

Matches are case-insensitive substrings of the formula text (including the
leading '='). Without a query, every formula in the workbook is listed.
Results are ordered by sheet, then row, then column.

EXAMPLES:
  sheetlens search plan.xlsx            # all formulas
  sheetlens search plan.xlsx vlookup    # formulas using VLOOKUP")]
    /// Search formulas by substring (case-insensitive)
    Search {
        /// Path to Excel file
        file: PathBuf,

        /// Text to look for in formulas (empty = all formulas)
        query: Option<String>,
    },

    /// Export the sheet summary (.json, or .yaml/.yml)
    Export {
        /// Path to Excel file
        file: PathBuf,

        /// Output file path
        output: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "sheetlens=debug,royalbit_sheetlens=debug"
    } else {
        "sheetlens=warn,royalbit_sheetlens=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> LensResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let verbose = cli.verbose;

    match cli.command {
        Commands::Sheets { file } => cli::sheets(file, verbose),

        Commands::Summary { file } => cli::summary(file, verbose),

        Commands::Preview {
            file,
            sheet,
            rows,
            cols,
        } => cli::preview(file, sheet, rows, cols, verbose),

        Commands::Cells { file, sheet } => cli::cells(file, sheet, verbose),

        Commands::Search { file, query } => cli::search(file, query, verbose),

        Commands::Export { file, output } => cli::export(file, output, verbose),
    }
}
