use crate::error::LensResult;
use crate::excel::{column_letter, WorkbookModel};
use crate::types::{CellRecord, CellValue, WorkbookTotals};
use crate::writer;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Width of one preview column in characters
const PREVIEW_CELL_WIDTH: usize = 14;

/// Format a number for display, removing unnecessary decimal places
fn format_number(n: f64) -> String {
    // Round to 6 decimal places for display
    let rounded = (n * 1e6).round() / 1e6;
    format!("{:.6}", rounded)
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Render a cached value for the terminal
fn format_value(value: &CellValue) -> String {
    match value {
        CellValue::Float(n) => format_number(*n),
        other => other.to_string(),
    }
}

/// Cut `text` to `width` characters, marking the cut with `…`
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn open(file: &Path, verbose: bool) -> LensResult<WorkbookModel> {
    if verbose {
        println!("{}", "📖 Reading Excel file...".cyan());
    }
    let model = WorkbookModel::open(file)?;
    if verbose {
        println!("   Found {} sheets\n", model.sheet_names().len());
    }
    Ok(model)
}

fn print_header(title: &str, file: &Path) {
    println!("{}", format!("🔎 Sheetlens - {}", title).bold().green());
    println!("   Workbook: {}\n", file.display());
}

fn print_record(record: &CellRecord) {
    let value = format_value(&record.value);
    match &record.formula {
        Some(formula) => println!(
            "   {}!{}  {}  → {}",
            record.sheet.bright_blue(),
            record.address.bold(),
            formula.bright_yellow(),
            if value.is_empty() {
                "(no cached value)".dimmed().to_string()
            } else {
                value.green().to_string()
            }
        ),
        None => println!(
            "   {}!{}  {}",
            record.sheet.bright_blue(),
            record.address.bold(),
            value
        ),
    }
}

/// Execute the sheets command - list sheet names in workbook order
pub fn sheets(file: PathBuf, verbose: bool) -> LensResult<()> {
    print_header("Sheets", &file);
    let model = open(&file, verbose)?;

    for (idx, name) in model.sheet_names().iter().enumerate() {
        println!("   {:>3}. {}", idx + 1, name.bright_blue());
    }
    println!();

    Ok(())
}

/// Execute the summary command - per-sheet statistics plus workbook totals
pub fn summary(file: PathBuf, verbose: bool) -> LensResult<()> {
    print_header("Sheet Summary", &file);
    let model = open(&file, verbose)?;

    let summaries = model.all_summaries()?;
    let title_width = summaries
        .iter()
        .map(|s| s.title.chars().count())
        .max()
        .unwrap_or(0)
        .max("Sheet".len());

    println!(
        "   {:<width$}  {:>8}  {:>8}  {:>10}  {:>9}",
        "Sheet".bold(),
        "Rows".bold(),
        "Columns".bold(),
        "Non-empty".bold(),
        "Formulas".bold(),
        width = title_width
    );
    println!("   {}", "─".repeat(title_width + 45));
    for s in &summaries {
        println!(
            "   {:<width$}  {:>8}  {:>8}  {:>10}  {:>9}",
            s.title.bright_blue(),
            s.max_row,
            s.max_column,
            s.nonempty_cells,
            s.formula_count,
            width = title_width
        );
    }
    println!();

    let totals = WorkbookTotals::from_summaries(&summaries);
    println!("{}", "📊 Dashboard:".bold().cyan());
    println!("   Sheets:            {}", totals.sheets.to_string().bold());
    println!("   Cells with data:   {}", totals.nonempty_cells.to_string().bold());
    println!("   Total formulas:    {}", totals.formula_count.to_string().bold());
    println!();

    Ok(())
}

/// Execute the preview command - cached values only, formulas are never shown
pub fn preview(
    file: PathBuf,
    sheet: String,
    max_rows: u32,
    max_cols: u32,
    verbose: bool,
) -> LensResult<()> {
    print_header("Sheet Preview", &file);
    let model = open(&file, verbose)?;

    let grid = model.preview(&sheet, max_rows, max_cols)?;
    println!(
        "   Sheet: {} (first {} rows × {} columns)\n",
        sheet.bright_blue().bold(),
        grid.len(),
        grid.first().map(|row| row.len()).unwrap_or(0)
    );

    if grid.is_empty() {
        println!("   {}", "(sheet is empty)".dimmed());
        println!();
        return Ok(());
    }

    let mut header = format!("   {:>5} ", "");
    for col in 0..grid[0].len() as u32 {
        header.push_str(&format!(" {:<w$}", column_letter(col), w = PREVIEW_CELL_WIDTH));
    }
    println!("{}", header.bold());

    for (row_idx, row) in grid.iter().enumerate() {
        let mut line = format!("   {:>5} ", (row_idx + 1).to_string().bold());
        for value in row {
            let text = truncate(&format_value(value), PREVIEW_CELL_WIDTH);
            line.push_str(&format!(" {:<w$}", text, w = PREVIEW_CELL_WIDTH));
        }
        println!("{}", line);
    }
    println!();

    Ok(())
}

/// Execute the cells command - every non-empty coordinate of one sheet
pub fn cells(file: PathBuf, sheet: String, verbose: bool) -> LensResult<()> {
    print_header("Cells", &file);
    let model = open(&file, verbose)?;

    let mut count = 0;
    for record in model.cells(&sheet)? {
        print_record(&record);
        count += 1;
    }
    println!();
    println!("   {} cells in {}", count.to_string().bold(), sheet.bright_blue());
    println!();

    Ok(())
}

/// Execute the search command - substring search over formula text
pub fn search(file: PathBuf, query: Option<String>, verbose: bool) -> LensResult<()> {
    print_header("Formula Search", &file);
    let query = query.unwrap_or_default();
    if !query.is_empty() {
        println!("   Query: {}\n", query.bright_yellow().bold());
    }

    let model = open(&file, verbose)?;
    let results = model.find_formulas(&query)?;

    if results.is_empty() {
        println!("   {}", "No matching formulas".yellow());
    } else {
        for record in &results {
            print_record(record);
        }
    }
    println!();
    println!("{} {} matches", "✅".green(), results.len().to_string().bold());
    println!();

    Ok(())
}

/// Execute the export command - write the summary document
pub fn export(file: PathBuf, output: PathBuf, verbose: bool) -> LensResult<()> {
    print_header("Summary Export", &file);
    let model = open(&file, verbose)?;

    if verbose {
        println!("{}", "💾 Writing summary...".cyan());
    }
    let written = writer::export_summary(&model, &output)?;

    println!("{}", "✅ Export Complete!".bold().green());
    println!("   Summary saved to {}\n", written.display());

    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
