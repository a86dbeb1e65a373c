//! Output formatting for CLI

use annotest_common::{TestCollection, TestRecord};
use annotest_e2e::{ResultCollection, TestOutcome};
use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Trait for items that can be displayed in a table
pub trait TableDisplay {
    fn headers() -> Vec<&'static str>;
    fn row(&self) -> Vec<String>;
}

impl TableDisplay for TestRecord {
    fn headers() -> Vec<&'static str> {
        vec!["Test", "File", "Actions"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.label(),
            self.file
                .as_ref()
                .map(|f| f.display().to_string())
                .unwrap_or_else(|| "-".to_string()),
            self.actions.len().to_string(),
        ]
    }
}

impl TableDisplay for TestOutcome {
    fn headers() -> Vec<&'static str> {
        vec!["Test", "Status", "Error"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.status.to_string(),
            self.error.clone().unwrap_or_default(),
        ]
    }
}

/// Render a list of items as a table
pub fn render_table<T: TableDisplay>(items: &[T]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(T::headers());
    for item in items {
        table.add_row(item.row());
    }
    table
}

/// Print a list of items
pub fn print_list<T: Serialize + TableDisplay>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No items found.");
                return;
            }
            println!("{}", render_table(items));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(items).unwrap_or_default());
        }
    }
}

/// Print the discovered tests
pub fn print_tests(tests: &TestCollection, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(tests).unwrap_or_default());
        }
        OutputFormat::Table => print_list(&tests.tests, format),
    }
}

/// Print per-test outcomes followed by a one-line summary
pub fn print_results(results: &ResultCollection, format: OutputFormat) {
    print_list(&results.tests, format);

    if let OutputFormat::Table = format {
        let summary = results.summary();
        println!(
            "{} passed, {} failed, {} skipped",
            summary.passed.to_string().green(),
            summary.failed.to_string().red(),
            summary.skipped.to_string().yellow(),
        );
    }
}

/// Print success message
pub fn print_success(message: &str) {
    println!("✅ {}", message);
}

/// Print error message
pub fn print_error(message: &str) {
    eprintln!("❌ {}", message);
}
