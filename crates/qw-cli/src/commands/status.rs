use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use qw_validate::ValidationStatus;

use super::{load_project, print_json};

/// Show the condensed status view. A project with errors still prints its
/// status and exits successfully.
pub fn run(path: &Path, json: bool) -> Result<(), String> {
    let project = load_project(path)?;
    let result = qw_validate::validate_project(&project);
    let status = ValidationStatus::from_result(&result);

    if json {
        return print_json(&status);
    }

    let yes_no = |b: bool| if b { "yes".green() } else { "no".red() };

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Check", "Value"]);
    table.add_row(vec!["Valid".to_string(), yes_no(status.is_valid).to_string()]);
    table.add_row(vec![
        "Export ready".to_string(),
        yes_no(status.export_ready).to_string(),
    ]);
    table.add_row(vec!["Errors".to_string(), status.error_count.to_string()]);
    table.add_row(vec!["Warnings".to_string(), status.warning_count.to_string()]);
    table.add_row(vec![
        "Last validated".to_string(),
        status.last_validated.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    ]);
    println!("{table}");
    Ok(())
}
