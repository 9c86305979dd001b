pub mod analyze;
pub mod batch;
pub mod compare;
pub mod quest;
pub mod simulate;
pub mod status;
pub mod validate;

use std::path::Path;

use colored::Colorize;
use qw_core::Project;
use qw_simulation::JsonDirStore;
use qw_validate::{Severity, ValidationResult};
use serde::Serialize;
use uuid::Uuid;

/// Load a project file, mapping errors to CLI messages.
fn load_project(path: &Path) -> Result<Project, String> {
    tracing::debug!(path = %path.display(), "loading project");
    Project::load(path).map_err(|e| e.to_string())
}

fn open_store(dir: &Path) -> Result<JsonDirStore, String> {
    JsonDirStore::open(dir).map_err(|e| e.to_string())
}

fn parse_id(s: &str) -> Result<Uuid, String> {
    Uuid::parse_str(s).map_err(|e| format!("invalid simulation id '{s}': {e}"))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}

/// Print every issue of a validation result, errors first.
fn print_issues(result: &ValidationResult) {
    for issue in result.errors.iter().chain(&result.warnings) {
        let label = match issue.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
        };
        let at = issue
            .node_id
            .as_ref()
            .map(|id| format!(" {id}:"))
            .unwrap_or_default();
        println!("  {label} [{}]{at} {}", issue.kind, issue.message);
        for hint in &issue.suggestions {
            println!("    {} {hint}", "hint:".dimmed());
        }
    }
}

/// Print the verdict line and fail when the result has errors.
fn verdict(result: &ValidationResult) -> Result<(), String> {
    let counts = format!(
        "{} error(s), {} warning(s)",
        result.errors.len(),
        result.warnings.len()
    );
    if !result.is_valid {
        println!("\n  {} {}", "invalid".red().bold(), counts.dimmed());
        return Err(format!(
            "validation failed with {} error(s)",
            result.errors.len()
        ));
    }
    if result.export_ready {
        println!("\n  {} {}", "valid, export ready".green().bold(), counts.dimmed());
    } else {
        println!("\n  {} {}", "valid, not export ready".yellow().bold(), counts.dimmed());
    }
    Ok(())
}
