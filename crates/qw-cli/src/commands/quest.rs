use std::path::Path;

use colored::Colorize;

use super::{load_project, print_issues, print_json, verdict};

pub fn run(path: &Path, quest_id: &str, json: bool) -> Result<(), String> {
    let project = load_project(path)?;
    let graph = qw_core::Graph::from_project(&project);
    let result = qw_validate::validate_quest_in(&graph, quest_id).map_err(|e| e.to_string())?;

    if json {
        print_json(&result)?;
        return if result.is_valid {
            Ok(())
        } else {
            Err(format!("validation failed with {} error(s)", result.errors.len()))
        };
    }

    let title = project
        .quest(quest_id)
        .map(|q| q.title.clone())
        .unwrap_or_else(|_| quest_id.to_string());
    println!(
        "\n  {} {}\n",
        title.bold().underline(),
        format!("({quest_id}, {} edges)", result.summary.total_edges).dimmed()
    );

    print_issues(&result);
    verdict(&result)
}
