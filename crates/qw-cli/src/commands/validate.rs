use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use super::{load_project, print_issues, print_json, verdict};

pub fn run(path: &Path, json: bool) -> Result<(), String> {
    let project = load_project(path)?;
    let result = qw_validate::validate_project(&project);

    if json {
        print_json(&result)?;
        return if result.is_valid {
            Ok(())
        } else {
            Err(format!("validation failed with {} error(s)", result.errors.len()))
        };
    }

    let name = if project.name.is_empty() {
        path.display().to_string()
    } else {
        project.name.clone()
    };
    let summary = &result.summary;
    println!(
        "\n  {} {}",
        name.bold().underline(),
        format!(
            "({} nodes, {} edges)",
            summary.total_nodes, summary.total_edges
        )
        .dimmed()
    );
    println!(
        "  {} story arcs, {} quests, {} dialogues\n",
        summary.story_arcs, summary.quests, summary.dialogues
    );

    print_issues(&result);

    if !summary.by_type.is_empty() {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Issue", "Count"]);
        for (kind, count) in &summary.by_type {
            table.add_row(vec![kind.to_string(), count.to_string()]);
        }
        println!("\n{table}");
    }

    verdict(&result)
}
