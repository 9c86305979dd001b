use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use qw_simulation::{BatchSummary, SimulationRequest, run_batch, save_all};

use super::{load_project, open_store, print_json};

fn load_requests(path: &Path) -> Result<Vec<SimulationRequest>, String> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    serde_json::from_str(&json).map_err(|e| format!("invalid requests in {}: {e}", path.display()))
}

pub fn run(
    path: &Path,
    requests_path: &Path,
    store: Option<&Path>,
    json: bool,
) -> Result<(), String> {
    let project = load_project(path)?;
    let requests = load_requests(requests_path)?;
    if requests.is_empty() {
        return Err(format!("no requests in {}", requests_path.display()));
    }

    let outcomes = run_batch(&project, &requests);
    let summary = BatchSummary::from_outcomes(&outcomes);

    if let Some(dir) = store {
        let store = open_store(dir)?;
        let results: Vec<_> = outcomes.into_iter().filter_map(Result::ok).collect();
        let failed_saves: Vec<_> = save_all(&store, &results)
            .into_iter()
            .filter_map(Result::err)
            .collect();
        for e in &failed_saves {
            eprintln!("{} {e}", "save failed:".red());
        }
    }

    if json {
        return print_json(&summary);
    }

    println!(
        "  {} {}",
        "Batch".bold(),
        format!(
            "({} requests, {} succeeded, {} failed)",
            summary.total, summary.succeeded, summary.failed
        )
        .dimmed()
    );
    println!();

    if !summary.results.is_empty() {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec![
            "Id", "Player", "Style", "Seed", "Done", "Failed", "XP", "Seconds", "Stopped",
        ]);
        for r in &summary.results {
            table.add_row(vec![
                r.id.to_string(),
                r.player_name.clone(),
                r.play_style.to_string(),
                r.seed.to_string(),
                r.quests_completed.to_string(),
                r.quests_failed.to_string(),
                r.experience_gained.to_string(),
                r.duration_seconds.to_string(),
                r.termination.to_string(),
            ]);
        }
        println!("{table}");
        println!();
    }

    for e in &summary.errors {
        println!("  {} {e}", "FAIL".red().bold());
    }
    Ok(())
}
