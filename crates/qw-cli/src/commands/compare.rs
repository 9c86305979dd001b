use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use qw_simulation::{ResultStore, compare};

use super::{open_store, parse_id, print_json};

/// Compare the given results, or every stored result when no ids are given.
pub fn run(dir: &Path, ids: &[String], json: bool) -> Result<(), String> {
    let store = open_store(dir)?;
    let ids = if ids.is_empty() {
        store.list().map_err(|e| e.to_string())?
    } else {
        ids.iter().map(|s| parse_id(s.as_str())).collect::<Result<Vec<_>, _>>()?
    };
    let results = store.load_many(&ids).map_err(|e| e.to_string())?;
    let comparison = compare(&results);

    if json {
        return print_json(&comparison);
    }

    println!(
        "  {} {}",
        "Comparison".bold(),
        format!("({} simulations)", comparison.total_simulations).dimmed()
    );
    println!(
        "  avg duration {:.0}s, avg experience {:.1}, avg quests completed {:.2}",
        comparison.average_duration,
        comparison.average_experience,
        comparison.average_quests_completed
    );
    let dist = &comparison.alignment_distribution;
    println!(
        "  alignment: {} good, {} neutral, {} evil",
        dist.good, dist.neutral, dist.evil
    );
    println!();

    if !comparison.play_style_analysis.is_empty() {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Style", "Runs", "Avg XP", "Avg Completed", "Success"]);
        for (style, stats) in &comparison.play_style_analysis {
            table.add_row(vec![
                style.to_string(),
                stats.count.to_string(),
                format!("{:.1}", stats.average_experience),
                format!("{:.2}", stats.average_quests_completed),
                format!("{:.0}%", stats.success_rate * 100.0),
            ]);
        }
        println!("{table}");
        println!();
    }

    if !comparison.reputation_changes.is_empty() {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Faction", "Sum", "Runs", "Average"]);
        for (faction, agg) in &comparison.reputation_changes {
            table.add_row(vec![
                faction.clone(),
                format!("{:+}", agg.sum),
                agg.count.to_string(),
                format!("{:+.2}", agg.average),
            ]);
        }
        println!("{table}");
    }
    Ok(())
}
