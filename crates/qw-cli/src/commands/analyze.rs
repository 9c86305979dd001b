use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use qw_simulation::{EventSeverity, ResultStore, analyze};

use super::{open_store, parse_id, print_json};

pub fn run(dir: &Path, id: &str, json: bool) -> Result<(), String> {
    let store = open_store(dir)?;
    let result = store.load(parse_id(id)?).map_err(|e| e.to_string())?;
    let analysis = analyze(&result);

    if json {
        return print_json(&analysis);
    }

    let stats = &analysis.basic_stats;
    println!(
        "  {} {}",
        "Analysis".bold(),
        analysis.simulation_id.to_string().dimmed()
    );
    println!(
        "  {}/{} quests completed ({:.0}%), {} failed",
        stats.quests_completed,
        stats.quests_attempted,
        stats.success_rate * 100.0,
        stats.quests_failed
    );
    println!(
        "  {}s simulated, {} experience, {} events",
        stats.duration_seconds, stats.experience_gained, stats.total_events
    );
    println!();

    let rep = &analysis.reputation_analysis;
    if !rep.final_standing.is_empty() {
        println!("  {}", "Reputation".bold().underline());
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Faction", "Change", "Final"]);
        for (faction, standing) in &rep.final_standing {
            let change = rep.changes.get(faction).copied().unwrap_or(0);
            table.add_row(vec![faction.clone(), format!("{change:+}"), standing.to_string()]);
        }
        println!("{table}");
        if let Some(f) = &rep.most_improved {
            println!("  most improved: {}", f.green());
        }
        if let Some(f) = &rep.most_damaged {
            println!("  most damaged: {}", f.red());
        }
        println!();
    }

    let align = &analysis.alignment_analysis;
    println!("  {}", "Alignment".bold().underline());
    println!(
        "  good {} -> {}, neutral {} -> {}, evil {} -> {} (dominant: {:?})",
        align.initial.good,
        align.final_alignment.good,
        align.initial.neutral,
        align.final_alignment.neutral,
        align.initial.evil,
        align.final_alignment.evil,
        align.dominant
    );
    println!();

    let timeline = &analysis.event_timeline;
    println!("  {}", "Events".bold().underline());
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Kind", "Count"]);
    for (kind, count) in &timeline.histogram {
        table.add_row(vec![kind.to_string(), count.to_string()]);
    }
    println!("{table}");

    if !timeline.critical_events.is_empty() {
        println!();
        println!("  {}", "Critical Events".bold().underline());
        for event in &timeline.critical_events {
            let ts = format!("[{:>5}s]", event.timestamp_seconds).dimmed();
            let desc = match event.severity {
                EventSeverity::Error => event.description.red(),
                _ => event.description.green(),
            };
            println!("  {ts} {desc}");
        }
    }
    Ok(())
}
