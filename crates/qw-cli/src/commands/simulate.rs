use std::path::{Path, PathBuf};

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use qw_simulation::{
    EventSeverity, ResultStore, SimEvent, SimulationRequest, SimulationResult, run_request,
};

use super::{load_project, open_store, print_json};

/// Flags of the `simulate` command.
pub struct Options {
    pub arc: String,
    pub style: String,
    pub minutes: u32,
    pub seed: Option<u64>,
    pub player: Option<String>,
    pub store: Option<PathBuf>,
    pub verbose: bool,
    pub json: bool,
}

pub fn run(path: &Path, opts: Options) -> Result<(), String> {
    let project = load_project(path)?;

    let mut request = SimulationRequest::new(opts.arc.as_str())
        .with_play_style(opts.style.as_str())
        .with_max_duration(opts.minutes);
    request.project_id = project.id.as_ref().map(|id| id.to_string());
    if let Some(seed) = opts.seed {
        request = request.with_seed(seed);
    }
    if let Some(player) = opts.player {
        request = request.with_player(player);
    }

    let result =
        run_request(&project, &request).map_err(|e| format!("simulation failed: {e}"))?;

    if let Some(dir) = &opts.store {
        open_store(dir)?.save(&result).map_err(|e| e.to_string())?;
    }

    if opts.json {
        return print_json(&result);
    }

    print_header(&result, &opts.arc);
    if opts.verbose {
        print_event_log(&result.events);
    } else {
        print_notable(&result.events);
    }
    print_player(&result);

    if let Some(dir) = &opts.store {
        println!(
            "  {} {}",
            "Saved".green().bold(),
            dir.join(format!("{}.json", result.id)).display()
        );
    }
    Ok(())
}

fn print_header(result: &SimulationResult, arc: &str) {
    println!(
        "  {} '{}' {}",
        "Simulation".bold(),
        arc,
        format!(
            "(style={}, seed={}, {}s simulated)",
            result.play_style, result.seed, result.duration_seconds
        )
        .dimmed()
    );
    println!(
        "  {} attempted, {} completed, {} failed ({:.0}% success)",
        result.quests_attempted,
        result.quests_completed,
        result.quests_failed,
        result.success_rate() * 100.0
    );
    println!("  Stopped: {}", result.termination);
    println!("  Id: {}", result.id.to_string().dimmed());
    println!();
}

fn colorize_event(event: &SimEvent) -> String {
    match event.severity {
        EventSeverity::Success => event.description.green().to_string(),
        EventSeverity::Error => event.description.red().to_string(),
        EventSeverity::Warning => event.description.yellow().to_string(),
        EventSeverity::Info => event.description.clone(),
    }
}

fn print_event_log(events: &[SimEvent]) {
    println!("  {}", "Event Log".bold().underline());
    println!();
    for event in events {
        let ts = format!("[{:>5}s]", event.timestamp_seconds).dimmed();
        println!("  {ts} {:<18} {}", event.kind.to_string(), colorize_event(event));
    }
    if events.is_empty() {
        println!("  {}", "(no events)".dimmed());
    }
    println!();
}

fn print_notable(events: &[SimEvent]) {
    let notable: Vec<_> = events
        .iter()
        .filter(|e| matches!(e.severity, EventSeverity::Success | EventSeverity::Error))
        .collect();
    if notable.is_empty() {
        return;
    }
    println!("  {}", "Notable Events".bold().underline());
    for event in notable {
        let tag = match event.severity {
            EventSeverity::Error => "FAIL".red().bold(),
            _ => "DONE".green().bold(),
        };
        println!("  {tag}  {}", event.description);
    }
    println!();
}

fn print_player(result: &SimulationResult) {
    let before = &result.initial_state;
    let after = &result.final_state;

    println!("  {}", "Player".bold().underline());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Stat", "Start", "End"]);
    let rows = [
        ("Level", before.stats.level, after.stats.level),
        ("Experience", before.stats.experience, after.stats.experience),
        ("Gold", before.stats.gold, after.stats.gold),
        ("Health", before.stats.health, after.stats.health),
        ("Mana", before.stats.mana, after.stats.mana),
        ("Good", before.alignment.good, after.alignment.good),
        ("Neutral", before.alignment.neutral, after.alignment.neutral),
        ("Evil", before.alignment.evil, after.alignment.evil),
    ];
    for (name, start, end) in rows {
        table.add_row(vec![name.to_string(), start.to_string(), end.to_string()]);
    }
    println!("{table}");
    println!();

    if !result.reputation_changes.is_empty() {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Faction", "Change", "Standing"]);
        for (faction, delta) in &result.reputation_changes {
            let standing = after.reputation.get(faction).copied().unwrap_or(0);
            table.add_row(vec![
                faction.clone(),
                format!("{delta:+}"),
                standing.to_string(),
            ]);
        }
        println!("{table}");
        println!();
    }

    if !after.inventory.is_empty() {
        let items: Vec<_> = after.inventory.iter().map(String::as_str).collect();
        println!("  Inventory: {}", items.join(", "));
        println!();
    }
}
