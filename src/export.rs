use crate::clock::Clock;
use crate::engine::StreakEngine;
use std::collections::BTreeSet;

pub fn summary(engine: &StreakEngine, clock: &dyn Clock) -> String {
    let config = engine.config();
    let completed_count = engine.completed().len();

    let mut lines = vec![
        format!("{} Summary", config.name),
        format!("Started: {}", engine.start_date().format("%a %b %d %Y")),
        format!(
            "Current day: {} / {}",
            engine.current_day_number(clock),
            config.total_days
        ),
        format!("Current streak: {} days", engine.current_streak(clock)),
        format!("Longest streak: {} days", engine.longest_streak()),
        format!(
            "Completion: {}% ({}/{})",
            engine.percent_complete(),
            completed_count,
            config.total_days
        ),
        String::new(),
        format!("Completed days: {}", join_days(engine.completed())),
        // padded so the two lists line up in the plain-text file
        format!("Missed days:    {}", join_days(engine.missed())),
        String::new(),
        "Notes:".to_string(),
    ];

    for (day, note) in engine.notes() {
        lines.push(format!("Day {day}: {note}"));
    }

    lines.join("\n")
}

fn join_days(days: &BTreeSet<u32>) -> String {
    if days.is_empty() {
        return "None".to_string();
    }

    days.iter()
        .map(|day| day.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
