//! Terminal rendering for rounds, history, and statistics.
//!
//! Formatting functions return strings; the command layer decides where
//! they go.

use dtl_core::{
    EquipmentDirectory, EquipmentPerformance, EquipmentSet, EquipmentSlot, Round, RoundSummary,
    Shot, ShotEntry,
};

/// One-character mark for a shot cell.
fn mark(shot: &Shot) -> char {
    match shot.entry() {
        ShotEntry::Unset => '·',
        ShotEntry::FirstBarrelHit => '3',
        ShotEntry::SecondBarrelHit => '2',
        ShotEntry::BothMissed => '0',
    }
}

/// The 5×5 grid with per-station tallies and a totals line.
pub fn grid_lines(round: &Round) -> Vec<String> {
    let mut lines = Vec::new();
    for station in round.station_breakdown() {
        let marks: String = round
            .shots
            .iter()
            .filter(|s| s.station == station.station)
            .map(|s| format!(" {}", mark(s)))
            .collect();
        lines.push(format!("Station {}:{}   {:>2}/15", station.station, marks, station.score));
    }
    lines.push(format!(
        "Score {}/75, {} of 25 hit, {:.0}% entered",
        round.total_score,
        round.hit_count,
        round.progress_percent()
    ));
    lines
}

pub fn print_grid(round: &Round) {
    for line in grid_lines(round) {
        println!("   {line}");
    }
}

/// One history row: date, score, hits, venue, gun.
pub fn history_line(round: &Round, equipment: &EquipmentSet) -> String {
    let club = if round.club.is_empty() { "-" } else { round.club.as_str() };
    format!(
        "{}  {:>2}/75  {:>2} hit  {}  ({})",
        round.date.format("%Y-%m-%d"),
        round.total_score,
        round.hit_count,
        club,
        equipment.display_name(EquipmentSlot::Gun, &round.gun_id)
    )
}

pub fn summary_lines(summary: &RoundSummary) -> Vec<String> {
    let mut lines = vec![
        format!("Rounds:         {}", summary.rounds),
        format!("Average score:  {:.1}", summary.average_score),
        format!("Best / worst:   {} / {}", summary.best_score, summary.worst_score),
        format!("Hit rate:       {:.1}%", summary.hit_rate),
        format!("Recent average: {:.1}", summary.recent_average),
    ];
    if let Some(improvement) = summary.improvement {
        lines.push(format!("Improvement:    {improvement:+.1}"));
    }
    let barrels = &summary.barrels;
    lines.push(format!(
        "Barrels:        {} first ({:.0}%), {} second ({:.0}%), {} lost",
        barrels.first_barrel_hits,
        barrels.first_barrel_rate,
        barrels.second_barrel_hits,
        barrels.second_barrel_rate,
        barrels.misses
    ));
    lines
}

pub fn print_summary(summary: &RoundSummary) {
    println!("📊 Statistics");
    for line in summary_lines(summary) {
        println!("   {line}");
    }
}

pub fn print_comparison(
    ranked: &[(String, EquipmentPerformance)],
    slot: EquipmentSlot,
    equipment: &EquipmentSet,
) {
    println!("📊 Average score by {}", slot.label());
    for (id, perf) in ranked {
        let name = if id.is_empty() {
            "(none recorded)".to_string()
        } else {
            equipment.display_name(slot, id)
        };
        println!(
            "   {:>5.1} over {} round(s), {:.0}% hit   {}",
            perf.average_score, perf.rounds, perf.average_hit_rate, name
        );
    }
}

pub fn print_equipment(equipment: &EquipmentSet) {
    if !equipment.guns.is_empty() {
        println!("Guns:");
        for gun in &equipment.guns {
            println!("   {}  {}{}", gun.id, gun.name, detail(&[&gun.manufacturer, &gun.model]));
        }
    }
    if !equipment.chokes.is_empty() {
        println!("Chokes:");
        for choke in &equipment.chokes {
            println!(
                "   {}  {}{}",
                choke.id,
                choke.name,
                detail(&[&choke.manufacturer, &choke.constriction])
            );
        }
    }
    if !equipment.ammunition.is_empty() {
        println!("Ammunition:");
        for ammo in &equipment.ammunition {
            println!(
                "   {}  {}{}",
                ammo.id,
                ammo.name,
                detail(&[&ammo.manufacturer, &ammo.shot_size])
            );
        }
    }
    if !equipment.clubs.is_empty() {
        println!("Clubs:");
        for club in &equipment.clubs {
            println!("   {}  {}{}", club.id, club.name, detail(&[&club.city, &club.state]));
        }
    }
}

/// Non-empty detail fields joined as a trailing ", a, b" suffix.
fn detail(fields: &[&String]) -> String {
    let parts: Vec<&str> =
        fields.iter().filter(|f| !f.is_empty()).map(|f| f.as_str()).collect();
    if parts.is_empty() {
        String::new()
    } else {
        format!("  ({})", parts.join(", "))
    }
}
