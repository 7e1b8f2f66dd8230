use crate::duels::DuelStats;
use crate::match_data::{MatchMetadata, PlayerStats};
use crate::survival::SurvivalStats;

const SURVIVAL_CRITICAL_PCT: f64 = 35.0;
const SURVIVAL_GOOD_PCT: f64 = 40.0;
const FD_RATE_WARNING_PCT: f64 = 15.0;
const FD_RATE_GOOD_PCT: f64 = 12.0;
const KD_GOOD: f64 = 1.2;

/// Renders the per-match tactical block: headline numbers with their target
/// annotations, then whichever coaching lines the thresholds trip.
pub fn match_report(
    game: usize,
    metadata: &MatchMetadata,
    duels: &DuelStats,
    survival: &SurvivalStats,
) -> String {
    let started = metadata.started_at.as_deref().unwrap_or("unknown date");
    let mut lines = vec![
        format!("--- Game {game}: {} ({started}) ---", metadata.map),
        format!(
            "Survival Rate:    {:.1}%  (target >45%)",
            survival.survival_rate
        ),
        format!("K/D Ratio:        {:.2}   (target >1.2)", survival.kd_ratio),
        format!(
            "Opening Duels:    {}W - {}L ({:.0}% win rate)",
            duels.first_bloods, duels.first_deaths, duels.win_rate
        ),
        format!(
            "First Death Rate: {:.1}%  (target <10%)",
            duels.first_death_rate
        ),
    ];

    if survival.survival_rate < SURVIVAL_CRITICAL_PCT {
        lines.push(">> CRITICAL: Survival too low. Stop re-peeking angles.".to_string());
    }
    if duels.first_death_rate > FD_RATE_WARNING_PCT {
        lines.push(
            ">> WARNING: First death rate is too high. You are taking 50/50 opening fights."
                .to_string(),
        );
        lines.push(">> ACTION: Let a teammate make first contact, then trade them.".to_string());
    }
    if survival.kd_ratio >= KD_GOOD
        && survival.survival_rate >= SURVIVAL_GOOD_PCT
        && duels.first_death_rate < FD_RATE_GOOD_PCT
    {
        lines.push(">> SUCCESS: High impact at low risk. Keep this discipline.".to_string());
    }

    lines.join("\n")
}

/// Running totals across the analyzed matches of one session. Matches skipped
/// as unanalyzable never reach `push_match` and contribute nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionTotals {
    pub matches: u32,
    pub rounds: u64,
    pub kills: i64,
    pub deaths: i64,
    pub first_bloods: u32,
    pub first_deaths: u32,
}

impl SessionTotals {
    pub fn push_match(&mut self, stats: &PlayerStats, rounds: u64, duels: &DuelStats) {
        self.matches += 1;
        self.rounds += rounds;
        self.kills += stats.kills;
        self.deaths += stats.deaths;
        self.first_bloods += duels.first_bloods;
        self.first_deaths += duels.first_deaths;
    }
}

pub fn session_report(totals: &SessionTotals) -> String {
    let deaths = totals.deaths.max(0) as u64;
    let kills = totals.kills.max(0) as f64;
    let survived = totals.rounds.saturating_sub(deaths);
    let survival_rate = if totals.rounds > 0 {
        survived as f64 / totals.rounds as f64 * 100.0
    } else {
        0.0
    };
    let kd = if deaths > 0 {
        kills / deaths as f64
    } else {
        kills
    };

    let mut lines = vec![
        format!("SESSION SUMMARY (last {} games)", totals.matches),
        format!("Avg Survival Rate: {survival_rate:.1}%"),
        format!("Avg K/D Ratio:     {kd:.2}"),
        format!(
            "Opening Duels:     {}W - {}L",
            totals.first_bloods, totals.first_deaths
        ),
    ];
    if survival_rate < SURVIVAL_GOOD_PCT {
        lines.push(">> CONCLUSION: You are playing too aggressive. Aim for 45%+ survival.".to_string());
    } else {
        lines.push(">> CONCLUSION: Good systemic discipline.".to_string());
    }
    lines.join("\n")
}
