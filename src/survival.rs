use anyhow::{Result, anyhow};

use crate::match_data::PlayerStats;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurvivalStats {
    pub survived_rounds: u64,
    pub survival_rate: f64,
    pub kd_ratio: f64,
}

/// Survival and efficiency numbers from the match-level aggregates.
///
/// A zero-round match carries no usable data and is rejected here so the
/// caller can skip it; every other anomaly clamps to a conservative value.
/// With zero deaths the ratio reports the raw kill count rather than a
/// division blow-up, a deliberate simplification that slightly overstates
/// efficiency.
pub fn compute_survival(stats: &PlayerStats, total_rounds: u64) -> Result<SurvivalStats> {
    if total_rounds == 0 {
        return Err(anyhow!("match reports zero rounds played"));
    }

    let deaths = stats.deaths.max(0) as u64;
    let kills = stats.kills.max(0) as f64;

    let survived_rounds = total_rounds.saturating_sub(deaths);
    let survival_rate = survived_rounds as f64 / total_rounds as f64 * 100.0;
    let kd_ratio = if deaths > 0 {
        kills / deaths as f64
    } else {
        kills
    };

    Ok(SurvivalStats {
        survived_rounds,
        survival_rate,
        kd_ratio,
    })
}
