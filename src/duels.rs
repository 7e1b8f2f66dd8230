use serde_json::Value;

use crate::match_data::{MatchRecord, pick_string, pick_u64};

/// One kill placed on the round clock, normalized from whichever raw shape
/// the round happened to carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KillEvent {
    pub killer_id: String,
    pub victim_id: String,
    pub time_in_round: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuelVerdict {
    FirstBlood,
    FirstDeath,
    NoVerdict,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DuelStats {
    pub first_bloods: u32,
    pub first_deaths: u32,
    pub win_rate: f64,
    pub first_death_rate: f64,
    pub attempts: u32,
}

/// Extracts the time-ordered kill list for one round.
///
/// The global `kill_events` log is preferred whenever it is present and
/// non-empty; only then does the per-player `player_stats` fallback apply.
/// Records without a usable round-relative timestamp are dropped, and the
/// sort is stable, so same-timestamp kills keep their source order.
pub fn normalize_round_kills(round: &Value) -> Vec<KillEvent> {
    let mut kills = match round.get("kill_events").and_then(Value::as_array) {
        Some(events) if !events.is_empty() => {
            events.iter().filter_map(global_kill_event).collect()
        }
        _ => player_stat_kill_events(round),
    };
    kills.sort_by_key(|kill| kill.time_in_round);
    kills
}

fn global_kill_event(event: &Value) -> Option<KillEvent> {
    let time_in_round = pick_u64(event, &["kill_time_in_round"])?;
    let killer_id = pick_string(event, &["killer_puuid"])?;
    let victim_id = pick_string(event, &["victim_puuid"])?;
    Some(KillEvent {
        killer_id,
        victim_id,
        time_in_round,
    })
}

fn player_stat_kill_events(round: &Value) -> Vec<KillEvent> {
    let mut out = Vec::new();
    let Some(entries) = round.get("player_stats").and_then(Value::as_array) else {
        return out;
    };
    for entry in entries {
        let Some(killer_id) = pick_string(entry, &["player_puuid", "puuid"]) else {
            continue;
        };
        // A scalar kill count cannot be placed on the round clock; only
        // sub-record lists contribute here.
        let Some(subs) = entry.get("kills").and_then(Value::as_array) else {
            continue;
        };
        for sub in subs {
            let Some(time_in_round) = pick_u64(sub, &["kill_time_in_round"]) else {
                continue;
            };
            let Some(victim_id) = pick_string(sub, &["victim_puuid"]) else {
                continue;
            };
            out.push(KillEvent {
                killer_id: killer_id.clone(),
                victim_id,
                time_in_round,
            });
        }
    }
    out
}

/// Classifies the round's opening duel for the tracked player.
///
/// Only the earliest kill matters; everything after it is irrelevant to this
/// metric. Identity comparison runs on puuids exclusively.
pub fn resolve_opening_duel(kills: &[KillEvent], tracked_puuid: &str) -> DuelVerdict {
    let Some(first) = kills.first() else {
        return DuelVerdict::NoVerdict;
    };
    if first.killer_id == tracked_puuid {
        DuelVerdict::FirstBlood
    } else if first.victim_id == tracked_puuid {
        DuelVerdict::FirstDeath
    } else {
        DuelVerdict::NoVerdict
    }
}

/// Runs the opening-duel resolution over every round of a match.
///
/// A round contributes at most one classification. Rounds that yield no
/// timestamped kill evidence are excluded from `attempts` rather than counted
/// as losses. An unresolved tracked player short-circuits to zeroed stats.
pub fn analyze_match_duels(record: &MatchRecord, tracked_puuid: Option<&str>) -> DuelStats {
    let Some(puuid) = tracked_puuid else {
        return DuelStats::default();
    };

    let mut first_bloods = 0u32;
    let mut first_deaths = 0u32;
    let mut rounds_played = 0u32;

    for round in &record.rounds {
        rounds_played += 1;
        let kills = normalize_round_kills(round);
        match resolve_opening_duel(&kills, puuid) {
            DuelVerdict::FirstBlood => first_bloods += 1,
            DuelVerdict::FirstDeath => first_deaths += 1,
            DuelVerdict::NoVerdict => {}
        }
    }

    let attempts = first_bloods + first_deaths;
    let win_rate = if attempts > 0 {
        f64::from(first_bloods) / f64::from(attempts) * 100.0
    } else {
        0.0
    };
    let first_death_rate = if rounds_played > 0 {
        f64::from(first_deaths) / f64::from(rounds_played) * 100.0
    } else {
        0.0
    };

    DuelStats {
        first_bloods,
        first_deaths,
        win_rate,
        first_death_rate,
        attempts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const HERO: &str = "p-hero";
    const FOE: &str = "p-foe";

    fn kill(killer: &str, victim: &str, time: u64) -> Value {
        json!({
            "killer_puuid": killer,
            "victim_puuid": victim,
            "kill_time_in_round": time,
        })
    }

    #[test]
    fn global_log_is_sorted_by_round_time() {
        let round = json!({
            "kill_events": [kill(FOE, "p-other", 9_500), kill(HERO, FOE, 4_200)],
        });
        let kills = normalize_round_kills(&round);
        assert_eq!(kills.len(), 2);
        assert_eq!(kills[0].killer_id, HERO);
        assert_eq!(kills[0].time_in_round, 4_200);
    }

    #[test]
    fn same_timestamp_kills_keep_source_order() {
        let round = json!({
            "kill_events": [kill(HERO, FOE, 3_000), kill(FOE, HERO, 3_000)],
        });
        let kills = normalize_round_kills(&round);
        assert_eq!(kills[0].killer_id, HERO);
        assert_eq!(kills[1].killer_id, FOE);
    }

    #[test]
    fn untimed_or_incomplete_records_are_dropped() {
        let round = json!({
            "kill_events": [
                { "killer_puuid": HERO, "victim_puuid": FOE },
                { "killer_puuid": HERO, "kill_time_in_round": 2_000 },
                kill(FOE, HERO, 6_000),
            ],
        });
        let kills = normalize_round_kills(&round);
        assert_eq!(kills.len(), 1);
        assert_eq!(kills[0].time_in_round, 6_000);
    }

    #[test]
    fn nonempty_global_log_shadows_player_stats() {
        // Even an all-untimed global log wins the source selection; it must
        // not fall through to the per-player records.
        let round = json!({
            "kill_events": [{ "killer_puuid": HERO, "victim_puuid": FOE }],
            "player_stats": [
                { "player_puuid": FOE, "kills": [ { "victim_puuid": HERO, "kill_time_in_round": 1_000 } ] },
            ],
        });
        assert!(normalize_round_kills(&round).is_empty());
    }

    #[test]
    fn player_stats_fallback_attaches_killer_id() {
        let round = json!({
            "player_stats": [
                { "player_puuid": HERO, "kills": 2 },
                { "player_puuid": FOE, "kills": [
                    { "victim_puuid": HERO, "kill_time_in_round": 7_000 },
                    { "victim_puuid": "p-other", "kill_time_in_round": 3_000 },
                ] },
            ],
        });
        let kills = normalize_round_kills(&round);
        assert_eq!(kills.len(), 2);
        assert_eq!(kills[0].victim_id, "p-other");
        assert!(kills.iter().all(|k| k.killer_id == FOE));
    }

    #[test]
    fn scalar_only_round_yields_nothing() {
        let round = json!({
            "player_stats": [
                { "player_puuid": HERO, "kills": 3 },
                { "player_puuid": FOE, "kills": 1 },
            ],
        });
        assert!(normalize_round_kills(&round).is_empty());
    }

    #[test]
    fn malformed_round_shapes_yield_nothing() {
        for round in [
            json!({}),
            json!({ "kill_events": "corrupt", "player_stats": 12 }),
            json!({ "player_stats": [ { "kills": [ { "victim_puuid": HERO, "kill_time_in_round": 1 } ] } ] }),
            json!(null),
        ] {
            assert!(normalize_round_kills(&round).is_empty(), "round: {round}");
        }
    }

    #[test]
    fn resolver_reads_only_the_earliest_kill() {
        let round = json!({
            "kill_events": [kill(FOE, HERO, 2_000), kill(HERO, FOE, 8_000)],
        });
        let kills = normalize_round_kills(&round);
        assert_eq!(resolve_opening_duel(&kills, HERO), DuelVerdict::FirstDeath);
        assert_eq!(resolve_opening_duel(&kills, FOE), DuelVerdict::FirstBlood);
        assert_eq!(resolve_opening_duel(&kills, "p-other"), DuelVerdict::NoVerdict);
    }

    #[test]
    fn resolver_on_empty_round_is_no_verdict() {
        assert_eq!(resolve_opening_duel(&[], HERO), DuelVerdict::NoVerdict);
    }

    fn record_with_rounds(rounds: Vec<Value>) -> MatchRecord {
        MatchRecord {
            metadata: crate::match_data::MatchMetadata {
                map: "Haven".to_string(),
                mode: "Competitive".to_string(),
                rounds_played: rounds.len() as u64,
                started_at: None,
            },
            players: Vec::new(),
            rounds,
        }
    }

    #[test]
    fn aggregator_counts_each_round_once() {
        let record = record_with_rounds(vec![
            json!({ "kill_events": [kill(HERO, FOE, 5_000), kill(FOE, HERO, 8_000)] }),
            json!({ "kill_events": [kill(FOE, HERO, 3_000)] }),
            json!({ "player_stats": [ { "player_puuid": HERO, "kills": 2 } ] }),
            json!({ "kill_events": [kill("p-a", "p-b", 1_000)] }),
        ]);
        let stats = analyze_match_duels(&record, Some(HERO));
        assert_eq!(stats.first_bloods, 1);
        assert_eq!(stats.first_deaths, 1);
        assert_eq!(stats.attempts, 2);
        assert!((stats.win_rate - 50.0).abs() < f64::EPSILON);
        // first_death_rate divides by rounds iterated (4), not attempts.
        assert!((stats.first_death_rate - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn aggregator_with_no_attempts_reports_zero_rates() {
        let record = record_with_rounds(vec![json!({}), json!({})]);
        let stats = analyze_match_duels(&record, Some(HERO));
        assert_eq!(stats.attempts, 0);
        assert_eq!(stats.win_rate, 0.0);
        assert_eq!(stats.first_death_rate, 0.0);
    }

    #[test]
    fn aggregator_without_resolved_player_is_zeroed() {
        let record = record_with_rounds(vec![
            json!({ "kill_events": [kill(HERO, FOE, 5_000)] }),
        ]);
        let stats = analyze_match_duels(&record, None);
        assert_eq!(stats, DuelStats::default());
    }

    #[test]
    fn lookalike_puuid_does_not_score() {
        // The opening kill belongs to a different player whose display name
        // shares a prefix with the tracked one; puuid comparison keeps the
        // round out of the tracked player's duel record.
        let record = record_with_rounds(vec![
            json!({ "kill_events": [kill("p-iceman", "p-foe", 4_000)] }),
        ]);
        let stats = analyze_match_duels(&record, Some("p-ice"));
        assert_eq!(stats.attempts, 0);
    }
}
