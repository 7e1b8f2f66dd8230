use std::env;

use anyhow::{Context, Result, bail};

use valo_duels::config::AppConfig;
use valo_duels::duels::analyze_match_duels;
use valo_duels::match_data::find_player;
use valo_duels::match_fetch::fetch_competitive_matches;
use valo_duels::report::{SessionTotals, match_report, session_report};
use valo_duels::sample_feed::sample_matches;
use valo_duels::survival::compute_survival;

const DEFAULT_MATCH_COUNT: usize = 3;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let cfg = AppConfig::from_env()?;
    let limit = env::args()
        .nth(1)
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(DEFAULT_MATCH_COUNT)
        .clamp(1, 10);

    println!(
        "Tactical analysis for {}#{} ({} region, last {limit} competitive games)\n",
        cfg.name, cfg.tag, cfg.region
    );

    let matches = if cfg.offline {
        eprintln!("[INFO] VALO_OFFLINE set, analyzing a synthetic session");
        sample_matches(&cfg.name, &cfg.tag, limit)
    } else {
        fetch_competitive_matches(&cfg, limit).context("match fetch failed")?
    };
    if matches.is_empty() {
        bail!("no competitive matches found for {}#{}", cfg.name, cfg.tag);
    }

    let mut session = SessionTotals::default();
    for (i, record) in matches.iter().enumerate() {
        let game = i + 1;
        let Some(player) = find_player(record, &cfg.name, &cfg.tag) else {
            eprintln!(
                "[WARN] Game {game}: {}#{} not found in the roster, skipping",
                cfg.name, cfg.tag
            );
            continue;
        };

        let duel_stats = analyze_match_duels(record, Some(&player.puuid));
        match compute_survival(&player.stats, record.metadata.rounds_played) {
            Ok(survival) => {
                println!(
                    "{}\n",
                    match_report(game, &record.metadata, &duel_stats, &survival)
                );
                session.push_match(&player.stats, record.metadata.rounds_played, &duel_stats);
            }
            Err(err) => eprintln!("[WARN] Game {game}: {err}, skipping"),
        }
    }

    if session.matches == 0 {
        bail!("none of the fetched matches were analyzable");
    }
    println!("{}", session_report(&session));
    Ok(())
}
