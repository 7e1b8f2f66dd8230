use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use valo_duels::duels::analyze_match_duels;
use valo_duels::match_data::find_player;
use valo_duels::match_fetch::parse_matches_json;
use valo_duels::survival::compute_survival;

// This binary is intentionally simple: it loads one captured match-list
// payload and prints the duel and survival numbers for it. No network, meant
// for quick iterations on the normalizer against saved API responses.
fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("tests/fixtures/matches_v3.json"));
    let name = env::args()
        .nth(2)
        .or_else(|| env::var("VALORANT_NAME").ok())
        .context("pass a player name as the second argument or set VALORANT_NAME")?;
    let tag = env::args()
        .nth(3)
        .or_else(|| env::var("VALORANT_TAG").ok())
        .context("pass a player tag as the third argument or set VALORANT_TAG")?;

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed reading {}", path.display()))?;
    let matches = parse_matches_json(&raw)?;
    if matches.is_empty() {
        bail!("{} holds no matches", path.display());
    }

    for (i, record) in matches.iter().enumerate() {
        let game = i + 1;
        println!(
            "Game {game}: {} ({} rounds)",
            record.metadata.map, record.metadata.rounds_played
        );

        let Some(player) = find_player(record, &name, &tag) else {
            println!("  {name}#{tag} not in roster");
            continue;
        };
        let duels = analyze_match_duels(record, Some(&player.puuid));
        println!(
            "  duels: {}W - {}L over {} attempts (win rate {:.0}%, fd rate {:.1}%)",
            duels.first_bloods,
            duels.first_deaths,
            duels.attempts,
            duels.win_rate,
            duels.first_death_rate
        );
        match compute_survival(&player.stats, record.metadata.rounds_played) {
            Ok(survival) => println!(
                "  survival: {:.1}% over {} rounds, k/d {:.2}",
                survival.survival_rate, record.metadata.rounds_played, survival.kd_ratio
            ),
            Err(err) => println!("  survival: {err}"),
        }
    }

    Ok(())
}
