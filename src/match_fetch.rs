use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::header::AUTHORIZATION;
use serde_json::Value;

use crate::config::AppConfig;
use crate::http_client::http_client;
use crate::match_data::{
    MatchMetadata, MatchRecord, PlayerEntry, PlayerStats, pick_i64, pick_string, pick_u64,
};

const HENRIK_BASE_URL: &str = "https://api.henrikdev.xyz/valorant";
const FETCH_ATTEMPTS: usize = 3;
const RETRY_DELAY_MS: u64 = 300;

/// Fetches the tracked player's last `limit` competitive matches.
///
/// Transient request failures and garbled bodies are retried a couple of
/// times before giving up; an empty batch is a valid result and is left to
/// the caller to report.
pub fn fetch_competitive_matches(cfg: &AppConfig, limit: usize) -> Result<Vec<MatchRecord>> {
    let client = http_client()?;
    let api_key = cfg
        .api_key
        .as_deref()
        .ok_or_else(|| anyhow!("HENRIK_API_KEY missing"))?;
    let url = format!(
        "{HENRIK_BASE_URL}/v3/matches/{}/{}/{}",
        cfg.region, cfg.name, cfg.tag
    );
    let size = limit.to_string();

    let mut last_err = None;
    for attempt in 0..FETCH_ATTEMPTS {
        let resp = client
            .get(&url)
            .header(AUTHORIZATION, api_key)
            .query(&[("mode", "competitive"), ("size", size.as_str())])
            .send();

        match resp {
            Ok(resp) => {
                let status = resp.status();
                let body = resp.text().context("failed reading body")?;
                if !status.is_success() {
                    last_err = Some(anyhow!("http {}: {}", status, body.trim()));
                } else {
                    match parse_matches_json(&body) {
                        Ok(matches) => return Ok(matches),
                        Err(err) => last_err = Some(err),
                    }
                }
            }
            Err(err) => last_err = Some(anyhow!("request failed: {err}")),
        }
        if attempt < FETCH_ATTEMPTS - 1 {
            std::thread::sleep(Duration::from_millis(RETRY_DELAY_MS));
        }
    }

    Err(last_err.unwrap_or_else(|| anyhow!("match fetch failed")))
}

/// Parses a v3 match-list body into records.
///
/// Pure so the whole pipeline can run against captured payloads. The envelope
/// is read tolerantly: an empty or null body is an empty batch, and entries
/// that are not objects are skipped rather than failing the batch.
pub fn parse_matches_json(raw: &str) -> Result<Vec<MatchRecord>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }

    let root: Value = serde_json::from_str(trimmed).context("invalid match list json")?;
    let Some(data) = root.get("data").and_then(Value::as_array) else {
        return Ok(Vec::new());
    };

    Ok(data.iter().filter_map(parse_match).collect())
}

fn parse_match(value: &Value) -> Option<MatchRecord> {
    if !value.is_object() {
        return None;
    }
    let metadata = parse_metadata(value.get("metadata").unwrap_or(&Value::Null));
    let players = parse_players(value.get("players").and_then(|v| v.get("all_players")));
    let rounds = value
        .get("rounds")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    Some(MatchRecord {
        metadata,
        players,
        rounds,
    })
}

fn parse_metadata(value: &Value) -> MatchMetadata {
    let started_at = pick_string(value, &["game_start_patched"])
        .or_else(|| pick_i64(value, &["game_start"]).and_then(format_epoch_secs));

    MatchMetadata {
        map: pick_string(value, &["map"]).unwrap_or_else(|| "Unknown".to_string()),
        mode: pick_string(value, &["mode"]).unwrap_or_default(),
        rounds_played: pick_u64(value, &["rounds_played"]).unwrap_or(0),
        started_at,
    }
}

fn parse_players(value: Option<&Value>) -> Vec<PlayerEntry> {
    let mut out = Vec::new();
    let Some(list) = value.and_then(Value::as_array) else {
        return out;
    };
    for entry in list {
        if let Some(player) = parse_player(entry) {
            out.push(player);
        }
    }
    out
}

fn parse_player(value: &Value) -> Option<PlayerEntry> {
    // Without a puuid the entry is useless for identity work downstream.
    let puuid = pick_string(value, &["puuid"])?;
    let name = pick_string(value, &["name"])?;
    let tag = pick_string(value, &["tag"]).unwrap_or_default();
    let team = pick_string(value, &["team"]).unwrap_or_default();
    let stats = value
        .get("stats")
        .map(parse_player_stats)
        .unwrap_or_default();

    Some(PlayerEntry {
        name,
        tag,
        puuid,
        team,
        stats,
    })
}

fn parse_player_stats(value: &Value) -> PlayerStats {
    PlayerStats {
        kills: pick_i64(value, &["kills"]).unwrap_or(0),
        deaths: pick_i64(value, &["deaths"]).unwrap_or(0),
        assists: pick_i64(value, &["assists"]).unwrap_or(0),
        score: pick_i64(value, &["score"]).unwrap_or(0),
    }
}

fn format_epoch_secs(secs: i64) -> Option<String> {
    chrono::DateTime::from_timestamp(secs, 0).map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
}
