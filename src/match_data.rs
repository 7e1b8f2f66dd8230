use serde_json::Value;

/// One completed competitive match as fetched from the v3 endpoint.
///
/// The metadata and roster have a reliable enough shape to be parsed up
/// front; the per-round payloads do not (which fields a round carries depends
/// on the upstream data-source version), so rounds are kept as raw JSON and
/// read through the tolerant pickers below.
#[derive(Debug, Clone)]
pub struct MatchRecord {
    pub metadata: MatchMetadata,
    pub players: Vec<PlayerEntry>,
    pub rounds: Vec<Value>,
}

#[derive(Debug, Clone)]
pub struct MatchMetadata {
    pub map: String,
    pub mode: String,
    pub rounds_played: u64,
    pub started_at: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PlayerEntry {
    pub name: String,
    pub tag: String,
    pub puuid: String,
    pub team: String,
    pub stats: PlayerStats,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerStats {
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
    pub score: i64,
}

/// Resolves the tracked identity against a match roster.
///
/// Exact case-insensitive match on both name and tag. Display names are not
/// unique across data sources, so the caller must pin the returned puuid and
/// use only that for per-round comparisons.
pub fn find_player<'a>(record: &'a MatchRecord, name: &str, tag: &str) -> Option<&'a PlayerEntry> {
    record
        .players
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name) && p.tag.eq_ignore_ascii_case(tag))
}

pub(crate) fn pick_string(value: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(v) = value.get(*key) {
            match v {
                Value::String(s) => {
                    let trimmed = s.trim();
                    if !trimmed.is_empty() {
                        return Some(trimmed.to_string());
                    }
                }
                Value::Number(n) => return Some(n.to_string()),
                _ => {}
            }
        }
    }
    None
}

pub(crate) fn pick_i64(value: &Value, keys: &[&str]) -> Option<i64> {
    for key in keys {
        if let Some(v) = value.get(*key) {
            if let Some(num) = v.as_i64() {
                return Some(num);
            }
            if let Some(num) = v.as_f64() {
                return Some(num as i64);
            }
            if let Some(s) = v.as_str() {
                if let Ok(num) = s.trim().parse::<i64>() {
                    return Some(num);
                }
            }
        }
    }
    None
}

// Upstream timestamps are usually integer millis but show up as floats or
// strings in older payload versions.
pub(crate) fn pick_u64(value: &Value, keys: &[&str]) -> Option<u64> {
    for key in keys {
        if let Some(v) = value.get(*key) {
            if let Some(num) = v.as_u64() {
                return Some(num);
            }
            if let Some(num) = v.as_f64() {
                if num >= 0.0 {
                    return Some(num as u64);
                }
            }
            if let Some(s) = v.as_str() {
                if let Ok(num) = s.trim().parse::<u64>() {
                    return Some(num);
                }
            }
        }
    }
    None
}
