//! Opening-duel and survival analytics for a single tracked Valorant player,
//! computed over a small batch of recent competitive matches fetched from the
//! HenrikDev API.

pub mod config;
pub mod duels;
pub mod http_client;
pub mod match_data;
pub mod match_fetch;
pub mod report;
pub mod sample_feed;
pub mod survival;
