//! Read-only records: chat, server info and moderation lists.

use crate::ticks::time_from_ticks;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ChatMessage {
    #[serde(rename = "SteamID", alias = "SteamId")]
    pub steam_id: i64,
    pub display_name: String,
    pub content: String,
    /// Decimal string of 100ns ticks, see [`crate::ticks`]
    pub timestamp: String,
}

impl ChatMessage {
    /// Wall-clock send time, or `None` if the timestamp is not a tick count.
    pub fn real_timestamp(&self) -> Option<DateTime<Utc>> {
        let ticks = self.timestamp.trim().parse::<i64>().ok()?;
        time_from_ticks(ticks)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ChatMessageList {
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ServerInfo {
    pub game: String,
    pub is_ready: bool,
    pub players: i64,
    #[serde(alias = "ServerID")]
    pub server_id: i64,
    pub server_name: String,
    pub sim_speed: f64,
    #[serde(rename = "SimulationCpuLoad", alias = "SimulationCPULoad")]
    pub simulation_cpu_load: f64,
    pub total_time: f64,
    #[serde(rename = "PirateUsedPCU", alias = "PirateUsedPcu")]
    pub pirate_used_pcu: i64,
    #[serde(rename = "UsedPCU", alias = "UsedPcu")]
    pub used_pcu: i64,
    pub version: String,
    pub world_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BannedPlayer {
    #[serde(rename = "SteamID", alias = "SteamId")]
    pub steam_id: i64,
    pub display_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BannedPlayerList {
    pub banned_players: Vec<BannedPlayer>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct KickedPlayer {
    #[serde(rename = "SteamID", alias = "SteamId")]
    pub steam_id: i64,
    pub display_name: String,
    pub time: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct KickedPlayerList {
    pub kicked_players: Vec<KickedPlayer>,
}
