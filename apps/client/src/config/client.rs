use std::env;

use crate::error::ClientError;
use crate::services::phase_controller::ControllerRules;

pub const DEFAULT_SERVER_URL: &str = "ws://localhost:8001";
pub const DEFAULT_JOIN_PATH: &str = "/join";
pub const DEFAULT_MAX_BUY: u32 = 3;

/// Client settings, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub server_url: String,
    pub join_path: String,
    pub max_buy_per_turn: u32,
    pub player_timeout_secs: Option<u32>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            join_path: DEFAULT_JOIN_PATH.to_string(),
            max_buy_per_turn: DEFAULT_MAX_BUY,
            player_timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Load from `SACKSON_SERVER_URL`, `SACKSON_JOIN_PATH`, `SACKSON_MAX_BUY`
    /// and `SACKSON_PLAYER_TIMEOUT`. Unset variables take their defaults.
    pub fn from_env() -> Result<Self, ClientError> {
        let server_url = env::var("SACKSON_SERVER_URL")
            .unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
        if !(server_url.starts_with("ws://") || server_url.starts_with("wss://")) {
            return Err(ClientError::config(format!(
                "SACKSON_SERVER_URL must be a ws:// or wss:// URL, got '{server_url}'"
            )));
        }
        let join_path =
            env::var("SACKSON_JOIN_PATH").unwrap_or_else(|_| DEFAULT_JOIN_PATH.to_string());

        let max_buy_per_turn = match optional_u32("SACKSON_MAX_BUY")? {
            Some(0) => {
                return Err(ClientError::config(
                    "SACKSON_MAX_BUY must be a positive integer",
                ))
            }
            Some(n) => n,
            None => DEFAULT_MAX_BUY,
        };
        let player_timeout_secs = optional_u32("SACKSON_PLAYER_TIMEOUT")?;

        Ok(Self {
            server_url,
            join_path,
            max_buy_per_turn,
            player_timeout_secs,
        })
    }

    /// Full websocket URL of the join endpoint.
    pub fn join_url(&self) -> String {
        let base = self.server_url.trim_end_matches('/');
        let path = self.join_path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    pub fn rules(&self) -> ControllerRules {
        ControllerRules {
            max_buy_per_turn: self.max_buy_per_turn,
            player_timeout: self.player_timeout_secs,
        }
    }
}

fn optional_u32(name: &str) -> Result<Option<u32>, ClientError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<u32>().map(Some).map_err(|_| {
            ClientError::config(format!(
                "Environment variable '{name}' must be a non-negative integer, got '{raw}'"
            ))
        }),
        Err(_) => Ok(None),
    }
}
