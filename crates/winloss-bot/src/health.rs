//! Health check endpoint

use std::sync::Arc;
use std::time::SystemTime;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use winloss_types::Statistics;

use crate::commands::ChannelControl;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub bot_username: Option<String>,
    pub uptime_secs: u64,
    pub enabled_channels: usize,
    pub statistics: Statistics,
}

/// Shared application state for health checks
#[derive(Clone)]
pub struct AppState {
    pub start_time: SystemTime,
    pub bot_username: Arc<RwLock<Option<String>>>,
    channels: Arc<dyn ChannelControl>,
}

impl AppState {
    pub fn new(channels: Arc<dyn ChannelControl>) -> Self {
        Self {
            start_time: SystemTime::now(),
            bot_username: Arc::new(RwLock::new(None)),
            channels,
        }
    }

    pub async fn set_bot_username(&self, username: String) {
        let mut guard = self.bot_username.write().await;
        *guard = Some(username);
    }

    async fn status(&self) -> HealthStatus {
        let config = self.channels.snapshot().await;
        HealthStatus {
            status: "ok".to_string(),
            bot_username: self.bot_username.read().await.clone(),
            uptime_secs: self.start_time.elapsed().unwrap_or_default().as_secs(),
            enabled_channels: config.enabled_channels.len(),
            statistics: config.statistics,
        }
    }
}

async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    (StatusCode::OK, Json(state.status().await))
}

async fn live_handler() -> StatusCode {
    StatusCode::OK
}

/// Create the health check router
pub fn create_health_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/live", get(live_handler))
        .with_state(state)
}

/// Start the health check server
pub async fn start_health_server(state: AppState, port: u16) -> anyhow::Result<()> {
    let app = create_health_router(state);
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Health check server listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tokio::sync::Mutex;

    use super::*;
    use crate::fs::MemFs;
    use crate::store::ConfigStore;

    fn state(json: &str) -> AppState {
        let fs = MemFs::new();
        fs.insert("/config.json", json);
        let store = ConfigStore::load(fs, "/config.json").unwrap();
        AppState::new(Arc::new(Mutex::new(store)))
    }

    #[tokio::test]
    async fn test_app_state_new() {
        let state = state(r#"{"enabledChannels": []}"#);
        assert!(state.bot_username.read().await.is_none());
    }

    #[tokio::test]
    async fn test_set_bot_username() {
        let state = state(r#"{"enabledChannels": []}"#);
        state.set_bot_username("winloss".to_string()).await;
        assert_eq!(*state.bot_username.read().await, Some("winloss".to_string()));
    }

    #[tokio::test]
    async fn test_status_reports_channels_and_statistics() {
        let state = state(
            r#"{"enabledChannels": ["1", "2", "3"], "statistics": {"totalReactions": 6, "messagesProcessed": 3}}"#,
        );
        let status = state.status().await;
        assert_eq!(status.status, "ok");
        assert_eq!(status.enabled_channels, 3);
        assert_eq!(status.statistics.total_reactions, 6);
        assert_eq!(status.statistics.messages_processed, 3);
    }

    #[test]
    fn test_health_status_serde() {
        let status = HealthStatus {
            status: "ok".to_string(),
            bot_username: Some("testbot".to_string()),
            uptime_secs: 100,
            enabled_channels: 2,
            statistics: Statistics::default(),
        };
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["uptime_secs"], 100);
        assert_eq!(json["enabled_channels"], 2);
        assert_eq!(json["statistics"]["totalReactions"], 0);
    }
}
