//! Client for the square state service.
//!
//! Every request is bounded by a timeout. The first transport failure, timeout or
//! non-success status switches the client to offline mode, after which mutating calls
//! are skipped locally instead of failing again and again.

use std::{
    sync::atomic::{AtomicBool, Ordering},
    time::Duration,
};

use crate::{
    foundation::error::{BlockPartyError, BlockPartyResult},
    model::{Square, SquareState},
};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Where the service lives and how long to wait for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service root, e.g. `http://127.0.0.1:5000`.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Whether a mutating call reached the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The service accepted the change.
    Synced,
    /// The client is offline; nothing was sent.
    Skipped,
}

/// HTTP client with an offline latch.
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
    offline: AtomicBool,
}

impl ApiClient {
    /// Build a client; no request is made yet.
    pub fn new(config: ClientConfig) -> BlockPartyResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BlockPartyError::api(format!("build http client: {e}")))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout,
            offline: AtomicBool::new(false),
        })
    }

    /// Service root without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Return `true` once a call has failed.
    pub fn is_offline(&self) -> bool {
        self.offline.load(Ordering::Acquire)
    }

    /// Allow mutating calls to reach the network again.
    pub fn reset_offline(&self) {
        self.offline.store(false, Ordering::Release);
    }

    /// Fetch the stored collection. Always attempted, even offline; success clears the
    /// offline latch.
    pub async fn fetch_state(&self) -> BlockPartyResult<SquareState> {
        let resp = self
            .send(self.http.get(self.url("/collection")), "fetch squares")
            .await?;
        let state = resp
            .json::<SquareState>()
            .await
            .map_err(|e| self.go_offline(format!("fetch squares: invalid body: {e}")))?;
        if self.offline.swap(false, Ordering::AcqRel) {
            tracing::info!("state service reachable again");
        }
        Ok(state)
    }

    /// Replace the stored collection.
    pub async fn save_state(&self, state: &SquareState) -> BlockPartyResult<SyncOutcome> {
        if self.is_offline() {
            return Ok(SyncOutcome::Skipped);
        }
        self.send(
            self.http.post(self.url("/collection")).json(state),
            "save squares",
        )
        .await?;
        Ok(SyncOutcome::Synced)
    }

    /// Append one square to the stored collection.
    pub async fn add_square(&self, square: &Square) -> BlockPartyResult<SyncOutcome> {
        if self.is_offline() {
            return Ok(SyncOutcome::Skipped);
        }
        self.send(
            self.http.post(self.url("/collection/add")).json(square),
            "add square",
        )
        .await?;
        Ok(SyncOutcome::Synced)
    }

    /// Reset the stored collection to empty.
    pub async fn clear(&self) -> BlockPartyResult<SyncOutcome> {
        if self.is_offline() {
            return Ok(SyncOutcome::Skipped);
        }
        self.send(self.http.delete(self.url("/collection")), "clear squares")
            .await?;
        Ok(SyncOutcome::Synced)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        what: &str,
    ) -> BlockPartyResult<reqwest::Response> {
        match request.send().await {
            Ok(resp) if resp.status().is_success() => Ok(resp),
            Ok(resp) => Err(self.go_offline(format!(
                "{what} failed (status: {})",
                resp.status().as_u16()
            ))),
            Err(e) if e.is_timeout() => Err(self.go_offline(format!(
                "{what} timed out after {}ms",
                self.timeout.as_millis()
            ))),
            Err(e) => Err(self.go_offline(format!("{what} failed: {e}"))),
        }
    }

    fn go_offline(&self, msg: String) -> BlockPartyError {
        if self.offline.swap(true, Ordering::AcqRel) {
            tracing::debug!("{msg}");
        } else {
            tracing::warn!("state service unavailable, continuing offline: {msg}");
        }
        BlockPartyError::api(msg)
    }
}

#[cfg(test)]
#[path = "../tests/unit/client/client.rs"]
mod tests;
