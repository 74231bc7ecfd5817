//! Headless party controller: the square list, its layout, disco mode and backend sync.
//!
//! Local state always changes first. Persistence is best effort: a failed sync never
//! rolls the local change back, it only leaves the client in offline mode.

use std::{collections::BTreeSet, sync::Arc};

use tokio::sync::watch;

use crate::{
    client::{ApiClient, SyncOutcome},
    color::{ColorSource, RandomColors},
    disco::{DiscoConfig, DiscoTask, restore_original_colors},
    foundation::{core::GridPos, error::BlockPartyResult},
    layout::{adjacency::adjacent, spiral::LayoutCache},
    model::{Square, SquareState},
};

/// Construction options for [`Party`].
#[derive(Clone, Copy, Debug, Default)]
pub struct PartyConfig {
    /// Disco timing.
    pub disco: DiscoConfig,
    /// Fixed color seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

/// The square collection plus everything that reacts to it.
#[derive(Debug)]
pub struct Party {
    state: Arc<watch::Sender<SquareState>>,
    layout: LayoutCache,
    colors: RandomColors,
    client: Option<ApiClient>,
    disco: Option<DiscoTask>,
    disco_config: DiscoConfig,
}

impl Party {
    /// Local-only party with no backend.
    pub fn new(config: PartyConfig) -> Self {
        let (state, _) = watch::channel(SquareState::default());
        Self {
            state: Arc::new(state),
            layout: LayoutCache::new(),
            colors: config
                .seed
                .map(RandomColors::seeded)
                .unwrap_or_else(RandomColors::from_entropy),
            client: None,
            disco: None,
            disco_config: config.disco,
        }
    }

    /// Party synced to a state service. Call [`Party::load`] to pull the stored squares.
    pub fn with_client(config: PartyConfig, client: ApiClient) -> Self {
        Self {
            client: Some(client),
            ..Self::new(config)
        }
    }

    /// Backend client, if any.
    pub fn client(&self) -> Option<&ApiClient> {
        self.client.as_ref()
    }

    /// Replace local squares with the stored collection. Returns `false` (keeping the
    /// local squares) when there is no backend or it is unreachable.
    pub async fn load(&mut self) -> bool {
        let Some(client) = &self.client else {
            return false;
        };
        match client.fetch_state().await {
            Ok(remote) => {
                tracing::info!(squares = remote.len(), "loaded squares from state service");
                self.state.send_replace(remote);
                true
            }
            Err(_) => false,
        }
    }

    /// Snapshot of the current squares.
    pub fn snapshot(&self) -> SquareState {
        self.state.borrow().clone()
    }

    /// Number of squares.
    pub fn len(&self) -> usize {
        self.state.borrow().len()
    }

    /// Return `true` when nobody has arrived yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Receive every published state change.
    pub fn subscribe(&self) -> watch::Receiver<SquareState> {
        self.state.subscribe()
    }

    /// Spiral positions for the current squares.
    pub fn positions(&mut self) -> Vec<GridPos> {
        let n = self.len();
        self.layout.positions_for(n).to_vec()
    }

    /// Orthogonal neighbours of square `index`.
    pub fn adjacent(&mut self, index: usize) -> BTreeSet<usize> {
        let n = self.len();
        adjacent(index, self.layout.positions_for(n))
    }

    /// Add a square with a fresh random color and try to persist it.
    pub async fn add_square(&mut self) -> Square {
        let square = Square::new(self.colors.next_color());
        self.state.send_modify(|s| s.squares.push(square.clone()));
        tracing::debug!(color = %square.color, squares = self.len(), "square added");
        if let Some(client) = &self.client {
            log_sync("add square", client.add_square(&square).await);
        }
        square
    }

    /// Remove every square (stopping disco first) and try to persist the reset.
    pub async fn clear(&mut self) {
        if let Some(task) = self.disco.take() {
            task.stop().await;
        }
        self.state.send_replace(SquareState::default());
        if let Some(client) = &self.client {
            log_sync("clear squares", client.clear().await);
        }
    }

    /// Return `true` while disco mode is on.
    pub fn disco_running(&self) -> bool {
        self.disco.as_ref().is_some_and(DiscoTask::is_running)
    }

    /// Turn disco mode on or off. Turning it off cancels the timer, restores every
    /// square's original color and tries to persist the restored state.
    pub async fn set_disco(&mut self, on: bool) {
        match (on, self.disco.is_some()) {
            (true, false) => {
                let task = DiscoTask::spawn(
                    Arc::clone(&self.state),
                    self.disco_config,
                    self.colors.fork(),
                );
                self.disco = Some(task);
            }
            (false, true) => {
                if let Some(task) = self.disco.take() {
                    task.stop().await;
                }
                self.state
                    .send_modify(|s| s.squares = restore_original_colors(&s.squares));
                if let Some(client) = &self.client {
                    let snapshot = self.state.borrow().clone();
                    log_sync("save squares", client.save_state(&snapshot).await);
                }
            }
            _ => {}
        }
    }
}

fn log_sync(what: &str, result: BlockPartyResult<SyncOutcome>) {
    match result {
        Ok(SyncOutcome::Synced) => tracing::debug!("{what}: synced"),
        Ok(SyncOutcome::Skipped) => tracing::debug!("{what}: skipped, offline"),
        Err(e) => tracing::debug!("{what}: kept local change: {e}"),
    }
}

/// Banner text for a party of `count` squares.
pub fn count_message(count: usize) -> String {
    match count {
        0 => "This party needs some guests! Add a square to invite some blocks!".to_string(),
        1 => "Just one square at this party so far!".to_string(),
        2..=3 => format!("{count} colorful squares getting the party started!"),
        4..=6 => format!("{count} squares dancing in a spiral!"),
        7..=10 => format!("Wow! {count} squares partying hard!"),
        11..=15 => format!("{count} squares?! This party is hopping!"),
        16..=20 => format!("{count} squares! The dance floor is packed!"),
        _ => format!("{count} squares! 🎉 This is the hottest party in town!"),
    }
}

#[cfg(test)]
#[path = "../tests/unit/party/party.rs"]
mod tests;
