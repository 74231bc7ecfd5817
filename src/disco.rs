//! Disco mode: periodically recolor every square while keeping orthogonal neighbours apart.

use std::{
    collections::{BTreeSet, HashSet},
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use tokio::{
    sync::{oneshot, watch},
    task::JoinHandle,
    time::MissedTickBehavior,
};

use crate::{
    color::{ColorSource, MAX_COLOR_ATTEMPTS, different_color},
    foundation::core::GridPos,
    layout::{adjacency::NeighborIndex, spiral::LayoutCache},
    model::{Square, SquareState},
};

/// Timing and retry knobs for disco mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiscoConfig {
    /// Time between recolor passes.
    pub period: Duration,
    /// Candidate draws per square before accepting a collision.
    pub max_color_attempts: usize,
}

impl Default for DiscoConfig {
    fn default() -> Self {
        Self {
            period: Duration::from_millis(500),
            max_color_attempts: MAX_COLOR_ATTEMPTS,
        }
    }
}

/// Colors square `index` must not take: its neighbours' current colors plus its own
/// original color.
pub fn forbidden_colors(
    index: usize,
    squares: &[Square],
    neighbors: &BTreeSet<usize>,
) -> HashSet<String> {
    let mut avoid: HashSet<String> = neighbors
        .iter()
        .filter_map(|&j| squares.get(j))
        .map(|sq| sq.color.clone())
        .collect();
    if let Some(orig) = squares.get(index).and_then(|sq| sq.original_color.as_ref()) {
        avoid.insert(orig.clone());
    }
    avoid
}

/// Compute a full replacement color set from one snapshot.
///
/// Every forbidden set is read from `squares` as passed in, never from colors assigned
/// earlier in the same pass. Squares without an original color get their current one
/// recorded so it can be restored later. Squares beyond `positions.len()` have no
/// neighbours.
pub fn recolor_pass<S>(
    squares: &[Square],
    positions: &[GridPos],
    source: &mut S,
    max_attempts: usize,
) -> Vec<Square>
where
    S: ColorSource + ?Sized,
{
    let index = NeighborIndex::build(positions);
    squares
        .iter()
        .enumerate()
        .map(|(i, sq)| {
            let avoid = forbidden_colors(i, squares, &index.neighbors(i));
            Square {
                color: different_color(&mut *source, &avoid, max_attempts),
                original_color: Some(
                    sq.original_color
                        .clone()
                        .unwrap_or_else(|| sq.color.clone()),
                ),
            }
        })
        .collect()
}

/// Put every square back to its original color (squares without one keep their current color).
pub fn restore_original_colors(squares: &[Square]) -> Vec<Square> {
    squares
        .iter()
        .map(|sq| Square {
            color: sq.original_color.clone().unwrap_or_else(|| sq.color.clone()),
            original_color: sq.original_color.clone(),
        })
        .collect()
}

/// Repeating recolor task bound to a shared square state.
///
/// Each tick snapshots the state, recolors it, and publishes the result as one update.
/// After [`DiscoTask::stop`] returns no further tick runs. Dropping the task aborts it.
#[derive(Debug)]
pub struct DiscoTask {
    stop: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
    ticks: Arc<AtomicU64>,
}

impl DiscoTask {
    /// Start ticking on the current tokio runtime. The first pass runs one `period` after spawn.
    pub fn spawn<S>(
        state: Arc<watch::Sender<SquareState>>,
        config: DiscoConfig,
        source: S,
    ) -> Self
    where
        S: ColorSource + 'static,
    {
        let (stop_tx, stop_rx) = oneshot::channel();
        let ticks = Arc::new(AtomicU64::new(0));
        let handle = tokio::spawn(run(state, config, source, stop_rx, Arc::clone(&ticks)));
        tracing::info!(period_ms = config.period.as_millis() as u64, "disco mode started");
        Self {
            stop: Some(stop_tx),
            handle: Some(handle),
            ticks,
        }
    }

    /// Recolor passes completed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Acquire)
    }

    /// Return `true` until the task has been stopped or has exited.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Cancel the timer and wait for the task to exit.
    pub async fn stop(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(handle) = self.handle.take()
            && let Err(e) = handle.await
            && !e.is_cancelled()
        {
            tracing::error!("disco task failed: {e}");
        }
        tracing::info!(ticks = self.ticks(), "disco mode stopped");
    }
}

impl Drop for DiscoTask {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

async fn run<S>(
    state: Arc<watch::Sender<SquareState>>,
    config: DiscoConfig,
    mut source: S,
    mut stop: oneshot::Receiver<()>,
    ticks: Arc<AtomicU64>,
) where
    S: ColorSource,
{
    let mut interval = tokio::time::interval(config.period.max(Duration::from_millis(1)));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately.
    interval.tick().await;

    let mut layout = LayoutCache::new();
    loop {
        tokio::select! {
            biased;
            _ = &mut stop => break,
            _ = interval.tick() => {}
        }

        state.send_modify(|current| {
            let positions = layout.positions_for(current.len());
            let next = recolor_pass(
                &current.squares,
                positions,
                &mut source,
                config.max_color_attempts,
            );
            current.squares = next;
        });
        let n = ticks.fetch_add(1, Ordering::AcqRel) + 1;
        tracing::debug!(tick = n, "disco recolor pass");
    }
}

#[cfg(test)]
#[path = "../tests/unit/disco/disco.rs"]
mod tests;
