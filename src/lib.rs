//! Block party: colored squares arranged in an expanding square-ring spiral.
//!
//! # Pieces
//!
//! 1. **Layout**: `count -> [GridPos]`, one cell per square, rings growing outward from the
//!    origin ([`compute_positions`]). The sequence is prefix-stable: adding a square never
//!    moves the ones already placed.
//! 2. **Adjacency**: orthogonal grid neighbours of a square ([`adjacent`], [`NeighborIndex`]).
//! 3. **Disco**: a cancellable repeating recolor pass that keeps neighbours from sharing a
//!    color ([`DiscoTask`], [`recolor_pass`]).
//! 4. **Persistence**: a JSON file behind a small HTTP service ([`FileStore`], [`build_router`])
//!    and a timeout-bounded client that degrades to offline mode ([`ApiClient`]).
//! 5. **Party**: the headless controller wiring the above together ([`Party`]).
//!
//! Layout and adjacency are pure and allocation-light; all IO lives in the store, server and
//! client.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod client;
mod color;
mod disco;
mod foundation;
mod layout;
mod model;
mod party;
mod render;
mod server;
mod store;

pub use client::{ApiClient, ClientConfig, DEFAULT_TIMEOUT, SyncOutcome};
pub use color::{
    ColorSet, ColorSource, MAX_COLOR_ATTEMPTS, RandomColors, different_color, random_hex_color,
};
pub use disco::{
    DiscoConfig, DiscoTask, forbidden_colors, recolor_pass, restore_original_colors,
};
pub use foundation::core::{GridPos, Rgb8, is_hex_color};
pub use foundation::error::{BlockPartyError, BlockPartyResult};
pub use layout::adjacency::{NeighborIndex, adjacent};
pub use layout::spiral::{GridExtent, LayoutCache, SpiralWalk, compute_positions, position_at};
pub use model::{Square, SquareState};
pub use party::{Party, PartyConfig, count_message};
pub use render::{MAX_SNAPSHOT_SIDE, RenderOpts, render_snapshot};
pub use server::config::{DEFAULT_BIND, DEFAULT_CORS_ORIGIN, DEFAULT_STATE_FILE};
pub use server::{AppState, ServerConfig, build_router, serve};
pub use store::FileStore;
