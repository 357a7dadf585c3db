//! An incremental game of life engine.
//!
//! [`World`] keeps live cells, per-cell neighbor counts and a dirty work-set,
//! so stepping a generation only looks at cells whose neighborhood changed.
//! [`rescan`] recomputes generations densely and serves as a reference.

pub use utils::{Pos, NEIGHBOR_OFFSETS};
mod utils;

pub use error::{Error, Result};
mod error;

pub use world::{Board, Topology, World};
pub mod world;

pub mod rescan;

pub use pattern::Pattern;
pub mod pattern;

pub mod seed;

pub use sim::{Sim, SimCmd, SimHandle, Snapshot};
pub mod sim;

pub use view::View;
pub mod view;

pub use config::Config;
mod config;
