//! Best-first search with dominance pruning, and the puzzles built on it: releasing pressure
//! from a network of valves with one or two agents, and scheduling robot factories.

pub mod blueprint;
pub mod cli;
pub mod compact;
pub mod dominance;
pub mod dual;
pub mod error;
pub mod frontier;
pub mod search;
pub mod single;
pub mod volcano;

pub use compact::CompactGraph;
pub use error::{Error, Result};
pub use search::{best_first, Outcome, Problem};
pub use volcano::Volcano;

/// Scores only ever grow along a search path.
pub type Score = usize;
