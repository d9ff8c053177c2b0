//! Graph-search drivers over [`Problem`](crate::problem::Problem) instances.
//!
//! Every driver deduplicates by state (never by node), records the same
//! [`Telemetry`] while it runs, and hands back a [`SearchOutcome`] whether or
//! not a goal was found, so reporting and visualization code does not care
//! which strategy produced the run.

mod best_first;
mod bfs;
mod dfs;
mod telemetry;

pub use best_first::{astar_search, best_first_graph_search};
pub use bfs::breadth_first_graph_search;
pub use dfs::depth_first_graph_search;
pub use telemetry::{SearchOutcome, Telemetry};
