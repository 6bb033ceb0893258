//! Stats tree data structures and the annotation pipeline.
//!
//! Input trees flow through three passes, each over a copy owned by the
//! pipeline: aggregation (bottom-up totals), partitioning (angular spans),
//! and indexing into a [`SunburstTree`] arena with explicit parent links.

pub mod aggregate;
mod annotated;
mod node;
pub mod partition;

pub use aggregate::{aggregate, aggregated};
pub use annotated::{SunburstNode, SunburstTree};
pub use node::{NO_DATA, StatsNode, display_value};
pub use partition::{ROOT_END_ANGLE, ROOT_START_ANGLE, assign_angles, assign_full_circle};
pub use petgraph::stable_graph::NodeIndex;
