//! Wire routing and splice normalization for automotive harness diagrams.
//!
//! The core is two independent pieces:
//!
//! - [`routing`]: computes drawable orthogonal paths for wires between pin
//!   anchors, either with the cheap per-edge corridor router or with a grid
//!   A* search that avoids every component.
//! - [`junction`]: rewrites wires that share a source pin into an explicit
//!   junction with a trunk wire feeding it.
//!
//! Both operate on the [`model::Diagram`] snapshot and never fail; only file
//! and config handling return [`Error`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod junction;
pub mod model;
pub mod routing;

pub use error::{Error, Result};
pub use junction::{detect_splices, migrate, needs_migration, pending_splices};
pub use model::Diagram;
pub use routing::types::{Point, RouteMode, RoutedPath, RoutingConfig};
pub use routing::{RouteResult, RoutingEngine, RoutingOutput};
