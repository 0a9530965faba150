pub mod grid;
pub mod obstacles;
pub mod orthogonal;
pub mod path;
pub mod plan;
pub mod search;
pub mod types;

#[cfg(test)]
mod tests;

use rayon::prelude::*;

use crate::model::{Diagram, Node};

use obstacles::build_obstacles;
use orthogonal::route_orthogonal;
use plan::{PlannedEdge, plan_edges};
use search::find_route;
use types::{EdgeRequest, RouteMode, RoutedPath, RoutingConfig};

/// Result for routing a single wire.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteResult {
    Success(RoutedPath),
    /// The wire's endpoints could not be resolved to canvas anchors.
    Failure { warning: String },
}

/// Output of routing every wire in a diagram, in wire order.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingOutput {
    pub results: Vec<(String, RouteResult)>,
}

impl RoutingOutput {
    /// Path for `wire_id`, if it was routed.
    pub fn path(&self, wire_id: &str) -> Option<&RoutedPath> {
        self.results
            .iter()
            .find(|(id, _)| id == wire_id)
            .and_then(|(_, r)| match r {
                RouteResult::Success(path) => Some(path),
                RouteResult::Failure { .. } => None,
            })
    }
}

/// Caller-owned routing engine.
///
/// Holds only configuration; every call rebuilds its obstacles and grids from
/// the nodes it is given, so one engine can serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct RoutingEngine {
    config: RoutingConfig,
}

impl RoutingEngine {
    pub fn new(config: RoutingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Corridor route for one edge. Cheap enough for every frame.
    pub fn route_edge(&self, request: &EdgeRequest, nodes: &[Node]) -> RoutedPath {
        let exclude: Vec<&str> = [
            request.source_node_id.as_deref(),
            request.target_node_id.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect();
        let obstacles = build_obstacles(nodes, &exclude, self.config.obstacle_padding);
        route_orthogonal(
            request.source,
            request.target,
            &request.spread,
            &obstacles,
            &self.config,
        )
    }

    /// Grid A* route for one edge. Meant for on-demand recalculation.
    ///
    /// The splice marker is placed the same way as for corridor routes, at
    /// the first bend of the first wire in a splice group.
    pub fn route_precise(&self, request: &EdgeRequest, nodes: &[Node]) -> RoutedPath {
        let mut path = find_route(
            request.source,
            request.target,
            nodes,
            request.source_node_id.as_deref(),
            request.target_node_id.as_deref(),
            &self.config,
        );
        if request.spread.is_spliced() && request.spread.splice_index == 0 && path.waypoints.len() > 2
        {
            path.splice_dot = Some(path.waypoints[1]);
        }
        path
    }

    pub fn route(&self, request: &EdgeRequest, nodes: &[Node], mode: RouteMode) -> RoutedPath {
        match mode {
            RouteMode::Orthogonal => self.route_edge(request, nodes),
            RouteMode::Precise => self.route_precise(request, nodes),
        }
    }

    /// Route every wire of a diagram.
    ///
    /// Edges are independent, so they are routed in parallel; results keep
    /// wire order regardless.
    pub fn route_diagram(&self, diagram: &Diagram, mode: RouteMode) -> RoutingOutput {
        let nodes = diagram.nodes();
        let planned = plan_edges(diagram);

        let results: Vec<(String, RouteResult)> = planned
            .into_par_iter()
            .map(|edge| match edge {
                PlannedEdge::Ready(request) => {
                    let path = self.route(&request, &nodes, mode);
                    tracing::debug!(
                        wire = %request.wire_id,
                        points = path.waypoints.len(),
                        clear = path.corridor_clear,
                        "routed wire"
                    );
                    (request.wire_id, RouteResult::Success(path))
                }
                PlannedEdge::Unresolved { wire_id, warning } => {
                    (wire_id, RouteResult::Failure { warning })
                }
            })
            .collect();

        RoutingOutput { results }
    }
}
