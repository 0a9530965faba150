mod orthogonal;
mod precise;

use super::obstacles::{horizontal_crosses, vertical_crosses};
use super::types::{EdgeRequest, Point, Rect, RoutedPath, RoutingConfig, SpreadMeta};
use super::{RouteResult, RoutingOutput};

const AXIS_TOLERANCE: f64 = 1e-6;

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn rect(left: f64, top: f64, right: f64, bottom: f64) -> Rect {
    Rect {
        left,
        top,
        right,
        bottom,
    }
}

fn cfg() -> RoutingConfig {
    RoutingConfig::default()
}

/// Spread metadata for a wire alone on its pin and component.
fn single() -> SpreadMeta {
    SpreadMeta {
        splice_index: 0,
        splice_total: 1,
        source_component_index: 0,
        source_component_total: 1,
        target_pin_index: 0,
        target_pin_total: 1,
    }
}

/// Spread metadata for one branch of a splice group of `total` wires.
fn spliced(index: usize, total: usize) -> SpreadMeta {
    SpreadMeta {
        splice_index: index,
        splice_total: total,
        source_component_index: index,
        source_component_total: total,
        ..single()
    }
}

fn request(wire_id: &str, source: Point, target: Point) -> EdgeRequest {
    EdgeRequest {
        wire_id: wire_id.to_string(),
        source,
        target,
        source_node_id: None,
        target_node_id: None,
        spread: single(),
    }
}

/// Assert every segment of the path is horizontal or vertical.
fn assert_orthogonal(path: &RoutedPath) {
    for seg in path.waypoints.windows(2) {
        let (a, b) = (seg[0], seg[1]);
        assert!(
            (a.x - b.x).abs() <= AXIS_TOLERANCE || (a.y - b.y).abs() <= AXIS_TOLERANCE,
            "diagonal segment {a} -> {b} in {:?}",
            path.waypoints
        );
    }
}

/// Assert the path starts and ends exactly on the given anchors.
fn assert_endpoints(path: &RoutedPath, source: Point, target: Point) {
    assert_eq!(path.waypoints.first(), Some(&source));
    assert_eq!(path.waypoints.last(), Some(&target));
}

/// Whether any axis-aligned segment of `waypoints` passes through `obstacle`.
fn crosses(waypoints: &[Point], obstacle: &Rect) -> bool {
    waypoints.windows(2).any(|seg| {
        let (a, b) = (seg[0], seg[1]);
        if a.x == b.x {
            vertical_crosses(a.x, a.y, b.y, obstacle)
        } else if a.y == b.y {
            horizontal_crosses(a.y, a.x, b.x, obstacle)
        } else {
            false
        }
    })
}

/// Get the path for the wire at `idx`, panicking on failure.
fn get_path(output: &RoutingOutput, idx: usize) -> &RoutedPath {
    match &output.results[idx].1 {
        RouteResult::Success(path) => path,
        RouteResult::Failure { warning } => panic!("wire {idx} failed: {warning}"),
    }
}
