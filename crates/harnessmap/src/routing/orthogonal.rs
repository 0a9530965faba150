//! Cheap per-edge corridor router used on every interactive redraw.
//!
//! A wire leaves its source horizontally, drops down (or climbs) a vertical
//! corridor to the left of the source, then runs horizontally into the
//! target. Sibling wires get their own corridor lanes so parallel runs stay
//! apart. Obstacle avoidance is bounded: the corridor is moved at most
//! [`MAX_CORRIDOR_ATTEMPTS`] times and then accepted as is.

use super::obstacles::{first_vertical_hit, nearest_horizontal_hit};
use super::path::{drop_collinear, push_if_different, rounded_commands};
use super::types::{Point, Rect, RoutedPath, RoutingConfig, SpreadMeta};

/// Vertical offsets below this are drawn as a straight line.
pub const STRAIGHT_EPSILON: f64 = 1.0;

/// Upper bound on corridor relocations per edge.
pub const MAX_CORRIDOR_ATTEMPTS: usize = 20;

/// Outcome of the bounded corridor search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorridorSearch {
    pub x: f64,
    /// How many times the corridor was moved. Never exceeds the cap.
    pub attempts: usize,
    /// False when the cap was hit and the corridor still crosses a box.
    pub clear: bool,
}

/// Starting corridor position before any obstacle is considered.
pub fn initial_corridor_x(source: Point, spread: &SpreadMeta, config: &RoutingConfig) -> f64 {
    source.x
        - config.base_offset
        - spread.source_lane() as f64 * config.lane_spacing
        - spread.target_pin_index as f64 * config.lane_spacing
}

/// Shift the corridor left past every obstacle its vertical run crosses.
pub fn find_corridor(
    start_x: f64,
    y1: f64,
    y2: f64,
    obstacles: &[Rect],
    clearance: f64,
) -> CorridorSearch {
    let mut x = start_x;
    for attempts in 0..MAX_CORRIDOR_ATTEMPTS {
        match first_vertical_hit(x, y1, y2, obstacles) {
            None => {
                return CorridorSearch {
                    x,
                    attempts,
                    clear: true,
                };
            }
            Some(hit) => x = hit.left - clearance,
        }
    }
    CorridorSearch {
        x,
        attempts: MAX_CORRIDOR_ATTEMPTS,
        clear: first_vertical_hit(x, y1, y2, obstacles).is_none(),
    }
}

/// Route one edge between two anchor points.
///
/// `obstacles` must already exclude the edge's own source and target nodes.
pub fn route_orthogonal(
    source: Point,
    target: Point,
    spread: &SpreadMeta,
    obstacles: &[Rect],
    config: &RoutingConfig,
) -> RoutedPath {
    if (target.y - source.y).abs() < STRAIGHT_EPSILON {
        let waypoints = vec![source, target];
        return RoutedPath {
            commands: rounded_commands(&waypoints, config.corner_radius),
            label_anchor: source.midpoint(target),
            splice_dot: None,
            corridor_clear: true,
            waypoints,
        };
    }

    let corridor = find_corridor(
        initial_corridor_x(source, spread, config),
        source.y,
        target.y,
        obstacles,
        config.corridor_clearance,
    );
    if !corridor.clear {
        tracing::trace!(
            corridor_x = corridor.x,
            attempts = corridor.attempts,
            "corridor still crosses an obstacle, accepting"
        );
    }
    let cx = corridor.x;
    let corridor_entry = Point::new(cx, source.y);

    let mut points = vec![source];
    push_if_different(&mut points, corridor_entry);

    let going_down = target.y > source.y;
    let corridor_end = match nearest_horizontal_hit(target.y, cx, target.x, obstacles) {
        Some(hit) => {
            let jog_y = if going_down {
                hit.top - config.jog_offset
            } else {
                hit.bottom + config.jog_offset
            };
            let past_x = if target.x >= cx {
                (hit.right + config.jog_offset).min(target.x)
            } else {
                (hit.left - config.jog_offset).max(target.x)
            };
            tracing::debug!(jog_y, past_x, "jogging around approach obstacle");
            let turn = Point::new(cx, jog_y);
            push_if_different(&mut points, turn);
            push_if_different(&mut points, Point::new(past_x, jog_y));
            push_if_different(&mut points, Point::new(past_x, target.y));
            turn
        }
        None => {
            let turn = Point::new(cx, target.y);
            push_if_different(&mut points, turn);
            turn
        }
    };
    push_if_different(&mut points, target);

    let waypoints = drop_collinear(&points);
    let splice_dot = (spread.is_spliced() && spread.splice_index == 0).then_some(corridor_entry);

    RoutedPath {
        commands: rounded_commands(&waypoints, config.corner_radius),
        label_anchor: corridor_entry.midpoint(corridor_end),
        splice_dot,
        corridor_clear: corridor.clear,
        waypoints,
    }
}
