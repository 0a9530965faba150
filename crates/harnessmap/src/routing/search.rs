use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::model::Node;

use super::grid::OccupancyGrid;
use super::path::rounded_commands;
use super::types::{CellCoord, Direction, Point, RoutedPath, RoutingConfig};

/// Cost of one cell step. Path length always dominates turn count.
const STEP_COST: u64 = 1_000_000;
/// Cost of a bend; only breaks ties between equally long paths.
const TURN_COST: u64 = 1;

/// State key for the visited set. Identifies a unique search state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct StateKey {
    cell: CellCoord,
    /// `None` only for the start cell.
    last_direction: Option<Direction>,
}

/// Wrapper for the priority queue with deterministic ordering.
/// BinaryHeap is a max-heap, so we reverse the ordering (lowest cost = highest priority).
#[derive(Debug, PartialEq, Eq)]
struct PqEntry {
    f_cost: u64,
    g_cost: u64,
    key: StateKey,
}

impl Ord for PqEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f_cost
            .cmp(&self.f_cost)
            // For same f_cost, prefer the state further along.
            .then(self.g_cost.cmp(&other.g_cost))
            .then(other.key.cell.cmp(&self.key.cell))
            .then(other.key.last_direction.cmp(&self.key.last_direction))
    }
}

impl PartialOrd for PqEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn heuristic(from: CellCoord, to: CellCoord) -> u64 {
    from.manhattan_to(to) as u64 * STEP_COST
}

/// 4-directional A* over the occupancy grid.
///
/// Returns the cell sequence from `start` to `goal` inclusive, or `None` when
/// the goal is unreachable. `start` and `goal` must be walkable.
pub fn astar(grid: &OccupancyGrid, start: CellCoord, goal: CellCoord) -> Option<Vec<CellCoord>> {
    let start_key = StateKey {
        cell: start,
        last_direction: None,
    };
    let mut open = BinaryHeap::new();
    let mut best_g: HashMap<StateKey, u64> = HashMap::new();
    let mut came_from: HashMap<StateKey, StateKey> = HashMap::new();

    best_g.insert(start_key, 0);
    open.push(PqEntry {
        f_cost: heuristic(start, goal),
        g_cost: 0,
        key: start_key,
    });

    while let Some(PqEntry { g_cost, key, .. }) = open.pop() {
        // Skip if we've found a better path to this state.
        if best_g.get(&key).is_some_and(|&best| g_cost > best) {
            continue;
        }

        if key.cell == goal {
            return Some(reconstruct(&came_from, key));
        }

        for (next, dir) in grid.neighbors(key.cell) {
            // Don't go backwards.
            if key.last_direction.is_some_and(|last| dir == last.opposite()) {
                continue;
            }
            let is_turn = key.last_direction.is_some_and(|last| last.is_turn(dir));
            let new_g = g_cost + STEP_COST + if is_turn { TURN_COST } else { 0 };
            let next_key = StateKey {
                cell: next,
                last_direction: Some(dir),
            };

            if best_g.get(&next_key).is_some_and(|&best| new_g >= best) {
                continue;
            }
            best_g.insert(next_key, new_g);
            came_from.insert(next_key, key);
            open.push(PqEntry {
                f_cost: new_g + heuristic(next, goal),
                g_cost: new_g,
                key: next_key,
            });
        }
    }

    None
}

fn reconstruct(came_from: &HashMap<StateKey, StateKey>, goal: StateKey) -> Vec<CellCoord> {
    let mut cells = vec![goal.cell];
    let mut current = goal;
    while let Some(&parent) = came_from.get(&current) {
        cells.push(parent.cell);
        current = parent;
    }
    cells.reverse();
    cells
}

/// Keep the endpoints and every cell where the direction of travel changes.
pub fn simplify(cells: &[CellCoord]) -> Vec<CellCoord> {
    if cells.len() <= 2 {
        return cells.to_vec();
    }
    let mut out = vec![cells[0]];
    for w in cells.windows(3) {
        if Direction::between(w[0], w[1]) != Direction::between(w[1], w[2]) {
            out.push(w[1]);
        }
    }
    out.push(cells[cells.len() - 1]);
    out
}

/// Obstacle-avoiding route between two anchors on a fresh occupancy grid.
///
/// Much more expensive than the corridor router; meant for on-demand
/// "precise routing" passes. Falls back to a straight line when the grid
/// offers no path. The returned path always starts exactly at `source` and
/// ends exactly at `target`.
pub fn find_route(
    source: Point,
    target: Point,
    nodes: &[Node],
    source_node_id: Option<&str>,
    target_node_id: Option<&str>,
    config: &RoutingConfig,
) -> RoutedPath {
    let mut grid = OccupancyGrid::build(
        nodes,
        source_node_id,
        target_node_id,
        &[source, target],
        config,
    );
    let start = grid.snap(source);
    let goal = grid.snap(target);
    grid.set_walkable(start);
    grid.set_walkable(goal);

    let Some(cells) = astar(&grid, start, goal) else {
        tracing::debug!(?start, ?goal, "no grid path, using straight fallback");
        return straight_fallback(source, target, config);
    };

    let turning = simplify(&cells);
    let mut waypoints: Vec<Point> = turning.iter().map(|&c| grid.cell_center(c)).collect();
    if waypoints.len() < 2 {
        waypoints = vec![source, target];
    } else {
        let last = waypoints.len() - 1;
        waypoints[0] = source;
        waypoints[last] = target;
    }
    tracing::debug!(
        cells = cells.len(),
        bends = waypoints.len().saturating_sub(2),
        cell_size = grid.cell_size(),
        "precise route found"
    );

    RoutedPath {
        commands: rounded_commands(&waypoints, config.corner_radius),
        label_anchor: waypoints[waypoints.len() / 2],
        splice_dot: None,
        corridor_clear: true,
        waypoints,
    }
}

fn straight_fallback(source: Point, target: Point, config: &RoutingConfig) -> RoutedPath {
    let waypoints = vec![source, target];
    RoutedPath {
        commands: rounded_commands(&waypoints, config.corner_radius),
        label_anchor: source.midpoint(target),
        splice_dot: None,
        corridor_clear: false,
        waypoints,
    }
}
