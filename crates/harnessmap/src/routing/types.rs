use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A point in canvas coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }

    /// The point `distance` units from `self` toward `toward`.
    pub fn toward(self, toward: Point, distance: f64) -> Point {
        let len = self.distance_to(toward);
        if len <= f64::EPSILON {
            return self;
        }
        let ux = (toward.x - self.x) / len;
        let uy = (toward.y - self.y) / len;
        Point::new(self.x + ux * distance, self.y + uy * distance)
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis-aligned box, used for padded obstacles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn padded(&self, padding: f64) -> Rect {
        Rect {
            left: self.left - padding,
            top: self.top - padding,
            right: self.right + padding,
            bottom: self.bottom + padding,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }

    /// Smallest box covering both.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }
}

/// Grid cell coordinate used by the precise router.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellCoord {
    pub col: i32,
    pub row: i32,
}

impl CellCoord {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Step one cell in the given direction.
    pub fn step(self, dir: Direction) -> Self {
        match dir {
            Direction::North => Self::new(self.col, self.row - 1),
            Direction::South => Self::new(self.col, self.row + 1),
            Direction::East => Self::new(self.col + 1, self.row),
            Direction::West => Self::new(self.col - 1, self.row),
        }
    }

    pub fn manhattan_to(self, other: CellCoord) -> i32 {
        (self.col - other.col).abs() + (self.row - other.row).abs()
    }
}

impl Ord for CellCoord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl PartialOrd for CellCoord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.col, self.row)
    }
}

/// Cardinal direction for travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::East | Direction::West)
    }

    /// Whether a transition from `self` to `other` constitutes a turn.
    pub fn is_turn(self, other: Direction) -> bool {
        self.is_horizontal() != other.is_horizontal()
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Direction of travel between two orthogonally adjacent cells.
    pub fn between(a: CellCoord, b: CellCoord) -> Option<Direction> {
        match (b.col - a.col, b.row - a.row) {
            (0, r) if r < 0 => Some(Direction::North),
            (0, r) if r > 0 => Some(Direction::South),
            (c, 0) if c > 0 => Some(Direction::East),
            (c, 0) if c < 0 => Some(Direction::West),
            _ => None,
        }
    }
}

/// Parallel-wire spreading information for one edge.
///
/// Indices are zero-based; totals count the edge itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadMeta {
    /// Position among wires sharing the same source pin.
    pub splice_index: usize,
    pub splice_total: usize,
    /// Position among wires leaving the same source component.
    pub source_component_index: usize,
    pub source_component_total: usize,
    /// Position among wires arriving at the same target pin.
    pub target_pin_index: usize,
    pub target_pin_total: usize,
}

impl SpreadMeta {
    /// Whether the edge shares its source pin with at least one other wire.
    pub fn is_spliced(&self) -> bool {
        self.splice_total > 1
    }

    /// Lane index on the source side: splice siblings first, otherwise the
    /// wire's position among its component's outgoing wires.
    pub fn source_lane(&self) -> usize {
        if self.is_spliced() {
            self.splice_index
        } else {
            self.source_component_index
        }
    }
}

/// Everything needed to route one wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeRequest {
    pub wire_id: String,
    pub source: Point,
    pub target: Point,
    pub source_node_id: Option<String>,
    pub target_node_id: Option<String>,
    pub spread: SpreadMeta,
}

/// One drawing instruction of a rounded path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum PathCommand {
    MoveTo { to: Point },
    LineTo { to: Point },
    /// Quadratic curve through `ctrl` ending at `to`.
    QuadTo { ctrl: Point, to: Point },
}

/// Geometry computed for a single wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutedPath {
    /// Orthogonal waypoints from source to target. Never empty.
    pub waypoints: Vec<Point>,
    /// Rounded-corner drawing commands derived from `waypoints`.
    pub commands: Vec<PathCommand>,
    pub label_anchor: Point,
    /// Marks the physical splice location on the first wire of a splice group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub splice_dot: Option<Point>,
    /// False when the bounded obstacle search gave up and the route may
    /// cross an obstacle.
    pub corridor_clear: bool,
}

/// Which router to use for a diagram pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouteMode {
    /// Cheap per-edge corridor router, for interactive redraws.
    #[default]
    Orthogonal,
    /// Grid A* router, for on-demand precise routing.
    Precise,
}

/// Tunable distances for both routers, in canvas units.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingConfig {
    /// Distance of the default corridor to the left of the source point.
    pub base_offset: f64,
    /// Spacing between parallel corridors of sibling wires.
    pub lane_spacing: f64,
    /// Gap kept between a relocated corridor and the obstacle it avoids.
    pub corridor_clearance: f64,
    /// Distance a jog keeps from the obstacle it steps around.
    pub jog_offset: f64,
    /// Padding added around each node to form its obstacle box.
    pub obstacle_padding: f64,
    pub corner_radius: f64,
    /// Precise router cell size.
    pub cell_size: f64,
    /// Margin added around the node bounding box before gridding.
    pub canvas_padding: f64,
    /// Upper bound on grid columns and rows.
    pub max_grid_cells: usize,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_offset: 30.0,
            lane_spacing: 8.0,
            corridor_clearance: 12.0,
            jog_offset: 10.0,
            obstacle_padding: 10.0,
            corner_radius: 8.0,
            cell_size: 10.0,
            canvas_padding: 50.0,
            max_grid_cells: 200,
        }
    }
}
