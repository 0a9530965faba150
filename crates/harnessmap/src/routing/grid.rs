use crate::model::Node;

use super::obstacles::build_obstacles;
use super::types::{CellCoord, Direction, Point, Rect, RoutingConfig};

/// Coarse walkable/blocked grid laid over the canvas for the precise router.
///
/// Cells are square. `cell_size` from the config is a lower bound, not a fixed
/// value: when the canvas is larger than `max_grid_cells` cells of that size,
/// the cell size grows so the grid still covers the whole canvas while
/// staying within the cap. The column and row counts are never cut at the cap
/// with the configured size, since that would leave the far side of a wide
/// canvas (and any anchor on it) off the grid.
pub struct OccupancyGrid {
    origin: Point,
    cell_size: f64,
    cols: i32,
    rows: i32,
    blocked: Vec<bool>,
}

impl OccupancyGrid {
    /// Build the grid for one edge.
    ///
    /// Every node except `source_node_id` and `target_node_id` blocks the
    /// cells under its padded box. `anchors` are included in the canvas
    /// bounds so the endpoints always fall on the grid.
    pub fn build(
        nodes: &[Node],
        source_node_id: Option<&str>,
        target_node_id: Option<&str>,
        anchors: &[Point],
        config: &RoutingConfig,
    ) -> Self {
        let bounds = canvas_bounds(nodes, anchors).padded(config.canvas_padding);

        let max_cells = config.max_grid_cells.max(1) as f64;
        let cell_size = config
            .cell_size
            .max(bounds.width() / max_cells)
            .max(bounds.height() / max_cells)
            .max(f64::EPSILON);
        let cols = ((bounds.width() / cell_size).ceil() as i32).clamp(1, max_cells as i32);
        let rows = ((bounds.height() / cell_size).ceil() as i32).clamp(1, max_cells as i32);

        let mut grid = Self {
            origin: Point::new(bounds.left, bounds.top),
            cell_size,
            cols,
            rows,
            blocked: vec![false; (cols * rows) as usize],
        };

        let exclude: Vec<&str> = [source_node_id, target_node_id]
            .into_iter()
            .flatten()
            .collect();
        for obstacle in build_obstacles(nodes, &exclude, config.obstacle_padding) {
            grid.block_rect(&obstacle);
        }
        grid
    }

    /// Block every cell whose centre lies inside `rect`.
    fn block_rect(&mut self, rect: &Rect) {
        let c0 = ((rect.left - self.origin.x) / self.cell_size - 0.5).ceil() as i32;
        let c1 = ((rect.right - self.origin.x) / self.cell_size - 0.5).floor() as i32;
        let r0 = ((rect.top - self.origin.y) / self.cell_size - 0.5).ceil() as i32;
        let r1 = ((rect.bottom - self.origin.y) / self.cell_size - 0.5).floor() as i32;
        for row in r0.max(0)..=r1.min(self.rows - 1) {
            for col in c0.max(0)..=c1.min(self.cols - 1) {
                let idx = self.index(CellCoord::new(col, row));
                self.blocked[idx] = true;
            }
        }
    }

    fn index(&self, cell: CellCoord) -> usize {
        (cell.row * self.cols + cell.col) as usize
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn contains(&self, cell: CellCoord) -> bool {
        cell.col >= 0 && cell.col < self.cols && cell.row >= 0 && cell.row < self.rows
    }

    /// Out-of-range cells count as blocked.
    pub fn is_blocked(&self, cell: CellCoord) -> bool {
        !self.contains(cell) || self.blocked[self.index(cell)]
    }

    pub fn set_walkable(&mut self, cell: CellCoord) {
        if self.contains(cell) {
            let idx = self.index(cell);
            self.blocked[idx] = false;
        }
    }

    /// The cell containing `p`, clamped into the grid.
    pub fn snap(&self, p: Point) -> CellCoord {
        let col = ((p.x - self.origin.x) / self.cell_size).floor() as i32;
        let row = ((p.y - self.origin.y) / self.cell_size).floor() as i32;
        CellCoord::new(col.clamp(0, self.cols - 1), row.clamp(0, self.rows - 1))
    }

    pub fn cell_center(&self, cell: CellCoord) -> Point {
        Point::new(
            self.origin.x + (cell.col as f64 + 0.5) * self.cell_size,
            self.origin.y + (cell.row as f64 + 0.5) * self.cell_size,
        )
    }

    /// Walkable 4-neighbours of `cell` with the direction of travel.
    pub fn neighbors(&self, cell: CellCoord) -> impl Iterator<Item = (CellCoord, Direction)> + '_ {
        Direction::ALL
            .into_iter()
            .map(move |dir| (cell.step(dir), dir))
            .filter(|(next, _)| !self.is_blocked(*next))
    }
}

/// Bounding box of all nodes and anchor points.
fn canvas_bounds(nodes: &[Node], anchors: &[Point]) -> Rect {
    let mut rects = nodes
        .iter()
        .map(Node::rect)
        .chain(anchors.iter().map(|p| Rect {
            left: p.x,
            top: p.y,
            right: p.x,
            bottom: p.y,
        }));
    let Some(first) = rects.next() else {
        return Rect {
            left: 0.0,
            top: 0.0,
            right: 0.0,
            bottom: 0.0,
        };
    };
    rects.fold(first, |acc, r| acc.union(&r))
}
