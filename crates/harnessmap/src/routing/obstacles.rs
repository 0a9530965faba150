//! Padded node boxes and the segment tests both routers share.

use crate::model::Node;

use super::types::Rect;

/// Build padded boxes for every node not listed in `exclude_ids`.
///
/// Callers exclude the edge's own source and target nodes so a wire is never
/// blocked by the components it connects.
pub fn build_obstacles(nodes: &[Node], exclude_ids: &[&str], padding: f64) -> Vec<Rect> {
    nodes
        .iter()
        .filter(|n| !exclude_ids.contains(&n.id.as_str()))
        .map(|n| n.rect().padded(padding))
        .collect()
}

/// Whether the vertical segment at `x` between `y1` and `y2` passes through
/// the interior of `rect`. Touching an edge does not count.
pub fn vertical_crosses(x: f64, y1: f64, y2: f64, rect: &Rect) -> bool {
    let (min_y, max_y) = if y1 < y2 { (y1, y2) } else { (y2, y1) };
    x > rect.left && x < rect.right && max_y > rect.top && min_y < rect.bottom
}

/// Horizontal counterpart of [`vertical_crosses`].
pub fn horizontal_crosses(y: f64, x1: f64, x2: f64, rect: &Rect) -> bool {
    let (min_x, max_x) = if x1 < x2 { (x1, x2) } else { (x2, x1) };
    y > rect.top && y < rect.bottom && max_x > rect.left && min_x < rect.right
}

/// First obstacle (in index order) hit by a vertical segment.
pub fn first_vertical_hit(x: f64, y1: f64, y2: f64, obstacles: &[Rect]) -> Option<&Rect> {
    obstacles.iter().find(|r| vertical_crosses(x, y1, y2, r))
}

/// Obstacle hit by a horizontal segment travelling from `x_from` toward
/// `x_to` that the segment reaches first.
pub fn nearest_horizontal_hit(y: f64, x_from: f64, x_to: f64, obstacles: &[Rect]) -> Option<&Rect> {
    let heading_right = x_to >= x_from;
    obstacles
        .iter()
        .filter(|r| horizontal_crosses(y, x_from, x_to, r))
        .min_by(|a, b| {
            let (da, db) = if heading_right {
                (a.left, b.left)
            } else {
                (-a.right, -b.right)
            };
            da.total_cmp(&db)
        })
}
