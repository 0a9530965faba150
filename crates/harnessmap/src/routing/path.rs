//! Waypoint clean-up, shared corner rounding and SVG path serialization.

use super::types::{PathCommand, Point, RoutedPath};

/// Segments shorter than this are treated as zero-length.
const DEGENERATE_LEN: f64 = 1e-6;

/// Append `pt` unless it repeats the last point.
pub fn push_if_different(points: &mut Vec<Point>, pt: Point) {
    if let Some(last) = points.last() {
        if last.distance_to(pt) <= DEGENERATE_LEN {
            return;
        }
    }
    points.push(pt);
}

/// Drop interior points that lie strictly between their neighbours on the
/// same horizontal or vertical line. Reversals are kept.
pub fn drop_collinear(points: &[Point]) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points {
        push_if_different(&mut out, p);
        while out.len() >= 3 {
            let n = out.len();
            let (a, b, c) = (out[n - 3], out[n - 2], out[n - 1]);
            if is_between(a, b, c) {
                out.remove(n - 2);
            } else {
                break;
            }
        }
    }
    out
}

fn is_between(a: Point, b: Point, c: Point) -> bool {
    let same_row = (a.y - b.y).abs() <= DEGENERATE_LEN && (b.y - c.y).abs() <= DEGENERATE_LEN;
    let same_col = (a.x - b.x).abs() <= DEGENERATE_LEN && (b.x - c.x).abs() <= DEGENERATE_LEN;
    if same_row {
        (a.x - b.x) * (b.x - c.x) > 0.0
    } else if same_col {
        (a.y - b.y) * (b.y - c.y) > 0.0
    } else {
        false
    }
}

/// Turn an orthogonal polyline into drawing commands with rounded bends.
///
/// The radius at each bend is capped at half the shorter adjacent segment so
/// neighbouring arcs never overlap. A bend next to a zero-length segment is
/// drawn as a plain corner.
pub fn rounded_commands(waypoints: &[Point], radius: f64) -> Vec<PathCommand> {
    let Some(&first) = waypoints.first() else {
        return Vec::new();
    };
    let mut commands = vec![PathCommand::MoveTo { to: first }];
    if waypoints.len() == 1 {
        return commands;
    }

    for i in 1..waypoints.len() - 1 {
        let prev = waypoints[i - 1];
        let curr = waypoints[i];
        let next = waypoints[i + 1];

        let in_len = prev.distance_to(curr);
        let out_len = curr.distance_to(next);
        let r = radius.min(in_len / 2.0).min(out_len / 2.0);
        if in_len <= DEGENERATE_LEN || out_len <= DEGENERATE_LEN || r <= DEGENERATE_LEN {
            commands.push(PathCommand::LineTo { to: curr });
            continue;
        }

        let arc_start = curr.toward(prev, r);
        let arc_end = curr.toward(next, r);
        commands.push(PathCommand::LineTo { to: arc_start });
        commands.push(PathCommand::QuadTo {
            ctrl: curr,
            to: arc_end,
        });
    }

    if let Some(&last) = waypoints.last() {
        commands.push(PathCommand::LineTo { to: last });
    }
    commands
}

/// Serialize commands as an SVG path `d` attribute.
///
/// Format: `M 0 0 L 22 0 Q 30 0 30 8 L 30 40`
pub fn to_svg_path(commands: &[PathCommand]) -> String {
    let mut parts = Vec::with_capacity(commands.len());
    for cmd in commands {
        parts.push(match cmd {
            PathCommand::MoveTo { to } => format!("M {} {}", fmt_num(to.x), fmt_num(to.y)),
            PathCommand::LineTo { to } => format!("L {} {}", fmt_num(to.x), fmt_num(to.y)),
            PathCommand::QuadTo { ctrl, to } => format!(
                "Q {} {} {} {}",
                fmt_num(ctrl.x),
                fmt_num(ctrl.y),
                fmt_num(to.x),
                fmt_num(to.y)
            ),
        });
    }
    parts.join(" ")
}

impl RoutedPath {
    /// The rounded path as an SVG `d` attribute.
    pub fn to_svg_path(&self) -> String {
        to_svg_path(&self.commands)
    }
}

/// Two decimals at most, no trailing zeros, no negative zero.
fn fmt_num(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    format!("{rounded}")
}
