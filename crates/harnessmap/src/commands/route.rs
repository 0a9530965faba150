use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

use crate::cli::RouteFormat;
use crate::config::Config;
use crate::model::Diagram;
use crate::routing::types::{Point, RouteMode, RoutedPath};
use crate::routing::{RouteResult, RoutingEngine, RoutingOutput};

/// Margin around the drawing in SVG output.
const SVG_MARGIN: f64 = 20.0;

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "camelCase", rename_all_fields = "camelCase")]
enum WireReport<'a> {
    Routed {
        wire_id: &'a str,
        d: String,
        #[serde(flatten)]
        path: &'a RoutedPath,
    },
    Unrouted {
        wire_id: &'a str,
        warning: &'a str,
    },
}

#[derive(Serialize)]
struct RouteReport<'a> {
    wires: Vec<WireReport<'a>>,
}

pub fn run(file: &Path, precise: bool, format: RouteFormat, output: Option<&Path>) -> Result<()> {
    let diagram = super::read_diagram(file)?;
    let engine = RoutingEngine::new(Config::load_or_default().routing_config());
    let mode = if precise {
        RouteMode::Precise
    } else {
        RouteMode::Orthogonal
    };
    let routed = engine.route_diagram(&diagram, mode);

    let contents = match format {
        RouteFormat::Json => to_json(&routed)?,
        RouteFormat::Svg => to_svg(&diagram, &routed),
    };
    super::emit(output, &contents)?;

    let failed: Vec<(&str, &str)> = routed
        .results
        .iter()
        .filter_map(|(id, r)| match r {
            RouteResult::Failure { warning } => Some((id.as_str(), warning.as_str())),
            RouteResult::Success(_) => None,
        })
        .collect();
    for (id, warning) in &failed {
        eprintln!("{} {id}: {warning}", "skipped".yellow());
    }
    if let Some(path) = output {
        eprintln!(
            "{} {} ({} of {} wire(s) routed)",
            "Wrote".green().bold(),
            path.display(),
            routed.results.len() - failed.len(),
            routed.results.len()
        );
    }
    Ok(())
}

fn to_json(routed: &RoutingOutput) -> Result<String> {
    let wires = routed
        .results
        .iter()
        .map(|(id, r)| match r {
            RouteResult::Success(path) => WireReport::Routed {
                wire_id: id,
                d: path.to_svg_path(),
                path,
            },
            RouteResult::Failure { warning } => WireReport::Unrouted {
                wire_id: id,
                warning,
            },
        })
        .collect();
    Ok(serde_json::to_string_pretty(&RouteReport { wires })?)
}

/// Standalone SVG with component outlines, wire paths and splice markers.
fn to_svg(diagram: &Diagram, routed: &RoutingOutput) -> String {
    let paths: Vec<(&str, &RoutedPath)> = routed
        .results
        .iter()
        .filter_map(|(id, r)| match r {
            RouteResult::Success(path) => Some((id.as_str(), path)),
            RouteResult::Failure { .. } => None,
        })
        .collect();

    let mut points: Vec<Point> = diagram
        .components
        .iter()
        .flat_map(|c| [Point::new(c.x, c.y), Point::new(c.x + c.width, c.y + c.height)])
        .collect();
    points.extend(paths.iter().flat_map(|(_, p)| p.waypoints.iter().copied()));
    let (min, max) = bounds(&points);

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
        min.x - SVG_MARGIN,
        min.y - SVG_MARGIN,
        max.x - min.x + 2.0 * SVG_MARGIN,
        max.y - min.y + 2.0 * SVG_MARGIN
    );
    for c in &diagram.components {
        let _ = writeln!(
            svg,
            r##"  <rect id="{}" x="{}" y="{}" width="{}" height="{}" fill="none" stroke="#888"/>"##,
            escape(&c.id),
            c.x,
            c.y,
            c.width,
            c.height
        );
    }
    for (id, path) in &paths {
        let _ = writeln!(
            svg,
            r##"  <path id="{}" d="{}" fill="none" stroke="#222"/>"##,
            escape(id),
            path.to_svg_path()
        );
        if let Some(dot) = path.splice_dot {
            let _ = writeln!(svg, r##"  <circle cx="{}" cy="{}" r="3" fill="#222"/>"##, dot.x, dot.y);
        }
    }
    svg.push_str("</svg>");
    svg
}

fn bounds(points: &[Point]) -> (Point, Point) {
    let Some(&first) = points.first() else {
        return (Point::default(), Point::default());
    };
    points.iter().fold((first, first), |(lo, hi), p| {
        (
            Point::new(lo.x.min(p.x), lo.y.min(p.y)),
            Point::new(hi.x.max(p.x), hi.y.max(p.y)),
        )
    })
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
