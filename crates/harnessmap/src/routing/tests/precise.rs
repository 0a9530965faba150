use super::*;
use crate::model::Node;
use crate::routing::RoutingEngine;
use crate::routing::search::find_route;

#[test]
fn open_canvas_gives_straight_path() {
    let path = find_route(p(0.0, 0.0), p(100.0, 0.0), &[], None, None, &cfg());
    assert_eq!(path.waypoints, vec![p(0.0, 0.0), p(100.0, 0.0)]);
    assert!(path.corridor_clear);
}

#[test]
fn detours_around_blocking_node() {
    let nodes = vec![
        Node::new("src", -40.0, 30.0, 40.0, 40.0),
        Node::new("mid", 130.0, 0.0, 40.0, 100.0),
        Node::new("dst", 300.0, 30.0, 40.0, 40.0),
    ];
    let source = p(0.0, 50.0);
    let target = p(300.0, 50.0);
    let path = find_route(source, target, &nodes, Some("src"), Some("dst"), &cfg());

    assert_endpoints(&path, source, target);
    assert!(path.corridor_clear);
    assert!(path.waypoints.len() > 2);

    let mid = nodes[1].rect();
    let interior = &path.waypoints[1..path.waypoints.len() - 1];
    assert!(interior.iter().all(|pt| !mid.contains(*pt)));
    assert!(!crosses(interior, &mid));
    // The padded blocker spans y -10..110, so the detour leaves that band.
    assert!(path.waypoints.iter().any(|pt| pt.y < -10.0 || pt.y > 110.0));
}

#[test]
fn enclosed_source_falls_back_to_straight_line() {
    let nodes = vec![
        Node::new("wall", 0.0, 0.0, 100.0, 100.0),
        Node::new("dst", 300.0, 40.0, 20.0, 20.0),
    ];
    let source = p(50.0, 50.0);
    let target = p(300.0, 50.0);
    let path = find_route(source, target, &nodes, None, Some("dst"), &cfg());

    assert_eq!(path.waypoints, vec![source, target]);
    assert!(!path.corridor_clear);
    assert_eq!(path.label_anchor, p(175.0, 50.0));
}

#[test]
fn endpoints_are_exact_off_grid() {
    let source = p(3.7, 11.2);
    let target = p(187.3, 96.55);
    for cell_size in [1.0, 7.0, 10.0, 33.0, 250.0] {
        let config = RoutingConfig {
            cell_size,
            ..cfg()
        };
        let path = find_route(source, target, &[], None, None, &config);
        assert_endpoints(&path, source, target);
    }
}

#[test]
fn huge_canvas_is_routed_on_capped_grid() {
    let source = p(0.0, 0.0);
    let target = p(100_000.0, 50_000.0);
    let path = find_route(source, target, &[], None, None, &cfg());
    assert_endpoints(&path, source, target);
    assert!(path.corridor_clear);
}

#[test]
fn precise_splice_dot_at_first_bend() {
    let engine = RoutingEngine::default();
    let mut req = request("w1", p(0.0, 0.0), p(200.0, 100.0));
    req.spread = spliced(0, 2);
    let path = engine.route_precise(&req, &[]);
    assert!(path.waypoints.len() > 2);
    assert_eq!(path.splice_dot, Some(path.waypoints[1]));

    req.spread = spliced(1, 2);
    assert_eq!(engine.route_precise(&req, &[]).splice_dot, None);
}

#[test]
fn precise_route_prefers_fewer_bends() {
    let path = find_route(p(5.0, 5.0), p(205.0, 105.0), &[], None, None, &cfg());
    // One L-shaped bend is enough on an empty canvas.
    assert_eq!(path.waypoints.len(), 3);
}
