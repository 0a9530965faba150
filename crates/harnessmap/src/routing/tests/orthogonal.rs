use super::*;
use crate::routing::orthogonal::{MAX_CORRIDOR_ATTEMPTS, find_corridor, route_orthogonal};

#[test]
fn level_anchors_route_straight() {
    let path = route_orthogonal(p(0.0, 0.0), p(100.0, 0.0), &single(), &[], &cfg());
    assert_eq!(path.waypoints, vec![p(0.0, 0.0), p(100.0, 0.0)]);
    assert_eq!(path.label_anchor, p(50.0, 0.0));
    assert_eq!(path.splice_dot, None);
    assert!(path.corridor_clear);
}

#[test]
fn straight_even_when_obstacles_sit_in_between() {
    let obstacles = [rect(40.0, -20.0, 60.0, 20.0)];
    let path = route_orthogonal(p(0.0, 0.0), p(100.0, 0.0), &single(), &obstacles, &cfg());
    assert_eq!(path.waypoints.len(), 2);
}

#[test]
fn sub_unit_offset_counts_as_level() {
    let path = route_orthogonal(p(0.0, 0.0), p(100.0, 0.6), &single(), &[], &cfg());
    assert_eq!(path.waypoints, vec![p(0.0, 0.0), p(100.0, 0.6)]);
}

#[test]
fn l_route_uses_corridor_left_of_source() {
    let path = route_orthogonal(p(100.0, 0.0), p(300.0, 100.0), &single(), &[], &cfg());
    assert_eq!(
        path.waypoints,
        vec![p(100.0, 0.0), p(70.0, 0.0), p(70.0, 100.0), p(300.0, 100.0)]
    );
    assert_eq!(path.label_anchor, p(70.0, 50.0));
    assert!(path.corridor_clear);
}

#[test]
fn sibling_lanes_are_spaced() {
    let config = cfg();
    let corridor_x = |spread: SpreadMeta| {
        route_orthogonal(p(100.0, 0.0), p(300.0, 100.0), &spread, &[], &config).waypoints[1].x
    };

    assert_eq!(corridor_x(spliced(0, 3)), 70.0);
    assert_eq!(corridor_x(spliced(1, 3)), 62.0);
    assert_eq!(corridor_x(spliced(2, 3)), 54.0);

    // Not spliced: the component lane applies instead.
    let component_lane = SpreadMeta {
        source_component_index: 2,
        source_component_total: 3,
        ..single()
    };
    assert_eq!(corridor_x(component_lane), 54.0);

    // Target pin siblings push further left.
    let shared_target = SpreadMeta {
        target_pin_index: 1,
        target_pin_total: 2,
        ..spliced(2, 3)
    };
    assert_eq!(corridor_x(shared_target), 46.0);
}

#[test]
fn splice_dot_only_on_first_branch() {
    let config = cfg();
    let first = route_orthogonal(p(100.0, 0.0), p(300.0, 100.0), &spliced(0, 2), &[], &config);
    let second = route_orthogonal(p(100.0, 0.0), p(300.0, 60.0), &spliced(1, 2), &[], &config);
    assert_eq!(first.splice_dot, Some(p(70.0, 0.0)));
    assert_eq!(second.splice_dot, None);

    let alone = route_orthogonal(p(100.0, 0.0), p(300.0, 100.0), &single(), &[], &config);
    assert_eq!(alone.splice_dot, None);
}

#[test]
fn corridor_moves_left_of_blocking_obstacle() {
    let blocker = rect(40.0, 20.0, 90.0, 60.0);
    let search = find_corridor(70.0, 0.0, 100.0, &[blocker], 12.0);
    assert_eq!(search.x, 28.0);
    assert_eq!(search.attempts, 1);
    assert!(search.clear);

    let path = route_orthogonal(p(100.0, 0.0), p(300.0, 100.0), &single(), &[blocker], &cfg());
    assert_eq!(path.waypoints[1], p(28.0, 0.0));
    assert!(!crosses(&path.waypoints, &blocker));
}

#[test]
fn corridor_cascades_past_adjacent_obstacles() {
    let obstacles = [rect(40.0, 20.0, 90.0, 60.0), rect(0.0, 30.0, 35.0, 80.0)];
    let search = find_corridor(70.0, 0.0, 100.0, &obstacles, 12.0);
    assert_eq!(search.x, -12.0);
    assert_eq!(search.attempts, 2);
    assert!(search.clear);
}

/// Boxes laid out so every relocation lands inside the next one.
fn staircase(count: usize) -> Vec<Rect> {
    (0..count)
        .map(|k| {
            let left = -20.0 * k as f64;
            rect(left, 0.0, left + 15.0, 100.0)
        })
        .collect()
}

#[test]
fn corridor_search_gives_up_at_cap() {
    let search = find_corridor(5.0, -10.0, 110.0, &staircase(30), 12.0);
    assert_eq!(search.attempts, MAX_CORRIDOR_ATTEMPTS);
    assert_eq!(search.x, -392.0);
    assert!(!search.clear);
}

#[test]
fn last_allowed_relocation_can_still_clear() {
    let search = find_corridor(5.0, -10.0, 110.0, &staircase(20), 12.0);
    assert_eq!(search.attempts, MAX_CORRIDOR_ATTEMPTS);
    assert!(search.clear);
}

#[test]
fn exhausted_search_is_reported_on_the_path() {
    let obstacles: Vec<Rect> = staircase(30);
    let config = RoutingConfig {
        base_offset: 0.0,
        ..cfg()
    };
    // Corridor starts at x = 5, inside the first box.
    let path = route_orthogonal(p(5.0, -10.0), p(400.0, 110.0), &single(), &obstacles, &config);
    assert!(!path.corridor_clear);
    assert_orthogonal(&path);
    assert_endpoints(&path, p(5.0, -10.0), p(400.0, 110.0));
}

#[test]
fn jog_steps_over_approach_obstacle() {
    let config = cfg();
    let source = p(0.0, 0.0);
    let target = p(300.0, 100.0);
    let blocker = rect(100.0, 80.0, 150.0, 120.0);

    let plain = route_orthogonal(source, target, &single(), &[], &config);
    assert_eq!(
        plain.waypoints,
        vec![source, p(-30.0, 0.0), p(-30.0, 100.0), target]
    );

    let jogged = route_orthogonal(source, target, &single(), &[blocker], &config);
    assert_eq!(
        jogged.waypoints,
        vec![
            source,
            p(-30.0, 0.0),
            p(-30.0, 70.0),
            p(160.0, 70.0),
            p(160.0, 100.0),
            target,
        ]
    );
    let new_points: Vec<&Point> = jogged
        .waypoints
        .iter()
        .filter(|pt| !plain.waypoints.contains(pt))
        .collect();
    assert!(new_points.len() >= 2);
    assert!(!crosses(&jogged.waypoints, &blocker));
    assert_eq!(jogged.label_anchor, p(-30.0, 35.0));
}

#[test]
fn jog_goes_below_when_climbing() {
    let blocker = rect(100.0, -20.0, 150.0, 20.0);
    let path = route_orthogonal(p(0.0, 100.0), p(300.0, 0.0), &single(), &[blocker], &cfg());
    assert_eq!(
        path.waypoints,
        vec![
            p(0.0, 100.0),
            p(-30.0, 100.0),
            p(-30.0, 30.0),
            p(160.0, 30.0),
            p(160.0, 0.0),
            p(300.0, 0.0),
        ]
    );
}

#[test]
fn jog_passes_on_the_near_side_when_heading_left() {
    let blocker = rect(100.0, 80.0, 150.0, 120.0);
    let path = route_orthogonal(p(400.0, 0.0), p(0.0, 100.0), &single(), &[blocker], &cfg());
    assert_eq!(
        path.waypoints,
        vec![
            p(400.0, 0.0),
            p(370.0, 0.0),
            p(370.0, 70.0),
            p(90.0, 70.0),
            p(90.0, 100.0),
            p(0.0, 100.0),
        ]
    );
    assert!(!crosses(&path.waypoints, &blocker));
}

#[test]
fn commands_follow_waypoints() {
    use crate::routing::types::PathCommand;

    let path = route_orthogonal(p(100.0, 0.0), p(300.0, 100.0), &single(), &[], &cfg());
    assert_eq!(path.commands.first(), Some(&PathCommand::MoveTo { to: p(100.0, 0.0) }));
    assert_eq!(path.commands.last(), Some(&PathCommand::LineTo { to: p(300.0, 100.0) }));
    let curves = path
        .commands
        .iter()
        .filter(|c| matches!(c, PathCommand::QuadTo { .. }))
        .count();
    assert_eq!(curves, 2);
}
