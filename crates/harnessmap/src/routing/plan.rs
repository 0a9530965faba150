//! Turning a diagram's wire list into per-edge routing requests.
//!
//! Resolves each endpoint to a canvas anchor and assigns the sibling indices
//! that keep parallel wires in separate corridor lanes.

use std::collections::HashMap;

use crate::model::{Diagram, Endpoint, Wire};

use super::types::{EdgeRequest, Point, SpreadMeta};

/// A wire ready for routing, or the reason it cannot be routed.
#[derive(Debug, Clone, PartialEq)]
pub enum PlannedEdge {
    Ready(EdgeRequest),
    Unresolved { wire_id: String, warning: String },
}

/// Canvas anchor of an endpoint plus the node that owns it, if any.
#[derive(Clone, Copy)]
struct Anchor<'a> {
    point: Point,
    node_id: Option<&'a str>,
}

struct AnchorIndex<'a> {
    pins: HashMap<&'a str, Anchor<'a>>,
    junctions: HashMap<&'a str, Option<Point>>,
}

impl<'a> AnchorIndex<'a> {
    fn new(diagram: &'a Diagram) -> Self {
        let pins = diagram
            .components
            .iter()
            .flat_map(|c| {
                c.pins.iter().map(move |p| {
                    (
                        p.id.as_str(),
                        Anchor {
                            point: p.point(),
                            node_id: Some(c.id.as_str()),
                        },
                    )
                })
            })
            .collect();
        let junctions = diagram
            .junctions
            .iter()
            .map(|j| (j.id.as_str(), j.position))
            .collect();
        Self { pins, junctions }
    }

    fn resolve(&self, endpoint: &Endpoint, side: &str) -> Result<Anchor<'a>, String> {
        match endpoint {
            Endpoint::Pin(id) => self
                .pins
                .get(id.as_str())
                .copied()
                .ok_or_else(|| format!("Unknown {side} pin '{id}'")),
            Endpoint::Junction(id) => match self.junctions.get(id.as_str()) {
                Some(Some(point)) => Ok(Anchor {
                    point: *point,
                    node_id: None,
                }),
                Some(None) => Err(format!("The {side} junction '{id}' has no position")),
                None => Err(format!("Unknown {side} junction '{id}'")),
            },
        }
    }

    fn resolve_wire(&self, wire: &Wire) -> Result<(Anchor<'a>, Anchor<'a>), String> {
        Ok((
            self.resolve(&wire.source, "source")?,
            self.resolve(&wire.target, "target")?,
        ))
    }
}

/// Build one [`PlannedEdge`] per wire, in wire order.
///
/// Sibling indices follow wire order and only count wires that can be
/// routed. Wires sourced from a junction are siblings of the other branches
/// leaving that junction.
pub fn plan_edges(diagram: &Diagram) -> Vec<PlannedEdge> {
    let index = AnchorIndex::new(diagram);
    let resolved: Vec<_> = diagram.wires.iter().map(|w| index.resolve_wire(w)).collect();

    let mut splice = Siblings::default();
    let mut component = Siblings::default();
    let mut target_pin = Siblings::default();
    for (wire, res) in diagram.wires.iter().zip(&resolved) {
        if let Ok((src, _)) = res {
            splice.count(endpoint_key(&wire.source));
            component.count(component_key(&wire.source, src));
            target_pin.count(endpoint_key(&wire.target));
        }
    }

    diagram
        .wires
        .iter()
        .zip(resolved)
        .map(|(wire, res)| match res {
            Ok((src, dst)) => {
                let (splice_index, splice_total) = splice.next(endpoint_key(&wire.source));
                let (source_component_index, source_component_total) =
                    component.next(component_key(&wire.source, &src));
                let (target_pin_index, target_pin_total) =
                    target_pin.next(endpoint_key(&wire.target));
                PlannedEdge::Ready(EdgeRequest {
                    wire_id: wire.id.clone(),
                    source: src.point,
                    target: dst.point,
                    source_node_id: src.node_id.map(str::to_string),
                    target_node_id: dst.node_id.map(str::to_string),
                    spread: SpreadMeta {
                        splice_index,
                        splice_total,
                        source_component_index,
                        source_component_total,
                        target_pin_index,
                        target_pin_total,
                    },
                })
            }
            Err(warning) => {
                tracing::warn!(wire = %wire.id, %warning, "wire cannot be routed");
                PlannedEdge::Unresolved {
                    wire_id: wire.id.clone(),
                    warning,
                }
            }
        })
        .collect()
}

fn endpoint_key(endpoint: &Endpoint) -> String {
    match endpoint {
        Endpoint::Pin(id) => format!("pin:{id}"),
        Endpoint::Junction(id) => format!("junction:{id}"),
    }
}

/// Wires from pins of the same component share a key; junctions stand alone.
fn component_key(source: &Endpoint, anchor: &Anchor<'_>) -> String {
    match anchor.node_id {
        Some(node) => format!("node:{node}"),
        None => endpoint_key(source),
    }
}

/// Per-key totals, then per-key running indices.
#[derive(Default)]
struct Siblings {
    totals: HashMap<String, usize>,
    seen: HashMap<String, usize>,
}

impl Siblings {
    fn count(&mut self, key: String) {
        *self.totals.entry(key).or_default() += 1;
    }

    /// The next index for `key` and the group size.
    fn next(&mut self, key: String) -> (usize, usize) {
        let total = self.totals.get(&key).copied().unwrap_or(0);
        let slot = self.seen.entry(key).or_default();
        let idx = *slot;
        *slot += 1;
        (idx, total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Component, Junction, JunctionKind, PinAnchor};

    fn component(id: &str, x: f64, pins: &[(&str, f64, f64)]) -> Component {
        Component {
            id: id.into(),
            x,
            y: 0.0,
            width: 40.0,
            height: 40.0,
            pins: pins
                .iter()
                .map(|&(id, x, y)| PinAnchor { id: id.into(), x, y })
                .collect(),
            extra: Default::default(),
        }
    }

    fn pin(id: &str) -> Endpoint {
        Endpoint::Pin(id.into())
    }

    fn ready(plan: &PlannedEdge) -> &EdgeRequest {
        match plan {
            PlannedEdge::Ready(req) => req,
            PlannedEdge::Unresolved { warning, .. } => panic!("unresolved: {warning}"),
        }
    }

    fn diagram() -> Diagram {
        Diagram {
            components: vec![
                component("ecu", 0.0, &[("e1", 40.0, 10.0), ("e2", 40.0, 30.0)]),
                component("lamp", 200.0, &[("l1", 200.0, 10.0), ("l2", 200.0, 30.0)]),
            ],
            wires: vec![
                Wire::new("w1", pin("e1"), pin("l1")),
                Wire::new("w2", pin("e1"), pin("l2")),
                Wire::new("w3", pin("e2"), pin("l2")),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn resolves_anchors_and_owning_nodes() {
        let plan = plan_edges(&diagram());
        let req = ready(&plan[0]);
        assert_eq!(req.source, Point::new(40.0, 10.0));
        assert_eq!(req.target, Point::new(200.0, 10.0));
        assert_eq!(req.source_node_id.as_deref(), Some("ecu"));
        assert_eq!(req.target_node_id.as_deref(), Some("lamp"));
    }

    #[test]
    fn assigns_sibling_indices_in_wire_order() {
        let plan = plan_edges(&diagram());
        let spreads: Vec<SpreadMeta> = plan.iter().map(|p| ready(p).spread).collect();

        assert_eq!((spreads[0].splice_index, spreads[0].splice_total), (0, 2));
        assert_eq!((spreads[1].splice_index, spreads[1].splice_total), (1, 2));
        assert_eq!((spreads[2].splice_index, spreads[2].splice_total), (0, 1));

        assert_eq!(spreads[2].source_component_index, 2);
        assert!(spreads.iter().all(|s| s.source_component_total == 3));

        assert_eq!((spreads[1].target_pin_index, spreads[1].target_pin_total), (0, 2));
        assert_eq!((spreads[2].target_pin_index, spreads[2].target_pin_total), (1, 2));
    }

    #[test]
    fn unknown_pins_and_unplaced_junctions_are_reported() {
        let mut d = diagram();
        d.junctions.push(Junction {
            id: "j1".into(),
            kind: JunctionKind::Splice,
            label: None,
            is_installed: false,
            position: None,
            extra: Default::default(),
        });
        d.wires.push(Wire::new("w4", pin("nope"), pin("l1")));
        d.wires
            .push(Wire::new("w5", Endpoint::Junction("j1".into()), pin("l1")));

        let plan = plan_edges(&d);
        assert!(matches!(
            &plan[3],
            PlannedEdge::Unresolved { wire_id, warning }
                if wire_id == "w4" && warning.contains("Unknown source pin 'nope'")
        ));
        assert!(matches!(
            &plan[4],
            PlannedEdge::Unresolved { warning, .. } if warning.contains("has no position")
        ));
        // Unroutable wires do not take lanes from routable ones.
        assert_eq!(ready(&plan[0]).spread.target_pin_total, 1);
    }

    #[test]
    fn placed_junction_is_a_routable_source() {
        let mut d = diagram();
        d.junctions.push(Junction {
            id: "j1".into(),
            kind: JunctionKind::Splice,
            label: None,
            is_installed: false,
            position: Some(Point::new(120.0, 60.0)),
            extra: Default::default(),
        });
        d.wires = vec![
            Wire::new("b1", Endpoint::Junction("j1".into()), pin("l1")),
            Wire::new("b2", Endpoint::Junction("j1".into()), pin("l2")),
        ];
        let plan = plan_edges(&d);
        let req = ready(&plan[1]);
        assert_eq!(req.source, Point::new(120.0, 60.0));
        assert_eq!(req.source_node_id, None);
        assert_eq!((req.spread.splice_index, req.spread.splice_total), (1, 2));
    }
}
