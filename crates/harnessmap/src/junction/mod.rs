//! Splice normalization.
//!
//! Editors let users draw several wires out of one connector pin. Physically
//! that is a splice, so before export the diagram is rewritten: each such pin
//! gets one trunk wire into a new junction, and the original wires leave from
//! that junction instead. Junction ids are derived from the pin id, which is
//! what makes the rewrite idempotent.

pub mod gauge;

use std::collections::{HashMap, HashSet};

use crate::model::{Diagram, Endpoint, Extra, Junction, JunctionKind, Wire};

/// Wires sharing one source pin.
#[derive(Debug, Clone, PartialEq)]
pub struct SpliceGroup<'a> {
    pub source_pin_id: &'a str,
    /// In diagram order.
    pub wires: Vec<&'a Wire>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MigrationOptions {
    /// Circuit id whose splices become ground-bus junctions. Compared
    /// case-insensitively.
    pub ground_circuit: String,
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self {
            ground_circuit: "GND".to_string(),
        }
    }
}

/// Junction id for a splice at `pin_id`. The same pin always maps to the same id.
pub fn junction_id_for_pin(pin_id: &str) -> String {
    format!("junction-{pin_id}")
}

/// Id of the trunk wire feeding `junction_id`.
pub fn trunk_wire_id(junction_id: &str) -> String {
    format!("{junction_id}-trunk")
}

fn junction_label(pin_id: &str) -> String {
    format!("Splice {pin_id}")
}

/// Pins that are the source of more than one wire, in order of first use.
pub fn detect_splices(diagram: &Diagram) -> Vec<SpliceGroup<'_>> {
    let mut order: Vec<&str> = Vec::new();
    let mut by_pin: HashMap<&str, Vec<&Wire>> = HashMap::new();
    for wire in &diagram.wires {
        if let Some(pin) = wire.source.pin_id() {
            let group = by_pin.entry(pin).or_insert_with(|| {
                order.push(pin);
                Vec::new()
            });
            group.push(wire);
        }
    }

    order
        .into_iter()
        .filter_map(|pin| {
            let wires = by_pin.remove(pin)?;
            (wires.len() > 1).then_some(SpliceGroup {
                source_pin_id: pin,
                wires,
            })
        })
        .collect()
}

pub fn needs_migration(diagram: &Diagram) -> bool {
    !detect_splices(diagram).is_empty()
}

/// Splices whose junction does not exist yet, i.e. the groups [`migrate_with`]
/// will rewrite.
pub fn pending_splices(diagram: &Diagram) -> Vec<SpliceGroup<'_>> {
    let existing: HashSet<&str> = diagram.junctions.iter().map(|j| j.id.as_str()).collect();
    detect_splices(diagram)
        .into_iter()
        .filter(|group| !existing.contains(junction_id_for_pin(group.source_pin_id).as_str()))
        .collect()
}

/// `base`, or `base-2`, `base-3`, ... if that id is taken.
fn unused_wire_id(base: String, taken: &HashSet<String>) -> String {
    let mut id = base.clone();
    let mut n = 2;
    while taken.contains(&id) {
        id = format!("{base}-{n}");
        n += 1;
    }
    id
}

/// [`migrate_with`] using the default ground circuit.
pub fn migrate(diagram: &Diagram) -> Diagram {
    migrate_with(diagram, &MigrationOptions::default())
}

/// Rewrite every implicit splice into junction + trunk + branches.
///
/// Groups whose junction already exists are left untouched. Each trunk wire
/// is placed directly before the first wire of its group; all other wires
/// keep their order. New junctions follow the existing ones. A trunk id that
/// is already used by another wire gets a numeric suffix, so wire ids stay
/// unique.
pub fn migrate_with(diagram: &Diagram, options: &MigrationOptions) -> Diagram {
    let mut taken: HashSet<String> = diagram.wires.iter().map(|w| w.id.clone()).collect();

    let mut new_junctions = Vec::new();
    let mut trunks: HashMap<&str, Wire> = HashMap::new();
    let mut branch_source: HashMap<&str, String> = HashMap::new();

    for group in pending_splices(diagram) {
        let junction_id = junction_id_for_pin(group.source_pin_id);

        let is_ground = group.wires.iter().any(|w| {
            w.circuit_id
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case(&options.ground_circuit))
        });
        new_junctions.push(Junction {
            id: junction_id.clone(),
            kind: if is_ground {
                JunctionKind::GroundBus
            } else {
                JunctionKind::Splice
            },
            label: Some(junction_label(group.source_pin_id)),
            is_installed: false,
            position: None,
            extra: Extra::new(),
        });

        let base = trunk_wire_id(&junction_id);
        let trunk_id = unused_wire_id(base.clone(), &taken);
        if trunk_id != base {
            tracing::debug!(pin = group.source_pin_id, id = %trunk_id, "trunk id taken, using suffix");
        }
        taken.insert(trunk_id.clone());

        let first = group.wires[0];
        let trunk = Wire {
            id: trunk_id,
            source: Endpoint::Pin(group.source_pin_id.to_string()),
            target: Endpoint::Junction(junction_id.clone()),
            color: first.color.clone(),
            gauge: gauge::thickest_gauge(group.wires.iter().map(|w| w.gauge.as_deref()))
                .map(str::to_string),
            circuit_id: first.circuit_id.clone(),
            is_installed: false,
            extra: Extra::new(),
        };
        trunks.insert(first.id.as_str(), trunk);
        for wire in &group.wires {
            branch_source.insert(wire.id.as_str(), junction_id.clone());
        }
    }

    if new_junctions.is_empty() {
        return diagram.clone();
    }
    tracing::info!(
        junctions = new_junctions.len(),
        branches = branch_source.len(),
        "migrated implicit splices"
    );

    let mut wires = Vec::with_capacity(diagram.wires.len() + trunks.len());
    for wire in &diagram.wires {
        if let Some(trunk) = trunks.remove(wire.id.as_str()) {
            wires.push(trunk);
        }
        let mut out = wire.clone();
        if let Some(junction_id) = branch_source.get(wire.id.as_str()) {
            out.source = Endpoint::Junction(junction_id.clone());
        }
        wires.push(out);
    }

    let mut junctions = diagram.junctions.clone();
    junctions.extend(new_junctions);

    Diagram {
        components: diagram.components.clone(),
        wires,
        junctions,
        extra: diagram.extra.clone(),
    }
}
