//! Diagram aggregate consumed and produced by the core.
//!
//! The types mirror the JSON shape of a harness diagram snapshot. Only the
//! fields the router and migrator need are modelled explicitly; everything
//! else (attachments, circuits, metadata, UI state) is carried in `extra` maps
//! and written back untouched.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Error;

use crate::routing::types::{Point, Rect};

/// Unmodelled JSON fields, preserved verbatim.
pub type Extra = Map<String, Value>;

/// Axis-aligned rectangle in canvas coordinates. Never rotated.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Node {
    pub fn new(id: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            width,
            height,
        }
    }

    /// The node footprint without padding.
    pub fn rect(&self) -> Rect {
        Rect {
            left: self.x,
            top: self.y,
            right: self.x + self.width,
            bottom: self.y + self.height,
        }
    }
}

/// Canvas anchor of a connector pin, computed by the layout step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinAnchor {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

impl PinAnchor {
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A placed component: its node rectangle plus the pins it owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pins: Vec<PinAnchor>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Component {
    pub fn node(&self) -> Node {
        Node::new(self.id.clone(), self.x, self.y, self.width, self.height)
    }
}

/// One side of a wire: either a connector pin or a junction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Endpoint {
    Pin(String),
    Junction(String),
}

impl Endpoint {
    pub fn pin_id(&self) -> Option<&str> {
        match self {
            Endpoint::Pin(id) => Some(id),
            Endpoint::Junction(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wire {
    pub id: String,
    pub source: Endpoint,
    pub target: Endpoint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Free-form gauge string, usually `"<n> AWG"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gauge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circuit_id: Option<String>,
    #[serde(default)]
    pub is_installed: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Wire {
    /// A bare wire between two endpoints, used by tests and the migrator.
    pub fn new(id: impl Into<String>, source: Endpoint, target: Endpoint) -> Self {
        Self {
            id: id.into(),
            source,
            target,
            color: None,
            gauge: None,
            circuit_id: None,
            is_installed: false,
            extra: Extra::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JunctionKind {
    Splice,
    Distribution,
    Tap,
    GroundBus,
}

impl JunctionKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Splice => "splice",
            Self::Distribution => "distribution",
            Self::Tap => "tap",
            Self::GroundBus => "ground-bus",
        }
    }
}

impl std::fmt::Display for JunctionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A physical splice point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Junction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: JunctionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub is_installed: bool,
    /// Canvas anchor, when the editor has placed the junction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Whole diagram snapshot: components, wires, junctions and pass-through data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(default)]
    pub wires: Vec<Wire>,
    #[serde(default)]
    pub junctions: Vec<Junction>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Diagram {
    /// Node rectangles of every component, in declaration order.
    pub fn nodes(&self) -> Vec<Node> {
        self.components.iter().map(Component::node).collect()
    }

    pub fn from_json(s: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> crate::Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json + "\n").map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
