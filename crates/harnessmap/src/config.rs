use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::junction::MigrationOptions;
use crate::routing::types::RoutingConfig;

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "harnessmap";

/// Every key accepted by [`Config::set`], in display order.
pub const KEYS: &[&str] = &[
    "routing.base_offset",
    "routing.lane_spacing",
    "routing.corridor_clearance",
    "routing.jog_offset",
    "routing.obstacle_padding",
    "routing.corner_radius",
    "routing.cell_size",
    "routing.canvas_padding",
    "routing.max_grid_cells",
    "migration.ground_circuit",
];

/// User configuration. Every value is optional and falls back to the
/// built-in default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing: Option<RoutingSettings>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migration: Option<MigrationSettings>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutingSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_offset: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lane_spacing: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corridor_clearance: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jog_offset: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obstacle_padding: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_size: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas_padding: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_grid_cells: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MigrationSettings {
    /// Circuit id that turns a splice into a ground bus.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ground_circuit: Option<String>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or(Error::ConfigDir)
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// The saved config, or defaults when there is none.
    ///
    /// A config that exists but cannot be read is ignored with a warning.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(Error::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                Self::default()
            }
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable config");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let io_err = |source: std::io::Error| Error::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# harnessmap configuration\n{yaml}");
        std::fs::write(path, contents).map_err(io_err)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "migration.ground_circuit" => {
                let circuit = value.trim();
                if circuit.is_empty() {
                    return Err(invalid(key, value, "must not be empty"));
                }
                self.migration
                    .get_or_insert_with(MigrationSettings::default)
                    .ground_circuit = Some(circuit.to_string());
            }
            "routing.max_grid_cells" => {
                let cells = value
                    .parse::<usize>()
                    .map_err(|_| invalid(key, value, "expected a whole number"))?;
                if cells == 0 {
                    return Err(invalid(key, value, "must be at least 1"));
                }
                self.routing_mut().max_grid_cells = Some(cells);
            }
            "routing.cell_size" => {
                let v = parse_distance(key, value)?;
                if v == 0.0 {
                    return Err(invalid(key, value, "must be greater than zero"));
                }
                self.routing_mut().cell_size = Some(v);
            }
            _ => {
                let mut routing = self.routing.clone().unwrap_or_default();
                let Some(slot) = distance_field(&mut routing, key) else {
                    return Err(Error::UnknownConfigKey {
                        key: key.to_string(),
                        valid: KEYS.join(", "),
                    });
                };
                *slot = Some(parse_distance(key, value)?);
                self.routing = Some(routing);
            }
        }
        Ok(())
    }

    fn routing_mut(&mut self) -> &mut RoutingSettings {
        self.routing.get_or_insert_with(RoutingSettings::default)
    }

    /// Router settings with unset values taken from the defaults.
    pub fn routing_config(&self) -> RoutingConfig {
        let defaults = RoutingConfig::default();
        let Some(r) = &self.routing else {
            return defaults;
        };
        RoutingConfig {
            base_offset: r.base_offset.unwrap_or(defaults.base_offset),
            lane_spacing: r.lane_spacing.unwrap_or(defaults.lane_spacing),
            corridor_clearance: r.corridor_clearance.unwrap_or(defaults.corridor_clearance),
            jog_offset: r.jog_offset.unwrap_or(defaults.jog_offset),
            obstacle_padding: r.obstacle_padding.unwrap_or(defaults.obstacle_padding),
            corner_radius: r.corner_radius.unwrap_or(defaults.corner_radius),
            cell_size: r.cell_size.unwrap_or(defaults.cell_size),
            canvas_padding: r.canvas_padding.unwrap_or(defaults.canvas_padding),
            max_grid_cells: r.max_grid_cells.unwrap_or(defaults.max_grid_cells),
        }
    }

    pub fn migration_options(&self) -> MigrationOptions {
        let defaults = MigrationOptions::default();
        MigrationOptions {
            ground_circuit: self
                .migration
                .as_ref()
                .and_then(|m| m.ground_circuit.clone())
                .unwrap_or(defaults.ground_circuit),
        }
    }

    /// Effective value of every key, and whether it was set explicitly.
    pub fn entries(&self) -> Vec<(&'static str, String, bool)> {
        let rc = self.routing_config();
        let r = self.routing.clone().unwrap_or_default();
        let m = self.migration.clone().unwrap_or_default();
        vec![
            (KEYS[0], rc.base_offset.to_string(), r.base_offset.is_some()),
            (KEYS[1], rc.lane_spacing.to_string(), r.lane_spacing.is_some()),
            (KEYS[2], rc.corridor_clearance.to_string(), r.corridor_clearance.is_some()),
            (KEYS[3], rc.jog_offset.to_string(), r.jog_offset.is_some()),
            (KEYS[4], rc.obstacle_padding.to_string(), r.obstacle_padding.is_some()),
            (KEYS[5], rc.corner_radius.to_string(), r.corner_radius.is_some()),
            (KEYS[6], rc.cell_size.to_string(), r.cell_size.is_some()),
            (KEYS[7], rc.canvas_padding.to_string(), r.canvas_padding.is_some()),
            (KEYS[8], rc.max_grid_cells.to_string(), r.max_grid_cells.is_some()),
            (
                KEYS[9],
                self.migration_options().ground_circuit,
                m.ground_circuit.is_some(),
            ),
        ]
    }
}

fn distance_field<'a>(r: &'a mut RoutingSettings, key: &str) -> Option<&'a mut Option<f64>> {
    match key {
        "routing.base_offset" => Some(&mut r.base_offset),
        "routing.lane_spacing" => Some(&mut r.lane_spacing),
        "routing.corridor_clearance" => Some(&mut r.corridor_clearance),
        "routing.jog_offset" => Some(&mut r.jog_offset),
        "routing.obstacle_padding" => Some(&mut r.obstacle_padding),
        "routing.corner_radius" => Some(&mut r.corner_radius),
        "routing.canvas_padding" => Some(&mut r.canvas_padding),
        _ => None,
    }
}

fn invalid(key: &str, value: &str, reason: &'static str) -> Error {
    Error::InvalidConfigValue {
        key: key.to_string(),
        value: value.to_string(),
        reason,
    }
}

/// Non-negative finite canvas distance.
fn parse_distance(key: &str, value: &str) -> Result<f64> {
    let v = value
        .parse::<f64>()
        .map_err(|_| invalid(key, value, "expected a number"))?;
    if !v.is_finite() || v < 0.0 {
        return Err(invalid(key, value, "must be a non-negative number"));
    }
    Ok(v)
}
