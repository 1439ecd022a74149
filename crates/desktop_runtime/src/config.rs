//! Tunable desktop constants and JSON override loading.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors raised while loading a [`DesktopConfig`] override.
pub enum ConfigError {
    /// The payload is not valid JSON for the config schema.
    #[error("desktop config parse failed: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field holds a value the desktop cannot operate with.
    #[error("desktop config field `{field}` is invalid: {reason}")]
    Invalid {
        /// Offending field path.
        field: &'static str,
        /// Human-readable constraint.
        reason: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IconPlacementConfig {
    /// Minimum distance from the top/left desktop edges.
    pub margin: i32,
    /// Space kept free at the right edge for the icon footprint.
    pub reserve_x: i32,
    /// Space kept free at the bottom edge for the icon footprint.
    pub reserve_y: i32,
}

impl Default for IconPlacementConfig {
    fn default() -> Self {
        Self {
            margin: 20,
            reserve_x: 180,
            reserve_y: 140,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IconDragConfig {
    /// Movement (per axis) that must be exceeded before a press becomes a drag.
    pub threshold_px: i32,
    /// Minimum distance from the top/left desktop edges while dragging.
    pub edge_margin: i32,
    /// Space kept free at the right/bottom desktop edges while dragging.
    pub far_reserve: i32,
}

impl Default for IconDragConfig {
    fn default() -> Self {
        Self {
            threshold_px: 5,
            edge_margin: 10,
            far_reserve: 80,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IconGridConfig {
    pub cell_width: i32,
    pub cell_height: i32,
    pub gutter: i32,
    /// Offset of the first cell from the top-left desktop corner.
    pub origin: i32,
}

impl Default for IconGridConfig {
    fn default() -> Self {
        Self {
            cell_width: 80,
            cell_height: 70,
            gutter: 20,
            origin: 20,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeletionTiming {
    /// Delay before the trash sound plays.
    pub sound_delay_ms: u64,
    /// Delay before the icon leaves the registry.
    pub removal_delay_ms: u64,
}

impl Default for DeletionTiming {
    fn default() -> Self {
        Self {
            sound_delay_ms: 300,
            removal_delay_ms: 800,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToastTiming {
    pub visible_ms: u64,
    pub exit_ms: u64,
}

impl Default for ToastTiming {
    fn default() -> Self {
        Self {
            visible_ms: 3_000,
            exit_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContextMenuFootprint {
    pub width: i32,
    pub height: i32,
    /// Gap kept from the viewport edge when the menu would overflow.
    pub edge_gap: i32,
}

impl Default for ContextMenuFootprint {
    fn default() -> Self {
        Self {
            width: 220,
            height: 150,
            edge_gap: 10,
        }
    }
}

/// Every tunable the window manager and icon registry consult.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DesktopConfig {
    /// Stacking floor used when no window has a higher z-index.
    pub z_index_floor: i32,
    /// Increment applied over the current maximum on bring-to-front.
    pub z_index_step: i32,
    /// Band at the bottom of the viewport a dragged window may not enter.
    pub taskbar_reserve_px: i32,
    /// Height of the title-bar drag handle measured from the frame top.
    pub drag_handle_height_px: i32,
    pub icon_placement: IconPlacementConfig,
    pub icon_drag: IconDragConfig,
    pub icon_grid: IconGridConfig,
    pub deletion: DeletionTiming,
    /// Maximum gap between two clicks on the same icon that still activates it.
    pub double_click_ms: u64,
    pub toast: ToastTiming,
    pub context_menu: ContextMenuFootprint,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            z_index_floor: 1_000,
            z_index_step: 10,
            taskbar_reserve_px: 100,
            drag_handle_height_px: 32,
            icon_placement: IconPlacementConfig::default(),
            icon_drag: IconDragConfig::default(),
            icon_grid: IconGridConfig::default(),
            deletion: DeletionTiming::default(),
            double_click_ms: 500,
            toast: ToastTiming::default(),
            context_menu: ContextMenuFootprint::default(),
        }
    }
}

impl DesktopConfig {
    /// Parses a JSON override; omitted fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields and
    /// [`ConfigError::Invalid`] when a value fails [`DesktopConfig::validate`].
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint as [`ConfigError::Invalid`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.z_index_step <= 0 {
            return Err(ConfigError::Invalid {
                field: "z_index_step",
                reason: "must be positive",
            });
        }
        if self.taskbar_reserve_px < 0 || self.drag_handle_height_px <= 0 {
            return Err(ConfigError::Invalid {
                field: "taskbar_reserve_px",
                reason: "reserve must be non-negative and handle height positive",
            });
        }
        let placement = self.icon_placement;
        if placement.margin < 0 || placement.reserve_x < 0 || placement.reserve_y < 0 {
            return Err(ConfigError::Invalid {
                field: "icon_placement",
                reason: "margins must be non-negative",
            });
        }
        let drag = self.icon_drag;
        if drag.threshold_px < 0 || drag.edge_margin < 0 || drag.far_reserve < 0 {
            return Err(ConfigError::Invalid {
                field: "icon_drag",
                reason: "threshold and margins must be non-negative",
            });
        }
        if self.icon_grid.cell_width + self.icon_grid.gutter <= 0 {
            return Err(ConfigError::Invalid {
                field: "icon_grid",
                reason: "cell width plus gutter must be positive",
            });
        }
        if self.deletion.removal_delay_ms < self.deletion.sound_delay_ms {
            return Err(ConfigError::Invalid {
                field: "deletion.removal_delay_ms",
                reason: "removal cannot precede the trash sound",
            });
        }
        Ok(())
    }
}
