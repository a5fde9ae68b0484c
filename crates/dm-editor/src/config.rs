//! Editor configuration.

use crate::error::ConfigError;
use crate::shortcuts::KeyBindings;
use dm_core::{GridSize, Point};
use serde::{Deserialize, Serialize};

/// Tunables for an [`Editor`](crate::Editor). Every field has a default, so
/// a config file only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Initial grid size and its doubling/halving range.
    pub grid: GridSize,
    /// Fuzzy margin added around each div when hit-testing.
    pub hit_margin: f32,
    /// A create gesture with fewer drag moves than this, whose div is also
    /// smaller than one grid cell both ways, is treated as a stray click.
    pub min_drag_moves: u32,
    pub undo_depth: usize,
    /// Client position of the stage's top-left corner. Subtracted from
    /// every pointer event.
    pub stage_origin: Point,
    pub keys: KeyBindings,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid: GridSize::default(),
            hit_margin: dm_core::document::DEFAULT_HIT_MARGIN,
            min_drag_moves: 2,
            undo_depth: 100,
            stage_origin: Point::ORIGIN,
            keys: KeyBindings::default(),
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: EditorConfig = serde_json::from_str(json)?;
        config.grid = GridSize::new(config.grid.size, config.grid.min, config.grid.max);
        Ok(config)
    }
}
