//! Scenario definition for headless swipe runs.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use swipekit_widgets::panel::DEFAULT_ACTION_SPACING;
use swipekit_widgets::{ActionPanel, CellState, PanelAction, SwipeConfig};

/// A cell setup plus the sequence of steps to drive it through.
#[derive(Debug, Clone, Deserialize)]
pub struct HeadlessScenario {
    #[serde(default)]
    pub panel: PanelSpec,
    /// Cell tunables; defaults apply when absent
    #[serde(default)]
    pub config: Option<SwipeConfig>,
    pub steps: Vec<ScenarioStep>,
}

impl HeadlessScenario {
    /// Load a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a scenario from file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

/// Action panel layout for the scenario cell.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PanelSpec {
    pub height: f32,
    pub spacing: f32,
    pub actions: Vec<PanelAction>,
}

impl Default for PanelSpec {
    /// Bookmark and heart buttons, 90px wide in total
    fn default() -> Self {
        Self {
            height: 44.0,
            spacing: DEFAULT_ACTION_SPACING,
            actions: vec![
                PanelAction::new("bookmark", 30.0),
                PanelAction::new("heart", 30.0),
            ],
        }
    }
}

impl PanelSpec {
    pub fn build(&self) -> ActionPanel {
        self.actions
            .iter()
            .cloned()
            .fold(ActionPanel::new(self.height).spacing(self.spacing), |panel, action| {
                panel.action(action)
            })
    }
}

/// Scenario steps. Pointer steps go through drag tracking like live input.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// Pointer down at the row's resting touch point
    Begin,
    /// Move the pointer by `(dx, dy)` after `dt_ms` of frames
    Drag {
        dx: f32,
        #[serde(default)]
        dy: f32,
        #[serde(default = "default_drag_ms")]
        dt_ms: u64,
    },
    /// Pointer up where it is
    Release,
    /// Pointer cancelled by the system
    Cancel,
    /// Programmatic close
    Close,
    Wait {
        ms: u64,
    },
    Tick {
        frames: u32,
    },
    AssertState {
        state: CellState,
    },
    AssertOffset {
        value: f32,
        #[serde(default = "default_tolerance")]
        tolerance: f32,
    },
}

fn default_drag_ms() -> u64 {
    16
}

fn default_tolerance() -> f32 {
    0.5
}
