//! Action panel behind a swipeable cell
//!
//! The panel sits under the cell content, pinned to the trailing edge. As
//! the content slides away the panel's inner content grows from a floor
//! emphasis to full size and opacity.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Default emphasis at zero reveal
pub const DEFAULT_EMPHASIS_FLOOR: f32 = 0.3;

/// Default gap between and around panel actions
pub const DEFAULT_ACTION_SPACING: f32 = 10.0;

/// Panel size as read from the panel view
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PanelGeometry {
    pub width: f32,
    pub height: f32,
}

impl PanelGeometry {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Visual emphasis applied to the panel's inner content
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Emphasis {
    /// Uniform scale factor
    pub scale: f32,
    pub opacity: f32,
}

impl Emphasis {
    /// Fully shown
    pub const FULL: Emphasis = Emphasis {
        scale: 1.0,
        opacity: 1.0,
    };

    /// Same factor for scale and opacity
    pub fn uniform(factor: f32) -> Self {
        Self {
            scale: factor,
            opacity: factor,
        }
    }
}

impl Default for Emphasis {
    fn default() -> Self {
        Self::FULL
    }
}

/// Emphasis factor for a reveal of `offset` on a panel `width` wide.
///
/// Grows linearly from `floor` at zero reveal and saturates at 1.0 once
/// `1 - floor` of the panel is uncovered. A panel without width is always
/// fully emphasized.
pub fn emphasis(offset: f32, width: f32, floor: f32) -> f32 {
    if width <= 0.0 {
        return 1.0;
    }
    (offset.abs() / width + floor).clamp(0.0, 1.0)
}

/// The view revealed behind a swipeable cell
pub trait PanelView {
    /// Current panel size
    fn geometry(&self) -> PanelGeometry;

    /// Apply emphasis to the panel's inner content
    fn set_emphasis(&mut self, emphasis: Emphasis);
}

/// A tappable action in an [`ActionPanel`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelAction {
    pub id: String,
    /// Label or icon name
    #[serde(default)]
    pub label: String,
    pub width: f32,
}

impl PanelAction {
    pub fn new(id: impl Into<String>, width: f32) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            width,
        }
    }

    /// Builder: set the label
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// A row of actions laid out from the trailing edge toward the leading edge,
/// with a fixed gap between actions and around the outer ones.
#[derive(Debug, Clone)]
pub struct ActionPanel {
    actions: SmallVec<[PanelAction; 4]>,
    spacing: f32,
    height: f32,
    emphasis: Emphasis,
}

impl ActionPanel {
    /// Create an empty panel for a row of `height`
    pub fn new(height: f32) -> Self {
        Self {
            actions: SmallVec::new(),
            spacing: DEFAULT_ACTION_SPACING,
            height,
            emphasis: Emphasis::FULL,
        }
    }

    /// Builder: append an action. The first action sits at the trailing edge.
    pub fn action(mut self, action: PanelAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Builder: set the gap between actions
    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn actions(&self) -> &[PanelAction] {
        &self.actions
    }

    /// Last emphasis applied by the cell
    pub fn emphasis(&self) -> Emphasis {
        self.emphasis
    }

    /// Total width of the panel content
    pub fn width(&self) -> f32 {
        if self.actions.is_empty() {
            return 0.0;
        }
        let content: f32 = self.actions.iter().map(|a| a.width).sum();
        content + self.spacing * (self.actions.len() + 1) as f32
    }

    /// Actions with their leading x in panel coordinates
    pub fn layout(&self) -> impl Iterator<Item = (f32, &PanelAction)> + '_ {
        let mut trailing = self.width();
        self.actions.iter().map(move |action| {
            trailing -= self.spacing + action.width;
            (trailing, action)
        })
    }

    /// The action under `x`, measured from the panel's leading edge
    pub fn action_at(&self, x: f32) -> Option<&PanelAction> {
        self.layout()
            .find(|(left, action)| x >= *left && x < left + action.width)
            .map(|(_, action)| action)
    }
}

impl PanelView for ActionPanel {
    fn geometry(&self) -> PanelGeometry {
        PanelGeometry::new(self.width(), self.height)
    }

    fn set_emphasis(&mut self, emphasis: Emphasis) {
        self.emphasis = emphasis;
    }
}
