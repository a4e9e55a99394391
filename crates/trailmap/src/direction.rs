use crate::geometry::Side;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Viewports narrower than this get a top-to-bottom roadmap.
pub const DEFAULT_VIEWPORT_BREAKPOINT: f64 = 768.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    #[serde(alias = "tb")]
    TB,
    #[serde(alias = "lr")]
    LR,
}

impl Direction {
    /// Direction for a viewport width. The engine never picks a direction on its own; this is a
    /// convenience for callers.
    pub fn for_viewport_width(width: f64, breakpoint: f64) -> Self {
        if width < breakpoint {
            Self::TB
        } else {
            Self::LR
        }
    }

    /// Default `(source, target)` handle sides for connectors.
    pub fn default_handles(self) -> (Side, Side) {
        match self {
            Self::TB => (Side::Bottom, Side::Top),
            Self::LR => (Side::Right, Side::Left),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::LR)
    }
}

impl FromStr for Direction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tb" | "td" | "top-bottom" => Ok(Self::TB),
            "lr" | "left-right" => Ok(Self::LR),
            _ => Err(()),
        }
    }
}
