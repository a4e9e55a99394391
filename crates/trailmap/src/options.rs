//! Layout configuration.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

pub const MAX_ORDER_PASSES: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RankAlignment {
    /// Each rank is centered on the widest rank.
    #[default]
    Center,
    /// Each rank starts at the cross-axis origin.
    Start,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutOptions {
    pub node_separation: f64,
    pub rank_separation: f64,
    pub order_passes: usize,
    pub rank_alignment: RankAlignment,
    pub group_padding: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            node_separation: 50.0,
            rank_separation: 50.0,
            order_passes: 8,
            rank_alignment: RankAlignment::Center,
            group_padding: 24.0,
        }
    }
}

fn valid_gap(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}

impl LayoutOptions {
    pub fn from_json(json: &str) -> Result<Self> {
        let opts: Self = serde_json::from_str(json)?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("nodeSeparation", self.node_separation),
            ("rankSeparation", self.rank_separation),
            ("groupPadding", self.group_padding),
        ];
        for (name, value) in checks {
            if !valid_gap(value) {
                return Err(Error::InvalidOptions {
                    message: format!("{name} must be a finite, non-negative number (got {value})"),
                });
            }
        }
        if self.order_passes > MAX_ORDER_PASSES {
            return Err(Error::InvalidOptions {
                message: format!(
                    "orderPasses must be at most {MAX_ORDER_PASSES} (got {})",
                    self.order_passes
                ),
            });
        }
        Ok(())
    }

    /// A copy that is guaranteed to pass [`LayoutOptions::validate`].
    pub fn sanitized(&self) -> Self {
        if let Err(err) = self.validate() {
            tracing::warn!(%err, "sanitizing layout options");
        }
        let defaults = Self::default();
        let gap = |v: f64, fallback: f64| if valid_gap(v) { v } else { fallback };
        Self {
            node_separation: gap(self.node_separation, defaults.node_separation),
            rank_separation: gap(self.rank_separation, defaults.rank_separation),
            order_passes: self.order_passes.min(MAX_ORDER_PASSES),
            rank_alignment: self.rank_alignment,
            group_padding: gap(self.group_padding, defaults.group_padding),
        }
    }
}
