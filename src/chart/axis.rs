use serde::{Deserialize, Serialize};

use crate::{Error, Result};

const MIN_PADDING: f64 = 0.9;
const MAX_PADDING: f64 = 1.1;

/// Padded [min, max] bounds used to scale a chart's vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn compute(prices: &[f64]) -> Result<Self> {
        if prices.is_empty() {
            return Err(Error::InvalidInput(
                "cannot scale an axis over an empty price set".into(),
            ));
        }
        let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
        let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Ok(Self {
            min: min * MIN_PADDING,
            max: max * MAX_PADDING,
        })
    }

    /// True when the range computed from `prices` no longer fits inside
    /// `self`. One-directional on purpose: a range only ever widens, so a
    /// boundary price dropping out of the window never triggers a redraw of
    /// the grid.
    pub fn is_stale(&self, prices: &[f64]) -> Result<bool> {
        Ok(Self::compute(prices)?.widens(self))
    }

    pub(crate) fn widens(&self, current: &AxisRange) -> bool {
        self.min < current.min || self.max > current.max
    }

    /// Smallest range covering both `self` and `other`. Keeps the cached
    /// bounds monotone: min never grows back, max never shrinks back.
    pub(crate) fn union(&self, other: &AxisRange) -> AxisRange {
        AxisRange {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}
