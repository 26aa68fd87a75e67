use serde::{Deserialize, Serialize};

use crate::chart::AxisRange;

/// One plotted point: the x index inside the window and the price at it.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct DataPoint {
    pub index: i64,
    pub price: f64,
}

/// Indexed series form consumed by chart backends: `[(0,p0), (1,p1), ...]`.
pub fn indexed_series(prices: &[f64]) -> Vec<DataPoint> {
    prices
        .iter()
        .enumerate()
        .map(|(index, price)| DataPoint {
            index: index as i64,
            price: *price,
        })
        .collect()
}

/// Instruction to build a brand-new chart for a symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateChart {
    pub symbol: String,
    pub series: Vec<DataPoint>,
    pub range: AxisRange,
}

/// Instruction to redraw an existing chart. `rebuild_grid` is set only when
/// the axis range changed; the redraw itself happens on every update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateChart {
    pub symbol: String,
    pub series: Vec<DataPoint>,
    pub range: AxisRange,
    pub rebuild_grid: bool,
}
