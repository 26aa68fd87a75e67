use tracing::debug;

use crate::{
    Result,
    chart::{
        axis::AxisRange,
        models::{CreateChart, UpdateChart, indexed_series},
        window::PriceWindow,
    },
    render::ChartRenderer,
};

/// Per-symbol chart record: the rolling price window plus the last axis
/// range handed to the renderer.
///
/// A symbol with no `ChartState` yet is simply absent from the dispatcher's
/// table, so `seed` doubles as the uninitialized-to-seeded transition and
/// there is no explicit state enum to keep in sync.
#[derive(Debug, Clone)]
pub struct ChartState {
    symbol: String,
    window: PriceWindow,
    range: AxisRange,
}

impl ChartState {
    /// Builds the window from the full history and asks the renderer for a
    /// brand-new chart carrying the indexed series and the computed range.
    pub fn seed<R: ChartRenderer>(
        symbol: &str,
        history: &[f64],
        renderer: &mut R,
    ) -> Result<Self> {
        let window = PriceWindow::seed(history)?;
        let snapshot = window.snapshot();
        let range = AxisRange::compute(&snapshot)?;
        renderer.create_chart(CreateChart {
            symbol: symbol.to_string(),
            series: indexed_series(&snapshot),
            range,
        });
        Ok(Self {
            symbol: symbol.to_string(),
            window,
            range,
        })
    }

    /// Slides one price into the window and issues a redraw. The cached
    /// range is widened only when the new snapshot falls outside it; the
    /// grid is rebuilt only on that widening, while the redraw itself goes
    /// out on every append.
    pub fn append<R: ChartRenderer>(&mut self, price: f64, renderer: &mut R) -> Result<()> {
        self.window.append(price);
        let snapshot = self.window.snapshot();
        let candidate = AxisRange::compute(&snapshot)?;
        let rebuild_grid = candidate.widens(&self.range);
        if rebuild_grid {
            self.range = self.range.union(&candidate);
            debug!(symbol = %self.symbol, range = ?self.range, "axis range went stale, widened");
        }
        renderer.update_chart(UpdateChart {
            symbol: self.symbol.clone(),
            series: indexed_series(&snapshot),
            range: self.range,
            rebuild_grid,
        });
        Ok(())
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn window(&self) -> &PriceWindow {
        &self.window
    }

    pub fn range(&self) -> AxisRange {
        self.range
    }

    /// Latest price in the window, shown beside each chart by the page.
    pub fn last_price(&self) -> Option<f64> {
        self.window.last()
    }
}
