use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::{
    Error, Result,
    chart::ChartState,
    feed::models::{FeedEvent, StockHistory, StockUpdate},
    render::ChartRenderer,
};

/// Single consumer of the inbound feed. Owns every per-symbol `ChartState`
/// and the renderer the states draw through, so no other code ever touches
/// chart state concurrently.
pub struct FeedDispatcher<R: ChartRenderer> {
    charts: HashMap<String, ChartState>,
    renderer: R,
}

impl<R: ChartRenderer> FeedDispatcher<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            charts: HashMap::new(),
            renderer,
        }
    }

    /// Decodes one raw feed frame and routes it. Nothing here is fatal to
    /// the dispatcher: bad frames are logged and dropped with engine state
    /// untouched.
    pub fn handle_message(&mut self, raw: &str) {
        match self.dispatch(raw) {
            Ok(()) => {}
            Err(Error::UnknownSymbol(symbol)) => {
                trace!(%symbol, "update for symbol with no chart, dropped");
            }
            Err(e) => warn!("feed message dropped: {}", e),
        }
    }

    fn dispatch(&mut self, raw: &str) -> Result<()> {
        let message: Value = serde_json::from_str(raw)?;
        let kind = message
            .get("type")
            .and_then(Value::as_str)
            .ok_or(Error::MissingMessageType)?;

        match FeedEvent::from(kind) {
            FeedEvent::History => self.on_history(StockHistory::deserialize(&message)?),
            FeedEvent::Update => self.on_update(StockUpdate::deserialize(&message)?),
            FeedEvent::Unknown(event) => {
                debug!(%event, %message, "unrecognized feed message");
                Ok(())
            }
        }
    }

    /// A second history push for a known symbol re-seeds it in place rather
    /// than stacking another chart next to the old one.
    fn on_history(&mut self, history: StockHistory) -> Result<()> {
        let state = ChartState::seed(&history.symbol, &history.history, &mut self.renderer)?;
        if self.charts.insert(history.symbol.clone(), state).is_some() {
            debug!(symbol = %history.symbol, "re-seeded existing chart");
        }
        Ok(())
    }

    fn on_update(&mut self, update: StockUpdate) -> Result<()> {
        let state = self
            .charts
            .get_mut(&update.symbol)
            .ok_or_else(|| Error::UnknownSymbol(update.symbol.clone()))?;
        state.append(update.price, &mut self.renderer)
    }

    pub fn chart(&self, symbol: &str) -> Option<&ChartState> {
        self.charts.get(symbol)
    }

    pub fn chart_count(&self) -> usize {
        self.charts.len()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ChannelRenderer;

    #[test]
    fn malformed_json_is_dropped_without_state_change() {
        let (renderer, mut rx) = ChannelRenderer::new();
        let mut dispatcher = FeedDispatcher::new(renderer);
        dispatcher.handle_message("{not json");
        assert_eq!(dispatcher.chart_count(), 0);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn message_without_type_field_is_dropped() {
        let (renderer, mut rx) = ChannelRenderer::new();
        let mut dispatcher = FeedDispatcher::new(renderer);
        dispatcher.handle_message(r#"{"symbol":"ACME","price":9.5}"#);
        assert_eq!(dispatcher.chart_count(), 0);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn unknown_type_goes_to_the_diagnostic_sink_only() {
        let (renderer, mut rx) = ChannelRenderer::new();
        let mut dispatcher = FeedDispatcher::new(renderer);
        dispatcher.handle_message(r#"{"type":"heartbeat","seq":42}"#);
        assert_eq!(dispatcher.chart_count(), 0);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn empty_history_creates_no_chart() {
        let (renderer, mut rx) = ChannelRenderer::new();
        let mut dispatcher = FeedDispatcher::new(renderer);
        dispatcher
            .handle_message(r#"{"type":"stockhistory","symbol":"ACME","name":"Acme","history":[]}"#);
        assert!(dispatcher.chart("ACME").is_none());
        assert!(rx.try_recv().is_err());
    }
}
