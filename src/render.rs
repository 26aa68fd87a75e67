use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::{error, trace};

use crate::chart::{CreateChart, UpdateChart};

/// Draw instruction handed to the rendering collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderInstruction {
    Create(CreateChart),
    Update(UpdateChart),
}

/// Opaque rendering capability. The engine only ever asks a backend to
/// create a chart or to replace its series and axis range, so any charting
/// library can sit behind this.
pub trait ChartRenderer {
    fn create_chart(&mut self, instruction: CreateChart);
    fn update_chart(&mut self, instruction: UpdateChart);
}

pub type InstructionTx = UnboundedSender<RenderInstruction>;
pub type InstructionRx = UnboundedReceiver<RenderInstruction>;

/// Forwards draw instructions over a channel so a UI task can consume them
/// without the feed consumer ever blocking on the renderer.
#[derive(Debug, Clone)]
pub struct ChannelRenderer {
    tx: InstructionTx,
}

impl ChannelRenderer {
    pub fn new() -> (Self, InstructionRx) {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Shares an existing channel across several renderers.
    pub fn with_tx(tx: InstructionTx) -> Self {
        Self { tx }
    }

    fn send(&self, instruction: RenderInstruction) {
        if let Err(e) = self.tx.send(instruction) {
            error!("failed to forward render instruction: {}", e);
        }
    }
}

impl ChartRenderer for ChannelRenderer {
    fn create_chart(&mut self, instruction: CreateChart) {
        self.send(RenderInstruction::Create(instruction));
    }

    fn update_chart(&mut self, instruction: UpdateChart) {
        self.send(RenderInstruction::Update(instruction));
    }
}

/// Default sink that only trace-logs what it would draw.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceRenderer;

impl ChartRenderer for TraceRenderer {
    fn create_chart(&mut self, instruction: CreateChart) {
        trace!("create chart: {:?}", instruction);
    }

    fn update_chart(&mut self, instruction: UpdateChart) {
        trace!("update chart: {:?}", instruction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{AxisRange, indexed_series};

    #[test]
    fn channel_renderer_forwards_instructions_in_order() {
        let (mut renderer, mut rx) = ChannelRenderer::new();
        let create = CreateChart {
            symbol: "ACME".to_string(),
            series: indexed_series(&[10.0]),
            range: AxisRange { min: 9.0, max: 11.0 },
        };
        let update = UpdateChart {
            symbol: "ACME".to_string(),
            series: indexed_series(&[12.0]),
            range: AxisRange { min: 9.0, max: 13.2 },
            rebuild_grid: true,
        };
        renderer.create_chart(create.clone());
        renderer.update_chart(update.clone());

        assert_eq!(rx.try_recv().unwrap(), RenderInstruction::Create(create));
        assert_eq!(rx.try_recv().unwrap(), RenderInstruction::Update(update));
        assert!(rx.try_recv().is_err());
    }
}
