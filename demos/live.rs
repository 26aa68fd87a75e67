use stockwatch::client::{FeedClient, FeedClientOptions};
use stockwatch::{ChannelRenderer, FeedDispatcher, RenderInstruction};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let options = FeedClientOptions::builder()
        .feed_url(
            std::env::var("STOCKWATCH_FEED_URL")
                .unwrap_or_else(|_| "ws://localhost:9000/ws".to_string()),
        )
        .stocks_url(
            std::env::var("STOCKWATCH_STOCKS_URL")
                .unwrap_or_else(|_| "http://localhost:9000/stocks".to_string()),
        )
        .build();

    let (renderer, mut instructions) = ChannelRenderer::new();
    let dispatcher = FeedDispatcher::new(renderer);
    let mut client = FeedClient::new(options, dispatcher);

    tokio::spawn(async move {
        while let Some(instruction) = instructions.recv().await {
            match instruction {
                RenderInstruction::Create(create) => {
                    info!(
                        "new chart {} with {} points, range [{:.2}, {:.2}]",
                        create.symbol,
                        create.series.len(),
                        create.range.min,
                        create.range.max
                    );
                }
                RenderInstruction::Update(update) => {
                    let last = update.series.last().map(|point| point.price);
                    info!(
                        "redraw {} (last {:?}, grid rebuild: {})",
                        update.symbol, last, update.rebuild_grid
                    );
                }
            }
        }
    });

    client.run().await?;
    Ok(())
}
