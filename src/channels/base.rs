use crate::bus::OutboundMessage;
use async_trait::async_trait;

/// Transport seam. The router only sees the bus; a channel turns bus
/// messages into whatever its transport speaks. Reply length is already
/// bounded upstream by the report formatter's message cap.
#[async_trait]
pub trait BaseChannel: Send + Sync {
    fn name(&self) -> &str;

    async fn start(&mut self) -> anyhow::Result<()>;
    async fn stop(&mut self) -> anyhow::Result<()>;
    async fn send(&self, msg: &OutboundMessage) -> anyhow::Result<()>;
}
