use crate::bus::{InboundMessage, OutboundMessage};
use tokio::sync::mpsc;

const DEFAULT_INBOUND_CAPACITY: usize = 256;
const DEFAULT_OUTBOUND_CAPACITY: usize = 256;

/// Bounded in/out message queues between channels and the router.
///
/// Channels push inbound events and consume outbound replies; the run loop
/// takes the receivers once at startup. Backpressure comes from the bounded
/// capacity — a stalled consumer slows producers instead of growing memory.
pub struct MessageBus {
    pub inbound_tx: mpsc::Sender<InboundMessage>,
    inbound_rx: Option<mpsc::Receiver<InboundMessage>>,
    pub outbound_tx: mpsc::Sender<OutboundMessage>,
    outbound_rx: Option<mpsc::Receiver<OutboundMessage>>,
}

impl MessageBus {
    pub fn new(inbound_capacity: usize, outbound_capacity: usize) -> Self {
        let (inbound_tx, inbound_rx) = mpsc::channel(inbound_capacity);
        let (outbound_tx, outbound_rx) = mpsc::channel(outbound_capacity);
        Self {
            inbound_tx,
            inbound_rx: Some(inbound_rx),
            outbound_tx,
            outbound_rx: Some(outbound_rx),
        }
    }

    /// Extract the inbound receiver; can only be taken once.
    pub fn take_inbound_rx(&mut self) -> Option<mpsc::Receiver<InboundMessage>> {
        self.inbound_rx.take()
    }

    /// Extract the outbound receiver; can only be taken once.
    pub fn take_outbound_rx(&mut self) -> Option<mpsc::Receiver<OutboundMessage>> {
        self.outbound_rx.take()
    }
}

impl Default for MessageBus {
    fn default() -> Self {
        Self::new(DEFAULT_INBOUND_CAPACITY, DEFAULT_OUTBOUND_CAPACITY)
    }
}
