pub mod events;
pub mod queue;

pub use events::{InboundMessage, MediaAttachment, OutboundMessage, ReplyPayload, StickerMetadata};
pub use queue::MessageBus;
