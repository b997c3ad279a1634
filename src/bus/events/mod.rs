use chrono::{DateTime, Utc};

/// Raw binary attachment as delivered by the transport.
#[derive(Debug, Clone)]
pub struct MediaAttachment {
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// Inbound chat event. Carries the text body plus an optional attachment
/// and, for replies, the quoted parent event.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub channel: String,
    pub sender_id: String,
    pub chat_id: String,
    pub body: String,
    pub timestamp: DateTime<Utc>,
    pub media: Option<MediaAttachment>,
    pub quoted: Option<Box<InboundMessage>>,
    pub is_status_broadcast: bool,
}

impl InboundMessage {
    /// Resolve the image source for a sticker command: the message's own
    /// attachment if it has one, else the quoted parent's attachment.
    pub fn sticker_source(&self) -> Option<&MediaAttachment> {
        if let Some(media) = &self.media {
            return Some(media);
        }
        self.quoted.as_deref().and_then(|q| q.media.as_ref())
    }
}

/// Sticker metadata attached to the outbound sticker payload.
#[derive(Debug, Clone)]
pub struct StickerMetadata {
    pub name: String,
    pub author: String,
    pub categories: Vec<String>,
}

/// What gets sent back: plain text or a rendered sticker binary.
#[derive(Debug, Clone)]
pub enum ReplyPayload {
    Text(String),
    Sticker {
        bytes: Vec<u8>,
        mime_type: String,
        metadata: StickerMetadata,
    },
}

#[derive(Debug, Clone)]
pub struct OutboundMessage {
    pub channel: String,
    pub chat_id: String,
    pub payload: ReplyPayload,
}

impl OutboundMessage {
    pub fn text(reply_to: &InboundMessage, content: impl Into<String>) -> Self {
        Self {
            channel: reply_to.channel.clone(),
            chat_id: reply_to.chat_id.clone(),
            payload: ReplyPayload::Text(content.into()),
        }
    }

    pub fn sticker(
        reply_to: &InboundMessage,
        bytes: Vec<u8>,
        mime_type: impl Into<String>,
        metadata: StickerMetadata,
    ) -> Self {
        Self {
            channel: reply_to.channel.clone(),
            chat_id: reply_to.chat_id.clone(),
            payload: ReplyPayload::Sticker {
                bytes,
                mime_type: mime_type.into(),
                metadata,
            },
        }
    }
}
