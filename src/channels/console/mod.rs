use crate::bus::{InboundMessage, OutboundMessage, ReplyPayload};
use crate::channels::base::BaseChannel;
use crate::utils::media::save_media_file;
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Line-oriented stdin/stdout channel. Each stdin line becomes one inbound
/// message; sticker payloads are written to the media dir and the path is
/// printed in place of the binary.
pub struct ConsoleChannel {
    inbound_tx: mpsc::Sender<InboundMessage>,
    reader_handle: Option<tokio::task::JoinHandle<()>>,
}

impl ConsoleChannel {
    pub fn new(inbound_tx: mpsc::Sender<InboundMessage>) -> Self {
        Self {
            inbound_tx,
            reader_handle: None,
        }
    }
}

#[async_trait]
impl BaseChannel for ConsoleChannel {
    fn name(&self) -> &str {
        "console"
    }

    async fn start(&mut self) -> Result<()> {
        info!("Console channel ready. Type a command (e.g. !help) and press enter.");
        let inbound_tx = self.inbound_tx.clone();

        let handle = tokio::spawn(async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        if line.trim().is_empty() {
                            continue;
                        }
                        let msg = InboundMessage {
                            channel: "console".to_string(),
                            sender_id: "console".to_string(),
                            chat_id: "console".to_string(),
                            body: line,
                            timestamp: Utc::now(),
                            media: None,
                            quoted: None,
                            is_status_broadcast: false,
                        };
                        if inbound_tx.send(msg).await.is_err() {
                            break;
                        }
                    }
                    Ok(None) => {
                        debug!("stdin closed, console reader exiting");
                        break;
                    }
                    Err(e) => {
                        debug!("stdin read error: {}", e);
                        break;
                    }
                }
            }
        });

        self.reader_handle = Some(handle);
        Ok(())
    }

    async fn stop(&mut self) -> Result<()> {
        if let Some(handle) = self.reader_handle.take() {
            handle.abort();
        }
        Ok(())
    }

    async fn send(&self, msg: &OutboundMessage) -> Result<()> {
        match &msg.payload {
            ReplyPayload::Text(content) => {
                println!("{content}");
            }
            ReplyPayload::Sticker {
                bytes, metadata, ..
            } => {
                let path = save_media_file(bytes, "sticker", "webp")?;
                println!("[sticker by {}] saved to {}", metadata.author, path);
            }
        }
        Ok(())
    }
}
