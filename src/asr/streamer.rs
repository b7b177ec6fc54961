use std::time::Duration;

use base64::Engine;
use futures::{Sink, SinkExt};
use tokio_tungstenite::tungstenite::Message;
use tracing::debug;

use super::error::AsrError;
use super::messages::{BusinessParams, CommonParams, OutboundFrame};

/// 640 bytes of 16 kHz / 16-bit / mono PCM is 20 ms of audio.
pub const FRAME_SIZE: usize = 640;

/// Pacing between frame sends, matching the audio's real-time rate. Sending
/// faster causes the service to reject or desynchronize the stream.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePosition {
    First,
    Middle,
    Last,
}

/// A chunk of the PCM buffer plus its position in the stream.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub position: FramePosition,
    pub payload: &'a [u8],
}

/// Split a PCM buffer into send-order frames. Concatenating the payloads
/// reproduces the buffer exactly; an empty buffer yields a single empty
/// first frame so the session handshake still goes out.
pub fn chunk_frames(pcm: &[u8]) -> Vec<Frame<'_>> {
    if pcm.is_empty() {
        return vec![Frame {
            position: FramePosition::First,
            payload: pcm,
        }];
    }

    let count = pcm.chunks(FRAME_SIZE).count();
    pcm.chunks(FRAME_SIZE)
        .enumerate()
        .map(|(i, payload)| {
            let position = if i == 0 {
                FramePosition::First
            } else if i + 1 == count {
                FramePosition::Last
            } else {
                FramePosition::Middle
            };
            Frame { position, payload }
        })
        .collect()
}

/// Write the whole buffer to the connection at the fixed pacing interval.
///
/// The first frame carries the session parameters; if the audio fit entirely
/// into the first frame, a bare end-of-audio marker follows instead of a
/// last payload frame. Runs independently of the receive side and never
/// waits on fragment delivery.
pub async fn stream_frames<S>(
    sink: &mut S,
    pcm: &[u8],
    common: CommonParams,
    business: BusinessParams,
) -> Result<(), AsrError>
where
    S: Sink<Message> + Unpin,
    S::Error: std::fmt::Display,
{
    let frames = chunk_frames(pcm);
    let total = frames.len();
    let mut sent_last = false;

    for frame in frames {
        let audio = base64::engine::general_purpose::STANDARD.encode(frame.payload);
        let outbound = match frame.position {
            FramePosition::First => {
                OutboundFrame::first(common.clone(), business.clone(), audio)
            }
            FramePosition::Middle => OutboundFrame::middle(audio),
            FramePosition::Last => {
                sent_last = true;
                OutboundFrame::last(audio)
            }
        };
        send_frame(sink, &outbound).await?;

        if !sent_last {
            tokio::time::sleep(FRAME_INTERVAL).await;
        }
    }

    if !sent_last {
        send_frame(sink, &OutboundFrame::terminal()).await?;
    }

    debug!(frames = total, bytes = pcm.len(), "audio stream complete");

    Ok(())
}

async fn send_frame<S>(sink: &mut S, frame: &OutboundFrame) -> Result<(), AsrError>
where
    S: Sink<Message> + Unpin,
    S::Error: std::fmt::Display,
{
    let payload = serde_json::to_string(frame)
        .map_err(|e| AsrError::ConnectionError(format!("failed to encode frame: {e}")))?;
    sink.send(Message::Text(payload))
        .await
        .map_err(|e| AsrError::ConnectionError(format!("failed to send frame: {e}")))
}
