use std::time::Duration;

use futures::{Stream, StreamExt};
use tokio::time::timeout;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{info, warn};
use uuid::Uuid;

use super::auth::{signed_url, Credentials};
use super::error::AsrError;
use super::messages::{BusinessParams, CommonParams, InboundMessage};
use super::reconciler::{Fragment, TranscriptState};
use super::streamer;
use crate::audio::{normalize_wav, pcm_bytes};
use crate::config::AsrConfig;

/// Inbound status value marking the final message of a session.
const STATUS_TERMINAL: u8 = 2;

/// Transcribe a WAV byte buffer via the streaming recognition service.
///
/// This is the single application-facing operation: normalize the audio,
/// then run one session against the service with a single automatic retry
/// for transient failures. Format and credential defects fail immediately
/// without opening a connection.
pub async fn transcribe(config: &AsrConfig, wav_bytes: &[u8]) -> Result<String, AsrError> {
    let samples = normalize_wav(wav_bytes)?;
    let credentials = Credentials::from_config(config)?;
    let pcm = pcm_bytes(&samples);

    let session_id = Uuid::new_v4();
    info!(%session_id, pcm_bytes = pcm.len(), "starting transcription session");

    match run_attempt(config, &credentials, &pcm).await {
        Ok(text) => {
            info!(%session_id, chars = text.chars().count(), "transcription complete");
            Ok(text)
        }
        Err(first) => {
            warn!(%session_id, error = %first, "attempt failed, retrying with a fresh connection");
            match run_attempt(config, &credentials, &pcm).await {
                Ok(text) => {
                    info!(%session_id, chars = text.chars().count(), "retry succeeded");
                    Ok(text)
                }
                Err(second) => {
                    warn!(%session_id, error = %second, "retry failed, giving up");
                    Err(second)
                }
            }
        }
    }
}

/// One end-to-end attempt: sign, connect, stream and receive concurrently,
/// assemble the transcript. Every per-attempt resource (signed URL, socket,
/// transcript state) lives and dies inside this call.
async fn run_attempt(
    config: &AsrConfig,
    credentials: &Credentials,
    pcm: &[u8],
) -> Result<String, AsrError> {
    let url = signed_url(&config.endpoint, credentials)?;

    let (socket, _) = connect_async(url.as_str())
        .await
        .map_err(|e| AsrError::ConnectionError(format!("connect failed: {e}")))?;
    let (mut sink, mut stream) = socket.split();

    let common = CommonParams {
        app_id: credentials.app_id.clone(),
    };
    let business = BusinessParams {
        language: config.language.clone(),
        domain: config.domain.clone(),
        accent: config.accent.clone(),
        vad_eos: config.vad_eos,
        ptt: config.ptt,
        dwa: config.dwa.clone(),
    };

    let audio = pcm.to_vec();
    let sender = tokio::spawn(async move {
        if let Err(e) = streamer::stream_frames(&mut sink, &audio, common, business).await {
            warn!(error = %e, "audio sender stopped early");
        }
    });

    let bound = Duration::from_secs(config.timeout_secs);
    let outcome = timeout(bound, receive_results(&mut stream)).await;

    // Tear the sender down on every exit path; dropping both socket halves
    // closes the connection.
    sender.abort();

    let state = match outcome {
        Err(_) => return Err(AsrError::Timeout(bound)),
        Ok(Err(e)) => return Err(e),
        Ok(Ok(state)) => state,
    };

    let transcript = state.transcript();
    if transcript.is_empty() {
        return Err(AsrError::EmptyResult);
    }
    Ok(transcript)
}

/// Consume inbound messages until the service signals completion.
///
/// Returning is the completion signal: a terminal status yields the
/// accumulated state, a vendor error code or transport failure yields the
/// error, so no caller can be left waiting.
async fn receive_results<S>(stream: &mut S) -> Result<TranscriptState, AsrError>
where
    S: Stream<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    let mut state = TranscriptState::new();

    while let Some(message) = stream.next().await {
        let message =
            message.map_err(|e| AsrError::ConnectionError(format!("socket read failed: {e}")))?;

        match message {
            Message::Text(text) => {
                let inbound: InboundMessage = serde_json::from_str(&text).map_err(|e| {
                    AsrError::ConnectionError(format!("malformed service message: {e}"))
                })?;

                if inbound.code != 0 {
                    return Err(AsrError::VendorError {
                        code: inbound.code,
                        message: inbound
                            .message
                            .unwrap_or_else(|| "unspecified service error".to_string()),
                    });
                }

                let Some(data) = inbound.data else { continue };
                if let Some(result) = &data.result {
                    state.apply(Fragment::from_result(result));
                }
                if data.status == STATUS_TERMINAL {
                    return Ok(state);
                }
            }
            Message::Close(_) => {
                return Err(AsrError::ConnectionError(
                    "connection closed before the final result".to_string(),
                ))
            }
            // Pings are answered by the library; nothing else is expected.
            _ => {}
        }
    }

    Err(AsrError::ConnectionError(
        "connection ended before the final result".to_string(),
    ))
}
