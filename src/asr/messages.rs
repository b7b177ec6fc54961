use serde::{Deserialize, Serialize};

/// Wire format of the audio payload.
pub const AUDIO_FORMAT: &str = "audio/L16;rate=16000";
pub const AUDIO_ENCODING: &str = "raw";

/// Outbound `data.status` values.
pub const STATUS_FIRST: u8 = 0;
pub const STATUS_MIDDLE: u8 = 1;
pub const STATUS_LAST: u8 = 2;

/// Application scope of the session (vendor "common" block).
#[derive(Debug, Clone, Serialize)]
pub struct CommonParams {
    pub app_id: String,
}

/// Recognition parameters carried on the first frame only.
#[derive(Debug, Clone, Serialize)]
pub struct BusinessParams {
    pub language: String,
    pub domain: String,
    pub accent: String,
    /// End-of-speech silence threshold, milliseconds
    pub vad_eos: u32,
    pub ptt: u8,
    /// Partial-result correction mode ("wpgs" enables replace fragments)
    pub dwa: String,
}

/// Audio chunk plus its position in the stream.
#[derive(Debug, Serialize)]
pub struct AudioData {
    pub status: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    /// Base64-encoded PCM bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
}

/// One outbound WebSocket message.
#[derive(Debug, Serialize)]
pub struct OutboundFrame {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common: Option<CommonParams>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business: Option<BusinessParams>,
    pub data: AudioData,
}

impl OutboundFrame {
    /// First frame: session parameters plus the opening chunk.
    pub fn first(common: CommonParams, business: BusinessParams, audio: String) -> Self {
        Self {
            common: Some(common),
            business: Some(business),
            data: AudioData {
                status: STATUS_FIRST,
                format: Some(AUDIO_FORMAT.to_string()),
                encoding: Some(AUDIO_ENCODING.to_string()),
                audio: Some(audio),
            },
        }
    }

    pub fn middle(audio: String) -> Self {
        Self {
            common: None,
            business: None,
            data: AudioData {
                status: STATUS_MIDDLE,
                format: Some(AUDIO_FORMAT.to_string()),
                encoding: Some(AUDIO_ENCODING.to_string()),
                audio: Some(audio),
            },
        }
    }

    pub fn last(audio: String) -> Self {
        Self {
            common: None,
            business: None,
            data: AudioData {
                status: STATUS_LAST,
                format: Some(AUDIO_FORMAT.to_string()),
                encoding: Some(AUDIO_ENCODING.to_string()),
                audio: Some(audio),
            },
        }
    }

    /// Bare end-of-audio marker, sent when no payload remains.
    pub fn terminal() -> Self {
        Self {
            common: None,
            business: None,
            data: AudioData {
                status: STATUS_LAST,
                format: None,
                encoding: None,
                audio: None,
            },
        }
    }
}

/// One inbound WebSocket message. `code != 0` is a vendor-side error and the
/// rest of the payload is not interpreted.
#[derive(Debug, Deserialize)]
pub struct InboundMessage {
    pub code: i32,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<InboundData>,
}

#[derive(Debug, Deserialize)]
pub struct InboundData {
    /// 0/1 incremental, 2 terminal
    #[serde(default)]
    pub status: u8,
    #[serde(default)]
    pub result: Option<RecognitionResult>,
}

/// One recognition fragment as the service encodes it.
#[derive(Debug, Deserialize)]
pub struct RecognitionResult {
    /// Sequence number of this segment
    pub sn: u32,
    /// "apd" append, "rpl" replace
    #[serde(default)]
    pub pgs: Option<String>,
    /// Inclusive [start, end] sn range invalidated when pgs == "rpl"
    #[serde(default)]
    pub rg: Option<Vec<u32>>,
    #[serde(default)]
    pub ws: Vec<WordSegment>,
}

impl RecognitionResult {
    /// Text of this fragment: the top candidate of every word segment.
    pub fn text(&self) -> String {
        self.ws
            .iter()
            .filter_map(|segment| segment.cw.first())
            .map(|candidate| candidate.w.as_str())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct WordSegment {
    #[serde(default)]
    pub cw: Vec<CandidateWord>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateWord {
    pub w: String,
}
