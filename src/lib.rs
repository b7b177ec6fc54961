pub mod asr;
pub mod audio;
pub mod config;
pub mod http;

pub use asr::{transcribe, AsrError, Fragment, FragmentMode, TranscriptState};
pub use audio::{normalize_wav, pcm_bytes};
pub use config::{AsrConfig, Config};
pub use http::{create_router, AppState};
