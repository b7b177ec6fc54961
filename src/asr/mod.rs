pub mod auth;
pub mod error;
pub mod messages;
pub mod reconciler;
pub mod session;
pub mod streamer;

pub use error::AsrError;
pub use reconciler::{Fragment, FragmentMode, TranscriptState};
pub use session::transcribe;
pub use streamer::{chunk_frames, Frame, FramePosition, FRAME_INTERVAL, FRAME_SIZE};
