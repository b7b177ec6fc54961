pub mod normalize;

pub use normalize::{normalize_wav, pcm_bytes, TARGET_SAMPLE_RATE};
