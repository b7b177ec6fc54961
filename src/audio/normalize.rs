use std::io::Cursor;

use hound::{SampleFormat, WavReader};
use tracing::debug;

use crate::asr::AsrError;

/// Sample rate the recognition service expects.
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

/// Decode a WAV container and produce mono 16 kHz 16-bit samples.
///
/// Stereo input is downmixed by averaging each left/right pair; other rates
/// are brought to 16 kHz by linear interpolation. Input that is already
/// mono/16 kHz passes through unchanged.
pub fn normalize_wav(bytes: &[u8]) -> Result<Vec<i16>, AsrError> {
    let reader = WavReader::new(Cursor::new(bytes))
        .map_err(|e| AsrError::UnsupportedAudioFormat(format!("unreadable WAV container: {e}")))?;

    let spec = reader.spec();
    if spec.bits_per_sample != 16 || spec.sample_format != SampleFormat::Int {
        return Err(AsrError::UnsupportedAudioFormat(format!(
            "expected 16-bit integer PCM, got {}-bit {:?}",
            spec.bits_per_sample, spec.sample_format
        )));
    }
    if spec.channels == 0 || spec.channels > 2 {
        return Err(AsrError::UnsupportedAudioFormat(format!(
            "expected mono or stereo, got {} channels",
            spec.channels
        )));
    }

    let samples: Vec<i16> = reader
        .into_samples::<i16>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AsrError::UnsupportedAudioFormat(format!("truncated sample data: {e}")))?;

    let mono = if spec.channels == 2 {
        downmix_stereo(&samples)
    } else {
        samples
    };

    let normalized = resample_linear(mono, spec.sample_rate, TARGET_SAMPLE_RATE);

    debug!(
        source_rate = spec.sample_rate,
        channels = spec.channels,
        samples = normalized.len(),
        "audio normalized"
    );

    Ok(normalized)
}

/// Serialize samples as little-endian PCM bytes, the wire layout the
/// recognition service consumes.
pub fn pcm_bytes(samples: &[i16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}

/// Average interleaved left/right pairs into one channel. The i32 division
/// truncates toward zero.
fn downmix_stereo(samples: &[i16]) -> Vec<i16> {
    samples
        .chunks_exact(2)
        .map(|pair| ((pair[0] as i32 + pair[1] as i32) / 2) as i16)
        .collect()
}

/// Linear-interpolation resampler. Each output index maps to a fractional
/// source position; the value is interpolated between the two bounding
/// source samples and clamped to the 16-bit range.
fn resample_linear(samples: Vec<i16>, source_rate: u32, target_rate: u32) -> Vec<i16> {
    if source_rate == target_rate || samples.is_empty() {
        return samples;
    }

    let ratio = target_rate as f64 / source_rate as f64;
    let out_len = (samples.len() as f64 * ratio) as usize;
    let mut out = Vec::with_capacity(out_len);

    for i in 0..out_len {
        let src_pos = i as f64 / ratio;
        let j = src_pos as usize;
        let value = if j + 1 < samples.len() {
            let frac = src_pos - j as f64;
            samples[j] as f64 * (1.0 - frac) + samples[j + 1] as f64 * frac
        } else {
            samples[samples.len() - 1] as f64
        };
        out.push((value as i64).clamp(i16::MIN as i64, i16::MAX as i64) as i16);
    }

    out
}
