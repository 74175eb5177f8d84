//! Audio transcoding: any container the wiki serves → mono 16-bit PCM WAV.
//!
//! Pipeline: [`decoder::decode_bytes`] → [`downmix`] → [`resampler::resample_mono`]
//! → [`write_wav`].

pub mod decoder;
pub mod resampler;

use std::fs;
use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::error::Result;

/// What ended up on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavInfo {
    pub sample_rate: u32,
    pub frames: usize,
}

/// Decode `bytes`, fold to mono, resample to `target_rate`, write `out_path`.
///
/// The file is written next to the target and renamed into place, so an
/// interrupted run never leaves a truncated `.wav` that a re-run would skip.
pub fn transcode_to_wav(
    bytes: Vec<u8>,
    ext_hint: Option<&str>,
    out_path: &Path,
    target_rate: u32,
) -> Result<WavInfo> {
    let decoded = decoder::decode_bytes(bytes, ext_hint)?;
    let mono = downmix(&decoded.samples, decoded.channels);
    let samples = resampler::resample_mono(&mono, decoded.sample_rate, target_rate)?;

    let part = out_path.with_extension("wav.part");
    write_wav(&part, &samples, target_rate)?;
    fs::rename(&part, out_path)?;

    Ok(WavInfo { sample_rate: target_rate, frames: samples.len() })
}

/// Average interleaved channels into one.
pub fn downmix(interleaved: &[f32], channels: u16) -> Vec<f32> {
    let n = channels.max(1) as usize;
    if n == 1 {
        return interleaved.to_vec();
    }
    interleaved
        .chunks_exact(n)
        .map(|frame| frame.iter().sum::<f32>() / n as f32)
        .collect()
}

/// Write mono f32 samples as 16-bit PCM.
pub fn write_wav(path: &Path, samples: &[f32], sample_rate: u32) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec)?;
    for &s in samples {
        let v = (s.clamp(-1.0, 1.0) * i16::MAX as f32).round() as i16;
        writer.write_sample(v)?;
    }
    writer.finalize()?;
    Ok(())
}
