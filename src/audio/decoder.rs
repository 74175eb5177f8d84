//! Audio decoder using symphonia.
//!
//! Decodes a whole in-memory file to interleaved f32 samples.

use std::io::Cursor;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::{Error, Result};

/// Interleaved samples plus the source layout.
#[derive(Debug, Clone)]
pub struct Decoded {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub channels: u16,
}

/// Decode an entire audio file held in memory.
///
/// `ext_hint` (e.g. `"mp3"`) only helps the probe; the container is still
/// sniffed from the bytes.
///
/// # Errors
/// - Unsupported or unrecognised container
/// - No audio track, or nothing decodable in it
pub fn decode_bytes(bytes: Vec<u8>, ext_hint: Option<&str>) -> Result<Decoded> {
    let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes)), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = ext_hint {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| Error::Decode(format!("Failed to probe format: {e}")))?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| Error::Decode(s!("No audio track found")))?;
    let track_id = track.id;
    let mut sample_rate = track.codec_params.sample_rate;
    let mut channels = track.codec_params.channels.map(|c| c.count() as u16);

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| Error::Decode(format!("Failed to create decoder: {e}")))?;

    let mut samples = Vec::new();
    let mut buf: Option<SampleBuffer<f32>> = None;

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(SymphoniaError::IoError(ref e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => break,
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => {
                logw!("Error reading packet: {e}");
                break;
            }
        };
        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                sample_rate = sample_rate.or(Some(spec.rate));
                channels = channels.or(Some(spec.channels.count() as u16));

                // reuse the buffer unless this packet is larger
                let needed = decoded.capacity() as u64;
                let too_small = buf
                    .as_ref()
                    .is_none_or(|sb| (sb.capacity() as u64) < needed * spec.channels.count() as u64);
                if too_small {
                    buf = Some(SampleBuffer::<f32>::new(needed, spec));
                }
                if let Some(sb) = buf.as_mut() {
                    sb.copy_interleaved_ref(decoded);
                    samples.extend_from_slice(sb.samples());
                }
            }
            Err(SymphoniaError::DecodeError(e)) => {
                logw!("Skipping undecodable packet: {e}");
            }
            Err(e) => return Err(Error::Decode(format!("Decode failed: {e}"))),
        }
    }

    let sample_rate = sample_rate.ok_or_else(|| Error::Decode(s!("Sample rate not found")))?;
    let channels = channels.ok_or_else(|| Error::Decode(s!("Channel count not found")))?;
    if samples.is_empty() {
        return Err(Error::Decode(s!("No audio decoded")));
    }

    logd!(
        "Decoded {} frames at {}Hz ({} channels)",
        samples.len() / channels.max(1) as usize, sample_rate, channels
    );
    Ok(Decoded { samples, sample_rate, channels })
}
