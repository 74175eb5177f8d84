//! Sample-rate conversion using rubato.

use rubato::{FastFixedIn, PolynomialDegree, Resampler};

use crate::error::{Error, Result};

/// Resample a mono signal from `input_rate` to `output_rate`.
///
/// The whole clip is one chunk. The resampler's start-up delay is trimmed and
/// its tail flushed, so the output holds `round(len * ratio)` frames.
/// Equal rates return a copy.
pub fn resample_mono(input: &[f32], input_rate: u32, output_rate: u32) -> Result<Vec<f32>> {
    if input_rate == output_rate || input.is_empty() {
        logd!("Sample rate already at {output_rate}Hz, skipping resample");
        return Ok(input.to_vec());
    }
    if input_rate == 0 {
        return Err(Error::Decode(s!("Input sample rate is zero")));
    }

    let ratio = output_rate as f64 / input_rate as f64;
    let expected = (input.len() as f64 * ratio).round() as usize;
    logd!("Resampling {} frames {input_rate}Hz -> {output_rate}Hz", input.len());

    let mut resampler = FastFixedIn::<f32>::new(
        ratio,
        1.0, // no runtime ratio changes
        PolynomialDegree::Septic,
        input.len(),
        1,
    )
    .map_err(|e| Error::Decode(format!("Failed to create resampler: {e}")))?;

    let delay = resampler.output_delay();
    let mut out = resampler
        .process(&[input], None)
        .map_err(|e| Error::Decode(format!("Resampling failed: {e}")))?
        .swap_remove(0);

    // Drain what the delay line still holds
    if out.len() < expected + delay {
        let tail = resampler
            .process_partial::<&[f32]>(None, None)
            .map_err(|e| Error::Decode(format!("Resampler flush failed: {e}")))?
            .swap_remove(0);
        out.extend(tail);
    }

    let start = delay.min(out.len());
    let end = (start + expected).min(out.len());
    Ok(out[start..end].to_vec())
}
