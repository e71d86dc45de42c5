use hound::WavReader;
use std::io::Cursor;

use crate::error::Result;

/// Length in milliseconds of a WAV clip returned by the speech service
pub fn calculate(wav_bytes: &[u8]) -> Result<f64> {
    let reader = WavReader::new(Cursor::new(wav_bytes))?;
    let spec = reader.spec();

    if spec.sample_rate == 0 || spec.channels == 0 {
        return Ok(0.0);
    }

    // len() counts samples across all channels
    let frames = reader.len() as f64 / spec.channels as f64;
    Ok(frames / spec.sample_rate as f64 * 1000.0)
}
