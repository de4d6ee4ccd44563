//! WAV fixtures.

use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};

/// Writes a 16-bit PCM WAV with `frames` frames of a simple ramp.
///
/// # Errors
///
/// Returns `hound::Error` on I/O or encoding failure.
pub fn write_test_wav(
    path: &Path,
    channels: u16,
    sample_rate: u32,
    frames: u32,
) -> Result<(), hound::Error> {
    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec)?;
    for frame in 0..frames {
        for channel in 0..channels {
            let value = ((frame % 2048) * 31 + u32::from(channel) * 7) % 2048;
            writer.write_sample(i16::try_from(value).unwrap_or_default())?;
        }
    }
    writer.finalize()
}
