//! Paced copies of WAV assets and the single-slot temp file that owns them.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use tempfile::TempPath;
use thiserror::Error;
use tracing::debug;

/// Lowest sample rate a paced copy is written at.
pub const MIN_PACED_SAMPLE_RATE: u32 = 500;

/// Why a paced copy could not be produced.
#[derive(Debug, Error)]
pub enum PacingError {
    /// Only WAV assets can be paced.
    #[error("pacing requires a WAV asset: {0}")]
    UnsupportedFormat(PathBuf),

    /// The scaled sample rate does not fit a WAV header for this layout.
    #[error("paced sample rate {rate} Hz is out of range for {channels} channels at {bits} bits")]
    UnsupportedRate {
        /// Scaled sample rate.
        rate: u32,
        /// Channel count of the source.
        channels: u16,
        /// Bits per sample of the source.
        bits: u16,
    },

    /// The temporary file could not be created.
    #[error("temporary file error: {0}")]
    Io(#[from] std::io::Error),

    /// The source could not be read or the copy could not be written.
    #[error("wav error: {0}")]
    Wav(#[from] hound::Error),
}

/// Returns `true` for assets the pacing engine can rewrite.
#[must_use]
pub fn is_waveform(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"))
}

/// Sample rate for a copy of a `rate` Hz asset played at `pace`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn paced_sample_rate(rate: u32, pace: f64) -> u32 {
    let scaled = (f64::from(rate) * pace).floor() as u32;
    scaled.max(MIN_PACED_SAMPLE_RATE)
}

/// Writes a copy of `source` whose sample rate is scaled by `pace`.
///
/// Channels, sample width and every sample frame are copied unchanged. The
/// copy lives in the system temp directory and is deleted when the returned
/// `TempPath` is dropped or closed; on failure nothing is left behind.
///
/// # Errors
///
/// Returns `PacingError::UnsupportedFormat` for non-WAV assets,
/// `PacingError::UnsupportedRate` when the scaled rate cannot be written, and
/// an I/O or WAV error if reading the source or writing the copy fails.
pub fn produce_paced_copy(source: &Path, pace: f64) -> Result<TempPath, PacingError> {
    produce_paced_copy_in(source, pace, &std::env::temp_dir())
}

/// Same as [`produce_paced_copy`], with the copy written under `dir`.
///
/// # Errors
///
/// See [`produce_paced_copy`].
pub fn produce_paced_copy_in(
    source: &Path,
    pace: f64,
    dir: &Path,
) -> Result<TempPath, PacingError> {
    if !is_waveform(source) {
        return Err(PacingError::UnsupportedFormat(source.to_path_buf()));
    }

    let mut reader = WavReader::open(source)?;
    let spec = reader.spec();
    let paced_spec = WavSpec {
        sample_rate: paced_sample_rate(spec.sample_rate, pace),
        ..spec
    };
    check_byte_rate(&paced_spec)?;

    let temp = tempfile::Builder::new()
        .prefix("echotrace_paced_")
        .suffix(".wav")
        .tempfile_in(dir)?
        .into_temp_path();

    // `temp` is dropped, and the partial file removed, on any early return.
    let mut writer = WavWriter::create(&temp, paced_spec)?;
    match spec.sample_format {
        SampleFormat::Float => {
            for sample in reader.samples::<f32>() {
                writer.write_sample(sample?)?;
            }
        }
        SampleFormat::Int => {
            for sample in reader.samples::<i32>() {
                writer.write_sample(sample?)?;
            }
        }
    }
    writer.finalize()?;

    debug!(
        source = %source.display(),
        paced = %temp.display(),
        from_rate = spec.sample_rate,
        to_rate = paced_spec.sample_rate,
        "paced copy written"
    );
    Ok(temp)
}

// The header stores `rate * channels * bytes per sample` as a u32.
fn check_byte_rate(spec: &WavSpec) -> Result<(), PacingError> {
    let bytes_per_sample = u32::from(spec.bits_per_sample.div_ceil(8));
    spec.sample_rate
        .checked_mul(u32::from(spec.channels))
        .and_then(|rate| rate.checked_mul(bytes_per_sample))
        .map(|_| ())
        .ok_or(PacingError::UnsupportedRate {
            rate: spec.sample_rate,
            channels: spec.channels,
            bits: spec.bits_per_sample,
        })
}

/// Holds at most one paced asset.
///
/// Every read or clear of the slot happens under its lock, so a handle taken
/// by one caller is never seen by another.
#[derive(Debug, Default)]
pub struct PacedAssetSlot {
    current: Mutex<Option<TempPath>>,
}

impl PacedAssetSlot {
    /// Creates an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `asset`, deleting any asset it supersedes. Returns the path of
    /// the stored asset.
    pub fn replace(&self, asset: TempPath) -> PathBuf {
        let path = asset.to_path_buf();
        let previous = self.lock().replace(asset);
        delete(previous);
        path
    }

    /// Deletes the current asset, if any. Safe to call repeatedly.
    pub fn clear(&self) {
        let previous = self.lock().take();
        delete(previous);
    }

    /// Path of the current asset.
    #[must_use]
    pub fn current(&self) -> Option<PathBuf> {
        self.lock().as_deref().map(Path::to_path_buf)
    }

    fn lock(&self) -> MutexGuard<'_, Option<TempPath>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn delete(asset: Option<TempPath>) {
    if let Some(asset) = asset {
        discard(asset);
    }
}

/// Deletes `asset` now, logging a file that is already gone.
pub(crate) fn discard(asset: TempPath) {
    let path = asset.to_path_buf();
    if let Err(err) = asset.close() {
        debug!(path = %path.display(), error = %err, "paced asset already removed");
    }
}
