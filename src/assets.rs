//! Asset loading: PNG sprites and WAV sounds
//!
//! Paths are fixed at startup and a failed load is fatal - errors propagate
//! out of `main` with the offending path attached.

use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result, anyhow};

/// Decoded PCM audio, samples normalized to f32 and interleaved per channel
#[derive(Debug, Clone)]
pub struct SoundData {
    pub samples: Vec<f32>,
    pub channels: u16,
    pub sample_rate: u32,
}

impl SoundData {
    /// Number of interleaved frames (samples per channel)
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels.max(1) as usize
    }

    /// Decode a `.wav` byte slice
    pub fn from_wav_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = hound::WavReader::new(Cursor::new(bytes))?;
        let spec = reader.spec();

        let samples: Result<Vec<f32>, _> = match spec.sample_format {
            hound::SampleFormat::Float => reader.samples::<f32>().collect(),
            hound::SampleFormat::Int => {
                let max_value = (1i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|sample| sample.map(|s| s as f32 / max_value))
                    .collect()
            }
        };
        let samples = samples.map_err(|e| anyhow!("failed to parse WAV samples: {e}"))?;

        Ok(Self {
            samples,
            channels: spec.channels,
            sample_rate: spec.sample_rate,
        })
    }
}

/// Load a sprite image, forced to RGBA8
pub fn load_sprite(path: impl AsRef<Path>) -> Result<image::RgbaImage> {
    let path = path.as_ref();
    let img = image::open(path)
        .with_context(|| format!("failed to load sprite {}", path.display()))?;
    Ok(img.to_rgba8())
}

/// Load and decode a WAV sound effect or music track
pub fn load_sound(path: impl AsRef<Path>) -> Result<SoundData> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read sound {}", path.display()))?;
    SoundData::from_wav_bytes(&bytes)
        .with_context(|| format!("failed to decode sound {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // A WAV file 16-bit, mono, 44100Hz, containing 4 samples (0.1, -0.1, 0.2, -0.2).
    const TEST_WAV_BYTES: &[u8] = &[
        82, 73, 70, 70, 52, 0, 0, 0, 87, 65, 86, 69, 102, 109, 116, 32, 16, 0, 0, 0, 1, 0, 1, 0,
        68, 172, 0, 0, 136, 88, 1, 0, 2, 0, 16, 0, 100, 97, 116, 97, 8, 0, 0, 0, 0, 12, 204, 251,
        51, 13, 205, 243,
    ];

    #[test]
    fn test_wav_decode() {
        let sound = SoundData::from_wav_bytes(TEST_WAV_BYTES).expect("valid WAV must decode");
        assert_eq!(sound.sample_rate, 44100);
        assert_eq!(sound.channels, 1);
        assert_eq!(sound.frames(), 4);

        // 16-bit int samples are normalized into [-1, 1]
        for (sample, expected) in sound.samples.iter().zip([0.1, -0.1, 0.2, -0.2]) {
            assert!((sample - expected).abs() < 1e-3);
        }
    }

    #[test]
    fn test_wav_decode_rejects_garbage() {
        assert!(SoundData::from_wav_bytes(&[0, 1, 2, 3, 4]).is_err());
    }

    #[test]
    fn test_missing_sprite_is_an_error() {
        let err = load_sprite("assets/definitely-not-here.png").unwrap_err();
        assert!(err.to_string().contains("definitely-not-here.png"));
    }
}
