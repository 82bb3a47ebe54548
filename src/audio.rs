//! Audio output: a cpal stream feeding a small software mixer
//!
//! The game thread pushes voices (one-shot effects, looping music) into the
//! mixer and never waits on playback; the cpal callback drains them. A
//! machine without an output device gets a silent manager, not an error.

use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use crate::assets::SoundData;

/// One playing sound
struct Voice {
    sound: Arc<SoundData>,
    /// Playback position in source frames (fractional, for rate conversion)
    cursor: f64,
    looping: bool,
}

impl Voice {
    /// Mix this voice's current frame into `frame` and advance the cursor.
    /// Returns false once a one-shot voice is exhausted.
    fn mix_frame(&mut self, frame: &mut [f32], step: f64, gain: f32) -> bool {
        let total = self.sound.frames();
        if total == 0 {
            return false;
        }

        let mut idx = self.cursor as usize;
        if idx >= total {
            if !self.looping {
                return false;
            }
            self.cursor %= total as f64;
            idx = self.cursor as usize;
        }

        // Mono fans out to every output channel; extra output channels
        // repeat the last source channel.
        let channels = self.sound.channels.max(1) as usize;
        for (out_ch, out) in frame.iter_mut().enumerate() {
            let src_ch = out_ch.min(channels - 1);
            *out += self.sound.samples[idx * channels + src_ch] * gain;
        }

        self.cursor += step;
        true
    }
}

struct Mixer {
    voices: Vec<Voice>,
    master_volume: f32,
    muted: bool,
}

impl Mixer {
    fn new() -> Self {
        Self {
            voices: Vec::new(),
            master_volume: 0.8,
            muted: false,
        }
    }

    /// Fill one output buffer, dropping voices that finish mid-buffer.
    /// Muted playback keeps advancing cursors so music does not rewind.
    fn mix(&mut self, output: &mut [f32], channels: usize, sample_rate: u32) {
        output.fill(0.0);
        if channels == 0 || sample_rate == 0 {
            return;
        }

        let gain = if self.muted { 0.0 } else { self.master_volume };
        self.voices.retain_mut(|voice| {
            let step = voice.sound.sample_rate as f64 / sample_rate as f64;
            for frame in output.chunks_mut(channels) {
                if !voice.mix_frame(frame, step, gain) {
                    return false;
                }
            }
            true
        });

        for sample in output.iter_mut() {
            *sample = sample.clamp(-1.0, 1.0);
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    mixer: Arc<Mutex<Mixer>>,
    /// Kept alive for the session; dropping it closes the output stream
    _stream: Option<cpal::Stream>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        let mixer = Arc::new(Mutex::new(Mixer::new()));
        let stream = match open_output_stream(mixer.clone()) {
            Ok(stream) => Some(stream),
            Err(e) => {
                log::warn!("audio disabled: {e:#}");
                None
            }
        };
        Self {
            mixer,
            _stream: stream,
        }
    }

    /// Play a sound effect once
    pub fn play(&self, sound: &Arc<SoundData>) {
        self.add_voice(sound, false);
    }

    /// Play a track on a loop until shutdown
    pub fn play_looping(&self, sound: &Arc<SoundData>) {
        self.add_voice(sound, true);
    }

    fn add_voice(&self, sound: &Arc<SoundData>, looping: bool) {
        if let Ok(mut mixer) = self.mixer.lock() {
            mixer.voices.push(Voice {
                sound: sound.clone(),
                cursor: 0.0,
                looping,
            });
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&self, volume: f32) {
        if let Ok(mut mixer) = self.mixer.lock() {
            mixer.master_volume = volume.clamp(0.0, 1.0);
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&self, muted: bool) {
        if let Ok(mut mixer) = self.mixer.lock() {
            mixer.muted = muted;
        }
    }
}

fn open_output_stream(mixer: Arc<Mutex<Mixer>>) -> Result<cpal::Stream> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| anyhow!("no default output device available"))?;
    let config = device.default_output_config()?;

    let channels = config.channels() as usize;
    let sample_rate = config.sample_rate();

    let stream = match config.sample_format() {
        cpal::SampleFormat::F32 => device.build_output_stream(
            &config.into(),
            move |output: &mut [f32], _: &cpal::OutputCallbackInfo| match mixer.lock() {
                Ok(mut mixer) => mixer.mix(output, channels, sample_rate),
                Err(_) => output.fill(0.0),
            },
            |err| log::error!("audio stream error: {err}"),
            None,
        )?,
        format => return Err(anyhow!("unsupported sample format: {format}")),
    };

    stream.play()?;
    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mono(samples: Vec<f32>, sample_rate: u32) -> Arc<SoundData> {
        Arc::new(SoundData {
            samples,
            channels: 1,
            sample_rate,
        })
    }

    fn voice(sound: &Arc<SoundData>, looping: bool) -> Voice {
        Voice {
            sound: sound.clone(),
            cursor: 0.0,
            looping,
        }
    }

    #[test]
    fn test_one_shot_voice_ends() {
        let mut mixer = Mixer::new();
        mixer.master_volume = 1.0;
        mixer.voices.push(voice(&mono(vec![1.0, 1.0, 1.0, 1.0], 48_000), false));

        // Stereo output, 6 frames: the 4-frame clip fills the first 4
        let mut output = [9.0f32; 12];
        mixer.mix(&mut output, 2, 48_000);

        assert_eq!(&output[..8], &[1.0; 8]);
        assert_eq!(&output[8..], &[0.0; 4]);
        assert!(mixer.voices.is_empty());
    }

    #[test]
    fn test_looping_voice_wraps() {
        let mut mixer = Mixer::new();
        mixer.master_volume = 1.0;
        mixer.voices.push(voice(&mono(vec![0.5, -0.5], 48_000), true));

        let mut output = [0.0f32; 6];
        mixer.mix(&mut output, 1, 48_000);

        assert_eq!(output, [0.5, -0.5, 0.5, -0.5, 0.5, -0.5]);
        assert_eq!(mixer.voices.len(), 1);
    }

    #[test]
    fn test_mono_fans_out_to_both_channels() {
        let mut mixer = Mixer::new();
        mixer.master_volume = 1.0;
        mixer.voices.push(voice(&mono(vec![0.25], 48_000), false));

        let mut output = [0.0f32; 2];
        mixer.mix(&mut output, 2, 48_000);
        assert_eq!(output, [0.25, 0.25]);
    }

    #[test]
    fn test_stereo_channels_stay_separate() {
        let mut mixer = Mixer::new();
        mixer.master_volume = 1.0;
        mixer.voices.push(voice(
            &Arc::new(SoundData {
                samples: vec![0.1, 0.2, 0.3, 0.4],
                channels: 2,
                sample_rate: 48_000,
            }),
            false,
        ));

        let mut output = [0.0f32; 4];
        mixer.mix(&mut output, 2, 48_000);
        assert_eq!(output, [0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn test_upsampling_repeats_frames() {
        let mut mixer = Mixer::new();
        mixer.master_volume = 1.0;
        // 24 kHz source into a 48 kHz stream: every frame plays twice
        mixer.voices.push(voice(&mono(vec![0.5, -0.5], 24_000), false));

        let mut output = [0.0f32; 4];
        mixer.mix(&mut output, 1, 48_000);
        assert_eq!(output, [0.5, 0.5, -0.5, -0.5]);
    }

    #[test]
    fn test_voices_sum_and_clamp() {
        let mut mixer = Mixer::new();
        mixer.master_volume = 1.0;
        mixer.voices.push(voice(&mono(vec![0.8], 48_000), false));
        mixer.voices.push(voice(&mono(vec![0.8], 48_000), false));

        let mut output = [0.0f32; 1];
        mixer.mix(&mut output, 1, 48_000);
        assert_eq!(output, [1.0]);
    }

    #[test]
    fn test_muted_mix_is_silent_but_advances() {
        let mut mixer = Mixer::new();
        mixer.master_volume = 1.0;
        mixer.muted = true;
        mixer.voices.push(voice(&mono(vec![0.5, 0.5, 0.7, 0.7], 48_000), false));

        let mut output = [0.0f32; 2];
        mixer.mix(&mut output, 1, 48_000);
        assert_eq!(output, [0.0, 0.0]);

        // Unmuting resumes where playback left off
        mixer.muted = false;
        mixer.mix(&mut output, 1, 48_000);
        assert_eq!(output, [0.7, 0.7]);
    }

    #[test]
    fn test_master_volume_scales() {
        let mut mixer = Mixer::new();
        mixer.master_volume = 0.5;
        mixer.voices.push(voice(&mono(vec![0.8], 48_000), false));

        let mut output = [0.0f32; 1];
        mixer.mix(&mut output, 1, 48_000);
        assert!((output[0] - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_empty_sound_is_dropped() {
        let mut mixer = Mixer::new();
        mixer.voices.push(voice(&mono(vec![], 48_000), true));

        let mut output = [0.0f32; 2];
        mixer.mix(&mut output, 1, 48_000);
        assert!(mixer.voices.is_empty());
    }
}
