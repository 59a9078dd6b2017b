/// Compressor: walks a gain-control value toward a coarse amplitude
/// estimate of the 4-lane B-format signal and applies its inverse.

use serde::{Deserialize, Serialize};

use crate::device::Device;
use crate::panning::compute_first_order_gains;
use crate::{
    SampleLane, MAX_EFFECT_CHANNELS, MAX_OUTPUT_CHANNELS, SILENCE_THRESHOLD_GAIN,
};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressorProps {
    pub on_off: bool,
}

impl Default for CompressorProps {
    fn default() -> CompressorProps {
        CompressorProps { on_off: true }
    }
}

const IDENTITY: [[f32; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

pub(crate) struct CompressorState {
    gains: [[f32; MAX_OUTPUT_CHANNELS]; MAX_EFFECT_CHANNELS],
    enabled: bool,
    attack_rate: f32,
    release_rate: f32,
    gain_control: f32,
}

impl CompressorState {
    pub fn new(device: &Device) -> CompressorState {
        let mut state = CompressorState {
            gains: [[0.0; MAX_OUTPUT_CHANNELS]; MAX_EFFECT_CHANNELS],
            enabled: true,
            attack_rate: 0.0,
            release_rate: 0.0,
            gain_control: 1.0,
        };
        state.update_device(device);
        state
    }

    pub fn update_device(&mut self, device: &Device) {
        let attack_time = device.frequency as f32 * 0.2; // 200ms Attack
        let release_time = device.frequency as f32 * 0.4; // 400ms Release

        self.attack_rate = 1.0 / attack_time;
        self.release_rate = 1.0 / release_time;
    }

    pub fn update(&mut self, device: &Device, props: &CompressorProps) {
        self.enabled = props.on_off;

        for (i, row) in IDENTITY.iter().enumerate() {
            compute_first_order_gains(&device.foa, row, 1.0, &mut self.gains[i]);
        }
    }

    pub fn process(
        &mut self,
        sample_count: usize,
        src: &[SampleLane; MAX_EFFECT_CHANNELS],
        dst: &mut [SampleLane],
        channel_count: usize,
    ) {
        let mut base = 0;
        while base < sample_count {
            let todo = 64.min(sample_count - base);
            let mut temps = [[0.0f32; 4]; 64];

            // Load samples into the temp buffer first.
            for j in 0..4 {
                for i in 0..todo {
                    temps[i][j] = src[j][i + base];
                }
            }

            for frame in temps.iter_mut().take(todo) {
                // Roughly calculate the maximum amplitude from the
                // 4-channel signal, and attack or release the gain control
                // to reach it. When disabled, the amplitude is forced to 1
                // so gain changes stay smooth across on/off switches.
                let amplitude = if self.enabled {
                    let w = frame[0].abs();
                    (w + frame[1].abs())
                        .max(w + frame[2].abs())
                        .max(w + frame[3].abs())
                } else {
                    1.0
                };

                if amplitude > self.gain_control {
                    self.gain_control = (self.gain_control + self.attack_rate).min(amplitude);
                } else if amplitude < self.gain_control {
                    self.gain_control = (self.gain_control - self.release_rate).max(amplitude);
                }

                // Apply the inverse of the gain control to normalize/
                // compress the volume.
                let output = 1.0 / self.gain_control.clamp(0.5, 2.0);
                for sample in frame.iter_mut() {
                    *sample *= output;
                }
            }

            // Now mix to the output.
            for j in 0..4 {
                for (k, lane) in dst.iter_mut().enumerate().take(channel_count) {
                    let channel_gain = self.gains[j][k];
                    if channel_gain.abs() <= SILENCE_THRESHOLD_GAIN {
                        continue;
                    }
                    for i in 0..todo {
                        lane[base + i] += channel_gain * temps[i][j];
                    }
                }
            }

            base += todo;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChannelFormat, MAX_UPDATE_SAMPLES};

    #[test]
    fn test_gain_control_converges_to_amplitude() {
        let device = Device::new(ChannelFormat::Mono, 44_100);
        let mut state = CompressorState::new(&device);
        state.update(&device, &CompressorProps::default());

        // Constant full-scale input on all four lanes has a coarse
        // amplitude of 2.0 (|w| + |x|).
        let src = [[1.0; MAX_UPDATE_SAMPLES]; MAX_EFFECT_CHANNELS];
        let mut dst = vec![[0.0; MAX_UPDATE_SAMPLES]; 1];

        // 200ms attack at 44.1kHz needs ~8820 samples to walk from 1 to 2.
        for _ in 0..64 {
            dst[0].fill(0.0);
            state.process(MAX_UPDATE_SAMPLES, &src, &mut dst, 1);
        }
        assert!((state.gain_control - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_disabled_walks_toward_unity() {
        let device = Device::new(ChannelFormat::Mono, 44_100);
        let mut state = CompressorState::new(&device);
        state.update(&device, &CompressorProps { on_off: false });
        state.gain_control = 1.9;

        let src = [[1.0; MAX_UPDATE_SAMPLES]; MAX_EFFECT_CHANNELS];
        let mut dst = vec![[0.0; MAX_UPDATE_SAMPLES]; 1];
        for _ in 0..128 {
            dst[0].fill(0.0);
            state.process(MAX_UPDATE_SAMPLES, &src, &mut dst, 1);
        }
        assert!((state.gain_control - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_output_is_attenuated_copy() {
        let device = Device::new(ChannelFormat::Mono, 44_100);
        let mut state = CompressorState::new(&device);
        state.update(&device, &CompressorProps::default());

        let mut src = [[0.0; MAX_UPDATE_SAMPLES]; MAX_EFFECT_CHANNELS];
        src[0] = [1.0; MAX_UPDATE_SAMPLES];
        let mut dst = vec![[0.0; MAX_UPDATE_SAMPLES]; 1];
        state.process(MAX_UPDATE_SAMPLES, &src, &mut dst, 1);

        // Mono decoder has W-only gain; output is scaled W input and never
        // boosted beyond the 1/clamp(.., 0.5, 2.0) window.
        assert!(dst[0][0] > 0.0);
        assert!(dst[0][0] <= 2.0);
    }
}
