/// Ring modulator: multiplies the B-format signal by a carrier waveform,
/// with a one-pole high-pass ahead of the multiply.

use serde::{Deserialize, Serialize};

use crate::device::Device;
use crate::filter::BiquadFilter;
use crate::panning::compute_first_order_gains;
use crate::{
    SampleLane, MAX_EFFECT_CHANNELS, MAX_OUTPUT_CHANNELS, SILENCE_THRESHOLD_GAIN,
};

use std::f32::consts::{PI, TAU};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModulatorWaveform {
    Sinusoid,
    Sawtooth,
    Square,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ModulatorProps {
    /// Carrier frequency in Hz, [0, 8000].
    pub frequency: f32,
    /// High-pass cutoff in Hz, [0, 24000].
    pub high_pass_cutoff: f32,
    pub waveform: ModulatorWaveform,
}

impl ModulatorProps {
    pub const MIN_FREQUENCY: f32 = 0.0;
    pub const MAX_FREQUENCY: f32 = 8_000.0;
    pub const MIN_HIGH_PASS_CUTOFF: f32 = 0.0;
    pub const MAX_HIGH_PASS_CUTOFF: f32 = 24_000.0;

    pub(crate) fn normalize(&mut self) {
        self.frequency = self.frequency.clamp(Self::MIN_FREQUENCY, Self::MAX_FREQUENCY);
        self.high_pass_cutoff = self
            .high_pass_cutoff
            .clamp(Self::MIN_HIGH_PASS_CUTOFF, Self::MAX_HIGH_PASS_CUTOFF);
    }
}

impl Default for ModulatorProps {
    fn default() -> ModulatorProps {
        ModulatorProps {
            frequency: 440.0,
            high_pass_cutoff: 800.0,
            waveform: ModulatorWaveform::Sinusoid,
        }
    }
}

// The carrier phase runs in Q8.24 fixed point.
const WAVEFORM_FRAC_BITS: u32 = 24;
const WAVEFORM_FRAC_ONE: u32 = 1 << WAVEFORM_FRAC_BITS;
const WAVEFORM_FRAC_MASK: u32 = WAVEFORM_FRAC_ONE - 1;

fn sin_sample(index: u32) -> f32 {
    (index as f32 * (TAU / WAVEFORM_FRAC_ONE as f32) - PI).sin() * 0.5 + 0.5
}

fn saw_sample(index: u32) -> f32 {
    index as f32 / WAVEFORM_FRAC_ONE as f32
}

fn square_sample(index: u32) -> f32 {
    ((index >> (WAVEFORM_FRAC_BITS - 1)) & 1) as f32
}

const IDENTITY: [[f32; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

pub(crate) struct ModulatorState {
    waveform: ModulatorWaveform,
    index: u32,
    step: u32,

    gains: [[f32; MAX_OUTPUT_CHANNELS]; MAX_EFFECT_CHANNELS],
    filters: [BiquadFilter; MAX_EFFECT_CHANNELS],
}

impl ModulatorState {
    pub fn new() -> ModulatorState {
        ModulatorState {
            waveform: ModulatorWaveform::Sinusoid,
            index: 0,
            step: 1,
            gains: [[0.0; MAX_OUTPUT_CHANNELS]; MAX_EFFECT_CHANNELS],
            filters: [BiquadFilter::default(); MAX_EFFECT_CHANNELS],
        }
    }

    pub fn update(&mut self, device: &Device, props: &ModulatorProps) {
        self.waveform = props.waveform;

        let step =
            (props.frequency * WAVEFORM_FRAC_ONE as f32 / device.frequency as f32) as u32;
        // A zero step would park the carrier at DC.
        self.step = step.max(1);

        // Custom one-pole coefficients matching the legacy modulator
        // high-pass instead of a low-shelf.
        let cw = (TAU * props.high_pass_cutoff / device.frequency as f32).cos();
        let a = (2.0 - cw) - ((2.0 - cw).powi(2) - 1.0).sqrt();
        for filter in &mut self.filters {
            filter.set_coefficients(a, -a, 0.0, -a, 0.0);
        }

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
        let carrier = match self.waveform {
            ModulatorWaveform::Sinusoid => sin_sample,
            ModulatorWaveform::Sawtooth => saw_sample,
            ModulatorWaveform::Square => square_sample,
        };

        let mut base = 0;
        while base < sample_count {
            let todo = 128.min(sample_count - base);
            let mut filtered = [0.0f32; 128];
            let mut modulated = [0.0f32; 128];

            for j in 0..MAX_EFFECT_CHANNELS {
                self.filters[j].process(&mut filtered[..todo], &src[j][base..base + todo]);

                // Each lane restarts from the same carrier phase; the
                // shared index advances once per sample after all lanes.
                let mut index = self.index;
                for i in 0..todo {
                    index = (index + self.step) & WAVEFORM_FRAC_MASK;
                    modulated[i] = filtered[i] * carrier(index);
                }

                for (k, lane) in dst.iter_mut().enumerate().take(channel_count) {
                    let gain = self.gains[j][k];
                    if gain.abs() <= SILENCE_THRESHOLD_GAIN {
                        continue;
                    }
                    for i in 0..todo {
                        lane[base + i] += gain * modulated[i];
                    }
                }
            }

            for _ in 0..todo {
                self.index = (self.index + self.step) & WAVEFORM_FRAC_MASK;
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
    fn test_step_never_zero() {
        let device = Device::new(ChannelFormat::Mono, 44_100);
        let mut state = ModulatorState::new();
        state.update(
            &device,
            &ModulatorProps {
                frequency: 0.0,
                ..ModulatorProps::default()
            },
        );
        assert_eq!(state.step, 1);
    }

    #[test]
    fn test_waveform_ranges() {
        for index in [0u32, 1 << 22, 1 << 23, (1 << 24) - 1] {
            let s = sin_sample(index);
            assert!((0.0..=1.0).contains(&s));
            let s = saw_sample(index);
            assert!((0.0..=1.0).contains(&s));
            let s = square_sample(index);
            assert!(s == 0.0 || s == 1.0);
        }
        // Square flips at half range.
        assert_eq!(square_sample(0), 0.0);
        assert_eq!(square_sample(1 << 23), 1.0);
    }

    #[test]
    fn test_square_modulation_gates_signal() {
        let device = Device::new(ChannelFormat::Mono, 44_100);
        let mut state = ModulatorState::new();
        state.update(
            &device,
            &ModulatorProps {
                frequency: 100.0,
                high_pass_cutoff: 0.0,
                waveform: ModulatorWaveform::Square,
            },
        );

        let mut src = [[0.0; MAX_UPDATE_SAMPLES]; MAX_EFFECT_CHANNELS];
        src[0] = [1.0; MAX_UPDATE_SAMPLES];
        let mut dst = vec![[0.0; MAX_UPDATE_SAMPLES]; 1];
        state.process(MAX_UPDATE_SAMPLES, &src, &mut dst, 1);

        // With a zero cutoff the high-pass passes DC through its pole at
        // 1; the square carrier then gates the signal on and off.
        let on = dst[0].iter().filter(|&&s| s.abs() > 1e-3).count();
        assert!(on > 0);
        assert!(on < MAX_UPDATE_SAMPLES);
    }

    #[test]
    fn test_index_advances_per_sample() {
        let device = Device::new(ChannelFormat::Mono, 44_100);
        let mut state = ModulatorState::new();
        state.update(&device, &ModulatorProps::default());
        let step = state.step;

        let src = [[0.0; MAX_UPDATE_SAMPLES]; MAX_EFFECT_CHANNELS];
        let mut dst = vec![[0.0; MAX_UPDATE_SAMPLES]; 1];
        state.process(100, &src, &mut dst, 1);
        assert_eq!(state.index, (step * 100) & WAVEFORM_FRAC_MASK);
    }
}
