/// Chorus and flanger: the same two-line modulated delay, differing only
/// in parameter defaults and the delay-line bound.

use serde::{Deserialize, Serialize};

use crate::device::Device;
use crate::effects::EffectKind;
use crate::panning::{calc_angle_coeffs, compute_panning_gains};
use crate::{
    next_power_of_2, SampleLane, MAX_AMBI_COEFFS, MAX_EFFECT_CHANNELS, MAX_OUTPUT_CHANNELS,
    SILENCE_THRESHOLD_GAIN,
};

use std::f32::consts::{FRAC_PI_2, TAU};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChorusWaveform {
    Sinusoid,
    Triangle,
}

/// Parameters shared by the chorus and flanger effects.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ChorusProps {
    pub waveform: ChorusWaveform,
    /// LFO phase offset between the two lines, degrees in [-180, 180].
    pub phase: i32,
    /// LFO rate in Hz, [0, 10].
    pub rate: f32,
    /// LFO depth as a fraction of the base delay, [0, 1].
    pub depth: f32,
    /// Feedback into the delay lines, [-1, 1].
    pub feedback: f32,
    /// Base delay in seconds; at most `max_delay` for the effect kind.
    pub delay: f32,
}

impl ChorusProps {
    pub const MIN_PHASE: i32 = -180;
    pub const MAX_PHASE: i32 = 180;
    pub const MIN_RATE: f32 = 0.0;
    pub const MAX_RATE: f32 = 10.0;
    pub const MIN_DEPTH: f32 = 0.0;
    pub const MAX_DEPTH: f32 = 1.0;
    pub const MIN_FEEDBACK: f32 = -1.0;
    pub const MAX_FEEDBACK: f32 = 1.0;
    pub const MIN_DELAY: f32 = 0.0;

    pub const CHORUS_MAX_DELAY: f32 = 0.016;
    pub const FLANGER_MAX_DELAY: f32 = 0.004;

    pub fn chorus_defaults() -> ChorusProps {
        ChorusProps {
            waveform: ChorusWaveform::Triangle,
            phase: 90,
            rate: 1.1,
            depth: 0.1,
            feedback: 0.25,
            delay: 0.016,
        }
    }

    pub fn flanger_defaults() -> ChorusProps {
        ChorusProps {
            waveform: ChorusWaveform::Triangle,
            phase: 0,
            rate: 0.27,
            depth: 1.0,
            feedback: -0.5,
            delay: 0.002,
        }
    }

    pub(crate) fn normalize(&mut self, max_delay: f32) {
        self.phase = self.phase.clamp(Self::MIN_PHASE, Self::MAX_PHASE);
        self.rate = self.rate.clamp(Self::MIN_RATE, Self::MAX_RATE);
        self.depth = self.depth.clamp(Self::MIN_DEPTH, Self::MAX_DEPTH);
        self.feedback = self.feedback.clamp(Self::MIN_FEEDBACK, Self::MAX_FEEDBACK);
        self.delay = self.delay.clamp(Self::MIN_DELAY, max_delay);
    }
}

pub(crate) struct ChorusState {
    kind: EffectKind,
    buffers: [Vec<f32>; 2],
    buffer_length: usize,
    offset: usize,
    lfo_range: usize,
    lfo_scale: f32,
    lfo_disp: usize,

    // Gains for the left and right sides
    gains: [[f32; MAX_OUTPUT_CHANNELS]; 2],

    max_delay: f32,
    waveform: ChorusWaveform,
    delay: i32,
    depth: f32,
    feedback: f32,
}

fn triangle_delays(
    delays: &mut [i32],
    mut offset: usize,
    lfo_range: usize,
    lfo_scale: f32,
    depth: f32,
    delay: i32,
) {
    for out in delays.iter_mut() {
        *out = ((1.0 - (2.0 - lfo_scale * offset as f32).abs()) * depth).round() as i32 + delay;
        offset = (offset + 1) % lfo_range;
    }
}

fn sinusoid_delays(
    delays: &mut [i32],
    mut offset: usize,
    lfo_range: usize,
    lfo_scale: f32,
    depth: f32,
    delay: i32,
) {
    for out in delays.iter_mut() {
        *out = ((lfo_scale * offset as f32).sin() * depth).round() as i32 + delay;
        offset = (offset + 1) % lfo_range;
    }
}

impl ChorusState {
    pub fn new(kind: EffectKind, device: &Device) -> ChorusState {
        let max_delay = if kind == EffectKind::Flanger {
            ChorusProps::FLANGER_MAX_DELAY
        } else {
            ChorusProps::CHORUS_MAX_DELAY
        };

        let mut state = ChorusState {
            kind,
            buffers: [Vec::new(), Vec::new()],
            buffer_length: 0,
            offset: 0,
            lfo_range: 1,
            lfo_scale: 0.0,
            lfo_disp: 0,
            gains: [[0.0; MAX_OUTPUT_CHANNELS]; 2],
            max_delay,
            waveform: ChorusWaveform::Triangle,
            delay: 0,
            depth: 0.0,
            feedback: 0.0,
        };
        state.update_device(device);
        state
    }

    pub fn kind(&self) -> EffectKind {
        self.kind
    }

    pub fn update_device(&mut self, device: &Device) {
        let max_len =
            next_power_of_2((self.max_delay * 2.0 * device.frequency as f32) as u32 + 1) as usize;

        if max_len != self.buffer_length {
            for buffer in &mut self.buffers {
                buffer.resize(max_len, 0.0);
            }
            self.buffer_length = max_len;
        }
        for buffer in &mut self.buffers {
            buffer.fill(0.0);
        }
    }

    pub fn update(&mut self, device: &Device, props: &ChorusProps) {
        let frequency = device.frequency as f32;

        self.waveform = props.waveform;
        self.feedback = props.feedback;
        self.delay = (props.delay * frequency).round() as i32;
        // The LFO depth is scaled to be relative to the sample delay.
        self.depth = props.depth * self.delay as f32;

        // Gains for the left and right sides
        let mut coeffs = [0.0; MAX_AMBI_COEFFS];
        calc_angle_coeffs(-FRAC_PI_2, 0.0, 0.0, &mut coeffs);
        compute_panning_gains(&device.dry, &coeffs, 1.0, &mut self.gains[0]);
        calc_angle_coeffs(FRAC_PI_2, 0.0, 0.0, &mut coeffs);
        compute_panning_gains(&device.dry, &coeffs, 1.0, &mut self.gains[1]);

        if props.rate > 0.0 {
            self.lfo_range = (frequency / props.rate + 0.5) as usize;
            self.lfo_scale = match self.waveform {
                ChorusWaveform::Triangle => 4.0 / self.lfo_range as f32,
                ChorusWaveform::Sinusoid => TAU / self.lfo_range as f32,
            };

            // LFO phase displacement between the two lines.
            let phase = props.phase;
            self.lfo_disp = if phase >= 0 {
                (self.lfo_range as f32 * (phase as f32 / 360.0)) as usize
            } else {
                (self.lfo_range as f32 * ((360 + phase) as f32 / 360.0)) as usize
            };
        } else {
            self.lfo_scale = 0.0;
            self.lfo_range = 1;
            self.lfo_disp = 0;
        }
    }

    pub fn process(
        &mut self,
        sample_count: usize,
        src: &[SampleLane; MAX_EFFECT_CHANNELS],
        dst: &mut [SampleLane],
        channel_count: usize,
    ) {
        let buf_mask = self.buffer_length - 1;

        let mut base = 0;
        while base < sample_count {
            let todo = 128.min(sample_count - base);
            let mut temps = [[0.0f32; 2]; 128];
            let mut mod_delays = [[0i32; 128]; 2];

            let delays_fn = match self.waveform {
                ChorusWaveform::Triangle => triangle_delays,
                ChorusWaveform::Sinusoid => sinusoid_delays,
            };
            delays_fn(
                &mut mod_delays[0][..todo],
                self.offset % self.lfo_range,
                self.lfo_range,
                self.lfo_scale,
                self.depth,
                self.delay,
            );
            delays_fn(
                &mut mod_delays[1][..todo],
                (self.offset + self.lfo_disp) % self.lfo_range,
                self.lfo_range,
                self.lfo_scale,
                self.depth,
                self.delay,
            );

            for i in 0..todo {
                let input = src[0][base + i];

                self.buffers[0][self.offset & buf_mask] = input;
                let left_tap = self.buffers[0]
                    [self.offset.wrapping_sub(mod_delays[0][i] as usize) & buf_mask]
                    * self.feedback;
                temps[i][0] = left_tap;
                self.buffers[0][self.offset & buf_mask] += left_tap;

                self.buffers[1][self.offset & buf_mask] = input;
                let right_tap = self.buffers[1]
                    [self.offset.wrapping_sub(mod_delays[1][i] as usize) & buf_mask]
                    * self.feedback;
                temps[i][1] = right_tap;
                self.buffers[1][self.offset & buf_mask] += right_tap;

                self.offset = self.offset.wrapping_add(1);
            }

            for (c, lane) in dst.iter_mut().enumerate().take(channel_count) {
                for side in 0..2 {
                    let channel_gain = self.gains[side][c];
                    if channel_gain.abs() <= SILENCE_THRESHOLD_GAIN {
                        continue;
                    }
                    for i in 0..todo {
                        lane[base + i] += temps[i][side] * channel_gain;
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
    use crate::ChannelFormat;
    use crate::MAX_UPDATE_SAMPLES;

    fn stereo_device() -> Device {
        Device::new(ChannelFormat::Stereo, 44_100)
    }

    #[test]
    fn test_buffer_length_is_power_of_two() {
        let device = stereo_device();
        let chorus = ChorusState::new(EffectKind::Chorus, &device);
        assert!(chorus.buffer_length.is_power_of_two());
        // Must cover twice the maximum delay.
        assert!(chorus.buffer_length as f32 >= ChorusProps::CHORUS_MAX_DELAY * 2.0 * 44_100.0);

        let flanger = ChorusState::new(EffectKind::Flanger, &device);
        assert!(flanger.buffer_length < chorus.buffer_length);
    }

    #[test]
    fn test_triangle_delays_stay_in_line() {
        let device = stereo_device();
        let mut state = ChorusState::new(EffectKind::Chorus, &device);
        let mut props = ChorusProps::chorus_defaults();
        props.normalize(ChorusProps::CHORUS_MAX_DELAY);
        state.update(&device, &props);

        let mut delays = [0i32; 128];
        triangle_delays(
            &mut delays,
            0,
            state.lfo_range,
            state.lfo_scale,
            state.depth,
            state.delay,
        );
        for &d in &delays {
            assert!(d >= 0);
            assert!((d as usize) < state.buffer_length);
        }
    }

    #[test]
    fn test_silent_input_stays_silent() {
        let device = stereo_device();
        let mut state = ChorusState::new(EffectKind::Chorus, &device);
        state.update(&device, &ChorusProps::chorus_defaults());

        let src = [[0.0; MAX_UPDATE_SAMPLES]; MAX_EFFECT_CHANNELS];
        let mut dst = vec![[0.0; MAX_UPDATE_SAMPLES]; 2];
        state.process(MAX_UPDATE_SAMPLES, &src, &mut dst, 2);

        assert!(dst.iter().all(|lane| lane.iter().all(|&s| s == 0.0)));
    }

    #[test]
    fn test_impulse_emerges_after_base_delay() {
        let device = stereo_device();
        let mut state = ChorusState::new(EffectKind::Chorus, &device);
        let props = ChorusProps {
            waveform: ChorusWaveform::Triangle,
            phase: 0,
            rate: 0.0,
            depth: 0.0,
            feedback: 0.5,
            delay: 0.002,
        };
        state.update(&device, &props);
        let delay_samples = (0.002f32 * 44_100.0).round() as usize;

        let mut src = [[0.0; MAX_UPDATE_SAMPLES]; MAX_EFFECT_CHANNELS];
        src[0][0] = 1.0;
        let mut dst = vec![[0.0; MAX_UPDATE_SAMPLES]; 2];
        state.process(MAX_UPDATE_SAMPLES, &src, &mut dst, 2);

        // Nothing before the modulated tap lands.
        for i in 0..delay_samples {
            assert_eq!(dst[0][i], 0.0, "early output at {i}");
        }
        assert!(dst[0][delay_samples] != 0.0 || dst[1][delay_samples] != 0.0);
    }
}
