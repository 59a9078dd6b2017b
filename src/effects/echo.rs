/// Echo: two delay taps panned to opposite sides, with a high-shelf
/// damping filter in the feedback path.

use serde::{Deserialize, Serialize};

use crate::device::Device;
use crate::filter::{calc_rcp_q_from_slope, BiquadFilter, FilterType};
use crate::panning::{calc_angle_coeffs, compute_panning_gains};
use crate::source::SendProps;
use crate::{
    next_power_of_2, SampleLane, MAX_AMBI_COEFFS, MAX_EFFECT_CHANNELS, MAX_OUTPUT_CHANNELS,
    SILENCE_THRESHOLD_GAIN,
};

use std::f32::consts::FRAC_PI_2;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct EchoProps {
    /// First-tap delay in seconds, [0, 0.207].
    pub delay: f32,
    /// Additional second-tap delay in seconds, [0, 0.404].
    pub lr_delay: f32,
    /// High-frequency damping of the feedback path, [0, 0.99].
    pub damping: f32,
    /// Feedback amount, [0, 1].
    pub feedback: f32,
    /// Left/right sense and width, [-1, 1]; 0 is omni.
    pub spread: f32,
}

impl EchoProps {
    pub const MIN_DELAY: f32 = 0.0;
    pub const MAX_DELAY: f32 = 0.207;
    pub const MIN_LR_DELAY: f32 = 0.0;
    pub const MAX_LR_DELAY: f32 = 0.404;
    pub const MIN_DAMPING: f32 = 0.0;
    pub const MAX_DAMPING: f32 = 0.99;
    pub const MIN_FEEDBACK: f32 = 0.0;
    pub const MAX_FEEDBACK: f32 = 1.0;
    pub const MIN_SPREAD: f32 = -1.0;
    pub const MAX_SPREAD: f32 = 1.0;

    pub(crate) fn normalize(&mut self) {
        self.delay = self.delay.clamp(Self::MIN_DELAY, Self::MAX_DELAY);
        self.lr_delay = self.lr_delay.clamp(Self::MIN_LR_DELAY, Self::MAX_LR_DELAY);
        self.damping = self.damping.clamp(Self::MIN_DAMPING, Self::MAX_DAMPING);
        self.feedback = self.feedback.clamp(Self::MIN_FEEDBACK, Self::MAX_FEEDBACK);
        self.spread = self.spread.clamp(Self::MIN_SPREAD, Self::MAX_SPREAD);
    }
}

impl Default for EchoProps {
    fn default() -> EchoProps {
        EchoProps {
            delay: 0.1,
            lr_delay: 0.1,
            damping: 0.5,
            feedback: 0.5,
            spread: -1.0,
        }
    }
}

pub(crate) struct EchoState {
    sample_buffer: Vec<f32>,
    buffer_length: usize,

    // The echo is two taps; each delay is the number of samples behind the
    // current write offset.
    tap_delays: [usize; 2],
    offset: usize,

    // Panning gains for the two taps
    gains: [[f32; MAX_OUTPUT_CHANNELS]; 2],

    feed_gain: f32,
    filter: BiquadFilter,
}

impl EchoState {
    pub fn new(device: &Device) -> EchoState {
        let mut state = EchoState {
            sample_buffer: Vec::new(),
            buffer_length: 0,
            tap_delays: [0; 2],
            offset: 0,
            gains: [[0.0; MAX_OUTPUT_CHANNELS]; 2],
            feed_gain: 0.0,
            filter: BiquadFilter::default(),
        };
        state.update_device(device);
        state
    }

    pub fn update_device(&mut self, device: &Device) {
        // Use the next power of 2 for the buffer length, so the tap offsets
        // can be wrapped using a mask instead of a modulo.
        let max_len = (EchoProps::MAX_DELAY * device.frequency as f32) as usize
            + (EchoProps::MAX_LR_DELAY * device.frequency as f32) as usize
            + 2;
        let max_len = next_power_of_2(max_len as u32) as usize;

        if max_len != self.buffer_length {
            self.sample_buffer.resize(max_len, 0.0);
            self.buffer_length = max_len;
        }
        self.sample_buffer.fill(0.0);
    }

    pub fn update(&mut self, device: &Device, props: &EchoProps) {
        let frequency = device.frequency as f32;

        self.tap_delays[0] = (props.delay * frequency) as usize + 1;
        self.tap_delays[1] = self.tap_delays[0] + (props.lr_delay * frequency) as usize;

        let lrpan = if props.spread < 0.0 { -1.0 } else { 1.0 };
        // Convert echo spread (where 0 = omni, +/-1 = directional) to
        // coverage spread (where 0 = point, tau = omni).
        let spread = (1.0 - props.spread.abs()).asin() * 4.0;

        self.feed_gain = props.feedback;

        let damping_gain = (1.0 - props.damping).max(0.0625); // Limit -24dB
        self.filter.set_params(
            FilterType::HighShelf,
            damping_gain,
            SendProps::HF_FREQUENCY_REFERENCE / frequency,
            calc_rcp_q_from_slope(damping_gain, 1.0),
        );

        let mut coeffs = [0.0; MAX_AMBI_COEFFS];

        // First tap panning
        calc_angle_coeffs(-FRAC_PI_2 * lrpan, 0.0, spread, &mut coeffs);
        compute_panning_gains(&device.dry, &coeffs, 1.0, &mut self.gains[0]);

        // Second tap panning
        calc_angle_coeffs(FRAC_PI_2 * lrpan, 0.0, spread, &mut coeffs);
        compute_panning_gains(&device.dry, &coeffs, 1.0, &mut self.gains[1]);
    }

    pub fn process(
        &mut self,
        sample_count: usize,
        src: &[SampleLane; MAX_EFFECT_CHANNELS],
        dst: &mut [SampleLane],
        channel_count: usize,
    ) {
        let mask = self.buffer_length - 1;
        let [tap1, tap2] = self.tap_delays;

        let mut base = 0;
        while base < sample_count {
            let todo = 128.min(sample_count - base);
            let mut temps = [[0.0f32; 2]; 128];

            for (i, taps) in temps.iter_mut().enumerate().take(todo) {
                taps[0] = self.sample_buffer[self.offset.wrapping_sub(tap1) & mask];
                taps[1] = self.sample_buffer[self.offset.wrapping_sub(tap2) & mask];

                // Apply damping and feedback gain to the second tap, and
                // mix in the new sample.
                let damped = self.filter.process_sample(taps[1] + src[0][i + base]);
                self.sample_buffer[self.offset & mask] = damped * self.feed_gain;

                self.offset = self.offset.wrapping_add(1);
            }

            for (k, lane) in dst.iter_mut().enumerate().take(channel_count) {
                for tap in 0..2 {
                    let channel_gain = self.gains[tap][k];
                    if channel_gain.abs() <= SILENCE_THRESHOLD_GAIN {
                        continue;
                    }
                    for i in 0..todo {
                        lane[i + base] += temps[i][tap] * channel_gain;
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

    fn run_blocks(
        state: &mut EchoState,
        src: &mut [SampleLane; MAX_EFFECT_CHANNELS],
        channel_count: usize,
        blocks: usize,
    ) -> Vec<Vec<f32>> {
        let mut collected = vec![Vec::new(); channel_count];
        for block in 0..blocks {
            let mut dst = vec![[0.0; MAX_UPDATE_SAMPLES]; channel_count];
            state.process(MAX_UPDATE_SAMPLES, src, &mut dst, channel_count);
            for (c, lane) in dst.iter().enumerate() {
                collected[c].extend_from_slice(lane);
            }
            if block == 0 {
                src[0].fill(0.0);
            }
        }
        collected
    }

    #[test]
    fn test_buffer_covers_both_taps() {
        let device = Device::new(ChannelFormat::Stereo, 44_100);
        let mut state = EchoState::new(&device);
        assert!(state.buffer_length.is_power_of_two());

        let props = EchoProps {
            delay: EchoProps::MAX_DELAY,
            lr_delay: EchoProps::MAX_LR_DELAY,
            ..EchoProps::default()
        };
        state.update(&device, &props);
        assert!(state.tap_delays[1] < state.buffer_length);
    }

    #[test]
    fn test_tap_timing_matches_delays() {
        // Spread 0 selects the positive left/right sense: tap 1 left,
        // tap 2 right.
        let device = Device::new(ChannelFormat::Stereo, 44_100);
        let mut state = EchoState::new(&device);
        let props = EchoProps {
            delay: 0.1,
            lr_delay: 0.1,
            damping: 0.0,
            feedback: 0.5,
            spread: 0.0,
        };
        state.update(&device, &props);

        let tap1 = (0.1f32 * 44_100.0) as usize + 1; // 4411
        let tap2 = tap1 + (0.1f32 * 44_100.0) as usize; // 8821

        let mut src = [[0.0; MAX_UPDATE_SAMPLES]; MAX_EFFECT_CHANNELS];
        src[0][0] = 1.0;
        let out = run_blocks(&mut state, &mut src, 2, 40);

        let first_nonzero = out[0]
            .iter()
            .zip(out[1].iter())
            .position(|(&l, &r)| l != 0.0 || r != 0.0)
            .unwrap();
        assert_eq!(first_nonzero, tap1);

        // Tap 2 carries the feedback-scaled impulse.
        assert!(out[0][tap2].abs() > 0.0 || out[1][tap2].abs() > 0.0);
        // Before tap 1 everything is silent.
        assert!(out[0][..tap1].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_feedback_decays() {
        let device = Device::new(ChannelFormat::Mono, 44_100);
        let mut state = EchoState::new(&device);
        let props = EchoProps {
            delay: 0.01,
            lr_delay: 0.01,
            damping: 0.0,
            feedback: 0.5,
            spread: -1.0,
        };
        state.update(&device, &props);

        let mut src = [[0.0; MAX_UPDATE_SAMPLES]; MAX_EFFECT_CHANNELS];
        src[0][0] = 1.0;
        let out = run_blocks(&mut state, &mut src, 1, 80);

        // Energy in the late half of the tail is lower than the early half.
        let mid = out[0].len() / 2;
        let early: f32 = out[0][..mid].iter().map(|s| s * s).sum();
        let late: f32 = out[0][mid..].iter().map(|s| s * s).sum();
        assert!(early > late);
        assert!(early > 0.0);
    }
}
