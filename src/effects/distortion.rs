/// Distortion: a 4x oversampled waveshaper between a low-pass and a
/// band-pass filter. Oversampling keeps the IIR filters stable at the high
/// cutoffs the effect asks for and avoids aliasing from the shaper.

use serde::{Deserialize, Serialize};

use crate::device::Device;
use crate::filter::{calc_rcp_q_from_bandwidth, BiquadFilter, FilterType};
use crate::panning::compute_ambient_gains;
use crate::{
    SampleLane, MAX_EFFECT_CHANNELS, MAX_OUTPUT_CHANNELS, SILENCE_THRESHOLD_GAIN,
};

use std::f32::consts::FRAC_PI_2;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct DistortionProps {
    /// Waveshaper sharpness, [0, 1].
    pub edge: f32,
    /// Output attenuation, [0.01, 1].
    pub gain: f32,
    /// Pre-shaper low-pass cutoff in Hz, [80, 24000].
    pub lowpass_cutoff: f32,
    /// Post-shaper band-pass center in Hz, [80, 24000].
    pub eq_center: f32,
    /// Post-shaper band-pass width in Hz, [80, 24000].
    pub eq_bandwidth: f32,
}

impl DistortionProps {
    pub const MIN_EDGE: f32 = 0.0;
    pub const MAX_EDGE: f32 = 1.0;
    pub const MIN_GAIN: f32 = 0.01;
    pub const MAX_GAIN: f32 = 1.0;
    pub const MIN_LOWPASS_CUTOFF: f32 = 80.0;
    pub const MAX_LOWPASS_CUTOFF: f32 = 24_000.0;
    pub const MIN_EQ_CENTER: f32 = 80.0;
    pub const MAX_EQ_CENTER: f32 = 24_000.0;
    pub const MIN_EQ_BANDWIDTH: f32 = 80.0;
    pub const MAX_EQ_BANDWIDTH: f32 = 24_000.0;

    pub(crate) fn normalize(&mut self) {
        self.edge = self.edge.clamp(Self::MIN_EDGE, Self::MAX_EDGE);
        self.gain = self.gain.clamp(Self::MIN_GAIN, Self::MAX_GAIN);
        self.lowpass_cutoff = self
            .lowpass_cutoff
            .clamp(Self::MIN_LOWPASS_CUTOFF, Self::MAX_LOWPASS_CUTOFF);
        self.eq_center = self.eq_center.clamp(Self::MIN_EQ_CENTER, Self::MAX_EQ_CENTER);
        self.eq_bandwidth = self
            .eq_bandwidth
            .clamp(Self::MIN_EQ_BANDWIDTH, Self::MAX_EQ_BANDWIDTH);
    }
}

impl Default for DistortionProps {
    fn default() -> DistortionProps {
        DistortionProps {
            edge: 0.2,
            gain: 0.05,
            lowpass_cutoff: 8_000.0,
            eq_center: 3_600.0,
            eq_bandwidth: 3_600.0,
        }
    }
}

pub(crate) struct DistortionState {
    gains: [f32; MAX_OUTPUT_CHANNELS],
    low_pass: BiquadFilter,
    band_pass: BiquadFilter,
    attenuation: f32,
    edge_coeff: f32,
}

impl DistortionState {
    pub fn new() -> DistortionState {
        DistortionState {
            gains: [0.0; MAX_OUTPUT_CHANNELS],
            low_pass: BiquadFilter::default(),
            band_pass: BiquadFilter::default(),
            attenuation: 0.0,
            edge_coeff: 0.0,
        }
    }

    pub fn update(&mut self, device: &Device, props: &DistortionProps) {
        let frequency = device.frequency as f32;

        self.attenuation = props.gain;

        let edge = (props.edge * FRAC_PI_2).sin().min(0.99);
        self.edge_coeff = 2.0 * edge / (1.0 - edge);

        // Multiply the sampling frequency by the amount of oversampling
        // done during processing.
        let cutoff = props.lowpass_cutoff;
        // Bandwidth value is constant in octaves.
        let bandwidth = (cutoff / 2.0) / (cutoff * 0.67);
        self.low_pass.set_params(
            FilterType::LowPass,
            1.0,
            cutoff / (frequency * 4.0),
            calc_rcp_q_from_bandwidth(cutoff / (frequency * 4.0), bandwidth),
        );

        let cutoff = props.eq_center;
        // Convert bandwidth in Hz to octaves.
        let bandwidth = props.eq_bandwidth / (cutoff * 0.67);
        self.band_pass.set_params(
            FilterType::BandPass,
            1.0,
            cutoff / (frequency * 4.0),
            calc_rcp_q_from_bandwidth(cutoff / (frequency * 4.0), bandwidth),
        );

        compute_ambient_gains(&device.dry, 1.0, &mut self.gains);
    }

    pub fn process(
        &mut self,
        sample_count: usize,
        src: &[SampleLane; MAX_EFFECT_CHANNELS],
        dst: &mut [SampleLane],
        channel_count: usize,
    ) {
        let fc = self.edge_coeff;

        let mut base = 0;
        while base < sample_count {
            let todo = 64.min(sample_count - base);
            let mut buffer = [[0.0f32; 64 * 4]; 2];

            // Fill the oversample buffer using zero stuffing. The sample is
            // multiplied by the oversampling amount to maintain the
            // signal's power.
            for it in 0..todo {
                buffer[0][it * 4] = src[0][it + base] * 4.0;
                buffer[0][it * 4 + 1] = 0.0;
                buffer[0][it * 4 + 2] = 0.0;
                buffer[0][it * 4 + 3] = 0.0;
            }

            // First step: low-pass the original signal, which doubles as
            // the oversampling interpolation filter.
            let (head, tail) = buffer.split_at_mut(1);
            self.low_pass.process(&mut tail[0][..todo * 4], &head[0][..todo * 4]);

            // Second step: three waveshaper passes emulating tube
            // overdrive, sign-alternated so the waveform is modified
            // without net boost or attenuation.
            for it in 0..todo * 4 {
                let mut smp = buffer[1][it];
                smp = (1.0 + fc) * smp / (1.0 + fc * smp.abs());
                smp = (1.0 + fc) * smp / (1.0 + fc * smp.abs()) * -1.0;
                smp = (1.0 + fc) * smp / (1.0 + fc * smp.abs());
                buffer[0][it] = smp;
            }

            // Third step: band-pass the distorted signal.
            let (head, tail) = buffer.split_at_mut(1);
            self.band_pass.process(&mut tail[0][..todo * 4], &head[0][..todo * 4]);

            // Fourth step: attenuate and decimate, keeping one sample out
            // of four.
            for (kt, lane) in dst.iter_mut().enumerate().take(channel_count) {
                let gain = self.gains[kt] * self.attenuation;
                if gain.abs() <= SILENCE_THRESHOLD_GAIN {
                    continue;
                }
                for it in 0..todo {
                    lane[base + it] += gain * buffer[1][it * 4];
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
    fn test_edge_coefficient() {
        let device = Device::new(ChannelFormat::Mono, 44_100);
        let mut state = DistortionState::new();
        let props = DistortionProps::default();
        state.update(&device, &props);

        let edge = (0.2f32 * FRAC_PI_2).sin();
        let expected = 2.0 * edge / (1.0 - edge);
        assert!((state.edge_coeff - expected).abs() < 1e-6);
    }

    #[test]
    fn test_waveshaper_preserves_full_scale_dc() {
        // At |x| = 1 each pass reduces to ((1+fc)/(1+fc)) = 1, so three
        // passes keep the magnitude exactly.
        let fc = 2.0 * (0.2f32 * FRAC_PI_2).sin() / (1.0 - (0.2f32 * FRAC_PI_2).sin());
        let mut smp = 1.0f32;
        smp = (1.0 + fc) * smp / (1.0 + fc * smp.abs());
        smp = (1.0 + fc) * smp / (1.0 + fc * smp.abs()) * -1.0;
        smp = (1.0 + fc) * smp / (1.0 + fc * smp.abs());
        assert!((smp.abs() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_output_present_and_attenuated() {
        let device = Device::new(ChannelFormat::Mono, 44_100);
        let mut state = DistortionState::new();
        state.update(&device, &DistortionProps::default());

        let mut src = [[0.0; MAX_UPDATE_SAMPLES]; MAX_EFFECT_CHANNELS];
        for (i, s) in src[0].iter_mut().enumerate() {
            *s = (i as f32 * 0.1).sin() * 0.5;
        }
        let mut dst = vec![[0.0; MAX_UPDATE_SAMPLES]; 1];
        state.process(MAX_UPDATE_SAMPLES, &src, &mut dst, 1);

        let peak = dst[0].iter().fold(0.0f32, |m, &s| m.max(s.abs()));
        assert!(peak > 0.0);
        // Default gain of 0.05 keeps the output small.
        assert!(peak < 0.5);
    }
}
