/// Dedicated routing: a gained copy of the mono send, delivered either to
/// the front-center speaker (dialog) or the LFE speaker.

use serde::{Deserialize, Serialize};

use crate::channels::ChannelId;
use crate::device::Device;
use crate::effects::EffectKind;
use crate::panning::{calc_angle_coeffs, compute_panning_gains};
use crate::{
    SampleLane, MAX_AMBI_COEFFS, MAX_EFFECT_CHANNELS, MAX_OUTPUT_CHANNELS,
    SILENCE_THRESHOLD_GAIN,
};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct DedicatedProps {
    /// Routing gain, [0, 1].
    pub gain: f32,
}

impl DedicatedProps {
    pub const MIN_GAIN: f32 = 0.0;
    pub const MAX_GAIN: f32 = 1.0;

    pub(crate) fn normalize(&mut self) {
        self.gain = self.gain.clamp(Self::MIN_GAIN, Self::MAX_GAIN);
    }
}

impl Default for DedicatedProps {
    fn default() -> DedicatedProps {
        DedicatedProps { gain: 1.0 }
    }
}

#[derive(Default)]
pub(crate) struct DedicatedState {
    gains: [f32; MAX_OUTPUT_CHANNELS],
}

impl DedicatedState {
    pub fn new() -> DedicatedState {
        DedicatedState::default()
    }

    pub fn update(&mut self, device: &Device, kind: EffectKind, props: &DedicatedProps) {
        self.gains = [0.0; MAX_OUTPUT_CHANNELS];

        if kind == EffectKind::DedicatedLowFrequency {
            if let Some(idx) = device.channel_index(ChannelId::Lfe) {
                self.gains[idx] = props.gain;
            }
        } else if let Some(idx) = device.channel_index(ChannelId::FrontCenter) {
            // Dialog goes to the front-center speaker if it exists,
            // otherwise it plays from the front-center location.
            self.gains[idx] = props.gain;
        } else {
            let mut coeffs = [0.0; MAX_AMBI_COEFFS];
            calc_angle_coeffs(0.0, 0.0, 0.0, &mut coeffs);
            compute_panning_gains(&device.dry, &coeffs, props.gain, &mut self.gains);
        }
    }

    pub fn process(
        &mut self,
        sample_count: usize,
        src: &[SampleLane; MAX_EFFECT_CHANNELS],
        dst: &mut [SampleLane],
        channel_count: usize,
    ) {
        for (c, lane) in dst.iter_mut().enumerate().take(channel_count) {
            let gain = self.gains[c];
            if gain.abs() <= SILENCE_THRESHOLD_GAIN {
                continue;
            }
            for i in 0..sample_count {
                lane[i] += src[0][i] * gain;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChannelFormat, MAX_UPDATE_SAMPLES};

    #[test]
    fn test_lfe_routing() {
        let device = Device::new(ChannelFormat::FivePointOne, 44_100);
        let mut state = DedicatedState::new();
        state.update(
            &device,
            EffectKind::DedicatedLowFrequency,
            &DedicatedProps { gain: 0.8 },
        );

        assert!((state.gains[3] - 0.8).abs() < 1e-6);
        assert_eq!(state.gains.iter().filter(|&&g| g != 0.0).count(), 1);
    }

    #[test]
    fn test_lfe_silent_without_lfe_speaker() {
        let device = Device::new(ChannelFormat::Stereo, 44_100);
        let mut state = DedicatedState::new();
        state.update(
            &device,
            EffectKind::DedicatedLowFrequency,
            &DedicatedProps::default(),
        );
        assert!(state.gains.iter().all(|&g| g == 0.0));
    }

    #[test]
    fn test_dialog_prefers_center_speaker() {
        let device = Device::new(ChannelFormat::FivePointOne, 44_100);
        let mut state = DedicatedState::new();
        state.update(&device, EffectKind::DedicatedDialog, &DedicatedProps::default());
        assert!((state.gains[2] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_dialog_pans_without_center_speaker() {
        let device = Device::new(ChannelFormat::Stereo, 44_100);
        let mut state = DedicatedState::new();
        state.update(&device, EffectKind::DedicatedDialog, &DedicatedProps::default());

        // Panned at azimuth 0: both speakers, symmetric.
        assert!(state.gains[0] > 0.0);
        assert!((state.gains[0] - state.gains[1]).abs() < 1e-6);
    }

    #[test]
    fn test_process_copies_lane_zero() {
        let device = Device::new(ChannelFormat::FivePointOne, 44_100);
        let mut state = DedicatedState::new();
        state.update(&device, EffectKind::DedicatedDialog, &DedicatedProps::default());

        let mut src = [[0.0; MAX_UPDATE_SAMPLES]; MAX_EFFECT_CHANNELS];
        src[0][5] = 0.5;
        let mut dst = vec![[0.0; MAX_UPDATE_SAMPLES]; 6];
        state.process(MAX_UPDATE_SAMPLES, &src, &mut dst, 6);

        assert!((dst[2][5] - 0.5).abs() < 1e-6);
        assert!(dst[0].iter().all(|&s| s == 0.0));
    }
}
