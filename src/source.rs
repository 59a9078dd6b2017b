/// The source stage: per-send gain/filter properties and the per-channel
/// filter and gain state that feeds the dry and wet buses.

use serde::{Deserialize, Serialize};

use crate::channels::ChannelId;
use crate::device::Device;
use crate::filter::{calc_rcp_q_from_slope, BiquadFilter, FilterType};
use crate::panning::{calc_angle_coeffs, compute_panning_gains_bformat};
use crate::{MAX_AMBI_COEFFS, MAX_MIX_GAIN, MAX_OUTPUT_CHANNELS};

/// Gain and filter settings for the source's send. One record drives both
/// the direct (dry) path and the auxiliary (wet) path.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SendProps {
    /// Overall send gain, [0, 1].
    pub gain: f32,
    /// Gain applied above the high-frequency reference, [0, 1].
    pub gain_hf: f32,
    /// Gain applied below the low-frequency reference, [0, 1].
    pub gain_lf: f32,
}

impl SendProps {
    /// Reference frequency of the high-shelf (low-pass style) filter.
    pub const HF_FREQUENCY_REFERENCE: f32 = 5_000.0;
    /// Reference frequency of the low-shelf (high-pass style) filter.
    pub const LF_FREQUENCY_REFERENCE: f32 = 250.0;

    pub const MIN_GAIN: f32 = 0.0;
    pub const MAX_GAIN: f32 = 1.0;

    /// Clamp all fields into their legal ranges.
    pub fn normalize(&mut self) {
        self.gain = self.gain.clamp(Self::MIN_GAIN, Self::MAX_GAIN);
        self.gain_hf = self.gain_hf.clamp(Self::MIN_GAIN, Self::MAX_GAIN);
        self.gain_lf = self.gain_lf.clamp(Self::MIN_GAIN, Self::MAX_GAIN);
    }
}

impl Default for SendProps {
    fn default() -> SendProps {
        SendProps {
            gain: 1.0,
            gain_hf: 1.0,
            gain_lf: 1.0,
        }
    }
}

/// Which of the two shelving filters actually shape the signal; a gain of
/// exactly 1 leaves its filter in pass-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ActiveFilters {
    None,
    LowPass,
    HighPass,
    BandPass,
}

impl ActiveFilters {
    fn from_gains(gain_hf: f32, gain_lf: f32) -> ActiveFilters {
        match (gain_hf != 1.0, gain_lf != 1.0) {
            (false, false) => ActiveFilters::None,
            (true, false) => ActiveFilters::LowPass,
            (false, true) => ActiveFilters::HighPass,
            (true, true) => ActiveFilters::BandPass,
        }
    }
}

/// Filter pair and gain state for one input channel of one path.
#[derive(Debug, Clone, Default)]
pub(crate) struct ChannelParams {
    pub low_pass: BiquadFilter,
    pub high_pass: BiquadFilter,
    pub current_gains: [f32; MAX_OUTPUT_CHANNELS],
    pub target_gains: [f32; MAX_OUTPUT_CHANNELS],
}

impl ChannelParams {
    pub fn reset(&mut self) {
        self.low_pass.clear();
        self.high_pass.clear();
        self.current_gains = [0.0; MAX_OUTPUT_CHANNELS];
        self.target_gains = [0.0; MAX_OUTPUT_CHANNELS];
    }
}

/// One signal path out of the source (direct to the dry bus, or aux to the
/// wet bus).
#[derive(Debug, Clone)]
pub(crate) struct SourcePath {
    pub filter_type: ActiveFilters,
    pub channels: Vec<ChannelParams>,
}

impl SourcePath {
    fn new(channel_count: usize) -> SourcePath {
        SourcePath {
            filter_type: ActiveFilters::None,
            channels: vec![ChannelParams::default(); channel_count],
        }
    }

    /// Run the path's filters over one channel's samples. Returns the
    /// filtered data, or `src` itself when both filters pass through.
    pub fn apply_filters<'a>(
        &mut self,
        chan: usize,
        dst: &'a mut [f32],
        src: &'a [f32],
    ) -> &'a [f32] {
        let params = &mut self.channels[chan];
        match self.filter_type {
            ActiveFilters::None => {
                params.low_pass.process_pass_through(src);
                params.high_pass.process_pass_through(src);
                src
            }
            ActiveFilters::LowPass => {
                params.low_pass.process(dst, src);
                params.high_pass.process_pass_through(dst);
                dst
            }
            ActiveFilters::HighPass => {
                params.low_pass.process_pass_through(src);
                params.high_pass.process(dst, src);
                dst
            }
            ActiveFilters::BandPass => {
                let mut temp = [0.0f32; crate::MAX_UPDATE_SAMPLES];
                params.low_pass.process(&mut temp, src);
                params.high_pass.process(dst, &temp[..src.len()]);
                dst
            }
        }
    }
}

/// Per-speaker panning position of each input channel.
struct ChannelAngles {
    channel: ChannelId,
    angle: f32,
    elevation: f32,
}

const fn deg_to_rad(deg: f32) -> f32 {
    deg * (std::f32::consts::PI / 180.0)
}

const fn at(channel: ChannelId, angle_deg: f32) -> ChannelAngles {
    ChannelAngles {
        channel,
        angle: deg_to_rad(angle_deg),
        elevation: 0.0,
    }
}

static MONO_MAP: [ChannelAngles; 1] = [at(ChannelId::FrontCenter, 0.0)];

static STEREO_MAP: [ChannelAngles; 2] = [
    at(ChannelId::FrontLeft, -30.0),
    at(ChannelId::FrontRight, 30.0),
];

static QUAD_MAP: [ChannelAngles; 4] = [
    at(ChannelId::FrontLeft, -45.0),
    at(ChannelId::FrontRight, 45.0),
    at(ChannelId::BackLeft, -135.0),
    at(ChannelId::BackRight, 135.0),
];

static X5_1_MAP: [ChannelAngles; 6] = [
    at(ChannelId::FrontLeft, -30.0),
    at(ChannelId::FrontRight, 30.0),
    at(ChannelId::FrontCenter, 0.0),
    at(ChannelId::Lfe, 0.0),
    at(ChannelId::SideLeft, -110.0),
    at(ChannelId::SideRight, 110.0),
];

static X5_1_REAR_MAP: [ChannelAngles; 6] = [
    at(ChannelId::FrontLeft, -30.0),
    at(ChannelId::FrontRight, 30.0),
    at(ChannelId::FrontCenter, 0.0),
    at(ChannelId::Lfe, 0.0),
    at(ChannelId::BackLeft, -110.0),
    at(ChannelId::BackRight, 110.0),
];

static X6_1_MAP: [ChannelAngles; 7] = [
    at(ChannelId::FrontLeft, -30.0),
    at(ChannelId::FrontRight, 30.0),
    at(ChannelId::FrontCenter, 0.0),
    at(ChannelId::Lfe, 0.0),
    at(ChannelId::BackCenter, 180.0),
    at(ChannelId::SideLeft, -90.0),
    at(ChannelId::SideRight, 90.0),
];

static X7_1_MAP: [ChannelAngles; 8] = [
    at(ChannelId::FrontLeft, -30.0),
    at(ChannelId::FrontRight, 30.0),
    at(ChannelId::FrontCenter, 0.0),
    at(ChannelId::Lfe, 0.0),
    at(ChannelId::BackLeft, -150.0),
    at(ChannelId::BackRight, 150.0),
    at(ChannelId::SideLeft, -90.0),
    at(ChannelId::SideRight, 90.0),
];

/// The source stage: one direct path into the dry bus and one aux path
/// into the 4-lane B-format wet bus.
#[derive(Debug, Clone)]
pub(crate) struct Source {
    pub direct: SourcePath,
    pub aux: SourcePath,
    /// Whether the aux path currently feeds the wet bus.
    pub aux_active: bool,
}

impl Source {
    pub fn new(channel_count: usize) -> Source {
        Source {
            direct: SourcePath::new(channel_count),
            aux: SourcePath::new(channel_count),
            aux_active: false,
        }
    }

    pub fn reset(&mut self) {
        for params in &mut self.direct.channels {
            params.reset();
        }
        for params in &mut self.aux.channels {
            params.reset();
        }
    }

    /// Recompute panning gains and filter coefficients for both paths from
    /// the committed send properties. Called whenever the active snapshot
    /// changes.
    pub fn update(&mut self, device: &Device, send: &SendProps, aux_active: bool) {
        self.aux_active = aux_active;

        let dry_gain = send.gain.min(MAX_MIX_GAIN);
        let wet_gain = send.gain.min(MAX_MIX_GAIN);

        let channel_map: &[ChannelAngles] = match device.channel_format {
            crate::ChannelFormat::Mono => &MONO_MAP,
            crate::ChannelFormat::Stereo => &STEREO_MAP,
            crate::ChannelFormat::Quad => &QUAD_MAP,
            crate::ChannelFormat::FivePointOne => &X5_1_MAP,
            crate::ChannelFormat::FivePointOneRear => &X5_1_REAR_MAP,
            crate::ChannelFormat::SixPointOne => &X6_1_MAP,
            crate::ChannelFormat::SevenPointOne => &X7_1_MAP,
        };

        for (c, map) in channel_map.iter().enumerate() {
            // The direct path routes each input lane straight to its own
            // speaker; only effect output gets re-panned.
            self.direct.channels[c].target_gains = [0.0; MAX_OUTPUT_CHANNELS];
            if let Some(idx) = device.channel_index(map.channel) {
                self.direct.channels[c].target_gains[idx] = dry_gain;
            }

            // Special-case LFE: it never contributes to the send.
            if map.channel == ChannelId::Lfe || !aux_active {
                self.aux.channels[c].target_gains = [0.0; MAX_OUTPUT_CHANNELS];
                continue;
            }

            // The aux path places each lane in the B-format soundfield at
            // its speaker direction.
            let mut coeffs = [0.0; MAX_AMBI_COEFFS];
            calc_angle_coeffs(map.angle, map.elevation, 0.0, &mut coeffs);
            compute_panning_gains_bformat(
                &coeffs,
                wet_gain,
                &mut self.aux.channels[c].target_gains,
            );
        }

        let frequency = device.frequency as f32;
        for path in [&mut self.direct, &mut self.aux] {
            let hf_scale = SendProps::HF_FREQUENCY_REFERENCE / frequency;
            let lf_scale = SendProps::LF_FREQUENCY_REFERENCE / frequency;
            // Limit the filter gains to -60dB to keep the shelves from
            // killing most of the signal.
            let gain_hf = send.gain_hf.max(0.001);
            let gain_lf = send.gain_lf.max(0.001);

            path.filter_type = ActiveFilters::from_gains(gain_hf, gain_lf);

            path.channels[0].low_pass.set_params(
                FilterType::HighShelf,
                gain_hf,
                hf_scale,
                calc_rcp_q_from_slope(gain_hf, 1.0),
            );
            path.channels[0].high_pass.set_params(
                FilterType::LowShelf,
                gain_lf,
                lf_scale,
                calc_rcp_q_from_slope(gain_lf, 1.0),
            );

            let (first, rest) = path.channels.split_first_mut().unwrap();
            for params in rest {
                params.low_pass.copy_params_from(&first.low_pass);
                params.high_pass.copy_params_from(&first.high_pass);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChannelFormat;

    #[test]
    fn test_send_props_normalize() {
        let mut props = SendProps {
            gain: 2.0,
            gain_hf: -0.5,
            gain_lf: 0.5,
        };
        props.normalize();
        assert_eq!(props.gain, 1.0);
        assert_eq!(props.gain_hf, 0.0);
        assert_eq!(props.gain_lf, 0.5);
    }

    #[test]
    fn test_active_filters_selection() {
        assert_eq!(ActiveFilters::from_gains(1.0, 1.0), ActiveFilters::None);
        assert_eq!(ActiveFilters::from_gains(0.5, 1.0), ActiveFilters::LowPass);
        assert_eq!(ActiveFilters::from_gains(1.0, 0.5), ActiveFilters::HighPass);
        assert_eq!(ActiveFilters::from_gains(0.5, 0.5), ActiveFilters::BandPass);
    }

    #[test]
    fn test_update_mono_targets_unity() {
        let device = Device::new(ChannelFormat::Mono, 44_100);
        let mut source = Source::new(1);
        source.update(&device, &SendProps::default(), false);

        // A centered mono source decodes to unity on the single output.
        assert!((source.direct.channels[0].target_gains[0] - 1.0).abs() < 1e-5);
        assert_eq!(source.direct.filter_type, ActiveFilters::None);
        assert!(!source.aux_active);
    }

    #[test]
    fn test_update_lfe_routes_discretely() {
        let device = Device::new(ChannelFormat::FivePointOne, 44_100);
        let mut source = Source::new(6);
        source.update(&device, &SendProps::default(), true);

        // LFE input lane 3 routes only to LFE output 3, dry path only.
        let lfe = &source.direct.channels[3];
        assert!((lfe.target_gains[3] - 1.0).abs() < 1e-6);
        for (i, &g) in lfe.target_gains.iter().enumerate() {
            if i != 3 {
                assert_eq!(g, 0.0);
            }
        }
        assert!(source.aux.channels[3].target_gains.iter().all(|&g| g == 0.0));
        // Non-LFE lanes do feed the wet bus.
        assert!(source.aux.channels[0].target_gains[..4].iter().any(|&g| g != 0.0));
    }

    #[test]
    fn test_send_filter_gain_selects_shelves() {
        let device = Device::new(ChannelFormat::Stereo, 44_100);
        let mut source = Source::new(2);
        let send = SendProps {
            gain: 1.0,
            gain_hf: 0.25,
            gain_lf: 1.0,
        };
        source.update(&device, &send, false);
        assert_eq!(source.direct.filter_type, ActiveFilters::LowPass);
    }
}
