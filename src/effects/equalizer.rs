/// Four-band equalizer applied to the B-format wet signal.
///
/// The low and high "cutoff" frequencies are really shelf corner
/// frequencies; attenuation below/above them uses gains under 1.0 and
/// boost uses gains above 1.0. Gains run 0.126..7.943 (±18dB) and the two
/// mid bands have a 0.01..1.0 octave bandwidth. Shelf gains take the
/// square root of the user gain so the value applies to the band beyond
/// the shelf, matching EAX; the mid bands use the gain directly.

use serde::{Deserialize, Serialize};

use crate::device::Device;
use crate::filter::{
    calc_rcp_q_from_bandwidth, calc_rcp_q_from_slope, BiquadFilter, FilterType,
};
use crate::panning::compute_first_order_gains;
use crate::{
    SampleLane, MAX_EFFECT_CHANNELS, MAX_OUTPUT_CHANNELS, MAX_UPDATE_SAMPLES,
    SILENCE_THRESHOLD_GAIN,
};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct EqualizerProps {
    pub low_cutoff: f32,
    pub low_gain: f32,
    pub mid1_center: f32,
    pub mid1_gain: f32,
    pub mid1_width: f32,
    pub mid2_center: f32,
    pub mid2_gain: f32,
    pub mid2_width: f32,
    pub high_cutoff: f32,
    pub high_gain: f32,
}

impl EqualizerProps {
    pub const MIN_GAIN: f32 = 0.126;
    pub const MAX_GAIN: f32 = 7.943;
    pub const MIN_LOW_CUTOFF: f32 = 50.0;
    pub const MAX_LOW_CUTOFF: f32 = 800.0;
    pub const MIN_MID1_CENTER: f32 = 200.0;
    pub const MAX_MID1_CENTER: f32 = 3_000.0;
    pub const MIN_MID2_CENTER: f32 = 1_000.0;
    pub const MAX_MID2_CENTER: f32 = 8_000.0;
    pub const MIN_WIDTH: f32 = 0.01;
    pub const MAX_WIDTH: f32 = 1.0;
    pub const MIN_HIGH_CUTOFF: f32 = 4_000.0;
    pub const MAX_HIGH_CUTOFF: f32 = 16_000.0;

    pub(crate) fn normalize(&mut self) {
        self.low_cutoff = self.low_cutoff.clamp(Self::MIN_LOW_CUTOFF, Self::MAX_LOW_CUTOFF);
        self.low_gain = self.low_gain.clamp(Self::MIN_GAIN, Self::MAX_GAIN);
        self.mid1_center = self
            .mid1_center
            .clamp(Self::MIN_MID1_CENTER, Self::MAX_MID1_CENTER);
        self.mid1_gain = self.mid1_gain.clamp(Self::MIN_GAIN, Self::MAX_GAIN);
        self.mid1_width = self.mid1_width.clamp(Self::MIN_WIDTH, Self::MAX_WIDTH);
        self.mid2_center = self
            .mid2_center
            .clamp(Self::MIN_MID2_CENTER, Self::MAX_MID2_CENTER);
        self.mid2_gain = self.mid2_gain.clamp(Self::MIN_GAIN, Self::MAX_GAIN);
        self.mid2_width = self.mid2_width.clamp(Self::MIN_WIDTH, Self::MAX_WIDTH);
        self.high_cutoff = self
            .high_cutoff
            .clamp(Self::MIN_HIGH_CUTOFF, Self::MAX_HIGH_CUTOFF);
        self.high_gain = self.high_gain.clamp(Self::MIN_GAIN, Self::MAX_GAIN);
    }
}

impl Default for EqualizerProps {
    fn default() -> EqualizerProps {
        EqualizerProps {
            low_cutoff: 200.0,
            low_gain: 1.0,
            mid1_center: 500.0,
            mid1_gain: 1.0,
            mid1_width: 1.0,
            mid2_center: 3_000.0,
            mid2_gain: 1.0,
            mid2_width: 1.0,
            high_cutoff: 6_000.0,
            high_gain: 1.0,
        }
    }
}

const IDENTITY: [[f32; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

pub(crate) struct EqualizerState {
    gains: [[f32; MAX_OUTPUT_CHANNELS]; MAX_EFFECT_CHANNELS],
    // Four cascaded bands per B-format lane: low shelf, two peaking,
    // high shelf. History survives parameter changes to avoid clicks.
    filters: [[BiquadFilter; MAX_EFFECT_CHANNELS]; 4],
}

impl EqualizerState {
    pub fn new() -> Box<EqualizerState> {
        Box::new(EqualizerState {
            gains: [[0.0; MAX_OUTPUT_CHANNELS]; MAX_EFFECT_CHANNELS],
            filters: [[BiquadFilter::default(); MAX_EFFECT_CHANNELS]; 4],
        })
    }

    pub fn update(&mut self, device: &Device, props: &EqualizerProps) {
        let frequency = device.frequency as f32;

        for (i, row) in IDENTITY.iter().enumerate() {
            compute_first_order_gains(&device.foa, row, 1.0, &mut self.gains[i]);
        }

        // Shelf gains use the square root so the specified gain applies to
        // the band beyond the shelf (the set value lands on the corner).
        let gain = props.low_gain.sqrt().max(0.0625); // Limit -24dB
        self.filters[0][0].set_params(
            FilterType::LowShelf,
            gain,
            props.low_cutoff / frequency,
            calc_rcp_q_from_slope(gain, 0.75),
        );

        let gain = props.mid1_gain.max(0.0625);
        let freq_mult = props.mid1_center / frequency;
        self.filters[1][0].set_params(
            FilterType::Peaking,
            gain,
            freq_mult,
            calc_rcp_q_from_bandwidth(freq_mult, props.mid1_width),
        );

        let gain = props.mid2_gain.max(0.0625);
        let freq_mult = props.mid2_center / frequency;
        self.filters[2][0].set_params(
            FilterType::Peaking,
            gain,
            freq_mult,
            calc_rcp_q_from_bandwidth(freq_mult, props.mid2_width),
        );

        let gain = props.high_gain.sqrt().max(0.0625);
        self.filters[3][0].set_params(
            FilterType::HighShelf,
            gain,
            props.high_cutoff / frequency,
            calc_rcp_q_from_slope(gain, 0.75),
        );

        // Copy the filter coefficients to the other input channels.
        for band in &mut self.filters {
            let (first, rest) = band.split_first_mut().unwrap();
            for filter in rest {
                filter.copy_params_from(first);
            }
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
            let todo = MAX_UPDATE_SAMPLES.min(sample_count - base);

            for ft in 0..MAX_EFFECT_CHANNELS {
                let mut stage_a = [0.0f32; MAX_UPDATE_SAMPLES];
                let mut stage_b = [0.0f32; MAX_UPDATE_SAMPLES];

                self.filters[0][ft].process(&mut stage_a[..todo], &src[ft][base..base + todo]);
                self.filters[1][ft].process(&mut stage_b[..todo], &stage_a[..todo]);
                self.filters[2][ft].process(&mut stage_a[..todo], &stage_b[..todo]);
                self.filters[3][ft].process(&mut stage_b[..todo], &stage_a[..todo]);

                for (kt, lane) in dst.iter_mut().enumerate().take(channel_count) {
                    let gain = self.gains[ft][kt];
                    if gain.abs() <= SILENCE_THRESHOLD_GAIN {
                        continue;
                    }
                    for it in 0..todo {
                        lane[base + it] += gain * stage_b[it];
                    }
                }
            }

            base += todo;
        }
    }
}
