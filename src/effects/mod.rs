/// The auxiliary effect library: parameter types for every effect kind, a
/// tagged state over the closed effect set, and match-based dispatch for
/// the four effect operations (construct, device update, parameter
/// update, process).

pub mod chorus;
pub mod compressor;
pub mod dedicated;
pub mod distortion;
pub mod echo;
pub mod equalizer;
pub mod modulator;
pub mod reverb;

use serde::{Deserialize, Serialize};

use crate::device::Device;
use crate::{SampleLane, MAX_EFFECT_CHANNELS};

pub use chorus::{ChorusProps, ChorusWaveform};
pub use compressor::CompressorProps;
pub use dedicated::DedicatedProps;
pub use distortion::DistortionProps;
pub use echo::EchoProps;
pub use equalizer::EqualizerProps;
pub use modulator::{ModulatorProps, ModulatorWaveform};
use reverb::ReverbProps;

use chorus::ChorusState;
use compressor::CompressorState;
use dedicated::DedicatedState;
use distortion::DistortionState;
use echo::EchoState;
use equalizer::EqualizerState;
use modulator::ModulatorState;
use reverb::ReverbState;

/// Every effect the engine can host.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    Null,
    Chorus,
    Compressor,
    DedicatedDialog,
    DedicatedLowFrequency,
    Distortion,
    Echo,
    Equalizer,
    Flanger,
    RingModulator,
    Reverb,
    EaxReverb,
}

/// Parameters for an effect, tagged by kind. A value always carries the
/// kind it belongs to, so one of these fully describes a configured
/// effect.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum EffectProps {
    Null,
    Chorus(ChorusProps),
    Compressor(CompressorProps),
    DedicatedDialog(DedicatedProps),
    DedicatedLowFrequency(DedicatedProps),
    Distortion(DistortionProps),
    Echo(EchoProps),
    Equalizer(EqualizerProps),
    Flanger(ChorusProps),
    RingModulator(ModulatorProps),
    Reverb(ReverbProps),
    EaxReverb(ReverbProps),
}

impl EffectProps {
    /// Default parameters for an effect kind.
    pub fn defaults_for(kind: EffectKind) -> EffectProps {
        match kind {
            EffectKind::Null => EffectProps::Null,
            EffectKind::Chorus => EffectProps::Chorus(ChorusProps::chorus_defaults()),
            EffectKind::Compressor => EffectProps::Compressor(CompressorProps::default()),
            EffectKind::DedicatedDialog => {
                EffectProps::DedicatedDialog(DedicatedProps::default())
            }
            EffectKind::DedicatedLowFrequency => {
                EffectProps::DedicatedLowFrequency(DedicatedProps::default())
            }
            EffectKind::Distortion => EffectProps::Distortion(DistortionProps::default()),
            EffectKind::Echo => EffectProps::Echo(EchoProps::default()),
            EffectKind::Equalizer => EffectProps::Equalizer(EqualizerProps::default()),
            EffectKind::Flanger => EffectProps::Flanger(ChorusProps::flanger_defaults()),
            EffectKind::RingModulator => EffectProps::RingModulator(ModulatorProps::default()),
            EffectKind::Reverb => EffectProps::Reverb(ReverbProps::default()),
            EffectKind::EaxReverb => EffectProps::EaxReverb(ReverbProps::default()),
        }
    }

    /// The kind this parameter set belongs to.
    pub fn kind(&self) -> EffectKind {
        match self {
            EffectProps::Null => EffectKind::Null,
            EffectProps::Chorus(_) => EffectKind::Chorus,
            EffectProps::Compressor(_) => EffectKind::Compressor,
            EffectProps::DedicatedDialog(_) => EffectKind::DedicatedDialog,
            EffectProps::DedicatedLowFrequency(_) => EffectKind::DedicatedLowFrequency,
            EffectProps::Distortion(_) => EffectKind::Distortion,
            EffectProps::Echo(_) => EffectKind::Echo,
            EffectProps::Equalizer(_) => EffectKind::Equalizer,
            EffectProps::Flanger(_) => EffectKind::Flanger,
            EffectProps::RingModulator(_) => EffectKind::RingModulator,
            EffectProps::Reverb(_) => EffectKind::Reverb,
            EffectProps::EaxReverb(_) => EffectKind::EaxReverb,
        }
    }

    /// Clamp every out-of-range field into its legal range.
    pub fn normalize(&mut self) {
        match self {
            EffectProps::Null => {}
            EffectProps::Chorus(props) => props.normalize(ChorusProps::CHORUS_MAX_DELAY),
            EffectProps::Flanger(props) => props.normalize(ChorusProps::FLANGER_MAX_DELAY),
            EffectProps::Compressor(_) => {}
            EffectProps::DedicatedDialog(props) | EffectProps::DedicatedLowFrequency(props) => {
                props.normalize();
            }
            EffectProps::Distortion(props) => props.normalize(),
            EffectProps::Echo(props) => props.normalize(),
            EffectProps::Equalizer(props) => props.normalize(),
            EffectProps::RingModulator(props) => props.normalize(),
            EffectProps::Reverb(props) | EffectProps::EaxReverb(props) => props.normalize(),
        }
    }
}

/// Runtime state of the hosted effect. Swapping kinds drops the previous
/// state and builds the new one silent; the reverb pair shares one state
/// so that switching between the two reverb modes keeps its buffers.
pub(crate) enum EffectState {
    Null,
    Chorus(ChorusState),
    Compressor(CompressorState),
    Dedicated(DedicatedState),
    Distortion(DistortionState),
    Echo(EchoState),
    Equalizer(Box<EqualizerState>),
    Modulator(ModulatorState),
    Reverb(Box<ReverbState>),
}

impl EffectState {
    /// Construct the state for an effect kind, with all rate-dependent
    /// buffers sized for the device.
    pub fn for_kind(kind: EffectKind, device: &Device) -> EffectState {
        match kind {
            EffectKind::Null => EffectState::Null,
            EffectKind::Chorus | EffectKind::Flanger => {
                EffectState::Chorus(ChorusState::new(kind, device))
            }
            EffectKind::Compressor => EffectState::Compressor(CompressorState::new(device)),
            EffectKind::DedicatedDialog | EffectKind::DedicatedLowFrequency => {
                EffectState::Dedicated(DedicatedState::new())
            }
            EffectKind::Distortion => EffectState::Distortion(DistortionState::new()),
            EffectKind::Echo => EffectState::Echo(EchoState::new(device)),
            EffectKind::Equalizer => EffectState::Equalizer(EqualizerState::new()),
            EffectKind::RingModulator => EffectState::Modulator(ModulatorState::new()),
            EffectKind::Reverb | EffectKind::EaxReverb => {
                EffectState::Reverb(ReverbState::new(kind, device))
            }
        }
    }

    /// Whether a kind change can reuse this state. The two reverb modes
    /// and the two dedicated routings share state; everything else needs
    /// a rebuild.
    pub fn serves(&self, kind: EffectKind) -> bool {
        match (self, kind) {
            (EffectState::Null, EffectKind::Null)
            | (EffectState::Compressor(_), EffectKind::Compressor)
            | (
                EffectState::Dedicated(_),
                EffectKind::DedicatedDialog | EffectKind::DedicatedLowFrequency,
            )
            | (EffectState::Distortion(_), EffectKind::Distortion)
            | (EffectState::Echo(_), EffectKind::Echo)
            | (EffectState::Equalizer(_), EffectKind::Equalizer)
            | (EffectState::Modulator(_), EffectKind::RingModulator)
            | (
                EffectState::Reverb(_),
                EffectKind::Reverb | EffectKind::EaxReverb,
            ) => true,
            // Chorus and flanger share an implementation but size their
            // delay lines differently, so they don't swap in place.
            (EffectState::Chorus(state), EffectKind::Chorus | EffectKind::Flanger) => {
                state.kind() == kind
            }
            _ => false,
        }
    }

    /// Recompute coefficients and gains from the active parameters.
    pub fn update(&mut self, device: &Device, props: &EffectProps) {
        let kind = props.kind();
        match (self, props) {
            (EffectState::Null, EffectProps::Null) => {}
            (
                EffectState::Chorus(state),
                EffectProps::Chorus(props) | EffectProps::Flanger(props),
            ) => {
                state.update(device, props);
            }
            (EffectState::Compressor(state), EffectProps::Compressor(props)) => {
                state.update(device, props);
            }
            (
                EffectState::Dedicated(state),
                EffectProps::DedicatedDialog(props) | EffectProps::DedicatedLowFrequency(props),
            ) => {
                state.update(device, kind, props);
            }
            (EffectState::Distortion(state), EffectProps::Distortion(props)) => {
                state.update(device, props);
            }
            (EffectState::Echo(state), EffectProps::Echo(props)) => state.update(device, props),
            (EffectState::Equalizer(state), EffectProps::Equalizer(props)) => {
                state.update(device, props);
            }
            (EffectState::Modulator(state), EffectProps::RingModulator(props)) => {
                state.update(device, props);
            }
            (
                EffectState::Reverb(state),
                EffectProps::Reverb(props) | EffectProps::EaxReverb(props),
            ) => {
                state.update(device, kind, props);
            }
            _ => debug_assert!(false, "effect state and props kind mismatch"),
        }
    }

    /// Run one block, adding the effect's contribution into `dst`.
    pub fn process(
        &mut self,
        sample_count: usize,
        src: &[SampleLane; MAX_EFFECT_CHANNELS],
        dst: &mut [SampleLane],
        channel_count: usize,
    ) {
        match self {
            EffectState::Null => {}
            EffectState::Chorus(state) => state.process(sample_count, src, dst, channel_count),
            EffectState::Compressor(state) => state.process(sample_count, src, dst, channel_count),
            EffectState::Dedicated(state) => state.process(sample_count, src, dst, channel_count),
            EffectState::Distortion(state) => state.process(sample_count, src, dst, channel_count),
            EffectState::Echo(state) => state.process(sample_count, src, dst, channel_count),
            EffectState::Equalizer(state) => state.process(sample_count, src, dst, channel_count),
            EffectState::Modulator(state) => state.process(sample_count, src, dst, channel_count),
            EffectState::Reverb(state) => state.process(sample_count, src, dst, channel_count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChannelFormat;

    #[test]
    fn test_defaults_round_trip_kind() {
        let kinds = [
            EffectKind::Null,
            EffectKind::Chorus,
            EffectKind::Compressor,
            EffectKind::DedicatedDialog,
            EffectKind::DedicatedLowFrequency,
            EffectKind::Distortion,
            EffectKind::Echo,
            EffectKind::Equalizer,
            EffectKind::Flanger,
            EffectKind::RingModulator,
            EffectKind::Reverb,
            EffectKind::EaxReverb,
        ];
        for kind in kinds {
            assert_eq!(EffectProps::defaults_for(kind).kind(), kind);
        }
    }

    #[test]
    fn test_defaults_are_normalized() {
        for kind in [
            EffectKind::Chorus,
            EffectKind::Flanger,
            EffectKind::Echo,
            EffectKind::Equalizer,
            EffectKind::Reverb,
        ] {
            let props = EffectProps::defaults_for(kind);
            let mut normalized = props;
            normalized.normalize();
            assert_eq!(props, normalized);
        }
    }

    #[test]
    fn test_flanger_delay_clamps_tighter_than_chorus() {
        let mut chorus = EffectProps::Chorus(ChorusProps {
            delay: 0.01,
            ..ChorusProps::chorus_defaults()
        });
        let mut flanger = EffectProps::Flanger(ChorusProps {
            delay: 0.01,
            ..ChorusProps::flanger_defaults()
        });
        chorus.normalize();
        flanger.normalize();

        let EffectProps::Chorus(chorus) = chorus else { unreachable!() };
        let EffectProps::Flanger(flanger) = flanger else { unreachable!() };
        assert_eq!(chorus.delay, 0.01);
        assert_eq!(flanger.delay, ChorusProps::FLANGER_MAX_DELAY);
    }

    #[test]
    fn test_state_reuse_across_reverb_modes() {
        let device = Device::new(ChannelFormat::Stereo, 44_100);
        let state = EffectState::for_kind(EffectKind::Reverb, &device);
        assert!(state.serves(EffectKind::EaxReverb));
        assert!(state.serves(EffectKind::Reverb));
        assert!(!state.serves(EffectKind::Echo));

        let state = EffectState::for_kind(EffectKind::Chorus, &device);
        assert!(!state.serves(EffectKind::Flanger));
    }

    #[test]
    fn test_props_serde_round_trip() {
        let props = EffectProps::defaults_for(EffectKind::EaxReverb);
        let json = serde_json::to_string(&props).unwrap();
        let parsed: EffectProps = serde_json::from_str(&json).unwrap();
        assert_eq!(props, parsed);
    }
}
