/// The engine: owns the device configuration, the source stage, the dry
/// and wet buses, and the hosted effect. Drives the block-wise mix and
/// the deferred parameter commit.

use anyhow::{anyhow, ensure, Result};

use crate::channels::ChannelFormat;
use crate::device::Device;
use crate::effects::{EffectKind, EffectProps, EffectState};
use crate::mix::mix;
use crate::source::{SendProps, Source};
use crate::{SampleLane, MAX_EFFECT_CHANNELS, MAX_UPDATE_SAMPLES};

pub const MIN_SAMPLING_RATE: u32 = 8_000;
pub const MAX_SAMPLING_RATE: u32 = 192_000;

pub const MIN_EFFECTS: usize = 1;
pub const MAX_EFFECTS: usize = 1;

/// The hosted effect: its running state, the active parameter snapshot
/// the DSP reads, and the wet bus it is fed from.
struct EffectSlot {
    props: EffectProps,
    state: EffectState,
    props_updated: bool,
    wet_buffer: [SampleLane; MAX_EFFECT_CHANNELS],
}

/// A single-source send/return effects processor.
///
/// Construction is initialization; dropping the engine releases all DSP
/// buffers. All parameter setters write a pending snapshot that only
/// takes effect at [`Engine::apply_changes`].
pub struct Engine {
    device: Device,
    source: Source,

    /// Dry bus, one lane per output channel.
    dry_buffer: Vec<SampleLane>,
    /// Per-chunk scratch for one deinterleaved input channel.
    resampled: SampleLane,
    filtered: SampleLane,

    slot: EffectSlot,
    active_send: SendProps,

    pending_effect: EffectProps,
    pending_send: SendProps,

    effect_count: usize,
}

impl Engine {
    /// Create an engine for the given layout and sampling rate.
    /// `effect_count` is validated against the supported range (currently
    /// exactly one send).
    pub fn new(
        channel_format: ChannelFormat,
        sampling_rate: u32,
        effect_count: usize,
    ) -> Result<Engine> {
        ensure!(
            (MIN_SAMPLING_RATE..=MAX_SAMPLING_RATE).contains(&sampling_rate),
            "Sampling rate out of range: {sampling_rate}"
        );
        ensure!(
            (MIN_EFFECTS..=MAX_EFFECTS).contains(&effect_count),
            "Effect count out of range: {effect_count}"
        );

        let device = Device::new(channel_format, sampling_rate);
        let channel_count = device.channel_count;

        let mut source = Source::new(channel_count);
        source.reset();

        let slot = EffectSlot {
            props: EffectProps::Null,
            state: EffectState::for_kind(EffectKind::Null, &device),
            props_updated: true,
            wet_buffer: [[0.0; MAX_UPDATE_SAMPLES]; MAX_EFFECT_CHANNELS],
        };

        Ok(Engine {
            device,
            source,
            dry_buffer: vec![[0.0; MAX_UPDATE_SAMPLES]; channel_count],
            resampled: [0.0; MAX_UPDATE_SAMPLES],
            filtered: [0.0; MAX_UPDATE_SAMPLES],
            slot,
            active_send: SendProps::default(),
            pending_effect: EffectProps::Null,
            pending_send: SendProps::default(),
            effect_count,
        })
    }

    pub fn sampling_rate(&self) -> u32 {
        self.device.frequency
    }

    pub fn channel_format(&self) -> ChannelFormat {
        self.device.channel_format
    }

    pub fn channel_count(&self) -> usize {
        self.device.channel_count
    }

    pub fn effect_count(&self) -> usize {
        self.effect_count
    }

    fn check_index(&self, effect_index: usize) -> Result<()> {
        if effect_index < self.effect_count {
            Ok(())
        } else {
            Err(anyhow!("Effect index out of range: {effect_index}"))
        }
    }

    /// The active effect parameters (what the DSP is using).
    pub fn effect(&self, effect_index: usize) -> Result<&EffectProps> {
        self.check_index(effect_index)?;
        Ok(&self.slot.props)
    }

    /// The pending effect parameters (what the next `apply_changes` will
    /// commit).
    pub fn deferred_effect(&self, effect_index: usize) -> Result<&EffectProps> {
        self.check_index(effect_index)?;
        Ok(&self.pending_effect)
    }

    /// Switch the pending effect to the defaults of `kind`.
    pub fn set_effect_type(&mut self, effect_index: usize, kind: EffectKind) -> Result<()> {
        self.check_index(effect_index)?;
        self.pending_effect = EffectProps::defaults_for(kind);
        Ok(())
    }

    /// Replace the pending effect. Out-of-range fields are clamped.
    pub fn set_effect(&mut self, effect_index: usize, props: EffectProps) -> Result<()> {
        self.check_index(effect_index)?;
        let mut props = props;
        props.normalize();
        self.pending_effect = props;
        Ok(())
    }

    /// The active send properties.
    pub fn send_props(&self, effect_index: usize) -> Result<SendProps> {
        self.check_index(effect_index)?;
        Ok(self.active_send)
    }

    /// The pending send properties.
    pub fn deferred_send_props(&self, effect_index: usize) -> Result<SendProps> {
        self.check_index(effect_index)?;
        Ok(self.pending_send)
    }

    /// Replace the pending send properties. Out-of-range gains are
    /// clamped.
    pub fn set_send_props(&mut self, effect_index: usize, props: SendProps) -> Result<()> {
        self.check_index(effect_index)?;
        let mut props = props;
        props.normalize();
        self.pending_send = props;
        Ok(())
    }

    /// Commit all pending changes. If the effect kind changed, the old
    /// state is dropped and a fresh (silent) state is built; otherwise
    /// the running state keeps its buffers and only re-derives its
    /// coefficients on the next mix.
    pub fn apply_changes(&mut self) -> Result<()> {
        let kind = self.pending_effect.kind();
        if !self.slot.state.serves(kind) {
            self.slot.state = EffectState::for_kind(kind, &self.device);
        }
        self.slot.props = self.pending_effect;
        self.slot.props_updated = true;

        self.active_send = self.pending_send;
        Ok(())
    }

    /// Mix `sample_count` interleaved frames from `src` through the
    /// engine, adding the result to `dst`. Output samples are not
    /// clipped.
    pub fn mix(&mut self, sample_count: usize, src: &[f32], dst: &mut [f32]) -> Result<()> {
        ensure!(sample_count > 0, "Sample count must be positive");
        let expected = sample_count * self.device.channel_count;
        ensure!(
            src.len() == expected,
            "Source buffer holds {} samples, expected {expected}",
            src.len()
        );
        ensure!(
            dst.len() == expected,
            "Destination buffer holds {} samples, expected {expected}",
            dst.len()
        );

        let channel_count = self.device.channel_count;

        let mut samples_done = 0;
        while samples_done < sample_count {
            let todo = (sample_count - samples_done).min(MAX_UPDATE_SAMPLES);

            for lane in &mut self.dry_buffer {
                lane[..todo].fill(0.0);
            }

            self.update_context();

            for lane in &mut self.slot.wet_buffer {
                lane[..todo].fill(0.0);
            }

            // Source processing
            let chunk = &src[samples_done * channel_count..(samples_done + todo) * channel_count];
            self.mix_source(chunk, todo);

            // Effect slot processing
            self.slot.state.process(
                todo,
                &self.slot.wet_buffer,
                &mut self.dry_buffer,
                channel_count,
            );

            // Accumulate the dry bus into the caller's interleaved output.
            let out = &mut dst[samples_done * channel_count..(samples_done + todo) * channel_count];
            for (c, lane) in self.dry_buffer.iter().enumerate() {
                for i in 0..todo {
                    out[i * channel_count + c] += lane[i];
                }
            }

            samples_done += todo;
        }

        Ok(())
    }

    /// Re-derive effect coefficients and source parameters if a commit
    /// flagged them dirty. Runs at chunk boundaries so parameter state is
    /// frozen within a chunk.
    fn update_context(&mut self) {
        if !self.slot.props_updated {
            return;
        }
        self.slot.props_updated = false;

        self.slot.state.update(&self.device, &self.slot.props);

        let aux_active = self.slot.props.kind() != EffectKind::Null;
        self.source.update(&self.device, &self.active_send, aux_active);
    }

    /// Deinterleave each input channel, run the direct and aux filters,
    /// and mix into the dry and wet buses.
    fn mix_source(&mut self, chunk: &[f32], todo: usize) {
        let channel_count = self.device.channel_count;

        for chan in 0..channel_count {
            for i in 0..todo {
                self.resampled[i] = chunk[i * channel_count + chan];
            }

            // Direct path; gains snap to their committed targets.
            let samples = self.source.direct.apply_filters(
                chan,
                &mut self.filtered[..todo],
                &self.resampled[..todo],
            );
            let target = self.source.direct.channels[chan].target_gains;
            let params = &mut self.source.direct.channels[chan];
            params.current_gains = target;
            mix(
                samples,
                channel_count,
                &mut self.dry_buffer,
                &mut params.current_gains,
                &target,
                0,
                0,
                todo,
            );

            if !self.source.aux_active {
                continue;
            }

            // Aux path into the B-format wet bus
            let samples = self.source.aux.apply_filters(
                chan,
                &mut self.filtered[..todo],
                &self.resampled[..todo],
            );
            let target = self.source.aux.channels[chan].target_gains;
            let params = &mut self.source.aux.channels[chan];
            params.current_gains = target;
            mix(
                samples,
                MAX_EFFECT_CHANNELS,
                &mut self.slot.wet_buffer,
                &mut params.current_gains,
                &target,
                0,
                0,
                todo,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{ChorusProps, ChorusWaveform, EchoProps};
    use crate::presets;

    fn impulse_stereo(frames: usize) -> Vec<f32> {
        let mut src = vec![0.0; frames * 2];
        src[0] = 1.0;
        src
    }

    #[test]
    fn test_new_validates_configuration() {
        assert!(Engine::new(ChannelFormat::Stereo, 44_100, 1).is_ok());
        assert!(Engine::new(ChannelFormat::Stereo, 7_999, 1).is_err());
        assert!(Engine::new(ChannelFormat::Stereo, 192_001, 1).is_err());
        assert!(Engine::new(ChannelFormat::Stereo, 44_100, 0).is_err());
        assert!(Engine::new(ChannelFormat::Stereo, 44_100, 2).is_err());
    }

    #[test]
    fn test_accessors() {
        let engine = Engine::new(ChannelFormat::FivePointOne, 48_000, 1).unwrap();
        assert_eq!(engine.sampling_rate(), 48_000);
        assert_eq!(engine.channel_format(), ChannelFormat::FivePointOne);
        assert_eq!(engine.channel_count(), 6);
        assert_eq!(engine.effect_count(), 1);
        assert!(engine.effect(1).is_err());
        assert!(engine.effect(0).is_ok());
    }

    #[test]
    fn test_mix_validates_buffers() {
        let mut engine = Engine::new(ChannelFormat::Stereo, 44_100, 1).unwrap();
        let src = vec![0.0; 8];
        let mut dst = vec![0.0; 8];
        assert!(engine.mix(0, &src, &mut dst).is_err());
        assert!(engine.mix(4, &src, &mut dst).is_ok());
        assert!(engine.mix(5, &src, &mut dst).is_err());
        let mut short_dst = vec![0.0; 6];
        assert!(engine.mix(4, &src, &mut short_dst).is_err());
    }

    #[test]
    fn test_null_effect_impulse_identity() {
        // S1: a null-effect engine passes the input through unchanged.
        let mut engine = Engine::new(ChannelFormat::Stereo, 44_100, 1).unwrap();
        engine.set_effect_type(0, EffectKind::Null).unwrap();
        engine.apply_changes().unwrap();

        let src = impulse_stereo(256);
        let mut dst = vec![0.0; 256 * 2];
        engine.mix(256, &src, &mut dst).unwrap();

        assert!((dst[0] - 1.0).abs() < 1e-6);
        assert_eq!(dst[1], 0.0);
        assert!(dst[2..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_null_effect_scales_with_send_gain() {
        // Property 6: dst += send.gain * src per channel.
        let mut engine = Engine::new(ChannelFormat::Stereo, 44_100, 1).unwrap();
        engine
            .set_send_props(
                0,
                SendProps {
                    gain: 0.5,
                    gain_hf: 1.0,
                    gain_lf: 1.0,
                },
            )
            .unwrap();
        engine.apply_changes().unwrap();

        let src: Vec<f32> = (0..64).map(|i| (i as f32 * 0.1).sin()).collect();
        let mut dst = vec![0.25; 64];
        engine.mix(32, &src, &mut dst).unwrap();

        for (i, &s) in src.iter().enumerate() {
            assert!((dst[i] - (0.25 + 0.5 * s)).abs() < 1e-5, "sample {i}");
        }
    }

    #[test]
    fn test_output_accumulates() {
        let mut engine = Engine::new(ChannelFormat::Mono, 44_100, 1).unwrap();
        let src = vec![1.0; 16];
        let mut dst = vec![2.0; 16];
        engine.mix(16, &src, &mut dst).unwrap();
        for &s in &dst {
            assert!((s - 3.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_setters_are_deferred_until_apply() {
        // Property 5 and the deferred-commit contract.
        let mut engine = Engine::new(ChannelFormat::Stereo, 44_100, 1).unwrap();

        let mut props = EchoProps::default();
        props.feedback = 2.0; // clamps to 1.0
        engine.set_effect(0, EffectProps::Echo(props)).unwrap();

        // Active side still null, pending side normalized echo.
        assert_eq!(*engine.effect(0).unwrap(), EffectProps::Null);
        let EffectProps::Echo(pending) = *engine.deferred_effect(0).unwrap() else {
            panic!("pending effect should be echo");
        };
        assert_eq!(pending.feedback, 1.0);

        engine.apply_changes().unwrap();
        assert_eq!(
            *engine.effect(0).unwrap(),
            *engine.deferred_effect(0).unwrap()
        );

        // Send props follow the same two-snapshot scheme.
        let send = SendProps {
            gain: 0.25,
            gain_hf: 1.0,
            gain_lf: 1.0,
        };
        engine.set_send_props(0, send).unwrap();
        assert_eq!(engine.send_props(0).unwrap(), SendProps::default());
        assert_eq!(engine.deferred_send_props(0).unwrap(), send);
        engine.apply_changes().unwrap();
        assert_eq!(engine.send_props(0).unwrap(), send);
    }

    #[test]
    fn test_mix_uses_previous_params_without_apply() {
        let mut engine = Engine::new(ChannelFormat::Mono, 44_100, 1).unwrap();
        engine
            .set_send_props(
                0,
                SendProps {
                    gain: 0.0,
                    gain_hf: 1.0,
                    gain_lf: 1.0,
                },
            )
            .unwrap();
        // No apply_changes: the mix still runs at the default unity gain.
        let src = vec![0.5; 8];
        let mut dst = vec![0.0; 8];
        engine.mix(8, &src, &mut dst).unwrap();
        assert!((dst[0] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_block_split_equivalence() {
        // Properties 7/8: output is independent of mix() call splitting,
        // including splits that cross the internal chunk size.
        let frames = 700;
        let src: Vec<f32> = (0..frames * 2)
            .map(|i| ((i as f32) * 0.013).sin() * 0.5)
            .collect();

        let mut one_call = Engine::new(ChannelFormat::Stereo, 44_100, 1).unwrap();
        one_call.set_effect_type(0, EffectKind::Echo).unwrap();
        one_call.apply_changes().unwrap();
        let mut dst_one = vec![0.0; frames * 2];
        one_call.mix(frames, &src, &mut dst_one).unwrap();

        let mut split = Engine::new(ChannelFormat::Stereo, 44_100, 1).unwrap();
        split.set_effect_type(0, EffectKind::Echo).unwrap();
        split.apply_changes().unwrap();
        let mut dst_split = vec![0.0; frames * 2];
        let cuts = [1usize, 127, 256, 316];
        let mut done = 0;
        for &n in &cuts {
            split
                .mix(n, &src[done * 2..(done + n) * 2], &mut dst_split[done * 2..(done + n) * 2])
                .unwrap();
            done += n;
        }
        assert_eq!(done, frames);

        for i in 0..frames * 2 {
            assert!(
                (dst_one[i] - dst_split[i]).abs() < 1e-6,
                "sample {i}: {} vs {}",
                dst_one[i],
                dst_split[i]
            );
        }
    }

    #[test]
    fn test_echo_tap_timing_through_engine() {
        // S2: echo taps land at round(delay*rate)+1 and +round(lr_delay*
        // rate) frames.
        let mut engine = Engine::new(ChannelFormat::Stereo, 44_100, 1).unwrap();
        engine
            .set_effect(
                0,
                EffectProps::Echo(EchoProps {
                    delay: 0.1,
                    lr_delay: 0.1,
                    damping: 0.0,
                    feedback: 0.5,
                    spread: 0.0,
                }),
            )
            .unwrap();
        engine.apply_changes().unwrap();

        let frames = 9_000;
        let src = impulse_stereo(frames);
        let mut dst = vec![0.0; frames * 2];
        engine.mix(frames, &src, &mut dst).unwrap();

        let tap1 = 4_411;
        let tap2 = 8_821;

        // The dry impulse passes through at frame 0.
        assert!((dst[0] - 1.0).abs() < 1e-5);
        // Between the dry signal and the first tap: silence.
        for frame in 1..tap1 {
            assert_eq!(dst[frame * 2], 0.0, "frame {frame} left");
            assert_eq!(dst[frame * 2 + 1], 0.0, "frame {frame} right");
        }
        // Both taps produce output on at least one side.
        assert!(dst[tap1 * 2].abs() > 0.0 || dst[tap1 * 2 + 1].abs() > 0.0);
        assert!(dst[tap2 * 2].abs() > 0.0 || dst[tap2 * 2 + 1].abs() > 0.0);
    }

    #[test]
    fn test_chorus_energy_stays_bounded() {
        // S3-flavored check: a steady tone through the chorus keeps its
        // energy in the same ballpark as the dry input.
        let mut engine = Engine::new(ChannelFormat::Stereo, 44_100, 1).unwrap();
        engine
            .set_effect(
                0,
                EffectProps::Chorus(ChorusProps {
                    waveform: ChorusWaveform::Triangle,
                    phase: 90,
                    rate: 1.1,
                    depth: 0.1,
                    feedback: 0.25,
                    delay: 0.016,
                }),
            )
            .unwrap();
        engine.apply_changes().unwrap();

        let frames = 44_100 / 2;
        let src: Vec<f32> = (0..frames * 2)
            .map(|i| {
                let frame = i / 2;
                (frame as f32 * 1_000.0 * std::f32::consts::TAU / 44_100.0).sin() * 0.5
            })
            .collect();
        let mut dst = vec![0.0; frames * 2];
        engine.mix(frames, &src, &mut dst).unwrap();

        let rms: f32 = {
            let sum: f32 = dst.iter().map(|s| s * s).sum();
            (sum / dst.len() as f32).sqrt()
        };
        // Dry RMS of a 0.5 amplitude sine is ~0.354; the wet add stays
        // within the modulation bounds.
        assert!(rms > 0.3, "rms {rms}");
        assert!(rms < 0.7, "rms {rms}");
    }

    #[test]
    fn test_reverb_preset_engine_smoke() {
        // S6-flavored: the generic preset produces a tail that decays.
        let mut engine = Engine::new(ChannelFormat::Stereo, 44_100, 1).unwrap();
        engine
            .set_effect(0, EffectProps::EaxReverb(presets::GENERIC))
            .unwrap();
        engine.apply_changes().unwrap();

        let frames = 44_100 * 2;
        let src = impulse_stereo(frames);
        let mut dst = vec![0.0; frames * 2];
        engine.mix(frames, &src, &mut dst).unwrap();

        let window_rms = |start: usize, len: usize| -> f32 {
            let sum: f32 = dst[start * 2..(start + len) * 2].iter().map(|s| s * s).sum();
            (sum / (len * 2) as f32).sqrt()
        };

        let early = window_rms(2_000, 4_410);
        let late = window_rms(80_000, 4_410);
        assert!(early > 0.0);
        assert!(late < early);
    }

    #[test]
    fn test_effect_kind_switch_rebuilds_state() {
        let mut engine = Engine::new(ChannelFormat::Stereo, 44_100, 1).unwrap();
        engine.set_effect_type(0, EffectKind::Echo).unwrap();
        engine.apply_changes().unwrap();

        // Feed some signal into the echo's delay line.
        let src = vec![0.7; 512 * 2];
        let mut dst = vec![0.0; 512 * 2];
        engine.mix(512, &src, &mut dst).unwrap();

        // Switch away and back; the new echo state starts silent.
        engine.set_effect_type(0, EffectKind::Null).unwrap();
        engine.apply_changes().unwrap();
        engine.set_effect_type(0, EffectKind::Echo).unwrap();
        engine.apply_changes().unwrap();

        let silent = vec![0.0; 8_192 * 2];
        let mut out = vec![0.0; 8_192 * 2];
        engine.mix(8_192, &silent, &mut out).unwrap();
        assert!(out.iter().all(|&s| s == 0.0));
    }
}
