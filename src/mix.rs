/// Low-level mixers: one input lane fanned out to many output lanes with
/// gain stepping, and its inverse, many lanes folded into one through a
/// matrix row.

use crate::{SampleLane, SILENCE_THRESHOLD_GAIN};

/// Mix `data` into the first `out_channels` lanes of `out`, each with its
/// own gain. When `counter` is non-zero the gain of each lane steps from
/// `current_gains` toward `target_gains` over that many samples; lanes
/// whose settled gain is below the silence threshold are skipped.
pub(crate) fn mix(
    data: &[f32],
    out_channels: usize,
    out: &mut [SampleLane],
    current_gains: &mut [f32],
    target_gains: &[f32],
    counter: usize,
    out_pos: usize,
    buffer_size: usize,
) {
    let delta = if counter > 0 {
        1.0 / counter as f32
    } else {
        0.0
    };

    for c in 0..out_channels {
        let mut pos = 0;
        let mut gain = current_gains[c];
        let step = (target_gains[c] - gain) * delta;

        if step.abs() > f32::EPSILON {
            let size = buffer_size.min(counter);
            while pos < size {
                out[c][out_pos + pos] += data[pos] * gain;
                gain += step;
                pos += 1;
            }
            if pos == counter {
                gain = target_gains[c];
            }
            current_gains[c] = gain;
        }

        if gain.abs() <= SILENCE_THRESHOLD_GAIN {
            continue;
        }
        while pos < buffer_size {
            out[c][out_pos + pos] += data[pos] * gain;
            pos += 1;
        }
    }
}

/// The inverse of `mix`: multiple input lanes (each with its own gain)
/// accumulated into one output. This applies one row of a matrix
/// transform; the matrices are static once set up, so no stepping.
pub(crate) fn mix_row(
    out: &mut [f32],
    gains: &[f32],
    data: &[SampleLane],
    in_channels: usize,
    in_pos: usize,
    buffer_size: usize,
) {
    for c in 0..in_channels {
        let gain = gains[c];
        if gain.abs() <= SILENCE_THRESHOLD_GAIN {
            continue;
        }
        for i in 0..buffer_size {
            out[i] += data[c][in_pos + i] * gain;
        }
    }
}
