/// Ambisonic panning: spherical-harmonic coefficient computation and the
/// per-layout decoder matrices that turn them into speaker gains.
///
/// Coefficients are ACN-ordered with N3D normalization, up to third order.

use std::f32::consts::TAU;

use crate::channels::{channel_index, ChannelFormat, ChannelId};
use crate::{MAX_AMBI_COEFFS, MAX_EFFECT_CHANNELS, MAX_OUTPUT_CHANNELS};

/// Ambisonic coefficients based on a direction vector. The vector must be
/// normalized (unit length) in listener coordinates (+X right, +Y up,
/// -Z forward); `spread` is the angular coverage of the sound in radians
/// (0 = point source, tau = full sphere).
pub(crate) fn calc_direction_coeffs(
    dir: [f32; 3],
    spread: f32,
    coeffs: &mut [f32; MAX_AMBI_COEFFS],
) {
    // Convert from listener coords to Ambisonics.
    let x = -dir[2];
    let y = -dir[0];
    let z = dir[1];

    // Zeroth-order
    coeffs[0] = 1.0; // ACN 0 = 1

    // First-order
    coeffs[1] = 1.732_050_8 * y; // ACN 1 = sqrt(3) * Y
    coeffs[2] = 1.732_050_8 * z; // ACN 2 = sqrt(3) * Z
    coeffs[3] = 1.732_050_8 * x; // ACN 3 = sqrt(3) * X

    // Second-order
    coeffs[4] = 3.872_983_3 * x * y; // ACN 4 = sqrt(15) * X * Y
    coeffs[5] = 3.872_983_3 * y * z; // ACN 5 = sqrt(15) * Y * Z
    coeffs[6] = 1.118_034 * (3.0 * z * z - 1.0); // ACN 6 = sqrt(5)/2 * (3*Z*Z - 1)
    coeffs[7] = 3.872_983_3 * x * z; // ACN 7 = sqrt(15) * X * Z
    coeffs[8] = 1.936_491_7 * (x * x - y * y); // ACN 8 = sqrt(15)/2 * (X*X - Y*Y)

    // Third-order
    coeffs[9] = 2.091_650_1 * y * (3.0 * x * x - y * y); // ACN  9 = sqrt(35/8) * Y * (3*X*X - Y*Y)
    coeffs[10] = 10.246_951 * z * x * y; // ACN 10 = sqrt(105) * Z * X * Y
    coeffs[11] = 1.620_185_2 * y * (5.0 * z * z - 1.0); // ACN 11 = sqrt(21/8) * Y * (5*Z*Z - 1)
    coeffs[12] = 1.322_875_7 * z * (5.0 * z * z - 3.0); // ACN 12 = sqrt(7)/2 * Z * (5*Z*Z - 3)
    coeffs[13] = 1.620_185_2 * x * (5.0 * z * z - 1.0); // ACN 13 = sqrt(21/8) * X * (5*Z*Z - 1)
    coeffs[14] = 5.123_475_3 * z * (x * x - y * y); // ACN 14 = sqrt(105)/2 * Z * (X*X - Y*Y)
    coeffs[15] = 2.091_650_1 * x * (x * x - 3.0 * y * y); // ACN 15 = sqrt(35/8) * X * (X*X - 3*Y*Y)

    if spread > 0.0 {
        // Implement the spread by using a spherical source that subtends the
        // angle spread; the zonal harmonics of such a cap scale each order.
        // See http://www.ppsloan.org/publications/StupidSH36.pdf Appendix A3.
        //
        // The gain of the source is compensated for size so the loudness
        // doesn't depend on the spread: up to +3dB for a full spread.
        let ca = (spread * 0.5).cos();
        let scale = (1.0 + spread / TAU).sqrt();

        let zh0_norm = scale;
        let zh1_norm = 0.5 * (ca + 1.0) * scale;
        let zh2_norm = 0.5 * (ca + 1.0) * ca * scale;
        let zh3_norm = 0.125 * (ca + 1.0) * (5.0 * ca * ca - 1.0) * scale;

        coeffs[0] *= zh0_norm;
        for c in &mut coeffs[1..4] {
            *c *= zh1_norm;
        }
        for c in &mut coeffs[4..9] {
            *c *= zh2_norm;
        }
        for c in &mut coeffs[9..16] {
            *c *= zh3_norm;
        }
    }
}

/// Ambisonic coefficients from azimuth and elevation, both in radians,
/// going right and up respectively.
pub(crate) fn calc_angle_coeffs(
    azimuth: f32,
    elevation: f32,
    spread: f32,
    coeffs: &mut [f32; MAX_AMBI_COEFFS],
) {
    let dir = [
        azimuth.sin() * elevation.cos(),
        elevation.sin(),
        -azimuth.cos() * elevation.cos(),
    ];
    calc_direction_coeffs(dir, spread, coeffs);
}

// ========================================================================
// DECODER MATRICES
// ========================================================================

type ChannelConfig = [f32; MAX_AMBI_COEFFS];

struct ChannelMap {
    name: ChannelId,
    config: ChannelConfig,
}

const fn pad(head: &[f32]) -> ChannelConfig {
    let mut config = [0.0; MAX_AMBI_COEFFS];
    let mut i = 0;
    while i < head.len() {
        config[i] = head[i];
        i += 1;
    }
    config
}

const fn row(name: ChannelId, head: &[f32]) -> ChannelMap {
    ChannelMap {
        name,
        config: pad(head),
    }
}

static MONO_CFG: [ChannelMap; 1] = [row(ChannelId::FrontCenter, &[1.0])];

static STEREO_CFG: [ChannelMap; 2] = [
    row(ChannelId::FrontLeft, &[5.00000000E-1, 2.88675135E-1, 0.0, 1.19573156E-1]),
    row(ChannelId::FrontRight, &[5.00000000E-1, -2.88675135E-1, 0.0, 1.19573156E-1]),
];

static QUAD_CFG: [ChannelMap; 4] = [
    row(ChannelId::BackLeft, &[3.53553391E-1, 2.04124145E-1, 0.0, -2.04124145E-1]),
    row(ChannelId::FrontLeft, &[3.53553391E-1, 2.04124145E-1, 0.0, 2.04124145E-1]),
    row(ChannelId::FrontRight, &[3.53553391E-1, -2.04124145E-1, 0.0, 2.04124145E-1]),
    row(ChannelId::BackRight, &[3.53553391E-1, -2.04124145E-1, 0.0, -2.04124145E-1]),
];

static X5_1_SIDE_CFG: [ChannelMap; 5] = [
    row(ChannelId::SideLeft, &[3.33001372E-1, 1.89085671E-1, 0.0, -2.00041334E-1, -2.12309737E-2, 0.0, 0.0, 0.0, -1.14573483E-2]),
    row(ChannelId::FrontLeft, &[1.47751298E-1, 1.28994110E-1, 0.0, 1.15190495E-1, 7.44949143E-2, 0.0, 0.0, 0.0, -6.47739980E-3]),
    row(ChannelId::FrontCenter, &[7.73595729E-2, 0.00000000E+0, 0.0, 9.71390298E-2, 0.00000000E+0, 0.0, 0.0, 0.0, 5.18625335E-2]),
    row(ChannelId::FrontRight, &[1.47751298E-1, -1.28994110E-1, 0.0, 1.15190495E-1, -7.44949143E-2, 0.0, 0.0, 0.0, -6.47739980E-3]),
    row(ChannelId::SideRight, &[3.33001372E-1, -1.89085671E-1, 0.0, -2.00041334E-1, 2.12309737E-2, 0.0, 0.0, 0.0, -1.14573483E-2]),
];

static X5_1_REAR_CFG: [ChannelMap; 5] = [
    row(ChannelId::BackLeft, &[3.33001372E-1, 1.89085671E-1, 0.0, -2.00041334E-1, -2.12309737E-2, 0.0, 0.0, 0.0, -1.14573483E-2]),
    row(ChannelId::FrontLeft, &[1.47751298E-1, 1.28994110E-1, 0.0, 1.15190495E-1, 7.44949143E-2, 0.0, 0.0, 0.0, -6.47739980E-3]),
    row(ChannelId::FrontCenter, &[7.73595729E-2, 0.00000000E+0, 0.0, 9.71390298E-2, 0.00000000E+0, 0.0, 0.0, 0.0, 5.18625335E-2]),
    row(ChannelId::FrontRight, &[1.47751298E-1, -1.28994110E-1, 0.0, 1.15190495E-1, -7.44949143E-2, 0.0, 0.0, 0.0, -6.47739980E-3]),
    row(ChannelId::BackRight, &[3.33001372E-1, -1.89085671E-1, 0.0, -2.00041334E-1, 2.12309737E-2, 0.0, 0.0, 0.0, -1.14573483E-2]),
];

static X6_1_CFG: [ChannelMap; 6] = [
    row(ChannelId::SideLeft, &[2.04462744E-1, 2.17178497E-1, 0.0, -4.39990188E-2, -2.60787329E-2, 0.0, 0.0, 0.0, -6.87238843E-2]),
    row(ChannelId::FrontLeft, &[1.18130342E-1, 9.34633906E-2, 0.0, 1.08553749E-1, 6.80658795E-2, 0.0, 0.0, 0.0, 1.08999485E-2]),
    row(ChannelId::FrontCenter, &[7.73595729E-2, 0.00000000E+0, 0.0, 9.71390298E-2, 0.00000000E+0, 0.0, 0.0, 0.0, 5.18625335E-2]),
    row(ChannelId::FrontRight, &[1.18130342E-1, -9.34633906E-2, 0.0, 1.08553749E-1, -6.80658795E-2, 0.0, 0.0, 0.0, 1.08999485E-2]),
    row(ChannelId::SideRight, &[2.04462744E-1, -2.17178497E-1, 0.0, -4.39990188E-2, 2.60787329E-2, 0.0, 0.0, 0.0, -6.87238843E-2]),
    row(ChannelId::BackCenter, &[2.50001688E-1, 0.00000000E+0, 0.0, -2.50000094E-1, 0.00000000E+0, 0.0, 0.0, 0.0, 6.05133395E-2]),
];

static X7_1_CFG: [ChannelMap; 6] = [
    row(ChannelId::BackLeft, &[2.04124145E-1, 1.08880247E-1, 0.0, -1.88586120E-1, -1.29099444E-1, 0.0, 0.0, 0.0, 7.45355993E-2, 3.73460789E-2, 0.0, 0.0, 0.0, 0.0, 0.0, 0.00000000E+0]),
    row(ChannelId::SideLeft, &[2.04124145E-1, 2.17760495E-1, 0.0, 0.00000000E+0, 0.00000000E+0, 0.0, 0.0, 0.0, -1.49071198E-1, -3.73460789E-2, 0.0, 0.0, 0.0, 0.0, 0.0, 0.00000000E+0]),
    row(ChannelId::FrontLeft, &[2.04124145E-1, 1.08880247E-1, 0.0, 1.88586120E-1, 1.29099444E-1, 0.0, 0.0, 0.0, 7.45355993E-2, 3.73460789E-2, 0.0, 0.0, 0.0, 0.0, 0.0, 0.00000000E+0]),
    row(ChannelId::FrontRight, &[2.04124145E-1, -1.08880247E-1, 0.0, 1.88586120E-1, -1.29099444E-1, 0.0, 0.0, 0.0, 7.45355993E-2, -3.73460789E-2, 0.0, 0.0, 0.0, 0.0, 0.0, 0.00000000E+0]),
    row(ChannelId::SideRight, &[2.04124145E-1, -2.17760495E-1, 0.0, 0.00000000E+0, 0.00000000E+0, 0.0, 0.0, 0.0, -1.49071198E-1, 3.73460789E-2, 0.0, 0.0, 0.0, 0.0, 0.0, 0.00000000E+0]),
    row(ChannelId::BackRight, &[2.04124145E-1, -1.08880247E-1, 0.0, -1.88586120E-1, 1.29099444E-1, 0.0, 0.0, 0.0, 7.45355993E-2, -3.73460789E-2, 0.0, 0.0, 0.0, 0.0, 0.0, 0.00000000E+0]),
];

/// Decoder for the dry (main output) path: one row of ambisonic
/// coefficients per output channel.
#[derive(Debug, Clone)]
pub(crate) struct AmbiDecoder {
    pub coeffs: [[f32; MAX_AMBI_COEFFS]; MAX_OUTPUT_CHANNELS],
    /// Coefficients per row actually decoded (1, 4, 9 or 16).
    pub coeff_count: usize,
    pub num_channels: usize,
}

/// First-order output decoder used to route B-format effect output back
/// into the speaker layout. Always four coefficients per row.
#[derive(Debug, Clone)]
pub(crate) struct FoaDecoder {
    pub coeffs: [[f32; 4]; MAX_OUTPUT_CHANNELS],
    pub num_channels: usize,
}

impl AmbiDecoder {
    /// Build the decoder for a channel format by matching the layout's
    /// ordered speaker list against the format's coefficient table. LFE
    /// rows stay zero; LFE is only ever driven by discrete routing.
    pub fn for_format(format: ChannelFormat, names: &[ChannelId]) -> AmbiDecoder {
        let (table, coeff_count): (&[ChannelMap], usize) = match format {
            ChannelFormat::Mono => (&MONO_CFG, 1),
            ChannelFormat::Stereo => (&STEREO_CFG, 4),
            ChannelFormat::Quad => (&QUAD_CFG, 4),
            ChannelFormat::FivePointOne => (&X5_1_SIDE_CFG, 9),
            ChannelFormat::FivePointOneRear => (&X5_1_REAR_CFG, 9),
            ChannelFormat::SixPointOne => (&X6_1_CFG, 9),
            ChannelFormat::SevenPointOne => (&X7_1_CFG, 16),
        };

        let mut decoder = AmbiDecoder {
            coeffs: [[0.0; MAX_AMBI_COEFFS]; MAX_OUTPUT_CHANNELS],
            coeff_count,
            num_channels: names.len(),
        };

        for (i, &name) in names.iter().enumerate() {
            if name == ChannelId::Lfe {
                continue;
            }
            if let Some(entry) = table.iter().find(|entry| entry.name == name) {
                decoder.coeffs[i] = entry.config;
            }
        }

        decoder
    }

    /// The first-order slice of this decoder.
    pub fn foa(&self) -> FoaDecoder {
        let mut foa = FoaDecoder {
            coeffs: [[0.0; 4]; MAX_OUTPUT_CHANNELS],
            num_channels: self.num_channels,
        };
        for i in 0..self.num_channels {
            foa.coeffs[i].copy_from_slice(&self.coeffs[i][..4]);
        }
        foa
    }
}

// ========================================================================
// GAIN COMPUTATION
// ========================================================================

/// Per-channel gains for a panned sound: decoder rows dotted with the
/// ambisonic coefficient vector, clamped to [0, 1] and scaled by `in_gain`.
pub(crate) fn compute_panning_gains(
    decoder: &AmbiDecoder,
    coeffs: &[f32; MAX_AMBI_COEFFS],
    in_gain: f32,
    gains: &mut [f32; MAX_OUTPUT_CHANNELS],
) {
    for (i, out) in gains.iter_mut().enumerate() {
        if i < decoder.num_channels {
            let mut gain = 0.0;
            for j in 0..decoder.coeff_count {
                gain += decoder.coeffs[i][j] * coeffs[j];
            }
            *out = gain.clamp(0.0, 1.0) * in_gain;
        } else {
            *out = 0.0;
        }
    }
}

/// Gains that pan a sound into the four B-format wet-bus lanes. The wet bus
/// is an identity-mapped ACN/N3D soundfield, so each lane just takes its
/// matching coefficient.
pub(crate) fn compute_panning_gains_bformat(
    coeffs: &[f32; MAX_AMBI_COEFFS],
    in_gain: f32,
    gains: &mut [f32; MAX_OUTPUT_CHANNELS],
) {
    for (i, out) in gains.iter_mut().enumerate() {
        if i < MAX_EFFECT_CHANNELS {
            *out = coeffs[i] * in_gain;
        } else {
            *out = 0.0;
        }
    }
}

/// Per-channel gains for one first-order B-format input channel. The matrix
/// argument is a 1x4 slice of a transform matrix used to scale and orient
/// the soundfield.
pub(crate) fn compute_first_order_gains(
    foa: &FoaDecoder,
    matrix: &[f32; 4],
    in_gain: f32,
    gains: &mut [f32; MAX_OUTPUT_CHANNELS],
) {
    for (i, out) in gains.iter_mut().enumerate() {
        if i < foa.num_channels {
            let mut gain = 0.0;
            for j in 0..4 {
                gain += foa.coeffs[i][j] * matrix[j];
            }
            *out = gain.clamp(0.0, 1.0) * in_gain;
        } else {
            *out = 0.0;
        }
    }
}

/// Per-channel gains for an omni-directional (ambient) sound: only the
/// zeroth-order coefficient contributes.
pub(crate) fn compute_ambient_gains(
    decoder: &AmbiDecoder,
    in_gain: f32,
    gains: &mut [f32; MAX_OUTPUT_CHANNELS],
) {
    for (i, out) in gains.iter_mut().enumerate() {
        if i < decoder.num_channels {
            *out = decoder.coeffs[i][0] * 1.414_213_6 * in_gain;
        } else {
            *out = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_acn0_is_unity_without_spread() {
        let mut coeffs = [0.0; MAX_AMBI_COEFFS];
        calc_angle_coeffs(0.3, -0.2, 0.0, &mut coeffs);
        assert!((coeffs[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_front_direction_has_positive_x() {
        // Azimuth 0, elevation 0 faces -Z for the listener, +X in ambisonics.
        let mut coeffs = [0.0; MAX_AMBI_COEFFS];
        calc_angle_coeffs(0.0, 0.0, 0.0, &mut coeffs);
        assert!((coeffs[3] - 1.732_050_8).abs() < 1e-4);
        assert!(coeffs[1].abs() < 1e-6);
        assert!(coeffs[2].abs() < 1e-6);
    }

    #[test]
    fn test_left_right_symmetry() {
        let mut left = [0.0; MAX_AMBI_COEFFS];
        let mut right = [0.0; MAX_AMBI_COEFFS];
        calc_angle_coeffs(-FRAC_PI_2, 0.0, 0.0, &mut left);
        calc_angle_coeffs(FRAC_PI_2, 0.0, 0.0, &mut right);
        // ACN 1 is the Y (left/right) axis.
        assert!((left[1] + right[1]).abs() < 1e-4);
        assert!(left[1] > 0.0);
    }

    #[test]
    fn test_full_spread_boosts_by_3db() {
        let mut point = [0.0; MAX_AMBI_COEFFS];
        let mut spread = [0.0; MAX_AMBI_COEFFS];
        calc_angle_coeffs(0.0, 0.0, 0.0, &mut point);
        calc_angle_coeffs(0.0, 0.0, std::f32::consts::TAU, &mut spread);

        // W gains sqrt(2); directional components vanish (cap covers the
        // whole sphere).
        assert!((spread[0] - 2.0f32.sqrt()).abs() < 1e-4);
        assert!(spread[3].abs() < 1e-4);
        assert!(point[3] > 1.0);
    }

    #[test]
    fn test_lfe_decoder_row_is_zero() {
        let format = ChannelFormat::FivePointOne;
        let decoder = AmbiDecoder::for_format(format, format.channel_names());
        assert_eq!(decoder.coeff_count, 9);
        assert!(decoder.coeffs[3].iter().all(|&c| c == 0.0));
        // Front-left row is populated.
        assert!(decoder.coeffs[0][0] > 0.0);
    }

    #[test]
    fn test_seven_one_has_no_center_row() {
        let format = ChannelFormat::SevenPointOne;
        let decoder = AmbiDecoder::for_format(format, format.channel_names());
        // Front-center (index 2) has no table entry and stays zero.
        assert!(decoder.coeffs[2].iter().all(|&c| c == 0.0));
        assert_eq!(decoder.coeff_count, 16);
    }

    #[test]
    fn test_stereo_panning_gains() {
        let format = ChannelFormat::Stereo;
        let decoder = AmbiDecoder::for_format(format, format.channel_names());

        let mut coeffs = [0.0; MAX_AMBI_COEFFS];
        calc_angle_coeffs(-PI / 6.0, 0.0, 0.0, &mut coeffs);

        let mut gains = [0.0; MAX_OUTPUT_CHANNELS];
        compute_panning_gains(&decoder, &coeffs, 1.0, &mut gains);

        // A source at the left speaker position favors the left channel.
        assert!(gains[0] > gains[1]);
        assert!(gains[2..].iter().all(|&g| g == 0.0));
    }

    #[test]
    fn test_foa_slice_matches_dry() {
        let format = ChannelFormat::Quad;
        let decoder = AmbiDecoder::for_format(format, format.channel_names());
        let foa = decoder.foa();
        for i in 0..4 {
            assert_eq!(&decoder.coeffs[i][..4], &foa.coeffs[i][..]);
        }
    }

    #[test]
    fn test_bformat_gains_identity_mapping() {
        let mut coeffs = [0.0; MAX_AMBI_COEFFS];
        calc_angle_coeffs(0.4, 0.1, 0.0, &mut coeffs);

        let mut gains = [0.0; MAX_OUTPUT_CHANNELS];
        compute_panning_gains_bformat(&coeffs, 0.5, &mut gains);
        for i in 0..4 {
            assert!((gains[i] - coeffs[i] * 0.5).abs() < 1e-6);
        }
        assert!(gains[4..].iter().all(|&g| g == 0.0));
    }
}
