/// Named reverb presets: the I3DL2/EAX environment table, exposed as
/// plain `ReverbProps` values plus a by-name registry.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::effects::reverb::ReverbProps;

/// Build a preset from the canonical field order of the EFX preset table:
/// density, diffusion, gain, gain_hf, gain_lf, decay_time, decay_hf_ratio,
/// decay_lf_ratio, reflections gain/delay/pan, late gain/delay/pan,
/// echo time/depth, modulation time/depth, air absorption, HF/LF
/// reference, room rolloff, decay HF limit.
#[allow(clippy::too_many_arguments)]
const fn preset(
    density: f32,
    diffusion: f32,
    gain: f32,
    gain_hf: f32,
    gain_lf: f32,
    decay_time: f32,
    decay_hf_ratio: f32,
    decay_lf_ratio: f32,
    reflections_gain: f32,
    reflections_delay: f32,
    reflections_pan: [f32; 3],
    late_reverb_gain: f32,
    late_reverb_delay: f32,
    late_reverb_pan: [f32; 3],
    echo_time: f32,
    echo_depth: f32,
    modulation_time: f32,
    modulation_depth: f32,
    air_absorption_gain_hf: f32,
    hf_reference: f32,
    lf_reference: f32,
    room_rolloff_factor: f32,
    decay_hf_limit: bool,
) -> ReverbProps {
    ReverbProps {
        density,
        diffusion,
        gain,
        gain_hf,
        gain_lf,
        decay_time,
        decay_hf_ratio,
        decay_lf_ratio,
        reflections_gain,
        reflections_delay,
        reflections_pan,
        late_reverb_gain,
        late_reverb_delay,
        late_reverb_pan,
        echo_time,
        echo_depth,
        modulation_time,
        modulation_depth,
        air_absorption_gain_hf,
        hf_reference,
        lf_reference,
        room_rolloff_factor,
        decay_hf_limit,
    }
}

const NO_PAN: [f32; 3] = [0.0, 0.0, 0.0];

// ========================================================================
// DEFAULT ENVIRONMENTS
// ========================================================================

pub const GENERIC: ReverbProps = preset(1.0000, 1.0000, 0.3162, 0.8913, 1.0000, 1.4900, 0.8300, 1.0000, 0.0500, 0.0070, NO_PAN, 1.2589, 0.0110, NO_PAN, 0.2500, 0.0000, 0.2500, 0.0000, 0.9943, 5000.0, 250.0, 0.0, true);
pub const PADDED_CELL: ReverbProps = preset(0.1715, 1.0000, 0.3162, 0.0010, 1.0000, 0.1700, 0.1000, 1.0000, 0.2500, 0.0010, NO_PAN, 1.2691, 0.0020, NO_PAN, 0.2500, 0.0000, 0.2500, 0.0000, 0.9943, 5000.0, 250.0, 0.0, true);
pub const ROOM: ReverbProps = preset(0.4287, 1.0000, 0.3162, 0.5929, 1.0000, 0.4000, 0.8300, 1.0000, 0.1503, 0.0020, NO_PAN, 1.0629, 0.0030, NO_PAN, 0.2500, 0.0000, 0.2500, 0.0000, 0.9943, 5000.0, 250.0, 0.0, true);
pub const BATHROOM: ReverbProps = preset(0.1715, 0.7000, 0.3162, 0.2512, 1.0000, 1.4900, 0.5400, 1.0000, 0.6531, 0.0070, NO_PAN, 3.2734, 0.0110, NO_PAN, 0.2500, 0.0000, 0.2500, 0.0000, 0.9943, 5000.0, 250.0, 0.0, true);
pub const LIVING_ROOM: ReverbProps = preset(0.9766, 1.0000, 0.3162, 0.0010, 1.0000, 0.5000, 0.1000, 1.0000, 0.2051, 0.0030, NO_PAN, 0.2805, 0.0040, NO_PAN, 0.2500, 0.0000, 0.2500, 0.0000, 0.9943, 5000.0, 250.0, 0.0, true);
pub const STONE_ROOM: ReverbProps = preset(1.0000, 1.0000, 0.3162, 0.7079, 1.0000, 2.3100, 0.6400, 1.0000, 0.4411, 0.0120, NO_PAN, 1.1003, 0.0170, NO_PAN, 0.2500, 0.0000, 0.2500, 0.0000, 0.9943, 5000.0, 250.0, 0.0, true);
pub const AUDITORIUM: ReverbProps = preset(1.0000, 1.0000, 0.3162, 0.5781, 1.0000, 4.3200, 0.5900, 1.0000, 0.4032, 0.0200, NO_PAN, 0.7170, 0.0300, NO_PAN, 0.2500, 0.0000, 0.2500, 0.0000, 0.9943, 5000.0, 250.0, 0.0, true);
pub const CONCERT_HALL: ReverbProps = preset(1.0000, 1.0000, 0.3162, 0.5623, 1.0000, 3.9200, 0.7000, 1.0000, 0.2427, 0.0200, NO_PAN, 0.9977, 0.0290, NO_PAN, 0.2500, 0.0000, 0.2500, 0.0000, 0.9943, 5000.0, 250.0, 0.0, true);
pub const CAVE: ReverbProps = preset(1.0000, 1.0000, 0.3162, 1.0000, 1.0000, 2.9100, 1.3000, 1.0000, 0.5000, 0.0150, NO_PAN, 0.7063, 0.0220, NO_PAN, 0.2500, 0.0000, 0.2500, 0.0000, 0.9943, 5000.0, 250.0, 0.0, false);
pub const ARENA: ReverbProps = preset(1.0000, 1.0000, 0.3162, 0.4477, 1.0000, 7.2400, 0.3300, 1.0000, 0.2612, 0.0200, NO_PAN, 1.0186, 0.0300, NO_PAN, 0.2500, 0.0000, 0.2500, 0.0000, 0.9943, 5000.0, 250.0, 0.0, true);
pub const HANGAR: ReverbProps = preset(1.0000, 1.0000, 0.3162, 0.3162, 1.0000, 10.0500, 0.2300, 1.0000, 0.5000, 0.0200, NO_PAN, 1.2560, 0.0300, NO_PAN, 0.2500, 0.0000, 0.2500, 0.0000, 0.9943, 5000.0, 250.0, 0.0, true);
pub const CARPETED_HALLWAY: ReverbProps = preset(0.4287, 1.0000, 0.3162, 0.0100, 1.0000, 0.3000, 0.1000, 1.0000, 0.1215, 0.0020, NO_PAN, 0.1531, 0.0300, NO_PAN, 0.2500, 0.0000, 0.2500, 0.0000, 0.9943, 5000.0, 250.0, 0.0, true);
pub const HALLWAY: ReverbProps = preset(0.3645, 1.0000, 0.3162, 0.7079, 1.0000, 1.4900, 0.5900, 1.0000, 0.2458, 0.0070, NO_PAN, 1.6615, 0.0110, NO_PAN, 0.2500, 0.0000, 0.2500, 0.0000, 0.9943, 5000.0, 250.0, 0.0, true);
pub const STONE_CORRIDOR: ReverbProps = preset(1.0000, 1.0000, 0.3162, 0.7612, 1.0000, 2.7000, 0.7900, 1.0000, 0.2472, 0.0130, NO_PAN, 1.5758, 0.0200, NO_PAN, 0.2500, 0.0000, 0.2500, 0.0000, 0.9943, 5000.0, 250.0, 0.0, true);
pub const ALLEY: ReverbProps = preset(1.0000, 0.3000, 0.3162, 0.7328, 1.0000, 1.4900, 0.8600, 1.0000, 0.2500, 0.0070, NO_PAN, 0.9954, 0.0110, NO_PAN, 0.1250, 0.9500, 0.2500, 0.0000, 0.9943, 5000.0, 250.0, 0.0, true);
pub const FOREST: ReverbProps = preset(1.0000, 0.3000, 0.3162, 0.0224, 1.0000, 1.4900, 0.5400, 1.0000, 0.0525, 0.1620, NO_PAN, 0.7682, 0.0880, NO_PAN, 0.1250, 1.0000, 0.2500, 0.0000, 0.9943, 5000.0, 250.0, 0.0, true);
pub const CITY: ReverbProps = preset(1.0000, 0.5000, 0.3162, 0.3981, 1.0000, 1.4900, 0.6700, 1.0000, 0.0730, 0.0070, NO_PAN, 0.1427, 0.0110, NO_PAN, 0.2500, 0.0000, 0.2500, 0.0000, 0.9943, 5000.0, 250.0, 0.0, true);
pub const MOUNTAINS: ReverbProps = preset(1.0000, 0.2700, 0.3162, 0.0562, 1.0000, 1.4900, 0.2100, 1.0000, 0.0407, 0.3000, NO_PAN, 0.1919, 0.1000, NO_PAN, 0.2500, 1.0000, 0.2500, 0.0000, 0.9943, 5000.0, 250.0, 0.0, false);
pub const QUARRY: ReverbProps = preset(1.0000, 1.0000, 0.3162, 0.3162, 1.0000, 1.4900, 0.8300, 1.0000, 0.0000, 0.0610, NO_PAN, 1.7783, 0.0250, NO_PAN, 0.1250, 0.7000, 0.2500, 0.0000, 0.9943, 5000.0, 250.0, 0.0, true);
pub const PLAIN: ReverbProps = preset(1.0000, 0.2100, 0.3162, 0.1000, 1.0000, 1.4900, 0.5000, 1.0000, 0.0585, 0.1790, NO_PAN, 0.1089, 0.1000, NO_PAN, 0.2500, 1.0000, 0.2500, 0.0000, 0.9943, 5000.0, 250.0, 0.0, true);
pub const PARKING_LOT: ReverbProps = preset(1.0000, 1.0000, 0.3162, 1.0000, 1.0000, 1.6500, 1.5000, 1.0000, 0.2082, 0.0080, NO_PAN, 0.2652, 0.0120, NO_PAN, 0.2500, 0.0000, 0.2500, 0.0000, 0.9943, 5000.0, 250.0, 0.0, false);
pub const SEWER_PIPE: ReverbProps = preset(0.3071, 0.8000, 0.3162, 0.3162, 1.0000, 2.8100, 0.1400, 1.0000, 1.6387, 0.0140, NO_PAN, 3.2471, 0.0210, NO_PAN, 0.2500, 0.0000, 0.2500, 0.0000, 0.9943, 5000.0, 250.0, 0.0, true);
pub const UNDERWATER: ReverbProps = preset(0.3645, 1.0000, 0.3162, 0.0100, 1.0000, 1.4900, 0.1000, 1.0000, 0.5963, 0.0070, NO_PAN, 7.0795, 0.0110, NO_PAN, 0.2500, 0.0000, 1.1800, 0.3480, 0.9943, 5000.0, 250.0, 0.0, true);
pub const DRUGGED: ReverbProps = preset(0.4287, 0.5000, 0.3162, 1.0000, 1.0000, 8.3900, 1.3900, 1.0000, 0.8760, 0.0020, NO_PAN, 3.1081, 0.0300, NO_PAN, 0.2500, 0.0000, 0.2500, 1.0000, 0.9943, 5000.0, 250.0, 0.0, false);
pub const DIZZY: ReverbProps = preset(0.3645, 0.6000, 0.3162, 0.6310, 1.0000, 17.2300, 0.5600, 1.0000, 0.1392, 0.0200, NO_PAN, 0.4937, 0.0300, NO_PAN, 0.2500, 1.0000, 0.8100, 0.3100, 0.9943, 5000.0, 250.0, 0.0, false);
pub const PSYCHOTIC: ReverbProps = preset(0.0625, 0.5000, 0.3162, 0.8404, 1.0000, 7.5600, 0.9100, 1.0000, 0.4864, 0.0200, NO_PAN, 2.4378, 0.0300, NO_PAN, 0.2500, 0.0000, 4.0000, 1.0000, 0.9943, 5000.0, 250.0, 0.0, false);

// ========================================================================
// CASTLE
// ========================================================================

pub const CASTLE_SMALL_ROOM: ReverbProps = preset(1.0000, 0.8900, 0.3162, 0.3981, 0.1000, 1.2200, 0.8300, 0.3100, 0.8913, 0.0220, NO_PAN, 1.9953, 0.0110, NO_PAN, 0.1380, 0.0800, 0.2500, 0.0000, 0.9943, 5168.6, 139.5, 0.0, true);
pub const CASTLE_SHORT_PASSAGE: ReverbProps = preset(1.0000, 0.8900, 0.3162, 0.3162, 0.1000, 2.3200, 0.8300, 0.3100, 0.8913, 0.0070, NO_PAN, 1.2589, 0.0230, NO_PAN, 0.1380, 0.0800, 0.2500, 0.0000, 0.9943, 5168.6, 139.5, 0.0, true);
pub const CASTLE_MEDIUM_ROOM: ReverbProps = preset(1.0000, 0.9300, 0.3162, 0.2818, 0.1000, 2.0400, 0.8300, 0.4600, 0.6310, 0.0220, NO_PAN, 1.5849, 0.0110, NO_PAN, 0.1550, 0.0300, 0.2500, 0.0000, 0.9943, 5168.6, 139.5, 0.0, true);
pub const CASTLE_LARGE_ROOM: ReverbProps = preset(1.0000, 0.8200, 0.3162, 0.2818, 0.1259, 2.5300, 0.8300, 0.5000, 0.4467, 0.0340, NO_PAN, 1.2589, 0.0160, NO_PAN, 0.1850, 0.0700, 0.2500, 0.0000, 0.9943, 5168.6, 139.5, 0.0, true);
pub const CASTLE_LONG_PASSAGE: ReverbProps = preset(1.0000, 0.8900, 0.3162, 0.3981, 0.1000, 3.4200, 0.8300, 0.3100, 0.8913, 0.0070, NO_PAN, 1.4125, 0.0230, NO_PAN, 0.1380, 0.0800, 0.2500, 0.0000, 0.9943, 5168.6, 139.5, 0.0, true);
pub const CASTLE_HALL: ReverbProps = preset(1.0000, 0.8100, 0.3162, 0.2818, 0.1778, 3.1400, 0.7900, 0.6200, 0.1778, 0.0560, NO_PAN, 1.1220, 0.0240, NO_PAN, 0.2500, 0.0000, 0.2500, 0.0000, 0.9943, 5168.6, 139.5, 0.0, true);
pub const CASTLE_CUPBOARD: ReverbProps = preset(1.0000, 0.8900, 0.3162, 0.2818, 0.1000, 0.6700, 0.8700, 0.3100, 1.4125, 0.0100, NO_PAN, 3.5481, 0.0070, NO_PAN, 0.1380, 0.0800, 0.2500, 0.0000, 0.9943, 5168.6, 139.5, 0.0, true);
pub const CASTLE_COURTYARD: ReverbProps = preset(1.0000, 0.4200, 0.3162, 0.4467, 0.1995, 2.1300, 0.6100, 0.2300, 0.2239, 0.1600, NO_PAN, 0.7079, 0.0360, NO_PAN, 0.2500, 0.3700, 0.2500, 0.0000, 0.9943, 5000.0, 250.0, 0.0, false);
pub const CASTLE_ALCOVE: ReverbProps = preset(1.0000, 0.8900, 0.3162, 0.5012, 0.1000, 1.6400, 0.8700, 0.3100, 1.0000, 0.0070, NO_PAN, 1.4125, 0.0340, NO_PAN, 0.1380, 0.0800, 0.2500, 0.0000, 0.9943, 5168.6, 139.5, 0.0, true);

// ========================================================================
// FACTORY
// ========================================================================

pub const FACTORY_SMALL_ROOM: ReverbProps = preset(0.3645, 0.8200, 0.3162, 0.7943, 0.5012, 1.7200, 0.6500, 1.3100, 0.7079, 0.0100, NO_PAN, 1.7783, 0.0240, NO_PAN, 0.1190, 0.0700, 0.2500, 0.0000, 0.9943, 3762.6, 362.5, 0.0, true);
pub const FACTORY_SHORT_PASSAGE: ReverbProps = preset(0.3645, 0.6400, 0.2512, 0.7943, 0.5012, 2.5300, 0.6500, 1.3100, 1.0000, 0.0100, NO_PAN, 1.2589, 0.0380, NO_PAN, 0.1350, 0.2300, 0.2500, 0.0000, 0.9943, 3762.6, 362.5, 0.0, true);
pub const FACTORY_MEDIUM_ROOM: ReverbProps = preset(0.4287, 0.8200, 0.2512, 0.7943, 0.5012, 2.7600, 0.6500, 1.3100, 0.2818, 0.0220, NO_PAN, 1.4125, 0.0230, NO_PAN, 0.1740, 0.0700, 0.2500, 0.0000, 0.9943, 3762.6, 362.5, 0.0, true);
pub const FACTORY_LARGE_ROOM: ReverbProps = preset(0.4287, 0.7500, 0.2512, 0.7079, 0.6310, 4.2400, 0.5100, 1.3100, 0.1778, 0.0390, NO_PAN, 1.1220, 0.0230, NO_PAN, 0.2310, 0.0700, 0.2500, 0.0000, 0.9943, 3762.6, 362.5, 0.0, true);
pub const FACTORY_LONG_PASSAGE: ReverbProps = preset(0.3645, 0.6400, 0.2512, 0.7943, 0.5012, 4.0600, 0.6500, 1.3100, 1.0000, 0.0200, NO_PAN, 1.2589, 0.0370, NO_PAN, 0.1350, 0.2300, 0.2500, 0.0000, 0.9943, 3762.6, 362.5, 0.0, true);
pub const FACTORY_HALL: ReverbProps = preset(0.4287, 0.7500, 0.3162, 0.7079, 0.6310, 7.4300, 0.5100, 1.3100, 0.0631, 0.0730, NO_PAN, 0.8913, 0.0270, NO_PAN, 0.2500, 0.0700, 0.2500, 0.0000, 0.9943, 3762.6, 362.5, 0.0, true);
pub const FACTORY_CUPBOARD: ReverbProps = preset(0.3071, 0.6300, 0.2512, 0.7943, 0.5012, 0.4900, 0.6500, 1.3100, 1.2589, 0.0100, NO_PAN, 1.9953, 0.0320, NO_PAN, 0.1070, 0.0700, 0.2500, 0.0000, 0.9943, 3762.6, 362.5, 0.0, true);
pub const FACTORY_COURTYARD: ReverbProps = preset(0.3071, 0.5700, 0.3162, 0.3162, 0.6310, 2.3200, 0.2900, 0.5600, 0.2239, 0.1400, NO_PAN, 0.3981, 0.0390, NO_PAN, 0.2500, 0.2900, 0.2500, 0.0000, 0.9943, 3762.6, 362.5, 0.0, true);
pub const FACTORY_ALCOVE: ReverbProps = preset(0.3645, 0.5900, 0.2512, 0.7943, 0.5012, 3.1400, 0.6500, 1.3100, 1.4125, 0.0100, NO_PAN, 1.0000, 0.0380, NO_PAN, 0.1140, 0.1000, 0.2500, 0.0000, 0.9943, 3762.6, 362.5, 0.0, true);

// ========================================================================
// ICE PALACE
// ========================================================================

pub const ICE_PALACE_SMALL_ROOM: ReverbProps = preset(1.0000, 0.8400, 0.3162, 0.5623, 0.2818, 1.5100, 1.5300, 0.2700, 0.8913, 0.0100, NO_PAN, 1.4125, 0.0110, NO_PAN, 0.1640, 0.1400, 0.2500, 0.0000, 0.9943, 12428.5, 99.6, 0.0, true);
pub const ICE_PALACE_SHORT_PASSAGE: ReverbProps = preset(1.0000, 0.7500, 0.3162, 0.5623, 0.2818, 1.7900, 1.4600, 0.2800, 0.5012, 0.0100, NO_PAN, 1.1220, 0.0190, NO_PAN, 0.1770, 0.0900, 0.2500, 0.0000, 0.9943, 12428.5, 99.6, 0.0, true);
pub const ICE_PALACE_MEDIUM_ROOM: ReverbProps = preset(1.0000, 0.8700, 0.3162, 0.5623, 0.4467, 2.2200, 1.5300, 0.3200, 0.3981, 0.0390, NO_PAN, 1.1220, 0.0270, NO_PAN, 0.1860, 0.1200, 0.2500, 0.0000, 0.9943, 12428.5, 99.6, 0.0, true);
pub const ICE_PALACE_LARGE_ROOM: ReverbProps = preset(1.0000, 0.8100, 0.3162, 0.5623, 0.4467, 3.1400, 1.5300, 0.3200, 0.2512, 0.0390, NO_PAN, 1.0000, 0.0270, NO_PAN, 0.2140, 0.1100, 0.2500, 0.0000, 0.9943, 12428.5, 99.6, 0.0, true);
pub const ICE_PALACE_LONG_PASSAGE: ReverbProps = preset(1.0000, 0.7700, 0.3162, 0.5623, 0.3981, 3.0100, 1.4600, 0.2800, 0.7943, 0.0120, NO_PAN, 1.2589, 0.0250, NO_PAN, 0.1860, 0.0400, 0.2500, 0.0000, 0.9943, 12428.5, 99.6, 0.0, true);
pub const ICE_PALACE_HALL: ReverbProps = preset(1.0000, 0.7600, 0.3162, 0.4467, 0.5623, 5.4900, 1.5300, 0.3800, 0.1122, 0.0540, NO_PAN, 0.6310, 0.0520, NO_PAN, 0.2260, 0.1100, 0.2500, 0.0000, 0.9943, 12428.5, 99.6, 0.0, true);
pub const ICE_PALACE_CUPBOARD: ReverbProps = preset(1.0000, 0.8300, 0.3162, 0.5012, 0.2239, 0.7600, 1.5300, 0.2600, 1.1220, 0.0120, NO_PAN, 1.9953, 0.0160, NO_PAN, 0.1430, 0.0800, 0.2500, 0.0000, 0.9943, 12428.5, 99.6, 0.0, true);
pub const ICE_PALACE_COURTYARD: ReverbProps = preset(1.0000, 0.5900, 0.3162, 0.2818, 0.3162, 2.0400, 1.2000, 0.3800, 0.3162, 0.1730, NO_PAN, 0.3162, 0.0430, NO_PAN, 0.2350, 0.4800, 0.2500, 0.0000, 0.9943, 12428.5, 99.6, 0.0, true);
pub const ICE_PALACE_ALCOVE: ReverbProps = preset(1.0000, 0.8400, 0.3162, 0.5623, 0.2818, 2.7600, 1.4600, 0.2800, 1.1220, 0.0100, NO_PAN, 0.8913, 0.0300, NO_PAN, 0.1610, 0.0900, 0.2500, 0.0000, 0.9943, 12428.5, 99.6, 0.0, true);

// ========================================================================
// SPACE STATION
// ========================================================================

pub const SPACE_STATION_SMALL_ROOM: ReverbProps = preset(0.2109, 0.7000, 0.3162, 0.7079, 0.8913, 1.7200, 0.8200, 0.5500, 0.7943, 0.0070, NO_PAN, 1.4125, 0.0130, NO_PAN, 0.1880, 0.2600, 0.2500, 0.0000, 0.9943, 3316.1, 458.2, 0.0, true);
pub const SPACE_STATION_SHORT_PASSAGE: ReverbProps = preset(0.2109, 0.8700, 0.3162, 0.6310, 0.8913, 3.5700, 0.5000, 0.5500, 1.0000, 0.0120, NO_PAN, 1.1220, 0.0160, NO_PAN, 0.1720, 0.2000, 0.2500, 0.0000, 0.9943, 3316.1, 458.2, 0.0, true);
pub const SPACE_STATION_MEDIUM_ROOM: ReverbProps = preset(0.2109, 0.7500, 0.3162, 0.6310, 0.8913, 3.0100, 0.5000, 0.5500, 0.3981, 0.0340, NO_PAN, 1.1220, 0.0350, NO_PAN, 0.2090, 0.3100, 0.2500, 0.0000, 0.9943, 3316.1, 458.2, 0.0, true);
pub const SPACE_STATION_LARGE_ROOM: ReverbProps = preset(0.3645, 0.8100, 0.3162, 0.6310, 0.8913, 3.8900, 0.3800, 0.6100, 0.3162, 0.0560, NO_PAN, 0.8913, 0.0350, NO_PAN, 0.2330, 0.2800, 0.2500, 0.0000, 0.9943, 3316.1, 458.2, 0.0, true);
pub const SPACE_STATION_LONG_PASSAGE: ReverbProps = preset(0.4287, 0.8200, 0.3162, 0.6310, 0.8913, 4.6200, 0.6200, 0.5500, 1.0000, 0.0120, NO_PAN, 1.2589, 0.0310, NO_PAN, 0.2300, 0.1800, 0.2500, 0.0000, 0.9943, 3316.1, 458.2, 0.0, true);
pub const SPACE_STATION_HALL: ReverbProps = preset(0.4287, 0.8700, 0.3162, 0.6310, 0.8913, 7.1100, 0.3800, 0.6100, 0.1778, 0.1000, NO_PAN, 0.6310, 0.0470, NO_PAN, 0.2500, 0.2500, 0.2500, 0.0000, 0.9943, 3316.1, 458.2, 0.0, true);
pub const SPACE_STATION_CUPBOARD: ReverbProps = preset(0.1715, 0.5600, 0.3162, 0.7079, 0.8913, 0.7900, 0.8100, 0.5500, 1.4125, 0.0070, NO_PAN, 1.7783, 0.0180, NO_PAN, 0.1810, 0.3100, 0.2500, 0.0000, 0.9943, 3316.1, 458.2, 0.0, true);
pub const SPACE_STATION_ALCOVE: ReverbProps = preset(0.2109, 0.7800, 0.3162, 0.7079, 0.8913, 1.1600, 0.8100, 0.5500, 1.4125, 0.0070, NO_PAN, 1.0000, 0.0180, NO_PAN, 0.1920, 0.2100, 0.2500, 0.0000, 0.9943, 3316.1, 458.2, 0.0, true);

// ========================================================================
// WOODEN GALLEON
// ========================================================================

pub const WOODEN_SMALL_ROOM: ReverbProps = preset(1.0000, 1.0000, 0.3162, 0.1122, 0.3162, 0.7900, 0.3200, 0.8700, 1.0000, 0.0320, NO_PAN, 0.8913, 0.0290, NO_PAN, 0.2500, 0.0000, 0.2500, 0.0000, 0.9943, 4705.0, 99.6, 0.0, true);
pub const WOODEN_SHORT_PASSAGE: ReverbProps = preset(1.0000, 1.0000, 0.3162, 0.1259, 0.3162, 1.7500, 0.5000, 0.8700, 0.8913, 0.0120, NO_PAN, 0.6310, 0.0240, NO_PAN, 0.2500, 0.0000, 0.2500, 0.0000, 0.9943, 4705.0, 99.6, 0.0, true);
pub const WOODEN_MEDIUM_ROOM: ReverbProps = preset(1.0000, 1.0000, 0.3162, 0.1000, 0.2818, 1.4700, 0.4200, 0.8200, 0.8913, 0.0490, NO_PAN, 0.8913, 0.0290, NO_PAN, 0.2500, 0.0000, 0.2500, 0.0000, 0.9943, 4705.0, 99.6, 0.0, true);
pub const WOODEN_LARGE_ROOM: ReverbProps = preset(1.0000, 1.0000, 0.3162, 0.0891, 0.2818, 2.6500, 0.3300, 0.8200, 0.8913, 0.0660, NO_PAN, 0.7943, 0.0490, NO_PAN, 0.2500, 0.0000, 0.2500, 0.0000, 0.9943, 4705.0, 99.6, 0.0, true);
pub const WOODEN_LONG_PASSAGE: ReverbProps = preset(1.0000, 1.0000, 0.3162, 0.1000, 0.3162, 1.9900, 0.4000, 0.7900, 1.0000, 0.0200, NO_PAN, 0.4467, 0.0360, NO_PAN, 0.2500, 0.0000, 0.2500, 0.0000, 0.9943, 4705.0, 99.6, 0.0, true);
pub const WOODEN_HALL: ReverbProps = preset(1.0000, 1.0000, 0.3162, 0.0794, 0.2818, 3.4500, 0.3000, 0.8200, 0.8913, 0.0880, NO_PAN, 0.7943, 0.0630, NO_PAN, 0.2500, 0.0000, 0.2500, 0.0000, 0.9943, 4705.0, 99.6, 0.0, true);
pub const WOODEN_CUPBOARD: ReverbProps = preset(1.0000, 1.0000, 0.3162, 0.1413, 0.3162, 0.5600, 0.4600, 0.9100, 1.1220, 0.0120, NO_PAN, 1.1220, 0.0280, NO_PAN, 0.2500, 0.0000, 0.2500, 0.0000, 0.9943, 4705.0, 99.6, 0.0, true);
pub const WOODEN_COURTYARD: ReverbProps = preset(1.0000, 0.6500, 0.3162, 0.0794, 0.3162, 1.7900, 0.3500, 0.7900, 0.5623, 0.1230, NO_PAN, 0.1000, 0.0320, NO_PAN, 0.2500, 0.0000, 0.2500, 0.0000, 0.9943, 4705.0, 99.6, 0.0, true);
pub const WOODEN_ALCOVE: ReverbProps = preset(1.0000, 1.0000, 0.3162, 0.1259, 0.3162, 1.2200, 0.6200, 0.9100, 1.1220, 0.0120, NO_PAN, 0.7079, 0.0240, NO_PAN, 0.2500, 0.0000, 0.2500, 0.0000, 0.9943, 4705.0, 99.6, 0.0, true);

// ========================================================================
// SPORTS
// ========================================================================

pub const SPORT_EMPTY_STADIUM: ReverbProps = preset(1.0000, 1.0000, 0.3162, 0.4467, 0.7943, 6.2600, 0.5100, 1.1000, 0.0631, 0.1830, NO_PAN, 0.3981, 0.0380, NO_PAN, 0.2500, 0.0000, 0.2500, 0.0000, 0.9943, 5000.0, 250.0, 0.0, false);
pub const SPORT_SQUASH_COURT: ReverbProps = preset(0.7079, 0.7500, 0.3162, 0.3162, 0.7943, 2.2200, 0.9100, 1.1600, 0.4467, 0.0070, NO_PAN, 0.7943, 0.0110, NO_PAN, 0.1260, 0.1900, 0.2500, 0.0000, 0.9943, 7176.9, 211.2, 0.0, true);
pub const SPORT_SMALL_SWIMMING_POOL: ReverbProps = preset(0.7079, 0.7000, 0.3162, 0.7943, 0.8913, 2.7600, 1.2500, 1.1400, 0.6310, 0.0200, NO_PAN, 0.7943, 0.0300, NO_PAN, 0.1790, 0.1500, 0.8950, 0.1900, 0.9943, 5000.0, 250.0, 0.0, false);
pub const SPORT_LARGE_SWIMMING_POOL: ReverbProps = preset(0.7079, 0.8200, 0.3162, 0.7943, 1.0000, 5.4900, 1.3100, 1.1400, 0.4467, 0.0390, NO_PAN, 0.5012, 0.0490, NO_PAN, 0.2220, 0.5500, 1.1590, 0.2100, 0.9943, 5000.0, 250.0, 0.0, false);
pub const SPORT_GYMNASIUM: ReverbProps = preset(0.7079, 0.8100, 0.3162, 0.4467, 0.8913, 3.1400, 1.0600, 1.3500, 0.3981, 0.0290, NO_PAN, 0.5623, 0.0450, NO_PAN, 0.1460, 0.1400, 0.2500, 0.0000, 0.9943, 7176.9, 211.2, 0.0, false);
pub const SPORT_FULL_STADIUM: ReverbProps = preset(0.2109, 1.0000, 0.3162, 0.0708, 0.7943, 5.2500, 0.1700, 0.8000, 0.1000, 0.1880, NO_PAN, 0.2818, 0.0380, NO_PAN, 0.2500, 0.0000, 0.2500, 0.0000, 0.9943, 5000.0, 250.0, 0.0, false);
pub const SPORT_STADIUM_TANNOY: ReverbProps = preset(0.3071, 0.7800, 0.3162, 0.5623, 0.5012, 2.5300, 0.8800, 0.6800, 0.2818, 0.2300, NO_PAN, 0.5012, 0.0630, NO_PAN, 0.2500, 0.2000, 0.2500, 0.0000, 0.9943, 5000.0, 250.0, 0.0, true);

// ========================================================================
// PREFAB
// ========================================================================

pub const PREFAB_WORKSHOP: ReverbProps = preset(0.4287, 1.0000, 0.3162, 0.1413, 0.3981, 0.7600, 1.0000, 1.0000, 1.0000, 0.0120, NO_PAN, 1.1220, 0.0120, NO_PAN, 0.2500, 0.0000, 0.2500, 0.0000, 0.9943, 5000.0, 250.0, 0.0, false);
pub const PREFAB_SCHOOL_ROOM: ReverbProps = preset(0.4022, 0.6900, 0.3162, 0.6310, 0.5012, 0.9800, 0.4500, 0.1800, 1.4125, 0.0170, NO_PAN, 1.4125, 0.0150, NO_PAN, 0.0950, 0.1400, 0.2500, 0.0000, 0.9943, 7176.9, 211.2, 0.0, true);
pub const PREFAB_PRACTISE_ROOM: ReverbProps = preset(0.4022, 0.8700, 0.3162, 0.3981, 0.5012, 1.1200, 0.5600, 0.1800, 1.2589, 0.0100, NO_PAN, 1.4125, 0.0110, NO_PAN, 0.0950, 0.1400, 0.2500, 0.0000, 0.9943, 7176.9, 211.2, 0.0, true);
pub const PREFAB_OUTHOUSE: ReverbProps = preset(1.0000, 0.8200, 0.3162, 0.1122, 0.1585, 1.3800, 0.3800, 0.3500, 0.8913, 0.0240, NO_PAN, 0.6310, 0.0440, NO_PAN, 0.1210, 0.1700, 0.2500, 0.0000, 0.9943, 2854.4, 107.5, 0.0, false);
pub const PREFAB_CARAVAN: ReverbProps = preset(1.0000, 1.0000, 0.3162, 0.0891, 0.1259, 0.4300, 1.5000, 1.0000, 1.0000, 0.0120, NO_PAN, 1.9953, 0.0120, NO_PAN, 0.2500, 0.0000, 0.2500, 0.0000, 0.9943, 5000.0, 250.0, 0.0, false);

// ========================================================================
// DOME AND PIPE
// ========================================================================

pub const DOME_TOMB: ReverbProps = preset(1.0000, 0.7900, 0.3162, 0.3548, 0.2239, 4.1800, 0.2100, 0.1000, 0.3868, 0.0300, NO_PAN, 1.6788, 0.0220, NO_PAN, 0.1770, 0.1900, 0.2500, 0.0000, 0.9943, 2854.4, 20.0, 0.0, false);
pub const DOME_SAINT_PAULS: ReverbProps = preset(1.0000, 0.8700, 0.3162, 0.3548, 0.2239, 10.4800, 0.1900, 0.1000, 0.1778, 0.0900, NO_PAN, 1.2589, 0.0420, NO_PAN, 0.2500, 0.0000, 0.2500, 0.1200, 0.9943, 2854.4, 20.0, 0.0, true);
pub const PIPE_SMALL: ReverbProps = preset(1.0000, 1.0000, 0.3162, 0.5623, 0.2818, 5.0400, 0.1000, 0.1000, 0.5012, 0.0320, NO_PAN, 2.5119, 0.0150, NO_PAN, 0.2500, 0.0000, 0.2500, 0.0000, 0.9943, 2854.4, 20.0, 0.0, true);
pub const PIPE_LONG_THIN: ReverbProps = preset(0.2560, 0.9100, 0.3162, 0.4467, 0.2818, 9.2100, 0.1800, 0.1000, 0.7079, 0.0100, NO_PAN, 0.7079, 0.0220, NO_PAN, 0.2500, 0.0000, 0.2500, 0.0000, 0.9943, 2854.4, 20.0, 0.0, false);
pub const PIPE_LARGE: ReverbProps = preset(1.0000, 1.0000, 0.3162, 0.5623, 0.2818, 8.4500, 0.1000, 0.1000, 0.3981, 0.0460, NO_PAN, 1.5849, 0.0320, NO_PAN, 0.2500, 0.0000, 0.2500, 0.0000, 0.9943, 2854.4, 20.0, 0.0, true);
pub const PIPE_RESONANT: ReverbProps = preset(0.1373, 0.9100, 0.3162, 0.4467, 0.2818, 6.8100, 0.1800, 0.1000, 0.7079, 0.0100, NO_PAN, 1.0000, 0.0220, NO_PAN, 0.2500, 0.0000, 0.2500, 0.0000, 0.9943, 2854.4, 20.0, 0.0, false);

// ========================================================================
// OUTDOORS
// ========================================================================

pub const OUTDOORS_BACKYARD: ReverbProps = preset(1.0000, 0.4500, 0.3162, 0.2512, 0.5012, 1.1200, 0.3400, 0.4600, 0.4467, 0.0690, NO_PAN, 0.7079, 0.0230, NO_PAN, 0.2180, 0.3400, 0.2500, 0.0000, 0.9943, 4399.1, 242.9, 0.0, false);
pub const OUTDOORS_ROLLING_PLAINS: ReverbProps = preset(1.0000, 0.0000, 0.3162, 0.0112, 0.6310, 2.1300, 0.2100, 0.4600, 0.1778, 0.3000, NO_PAN, 0.4467, 0.0190, NO_PAN, 0.2500, 1.0000, 0.2500, 0.0000, 0.9943, 4399.1, 242.9, 0.0, false);
pub const OUTDOORS_DEEP_CANYON: ReverbProps = preset(1.0000, 0.7400, 0.3162, 0.1778, 0.6310, 3.8900, 0.2100, 0.4600, 0.3162, 0.2230, NO_PAN, 0.3548, 0.0190, NO_PAN, 0.2500, 1.0000, 0.2500, 0.0000, 0.9943, 4399.1, 242.9, 0.0, false);
pub const OUTDOORS_CREEK: ReverbProps = preset(1.0000, 0.3500, 0.3162, 0.1778, 0.5012, 2.1300, 0.2100, 0.4600, 0.3981, 0.1150, NO_PAN, 0.1995, 0.0310, NO_PAN, 0.2180, 0.3400, 0.2500, 0.0000, 0.9943, 4399.1, 242.9, 0.0, false);
pub const OUTDOORS_VALLEY: ReverbProps = preset(1.0000, 0.2800, 0.3162, 0.0282, 0.1585, 2.8800, 0.2600, 0.3500, 0.1413, 0.2630, NO_PAN, 0.3981, 0.1000, NO_PAN, 0.2500, 0.3400, 0.2500, 0.0000, 0.9943, 2854.4, 107.5, 0.0, false);

// ========================================================================
// MOOD
// ========================================================================

pub const MOOD_HEAVEN: ReverbProps = preset(1.0000, 0.9400, 0.3162, 0.7943, 0.4467, 5.0400, 1.1200, 0.5600, 0.2427, 0.0200, NO_PAN, 1.2589, 0.0290, NO_PAN, 0.2500, 0.0800, 2.7420, 0.0500, 0.9977, 5000.0, 250.0, 0.0, true);
pub const MOOD_HELL: ReverbProps = preset(1.0000, 0.5700, 0.3162, 0.3548, 0.4467, 3.5700, 0.4900, 2.0000, 0.0000, 0.0200, NO_PAN, 1.4125, 0.0300, NO_PAN, 0.1100, 0.0400, 2.1090, 0.5200, 0.9943, 5000.0, 139.5, 0.0, false);
pub const MOOD_MEMORY: ReverbProps = preset(1.0000, 0.8500, 0.3162, 0.6310, 0.3548, 4.0600, 0.8200, 0.5600, 0.0398, 0.0000, NO_PAN, 1.1220, 0.0000, NO_PAN, 0.2500, 0.0000, 0.4740, 0.4500, 0.9886, 5000.0, 250.0, 0.0, false);

// ========================================================================
// DRIVING
// ========================================================================

pub const DRIVING_COMMENTATOR: ReverbProps = preset(1.0000, 0.0000, 0.3162, 0.5623, 0.5012, 2.4200, 0.8800, 0.6800, 0.1995, 0.0930, NO_PAN, 0.2512, 0.0170, NO_PAN, 0.2500, 1.0000, 0.2500, 0.0000, 0.9886, 5000.0, 250.0, 0.0, true);
pub const DRIVING_PIT_GARAGE: ReverbProps = preset(0.4287, 0.5900, 0.3162, 0.7079, 0.5623, 1.7200, 0.9300, 0.8700, 0.5623, 0.0000, NO_PAN, 1.2589, 0.0160, NO_PAN, 0.2500, 0.1100, 0.2500, 0.0000, 0.9943, 5000.0, 250.0, 0.0, false);
pub const DRIVING_INCAR_RACER: ReverbProps = preset(0.0832, 0.8000, 0.3162, 1.0000, 0.7943, 0.1700, 2.0000, 0.4100, 1.7783, 0.0070, NO_PAN, 0.7079, 0.0150, NO_PAN, 0.2500, 0.0000, 0.2500, 0.0000, 0.9943, 10268.2, 251.0, 0.0, true);
pub const DRIVING_INCAR_SPORTS: ReverbProps = preset(0.0832, 0.8000, 0.3162, 0.6310, 1.0000, 0.1700, 0.7500, 0.4100, 1.0000, 0.0100, NO_PAN, 0.5623, 0.0000, NO_PAN, 0.2500, 0.0000, 0.2500, 0.0000, 0.9943, 10268.2, 251.0, 0.0, true);
pub const DRIVING_INCAR_LUXURY: ReverbProps = preset(0.2560, 1.0000, 0.3162, 0.1000, 0.5012, 0.1300, 0.4100, 0.4600, 0.7943, 0.0100, NO_PAN, 1.5849, 0.0100, NO_PAN, 0.2500, 0.0000, 0.2500, 0.0000, 0.9943, 10268.2, 251.0, 0.0, true);
pub const DRIVING_FULL_GRAND_STAND: ReverbProps = preset(1.0000, 1.0000, 0.3162, 0.2818, 0.6310, 3.0100, 1.3700, 1.2800, 0.3548, 0.0900, NO_PAN, 0.1778, 0.0490, NO_PAN, 0.2500, 0.0000, 0.2500, 0.0000, 0.9943, 10420.2, 250.0, 0.0, false);
pub const DRIVING_EMPTY_GRAND_STAND: ReverbProps = preset(1.0000, 1.0000, 0.3162, 1.0000, 0.7943, 4.6200, 1.7500, 1.4000, 0.2082, 0.0900, NO_PAN, 0.2512, 0.0490, NO_PAN, 0.2500, 0.0000, 0.2500, 0.0000, 0.9943, 10420.2, 250.0, 0.0, false);
pub const DRIVING_TUNNEL: ReverbProps = preset(0.8175, 0.5000, 0.3162, 0.3981, 0.8913, 3.4200, 0.9400, 1.3100, 0.7079, 0.0510, NO_PAN, 0.7079, 0.0470, NO_PAN, 0.2140, 0.0500, 0.2500, 0.0000, 0.9943, 5000.0, 155.3, 0.0, true);

// ========================================================================
// CITY
// ========================================================================

pub const CITY_STREETS: ReverbProps = preset(1.0000, 0.7800, 0.3162, 0.7079, 0.8913, 1.7900, 1.1200, 0.9100, 0.2818, 0.0460, NO_PAN, 0.1995, 0.0280, NO_PAN, 0.2500, 0.2000, 0.2500, 0.0000, 0.9943, 5000.0, 250.0, 0.0, true);
pub const CITY_SUBWAY: ReverbProps = preset(1.0000, 0.7400, 0.3162, 0.7079, 0.8913, 3.0100, 1.2300, 0.9100, 0.7079, 0.0460, NO_PAN, 1.2589, 0.0280, NO_PAN, 0.1250, 0.2100, 0.2500, 0.0000, 0.9943, 5000.0, 250.0, 0.0, true);
pub const CITY_MUSEUM: ReverbProps = preset(1.0000, 0.8200, 0.3162, 0.1778, 0.1778, 3.2800, 1.4000, 0.5700, 0.2512, 0.0390, NO_PAN, 0.8913, 0.0340, NO_PAN, 0.1300, 0.1700, 0.2500, 0.0000, 0.9943, 2854.4, 107.5, 0.0, false);
pub const CITY_LIBRARY: ReverbProps = preset(1.0000, 0.8200, 0.3162, 0.2818, 0.0891, 2.7600, 0.8900, 0.4100, 0.3548, 0.0290, NO_PAN, 0.8913, 0.0200, NO_PAN, 0.1300, 0.1700, 0.2500, 0.0000, 0.9943, 2854.4, 107.5, 0.0, false);
pub const CITY_UNDERPASS: ReverbProps = preset(1.0000, 0.8200, 0.3162, 0.4467, 0.8913, 3.5700, 1.1200, 0.9100, 0.3981, 0.0590, NO_PAN, 0.8913, 0.0370, NO_PAN, 0.2500, 0.1400, 0.2500, 0.0000, 0.9920, 5000.0, 250.0, 0.0, true);
pub const CITY_ABANDONED: ReverbProps = preset(1.0000, 0.6900, 0.3162, 0.7943, 0.8913, 3.2800, 1.1700, 0.9100, 0.4467, 0.0440, NO_PAN, 0.2818, 0.0240, NO_PAN, 0.2500, 0.2000, 0.2500, 0.0000, 0.9966, 5000.0, 250.0, 0.0, true);

// ========================================================================
// MISC
// ========================================================================

pub const DUSTY_ROOM: ReverbProps = preset(0.3645, 0.5600, 0.3162, 0.7943, 0.7079, 1.7900, 0.3800, 0.2100, 0.5012, 0.0020, NO_PAN, 1.2589, 0.0060, NO_PAN, 0.2020, 0.0500, 0.2500, 0.0000, 0.9886, 13046.0, 163.3, 0.0, true);
pub const CHAPEL: ReverbProps = preset(1.0000, 0.8400, 0.3162, 0.5623, 1.0000, 4.6200, 0.6400, 1.2300, 0.4467, 0.0320, NO_PAN, 0.7943, 0.0490, NO_PAN, 0.2500, 0.0000, 0.2500, 0.1100, 0.9943, 5000.0, 250.0, 0.0, true);
pub const SMALL_WATER_ROOM: ReverbProps = preset(1.0000, 0.7000, 0.3162, 0.4477, 1.0000, 1.5100, 1.2500, 1.1400, 0.8913, 0.0200, NO_PAN, 1.4125, 0.0300, NO_PAN, 0.1790, 0.1500, 0.8950, 0.1900, 0.9920, 5000.0, 250.0, 0.0, false);

lazy_static! {
    static ref PRESETS_BY_NAME: HashMap<&'static str, ReverbProps> = {
        let mut map = HashMap::new();
        map.insert("generic", GENERIC);
        map.insert("padded_cell", PADDED_CELL);
        map.insert("room", ROOM);
        map.insert("bathroom", BATHROOM);
        map.insert("living_room", LIVING_ROOM);
        map.insert("stone_room", STONE_ROOM);
        map.insert("auditorium", AUDITORIUM);
        map.insert("concert_hall", CONCERT_HALL);
        map.insert("cave", CAVE);
        map.insert("arena", ARENA);
        map.insert("hangar", HANGAR);
        map.insert("carpeted_hallway", CARPETED_HALLWAY);
        map.insert("hallway", HALLWAY);
        map.insert("stone_corridor", STONE_CORRIDOR);
        map.insert("alley", ALLEY);
        map.insert("forest", FOREST);
        map.insert("city", CITY);
        map.insert("mountains", MOUNTAINS);
        map.insert("quarry", QUARRY);
        map.insert("plain", PLAIN);
        map.insert("parking_lot", PARKING_LOT);
        map.insert("sewer_pipe", SEWER_PIPE);
        map.insert("underwater", UNDERWATER);
        map.insert("drugged", DRUGGED);
        map.insert("dizzy", DIZZY);
        map.insert("psychotic", PSYCHOTIC);
        map.insert("castle_small_room", CASTLE_SMALL_ROOM);
        map.insert("castle_short_passage", CASTLE_SHORT_PASSAGE);
        map.insert("castle_medium_room", CASTLE_MEDIUM_ROOM);
        map.insert("castle_large_room", CASTLE_LARGE_ROOM);
        map.insert("castle_long_passage", CASTLE_LONG_PASSAGE);
        map.insert("castle_hall", CASTLE_HALL);
        map.insert("castle_cupboard", CASTLE_CUPBOARD);
        map.insert("castle_courtyard", CASTLE_COURTYARD);
        map.insert("castle_alcove", CASTLE_ALCOVE);
        map.insert("factory_small_room", FACTORY_SMALL_ROOM);
        map.insert("factory_short_passage", FACTORY_SHORT_PASSAGE);
        map.insert("factory_medium_room", FACTORY_MEDIUM_ROOM);
        map.insert("factory_large_room", FACTORY_LARGE_ROOM);
        map.insert("factory_long_passage", FACTORY_LONG_PASSAGE);
        map.insert("factory_hall", FACTORY_HALL);
        map.insert("factory_cupboard", FACTORY_CUPBOARD);
        map.insert("factory_courtyard", FACTORY_COURTYARD);
        map.insert("factory_alcove", FACTORY_ALCOVE);
        map.insert("ice_palace_small_room", ICE_PALACE_SMALL_ROOM);
        map.insert("ice_palace_short_passage", ICE_PALACE_SHORT_PASSAGE);
        map.insert("ice_palace_medium_room", ICE_PALACE_MEDIUM_ROOM);
        map.insert("ice_palace_large_room", ICE_PALACE_LARGE_ROOM);
        map.insert("ice_palace_long_passage", ICE_PALACE_LONG_PASSAGE);
        map.insert("ice_palace_hall", ICE_PALACE_HALL);
        map.insert("ice_palace_cupboard", ICE_PALACE_CUPBOARD);
        map.insert("ice_palace_courtyard", ICE_PALACE_COURTYARD);
        map.insert("ice_palace_alcove", ICE_PALACE_ALCOVE);
        map.insert("space_station_small_room", SPACE_STATION_SMALL_ROOM);
        map.insert("space_station_short_passage", SPACE_STATION_SHORT_PASSAGE);
        map.insert("space_station_medium_room", SPACE_STATION_MEDIUM_ROOM);
        map.insert("space_station_large_room", SPACE_STATION_LARGE_ROOM);
        map.insert("space_station_long_passage", SPACE_STATION_LONG_PASSAGE);
        map.insert("space_station_hall", SPACE_STATION_HALL);
        map.insert("space_station_cupboard", SPACE_STATION_CUPBOARD);
        map.insert("space_station_alcove", SPACE_STATION_ALCOVE);
        map.insert("wooden_small_room", WOODEN_SMALL_ROOM);
        map.insert("wooden_short_passage", WOODEN_SHORT_PASSAGE);
        map.insert("wooden_medium_room", WOODEN_MEDIUM_ROOM);
        map.insert("wooden_large_room", WOODEN_LARGE_ROOM);
        map.insert("wooden_long_passage", WOODEN_LONG_PASSAGE);
        map.insert("wooden_hall", WOODEN_HALL);
        map.insert("wooden_cupboard", WOODEN_CUPBOARD);
        map.insert("wooden_courtyard", WOODEN_COURTYARD);
        map.insert("wooden_alcove", WOODEN_ALCOVE);
        map.insert("sport_empty_stadium", SPORT_EMPTY_STADIUM);
        map.insert("sport_squash_court", SPORT_SQUASH_COURT);
        map.insert("sport_small_swimming_pool", SPORT_SMALL_SWIMMING_POOL);
        map.insert("sport_large_swimming_pool", SPORT_LARGE_SWIMMING_POOL);
        map.insert("sport_gymnasium", SPORT_GYMNASIUM);
        map.insert("sport_full_stadium", SPORT_FULL_STADIUM);
        map.insert("sport_stadium_tannoy", SPORT_STADIUM_TANNOY);
        map.insert("prefab_workshop", PREFAB_WORKSHOP);
        map.insert("prefab_school_room", PREFAB_SCHOOL_ROOM);
        map.insert("prefab_practise_room", PREFAB_PRACTISE_ROOM);
        map.insert("prefab_outhouse", PREFAB_OUTHOUSE);
        map.insert("prefab_caravan", PREFAB_CARAVAN);
        map.insert("dome_tomb", DOME_TOMB);
        map.insert("dome_saint_pauls", DOME_SAINT_PAULS);
        map.insert("pipe_small", PIPE_SMALL);
        map.insert("pipe_long_thin", PIPE_LONG_THIN);
        map.insert("pipe_large", PIPE_LARGE);
        map.insert("pipe_resonant", PIPE_RESONANT);
        map.insert("outdoors_backyard", OUTDOORS_BACKYARD);
        map.insert("outdoors_rolling_plains", OUTDOORS_ROLLING_PLAINS);
        map.insert("outdoors_deep_canyon", OUTDOORS_DEEP_CANYON);
        map.insert("outdoors_creek", OUTDOORS_CREEK);
        map.insert("outdoors_valley", OUTDOORS_VALLEY);
        map.insert("mood_heaven", MOOD_HEAVEN);
        map.insert("mood_hell", MOOD_HELL);
        map.insert("mood_memory", MOOD_MEMORY);
        map.insert("driving_commentator", DRIVING_COMMENTATOR);
        map.insert("driving_pit_garage", DRIVING_PIT_GARAGE);
        map.insert("driving_incar_racer", DRIVING_INCAR_RACER);
        map.insert("driving_incar_sports", DRIVING_INCAR_SPORTS);
        map.insert("driving_incar_luxury", DRIVING_INCAR_LUXURY);
        map.insert("driving_full_grand_stand", DRIVING_FULL_GRAND_STAND);
        map.insert("driving_empty_grand_stand", DRIVING_EMPTY_GRAND_STAND);
        map.insert("driving_tunnel", DRIVING_TUNNEL);
        map.insert("city_streets", CITY_STREETS);
        map.insert("city_subway", CITY_SUBWAY);
        map.insert("city_museum", CITY_MUSEUM);
        map.insert("city_library", CITY_LIBRARY);
        map.insert("city_underpass", CITY_UNDERPASS);
        map.insert("city_abandoned", CITY_ABANDONED);
        map.insert("dusty_room", DUSTY_ROOM);
        map.insert("chapel", CHAPEL);
        map.insert("small_water_room", SMALL_WATER_ROOM);
        map
    };
}

/// Look up a reverb preset by its registry name (e.g. "generic",
/// "castle_hall").
pub fn reverb_preset(name: &str) -> Option<ReverbProps> {
    PRESETS_BY_NAME.get(name).copied()
}

/// All registered preset names, sorted.
pub fn reverb_preset_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = PRESETS_BY_NAME.keys().copied().collect();
    names.sort_unstable();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookup() {
        let generic = reverb_preset("generic").unwrap();
        assert_eq!(generic, GENERIC);
        assert!(reverb_preset("no_such_place").is_none());
    }

    #[test]
    fn test_registry_is_complete() {
        let names = reverb_preset_names();
        assert_eq!(names.len(), 113);
        assert!(names.contains(&"castle_hall"));
        assert!(names.contains(&"space_station_alcove"));
    }

    #[test]
    fn test_presets_are_normalized() {
        // Every preset must already sit inside the legal parameter ranges.
        for name in reverb_preset_names() {
            let props = reverb_preset(name).unwrap();
            let mut normalized = props;
            normalized.normalize();
            assert_eq!(props, normalized, "preset {name} out of range");
        }
    }

    #[test]
    fn test_generic_matches_i3dl2() {
        assert!((GENERIC.decay_time - 1.49).abs() < 1e-6);
        assert!((GENERIC.gain - 0.3162).abs() < 1e-6);
        assert!(GENERIC.decay_hf_limit);
    }
}
