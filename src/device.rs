/// Immutable render configuration shared by the mix driver and the effect
/// implementations: sampling rate, channel layout, and the decoder
/// matrices derived from it.

use crate::channels::{channel_index, ChannelFormat, ChannelId};
use crate::panning::{AmbiDecoder, FoaDecoder};

#[derive(Debug, Clone)]
pub(crate) struct Device {
    pub frequency: u32,
    pub channel_format: ChannelFormat,
    pub channel_count: usize,
    pub channel_names: &'static [ChannelId],
    /// Decoder for the dry (main output) path.
    pub dry: AmbiDecoder,
    /// First-order decoder for routing B-format effect output.
    pub foa: FoaDecoder,
}

impl Device {
    pub fn new(channel_format: ChannelFormat, sampling_rate: u32) -> Device {
        let channel_names = channel_format.channel_names();
        let dry = AmbiDecoder::for_format(channel_format, channel_names);
        let foa = dry.foa();

        Device {
            frequency: sampling_rate,
            channel_format,
            channel_count: channel_names.len(),
            channel_names,
            dry,
            foa,
        }
    }

    /// Index of the given speaker in the output order, if the layout has it.
    pub fn channel_index(&self, id: ChannelId) -> Option<usize> {
        channel_index(self.channel_names, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_layout() {
        let device = Device::new(ChannelFormat::SixPointOne, 48_000);
        assert_eq!(device.channel_count, 7);
        assert_eq!(device.channel_index(ChannelId::BackCenter), Some(4));
        assert_eq!(device.channel_index(ChannelId::BackLeft), None);
        assert_eq!(device.foa.num_channels, 7);
    }
}
