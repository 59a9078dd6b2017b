/// Output channel layouts and speaker identifiers.
///
/// Channel orders follow WaveFormatEx conventions; the layout is fixed for
/// the lifetime of an engine.

use serde::{Deserialize, Serialize};

/// Logical speaker positions addressable by the supported layouts.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelId {
    FrontLeft,
    FrontRight,
    FrontCenter,
    Lfe,
    BackLeft,
    BackRight,
    BackCenter,
    SideLeft,
    SideRight,
}

/// Supported output channel layouts.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelFormat {
    Mono,
    Stereo,
    Quad,
    FivePointOne,
    FivePointOneRear,
    SixPointOne,
    SevenPointOne,
}

impl ChannelFormat {
    /// Number of interleaved channels carried by this layout.
    pub fn channel_count(self) -> usize {
        match self {
            ChannelFormat::Mono => 1,
            ChannelFormat::Stereo => 2,
            ChannelFormat::Quad => 4,
            ChannelFormat::FivePointOne | ChannelFormat::FivePointOneRear => 6,
            ChannelFormat::SixPointOne => 7,
            ChannelFormat::SevenPointOne => 8,
        }
    }

    /// Layout for a plain channel count. Six channels map to the
    /// side-channel 5.1 variant.
    pub fn from_channel_count(count: usize) -> Option<ChannelFormat> {
        match count {
            1 => Some(ChannelFormat::Mono),
            2 => Some(ChannelFormat::Stereo),
            4 => Some(ChannelFormat::Quad),
            6 => Some(ChannelFormat::FivePointOne),
            7 => Some(ChannelFormat::SixPointOne),
            8 => Some(ChannelFormat::SevenPointOne),
            _ => None,
        }
    }

    /// Speaker order used by WaveFormatEx for this layout.
    pub fn channel_names(self) -> &'static [ChannelId] {
        use ChannelId::{
            BackCenter, BackLeft, BackRight, FrontCenter, FrontLeft, FrontRight, Lfe, SideLeft,
            SideRight,
        };

        match self {
            ChannelFormat::Mono => &[FrontCenter],
            ChannelFormat::Stereo => &[FrontLeft, FrontRight],
            ChannelFormat::Quad => &[FrontLeft, FrontRight, BackLeft, BackRight],
            ChannelFormat::FivePointOne => {
                &[FrontLeft, FrontRight, FrontCenter, Lfe, SideLeft, SideRight]
            }
            ChannelFormat::FivePointOneRear => {
                &[FrontLeft, FrontRight, FrontCenter, Lfe, BackLeft, BackRight]
            }
            ChannelFormat::SixPointOne => &[
                FrontLeft, FrontRight, FrontCenter, Lfe, BackCenter, SideLeft, SideRight,
            ],
            ChannelFormat::SevenPointOne => &[
                FrontLeft, FrontRight, FrontCenter, Lfe, BackLeft, BackRight, SideLeft, SideRight,
            ],
        }
    }
}

/// Index of a speaker within an ordered channel list, if present.
pub(crate) fn channel_index(names: &[ChannelId], id: ChannelId) -> Option<usize> {
    names.iter().position(|&name| name == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_counts() {
        assert_eq!(ChannelFormat::Mono.channel_count(), 1);
        assert_eq!(ChannelFormat::Stereo.channel_count(), 2);
        assert_eq!(ChannelFormat::Quad.channel_count(), 4);
        assert_eq!(ChannelFormat::FivePointOne.channel_count(), 6);
        assert_eq!(ChannelFormat::FivePointOneRear.channel_count(), 6);
        assert_eq!(ChannelFormat::SixPointOne.channel_count(), 7);
        assert_eq!(ChannelFormat::SevenPointOne.channel_count(), 8);
    }

    #[test]
    fn test_names_match_counts() {
        for format in [
            ChannelFormat::Mono,
            ChannelFormat::Stereo,
            ChannelFormat::Quad,
            ChannelFormat::FivePointOne,
            ChannelFormat::FivePointOneRear,
            ChannelFormat::SixPointOne,
            ChannelFormat::SevenPointOne,
        ] {
            assert_eq!(format.channel_names().len(), format.channel_count());
        }
    }

    #[test]
    fn test_from_channel_count() {
        assert_eq!(ChannelFormat::from_channel_count(1), Some(ChannelFormat::Mono));
        assert_eq!(
            ChannelFormat::from_channel_count(6),
            Some(ChannelFormat::FivePointOne)
        );
        assert_eq!(ChannelFormat::from_channel_count(3), None);
        assert_eq!(ChannelFormat::from_channel_count(5), None);
    }

    #[test]
    fn test_channel_index() {
        let names = ChannelFormat::FivePointOne.channel_names();
        assert_eq!(channel_index(names, ChannelId::Lfe), Some(3));
        assert_eq!(channel_index(names, ChannelId::BackCenter), None);
    }
}
