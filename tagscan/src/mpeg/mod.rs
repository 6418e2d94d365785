//! MPEG audio specific items
//!
//! MPEG files carry their tags in ID3v2 and ID3v1, see [`crate::id3`].

mod constants;
pub(crate) mod header;
mod properties;
mod read;

pub use header::{
	Bitrate, ChannelMode, Emphasis, Layer, MpegFrameHeader, MpegVersion, search_for_frame_sync,
};
pub use properties::MpegProperties;
pub use read::MpegReader;
