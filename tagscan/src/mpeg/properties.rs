use super::header::{ChannelMode, Layer, MpegFrameHeader, MpegVersion};
use crate::properties::AudioProperties;

use std::time::Duration;

/// An MPEG file's audio properties
///
/// The duration is estimated from the first frame's bitrate, which is only accurate for CBR
/// streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct MpegProperties {
	pub(crate) version: MpegVersion,
	pub(crate) layer: Layer,
	pub(crate) duration: Duration,
	pub(crate) bitrate: u32,
	pub(crate) sample_rate: u32,
	pub(crate) channels: u8,
	pub(crate) channel_mode: ChannelMode,
}

impl MpegProperties {
	/// Estimate the properties of a CBR stream from its first frame header
	///
	/// Everything from `header_offset` to `file_size` is assumed to be audio at the header's
	/// bitrate. Returns `None` for a header that isn't [valid](MpegFrameHeader::is_valid).
	///
	/// # Examples
	///
	/// ```rust
	/// use tagscan::mpeg::{MpegFrameHeader, MpegProperties};
	///
	/// let header = MpegFrameHeader::parse([0xFF, 0xFB, 0x90, 0x40]);
	///
	/// // 16,000 bytes of 128 kbps audio
	/// let properties = MpegProperties::estimate(&header, 0, 16_000).unwrap();
	/// assert_eq!(properties.duration().as_millis(), 1000);
	/// ```
	pub fn estimate(header: &MpegFrameHeader, header_offset: u64, file_size: u64) -> Option<Self> {
		if !header.is_valid() {
			return None;
		}

		let bitrate = header.bitrate_kbps()?;
		let sample_rate = header.sample_rate()?;

		// kbps is bits per millisecond
		let audio_bytes = file_size.saturating_sub(header_offset);
		let duration_ms = audio_bytes * 8 / u64::from(bitrate);

		Some(Self {
			version: header.version(),
			layer: header.layer(),
			duration: Duration::from_millis(duration_ms),
			bitrate,
			sample_rate,
			channels: header.channel_mode().channels(),
			channel_mode: header.channel_mode(),
		})
	}

	/// Duration of the audio
	pub fn duration(&self) -> Duration {
		self.duration
	}

	/// Bitrate (kbps)
	pub fn bitrate(&self) -> u32 {
		self.bitrate
	}

	/// Sample rate (Hz)
	pub fn sample_rate(&self) -> u32 {
		self.sample_rate
	}

	/// Channel count
	pub fn channels(&self) -> u8 {
		self.channels
	}

	/// MPEG version
	pub fn version(&self) -> MpegVersion {
		self.version
	}

	/// MPEG layer
	pub fn layer(&self) -> Layer {
		self.layer
	}

	/// MPEG channel mode
	pub fn channel_mode(&self) -> ChannelMode {
		self.channel_mode
	}
}

impl From<MpegProperties> for AudioProperties {
	fn from(input: MpegProperties) -> Self {
		Self {
			codec: Some(input.version.to_string()),
			layer: Some(input.layer.to_string()),
			channels: Some(input.channels),
			channel_mode: Some(input.channel_mode.to_string()),
			sample_rate: Some(input.sample_rate),
			bitrate: Some(input.bitrate),
			duration: Some(input.duration),
		}
	}
}
