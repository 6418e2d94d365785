//! Audio stream properties
//!
//! These are gathered as a byproduct of tag reading, where the container exposes them
//! cheaply. No audio is decoded.

use std::time::Duration;

/// Various *immutable* audio properties
///
/// Every field is optional, as not every format (or every file) provides them.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
#[non_exhaustive]
pub struct AudioProperties {
	pub(crate) codec: Option<String>,
	pub(crate) layer: Option<String>,
	pub(crate) channels: Option<u8>,
	pub(crate) channel_mode: Option<String>,
	pub(crate) sample_rate: Option<u32>,
	pub(crate) bitrate: Option<u32>,
	pub(crate) duration: Option<Duration>,
}

impl AudioProperties {
	/// The codec or format version, ex. `MPEG Version 1`, `AAC LC` or `FLAC`
	pub fn codec(&self) -> Option<&str> {
		self.codec.as_deref()
	}

	/// The MPEG layer, ex. `Layer III`
	pub fn layer(&self) -> Option<&str> {
		self.layer.as_deref()
	}

	/// Channel count
	pub fn channels(&self) -> Option<u8> {
		self.channels
	}

	/// The MPEG channel mode, ex. `Joint Stereo`
	pub fn channel_mode(&self) -> Option<&str> {
		self.channel_mode.as_deref()
	}

	/// Sample rate (Hz)
	pub fn sample_rate(&self) -> Option<u32> {
		self.sample_rate
	}

	/// Bitrate (kbps)
	pub fn bitrate(&self) -> Option<u32> {
		self.bitrate
	}

	/// Duration of the audio
	pub fn duration(&self) -> Option<Duration> {
		self.duration
	}

	/// Duration of the audio in milliseconds
	pub fn duration_ms(&self) -> Option<u64> {
		self.duration.map(|d| d.as_millis() as u64)
	}

	/// Whether no property is known
	pub fn is_empty(&self) -> bool {
		*self == Self::default()
	}
}
