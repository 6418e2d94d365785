use super::constants::{
	BITRATE_BAD, BITRATE_BITS, BITRATE_FREE, BITRATES, CHANNEL_MODE_BITS, COPYRIGHT_BIT,
	EMPHASIS_BITS, FREQUENCY_BITS, LAYER_BITS, MODE_EXTENSION_BITS, MODE_EXTENSIONS,
	ORIGINAL_BIT, PADDING_BIT, PRIVATE_BIT, PROTECTION_BIT, SAMPLE_RATES, VERSION_BITS,
};
use crate::config::ParseOptions;
use crate::error::Result;
use crate::util::bits::BitDecoder;

use std::fmt::{Display, Formatter};
use std::io::{Read, Seek, SeekFrom};

pub(crate) fn verify_frame_sync(frame_sync: [u8; 2]) -> bool {
	frame_sync[0] == 0xFF && frame_sync[1] >> 5 == 0b111
}

/// Search for a frame sync (11 set bits) in the reader
///
/// The search starts at the current position and returns the offset of the sync relative to
/// it. The reader is left somewhere after the sync, callers seek back using the offset.
///
/// The sync must be byte aligned.
///
/// # Errors
///
/// Any IO error from the reader
///
/// # Examples
///
/// ```rust
/// use std::io::Cursor;
/// use tagscan::mpeg::search_for_frame_sync;
///
/// # fn main() -> std::io::Result<()> {
/// let mut reader = Cursor::new([0x00, 0x20, 0xFF, 0xFB, 0x90, 0x40]);
/// assert_eq!(search_for_frame_sync(&mut reader)?, Some(2));
/// # Ok(()) }
/// ```
pub fn search_for_frame_sync<R>(input: &mut R) -> std::io::Result<Option<u64>>
where
	R: Read,
{
	let mut iterator = input.bytes();
	let mut buffer = [0u8; 2];
	// Each iteration expects buffer[0] to be filled by the previous one
	if let Some(byte) = iterator.next() {
		buffer[0] = byte?;
	}

	// Overlapping pairs: [0x01, 0x02, 0x03] is checked as [0x01, 0x02], [0x02, 0x03]
	for (index, byte) in iterator.enumerate() {
		buffer[1] = byte?;
		if verify_frame_sync(buffer) {
			return Ok(Some(index as u64));
		}

		buffer[0] = buffer[1];
	}

	Ok(None)
}

/// MPEG Audio version
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
#[allow(missing_docs)]
pub enum MpegVersion {
	V1,
	V2,
	V2_5,
	Reserved,
}

impl Display for MpegVersion {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::V1 => f.write_str("MPEG Version 1"),
			Self::V2 => f.write_str("MPEG Version 2"),
			Self::V2_5 => f.write_str("MPEG Version 2.5"),
			Self::Reserved => f.write_str("reserved"),
		}
	}
}

/// MPEG layer
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Layer {
	Layer1,
	Layer2,
	Layer3,
	Reserved,
}

impl Display for Layer {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Layer1 => f.write_str("Layer I"),
			Self::Layer2 => f.write_str("Layer II"),
			Self::Layer3 => f.write_str("Layer III"),
			Self::Reserved => f.write_str("reserved"),
		}
	}
}

/// Channel mode
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub enum ChannelMode {
	Stereo,
	JointStereo,
	/// Two independent mono channels
	DualChannel,
	SingleChannel,
}

impl ChannelMode {
	/// The number of channels in the mode
	pub fn channels(self) -> u8 {
		match self {
			Self::SingleChannel => 1,
			_ => 2,
		}
	}
}

impl Display for ChannelMode {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Stereo => f.write_str("Stereo"),
			Self::JointStereo => f.write_str("Joint Stereo"),
			Self::DualChannel => f.write_str("Dual Channel"),
			Self::SingleChannel => f.write_str("Single Channel"),
		}
	}
}

/// A rarely-used decoder hint that the file must be de-emphasized
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[allow(missing_docs, non_camel_case_types)]
pub enum Emphasis {
	None,
	/// 50/15 ms
	MS5015,
	Reserved,
	/// CCIT J.17
	CCIT_J17,
}

impl Display for Emphasis {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::None => f.write_str("none"),
			Self::MS5015 => f.write_str("50/15 ms"),
			Self::Reserved => f.write_str("reserved"),
			Self::CCIT_J17 => f.write_str("CCIT J.17"),
		}
	}
}

/// The bitrate field of a frame header
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Bitrate {
	/// A free format stream, the bitrate is not stored
	Free,
	/// A bitrate in kbps
	Kbps(u32),
	/// An invalid bitrate index
	Bad,
}

impl Display for Bitrate {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Free => f.write_str("free"),
			Self::Kbps(kbps) => write!(f, "{kbps}"),
			Self::Bad => f.write_str("bad"),
		}
	}
}

/// A decoded MPEG audio frame header
///
/// Every field is decoded, even when the header as a whole is unusable. See
/// [`MpegFrameHeader::is_valid`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MpegFrameHeader {
	pub(crate) version: MpegVersion,
	pub(crate) layer: Layer,
	pub(crate) protected: bool,
	pub(crate) bitrate: Bitrate,
	pub(crate) sample_rate: Option<u32>,
	pub(crate) padding: bool,
	pub(crate) private: bool,
	pub(crate) channel_mode: ChannelMode,
	pub(crate) mode_extension: u8,
	pub(crate) copyright: bool,
	pub(crate) original: bool,
	pub(crate) emphasis: Emphasis,
}

impl MpegFrameHeader {
	/// Decode the 4 header bytes, starting with the sync
	///
	/// # Examples
	///
	/// ```rust
	/// use tagscan::mpeg::MpegFrameHeader;
	///
	/// let header = MpegFrameHeader::parse([0xFF, 0xFB, 0x90, 0x40]);
	///
	/// assert_eq!(header.version().to_string(), "MPEG Version 1");
	/// assert_eq!(header.layer().to_string(), "Layer III");
	/// assert_eq!(header.bitrate().to_string(), "128");
	/// assert_eq!(header.frequency_str(), "44100");
	/// assert!(header.is_valid());
	/// ```
	pub fn parse(bytes: [u8; 4]) -> Self {
		let bits = BitDecoder::from_bytes(&bytes);
		// Every field lies within the 32 bits, so the lookups cannot fail
		let field = |(start, len): (usize, usize)| bits.field(start, len).unwrap_or_default();
		let flag = |index: usize| bits.bit(index).unwrap_or_default();

		let version = match field(VERSION_BITS) {
			0b00 => MpegVersion::V2_5,
			0b10 => MpegVersion::V2,
			0b11 => MpegVersion::V1,
			_ => MpegVersion::Reserved,
		};

		let layer = match field(LAYER_BITS) {
			0b01 => Layer::Layer3,
			0b10 => Layer::Layer2,
			0b11 => Layer::Layer1,
			_ => Layer::Reserved,
		};

		let bitrate = match field(BITRATE_BITS) {
			BITRATE_FREE => Bitrate::Free,
			BITRATE_BAD => Bitrate::Bad,
			index => match bitrate_row(version, layer) {
				Some(row) => Bitrate::Kbps(u32::from(BITRATES[row][index as usize])),
				None => Bitrate::Bad,
			},
		};

		let sample_rate = match (version_row(version), field(FREQUENCY_BITS)) {
			(Some(row), index @ 0..=2) => Some(SAMPLE_RATES[row][index as usize]),
			_ => None,
		};

		let channel_mode = match field(CHANNEL_MODE_BITS) {
			0b00 => ChannelMode::Stereo,
			0b01 => ChannelMode::JointStereo,
			0b10 => ChannelMode::DualChannel,
			_ => ChannelMode::SingleChannel,
		};

		let emphasis = match field(EMPHASIS_BITS) {
			0b00 => Emphasis::None,
			0b01 => Emphasis::MS5015,
			0b10 => Emphasis::Reserved,
			_ => Emphasis::CCIT_J17,
		};

		Self {
			version,
			layer,
			protected: flag(PROTECTION_BIT),
			bitrate,
			sample_rate,
			padding: flag(PADDING_BIT),
			private: flag(PRIVATE_BIT),
			channel_mode,
			mode_extension: field(MODE_EXTENSION_BITS) as u8,
			copyright: flag(COPYRIGHT_BIT),
			original: flag(ORIGINAL_BIT),
			emphasis,
		}
	}

	/// Find the first valid frame header, starting at the current position
	///
	/// Returns the header and its absolute offset. Invalid headers (false syncs) are skipped.
	/// The search ends at EOF, or when the options' cancellation token fires.
	///
	/// # Errors
	///
	/// Any IO error from the reader, other than reaching EOF
	pub fn find<R>(reader: &mut R, options: &ParseOptions) -> Result<Option<(Self, u64)>>
	where
		R: Read + Seek,
	{
		let mut search_start = reader.stream_position()?;
		loop {
			if options.is_cancelled() {
				log::debug!("MPEG: Frame header search cancelled");
				return Ok(None);
			}

			let Some(relative_offset) = search_for_frame_sync(reader)? else {
				return Ok(None);
			};

			let sync_pos = search_start + relative_offset;
			reader.seek(SeekFrom::Start(sync_pos))?;

			let mut bytes = [0; 4];
			if reader.read_exact(&mut bytes).is_err() {
				return Ok(None);
			}

			let header = Self::parse(bytes);
			if header.is_valid() {
				log::debug!("MPEG: Found a valid frame header at {sync_pos}");
				return Ok(Some((header, sync_pos)));
			}

			log::trace!("MPEG: Skipping invalid frame header at {sync_pos}");

			search_start = sync_pos + 1;
			reader.seek(SeekFrom::Start(search_start))?;
		}
	}

	/// Whether the header describes a usable frame
	///
	/// The bitrate must be known (not free or bad), and the version, layer and frequency must not
	/// be reserved.
	pub fn is_valid(&self) -> bool {
		matches!(self.bitrate, Bitrate::Kbps(kbps) if kbps > 0)
			&& self.sample_rate.is_some_and(|rate| rate > 95)
			&& self.version != MpegVersion::Reserved
			&& self.layer != Layer::Reserved
	}

	/// MPEG version
	pub fn version(&self) -> MpegVersion {
		self.version
	}

	/// MPEG layer
	pub fn layer(&self) -> Layer {
		self.layer
	}

	/// Whether the frame is protected by a CRC
	///
	/// NOTE: The bit is inverted on disk, this is the raw bit.
	pub fn protection_bit(&self) -> bool {
		self.protected
	}

	/// The bitrate
	pub fn bitrate(&self) -> Bitrate {
		self.bitrate
	}

	/// The bitrate in kbps, if it is known
	pub fn bitrate_kbps(&self) -> Option<u32> {
		match self.bitrate {
			Bitrate::Kbps(kbps) => Some(kbps),
			_ => None,
		}
	}

	/// Sample rate (Hz), if the frequency isn't reserved
	pub fn sample_rate(&self) -> Option<u32> {
		self.sample_rate
	}

	/// The sample rate as a string, or `reserved`
	pub fn frequency_str(&self) -> String {
		match self.sample_rate {
			Some(rate) => rate.to_string(),
			None => String::from("reserved"),
		}
	}

	/// Whether the frame is padded with an extra slot
	pub fn is_padded(&self) -> bool {
		self.padding
	}

	/// The application-specific private bit
	pub fn private_bit(&self) -> bool {
		self.private
	}

	/// MPEG channel mode
	pub fn channel_mode(&self) -> ChannelMode {
		self.channel_mode
	}

	/// The raw mode extension bits
	pub fn mode_extension(&self) -> u8 {
		self.mode_extension
	}

	/// The mode extension, as described for the layer
	///
	/// Layer III describes intensity and M/S stereo (`""`, `IS`, `MS`, `IS+MS`), while
	/// layers I and II describe the bands used (`4-31` through `16-31`).
	pub fn mode_extension_str(&self) -> &'static str {
		let row = if self.layer == Layer::Layer3 { 1 } else { 0 };
		MODE_EXTENSIONS[row][usize::from(self.mode_extension & 0b11)]
	}

	/// Whether the audio is copyrighted
	pub fn is_copyright(&self) -> bool {
		self.copyright
	}

	/// Whether the media is original or a copy
	pub fn is_original(&self) -> bool {
		self.original
	}

	/// See [`Emphasis`]
	pub fn emphasis(&self) -> Emphasis {
		self.emphasis
	}
}

fn version_row(version: MpegVersion) -> Option<usize> {
	match version {
		MpegVersion::V1 => Some(0),
		MpegVersion::V2 => Some(1),
		MpegVersion::V2_5 => Some(2),
		MpegVersion::Reserved => None,
	}
}

fn bitrate_row(version: MpegVersion, layer: Layer) -> Option<usize> {
	match (version, layer) {
		(MpegVersion::Reserved, _) | (_, Layer::Reserved) => None,
		(MpegVersion::V1, Layer::Layer1) => Some(0),
		(MpegVersion::V1, Layer::Layer2) => Some(1),
		(MpegVersion::V1, Layer::Layer3) => Some(2),
		(_, Layer::Layer1) => Some(3),
		_ => Some(4),
	}
}
