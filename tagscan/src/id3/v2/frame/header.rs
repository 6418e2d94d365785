use crate::error::{Id3v2Error, Id3v2ErrorKind, Result};
use crate::id3::v2::Id3v2Version;
use crate::id3::v2::util::upgrade::upgrade_v2;
use crate::util::num::{synchsafe_u32, u24_be, u32_be};
use crate::util::text::utf8_decode_str;

use byteorder::{BigEndian, ByteOrder};

/// Various flags to describe the content of an item
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct FrameFlags {
	/// A group identifier byte precedes the content
	pub grouping_identity: bool,
	/// The content is zlib-compressed
	pub compression: bool,
	/// An encryption method byte precedes the content
	pub encryption: bool,
	/// The content is unsynchronised (ID3v2.4)
	pub unsynchronisation: bool,
	/// A 4 byte synchsafe data length indicator precedes the content (ID3v2.4)
	pub data_length_indicator: bool,
}

impl FrameFlags {
	/// Parse the flags from an ID3v2.4 frame
	pub fn parse_id3v24(flags: u16) -> Self {
		Self {
			grouping_identity: flags & 0x0040 == 0x0040,
			compression: flags & 0x0008 == 0x0008,
			encryption: flags & 0x0004 == 0x0004,
			unsynchronisation: flags & 0x0002 == 0x0002,
			data_length_indicator: flags & 0x0001 == 0x0001,
		}
	}

	/// Parse the flags from an ID3v2.3 frame
	pub fn parse_id3v23(flags: u16) -> Self {
		Self {
			grouping_identity: flags & 0x0020 == 0x0020,
			compression: flags & 0x0080 == 0x0080,
			encryption: flags & 0x0040 == 0x0040,
			unsynchronisation: false,
			data_length_indicator: false,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FrameHeader {
	/// The ID3v2.4 form of the frame ID
	pub id: String,
	/// The size of the frame content, excluding the header
	pub size: u32,
	pub flags: FrameFlags,
}

pub(crate) enum ParsedHeader {
	Frame(FrameHeader),
	/// The remaining bytes are padding, or garbage
	End,
}

/// Parse a frame header from the start of `bytes`
///
/// `bytes` must hold at least [`Id3v2Version::frame_header_len`] bytes.
pub(crate) fn parse_header(bytes: &[u8], version: Id3v2Version) -> Result<ParsedHeader> {
	// Padding
	if bytes.first().is_none_or(|b| *b == 0) {
		return Ok(ParsedHeader::End);
	}

	let (id_bytes, size, flags) = match version {
		Id3v2Version::V2 => (&bytes[..3], u24_be(&bytes[3..]), FrameFlags::default()),
		Id3v2Version::V3 => {
			// Some encoders write ID3v2.2 frame IDs into ID3v2.3 frame headers
			let id_end = if bytes[3] == 0 { 3 } else { 4 };
			(
				&bytes[..id_end],
				u32_be(&bytes[4..]),
				FrameFlags::parse_id3v23(BigEndian::read_u16(&bytes[8..10])),
			)
		},
		Id3v2Version::V4 => (
			&bytes[..4],
			synchsafe_u32(&bytes[4..]),
			FrameFlags::parse_id3v24(BigEndian::read_u16(&bytes[8..10])),
		),
	};

	if !id_bytes
		.iter()
		.all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
	{
		log::warn!("ID3v2: Encountered an invalid frame ID, stopping");
		return Ok(ParsedHeader::End);
	}

	let id_str = utf8_decode_str(id_bytes)
		.map_err(|_| Id3v2Error::new(Id3v2ErrorKind::BadFrameId(id_bytes.to_vec())))?;

	let id = if id_str.len() == 3 {
		if version == Id3v2Version::V3 {
			log::warn!("ID3v2: Found an ID3v2.2 frame ID in an ID3v2.3 tag, attempting to upgrade");
		}

		// Frames with no ID3v2.4 counterpart keep their original ID, and are skipped later
		upgrade_v2(id_str).map_or_else(|| id_str.to_owned(), str::to_owned)
	} else {
		id_str.to_owned()
	};

	Ok(ParsedHeader::Frame(FrameHeader { id, size, flags }))
}

#[cfg(test)]
mod tests {
	use super::{ParsedHeader, parse_header};
	use crate::id3::v2::Id3v2Version;

	fn frame(bytes: &[u8], version: Id3v2Version) -> super::FrameHeader {
		match parse_header(bytes, version).unwrap() {
			ParsedHeader::Frame(header) => header,
			ParsedHeader::End => panic!("Expected a frame header"),
		}
	}

	#[test_log::test]
	fn plain_and_synchsafe_sizes_agree() {
		// 200 bytes, as a plain integer and a synchsafe integer
		let v3 = frame(b"TIT2\x00\x00\x00\xC8\x00\x00", Id3v2Version::V3);
		let v4 = frame(b"TIT2\x00\x00\x01\x48\x00\x00", Id3v2Version::V4);

		assert_eq!(v3.size, 200);
		assert_eq!(v3, v4);
	}

	#[test_log::test]
	fn v2_ids_are_upgraded() {
		let v2 = frame(b"TT2\x00\x01\x00", Id3v2Version::V2);
		assert_eq!(v2.id, "TIT2");
		assert_eq!(v2.size, 256);

		let v2_in_v3 = frame(b"TP1\x00\x00\x00\x00\x05\x00\x00", Id3v2Version::V3);
		assert_eq!(v2_in_v3.id, "TPE1");
	}

	#[test_log::test]
	fn flags() {
		let v3 = frame(b"APIC\x00\x00\x00\x10\x00\xE0", Id3v2Version::V3);
		assert!(v3.flags.compression);
		assert!(v3.flags.encryption);
		assert!(v3.flags.grouping_identity);

		let v4 = frame(b"APIC\x00\x00\x00\x10\x00\x4F", Id3v2Version::V4);
		assert!(v4.flags.grouping_identity);
		assert!(v4.flags.compression);
		assert!(v4.flags.encryption);
		assert!(v4.flags.unsynchronisation);
		assert!(v4.flags.data_length_indicator);
	}

	#[test_log::test]
	fn padding_and_garbage_end_the_tag() {
		assert!(matches!(
			parse_header(&[0; 10], Id3v2Version::V4).unwrap(),
			ParsedHeader::End
		));
		assert!(matches!(
			parse_header(b"ti t\x00\x00\x00\x01\x00\x00", Id3v2Version::V3).unwrap(),
			ParsedHeader::End
		));
	}
}
