use crate::error::{Id3v2Error, Id3v2ErrorKind, Result};
use crate::id3::v2::restrictions::TagRestrictions;
use crate::id3::v2::util::synchsafe::SynchsafeInteger;
use crate::macros::err;
use crate::util::num::{synchsafe_u32, u32_be};

use std::io::Read;

use byteorder::{BigEndian, ByteOrder};

// Anything larger is assumed to be garbage
const MAX_TAG_SIZE: u32 = 100 * 1024 * 1024;

/// The ID3v2 version
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Id3v2Version {
	/// ID3v2.2
	V2,
	/// ID3v2.3
	V3,
	/// ID3v2.4
	V4,
}

impl Id3v2Version {
	/// The size of a frame header for this version
	pub(crate) fn frame_header_len(self) -> usize {
		match self {
			Self::V2 => 6,
			Self::V3 | Self::V4 => 10,
		}
	}
}

/// Flags that apply to the entire tag
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Id3v2TagFlags {
	/// Whether the tag content is unsynchronised
	pub unsynchronisation: bool,
	/// Whether an extended header follows the tag header (ID3v2.3+)
	pub extended_header: bool,
	/// Indicates if the tag is in an experimental stage
	pub experimental: bool,
	/// Indicates that the tag includes a footer (ID3v2.4)
	pub footer: bool,
}

/// A decoded ID3v2 tag header
#[derive(Copy, Clone, Debug)]
pub(crate) struct Id3v2Header {
	pub version: Id3v2Version,
	pub minor: u8,
	pub flags: Id3v2TagFlags,
	/// The size of the tag contents (**DOES NOT INCLUDE THE HEADER/FOOTER**)
	pub size: u32,
}

impl Id3v2Header {
	pub(crate) fn parse<R>(reader: &mut R) -> Result<Self>
	where
		R: Read,
	{
		log::debug!("Parsing ID3v2 header");

		let mut header = [0; 10];
		reader.read_exact(&mut header)?;

		Self::from_bytes(header)
	}

	pub(crate) fn from_bytes(header: [u8; 10]) -> Result<Self> {
		if &header[..3] != b"ID3" {
			err!(FakeTag);
		}

		let version = match header[3] {
			2 => Id3v2Version::V2,
			3 => Id3v2Version::V3,
			4 => Id3v2Version::V4,
			major => {
				return Err(
					Id3v2Error::new(Id3v2ErrorKind::BadId3v2Version(major, header[4])).into(),
				);
			},
		};

		let flags = header[5];

		// ID3v2.2 reserved this bit for a compression scheme that was never defined
		if version == Id3v2Version::V2 && flags & 0x40 == 0x40 {
			return Err(Id3v2Error::new(Id3v2ErrorKind::V2Compression).into());
		}

		let is_v3_or_later = version != Id3v2Version::V2;
		let flags = Id3v2TagFlags {
			unsynchronisation: flags & 0x80 == 0x80,
			extended_header: is_v3_or_later && flags & 0x40 == 0x40,
			experimental: is_v3_or_later && flags & 0x20 == 0x20,
			footer: version == Id3v2Version::V4 && flags & 0x10 == 0x10,
		};

		let size = synchsafe_u32(&header[6..]);
		if size == 0 || size >= MAX_TAG_SIZE {
			return Err(Id3v2Error::new(Id3v2ErrorKind::BadTagSize(size)).into());
		}

		Ok(Self {
			version,
			minor: header[4],
			flags,
			size,
		})
	}

	/// The total size of the tag, including the header and footer
	pub(crate) fn full_tag_size(&self) -> u64 {
		u64::from(self.size) + 10 + if self.flags.footer { 10 } else { 0 }
	}

	/// Whether `footer` is the footer matching this header
	pub(crate) fn matches_footer(&self, footer: &[u8; 10]) -> bool {
		&footer[..3] == b"3DI"
			&& footer[3] == 4
			&& footer[4] == self.minor
			&& synchsafe_u32(&footer[6..]) == self.size
	}
}

/// An ID3v2.3/2.4 extended header
///
/// The contents are reported as found, nothing is verified against them.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
pub struct ExtendedHeader {
	/// The number of bytes the extended header occupies, including its size field
	pub len: u32,
	/// Whether the tag is an update of an earlier tag (ID3v2.4)
	pub update: bool,
	/// The CRC-32 of the tag frames, if present
	pub crc: Option<u32>,
	/// The padding size declared by an ID3v2.3 extended header
	pub padding_size: Option<u32>,
	/// Tag restrictions (ID3v2.4)
	pub restrictions: Option<TagRestrictions>,
}

impl ExtendedHeader {
	/// Parse the extended header from the start of the tag body
	pub(crate) fn parse(body: &[u8], version: Id3v2Version) -> Result<Self> {
		match version {
			Id3v2Version::V4 => Self::parse_v4(body),
			Id3v2Version::V3 => Self::parse_v3(body),
			Id3v2Version::V2 => Ok(Self::default()),
		}
	}

	fn parse_v4(body: &[u8]) -> Result<Self> {
		// The size includes the size field itself
		let len = synchsafe_u32(body);
		if len < 6 || len as usize > body.len() {
			return Err(Id3v2Error::new(Id3v2ErrorKind::BadExtendedHeaderSize).into());
		}

		let mut extended = Self {
			len,
			..Self::default()
		};

		// Only a single flag byte is defined
		let flags = body[5];
		let mut data = &body[6..len as usize];

		if flags & 0x40 == 0x40 {
			extended.update = true;
			data = data.get(1..).unwrap_or_default();
		}

		if flags & 0x20 == 0x20 {
			// Length byte (always 5), followed by a 35 bit synchsafe integer
			if let Some(crc) = data.get(1..6) {
				let crc = BigEndian::read_uint(crc, 5).unsynch();
				extended.crc = Some(crc as u32);
			}
			data = data.get(6..).unwrap_or_default();
		}

		if flags & 0x10 == 0x10 {
			// Length byte (always 1), followed by the restrictions
			if let Some(&restrictions) = data.get(1) {
				extended.restrictions = Some(TagRestrictions::from_byte(restrictions));
			}
		}

		Ok(extended)
	}

	fn parse_v3(body: &[u8]) -> Result<Self> {
		// The size excludes the size field itself, and can only be 6 or 10
		let size = u32_be(body);
		if !(size == 6 || size == 10) || size as usize + 4 > body.len() {
			return Err(Id3v2Error::new(Id3v2ErrorKind::BadExtendedHeaderSize).into());
		}

		let flags = BigEndian::read_u16(&body[4..6]);
		let crc = (flags & 0x8000 == 0x8000 && size == 10).then(|| u32_be(&body[10..14]));

		Ok(Self {
			len: size + 4,
			padding_size: Some(u32_be(&body[6..10])),
			crc,
			..Self::default()
		})
	}
}
