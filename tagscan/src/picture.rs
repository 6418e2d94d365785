//! Embedded artwork

use crate::error::{ErrorKind, Result, TagError};
use crate::macros::err;
use crate::util::text::utf8_decode_str;

use std::fmt::{Debug, Display, Formatter};
use std::io::{Cursor, Read};

use byteorder::{BigEndian, ReadBytesExt};
use data_encoding::BASE64;

/// MIME types for pictures.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum MimeType {
	/// PNG image
	Png,
	/// JPEG image
	Jpeg,
	/// TIFF image
	Tiff,
	/// BMP image
	Bmp,
	/// GIF image
	Gif,
	/// Some unknown MIME type
	Unknown(String),
}

impl MimeType {
	/// Get a `MimeType` from a string
	///
	/// # Examples
	///
	/// ```rust
	/// use tagscan::picture::MimeType;
	///
	/// assert_eq!(MimeType::from_str("image/jpeg"), MimeType::Jpeg);
	/// assert_eq!(MimeType::from_str("IMAGE/PNG"), MimeType::Png);
	/// ```
	#[must_use]
	#[allow(clippy::should_implement_trait)] // Infallible in contrast to FromStr
	pub fn from_str(mime_type: &str) -> Self {
		match &*mime_type.to_lowercase() {
			"image/jpeg" | "image/jpg" => Self::Jpeg,
			"image/png" => Self::Png,
			"image/tiff" => Self::Tiff,
			"image/bmp" => Self::Bmp,
			"image/gif" => Self::Gif,
			_ => Self::Unknown(mime_type.to_owned()),
		}
	}

	/// Get a &str from a `MimeType`
	///
	/// # Examples
	///
	/// ```rust
	/// use tagscan::picture::MimeType;
	///
	/// assert_eq!(MimeType::Jpeg.as_str(), "image/jpeg")
	/// ```
	#[must_use]
	pub fn as_str(&self) -> &str {
		match self {
			MimeType::Jpeg => "image/jpeg",
			MimeType::Png => "image/png",
			MimeType::Tiff => "image/tiff",
			MimeType::Bmp => "image/bmp",
			MimeType::Gif => "image/gif",
			MimeType::Unknown(unknown) => unknown,
		}
	}

	/// Guess the `MimeType` from the leading bytes of an image
	///
	/// Returns `None` when the signature isn't recognized, or there are too few bytes to tell.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagscan::picture::MimeType;
	///
	/// assert_eq!(MimeType::sniff(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(MimeType::Jpeg));
	/// assert_eq!(MimeType::sniff(b"jpeg"), None);
	/// ```
	pub fn sniff(bytes: &[u8]) -> Option<Self> {
		match bytes {
			[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some(MimeType::Png),
			[0xFF, 0xD8, ..] => Some(MimeType::Jpeg),
			[b'G', b'I', b'F', 0x38, 0x37 | 0x39, b'a', ..] => Some(MimeType::Gif),
			[b'B', b'M', ..] => Some(MimeType::Bmp),
			[b'I', b'I', b'*', 0x00, ..] | [b'M', b'M', 0x00, b'*', ..] => Some(MimeType::Tiff),
			_ => None,
		}
	}

	/// Map the image format of an ID3v2.2 `PIC` frame (ex. `JPG`)
	pub(crate) fn from_pic_format(format: [u8; 3]) -> Self {
		match &format.map(|b| b.to_ascii_uppercase()) {
			b"JPG" => MimeType::Jpeg,
			b"PNG" => MimeType::Png,
			b"GIF" => MimeType::Gif,
			b"BMP" => MimeType::Bmp,
			b"TIF" => MimeType::Tiff,
			_ => MimeType::Unknown(format.iter().map(|c| char::from(*c)).collect()),
		}
	}
}

impl Display for MimeType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// The purpose of an image
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
#[non_exhaustive]
pub enum PictureType {
	#[default]
	NotSet,
	Unsupported,
	Generic,
	Front,
	SecondaryFront,
	Back,
	Cd,
	Icon,
	Leaflet,
	LeadArtist,
	Artist,
	ArtistSecondary,
	Conductor,
	Band,
	BandSecondary,
	Composer,
	Lyricist,
	RecordingLocation,
	DuringRecording,
	DuringPerformance,
	BandLogo,
	PublisherLogo,
	LabelLogo,
	Song,
	SongSecondary,
}

impl PictureType {
	/// Map a picture type code, as used by ID3v2 `APIC`, ASF `WM/Picture` and FLAC `PICTURE`
	///
	/// # Examples
	///
	/// ```rust
	/// use tagscan::picture::PictureType;
	///
	/// assert_eq!(PictureType::from_apic(3), PictureType::Front);
	/// assert_eq!(PictureType::from_apic(6), PictureType::Cd);
	/// assert_eq!(PictureType::from_apic(200), PictureType::Unsupported);
	/// ```
	pub fn from_apic(code: u8) -> Self {
		match code {
			0 => Self::Generic,
			1 | 2 => Self::Icon,
			3 => Self::Front,
			4 => Self::Back,
			5 => Self::Leaflet,
			6 => Self::Cd,
			7 => Self::LeadArtist,
			8 => Self::Artist,
			9 => Self::Conductor,
			10 => Self::Band,
			11 => Self::Composer,
			12 => Self::Lyricist,
			13 => Self::RecordingLocation,
			14 => Self::DuringRecording,
			15 => Self::DuringPerformance,
			19 => Self::BandLogo,
			20 => Self::PublisherLogo,
			_ => Self::Unsupported,
		}
	}
}

/// An image embedded in an audio file
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct AudioImage {
	pub(crate) description: Option<String>,
	pub(crate) mime_type: Option<MimeType>,
	pub(crate) data: Vec<u8>,
	pub(crate) picture_type: PictureType,
}

impl Debug for AudioImage {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AudioImage")
			.field("picture_type", &self.picture_type)
			.field("mime_type", &self.mime_type)
			.field("description", &self.description)
			.field("data", &format!("<{} bytes>", self.data.len()))
			.finish()
	}
}

impl AudioImage {
	/// Create a new `AudioImage`
	///
	/// # Examples
	///
	/// ```rust
	/// use tagscan::picture::{AudioImage, MimeType, PictureType};
	///
	/// let image = AudioImage::new(PictureType::Front, Some(MimeType::Png), None, vec![0x89]);
	/// assert_eq!(image.data(), &[0x89]);
	/// ```
	pub fn new(
		picture_type: PictureType,
		mime_type: Option<MimeType>,
		description: Option<String>,
		data: Vec<u8>,
	) -> Self {
		Self {
			description: description.filter(|d| !d.is_empty()),
			mime_type,
			data,
			picture_type,
		}
	}

	/// The image's description, if it has a non-empty one
	pub fn description(&self) -> Option<&str> {
		self.description.as_deref()
	}

	/// The image's MIME type, if it is known
	pub fn mime_type(&self) -> Option<&MimeType> {
		self.mime_type.as_ref()
	}

	/// The image's purpose
	pub fn picture_type(&self) -> PictureType {
		self.picture_type
	}

	/// The raw image bytes
	pub fn data(&self) -> &[u8] {
		&self.data
	}

	/// Consume the image, returning its bytes
	pub fn into_data(self) -> Vec<u8> {
		self.data
	}

	/// Get an `AudioImage` from a FLAC `PICTURE` block
	///
	/// NOTE: This takes both the base64 encoded string from Vorbis comments
	/// (`METADATA_BLOCK_PICTURE`), and the raw data from a FLAC block, specified with `encoded`.
	///
	/// # Errors
	///
	/// This function will return [`NotAPicture`][ErrorKind::NotAPicture] if
	/// at any point it's unable to parse the data
	pub fn from_flac_bytes(bytes: &[u8], encoded: bool) -> Result<Self> {
		if encoded {
			let data = BASE64
				.decode(bytes)
				.map_err(|_| TagError::new(ErrorKind::NotAPicture))?;
			Self::from_flac_bytes_inner(&data)
		} else {
			Self::from_flac_bytes_inner(bytes)
		}
	}

	fn from_flac_bytes_inner(content: &[u8]) -> Result<Self> {
		// Type, MIME length, description length, 4 dimensions, data length
		const FIXED_FIELDS_LEN: usize = 32;

		if content.len() < FIXED_FIELDS_LEN {
			err!(NotAPicture);
		}

		let mut reader = Cursor::new(content);

		let pic_ty = reader.read_u32::<BigEndian>()?;
		let mime_type_str = read_flac_string(&mut reader)?;
		let description = read_flac_string(&mut reader)?;

		// Width, height, color depth, color count
		let mut dimensions = [0; 16];
		reader.read_exact(&mut dimensions)?;

		let data_len = reader.read_u32::<BigEndian>()? as usize;
		let data_start = reader.position() as usize;
		let Some(data) = content.get(data_start..data_start + data_len) else {
			err!(SizeMismatch);
		};

		let data = data.to_vec();

		let mime_type = if mime_type_str.is_empty() {
			MimeType::sniff(&data)
		} else {
			Some(MimeType::from_str(mime_type_str))
		};

		// Picture types are a single byte in every other container
		let picture_type = u8::try_from(pic_ty).map_or(PictureType::Unsupported, PictureType::from_apic);

		Ok(Self::new(
			picture_type,
			mime_type,
			Some(description.to_owned()),
			data,
		))
	}

	/// Get an `AudioImage` from an APEv2 binary item
	///
	/// The layout is a NUL-terminated description followed by the image bytes. The MIME type is
	/// guessed from the image signature.
	///
	/// # Errors
	///
	/// This function will return [`NotAPicture`](ErrorKind::NotAPicture) if `bytes` is empty
	pub fn from_ape_bytes(picture_type: PictureType, bytes: &[u8]) -> Result<Self> {
		if bytes.is_empty() {
			err!(NotAPicture);
		}

		let (description, data) = match bytes.iter().position(|b| *b == 0) {
			Some(end) => (&bytes[..end], &bytes[end + 1..]),
			None => (&[][..], bytes),
		};

		let description = description.iter().map(|c| char::from(*c)).collect::<String>();

		Ok(Self::new(
			picture_type,
			MimeType::sniff(data),
			Some(description),
			data.to_vec(),
		))
	}
}

fn read_flac_string<'a>(reader: &mut Cursor<&'a [u8]>) -> Result<&'a str> {
	let len = reader.read_u32::<BigEndian>()? as usize;
	let start = reader.position() as usize;
	let content: &'a [u8] = *reader.get_ref();

	let Some(bytes) = start.checked_add(len).and_then(|end| content.get(start..end)) else {
		err!(SizeMismatch);
	};

	reader.set_position((start + len) as u64);
	utf8_decode_str(bytes)
}
