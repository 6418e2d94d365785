/// Restrictions on the tag size
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum TagSizeRestrictions {
	/// No more than 128 frames and 1 MB total tag size
	#[default]
	S_128F_1M,
	/// No more than 64 frames and 128 KB total tag size
	S_64F_128K,
	/// No more than 32 frames and 40 KB total tag size
	S_32F_40K,
	/// No more than 32 frames and 4 KB total tag size
	S_32F_4K,
}

/// Restrictions on text field sizes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum TextSizeRestrictions {
	/// No string is longer than 1024 characters
	C_1024,
	/// No string is longer than 128 characters
	C_128,
	/// No string is longer than 30 characters
	C_30,
}

/// Restrictions on all image sizes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum ImageSizeRestrictions {
	/// All images are 256x256 or smaller
	P_256,
	/// All images are 64x64 or smaller
	P_64,
	/// All images are exactly 64x64
	P_64_64,
}

/// Restrictions declared by an ID3v2.4 extended header
///
/// These are only reported, tagscan doesn't enforce them.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TagRestrictions {
	/// Maximum tag size and frame count
	pub size: TagSizeRestrictions,
	/// Text is restricted to Latin-1 or UTF-8
	pub text_encoding: bool,
	/// Maximum text field size
	pub text_fields_size: Option<TextSizeRestrictions>,
	/// Images are restricted to PNG or JPEG
	pub image_encoding: bool,
	/// Image dimensions
	pub image_size: Option<ImageSizeRestrictions>,
}

impl TagRestrictions {
	/// Decode the restrictions byte (`%ppqrrstt`)
	///
	/// # Examples
	///
	/// ```rust
	/// use tagscan::id3::v2::{TagRestrictions, TagSizeRestrictions};
	///
	/// let restrictions = TagRestrictions::from_byte(0b0110_0000);
	/// assert_eq!(restrictions.size, TagSizeRestrictions::S_64F_128K);
	/// assert!(restrictions.text_encoding);
	/// ```
	pub fn from_byte(byte: u8) -> Self {
		let size = match byte >> 6 {
			0b01 => TagSizeRestrictions::S_64F_128K,
			0b10 => TagSizeRestrictions::S_32F_40K,
			0b11 => TagSizeRestrictions::S_32F_4K,
			_ => TagSizeRestrictions::S_128F_1M,
		};

		let text_fields_size = match (byte >> 3) & 0b11 {
			0b01 => Some(TextSizeRestrictions::C_1024),
			0b10 => Some(TextSizeRestrictions::C_128),
			0b11 => Some(TextSizeRestrictions::C_30),
			_ => None,
		};

		let image_size = match byte & 0b11 {
			0b01 => Some(ImageSizeRestrictions::P_256),
			0b10 => Some(ImageSizeRestrictions::P_64),
			0b11 => Some(ImageSizeRestrictions::P_64_64),
			_ => None,
		};

		Self {
			size,
			text_encoding: byte & 0x20 == 0x20,
			text_fields_size,
			image_encoding: byte & 0x04 == 0x04,
			image_size,
		}
	}
}
