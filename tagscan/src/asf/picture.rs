use super::object::read_slice;
use crate::error::Result;
use crate::macros::err;
use crate::picture::{AudioImage, MimeType, PictureType};
use crate::util::text::utf16_decode_bytes;

use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};

/// Decode a `WM/Picture` value
///
/// Two layouts are in use:
///
/// ```text
/// type (u16) | MIME length (u32, in characters) | MIME | description length (u32, in characters) | description | image length (u32) | image
/// type (u8)  | image length (u32) | MIME (NUL-terminated) | description (NUL-terminated) | image
/// ```
///
/// All integers are little endian, and all text is UTF-16LE. The first layout is tried first.
pub(super) fn read_picture(value: &[u8]) -> Result<AudioImage> {
	match read_counted_layout(value) {
		Ok(image) => Ok(image),
		Err(err) => {
			log::trace!("ASF: Picture isn't in the counted layout ({err}), trying the other");
			read_terminated_layout(value)
		},
	}
}

fn read_counted_layout(value: &[u8]) -> Result<AudioImage> {
	let mut reader = Cursor::new(value);

	let picture_type = reader.read_u16::<LittleEndian>()?;

	let mime_len = reader.read_u32::<LittleEndian>()? as usize;
	let mime = read_slice(&mut reader, mime_len.saturating_mul(2))?;

	let description_len = reader.read_u32::<LittleEndian>()? as usize;
	let description = read_slice(&mut reader, description_len.saturating_mul(2))?;

	let image_len = reader.read_u32::<LittleEndian>()? as usize;
	let image = read_slice(&mut reader, image_len)?;

	let picture_type =
		u8::try_from(picture_type).map_or(PictureType::Unsupported, PictureType::from_apic);
	build_image(picture_type, mime, description, image)
}

fn read_terminated_layout(value: &[u8]) -> Result<AudioImage> {
	let mut reader = Cursor::new(value);

	let picture_type = PictureType::from_apic(reader.read_u8()?);
	let image_len = reader.read_u32::<LittleEndian>()? as usize;

	let mime = read_terminated(&mut reader)?;
	let description = read_terminated(&mut reader)?;
	let image = read_slice(&mut reader, image_len)?;

	build_image(picture_type, mime, description, image)
}

// A UTF-16 string ending in a (two byte) NUL, the NUL is consumed but not returned
fn read_terminated<'a>(reader: &mut Cursor<&'a [u8]>) -> Result<&'a [u8]> {
	let start = reader.position() as usize;
	let remaining = reader.get_ref().get(start..).unwrap_or_default();

	let Some(len) = remaining
		.chunks_exact(2)
		.position(|unit| unit == [0, 0])
		.map(|units| units * 2)
	else {
		err!(NotAPicture);
	};

	let text = read_slice(reader, len)?;
	read_slice(reader, 2)?;

	Ok(text)
}

fn build_image(
	picture_type: PictureType,
	mime: &[u8],
	description: &[u8],
	image: &[u8],
) -> Result<AudioImage> {
	if image.is_empty() {
		err!(NotAPicture);
	}

	let mime = utf16_decode_bytes(mime, u16::from_le_bytes)?;
	let description = utf16_decode_bytes(description, u16::from_le_bytes)?;

	let mime_type = if mime.is_empty() {
		MimeType::sniff(image)
	} else {
		Some(MimeType::from_str(&mime))
	};

	Ok(AudioImage::new(
		picture_type,
		mime_type,
		Some(description).filter(|description| !description.is_empty()),
		image.to_vec(),
	))
}
