use super::constants::PICTURE_KEY;
use super::object::read_slice;
use super::picture::read_picture;
use crate::config::ParseOptions;
use crate::error::Result;
use crate::macros::gen_map;
use crate::tag::{MetaTagIdentifier, TagIdentifier, TagSet, TagValue};
use crate::util::text::utf16_decode_bytes;

use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};

gen_map!(
	ASF_MAP;

	"WM/AlbumTitle" | "album"          => Album,
	"WM/Genre" | "genre"               => Genre,
	"WM/Year" | "year"                 => RecordingYear,
	"WM/TrackNumber" | "track"         => TrackNumber,
	"WM/Composer" | "composer"         => Composer,
	"WM/AlbumArtist" | "album_artist"  => AlbumArtist,
	"WM/Conductor" | "conductor"       => Conductor,
	"WM/Publisher" | "publisher"       => Publisher,
	"WM/EncodedBy"                     => EncodedBy,
	"WM/Language" | "language"         => Language,
	"WM/Tool"                          => EncodedWith,
	"WM/Comments" | "comment"          => Comment,
	"WM/PartOfSet" | "disc"            => DiscNumber,
	"WM/BeatsPerMinute" | "bpm"        => Bpm,
	"artist"                           => Artist,
	"title"                            => Title,
	"copyright"                        => Copyright
);

/// A decoded Extended Content Description value
#[derive(Debug)]
enum AsfValue<'a> {
	Text(String),
	Bytes(&'a [u8]),
	Integer(u64),
	Boolean(bool),
}

/// Read a Content Description Object
///
/// Five u16 lengths, followed by the UTF-16LE fields: title, author, copyright, description and
/// rating. The description is used as the album, the rating is ignored.
pub(super) fn read_content_description(content: &[u8], tags: &mut TagSet) -> Result<()> {
	let mut reader = Cursor::new(content);

	let mut lengths = [0; 5];
	reader.read_u16_into::<LittleEndian>(&mut lengths)?;

	let fields = [
		Some(MetaTagIdentifier::Title),
		Some(MetaTagIdentifier::Artist),
		Some(MetaTagIdentifier::Copyright),
		Some(MetaTagIdentifier::Album),
		None,
	];

	for (len, id) in lengths.into_iter().zip(fields) {
		let bytes = read_slice(&mut reader, usize::from(len))?;

		if let Some(id) = id {
			let text = utf16_decode_bytes(bytes, u16::from_le_bytes)?;
			log::trace!("ASF: Found `{}` in the content description", id.as_str());

			tags.insert_text(id, &text);
		}
	}

	Ok(())
}

/// Read an Extended Content Description Object
///
/// A truncated or malformed entry ends the object, keeping the entries before it.
pub(super) fn read_extended_content_description(
	content: &[u8],
	parse_options: &ParseOptions,
	tags: &mut TagSet,
) -> Result<()> {
	let mut reader = Cursor::new(content);

	let count = reader.read_u16::<LittleEndian>()?;
	log::debug!("ASF: Reading {count} extended content descriptors");

	for _ in 0..count {
		let name_len = reader.read_u16::<LittleEndian>()?;
		let name = read_slice(&mut reader, usize::from(name_len))?;
		let name = utf16_decode_bytes(name, u16::from_le_bytes)?;

		let value_type = reader.read_u16::<LittleEndian>()?;
		let value_len = reader.read_u16::<LittleEndian>()?;
		let value = read_slice(&mut reader, usize::from(value_len))?;

		let Some(value) = decode_value(value_type, value)? else {
			log::warn!("ASF: Skipping `{name}`, bad value type {value_type} ({value_len} bytes)");
			continue;
		};

		insert_value(&name, value, parse_options, tags);
	}

	Ok(())
}

fn decode_value(value_type: u16, value: &[u8]) -> Result<Option<AsfValue<'_>>> {
	let mut reader = value;

	let value = match (value_type, value.len()) {
		(0, _) => AsfValue::Text(utf16_decode_bytes(value, u16::from_le_bytes)?),
		(1, _) => AsfValue::Bytes(value),
		(2, 4) => AsfValue::Integer(u64::from(reader.read_u32::<LittleEndian>()?)),
		(3, 8) => AsfValue::Integer(reader.read_u64::<LittleEndian>()?),
		(4, 2) => AsfValue::Integer(u64::from(reader.read_u16::<LittleEndian>()?)),
		(5, 4) => AsfValue::Boolean(reader.read_u32::<LittleEndian>()? != 0),
		_ => return Ok(None),
	};

	Ok(Some(value))
}

fn insert_value(name: &str, value: AsfValue<'_>, parse_options: &ParseOptions, tags: &mut TagSet) {
	let id = ASF_MAP.get_identifier(name);

	match value {
		AsfValue::Bytes(bytes) if name.eq_ignore_ascii_case(PICTURE_KEY) => {
			if !parse_options.read_cover_art {
				return;
			}

			match read_picture(bytes) {
				Ok(image) => tags.push_image(image),
				Err(err) => log::warn!("ASF: Unable to read `{PICTURE_KEY}`, discarding ({err})"),
			}
		},
		AsfValue::Text(text) => match id {
			Some(id) => tags.insert_parsed(id, &text),
			None => tags.insert_text(TagIdentifier::vendor(name), &text),
		},
		AsfValue::Integer(number) => match id {
			Some(id) => tags.insert_parsed(id, &number.to_string()),
			None => {
				let value = match i32::try_from(number) {
					Ok(number) => TagValue::Integer(number),
					Err(_) => TagValue::Text(number.to_string()),
				};

				tags.insert(TagIdentifier::vendor(name), value);
			},
		},
		AsfValue::Boolean(flag) => match id {
			Some(id) => tags.insert_parsed(id, if flag { "1" } else { "0" }),
			None => tags.insert(TagIdentifier::vendor(name), TagValue::Boolean(flag)),
		},
		AsfValue::Bytes(bytes) => {
			tags.insert(TagIdentifier::vendor(name), TagValue::Binary(bytes.to_vec()));
		},
	}
}
