use super::atom_info::AtomInfo;
use super::atom_reader::AtomReader;
use crate::config::ParseOptions;
use crate::error::Result;
use crate::id3::v1::constants::GENRES;
use crate::macros::gen_map;
use crate::picture::{AudioImage, MimeType, PictureType};
use crate::tag::{MetaTagIdentifier, TagIdentifier, TagSet, TagValue};
use crate::util::num::{u16_be, u32_be, u64_be};
use crate::util::text::{utf16_decode_bytes, utf8_decode_str};

use std::io::Cursor;

// Well known data types, see "Well-known types" in the QuickTime File Format spec
const IMPLICIT: u32 = 0;
const UTF8: u32 = 1;
const UTF16: u32 = 2;
const S_JIS: u32 = 3;
const PNG: u32 = 14;
const BMP: u32 = 27;

// Freeform `----` atoms are keyed by their `name`
gen_map!(
	MP4_FREEFORM_MAP;

	"MusicBrainz Album Id"  => MusicBrainzId,
	"REPLAYGAIN_TRACK_GAIN" => ReplayGainTrack,
	"REPLAYGAIN_ALBUM_GAIN" => ReplayGainAlbum,
	"SUBTITLE"              => SubTitle,
	"CONDUCTOR"             => Conductor,
	"LABEL"                 => Publisher,
	"LANGUAGE"              => Language
);

/// The content of a `data` atom
struct AtomData<'a> {
	type_code: u32,
	value: &'a [u8],
}

/// Parse the content of an `ilst` atom
///
/// A malformed item is skipped, the rest of the list is still read.
pub(super) fn parse_ilst(content: &[u8], parse_options: &ParseOptions, tags: &mut TagSet) -> Result<()> {
	let mut reader = AtomReader::new(Cursor::new(content), content.len() as u64);

	while let Some(atom) = reader.next()? {
		if parse_options.is_cancelled() {
			log::debug!("MP4: Cancelled, keeping {} items", tags.len());
			break;
		}

		let item = atom_content(content, &atom);
		reader.skip_atom(&atom)?;

		log::trace!(
			"MP4: Found item {:?}, size: {}",
			atom.ident.escape_ascii().to_string(),
			atom.len
		);

		match children(item) {
			Ok(children) => parse_item(atom.ident, &children, parse_options, tags),
			Err(err) => log::warn!("MP4: Skipping malformed item: {err}"),
		}
	}

	Ok(())
}

fn parse_item(
	ident: [u8; 4],
	children: &[(AtomInfo, &[u8])],
	parse_options: &ParseOptions,
	tags: &mut TagSet,
) {
	let data = data_atoms(children);

	let text_id = match &ident {
		b"\xA9nam" => Some(MetaTagIdentifier::Title),
		b"\xA9ART" | b"ART " | b"perf" => Some(MetaTagIdentifier::Artist),
		b"aART" => Some(MetaTagIdentifier::AlbumArtist),
		b"\xA9alb" => Some(MetaTagIdentifier::Album),
		b"\xA9gen" => Some(MetaTagIdentifier::Genre),
		b"\xA9cmt" => Some(MetaTagIdentifier::Comment),
		b"\xA9wrt" => Some(MetaTagIdentifier::Composer),
		b"cprt" => Some(MetaTagIdentifier::Copyright),
		b"\xA9lyr" => Some(MetaTagIdentifier::UnsynchronisedLyrics),
		b"\xA9too" => Some(MetaTagIdentifier::EncodedWith),
		b"\xA9grp" | b"\xA9st3" => Some(MetaTagIdentifier::SubTitle),
		_ => None,
	};

	if let Some(id) = text_id {
		if let Some(text) = data.first().and_then(text_value) {
			tags.insert_parsed(id, &text);
		}

		return;
	}

	match &ident {
		b"\xA9day" => {
			let Some(date) = data.first().and_then(text_value) else {
				return;
			};

			let date = date.trim();
			if let Some(year) = date.get(..4).filter(|y| y.bytes().all(|b| b.is_ascii_digit())) {
				tags.insert_text(MetaTagIdentifier::RecordingYear, year);
			}

			tags.insert_text(MetaTagIdentifier::RecordingDateOrYear, date);
		},
		b"trkn" | b"disk" => {
			let Some(pair) = data.first().map(|data| data.value) else {
				return;
			};

			let (number_id, total_id) = if &ident == b"trkn" {
				(MetaTagIdentifier::TrackNumber, MetaTagIdentifier::SongTotal)
			} else {
				(MetaTagIdentifier::DiscNumber, MetaTagIdentifier::DiscTotal)
			};

			// Reserved (2), number (2), total (2)
			let number = u16_be(pair.get(2..).unwrap_or_default());
			let total = u16_be(pair.get(4..).unwrap_or_default());

			if number > 0 {
				tags.insert(number_id, TagValue::Integer(i32::from(number)));
			}

			if total > 0 {
				tags.insert(total_id, TagValue::Integer(i32::from(total)));
			}
		},
		b"tmpo" => {
			if let Some(bpm) = data.first().and_then(integer_value) {
				tags.insert(MetaTagIdentifier::Bpm, TagValue::Integer(bpm));
			}
		},
		b"cpil" => {
			if let Some(data) = data.first() {
				let is_true = data.value.iter().any(|&b| b != 0);
				tags.insert(MetaTagIdentifier::Compilation, TagValue::Boolean(is_true));
			}
		},
		// An ID3v1 genre index, `©gen` takes precedence
		b"gnre" => {
			let index = data.first().map_or(0, |data| u16_be(data.value)) as usize;
			if index > 0 && index <= GENRES.len() {
				tags.insert_if_absent(
					MetaTagIdentifier::Genre,
					TagValue::Text(String::from(GENRES[index - 1])),
				);
			}
		},
		b"covr" => {
			if !parse_options.read_cover_art {
				return;
			}

			for data in data.iter().filter(|data| !data.value.is_empty()) {
				let mime_type = match data.type_code {
					PNG => MimeType::Png,
					BMP => MimeType::Bmp,
					// JPEG is 13, anything unknown is assumed to be JPEG too
					_ => MimeType::Jpeg,
				};

				tags.push_image(AudioImage::new(
					PictureType::Front,
					Some(mime_type),
					None,
					data.value.to_vec(),
				));
			}
		},
		b"----" => parse_freeform(children, &data, tags),
		_ => log::trace!(
			"MP4: Skipping unsupported item {:?}",
			ident.escape_ascii().to_string()
		),
	}
}

// ----:com.apple.iTunes:SUBTITLE
// ─┬── ────────┬─────── ───┬────
//  ╰freeform identifier    ╰name
//              │
//              ╰mean
fn parse_freeform(children: &[(AtomInfo, &[u8])], data: &[AtomData<'_>], tags: &mut TagSet) {
	let Some(name) = children
		.iter()
		.find(|(atom, _)| &atom.ident == b"name")
		// Version (1), flags (3)
		.and_then(|(_, content)| content.get(4..))
		.and_then(|name| utf8_decode_str(name).ok())
	else {
		log::warn!("MP4: Freeform atom is missing its name");
		return;
	};

	let Some(text) = data.first().and_then(text_value) else {
		return;
	};

	match MP4_FREEFORM_MAP.get_identifier(name) {
		Some(id) => tags.insert_parsed(id, &text),
		None => tags.insert_text(TagIdentifier::vendor(name), &text),
	}
}

fn text_value(data: &AtomData<'_>) -> Option<String> {
	match data.type_code {
		IMPLICIT | UTF8 | S_JIS => utf8_decode_str(data.value).ok().map(str::to_owned),
		UTF16 => utf16_decode_bytes(data.value, u16::from_be_bytes).ok(),
		code => {
			log::warn!("MP4: Expected text, found data type {code}");
			None
		},
	}
}

// Big endian integers of any common width
fn integer_value(data: &AtomData<'_>) -> Option<i32> {
	let value = match data.value.len() {
		1 => u64::from(data.value[0]),
		2 => u64::from(u16_be(data.value)),
		4 => u64::from(u32_be(data.value)),
		8 => u64_be(data.value),
		_ => return None,
	};

	i32::try_from(value).ok()
}

fn data_atoms<'a>(children: &[(AtomInfo, &'a [u8])]) -> Vec<AtomData<'a>> {
	children
		.iter()
		.filter(|(atom, _)| &atom.ident == b"data")
		.filter_map(|(_, content)| {
			// Type indicator (4), locale (4)
			let value = content.get(8..)?;
			let type_code = u32_be(content) & 0x00FF_FFFF;
			Some(AtomData { type_code, value })
		})
		.collect()
}

fn children(item: &[u8]) -> Result<Vec<(AtomInfo, &[u8])>> {
	let mut reader = AtomReader::new(Cursor::new(item), item.len() as u64);

	let mut children = Vec::new();
	while let Some(atom) = reader.next()? {
		children.push((atom, atom_content(item, &atom)));
		reader.skip_atom(&atom)?;
	}

	Ok(children)
}

// Atoms are clamped to their parent, so this never goes out of bounds
fn atom_content<'a>(parent: &'a [u8], atom: &AtomInfo) -> &'a [u8] {
	let start = (atom.start + atom.header_len) as usize;
	parent.get(start..atom.end() as usize).unwrap_or_default()
}
