use crate::config::ParseOptions;
use crate::error::Result;
use crate::id3::v1::GENRES;
use crate::id3::v2::Id3v2Version;
use crate::macros::{err, gen_map};
use crate::picture::{AudioImage, MimeType, PictureType};
use crate::tag::{MetaTagIdentifier, TagIdentifier, TagSet, TagValue};
use crate::util::text::{Utf16Order, TextEncoding, decode_terminated, decode_text, trim_padding};

use std::borrow::Cow;

gen_map!(
	ID3V2_TEXT_MAP;

	"TIT2"          => Title,
	"TIT3"          => SubTitle,
	"TPE1"          => Artist,
	"TPE2"          => AlbumArtist,
	"TPE3"          => Conductor,
	"TALB"          => Album,
	"TYER" | "TDRC" => RecordingYear,
	"TDOR" | "TORY" => OrigAlbumDate,
	"TRCK"          => TrackNumber,
	"TPOS"          => DiscNumber,
	"TCON"          => Genre,
	"TCOM"          => Composer,
	"TCOP"          => Copyright,
	"TPUB"          => Publisher,
	"TENC"          => EncodedBy,
	"TSSE"          => EncodedWith,
	"TLAN"          => Language,
	"TBPM"          => Bpm,
	"TCMP"          => Compilation
);

gen_map!(
	ID3V2_TXXX_MAP;

	"REPLAYGAIN_TRACK_GAIN"                       => ReplayGainTrack,
	"REPLAYGAIN_ALBUM_GAIN"                       => ReplayGainAlbum,
	"MusicBrainz Album Id" | "MUSICBRAINZ_ALBUMID" => MusicBrainzId
);

/// Decode the content of a single frame into `tags`
///
/// `id` is always the ID3v2.4 form of the frame ID. Unsupported frames are ignored.
pub(crate) fn parse_content(
	id: &str,
	content: &[u8],
	version: Id3v2Version,
	parse_options: &ParseOptions,
	tags: &mut TagSet,
) -> Result<()> {
	match id {
		"TXXX" => parse_user_text(content, tags),
		"COMM" => parse_language_frame(content, MetaTagIdentifier::Comment, tags),
		"USLT" => parse_language_frame(content, MetaTagIdentifier::UnsynchronisedLyrics, tags),
		"APIC" if parse_options.read_cover_art => {
			let image = parse_picture(content, version)?;
			tags.push_image(image);
			Ok(())
		},
		_ if id.starts_with('T') => parse_text(id, content, tags),
		_ => {
			log::trace!("ID3v2: Ignoring frame {id}");
			Ok(())
		},
	}
}

fn parse_text(id: &str, content: &[u8], tags: &mut TagSet) -> Result<()> {
	let Some(identifier) = ID3V2_TEXT_MAP.get_identifier(id) else {
		log::trace!("ID3v2: Ignoring unmapped text frame {id}");
		return Ok(());
	};

	let Some((&encoding, text)) = content.split_first() else {
		return Ok(());
	};

	let text = decode_text(text, verify_encoding(encoding)?, Utf16Order::default())?.text;

	// ID3v2.4 separates multiple values with NULs, only the first is kept
	let value = text.split('\0').next().unwrap_or_default();

	if identifier == MetaTagIdentifier::Genre {
		tags.insert_text(identifier, &resolve_genre(value));
	} else {
		tags.insert_parsed(identifier, value);
	}

	Ok(())
}

// Layout: encoding, description, value
fn parse_user_text(content: &[u8], tags: &mut TagSet) -> Result<()> {
	let Some((&encoding, rest)) = content.split_first() else {
		return Ok(());
	};

	let encoding = verify_encoding(encoding)?;
	let (description, value) = decode_terminated(rest, encoding)?;

	if description.text.is_empty() {
		return Ok(());
	}

	// The value may rely on the description's BOM
	let value = decode_text(value, encoding, description.order)?.text;
	match ID3V2_TXXX_MAP.get_identifier(&description.text) {
		Some(identifier) => tags.insert_parsed(identifier, &value),
		None => tags.insert_text(TagIdentifier::Vendor(description.text), &value),
	}

	Ok(())
}

// Layout: encoding, 3 byte language, description, value
fn parse_language_frame(content: &[u8], identifier: MetaTagIdentifier, tags: &mut TagSet) -> Result<()> {
	let (Some(&encoding), Some(rest)) = (content.first(), content.get(4..)) else {
		return Ok(());
	};

	let encoding = verify_encoding(encoding)?;
	let (description, value) = decode_terminated(rest, encoding)?;

	// iTunes stores its own data (iTunNORM, iTunSMPB, ...) in comments
	if description.text.starts_with("iTun") {
		log::trace!("ID3v2: Skipping iTunes comment {}", description.text);
		return Ok(());
	}

	let value = decode_text(value, encoding, description.order)?.text;
	let value = TagValue::Text(trim_padding(&value).to_owned());

	// A frame without a description takes priority over any others
	if description.text.is_empty() {
		tags.insert(identifier, value);
	} else {
		tags.insert_if_absent(identifier, value);
	}

	Ok(())
}

// Layout: encoding, MIME type (v2.2: a 3 character image format), picture type, description, data
fn parse_picture(content: &[u8], version: Id3v2Version) -> Result<AudioImage> {
	let Some((&encoding, mut reader)) = content.split_first() else {
		err!(NotAPicture);
	};

	let Some(encoding) = TextEncoding::from_u8(encoding) else {
		err!(NotAPicture);
	};

	let mime_type = if version == Id3v2Version::V2 {
		let Some((format, rest)) = reader.split_first_chunk::<3>() else {
			err!(NotAPicture);
		};

		reader = rest;
		Some(MimeType::from_pic_format(*format))
	} else {
		let (mime_type, rest) = decode_terminated(reader, TextEncoding::Latin1)?;
		reader = rest;

		let mime_type = mime_type.text;
		(!mime_type.is_empty()).then(|| MimeType::from_str(&mime_type))
	};

	let Some((&picture_type, reader)) = reader.split_first() else {
		err!(NotAPicture);
	};

	let (description, data) = decode_terminated(reader, encoding)?;
	let description = description.text;

	let data = data.to_vec();
	let mime_type = mime_type.or_else(|| MimeType::sniff(&data));

	log::trace!("ID3v2: Found a picture, {} bytes", data.len());
	Ok(AudioImage::new(
		PictureType::from_apic(picture_type),
		mime_type,
		Some(description),
		data,
	))
}

fn verify_encoding(encoding: u8) -> Result<TextEncoding> {
	match TextEncoding::from_u8(encoding) {
		Some(encoding) => Ok(encoding),
		None => err!(TextDecode("Found an invalid text encoding")),
	}
}

/// Resolve the genre references used by ID3v2.3 and ID3v2.4
///
/// * `(17)` and `17` are indices into the ID3v1 genre table
/// * `(17)Rock` is refined by the trailing text
/// * `((` escapes a literal `(`
/// * `RX` and `CR` are Remix and Cover
pub(crate) fn resolve_genre(raw: &str) -> Cow<'_, str> {
	if let Some(escaped) = raw.strip_prefix("((") {
		return Cow::Owned(format!("({escaped}"));
	}

	if let Some((reference, refinement)) = raw.strip_prefix('(').and_then(|r| r.split_once(')')) {
		let refinement_is_reference = refinement.starts_with('(') && !refinement.starts_with("((");
		if !refinement.is_empty() && !refinement_is_reference {
			return resolve_genre(refinement);
		}

		return match genre_reference(reference) {
			Some(name) => Cow::Borrowed(name),
			None => Cow::Borrowed(raw),
		};
	}

	match genre_reference(raw) {
		Some(name) => Cow::Borrowed(name),
		None => Cow::Borrowed(raw),
	}
}

fn genre_reference(reference: &str) -> Option<&'static str> {
	match reference {
		"RX" => Some("Remix"),
		"CR" => Some("Cover"),
		_ => reference
			.parse::<usize>()
			.ok()
			.and_then(|index| GENRES.get(index).copied()),
	}
}
