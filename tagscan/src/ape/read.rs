use super::constants::{APE_FOOTER_SIZE, APE_PREAMBLE, FRONT_COVER_KEY, INVALID_KEYS};
use super::header::ApeFooter;
use crate::config::ParseOptions;
use crate::error::{Result, recover_partial};
use crate::file::FileType;
use crate::id3::v1::constants::{ID3V1_TAG_MARKER, ID3V1_TAG_SIZE};
use crate::macros::{decode_err, gen_map};
use crate::picture::{AudioImage, PictureType};
use crate::properties::AudioProperties;
use crate::reader::TagReader;
use crate::tag::{TagIdentifier, TagSet};
use crate::util::io::{SeekStreamLen, read_up_to};
use crate::util::num::u32_le;

use std::io::{Read, Seek, SeekFrom};

gen_map!(
	APE_MAP;

	"TITLE"                                => Title,
	"SUBTITLE"                             => SubTitle,
	"ARTIST"                               => Artist,
	"ALBUM"                                => Album,
	"ALBUM ARTIST" | "ALBUMARTIST"         => AlbumArtist,
	"YEAR"                                 => RecordingYear,
	"GENRE"                                => Genre,
	"COMMENT"                              => Comment,
	"TRACK" | "TRACKNUMBER"                => TrackNumber,
	"DISC" | "DISCNUMBER"                  => DiscNumber,
	"COMPOSER"                             => Composer,
	"CONDUCTOR"                            => Conductor,
	"COPYRIGHT"                            => Copyright,
	"PUBLISHER" | "LABEL"                  => Publisher,
	"LANGUAGE"                             => Language,
	"LYRICS"                               => UnsynchronisedLyrics,
	"COMPILATION"                          => Compilation,
	"BPM"                                  => Bpm,
	"REPLAYGAIN_TRACK_GAIN"                => ReplayGainTrack,
	"REPLAYGAIN_ALBUM_GAIN"                => ReplayGainAlbum,
	"MUSICBRAINZ_ALBUMID"                  => MusicBrainzId
);

// Item value size + flags
const ITEM_HEADER_SIZE: usize = 8;

/// A reader for APEv2 tags
///
/// The tag is found at the end of the file, either as the last 32 bytes or directly before a
/// trailing ID3v1 tag. Monkey's Audio stream properties are not read.
pub struct ApeReader;

impl TagReader for ApeReader {
	const FILE_TYPE: FileType = FileType::Ape;

	fn read_with_properties<R>(
		reader: &mut R,
		parse_options: &ParseOptions,
	) -> Result<(TagSet, AudioProperties)>
	where
		R: Read + Seek,
	{
		let mut tags = TagSet::new();

		let result = read_ape_tag(reader, parse_options, &mut tags);
		recover_partial(result, "APE")?;

		Ok((tags, AudioProperties::default()))
	}
}

fn read_ape_tag<R>(reader: &mut R, parse_options: &ParseOptions, tags: &mut TagSet) -> Result<()>
where
	R: Read + Seek,
{
	let stream_len = reader.stream_len_hack()?;
	if stream_len < APE_FOOTER_SIZE as u64 {
		log::debug!("APE: Stream is too small to hold a tag");
		return Ok(());
	}

	let footer_end = find_footer_end(reader, stream_len)?;
	if footer_end < APE_FOOTER_SIZE as u64 {
		return Ok(());
	}

	reader.seek(SeekFrom::Start(footer_end - APE_FOOTER_SIZE as u64))?;

	let mut footer_bytes = [0; APE_FOOTER_SIZE];
	reader.read_exact(&mut footer_bytes)?;

	if &footer_bytes[..8] != APE_PREAMBLE {
		log::debug!("APE: No tag found");
		return Ok(());
	}

	let footer = ApeFooter::parse(&footer_bytes, stream_len)?;
	log::debug!(
		"APE: Found a v{} tag, size: {}, items: {}",
		footer.version,
		footer.size,
		footer.item_count
	);

	if u64::from(footer.size) > footer_end {
		decode_err!(@BAIL Ape, "APE tag extends past the start of the file");
	}

	reader.seek(SeekFrom::Start(footer_end - u64::from(footer.size)))?;
	let tag = read_up_to(reader, u64::from(footer.size))?;

	// The footer is part of the size, the items end where it starts
	let mut items = &tag[..tag.len().saturating_sub(APE_FOOTER_SIZE)];
	if footer.has_header() && items.starts_with(APE_PREAMBLE) {
		items = &items[APE_FOOTER_SIZE.min(items.len())..];
	}

	parse_items(items, footer.item_count, parse_options, tags);
	Ok(())
}

// The footer sits directly before an ID3v1 tag if there is one
fn find_footer_end<R>(reader: &mut R, stream_len: u64) -> Result<u64>
where
	R: Read + Seek,
{
	if stream_len < ID3V1_TAG_SIZE as u64 {
		return Ok(stream_len);
	}

	reader.seek(SeekFrom::End(-(ID3V1_TAG_SIZE as i64)))?;

	let mut marker = [0; 3];
	reader.read_exact(&mut marker)?;

	if marker == ID3V1_TAG_MARKER {
		log::debug!("APE: Skipping a trailing ID3v1 tag");
		return Ok(stream_len - ID3V1_TAG_SIZE as u64);
	}

	Ok(stream_len)
}

fn parse_items(items: &[u8], item_count: u32, parse_options: &ParseOptions, tags: &mut TagSet) {
	let mut pos = 0;
	let mut read = 0;

	while pos + ITEM_HEADER_SIZE < items.len() && read < item_count {
		if parse_options.is_cancelled() {
			log::debug!("APE: Cancelled after {read} items");
			break;
		}

		let value_size = u32_le(&items[pos..]) as usize;
		let flags = u32_le(&items[pos + 4..]);
		pos += ITEM_HEADER_SIZE;

		let Some(key_len) = items[pos..].iter().position(|b| *b == 0) else {
			log::warn!("APE: Item key is missing its terminator");
			break;
		};

		let key_bytes = &items[pos..pos + key_len];
		pos += key_len + 1;

		let Some(value) = pos
			.checked_add(value_size)
			.and_then(|end| items.get(pos..end))
		else {
			log::warn!("APE: Item value extends past the end of the tag");
			break;
		};

		pos += value_size;
		read += 1;

		let Some(key) = verify_key(key_bytes) else {
			log::warn!("APE: Skipping an item with an invalid key");
			continue;
		};

		log::trace!("APE: Found item `{key}`, size: {value_size}");

		// 0 = UTF-8 text, 1 = binary, 2 = external locator
		match (flags >> 1) & 3 {
			1 => parse_binary_item(key, value, parse_options, tags),
			0 => parse_text_item(key, value, tags),
			_ => log::debug!("APE: Skipping locator item `{key}`"),
		}
	}
}

fn verify_key(key: &[u8]) -> Option<&str> {
	if !(2..=255).contains(&key.len()) || !key.iter().all(|c| (0x20..=0x7E).contains(c)) {
		return None;
	}

	let key = std::str::from_utf8(key).ok()?;
	if INVALID_KEYS.iter().any(|invalid| key.eq_ignore_ascii_case(invalid)) {
		return None;
	}

	Some(key)
}

fn parse_binary_item(key: &str, value: &[u8], parse_options: &ParseOptions, tags: &mut TagSet) {
	if !key.eq_ignore_ascii_case(FRONT_COVER_KEY) {
		log::debug!("APE: Skipping binary item `{key}`");
		return;
	}

	if !parse_options.read_cover_art {
		return;
	}

	match AudioImage::from_ape_bytes(PictureType::Front, value) {
		Ok(image) => tags.push_image(image),
		Err(err) => log::warn!("APE: Skipping cover art: {err}"),
	}
}

fn parse_text_item(key: &str, value: &[u8], tags: &mut TagSet) {
	let Ok(text) = std::str::from_utf8(value) else {
		log::warn!("APE: Item `{key}` is not valid UTF-8");
		return;
	};

	match APE_MAP.get_identifier(key) {
		Some(id) => tags.insert_parsed(id, text),
		None => tags.insert_text(TagIdentifier::vendor(key), text),
	}
}
