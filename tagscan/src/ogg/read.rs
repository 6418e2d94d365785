use crate::config::ParseOptions;
use crate::error::Result;
use crate::macros::{decode_err, gen_map};
use crate::picture::{AudioImage, MimeType, PictureType};
use crate::tag::{MetaTagIdentifier, TagIdentifier, TagSet, TagValue, split_number_pair};
use crate::util::num::{u32_be, u32_le};
use crate::util::text::utf8_decode_str;

use data_encoding::BASE64;

// A count above this is assumed to have been written big endian
const MAX_PLAUSIBLE_COMMENTS: u32 = 100;

gen_map!(
	VORBIS_MAP;

	"TITLE"                          => Title,
	"SUBTITLE"                       => SubTitle,
	"ARTIST"                         => Artist,
	"ALBUM"                          => Album,
	"ALBUMARTIST" | "ALBUM_ARTIST"   => AlbumArtist,
	"DATE" | "YEAR"                  => RecordingYear,
	"ORIGINALDATE" | "ORIGINALYEAR"  => OrigAlbumDate,
	"GENRE"                          => Genre,
	"COMMENT" | "DESCRIPTION"        => Comment,
	"DISCNUMBER" | "DISC"            => DiscNumber,
	"TOTALTRACKS" | "TRACKTOTAL"
	| "TOTALDISCS" | "DISCTOTAL"     => SongTotal,
	"COMPOSER"                       => Composer,
	"CONDUCTOR"                      => Conductor,
	"COPYRIGHT"                      => Copyright,
	"LABEL" | "PUBLISHER"            => Publisher,
	"ENCODED-BY" | "ENCODEDBY"       => EncodedBy,
	"ENCODER"                        => EncodedWith,
	"LANGUAGE"                       => Language,
	"LYRICS"                         => UnsynchronisedLyrics,
	"BPM"                            => Bpm,
	"COMPILATION"                    => Compilation,
	"REPLAYGAIN_TRACK_GAIN"          => ReplayGainTrack,
	"REPLAYGAIN_ALBUM_GAIN"          => ReplayGainAlbum,
	"MUSICBRAINZ_ALBUMID"            => MusicBrainzId
);

/// Read a Vorbis comment block, without its packet signature
///
/// ```text
/// vendor length (u32 LE) | vendor | comment count (u32 LE) | (length (u32 LE) | KEY=value)*
/// ```
///
/// Lengths and the count that only make sense as big endian integers are read as such.
/// Comments are read until the count is reached or the block runs out.
pub(crate) fn read_comments(
	data: &[u8],
	parse_options: &ParseOptions,
	tags: &mut TagSet,
) -> Result<()> {
	let Some(vendor_len) = length_at(data, 0) else {
		decode_err!(@BAIL "Vendor string length is larger than the comment block");
	};

	let mut pos = 4 + vendor_len;
	log::debug!(
		"Vorbis comments: vendor `{}`",
		String::from_utf8_lossy(&data[4..pos])
	);

	if pos + 4 > data.len() {
		decode_err!(@BAIL "Comment block is missing its comment count");
	}

	let mut count = u32_le(&data[pos..]);
	if count > MAX_PLAUSIBLE_COMMENTS {
		let swapped = u32_be(&data[pos..]);
		if swapped < count && swapped < MAX_PLAUSIBLE_COMMENTS {
			log::warn!("Vorbis comments: Using a big endian comment count ({swapped})");
			count = swapped;
		}
	}

	pos += 4;

	for _ in 0..count {
		if parse_options.is_cancelled() {
			log::debug!("Vorbis comments: Cancelled");
			break;
		}

		let Some(comment_len) = length_at(data, pos) else {
			log::warn!("Vorbis comments: Comment length is larger than the block, stopping");
			break;
		};

		let comment = &data[pos + 4..pos + 4 + comment_len];
		pos += 4 + comment_len;

		parse_comment(comment, parse_options, tags);
	}

	Ok(())
}

// A length prefix at `pos`, little endian unless only the big endian reading fits
fn length_at(data: &[u8], pos: usize) -> Option<usize> {
	let raw = data.get(pos..pos + 4)?;
	let available = data.len() - (pos + 4);

	let le = u32_le(raw) as usize;
	if le <= available {
		return Some(le);
	}

	let be = u32_be(raw) as usize;
	(be <= available).then_some(be)
}

fn parse_comment(comment: &[u8], parse_options: &ParseOptions, tags: &mut TagSet) {
	// KEY=VALUE
	let Some(separator) = comment.iter().position(|b| *b == b'=').filter(|pos| *pos > 0) else {
		log::warn!("Vorbis comments: No separator found in field, discarding");
		return;
	};

	let Ok(key) = std::str::from_utf8(&comment[..separator]) else {
		log::warn!("Vorbis comments: Field has an invalid key, discarding");
		return;
	};

	let key = key.to_ascii_uppercase();
	let value = &comment[separator + 1..];

	log::trace!("Vorbis comments: Found field `{key}`");

	match key.as_str() {
		"METADATA_BLOCK_PICTURE" => {
			if !parse_options.read_cover_art {
				return;
			}

			match AudioImage::from_flac_bytes(value, true) {
				Ok(image) => tags.push_image(image),
				Err(err) => log::warn!("Vorbis comments: Failed to decode picture: {err}"),
			}
		},
		// An older, deprecated picture format. It's just the base64 encoded image.
		"COVERART" => {
			if !parse_options.read_cover_art {
				return;
			}

			match BASE64.decode(value) {
				Ok(data) => tags.push_image(AudioImage::new(
					PictureType::Generic,
					Some(MimeType::sniff(&data).unwrap_or(MimeType::Jpeg)),
					None,
					data,
				)),
				Err(_) => log::warn!("Vorbis comments: Failed to decode `COVERART`, discarding"),
			}
		},
		_ => {
			let Ok(value) = utf8_decode_str(value) else {
				log::warn!("Vorbis comments: Field `{key}` is not valid UTF-8, discarding");
				return;
			};

			insert_value(&key, value, tags);
		},
	}
}

fn insert_value(key: &str, value: &str, tags: &mut TagSet) {
	if matches!(key, "TRACKNUMBER" | "TRACK" | "TRACKNUM" | "TRACKNO") {
		let (number, total) = split_number_pair(value);

		// Some taggers decorate the number (ex. `#5`)
		let number = number.or_else(|| {
			let digits: String = value.chars().filter(char::is_ascii_digit).collect();
			digits.parse().ok()
		});

		if let Some(number) = number {
			tags.insert(MetaTagIdentifier::TrackNumber, TagValue::Integer(number));
		}

		if let Some(total) = total {
			tags.insert(MetaTagIdentifier::SongTotal, TagValue::Integer(total));
		}

		return;
	}

	// The map sends these to `SongTotal` as well
	if matches!(key, "TOTALDISCS" | "DISCTOTAL") {
		tags.insert_parsed(MetaTagIdentifier::DiscTotal, value);
	}

	match VORBIS_MAP.get_identifier(key) {
		Some(id) => tags.insert_parsed(id, value),
		None => tags.insert_text(TagIdentifier::vendor(key), value),
	}
}
