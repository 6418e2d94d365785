use super::constants::{GENRES, ID3V1_TAG_MARKER, ID3V1_TAG_SIZE, NO_GENRE};
use crate::tag::{MetaTagIdentifier, TagSet, TagValue};
use crate::util::text::latin1_decode;

/// Decode a 128 byte ID3v1 tag
///
/// Returns an empty set if the block doesn't start with `TAG`.
pub(crate) fn parse_id3v1(block: &[u8; ID3V1_TAG_SIZE]) -> TagSet {
	let mut tags = TagSet::new();

	if block[..3] != ID3V1_TAG_MARKER {
		return tags;
	}

	let fields = &block[3..];

	insert_field(&mut tags, MetaTagIdentifier::Title, &fields[..30]);
	insert_field(&mut tags, MetaTagIdentifier::Artist, &fields[30..60]);
	insert_field(&mut tags, MetaTagIdentifier::Album, &fields[60..90]);
	insert_field(&mut tags, MetaTagIdentifier::RecordingYear, &fields[90..94]);

	// ID3v1.1 steals the last two comment bytes for a NUL and a non-zero track number
	let comment_range = if fields[122] == 0 && fields[123] != 0 {
		tags.insert(
			MetaTagIdentifier::TrackNumber,
			TagValue::Integer(i32::from(fields[123])),
		);

		94_usize..122
	} else {
		94..124
	};

	insert_field(&mut tags, MetaTagIdentifier::Comment, &fields[comment_range]);

	match fields[124] {
		NO_GENRE => {},
		genre if usize::from(genre) < GENRES.len() => {
			tags.insert_text(MetaTagIdentifier::Genre, GENRES[usize::from(genre)]);
		},
		genre => tags.insert_text(MetaTagIdentifier::Genre, &genre.to_string()),
	}

	log::trace!("ID3v1: Decoded {} fields", tags.len());
	tags
}

fn insert_field(tags: &mut TagSet, id: MetaTagIdentifier, data: &[u8]) {
	let text = latin1_decode(data);
	let text = text.trim_end_matches(['\0', ' ']);

	if !text.is_empty() {
		tags.insert(id, TagValue::Text(text.to_owned()));
	}
}

#[cfg(test)]
mod tests {
	use super::parse_id3v1;
	use crate::tag::MetaTagIdentifier;

	fn block(title: &str, track_bytes: [u8; 2], genre: u8) -> [u8; 128] {
		let mut block = [0; 128];
		block[..3].copy_from_slice(b"TAG");
		block[3..3 + title.len()].copy_from_slice(title.as_bytes());
		block[93..97].copy_from_slice(b"1999");
		block[97..104].copy_from_slice(b"Comment");
		block[125] = track_bytes[0];
		block[126] = track_bytes[1];
		block[127] = genre;
		block
	}

	#[test_log::test]
	fn v1_1_track_number() {
		let tags = parse_id3v1(&block("Title   ", [0, 5], 17));

		assert_eq!(tags.text(MetaTagIdentifier::Title), Some("Title"));
		assert_eq!(tags.text(MetaTagIdentifier::RecordingYear), Some("1999"));
		assert_eq!(tags.text(MetaTagIdentifier::Comment), Some("Comment"));
		assert_eq!(tags.integer(MetaTagIdentifier::TrackNumber), Some(5));
		assert_eq!(tags.text(MetaTagIdentifier::Genre), Some("Rock"));
	}

	#[test_log::test]
	fn v1_0_has_no_track_number() {
		let tags = parse_id3v1(&block("Title", [b'x', b'y'], 255));

		assert_eq!(tags.integer(MetaTagIdentifier::TrackNumber), None);
		assert_eq!(tags.text(MetaTagIdentifier::Genre), None);
		assert!(tags.text(MetaTagIdentifier::Comment).is_some_and(|c| c.ends_with("xy")));
	}

	#[test_log::test]
	fn unknown_genre_is_numeric() {
		let tags = parse_id3v1(&block("", [0, 0], 120));

		assert_eq!(tags.text(MetaTagIdentifier::Genre), Some("120"));
		assert_eq!(tags.text(MetaTagIdentifier::Title), None);
	}

	#[test_log::test]
	fn missing_marker() {
		let mut block = block("Title", [0, 1], 0);
		block[0] = b'X';
		assert!(parse_id3v1(&block).is_empty());
	}
}
