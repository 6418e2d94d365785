use super::constants::{STREAM_MARKER, STREAM_SCAN_LEN};
use crate::error::Result;
use crate::tag::{MetaTagIdentifier, TagSet, TagValue, parse_leading_number};
use crate::util::io::read_up_to;
use crate::util::text::latin1_decode;

use std::io::{Read, Seek, SeekFrom};

// Values in the section end at any of these
const VALUE_TERMINATORS: [char; 3] = ['\r', '\n', ' '];

/// Read the plain text `[STREAM]` section some encoders leave near the start of the file
///
/// Only `TRACKNUMBER`, `TITLE`, `ARTIST`, `ALBUM` and `GENRE` are recognised, and a value must
/// be followed by a line break or space. The Vorbis comments overwrite anything found here.
pub(super) fn read_stream_section<R>(reader: &mut R, tags: &mut TagSet) -> Result<()>
where
	R: Read + Seek,
{
	reader.seek(SeekFrom::Start(0))?;
	let head = read_up_to(reader, STREAM_SCAN_LEN)?;

	// Latin-1 keeps every byte, and ASCII case folding keeps every offset
	let text = latin1_decode(&head);
	let folded = text.to_ascii_uppercase();

	let Some(section_start) = folded.find(STREAM_MARKER) else {
		return Ok(());
	};

	log::debug!("Ogg: Found a [STREAM] section at offset {section_start}");

	let section = Section {
		text: &text,
		folded: &folded,
		start: section_start,
	};

	if let Some(number) = section
		.value("TRACKNUMBER=")
		.and_then(|value| parse_leading_number(value.split('/').next().unwrap_or_default()))
	{
		tags.insert(MetaTagIdentifier::TrackNumber, TagValue::Integer(number));
	}

	for (name, id) in [
		("TITLE=", MetaTagIdentifier::Title),
		("ARTIST=", MetaTagIdentifier::Artist),
		("ALBUM=", MetaTagIdentifier::Album),
		("GENRE=", MetaTagIdentifier::Genre),
	] {
		if let Some(value) = section.value(name) {
			log::trace!("Ogg: Found `{name}` in the [STREAM] section");
			tags.insert_text(id, value);
		}
	}

	Ok(())
}

struct Section<'a> {
	text: &'a str,
	folded: &'a str,
	start: usize,
}

impl<'a> Section<'a> {
	fn value(&self, name: &str) -> Option<&'a str> {
		let value_start = self.folded[self.start..].find(name)? + self.start + name.len();
		let len = self.text[value_start..].find(VALUE_TERMINATORS)?;

		(len > 0).then(|| self.text[value_start..value_start + len].trim())
	}
}

#[cfg(test)]
mod tests {
	use super::read_stream_section;
	use crate::tag::{MetaTagIdentifier, TagSet};

	use std::io::Cursor;

	fn read(data: &[u8]) -> TagSet {
		let mut tags = TagSet::new();
		read_stream_section(&mut Cursor::new(data), &mut tags).unwrap();
		tags
	}

	#[test_log::test]
	fn stream_section() {
		let tags = read(b"OggS\x00junk[stream]\r\ntracknumber=4/9\r\nTITLE=Title\r\nArtist=Foo\nGENRE=Rock");

		assert_eq!(tags.integer(MetaTagIdentifier::TrackNumber), Some(4));
		assert_eq!(tags.text(MetaTagIdentifier::Title), Some("Title"));
		assert_eq!(tags.text(MetaTagIdentifier::Artist), Some("Foo"));
		// Not terminated
		assert!(tags.text(MetaTagIdentifier::Genre).is_none());
	}

	#[test_log::test]
	fn values_before_the_marker_are_ignored() {
		let tags = read(b"TITLE=Nope\r\n[STREAM]\r\n");
		assert!(tags.is_empty());
	}
}
