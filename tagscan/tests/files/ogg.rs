use crate::util::{self, ogg_page, ogg_vorbis_file, temp_file, vorbis_comments};

use tagscan::config::ParseOptions;
use tagscan::file::FileType;
use tagscan::ogg::VorbisReader;
use tagscan::reader::TagReader;
use tagscan::tag::{MetaTagIdentifier, TagIdentifier};

use std::io::Cursor;
use std::time::Duration;

#[test_log::test]
fn read() {
	let file = temp_file(&util::ogg_file(), "ogg");
	let data = tagscan::read_audio_tags(file.path(), &ParseOptions::new()).unwrap();

	assert_eq!(data.file_type(), FileType::Ogg);

	let tags = data.tags();
	assert_eq!(tags.text(MetaTagIdentifier::Title), Some("Title"));
	assert_eq!(tags.text(MetaTagIdentifier::Artist), Some("Artist"));
	assert_eq!(tags.text(MetaTagIdentifier::Album), Some("Album"));
	assert_eq!(tags.integer(MetaTagIdentifier::TrackNumber), Some(3));
	assert_eq!(tags.integer(MetaTagIdentifier::SongTotal), Some(10));
	assert_eq!(tags.integer(MetaTagIdentifier::DiscNumber), Some(1));
	assert_eq!(tags.integer(MetaTagIdentifier::DiscTotal), Some(2));

	let properties = data.properties();
	assert_eq!(properties.codec(), Some("Vorbis"));
	assert_eq!(properties.channels(), Some(2));
	assert_eq!(properties.sample_rate(), Some(44100));
	assert_eq!(properties.bitrate(), Some(128));
	assert_eq!(properties.duration(), Some(Duration::from_secs(10)));
}

#[test_log::test]
fn vendor_comments() {
	let bytes = ogg_vorbis_file(&["ARTIST=Foo", "CATALOGNUMBER=ABC-123", "NOT A COMMENT"]);
	let tags = VorbisReader::read_from(&mut Cursor::new(bytes), &ParseOptions::new()).unwrap();

	assert_eq!(tags.len(), 2);
	assert_eq!(tags.text(MetaTagIdentifier::Artist), Some("Foo"));
	assert!(tags.contains(&TagIdentifier::vendor("CATALOGNUMBER")));
}

#[test_log::test]
fn opus() {
	let mut ident = b"OpusHead\x01\x02".to_vec();
	ident.extend(312_u16.to_le_bytes());
	ident.extend(48000_u32.to_le_bytes());
	ident.extend([0, 0, 0]);

	let mut comments = b"OpusTags".to_vec();
	comments.extend(vorbis_comments(&["TITLE=Opus title"]));

	let mut bytes = ogg_page(0x02, 0, 0, &ident);
	bytes.extend(ogg_page(0, 1, 0, &comments));
	bytes.extend(ogg_page(0x04, 2, 48000 * 5 + 312, &[0; 32]));

	let (tags, properties) =
		VorbisReader::read_with_properties(&mut Cursor::new(bytes), &ParseOptions::new()).unwrap();

	assert_eq!(tags.text(MetaTagIdentifier::Title), Some("Opus title"));
	assert_eq!(properties.codec(), Some("Opus"));
	assert_eq!(properties.channels(), Some(2));
	assert_eq!(properties.duration(), Some(Duration::from_secs(5)));
}

#[test_log::test]
fn comment_packet_split_across_pages() {
	let long_comment = format!("COMMENT={}", "x".repeat(600));

	let mut packet = b"\x03vorbis".to_vec();
	packet.extend(vorbis_comments(&["ARTIST=Foo", &long_comment]));

	// The first page ends with a full segment, so the packet continues on the next
	let (first, rest) = packet.split_at(255 * 2);
	let mut first_page = ogg_page(0, 1, 0, first);
	// `ogg_page` ends every packet with a short segment, drop the trailing 0 lacing value
	let segment_count = first_page[26];
	first_page[26] = segment_count - 1;
	first_page.remove(27 + usize::from(segment_count) - 1);

	let mut bytes = ogg_page(0x02, 0, 0, &util::vorbis_ident());
	bytes.extend(first_page);
	bytes.extend(ogg_page(0x01, 2, 0, rest));

	let tags = VorbisReader::read_from(&mut Cursor::new(bytes), &ParseOptions::new()).unwrap();
	assert_eq!(tags.text(MetaTagIdentifier::Artist), Some("Foo"));
	assert_eq!(tags.text(MetaTagIdentifier::Comment).map(str::len), Some(600));
}
