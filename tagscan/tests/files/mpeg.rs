use crate::util::{self, id3v1_tag, id3v2_tag, id3v2_text_frame, mpeg_frames, temp_file};

use tagscan::config::ParseOptions;
use tagscan::file::FileType;
use tagscan::mpeg::MpegReader;
use tagscan::reader::TagReader;
use tagscan::tag::MetaTagIdentifier;

use std::io::Cursor;

#[test_log::test]
fn read() {
	let file = temp_file(&util::mpeg_file(), "mp3");
	let data = tagscan::read_audio_tags(file.path(), &ParseOptions::new()).unwrap();

	assert_eq!(data.file_type(), FileType::Mpeg);

	let tags = data.tags();
	assert_eq!(tags.text(MetaTagIdentifier::Title), Some("Title"));
	assert_eq!(tags.text(MetaTagIdentifier::Artist), Some("Artist"));
	assert_eq!(tags.text(MetaTagIdentifier::Album), Some("Album"));
	assert_eq!(tags.integer(MetaTagIdentifier::TrackNumber), Some(3));
	assert_eq!(tags.integer(MetaTagIdentifier::SongTotal), Some(10));
	assert_eq!(tags.integer(MetaTagIdentifier::DiscNumber), Some(1));
	assert_eq!(tags.integer(MetaTagIdentifier::DiscTotal), Some(2));

	// Only in the ID3v1 tag
	assert_eq!(tags.text(MetaTagIdentifier::Genre), Some("Rock"));

	let properties = data.properties();
	assert_eq!(properties.codec(), Some("MPEG Version 1"));
	assert_eq!(properties.layer(), Some("Layer III"));
	assert_eq!(properties.sample_rate(), Some(44100));
	assert_eq!(properties.bitrate(), Some(128));
	assert_eq!(properties.channels(), Some(2));
}

#[test_log::test]
fn id3v1_only() {
	let mut bytes = mpeg_frames(4);
	bytes.extend(id3v1_tag("Title", "Artist", "Album", 5, 255));

	let tags = MpegReader::read_from(&mut Cursor::new(bytes), &ParseOptions::new()).unwrap();
	assert_eq!(tags.text(MetaTagIdentifier::Title), Some("Title"));
	assert_eq!(tags.integer(MetaTagIdentifier::TrackNumber), Some(5));
	assert!(tags.text(MetaTagIdentifier::Genre).is_none());
}

#[test_log::test]
fn frame_sizes_per_version() {
	// ID3v2.3 sizes are plain integers, ID3v2.4 sizes are synchsafe. A 200 byte value
	// is encoded differently, but must read the same.
	let title = "T".repeat(199);

	for version in [3, 4] {
		let mut bytes = id3v2_tag(version, &[id3v2_text_frame(version, b"TIT2", &title)]);
		bytes.extend(mpeg_frames(2));

		let tags = MpegReader::read_from(&mut Cursor::new(bytes), &ParseOptions::new()).unwrap();
		assert_eq!(tags.text(MetaTagIdentifier::Title), Some(title.as_str()));
	}
}

#[test_log::test]
fn junk_before_id3v2() {
	let mut bytes = vec![0; 16];
	bytes.extend(id3v2_tag(3, &[id3v2_text_frame(3, b"TPE1", "Artist")]));
	bytes.extend(mpeg_frames(2));

	let tags = MpegReader::read_from(&mut Cursor::new(bytes), &ParseOptions::new()).unwrap();
	assert_eq!(tags.text(MetaTagIdentifier::Artist), Some("Artist"));
}

#[test_log::test]
fn no_tags() {
	let file = temp_file(&mpeg_frames(10), "mp3");
	let data = tagscan::read_audio_tags(file.path(), &ParseOptions::new()).unwrap();

	// Only the defaults
	assert_eq!(data.tags().text(MetaTagIdentifier::Title), Some(""));
	assert_eq!(data.tags().integer(MetaTagIdentifier::TrackNumber), Some(0));
	assert_eq!(data.properties().sample_rate(), Some(44100));
}
