use crate::util::{self, JPEG, id3v2_tag, id3v2_text_frame, temp_file};

use tagscan::config::ParseOptions;
use tagscan::file::FileType;
use tagscan::flac::FlacReader;
use tagscan::picture::{MimeType, PictureType};
use tagscan::reader::TagReader;
use tagscan::tag::MetaTagIdentifier;

use std::io::Cursor;
use std::time::Duration;

#[test_log::test]
fn read() {
	let file = temp_file(&util::flac_file(), "flac");
	let data = tagscan::read_audio_tags(file.path(), &ParseOptions::new()).unwrap();

	assert_eq!(data.file_type(), FileType::Flac);

	let tags = data.tags();
	assert_eq!(tags.text(MetaTagIdentifier::Title), Some("Title"));
	assert_eq!(tags.text(MetaTagIdentifier::Artist), Some("Artist"));
	assert_eq!(tags.text(MetaTagIdentifier::Album), Some("Album"));
	assert_eq!(tags.integer(MetaTagIdentifier::TrackNumber), Some(3));
	assert_eq!(tags.integer(MetaTagIdentifier::SongTotal), Some(10));
	assert_eq!(tags.integer(MetaTagIdentifier::DiscNumber), Some(1));

	let images = data.images();
	assert_eq!(images.len(), 1);
	assert_eq!(images[0].picture_type(), PictureType::Front);
	assert_eq!(images[0].mime_type(), Some(&MimeType::Jpeg));
	assert_eq!(images[0].data(), JPEG);

	let properties = data.properties();
	assert_eq!(properties.codec(), Some("FLAC"));
	assert_eq!(properties.channels(), Some(2));
	assert_eq!(properties.sample_rate(), Some(44100));
	assert_eq!(properties.duration(), Some(Duration::from_secs(10)));
}

#[test_log::test]
fn leading_id3v2_detected() {
	let mut bytes = id3v2_tag(3, &[id3v2_text_frame(3, b"TIT2", "ID3v2 title")]);
	bytes.extend(util::flac_file());

	// No extension to go on, the content decides
	let file = temp_file(&bytes, "bin");
	let data = tagscan::read_audio_tags(file.path(), &ParseOptions::new()).unwrap();

	assert_eq!(data.file_type(), FileType::Flac);
	assert_eq!(data.tags().text(MetaTagIdentifier::Title), Some("Title"));
}

#[test_log::test]
fn cover_art_disabled() {
	let options = ParseOptions::new().read_cover_art(false);
	let tags = FlacReader::read_from(&mut Cursor::new(util::flac_file()), &options).unwrap();

	assert!(tags.images().is_empty());
	assert_eq!(tags.text(MetaTagIdentifier::Title), Some("Title"));
}
