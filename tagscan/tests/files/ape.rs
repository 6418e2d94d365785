use crate::util::{self, JPEG, ape_item, ape_tag, id3v1_tag, temp_file};

use tagscan::ape::ApeReader;
use tagscan::config::ParseOptions;
use tagscan::file::FileType;
use tagscan::picture::{MimeType, PictureType};
use tagscan::reader::TagReader;
use tagscan::tag::MetaTagIdentifier;

use std::io::Cursor;

#[test_log::test]
fn read() {
	let file = temp_file(&util::ape_file(), "ape");
	let data = tagscan::read_audio_tags(file.path(), &ParseOptions::new()).unwrap();

	assert_eq!(data.file_type(), FileType::Ape);

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
	assert_eq!(images[0].description(), Some("desc"));
	assert_eq!(images[0].data(), JPEG);
}

#[test_log::test]
fn tag_before_id3v1() {
	let mut bytes = vec![0; 256];
	bytes.extend(ape_tag(&[ape_item("Artist", b"APE artist", false)]));
	bytes.extend(id3v1_tag("", "ID3v1 artist", "", 0, 255));

	let tags = ApeReader::read_from(&mut Cursor::new(bytes), &ParseOptions::new()).unwrap();
	assert_eq!(tags.text(MetaTagIdentifier::Artist), Some("APE artist"));
}

#[test_log::test]
fn cover_art_disabled() {
	let options = ParseOptions::new().read_cover_art(false);
	let tags = ApeReader::read_from(&mut Cursor::new(util::ape_file()), &options).unwrap();

	assert!(tags.images().is_empty());
	assert_eq!(tags.text(MetaTagIdentifier::Title), Some("Title"));
}
