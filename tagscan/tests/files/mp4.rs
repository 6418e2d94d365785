use crate::util::{self, JPEG, atom, mp4_item, temp_file};

use tagscan::config::ParseOptions;
use tagscan::file::FileType;
use tagscan::mp4::Mp4Reader;
use tagscan::picture::MimeType;
use tagscan::reader::TagReader;
use tagscan::tag::{MetaTagIdentifier, TagIdentifier, TagValue};

use std::io::Cursor;

#[test_log::test]
fn read() {
	let file = temp_file(&util::mp4_file(), "m4a");
	let data = tagscan::read_audio_tags(file.path(), &ParseOptions::new()).unwrap();

	assert_eq!(data.file_type(), FileType::Mp4);

	let tags = data.tags();
	assert_eq!(tags.text(MetaTagIdentifier::Title), Some("Title"));
	assert_eq!(tags.text(MetaTagIdentifier::Artist), Some("Artist"));
	assert_eq!(tags.text(MetaTagIdentifier::Album), Some("Album"));
	assert_eq!(tags.integer(MetaTagIdentifier::TrackNumber), Some(3));
	assert_eq!(tags.integer(MetaTagIdentifier::SongTotal), Some(10));
	assert_eq!(tags.integer(MetaTagIdentifier::DiscNumber), Some(1));
	assert_eq!(tags.integer(MetaTagIdentifier::DiscTotal), Some(2));

	let images = data.images();
	assert_eq!(images.len(), 1);
	assert_eq!(images[0].mime_type(), Some(&MimeType::Jpeg));
	assert_eq!(images[0].data(), JPEG);
}

#[test_log::test]
fn freeform_and_unknown_atoms() {
	let mut freeform = atom(b"mean", b"\x00\x00\x00\x00com.apple.iTunes");
	freeform.extend(atom(b"name", b"\x00\x00\x00\x00CATALOGNUMBER"));
	freeform.extend(atom(b"data", b"\x00\x00\x00\x01\x00\x00\x00\x00ABC-123"));

	let mut ilst = mp4_item(b"\xA9nam", 1, b"Title");
	ilst.extend(mp4_item(b"xyzw", 1, b"Unknown"));
	ilst.extend(atom(b"----", &freeform));

	let mut meta = vec![0; 4];
	meta.extend(atom(b"ilst", &ilst));

	let mut bytes = atom(b"ftyp", b"M4A \x00\x00\x00\x00");
	bytes.extend(atom(b"moov", &atom(b"udta", &atom(b"meta", &meta))));

	let tags = Mp4Reader::read_from(&mut Cursor::new(bytes), &ParseOptions::new()).unwrap();
	assert_eq!(tags.len(), 2);
	assert_eq!(tags.text(MetaTagIdentifier::Title), Some("Title"));
	assert_eq!(
		tags.get(&TagIdentifier::vendor("CATALOGNUMBER")),
		Some(&TagValue::Text(String::from("ABC-123")))
	);
}

#[test_log::test]
fn cover_art_disabled() {
	let options = ParseOptions::new().read_cover_art(false);
	let tags = Mp4Reader::read_from(&mut Cursor::new(util::mp4_file()), &options).unwrap();

	assert!(tags.images().is_empty());
	assert_eq!(tags.text(MetaTagIdentifier::Album), Some("Album"));
}
