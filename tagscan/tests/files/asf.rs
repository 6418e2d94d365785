use crate::util::{
	self, ASF_EXTENDED_CONTENT_DESCRIPTION, ASF_HEADER, JPEG, asf_descriptor, asf_object,
	temp_file, utf16le,
};

use tagscan::asf::AsfReader;
use tagscan::config::ParseOptions;
use tagscan::file::FileType;
use tagscan::picture::{MimeType, PictureType};
use tagscan::reader::TagReader;
use tagscan::tag::{MetaTagIdentifier, TagIdentifier, TagValue};

use std::io::Cursor;

fn header_with(children: &[Vec<u8>]) -> Vec<u8> {
	let children = children.concat();

	let mut bytes = ASF_HEADER.to_vec();
	bytes.extend((children.len() as u64 + 30).to_le_bytes());
	bytes.extend((children.len() as u32).to_le_bytes());
	bytes.extend([1, 2]);
	bytes.extend(children);
	bytes
}

#[test_log::test]
fn read() {
	let file = temp_file(&util::asf_file(), "wma");
	let data = tagscan::read_audio_tags(file.path(), &ParseOptions::new()).unwrap();

	assert_eq!(data.file_type(), FileType::Asf);

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
}

#[test_log::test]
fn typed_descriptors() {
	let descriptors = [
		asf_descriptor("WM/BeatsPerMinute", 2, &120_u32.to_le_bytes()),
		asf_descriptor("IsVBR", 5, &1_u32.to_le_bytes()),
		asf_descriptor("WM/MCDI", 1, &[1, 2, 3]),
		asf_descriptor("wm/genre", 0, &utf16le("Rock")),
	];

	let mut extended = (descriptors.len() as u16).to_le_bytes().to_vec();
	extended.extend(descriptors.concat());

	let bytes = header_with(&[asf_object(ASF_EXTENDED_CONTENT_DESCRIPTION, &extended)]);
	let tags = AsfReader::read_from(&mut Cursor::new(bytes), &ParseOptions::new()).unwrap();

	assert_eq!(tags.integer(MetaTagIdentifier::Bpm), Some(120));
	assert_eq!(tags.text(MetaTagIdentifier::Genre), Some("Rock"));
	assert_eq!(
		tags.get(&TagIdentifier::vendor("IsVBR")),
		Some(&TagValue::Boolean(true))
	);
	assert_eq!(
		tags.get(&TagIdentifier::vendor("WM/MCDI")),
		Some(&TagValue::Binary(vec![1, 2, 3]))
	);
}

#[test_log::test]
fn no_header_children() {
	let tags = AsfReader::read_from(&mut Cursor::new(header_with(&[])), &ParseOptions::new())
		.unwrap();
	assert!(tags.is_empty());
}
