use crate::util::{self, JPEG, temp_file};

use tagscan::config::ParseOptions;
use tagscan::error::ErrorKind;
use tagscan::flac::FlacReader;
use tagscan::reader::TagReader;
use tagscan::tag::{MetaTagIdentifier, TagIdentifier, TagValue};

#[test_log::test]
fn defaults_only_with_audio_tags() {
	let file = temp_file(&util::ogg_vorbis_file(&["ARTIST=Foo"]), "ogg");

	let data = tagscan::read_audio_tags(file.path(), &ParseOptions::new()).unwrap();
	let tags = data.tags();
	assert_eq!(tags.text(MetaTagIdentifier::Artist), Some("Foo"));
	assert_eq!(tags.text(MetaTagIdentifier::Title), Some(""));
	assert_eq!(tags.text(MetaTagIdentifier::Genre), Some(""));
	assert_eq!(tags.text(MetaTagIdentifier::RecordingYear), Some(""));
	assert_eq!(tags.integer(MetaTagIdentifier::TrackNumber), Some(0));

	let all = tagscan::read_all_tags(file.path(), &ParseOptions::new()).unwrap();
	assert_eq!(all.len(), 1);
	assert!(all.text(MetaTagIdentifier::Title).is_none());
}

#[test_log::test]
fn single_tag() {
	let file = temp_file(&util::mp4_file(), "m4a");

	let album = tagscan::read_tag(
		file.path(),
		&TagIdentifier::from(MetaTagIdentifier::Album),
		&ParseOptions::new(),
	)
	.unwrap();
	assert_eq!(album, Some(TagValue::Text(String::from("Album"))));

	let missing = tagscan::read_tag(
		file.path(),
		&TagIdentifier::from(MetaTagIdentifier::Composer),
		&ParseOptions::new(),
	)
	.unwrap();
	assert!(missing.is_none());
}

#[test_log::test]
fn images() {
	let file = temp_file(&util::flac_file(), "flac");

	let images = tagscan::read_images(file.path(), &ParseOptions::new()).unwrap();
	assert_eq!(images.len(), 1);
	assert_eq!(images[0].data(), JPEG);

	let from_reader = FlacReader::read_images(file.path(), &ParseOptions::new()).unwrap();
	assert_eq!(images, from_reader);

	let disabled =
		tagscan::read_images(file.path(), &ParseOptions::new().read_cover_art(false)).unwrap();
	assert!(disabled.is_empty());
}

#[test_log::test]
fn unknown_format() {
	let file = temp_file(&[0x20; 512], "txt");

	let err = tagscan::read_all_tags(file.path(), &ParseOptions::new()).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::UnknownFormat));
}

#[test_log::test]
fn missing_file() {
	let err = tagscan::read_all_tags("does/not/exist.mp3", &ParseOptions::new()).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::Io(_)));
}

#[test_log::test]
fn reading_is_repeatable() {
	for (content, extension) in [
		(util::mpeg_file(), "mp3"),
		(util::ape_file(), "ape"),
		(util::mp4_file(), "m4a"),
		(util::ogg_file(), "ogg"),
		(util::flac_file(), "flac"),
		(util::asf_file(), "wma"),
	] {
		let file = temp_file(&content, extension);

		let first = tagscan::read_audio_tags(file.path(), &ParseOptions::new()).unwrap();
		let second = tagscan::read_audio_tags(file.path(), &ParseOptions::new()).unwrap();
		assert_eq!(first, second);
		assert_eq!(first.tags().text(MetaTagIdentifier::Title), Some("Title"));
	}
}
