//! The per-format reader interface, and the format-detecting entry points

use crate::config::ParseOptions;
use crate::error::Result;
use crate::file::{AudioTagData, FileType};
use crate::picture::AudioImage;
use crate::probe::Probe;
use crate::properties::AudioProperties;
use crate::tag::{MetaTagIdentifier, TagIdentifier, TagSet, TagValue};

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

/// Reads the tags of a single format
///
/// Readers never fail on malformed data. A bad signature gives an empty [`TagSet`], and a
/// truncated or corrupt structure gives everything decoded before it. Only IO failures
/// (other than an unexpected EOF) are returned as errors.
pub trait TagReader {
	/// The format this reader handles
	const FILE_TYPE: FileType;

	/// Read the tags and audio properties from a reader
	///
	/// # Errors
	///
	/// * `reader` fails with an IO error other than [`UnexpectedEof`](std::io::ErrorKind::UnexpectedEof)
	fn read_with_properties<R>(
		reader: &mut R,
		parse_options: &ParseOptions,
	) -> Result<(TagSet, AudioProperties)>
	where
		R: Read + Seek;

	/// Read the tags from a reader
	///
	/// # Errors
	///
	/// See [`TagReader::read_with_properties`]
	fn read_from<R>(reader: &mut R, parse_options: &ParseOptions) -> Result<TagSet>
	where
		R: Read + Seek,
	{
		Self::read_with_properties(reader, parse_options).map(|(tags, _)| tags)
	}

	/// Read every tag from the file at `path`
	///
	/// # Errors
	///
	/// * `path` can't be opened
	/// * See [`TagReader::read_from`]
	fn read_all_tags(path: impl AsRef<Path>, parse_options: &ParseOptions) -> Result<TagSet> {
		let mut reader = BufReader::new(File::open(path)?);
		Self::read_from(&mut reader, parse_options)
	}

	/// Read a single tag from the file at `path`
	///
	/// # Errors
	///
	/// See [`TagReader::read_all_tags`]
	fn read_tag(
		path: impl AsRef<Path>,
		id: &TagIdentifier,
		parse_options: &ParseOptions,
	) -> Result<Option<TagValue>> {
		let mut tags = Self::read_all_tags(path, parse_options)?;
		Ok(tags.remove(id))
	}

	/// Read every embedded image from the file at `path`, in file order
	///
	/// # Errors
	///
	/// See [`TagReader::read_all_tags`]
	fn read_images(path: impl AsRef<Path>, parse_options: &ParseOptions) -> Result<Vec<AudioImage>> {
		let tags = Self::read_all_tags(path, parse_options)?;
		Ok(take_images(tags))
	}
}

fn take_images(mut tags: TagSet) -> Vec<AudioImage> {
	match tags.remove(&TagIdentifier::Canonical(MetaTagIdentifier::Images)) {
		Some(TagValue::Images(images)) => images,
		_ => Vec::new(),
	}
}

/// Detect the format of the file at `path`, and read its tags and properties
///
/// Unlike [`read_all_tags`], the tags include defaults for the common identifiers, see
/// [`AudioTagData`].
///
/// # Errors
///
/// * `path` can't be opened
/// * The format can't be determined ([`UnknownFormat`](crate::error::ErrorKind::UnknownFormat))
/// * See [`TagReader::read_from`]
///
/// # Examples
///
/// ```rust,no_run
/// use tagscan::config::ParseOptions;
/// use tagscan::tag::MetaTagIdentifier;
///
/// # fn main() -> tagscan::error::Result<()> {
/// let data = tagscan::read_audio_tags("song.mp3", &ParseOptions::new())?;
///
/// println!("Title: {:?}", data.tags().text(MetaTagIdentifier::Title));
/// println!("Duration: {:?}", data.properties().duration());
/// # Ok(()) }
/// ```
pub fn read_audio_tags(path: impl AsRef<Path>, parse_options: &ParseOptions) -> Result<AudioTagData> {
	Probe::open(path)?
		.options(parse_options.clone())
		.guess_file_type()?
		.read()
}

/// Detect the format of the file at `path`, and read every tag
///
/// # Errors
///
/// See [`read_audio_tags`]
///
/// # Examples
///
/// ```rust,no_run
/// use tagscan::config::ParseOptions;
/// use tagscan::tag::MetaTagIdentifier;
///
/// # fn main() -> tagscan::error::Result<()> {
/// let tags = tagscan::read_all_tags("song.flac", &ParseOptions::new())?;
///
/// for (id, value) in tags.iter() {
/// 	println!("{id}: {value:?}");
/// }
/// # Ok(()) }
/// ```
pub fn read_all_tags(path: impl AsRef<Path>, parse_options: &ParseOptions) -> Result<TagSet> {
	Probe::open(path)?
		.options(parse_options.clone())
		.guess_file_type()?
		.read_tags()
}

/// Detect the format of the file at `path`, and read a single tag
///
/// # Errors
///
/// See [`read_audio_tags`]
pub fn read_tag(
	path: impl AsRef<Path>,
	id: &TagIdentifier,
	parse_options: &ParseOptions,
) -> Result<Option<TagValue>> {
	let mut tags = read_all_tags(path, parse_options)?;
	Ok(tags.remove(id))
}

/// Detect the format of the file at `path`, and read every embedded image
///
/// # Errors
///
/// See [`read_audio_tags`]
pub fn read_images(path: impl AsRef<Path>, parse_options: &ParseOptions) -> Result<Vec<AudioImage>> {
	read_all_tags(path, parse_options).map(take_images)
}
