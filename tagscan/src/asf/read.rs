use super::constants::{
	CONTENT_DESCRIPTION_OBJECT, EXTENDED_CONTENT_DESCRIPTION_OBJECT, FILE_PROPERTIES_OBJECT,
	HEADER_OBJECT, HEADER_OBJECT_LEN, OBJECT_HEADER_LEN, STREAM_PROPERTIES_OBJECT,
};
use super::content::{read_content_description, read_extended_content_description};
use super::object::ObjectHeader;
use super::properties::{read_file_properties, read_stream_properties};
use crate::config::ParseOptions;
use crate::error::{Result, recover_partial};
use crate::file::FileType;
use crate::properties::AudioProperties;
use crate::reader::TagReader;
use crate::tag::TagSet;
use crate::util::io::{SeekStreamLen, read_up_to};

use std::io::{Read, Seek, SeekFrom};

/// A reader for ASF (WMA) files
///
/// Tags come from the Content Description and Extended Content Description objects, and
/// properties from the File Properties and (audio) Stream Properties objects.
pub struct AsfReader;

impl TagReader for AsfReader {
	const FILE_TYPE: FileType = FileType::Asf;

	fn read_with_properties<R>(
		reader: &mut R,
		parse_options: &ParseOptions,
	) -> Result<(TagSet, AudioProperties)>
	where
		R: Read + Seek,
	{
		let mut tags = TagSet::new();
		let mut properties = AudioProperties::default();

		let result = read_objects(reader, parse_options, &mut tags, &mut properties);
		recover_partial(result, "ASF")?;

		Ok((tags, properties))
	}
}

// Objects are walked flat, the Header Object is entered rather than skipped so its children
// are reached
fn read_objects<R>(
	reader: &mut R,
	parse_options: &ParseOptions,
	tags: &mut TagSet,
	properties: &mut AudioProperties,
) -> Result<()>
where
	R: Read + Seek,
{
	reader.seek(SeekFrom::Start(0))?;

	let mut guid = [0; 16];
	reader.read_exact(&mut guid)?;

	if guid != HEADER_OBJECT {
		log::debug!("ASF: File is missing the Header Object");
		return Ok(());
	}

	let stream_len = reader.stream_len_hack()?;
	let mut pos = 0;

	while pos + OBJECT_HEADER_LEN <= stream_len {
		if parse_options.is_cancelled() {
			log::debug!("ASF: Cancelled");
			break;
		}

		reader.seek(SeekFrom::Start(pos))?;
		let header = ObjectHeader::read(reader)?;

		if header.size < OBJECT_HEADER_LEN || header.size > stream_len - pos {
			log::warn!(
				"ASF: Object at offset {pos} has an invalid size ({}), skipping",
				header.size
			);
			pos += OBJECT_HEADER_LEN;
			continue;
		}

		match header.guid {
			HEADER_OBJECT if pos == 0 => {
				log::debug!("ASF: Entering the Header Object");
				pos += HEADER_OBJECT_LEN;
				continue;
			},
			// A nested object carrying the Header Object GUID is read as a Content Description
			CONTENT_DESCRIPTION_OBJECT | HEADER_OBJECT => {
				log::debug!("ASF: Found a Content Description Object");
				let content = read_up_to(reader, header.content_len())?;
				skip_malformed(read_content_description(&content, tags), "content description")?;
			},
			EXTENDED_CONTENT_DESCRIPTION_OBJECT => {
				log::debug!("ASF: Found an Extended Content Description Object");
				let content = read_up_to(reader, header.content_len())?;
				skip_malformed(
					read_extended_content_description(&content, parse_options, tags),
					"extended content description",
				)?;
			},
			FILE_PROPERTIES_OBJECT => {
				let content = read_up_to(reader, header.content_len())?;
				read_file_properties(&content, properties);
			},
			STREAM_PROPERTIES_OBJECT => {
				let content = read_up_to(reader, header.content_len())?;
				read_stream_properties(&content, properties);
			},
			_ => {},
		}

		pos += header.size;
	}

	Ok(())
}

// A malformed object is abandoned, the walk continues with the next one
fn skip_malformed(result: Result<()>, object: &str) -> Result<()> {
	match result {
		Err(err) if err.is_recoverable() => {
			log::warn!("ASF: Stopped reading the {object} early ({err})");
			Ok(())
		},
		other => other,
	}
}
