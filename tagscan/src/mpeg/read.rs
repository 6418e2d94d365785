use super::header::MpegFrameHeader;
use super::properties::MpegProperties;
use crate::config::ParseOptions;
use crate::error::{Result, recover_partial};
use crate::file::FileType;
use crate::id3::{FindId3v2Config, ID3FindResults, find_id3v1, find_id3v2};
use crate::properties::AudioProperties;
use crate::reader::TagReader;
use crate::tag::TagSet;
use crate::util::io::SeekStreamLen;

use std::io::{Read, Seek, SeekFrom};

/// Reads MPEG audio files
///
/// Tags come from an ID3v2 tag at the start of the file (possibly preceded by junk), and an
/// ID3v1 tag at the end. ID3v1 values only fill identifiers the ID3v2 tag doesn't have.
///
/// The audio properties are estimated from the first valid frame header.
///
/// # Examples
///
/// ```rust,no_run
/// use tagscan::config::ParseOptions;
/// use tagscan::mpeg::MpegReader;
/// use tagscan::reader::TagReader;
/// use tagscan::tag::MetaTagIdentifier;
///
/// # fn main() -> tagscan::error::Result<()> {
/// let tags = MpegReader::read_all_tags("song.mp3", &ParseOptions::new())?;
/// println!("{:?}", tags.text(MetaTagIdentifier::Title));
/// # Ok(()) }
/// ```
pub struct MpegReader;

impl TagReader for MpegReader {
	const FILE_TYPE: FileType = FileType::Mpeg;

	fn read_with_properties<R>(
		reader: &mut R,
		parse_options: &ParseOptions,
	) -> Result<(TagSet, AudioProperties)>
	where
		R: Read + Seek,
	{
		let mut tags = TagSet::new();
		let mut properties = AudioProperties::default();

		let result = read_from(reader, parse_options, &mut tags, &mut properties);
		recover_partial(result, "MPEG")?;

		Ok((tags, properties))
	}
}

fn read_from<R>(
	reader: &mut R,
	parse_options: &ParseOptions,
	tags: &mut TagSet,
	properties: &mut AudioProperties,
) -> Result<()>
where
	R: Read + Seek,
{
	let file_len = reader.stream_len_hack()?;
	reader.seek(SeekFrom::Start(0))?;

	let config = FindId3v2Config {
		allowed_junk_window: Some(parse_options.max_junk_bytes as u64),
		..FindId3v2Config::READ_TAG
	};

	let ID3FindResults(_, id3v2) = find_id3v2(reader, config, parse_options)?;
	*tags = id3v2;

	// The audio starts after the tag, or at the start of the file
	let audio_start = reader.stream_position()?;

	if parse_options.is_cancelled() {
		return Ok(());
	}

	let ID3FindResults(_, id3v1) = find_id3v1(reader, true)?;
	tags.fill_missing(id3v1);

	reader.seek(SeekFrom::Start(audio_start))?;
	if let Some((header, offset)) = MpegFrameHeader::find(reader, parse_options)? {
		if let Some(mpeg_properties) = MpegProperties::estimate(&header, offset, file_len) {
			*properties = mpeg_properties.into();
		}
	} else {
		log::warn!("MPEG: No valid frame header found, properties will be empty");
	}

	Ok(())
}
