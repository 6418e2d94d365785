use super::block::{BLOCK_ID_PICTURE, BLOCK_ID_STREAMINFO, BLOCK_ID_VORBIS_COMMENTS, Block};
use super::properties::read_stream_info;
use crate::config::ParseOptions;
use crate::error::{Result, recover_partial};
use crate::file::FileType;
use crate::id3::{FindId3v2Config, ID3FindResults, find_id3v2};
use crate::ogg::read::read_comments;
use crate::picture::AudioImage;
use crate::properties::AudioProperties;
use crate::reader::TagReader;
use crate::tag::TagSet;
use crate::util::io::SeekStreamLen;

use std::io::{Read, Seek, SeekFrom};

/// A reader for native FLAC files
///
/// Tags come from the `VORBIS_COMMENT` block and images from `PICTURE` blocks. An ID3v2 tag
/// before the `fLaC` marker is skipped, not read.
pub struct FlacReader;

impl TagReader for FlacReader {
	const FILE_TYPE: FileType = FileType::Flac;

	fn read_with_properties<R>(
		reader: &mut R,
		parse_options: &ParseOptions,
	) -> Result<(TagSet, AudioProperties)>
	where
		R: Read + Seek,
	{
		let mut tags = TagSet::new();
		let mut properties = AudioProperties::default();

		let result = read_flac(reader, parse_options, &mut tags, &mut properties);
		recover_partial(result, "FLAC")?;

		Ok((tags, properties))
	}
}

fn read_flac<R>(
	reader: &mut R,
	parse_options: &ParseOptions,
	tags: &mut TagSet,
	properties: &mut AudioProperties,
) -> Result<()>
where
	R: Read + Seek,
{
	reader.seek(SeekFrom::Start(0))?;

	// It is possible for a FLAC file to contain an ID3v2 tag
	if let ID3FindResults(Some(_), _) =
		find_id3v2(reader, FindId3v2Config::NO_READ_TAG, parse_options)?
	{
		log::warn!("FLAC: Skipping an ID3v2 tag before the stream marker");
	}

	let mut marker = [0; 4];
	reader.read_exact(&mut marker)?;

	if &marker != b"fLaC" {
		log::debug!("FLAC: File is missing the \"fLaC\" stream marker");
		return Ok(());
	}

	loop {
		if parse_options.is_cancelled() {
			log::debug!("FLAC: Cancelled");
			return Ok(());
		}

		let block = Block::read(reader, |block_type| match block_type {
			BLOCK_ID_STREAMINFO | BLOCK_ID_VORBIS_COMMENTS => true,
			BLOCK_ID_PICTURE => parse_options.read_cover_art,
			_ => false,
		})?;

		match block.ty {
			BLOCK_ID_STREAMINFO => *properties = read_stream_info(&block.content)?,
			BLOCK_ID_VORBIS_COMMENTS => {
				log::debug!("FLAC: Found a Vorbis comments block");
				read_comments(&block.content, parse_options, tags)?;
			},
			BLOCK_ID_PICTURE if !block.content.is_empty() => {
				match AudioImage::from_flac_bytes(&block.content, false) {
					Ok(image) => tags.push_image(image),
					Err(err) => log::warn!("FLAC: Unable to read a picture block, discarding ({err})"),
				}
			},
			_ => {},
		}

		if block.last {
			break;
		}
	}

	let audio_start = reader.stream_position()?;
	let file_len = reader.stream_len_hack()?;

	if let Some(duration_ms) = properties.duration_ms().filter(|ms| *ms > 0) {
		let stream_len = file_len.saturating_sub(audio_start);
		properties.bitrate = u32::try_from(stream_len * 8 / duration_ms).ok();
	}

	Ok(())
}
