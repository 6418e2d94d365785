use super::constants::{MAX_PACKETS, MAX_SCAN_BYTES, OPUSTAGS, VORBIS_COMMENT_HEAD};
use super::properties::read_properties;
use super::read::read_comments;
use super::stream::read_stream_section;
use crate::config::ParseOptions;
use crate::error::{Result, recover_partial};
use crate::file::FileType;
use crate::properties::AudioProperties;
use crate::reader::TagReader;
use crate::tag::TagSet;

use std::io::{Read, Seek, SeekFrom};

use ogg_pager::{Packets, Page, find_capture_pattern};

/// A reader for Ogg Vorbis and Ogg Opus files
///
/// Only the first logical bitstream is followed. The comment header is expected within the
/// first few packets near the start of the file, anything further is not searched.
///
/// Some encoders also leave a plain text `[STREAM]` section near the start of the file, the
/// values found there are used when the comment header doesn't provide them.
pub struct VorbisReader;

impl TagReader for VorbisReader {
	const FILE_TYPE: FileType = FileType::Ogg;

	fn read_with_properties<R>(
		reader: &mut R,
		parse_options: &ParseOptions,
	) -> Result<(TagSet, AudioProperties)>
	where
		R: Read + Seek,
	{
		let mut tags = TagSet::new();
		let mut properties = AudioProperties::default();

		recover_partial(read_stream_section(reader, &mut tags), "Ogg [STREAM]")?;

		let result = read_ogg(reader, parse_options, &mut tags, &mut properties);
		recover_partial(result, "Ogg")?;

		Ok((tags, properties))
	}
}

fn read_ogg<R>(
	reader: &mut R,
	parse_options: &ParseOptions,
	tags: &mut TagSet,
	properties: &mut AudioProperties,
) -> Result<()>
where
	R: Read + Seek,
{
	reader.seek(SeekFrom::Start(0))?;

	let mut packets = Packets::new();
	let mut stream_serial = None;
	let mut inspected = 0;

	loop {
		if parse_options.is_cancelled() {
			log::debug!("Ogg: Cancelled");
			return Ok(());
		}

		let position = reader.stream_position()?;
		if position >= MAX_SCAN_BYTES || inspected >= MAX_PACKETS {
			log::debug!("Ogg: No comment header found after {inspected} packets");
			return Ok(());
		}

		let Some(page_start) = find_capture_pattern(reader, MAX_SCAN_BYTES - position)? else {
			log::debug!("Ogg: No more pages");
			return Ok(());
		};

		let page = match Page::read(reader, false) {
			Ok(page) => page,
			Err(err) if err.is_invalid_page() => {
				log::warn!("Ogg: Skipping a bad page at offset {page_start} ({err})");
				reader.seek(SeekFrom::Start(page_start + 1))?;
				continue;
			},
			Err(err) => return Err(err.into()),
		};

		let serial = page.header().stream_serial;
		if *stream_serial.get_or_insert(serial) != serial {
			log::trace!("Ogg: Skipping a page from stream {serial}");
			continue;
		}

		let first_new = packets.len();
		packets.push_page(&page);

		for index in first_new..packets.len() {
			let Some(packet) = packets.get(index) else {
				break;
			};

			inspected += 1;

			if index == 0 {
				if let Some(stream_properties) = read_properties(reader, packet)? {
					*properties = stream_properties;
				}

				continue;
			}

			if let Some(block) = comment_block(packet) {
				log::debug!("Ogg: Found the comment header in packet {index}");
				return read_comments(block, parse_options, tags);
			}

			if inspected >= MAX_PACKETS {
				break;
			}
		}
	}
}

// The comment block of a Vorbis or Opus comment header packet
fn comment_block(packet: &[u8]) -> Option<&[u8]> {
	packet
		.strip_prefix(VORBIS_COMMENT_HEAD)
		.or_else(|| packet.strip_prefix(OPUSTAGS))
}
