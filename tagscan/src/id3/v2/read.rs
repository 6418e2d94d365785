use super::frame::content::parse_content;
use super::frame::frame_content;
use super::frame::header::{ParsedHeader, parse_header};
use super::header::{ExtendedHeader, Id3v2Header, Id3v2Version};
use super::util::synchsafe::resynchronise;
use crate::config::{ParseOptions, global_options};
use crate::error::{Result, recover_partial};
use crate::tag::TagSet;

use std::io::{ErrorKind as IoErrorKind, Read};

/// Read the tag body (and footer) following an already parsed header
///
/// Malformed frames are skipped, and a truncated tag keeps every frame decoded before the
/// truncation.
pub(crate) fn parse_id3v2<R>(
	reader: &mut R,
	header: Id3v2Header,
	parse_options: &ParseOptions,
) -> Result<TagSet>
where
	R: Read,
{
	log::debug!(
		"Parsing ID3v2.{}.{} tag, size: {}",
		match header.version {
			Id3v2Version::V2 => 2,
			Id3v2Version::V3 => 3,
			Id3v2Version::V4 => 4,
		},
		header.minor,
		header.size
	);

	let mut tags = TagSet::new();

	let result = read_body(reader, header, parse_options, &mut tags);
	recover_partial(result, "ID3v2")?;

	Ok(tags)
}

fn read_body<R>(
	reader: &mut R,
	header: Id3v2Header,
	parse_options: &ParseOptions,
	tags: &mut TagSet,
) -> Result<()>
where
	R: Read,
{
	// The header caps the size, the allocation limit applies to each frame instead
	let mut body = Vec::new();
	reader.by_ref().take(u64::from(header.size)).read_to_end(&mut body)?;

	let truncated = body.len() < header.size as usize;
	if truncated {
		log::warn!(
			"ID3v2: Tag is truncated, expected {} bytes, found {}",
			header.size,
			body.len()
		);
	}

	// ID3v2.4 handles this per frame
	if header.flags.unsynchronisation && header.version != Id3v2Version::V4 {
		body = resynchronise(&body);
	}

	read_frames(&body, header, parse_options, tags)?;

	if header.flags.footer && !truncated {
		read_footer(reader, header)?;
	}

	Ok(())
}

fn read_frames(
	body: &[u8],
	header: Id3v2Header,
	parse_options: &ParseOptions,
	tags: &mut TagSet,
) -> Result<()> {
	let version = header.version;
	let mut pos = 0;

	if header.flags.extended_header {
		let extended = ExtendedHeader::parse(body, version)?;
		log::debug!("ID3v2: Found an extended header: {extended:?}");

		pos = extended.len as usize;
	}

	let header_len = version.frame_header_len();
	let frame_limit = global_options().allocation_limit;
	while pos + header_len <= body.len() {
		if parse_options.is_cancelled() {
			log::debug!("ID3v2: Cancelled, keeping {} decoded frames", tags.len());
			break;
		}

		let frame_header = match parse_header(&body[pos..pos + header_len], version)? {
			ParsedHeader::Frame(frame_header) => frame_header,
			ParsedHeader::End => break,
		};

		let start = pos + header_len;
		let size = frame_header.size as usize;
		if size == 0 || start + size > body.len() {
			log::warn!(
				"ID3v2: Frame {} has an invalid size ({size}), resynchronising",
				frame_header.id
			);

			pos += 1;
			continue;
		}

		pos = start + size;

		if size > frame_limit {
			log::warn!(
				"ID3v2: Frame {} exceeds the allocation limit ({size} bytes), skipping",
				frame_header.id
			);
			continue;
		}

		log::trace!("ID3v2: Found frame {}, size: {size}", frame_header.id);

		let tag_unsynchronised = header.flags.unsynchronisation;
		let decoded = frame_content(&frame_header, &body[start..pos], version, tag_unsynchronised)
			.and_then(|content| match content {
				Some(content) => {
					parse_content(&frame_header.id, &content, version, parse_options, tags)
				},
				None => Ok(()),
			});

		if let Err(err) = decoded {
			if !err.is_recoverable() {
				return Err(err);
			}

			log::warn!("ID3v2: Skipping frame {}: {err}", frame_header.id);
		}
	}

	Ok(())
}

fn read_footer<R>(reader: &mut R, header: Id3v2Header) -> Result<()>
where
	R: Read,
{
	let mut footer = [0; 10];
	match reader.read_exact(&mut footer) {
		Ok(()) if header.matches_footer(&footer) => log::debug!("ID3v2: Found a valid footer"),
		Ok(()) => log::warn!("ID3v2: Footer doesn't match the header, ignoring"),
		Err(err) if err.kind() == IoErrorKind::UnexpectedEof => {
			log::warn!("ID3v2: Tag is missing its footer");
		},
		Err(err) => return Err(err.into()),
	}

	Ok(())
}
