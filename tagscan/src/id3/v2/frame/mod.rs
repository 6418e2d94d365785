pub(crate) mod content;
pub(crate) mod header;

use crate::error::{Id3v2Error, Id3v2ErrorKind, Result};
use crate::id3::v2::Id3v2Version;
use crate::id3::v2::util::synchsafe::resynchronise;
use header::FrameHeader;

use std::borrow::Cow;

/// Undo the frame-level encodings of a frame's content
///
/// Returns `None` for frames that can't be read (encrypted frames).
pub(crate) fn frame_content<'a>(
	header: &FrameHeader,
	content: &'a [u8],
	version: Id3v2Version,
	tag_unsynchronised: bool,
) -> Result<Option<Cow<'a, [u8]>>> {
	let flags = header.flags;
	let mut content = content;

	if flags.encryption {
		log::warn!("ID3v2: Skipping encrypted frame {}", header.id);
		return Ok(None);
	}

	match version {
		Id3v2Version::V2 => return Ok(Some(Cow::Borrowed(content))),
		Id3v2Version::V3 => {
			// Decompressed size, then the group identifier
			if flags.compression {
				content = skip(content, 4)?;
			}

			if flags.grouping_identity {
				content = skip(content, 1)?;
			}
		},
		Id3v2Version::V4 => {
			if flags.grouping_identity {
				content = skip(content, 1)?;
			}

			if flags.data_length_indicator {
				content = skip(content, 4)?;
			} else if flags.compression {
				return Err(Id3v2Error::new(Id3v2ErrorKind::MissingDataLengthIndicator).into());
			}
		},
	}

	let mut content = Cow::Borrowed(content);

	// ID3v2.4 applies the tag's unsynchronisation flag to each frame
	if version == Id3v2Version::V4 && (flags.unsynchronisation || tag_unsynchronised) {
		content = Cow::Owned(resynchronise(&content));
	}

	if flags.compression {
		content = Cow::Owned(decompress(&content)?);
	}

	Ok(Some(content))
}

fn skip(content: &[u8], len: usize) -> Result<&[u8]> {
	content
		.get(len..)
		.ok_or_else(|| Id3v2Error::new(Id3v2ErrorKind::BadFrameLength).into())
}

#[cfg(feature = "id3v2_compression_support")]
fn decompress(content: &[u8]) -> Result<Vec<u8>> {
	use std::io::Read;

	let limit = crate::config::global_options().allocation_limit as u64;

	let mut decompressed = Vec::new();
	flate2::read::ZlibDecoder::new(content)
		.take(limit)
		.read_to_end(&mut decompressed)
		.map_err(|err| Id3v2Error::new(Id3v2ErrorKind::Decompression(err)))?;

	Ok(decompressed)
}

#[cfg(not(feature = "id3v2_compression_support"))]
#[allow(clippy::unnecessary_wraps)]
fn decompress(_: &[u8]) -> Result<Vec<u8>> {
	Err(Id3v2Error::new(Id3v2ErrorKind::CompressedFrameEncountered).into())
}
