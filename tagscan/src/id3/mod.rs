//! ID3 specific items
//!
//! ID3v2 tags sit at the start of a file, ID3v1 tags in the last 128 bytes. Files with both
//! prefer the ID3v2 values, see [`MpegReader`](crate::mpeg::MpegReader).

pub mod v1;
pub mod v2;

use crate::config::ParseOptions;
use crate::error::Result;
use crate::tag::TagSet;
use v1::constants::{ID3V1_TAG_MARKER, ID3V1_TAG_SIZE};
use v1::read::parse_id3v1;
use v2::header::Id3v2Header;
use v2::read::parse_id3v2;

use std::io::{Read, Seek, SeekFrom};

pub(crate) struct ID3FindResults<Header, Content>(pub Option<Header>, pub Content);

/// Look for an ID3v1 tag at the end of the stream
///
/// The stream is left at the start of the tag, or at the end of the stream if there is none.
pub(crate) fn find_id3v1<R>(data: &mut R, read: bool) -> Result<ID3FindResults<(), TagSet>>
where
	R: Read + Seek,
{
	log::debug!("Searching for an ID3v1 tag");

	let mut tags = TagSet::new();

	// Reader is too small to contain an ID3v1 tag
	if data.seek(SeekFrom::End(-(ID3V1_TAG_SIZE as i64))).is_err() {
		data.seek(SeekFrom::End(0))?;
		return Ok(ID3FindResults(None, tags));
	}

	let mut block = [0; ID3V1_TAG_SIZE];
	data.read_exact(&mut block)?;

	if block[..3] != ID3V1_TAG_MARKER {
		return Ok(ID3FindResults(None, tags));
	}

	log::debug!("Found an ID3v1 tag");

	if read {
		tags = parse_id3v1(&block);
	}

	data.seek(SeekFrom::End(-(ID3V1_TAG_SIZE as i64)))?;
	Ok(ID3FindResults(Some(()), tags))
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct FindId3v2Config {
	pub(crate) read: bool,
	pub(crate) allowed_junk_window: Option<u64>,
}

impl FindId3v2Config {
	pub(crate) const NO_READ_TAG: Self = Self {
		read: false,
		allowed_junk_window: None,
	};

	pub(crate) const READ_TAG: Self = Self {
		read: true,
		allowed_junk_window: None,
	};
}

/// Look for an ID3v2 tag at the current position
///
/// With a junk window, up to that many bytes are searched for the `ID3` marker first.
/// On success the stream is left after the tag (and its footer), otherwise it is restored.
pub(crate) fn find_id3v2<R>(
	data: &mut R,
	config: FindId3v2Config,
	parse_options: &ParseOptions,
) -> Result<ID3FindResults<Id3v2Header, TagSet>>
where
	R: Read + Seek,
{
	let start = data.stream_position()?;
	log::debug!("Searching for an ID3v2 tag at offset: {start}");

	if let Some(junk_window) = config.allowed_junk_window {
		let mut id3v2_search_window = data.by_ref().take(junk_window);

		let Some(id3v2_offset) = find_id3v2_in_junk(&mut id3v2_search_window)? else {
			data.seek(SeekFrom::Start(start))?;
			return Ok(ID3FindResults(None, TagSet::new()));
		};

		log::warn!("Found an ID3v2 tag preceded by junk data, offset: {id3v2_offset}");
		data.seek(SeekFrom::Start(start + id3v2_offset))?;
	}

	let tag_start = data.stream_position()?;

	let mut header_bytes = [0; 10];
	if data.read_exact(&mut header_bytes).is_err() {
		data.seek(SeekFrom::Start(start))?;
		return Ok(ID3FindResults(None, TagSet::new()));
	}

	let header = match Id3v2Header::from_bytes(header_bytes) {
		Ok(header) => header,
		Err(err) => {
			if &header_bytes[..3] == b"ID3" {
				log::warn!("Ignoring an unreadable ID3v2 tag: {err}");
			}

			data.seek(SeekFrom::Start(start))?;
			return Ok(ID3FindResults(None, TagSet::new()));
		},
	};

	log::debug!("Found an ID3v2 tag");

	let tags = if config.read {
		parse_id3v2(data, header, parse_options)?
	} else {
		TagSet::new()
	};

	data.seek(SeekFrom::Start(tag_start + header.full_tag_size()))?;

	Ok(ID3FindResults(Some(header), tags))
}

/// Searches for an ID3v2 tag in (potential) junk data between the start
/// of the file and the first frame
fn find_id3v2_in_junk<R>(reader: &mut R) -> Result<Option<u64>>
where
	R: Read,
{
	let mut window = [0; 3];

	for (index, byte) in reader.bytes().enumerate() {
		window = [window[1], window[2], byte?];
		if window == *b"ID3" {
			return Ok(Some((index - 2) as u64));
		}
	}

	Ok(None)
}
