//! A simple, read-only OGG page reader

mod error;
mod header;
mod packets;

use std::io::{Read, Seek, SeekFrom};

pub use error::{PageError, Result};
pub use header::{PAGE_HEADER_SIZE, PageHeader};
pub use packets::Packets;

/// The capture pattern that starts every page
pub const CAPTURE_PATTERN: [u8; 4] = *b"OggS";

/// The first packet on the page continues a packet from the previous page
pub const CONTINUED_PACKET: u8 = 0x01;
/// The page is the first page of the logical bitstream
pub const CONTAINS_FIRST_PAGE_OF_BITSTREAM: u8 = 0x02;
/// The page is the last page of the logical bitstream
pub const CONTAINS_LAST_PAGE_OF_BITSTREAM: u8 = 0x04;

/// The maximum page content size
pub const MAX_CONTENT_SIZE: usize = 65025;

/// An OGG page
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Page {
	header: PageHeader,
	content: Vec<u8>,
	/// The position in the stream the page ended
	pub end: u64,
}

impl Page {
	/// Attempts to get a Page from a reader
	///
	/// Use `skip_content` to only read the header, and skip over the content.
	///
	/// # Errors
	///
	/// * [`std::io::Error`]
	/// * [`PageError`]
	///
	/// # Examples
	///
	/// ```rust
	/// use ogg_pager::Page;
	/// use std::io::Cursor;
	///
	/// # fn main() -> Result<(), ogg_pager::PageError> {
	/// let mut bytes = Vec::new();
	/// bytes.extend(b"OggS");
	/// bytes.extend([0, 2]);
	/// bytes.extend([0; 20]);
	/// bytes.extend([1, 4]);
	/// bytes.extend(b"data");
	///
	/// let page = Page::read(&mut Cursor::new(bytes), false)?;
	/// assert_eq!(page.content(), b"data");
	/// assert_eq!(page.end, 32);
	/// # Ok(()) }
	/// ```
	pub fn read<R>(data: &mut R, skip_content: bool) -> Result<Self>
	where
		R: Read + Seek,
	{
		let header = PageHeader::read(data)?;
		let content_len = header.content_size();

		let mut content = Vec::new();
		if skip_content {
			data.seek(SeekFrom::Current(content_len as i64))?;
		} else {
			data.by_ref()
				.take(content_len as u64)
				.read_to_end(&mut content)?;

			if content.len() != content_len {
				return Err(PageError::NotEnoughData {
					expected: content_len,
					found: content.len(),
				});
			}
		}

		let end = data.stream_position()?;

		Ok(Page {
			header,
			content,
			end,
		})
	}

	/// Returns the page's header
	pub fn header(&self) -> &PageHeader {
		&self.header
	}

	/// Returns the page's content
	pub fn content(&self) -> &[u8] {
		self.content.as_slice()
	}

	/// Consumes the page and returns its content
	pub fn take_content(self) -> Vec<u8> {
		self.content
	}
}

/// Search for the next capture pattern, starting at the reader's current position
///
/// At most `limit` bytes will be searched. If a capture pattern is found, the reader is left
/// at its first byte and the absolute position is returned.
///
/// # Errors
///
/// * [`std::io::Error`]
///
/// # Examples
///
/// ```rust
/// use ogg_pager::find_capture_pattern;
/// use std::io::Cursor;
///
/// # fn main() -> Result<(), ogg_pager::PageError> {
/// let mut reader = Cursor::new(b"junkOggS".to_vec());
///
/// assert_eq!(find_capture_pattern(&mut reader, 1024)?, Some(4));
/// assert_eq!(reader.position(), 4);
/// # Ok(()) }
/// ```
pub fn find_capture_pattern<R>(data: &mut R, limit: u64) -> Result<Option<u64>>
where
	R: Read + Seek,
{
	let start = data.stream_position()?;

	let mut window = [0u8; 4];
	let mut filled = 0u64;
	let mut found = None;
	for byte in data.by_ref().take(limit).bytes() {
		window.rotate_left(1);
		window[3] = byte?;
		filled += 1;

		if filled >= 4 && window == CAPTURE_PATTERN {
			found = Some(start + filled - 4);
			break;
		}
	}

	if let Some(pos) = found {
		data.seek(SeekFrom::Start(pos))?;
	}

	Ok(found)
}
