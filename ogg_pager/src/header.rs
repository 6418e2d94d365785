use crate::error::{PageError, Result};
use crate::{CAPTURE_PATTERN, CONTINUED_PACKET};

use std::io::{Read, Seek};

use byteorder::{ByteOrder, LittleEndian};

/// The size of the fixed portion of a page header, up to and including the segment count
pub const PAGE_HEADER_SIZE: usize = 27;

/// An OGG page header
///
/// The header is followed by a segment table, made up of `segment count` lacing values.
/// A lacing value of 255 means the packet continues into the next segment, anything
/// lower terminates the packet.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PageHeader {
	/// Stream offset of the capture pattern
	pub start: u64,
	pub(crate) header_type_flag: u8,
	/// Absolute granule position, codec defined
	pub abgp: u64,
	/// Serial number of the logical stream this page belongs to
	pub stream_serial: u32,
	/// Page counter within the logical stream
	pub sequence_number: u32,
	pub(crate) checksum: u32,
	pub(crate) segments: Vec<u8>,
}

impl PageHeader {
	/// Read a page header, including its segment table
	///
	/// The reader is left at the start of the page content.
	///
	/// # Errors
	///
	/// * [`std::io::Error`]
	/// * The page is missing its capture pattern, has a nonzero version, or has no segments
	///
	/// # Examples
	///
	/// ```rust
	/// use ogg_pager::PageHeader;
	/// use std::io::Cursor;
	///
	/// # fn main() -> Result<(), ogg_pager::PageError> {
	/// let mut page = Vec::new();
	/// page.extend(b"OggS");
	/// page.extend([0, 2]);
	/// page.extend([0; 20]);
	/// page.extend([1, 3, 1, 2, 3]);
	///
	/// let header = PageHeader::read(&mut Cursor::new(page))?;
	/// assert_eq!(header.segments(), &[3]);
	/// assert_eq!(header.content_size(), 3);
	/// # Ok(()) }
	/// ```
	pub fn read<R>(data: &mut R) -> Result<Self>
	where
		R: Read + Seek,
	{
		let start = data.stream_position()?;

		// Capture pattern (4), version (1), flags (1), granule (8), serial (4), sequence (4),
		// checksum (4), segment count (1)
		let mut fixed = [0; PAGE_HEADER_SIZE];
		data.read_exact(&mut fixed)?;

		if fixed[..4] != CAPTURE_PATTERN {
			return Err(PageError::MissingMagic);
		}

		if fixed[4] != 0 {
			return Err(PageError::InvalidVersion);
		}

		let segment_count = usize::from(fixed[26]);
		if segment_count == 0 {
			return Err(PageError::BadSegmentCount);
		}

		let mut segments = vec![0; segment_count];
		data.read_exact(&mut segments)?;

		Ok(Self {
			start,
			header_type_flag: fixed[5],
			abgp: LittleEndian::read_u64(&fixed[6..14]),
			stream_serial: LittleEndian::read_u32(&fixed[14..18]),
			sequence_number: LittleEndian::read_u32(&fixed[18..22]),
			checksum: LittleEndian::read_u32(&fixed[22..26]),
			segments,
		})
	}

	/// The raw header type flags (continued, first, last)
	pub fn header_type_flag(&self) -> u8 {
		self.header_type_flag
	}

	/// Whether the first packet on this page continues one from the previous page
	pub fn is_continuation(&self) -> bool {
		self.header_type_flag & CONTINUED_PACKET == CONTINUED_PACKET
	}

	/// The CRC as stored, it is never verified
	pub fn checksum(&self) -> u32 {
		self.checksum
	}

	/// The lacing values of this page
	pub fn segments(&self) -> &[u8] {
		&self.segments
	}

	/// The total size of the page content, the sum of the segment table
	pub fn content_size(&self) -> usize {
		self.segments.iter().map(|&b| usize::from(b)).sum()
	}

	/// The size of the header as stored, including the segment table
	pub fn size(&self) -> usize {
		PAGE_HEADER_SIZE + self.segments.len()
	}
}
