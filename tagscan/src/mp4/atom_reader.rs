use super::atom_info::{ATOM_HEADER_LEN, AtomInfo};
use crate::error::Result;
use crate::util::io::read_up_to;

use std::io::{Read, Seek, SeekFrom};

use byteorder::{BigEndian, ReadBytesExt};

/// A reader for MP4 atoms
///
/// This is a wrapper around a reader that provides:
///
/// * [`Self::next`] to read atoms.
/// * `read_u*` methods to read integers without needing to specify the endianness.
/// * Bounds checking on reads and skips, so nothing is read past the end of the data.
pub(crate) struct AtomReader<R> {
	reader: R,
	pos: u64,
	len: u64,
}

impl<R> AtomReader<R>
where
	R: Read,
{
	/// Create a new `AtomReader` over the next `len` bytes of `reader`
	pub(crate) fn new(reader: R, len: u64) -> Self {
		Self {
			reader,
			pos: 0,
			len,
		}
	}

	/// The position, relative to where the reader was created
	pub(crate) fn position(&self) -> u64 {
		self.pos
	}

	pub(crate) fn remaining(&self) -> u64 {
		self.len - self.pos
	}

	pub(crate) fn read_u32(&mut self) -> std::io::Result<u32> {
		ReadBytesExt::read_u32::<BigEndian>(self)
	}

	pub(crate) fn read_u64(&mut self) -> std::io::Result<u64> {
		ReadBytesExt::read_u64::<BigEndian>(self)
	}

	/// Read the next atom
	///
	/// This will leave the reader at the beginning of the atom content. Returns `None` once too
	/// few bytes remain to hold an atom header.
	pub(crate) fn next(&mut self) -> Result<Option<AtomInfo>> {
		if self.remaining() < ATOM_HEADER_LEN {
			return Ok(None);
		}

		AtomInfo::read(self).map(Some)
	}

	/// Read the content of `atom`, which must be the last atom returned by [`Self::next`]
	pub(crate) fn read_content(&mut self, atom: &AtomInfo) -> Result<Vec<u8>> {
		read_up_to(self, atom.content_len())
	}
}

impl<R> AtomReader<R>
where
	R: Read + Seek,
{
	/// Skip to the end of `atom`
	pub(crate) fn skip_atom(&mut self, atom: &AtomInfo) -> Result<()> {
		self.skip(atom.end().saturating_sub(self.pos))
	}

	/// Move back `count` bytes, stopping at the start of the data
	pub(crate) fn step_back(&mut self, count: u64) -> Result<()> {
		let count = count.min(self.pos);
		self.reader.seek(SeekFrom::Current(-(count as i64)))?;
		self.pos -= count;

		Ok(())
	}

	/// Skip `count` bytes, stopping at the end of the data
	pub(crate) fn skip(&mut self, count: u64) -> Result<()> {
		let count = count.min(self.remaining());
		self.reader.seek(SeekFrom::Current(count as i64))?;
		self.pos += count;

		Ok(())
	}
}

impl<R> Read for AtomReader<R>
where
	R: Read,
{
	fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
		let max = usize::try_from(self.remaining()).unwrap_or(usize::MAX);
		let limit = buf.len().min(max);
		if limit == 0 {
			return Ok(0);
		}

		let read = self.reader.read(&mut buf[..limit])?;
		self.pos += read as u64;

		Ok(read)
	}
}
