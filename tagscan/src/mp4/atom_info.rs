use super::atom_reader::AtomReader;
use crate::error::Result;

use std::io::Read;

pub(super) const ATOM_HEADER_LEN: u64 = 8;

/// An atom header, with the reader left at the start of its content
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct AtomInfo {
	pub(crate) start: u64,
	/// The full length, including the header
	pub(crate) len: u64,
	pub(crate) header_len: u64,
	pub(crate) ident: [u8; 4],
}

impl AtomInfo {
	/// Read an atom header
	///
	/// * A size of 0 means the atom extends to the end of the reader
	/// * A size of 1 means a 64-bit size follows the identifier
	///
	/// Sizes too small to hold the header are treated as an empty atom, and sizes past the end of
	/// the reader are clamped to it.
	pub(crate) fn read<R>(reader: &mut AtomReader<R>) -> Result<Self>
	where
		R: Read,
	{
		let start = reader.position();
		let remaining = reader.remaining();

		let len_raw = u64::from(reader.read_u32()?);

		let mut ident = [0; 4];
		reader.read_exact(&mut ident)?;

		let (mut len, header_len) = match len_raw {
			// The atom extends to the end of the reader
			0 => (remaining, ATOM_HEADER_LEN),
			// There's an extended length
			1 => (reader.read_u64()?, ATOM_HEADER_LEN + 8),
			_ => (len_raw, ATOM_HEADER_LEN),
		};

		if len < header_len {
			log::warn!(
				"MP4: Atom {:?} has an invalid length ({len}), skipping its header",
				ident.escape_ascii().to_string()
			);
			len = header_len;
		}

		if len > remaining {
			log::warn!(
				"MP4: Atom {:?} extends past its parent, truncating",
				ident.escape_ascii().to_string()
			);
			len = remaining.max(header_len);
		}

		Ok(Self {
			start,
			len,
			header_len,
			ident,
		})
	}

	pub(crate) fn content_len(&self) -> u64 {
		self.len - self.header_len
	}

	pub(crate) fn end(&self) -> u64 {
		self.start + self.len
	}
}
