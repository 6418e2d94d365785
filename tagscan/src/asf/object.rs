use super::constants::OBJECT_HEADER_LEN;
use crate::error::Result;
use crate::macros::err;

use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};

/// The header shared by every ASF object
#[derive(Copy, Clone, Debug)]
pub(super) struct ObjectHeader {
	pub(super) guid: [u8; 16],
	/// The size of the object, including this header
	pub(super) size: u64,
}

impl ObjectHeader {
	pub(super) fn read<R>(reader: &mut R) -> Result<Self>
	where
		R: Read,
	{
		let mut guid = [0; 16];
		reader.read_exact(&mut guid)?;

		let size = reader.read_u64::<LittleEndian>()?;

		Ok(Self { guid, size })
	}

	pub(super) fn content_len(&self) -> u64 {
		self.size.saturating_sub(OBJECT_HEADER_LEN)
	}
}

/// Take the next `len` bytes of an object's content
pub(super) fn read_slice<'a>(reader: &mut Cursor<&'a [u8]>, len: usize) -> Result<&'a [u8]> {
	let start = reader.position() as usize;
	let data: &'a [u8] = reader.get_ref();

	let Some(slice) = start.checked_add(len).and_then(|end| data.get(start..end)) else {
		err!(SizeMismatch);
	};

	reader.set_position((start + len) as u64);
	Ok(slice)
}
