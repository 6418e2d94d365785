use crate::error::Result;
use crate::macros::decode_err;
use crate::util::io::read_up_to;

use std::io::{Read, Seek, SeekFrom};

use byteorder::{BigEndian, ReadBytesExt};

pub(super) const BLOCK_ID_STREAMINFO: u8 = 0;
pub(super) const BLOCK_ID_VORBIS_COMMENTS: u8 = 4;
pub(super) const BLOCK_ID_PICTURE: u8 = 6;

/// A metadata block
///
/// The content is only read when the predicate accepts the block type, otherwise it is skipped.
pub(super) struct Block {
	pub(super) ty: u8,
	pub(super) last: bool,
	pub(super) content: Vec<u8>,
}

impl Block {
	pub(super) fn read<R, P>(data: &mut R, predicate: P) -> Result<Self>
	where
		R: Read + Seek,
		P: FnOnce(u8) -> bool,
	{
		let byte = data.read_u8()?;
		let last = (byte & 0x80) != 0;
		let ty = byte & 0x7F;

		let size = data.read_u24::<BigEndian>()?;
		log::trace!("FLAC: Reading block, type: {ty}, size: {size}");

		let content = if predicate(ty) {
			let content = read_up_to(data, u64::from(size))?;
			if content.len() != size as usize {
				decode_err!(@BAIL Flac, "Block extends past the end of the stream");
			}

			content
		} else {
			data.seek(SeekFrom::Current(i64::from(size)))?;
			Vec::new()
		};

		Ok(Self { ty, last, content })
	}
}
