//! Helpers for reading from file-like objects

use crate::config::global_options;
use crate::error::Result;
use crate::macros::err;

use std::io::{Read, Seek, SeekFrom};

// TODO: Replace with `Seek::stream_len` once it is stabilized (rust-lang/rust#59359)
pub(crate) trait SeekStreamLen: Seek {
	fn stream_len_hack(&mut self) -> Result<u64> {
		let current_pos = self.stream_position()?;
		let len = self.seek(SeekFrom::End(0))?;

		self.seek(SeekFrom::Start(current_pos))?;

		Ok(len)
	}
}

impl<T> SeekStreamLen for T where T: Seek {}

/// Read up to `len` bytes, stopping early at EOF
///
/// Unlike `read_exact`, a short read is not an error. The returned buffer is as long as the
/// data that was actually available.
///
/// Lengths above [`GlobalOptions::allocation_limit`](crate::config::GlobalOptions::allocation_limit)
/// fail with [`TooMuchData`](crate::error::ErrorKind::TooMuchData).
pub(crate) fn read_up_to<R>(reader: &mut R, len: u64) -> Result<Vec<u8>>
where
	R: Read,
{
	if len > global_options().allocation_limit as u64 {
		err!(TooMuchData);
	}

	let mut content = Vec::new();
	reader.take(len).read_to_end(&mut content)?;
	Ok(content)
}

#[cfg(test)]
mod tests {
	use super::{SeekStreamLen, read_up_to};

	use std::io::{Cursor, Seek, SeekFrom};

	#[test_log::test]
	fn stream_len_keeps_position() {
		let mut reader = Cursor::new(vec![0u8; 100]);
		reader.seek(SeekFrom::Start(40)).unwrap();

		assert_eq!(reader.stream_len_hack().unwrap(), 100);
		assert_eq!(reader.stream_position().unwrap(), 40);
	}

	#[test_log::test]
	fn short_read() {
		let mut reader = Cursor::new(vec![1u8; 10]);
		assert_eq!(read_up_to(&mut reader, 4).unwrap(), [1; 4]);
		assert_eq!(read_up_to(&mut reader, 100).unwrap().len(), 6);
	}

	#[test_log::test]
	fn over_allocation_limit() {
		let mut reader = Cursor::new(Vec::new());
		assert!(read_up_to(&mut reader, u64::MAX).is_err());
	}
}
