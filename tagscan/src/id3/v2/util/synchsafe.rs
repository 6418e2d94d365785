//! Utilities for working with synchsafe integers and unsynchronized ID3v2 content
//!
//! ID3v2 avoids false MPEG frame syncs in two ways. Sizes are stored as synchsafe integers,
//! where only the low 7 bits of each byte are used. Tag and frame content may be
//! "unsynchronized", where every `0xFF` byte that could start a sync is followed by an
//! inserted `0x00`.

/// Undo ID3v2 unsynchronisation
///
/// Every `0x00` directly following a `0xFF` is dropped.
///
/// # Examples
///
/// ```rust
/// use tagscan::id3::v2::util::synchsafe::resynchronise;
///
/// let content = [0xFF, 0x00, 0x1A, 0xFF, 0x00, 0x15];
/// assert_eq!(resynchronise(&content), [0xFF, 0x1A, 0xFF, 0x15]);
/// ```
pub fn resynchronise(content: &[u8]) -> Vec<u8> {
	let mut restored = Vec::with_capacity(content.len());
	let mut after_ff = false;

	for &byte in content {
		if after_ff && byte == 0 {
			after_ff = false;
			continue;
		}

		restored.push(byte);
		after_ff = byte == 0xFF;
	}

	restored
}

/// An integer stored in synchsafe form
pub trait SynchsafeInteger: Sized {
	/// Recover the plain value from a synchsafe integer
	///
	/// The MSB of every byte is ignored, and the remaining 7-bit groups are packed together.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagscan::id3::v2::util::synchsafe::SynchsafeInteger;
	///
	/// // Each byte has 7 set bits and an MSB of 0
	/// let synch_number = 0b01111111_01111111_01111111_01111111_u32;
	/// assert_eq!(synch_number.unsynch(), 0xFFF_FFFF);
	/// ```
	fn unsynch(self) -> Self;
}

macro_rules! impl_synchsafe {
	($($ty:ty),+) => {
		$(
			impl SynchsafeInteger for $ty {
				fn unsynch(self) -> Self {
					let mut value: $ty = 0;
					for byte_index in (0..core::mem::size_of::<$ty>()).rev() {
						let group = (self >> (byte_index * 8)) & 0x7F;
						value = (value << 7) | group;
					}

					value
				}
			}
		)+
	};
}

impl_synchsafe!(u16, u32, u64);

#[cfg(test)]
mod tests {
	use super::{SynchsafeInteger, resynchronise};

	#[test_log::test]
	fn resynchronised_pairs() {
		let content = [0xFF, 0x00, 0x00, 0xFF, 0x12, 0xB0, 0x05, 0xFF, 0x00, 0x00];
		assert_eq!(
			resynchronise(&content),
			[0xFF, 0x00, 0xFF, 0x12, 0xB0, 0x05, 0xFF, 0x00]
		);

		// Only the first zero of `FF 00 00` was inserted
		assert_eq!(resynchronise(&[0xFF, 0x00, 0x00]), [0xFF, 0x00]);
		assert_eq!(resynchronise(&[0xFF, 0xFF, 0x00]), [0xFF, 0xFF]);
	}

	#[test_log::test]
	fn other_bytes_untouched() {
		let content = [0xFF, 0x1A, 0xFF, 0xC0, 0x10, 0x01, 0x00];
		assert_eq!(resynchronise(&content), content);
	}

	macro_rules! unsynch_tests {
		($($ty:ty => $synchsafe:literal, $plain:literal);+ $(;)?) => {
			$(
				paste::paste! {
					#[test_log::test]
					fn [<$ty _unsynch>]() {
						assert_eq!($synchsafe.unsynch(), $plain);
					}
				}
			)+
		};
	}

	unsynch_tests! {
		u16 => 0x7F7F_u16, 0x3FFF_u16;
		u32 => 0x7F7F_7F7F_u32, 0xFFF_FFFF_u32;
		u64 => 0x7F_7F7F_7F7F_u64, 0x7_FFFF_FFFF_u64;
	}

	#[test_log::test]
	fn msb_ignored() {
		assert_eq!(0x0000_0201_u32.unsynch(), 257);
		assert_eq!(0x8080_8080_u32.unsynch(), 0);
	}
}
