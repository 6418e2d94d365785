//! Bounds-checked integer decoding from byte slices
//!
//! Every function reads from the start of `bytes`, and returns `0` when fewer bytes than
//! required are available. Extra trailing bytes are ignored.

use crate::id3::v2::util::synchsafe::SynchsafeInteger;

use byteorder::{BigEndian, ByteOrder, LittleEndian};

macro_rules! impl_decoders {
	($($name:ident => $ty:ty, $len:literal, $order:ident::$method:ident;)+) => {
		$(
			#[doc = concat!("Decode a `", stringify!($ty), "` (", stringify!($order), ", ", stringify!($len), " bytes)")]
			pub fn $name(bytes: &[u8]) -> $ty {
				match bytes.get(..$len) {
					Some(bytes) => $order::$method(bytes),
					None => 0,
				}
			}
		)+
	};
}

impl_decoders! {
	u16_be => u16, 2, BigEndian::read_u16;
	u24_be => u32, 3, BigEndian::read_u24;
	u32_be => u32, 4, BigEndian::read_u32;
	u64_be => u64, 8, BigEndian::read_u64;
	u16_le => u16, 2, LittleEndian::read_u16;
	u32_le => u32, 4, LittleEndian::read_u32;
	u64_le => u64, 8, LittleEndian::read_u64;
}

/// Decode a 28-bit synchsafe integer from 4 bytes
///
/// Only the low 7 bits of each byte are used, most significant byte first.
///
/// # Examples
///
/// ```rust
/// use tagscan::util::num::synchsafe_u32;
///
/// assert_eq!(synchsafe_u32(&[0x00, 0x00, 0x02, 0x01]), 257);
/// assert_eq!(synchsafe_u32(&[0x7F, 0x7F, 0x7F, 0x7F]), 0x0FFF_FFFF);
/// assert_eq!(synchsafe_u32(&[0x01]), 0);
/// ```
pub fn synchsafe_u32(bytes: &[u8]) -> u32 {
	u32_be(bytes).unsynch()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test_log::test]
	fn big_endian() {
		assert_eq!(u16_be(&[0x12, 0x34]), 0x1234);
		assert_eq!(u24_be(&[0x12, 0x34, 0x56]), 0x12_3456);
		assert_eq!(u32_be(&[0x12, 0x34, 0x56, 0x78, 0x9A]), 0x1234_5678);
		assert_eq!(u64_be(&[0, 0, 0, 0, 0, 0, 1, 0]), 256);
	}

	#[test_log::test]
	fn little_endian() {
		assert_eq!(u16_le(&[0x34, 0x12]), 0x1234);
		assert_eq!(u32_le(&[0x78, 0x56, 0x34, 0x12]), 0x1234_5678);
		assert_eq!(u64_le(&[0, 1, 0, 0, 0, 0, 0, 0]), 256);
	}

	#[test_log::test]
	fn short_input_is_zero() {
		assert_eq!(u16_be(&[0xFF]), 0);
		assert_eq!(u24_be(&[0xFF, 0xFF]), 0);
		assert_eq!(u32_le(&[0xFF, 0xFF, 0xFF]), 0);
		assert_eq!(u64_le(&[]), 0);
		assert_eq!(synchsafe_u32(&[0x7F, 0x7F, 0x7F]), 0);
	}

	#[test_log::test]
	fn synchsafe() {
		// 0b0000001_0000000 = 128
		assert_eq!(synchsafe_u32(&[0, 0, 0x01, 0x00]), 128);
		// The high bit of each byte is ignored
		assert_eq!(synchsafe_u32(&[0x80, 0x80, 0x81, 0x80]), 128);
	}
}
