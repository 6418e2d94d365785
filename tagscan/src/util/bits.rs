//! Bit-level access to header bytes
//!
//! Bits are indexed from the most significant bit of the first byte. For a 32-bit MPEG frame
//! header, bit 11 is therefore the fourth bit of the second byte.

/// Split a byte into its bits, most significant first
///
/// # Examples
///
/// ```rust
/// use tagscan::util::bits::to_bits;
///
/// assert_eq!(
/// 	to_bits(0b1010_0001),
/// 	[true, false, true, false, false, false, false, true]
/// );
/// ```
pub fn to_bits(byte: u8) -> [bool; 8] {
	let mut bits = [false; 8];
	for (i, bit) in bits.iter_mut().enumerate() {
		*bit = (byte >> (7 - i)) & 1 == 1;
	}

	bits
}

/// A read-only view over a byte sequence, addressed by bit
///
/// Every accessor is bounds-checked and returns `None` past the end of the data.
///
/// # Examples
///
/// ```rust
/// use tagscan::util::bits::BitDecoder;
///
/// let header = [0xFF, 0xFB, 0x90, 0x40];
/// let bits = BitDecoder::from_bytes(&header);
///
/// // Frame sync
/// assert_eq!(bits.field(0, 11), Some(0x7FF));
/// // Version bits
/// assert_eq!(bits.field(11, 2), Some(0b11));
/// assert_eq!(bits.bit(32), None);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BitDecoder<'a> {
	bytes: &'a [u8],
}

impl<'a> BitDecoder<'a> {
	/// Create a `BitDecoder` over `bytes`
	pub fn from_bytes(bytes: &'a [u8]) -> Self {
		Self { bytes }
	}

	/// Create a `BitDecoder` over a single byte
	pub fn from_byte(byte: &'a u8) -> Self {
		Self {
			bytes: std::slice::from_ref(byte),
		}
	}

	/// The number of addressable bits
	pub fn len(&self) -> usize {
		self.bytes.len() * 8
	}

	/// Whether there are no bits at all
	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}

	/// Get the bit at `index`
	pub fn bit(&self, index: usize) -> Option<bool> {
		let byte = self.bytes.get(index / 8)?;
		Some((byte >> (7 - (index % 8))) & 1 == 1)
	}

	/// Pack `len` consecutive bits starting at `start` into an integer, most significant first
	///
	/// `len` must be at most 32, anything larger (or a range past the end) returns `None`.
	pub fn field(&self, start: usize, len: usize) -> Option<u32> {
		if len > 32 || start.checked_add(len)? > self.len() {
			return None;
		}

		let mut value = 0u32;
		for index in start..start + len {
			value = (value << 1) | u32::from(self.bit(index)?);
		}

		Some(value)
	}
}
