use super::constants::{APE_FOOTER_SIZE, APE_PREAMBLE};
use crate::error::Result;
use crate::macros::decode_err;
use crate::util::num::u32_le;

/// An APE tag footer (or header, they share a layout)
///
/// | Field      | Size |
/// |------------|------|
/// | Preamble   | 8    |
/// | Version    | 4    |
/// | Tag size   | 4    |
/// | Item count | 4    |
/// | Flags      | 4    |
/// | Reserved   | 8    |
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct ApeFooter {
	pub(crate) version: u32,
	/// The size of the items and footer, excluding any header
	pub(crate) size: u32,
	pub(crate) item_count: u32,
	pub(crate) flags: u32,
}

impl ApeFooter {
	pub(crate) fn parse(footer: &[u8; APE_FOOTER_SIZE], stream_len: u64) -> Result<Self> {
		if &footer[..8] != APE_PREAMBLE {
			decode_err!(@BAIL Ape, "APE footer is missing its preamble");
		}

		let footer = Self {
			version: u32_le(&footer[8..]),
			size: u32_le(&footer[12..]),
			item_count: u32_le(&footer[16..]),
			flags: u32_le(&footer[20..]),
		};

		// The size includes the footer and all items
		if (footer.size as usize) < APE_FOOTER_SIZE {
			decode_err!(@BAIL Ape, "APE tag has an invalid size (< 32)");
		}

		if u64::from(footer.size) > stream_len {
			decode_err!(@BAIL Ape, "APE tag has an invalid size (> file size)");
		}

		if footer.item_count == 0 {
			decode_err!(@BAIL Ape, "APE tag has no items");
		}

		Ok(footer)
	}

	/// Whether the tag also starts with a header
	pub(crate) fn has_header(&self) -> bool {
		self.flags & 0x8000_0000 == 0x8000_0000
	}
}

#[cfg(test)]
mod tests {
	use super::ApeFooter;

	fn footer(size: u32, item_count: u32, flags: u32) -> [u8; 32] {
		let mut footer = [0; 32];
		footer[..8].copy_from_slice(b"APETAGEX");
		footer[8..12].copy_from_slice(&2000_u32.to_le_bytes());
		footer[12..16].copy_from_slice(&size.to_le_bytes());
		footer[16..20].copy_from_slice(&item_count.to_le_bytes());
		footer[20..24].copy_from_slice(&flags.to_le_bytes());
		footer
	}

	#[test_log::test]
	fn valid_footer() {
		let parsed = ApeFooter::parse(&footer(64, 2, 0x8000_0000), 1000).unwrap();

		assert_eq!(parsed.version, 2000);
		assert_eq!(parsed.size, 64);
		assert_eq!(parsed.item_count, 2);
		assert!(parsed.has_header());
	}

	#[test_log::test]
	fn invalid_footers() {
		assert!(ApeFooter::parse(&footer(16, 1, 0), 1000).is_err());
		assert!(ApeFooter::parse(&footer(64, 0, 0), 1000).is_err());
		assert!(ApeFooter::parse(&footer(2000, 1, 0), 1000).is_err());

		let mut bad_preamble = footer(64, 1, 0);
		bad_preamble[0] = b'B';
		assert!(ApeFooter::parse(&bad_preamble, 1000).is_err());
	}
}
