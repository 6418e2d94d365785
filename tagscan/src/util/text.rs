use crate::error::{ErrorKind, Result, TagError};

/// The text encoding marker used by ID3v2 frames
#[derive(Debug, Clone, Eq, PartialEq, Copy, Hash)]
#[repr(u8)]
pub enum TextEncoding {
	/// ISO-8859-1
	Latin1 = 0,
	/// UTF-16 with a byte order mark
	UTF16 = 1,
	/// UTF-16 big endian
	UTF16BE = 2,
	/// UTF-8
	UTF8 = 3,
}

impl TextEncoding {
	/// Get a `TextEncoding` from a u8, must be 0-3 inclusive
	pub fn from_u8(byte: u8) -> Option<Self> {
		Some(match byte {
			0 => Self::Latin1,
			1 => Self::UTF16,
			2 => Self::UTF16BE,
			3 => Self::UTF8,
			_ => return None,
		})
	}

	fn is_wide(self) -> bool {
		matches!(self, Self::UTF16 | Self::UTF16BE)
	}
}

/// The byte order of a UTF-16 string
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum Utf16Order {
	#[default]
	Little,
	Big,
}

impl Utf16Order {
	fn from_bom(bytes: &[u8]) -> Option<Self> {
		match bytes {
			[0xFF, 0xFE, ..] => Some(Self::Little),
			[0xFE, 0xFF, ..] => Some(Self::Big),
			_ => None,
		}
	}

	fn unit(self) -> fn([u8; 2]) -> u16 {
		match self {
			Self::Little => u16::from_le_bytes,
			Self::Big => u16::from_be_bytes,
		}
	}
}

/// A decoded string, along with the byte order a BOM (or the fallback) selected
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct DecodedText {
	pub(crate) text: String,
	pub(crate) order: Utf16Order,
}

/// Split `bytes` at the first NUL terminator of `encoding`
///
/// Returns the text before the terminator and everything after it. Without a terminator the
/// whole input is text. UTF-16 terminators are only matched on code unit boundaries.
pub(crate) fn split_terminated(bytes: &[u8], encoding: TextEncoding) -> (&[u8], &[u8]) {
	if encoding.is_wide() {
		let end = bytes
			.chunks_exact(2)
			.position(|unit| unit == [0, 0])
			.map(|units| units * 2);

		return match end {
			Some(end) => (&bytes[..end], &bytes[end + 2..]),
			None => (bytes, &[]),
		};
	}

	match bytes.iter().position(|&b| b == 0) {
		Some(end) => (&bytes[..end], &bytes[end + 1..]),
		None => (bytes, &[]),
	}
}

/// Decode a complete string
///
/// For [`TextEncoding::UTF16`], a leading BOM picks the byte order, otherwise `fallback` is
/// used. Trailing NULs are removed.
pub(crate) fn decode_text(
	bytes: &[u8],
	encoding: TextEncoding,
	fallback: Utf16Order,
) -> Result<DecodedText> {
	let mut order = fallback;

	let text = match encoding {
		TextEncoding::Latin1 => latin1_decode(bytes),
		TextEncoding::UTF8 => {
			let mut text = String::from_utf8(bytes.to_vec())?;
			text.truncate(text.trim_end_matches('\0').len());
			text
		},
		TextEncoding::UTF16BE => utf16_decode_bytes(bytes, u16::from_be_bytes)?,
		TextEncoding::UTF16 => {
			let mut units = bytes;
			if let Some(bom_order) = Utf16Order::from_bom(bytes) {
				order = bom_order;
				units = &bytes[2..];
			}

			utf16_decode_bytes(units, order.unit())?
		},
	};

	Ok(DecodedText { text, order })
}

/// Decode a NUL terminated string from the start of `bytes`, returning the remainder
pub(crate) fn decode_terminated(
	bytes: &[u8],
	encoding: TextEncoding,
) -> Result<(DecodedText, &[u8])> {
	let (text, rest) = split_terminated(bytes, encoding);
	let decoded = decode_text(text, encoding, Utf16Order::default())?;
	Ok((decoded, rest))
}

pub(crate) fn latin1_decode(bytes: &[u8]) -> String {
	let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |last| last + 1);
	bytes[..end].iter().copied().map(char::from).collect()
}

pub(crate) fn utf8_decode_str(bytes: &[u8]) -> Result<&str> {
	Ok(std::str::from_utf8(bytes)?.trim_end_matches('\0'))
}

/// Decode UTF-16 code units of a known byte order
///
/// Strings joined by NUL may each carry a BOM, those are dropped. An odd trailing byte is
/// ignored.
pub(crate) fn utf16_decode_bytes(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Result<String> {
	let units = bytes
		.chunks_exact(2)
		.filter(|pair| !matches!(pair, [0xFF, 0xFE] | [0xFE, 0xFF]))
		.map(|pair| unit([pair[0], pair[1]]));

	let mut text = char::decode_utf16(units)
		.collect::<std::result::Result<String, _>>()
		.map_err(|_| TagError::new(ErrorKind::TextDecode("Given an invalid UTF-16 string")))?;

	text.truncate(text.trim_end_matches('\0').len());
	Ok(text)
}

/// Strip the NUL and space padding most containers leave around values
pub(crate) fn trim_padding(text: &str) -> &str {
	text.trim_matches(|c| c == '\0' || c == ' ')
}

#[cfg(test)]
mod tests {
	use super::{TextEncoding, Utf16Order, decode_terminated, decode_text, split_terminated};

	const LOFT: &str = "l\u{00f8}ft\u{00a5}";
	const LOFT_BE: [u8; 12] = [
		0x00, 0x6C, 0x00, 0xF8, 0x00, 0x66, 0x00, 0x74, 0x00, 0xA5, 0x00, 0x00,
	];

	#[test_log::test]
	fn utf16_byte_orders() {
		let plain = super::utf16_decode_bytes(&LOFT_BE, u16::from_be_bytes).unwrap();
		assert_eq!(plain, LOFT);

		let mut with_bom = vec![0xFE, 0xFF];
		with_bom.extend(LOFT_BE);
		let big = decode_text(&with_bom, TextEncoding::UTF16, Utf16Order::Little).unwrap();
		assert_eq!(big.text, LOFT);
		assert_eq!(big.order, Utf16Order::Big);

		let le: Vec<u8> = LOFT_BE.chunks(2).flat_map(|c| [c[1], c[0]]).collect();
		let little = decode_text(&le, TextEncoding::UTF16, Utf16Order::default()).unwrap();
		assert_eq!(little.text, LOFT);
		assert_eq!(little.order, Utf16Order::Little);
	}

	#[test_log::test]
	fn utf16_fallback_order() {
		let decoded =
			decode_text(&[0x00, 0x46, 0x00, 0x6F], TextEncoding::UTF16, Utf16Order::Big).unwrap();
		assert_eq!(decoded.text, "Fo");
		assert_eq!(decoded.order, Utf16Order::Big);
	}

	#[test_log::test]
	fn terminated() {
		let (decoded, rest) = decode_terminated(b"\x00Hello\x00", TextEncoding::UTF8).unwrap();
		assert!(decoded.text.is_empty());
		assert_eq!(rest, b"Hello\x00");

		// The terminator must sit on a code unit boundary
		let bytes = [0x41, 0x00, 0x00, 0x42, 0x00, 0x00, 0xFF];
		let (text, rest) = split_terminated(&bytes, TextEncoding::UTF16);
		assert_eq!(text, &bytes[..4]);
		assert_eq!(rest, &[0xFF]);
	}

	#[test_log::test]
	fn invalid_utf8() {
		assert!(decode_text(&[0xC3, 0x28], TextEncoding::UTF8, Utf16Order::default()).is_err());
	}

	#[test_log::test]
	fn latin1() {
		assert_eq!(super::latin1_decode(&[0x48, 0xE9, 0x00, 0x00]), "H\u{e9}");
		assert_eq!(super::trim_padding("\0 Title  \0\0"), "Title");
	}
}
