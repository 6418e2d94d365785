use crate::picture::AudioImage;

/// The value of a tag
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TagValue {
	/// UTF-8 text
	Text(String),
	/// A number, such as a track number
	Integer(i32),
	/// A flag, such as the compilation flag
	Boolean(bool),
	/// Binary data without a known meaning
	Binary(Vec<u8>),
	/// Embedded images, in file order
	Images(Vec<AudioImage>),
}

impl TagValue {
	/// Returns the value if the variant is `Text`
	pub fn text(&self) -> Option<&str> {
		match self {
			Self::Text(text) => Some(text),
			_ => None,
		}
	}

	/// Returns the value if the variant is `Integer`
	pub fn integer(&self) -> Option<i32> {
		match self {
			Self::Integer(number) => Some(*number),
			_ => None,
		}
	}

	/// Returns the value if the variant is `Boolean`
	pub fn boolean(&self) -> Option<bool> {
		match self {
			Self::Boolean(flag) => Some(*flag),
			_ => None,
		}
	}

	/// Returns the value if the variant is `Binary`
	pub fn binary(&self) -> Option<&[u8]> {
		match self {
			Self::Binary(bin) => Some(bin),
			_ => None,
		}
	}

	/// Returns the value if the variant is `Images`
	pub fn images(&self) -> Option<&[AudioImage]> {
		match self {
			Self::Images(images) => Some(images),
			_ => None,
		}
	}
}

/// Parse the leading number of a value such as `3/12`, `TAG:07` or `120.5`
///
/// Leading whitespace and a case-insensitive `TAG:` prefix are skipped, and everything
/// after the first run of digits is ignored.
pub(crate) fn parse_leading_number(text: &str) -> Option<i32> {
	let mut text = text.trim_start();
	if let Some(rest) = text
		.get(..4)
		.filter(|prefix| prefix.eq_ignore_ascii_case("TAG:"))
		.and_then(|_| text.get(4..))
	{
		text = rest.trim_start();
	}

	let digits_end = text
		.find(|c: char| !c.is_ascii_digit())
		.unwrap_or(text.len());

	text[..digits_end].parse().ok()
}

/// Split a `number/total` pair, accepting `/` and `\` as separators
pub(crate) fn split_number_pair(text: &str) -> (Option<i32>, Option<i32>) {
	match text.split_once(['/', '\\']) {
		Some((number, total)) => (parse_leading_number(number), parse_leading_number(total)),
		None => (parse_leading_number(text), None),
	}
}

pub(crate) fn parse_boolean(text: &str) -> Option<bool> {
	match text.trim() {
		"1" => Some(true),
		"0" => Some(false),
		other if other.eq_ignore_ascii_case("true") => Some(true),
		other if other.eq_ignore_ascii_case("false") => Some(false),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::{parse_boolean, parse_leading_number, split_number_pair};

	#[test_log::test]
	fn leading_numbers() {
		assert_eq!(parse_leading_number("7"), Some(7));
		assert_eq!(parse_leading_number(" 07 "), Some(7));
		assert_eq!(parse_leading_number("TAG:12"), Some(12));
		assert_eq!(parse_leading_number("tag: 3"), Some(3));
		assert_eq!(parse_leading_number("120.5"), Some(120));
		assert_eq!(parse_leading_number("A1"), None);
		assert_eq!(parse_leading_number(""), None);
	}

	#[test_log::test]
	fn number_pairs() {
		assert_eq!(split_number_pair("3/12"), (Some(3), Some(12)));
		assert_eq!(split_number_pair("1\\2"), (Some(1), Some(2)));
		assert_eq!(split_number_pair("5"), (Some(5), None));
		assert_eq!(split_number_pair("/9"), (None, Some(9)));
	}

	#[test_log::test]
	fn booleans() {
		assert_eq!(parse_boolean("1"), Some(true));
		assert_eq!(parse_boolean("TRUE"), Some(true));
		assert_eq!(parse_boolean("false"), Some(false));
		assert_eq!(parse_boolean("yes"), None);
	}
}
