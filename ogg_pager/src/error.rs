use std::error::Error;
use std::fmt;

/// Alias for `Result<T, PageError>`
pub type Result<T> = std::result::Result<T, PageError>;

/// Errors that can occur while reading pages
#[derive(Debug)]
#[non_exhaustive]
pub enum PageError {
	/// The stream structure version isn't 0
	InvalidVersion,
	/// The segment table is empty
	BadSegmentCount,
	/// The page doesn't start with `OggS`
	MissingMagic,
	/// The stream ended inside a page or packet
	NotEnoughData {
		/// The declared page length, or the requested packet count
		expected: usize,
		/// What the stream actually held
		found: usize,
	},
	/// Any std::io::Error
	Io(std::io::Error),
}

impl PageError {
	/// Whether the page was structurally invalid, rather than cut short or unreadable
	///
	/// A reader can resynchronise after an invalid page by searching for the next capture
	/// pattern.
	pub fn is_invalid_page(&self) -> bool {
		matches!(
			self,
			Self::InvalidVersion | Self::BadSegmentCount | Self::MissingMagic
		)
	}
}

impl fmt::Display for PageError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::InvalidVersion => f.write_str("Page has a nonzero stream structure version"),
			Self::BadSegmentCount => f.write_str("Page has an empty segment table"),
			Self::MissingMagic => f.write_str("Page is missing its capture pattern"),
			Self::NotEnoughData { expected, found } => write!(
				f,
				"Stream ended early, expected {expected}, found {found}"
			),
			Self::Io(err) => write!(f, "{err}"),
		}
	}
}

impl Error for PageError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match self {
			Self::Io(err) => Some(err),
			_ => None,
		}
	}
}

impl From<std::io::Error> for PageError {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

#[cfg(test)]
mod tests {
	use super::PageError;

	#[test]
	fn invalid_pages() {
		assert!(PageError::MissingMagic.is_invalid_page());
		assert!(PageError::BadSegmentCount.is_invalid_page());

		let short = PageError::NotEnoughData {
			expected: 10,
			found: 4,
		};
		assert!(!short.is_invalid_page());
		assert_eq!(
			short.to_string(),
			"Stream ended early, expected 10, found 4"
		);
	}
}
