use crate::config::CancellationToken;

/// Per-read options
///
/// # Examples
///
/// ```rust
/// use tagscan::config::ParseOptions;
///
/// // Tags only, and tolerate more leading garbage
/// let options = ParseOptions::new().read_cover_art(false).max_junk_bytes(4096);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct ParseOptions {
	pub(crate) read_cover_art: bool,
	pub(crate) max_junk_bytes: usize,
	pub(crate) cancellation: Option<CancellationToken>,
}

impl Default for ParseOptions {
	fn default() -> Self {
		Self::new()
	}
}

impl ParseOptions {
	/// How far detection searches past the start of a stream by default
	pub const DEFAULT_MAX_JUNK_BYTES: usize = 1024;

	/// Cover art enabled, a [`DEFAULT_MAX_JUNK_BYTES`](Self::DEFAULT_MAX_JUNK_BYTES) window,
	/// and no cancellation
	#[must_use]
	pub const fn new() -> Self {
		Self {
			read_cover_art: true,
			max_junk_bytes: Self::DEFAULT_MAX_JUNK_BYTES,
			cancellation: None,
		}
	}

	/// Decode embedded images into [`MetaTagIdentifier::Images`](crate::tag::MetaTagIdentifier::Images)
	///
	/// When disabled, image items are skipped without being decoded.
	#[must_use]
	pub fn read_cover_art(mut self, read_cover_art: bool) -> Self {
		self.read_cover_art = read_cover_art;
		self
	}

	/// How many bytes may precede the audio before detection gives up
	///
	/// This covers garbage ahead of MPEG frames, and ahead of an ID3v2 tag read by
	/// [`MpegReader`](crate::mpeg::MpegReader).
	#[must_use]
	pub fn max_junk_bytes(mut self, max_junk_bytes: usize) -> Self {
		self.max_junk_bytes = max_junk_bytes;
		self
	}

	/// Stop reading once `token` is cancelled, keeping the tags found so far
	///
	/// # Examples
	///
	/// ```rust
	/// use tagscan::config::{CancellationToken, ParseOptions};
	///
	/// let token = CancellationToken::new();
	/// let options = ParseOptions::new().cancellation(token.clone());
	///
	/// // From another thread, for example
	/// token.cancel();
	/// ```
	#[must_use]
	pub fn cancellation(mut self, token: CancellationToken) -> Self {
		self.cancellation = Some(token);
		self
	}

	pub(crate) fn is_cancelled(&self) -> bool {
		self.cancellation
			.as_ref()
			.is_some_and(CancellationToken::is_cancelled)
	}
}

#[cfg(test)]
mod tests {
	use crate::config::{CancellationToken, ParseOptions};

	#[test_log::test]
	fn cancellation_shared_between_clones() {
		let token = CancellationToken::new();
		let options = ParseOptions::new().cancellation(token.clone());
		let cloned = options.clone();

		assert!(!options.is_cancelled());
		token.cancel();
		assert!(options.is_cancelled());
		assert!(cloned.is_cancelled());

		assert!(!ParseOptions::new().is_cancelled());
	}
}
