use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A shareable signal to stop reading early
///
/// Readers check the token between discrete steps (frames, items, atoms, pages, objects).
/// Once cancelled, they stop and return whatever was decoded so far. Cancellation is not
/// an error.
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
/// assert!(token.is_cancelled());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
	cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
	/// Create a new, uncancelled token
	pub fn new() -> Self {
		Self::default()
	}

	/// Signal every holder of this token to stop
	pub fn cancel(&self) {
		self.cancelled.store(true, Ordering::Relaxed);
	}

	/// Whether [`CancellationToken::cancel`] has been called
	pub fn is_cancelled(&self) -> bool {
		self.cancelled.load(Ordering::Relaxed)
	}
}

impl PartialEq for CancellationToken {
	fn eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.cancelled, &other.cancelled)
	}
}

impl Eq for CancellationToken {}
