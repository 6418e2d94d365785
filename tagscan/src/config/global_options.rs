use std::cell::Cell;

thread_local! {
	static THREAD_OPTIONS: Cell<GlobalOptions> = const { Cell::new(GlobalOptions::new()) };
}

/// The options in effect for reads on the current thread
pub(crate) fn global_options() -> GlobalOptions {
	THREAD_OPTIONS.get()
}

/// Limits shared by every read on the current thread
///
/// Unlike [`ParseOptions`](crate::config::ParseOptions), these aren't passed to each read.
/// They guard against corrupt size fields, so they rarely need changing.
///
/// # Examples
///
/// ```rust
/// use tagscan::config::{GlobalOptions, apply_global_options};
///
/// // Allow embedded scans of up to 64 MiB
/// apply_global_options(GlobalOptions::new().allocation_limit(64 * 1024 * 1024));
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct GlobalOptions {
	pub(crate) allocation_limit: usize,
}

impl GlobalOptions {
	/// Default cap on the size of a single tag item, 16 MiB
	pub const DEFAULT_ALLOCATION_LIMIT: usize = 16 * 1024 * 1024;

	/// Creates a new `GlobalOptions` with the defaults
	#[must_use]
	pub const fn new() -> Self {
		Self {
			allocation_limit: Self::DEFAULT_ALLOCATION_LIMIT,
		}
	}

	/// The largest number of bytes any single tag item may claim
	///
	/// Items above the limit are treated as malformed, keeping whatever was decoded before them.
	#[must_use]
	pub const fn allocation_limit(mut self, allocation_limit: usize) -> Self {
		self.allocation_limit = allocation_limit;
		self
	}
}

impl Default for GlobalOptions {
	fn default() -> Self {
		Self::new()
	}
}

/// Replaces the [`GlobalOptions`] of the current thread
pub fn apply_global_options(options: GlobalOptions) {
	THREAD_OPTIONS.set(options);
}
