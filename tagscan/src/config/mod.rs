//! Various configuration options to control tagscan

mod cancellation;
mod global_options;
mod parse_options;

pub use cancellation::CancellationToken;
pub use global_options::{GlobalOptions, apply_global_options};
pub use parse_options::ParseOptions;

pub(crate) use global_options::global_options;
