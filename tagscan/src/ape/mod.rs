//! APEv2 items
//!
//! APE tags are most often found at the end of Monkey's Audio files, but can be appended to
//! other formats as well.
//!
//! ## Item mapping
//!
//! Keys are matched case-insensitively. Binary `Cover Art (Front)` items become an
//! [`AudioImage`](crate::picture::AudioImage), other binary items are ignored, and unrecognised
//! text items are kept as [`TagIdentifier::Vendor`](crate::tag::TagIdentifier::Vendor).

mod constants;
mod header;
mod read;

pub use read::ApeReader;
