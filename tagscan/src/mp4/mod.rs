//! MP4 specific items
//!
//! ## Item mapping
//!
//! Metadata is read from the `ilst` atom. Well known fourccs map to a
//! [`MetaTagIdentifier`](crate::tag::MetaTagIdentifier), freeform (`----`) atoms are kept as
//! [`TagIdentifier::Vendor`](crate::tag::TagIdentifier::Vendor) keyed by their name, and
//! anything else is skipped.
mod atom_info;
mod atom_reader;
mod ilst;
mod properties;
mod read;

pub use read::Mp4Reader;
