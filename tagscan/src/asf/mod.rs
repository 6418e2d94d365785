//! Items for ASF (WMA)
//!
//! ## File notes
//!
//! ASF files are a sequence of objects, each a GUID followed by a little endian size. The
//! metadata objects are children of the Header Object at the start of the file.

mod constants;
mod content;
mod object;
mod picture;
mod properties;
mod read;

pub use read::AsfReader;
