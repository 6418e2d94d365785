//! Items for FLAC
//!
//! ## File notes
//!
//! FLAC stores its tags in a `VORBIS_COMMENT` metadata block, decoded the same way as the
//! Ogg comment header, and its images in `PICTURE` blocks.

mod block;
mod properties;
mod read;

pub use read::FlacReader;
