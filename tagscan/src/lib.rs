//! Read-only extraction of audio metadata.
//!
//! Tags are decoded from ID3v1, ID3v2 (v2.2, v2.3 and v2.4), APEv2, MP4 `ilst` atoms, Ogg
//! Vorbis/Opus comments, FLAC metadata blocks and ASF content descriptions, and normalised into
//! a single [`TagSet`](tag::TagSet) keyed by [`MetaTagIdentifier`](tag::MetaTagIdentifier).
//! Keys without a canonical meaning are kept as [`TagIdentifier::Vendor`](tag::TagIdentifier::Vendor).
//!
//! Reading never fails on malformed data. A file that doesn't match its format gives an empty
//! set, and a truncated or corrupt one gives everything decoded before the damage. Only IO
//! failures surface as errors.
//!
//! # Examples
//!
//! ## Reading a file of any format
//!
//! ```rust,no_run
//! # fn main() -> tagscan::error::Result<()> {
//! use tagscan::config::ParseOptions;
//! use tagscan::tag::MetaTagIdentifier;
//!
//! // The format is detected from the content, falling back to the extension
//! let tags = tagscan::read_all_tags("song.mp3", &ParseOptions::new())?;
//!
//! if let Some(title) = tags.text(MetaTagIdentifier::Title) {
//! 	println!("Title: {title}");
//! }
//!
//! // Only the embedded images
//! let images = tagscan::read_images("song.flac", &ParseOptions::new())?;
//! println!("{} images", images.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Using a concrete reader
//!
//! ```rust
//! # fn main() -> tagscan::error::Result<()> {
//! use std::io::Cursor;
//! use tagscan::config::ParseOptions;
//! use tagscan::mpeg::MpegReader;
//! use tagscan::reader::TagReader;
//! use tagscan::tag::MetaTagIdentifier;
//!
//! let mut id3v1 = b"TAG".to_vec();
//! id3v1.extend(b"Title".iter().copied().chain(std::iter::repeat(0)).take(30));
//! id3v1.extend([0; 94]);
//! id3v1.push(255);
//!
//! let tags = MpegReader::read_from(&mut Cursor::new(id3v1), &ParseOptions::new())?;
//! assert_eq!(tags.text(MetaTagIdentifier::Title), Some("Title"));
//! # Ok(())
//! # }
//! ```
//!
//! # Important format-specific notes
//!
//! Every format module documents what is read from it, and how conflicting values within a
//! file are resolved.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod config;
pub mod error;
pub mod file;
pub(crate) mod macros;
pub mod picture;
pub mod probe;
pub mod properties;
pub mod reader;
pub mod tag;
pub mod util;

pub mod ape;
pub mod asf;
pub mod flac;
pub mod id3;
pub mod mp4;
pub mod mpeg;
pub mod ogg;

pub use crate::reader::{TagReader, read_all_tags, read_audio_tags, read_images, read_tag};
