//! ID3v1 items
//!
//! ID3v1 is a fixed 128 byte block at the end of the file:
//!
//! | Field   | Size | Notes                                                   |
//! |---------|------|---------------------------------------------------------|
//! | Marker  | 3    | `TAG`                                                   |
//! | Title   | 30   |                                                         |
//! | Artist  | 30   |                                                         |
//! | Album   | 30   |                                                         |
//! | Year    | 4    |                                                         |
//! | Comment | 30   | ID3v1.1: 28 bytes, a NUL, and the track number          |
//! | Genre   | 1    | An index into [`GENRES`], 255 for none                  |
//!
//! All text is Latin-1, padded with NULs or spaces.

pub(crate) mod constants;
pub(crate) mod read;

pub use constants::GENRES;
