//! ID3v2 items
//!
//! Versions 2.2, 2.3 and 2.4 are read. Frames are mapped onto the common tag model:
//!
//! | Frames                          | Identifier                            |
//! |---------------------------------|---------------------------------------|
//! | `TIT2`, `TPE1`, `TALB`, ...     | Title, Artist, Album, ...             |
//! | `TRCK`, `TPOS`                  | Track/disc numbers and their totals   |
//! | `TCON`                          | Genre, with ID3v1 genre references    |
//! | `COMM`, `USLT`                  | Comment, UnsynchronisedLyrics         |
//! | `TXXX`                          | ReplayGain and MusicBrainz, or vendor |
//! | `APIC`                          | Images                                |
//!
//! ID3v2.2 frame IDs are upgraded with [`upgrade_v2`] first. Everything else is ignored.

pub(crate) mod frame;
pub(crate) mod header;
pub(crate) mod read;
mod restrictions;
pub mod util;

pub use frame::header::FrameFlags;
pub use header::{ExtendedHeader, Id3v2TagFlags, Id3v2Version};
pub use restrictions::{
	ImageSizeRestrictions, TagRestrictions, TagSizeRestrictions, TextSizeRestrictions,
};
pub use util::upgrade::upgrade_v2;
