//! Items for Ogg Vorbis and Ogg Opus
//!
//! ## File notes
//!
//! Pages are read with [`ogg_pager`], and only the start of the first logical bitstream is
//! inspected: the identification header for the [`AudioProperties`](crate::properties::AudioProperties),
//! and the comment header for the tags. The comment block decoder is shared with FLAC.

mod constants;
mod properties;
pub(crate) mod read;
mod stream;
mod vorbis;

pub use vorbis::VorbisReader;
