use std::fmt::{Display, Formatter};

macro_rules! meta_tag_identifiers {
	(
		$(
			$(#[$meta:meta])*
			$variant:ident => $name:literal, $kind:ident
		),+ $(,)?
	) => {
		/// A format-independent tag key
		///
		/// Every reader maps the keys of its own format onto these.
		#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
		#[non_exhaustive]
		pub enum MetaTagIdentifier {
			$(
				$(#[$meta])*
				$variant,
			)+
		}

		impl MetaTagIdentifier {
			/// The stable display name of the identifier
			///
			/// # Examples
			///
			/// ```rust
			/// use tagscan::tag::MetaTagIdentifier;
			///
			/// assert_eq!(MetaTagIdentifier::AlbumArtist.as_str(), "AlbumArtist");
			/// ```
			pub fn as_str(self) -> &'static str {
				match self {
					$(Self::$variant => $name,)+
				}
			}

			pub(crate) fn kind(self) -> ValueKind {
				match self {
					$(Self::$variant => ValueKind::$kind,)+
				}
			}
		}
	};
}

/// The kind of [`TagValue`](crate::tag::TagValue) stored for an identifier
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum ValueKind {
	Text,
	Integer,
	Boolean,
	Images,
}

meta_tag_identifiers! {
	/// Track title
	Title => "Title", Text,
	/// Track artist
	Artist => "Artist", Text,
	/// Album title
	Album => "Album", Text,
	/// Album artist
	AlbumArtist => "AlbumArtist", Text,
	/// The year of recording
	RecordingYear => "RecordingYear", Text,
	/// A full recording date, or just the year
	RecordingDateOrYear => "RecordingDateOrYear", Text,
	/// Original release date of the album
	OrigAlbumDate => "OrigAlbumDate", Text,
	/// Original release year of the album
	OrigAlbumYear => "OrigAlbumYear", Text,
	/// Genre
	Genre => "Genre", Text,
	/// Comment
	Comment => "Comment", Text,
	/// Track number
	TrackNumber => "TrackNumber", Integer,
	/// Disc number
	DiscNumber => "DiscNumber", Integer,
	/// Composer
	Composer => "Composer", Text,
	/// Conductor
	Conductor => "Conductor", Text,
	/// Copyright message
	Copyright => "Copyright", Text,
	/// Whether the track is part of a compilation
	Compilation => "Compilation", Boolean,
	/// Beats per minute
	Bpm => "Bpm", Integer,
	/// ReplayGain track gain
	ReplayGainTrack => "ReplayGainTrack", Text,
	/// ReplayGain album gain
	ReplayGainAlbum => "ReplayGainAlbum", Text,
	/// Publisher or label
	Publisher => "Publisher", Text,
	/// The person or organisation that encoded the file
	EncodedBy => "EncodedBy", Text,
	/// The software used to encode the file
	EncodedWith => "EncodedWith", Text,
	/// Language of the lyrics
	Language => "Language", Text,
	/// Unsynchronised lyrics
	UnsynchronisedLyrics => "UnsynchronisedLyrics", Text,
	/// Synchronised lyrics
	SynchronisedLyrics => "SynchronisedLyrics", Text,
	/// Track subtitle
	SubTitle => "SubTitle", Text,
	/// MusicBrainz album ID
	MusicBrainzId => "MusicBrainzId", Text,
	/// Total number of tracks
	SongTotal => "SongTotal", Integer,
	/// Total number of discs
	DiscTotal => "DiscTotal", Integer,
	/// Embedded images
	Images => "Images", Images,
}

impl Display for MetaTagIdentifier {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A key in a [`TagSet`](crate::tag::TagSet)
///
/// Keys without a canonical mapping are preserved verbatim as `Vendor` keys.
///
/// # Examples
///
/// ```rust
/// use tagscan::tag::{MetaTagIdentifier, TagIdentifier};
///
/// let canonical = TagIdentifier::from(MetaTagIdentifier::Title);
/// let vendor = TagIdentifier::vendor("CATALOGNUMBER");
///
/// assert_eq!(vendor, TagIdentifier::vendor("CATALOGNUMBER"));
/// assert_ne!(canonical, vendor);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TagIdentifier {
	/// A format-independent key
	Canonical(MetaTagIdentifier),
	/// A format-specific key with no canonical mapping
	Vendor(String),
}

impl TagIdentifier {
	/// Create a `Vendor` identifier
	pub fn vendor(key: impl Into<String>) -> Self {
		Self::Vendor(key.into())
	}

	/// The canonical identifier, if this is one
	pub fn canonical(&self) -> Option<MetaTagIdentifier> {
		match self {
			Self::Canonical(id) => Some(*id),
			Self::Vendor(_) => None,
		}
	}
}

impl From<MetaTagIdentifier> for TagIdentifier {
	fn from(input: MetaTagIdentifier) -> Self {
		Self::Canonical(input)
	}
}

impl Display for TagIdentifier {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Canonical(id) => f.write_str(id.as_str()),
			Self::Vendor(key) => f.write_str(key),
		}
	}
}
