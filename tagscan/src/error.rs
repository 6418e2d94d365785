//! Errors produced while reading tags
//!
//! Every failure is a [`TagError`], described by an [`ErrorKind`]. New kinds may be added at
//! any time.
//!
//! Most errors stay inside the crate. Readers stop at malformed or truncated data and keep what
//! they decoded before it (see [`TagError::is_recoverable`]), so callers generally only see IO
//! faults and [`ErrorKind::UnknownFormat`].

use crate::file::FileType;

use std::fmt::{self, Debug, Display, Formatter};
use std::io::ErrorKind as IoErrorKind;

use ogg_pager::PageError;

/// Alias for `Result<T, TagError>`
pub type Result<T> = std::result::Result<T, TagError>;

/// What went wrong
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
	/// The content didn't match any supported container
	UnknownFormat,

	/// A size field exceeded [`GlobalOptions::allocation_limit`](crate::config::GlobalOptions::allocation_limit)
	TooMuchData,
	/// A size field doesn't fit inside the structure that holds it
	SizeMismatch,
	/// A container was structurally invalid
	FileDecoding(FileDecodingError),

	/// An embedded picture couldn't be parsed
	NotAPicture,
	/// A tag signature was followed by something that isn't a tag
	FakeTag,
	/// Text couldn't be decoded in its declared encoding
	TextDecode(&'static str),
	/// An ID3v2 specific failure
	Id3v2(Id3v2Error),

	/// An Ogg page couldn't be read
	OggPage(PageError),
	/// Bytes declared as UTF-8 weren't
	StringFromUtf8(std::string::FromUtf8Error),
	/// Bytes declared as UTF-8 weren't
	StrFromUtf8(std::str::Utf8Error),
	/// Any [`std::io::Error`]
	Io(std::io::Error),
}

/// ID3v2 failures, see [`Id3v2Error`]
#[derive(Debug)]
#[non_exhaustive]
pub enum Id3v2ErrorKind {
	/// The major version isn't 2, 3 or 4, with the minor version that followed it
	BadId3v2Version(u8, u8),
	/// An ID3v2.2 tag with the compression flag set
	///
	/// ID3v2.2 never defined a compression scheme, so these tags are unreadable.
	V2Compression,
	/// The header declared a size of zero, or one too large to be plausible
	BadTagSize(u32),
	/// The extended header size is out of range
	BadExtendedHeaderSize,

	/// A frame ID with bytes outside of `A-Z0-9`
	BadFrameId(Vec<u8>),
	/// A frame too short for the fields its flags announce
	BadFrameLength,
	/// A compressed or encrypted frame lacking its data length indicator
	MissingDataLengthIndicator,

	#[cfg(feature = "id3v2_compression_support")]
	/// zlib failed on a compressed frame
	Decompression(std::io::Error),
	#[cfg(not(feature = "id3v2_compression_support"))]
	/// A compressed frame, while `id3v2_compression_support` is disabled
	CompressedFrameEncountered,
}

impl Display for Id3v2ErrorKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Self::BadId3v2Version(major, minor) => {
				write!(f, "Unsupported version 2.{major}.{minor}")
			},
			Self::V2Compression => f.write_str("ID3v2.2 tag uses the undefined compression flag"),
			Self::BadTagSize(size) => write!(f, "Tag size {size} is invalid"),
			Self::BadExtendedHeaderSize => f.write_str("Extended header size is out of range"),
			Self::BadFrameId(id) => write!(f, "Frame ID 0x{id:x?} contains invalid characters"),
			Self::BadFrameLength => f.write_str("Frame is shorter than its flags require"),
			Self::MissingDataLengthIndicator => {
				f.write_str("Compressed or encrypted frame has no data length indicator")
			},
			#[cfg(feature = "id3v2_compression_support")]
			Self::Decompression(err) => write!(f, "Frame decompression failed ({err})"),
			#[cfg(not(feature = "id3v2_compression_support"))]
			Self::CompressedFrameEncountered => {
				f.write_str("Compressed frame found, but decompression support is disabled")
			},
		}
	}
}

/// An error raised while reading an ID3v2 tag
pub struct Id3v2Error {
	kind: Id3v2ErrorKind,
}

impl Id3v2Error {
	/// Wrap an [`Id3v2ErrorKind`]
	#[must_use]
	pub const fn new(kind: Id3v2ErrorKind) -> Self {
		Self { kind }
	}

	/// The underlying [`Id3v2ErrorKind`]
	pub fn kind(&self) -> &Id3v2ErrorKind {
		&self.kind
	}
}

impl Debug for Id3v2Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Id3v2Error").field(&self.kind).finish()
	}
}

impl Display for Id3v2Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "ID3v2: {}", self.kind)
	}
}

/// A structural problem in a container, optionally tied to its [`FileType`]
pub struct FileDecodingError {
	format: Option<FileType>,
	description: &'static str,
}

impl FileDecodingError {
	/// A decoding error for a known format
	///
	/// # Examples
	///
	/// ```rust
	/// use tagscan::error::FileDecodingError;
	/// use tagscan::file::FileType;
	///
	/// let err = FileDecodingError::new(FileType::Asf, "Object size runs past the file");
	/// assert_eq!(err.format(), Some(FileType::Asf));
	/// assert_eq!(err.to_string(), "Asf: Object size runs past the file");
	/// ```
	#[must_use]
	pub const fn new(format: FileType, description: &'static str) -> Self {
		Self {
			format: Some(format),
			description,
		}
	}

	/// A decoding error shared between formats
	pub fn from_description(description: &'static str) -> Self {
		Self {
			format: None,
			description,
		}
	}

	/// The format being decoded, if known
	pub fn format(&self) -> Option<FileType> {
		self.format
	}

	/// What was wrong with the data
	pub fn description(&self) -> &str {
		self.description
	}
}

impl Debug for FileDecodingError {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("FileDecodingError")
			.field("format", &self.format)
			.field("description", &self.description)
			.finish()
	}
}

impl Display for FileDecodingError {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self.format {
			Some(format) => write!(f, "{format:?}: {}", self.description),
			None => f.write_str(self.description),
		}
	}
}

/// The error type of every fallible operation in tagscan
pub struct TagError {
	pub(crate) kind: ErrorKind,
}

impl TagError {
	/// Wrap an [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use tagscan::error::{ErrorKind, TagError};
	///
	/// let err = TagError::new(ErrorKind::UnknownFormat);
	/// assert!(matches!(err.kind(), ErrorKind::UnknownFormat));
	/// ```
	#[must_use]
	pub const fn new(kind: ErrorKind) -> Self {
		Self { kind }
	}

	/// The underlying [`ErrorKind`]
	pub fn kind(&self) -> &ErrorKind {
		&self.kind
	}

	/// Whether this error describes the data rather than the environment
	///
	/// Truncated reads, implausible sizes, bad signatures, and undecodable text are all
	/// recoverable: the tag set decoded so far is still valid. Any other IO failure
	/// (permissions, a vanished file, etc.) is not.
	///
	/// # Examples
	///
	/// ```rust
	/// use std::io::{Error, ErrorKind as IoErrorKind};
	/// use tagscan::error::{ErrorKind, TagError};
	///
	/// assert!(TagError::new(ErrorKind::SizeMismatch).is_recoverable());
	///
	/// let eof: TagError = Error::from(IoErrorKind::UnexpectedEof).into();
	/// assert!(eof.is_recoverable());
	///
	/// let denied: TagError = Error::from(IoErrorKind::PermissionDenied).into();
	/// assert!(!denied.is_recoverable());
	/// ```
	pub fn is_recoverable(&self) -> bool {
		match &self.kind {
			ErrorKind::Io(err) | ErrorKind::OggPage(PageError::Io(err)) => {
				err.kind() == IoErrorKind::UnexpectedEof
			},
			_ => true,
		}
	}
}

/// Keep a partial result when `result` failed on malformed data
///
/// Non-recoverable errors are passed through.
pub(crate) fn recover_partial(result: Result<()>, what: &str) -> Result<()> {
	match result {
		Err(err) if err.is_recoverable() => {
			log::warn!("{what}: stopped early, keeping the partial result ({err})");
			Ok(())
		},
		other => other,
	}
}

impl std::error::Error for TagError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match &self.kind {
			ErrorKind::OggPage(err) => Some(err),
			ErrorKind::StringFromUtf8(err) => Some(err),
			ErrorKind::StrFromUtf8(err) => Some(err),
			ErrorKind::Io(err) => Some(err),
			_ => None,
		}
	}
}

impl Debug for TagError {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		Debug::fmt(&self.kind, f)
	}
}

macro_rules! tag_error_from {
	($($source:ty => $variant:ident),+ $(,)?) => {
		$(
			impl From<$source> for TagError {
				fn from(input: $source) -> Self {
					Self::new(ErrorKind::$variant(input))
				}
			}
		)+
	};
}

tag_error_from! {
	Id3v2Error => Id3v2,
	FileDecodingError => FileDecoding,
	PageError => OggPage,
	std::io::Error => Io,
	std::string::FromUtf8Error => StringFromUtf8,
	std::str::Utf8Error => StrFromUtf8,
}

impl Display for TagError {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match &self.kind {
			ErrorKind::OggPage(err) => write!(f, "Ogg: {err}"),
			ErrorKind::StringFromUtf8(err) => Display::fmt(err, f),
			ErrorKind::StrFromUtf8(err) => Display::fmt(err, f),
			ErrorKind::Io(err) => Display::fmt(err, f),
			ErrorKind::Id3v2(err) => Display::fmt(err, f),
			ErrorKind::FileDecoding(err) => Display::fmt(err, f),

			ErrorKind::UnknownFormat => f.write_str("Unable to determine the file format"),
			ErrorKind::TooMuchData => f.write_str("Item size is above the allocation limit"),
			ErrorKind::SizeMismatch => f.write_str("Item size doesn't fit its container"),
			ErrorKind::NotAPicture => f.write_str("Picture data is invalid"),
			ErrorKind::FakeTag => f.write_str("Tag signature isn't followed by a valid tag"),
			ErrorKind::TextDecode(message) => write!(f, "Text decoding: {message}"),
		}
	}
}
