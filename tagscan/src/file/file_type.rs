use crate::id3::v2::util::synchsafe::SynchsafeInteger;
use crate::mpeg::header::verify_frame_sync;

use std::ffi::OsStr;
use std::path::Path;

/// The ASF Header Object GUID
pub(crate) const ASF_HEADER_GUID: [u8; 16] = [
	0x30, 0x26, 0xB2, 0x75, 0x8E, 0x66, 0xCF, 0x11, 0xA6, 0xD9, 0x00, 0xAA, 0x00, 0x62, 0xCE, 0x6C,
];

/// The type of file read
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
#[non_exhaustive]
pub enum FileType {
	/// MPEG audio, tagged with ID3v2 and/or ID3v1
	Mpeg,
	/// Monkey's Audio, or any file ending in an APEv2 tag
	Ape,
	/// MP4/M4A, tagged with `ilst` atoms
	Mp4,
	/// ASF/WMA
	Asf,
	/// Ogg Vorbis or Ogg Opus
	Ogg,
	/// FLAC
	Flac,
}

impl FileType {
	/// Attempts to determine a [`FileType`] from an extension
	///
	/// # Examples
	///
	/// ```rust
	/// use tagscan::file::FileType;
	///
	/// let extension = "mp3";
	/// assert_eq!(FileType::from_ext(extension), Some(FileType::Mpeg));
	/// assert_eq!(FileType::from_ext("WMA"), Some(FileType::Asf));
	/// ```
	pub fn from_ext<E>(ext: E) -> Option<Self>
	where
		E: AsRef<OsStr>,
	{
		let ext = ext.as_ref().to_str()?.to_ascii_lowercase();

		Some(match ext.as_str() {
			"mp3" | "mp2" | "mp1" => Self::Mpeg,
			"ape" => Self::Ape,
			"m4a" | "mp4" | "m4b" => Self::Mp4,
			"wma" | "asf" => Self::Asf,
			"ogg" | "oga" | "opus" => Self::Ogg,
			"flac" => Self::Flac,
			_ => return None,
		})
	}

	/// Attempts to extract a [`FileType`] from a path
	///
	/// # Examples
	///
	/// ```rust
	/// use std::path::Path;
	/// use tagscan::file::FileType;
	///
	/// let path = Path::new("path/to/my.m4a");
	/// assert_eq!(FileType::from_path(path), Some(FileType::Mp4));
	/// ```
	pub fn from_path<P>(path: P) -> Option<Self>
	where
		P: AsRef<Path>,
	{
		let ext = path.as_ref().extension();
		ext.and_then(Self::from_ext)
	}

	/// Identify a [`FileType`] from the start of a stream
	///
	/// This only inspects signatures at offset 0. A leading ID3v2 tag counts as MPEG, use
	/// [`Probe::guess_file_type`](crate::probe::Probe::guess_file_type) to look past the tag
	/// and any junk.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagscan::file::FileType;
	///
	/// assert_eq!(FileType::from_buffer(b"fLaC\0\0\0\x22"), Some(FileType::Flac));
	/// assert_eq!(FileType::from_buffer(&[0xFF, 0xFB, 0x90, 0x40]), Some(FileType::Mpeg));
	/// assert_eq!(FileType::from_buffer(b"RIFF"), None);
	/// ```
	pub fn from_buffer(buf: &[u8]) -> Option<Self> {
		match Signature::detect(buf) {
			Signature::Known(file_type) => Some(file_type),
			Signature::Id3v2 { .. } => Some(Self::Mpeg),
			Signature::Unknown => None,
		}
	}
}

/// What the first bytes of a stream identify
pub(crate) enum Signature {
	Known(FileType),
	/// An ID3v2 tag spanning `len` bytes, header and footer included
	Id3v2 { len: u64 },
	Unknown,
}

impl Signature {
	pub(crate) fn detect(buf: &[u8]) -> Self {
		let file_type = match buf {
			[0xFF, second, ..] if verify_frame_sync([0xFF, *second]) => FileType::Mpeg,
			[b'M', b'A', b'C', b' ', ..] => FileType::Ape,
			[b'O', b'g', b'g', b'S', ..] => FileType::Ogg,
			[b'f', b'L', b'a', b'C', ..] => FileType::Flac,
			[_, _, _, _, b'f', b't', b'y', b'p', ..] => FileType::Mp4,
			_ if buf.starts_with(&ASF_HEADER_GUID[..4]) => FileType::Asf,
			[b'I', b'D', b'3', _, _, flags, s0, s1, s2, s3, ..] => {
				let size = u32::from_be_bytes([*s0, *s1, *s2, *s3]).unsynch();
				let footer = if flags & 0x10 == 0x10 { 10 } else { 0 };
				return Self::Id3v2 {
					len: 10 + u64::from(size) + footer,
				};
			},
			_ => return Self::Unknown,
		};

		Self::Known(file_type)
	}
}

#[cfg(test)]
mod tests {
	use super::{ASF_HEADER_GUID, FileType};

	#[test_log::test]
	fn signatures() {
		assert_eq!(FileType::from_buffer(b"MAC \x96\x0F"), Some(FileType::Ape));
		assert_eq!(FileType::from_buffer(b"OggS\0\x02"), Some(FileType::Ogg));
		assert_eq!(FileType::from_buffer(&ASF_HEADER_GUID), Some(FileType::Asf));
		assert_eq!(
			FileType::from_buffer(b"\0\0\0\x20ftypM4A "),
			Some(FileType::Mp4)
		);
		assert_eq!(
			FileType::from_buffer(b"ID3\x04\0\0\0\0\0\x10"),
			Some(FileType::Mpeg)
		);
		assert_eq!(FileType::from_buffer(&[0xFF, 0x00]), None);
		assert_eq!(FileType::from_buffer(&[]), None);
	}

	#[test_log::test]
	fn extensions() {
		for (ext, ty) in [
			("m4b", FileType::Mp4),
			("oga", FileType::Ogg),
			("opus", FileType::Ogg),
			("Flac", FileType::Flac),
			("ape", FileType::Ape),
			("asf", FileType::Asf),
		] {
			assert_eq!(FileType::from_ext(ext), Some(ty));
		}

		assert_eq!(FileType::from_ext("txt"), None);
	}
}
