//! Format-agnostic file parsing tools

use crate::ape::ApeReader;
use crate::asf::AsfReader;
use crate::config::ParseOptions;
use crate::error::Result;
use crate::file::{AudioTagData, FileType, Signature};
use crate::flac::FlacReader;
use crate::id3::v1::constants::{ID3V1_TAG_MARKER, ID3V1_TAG_SIZE};
use crate::macros::err;
use crate::mp4::Mp4Reader;
use crate::mpeg::MpegReader;
use crate::mpeg::header::search_for_frame_sync;
use crate::ogg::VorbisReader;
use crate::properties::AudioProperties;
use crate::reader::TagReader;
use crate::tag::TagSet;
use crate::util::io::read_up_to;

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

// Every signature, and an ID3v2 header, fit in the first 16 bytes
const SIGNATURE_WINDOW: u64 = 16;

/// Detects the format of a stream, then reads it with the matching [`TagReader`]
///
/// ## Usage
///
/// Opening a path takes a first guess from the extension.
///
/// ```rust,no_run
/// # fn main() -> tagscan::error::Result<()> {
/// use tagscan::file::FileType;
/// use tagscan::probe::Probe;
///
/// let probe = Probe::open("path/to/my.mp3")?;
///
/// // Inferred from the `mp3` extension
/// assert_eq!(probe.file_type(), Some(FileType::Mpeg));
/// # Ok(())
/// # }
/// ```
///
/// Without a usable path, detect the format from the content instead.
///
/// ```rust
/// # fn main() -> tagscan::error::Result<()> {
/// use std::io::Cursor;
/// use tagscan::file::FileType;
/// use tagscan::probe::Probe;
///
/// // A file starting with an MPEG frame sync
/// let content = Cursor::new([0xFF, 0xFB, 0x90, 0x40]);
/// let probe = Probe::new(content).guess_file_type()?;
///
/// assert_eq!(probe.file_type(), Some(FileType::Mpeg));
/// # Ok(())
/// # }
/// ```
pub struct Probe<R: Read> {
	reader: R,
	options: Option<ParseOptions>,
	file_type: Option<FileType>,
}

impl<R: Read> Probe<R> {
	/// Wrap a reader, with no [`FileType`] yet
	///
	/// Unbuffered readers should be wrapped in a [`BufReader`] first, detection reads a byte
	/// at a time while searching junk.
	#[must_use]
	pub const fn new(reader: R) -> Self {
		Self {
			reader,
			options: None,
			file_type: None,
		}
	}

	/// Wrap a reader whose [`FileType`] is already known
	pub fn with_file_type(reader: R, file_type: FileType) -> Self {
		Self::new(reader).set_file_type(file_type)
	}

	/// The [`FileType`] the probe will read as, if any
	pub fn file_type(&self) -> Option<FileType> {
		self.file_type
	}

	/// Override the [`FileType`]
	pub fn set_file_type(mut self, file_type: FileType) -> Self {
		self.file_type = Some(file_type);
		self
	}

	/// The [`ParseOptions`] used for detection and reading
	#[must_use]
	pub fn options(mut self, options: ParseOptions) -> Self {
		self.options = Some(options);
		self
	}

	/// Unwrap the reader
	pub fn into_inner(self) -> R {
		self.reader
	}
}

impl Probe<BufReader<File>> {
	/// Open the file at `path`, taking a first guess at its [`FileType`] from the extension
	///
	/// Call [`Probe::guess_file_type`] to replace the guess with one based on the content.
	///
	/// # Errors
	///
	/// * `path` can't be opened
	pub fn open<P>(path: P) -> Result<Self>
	where
		P: AsRef<Path>,
	{
		let path = path.as_ref();
		log::debug!("Probe: Opening `{}`", path.display());

		let mut probe = Self::new(BufReader::new(File::open(path)?));
		probe.file_type = FileType::from_path(path);
		log::debug!("Probe: Extension suggests {:?}", probe.file_type);

		Ok(probe)
	}
}

impl<R: Read + Seek> Probe<R> {
	/// Detect the [`FileType`] from the content of the stream
	///
	/// Signatures are checked at the current position. A leading ID3v2 tag is skipped to look
	/// for APE or FLAC behind it. Otherwise, up to [`ParseOptions::max_junk_bytes`] are searched
	/// for an MPEG frame, and finally the end of the stream for an ID3v1 tag.
	///
	/// When nothing matches, the previous file type (from the extension, for example) is kept.
	/// The stream position is restored either way.
	///
	/// # Errors
	///
	/// * `reader` fails with an IO error
	pub fn guess_file_type(mut self) -> Result<Self> {
		let junk_window = self
			.options
			.as_ref()
			.map_or(ParseOptions::DEFAULT_MAX_JUNK_BYTES, |options| options.max_junk_bytes);

		let start = self.reader.stream_position()?;
		let detected = self.detect(start, junk_window);
		self.reader.seek(SeekFrom::Start(start))?;

		if let Some(file_type) = detected? {
			self.file_type = Some(file_type);
		}

		log::debug!("Probe: Settled on {:?}", self.file_type);
		Ok(self)
	}

	fn detect(&mut self, start: u64, junk_window: usize) -> Result<Option<FileType>> {
		let prefix = read_up_to(&mut self.reader, SIGNATURE_WINDOW)?;

		match Signature::detect(&prefix) {
			Signature::Known(file_type) => Ok(Some(file_type)),
			Signature::Id3v2 { len } => {
				log::debug!("Probe: Looking past a {len} byte ID3v2 tag");
				self.reader.seek(SeekFrom::Start(start + len))?;

				let file_type = match read_up_to(&mut self.reader, 4)?.as_slice() {
					b"MAC " => FileType::Ape,
					b"fLaC" => FileType::Flac,
					// Either MPEG frames, or a tag on its own
					_ => FileType::Mpeg,
				};

				Ok(Some(file_type))
			},
			Signature::Unknown => {
				log::debug!("Probe: No signature, searching {junk_window} bytes for a frame sync");
				self.reader.seek(SeekFrom::Start(start))?;

				let mut window = self.reader.by_ref().take(junk_window as u64);
				if search_for_frame_sync(&mut window)?.is_some() {
					return Ok(Some(FileType::Mpeg));
				}

				self.trailing_id3v1()
			},
		}
	}

	// A trailing ID3v1 tag with no other signature is an MPEG file
	fn trailing_id3v1(&mut self) -> Result<Option<FileType>> {
		if self
			.reader
			.seek(SeekFrom::End(-(ID3V1_TAG_SIZE as i64)))
			.is_err()
		{
			return Ok(None);
		}

		let marker = read_up_to(&mut self.reader, ID3V1_TAG_MARKER.len() as u64)?;
		if marker != ID3V1_TAG_MARKER {
			return Ok(None);
		}

		log::debug!("Probe: Found a trailing ID3v1 tag");
		Ok(Some(FileType::Mpeg))
	}

	/// Read the tags and properties, with the defaults of [`AudioTagData`] filled in
	///
	/// # Errors
	///
	/// * No [`FileType`] was detected or set ([`UnknownFormat`](crate::error::ErrorKind::UnknownFormat))
	/// * The reader fails, see [`TagReader::read_from`]
	pub fn read(self) -> Result<AudioTagData> {
		let (file_type, tags, properties) = self.read_inner()?;
		Ok(AudioTagData::new(file_type, tags, properties))
	}

	/// Read only the tags, as found in the file
	///
	/// # Errors
	///
	/// See [`Probe::read`]
	pub fn read_tags(self) -> Result<TagSet> {
		self.read_inner().map(|(_, tags, _)| tags)
	}

	fn read_inner(mut self) -> Result<(FileType, TagSet, AudioProperties)> {
		let Some(file_type) = self.file_type else {
			err!(UnknownFormat);
		};

		let reader = &mut self.reader;
		let options = self.options.unwrap_or_default();

		let (tags, properties) = match file_type {
			FileType::Mpeg => MpegReader::read_with_properties(reader, &options)?,
			FileType::Ape => ApeReader::read_with_properties(reader, &options)?,
			FileType::Mp4 => Mp4Reader::read_with_properties(reader, &options)?,
			FileType::Asf => AsfReader::read_with_properties(reader, &options)?,
			FileType::Ogg => VorbisReader::read_with_properties(reader, &options)?,
			FileType::Flac => FlacReader::read_with_properties(reader, &options)?,
		};

		log::debug!("Probe: Read {} tags from a {file_type:?} file", tags.len());
		Ok((file_type, tags, properties))
	}
}
