use super::atom_info::AtomInfo;
use super::atom_reader::AtomReader;
use super::ilst::parse_ilst;
use super::properties::{Mdhd, read_stsd};
use crate::config::ParseOptions;
use crate::error::{Result, recover_partial};
use crate::file::FileType;
use crate::properties::AudioProperties;
use crate::reader::TagReader;
use crate::tag::{MetaTagIdentifier, TagSet};
use crate::util::io::SeekStreamLen;

use std::io::{Read, Seek, SeekFrom};

/// A reader for MP4 `ilst` metadata
///
/// The atom tree is scanned front to back, descending into the containers that can hold
/// metadata or the audio track description. Properties come from the first audio track.
pub struct Mp4Reader;

impl TagReader for Mp4Reader {
	const FILE_TYPE: FileType = FileType::Mp4;

	fn read_with_properties<R>(
		reader: &mut R,
		parse_options: &ParseOptions,
	) -> Result<(TagSet, AudioProperties)>
	where
		R: Read + Seek,
	{
		let mut tags = TagSet::new();
		let mut properties = AudioProperties::default();

		let result = read_atoms(reader, parse_options, &mut tags, &mut properties);
		recover_partial(result, "MP4")?;

		if tags.text(MetaTagIdentifier::Artist).is_none() {
			if let Some(album_artist) = tags.text(MetaTagIdentifier::AlbumArtist).map(str::to_owned) {
				log::debug!("MP4: No artist, using the album artist");
				tags.insert_text(MetaTagIdentifier::Artist, &album_artist);
			}
		}

		Ok((tags, properties))
	}
}

// The state of the track currently being scanned
#[derive(Default)]
struct Trak {
	handler: Option<[u8; 4]>,
	mdhd: Option<Mdhd>,
}

fn read_atoms<R>(
	reader: &mut R,
	parse_options: &ParseOptions,
	tags: &mut TagSet,
	properties: &mut AudioProperties,
) -> Result<()>
where
	R: Read + Seek,
{
	reader.seek(SeekFrom::Start(0))?;
	let len = reader.stream_len_hack()?;

	let mut atoms = AtomReader::new(reader, len);

	match atoms.next()? {
		Some(ftyp) if &ftyp.ident == b"ftyp" => {
			log::debug!("MP4: Found `ftyp` atom, size: {}", ftyp.len);
			atoms.skip_atom(&ftyp)?;
		},
		_ => {
			log::debug!("MP4: File doesn't start with an `ftyp` atom");
			return Ok(());
		},
	}

	let mut trak = Trak::default();
	while let Some(atom) = atoms.next()? {
		if parse_options.is_cancelled() {
			log::debug!("MP4: Cancelled, keeping {} items", tags.len());
			break;
		}

		log::trace!(
			"MP4: Found atom {:?}, size: {}",
			atom.ident.escape_ascii().to_string(),
			atom.len
		);

		match &atom.ident {
			// Containers, the next atom is the first child
			b"moov" | b"udta" | b"mdia" | b"minf" | b"stbl" => {},
			b"trak" => trak = Trak::default(),
			b"meta" => skip_meta_header(&mut atoms, &atom)?,
			b"ilst" => {
				let content = atoms.read_content(&atom)?;
				parse_ilst(&content, parse_options, tags)?;
			},
			b"mdhd" => {
				let content = atoms.read_content(&atom)?;
				trak.mdhd = Mdhd::parse(&content).ok();
			},
			b"hdlr" => {
				let content = atoms.read_content(&atom)?;
				// Version (1), flags (3), predefined (4)
				trak.handler = content.get(8..12).and_then(|h| h.try_into().ok());
			},
			b"stsd" if properties.is_empty() && trak.handler == Some(*b"soun") => {
				let content = atoms.read_content(&atom)?;
				match read_stsd(&content, trak.mdhd) {
					Ok(Some(audio)) => *properties = audio,
					Ok(None) => {},
					Err(err) => log::warn!("MP4: Unable to read the audio properties: {err}"),
				}
			},
			_ => atoms.skip_atom(&atom)?,
		}
	}

	Ok(())
}

// `meta` has a version and flags before its children, unless it was written by QuickTime
fn skip_meta_header<R>(atoms: &mut AtomReader<R>, meta: &AtomInfo) -> Result<()>
where
	R: Read + Seek,
{
	if meta.content_len() < 4 {
		return atoms.skip_atom(meta);
	}

	let version_and_flags = atoms.read_u32()?;
	if version_and_flags != 0 {
		// This was the size of the first child
		atoms.step_back(4)?;
	}

	Ok(())
}
