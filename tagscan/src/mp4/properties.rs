use crate::error::Result;
use crate::properties::AudioProperties;

use std::io::{Cursor, Read};
use std::time::Duration;

use byteorder::{BigEndian, ReadBytesExt};

const ELEMENTARY_DESCRIPTOR_TAG: u8 = 0x03;
const DECODER_CONFIG_TAG: u8 = 0x04;

/// The media header of a track
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(super) struct Mdhd {
	pub(super) timescale: u32,
	pub(super) duration: u64,
}

impl Mdhd {
	pub(super) fn parse(content: &[u8]) -> Result<Self> {
		let mut reader = Cursor::new(content);

		let version = reader.read_u8()?;
		let _flags = reader.read_u24::<BigEndian>()?;

		let (timescale, duration) = if version == 1 {
			// Creation and modification time
			let _ = reader.read_u64::<BigEndian>()?;
			let _ = reader.read_u64::<BigEndian>()?;

			let timescale = reader.read_u32::<BigEndian>()?;
			let duration = reader.read_u64::<BigEndian>()?;

			(timescale, duration)
		} else {
			let _ = reader.read_u32::<BigEndian>()?;
			let _ = reader.read_u32::<BigEndian>()?;

			let timescale = reader.read_u32::<BigEndian>()?;
			let duration = reader.read_u32::<BigEndian>()?;

			(timescale, u64::from(duration))
		};

		Ok(Self {
			timescale,
			duration,
		})
	}

	fn duration(self) -> Option<Duration> {
		if self.timescale == 0 {
			return None;
		}

		Some(Duration::from_millis(
			self.duration.saturating_mul(1000) / u64::from(self.timescale),
		))
	}
}

/// Read the properties of the first recognised sample entry in an `stsd` atom
pub(super) fn read_stsd(content: &[u8], mdhd: Option<Mdhd>) -> Result<Option<AudioProperties>> {
	let mut reader = Cursor::new(content);

	// Version (1), flags (3)
	let _ = reader.read_u32::<BigEndian>()?;
	let entry_count = reader.read_u32::<BigEndian>()?;

	for _ in 0..entry_count {
		let entry_start = reader.position() as usize;

		let entry_len = reader.read_u32::<BigEndian>()? as usize;
		let mut fourcc = [0; 4];
		reader.read_exact(&mut fourcc)?;

		let Some(entry) = entry_start
			.checked_add(entry_len)
			.and_then(|end| content.get(entry_start..end))
		else {
			log::warn!("MP4: Sample entry extends past the `stsd` atom");
			return Ok(None);
		};

		let codec = match &fourcc {
			b"mp4a" => "AAC",
			b"alac" => "ALAC",
			b"fLaC" => "FLAC",
			b"Opus" => "Opus",
			_ => {
				log::warn!(
					"MP4: Found unsupported sample entry: {:?}",
					fourcc.escape_ascii().to_string()
				);

				reader.set_position((entry_start + entry_len.max(8)) as u64);
				continue;
			},
		};

		let mut properties = audio_sample_entry(entry)?;
		properties.codec = Some(String::from(codec));
		properties.duration = mdhd.and_then(Mdhd::duration);

		if &fourcc == b"mp4a" {
			// The sample entry fields are 28 bytes, then the child atoms
			if let Some(children) = entry.get(36..) {
				esds_properties(children, &mut properties);
			}
		}

		return Ok(Some(properties));
	}

	Ok(None)
}

// The fields common to every audio sample entry
fn audio_sample_entry(entry: &[u8]) -> Result<AudioProperties> {
	let mut reader = Cursor::new(entry);

	// Size (4), format (4)
	// Reserved (6), data reference index (2)
	// Version (2), revision level (2), vendor (4)
	reader.set_position(24);

	let channels = reader.read_u16::<BigEndian>()?;

	// Sample size (2), compression ID (2), packet size (2)
	reader.set_position(32);

	// 16.16 fixed point
	let sample_rate = reader.read_u32::<BigEndian>()? >> 16;

	Ok(AudioProperties {
		channels: u8::try_from(channels).ok().filter(|c| *c > 0),
		sample_rate: Some(sample_rate).filter(|r| *r > 0),
		..AudioProperties::default()
	})
}

// The codec and bitrate from an elementary stream descriptor
//
// An unreadable descriptor leaves the properties from the sample entry untouched.
fn esds_properties(children: &[u8], properties: &mut AudioProperties) {
	if children.get(4..8) != Some(&b"esds"[..]) {
		return;
	}

	let mut reader = Cursor::new(children.get(8..).unwrap_or_default());
	if let Err(err) = read_esds(&mut reader, properties) {
		log::warn!("MP4: Unable to read the `esds` atom: {err}");
	}
}

fn read_esds<R>(reader: &mut R, properties: &mut AudioProperties) -> Result<()>
where
	R: Read,
{
	// Version (1), flags (3)
	if reader.read_u32::<BigEndian>()? != 0 {
		return Ok(());
	}

	if read_descriptor_tag(reader)? != ELEMENTARY_DESCRIPTOR_TAG {
		return Ok(());
	}

	// Elementary stream ID (2)
	let _ = reader.read_u16::<BigEndian>()?;
	let flags = reader.read_u8()?;

	// Stream dependence
	if flags & 0x80 != 0 {
		let _ = reader.read_u16::<BigEndian>()?;
	}

	// URL
	if flags & 0x40 != 0 {
		let mut url = vec![0; usize::from(reader.read_u8()?)];
		reader.read_exact(&mut url)?;
	}

	// OCR stream
	if flags & 0x20 != 0 {
		let _ = reader.read_u16::<BigEndian>()?;
	}

	if read_descriptor_tag(reader)? != DECODER_CONFIG_TAG {
		return Ok(());
	}

	let object_type = reader.read_u8()?;
	properties.codec = match object_type {
		0x40 | 0x41 | 0x66 | 0x67 | 0x68 => Some(String::from("AAC")),
		0x69 | 0x6B => Some(String::from("MP3")),
		_ => None,
	};

	// Stream type (1), buffer size (3), max bitrate (4)
	let _ = reader.read_u64::<BigEndian>()?;

	let average_bitrate = reader.read_u32::<BigEndian>()?;
	if average_bitrate > 0 {
		properties.bitrate = Some(average_bitrate / 1000);
	}

	Ok(())
}

// The tag, followed by a size of up to 4 bytes with 7 bits each
fn read_descriptor_tag<R>(reader: &mut R) -> Result<u8>
where
	R: Read,
{
	let tag = reader.read_u8()?;

	for _ in 0..4 {
		let b = reader.read_u8()?;
		if b & 0x80 == 0 {
			break;
		}
	}

	Ok(tag)
}

#[cfg(test)]
mod tests {
	use super::{Mdhd, read_stsd};

	use std::time::Duration;

	fn mp4a_entry(esds: &[u8]) -> Vec<u8> {
		let mut entry = Vec::new();
		entry.extend([0; 6]);
		entry.extend(1_u16.to_be_bytes());
		entry.extend([0; 8]);
		// Channels, sample size
		entry.extend(2_u16.to_be_bytes());
		entry.extend(16_u16.to_be_bytes());
		entry.extend([0; 4]);
		entry.extend((44100_u32 << 16).to_be_bytes());
		entry.extend(esds);

		let mut atom = ((entry.len() + 8) as u32).to_be_bytes().to_vec();
		atom.extend(b"mp4a");
		atom.extend(entry);
		atom
	}

	fn stsd(entry: &[u8]) -> Vec<u8> {
		let mut stsd = vec![0, 0, 0, 0, 0, 0, 0, 1];
		stsd.extend(entry);
		stsd
	}

	#[test_log::test]
	fn mp4a() {
		let mut esds = b"\x00\x00\x00\x00".to_vec();
		// ES descriptor, ID, flags
		esds.extend([0x03, 0x80, 0x80, 0x80, 0x22, 0x00, 0x01, 0x00]);
		// Decoder config, object type, stream type, buffer size, max bitrate, average bitrate
		esds.extend([0x04, 0x80, 0x80, 0x80, 0x14, 0x40, 0x15, 0, 0, 0]);
		esds.extend(256_000_u32.to_be_bytes());
		esds.extend(128_000_u32.to_be_bytes());

		let mut atom = ((esds.len() + 8) as u32).to_be_bytes().to_vec();
		atom.extend(b"esds");
		atom.extend(esds);

		let mdhd = Mdhd {
			timescale: 44100,
			duration: 441_000,
		};

		let properties = read_stsd(&stsd(&mp4a_entry(&atom)), Some(mdhd))
			.unwrap()
			.unwrap();

		assert_eq!(properties.codec(), Some("AAC"));
		assert_eq!(properties.channels(), Some(2));
		assert_eq!(properties.sample_rate(), Some(44100));
		assert_eq!(properties.bitrate(), Some(128));
		assert_eq!(properties.duration(), Some(Duration::from_secs(10)));
	}

	#[test_log::test]
	fn missing_esds() {
		let properties = read_stsd(&stsd(&mp4a_entry(&[])), None).unwrap().unwrap();

		assert_eq!(properties.codec(), Some("AAC"));
		assert_eq!(properties.channels(), Some(2));
		assert!(properties.bitrate().is_none());
		assert!(properties.duration().is_none());
	}

	#[test_log::test]
	fn mdhd() {
		let mut content = vec![0, 0, 0, 0];
		content.extend([0; 8]);
		content.extend(1000_u32.to_be_bytes());
		content.extend(5000_u32.to_be_bytes());

		let mdhd = Mdhd::parse(&content).unwrap();
		assert_eq!(mdhd.timescale, 1000);
		assert_eq!(mdhd.duration, 5000);

		assert!(Mdhd::parse(&content[..10]).is_err());
	}
}
