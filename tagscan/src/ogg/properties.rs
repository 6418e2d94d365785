use super::constants::{OPUS_SAMPLE_RATE, OPUSHEAD, VORBIS_IDENT_HEAD};
use crate::error::Result;
use crate::properties::AudioProperties;
use crate::util::io::{SeekStreamLen, read_up_to};
use crate::util::num::{u16_le, u32_le, u64_le};

use std::io::{Read, Seek, SeekFrom};
use std::time::Duration;

use ogg_pager::{CAPTURE_PATTERN, MAX_CONTENT_SIZE, PAGE_HEADER_SIZE};

// The largest possible page, a full header and segment table plus content
const MAX_PAGE_SIZE: u64 = (PAGE_HEADER_SIZE + 255 + MAX_CONTENT_SIZE) as u64;

/// Read the properties from an identification header
///
/// The duration comes from the granule position of the last page, the reader position is
/// restored afterwards.
pub(super) fn read_properties<R>(reader: &mut R, ident: &[u8]) -> Result<Option<AudioProperties>>
where
	R: Read + Seek,
{
	let (mut properties, pre_skip, clock_rate) = if ident.starts_with(VORBIS_IDENT_HEAD) {
		// Signature (7), version (4)
		let channels = ident.get(11).copied();
		let sample_rate = u32_le(ident.get(12..).unwrap_or_default());
		// Maximum (4), nominal (4), minimum (4)
		let nominal_bitrate = u32_le(ident.get(20..).unwrap_or_default()) as i32;

		let properties = AudioProperties {
			codec: Some(String::from("Vorbis")),
			channels,
			sample_rate: Some(sample_rate).filter(|r| *r > 0),
			bitrate: u32::try_from(nominal_bitrate / 1000).ok().filter(|b| *b > 0),
			..AudioProperties::default()
		};

		(properties, 0, sample_rate)
	} else if ident.starts_with(OPUSHEAD) {
		// Signature (8), version (1)
		let channels = ident.get(9).copied();
		let pre_skip = u16_le(ident.get(10..).unwrap_or_default());
		let input_sample_rate = u32_le(ident.get(12..).unwrap_or_default());

		let properties = AudioProperties {
			codec: Some(String::from("Opus")),
			channels,
			sample_rate: Some(input_sample_rate).filter(|r| *r > 0),
			..AudioProperties::default()
		};

		(properties, u64::from(pre_skip), OPUS_SAMPLE_RATE)
	} else {
		return Ok(None);
	};

	if clock_rate == 0 {
		return Ok(Some(properties));
	}

	let position = reader.stream_position()?;
	let file_len = reader.stream_len_hack()?;
	let last_granule = last_granule_position(reader, file_len)?;
	reader.seek(SeekFrom::Start(position))?;

	if let Some(granule) = last_granule {
		let samples = granule.saturating_sub(pre_skip);
		let duration_ms = samples.saturating_mul(1000) / u64::from(clock_rate);
		properties.duration = Some(Duration::from_millis(duration_ms));

		if properties.bitrate.is_none() && duration_ms > 0 {
			properties.bitrate = u32::try_from(file_len * 8 / duration_ms).ok();
		}
	}

	Ok(Some(properties))
}

// The absolute granule position of the last page
fn last_granule_position<R>(reader: &mut R, file_len: u64) -> Result<Option<u64>>
where
	R: Read + Seek,
{
	let search_len = file_len.min(MAX_PAGE_SIZE);
	reader.seek(SeekFrom::Start(file_len - search_len))?;

	let tail = read_up_to(reader, search_len)?;
	let Some(page_start) = tail
		.windows(CAPTURE_PATTERN.len())
		.rposition(|window| window == CAPTURE_PATTERN)
	else {
		log::warn!("Ogg: Unable to find the last page");
		return Ok(None);
	};

	// Capture pattern (4), version (1), header type (1)
	let granule = tail
		.get(page_start + 6..page_start + 14)
		.map(u64_le)
		// -1 means no packet finishes on the page
		.filter(|granule| *granule != u64::MAX);

	Ok(granule)
}
