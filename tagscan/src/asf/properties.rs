use super::constants::AUDIO_MEDIA;
use crate::properties::AudioProperties;
use crate::util::num::{u16_le, u32_le, u64_le};

use std::time::Duration;

// File ID (16), file size (8), creation date (8), data packet count (8)
const PLAY_DURATION_OFFSET: usize = 40;
// Play duration (8), send duration (8)
const PREROLL_OFFSET: usize = 56;

// Stream type (16), error correction type (16), time offset (8), type-specific data length (4),
// error correction data length (4), flags (2), reserved (4)
const TYPE_SPECIFIC_DATA_OFFSET: usize = 54;

/// Read the duration from a File Properties Object
///
/// The play duration is in 100-nanosecond units, and includes the preroll (in milliseconds).
pub(super) fn read_file_properties(content: &[u8], properties: &mut AudioProperties) {
	let Some(fields) = content.get(PLAY_DURATION_OFFSET..PREROLL_OFFSET + 8) else {
		log::warn!("ASF: File properties object is too short");
		return;
	};

	let play_duration = u64_le(fields);
	let preroll = u64_le(&fields[PREROLL_OFFSET - PLAY_DURATION_OFFSET..]);

	let duration_ms = (play_duration / 10_000).saturating_sub(preroll);
	properties.duration = Some(Duration::from_millis(duration_ms));
}

/// Read the audio format from a Stream Properties Object
///
/// Only the first audio stream is used, streams of other types are ignored.
pub(super) fn read_stream_properties(content: &[u8], properties: &mut AudioProperties) {
	if properties.codec.is_some() || !content.starts_with(&AUDIO_MEDIA) {
		return;
	}

	// WAVEFORMATEX: codec ID (2), channels (2), sample rate (4), average bytes per second (4)
	let Some(format) = content.get(TYPE_SPECIFIC_DATA_OFFSET..TYPE_SPECIFIC_DATA_OFFSET + 12) else {
		log::warn!("ASF: Audio stream properties are too short");
		return;
	};

	let codec_id = u16_le(format);
	let channels = u16_le(&format[2..]);
	let sample_rate = u32_le(&format[4..]);
	let bytes_per_second = u32_le(&format[8..]);

	properties.codec = Some(String::from(codec_name(codec_id)));
	properties.channels = u8::try_from(channels).ok();
	properties.sample_rate = Some(sample_rate).filter(|rate| *rate > 0);
	properties.bitrate = Some(bytes_per_second.saturating_mul(8) / 1000).filter(|b| *b > 0);
}

fn codec_name(codec_id: u16) -> &'static str {
	match codec_id {
		0x0001 => "PCM",
		0x0055 => "MP3",
		0x0160 => "WMA Version 1",
		0x0161 => "WMA Version 2",
		0x0162 => "WMA Pro",
		0x0163 => "WMA Lossless",
		_ => "Unknown",
	}
}
