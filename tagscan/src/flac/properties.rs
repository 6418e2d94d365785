use crate::error::Result;
use crate::macros::decode_err;
use crate::properties::AudioProperties;
use crate::util::bits::BitDecoder;

use std::time::Duration;

// Block sizes (2 + 2) and frame sizes (3 + 3)
const STREAM_INFO_FIELDS_OFFSET: usize = 10 * 8;
const MIN_STREAM_INFO_LEN: usize = 18;

/// Read the `STREAMINFO` block
///
/// The bitrate is left for the caller, as it needs the length of the audio stream.
pub(super) fn read_stream_info(stream_info: &[u8]) -> Result<AudioProperties> {
	if stream_info.len() < MIN_STREAM_INFO_LEN {
		decode_err!(@BAIL Flac, "File has an invalid STREAMINFO block size (< 18)");
	}

	let bits = BitDecoder::from_bytes(stream_info);
	let field = |start, len| {
		bits.field(STREAM_INFO_FIELDS_OFFSET + start, len)
			.unwrap_or_default()
	};

	// Sample rate (20), channels - 1 (3), bits per sample - 1 (5), total samples (36)
	let sample_rate = field(0, 20);
	let channels = field(20, 3) + 1;
	let total_samples = (u64::from(field(28, 4)) << 32) | u64::from(field(32, 32));

	let mut properties = AudioProperties {
		codec: Some(String::from("FLAC")),
		channels: Some(channels as u8),
		sample_rate: Some(sample_rate).filter(|rate| *rate > 0),
		..AudioProperties::default()
	};

	if sample_rate > 0 && total_samples > 0 {
		let duration_ms = total_samples.saturating_mul(1000) / u64::from(sample_rate);
		properties.duration = Some(Duration::from_millis(duration_ms));
	}

	Ok(properties)
}

#[cfg(test)]
mod tests {
	use super::read_stream_info;

	use std::time::Duration;

	#[test_log::test]
	fn stream_info() {
		let mut block = vec![0x10, 0x00, 0x10, 0x00, 0, 0, 0, 0, 0, 0];
		// 44100 Hz, 2 channels, 16 bits per sample, 441000 samples
		block.extend([0x0A, 0xC4, 0x42, 0xF0, 0x00, 0x06, 0xBA, 0xA8]);
		block.extend([0; 16]);

		let properties = read_stream_info(&block).unwrap();
		assert_eq!(properties.codec(), Some("FLAC"));
		assert_eq!(properties.sample_rate(), Some(44100));
		assert_eq!(properties.channels(), Some(2));
		assert_eq!(properties.duration(), Some(Duration::from_secs(10)));
	}

	#[test_log::test]
	fn short_stream_info() {
		assert!(read_stream_info(&[0; 17]).is_err());
	}
}
