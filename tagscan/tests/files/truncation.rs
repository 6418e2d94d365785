use crate::util;

use tagscan::ape::ApeReader;
use tagscan::asf::AsfReader;
use tagscan::config::{CancellationToken, ParseOptions};
use tagscan::flac::FlacReader;
use tagscan::mp4::Mp4Reader;
use tagscan::mpeg::MpegReader;
use tagscan::ogg::VorbisReader;
use tagscan::reader::TagReader;

use std::io::Cursor;

macro_rules! damaged_file_tests {
	($($name:ident => $reader:ty, $fixture:path);+ $(;)?) => {
		paste::paste! {
			$(
				#[test_log::test]
				fn [<$name _truncated>]() {
					let bytes = $fixture();

					for cut in [0, 1, 10, bytes.len() / 3, bytes.len() / 2, bytes.len() - 1] {
						let mut reader = Cursor::new(&bytes[..cut]);
						let result = <$reader>::read_with_properties(&mut reader, &ParseOptions::new());
						assert!(result.is_ok(), "failed at {cut} bytes: {result:?}");
					}
				}

				#[test_log::test]
				fn [<$name _garbage>]() {
					let mut bytes = $fixture();
					let middle = bytes.len() / 2;
					bytes[middle..].iter_mut().for_each(|b| *b = 0xFF);

					let result =
						<$reader>::read_from(&mut Cursor::new(bytes), &ParseOptions::new());
					assert!(result.is_ok(), "{result:?}");
				}

				#[test_log::test]
				fn [<$name _cancelled>]() {
					let token = CancellationToken::new();
					token.cancel();

					let options = ParseOptions::new().cancellation(token);
					let tags = <$reader>::read_from(&mut Cursor::new($fixture()), &options).unwrap();
					assert!(tags.is_empty());
				}
			)+
		}
	};
}

damaged_file_tests! {
	mpeg => MpegReader, util::mpeg_file;
	ape => ApeReader, util::ape_file;
	mp4 => Mp4Reader, util::mp4_file;
	ogg => VorbisReader, util::ogg_file;
	flac => FlacReader, util::flac_file;
	asf => AsfReader, util::asf_file;
}
