pub(super) const VORBIS_IDENT_HEAD: &[u8] = &[1, b'v', b'o', b'r', b'b', b'i', b's'];
pub(super) const VORBIS_COMMENT_HEAD: &[u8] = &[3, b'v', b'o', b'r', b'b', b'i', b's'];

pub(super) const OPUSHEAD: &[u8] = b"OpusHead";
pub(super) const OPUSTAGS: &[u8] = b"OpusTags";

// Opus always decodes at 48kHz
pub(super) const OPUS_SAMPLE_RATE: u32 = 48000;

pub(super) const STREAM_MARKER: &str = "[STREAM]";
pub(super) const STREAM_SCAN_LEN: u64 = 32 * 1024;

// Limits for the comment header search
pub(super) const MAX_SCAN_BYTES: u64 = 100_000;
pub(super) const MAX_PACKETS: usize = 10;
