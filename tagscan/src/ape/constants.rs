pub(crate) const APE_PREAMBLE: &[u8; 8] = b"APETAGEX";

/// The size of both the header and footer
pub(crate) const APE_FOOTER_SIZE: usize = 32;

// Keys that would be mistaken for other tag signatures
pub(super) const INVALID_KEYS: [&str; 4] = ["ID3", "TAG", "OGGS", "MP+"];

pub(super) const FRONT_COVER_KEY: &str = "Cover Art (Front)";
