// Bitrates in kbps, indexed by `[row][bitrate bits]`
//
// Rows: V1 Layer I, V1 Layer II, V1 Layer III, V2/V2.5 Layer I, V2/V2.5 Layer II & III
//
// Index 0 is "free" and index 15 is "bad", both are stored as 0.
pub(super) const BITRATES: [[u16; 16]; 5] = [
	[0, 32, 64, 96, 128, 160, 192, 224, 256, 288, 320, 352, 384, 416, 448, 0],
	[0, 32, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 384, 0],
	[0, 32, 40, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 0],
	[0, 32, 48, 56, 64, 80, 96, 112, 128, 144, 160, 176, 192, 224, 256, 0],
	[0, 8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160, 0],
];

pub(super) const BITRATE_FREE: u32 = 0b0000;
pub(super) const BITRATE_BAD: u32 = 0b1111;

// Sample rates in Hz, indexed by `[version][frequency bits]`
//
// Versions: V1, V2, V2.5. Frequency bits `11` are reserved.
pub(super) const SAMPLE_RATES: [[u32; 3]; 3] = [
	[44100, 48000, 32000],
	[22050, 24000, 16000],
	[11025, 12000, 8000],
];

// Joint stereo mode extensions, indexed by `[layer][mode extension bits]`
//
// Layers: I & II, III
pub(super) const MODE_EXTENSIONS: [[&str; 4]; 2] = [
	["4-31", "8-31", "12-31", "16-31"],
	["", "IS", "MS", "IS+MS"],
];

// Bit positions within the 4 byte header, MSB first
pub(super) const VERSION_BITS: (usize, usize) = (11, 2);
pub(super) const LAYER_BITS: (usize, usize) = (13, 2);
pub(super) const PROTECTION_BIT: usize = 15;
pub(super) const BITRATE_BITS: (usize, usize) = (16, 4);
pub(super) const FREQUENCY_BITS: (usize, usize) = (20, 2);
pub(super) const PADDING_BIT: usize = 22;
pub(super) const PRIVATE_BIT: usize = 23;
pub(super) const CHANNEL_MODE_BITS: (usize, usize) = (24, 2);
pub(super) const MODE_EXTENSION_BITS: (usize, usize) = (26, 2);
pub(super) const COPYRIGHT_BIT: usize = 28;
pub(super) const ORIGINAL_BIT: usize = 29;
pub(super) const EMPHASIS_BITS: (usize, usize) = (30, 2);
