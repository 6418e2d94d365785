// Object GUIDs, in their on-disk byte order

pub(super) const HEADER_OBJECT: [u8; 16] = crate::file::ASF_HEADER_GUID;

// 75B22633-668E-11CF-A6D9-00AA0062CE6C
pub(super) const CONTENT_DESCRIPTION_OBJECT: [u8; 16] = [
	0x33, 0x26, 0xB2, 0x75, 0x8E, 0x66, 0xCF, 0x11, 0xA6, 0xD9, 0x00, 0xAA, 0x00, 0x62, 0xCE, 0x6C,
];

// D2D0A440-E307-11D2-97F0-00A0C95EA850
pub(super) const EXTENDED_CONTENT_DESCRIPTION_OBJECT: [u8; 16] = [
	0x40, 0xA4, 0xD0, 0xD2, 0x07, 0xE3, 0xD2, 0x11, 0x97, 0xF0, 0x00, 0xA0, 0xC9, 0x5E, 0xA8, 0x50,
];

// 8CABDCA1-A947-11CF-8EE4-00C00C205365
pub(super) const FILE_PROPERTIES_OBJECT: [u8; 16] = [
	0xA1, 0xDC, 0xAB, 0x8C, 0x47, 0xA9, 0xCF, 0x11, 0x8E, 0xE4, 0x00, 0xC0, 0x0C, 0x20, 0x53, 0x65,
];

// B7DC0791-A9B7-11CF-8EE6-00C00C205365
pub(super) const STREAM_PROPERTIES_OBJECT: [u8; 16] = [
	0x91, 0x07, 0xDC, 0xB7, 0xB7, 0xA9, 0xCF, 0x11, 0x8E, 0xE6, 0x00, 0xC0, 0x0C, 0x20, 0x53, 0x65,
];

// F8699E40-5B4D-11CF-A8FD-00805F5C442B
pub(super) const AUDIO_MEDIA: [u8; 16] = [
	0x40, 0x9E, 0x69, 0xF8, 0x4D, 0x5B, 0xCF, 0x11, 0xA8, 0xFD, 0x00, 0x80, 0x5F, 0x5C, 0x44, 0x2B,
];

// GUID + size
pub(super) const OBJECT_HEADER_LEN: u64 = 24;
// GUID + size + child count (4) + reserved (2)
pub(super) const HEADER_OBJECT_LEN: u64 = 30;

pub(super) const PICTURE_KEY: &str = "WM/Picture";
