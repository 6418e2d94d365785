//! Hand-built fixtures for every supported format

use std::io::Write as _;

use tempfile::NamedTempFile;

/// Write `content` to a new temporary file ending in `.{extension}`
pub fn temp_file(content: &[u8], extension: &str) -> NamedTempFile {
	let mut file = tempfile::Builder::new()
		.suffix(&format!(".{extension}"))
		.tempfile()
		.unwrap();

	file.write_all(content).unwrap();
	file.flush().unwrap();

	file
}

pub fn utf16le(text: &str) -> Vec<u8> {
	text.encode_utf16().flat_map(u16::to_le_bytes).collect()
}

// Not a real image, only the JPEG signature
pub const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

// --- MPEG / ID3 ---

pub fn synchsafe(value: u32) -> [u8; 4] {
	[
		((value >> 21) & 0x7F) as u8,
		((value >> 14) & 0x7F) as u8,
		((value >> 7) & 0x7F) as u8,
		(value & 0x7F) as u8,
	]
}

pub fn id3v2_frame(version: u8, id: &[u8; 4], content: &[u8]) -> Vec<u8> {
	let size = content.len() as u32;

	let mut frame = id.to_vec();
	match version {
		4 => frame.extend(synchsafe(size)),
		_ => frame.extend(size.to_be_bytes()),
	}
	frame.extend([0, 0]);
	frame.extend(content);
	frame
}

/// A Latin-1 text frame
pub fn id3v2_text_frame(version: u8, id: &[u8; 4], text: &str) -> Vec<u8> {
	let mut content = vec![0];
	content.extend(text.as_bytes());
	id3v2_frame(version, id, &content)
}

/// A tag holding `frames`, followed by some padding
pub fn id3v2_tag(version: u8, frames: &[Vec<u8>]) -> Vec<u8> {
	let mut body = frames.concat();
	body.extend([0; 16]);

	let mut tag = vec![b'I', b'D', b'3', version, 0, 0];
	tag.extend(synchsafe(body.len() as u32));
	tag.extend(body);
	tag
}

pub fn id3v1_tag(title: &str, artist: &str, album: &str, track: u8, genre: u8) -> Vec<u8> {
	fn field(text: &str, len: usize) -> Vec<u8> {
		let mut field = text.as_bytes().to_vec();
		field.resize(len, 0);
		field
	}

	let mut tag = b"TAG".to_vec();
	tag.extend(field(title, 30));
	tag.extend(field(artist, 30));
	tag.extend(field(album, 30));
	tag.extend(field("2001", 4));
	tag.extend(field("Comment", 28));
	tag.push(0);
	tag.push(track);
	tag.push(genre);
	tag
}

/// `count` MPEG 1 Layer III frames, 128 kbps, 44100 Hz, joint stereo
pub fn mpeg_frames(count: usize) -> Vec<u8> {
	const FRAME_LEN: usize = 417;

	let mut frames = Vec::with_capacity(FRAME_LEN * count);
	for _ in 0..count {
		frames.extend([0xFF, 0xFB, 0x90, 0x40]);
		frames.resize(frames.len() + FRAME_LEN - 4, 0);
	}

	frames
}

pub fn mpeg_file() -> Vec<u8> {
	let mut file = id3v2_tag(
		3,
		&[
			id3v2_text_frame(3, b"TIT2", "Title"),
			id3v2_text_frame(3, b"TPE1", "Artist"),
			id3v2_text_frame(3, b"TALB", "Album"),
			id3v2_text_frame(3, b"TRCK", "3/10"),
			id3v2_text_frame(3, b"TPOS", "1/2"),
		],
	);
	file.extend(mpeg_frames(20));
	file.extend(id3v1_tag("Old title", "Old artist", "Old album", 7, 17));
	file
}

// --- APE ---

pub fn ape_item(key: &str, value: &[u8], binary: bool) -> Vec<u8> {
	let mut item = (value.len() as u32).to_le_bytes().to_vec();
	item.extend(if binary { 2_u32 } else { 0_u32 }.to_le_bytes());
	item.extend(key.as_bytes());
	item.push(0);
	item.extend(value);
	item
}

/// A tag with a header and a footer
pub fn ape_tag(items: &[Vec<u8>]) -> Vec<u8> {
	let items_bytes = items.concat();
	let size = items_bytes.len() as u32 + 32;

	let block = |flags: u32| {
		let mut block = b"APETAGEX".to_vec();
		block.extend(2000_u32.to_le_bytes());
		block.extend(size.to_le_bytes());
		block.extend((items.len() as u32).to_le_bytes());
		block.extend(flags.to_le_bytes());
		block.extend([0; 8]);
		block
	};

	let mut tag = block(0xA000_0000);
	tag.extend(items_bytes);
	tag.extend(block(0x8000_0000));
	tag
}

pub fn ape_file() -> Vec<u8> {
	// Kept clear of anything that looks like a frame sync
	let mut file = vec![0; 2048];
	file.extend(ape_tag(&[
		ape_item("Title", b"Title", false),
		ape_item("Artist", b"Artist", false),
		ape_item("Album", b"Album", false),
		ape_item("Track", b"3/10", false),
		ape_item("Disc", b"1", false),
		ape_item("Cover Art (Front)", &[b"desc\0".as_slice(), JPEG].concat(), true),
	]));
	file
}

// --- MP4 ---

pub fn atom(ident: &[u8; 4], content: &[u8]) -> Vec<u8> {
	let mut atom = (content.len() as u32 + 8).to_be_bytes().to_vec();
	atom.extend(ident);
	atom.extend(content);
	atom
}

pub fn mp4_item(ident: &[u8; 4], type_code: u32, value: &[u8]) -> Vec<u8> {
	let mut data = type_code.to_be_bytes().to_vec();
	data.extend([0; 4]);
	data.extend(value);
	atom(ident, &atom(b"data", &data))
}

pub fn mp4_file() -> Vec<u8> {
	let ilst = [
		mp4_item(b"\xA9nam", 1, b"Title"),
		mp4_item(b"\xA9ART", 1, b"Artist"),
		mp4_item(b"\xA9alb", 1, b"Album"),
		mp4_item(b"trkn", 0, &[0, 0, 0, 3, 0, 10, 0, 0]),
		mp4_item(b"disk", 0, &[0, 0, 0, 1, 0, 2]),
		mp4_item(b"covr", 13, JPEG),
	]
	.concat();

	let mut meta = vec![0; 4];
	meta.extend(atom(b"ilst", &ilst));

	let moov = atom(b"udta", &atom(b"meta", &meta));

	let mut file = atom(b"ftyp", b"M4A \x00\x00\x00\x00");
	file.extend(atom(b"moov", &moov));
	file.extend(atom(b"mdat", &[0; 64]));
	file
}

// --- Ogg ---

pub fn ogg_page(flags: u8, sequence_number: u32, granule: u64, packet: &[u8]) -> Vec<u8> {
	let mut segments = vec![255; packet.len() / 255];
	segments.push((packet.len() % 255) as u8);

	let mut page = b"OggS\x00".to_vec();
	page.push(flags);
	page.extend(granule.to_le_bytes());
	page.extend(0x1234_u32.to_le_bytes());
	page.extend(sequence_number.to_le_bytes());
	page.extend([0; 4]);
	page.push(segments.len() as u8);
	page.extend(segments);
	page.extend(packet);
	page
}

/// A Vorbis comment block, without a packet signature
pub fn vorbis_comments(comments: &[&str]) -> Vec<u8> {
	let vendor = b"tagscan fixtures";

	let mut block = (vendor.len() as u32).to_le_bytes().to_vec();
	block.extend(vendor);
	block.extend((comments.len() as u32).to_le_bytes());
	for comment in comments {
		block.extend((comment.len() as u32).to_le_bytes());
		block.extend(comment.as_bytes());
	}

	block
}

/// A Vorbis identification header, 2 channels, 44100 Hz, 128 kbps nominal
pub fn vorbis_ident() -> Vec<u8> {
	let mut ident = b"\x01vorbis".to_vec();
	ident.extend(0_u32.to_le_bytes());
	ident.push(2);
	ident.extend(44100_u32.to_le_bytes());
	ident.extend(0_u32.to_le_bytes());
	ident.extend(128_000_u32.to_le_bytes());
	ident.extend(0_u32.to_le_bytes());
	ident.extend([0xB8, 1]);
	ident
}

/// An identification, comment and setup header, each on its own page
pub fn ogg_vorbis_file(comments: &[&str]) -> Vec<u8> {
	let ident = vorbis_ident();

	let mut comment = b"\x03vorbis".to_vec();
	comment.extend(vorbis_comments(comments));
	comment.push(1);

	let mut file = ogg_page(0x02, 0, 0, &ident);
	file.extend(ogg_page(0, 1, 0, &comment));
	file.extend(ogg_page(0, 2, 0, b"\x05vorbis\x00\x00\x00\x00"));
	file.extend(ogg_page(0x04, 3, 441_000, &[0; 32]));
	file
}

pub fn ogg_file() -> Vec<u8> {
	ogg_vorbis_file(&[
		"TITLE=Title",
		"ARTIST=Artist",
		"ALBUM=Album",
		"TRACKNUMBER=3/10",
		"DISCNUMBER=1/2",
	])
}

// --- FLAC ---

pub fn flac_block(ty: u8, last: bool, content: &[u8]) -> Vec<u8> {
	let mut block = vec![ty | if last { 0x80 } else { 0 }];
	block.extend(&(content.len() as u32).to_be_bytes()[1..]);
	block.extend(content);
	block
}

pub fn flac_picture(picture_type: u32, mime: &str, data: &[u8]) -> Vec<u8> {
	let mut picture = picture_type.to_be_bytes().to_vec();
	picture.extend((mime.len() as u32).to_be_bytes());
	picture.extend(mime.as_bytes());
	picture.extend(0_u32.to_be_bytes());
	picture.extend([0; 16]);
	picture.extend((data.len() as u32).to_be_bytes());
	picture.extend(data);
	picture
}

pub fn flac_file() -> Vec<u8> {
	// 44100 Hz, 2 channels, 16 bits per sample, 441000 samples
	let mut stream_info = vec![0x10, 0x00, 0x10, 0x00, 0, 0, 0, 0, 0, 0];
	stream_info.extend([0x0A, 0xC4, 0x42, 0xF0, 0x00, 0x06, 0xBA, 0xA8]);
	stream_info.extend([0; 16]);

	let comments = vorbis_comments(&[
		"TITLE=Title",
		"ARTIST=Artist",
		"ALBUM=Album",
		"TRACKNUMBER=3",
		"TRACKTOTAL=10",
		"DISCNUMBER=1",
	]);

	let mut file = b"fLaC".to_vec();
	file.extend(flac_block(0, false, &stream_info));
	file.extend(flac_block(4, false, &comments));
	file.extend(flac_block(6, true, &flac_picture(3, "image/jpeg", JPEG)));
	file.extend([0xFF, 0xF8, 0x69, 0x08]);
	file.extend([0; 64]);
	file
}

// --- ASF ---

pub const ASF_HEADER: [u8; 16] = [
	0x30, 0x26, 0xB2, 0x75, 0x8E, 0x66, 0xCF, 0x11, 0xA6, 0xD9, 0x00, 0xAA, 0x00, 0x62, 0xCE, 0x6C,
];
pub const ASF_CONTENT_DESCRIPTION: [u8; 16] = [
	0x33, 0x26, 0xB2, 0x75, 0x8E, 0x66, 0xCF, 0x11, 0xA6, 0xD9, 0x00, 0xAA, 0x00, 0x62, 0xCE, 0x6C,
];
pub const ASF_EXTENDED_CONTENT_DESCRIPTION: [u8; 16] = [
	0x40, 0xA4, 0xD0, 0xD2, 0x07, 0xE3, 0xD2, 0x11, 0x97, 0xF0, 0x00, 0xA0, 0xC9, 0x5E, 0xA8, 0x50,
];

pub fn asf_object(guid: [u8; 16], content: &[u8]) -> Vec<u8> {
	let mut object = guid.to_vec();
	object.extend((content.len() as u64 + 24).to_le_bytes());
	object.extend(content);
	object
}

pub fn asf_content_description(title: &str, author: &str) -> Vec<u8> {
	let (title, author) = (utf16le(title), utf16le(author));

	let mut content = (title.len() as u16).to_le_bytes().to_vec();
	content.extend((author.len() as u16).to_le_bytes());
	content.extend([0; 6]);
	content.extend(title);
	content.extend(author);
	content
}

/// A descriptor with a value type of 0 (text) or 1 (bytes)
pub fn asf_descriptor(name: &str, value_type: u16, value: &[u8]) -> Vec<u8> {
	let name = utf16le(name);

	let mut descriptor = (name.len() as u16).to_le_bytes().to_vec();
	descriptor.extend(name);
	descriptor.extend(value_type.to_le_bytes());
	descriptor.extend((value.len() as u16).to_le_bytes());
	descriptor.extend(value);
	descriptor
}

pub fn asf_picture(picture_type: u8, mime: &str, data: &[u8]) -> Vec<u8> {
	let mut picture = u16::from(picture_type).to_le_bytes().to_vec();
	picture.extend((mime.encode_utf16().count() as u32).to_le_bytes());
	picture.extend(utf16le(mime));
	picture.extend(0_u32.to_le_bytes());
	picture.extend((data.len() as u32).to_le_bytes());
	picture.extend(data);
	picture
}

pub fn asf_file() -> Vec<u8> {
	let descriptors = [
		asf_descriptor("WM/AlbumTitle", 0, &utf16le("Album")),
		asf_descriptor("WM/TrackNumber", 0, &utf16le("3/10")),
		asf_descriptor("WM/PartOfSet", 0, &utf16le("1")),
		asf_descriptor("WM/Picture", 1, &asf_picture(3, "image/jpeg", JPEG)),
	];

	let mut extended = (descriptors.len() as u16).to_le_bytes().to_vec();
	extended.extend(descriptors.concat());

	let children = [
		asf_object(ASF_CONTENT_DESCRIPTION, &asf_content_description("Title", "Artist")),
		asf_object(ASF_EXTENDED_CONTENT_DESCRIPTION, &extended),
	]
	.concat();

	let mut file = ASF_HEADER.to_vec();
	file.extend((children.len() as u64 + 30).to_le_bytes());
	file.extend(2_u32.to_le_bytes());
	file.extend([1, 2]);
	file.extend(children);
	file.extend(asf_object([0x36; 16], &[0; 64]));
	file
}
