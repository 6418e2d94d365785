use crate::Page;

use std::io::{Read, Seek};

/// Packets rebuilt from the segment tables of a run of pages
///
/// A packet may span any number of pages. It only becomes available once its final segment
/// (a lacing value below 255) has been pushed.
#[derive(Default, Debug)]
pub struct Packets {
	complete: Vec<Vec<u8>>,
	pending: Vec<u8>,
}

impl Packets {
	/// Create an empty `Packets`, to be filled with [`Packets::push_page`]
	pub fn new() -> Self {
		Self::default()
	}

	/// Collect the packets of every page up to the end of the stream
	///
	/// Reading stops quietly at the first page that can't be read, an unfinished packet at that
	/// point is left pending.
	///
	/// # Examples
	///
	/// ```rust
	/// use ogg_pager::Packets;
	/// use std::io::Cursor;
	///
	/// // A single page holding two packets, "ab" and "c"
	/// let mut bytes = Vec::new();
	/// bytes.extend(b"OggS");
	/// bytes.extend([0, 2]);
	/// bytes.extend([0; 20]);
	/// bytes.extend([2, 2, 1]);
	/// bytes.extend(b"abc");
	///
	/// let packets = Packets::read(&mut Cursor::new(bytes));
	/// assert_eq!(packets.get(0), Some(&b"ab"[..]));
	/// assert_eq!(packets.get(1), Some(&b"c"[..]));
	/// ```
	pub fn read<R>(data: &mut R) -> Self
	where
		R: Read + Seek,
	{
		let mut packets = Self::new();

		while let Ok(page) = Page::read(data, false) {
			packets.push_page(&page);
		}

		packets
	}

	/// Feed a page's content into the packet reconstruction
	///
	/// Returns the number of packets completed by this page. A page that doesn't continue a
	/// packet drops whatever was left unfinished by the pages before it.
	pub fn push_page(&mut self, page: &Page) -> usize {
		if !page.header().is_continuation() {
			self.pending.clear();
		}

		let before = self.complete.len();
		let mut content = page.content();

		for &lacing_value in page.header().segments() {
			let (segment, rest) = content.split_at(usize::from(lacing_value).min(content.len()));
			self.pending.extend_from_slice(segment);
			content = rest;

			if lacing_value < 255 {
				self.complete.push(std::mem::take(&mut self.pending));
			}
		}

		self.complete.len() - before
	}

	/// Whether a packet has been started, but not yet completed
	pub fn has_pending(&self) -> bool {
		!self.pending.is_empty()
	}

	/// The number of completed packets
	pub fn len(&self) -> usize {
		self.complete.len()
	}

	/// Whether no packet has been completed
	pub fn is_empty(&self) -> bool {
		self.complete.is_empty()
	}

	/// The content of the packet at `idx`, in stream order
	pub fn get(&self, idx: usize) -> Option<&[u8]> {
		self.complete.get(idx).map(Vec::as_slice)
	}

	/// Iterate over the completed packets
	pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
		self.complete.iter().map(Vec::as_slice)
	}
}

#[cfg(test)]
mod tests {
	use crate::tests::page;
	use crate::{CONTINUED_PACKET, Packets};
	use std::io::Cursor;

	#[test]
	fn packet_spanning_pages() {
		let first = vec![b'a'; 255];
		let mut bytes = page(0, 0, &[255], &first);
		bytes.extend(page(CONTINUED_PACKET, 1, &[10, 3], b"bbbbbbbbbbccc"));

		let packets = Packets::read(&mut Cursor::new(bytes));
		assert_eq!(packets.len(), 2);

		let spanning = packets.get(0).unwrap();
		assert_eq!(spanning.len(), 265);
		assert!(spanning[..255].iter().all(|b| *b == b'a'));
		assert_eq!(&spanning[255..], b"bbbbbbbbbb");

		assert_eq!(packets.get(1), Some(&b"ccc"[..]));
		assert_eq!(packets.get(2), None);
	}

	#[test]
	fn iterate() {
		let bytes = page(0, 0, &[1, 2, 3], b"abbccc");
		let packets = Packets::read(&mut Cursor::new(bytes));

		let collected: Vec<&[u8]> = packets.iter().collect();
		assert_eq!(collected, vec![&b"a"[..], &b"bb"[..], &b"ccc"[..]]);
	}

	#[test]
	fn completed_per_page() {
		let mut packets = Packets::new();
		let mut reader = Cursor::new(page(0, 0, &[1, 255], &[b'x'; 256]));
		let first = crate::Page::read(&mut reader, false).unwrap();

		assert_eq!(packets.push_page(&first), 1);
		assert!(packets.has_pending());
	}

	#[test]
	fn unfinished_packet_discarded() {
		let first = vec![0; 255];
		let mut bytes = page(0, 0, &[255], &first);
		// Not marked as a continuation
		bytes.extend(page(0, 1, &[2], b"ok"));

		let packets = Packets::read(&mut Cursor::new(bytes));
		assert_eq!(packets.len(), 1);
		assert_eq!(packets.get(0), Some(&b"ok"[..]));
		assert!(!packets.has_pending());
	}
}
