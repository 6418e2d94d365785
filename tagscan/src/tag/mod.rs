//! The format-independent tag model
//!
//! Every reader decodes into a [`TagSet`], a map of [`TagIdentifier`] to [`TagValue`]. Each
//! canonical identifier always holds the same kind of value:
//!
//! | Kind                  | Identifiers                                              |
//! |-----------------------|----------------------------------------------------------|
//! | [`TagValue::Integer`] | TrackNumber, DiscNumber, Bpm, SongTotal, DiscTotal       |
//! | [`TagValue::Boolean`] | Compilation                                              |
//! | [`TagValue::Images`]  | Images                                                   |
//! | [`TagValue::Text`]    | Everything else                                          |
//!
//! Vendor identifiers keep the kind of their source value.

mod identifier;
mod value;

pub use identifier::{MetaTagIdentifier, TagIdentifier};
pub use value::TagValue;

use crate::picture::AudioImage;
use crate::util::text::trim_padding;
use identifier::ValueKind;
pub(crate) use value::{parse_boolean, parse_leading_number, split_number_pair};

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// A set of decoded tags
///
/// Keys are unique. When the same identifier is inserted twice, the later value wins, so
/// readers insert in file order.
///
/// # Examples
///
/// ```rust
/// use tagscan::tag::{MetaTagIdentifier, TagSet, TagValue};
///
/// let mut tags = TagSet::new();
/// tags.insert_text(MetaTagIdentifier::Title, "First");
/// tags.insert_text(MetaTagIdentifier::Title, "Second");
///
/// assert_eq!(tags.text(MetaTagIdentifier::Title), Some("Second"));
/// assert_eq!(tags.len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagSet {
	items: BTreeMap<TagIdentifier, TagValue>,
}

impl TagSet {
	/// Create an empty `TagSet`
	pub fn new() -> Self {
		Self::default()
	}

	/// The number of tags in the set
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Whether the set has no tags
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Get the value of `id`
	pub fn get(&self, id: &TagIdentifier) -> Option<&TagValue> {
		self.items.get(id)
	}

	/// Get the value of a canonical identifier
	pub fn get_canonical(&self, id: MetaTagIdentifier) -> Option<&TagValue> {
		self.items.get(&TagIdentifier::Canonical(id))
	}

	/// Get the text value of a canonical identifier
	pub fn text(&self, id: MetaTagIdentifier) -> Option<&str> {
		self.get_canonical(id).and_then(TagValue::text)
	}

	/// Get the integer value of a canonical identifier
	pub fn integer(&self, id: MetaTagIdentifier) -> Option<i32> {
		self.get_canonical(id).and_then(TagValue::integer)
	}

	/// Get the boolean value of a canonical identifier
	pub fn boolean(&self, id: MetaTagIdentifier) -> Option<bool> {
		self.get_canonical(id).and_then(TagValue::boolean)
	}

	/// Whether the set holds a value for `id`
	pub fn contains(&self, id: &TagIdentifier) -> bool {
		self.items.contains_key(id)
	}

	/// All images, in file order
	pub fn images(&self) -> &[AudioImage] {
		self.get_canonical(MetaTagIdentifier::Images)
			.and_then(TagValue::images)
			.unwrap_or_default()
	}

	/// Iterate over the tags, ordered by identifier
	pub fn iter(&self) -> impl Iterator<Item = (&TagIdentifier, &TagValue)> {
		self.items.iter()
	}

	/// Insert a value, replacing any existing value for `id`
	///
	/// Empty text is never stored.
	pub fn insert(&mut self, id: impl Into<TagIdentifier>, value: TagValue) {
		if let TagValue::Text(text) = &value {
			if text.is_empty() {
				return;
			}
		}

		self.items.insert(id.into(), value);
	}

	// Skips the empty text check, for default values
	pub(crate) fn force_insert(&mut self, id: impl Into<TagIdentifier>, value: TagValue) {
		self.items.insert(id.into(), value);
	}

	/// Insert a value only if `id` has none yet
	///
	/// Returns whether the value was inserted.
	pub fn insert_if_absent(&mut self, id: impl Into<TagIdentifier>, value: TagValue) -> bool {
		if matches!(&value, TagValue::Text(text) if text.is_empty()) {
			return false;
		}

		match self.items.entry(id.into()) {
			Entry::Vacant(entry) => {
				entry.insert(value);
				true
			},
			Entry::Occupied(_) => false,
		}
	}

	/// Insert text, trimmed of NUL and space padding
	pub fn insert_text(&mut self, id: impl Into<TagIdentifier>, text: &str) {
		self.insert(id, TagValue::Text(trim_padding(text).to_owned()));
	}

	/// Insert `raw`, converted to the value kind of `id`
	///
	/// * Track and disc numbers take the number before `/`, and a total after it fills
	///   `SongTotal`/`DiscTotal`.
	/// * Other integer identifiers take the leading number.
	/// * `Compilation` accepts `1`/`0`/`true`/`false`.
	/// * Vendor identifiers, and everything else, are stored as trimmed text.
	///
	/// Values that don't convert are dropped.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagscan::tag::{MetaTagIdentifier, TagSet};
	///
	/// let mut tags = TagSet::new();
	/// tags.insert_parsed(MetaTagIdentifier::TrackNumber, "3/12");
	///
	/// assert_eq!(tags.integer(MetaTagIdentifier::TrackNumber), Some(3));
	/// assert_eq!(tags.integer(MetaTagIdentifier::SongTotal), Some(12));
	/// ```
	pub fn insert_parsed(&mut self, id: impl Into<TagIdentifier>, raw: &str) {
		let id = id.into();
		let TagIdentifier::Canonical(meta) = id else {
			self.insert_text(id, raw);
			return;
		};

		let raw = trim_padding(raw);
		match meta.kind() {
			ValueKind::Integer => {
				let total_id = match meta {
					MetaTagIdentifier::TrackNumber => Some(MetaTagIdentifier::SongTotal),
					MetaTagIdentifier::DiscNumber => Some(MetaTagIdentifier::DiscTotal),
					_ => None,
				};

				let (number, total) = match total_id {
					Some(_) => split_number_pair(raw),
					None => (parse_leading_number(raw), None),
				};

				if let Some(number) = number {
					self.insert(meta, TagValue::Integer(number));
				}

				if let (Some(total_id), Some(total)) = (total_id, total) {
					self.insert(total_id, TagValue::Integer(total));
				}
			},
			ValueKind::Boolean => {
				if let Some(flag) = parse_boolean(raw) {
					self.insert(meta, TagValue::Boolean(flag));
				}
			},
			ValueKind::Text => self.insert(meta, TagValue::Text(raw.to_owned())),
			ValueKind::Images => {
				log::warn!("Attempted to store text as images, discarding");
			},
		}
	}

	/// Append an image to the `Images` tag
	pub fn push_image(&mut self, image: AudioImage) {
		match self
			.items
			.entry(TagIdentifier::Canonical(MetaTagIdentifier::Images))
		{
			Entry::Occupied(mut entry) => match entry.get_mut() {
				TagValue::Images(images) => images.push(image),
				other => *other = TagValue::Images(vec![image]),
			},
			Entry::Vacant(entry) => {
				entry.insert(TagValue::Images(vec![image]));
			},
		}
	}

	/// Remove the value of `id`, returning it
	pub fn remove(&mut self, id: &TagIdentifier) -> Option<TagValue> {
		self.items.remove(id)
	}

	/// Fill every identifier missing from this set from `other`
	///
	/// Existing values are never overwritten.
	pub fn fill_missing(&mut self, other: TagSet) {
		for (id, value) in other.items {
			self.insert_if_absent(id, value);
		}
	}
}

impl IntoIterator for TagSet {
	type Item = (TagIdentifier, TagValue);
	type IntoIter = std::collections::btree_map::IntoIter<TagIdentifier, TagValue>;

	fn into_iter(self) -> Self::IntoIter {
		self.items.into_iter()
	}
}
