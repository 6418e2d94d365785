use crate::file::FileType;
use crate::picture::AudioImage;
use crate::properties::AudioProperties;
use crate::tag::{MetaTagIdentifier, TagSet, TagValue};

/// Everything read from an audio file
///
/// Created through [`Probe::read`](crate::probe::Probe::read). A few identifiers are always
/// present, even if the file doesn't have them:
///
/// | Identifier      | Default         |
/// |-----------------|-----------------|
/// | Title           | `Text("")`      |
/// | Artist          | `Text("")`      |
/// | Album           | `Text("")`      |
/// | Genre           | `Text("")`      |
/// | Comment         | `Text("")`      |
/// | RecordingYear   | `Text("")`      |
/// | TrackNumber     | `Integer(0)`    |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioTagData {
	pub(crate) file_type: FileType,
	pub(crate) tags: TagSet,
	pub(crate) properties: AudioProperties,
}

impl AudioTagData {
	pub(crate) fn new(file_type: FileType, mut tags: TagSet, properties: AudioProperties) -> Self {
		apply_defaults(&mut tags);

		Self {
			file_type,
			tags,
			properties,
		}
	}

	/// The type of file read
	pub fn file_type(&self) -> FileType {
		self.file_type
	}

	/// The tags, with defaults applied
	pub fn tags(&self) -> &TagSet {
		&self.tags
	}

	/// Embedded images, in file order
	pub fn images(&self) -> &[AudioImage] {
		self.tags.images()
	}

	/// The audio properties found while reading
	pub fn properties(&self) -> &AudioProperties {
		&self.properties
	}

	/// Consume the data, returning the tags
	pub fn into_tags(self) -> TagSet {
		self.tags
	}
}

fn apply_defaults(tags: &mut TagSet) {
	const TEXT_DEFAULTS: [MetaTagIdentifier; 6] = [
		MetaTagIdentifier::Title,
		MetaTagIdentifier::Artist,
		MetaTagIdentifier::Album,
		MetaTagIdentifier::Genre,
		MetaTagIdentifier::Comment,
		MetaTagIdentifier::RecordingYear,
	];

	for id in TEXT_DEFAULTS {
		if !tags.contains(&id.into()) {
			tags.force_insert(id, TagValue::Text(String::new()));
		}
	}

	tags.insert_if_absent(MetaTagIdentifier::TrackNumber, TagValue::Integer(0));
}
