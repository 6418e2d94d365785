//! File type detection and the aggregated read result

mod file_type;
mod tag_data;

pub use file_type::FileType;
pub use tag_data::AudioTagData;

pub(crate) use file_type::{ASF_HEADER_GUID, Signature};
