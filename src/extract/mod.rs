pub mod confidence;
pub mod metadata;
pub mod text;

pub use confidence::{confidence, write_confidence};
pub use metadata::{MetadataField, MetadataReport, NOT_DEFINED, Section, metadata, write_metadata};
pub use text::{text_lines, write_text};
