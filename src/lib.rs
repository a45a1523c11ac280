pub mod batch;
pub mod document;
pub mod error;
pub mod extract;
pub mod parser;
pub mod types;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub mod wasm;

pub use batch::{
    BatchConfig, BatchReport, FileOutcome, Operation, OutputSink, discover_inputs, run_batch,
};
pub use document::AltoDocument;
pub use error::{AltoError, ErrorKind, Result};
pub use extract::{MetadataReport, Section, confidence, metadata, text_lines};
pub use types::{Element, Namespace, Tag};
