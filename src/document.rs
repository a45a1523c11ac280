use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::debug;

use crate::error::{AltoError, Result};
use crate::parser::parse_tree;
use crate::types::{Descendants, Element, Namespace, Tag};

/// Parsed ALTO document
///
/// Immutable after loading. Every query goes through the namespace the
/// root element declared.
#[derive(Debug, Clone)]
pub struct AltoDocument {
    root: Element,
    namespace: Namespace,
    source: String,
}

impl AltoDocument {
    /// Parse an ALTO document from bytes.
    ///
    /// `source` names the input in reports (usually its path).
    pub fn parse(data: &[u8], source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let root = parse_tree(data)?;

        let namespace = root
            .namespace
            .as_deref()
            .and_then(Namespace::from_uri)
            .ok_or_else(|| AltoError::UnknownNamespace(root.namespace.clone()))?;

        debug!("{}: parsed as {}", source, namespace);

        Ok(AltoDocument {
            root,
            namespace,
            source,
        })
    }

    /// Read and parse an ALTO file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => AltoError::NotFound(path.to_path_buf()),
            _ => AltoError::Unreadable {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        Self::parse(&data, path.display().to_string())
    }

    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Qualify a local name with the document's namespace.
    pub fn tag<'a>(&self, local: &'a str) -> Tag<'a> {
        self.namespace.tag(local)
    }

    /// All elements below the root, in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        self.root.descendants()
    }

    /// All descendants named `local` in the document namespace.
    pub fn find_all<'a>(&'a self, local: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.root.descendants_named(self.tag(local))
    }

    /// First descendant named `local` in the document namespace.
    pub fn find_first(&self, local: &str) -> Option<&Element> {
        self.root.find_descendant(self.tag(local))
    }
}
