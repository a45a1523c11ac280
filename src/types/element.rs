use crate::types::Tag;

/// A node of the parsed XML tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    /// Resolved namespace URI, `None` for unqualified elements
    pub namespace: Option<String>,
    /// Local element name
    pub name: String,
    /// Attributes in document order. Unprefixed attributes are keyed by
    /// local name, prefixed ones keep their qualified key.
    pub attributes: Vec<(String, String)>,
    /// Character data before the first child, entity-unescaped. Text
    /// following a child element is not kept.
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(namespace: Option<String>, name: impl Into<String>) -> Self {
        Self {
            namespace,
            name: name.into(),
            attributes: Vec::new(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    pub fn matches(&self, tag: Tag<'_>) -> bool {
        self.name == tag.local && self.namespace.as_deref() == Some(tag.namespace)
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Character data, or `None` when there is none.
    pub fn text(&self) -> Option<&str> {
        if self.text.is_empty() {
            None
        } else {
            Some(&self.text)
        }
    }

    /// First direct child with the given tag.
    pub fn find_child(&self, tag: Tag<'_>) -> Option<&Element> {
        self.children.iter().find(|c| c.matches(tag))
    }

    pub fn children_named<'a>(&'a self, tag: Tag<'a>) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.matches(tag))
    }

    /// All elements below this one, in document order (pre-order).
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// First descendant with the given tag.
    pub fn find_descendant(&self, tag: Tag<'_>) -> Option<&Element> {
        self.descendants().find(|e| e.matches(tag))
    }

    pub fn descendants_named<'a>(
        &'a self,
        tag: Tag<'a>,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        self.descendants().filter(move |e| e.matches(tag))
    }
}

// Trees can be nested far deeper than the call stack allows, so children
// are released from a work list instead of recursively.
impl Drop for Element {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut child) = pending.pop() {
            pending.append(&mut child.children);
        }
    }
}

/// Depth-first iterator over the descendants of an element.
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}
