use std::fmt;

/// Registered ALTO schema namespaces.
///
/// The versions differ only in their URI; the element and attribute names
/// read by the extractors are the same across all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    AltoV1,
    AltoV2,
    AltoV3,
}

impl Namespace {
    pub const ALL: [Namespace; 3] = [Namespace::AltoV1, Namespace::AltoV2, Namespace::AltoV3];

    pub fn uri(self) -> &'static str {
        match self {
            Namespace::AltoV1 => "http://schema.ccs-gmbh.com/ALTO",
            Namespace::AltoV2 => "http://www.loc.gov/standards/alto/ns-v2#",
            Namespace::AltoV3 => "http://www.loc.gov/standards/alto/ns-v3#",
        }
    }

    /// Exact, case-sensitive match against the registered URIs.
    pub fn from_uri(uri: &str) -> Option<Namespace> {
        Self::ALL.into_iter().find(|ns| ns.uri() == uri)
    }

    pub fn version(self) -> u8 {
        match self {
            Namespace::AltoV1 => 1,
            Namespace::AltoV2 => 2,
            Namespace::AltoV3 => 3,
        }
    }

    /// Qualify a local element name with this namespace.
    pub fn tag(self, local: &str) -> Tag<'_> {
        Tag {
            namespace: self.uri(),
            local,
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ALTO v{} ({})", self.version(), self.uri())
    }
}

/// Namespace-qualified element name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag<'a> {
    pub namespace: &'static str,
    pub local: &'a str,
}

impl fmt::Display for Tag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Clark notation
        write!(f, "{{{}}}{}", self.namespace, self.local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_uri() {
        for ns in Namespace::ALL {
            assert_eq!(Namespace::from_uri(ns.uri()), Some(ns));
        }
        assert_eq!(Namespace::from_uri("http://www.loc.gov/standards/alto/ns-v4#"), None);
        assert_eq!(Namespace::from_uri("http://schema.ccs-gmbh.com/alto"), None);
        assert_eq!(Namespace::from_uri(""), None);
    }

    #[test]
    fn test_tag_display() {
        let tag = Namespace::AltoV2.tag("TextLine");
        assert_eq!(
            tag.to_string(),
            "{http://www.loc.gov/standards/alto/ns-v2#}TextLine"
        );
    }
}
