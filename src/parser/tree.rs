use quick_xml::NsReader;
use quick_xml::encoding::Decoder;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;

use crate::error::{AltoError, Result};
use crate::types::Element;

/// Namespace of an element, or the unbound prefix it used.
type ResolvedNamespace = std::result::Result<Option<String>, Vec<u8>>;

/// Parse XML bytes into an element tree, resolving namespaces.
///
/// Input is decoded by its BOM or declared `encoding`, UTF-8 otherwise.
pub fn parse_tree(data: &[u8]) -> Result<Element> {
    let mut reader = NsReader::from_reader(data);
    let mut buf = Vec::new();

    // Open elements, innermost last
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let (resolved, event) = match reader.read_resolved_event_into(&mut buf) {
            Ok(pair) => pair,
            Err(e) => return Err(AltoError::syntax(e.to_string())),
        };
        let namespace = owned_namespace(resolved);
        // Picks up the encoding once the declaration has been read
        let decoder = reader.decoder();

        match event {
            Event::Start(ref e) => {
                let element = open_element(namespace, e, decoder)?;
                stack.push(element);
            }
            Event::Empty(ref e) => {
                let element = open_element(namespace, e, decoder)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| AltoError::syntax("Unexpected closing tag"))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(e) => {
                let text = e
                    .unescape()
                    .map_err(|e| AltoError::syntax(e.to_string()))?;
                push_text(&mut stack, &text)?;
            }
            Event::CData(e) => {
                let bytes = e.into_inner();
                let text = decoder
                    .decode(&bytes)
                    .map_err(|e| AltoError::syntax(e.to_string()))?;
                push_text(&mut stack, &text)?;
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctype
            _ => {}
        }

        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(AltoError::syntax(format!(
            "Unexpected end of input: element <{}> is not closed",
            open.name
        )));
    }

    root.ok_or_else(|| AltoError::syntax("No root element found"))
}

fn owned_namespace(resolved: ResolveResult<'_>) -> ResolvedNamespace {
    match resolved {
        ResolveResult::Bound(ns) => Ok(Some(String::from_utf8_lossy(ns.as_ref()).into_owned())),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(prefix),
    }
}

fn decode(decoder: Decoder, bytes: &[u8]) -> Result<String> {
    decoder
        .decode(bytes)
        .map(|s| s.into_owned())
        .map_err(|e| AltoError::syntax(e.to_string()))
}

fn open_element(
    namespace: ResolvedNamespace,
    start: &BytesStart<'_>,
    decoder: Decoder,
) -> Result<Element> {
    let name = decode(decoder, start.local_name().as_ref())?;

    let namespace = namespace.map_err(|prefix| {
        AltoError::syntax(format!(
            "Unknown namespace prefix '{}' on element <{}>",
            String::from_utf8_lossy(&prefix),
            name
        ))
    })?;

    let mut element = Element::new(namespace, name);

    for attr in start.attributes() {
        let attr = attr.map_err(|e| AltoError::syntax(e.to_string()))?;

        // Namespace declarations are consumed by the reader
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }

        let key = if attr.key.prefix().is_none() {
            decode(decoder, attr.key.local_name().as_ref())?
        } else {
            decode(decoder, attr.key.as_ref())?
        };
        let raw = decode(decoder, &attr.value)?;
        let value = unescape(&raw)
            .map_err(|e| AltoError::syntax(e.to_string()))?
            .into_owned();

        element.attributes.push((key, value));
    }

    Ok(element)
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }

    if root.is_some() {
        return Err(AltoError::syntax(format!(
            "Multiple root elements: unexpected <{}>",
            element.name
        )));
    }

    *root = Some(element);
    Ok(())
}

/// Keep character data up to the first child; text after a child is dropped.
fn push_text(stack: &mut [Element], text: &str) -> Result<()> {
    match stack.last_mut() {
        Some(current) => {
            if current.children.is_empty() {
                current.text.push_str(text);
            }
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(AltoError::syntax("Text content outside of root element")),
    }
}
