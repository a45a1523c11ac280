use std::io::{self, Write};

use crate::document::AltoDocument;

/// Reconstruct one line of text per `TextLine`, in document order.
///
/// Each word of the line is followed by a single space, so a line with
/// tokens `Hello` and `World` reads `"Hello World "`. A `String` without a
/// `CONTENT` attribute contributes an empty word.
pub fn text_lines(doc: &AltoDocument) -> Vec<String> {
    let string_tag = doc.tag("String");

    doc.find_all("TextLine")
        .map(|line| {
            let mut out = String::new();
            for token in line.children_named(string_tag) {
                out.push_str(token.attribute("CONTENT").unwrap_or_default());
                out.push(' ');
            }
            out
        })
        .collect()
}

/// Write the document text, emitting a line break before every line.
pub fn write_text<W: Write>(doc: &AltoDocument, out: &mut W) -> io::Result<()> {
    for line in text_lines(doc) {
        out.write_all(b"\n")?;
        out.write_all(line.as_bytes())?;
    }
    Ok(())
}
