use wasm_bindgen::prelude::*;

use crate::extract::{confidence, write_metadata, write_text};
use crate::AltoDocument;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn load(data: &[u8]) -> Result<AltoDocument, JsValue> {
    AltoDocument::parse(data, "input")
        .map_err(|e| JsValue::from_str(&format!("Parse error: {}", e)))
}

fn into_string(buf: Vec<u8>) -> Result<String, JsValue> {
    String::from_utf8(buf).map_err(|e| JsValue::from_str(&format!("Encoding error: {}", e)))
}

/// Parse an ALTO file and return its text, one line per TextLine
#[wasm_bindgen]
pub fn alto_to_text(data: &[u8]) -> Result<String, JsValue> {
    let doc = load(data)?;
    let mut buf = Vec::new();
    write_text(&doc, &mut buf).map_err(|e| JsValue::from_str(&format!("Text error: {}", e)))?;
    into_string(buf)
}

/// Mean word confidence as a percentage
#[wasm_bindgen]
pub fn alto_confidence(data: &[u8]) -> Result<f64, JsValue> {
    let doc = load(data)?;
    confidence(&doc).map_err(|e| JsValue::from_str(&format!("Confidence error: {}", e)))
}

/// Metadata report in the same layout as the command line tool
#[wasm_bindgen]
pub fn alto_metadata(data: &[u8]) -> Result<String, JsValue> {
    let doc = load(data)?;
    let mut buf = Vec::new();
    write_metadata(&doc, &mut buf)
        .map_err(|e| JsValue::from_str(&format!("Metadata error: {}", e)))?;
    into_string(buf)
}

/// ALTO schema version (1, 2 or 3) declared by the document
#[wasm_bindgen]
pub fn alto_version(data: &[u8]) -> Result<u8, JsValue> {
    Ok(load(data)?.namespace().version())
}
