use std::io::Write;

use log::debug;

use crate::document::AltoDocument;
use crate::error::{AltoError, Result};

/// Mean word confidence over every `String` element, as a percentage
/// rounded to two decimals.
///
/// Rounding is half away from zero on the scaled value. A missing or
/// non-numeric `WC` fails the whole document rather than counting as zero.
pub fn confidence(doc: &AltoDocument) -> Result<f64> {
    let mut sum = 0.0_f64;
    let mut count = 0_usize;

    for token in doc.find_all("String") {
        sum += parse_wc(token.attribute("WC"))?;
        count += 1;
    }

    if count == 0 {
        return Err(AltoError::NoTokens);
    }

    debug!("{}: {} words, WC sum {}", doc.source(), count, sum);

    Ok(round2(100.0 * sum / count as f64))
}

/// Write the `File: ..., Confidence: ...` report line.
///
/// The score uses the shortest round-trip form, always with a decimal
/// point (`50.0`, `77.67`).
pub fn write_confidence<W: Write>(doc: &AltoDocument, out: &mut W) -> Result<()> {
    let score = confidence(doc)?;
    write!(out, "\nFile: {}, Confidence: {:?}", doc.source(), score)?;
    Ok(())
}

fn parse_wc(raw: Option<&str>) -> Result<f64> {
    let value = raw
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite());

    value.ok_or_else(|| AltoError::BadConfidenceValue(raw.map(str::to_string)))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(strings: &[&str]) -> AltoDocument {
        let body: String = strings
            .iter()
            .map(|s| format!("<String CONTENT=\"w\" {s}/>"))
            .collect();
        let xml = format!(
            r#"<alto xmlns="http://schema.ccs-gmbh.com/ALTO"><TextLine>{body}</TextLine></alto>"#
        );
        AltoDocument::parse(xml.as_bytes(), "scan.xml").unwrap()
    }

    #[test]
    fn test_mean_of_four() {
        let doc = doc(&[r#"WC="1.0""#, r#"WC="1.0""#, r#"WC="0.0""#, r#"WC="0.0""#]);
        assert_eq!(confidence(&doc).unwrap(), 50.0);
    }

    #[test]
    fn test_counts_across_lines() {
        let xml = r#"<alto xmlns="http://www.loc.gov/standards/alto/ns-v3#">
            <TextLine><String WC="0.9"/></TextLine>
            <TextLine><String WC="0.8"/><String WC="0.7"/></TextLine>
        </alto>"#;
        let doc = AltoDocument::parse(xml.as_bytes(), "x").unwrap();
        assert_eq!(confidence(&doc).unwrap(), 80.0);
    }

    #[test]
    fn test_rounds_to_hundredths() {
        let doc = doc(&[r#"WC="0.91""#, r#"WC="0.87""#, r#"WC="0.55""#]);
        // 0.7766666... -> 77.67
        assert_eq!(confidence(&doc).unwrap(), 77.67);
    }

    #[test]
    fn test_no_tokens() {
        let doc = doc(&[]);
        assert!(matches!(confidence(&doc), Err(AltoError::NoTokens)));
    }

    #[test]
    fn test_missing_wc() {
        let doc = doc(&[r#"WC="0.5""#, ""]);
        assert!(matches!(
            confidence(&doc),
            Err(AltoError::BadConfidenceValue(None))
        ));
    }

    #[test]
    fn test_non_numeric_wc() {
        let doc = doc(&[r#"WC="high""#]);
        match confidence(&doc) {
            Err(AltoError::BadConfidenceValue(Some(v))) => assert_eq!(v, "high"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_wc() {
        let doc = doc(&[r#"WC="NaN""#]);
        assert!(matches!(
            confidence(&doc),
            Err(AltoError::BadConfidenceValue(Some(_)))
        ));
    }

    #[test]
    fn test_report_line() {
        let doc = doc(&[r#"WC="1""#, r#"WC="0""#]);
        let mut out = Vec::new();
        write_confidence(&doc, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\nFile: scan.xml, Confidence: 50.0"
        );
    }

    #[test]
    fn test_report_line_keeps_hundredths() {
        let doc = doc(&[r#"WC="0.91""#, r#"WC="0.87""#, r#"WC="0.55""#]);
        let mut out = Vec::new();
        write_confidence(&doc, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\nFile: scan.xml, Confidence: 77.67"
        );
    }
}
