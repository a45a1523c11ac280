use std::io::{self, Write};

use crate::document::AltoDocument;
use crate::types::Element;

/// Printed for fields that are absent from the document.
pub const NOT_DEFINED: &str = "NOT_DEFINED";

const LABEL_WIDTH: usize = 27;

/// A report section, rooted at the first element of that name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Description,
    OcrProcessing,
    PreProcessingStep,
    OcrProcessingStep,
    PostProcessingStep,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Description,
        Section::OcrProcessing,
        Section::PreProcessingStep,
        Section::OcrProcessingStep,
        Section::PostProcessingStep,
    ];

    /// Element name of the section root, also used as the heading.
    pub fn element_name(self) -> &'static str {
        match self {
            Section::Description => "Description",
            Section::OcrProcessing => "OCRProcessing",
            Section::PreProcessingStep => "preProcessingStep",
            Section::OcrProcessingStep => "ocrProcessingStep",
            Section::PostProcessingStep => "postProcessingStep",
        }
    }

    pub fn fields(self) -> &'static [MetadataField] {
        match self {
            Section::Description => DESCRIPTION_FIELDS,
            Section::OcrProcessing => OCR_PROCESSING_FIELDS,
            Section::PreProcessingStep
            | Section::OcrProcessingStep
            | Section::PostProcessingStep => PROCESSING_STEP_FIELDS,
        }
    }
}

/// Where one value lives, relative to its section root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetadataField {
    pub label: &'static str,
    /// Child element names below the section root
    pub path: &'static [&'static str],
    /// Read this attribute of the resolved element instead of its text
    pub attribute: Option<&'static str>,
}

const fn text(label: &'static str, path: &'static [&'static str]) -> MetadataField {
    MetadataField {
        label,
        path,
        attribute: None,
    }
}

const DESCRIPTION_FIELDS: &[MetadataField] = &[
    text("fileName", &["sourceImageInformation", "fileName"]),
    text("fileIdentifier", &["sourceImageInformation", "fileIdentifier"]),
    text("documentIdentifier", &["sourceImageInformation", "documentIdentifier"]),
    text("MeasurementUnit", &["MeasurementUnit"]),
];

const OCR_PROCESSING_FIELDS: &[MetadataField] = &[MetadataField {
    label: "ID",
    path: &[],
    attribute: Some("ID"),
}];

const PROCESSING_STEP_FIELDS: &[MetadataField] = &[
    text("processingDateTime", &["processingDateTime"]),
    text("processingAgency", &["processingAgency"]),
    text("processingStepDescription", &["processingStepDescription"]),
    text("processingStepSettings", &["processingStepSettings"]),
    text("softwareCreator", &["processingSoftware", "softwareCreator"]),
    text("softwareName", &["processingSoftware", "softwareName"]),
    text("softwareVersion", &["processingSoftware", "softwareVersion"]),
    text("applicationDescription", &["processingSoftware", "applicationDescription"]),
];

/// Extracted metadata, every section and field in table order.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataReport {
    pub sections: Vec<SectionReport>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionReport {
    pub section: Section,
    pub fields: Vec<(&'static str, Option<String>)>,
}

impl MetadataReport {
    /// Value of `label` in `section`, `None` when undefined.
    pub fn get(&self, section: Section, label: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.section == section)?
            .fields
            .iter()
            .find(|(l, _)| *l == label)?
            .1
            .as_deref()
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for section in &self.sections {
            write!(out, "\n<{}>\n", section.section.element_name())?;
            for (label, value) in &section.fields {
                write!(
                    out,
                    "\n{:<width$}=   {}",
                    label,
                    value.as_deref().unwrap_or(NOT_DEFINED),
                    width = LABEL_WIDTH
                )?;
            }
            out.write_all(b"\n")?;
        }
        Ok(())
    }
}

/// Look up every field of the metadata table.
pub fn metadata(doc: &AltoDocument) -> MetadataReport {
    let sections = Section::ALL
        .into_iter()
        .map(|section| {
            let root = doc.find_first(section.element_name());
            let fields = section
                .fields()
                .iter()
                .map(|field| (field.label, root.and_then(|r| lookup(doc, r, field))))
                .collect();
            SectionReport { section, fields }
        })
        .collect();

    MetadataReport { sections }
}

pub fn write_metadata<W: Write>(doc: &AltoDocument, out: &mut W) -> io::Result<()> {
    metadata(doc).write_to(out)
}

/// Follow `field.path` child by child; any gap yields `None`.
fn lookup(doc: &AltoDocument, root: &Element, field: &MetadataField) -> Option<String> {
    let target = field
        .path
        .iter()
        .try_fold(root, |node, name| node.find_child(doc.tag(name)))?;

    let raw = match field.attribute {
        Some(attr) => target.attribute(attr)?,
        None => target.text()?,
    };

    let value = raw.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<alto xmlns="http://www.loc.gov/standards/alto/ns-v2#">
  <Description>
    <MeasurementUnit>pixel</MeasurementUnit>
    <sourceImageInformation>
      <fileName>page_0001.tif</fileName>
      <fileIdentifier> </fileIdentifier>
    </sourceImageInformation>
    <OCRProcessing ID="OCR_0">
      <ocrProcessingStep>
        <processingDateTime>2014-05-12T10:22:00</processingDateTime>
        <processingSoftware>
          <softwareCreator>ABBYY</softwareCreator>
          <softwareName>FineReader</softwareName>
          <softwareVersion>11.0</softwareVersion>
        </processingSoftware>
      </ocrProcessingStep>
    </OCRProcessing>
  </Description>
  <Layout/>
</alto>"#;

    fn doc(xml: &str) -> AltoDocument {
        AltoDocument::parse(xml.as_bytes(), "meta.xml").unwrap()
    }

    #[test]
    fn test_defined_fields() {
        let report = metadata(&doc(FULL));

        assert_eq!(report.get(Section::Description, "fileName"), Some("page_0001.tif"));
        assert_eq!(report.get(Section::Description, "MeasurementUnit"), Some("pixel"));
        assert_eq!(report.get(Section::OcrProcessing, "ID"), Some("OCR_0"));
        assert_eq!(
            report.get(Section::OcrProcessingStep, "processingDateTime"),
            Some("2014-05-12T10:22:00")
        );
        assert_eq!(report.get(Section::OcrProcessingStep, "softwareName"), Some("FineReader"));
        assert_eq!(report.get(Section::OcrProcessingStep, "softwareVersion"), Some("11.0"));
    }

    #[test]
    fn test_undefined_fields() {
        let report = metadata(&doc(FULL));

        // blank text counts as undefined
        assert_eq!(report.get(Section::Description, "fileIdentifier"), None);
        assert_eq!(report.get(Section::Description, "documentIdentifier"), None);
        assert_eq!(report.get(Section::OcrProcessingStep, "applicationDescription"), None);
        assert_eq!(report.get(Section::PreProcessingStep, "processingAgency"), None);
        assert_eq!(report.get(Section::PostProcessingStep, "softwareName"), None);
    }

    #[test]
    fn test_missing_file_name_keeps_other_fields() {
        let xml = FULL.replace("<fileName>page_0001.tif</fileName>", "");
        let report = metadata(&doc(&xml));

        assert_eq!(report.get(Section::Description, "fileName"), None);
        assert_eq!(report.get(Section::Description, "MeasurementUnit"), Some("pixel"));
        assert_eq!(report.get(Section::OcrProcessing, "ID"), Some("OCR_0"));

        let mut out = Vec::new();
        report.write_to(&mut out).unwrap();
        let rendered = String::from_utf8(out).unwrap();
        assert!(rendered.contains("\nfileName                   =   NOT_DEFINED"));
    }

    #[test]
    fn test_every_section_has_every_field() {
        let report = metadata(&doc(
            r#"<alto xmlns="http://www.loc.gov/standards/alto/ns-v3#"/>"#,
        ));

        assert_eq!(report.sections.len(), 5);
        for (section, expected) in report.sections.iter().zip(Section::ALL) {
            assert_eq!(section.section, expected);
            assert_eq!(section.fields.len(), expected.fields().len());
            assert!(section.fields.iter().all(|(_, v)| v.is_none()));
        }
    }

    #[test]
    fn test_rendering() {
        let xml = r#"<alto xmlns="http://schema.ccs-gmbh.com/ALTO">
            <Description><MeasurementUnit>mm10</MeasurementUnit></Description>
        </alto>"#;
        let mut out = Vec::new();
        write_metadata(&doc(xml), &mut out).unwrap();
        let rendered = String::from_utf8(out).unwrap();

        assert!(rendered.starts_with(
            "\n<Description>\n\nfileName                   =   NOT_DEFINED"
        ));
        assert!(rendered.contains("\nMeasurementUnit            =   mm10\n\n<OCRProcessing>\n"));
        assert!(rendered.contains("\nID                         =   NOT_DEFINED\n"));
        assert!(rendered.ends_with("applicationDescription     =   NOT_DEFINED\n"));
        assert_eq!(rendered.matches("<preProcessingStep>").count(), 1);
    }

    #[test]
    fn test_deterministic() {
        let doc = doc(FULL);
        let render = || {
            let mut out = Vec::new();
            write_metadata(&doc, &mut out).unwrap();
            out
        };
        assert_eq!(metadata(&doc), metadata(&doc));
        assert_eq!(render(), render());
    }
}
