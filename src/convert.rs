//! One-shot conversions: bytes (or text) in, a finished PDF out.
//!
//! Each conversion either succeeds completely or fails with the first error it hits; no
//! partial output is ever returned.

use crate::document::Document;
use crate::font::FontFace;
use crate::geometry::PageGeometry;
use crate::info::Info;
use crate::layout::{layout_paragraphs, place_explicit_runs, TextRun, DEFAULT_FONT_SIZE};
use crate::source::SourceDocument;
use crate::standard_font::StandardFont;
use crate::units::Pt;
use crate::PDFError;

pub const PDF_MIME_TYPE: &str = "application/pdf";

/// The serialised output of a conversion
#[derive(Debug, Clone, PartialEq)]
pub struct Converted {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
}

impl Converted {
    fn pdf(bytes: Vec<u8>) -> Converted {
        Converted {
            bytes,
            mime_type: PDF_MIME_TYPE,
        }
    }
}

/// Settings for generating a new PDF from plain text
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub geometry: PageGeometry,
    /// Measures the text while it is laid out, then shows it. A TrueType font is embedded
    /// in the output.
    pub font: FontFace,
    pub font_size: Pt,
    pub info: Option<Info>,
}

impl Default for GenerateOptions {
    /// A4 pages with 50pt margins, set in 12pt Times-Roman
    fn default() -> Self {
        GenerateOptions {
            geometry: PageGeometry::default(),
            font: FontFace::Standard(StandardFont::TimesRoman),
            font_size: DEFAULT_FONT_SIZE,
            info: None,
        }
    }
}

impl GenerateOptions {
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_font<F: Into<FontFace>>(mut self, font: F, size: Pt) -> Self {
        self.font = font.into();
        self.font_size = size;
        self
    }

    pub fn with_info(mut self, info: Info) -> Self {
        self.info = Some(info);
        self
    }
}

/// Settings for stamping text onto an existing PDF
#[derive(Debug, Clone)]
pub struct EditOptions {
    pub font: StandardFont,
    /// Used by [edit_pdf] when no text is given
    pub text: String,
    /// Used by [edit_pdf] for whichever coordinate isn't given
    pub position: (Pt, Pt),
    /// Used by [edit_pdf] for the size of the stamped text
    pub size: Pt,
}

impl Default for EditOptions {
    /// "Edited text" in 12pt Helvetica, 50pt from the bottom-left corner
    fn default() -> Self {
        EditOptions {
            font: StandardFont::Helvetica,
            text: "Edited text".to_string(),
            position: (Pt(50.0), Pt(50.0)),
            size: DEFAULT_FONT_SIZE,
        }
    }
}

/// Lays out `text` over as many pages as needed and writes them to a new PDF
pub fn create_pdf_from_text(text: &str, options: &GenerateOptions) -> Result<Converted, PDFError> {
    let layout = layout_paragraphs(text, options.geometry, options.font_size, &options.font)?;

    let mut doc = Document::new();
    if let Some(info) = &options.info {
        doc.set_info(info.clone());
    }
    let font = doc.add_font(options.font.clone());
    doc.add_layout(&layout, font);

    Ok(Converted::pdf(doc.to_bytes()?))
}

/// Stamps every run onto the page it targets in an existing PDF. Runs aimed at pages the
/// document doesn't have land on the first page.
pub fn add_text_to_pdf<I>(
    bytes: &[u8],
    runs: I,
    options: &EditOptions,
) -> Result<Converted, PDFError>
where
    I: IntoIterator<Item = TextRun>,
{
    let mut source = SourceDocument::load(bytes)?;
    let runs = place_explicit_runs(runs, source.page_count());
    log::debug!("stamping {} run(s)", runs.len());
    for run in runs.iter() {
        source.add_run(run, options.font)?;
    }

    Ok(Converted::pdf(source.save()?))
}

/// Stamps a single piece of text onto the first page of an existing PDF, filling in
/// anything not given (or empty text) from `options`
pub fn edit_pdf(
    bytes: &[u8],
    text: Option<&str>,
    x: Option<Pt>,
    y: Option<Pt>,
    options: &EditOptions,
) -> Result<Converted, PDFError> {
    let text = text
        .filter(|text| !text.is_empty())
        .unwrap_or(options.text.as_str());
    let run = TextRun::new(
        text,
        x.unwrap_or(options.position.0),
        y.unwrap_or(options.position.1),
    )
    .with_size(options.size);

    add_text_to_pdf(bytes, [run], options)
}
