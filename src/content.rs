//! Content stream rendering for generated pages.

use crate::font::FontFace;
use crate::page::{SpanFont, SpanLayout};
use crate::PDFError;
use id_arena::Arena;
use pdf_writer::{Content, Name, Str};

/// Renders spans into a single text object. Every span is positioned with its own text
/// matrix, so spans don't depend on each other's placement, and fonts are only switched
/// when they change between consecutive spans. Text is filled in black.
pub(crate) fn render_spans(
    spans: &[SpanLayout],
    fonts: &Arena<FontFace>,
) -> Result<Vec<u8>, PDFError> {
    if spans.is_empty() {
        return Ok(Vec::default());
    }

    let mut content = Content::new();
    content.save_state();
    content.set_fill_gray(0.0);
    content.begin_text();

    let mut current_font: Option<SpanFont> = None;
    for span in spans.iter() {
        let face = fonts.get(span.font.id).ok_or_else(|| {
            PDFError::DocumentSave(format!(
                "span {:?} uses font {} which isn't in the document",
                span.text,
                span.font.id.index()
            ))
        })?;

        if current_font != Some(span.font) {
            content.set_font(
                Name(format!("F{}", span.font.id.index()).as_bytes()),
                span.font.size.0,
            );
            current_font = Some(span.font);
        }

        let (x, y) = span.coords;
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x.0, y.0]);
        content.show(Str(&face.encode(&span.text)));
    }

    content.end_text();
    content.restore_state();
    Ok(content.finish())
}
