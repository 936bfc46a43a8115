use super::cursor::LayoutCursor;
use super::metrics::GlyphMetrics;
use super::run::PageLayout;
use crate::geometry::PageGeometry;
use crate::units::Pt;
use crate::PDFError;

/// Lays out plain text over as many pages as it needs, using greedy word wrapping.
///
/// The text is split into logical lines on newlines (`\n`, `\r\n` or `\r`), and each logical
/// line into whitespace separated words. Words are gathered onto a line until the next word
/// would make it wider than the printable width, at which point the line is placed at the
/// left margin and a new one begins. A word wider than the printable width on its own is
/// placed alone and left to overflow; words are never split.
///
/// Lines are spaced `font_size * 1.5` apart, starting at `height - margin`. Once a page holds
/// as many lines as [PageGeometry::max_lines] allows, the next line starts a new page. Blank
/// logical lines take up a line without placing any text.
///
/// Empty text yields a single page with nothing on it. The only failure is
/// [PDFError::InvalidGeometry], raised before any layout when the font size is not positive
/// or a single line doesn't fit on the page.
pub fn layout_paragraphs<M: GlyphMetrics + ?Sized>(
    text: &str,
    geometry: PageGeometry,
    font_size: Pt,
    metrics: &M,
) -> Result<Vec<PageLayout>, PDFError> {
    let cursor = LayoutCursor::new(geometry, font_size)?;
    if text.is_empty() {
        return Ok(cursor.finish());
    }

    // normalize newlines
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    log::debug!(
        "laying out {} bytes at {font_size}, {} lines per page",
        text.len(),
        cursor.max_lines()
    );

    let pages = text
        .split('\n')
        .fold(cursor, |cursor, line| {
            line.split_whitespace()
                .fold(cursor, |cursor, word| cursor.push_word(word, metrics))
                .end_line()
        })
        .finish();

    log::debug!("layout finished on {} page(s)", pages.len());
    Ok(pages)
}
