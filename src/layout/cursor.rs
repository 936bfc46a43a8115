use super::metrics::GlyphMetrics;
use super::run::{PageLayout, TextRun};
use crate::geometry::PageGeometry;
use crate::units::Pt;
use crate::PDFError;

/// The running state of a single greedy layout pass.
///
/// A cursor owns the pages filled so far, the page currently being filled, the baseline of
/// the next line and the words gathered for the line being built. It is consumed and
/// returned by each step so that a layout can be written as a fold:
///
/// ```
/// use pdf_textflow::layout::{FixedAdvance, LayoutCursor};
/// use pdf_textflow::{PageGeometry, Pt};
///
/// let geometry = PageGeometry::new(Pt(200.0), Pt(200.0), Pt(10.0)).unwrap();
/// let metrics = FixedAdvance::new(0.5);
/// let cursor = LayoutCursor::new(geometry, Pt(10.0)).unwrap();
/// let pages = "one two three"
///     .split_whitespace()
///     .fold(cursor, |cursor, word| cursor.push_word(word, &metrics))
///     .end_line()
///     .finish();
/// assert_eq!(pages[0].runs[0].text, "one two three");
/// ```
#[derive(Debug, Clone)]
pub struct LayoutCursor {
    geometry: PageGeometry,
    font_size: Pt,
    line_height: Pt,
    max_lines: usize,
    finished: Vec<PageLayout>,
    page: PageLayout,
    y: Pt,
    line: String,
}

impl LayoutCursor {
    /// Starts a layout on a fresh first page. Fails if the font size is not positive or if
    /// not even one line of that size fits between the top and bottom margins.
    pub fn new(geometry: PageGeometry, font_size: Pt) -> Result<LayoutCursor, PDFError> {
        if !(font_size.is_finite() && font_size > Pt(0.0)) {
            return Err(PDFError::InvalidGeometry(format!(
                "font size must be positive, got {font_size}"
            )));
        }
        let max_lines = geometry.max_lines(font_size);
        if max_lines == 0 {
            return Err(PDFError::InvalidGeometry(format!(
                "a {font_size} line does not fit in {} of printable height",
                geometry.printable_height()
            )));
        }

        Ok(LayoutCursor {
            geometry,
            font_size,
            line_height: PageGeometry::line_height(font_size),
            max_lines,
            finished: Vec::new(),
            page: PageLayout::new(geometry),
            y: geometry.top(),
            line: String::new(),
        })
    }

    /// Lines that fit on each page
    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    /// Lines already consumed on the current page
    pub fn lines_on_page(&self) -> usize {
        self.page.lines
    }

    /// Baseline at which the next line will be placed, unless it needs a new page
    pub fn y(&self) -> Pt {
        self.y
    }

    /// Adds a word to the line being built. If the line with the word appended would be
    /// wider than the printable width, the line is placed first and the word starts the next
    /// one. A word that is too wide on its own is kept whole.
    pub fn push_word<M: GlyphMetrics + ?Sized>(mut self, word: &str, metrics: &M) -> LayoutCursor {
        if self.line.is_empty() {
            self.line.push_str(word);
            return self;
        }

        let candidate = format!("{} {}", self.line, word);
        if metrics.width_of(&candidate, self.font_size) > self.geometry.printable_width() {
            let full = std::mem::replace(&mut self.line, word.to_string());
            self.place(Some(full));
        } else {
            self.line = candidate;
        }
        self
    }

    /// Ends a logical line: places whatever has been gathered, or a blank line if nothing
    /// was. Blank lines still take up vertical space and count against the page.
    pub fn end_line(mut self) -> LayoutCursor {
        if self.line.is_empty() {
            self.place(None);
        } else {
            let line = std::mem::take(&mut self.line);
            self.place(Some(line));
        }
        self
    }

    /// Consumes the cursor, returning every page produced. A line still being built is
    /// placed first. The last page is always returned, even if nothing was placed on it.
    pub fn finish(mut self) -> Vec<PageLayout> {
        if !self.line.is_empty() {
            let line = std::mem::take(&mut self.line);
            self.place(Some(line));
        }
        let mut pages = self.finished;
        pages.push(self.page);
        pages
    }

    fn place(&mut self, text: Option<String>) {
        if self.lines_on_page() >= self.max_lines {
            self.start_page();
        }

        let page_index = self.finished.len();
        let y = self.y;
        self.y -= self.line_height;

        self.page.lines += 1;
        if let Some(text) = text {
            log::trace!("page {page_index}: {y} {text:?}");
            self.page.runs.push(TextRun {
                text,
                x: self.geometry.margin(),
                y,
                size: self.font_size,
                page: page_index,
            });
        }
    }

    fn start_page(&mut self) {
        log::debug!(
            "page {} full after {} lines, starting page {}",
            self.finished.len(),
            self.max_lines,
            self.finished.len() + 1
        );
        let full = std::mem::replace(&mut self.page, PageLayout::new(self.geometry));
        self.finished.push(full);
        self.y = self.geometry.top();
    }
}
