use crate::geometry::PageGeometry;
use crate::units::Pt;

/// Font size used for runs that don't ask for one
pub const DEFAULT_FONT_SIZE: Pt = Pt(12.0);

/// A piece of text anchored at a baseline position on a page.
///
/// Runs produced by [layout_paragraphs](crate::layout::layout_paragraphs) carry the index of
/// the generated page they were placed on. Runs built by callers name the page they should
/// be stamped onto, which [place_explicit_runs](crate::layout::place_explicit_runs) resolves
/// against the pages a document actually has.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x: Pt,
    pub y: Pt,
    pub size: Pt,
    pub page: usize,
}

impl TextRun {
    /// A run on the first page at the default font size
    pub fn new<S: Into<String>>(text: S, x: Pt, y: Pt) -> TextRun {
        TextRun {
            text: text.into(),
            x,
            y,
            size: DEFAULT_FONT_SIZE,
            page: 0,
        }
    }

    pub fn with_size(mut self, size: Pt) -> TextRun {
        self.size = size;
        self
    }

    pub fn on_page(mut self, page: usize) -> TextRun {
        self.page = page;
        self
    }
}

/// One page worth of laid out text
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub geometry: PageGeometry,
    /// The placed lines, top to bottom
    pub runs: Vec<TextRun>,
    /// Lines consumed on this page. Blank lines take up space but produce no run, so this
    /// can be larger than `runs.len()`.
    pub lines: usize,
}

impl PageLayout {
    pub fn new(geometry: PageGeometry) -> PageLayout {
        PageLayout {
            geometry,
            runs: Vec::new(),
            lines: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Iterate over the text of every placed line
    pub fn lines_text(&self) -> impl Iterator<Item = &str> {
        self.runs.iter().map(|run| run.text.as_str())
    }
}
