use crate::{
    font::FontFace,
    info::Info,
    layout::PageLayout,
    page::Page,
    refs::{ObjectReferences, RefType},
    PDFError,
};
use id_arena::{Arena, Id};
use pdf_writer::{Pdf, Ref};
use std::io::Write;

/// A document is the main object that stores all the contents of a generated PDF, then
/// renders it out with a call to [Document::write].
#[derive(Default, Debug)]
pub struct Document {
    pub info: Option<Info>,
    pub pages: Vec<Page>,
    pub fonts: Arena<FontFace>,
}

impl Document {
    pub fn new() -> Document {
        Document::default()
    }

    /// Sets information about the document. If not provided, no information dictionary
    /// will be written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Add a font to the document. Fonts are shared by every page; the returned id is what
    /// spans refer to.
    pub fn add_font<F: Into<FontFace>>(&mut self, font: F) -> Id<FontFace> {
        self.fonts.alloc(font.into())
    }

    /// Add a page to the end of the document, returning its index
    pub fn add_page(&mut self, page: Page) -> usize {
        self.pages.push(page);
        self.pages.len() - 1
    }

    /// Append laid out pages to the document, in order, showing their text with `font`
    pub fn add_layout(&mut self, layout: &[PageLayout], font: Id<FontFace>) {
        self.pages
            .extend(layout.iter().map(|page| Page::from_layout(page, font)));
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Write the entire document to the writer. The document is rendered in memory first,
    /// so very large documents will allocate accordingly.
    ///
    /// Object references are only generated here, so pages and fonts can be freely edited
    /// up to this point.
    pub fn write<W: Write>(self, mut w: W) -> Result<(), PDFError> {
        let Document { info, pages, fonts } = self;
        log::debug!(
            "writing {} page(s) using {} font(s)",
            pages.len(),
            fonts.len()
        );

        let mut refs = ObjectReferences::new();
        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = info {
            info.write(&mut refs, &mut writer);
        }

        let page_refs: Vec<Ref> = (0..pages.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();
        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        for (id, font) in fonts.iter() {
            font.write(&mut refs, id.index(), &mut writer);
        }

        for (page_index, page) in pages.iter().enumerate() {
            page.write(&mut refs, page_index, &fonts, &mut writer)?;
        }

        writer.catalog(catalog_id).pages(page_tree_id);

        w.write_all(writer.finish().as_slice())
            .map_err(|err| PDFError::DocumentSave(err.to_string()))
    }

    /// Render the document into a byte vector
    pub fn to_bytes(self) -> Result<Vec<u8>, PDFError> {
        let mut bytes = Vec::new();
        self.write(&mut bytes)?;
        Ok(bytes)
    }
}
