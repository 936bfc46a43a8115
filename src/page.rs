use crate::content::render_spans;
use crate::font::FontFace;
use crate::geometry::PageGeometry;
use crate::layout::PageLayout;
use crate::refs::{ObjectReferences, RefType};
use crate::units::Pt;
use crate::PDFError;
use id_arena::{Arena, Id};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Name, Pdf};

/// Which font, at which size, a span is shown with
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<FontFace>,
    pub size: Pt,
}

/// A span of text with its baseline origin on the page
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub coords: (Pt, Pt),
}

/// A page of a generated document
#[derive(Clone, Debug)]
pub struct Page {
    pub geometry: PageGeometry,
    /// Spans in drawing order
    pub spans: Vec<SpanLayout>,
}

impl Page {
    pub fn new(geometry: PageGeometry) -> Page {
        Page {
            geometry,
            spans: Vec::new(),
        }
    }

    /// Builds a page from laid out text, showing every run in the given font
    pub fn from_layout(layout: &PageLayout, font: Id<FontFace>) -> Page {
        Page {
            geometry: layout.geometry,
            spans: layout
                .runs
                .iter()
                .map(|run| SpanLayout {
                    text: run.text.clone(),
                    font: SpanFont {
                        id: font,
                        size: run.size,
                    },
                    coords: (run.x, run.y),
                })
                .collect(),
        }
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        fonts: &Arena<FontFace>,
        writer: &mut Pdf,
    ) -> Result<(), PDFError> {
        let id = refs.require(RefType::Page(page_index))?;
        let parent = refs.require(RefType::PageTree)?;
        let font_refs = fonts
            .iter()
            .map(|(font_id, _)| {
                refs.require(RefType::Font(font_id.index()))
                    .map(|font_ref| (font_id.index(), font_ref))
            })
            .collect::<Result<Vec<_>, PDFError>>()?;

        let rendered = render_spans(&self.spans, fonts)?;
        let compressed = compress_to_vec_zlib(&rendered, CompressionLevel::DefaultLevel as u8);
        let content_id = refs.gen(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.geometry.media_box());
        page.art_box(self.geometry.content_box());
        page.parent(parent);
        page.contents(content_id);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (index, font_ref) in font_refs {
            resource_fonts.pair(Name(format!("F{index}").as_bytes()), font_ref);
        }
        resource_fonts.finish();
        resources.finish();
        page.finish();

        writer
            .stream(content_id, &compressed)
            .filter(Filter::FlateDecode);

        Ok(())
    }
}
