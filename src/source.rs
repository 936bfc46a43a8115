use crate::layout::TextRun;
use crate::standard_font::StandardFont;
use crate::PDFError;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Object, ObjectId, Stream};
use std::collections::{HashMap, HashSet};

/// An existing PDF opened for editing.
///
/// Text is added on top of whatever each page already shows, in one of the
/// [standard fonts](StandardFont). A font is added to the file once per face and registered
/// in the resources of every page it's used on.
///
/// The first time a page is edited its existing content is wrapped in `q`/`Q`, so graphics
/// state it leaves behind doesn't leak into the added text. A page that inherits its
/// resources from the page tree gets a copy of them before anything is added.
pub struct SourceDocument {
    document: lopdf::Document,
    pages: Vec<ObjectId>,
    fonts: HashMap<StandardFont, ObjectId>,
    prepared: HashSet<ObjectId>,
}

fn save_error(err: lopdf::Error) -> PDFError {
    PDFError::DocumentSave(err.to_string())
}

impl SourceDocument {
    /// Parses a PDF. Fails with [PDFError::DocumentLoad] if the bytes aren't a readable PDF
    /// or the document has no pages to draw on.
    pub fn load(bytes: &[u8]) -> Result<SourceDocument, PDFError> {
        let document = lopdf::Document::load_mem(bytes)
            .map_err(|err| PDFError::DocumentLoad(err.to_string()))?;
        let pages: Vec<ObjectId> = document.get_pages().into_values().collect();
        if pages.is_empty() {
            return Err(PDFError::DocumentLoad("document has no pages".to_string()));
        }
        log::debug!("loaded source document with {} page(s)", pages.len());

        Ok(SourceDocument {
            document,
            pages,
            fonts: HashMap::new(),
            prepared: HashSet::new(),
        })
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Draws a run in black on the page it targets. The run's page must exist; resolve
    /// targets with [place_explicit_runs](crate::layout::place_explicit_runs) first.
    pub fn add_run(&mut self, run: &TextRun, font: StandardFont) -> Result<(), PDFError> {
        let page_id = *self.pages.get(run.page).ok_or_else(|| {
            PDFError::DocumentSave(format!(
                "page {} doesn't exist in a {} page document",
                run.page,
                self.pages.len()
            ))
        })?;

        self.prepare_page(page_id)?;
        let font_name = self.register_font(page_id, font)?;
        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new("g", vec![Object::Integer(0)]),
                Operation::new("BT", vec![]),
                Operation::new(
                    "Tf",
                    vec![Object::Name(font_name.into_bytes()), run.size.0.into()],
                ),
                Operation::new("Td", vec![run.x.0.into(), run.y.0.into()]),
                Operation::new("Tj", vec![Object::string_literal(StandardFont::encode(&run.text))]),
                Operation::new("ET", vec![]),
                Operation::new("Q", vec![]),
            ],
        };
        let encoded = content.encode().map_err(save_error)?;
        let stream_id = self.document.add_object(Stream::new(dictionary! {}, encoded));

        self.page_dict_mut(page_id)?
            .get_mut(b"Contents")
            .and_then(Object::as_array_mut)
            .map_err(save_error)?
            .push(stream_id.into());
        Ok(())
    }

    /// Serialises the edited document
    pub fn save(mut self) -> Result<Vec<u8>, PDFError> {
        let mut bytes = Vec::new();
        self.document
            .save_to(&mut bytes)
            .map_err(|err| PDFError::DocumentSave(err.to_string()))?;
        Ok(bytes)
    }

    fn page_dict(&self, page_id: ObjectId) -> Result<&Dictionary, PDFError> {
        self.document.get_dictionary(page_id).map_err(save_error)
    }

    fn page_dict_mut(&mut self, page_id: ObjectId) -> Result<&mut Dictionary, PDFError> {
        self.document
            .get_object_mut(page_id)
            .and_then(Object::as_dict_mut)
            .map_err(save_error)
    }

    /// Gives the page resources of its own and brackets its existing content with `q` and
    /// `Q`, leaving `/Contents` as an array that added streams can be pushed onto. Runs once
    /// per page.
    fn prepare_page(&mut self, page_id: ObjectId) -> Result<(), PDFError> {
        if !self.prepared.insert(page_id) {
            return Ok(());
        }

        if !self.page_dict(page_id)?.has(b"Resources") {
            let inherited = self.inherited_resources(page_id)?.unwrap_or_default();
            log::debug!(
                "copying {} inherited resource type(s) onto page {page_id:?}",
                inherited.len()
            );
            self.page_dict_mut(page_id)?.set("Resources", inherited);
        }

        let existing = match self.page_dict(page_id)?.get(b"Contents").ok() {
            Some(Object::Reference(id)) => match self.document.get_object(*id) {
                Ok(Object::Array(streams)) => streams.clone(),
                _ => vec![Object::Reference(*id)],
            },
            Some(Object::Array(streams)) => streams.clone(),
            _ => Vec::new(),
        };
        let open = self.document.add_object(Stream::new(dictionary! {}, b"q\n".to_vec()));
        let close = self.document.add_object(Stream::new(dictionary! {}, b"\nQ\n".to_vec()));

        let mut contents = Vec::with_capacity(existing.len() + 2);
        contents.push(Object::Reference(open));
        contents.extend(existing);
        contents.push(Object::Reference(close));
        self.page_dict_mut(page_id)?.set("Contents", contents);
        Ok(())
    }

    /// The nearest `/Resources` found walking up the page tree from `page_id`
    fn inherited_resources(&self, page_id: ObjectId) -> Result<Option<Dictionary>, PDFError> {
        let mut visited = HashSet::new();
        let mut node = page_id;
        while visited.insert(node) {
            let dict = self.document.get_dictionary(node).map_err(save_error)?;
            match dict.get(b"Resources").ok() {
                Some(Object::Reference(id)) => {
                    let resources = self.document.get_dictionary(*id).map_err(save_error)?;
                    return Ok(Some(resources.clone()));
                }
                Some(Object::Dictionary(resources)) => return Ok(Some(resources.clone())),
                _ => {}
            }
            match dict.get(b"Parent").and_then(Object::as_reference) {
                Ok(parent) => node = parent,
                Err(_) => break,
            }
        }
        Ok(None)
    }

    /// Makes `font` available on the page, returning the resource name it's known by
    fn register_font(&mut self, page_id: ObjectId, font: StandardFont) -> Result<String, PDFError> {
        let font_id = match self.fonts.get(&font) {
            Some(id) => *id,
            None => {
                let id = self.document.add_object(dictionary! {
                    "Type" => "Font",
                    "Subtype" => "Type1",
                    "BaseFont" => font.base_font(),
                    "Encoding" => "WinAnsiEncoding",
                });
                self.fonts.insert(font, id);
                id
            }
        };
        let name = format!("TF{}", font_id.0);

        let resources = self
            .document
            .get_or_create_resources(page_id)
            .and_then(Object::as_dict_mut)
            .map_err(save_error)?;

        // the font dictionary may live inline or in an object of its own
        let shared_fonts = match resources.get(b"Font").ok() {
            Some(Object::Reference(id)) => Some(*id),
            Some(Object::Dictionary(_)) => None,
            _ => {
                resources.set("Font", dictionary! {});
                None
            }
        };
        let fonts = match shared_fonts {
            Some(id) => self
                .document
                .get_object_mut(id)
                .and_then(Object::as_dict_mut)
                .map_err(save_error)?,
            None => self
                .document
                .get_or_create_resources(page_id)
                .and_then(Object::as_dict_mut)
                .and_then(|resources| resources.get_mut(b"Font"))
                .and_then(Object::as_dict_mut)
                .map_err(save_error)?,
        };
        fonts.set(name.as_str(), font_id);

        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Pt;
    use crate::{Document, Page, PageGeometry};

    fn blank_pdf(pages: usize) -> Vec<u8> {
        let mut doc = Document::new();
        for _ in 0..pages {
            doc.add_page(Page::new(PageGeometry::default()));
        }
        doc.to_bytes().unwrap()
    }

    /// A single page written without this crate: the page has no resources of its own, the
    /// page tree holds them with the font dictionary in a separate object, and the content
    /// scales everything by 2 without saving the graphics state.
    fn inherited_resources_pdf() -> Vec<u8> {
        let mut doc = lopdf::Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let fonts_id = doc.add_object(dictionary! { "Orig" => font_id });
        let content = b"2 0 0 2 0 0 cm BT /Orig 12 Tf 10 10 Td (original) Tj ET".to_vec();
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
                "Resources" => dictionary! { "Font" => fonts_id },
                "MediaBox" => vec![0.into(), 0.into(), 200.into(), 200.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    fn resolve<'a>(doc: &'a lopdf::Document, object: &'a Object) -> &'a Dictionary {
        match object {
            Object::Reference(id) => doc.get_dictionary(*id).unwrap(),
            object => object.as_dict().unwrap(),
        }
    }

    fn first_page_fonts(pdf: &[u8]) -> Vec<String> {
        let doc = lopdf::Document::load_mem(pdf).unwrap();
        let page_id = *doc.get_pages().get(&1).unwrap();
        let page = doc.get_dictionary(page_id).unwrap();
        let resources = resolve(&doc, page.get(b"Resources").unwrap());
        let fonts = resolve(&doc, resources.get(b"Font").unwrap());
        fonts
            .iter()
            .map(|(name, _)| String::from_utf8_lossy(name).into_owned())
            .collect()
    }

    fn first_page_content(pdf: &[u8]) -> String {
        let doc = lopdf::Document::load_mem(pdf).unwrap();
        let page_id = *doc.get_pages().get(&1).unwrap();
        String::from_utf8_lossy(&doc.get_page_content(page_id).unwrap()).into_owned()
    }

    fn stamp(pdf: &[u8], runs: &[TextRun]) -> Vec<u8> {
        let mut source = SourceDocument::load(pdf).unwrap();
        for run in runs {
            source.add_run(run, StandardFont::Helvetica).unwrap();
        }
        source.save().unwrap()
    }

    #[test]
    fn garbage_fails_to_load() {
        assert!(matches!(
            SourceDocument::load(b"not a pdf at all"),
            Err(PDFError::DocumentLoad(_))
        ));
    }

    #[test]
    fn counts_pages() {
        let source = SourceDocument::load(&blank_pdf(3)).unwrap();
        assert_eq!(source.page_count(), 3);
    }

    #[test]
    fn added_text_survives_a_round_trip() {
        let mut source = SourceDocument::load(&blank_pdf(2)).unwrap();
        let run = TextRun::new("Stamped", Pt(72.0), Pt(144.0)).on_page(1);
        source.add_run(&run, StandardFont::Helvetica).unwrap();
        let again = TextRun::new("Again", Pt(72.0), Pt(100.0)).on_page(1);
        source.add_run(&again, StandardFont::Helvetica).unwrap();
        let bytes = source.save().unwrap();

        let reloaded = lopdf::Document::load_mem(&bytes).unwrap();
        let pages = reloaded.get_pages();
        let second = *pages.get(&2).unwrap();
        let content = reloaded.get_page_content(second).unwrap();
        let content = String::from_utf8_lossy(&content);
        assert!(content.contains("(Stamped) Tj"));
        assert!(content.contains("(Again) Tj"));

        let text = String::from_utf8_lossy(&bytes);
        assert_eq!(text.matches("/Helvetica").count(), 1);
    }

    #[test]
    fn missing_pages_are_rejected() {
        let mut source = SourceDocument::load(&blank_pdf(1)).unwrap();
        let run = TextRun::new("nowhere", Pt(0.0), Pt(0.0)).on_page(4);
        assert!(matches!(
            source.add_run(&run, StandardFont::Courier),
            Err(PDFError::DocumentSave(_))
        ));
    }

    #[test]
    fn inherited_fonts_stay_visible_to_the_page() {
        let stamped = stamp(
            &inherited_resources_pdf(),
            &[TextRun::new("stamp", Pt(50.0), Pt(50.0))],
        );

        let fonts = first_page_fonts(&stamped);
        assert!(fonts.iter().any(|name| name == "Orig"), "{fonts:?}");
        assert!(fonts.iter().any(|name| name.starts_with("TF")), "{fonts:?}");
    }

    #[test]
    fn existing_graphics_state_does_not_reach_added_text() {
        let stamped = stamp(
            &inherited_resources_pdf(),
            &[TextRun::new("stamp", Pt(50.0), Pt(50.0))],
        );
        let content = first_page_content(&stamped);

        assert!(content.starts_with("q\n2 0 0 2 0 0 cm"), "{content}");
        let original = content.find("(original) Tj").unwrap();
        let restore = content.find("ET\nQ\n").unwrap();
        let added = content.find("(stamp) Tj").unwrap();
        assert!(original < restore && restore < added, "{content}");
        assert!(content.contains("50 50 Td"));
    }

    #[test]
    fn pages_are_wrapped_only_once() {
        let stamped = stamp(
            &inherited_resources_pdf(),
            &[
                TextRun::new("first", Pt(50.0), Pt(50.0)),
                TextRun::new("second", Pt(50.0), Pt(30.0)),
            ],
        );

        let doc = lopdf::Document::load_mem(&stamped).unwrap();
        let page_id = *doc.get_pages().get(&1).unwrap();
        let contents = doc
            .get_dictionary(page_id)
            .unwrap()
            .get(b"Contents")
            .and_then(Object::as_array)
            .unwrap();
        // opening q, original, closing Q, then one stream per run
        assert_eq!(contents.len(), 5);
        assert_eq!(first_page_fonts(&stamped).len(), 2);
    }
}
