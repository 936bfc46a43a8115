use crate::{
    layout::GlyphMetrics,
    refs::{ObjectReferences, RefType},
    standard_font::StandardFont,
    PDFError, Pt,
};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use owned_ttf_parser::{AsFaceRef, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Str,
};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A parsed TrueType or OpenType font. The font file is embedded in its entirety in the
/// generated PDF, so large fonts will noticeably increase the size of the output.
///
/// Glyph widths are read straight from the font's `hmtx` table; no shaping or kerning is
/// applied. Clones share the parsed face.
#[derive(Clone)]
pub struct Font {
    face: Arc<OwnedFace>,
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("name", &self.name())
            .field("glyphs", &self.face.as_face_ref().number_of_glyphs())
            .finish()
    }
}

impl Font {
    /// Load a font from raw bytes, returning an error if the font could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, PDFError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(Font {
            face: Arc::new(face),
        })
    }

    /// The full name of the font, if it has one
    pub fn name(&self) -> Option<String> {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| {
                name.name_id == owned_ttf_parser::name_id::FULL_NAME && name.is_unicode()
            })
            .and_then(|name| name.to_string())
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face.as_face_ref().glyph_index(ch).map(|gid| gid.0)
    }

    /// The glyph shown for characters the font doesn't cover: U+FFFD if present, otherwise
    /// `?`, otherwise `.notdef`
    pub fn fallback_glyph_id(&self) -> u16 {
        self.glyph_id('\u{FFFD}')
            .or_else(|| self.glyph_id('?'))
            .unwrap_or(0)
    }

    /// Encodes text as big-endian glyph ids for an `Identity-H` encoded font
    pub fn encode(&self, text: &str) -> Vec<u8> {
        text.chars()
            .flat_map(|ch| {
                self.glyph_id(ch)
                    .unwrap_or_else(|| {
                        log::warn!("no glyph for {ch:?} in {:?}, using fallback", self.name());
                        self.fallback_glyph_id()
                    })
                    .to_be_bytes()
            })
            .collect()
    }

    fn scaling(&self) -> f32 {
        1000.0 / self.face.as_face_ref().units_per_em() as f32
    }

    /// Unicode characters for every glyph reachable through the font's unicode cmaps
    fn glyph_chars(&self) -> BTreeMap<u16, char> {
        let mut map = BTreeMap::new();
        let Some(cmap) = self.face.as_face_ref().tables().cmap else {
            return map;
        };

        for subtable in cmap.subtables.into_iter().filter(|table| table.is_unicode()) {
            subtable.codepoints(|codepoint| {
                let Ok(ch) = char::try_from(codepoint) else {
                    return;
                };
                if let Some(gid) = subtable.glyph_index(codepoint).filter(|gid| gid.0 > 0) {
                    map.entry(gid.0).or_insert(ch);
                }
            });
        }
        map
    }

    /// Writes the font as a Type0 font with a single CIDFontType2 descendant, its
    /// descriptor, the embedded font program and a ToUnicode map.
    pub(crate) fn write(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) {
        let face = self.face.as_face_ref();
        let scaling = self.scaling();
        let base_font = format!(
            "F{font_index}+{}",
            self.name()
                .map(|name| name.replace(' ', ""))
                .unwrap_or_else(|| "Embedded".to_string())
        );

        let font_id = refs.gen(RefType::Font(font_index));
        let cid_font_id = refs.gen(RefType::CidFont(font_index));
        let descriptor_id = refs.gen(RefType::FontDescriptor(font_index));
        let data_id = refs.gen(RefType::FontData(font_index));
        let to_unicode_id = refs.gen(RefType::ToUnicode(font_index));

        writer
            .type0_font(font_id)
            .base_font(Name(base_font.as_bytes()))
            .encoding_predefined(Name(b"Identity-H"))
            .descendant_font(cid_font_id)
            .to_unicode(to_unicode_id);

        let advances: Vec<f32> = (0..face.number_of_glyphs())
            .map(|gid| face.glyph_hor_advance(GlyphId(gid)).unwrap_or_default() as f32 * scaling)
            .collect();
        let mut cid_font = writer.cid_font(cid_font_id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(base_font.as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(descriptor_id);
        cid_font.default_width(1000.0);
        cid_font.widths().consecutive(0, advances);
        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));
        cid_font.finish();

        let mut flags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags.insert(FontFlags::FIXED_PITCH);
        }
        if face.is_italic() {
            flags.insert(FontFlags::ITALIC);
        }
        let bbox = face.global_bounding_box();
        let mut descriptor = writer.font_descriptor(descriptor_id);
        descriptor.name(Name(base_font.as_bytes()));
        descriptor.flags(flags);
        descriptor.bbox(pdf_writer::Rect::new(
            bbox.x_min as f32 * scaling,
            bbox.y_min as f32 * scaling,
            bbox.x_max as f32 * scaling,
            bbox.y_max as f32 * scaling,
        ));
        descriptor.italic_angle(0.0);
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.cap_height(
            face.capital_height()
                .map(|height| height as f32 * scaling)
                .unwrap_or(face.ascender() as f32 * scaling),
        );
        descriptor.stem_v(80.0);
        descriptor.font_file2(data_id);
        descriptor.finish();

        let data = self.face.as_slice();
        let compressed = compress_to_vec_zlib(data, CompressionLevel::DefaultLevel as u8);
        let mut stream = writer.stream(data_id, &compressed);
        stream.filter(Filter::FlateDecode);
        stream.pair(Name(b"Length1"), data.len() as i32);
        stream.finish();

        let cmap = to_unicode_cmap(&self.glyph_chars());
        let compressed =
            compress_to_vec_zlib(cmap.as_bytes(), CompressionLevel::DefaultLevel as u8);
        writer
            .stream(to_unicode_id, &compressed)
            .filter(Filter::FlateDecode);
    }
}

impl GlyphMetrics for Font {
    fn width_of(&self, text: &str, size: Pt) -> Pt {
        let face = self.face.as_face_ref();
        let units: u32 = text
            .chars()
            .map(|ch| self.glyph_id(ch).unwrap_or_else(|| self.fallback_glyph_id()))
            .map(|gid| face.glyph_hor_advance(GlyphId(gid)).unwrap_or_default() as u32)
            .sum();
        Pt(size.0 * units as f32 / face.units_per_em() as f32)
    }
}

/// Builds a ToUnicode CMap so that text shown with glyph ids can be copied and searched
fn to_unicode_cmap(glyphs: &BTreeMap<u16, char>) -> String {
    let mut cmap = String::from(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n<0000> <FFFF>\nendcodespacerange\n",
    );

    // bfchar blocks hold at most 100 entries
    let entries: Vec<(&u16, &char)> = glyphs.iter().collect();
    for block in entries.chunks(100) {
        cmap.push_str(&format!("{} beginbfchar\n", block.len()));
        for (gid, ch) in block {
            let mut units = [0u16; 2];
            let hex: String = ch
                .encode_utf16(&mut units)
                .iter()
                .map(|unit| format!("{unit:04X}"))
                .collect();
            cmap.push_str(&format!("<{gid:04X}> <{hex}>\n"));
        }
        cmap.push_str("endbfchar\n");
    }

    cmap.push_str("endcmap\nCMapName currentdict /CMap defineresource pop\nend\nend\n");
    cmap
}

/// A font a [Document](crate::Document) can write text with
#[derive(Debug, Clone)]
pub enum FontFace {
    /// A standard font, referenced by name
    Standard(StandardFont),
    /// A TrueType font, embedded in the document
    TrueType(Font),
}

impl FontFace {
    /// Encodes text into the bytes of a PDF string shown with this font
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            FontFace::Standard(_) => StandardFont::encode(text),
            FontFace::TrueType(font) => font.encode(text),
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) {
        match self {
            FontFace::Standard(font) => {
                let id = refs.gen(RefType::Font(font_index));
                writer
                    .type1_font(id)
                    .base_font(Name(font.base_font().as_bytes()))
                    .encoding_predefined(Name(b"WinAnsiEncoding"));
            }
            FontFace::TrueType(font) => font.write(refs, font_index, writer),
        }
    }
}

impl From<StandardFont> for FontFace {
    fn from(font: StandardFont) -> Self {
        FontFace::Standard(font)
    }
}

impl From<Font> for FontFace {
    fn from(font: Font) -> Self {
        FontFace::TrueType(font)
    }
}

impl GlyphMetrics for FontFace {
    fn width_of(&self, text: &str, size: Pt) -> Pt {
        match self {
            FontFace::Standard(font) => font.width_of(text, size),
            FontFace::TrueType(font) => font.width_of(text, size),
        }
    }
}
