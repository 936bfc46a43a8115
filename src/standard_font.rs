use crate::layout::GlyphMetrics;
use crate::units::Pt;

/// One of the standard Type 1 fonts every PDF reader ships with. These are referenced by
/// name rather than embedded, so they add nothing to the size of the output, but they can
/// only show the printable ASCII range. Anything else is written (and measured) as `?`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StandardFont {
    Helvetica,
    TimesRoman,
    Courier,
}

// advance widths in thousandths of an em for ' ' (0x20) through '~' (0x7e), from the AFM files
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const TIMES_ROMAN_WIDTHS: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

const COURIER_WIDTH: u16 = 600;

impl StandardFont {
    /// The PostScript name the font is referenced by
    pub fn base_font(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::TimesRoman => "Times-Roman",
            StandardFont::Courier => "Courier",
        }
    }

    /// Maps a character to the single byte the font will show. Tabs become spaces and
    /// anything outside printable ASCII becomes `?`.
    pub fn encode_char(ch: char) -> u8 {
        match ch {
            '\t' => b' ',
            ' '..='~' => ch as u8,
            _ => b'?',
        }
    }

    /// Encodes text into the bytes of a PDF string for this font
    pub fn encode(text: &str) -> Vec<u8> {
        text.chars().map(StandardFont::encode_char).collect()
    }

    /// Advance width of an encoded byte, in thousandths of an em
    fn advance(&self, byte: u8) -> u16 {
        let index = byte.saturating_sub(b' ') as usize;
        match self {
            StandardFont::Helvetica => HELVETICA_WIDTHS.get(index).copied().unwrap_or(556),
            StandardFont::TimesRoman => TIMES_ROMAN_WIDTHS.get(index).copied().unwrap_or(444),
            StandardFont::Courier => COURIER_WIDTH,
        }
    }
}

impl GlyphMetrics for StandardFont {
    fn width_of(&self, text: &str, size: Pt) -> Pt {
        let units: u32 = text
            .chars()
            .map(|ch| self.advance(StandardFont::encode_char(ch)) as u32)
            .sum();
        Pt(size.0 * units as f32 / 1000.0)
    }
}
