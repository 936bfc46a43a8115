use crate::units::Pt;

/// Measures the rendered width of a string of text at a given font size.
///
/// Implementations must be deterministic and monotonic: a prefix of a string is never wider
/// than the whole string. The layout functions rely on this to decide where lines break.
///
/// Fonts implement this trait directly; any `Fn(&str, Pt) -> Pt` closure does too, which
/// is handy for plugging in an external shaper:
///
/// ```
/// use pdf_textflow::layout::GlyphMetrics;
/// use pdf_textflow::Pt;
///
/// let half_em = |text: &str, size: Pt| size * (0.5 * text.chars().count() as f32);
/// assert_eq!(half_em.width_of("four", Pt(10.0)), Pt(20.0));
/// ```
pub trait GlyphMetrics {
    fn width_of(&self, text: &str, size: Pt) -> Pt;
}

impl<F> GlyphMetrics for F
where
    F: Fn(&str, Pt) -> Pt,
{
    fn width_of(&self, text: &str, size: Pt) -> Pt {
        self(text, size)
    }
}

/// Monospaced metrics where every character advances by `advance` ems
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FixedAdvance {
    pub advance: f32,
}

impl FixedAdvance {
    pub fn new(advance: f32) -> FixedAdvance {
        FixedAdvance { advance }
    }
}

impl GlyphMetrics for FixedAdvance {
    fn width_of(&self, text: &str, size: Pt) -> Pt {
        size * (self.advance * text.chars().count() as f32)
    }
}
