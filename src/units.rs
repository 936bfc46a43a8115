use derive_more::{Add, AddAssign, Display, From, Into, Sub, SubAssign, Sum};
use std::ops::{Div, Mul};

/// PostScript points, 1/72 of an inch. All page geometry and font metrics in this crate are
/// expressed in points, with the origin at the bottom-left of the page.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    Sub,
    AddAssign,
    SubAssign,
    Sum,
    Display,
    From,
    Into,
)]
#[display("{_0}pt")]
pub struct Pt(pub f32);

/// Inches, converted to [Pt] at 72 points per inch
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Display, From, Into)]
#[display("{_0}in")]
pub struct In(pub f32);

/// Millimetres, converted to [Pt] at 25.4 mm per inch
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Display, From, Into)]
#[display("{_0}mm")]
pub struct Mm(pub f32);

impl Pt {
    /// Returns true when the value is a real number (not NaN or infinite)
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    pub fn min(self, other: Pt) -> Pt {
        Pt(self.0.min(other.0))
    }
}

impl From<In> for Pt {
    fn from(value: In) -> Self {
        Pt(value.0 * 72.0)
    }
}

impl From<Mm> for Pt {
    fn from(value: Mm) -> Self {
        Pt(value.0 * 72.0 / 25.4)
    }
}

impl Mul<f32> for Pt {
    type Output = Pt;

    fn mul(self, rhs: f32) -> Pt {
        Pt(self.0 * rhs)
    }
}

impl Mul<Pt> for f32 {
    type Output = Pt;

    fn mul(self, rhs: Pt) -> Pt {
        Pt(self * rhs.0)
    }
}

impl Div<f32> for Pt {
    type Output = Pt;

    fn div(self, rhs: f32) -> Pt {
        Pt(self.0 / rhs)
    }
}

/// Dividing two lengths yields a plain ratio
impl Div<Pt> for Pt {
    type Output = f32;

    fn div(self, rhs: Pt) -> f32 {
        self.0 / rhs.0
    }
}
