//! Text layout: word wrapping and pagination of plain text, and placement of runs that
//! already carry their own coordinates.
//!
//! [`layout_paragraphs`] is a pure function over its inputs; it takes the text, the page
//! geometry, a font size and something implementing [`GlyphMetrics`], and returns the laid
//! out pages. The pages are handed to a [`Document`](crate::Document) to be written out.
//!
//! [`place_explicit_runs`] deals with runs positioned by the caller, typically text stamped
//! onto an existing document through a [`SourceDocument`](crate::SourceDocument).
//!
//! # Example
//!
//! ```
//! use pdf_textflow::layout::layout_paragraphs;
//! use pdf_textflow::{PageGeometry, Pt, StandardFont};
//!
//! let geometry = PageGeometry::default();
//! let pages = layout_paragraphs(
//!     "Hello, world!\nA second line.",
//!     geometry,
//!     Pt(12.0),
//!     &StandardFont::TimesRoman,
//! )
//! .expect("A4 fits 12pt text");
//!
//! assert_eq!(pages.len(), 1);
//! assert_eq!(pages[0].runs[1].text, "A second line.");
//! let leading = pages[0].runs[0].y - pages[0].runs[1].y;
//! assert!((leading.0 - 18.0).abs() < 1e-3);
//! ```

mod cursor;
mod explicit;
mod metrics;
mod paragraphs;
mod run;

pub use cursor::*;
pub use explicit::*;
pub use metrics::*;
pub use paragraphs::*;
pub use run::*;
