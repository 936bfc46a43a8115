//! Greedy text layout and pagination for PDF generation, and text stamping for existing
//! PDFs.
//!
//! # Example
//!
//! ```
//! use pdf_textflow::convert::{create_pdf_from_text, GenerateOptions};
//!
//! let text = "Plain text goes in,\npaginated PDF comes out.";
//! let pdf = create_pdf_from_text(text, &GenerateOptions::default()).expect("can generate pdf");
//! assert_eq!(pdf.mime_type, "application/pdf");
//! assert!(pdf.bytes.starts_with(b"%PDF"));
//! ```

mod content;

/// Conversions from text or existing PDFs to finished PDF bytes
pub mod convert;

mod document;
pub use document::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

mod geometry;
pub use geometry::*;

mod info;
pub use info::*;

/// Utility functions and structures to lay out text on pages
pub mod layout;

mod page;
pub use page::*;

pub mod pagesize;

pub(crate) mod refs;

mod source;
pub use source::*;

mod standard_font;
pub use standard_font::*;

mod units;
pub use units::*;

/// Re-export PDF-writer functionality, mostly for custom content generation
pub use pdf_writer;
