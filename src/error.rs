use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum PDFError {
    /// The page geometry or font size cannot hold a single line of text
    #[error("invalid page geometry: {0}")]
    InvalidGeometry(String),

    /// The source document could not be parsed or has nothing to edit
    #[error("failed to load document: {0}")]
    DocumentLoad(String),

    /// The output document could not be serialised
    #[error("failed to save document: {0}")]
    DocumentSave(String),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),
}
