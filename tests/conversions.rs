use pdf_textflow::convert::{
    add_text_to_pdf, create_pdf_from_text, edit_pdf, EditOptions, GenerateOptions, PDF_MIME_TYPE,
};
use pdf_textflow::layout::TextRun;
use pdf_textflow::{Font, PDFError, PageGeometry, Pt, SourceDocument, StandardFont};

fn page_text(pdf: &[u8], page_number: u32) -> String {
    let document = lopdf::Document::load_mem(pdf).expect("output is a readable pdf");
    let pages = document.get_pages();
    let page_id = *pages.get(&page_number).expect("page exists");
    let content = document.get_page_content(page_id).expect("page has content");
    String::from_utf8_lossy(&content).into_owned()
}

fn two_page_pdf() -> Vec<u8> {
    // 2 lines per page at 10pt
    let geometry = PageGeometry::new(Pt(300.0), Pt(50.0), Pt(10.0)).unwrap();
    let options = GenerateOptions::default()
        .with_geometry(geometry)
        .with_font(StandardFont::Courier, Pt(10.0));
    create_pdf_from_text("one\ntwo\nthree", &options).unwrap().bytes
}

#[test]
fn text_becomes_a_paginated_pdf() {
    let text = lipsum::lipsum(3000);
    let converted = create_pdf_from_text(&text, &GenerateOptions::default()).unwrap();
    assert_eq!(converted.mime_type, PDF_MIME_TYPE);

    let source = SourceDocument::load(&converted.bytes).unwrap();
    assert!(source.page_count() > 1);
    assert!(page_text(&converted.bytes, 1).contains(" Tj"));
}

#[test]
fn generated_pages_match_the_layout() {
    let pdf = two_page_pdf();
    assert_eq!(SourceDocument::load(&pdf).unwrap().page_count(), 2);
    assert!(page_text(&pdf, 1).contains("(two) Tj"));
    assert!(page_text(&pdf, 2).contains("(three) Tj"));
}

#[test]
fn truetype_text_is_embedded_and_measured_with_its_font() {
    let font = Font::load(include_bytes!("../assets/DejaVuSansMono.ttf").to_vec()).unwrap();
    let options = GenerateOptions::default().with_font(font, Pt(12.0));
    let converted = create_pdf_from_text(&lipsum::lipsum(1200), &options).unwrap();

    assert!(SourceDocument::load(&converted.bytes).unwrap().page_count() > 1);
    let raw = String::from_utf8_lossy(&converted.bytes);
    assert!(raw.contains("/Identity-H"));
    assert!(raw.contains("/FontFile2"));
    assert!(page_text(&converted.bytes, 1).contains("/F0 12 Tf"));
}

#[test]
fn invalid_geometry_aborts_generation() {
    let options = GenerateOptions::default().with_font(StandardFont::Helvetica, Pt(0.0));
    assert!(matches!(
        create_pdf_from_text("anything", &options),
        Err(PDFError::InvalidGeometry(_))
    ));
}

#[test]
fn runs_land_on_their_target_pages() {
    let runs = vec![
        TextRun::new("Second page", Pt(20.0), Pt(20.0)).on_page(1),
        TextRun::new("Out of range", Pt(20.0), Pt(5.0)).on_page(99),
    ];
    let edited = add_text_to_pdf(&two_page_pdf(), runs, &EditOptions::default()).unwrap();

    assert!(page_text(&edited.bytes, 2).contains("(Second page) Tj"));
    let first = page_text(&edited.bytes, 1);
    assert!(first.contains("(Out of range) Tj"));
    // the original text is still there underneath
    assert!(first.contains("(one) Tj"));
}

#[test]
fn edit_falls_back_to_the_configured_text() {
    let edited = edit_pdf(&two_page_pdf(), None, None, None, &EditOptions::default()).unwrap();
    assert!(page_text(&edited.bytes, 1).contains("(Edited text) Tj"));

    let edited = edit_pdf(&two_page_pdf(), Some(""), Some(Pt(100.0)), None, &EditOptions::default())
        .unwrap();
    assert!(page_text(&edited.bytes, 1).contains("(Edited text) Tj"));

    let edited =
        edit_pdf(&two_page_pdf(), Some("Custom"), None, None, &EditOptions::default()).unwrap();
    assert!(page_text(&edited.bytes, 1).contains("(Custom) Tj"));
}

#[test]
fn corrupt_input_is_a_load_error() {
    let result = add_text_to_pdf(b"%PDF-1.7 truncated", Vec::new(), &EditOptions::default());
    assert!(matches!(result, Err(PDFError::DocumentLoad(_))));
}
