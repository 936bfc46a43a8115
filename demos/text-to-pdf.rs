use pdf_textflow::convert::{add_text_to_pdf, create_pdf_from_text, EditOptions, GenerateOptions};
use pdf_textflow::layout::TextRun;
use pdf_textflow::pagesize::A5;
use pdf_textflow::{Info, PageGeometry, Pt, SourceDocument, StandardFont};

fn main() {
    // lay out a few paragraphs of filler text onto A5 pages with half-inch margins
    let text = format!(
        "{}\n\n{}\n\n{}",
        lipsum::lipsum(120),
        lipsum::lipsum(300),
        lipsum::lipsum(80)
    );
    let geometry = PageGeometry::from_size(A5, Pt(36.0)).expect("A5 fits half inch margins");
    let options = GenerateOptions::default()
        .with_geometry(geometry)
        .with_font(StandardFont::TimesRoman, Pt(11.0))
        .with_info(Info::new().with_title("Lorem Ipsum").with_subject("Text layout demo"));
    let generated = create_pdf_from_text(&text, &options).expect("can lay out text");

    // then go back and stamp a page number at the bottom of every page
    let page_count = SourceDocument::load(&generated.bytes)
        .expect("can read our own output")
        .page_count();
    let numbers = (0..page_count).map(|page| {
        TextRun::new(format!("Page {}", page + 1), Pt(36.0), Pt(18.0))
            .with_size(Pt(9.0))
            .on_page(page)
    });
    let numbered = add_text_to_pdf(&generated.bytes, numbers, &EditOptions::default())
        .expect("can stamp page numbers");

    std::fs::write("text-to-pdf.pdf", numbered.bytes).expect("can write pdf");
}
