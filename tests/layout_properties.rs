use pdf_textflow::layout::{layout_paragraphs, FixedAdvance, GlyphMetrics, PageLayout};
use pdf_textflow::{PDFError, PageGeometry, Pt, StandardFont};

fn a5_geometry() -> PageGeometry {
    PageGeometry::from_size(pdf_textflow::pagesize::A5, Pt(36.0)).unwrap()
}

fn single_word(text: &str) -> bool {
    text.split_whitespace().count() == 1
}

#[test]
fn lines_never_exceed_the_printable_width() {
    let text = lipsum::lipsum(1500);
    let geometry = a5_geometry();
    let font = StandardFont::Helvetica;
    let pages = layout_paragraphs(&text, geometry, Pt(11.0), &font).unwrap();

    for run in pages.iter().flat_map(|page| page.runs.iter()) {
        let width = font.width_of(&run.text, run.size);
        assert!(
            width <= geometry.printable_width() || single_word(&run.text),
            "{:?} is {} wide",
            run.text,
            width
        );
    }
}

#[test]
fn every_page_but_the_last_is_full() {
    let text = lipsum::lipsum(2000);
    let geometry = a5_geometry();
    let size = Pt(11.0);
    let pages = layout_paragraphs(&text, geometry, size, &StandardFont::TimesRoman).unwrap();
    let max_lines = geometry.max_lines(size);

    assert!(pages.len() > 2);
    let (last, full) = pages.split_last().unwrap();
    for page in full {
        assert_eq!(page.runs.len(), max_lines);
        assert_eq!(page.lines, max_lines);
    }
    assert!(!last.runs.is_empty() && last.runs.len() <= max_lines);
}

#[test]
fn words_come_out_in_the_order_they_went_in() {
    let text = format!("{}\n\n{}\n", lipsum::lipsum(400), lipsum::lipsum(250));
    let pages = layout_paragraphs(&text, a5_geometry(), Pt(14.0), &StandardFont::Courier).unwrap();

    let placed: Vec<&str> = pages
        .iter()
        .flat_map(|page| page.runs.iter())
        .flat_map(|run| run.text.split(' '))
        .collect();
    let original: Vec<&str> = text.split_whitespace().collect();
    assert_eq!(placed, original);
}

#[test]
fn baselines_step_down_by_one_and_a_half_font_sizes() {
    let geometry = a5_geometry();
    let size = Pt(12.0);
    let pages = layout_paragraphs(&lipsum::lipsum(600), geometry, size, &StandardFont::Helvetica)
        .unwrap();

    for (index, page) in pages.iter().enumerate() {
        assert_eq!(page.runs[0].y, geometry.top());
        for pair in page.runs.windows(2) {
            let step = pair[0].y - pair[1].y;
            assert!((step.0 - 18.0).abs() < 1e-3, "step of {step}");
        }
        assert!(page.runs.iter().all(|run| run.page == index));
        assert!(page.runs.iter().all(|run| run.x == geometry.margin()));
    }
}

#[test]
fn blank_lines_take_space_and_count_toward_the_page() {
    // floor(30 / 15) = 2 lines per page
    let geometry = PageGeometry::new(Pt(300.0), Pt(50.0), Pt(10.0)).unwrap();
    let pages: Vec<PageLayout> =
        layout_paragraphs("first\nsecond\nthird\n", geometry, Pt(10.0), &FixedAdvance::new(0.5))
            .unwrap();

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[1].runs.len(), 1);
    assert_eq!(pages[1].runs[0].text, "third");
    assert_eq!(pages[1].lines, 2);
}

#[test]
fn an_unbreakable_word_overflows_alone() {
    let geometry = PageGeometry::new(Pt(100.0), Pt(200.0), Pt(10.0)).unwrap();
    let word = "x".repeat(500);
    let text = format!("tiny {word} tail");
    let pages = layout_paragraphs(&text, geometry, Pt(10.0), &StandardFont::Courier).unwrap();

    let lines: Vec<&str> = pages[0].lines_text().collect();
    assert_eq!(lines, vec!["tiny", word.as_str(), "tail"]);
}

#[test]
fn geometry_is_checked_before_anything_is_laid_out() {
    let geometry = PageGeometry::new(Pt(100.0), Pt(40.0), Pt(10.0)).unwrap();
    let result = layout_paragraphs("too big", geometry, Pt(20.0), &StandardFont::Courier);
    assert!(matches!(result, Err(PDFError::InvalidGeometry(_))));
}
