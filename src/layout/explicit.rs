use super::run::TextRun;

/// Resolves caller-positioned runs against a document with `page_count` pages.
///
/// Coordinates, text and size are kept exactly as given; nothing is measured or wrapped.
/// Runs aimed at a page the document doesn't have are moved to the first page instead of
/// being dropped, and a warning is logged for each one. The returned runs keep their input
/// order, so later runs are drawn over earlier ones where they overlap.
pub fn place_explicit_runs<I>(runs: I, page_count: usize) -> Vec<TextRun>
where
    I: IntoIterator<Item = TextRun>,
{
    runs.into_iter()
        .map(|mut run| {
            if run.page >= page_count {
                log::warn!(
                    "run {:?} targets page {} but only {} page(s) exist, using page 0",
                    run.text,
                    run.page,
                    page_count
                );
                run.page = 0;
            }
            run
        })
        .collect()
}
