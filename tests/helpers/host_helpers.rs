//! Host setup and cursor helpers.

use groovy_lsp::base::Position;
use groovy_lsp::ide::AnalysisHost;

/// Creates an AnalysisHost with the given `(uri, source)` files.
pub fn host_with(files: &[(&str, &str)]) -> AnalysisHost {
    let host = AnalysisHost::new();
    for (uri, source) in files {
        host.set_file_content(uri, source)
            .unwrap_or_else(|e| panic!("failed to index {uri}: {e}"));
    }
    host
}

/// 0-based position of the `nth` occurrence of `needle`, plus `offset`
/// characters. Sources in these tests are ASCII.
pub fn position_of(source: &str, needle: &str, nth: usize, offset: u32) -> Position {
    let mut seen = 0;
    for (line_no, line) in source.lines().enumerate() {
        let mut from = 0;
        while let Some(idx) = line[from..].find(needle) {
            let col = from + idx;
            if seen == nth {
                return Position::new(line_no as u32, col as u32 + offset);
            }
            seen += 1;
            from = col + needle.len();
        }
    }
    panic!("occurrence {nth} of {needle:?} not found");
}
