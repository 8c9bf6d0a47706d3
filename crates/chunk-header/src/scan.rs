use crate::classify::{classify, Classification};

/// One chunk header discovered in a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeaderScan {
    /// Row of the header line (0-indexed)
    pub row: usize,

    /// Classification of the header text
    pub classification: Classification,
}

/// Scan a document for chunk header rows.
///
/// A line starting with the fence-open token while outside a chunk opens one;
/// the header is that line. A later line starting with a bare backtick fence
/// closes it. Indented fences are prose, not headers. An unterminated chunk
/// at end of document still reports its header.
#[must_use]
pub fn scan_chunk_headers(text: &str) -> Vec<ChunkHeaderScan> {
    let mut headers = Vec::new();
    let mut in_chunk = false;

    for (row, line) in text.lines().enumerate() {
        if in_chunk {
            if line.starts_with("```") {
                in_chunk = false;
            }
            continue;
        }

        if line.starts_with("```{") {
            headers.push(ChunkHeaderScan {
                row,
                classification: classify(line),
            });
            in_chunk = true;
        }
    }

    log::debug!("scanned {} chunk headers", headers.len());
    headers
}
