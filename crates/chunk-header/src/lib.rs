//! # Notebook Chunk Header
//!
//! Classification and discovery of executable-chunk headers in
//! notebook-style documents (prose interleaved with fenced code chunks).
//!
//! ## Philosophy
//!
//! Header parsing is deliberately lenient: any string is a valid input, and
//! unrecognizable structure falls back to permissive defaults rather than
//! errors. Only an explicit non-R engine declaration marks a chunk as not
//! runnable in-process.
//!
//! ## Architecture
//!
//! ```text
//! Document text
//!     │
//!     ├──> scan_chunk_headers ──> header rows (fence tracking)
//!     │
//!     └──> classify (per header line)
//!          ├─> is_setup_chunk    (literal "r setup" marker)
//!          └─> is_runnable_chunk (fence engine + engine= override)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use notebook_chunk_header::classify;
//!
//! let c = classify("```{r setup, include=FALSE}");
//! assert!(c.is_setup);
//! assert!(c.is_runnable);
//!
//! let c = classify("```{python}");
//! assert!(!c.is_runnable);
//! ```

mod classify;
mod scan;

pub use classify::{classify, is_runnable_chunk, is_setup_chunk, Classification};
pub use scan::{scan_chunk_headers, ChunkHeaderScan};
