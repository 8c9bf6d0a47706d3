use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Marker substring identifying an R setup chunk, matched case-sensitively.
const SETUP_MARKER: &str = "r setup";

/// Fence-open token introducing a chunk header.
const FENCE_OPEN: &str = "```{";

/// Engine token directly after the fence brace: `r` or `rscript`, terminated
/// by space, comma, or closing brace. Applied to the lower-cased, trimmed line.
static FENCE_R_ENGINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^```\{r(?:script)?[ ,}]").expect("fence engine pattern is valid"));

/// Explicit engine override of the form `engine = '<value>'` (either quote
/// style, whitespace around `=` optional). Applied to the original line.
static ENGINE_OVERRIDE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"engine\s*=\s*['"]([^'"]*)['"]"#).expect("override pattern is valid"));

/// Classification of one chunk header line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// The chunk is a setup chunk (carries the `r setup` marker)
    pub is_setup: bool,

    /// The chunk's declared engine can be executed in-process
    pub is_runnable: bool,
}

/// Classify a header line in one pass
#[must_use]
pub fn classify(line: &str) -> Classification {
    Classification {
        is_setup: is_setup_chunk(line),
        is_runnable: is_runnable_chunk(line),
    }
}

/// Whether the header line marks a setup chunk.
///
/// A literal, case-sensitive substring match, not a grammar parse: the
/// editor's convention is that setup chunks are labelled `r setup` in the
/// header. Total over arbitrary input.
#[must_use]
pub fn is_setup_chunk(line: &str) -> bool {
    line.contains(SETUP_MARKER)
}

/// Whether the header line declares an engine that runs in-process.
///
/// Two recognizers, in order:
///
/// 1. Fenced headers (`` ```{ `` prefix after lower-casing and trimming) must
///    name `r` or `rscript` directly after the brace; any other fence engine
///    is not runnable, and an `engine=` override cannot rescue it.
/// 2. An explicit `engine = '<value>'` override anywhere in the original line
///    decides runnability by its value. This is the old-fashioned way of
///    declaring a non-R chunk inside an `r` fence, e.g.
///    `` ```{r, engine = 'awk'} ``.
///
/// Anything unrecognizable is runnable by default.
#[must_use]
pub fn is_runnable_chunk(line: &str) -> bool {
    let lower = line.to_lowercase();
    let lower = lower.trim();

    if lower.starts_with(FENCE_OPEN) && !FENCE_R_ENGINE.is_match(lower) {
        return false;
    }

    match ENGINE_OVERRIDE.captures(line) {
        Some(caps) => {
            let engine = caps[1].to_lowercase();
            engine == "r" || engine == "rscript"
        }
        None => true,
    }
}
