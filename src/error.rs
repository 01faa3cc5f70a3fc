use thiserror::Error;

/// Errors that can occur in the ingestion core.
///
/// Almost everything in this crate degrades instead of failing: malformed
/// JSON-LD blocks are skipped, unparseable ingredient items are dropped with
/// a warning, and an unparseable URL falls back to best-effort cleanup. The
/// only operation that returns an error is URL canonicalization on input for
/// which no sensible degraded output exists.
#[derive(Error, Debug)]
pub enum IngestError {
    /// The caller passed an argument with no sensible fallback output
    /// (e.g. an empty URL string).
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
