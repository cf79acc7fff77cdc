//! Error types for the settlement-payreport library.
//!
//! Every variant of [`SettlementError`] is **fatal**: the run aborts and no
//! report is written. Conditions the settlement format tolerates (no trip
//! markers, a missing footer, an empty document) never surface here; they
//! produce a best-effort [`crate::output::PayReport`] instead and are logged
//! with `tracing::warn!`.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the settlement-payreport library.
#[derive(Debug, Error)]
pub enum SettlementError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Settlement file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF '{path}' is corrupt: {detail}")]
    CorruptPdf { path: PathBuf, detail: String },

    /// PDF requires a password but none was provided.
    #[error("PDF '{path}' is encrypted and requires a password.\nProvide it with --password <PASSWORD>.")]
    PasswordRequired { path: PathBuf },

    /// A password was provided but it is wrong.
    #[error("Wrong password for PDF '{path}'")]
    WrongPassword { path: PathBuf },

    /// pdfium could not read the text layer of a page.
    #[error("Text extraction failed for page {page}: {detail}")]
    TextExtractionFailed { page: usize, detail: String },

    // ── Settlement format errors ──────────────────────────────────────────
    /// The token stream ends before the fixed header fields.
    #[error("Settlement header is incomplete: need at least {required} tokens, found {found}")]
    HeaderTooShort { found: usize, required: usize },

    /// A trip block is too short to resolve its locations.
    #[error("Trip {trip} is malformed: {detail}")]
    MalformedTrip { trip: usize, detail: String },

    /// A PICKUP or MILEAGE marker is the last token of the stream.
    #[error("{marker} marker at token {position} has no quantity after it")]
    MissingQuantity { marker: &'static str, position: usize },

    /// The token after a PICKUP or MILEAGE marker is not a number.
    #[error("{marker} marker at token {position} is followed by '{token}', which is not a number")]
    InvalidQuantity {
        marker: &'static str,
        position: usize,
        token: String,
    },

    /// Trip blocks and the numeric columns disagree in length.
    ///
    /// Only raised when [`crate::config::ReportConfig::strict_alignment`] is
    /// set; otherwise the mismatch is recorded in
    /// [`crate::output::Alignment`] and logged.
    #[error(
        "Trip rows are misaligned: {trips} trip blocks, {pickups} pickup counts, {mileages} mileages"
    )]
    Misaligned {
        trips: usize,
        pickups: usize,
        mileages: usize,
    },

    /// A pay total does not fit in the cents range.
    #[error("Pay calculation overflowed computing {what}; the settlement's quantities are out of range")]
    AmountOverflow { what: &'static str },

    // ── Rate errors ───────────────────────────────────────────────────────
    /// The rate source does not hold a non-negative integer.
    #[error("Invalid rate '{value}': expected a whole number of cents per mile")]
    InvalidRate { value: String },

    /// The rate file could not be read.
    #[error("Failed to read rate file '{path}': {source}")]
    RateSourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the report file.
    #[error("Failed to write report file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Pdfium binding errors ─────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
Install pdfium for your platform, or set PDFIUM_LIB_PATH=/path/to/dir \
containing libpdfium to use an existing copy.\n"
    )]
    PdfiumBindingFailed(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}
