//! Pipeline stages for settlement-to-report conversion.
//!
//! Each submodule implements exactly one step and is testable on its own
//! with hand-built token streams.
//!
//! ## Data Flow
//!
//! ```text
//! extract ──▶ normalize ──┬──▶ header
//! (pdfium)   (tokens)     ├──▶ segment(Blocks) ──▶ location
//!                         └──▶ segment(PickupsRegion) ──▶ pickups ──▶ pay
//! ```
//!
//! 1. [`extract`]   — validate the PDF and pull its text on a blocking thread
//! 2. [`normalize`] — tokenise, drop stop-words and punctuation
//! 3. [`header`]    — driver name and settlement period at fixed offsets
//! 4. [`segment`]   — trip blocks, or the pickups region after the trip list
//! 5. [`location`]  — pickup/delivery names anchored on the truck number
//! 6. [`pickups`]   — index-aligned pickup counts and mileages
//! 7. [`pay`]       — totals, HST and final pay
//!
//! [`rate`] reads the driver's per-mile rate from its one-line source.

pub mod extract;
pub mod header;
pub mod location;
pub mod normalize;
pub mod pay;
pub mod pickups;
pub mod rate;
pub mod segment;
pub mod stopwords;
