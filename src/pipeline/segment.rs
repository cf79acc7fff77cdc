//! Trip segmentation: split the token stream into per-trip blocks.
//!
//! Trip records have no delimiters of their own. Each one opens with a token
//! containing [`TRIP_START`] and the list ends at the two-token footer
//! [`FOOTER`]. Everything after the footer, up to [`super::pickups::REGION_END`],
//! is the pickups region that carries the per-trip pickup and mileage figures.
//!
//! A single pass serves both consumers; [`SegmentationMode`] chooses which
//! part of the stream is returned.

use tracing::{debug, warn};

/// Substring that opens a trip block.
pub const TRIP_START: &str = "KM'sTrip";

/// Filler token dropped from blocks.
const TRIP_FILLER: &str = "Trip";

/// Two-token footer closing the trip list.
pub const FOOTER: [&str; 2] = ["Trip", "NoDescriptionQtyRateCAD"];

/// Which part of the stream [`segment`] returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentationMode {
    /// Trip blocks up to the footer.
    Blocks,
    /// Tokens from the footer onwards.
    PickupsRegion,
}

/// Tokens of one trip, in stream order. `tokens[0]` holds the start marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripBlock<'a> {
    tokens: Vec<&'a str>,
}

impl<'a> TripBlock<'a> {
    pub fn new(tokens: Vec<&'a str>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[&'a str] {
        &self.tokens
    }
}

/// Output of [`segment`], tagged by the requested mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentationResult<'a> {
    Blocks(Vec<TripBlock<'a>>),
    /// Starts at the footer's first token; empty if no footer was found.
    PickupsRegion(&'a [String]),
}

/// Accumulates trip blocks during the pass.
#[derive(Debug, Default)]
struct BlocksBuilder<'a> {
    blocks: Vec<TripBlock<'a>>,
}

impl<'a> BlocksBuilder<'a> {
    fn open(mut self, marker: &'a str) -> Self {
        self.blocks.push(TripBlock::new(vec![marker]));
        self
    }

    /// Appends to the open block; a no-op while still seeking the first one.
    fn push(mut self, token: &'a str) -> Self {
        if let Some(block) = self.blocks.last_mut() {
            block.tokens.push(token);
        }
        self
    }

    fn finish(self) -> Vec<TripBlock<'a>> {
        self.blocks
    }
}

fn is_footer(tokens: &[String], i: usize) -> bool {
    tokens[i] == FOOTER[0] && tokens.get(i + 1).is_some_and(|next| next == FOOTER[1])
}

/// Walk `tokens` once and return the part selected by `mode`.
///
/// A missing footer is tolerated: blocks run to the end of the stream and the
/// pickups region is empty.
pub fn segment(tokens: &[String], mode: SegmentationMode) -> SegmentationResult<'_> {
    let mut builder = BlocksBuilder::default();

    for (i, token) in tokens.iter().enumerate() {
        if token.contains(TRIP_START) {
            builder = builder.open(token);
        } else if token != TRIP_FILLER {
            builder = builder.push(token);
        }

        if is_footer(tokens, i) {
            debug!("Trip list footer at token {}", i);
            return match mode {
                SegmentationMode::Blocks => SegmentationResult::Blocks(builder.finish()),
                SegmentationMode::PickupsRegion => SegmentationResult::PickupsRegion(&tokens[i..]),
            };
        }
    }

    warn!("Trip list footer not found; using everything up to the end of the text");
    match mode {
        SegmentationMode::Blocks => SegmentationResult::Blocks(builder.finish()),
        SegmentationMode::PickupsRegion => SegmentationResult::PickupsRegion(&[]),
    }
}

/// Convenience wrapper for [`SegmentationMode::Blocks`].
pub fn trip_blocks(tokens: &[String]) -> Vec<TripBlock<'_>> {
    match segment(tokens, SegmentationMode::Blocks) {
        SegmentationResult::Blocks(blocks) => blocks,
        SegmentationResult::PickupsRegion(_) => Vec::new(),
    }
}

/// Convenience wrapper for [`SegmentationMode::PickupsRegion`].
pub fn pickups_region(tokens: &[String]) -> &[String] {
    match segment(tokens, SegmentationMode::PickupsRegion) {
        SegmentationResult::PickupsRegion(region) => region,
        SegmentationResult::Blocks(_) => &[],
    }
}
