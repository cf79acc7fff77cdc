//! Pickup and delivery locations for one trip block.
//!
//! Location names are not delimited in the extracted text. What is reliable
//! is the truck number: the token holding the start of a location name has
//! the truck number glued in front of it, and the `PICKUP`/`DELIVER` marker
//! token starts with the two-letter province code. A location therefore spans
//! from just after the truck number up to the marker, one to three tokens
//! back.
//!
//! The backward scan is an explicit probe sequence, [`Probe::TryAnchor`] for
//! depth 1, 2 and 3; the first depth whose token holds the truck number wins.
//! Depth 3 is taken unconditionally when the shallower probes miss. A probe
//! that would reach before the start of the block ends the scan with an empty
//! location for that trip; the rest of the report is still produced.

use super::segment::TripBlock;
use crate::error::SettlementError;
use tracing::warn;

pub const PICKUP_MARKER: &str = "PICKUP";
pub const DELIVER_MARKER: &str = "DELIVER";

/// Char range of `block[1]` holding the truck number.
const TRUCK_NUMBER_CHARS: std::ops::Range<usize> = 6..10;

/// Chars skipped from the start of the truck number to the location name.
const TRUCK_NUMBER_WIDTH: usize = 4;

const PROVINCE_CHARS: usize = 2;

/// Deepest backward probe.
pub const MAX_DEPTH: usize = 3;

/// State of the backward scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    /// Look for the truck number `depth` tokens before the marker.
    TryAnchor(usize),
    /// Location name, without the province.
    Found(String),
    /// The next probe would start before the block's first token.
    OutOfBlock { depth: usize },
}

/// Resolved endpoints of a trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripLocations {
    pub pickup: String,
    pub delivery: String,
}

/// The truck number anchoring every location in `block`.
pub fn truck_number(block: &TripBlock<'_>, trip: usize) -> Result<String, SettlementError> {
    let second = block
        .tokens()
        .get(1)
        .ok_or_else(|| SettlementError::MalformedTrip {
            trip,
            detail: format!("block has {} token(s), the truck number needs 2", block.tokens().len()),
        })?;
    Ok(char_slice(second, TRUCK_NUMBER_CHARS.start, TRUCK_NUMBER_CHARS.end).to_string())
}

/// Resolve the first pickup and the first delivery after it.
///
/// Missing markers are tolerated and leave the corresponding name empty.
pub fn resolve_trip(block: &TripBlock<'_>, trip: usize) -> Result<TripLocations, SettlementError> {
    let anchor = truck_number(block, trip)?;
    let mut pickup: Option<String> = None;
    let mut delivery: Option<String> = None;

    for (i, token) in block.tokens().iter().enumerate() {
        if pickup.is_none() && token.contains(PICKUP_MARKER) {
            pickup = Some(resolve_location(block, i, &anchor, trip));
        }
        if pickup.is_some() && token.contains(DELIVER_MARKER) {
            delivery = Some(resolve_location(block, i, &anchor, trip));
            break;
        }
    }

    if pickup.is_none() || delivery.is_none() {
        warn!(
            "Trip {}: pickup or delivery marker not found (truck {})",
            trip + 1,
            anchor
        );
    }

    Ok(TripLocations {
        pickup: pickup.unwrap_or_default(),
        delivery: delivery.unwrap_or_default(),
    })
}

/// Location ending at the marker token `block[marker]`, with its province suffix.
///
/// Empty when the scan runs out of block before finding a name.
pub fn resolve_location(
    block: &TripBlock<'_>,
    marker: usize,
    anchor: &str,
    trip: usize,
) -> String {
    let tokens = block.tokens();
    let province = char_slice(tokens[marker], 0, PROVINCE_CHARS);

    let mut probe = Probe::TryAnchor(1);
    loop {
        probe = match probe {
            Probe::TryAnchor(depth) => try_anchor(block, marker, anchor, depth),
            Probe::Found(place) => return format!("{place}, {province}"),
            Probe::OutOfBlock { depth } => {
                warn!(
                    "Trip {}: marker '{}' at token {} has no token {} places before it; \
                     location left empty",
                    trip + 1,
                    tokens[marker],
                    marker,
                    depth
                );
                return String::new();
            }
        }
    }
}

/// One probe of the backward scan, returning the next state.
///
/// Yields [`Probe::TryAnchor`] with the next depth when the token `depth`
/// places before the marker does not hold the truck number and a deeper probe
/// remains.
pub fn try_anchor(block: &TripBlock<'_>, marker: usize, anchor: &str, depth: usize) -> Probe {
    let tokens = block.tokens();
    let Some(start) = marker.checked_sub(depth) else {
        return Probe::OutOfBlock { depth };
    };
    let head = tokens[start];
    if depth < MAX_DEPTH && !head.contains(anchor) {
        return Probe::TryAnchor(depth + 1);
    }

    let mut place = name_after_anchor(head, anchor).to_string();
    if depth > 1 {
        place.push(' ');
        place.extend(tokens[start + 1..marker].iter().copied());
    }
    Probe::Found(place)
}

/// Text of `token` starting [`TRUCK_NUMBER_WIDTH`] chars past the anchor.
///
/// An absent anchor (only possible on the deepest probe) slices from char 3,
/// the position reference reports were generated with.
fn name_after_anchor<'t>(token: &'t str, anchor: &str) -> &'t str {
    let from = match token.find(anchor) {
        Some(byte) => token[..byte].chars().count() + TRUCK_NUMBER_WIDTH,
        None => TRUCK_NUMBER_WIDTH - 1,
    };
    char_slice(token, from, usize::MAX)
}

/// `s[start..end]` counted in chars, clamped to the string like a slice would be
/// in a forgiving language.
fn char_slice(s: &str, start: usize, end: usize) -> &str {
    let byte_at = |n: usize| s.char_indices().nth(n).map_or(s.len(), |(b, _)| b);
    let from = byte_at(start);
    let to = byte_at(end).max(from);
    &s[from..to]
}
