//! Driver name and settlement period from the document header.
//!
//! The header is not labelled in the extracted text; its fields sit at fixed
//! token positions. The offsets below describe the settlement layout as
//! issued since the first supported statements (layout v1). A layout change
//! means editing these constants and nothing else.

use super::normalize::TokenStream;
use crate::error::SettlementError;

// Layout v1 token offsets, counted after stop-word and punctuation removal.

/// Driver first name.
pub const DRIVER_FIRST_NAME: usize = 9;
/// Driver last name.
pub const DRIVER_LAST_NAME: usize = 10;
/// Period start: month, day, year (year token carries trailing text).
pub const PERIOD_START: [usize; 3] = [12, 13, 14];
/// Period end: month, day, year.
pub const PERIOD_END: [usize; 3] = [15, 16, 17];

/// Minimum stream length for a readable header.
pub const HEADER_TOKENS: usize = 18;

/// Year tokens are glued to the following field; only this many chars are the year.
const YEAR_CHARS: usize = 4;

/// Named header fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub driver_name: String,
    pub date_range: String,
}

/// Read the header fields from their fixed offsets.
pub fn extract_header(tokens: &TokenStream) -> Result<Header, SettlementError> {
    if tokens.len() < HEADER_TOKENS {
        return Err(SettlementError::HeaderTooShort {
            found: tokens.len(),
            required: HEADER_TOKENS,
        });
    }
    let at = |i: usize| tokens.as_slice()[i].as_str();

    let driver_name = format!("{} {}", at(DRIVER_FIRST_NAME), at(DRIVER_LAST_NAME));
    let date_range = format!(
        "{} to {}",
        date_at(&at, PERIOD_START),
        date_at(&at, PERIOD_END)
    );

    Ok(Header {
        driver_name,
        date_range,
    })
}

fn date_at<'a>(at: &impl Fn(usize) -> &'a str, [month, day, year]: [usize; 3]) -> String {
    let year: String = at(year).chars().take(YEAR_CHARS).collect();
    format!("{} {} {}", at(month), at(day), year)
}
