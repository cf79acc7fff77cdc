//! Configuration types for settlement-to-report conversion.
//!
//! All run behaviour is controlled through [`ReportConfig`], built via its
//! [`ReportConfigBuilder`]. The defaults reproduce the reference pay reports
//! exactly: 24 cents per mile, a $5 fee per pickup and 13% HST.

use crate::error::SettlementError;
use crate::pipeline::extract::TextExtractor;
use crate::pipeline::pay::PayRates;
use std::fmt;
use std::sync::Arc;

/// Per-mile rate used when the rate source is absent or empty.
pub const DEFAULT_RATE_CENTS: u32 = 24;

/// Flat fee, in whole dollars, paid for every extra pickup.
pub const DEFAULT_PICKUP_FEE: i64 = 5;

/// Harmonized sales tax applied to mileage pay.
pub const DEFAULT_HST_PERCENT: u32 = 13;

/// Configuration for one settlement conversion.
///
/// # Example
/// ```rust
/// use settlement_payreport::ReportConfig;
///
/// let config = ReportConfig::builder()
///     .rate(26)
///     .strict_alignment(true)
///     .build()
///     .unwrap();
/// assert_eq!(config.rate, 26);
/// ```
#[derive(Clone)]
pub struct ReportConfig {
    /// Driver rate in cents per mile. Default: 24.
    pub rate: u32,

    /// Fee in whole dollars per recorded pickup. Default: 5.
    pub pickup_fee: i64,

    /// HST percentage applied to mileage pay. Default: 13.
    pub hst_percent: u32,

    /// Fail the run when trip blocks and the pickup/mileage columns differ in
    /// length. Default: false.
    ///
    /// When false the mismatch is logged, recorded in
    /// [`crate::output::Alignment`], and rows are joined over the common
    /// prefix. Totals always cover every extracted pickup and mileage.
    pub strict_alignment: bool,

    /// Artifact format written by [`crate::convert::convert_to_dir`]. Default: Markdown.
    pub format: ReportFormat,

    /// PDF user password for encrypted settlements.
    pub password: Option<String>,

    /// Pre-constructed text extractor. If None, pdfium is used.
    pub extractor: Option<Arc<dyn TextExtractor>>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            rate: DEFAULT_RATE_CENTS,
            pickup_fee: DEFAULT_PICKUP_FEE,
            hst_percent: DEFAULT_HST_PERCENT,
            strict_alignment: false,
            format: ReportFormat::default(),
            password: None,
            extractor: None,
        }
    }
}

impl fmt::Debug for ReportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportConfig")
            .field("rate", &self.rate)
            .field("pickup_fee", &self.pickup_fee)
            .field("hst_percent", &self.hst_percent)
            .field("strict_alignment", &self.strict_alignment)
            .field("format", &self.format)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field(
                "extractor",
                &self.extractor.as_ref().map(|_| "<dyn TextExtractor>"),
            )
            .finish()
    }
}

impl ReportConfig {
    /// Create a new builder for `ReportConfig`.
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder {
            config: Self::default(),
        }
    }

    /// The pay-calculator view of this config.
    pub fn pay_rates(&self) -> PayRates {
        PayRates {
            cents_per_mile: self.rate,
            pickup_fee: self.pickup_fee,
            hst_percent: self.hst_percent,
        }
    }
}

/// Builder for [`ReportConfig`].
#[derive(Debug)]
pub struct ReportConfigBuilder {
    config: ReportConfig,
}

impl ReportConfigBuilder {
    pub fn rate(mut self, cents_per_mile: u32) -> Self {
        self.config.rate = cents_per_mile;
        self
    }

    pub fn pickup_fee(mut self, dollars: i64) -> Self {
        self.config.pickup_fee = dollars;
        self
    }

    pub fn hst_percent(mut self, percent: u32) -> Self {
        self.config.hst_percent = percent;
        self
    }

    pub fn strict_alignment(mut self, v: bool) -> Self {
        self.config.strict_alignment = v;
        self
    }

    pub fn format(mut self, format: ReportFormat) -> Self {
        self.config.format = format;
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn extractor(mut self, extractor: Arc<dyn TextExtractor>) -> Self {
        self.config.extractor = Some(extractor);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ReportConfig, SettlementError> {
        let c = &self.config;
        if c.pickup_fee < 0 {
            return Err(SettlementError::InvalidConfig(format!(
                "Pickup fee must be ≥ 0, got {}",
                c.pickup_fee
            )));
        }
        if c.hst_percent > 100 {
            return Err(SettlementError::InvalidConfig(format!(
                "HST percent must be 0–100, got {}",
                c.hst_percent
            )));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Output artifact format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Markdown document with a GFM pay table. (default)
    #[default]
    Markdown,
    /// Pretty-printed JSON of the [`crate::output::PayReport`] model.
    Json,
}

impl ReportFormat {
    /// File extension (without the dot) for artifacts in this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Markdown => "md",
            ReportFormat::Json => "json",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_reports() {
        let c = ReportConfig::default();
        assert_eq!(c.rate, 24);
        assert_eq!(c.pickup_fee, 5);
        assert_eq!(c.hst_percent, 13);
        assert!(!c.strict_alignment);
        assert_eq!(c.format, ReportFormat::Markdown);
    }

    #[test]
    fn builder_rejects_negative_pickup_fee() {
        let err = ReportConfig::builder().pickup_fee(-1).build().unwrap_err();
        assert!(matches!(err, SettlementError::InvalidConfig(_)));
    }

    #[test]
    fn builder_rejects_hst_over_100() {
        assert!(ReportConfig::builder().hst_percent(101).build().is_err());
        assert!(ReportConfig::builder().hst_percent(100).build().is_ok());
    }

    #[test]
    fn debug_redacts_password() {
        let c = ReportConfig::builder().password("hunter2").build().unwrap();
        let dbg = format!("{c:?}");
        assert!(!dbg.contains("hunter2"));
        assert!(dbg.contains("<redacted>"));
    }

    #[test]
    fn pay_rates_mirror_config() {
        let c = ReportConfig::builder()
            .rate(30)
            .pickup_fee(7)
            .hst_percent(5)
            .build()
            .unwrap();
        let r = c.pay_rates();
        assert_eq!(r.cents_per_mile, 30);
        assert_eq!(r.pickup_fee, 7);
        assert_eq!(r.hst_percent, 5);
    }

    #[test]
    fn format_extension() {
        assert_eq!(ReportFormat::Markdown.extension(), "md");
        assert_eq!(ReportFormat::Json.extension(), "json");
    }
}
