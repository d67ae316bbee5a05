//! Order normalization: map uploaded rows onto the canonical export schema.
//!
//! Steps per row:
//!   1. upper-case the broker, then swap in the broker short name when the
//!      code is known (unknown codes pass through upper-cased)
//!   2. scheme short name = fund trimmed + upper-cased; ISIN = stock upper-cased
//!   3. rows whose scheme is not on the allow-list are set aside as rejected
//!
//! Accepted rows keep their input order.

use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::error::Result;
use crate::reference::{BrokerReference, SchemeAllowList};
use crate::schema::{
    CanonicalOrderRow, RawOrderRow, ASSET_CLASSIFICATION, EXCHANGE_SHORT_NAME, VALIDITY,
};
use crate::table::Table;

/// Why a row was left out of the export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectReason {
    SchemeNotRecognized { scheme: String },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::SchemeNotRecognized { scheme } if scheme.is_empty() => {
                f.write_str("fund is blank")
            }
            RejectReason::SchemeNotRecognized { scheme } => {
                write!(f, "scheme {scheme:?} is not in the scheme master")
            }
        }
    }
}

/// An input row that did not make it into the export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedRow {
    /// Zero-based position of the row in the upload (header excluded).
    pub row_index: usize,
    pub raw: RawOrderRow,
    pub reason: RejectReason,
}

/// The single aggregate warning raised when rows were rejected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizeWarning {
    pub rejected_count: usize,
    pub rejected_rows: Vec<usize>,
    pub schemes: Vec<String>,
}

impl fmt::Display for NormalizeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} row(s) have a Scheme Short Name not found in the scheme master and were excluded",
            self.rejected_count
        )?;
        if !self.schemes.is_empty() {
            write!(f, ": {}", self.schemes.join(", "))?;
        }
        Ok(())
    }
}

/// Accepted and rejected rows from one normalization pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct NormalizeOutcome {
    pub accepted: Vec<CanonicalOrderRow>,
    pub rejected: Vec<RejectedRow>,
}

impl NormalizeOutcome {
    /// One warning covering every rejected row, or `None` when all rows passed.
    pub fn warning(&self) -> Option<NormalizeWarning> {
        if self.rejected.is_empty() {
            return None;
        }
        let mut schemes: Vec<String> = Vec::new();
        for r in &self.rejected {
            let RejectReason::SchemeNotRecognized { scheme } = &r.reason;
            let label = if scheme.is_empty() { "(blank)" } else { scheme.as_str() };
            if !schemes.iter().any(|s| s == label) {
                schemes.push(label.to_string());
            }
        }
        Some(NormalizeWarning {
            rejected_count: self.rejected.len(),
            rejected_rows: self.rejected.iter().map(|r| r.row_index).collect(),
            schemes,
        })
    }
}

/// Normalize an uploaded table. Fails with `MissingColumns` before any row
/// is touched when the header is incomplete.
pub fn normalize_table(
    table: &Table,
    brokers: &BrokerReference,
    schemes: &SchemeAllowList,
) -> Result<NormalizeOutcome> {
    let rows = RawOrderRow::from_table(table)?;
    Ok(normalize(&rows, brokers, schemes))
}

/// Normalize already-typed rows against the reference tables.
pub fn normalize(
    rows: &[RawOrderRow],
    brokers: &BrokerReference,
    schemes: &SchemeAllowList,
) -> NormalizeOutcome {
    let mut outcome = NormalizeOutcome::default();

    for (row_index, raw) in rows.iter().enumerate() {
        let scheme_short_name = raw.fund.as_text().trim().to_uppercase();

        if !schemes.contains(&scheme_short_name) {
            outcome.rejected.push(RejectedRow {
                row_index,
                raw: raw.clone(),
                reason: RejectReason::SchemeNotRecognized {
                    scheme: scheme_short_name,
                },
            });
            continue;
        }

        let broker = raw.broker.as_text().to_uppercase();
        let broker_shortname = match brokers.short_name(&broker) {
            Some(short) => short.to_string(),
            None => broker,
        };

        outcome.accepted.push(CanonicalOrderRow {
            asset_classification: ASSET_CLASSIFICATION.to_string(),
            scheme_short_name,
            isin: raw.stock.as_text().to_uppercase(),
            instrument_holding_type: raw.classification.clone(),
            broker_shortname,
            exchange_short_name: EXCHANGE_SHORT_NAME.to_string(),
            counter_party: String::new(),
            transaction_type: raw.order_type.clone(),
            order_quantity: raw.shares.clone(),
            order_price: raw.price_limit.clone(),
            ytm: String::new(),
            validity: VALIDITY.to_string(),
            remarks: raw.remarks.clone(),
        });
    }

    debug!(
        accepted = outcome.accepted.len(),
        rejected = outcome.rejected.len(),
        "normalized order rows"
    );
    // The aggregate warning is the caller's to show; only trace it here.
    if let Some(w) = outcome.warning() {
        debug!("{w}");
    }

    outcome
}
