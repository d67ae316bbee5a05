//! Typed order schemas: the nine-column upload sheet and the 13-column
//! canonical export.

use serde::Serialize;

use crate::error::{OrderDeskError, Result};
use crate::table::{Cell, Table};

pub const ORDER_TYPE: &str = "Order Type";
pub const STOCK: &str = "Stock";
pub const FUND: &str = "Fund";
pub const SHARES: &str = "Shares";
pub const PRICE_LIMIT: &str = "Price Limit";
pub const VALUE: &str = "Value";
pub const CLASSIFICATION: &str = "Classification";
pub const BROKER: &str = "Broker";
pub const REMARKS: &str = "Remarks";

/// Header of the upload sheet (and of the downloadable template).
pub const INPUT_COLUMNS: [&str; 9] = [
    ORDER_TYPE,
    STOCK,
    FUND,
    SHARES,
    PRICE_LIMIT,
    VALUE,
    CLASSIFICATION,
    BROKER,
    REMARKS,
];

/// Header of the exported order file, in output order.
pub const OUTPUT_COLUMNS: [&str; 13] = [
    "AssetClassification",
    "SchemeShortName",
    "ISIN",
    "InstrumentHoldingType",
    "BrokerShortname",
    "ExchangeShortName",
    "CounterParty",
    "TransactionType",
    "OrderQuantity",
    "OrderPrice",
    "YTM",
    "Validity",
    "Remarks",
];

pub const ASSET_CLASSIFICATION: &str = "Equity";
pub const EXCHANGE_SHORT_NAME: &str = "PSE";
pub const VALIDITY: &str = "GFD";

/// One uploaded order, as found in the sheet.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RawOrderRow {
    pub order_type: Cell,
    pub stock: Cell,
    pub fund: Cell,
    pub shares: Cell,
    pub price_limit: Cell,
    pub value: Cell,
    pub classification: Cell,
    pub broker: Cell,
    pub remarks: Cell,
}

impl RawOrderRow {
    /// Convert every data row of `table`.
    ///
    /// The header is checked once up front: if any of [`INPUT_COLUMNS`] is
    /// absent this fails with `MissingColumns` and no row is converted.
    pub fn from_table(table: &Table) -> Result<Vec<RawOrderRow>> {
        let missing = table.missing_columns(&INPUT_COLUMNS);
        if !missing.is_empty() {
            return Err(OrderDeskError::MissingColumns {
                missing: missing.into_iter().map(String::from).collect(),
            });
        }

        // Checked above, so every lookup succeeds.
        let idx = |name: &str| table.column_index(name).unwrap_or_default();
        let cols = INPUT_COLUMNS.map(idx);

        Ok((0..table.len())
            .map(|r| {
                let get = |i: usize| table.cell(r, cols[i]).clone();
                RawOrderRow {
                    order_type: get(0),
                    stock: get(1),
                    fund: get(2),
                    shares: get(3),
                    price_limit: get(4),
                    value: get(5),
                    classification: get(6),
                    broker: get(7),
                    remarks: get(8),
                }
            })
            .collect())
    }
}

/// One normalized order in the fixed export schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CanonicalOrderRow {
    pub asset_classification: String,
    pub scheme_short_name: String,
    #[serde(rename = "ISIN")]
    pub isin: String,
    pub instrument_holding_type: Cell,
    pub broker_shortname: String,
    pub exchange_short_name: String,
    pub counter_party: String,
    pub transaction_type: Cell,
    pub order_quantity: Cell,
    pub order_price: Cell,
    #[serde(rename = "YTM")]
    pub ytm: String,
    pub validity: String,
    pub remarks: Cell,
}

impl CanonicalOrderRow {
    /// Cells in [`OUTPUT_COLUMNS`] order.
    pub fn to_cells(&self) -> [Cell; 13] {
        let text = |s: &str| {
            if s.is_empty() {
                Cell::Empty
            } else {
                Cell::text(s)
            }
        };
        [
            text(&self.asset_classification),
            text(&self.scheme_short_name),
            text(&self.isin),
            self.instrument_holding_type.clone(),
            text(&self.broker_shortname),
            text(&self.exchange_short_name),
            text(&self.counter_party),
            self.transaction_type.clone(),
            self.order_quantity.clone(),
            self.order_price.clone(),
            text(&self.ytm),
            text(&self.validity),
            self.remarks.clone(),
        ]
    }
}

/// Render canonical rows as a [`Table`] with the export header.
pub fn canonical_table(rows: &[CanonicalOrderRow]) -> Table {
    Table::new(
        OUTPUT_COLUMNS,
        rows.iter().map(|r| r.to_cells().to_vec()).collect(),
    )
}
