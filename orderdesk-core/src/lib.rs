//! orderdesk-core: typed order schema, reference tables and the order normalizer

pub mod error;
pub mod normalizer;
pub mod reference;
pub mod schema;
pub mod table;

pub use error::{OrderDeskError, ReferenceKind, Result};
pub use normalizer::{
    normalize, normalize_table, NormalizeOutcome, NormalizeWarning, RejectReason, RejectedRow,
};
pub use reference::{BrokerReference, SchemeAllowList};
pub use schema::{canonical_table, CanonicalOrderRow, RawOrderRow, INPUT_COLUMNS, OUTPUT_COLUMNS};
pub use table::{Cell, Table};
