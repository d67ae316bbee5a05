//! orderdesk-ingest: spreadsheet/CSV readers, reference loading, order export
//! and source-folder browsing.

pub mod export;
pub mod parsers;
pub mod reference;
pub mod viewer;

pub use export::{default_output_stem, output_file_name, write_orders, write_template};
pub use parsers::read_table;
pub use reference::{load_broker_reference, load_references, load_scheme_allow_list};
pub use viewer::{list_spreadsheets, load_spreadsheet};
