//! Load the broker and scheme masters from disk.
//!
//! Broker_Master: Code,Shortname[,...]
//! Scheme_Master: Scheme Short Name,Scheme Name[,...]  (projected to those two)
//!
//! Files are re-read on every call.

use orderdesk_core::{
    BrokerReference, OrderDeskError, ReferenceKind, Result, SchemeAllowList, Table,
};
use std::path::Path;
use tracing::{debug, warn};

use crate::parsers::read_table;

pub const BROKER_CODE: &str = "Code";
pub const BROKER_SHORTNAME: &str = "Shortname";
pub const SCHEME_SHORT_NAME: &str = "Scheme Short Name";
pub const SCHEME_NAME: &str = "Scheme Name";

fn read_reference(kind: ReferenceKind, path: &Path, required: &[&str]) -> Result<(Table, Vec<usize>)> {
    if !path.exists() {
        return Err(OrderDeskError::ReferenceNotFound {
            kind,
            path: path.to_path_buf(),
        });
    }

    let table = read_table(path)?;
    let missing = table.missing_columns(required);
    if !missing.is_empty() {
        return Err(OrderDeskError::ReferenceColumns {
            path: path.to_path_buf(),
            missing: missing.into_iter().map(String::from).collect(),
        });
    }

    let cols = required
        .iter()
        .filter_map(|name| table.column_index(name))
        .collect();
    Ok((table, cols))
}

/// Load the broker code → short name map.
pub fn load_broker_reference(path: impl AsRef<Path>) -> Result<BrokerReference> {
    let path = path.as_ref();
    let (table, cols) = read_reference(ReferenceKind::Broker, path, &[BROKER_CODE, BROKER_SHORTNAME])?;

    let brokers = BrokerReference::from_pairs(
        (0..table.len()).map(|r| (table.cell(r, cols[0]).as_text(), table.cell(r, cols[1]).as_text())),
    );
    if brokers.is_empty() {
        warn!(path = %path.display(), "broker master has no codes; brokers pass through unchanged");
    }
    debug!(path = %path.display(), brokers = brokers.len(), "loaded broker master");
    Ok(brokers)
}

/// Load the scheme allow-list, projecting the master onto short and full name.
pub fn load_scheme_allow_list(path: impl AsRef<Path>) -> Result<SchemeAllowList> {
    let path = path.as_ref();
    let (table, cols) =
        read_reference(ReferenceKind::Scheme, path, &[SCHEME_SHORT_NAME, SCHEME_NAME])?;

    let schemes = SchemeAllowList::from_pairs(
        (0..table.len()).map(|r| (table.cell(r, cols[0]).as_text(), table.cell(r, cols[1]).as_text())),
    );
    if schemes.is_empty() {
        warn!(path = %path.display(), "scheme master has no short names; every order will be rejected");
    }
    debug!(path = %path.display(), schemes = schemes.len(), "loaded scheme master");
    Ok(schemes)
}

/// Load both masters; the broker master is checked first.
pub fn load_references(
    broker_path: impl AsRef<Path>,
    scheme_path: impl AsRef<Path>,
) -> Result<(BrokerReference, SchemeAllowList)> {
    let brokers = load_broker_reference(broker_path)?;
    let schemes = load_scheme_allow_list(scheme_path)?;
    Ok((brokers, schemes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_references() {
        let dir = tempfile::tempdir().unwrap();
        let b = dir.path().join("Broker_Master.csv");
        let s = dir.path().join("Scheme_Master.csv");
        fs::write(&b, "Code,Shortname,Name\nabc,ABCBRK,ABC Securities\nXYZ,XYZSEC,XYZ Inc\n").unwrap();
        fs::write(
            &s,
            "Scheme Code,Scheme Short Name,Scheme Name,AMC\n1,Growth Fund,Growth Fund Plan,A\n2,INCOME,Income Plan,B\n",
        )
        .unwrap();

        let (brokers, schemes) = load_references(&b, &s).unwrap();
        assert_eq!(brokers.short_name("ABC"), Some("ABCBRK"));
        assert_eq!(brokers.len(), 2);
        assert!(schemes.contains("GROWTH FUND"));
        assert!(schemes.contains("income"));
        assert_eq!(schemes.full_name("INCOME"), Some("Income Plan"));
    }

    #[test]
    fn test_missing_reference_file() {
        let dir = tempfile::tempdir().unwrap();
        let b = dir.path().join("Broker_Master.csv");
        fs::write(&b, "Code,Shortname\n").unwrap();

        let err = load_references(&b, dir.path().join("Scheme_Master.csv")).unwrap_err();
        match err {
            OrderDeskError::ReferenceNotFound { kind, path } => {
                assert_eq!(kind, ReferenceKind::Scheme);
                assert!(path.ends_with("Scheme_Master.csv"));
            }
            other => panic!("expected ReferenceNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_header_only_masters_load_empty() {
        let dir = tempfile::tempdir().unwrap();
        let b = dir.path().join("Broker_Master.csv");
        let s = dir.path().join("Scheme_Master.csv");
        fs::write(&b, "Code,Shortname\n,\n").unwrap();
        fs::write(&s, "Scheme Short Name,Scheme Name\n").unwrap();

        let (brokers, schemes) = load_references(&b, &s).unwrap();
        assert!(brokers.is_empty());
        assert!(schemes.is_empty());
        assert!(!schemes.contains("GROWTH FUND"));
    }

    #[test]
    fn test_reference_missing_columns() {
        let dir = tempfile::tempdir().unwrap();
        let s = dir.path().join("Scheme_Master.csv");
        fs::write(&s, "Short,Scheme Name\nA,B\n").unwrap();

        let err = load_scheme_allow_list(&s).unwrap_err();
        match err {
            OrderDeskError::ReferenceColumns { missing, .. } => {
                assert_eq!(missing, vec!["Scheme Short Name".to_string()]);
            }
            other => panic!("expected ReferenceColumns, got {other:?}"),
        }
    }
}
