use anyhow::{Context, Result};
use orderdesk_core::{
    canonical_table, normalize_table, CanonicalOrderRow, NormalizeOutcome, NormalizeWarning,
    SchemeAllowList,
};
use orderdesk_ingest::{
    default_output_stem, load_references, output_file_name, read_table, write_orders,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use crate::config::Config;
use crate::preview::render_table;

/// Rows shown in the upload / processed previews.
const PREVIEW_ROWS: usize = 5;

#[derive(Debug, Clone, Default)]
pub struct ProcessArgs {
    pub input: PathBuf,
    /// Output name without extension; defaults to `<prefix>_<YYYYMMDDHHMM>`.
    pub output: Option<String>,
    pub brokers: Option<PathBuf>,
    pub schemes: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub json: bool,
}

/// Orders per scheme in the export, with the scheme master's full name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemeSummary {
    pub short_name: String,
    pub full_name: Option<String>,
    pub orders: usize,
}

/// Schemes in first-seen order.
pub fn scheme_summary(accepted: &[CanonicalOrderRow], schemes: &SchemeAllowList) -> Vec<SchemeSummary> {
    let mut out: Vec<SchemeSummary> = Vec::new();
    for row in accepted {
        match out.iter_mut().find(|s| s.short_name == row.scheme_short_name) {
            Some(s) => s.orders += 1,
            None => out.push(SchemeSummary {
                short_name: row.scheme_short_name.clone(),
                full_name: schemes.full_name(&row.scheme_short_name).map(String::from),
                orders: 1,
            }),
        }
    }
    out
}

#[derive(Debug, Serialize)]
pub struct ProcessReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub uploaded_rows: usize,
    pub warning: Option<NormalizeWarning>,
    pub schemes: Vec<SchemeSummary>,
    #[serde(flatten)]
    pub outcome: NormalizeOutcome,
}

/// Load the masters, normalize the upload and write the processed workbook.
pub fn run_process(cfg: &Config, args: &ProcessArgs) -> Result<ProcessReport> {
    let broker_path = args.brokers.clone().unwrap_or_else(|| cfg.references.broker_master.clone());
    let scheme_path = args.schemes.clone().unwrap_or_else(|| cfg.references.scheme_master.clone());
    let (brokers, schemes) = load_references(&broker_path, &scheme_path)?;

    let table = read_table(&args.input)?;
    if !args.json {
        println!("Uploaded data preview:\n{}\n", render_table(&table.head(PREVIEW_ROWS)));
    }

    let outcome = normalize_table(&table, &brokers, &schemes)?;
    let warning = outcome.warning();
    let summary = scheme_summary(&outcome.accepted, &schemes);

    let stem = args.output.clone().unwrap_or_else(|| {
        default_output_stem(&cfg.output.prefix, chrono::Local::now().naive_local())
    });
    let out_dir = args.out_dir.clone().unwrap_or_else(|| cfg.output.dir.clone());
    let output = out_dir.join(output_file_name(&stem));

    write_orders(&output, &outcome.accepted)
        .with_context(|| format!("exporting {}", output.display()))?;
    info!(output = %output.display(), rows = outcome.accepted.len(), "processed buy orders");

    if !args.json {
        if let Some(w) = &warning {
            eprintln!("warning: {w}");
        }
        let processed = canonical_table(&outcome.accepted);
        println!("Processed data preview:\n{}\n", render_table(&processed.head(PREVIEW_ROWS)));
        if !summary.is_empty() {
            println!("Schemes:");
            for s in &summary {
                println!(
                    "  {:<16} {:<40} {} order(s)",
                    s.short_name,
                    s.full_name.as_deref().unwrap_or("-"),
                    s.orders
                );
            }
            println!();
        }
        println!(
            "Wrote {} of {} rows to {}",
            outcome.accepted.len(),
            table.len(),
            output.display()
        );
    }

    Ok(ProcessReport {
        input: args.input.clone(),
        output,
        uploaded_rows: table.len(),
        warning,
        schemes: summary,
        outcome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn setup(dir: &std::path::Path) -> Config {
        fs::write(dir.join("Broker_Master.csv"), "Code,Shortname\nABC,ABCBRK\n").unwrap();
        fs::write(
            dir.join("Scheme_Master.csv"),
            "Scheme Short Name,Scheme Name\nGROWTH FUND,Growth Fund Plan\n",
        )
        .unwrap();
        let mut cfg = Config::default();
        cfg.references.broker_master = dir.join("Broker_Master.csv");
        cfg.references.scheme_master = dir.join("Scheme_Master.csv");
        cfg.output.dir = dir.to_path_buf();
        cfg
    }

    #[test]
    fn test_run_process_writes_named_output() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = setup(dir.path());
        let input = dir.path().join("orders.csv");
        fs::write(
            &input,
            "Order Type,Stock,Fund,Shares,Price Limit,Value,Classification,Broker,Remarks\n\
             buy,isin123, growth fund ,100,50.5,5050,Long,abc,x\n\
             buy,isin456,unknown fund,5,1,5,Long,abc,\n",
        )
        .unwrap();

        let args = ProcessArgs {
            input,
            output: Some("Buy_test".to_string()),
            json: true,
            ..ProcessArgs::default()
        };
        let report = run_process(&cfg, &args).unwrap();

        assert_eq!(report.output, dir.path().join("Buy_test.xlsx"));
        assert!(report.output.is_file());
        assert_eq!(report.uploaded_rows, 2);
        assert_eq!(report.outcome.accepted.len(), 1);
        assert_eq!(report.outcome.accepted[0].broker_shortname, "ABCBRK");
        assert_eq!(report.warning.as_ref().unwrap().rejected_rows, vec![1]);
        assert_eq!(
            report.schemes,
            vec![SchemeSummary {
                short_name: "GROWTH FUND".to_string(),
                full_name: Some("Growth Fund Plan".to_string()),
                orders: 1,
            }]
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["accepted"][0]["ISIN"], "ISIN123");
        assert_eq!(json["rejected"][0]["reason"]["kind"], "scheme_not_recognized");
        assert_eq!(json["schemes"][0]["full_name"], "Growth Fund Plan");
    }

    #[test]
    fn test_scheme_summary_counts_in_first_seen_order() {
        let schemes = SchemeAllowList::from_pairs([("INCOME", "Income Plan"), ("GROWTH FUND", "Growth Fund Plan")]);
        let brokers = orderdesk_core::BrokerReference::default();
        let rows: Vec<orderdesk_core::RawOrderRow> = ["growth fund", "income", "Growth Fund"]
            .into_iter()
            .map(|fund| orderdesk_core::RawOrderRow {
                fund: orderdesk_core::Cell::text(fund),
                ..Default::default()
            })
            .collect();
        let outcome = orderdesk_core::normalize(&rows, &brokers, &schemes);

        let summary = scheme_summary(&outcome.accepted, &schemes);
        let counts: Vec<(&str, usize)> = summary.iter().map(|s| (s.short_name.as_str(), s.orders)).collect();
        assert_eq!(counts, vec![("GROWTH FUND", 2), ("INCOME", 1)]);
        assert_eq!(summary[1].full_name.as_deref(), Some("Income Plan"));
    }

    #[test]
    fn test_missing_master_stops_before_reading_upload() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = setup(dir.path());
        cfg.references.scheme_master = dir.path().join("missing.csv");

        let args = ProcessArgs {
            input: dir.path().join("never_read.xlsx"),
            json: true,
            ..ProcessArgs::default()
        };
        let err = run_process(&cfg, &args).unwrap_err();
        assert!(err.to_string().contains("scheme master not found"));
    }
}
