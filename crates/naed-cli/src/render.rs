use naed_core::Report;

/// Fixed-width text table: one row per application, one column per table.
///
/// Every column is `width` characters. Names are left-justified, table
/// headers and values centered, and each value is cut to `cell` characters.
pub fn table(report: &Report, width: usize, cell: usize) -> String {
    let mut out = format!("{:<width$}", "Application");
    for t in &report.tables {
        out.push_str(&format!("{t:^width$}"));
    }
    out.push('\n');

    for row in &report.rows {
        out.push_str(&format!("{:<width$}", row.app));
        for r in &row.results {
            let text: String = r.result.to_string().chars().take(cell).collect();
            out.push_str(&format!("{text:^width$}"));
        }
        out.push('\n');
    }
    out
}

pub fn json(report: &Report) -> serde_json::Result<String> {
    let mut s = serde_json::to_string_pretty(report)?;
    s.push('\n');
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use naed_core::{DistanceResult, ReportRow, TableResult};

    fn report() -> Report {
        Report {
            norm: "perf_feedback".into(),
            tables: vec!["feedback".into()],
            rows: vec![
                ReportRow {
                    app: "foo".into(),
                    results: vec![TableResult {
                        table: "feedback".into(),
                        result: DistanceResult::Distance(0.5773502691896258),
                    }],
                },
                ReportRow {
                    app: "bar".into(),
                    results: vec![TableResult {
                        table: "feedback".into(),
                        result: DistanceResult::NoData,
                    }],
                },
            ],
        }
    }

    #[test]
    fn test_table_layout() {
        let text = table(&report(), 20, 7);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], format!("{:<20}{:^20}", "Application", "feedback"));
        assert_eq!(lines[1], format!("{:<20}{:^20}", "foo", "0.57735"));
        assert_eq!(lines[2], format!("{:<20}{:^20}", "bar", "-none-"));
        assert!(lines.iter().all(|l| l.chars().count() == 40));
    }

    #[test]
    fn test_cell_truncation() {
        let text = table(&report(), 10, 3);
        assert!(text.contains("0.5"));
        assert!(!text.contains("0.57"));
        assert!(text.contains("-no"));
    }

    #[test]
    fn test_empty_report_prints_header_only() {
        let mut r = report();
        r.rows.clear();
        assert_eq!(table(&r, 20, 7).lines().count(), 1);
    }

    #[test]
    fn test_json_roundtrips_through_value() {
        let s = json(&report()).unwrap();
        let v: serde_json::Value = serde_json::from_str(&s).unwrap();
        assert_eq!(v["rows"][1]["results"][0]["result"]["status"], "no_data");
        assert_eq!(v["tables"][0], "feedback");
    }
}
