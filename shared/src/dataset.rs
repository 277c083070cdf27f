//! Remediation records loaded from the CSV data file.
//!
//! One row per (vendor, cluster, ULB) site. Besides the target tonnage a row
//! carries an April baseline and any number of `Cumulative Quantity … (date)`
//! columns, which are kept in file order and treated as a time series.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const VENDOR_COLUMN: &str = "Vendor";
pub const CLUSTER_COLUMN: &str = "Cluster";
pub const ULB_COLUMN: &str = "ULB";
pub const TARGET_COLUMN: &str = "Quantity to be remediated in MT";
pub const APRIL_COLUMN: &str = "Quantity remediated upto 30th April 2025 in MT";
pub const CUMULATIVE_PREFIX: &str = "Cumulative Quantity";

/// Label used for the April baseline when no cumulative columns exist.
pub const APRIL_BASELINE_DATE: &str = "2025-04-30";

/// Cell values spreadsheet exports use for "no value"; counted as 0.
const MISSING_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>", "N/A",
    "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DatasetError {
    #[error("data file is empty")]
    Empty,
    #[error("missing required column '{0}'")]
    MissingColumn(String),
    #[error("row {row}: expected {expected} fields, found {found}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("row {row}: unterminated quoted field")]
    UnterminatedQuote { row: usize },
    #[error("row {row}, column '{column}': '{value}' is not a number")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RemediationRecord {
    pub vendor: String,
    pub cluster: String,
    pub ulb: String,
    pub target_mt: f64,
    pub april_mt: f64,
    /// Aligned with [`Dataset::date_labels`].
    pub cumulative_mt: Vec<f64>,
}

/// Which measurement counts as "remediated so far".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatestColumn {
    Cumulative(usize),
    AprilBaseline,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub date_labels: Vec<String>,
    pub records: Vec<RemediationRecord>,
}

impl Dataset {
    pub fn from_csv_str(text: &str) -> Result<Self, DatasetError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut rows = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty());

        let (_, header_line) = rows.next().ok_or(DatasetError::Empty)?;
        let header: Vec<String> = split_csv_line(header_line, 0)?
            .into_iter()
            .map(|name| name.trim().to_string())
            .collect();

        let column = |name: &str| {
            header
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
        };
        let vendor_idx = column(VENDOR_COLUMN)?;
        let cluster_idx = column(CLUSTER_COLUMN)?;
        let ulb_idx = column(ULB_COLUMN)?;
        let target_idx = column(TARGET_COLUMN)?;
        let april_idx = header.iter().position(|h| h == APRIL_COLUMN);

        let cumulative: Vec<(usize, String)> = header
            .iter()
            .enumerate()
            .filter(|(_, h)| h.starts_with(CUMULATIVE_PREFIX))
            .map(|(idx, h)| (idx, date_label(h)))
            .collect();

        let mut records = Vec::new();
        for (row, (_, line)) in rows.enumerate() {
            let row = row + 1;
            let fields = split_csv_line(line, row)?;
            if fields.len() != header.len() {
                return Err(DatasetError::RowWidth {
                    row,
                    expected: header.len(),
                    found: fields.len(),
                });
            }
            let number = |idx: usize| parse_quantity(&fields[idx], row, &header[idx]);

            records.push(RemediationRecord {
                vendor: fields[vendor_idx].trim().to_string(),
                cluster: fields[cluster_idx].trim().to_string(),
                ulb: fields[ulb_idx].trim().to_string(),
                target_mt: number(target_idx)?,
                april_mt: match april_idx {
                    Some(idx) => number(idx)?,
                    None => 0.0,
                },
                cumulative_mt: cumulative
                    .iter()
                    .map(|(idx, _)| number(*idx))
                    .collect::<Result<_, _>>()?,
            });
        }

        Ok(Self {
            date_labels: cumulative.into_iter().map(|(_, label)| label).collect(),
            records,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted, deduplicated vendor identifiers.
    pub fn vendors(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.vendor.as_str()))
    }

    pub fn clusters(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.cluster.as_str()))
    }

    pub fn sites(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.ulb.as_str()))
    }

    pub fn latest_column(&self) -> LatestColumn {
        match self.date_labels.len() {
            0 => LatestColumn::AprilBaseline,
            len => LatestColumn::Cumulative(len - 1),
        }
    }

    pub fn latest_label(&self) -> String {
        self.date_labels
            .last()
            .cloned()
            .unwrap_or_else(|| APRIL_BASELINE_DATE.to_string())
    }

    pub fn latest_value(&self, record: &RemediationRecord) -> f64 {
        match self.latest_column() {
            LatestColumn::Cumulative(idx) => record.cumulative_mt.get(idx).copied().unwrap_or(0.0),
            LatestColumn::AprilBaseline => record.april_mt,
        }
    }

    /// Keeps the column layout, drops records not matching `keep`.
    pub fn subset(&self, keep: impl Fn(&RemediationRecord) -> bool) -> Dataset {
        Dataset {
            date_labels: self.date_labels.clone(),
            records: self.records.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }

    pub fn for_vendor(&self, vendor: &str) -> Dataset {
        self.subset(|r| r.vendor == vendor)
    }

    /// Keeps only the date columns at `indices` (ascending).
    pub fn with_date_columns(&self, indices: &[usize]) -> Dataset {
        Dataset {
            date_labels: indices
                .iter()
                .filter_map(|&idx| self.date_labels.get(idx).cloned())
                .collect(),
            records: self
                .records
                .iter()
                .map(|record| RemediationRecord {
                    cumulative_mt: indices
                        .iter()
                        .filter_map(|&idx| record.cumulative_mt.get(idx).copied())
                        .collect(),
                    ..record.clone()
                })
                .collect(),
        }
    }

    pub fn total_target(&self) -> f64 {
        self.records.iter().map(|r| r.target_mt).sum()
    }

    pub fn total_latest(&self) -> f64 {
        self.records.iter().map(|r| self.latest_value(r)).sum()
    }

    pub fn total_at(&self, column: usize) -> f64 {
        self.records
            .iter()
            .filter_map(|r| r.cumulative_mt.get(column))
            .sum()
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// `Cumulative Quantity (2025-05-01)` -> `2025-05-01`
fn date_label(header: &str) -> String {
    header
        .split_once('(')
        .and_then(|(_, rest)| rest.split_once(')'))
        .map(|(inside, _)| inside.trim().to_string())
        .unwrap_or_else(|| header.to_string())
}

fn parse_quantity(raw: &str, row: usize, column: &str) -> Result<f64, DatasetError> {
    let value = raw.trim();
    if value.is_empty() || MISSING_MARKERS.contains(&value) {
        return Ok(0.0);
    }
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(number),
        _ => Err(DatasetError::InvalidNumber {
            row,
            column: column.to_string(),
            value: value.to_string(),
        }),
    }
}

fn split_csv_line(line: &str, row: usize) -> Result<Vec<String>, DatasetError> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    if in_quotes {
        return Err(DatasetError::UnterminatedQuote { row });
    }
    fields.push(current);
    Ok(fields)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const SAMPLE_CSV: &str = "\
Vendor,Cluster,ULB,Quantity to be remediated in MT,Quantity remediated upto 30th April 2025 in MT,Cumulative Quantity (2025-05-01),Cumulative Quantity (2025-05-02),Cumulative Quantity (2025-05-03)
zigma, Guntur ,Tenali,100,10,20,30,50
zigma,Guntur,Ponnur,50,5,5,10,20
zigma,Nellore North,Kavali,200,0,0,20,40
tharuni,Nellore North,Gudur,80,8,16,24,40
tharuni,\"Kurnool, West\",Adoni,0,0,0,0,0
";

    pub(crate) fn sample() -> Dataset {
        Dataset::from_csv_str(SAMPLE_CSV).unwrap()
    }

    #[test]
    fn parses_records_and_date_columns() {
        let dataset = sample();
        assert_eq!(dataset.records.len(), 5);
        assert_eq!(dataset.date_labels, vec!["2025-05-01", "2025-05-02", "2025-05-03"]);
        assert_eq!(dataset.records[0].cluster, "Guntur");
        assert_eq!(dataset.records[4].cluster, "Kurnool, West");
        assert_eq!(dataset.records[0].cumulative_mt, vec![20.0, 30.0, 50.0]);
    }

    #[test]
    fn vendor_list_is_sorted_and_deduplicated() {
        assert_eq!(sample().vendors(), vec!["tharuni", "zigma"]);
    }

    #[test]
    fn latest_falls_back_to_april_baseline() {
        let dataset = Dataset::from_csv_str(
            "Vendor,Cluster,ULB,Quantity to be remediated in MT,Quantity remediated upto 30th April 2025 in MT\n\
             zigma,Guntur,Tenali,100,42\n",
        )
        .unwrap();
        assert_eq!(dataset.latest_column(), LatestColumn::AprilBaseline);
        assert_eq!(dataset.latest_label(), APRIL_BASELINE_DATE);
        assert_eq!(dataset.total_latest(), 42.0);
    }

    #[test]
    fn blank_numbers_count_as_zero() {
        let dataset = Dataset::from_csv_str(
            "Vendor,Cluster,ULB,Quantity to be remediated in MT\nzigma,Guntur,Tenali,\n",
        )
        .unwrap();
        assert_eq!(dataset.records[0].target_mt, 0.0);
    }

    #[test]
    fn missing_markers_count_as_zero() {
        let dataset = Dataset::from_csv_str(
            "Vendor,Cluster,ULB,Quantity to be remediated in MT,Cumulative Quantity (2025-05-01)\n\
             zigma,Guntur,Tenali,NA,NaN\n\
             zigma,Guntur,Ponnur,50,N/A\n\
             tharuni,Guntur,Bapatla,30,null\n",
        )
        .unwrap();
        assert_eq!(dataset.total_target(), 80.0);
        assert_eq!(dataset.total_latest(), 0.0);
        assert!(dataset.records.iter().all(|r| r.cumulative_mt == vec![0.0]));
    }

    #[test]
    fn infinite_quantities_are_rejected() {
        let err = Dataset::from_csv_str(
            "Vendor,Cluster,ULB,Quantity to be remediated in MT\nzigma,Guntur,Tenali,inf\n",
        )
        .unwrap_err();
        assert!(matches!(err, DatasetError::InvalidNumber { row: 1, .. }));
    }

    #[test]
    fn header_byte_order_mark_is_ignored() {
        let dataset = Dataset::from_csv_str(
            "\u{feff}Vendor,Cluster,ULB,Quantity to be remediated in MT\r\nzigma,Guntur,Tenali,10\r\n",
        )
        .unwrap();
        assert_eq!(dataset.vendors(), vec!["zigma"]);
        assert_eq!(dataset.total_target(), 10.0);
    }

    #[test]
    fn reports_missing_columns() {
        let err = Dataset::from_csv_str("Vendor,Cluster\nzigma,Guntur\n").unwrap_err();
        assert_eq!(err, DatasetError::MissingColumn(ULB_COLUMN.to_string()));
    }

    #[test]
    fn reports_bad_numbers_with_position() {
        let err = Dataset::from_csv_str(
            "Vendor,Cluster,ULB,Quantity to be remediated in MT\nzigma,Guntur,Tenali,10\nzigma,Guntur,Ponnur,lots\n",
        )
        .unwrap_err();
        assert_eq!(
            err,
            DatasetError::InvalidNumber {
                row: 2,
                column: TARGET_COLUMN.to_string(),
                value: "lots".to_string(),
            }
        );
    }

    #[test]
    fn reports_ragged_rows_and_open_quotes() {
        let ragged = Dataset::from_csv_str(
            "Vendor,Cluster,ULB,Quantity to be remediated in MT\nzigma,Guntur,10\n",
        );
        assert!(matches!(ragged, Err(DatasetError::RowWidth { row: 1, expected: 4, found: 3 })));

        let open = Dataset::from_csv_str(
            "Vendor,Cluster,ULB,Quantity to be remediated in MT\nzigma,\"Guntur,Tenali,10\n",
        );
        assert_eq!(open, Err(DatasetError::UnterminatedQuote { row: 1 }));
    }

    #[test]
    fn empty_input_is_an_error() {
        assert_eq!(Dataset::from_csv_str("\n \n"), Err(DatasetError::Empty));
    }

    #[test]
    fn date_column_selection_keeps_records_aligned() {
        let narrowed = sample().with_date_columns(&[0, 2]);
        assert_eq!(narrowed.date_labels, vec!["2025-05-01", "2025-05-03"]);
        assert_eq!(narrowed.records[0].cumulative_mt, vec![20.0, 50.0]);
    }
}
