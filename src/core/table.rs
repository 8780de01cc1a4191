//! Row-labeled table: a time index with one or more numeric columns.

use crate::error::{Result, SplitError};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

/// Layout of multi-column input data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueLayout {
    /// Each inner vector is a column.
    #[default]
    Column,
    /// Each inner vector is a row across all columns.
    Row,
}

/// A table whose rows are labeled by strictly increasing timestamps.
///
/// The row labels are the time key: position and timestamp agree, so a
/// contiguous slice of rows is also a contiguous stretch of time.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledTable {
    index: Vec<DateTime<Utc>>,
    /// Values stored column-major: columns[column][row]
    columns: Vec<Vec<f64>>,
    labels: Vec<String>,
    frequency: Option<Duration>,
}

/// Builder for constructing a [`LabeledTable`].
#[derive(Debug, Clone, Default)]
pub struct LabeledTableBuilder {
    index: Vec<DateTime<Utc>>,
    values: Vec<Vec<f64>>,
    layout: ValueLayout,
    labels: Vec<String>,
    frequency: Option<Duration>,
}

impl LabeledTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(mut self, index: Vec<DateTime<Utc>>) -> Self {
        self.index = index;
        self
    }

    /// Set a single value column.
    pub fn values(mut self, values: Vec<f64>) -> Self {
        self.values = vec![values];
        self.layout = ValueLayout::Column;
        self
    }

    /// Set several value columns with the given layout.
    pub fn multi_values(mut self, values: Vec<Vec<f64>>, layout: ValueLayout) -> Self {
        self.values = values;
        self.layout = layout;
        self
    }

    pub fn labels<S: Into<String>>(mut self, labels: impl IntoIterator<Item = S>) -> Self {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn frequency(mut self, freq: Duration) -> Self {
        self.frequency = Some(freq);
        self
    }

    pub fn build(self) -> Result<LabeledTable> {
        let mut table = LabeledTable::new(self.index, self.values, self.layout, self.labels)?;
        table.frequency = self.frequency;
        Ok(table)
    }
}

impl LabeledTable {
    /// Create a table, validating the index and column shapes.
    pub fn new(
        index: Vec<DateTime<Utc>>,
        values: Vec<Vec<f64>>,
        layout: ValueLayout,
        labels: Vec<String>,
    ) -> Result<Self> {
        validate_increasing(&index)?;

        let columns = match layout {
            ValueLayout::Column => {
                for column in &values {
                    if column.len() != index.len() {
                        return Err(SplitError::DimensionMismatch {
                            expected: index.len(),
                            got: column.len(),
                        });
                    }
                }
                values
            }
            ValueLayout::Row => {
                if values.len() != index.len() {
                    return Err(SplitError::DimensionMismatch {
                        expected: index.len(),
                        got: values.len(),
                    });
                }

                let width = values.first().map(|row| row.len()).unwrap_or(0);
                if let Some(row) = values.iter().find(|row| row.len() != width) {
                    return Err(SplitError::DimensionMismatch {
                        expected: width,
                        got: row.len(),
                    });
                }

                (0..width)
                    .map(|c| values.iter().map(|row| row[c]).collect())
                    .collect()
            }
        };

        if !labels.is_empty() && labels.len() != columns.len() {
            return Err(SplitError::DimensionMismatch {
                expected: columns.len(),
                got: labels.len(),
            });
        }

        Ok(Self {
            index,
            columns,
            labels,
            frequency: None,
        })
    }

    /// Create a single-column table.
    pub fn univariate(index: Vec<DateTime<Utc>>, values: Vec<f64>) -> Result<Self> {
        Self::new(index, vec![values], ValueLayout::Column, vec![])
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of value columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Row labels.
    pub fn index(&self) -> &[DateTime<Utc>] {
        &self.index
    }

    /// Values of one column.
    pub fn column(&self, column: usize) -> Result<&[f64]> {
        self.columns
            .get(column)
            .map(|v| v.as_slice())
            .ok_or(SplitError::IndexOutOfBounds {
                index: column,
                size: self.columns.len(),
            })
    }

    /// Values of the column with the given label.
    pub fn column_by_label(&self, label: &str) -> Option<&[f64]> {
        self.labels
            .iter()
            .position(|l| l == label)
            .and_then(|c| self.columns.get(c))
            .map(|v| v.as_slice())
    }

    /// Values of the first column.
    pub fn primary_values(&self) -> &[f64] {
        self.columns.first().map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn columns(&self) -> &[Vec<f64>] {
        &self.columns
    }

    /// One row across all columns.
    pub fn row(&self, row: usize) -> Result<Vec<f64>> {
        if row >= self.len() {
            return Err(SplitError::IndexOutOfBounds {
                index: row,
                size: self.len(),
            });
        }
        Ok(self.columns.iter().map(|column| column[row]).collect())
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn frequency(&self) -> Option<Duration> {
        self.frequency
    }

    /// Copy out rows `[start, end)`, keeping their labels and order.
    pub fn slice(&self, start: usize, end: usize) -> Result<LabeledTable> {
        if start > end {
            return Err(SplitError::InvalidParameter(
                "start must be <= end".to_string(),
            ));
        }
        if end > self.len() {
            return Err(SplitError::IndexOutOfBounds {
                index: end,
                size: self.len(),
            });
        }

        Ok(LabeledTable {
            index: self.index[start..end].to_vec(),
            columns: self
                .columns
                .iter()
                .map(|column| column[start..end].to_vec())
                .collect(),
            labels: self.labels.clone(),
            frequency: self.frequency,
        })
    }

    /// Append the rows of `other`, which must continue this table in time.
    pub fn append(&mut self, other: &LabeledTable) -> Result<()> {
        if other.width() != self.width() {
            return Err(SplitError::DimensionMismatch {
                expected: self.width(),
                got: other.width(),
            });
        }
        if let (Some(last), Some(first)) = (self.index.last(), other.index.first()) {
            if first <= last {
                return Err(SplitError::TimestampError(
                    "appended rows must start after the last row".to_string(),
                ));
            }
        }

        self.index.extend_from_slice(&other.index);
        for (column, extra) in self.columns.iter_mut().zip(&other.columns) {
            column.extend_from_slice(extra);
        }
        Ok(())
    }

    /// Infer the modal spacing between rows.
    ///
    /// Fails when fewer than `tolerance` of the gaps share the modal spacing.
    pub fn infer_frequency(&self, tolerance: f64) -> Result<Duration> {
        if self.len() < 2 {
            return Err(SplitError::InsufficientData {
                needed: 2,
                got: self.len(),
            });
        }

        let mut counts: HashMap<i64, usize> = HashMap::new();
        for w in self.index.windows(2) {
            *counts.entry((w[1] - w[0]).num_seconds()).or_insert(0) += 1;
        }

        let (modal_diff, modal_count) = counts
            .iter()
            .max_by_key(|(&diff, &count)| (count, std::cmp::Reverse(diff)))
            .map(|(&diff, &count)| (diff, count))
            .ok_or(SplitError::InsufficientData {
                needed: 2,
                got: self.len(),
            })?;

        let ratio = modal_count as f64 / (self.len() - 1) as f64;
        if ratio < tolerance {
            return Err(SplitError::TimestampError(
                "no unique modal spacing found".to_string(),
            ));
        }

        Ok(Duration::seconds(modal_diff))
    }
}

fn validate_increasing(index: &[DateTime<Utc>]) -> Result<()> {
    if index.windows(2).any(|w| w[1] <= w[0]) {
        return Err(SplitError::TimestampError(
            "timestamps must be strictly increasing".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_daily_index(n: usize) -> Vec<DateTime<Utc>> {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        (0..n).map(|i| base + Duration::days(i as i64)).collect()
    }

    #[test]
    fn table_constructs_univariate_data() {
        let index = make_daily_index(5);
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];

        let table = LabeledTable::univariate(index.clone(), values.clone()).unwrap();

        assert_eq!(table.len(), 5);
        assert!(!table.is_empty());
        assert_eq!(table.width(), 1);
        assert_eq!(table.primary_values(), &values);
        assert_eq!(table.index(), &index);
    }

    #[test]
    fn table_transposes_row_layout() {
        let table = LabeledTableBuilder::new()
            .index(make_daily_index(3))
            .multi_values(
                vec![vec![1.0, 10.0], vec![2.0, 20.0], vec![3.0, 30.0]],
                ValueLayout::Row,
            )
            .labels(["sales", "visits"])
            .build()
            .unwrap();

        assert_eq!(table.width(), 2);
        assert_eq!(table.column(1).unwrap(), &[10.0, 20.0, 30.0]);
        assert_eq!(table.column_by_label("sales"), Some(&[1.0, 2.0, 3.0][..]));
        assert_eq!(table.row(2).unwrap(), vec![3.0, 30.0]);
        assert!(table.column_by_label("missing").is_none());
    }

    #[test]
    fn table_rejects_unordered_index() {
        let mut index = make_daily_index(3);
        index.swap(0, 1);
        let result = LabeledTable::univariate(index, vec![1.0, 2.0, 3.0]);
        assert!(matches!(result, Err(SplitError::TimestampError(_))));
    }

    #[test]
    fn table_rejects_ragged_columns() {
        let result = LabeledTable::univariate(make_daily_index(3), vec![1.0, 2.0]);
        assert!(matches!(
            result,
            Err(SplitError::DimensionMismatch {
                expected: 3,
                got: 2
            })
        ));

        let result = LabeledTable::new(
            make_daily_index(2),
            vec![vec![1.0, 2.0], vec![3.0]],
            ValueLayout::Row,
            vec![],
        );
        assert!(matches!(result, Err(SplitError::DimensionMismatch { .. })));
    }

    #[test]
    fn table_rejects_label_count_mismatch() {
        let result = LabeledTable::new(
            make_daily_index(2),
            vec![vec![1.0, 2.0]],
            ValueLayout::Column,
            vec!["a".to_string(), "b".to_string()],
        );
        assert!(matches!(result, Err(SplitError::DimensionMismatch { .. })));
    }

    #[test]
    fn slice_keeps_row_labels() {
        let index = make_daily_index(10);
        let values: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let table = LabeledTableBuilder::new()
            .index(index.clone())
            .values(values)
            .labels(["y"])
            .frequency(Duration::days(1))
            .build()
            .unwrap();

        let slice = table.slice(3, 7).unwrap();
        assert_eq!(slice.len(), 4);
        assert_eq!(slice.index(), &index[3..7]);
        assert_eq!(slice.primary_values(), &[3.0, 4.0, 5.0, 6.0]);
        assert_eq!(slice.labels(), &["y"]);
        assert_eq!(slice.frequency(), Some(Duration::days(1)));

        assert!(table.slice(7, 3).is_err());
        assert!(matches!(
            table.slice(0, 11),
            Err(SplitError::IndexOutOfBounds { index: 11, size: 10 })
        ));
    }

    #[test]
    fn append_restores_sliced_table() {
        let table =
            LabeledTable::univariate(make_daily_index(6), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
                .unwrap();

        let mut head = table.slice(0, 2).unwrap();
        head.append(&table.slice(2, 6).unwrap()).unwrap();
        assert_eq!(head, table);

        let mut tail = table.slice(2, 6).unwrap();
        assert!(matches!(
            tail.append(&table.slice(0, 2).unwrap()),
            Err(SplitError::TimestampError(_))
        ));
    }

    #[test]
    fn infer_frequency_finds_modal_spacing() {
        let mut index = make_daily_index(10);
        index[9] = index[8] + Duration::days(3);
        let table = LabeledTable::univariate(index, vec![0.0; 10]).unwrap();

        assert_eq!(table.infer_frequency(0.8).unwrap(), Duration::days(1));
        assert!(table.infer_frequency(0.95).is_err());

        let single = LabeledTable::univariate(make_daily_index(1), vec![0.0]).unwrap();
        assert!(matches!(
            single.infer_frequency(0.5),
            Err(SplitError::InsufficientData { .. })
        ));
    }
}
