// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Adapter exposing a row-oriented record set provider as a page-oriented
//! data stream provider.

use crate::errors::ConnectorError;
use crate::model::{DataStream, Page, Split};
use crate::traits::{RecordSet, RecordSetProvider, StreamProvider};
use std::sync::Arc;

/// Wraps a [`RecordSetProvider`], batching its rows into pages.
pub struct RecordSetStreamProvider {
    record_sets: Arc<dyn RecordSetProvider>,
    page_size: usize,
}

impl RecordSetStreamProvider {
    /// A `page_size` of zero is treated as one.
    pub fn new(record_sets: Arc<dyn RecordSetProvider>, page_size: usize) -> Self {
        Self {
            record_sets,
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }
}

impl StreamProvider for RecordSetStreamProvider {
    fn open_stream(&self, split: &Split, columns: &[String]) -> Result<DataStream, ConnectorError> {
        let rows = self.record_sets.record_set(split, columns)?;
        Ok(Box::new(Pages {
            rows,
            page_size: self.page_size,
        }))
    }
}

/// Pulls up to `page_size` rows per page; stops at the first empty page.
pub(crate) struct Pages {
    pub(crate) rows: RecordSet,
    pub(crate) page_size: usize,
}

impl Iterator for Pages {
    type Item = Page;

    fn next(&mut self) -> Option<Page> {
        let rows: Vec<_> = self.rows.by_ref().take(self.page_size).collect();
        if rows.is_empty() {
            None
        } else {
            Some(Page { rows })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::StubRecordSetProvider;
    use crate::model::{TableHandle, TableName};
    use serde_json::json;

    fn split() -> Split {
        Split {
            handle: TableHandle::new("stub", TableName::new("default", "numbers")),
            part: 0,
            part_count: 1,
            hosts: vec![],
        }
    }

    #[test]
    fn test_rows_are_batched_into_pages() {
        struct TestCase {
            rows: usize,
            page_size: usize,
            expected_pages: Vec<usize>,
        }

        let cases = vec![
            TestCase { rows: 0, page_size: 4, expected_pages: vec![] },
            TestCase { rows: 3, page_size: 4, expected_pages: vec![3] },
            TestCase { rows: 8, page_size: 4, expected_pages: vec![4, 4] },
            TestCase { rows: 9, page_size: 4, expected_pages: vec![4, 4, 1] },
            TestCase { rows: 2, page_size: 0, expected_pages: vec![1, 1] },
        ];

        for case in cases {
            let provider = RecordSetStreamProvider::new(
                Arc::new(StubRecordSetProvider::with_rows(case.rows)),
                case.page_size,
            );
            let pages: Vec<usize> = provider
                .open_stream(&split(), &[])
                .unwrap()
                .map(|page| page.len())
                .collect();
            assert_eq!(
                pages, case.expected_pages,
                "{} rows with page size {}",
                case.rows, case.page_size
            );
        }
    }

    #[test]
    fn test_row_order_is_preserved() {
        let provider = RecordSetStreamProvider::new(Arc::new(StubRecordSetProvider::with_rows(5)), 2);
        let values: Vec<serde_json::Value> = provider
            .open_stream(&split(), &[])
            .unwrap()
            .flat_map(|page| page.rows)
            .map(|row| row[0].clone())
            .collect();
        assert_eq!(values, vec![json!(0), json!(1), json!(2), json!(3), json!(4)]);
    }
}
