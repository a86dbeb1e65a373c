//! Accumulates test records during a discovery-and-parse pass

use std::collections::HashMap;
use std::path::Path;

use crate::types::{TestAction, TestCollection, TestRecord};

/// The collection under construction plus an id index.
///
/// Id lookups resolve to the first record appended under that id, so a
/// record appended later with a repeated id is stored but never receives
/// annotation actions.
#[derive(Debug, Default)]
pub struct TestAssembler {
    collection: TestCollection,
    index: HashMap<String, usize>,
}

impl TestAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the record for `id`, creating it with `file` when absent.
    ///
    /// `file` is only recorded at creation time.
    pub fn find_or_create(&mut self, id: &str, file: &Path) -> &mut TestRecord {
        let idx = match self.index.get(id) {
            Some(&idx) => idx,
            None => {
                let idx = self.collection.tests.len();
                self.collection
                    .tests
                    .push(TestRecord::new(id, Some(file.to_path_buf())));
                self.index.insert(id.to_string(), idx);
                idx
            }
        };
        &mut self.collection.tests[idx]
    }

    /// Append an action to the record for `id`, creating the record if needed
    pub fn push_action(&mut self, id: &str, file: &Path, action: TestAction) {
        self.find_or_create(id, file).actions.push(action);
    }

    /// Append a whole record as-is, without any collision check.
    ///
    /// Records without a string id are stored but cannot be looked up.
    pub fn push_record(&mut self, record: TestRecord) {
        let idx = self.collection.tests.len();
        if let Some(id) = record.key() {
            self.index.entry(id.to_string()).or_insert(idx);
        }
        self.collection.tests.push(record);
    }

    /// Finish assembly and hand over the collection
    pub fn finish(self) -> TestCollection {
        self.collection
    }
}
