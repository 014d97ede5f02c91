use crate::model::record::Record;

/// Ordered, in-memory list of records as shown on screen
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    pub fn new(records: Vec<Record>) -> Self {
        RecordStore { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Record> {
        self.records.get(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[Record] {
        &self.records
    }

    pub fn as_mut_slice(&mut self) -> &mut [Record] {
        &mut self.records
    }

    /// Position of the record with the given uuid
    pub fn position(&self, uuid: &str) -> Option<usize> {
        self.records.iter().position(|r| r.uuid == uuid)
    }

    /// Replace the whole list (e.g. after a reload)
    pub fn replace_all(&mut self, records: Vec<Record>) {
        self.records = records;
    }

    /// Replace the record sharing `record.uuid`, or append it if new.
    /// The stored record always starts with an empty color cache.
    pub fn upsert(&mut self, record: Record) {
        record.invalidate_colors();
        match self.position(&record.uuid) {
            Some(idx) => self.records[idx] = record,
            None => self.records.push(record),
        }
    }

    /// Remove the record with the given uuid, returning it
    pub fn remove(&mut self, uuid: &str) -> Option<Record> {
        let idx = self.position(uuid)?;
        Some(self.records.remove(idx))
    }

    /// Clear every cached color. Runs to completion before returning so a
    /// render pass never sees a partly invalidated store.
    pub fn invalidate_colors(&self) {
        for record in &self.records {
            record.invalidate_colors();
        }
    }

    /// Width of the longest project name, used for `$project` columns
    /// without an explicit width
    pub fn max_project_width(&self) -> usize {
        self.records
            .iter()
            .filter_map(|r| r.project.as_deref())
            .map(|p| p.chars().count())
            .max()
            .unwrap_or(0)
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
