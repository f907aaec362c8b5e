use crate::access_log::parse::parse_line;
use crate::access_log::status::StatusTally;
use crate::access_log::types::ConnectionRecord;
use ahash::RandomState;
use std::collections::HashMap;
use std::slice;

/// Every record seen for one client source, plus its status tally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientGroup {
    source: String,
    records: Vec<ConnectionRecord>,
    tally: StatusTally,
}

impl ClientGroup {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            records: Vec::new(),
            tally: StatusTally::new(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Records in the order they were added.
    pub fn records(&self) -> &[ConnectionRecord] {
        &self.records
    }

    pub fn tally(&self) -> &StatusTally {
        &self.tally
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn push(&mut self, record: ConnectionRecord) {
        debug_assert_eq!(record.client_source, self.source);
        self.tally.record(record.status_code);
        self.records.push(record);
    }

    fn absorb(&mut self, other: ClientGroup) {
        self.tally += &other.tally;
        self.records.extend(other.records);
    }
}

/// Client groups keyed by source, iterated in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct ClientGroups {
    groups: Vec<ClientGroup>,
    index: HashMap<String, usize, RandomState>,
}

impl ClientGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, record: ConnectionRecord) {
        match self.index.get(&record.client_source) {
            Some(&idx) => self.groups[idx].push(record),
            None => {
                let mut group = ClientGroup::new(record.client_source.clone());
                group.push(record);
                self.insert_new(group);
            }
        }
    }

    pub fn add_all<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = ConnectionRecord>,
    {
        for record in records {
            self.add(record);
        }
    }

    /// Combines two aggregates.
    ///
    /// Counters are summed. For a client present on both sides, `other`'s records are
    /// appended after this side's. Clients only known to `other` follow this side's
    /// clients, in `other`'s order.
    pub fn merge(mut self, other: ClientGroups) -> ClientGroups {
        for group in other.groups {
            match self.index.get(group.source()) {
                Some(&idx) => self.groups[idx].absorb(group),
                None => self.insert_new(group),
            }
        }
        self
    }

    pub fn get(&self, source: &str) -> Option<&ClientGroup> {
        self.index.get(source).map(|&idx| &self.groups[idx])
    }

    pub fn iter(&self) -> slice::Iter<'_, ClientGroup> {
        self.groups.iter()
    }

    /// Number of distinct client sources.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn total_records(&self) -> usize {
        self.groups.iter().map(ClientGroup::len).sum()
    }

    fn insert_new(&mut self, group: ClientGroup) {
        self.index.insert(group.source.clone(), self.groups.len());
        self.groups.push(group);
    }
}

// The index is derived from `groups`, so only the ordered groups take part.
impl PartialEq for ClientGroups {
    fn eq(&self, other: &Self) -> bool {
        self.groups == other.groups
    }
}

impl Eq for ClientGroups {}

impl Extend<ConnectionRecord> for ClientGroups {
    fn extend<I: IntoIterator<Item = ConnectionRecord>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl FromIterator<ConnectionRecord> for ClientGroups {
    fn from_iter<I: IntoIterator<Item = ConnectionRecord>>(iter: I) -> Self {
        let mut groups = ClientGroups::new();
        groups.add_all(iter);
        groups
    }
}

impl<'a> IntoIterator for &'a ClientGroups {
    type Item = &'a ClientGroup;
    type IntoIter = slice::Iter<'a, ClientGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Parses raw lines into client groups and keeps count of what was skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogAggregator {
    groups: ClientGroups,
    lines_parsed: u64,
    lines_skipped: u64,
}

impl LogAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `line` and records it. Malformed lines are counted and dropped.
    pub fn ingest_line(&mut self, line: &str) {
        match parse_line(line) {
            Ok(record) => {
                self.groups.add(record);
                self.lines_parsed += 1;
            }
            Err(reason) => {
                tracing::debug!(%reason, field = %reason.field(), line, "skipping malformed line");
                self.lines_skipped += 1;
            }
        }
    }

    pub fn ingest_lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.ingest_line(line.as_ref());
        }
    }

    pub fn add_all<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = ConnectionRecord>,
    {
        for record in records {
            self.groups.add(record);
            self.lines_parsed += 1;
        }
    }

    pub fn merge(self, other: LogAggregator) -> LogAggregator {
        LogAggregator {
            groups: self.groups.merge(other.groups),
            lines_parsed: self.lines_parsed + other.lines_parsed,
            lines_skipped: self.lines_skipped + other.lines_skipped,
        }
    }

    pub fn groups(&self) -> &ClientGroups {
        &self.groups
    }

    pub fn into_groups(self) -> ClientGroups {
        self.groups
    }

    pub fn lines_parsed(&self) -> u64 {
        self.lines_parsed
    }

    pub fn lines_skipped(&self) -> u64 {
        self.lines_skipped
    }
}
