use std::cmp::Ordering;
use std::fmt;
use crate::core::store::Store;
use crate::core::types::Student;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Id,
    Mark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SortKey::Id => write!(f, "ID"),
            SortKey::Mark => write!(f, "MARK"),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SortOrder::Ascending => write!(f, "ASC"),
            SortOrder::Descending => write!(f, "DESC"),
        }
    }
}

fn compare(key: SortKey, a: &Student, b: &Student) -> Ordering {
    match key {
        SortKey::Id => a.id.cmp(&b.id),
        SortKey::Mark => a.mark.total_cmp(&b.mark),
    }
}

/// Stable ascending sort by `key`; descending is the reversed ascending order.
pub fn sort_records(records: &mut [Student], key: SortKey, order: SortOrder) {
    if records.len() <= 1 {
        return;
    }

    records.sort_by(|a, b| compare(key, a, b));

    if order == SortOrder::Descending {
        records.reverse();
    }
}

impl Store {
    pub fn sort(&mut self, key: SortKey, order: SortOrder) {
        sort_records(self.records_mut(), key, order);
    }
}
