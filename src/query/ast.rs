use crate::core::sort::{SortKey, SortOrder};
use crate::core::types::{Patch, Student, StudentId};

/// One parsed command line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Open,
    Save,
    Show(ShowMode),
    Insert(Student),
    Update { id: StudentId, patch: Patch },
    Delete(StudentId),
    Query(StudentId),
    Find(FindFilter),
    Help,
    Exit,
    Unknown(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShowMode {
    All(Option<SortClause>),   // listing, optionally re-sorted first
    Summary,                   // statistics snapshot
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortClause {
    pub key: SortKey,
    pub order: SortOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextOp {
    Equals,    // case-insensitive exact
    Contains,  // case-insensitive substring
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkOp {
    Eq,  // within MARK_TOLERANCE
    Gt,
    Lt,
    Ge,
    Le,
}

/// FIND <Column> <Operator> <Value>
#[derive(Debug, Clone, PartialEq)]
pub enum FindFilter {
    Name(TextOp, String),
    Programme(TextOp, String),
    Mark(MarkOp, f32),
}
