use serde::{Serialize, Deserialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StudentId(pub u32);

impl StudentId {
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl From<u32> for StudentId {
    fn from(id: u32) -> Self {
        StudentId(id)
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One student record as held by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,       // 1..=63 bytes
    pub programme: String,  // 1..=63 bytes
    pub mark: f32,          // 0.0..=100.0
}

impl Student {
    pub fn new(id: impl Into<StudentId>, name: &str, programme: &str, mark: f32) -> Self {
        Student {
            id: id.into(),
            name: name.to_string(),
            programme: programme.to_string(),
            mark,
        }
    }
}

/// Partial record describing a change. `None` means "leave as is".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch {
    pub id: Option<StudentId>,
    pub name: Option<String>,
    pub programme: Option<String>,
    pub mark: Option<f32>,
}

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<StudentId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_programme(mut self, programme: &str) -> Self {
        self.programme = Some(programme.to_string());
        self
    }

    pub fn with_mark(mut self, mark: f32) -> Self {
        self.mark = Some(mark);
        self
    }

    /// True when no field other than the ID is set
    pub fn has_no_changes(&self) -> bool {
        self.name.is_none() && self.programme.is_none() && self.mark.is_none()
    }

    /// Turn a fully populated patch into a record. Returns the name of the
    /// first missing field otherwise.
    pub fn into_student(self) -> std::result::Result<Student, &'static str> {
        Ok(Student {
            id: self.id.ok_or("ID")?,
            name: self.name.ok_or("Name")?,
            programme: self.programme.ok_or("Programme")?,
            mark: self.mark.ok_or("Mark")?,
        })
    }
}
