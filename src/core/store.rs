use tracing::debug;
use crate::core::error::{Error, Result};
use crate::core::types::{Patch, Student, StudentId};
use crate::core::validation::round_mark;

const START_CAPACITY: usize = 16;

/// Ordered, growable collection of student records keyed by unique ID.
///
/// Order is insertion order until [`Store::sort`] is applied; after that it is
/// whatever the last sort produced. Later mutations do not re-sort.
#[derive(Debug, Clone, Default)]
pub struct Store {
    records: Vec<Student>,
}

impl Store {
    pub fn new() -> Self {
        Store {
            records: Vec::with_capacity(START_CAPACITY),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Student] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &Student> {
        self.records.iter()
    }

    /// Linear scan, first match
    pub fn find_index(&self, id: StudentId) -> Option<usize> {
        self.records.iter().position(|s| s.id == id)
    }

    pub fn get(&self, id: StudentId) -> Option<&Student> {
        self.find_index(id).map(|idx| &self.records[idx])
    }

    pub fn contains(&self, id: StudentId) -> bool {
        self.find_index(id).is_some()
    }

    /// Validate and append. The mark is rounded to two decimals once it has
    /// passed the range check.
    pub fn insert(&mut self, mut student: Student) -> Result<()> {
        student.validate()?;
        student.mark = round_mark(student.mark);

        if self.contains(student.id) {
            return Err(Error::duplicate(format!("Duplicate ID {}.", student.id)));
        }

        debug!(id = %student.id, "inserting record");
        self.records.push(student);
        Ok(())
    }

    /// Apply a patch to the record with `id`.
    ///
    /// Every present field is validated (including a re-key collision check)
    /// before anything is written, so a failed update leaves the record untouched.
    pub fn update(&mut self, id: StudentId, patch: &Patch) -> Result<()> {
        let idx = self
            .find_index(id)
            .ok_or_else(|| Error::not_found(format!("ID {} not found.", id)))?;

        patch.validate()?;

        if let Some(new_id) = patch.id {
            if new_id != id && self.contains(new_id) {
                return Err(Error::duplicate(format!(
                    "Cannot change ID {} to {}: ID already exists.",
                    id, new_id
                )));
            }
        }

        let current = &mut self.records[idx];
        if let Some(new_id) = patch.id {
            current.id = new_id;
        }
        if let Some(name) = &patch.name {
            current.name = name.clone();
        }
        if let Some(programme) = &patch.programme {
            current.programme = programme.clone();
        }
        if let Some(mark) = patch.mark {
            current.mark = round_mark(mark);
        }

        debug!(%id, new_id = %current.id, "updated record");
        Ok(())
    }

    /// Remove a record, shifting later records down so relative order is kept.
    pub fn delete(&mut self, id: StudentId) -> Result<Student> {
        let idx = self
            .find_index(id)
            .ok_or_else(|| Error::not_found(format!("ID {} not found.", id)))?;

        debug!(%id, "deleting record");
        Ok(self.records.remove(idx))
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub(crate) fn records_mut(&mut self) -> &mut Vec<Student> {
        &mut self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;

    fn sample() -> Store {
        let mut store = Store::new();
        store.insert(Student::new(100001, "Alice", "CS", 70.0)).unwrap();
        store.insert(Student::new(100002, "Bob", "IT", 55.5)).unwrap();
        store.insert(Student::new(100003, "Cara", "EE", 91.0)).unwrap();
        store
    }

    #[test]
    fn insert_then_find_returns_same_record() {
        let store = sample();
        let idx = store.find_index(StudentId(100002)).unwrap();
        assert_eq!(store.records()[idx], Student::new(100002, "Bob", "IT", 55.5));
    }

    #[test]
    fn duplicate_insert_leaves_size_unchanged() {
        let mut store = sample();
        let err = store.insert(Student::new(100001, "Other", "CS", 10.0)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::DuplicateKey);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn failed_update_does_not_partially_apply() {
        let mut store = sample();
        let patch = Patch::new().with_name("Alicia").with_mark(150.0);
        let err = store.update(StudentId(100001), &patch).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(store.get(StudentId(100001)).unwrap().name, "Alice");
    }

    #[test]
    fn rekey_to_existing_id_is_rejected() {
        let mut store = sample();
        let patch = Patch::new().with_id(100003).with_name("Alicia");
        let err = store.update(StudentId(100001), &patch).unwrap_err();
        assert_eq!(err.kind, ErrorKind::DuplicateKey);
        assert_eq!(store.get(StudentId(100001)).unwrap().name, "Alice");
    }

    #[test]
    fn rekey_to_same_id_is_allowed() {
        let mut store = sample();
        let patch = Patch::new().with_id(100001).with_mark(72.0);
        store.update(StudentId(100001), &patch).unwrap();
        assert_eq!(store.get(StudentId(100001)).unwrap().mark, 72.0);
    }

    #[test]
    fn stored_marks_have_two_decimals() {
        let mut store = sample();
        store.insert(Student::new(100004, "Dan", "CS", 12.345)).unwrap();
        assert_eq!(store.get(StudentId(100004)).unwrap().mark, 12.35);

        store.update(StudentId(100001), &Patch::new().with_mark(66.666)).unwrap();
        assert_eq!(store.get(StudentId(100001)).unwrap().mark, 66.67);
    }

    #[test]
    fn delete_preserves_relative_order() {
        let mut store = sample();
        store.delete(StudentId(100001)).unwrap();
        let ids: Vec<u32> = store.iter().map(|s| s.id.value()).collect();
        assert_eq!(ids, vec![100002, 100003]);
    }
}
