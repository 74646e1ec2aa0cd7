use crate::core::error::{Error, Result};
use crate::core::types::{Patch, Student, StudentId};

pub const MIN_ID: u32 = 100_000;
pub const MAX_ID: u32 = 99_999_999;
pub const MAX_TEXT_BYTES: usize = 63;

/// 6 to 8 decimal digits
pub fn valid_id(id: StudentId) -> bool {
    (MIN_ID..=MAX_ID).contains(&id.0)
}

pub fn valid_mark(mark: f32) -> bool {
    (0.0..=100.0).contains(&mark)
}

/// Non-empty, at most 63 bytes, no control characters and no padding at
/// either end. Such text survives the tab-separated file unchanged.
pub fn valid_text(text: &str) -> bool {
    !text.is_empty()
        && text.len() <= MAX_TEXT_BYTES
        && text.trim() == text
        && !text.chars().any(char::is_control)
}

/// Marks are kept to two decimals, the precision the database file holds
pub fn round_mark(mark: f32) -> f32 {
    ((f64::from(mark) * 100.0).round() / 100.0) as f32
}

pub fn check_id(id: StudentId) -> Result<()> {
    if valid_id(id) {
        Ok(())
    } else {
        Err(Error::validation(format!("Invalid ID {}. Must be 6-8 digits.", id)))
    }
}

pub fn check_mark(mark: f32) -> Result<()> {
    if valid_mark(mark) {
        Ok(())
    } else {
        Err(Error::validation(format!("Invalid Mark {}. Must be between 0.0 and 100.0.", mark)))
    }
}

pub fn check_text(field: &str, text: &str) -> Result<()> {
    if valid_text(text) {
        Ok(())
    } else if text.trim().is_empty() {
        Err(Error::validation(format!("{} must not be empty.", field)))
    } else if text.len() > MAX_TEXT_BYTES {
        Err(Error::validation(format!(
            "{} is too long ({} bytes, max {}).",
            field,
            text.len(),
            MAX_TEXT_BYTES
        )))
    } else if text.chars().any(char::is_control) {
        Err(Error::validation(format!(
            "{} must not contain tabs, line breaks or other control characters.",
            field
        )))
    } else {
        Err(Error::validation(format!(
            "{} must not start or end with whitespace.",
            field
        )))
    }
}

impl Student {
    pub fn validate(&self) -> Result<()> {
        check_id(self.id)?;
        check_text("Name", &self.name)?;
        check_text("Programme", &self.programme)?;
        check_mark(self.mark)
    }
}

impl Patch {
    /// Check every field that is present
    pub fn validate(&self) -> Result<()> {
        if let Some(id) = self.id {
            check_id(id)?;
        }
        if let Some(name) = &self.name {
            check_text("Name", name)?;
        }
        if let Some(programme) = &self.programme {
            check_text("Programme", programme)?;
        }
        if let Some(mark) = self.mark {
            check_mark(mark)?;
        }
        Ok(())
    }
}
