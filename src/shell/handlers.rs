use std::io::{BufRead, Write};
use tracing::info;
use crate::core::error::{Error, Result};
use crate::core::stats::compute_stats;
use crate::core::types::{Patch, Student, StudentId};
use crate::query::ast::{Command, FindFilter, ShowMode};
use crate::query::matcher::filter_records;
use crate::shell::{Flow, Session};
use crate::shell::help::write_help;
use crate::shell::render::{record_line, write_matches, write_summary, write_table};
use crate::storage::text_file;

impl Session {
    pub(crate) fn execute<R: BufRead, W: Write>(
        &mut self,
        command: Command,
        input: &mut R,
        out: &mut W,
    ) -> Result<Flow> {
        match command {
            Command::Open => self.handle_open(out)?,
            Command::Save => self.handle_save(out)?,
            Command::Show(mode) => self.handle_show(mode, out)?,
            Command::Insert(student) => self.handle_insert(student, out)?,
            Command::Update { id, patch } => self.handle_update(id, &patch, out)?,
            Command::Delete(id) => self.handle_delete(id, input, out)?,
            Command::Query(id) => self.handle_query(id, out)?,
            Command::Find(filter) => self.handle_find(&filter, out)?,
            Command::Help => write_help(out)?,
            Command::Exit => return self.handle_exit(out),
            Command::Unknown(verb) => writeln!(out, "Unknown command: {} (type HELP)", verb)?,
        }
        Ok(Flow::Continue)
    }

    /// Replace the store with the file contents. On failure the current
    /// store is kept.
    fn handle_open<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let path = self.config.storage_path.clone();
        let report = text_file::load(&path).map_err(|e| {
            Error::new(
                e.kind,
                format!("Failed to load database from {}: {}", path.display(), e),
            )
        })?;

        self.store = report.store;
        self.dirty = false;
        writeln!(
            out,
            "Database loaded. Total {} records, skipped {} line(s).",
            report.loaded, report.skipped
        )?;
        Ok(())
    }

    fn handle_save<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let path = &self.config.storage_path;
        text_file::save(path, &self.store).map_err(|e| {
            Error::new(
                e.kind,
                format!("Failed to save database to {}: {}", path.display(), e),
            )
        })?;

        self.dirty = false;
        writeln!(out, "Database saved to {}", path.display())?;
        Ok(())
    }

    fn handle_show<W: Write>(&mut self, mode: ShowMode, out: &mut W) -> Result<()> {
        match mode {
            ShowMode::Summary => {
                let stats = compute_stats(self.store.records());
                write_summary(out, &stats, self.store.records())?;
            }
            ShowMode::All(sort) => {
                if let Some(clause) = sort {
                    self.store.sort(clause.key, clause.order);
                }
                write_table(out, self.store.records())?;
            }
        }
        Ok(())
    }

    fn handle_insert<W: Write>(&mut self, student: Student, out: &mut W) -> Result<()> {
        let id = student.id;
        self.store.insert(student)?;
        self.dirty = true;
        info!(%id, "record inserted");
        writeln!(out, "Record successfully inserted.")?;
        Ok(())
    }

    fn handle_update<W: Write>(&mut self, id: StudentId, patch: &Patch, out: &mut W) -> Result<()> {
        if patch.has_no_changes() {
            writeln!(out, "Warning: UPDATE command given with only an ID. No fields to update.")?;
        }

        self.store.update(id, patch)?;
        if !patch.has_no_changes() {
            self.dirty = true;
            info!(%id, "record updated");
        }
        writeln!(out, "Record successfully updated.")?;
        Ok(())
    }

    fn handle_delete<R: BufRead, W: Write>(
        &mut self,
        id: StudentId,
        input: &mut R,
        out: &mut W,
    ) -> Result<()> {
        if !self.store.contains(id) {
            return Err(Error::not_found(format!("ID {} not found.", id)));
        }

        if self.config.confirm_delete && !confirm(id, input, out)? {
            writeln!(out, "Delete operation cancelled.")?;
            return Ok(());
        }

        self.store.delete(id)?;
        self.dirty = true;
        info!(%id, "record deleted");
        writeln!(out, "Record successfully deleted.")?;
        Ok(())
    }

    fn handle_query<W: Write>(&self, id: StudentId, out: &mut W) -> Result<()> {
        match self.store.get(id) {
            Some(student) => writeln!(out, "{}", record_line(student))?,
            None => writeln!(out, "Record does not exist.")?,
        }
        Ok(())
    }

    fn handle_find<W: Write>(&self, filter: &FindFilter, out: &mut W) -> Result<()> {
        let matches = filter_records(self.store.records(), filter);
        write_matches(out, &matches)?;
        Ok(())
    }

    fn handle_exit<W: Write>(&self, out: &mut W) -> Result<Flow> {
        if self.dirty {
            writeln!(out, "Warning: unsaved changes were discarded (use SAVE before EXIT to keep them).")?;
        }
        Ok(Flow::Exit)
    }
}

/// Ask for Y/N. EOF or an unreadable line counts as "no".
fn confirm<R: BufRead, W: Write>(id: StudentId, input: &mut R, out: &mut W) -> Result<bool> {
    write!(out, "Are you sure you want to delete ID {}? (Y/N): ", id)?;
    out.flush()?;

    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(0) | Err(_) => {
            writeln!(out)?;
            Ok(false)
        }
        Ok(_) => Ok(matches!(answer.trim_start().chars().next(), Some('Y' | 'y'))),
    }
}
