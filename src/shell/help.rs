use std::io::{self, Write};
use chrono::NaiveDate;
use crate::core::config::Config;

const RULE: &str = "============================================";

pub const HELP_TEXT: &str = "\
Available commands:
  OPEN                 - Load database from the configured file (unsaved changes will be lost).
  SAVE                 - Save current database to the configured file.
  SHOW [ALL] [SORT BY ID|MARK [ASC|DESC]]
                       - Display records. Optional sort clause (default: ID ASC).
  SHOW SUMMARY         - Display statistics: count, average, min/max (with names), grade bands.
  INSERT k=v ...       - Add a new student. Required keys: ID, Name, Programme, Mark.
                         Example: INSERT ID=2301234 Name=\"Jane Doe\" Programme=CS Mark=85.5
  UPDATE k=v ...       - Update an existing student. ID is required to identify the record.
                         Only provide keys you want to change (Name, Programme, Mark).
  DELETE ID=...        - Delete a student by ID (prompts for confirmation).
                         Example: DELETE ID=2301234
  QUERY ID=...         - Show a single record by ID.
                         Example: QUERY ID=2301234
  FIND <Column> <Op> <Value>
                       - Search records. Columns: Name, Programme, Mark.
                         Operators for Name/Programme: =, CONTAINS (case-insensitive).
                         Operators for Mark: =, >, <, >=, <=.
                         Value for strings may be quoted, e.g. FIND Name CONTAINS \"Wang\".
                         Example: FIND Mark > 75
  HELP                 - Show this help text.
  EXIT | QUIT          - Exit the program (use SAVE to persist changes).

Notes:
  - Keys are case-insensitive (ID, Name, Programme, Mark).
  - ID must be a 6-8 digit integer; Mark is a number from 0 to 100.
  - Name and Programme must be 1-63 bytes long, with no tabs or leading/trailing spaces.
  - For multi-word values enclose them in double quotes: Name=\"John Smith\".
  - Grade bands: A >= 85, B 75-84, C 65-74, D 50-64, F < 50.
  - Use OPEN to reload the DB file; this will discard unsaved in-memory changes.
  - Use SAVE to write current in-memory data to the DB file.

Examples:
  INSERT ID=2301235 Name=\"Alice Lee\" Programme=IT Mark=72.0
  UPDATE ID=2301235 Mark=75.5
  SHOW ALL SORT BY MARK DESC
  FIND Name CONTAINS \"Wang\"
  FIND Mark >= 85
";

pub fn write_help<W: Write>(out: &mut W) -> io::Result<()> {
    out.write_all(HELP_TEXT.as_bytes())
}

pub fn write_banner<W: Write>(out: &mut W, config: &Config, today: NaiveDate) -> io::Result<()> {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "Course Management System (CMS)")?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "Date: {}", today.format("%Y-%m-%d"))?;
    writeln!(out, "Database file: {}", config.storage_path.display())?;
    writeln!(out, "Type 'HELP' for available commands.")?;
    writeln!(out, "Type 'EXIT' or 'QUIT' to exit.")?;
    writeln!(out, "{}", RULE)?;
    writeln!(out)
}

pub fn write_goodbye<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Thank you for using CMS.")?;
    writeln!(out, "Goodbye.")
}
