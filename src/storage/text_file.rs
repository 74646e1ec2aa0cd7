use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use chrono::Local;
use tempfile::NamedTempFile;
use tracing::{debug, info};
use crate::core::error::Result;
use crate::core::store::Store;
use crate::core::types::{Student, StudentId};

pub const HEADER: &str = "ID\tName\tProgramme\tMark";

/// Outcome of reading a database file
#[derive(Debug)]
pub struct LoadReport {
    pub store: Store,
    pub loaded: usize,
    pub skipped: usize,   // data lines that failed to parse or insert
}

/// Read a tab-separated database file into a fresh store
pub fn load(path: &Path) -> Result<LoadReport> {
    let file = File::open(path)?;
    let report = read_records(BufReader::new(file))?;
    info!(
        path = %path.display(),
        loaded = report.loaded,
        skipped = report.skipped,
        "database loaded"
    );
    Ok(report)
}

/// Parse `ID<TAB>Name<TAB>Programme<TAB>Mark` lines.
///
/// Blank and `#` lines are ignored anywhere. Lines before the header or the
/// first data line are treated as a banner and ignored too; after that, any
/// line that does not yield a valid, unique record is counted as skipped.
/// A line that is not UTF-8 is handled like any other malformed line.
pub fn read_records<R: BufRead>(reader: R) -> Result<LoadReport> {
    let mut store = Store::new();
    let mut skipped = 0;
    let mut in_data = false;

    for bytes in reader.split(b'\n') {
        let line = match String::from_utf8(bytes?) {
            Ok(line) => line,
            Err(e) => {
                if in_data {
                    debug!(error = %e, "skipping line that is not UTF-8");
                    skipped += 1;
                }
                continue;
            }
        };
        let line = line.trim_end_matches('\r');
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if is_header(trimmed) {
            in_data = true;
            continue;
        }

        match parse_line(line) {
            Some(student) => {
                in_data = true;
                if let Err(e) = store.insert(student) {
                    debug!(error = %e, "skipping record");
                    skipped += 1;
                }
            }
            None if in_data => {
                debug!(line, "skipping malformed line");
                skipped += 1;
            }
            None => {}
        }
    }

    Ok(LoadReport {
        loaded: store.len(),
        store,
        skipped,
    })
}

fn is_header(line: &str) -> bool {
    let columns: Vec<&str> = line.split_whitespace().collect();
    columns.len() == 4
        && columns
            .iter()
            .zip(["id", "name", "programme", "mark"])
            .all(|(col, want)| col.eq_ignore_ascii_case(want))
}

fn parse_line(line: &str) -> Option<Student> {
    let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
    let [id, name, programme, mark] = fields.as_slice() else {
        return None;
    };

    if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let id = id.parse::<u32>().ok()?;
    let mark = mark.parse::<f32>().ok()?;

    Some(Student {
        id: StudentId(id),
        name: name.to_string(),
        programme: programme.to_string(),
        mark,
    })
}

/// Write one data line per record, in current store order, after a comment
/// and a header line.
pub fn write_records<W: Write>(mut writer: W, store: &Store) -> Result<()> {
    writeln!(writer, "# coursedb export {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(writer, "{}", HEADER)?;
    for s in store.iter() {
        writeln!(writer, "{}\t{}\t{}\t{:.2}", s.id, s.name, s.programme, s.mark)?;
    }
    writer.flush()?;
    Ok(())
}

/// Save atomically: write a temp file next to `path`, then rename it over.
pub fn save(path: &Path, store: &Store) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    write_records(BufWriter::new(tmp.as_file_mut()), store)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;

    info!(path = %path.display(), records = store.len(), "database saved");
    Ok(())
}
