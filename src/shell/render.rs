use std::io::{self, Write};
use unicode_segmentation::UnicodeSegmentation;
use crate::core::stats::Stats;
use crate::core::types::Student;

const COLUMN_GAP: &str = "  ";

/// `ID<TAB>Name<TAB>Programme<TAB>Mark` with two-decimal mark
pub fn record_line(s: &Student) -> String {
    format!("{}\t{}\t{}\t{:.2}", s.id, s.name, s.programme, s.mark)
}

fn display_width(text: &str) -> usize {
    text.graphemes(true).count()
}

fn pad_right(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(text));
    format!("{}{}", text, " ".repeat(fill))
}

fn pad_left(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(text));
    format!("{}{}", " ".repeat(fill), text)
}

/// Table with columns sized to their widest cell
pub fn write_table<W: Write>(out: &mut W, records: &[Student]) -> io::Result<()> {
    if records.is_empty() {
        return writeln!(out, "No records.");
    }

    let rows: Vec<[String; 4]> = records
        .iter()
        .map(|s| [s.id.to_string(), s.name.clone(), s.programme.clone(), format!("{:.2}", s.mark)])
        .collect();

    let mut widths = ["ID", "Name", "Programme", "Mark"].map(display_width);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(display_width(cell));
        }
    }

    writeln!(
        out,
        "{}",
        [
            pad_right("ID", widths[0]),
            pad_right("Name", widths[1]),
            pad_right("Programme", widths[2]),
            pad_left("Mark", widths[3]),
        ]
        .join(COLUMN_GAP)
    )?;

    for row in &rows {
        writeln!(
            out,
            "{}",
            [
                pad_left(&row[0], widths[0]),
                pad_right(&row[1], widths[1]),
                pad_right(&row[2], widths[2]),
                pad_left(&row[3], widths[3]),
            ]
            .join(COLUMN_GAP)
            .trim_end()
        )?;
    }

    let noun = if records.len() == 1 { "record" } else { "records" };
    writeln!(out, "{} {}.", records.len(), noun)
}

pub fn write_summary<W: Write>(out: &mut W, stats: &Stats, records: &[Student]) -> io::Result<()> {
    writeln!(out, "Total: {}", stats.count)?;
    if stats.is_empty() {
        return writeln!(out, "No records to summarize.");
    }

    let name_at = |idx: Option<usize>| {
        idx.and_then(|i| records.get(i))
            .map(|s| format!(" ({})", s.name))
            .unwrap_or_default()
    };

    writeln!(out, "Average: {:.2}", stats.average)?;
    writeln!(out, "Highest: {:.2}{}", stats.max_mark, name_at(stats.max_idx))?;
    writeln!(out, "Lowest: {:.2}{}", stats.min_mark, name_at(stats.min_idx))?;
    writeln!(
        out,
        "Grade bands - A:{} B:{} C:{} D:{} F:{}",
        stats.bands.a, stats.bands.b, stats.bands.c, stats.bands.d, stats.bands.f
    )
}

/// Header before the first match, one line per match, then a count
pub fn write_matches<W: Write>(out: &mut W, matches: &[&Student]) -> io::Result<()> {
    if matches.is_empty() {
        return writeln!(out, "No matching records found.");
    }

    writeln!(out, "ID\tName\tProgramme\tMark")?;
    for s in matches {
        writeln!(out, "{}", record_line(s))?;
    }
    writeln!(out, "Total matches: {}", matches.len())
}
