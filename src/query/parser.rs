use std::sync::LazyLock;
use regex::Regex;
use crate::core::error::{Error, Result};
use crate::core::sort::{SortKey, SortOrder};
use crate::core::types::{Patch, StudentId};
use crate::core::validation::check_id;
use crate::query::ast::{Command, FindFilter, MarkOp, ShowMode, SortClause, TextOp};
use crate::query::lexer::{Field, KeyValues, scan_key_values, unquote, words};

static SORT_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bsort\s+by\b\s*(\S+)?(?:\s+(\S+))?").expect("sort clause pattern is valid")
});

/// Turns one command line into a [`Command`]
#[derive(Debug, Clone, Default)]
pub struct CommandParser;

impl CommandParser {
    pub fn new() -> Self {
        CommandParser
    }

    /// Parse a command line. The verb is case-insensitive; examples:
    /// - "INSERT ID=100001 Name=\"Jane Doe\" Programme=CS Mark=85.5"
    /// - "UPDATE ID=100001 Mark=90"
    /// - "SHOW ALL SORT BY MARK DESC"
    /// - "FIND Name CONTAINS \"Wang\""
    pub fn parse(&self, line: &str) -> Result<Command> {
        let line = line.trim();
        let (verb, args) = match line.split_once(char::is_whitespace) {
            Some((verb, args)) => (verb, args.trim()),
            None => (line, ""),
        };

        match verb.to_ascii_lowercase().as_str() {
            "open" => no_args(args, "OPEN").map(|_| Command::Open),
            "save" => no_args(args, "SAVE").map(|_| Command::Save),
            "help" => no_args(args, "HELP").map(|_| Command::Help),
            "exit" | "quit" => Ok(Command::Exit),
            "show" => self.parse_show(args),
            "insert" => self.parse_insert(args),
            "update" => self.parse_update(args),
            "delete" => single_id(args, "DELETE").map(Command::Delete),
            "query" => single_id(args, "QUERY").map(Command::Query),
            "find" => self.parse_find(args),
            _ => Ok(Command::Unknown(verb.to_string())),
        }
    }

    fn parse_show(&self, args: &str) -> Result<Command> {
        let first = args.split_whitespace().next().unwrap_or("");
        if first.eq_ignore_ascii_case("summary") {
            return Ok(Command::Show(ShowMode::Summary));
        }

        let Some(caps) = SORT_CLAUSE.captures(args) else {
            return Ok(Command::Show(ShowMode::All(None)));
        };

        let key = match caps.get(1).map(|m| m.as_str().to_ascii_lowercase()) {
            Some(k) if k == "id" => SortKey::Id,
            Some(k) if k == "mark" => SortKey::Mark,
            Some(other) => {
                return Err(Error::parse(format!(
                    "Unsupported sort key: {}. Use SORT BY ID or SORT BY MARK.",
                    other
                )));
            }
            None => return Err(Error::parse("SORT BY requires ID or MARK.")),
        };

        let order = match caps.get(2).map(|m| m.as_str().to_ascii_lowercase()) {
            None => SortOrder::Ascending,
            Some(o) if o == "asc" => SortOrder::Ascending,
            Some(o) if o == "desc" => SortOrder::Descending,
            Some(other) => {
                return Err(Error::parse(format!(
                    "Unsupported sort direction: {}. Use ASC or DESC.",
                    other
                )));
            }
        };

        Ok(Command::Show(ShowMode::All(Some(SortClause { key, order }))))
    }

    fn parse_insert(&self, args: &str) -> Result<Command> {
        let pairs = scan_key_values(args)?;
        let patch = build_patch(&pairs)?;

        match patch.into_student() {
            Ok(student) => Ok(Command::Insert(student)),
            Err(missing) => Err(Error::parse(format!(
                "INSERT requires ID, Name, Programme, Mark. Missing: {}.",
                missing
            ))),
        }
    }

    fn parse_update(&self, args: &str) -> Result<Command> {
        let pairs = scan_key_values(args)?;
        let mut patch = build_patch(&pairs)?;

        // the ID selects the record; it is not a change
        let id = patch
            .id
            .take()
            .ok_or_else(|| Error::parse("UPDATE requires an existing ID to identify the record."))?;

        Ok(Command::Update { id, patch })
    }

    fn parse_find(&self, args: &str) -> Result<Command> {
        let tokens = words(args)?;
        if tokens.len() != 3 {
            return Err(Error::parse(
                "FIND requires 3 arguments. Syntax: FIND <Column> <Operator> <Value>\n\
                 Example: FIND Name CONTAINS \"Wang\"\n\
                 Example: FIND Mark > 75",
            ));
        }

        let column = tokens[0].text;
        let op = tokens[1].text;
        let value = unquote(tokens[2].text);

        let filter = match column.to_ascii_lowercase().as_str() {
            "name" => FindFilter::Name(text_op(op, "Name")?, value.to_string()),
            "programme" => FindFilter::Programme(text_op(op, "Programme")?, value.to_string()),
            "mark" => {
                let op = mark_op(op)?;
                let mark = value.parse::<f32>().map_err(|_| {
                    Error::parse(format!("Invalid mark value for FIND command: {}", value))
                })?;
                FindFilter::Mark(op, mark)
            }
            _ => {
                return Err(Error::parse(format!(
                    "Unsupported column for FIND command: {}. Use Name, Programme, Mark.",
                    column
                )));
            }
        };

        Ok(Command::Find(filter))
    }
}

fn no_args(args: &str, verb: &str) -> Result<()> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(Error::parse(format!("{} command does not take any arguments.", verb)))
    }
}

/// `DELETE ID=<value>` / `QUERY ID=<value>`
fn single_id(args: &str, verb: &str) -> Result<StudentId> {
    let usage = || Error::parse(format!("{} command requires ID argument in format ID=<value>.", verb));

    if args.is_empty() {
        return Err(usage());
    }
    let pairs = scan_key_values(args)?;
    if pairs.fields().any(|f| f != Field::Id) {
        return Err(Error::parse(format!("{} command only accepts ID=<value>.", verb)));
    }
    let raw = pairs.get(Field::Id).ok_or_else(usage)?;

    let id = parse_id(raw)?;
    check_id(id).map_err(|_| {
        Error::validation(format!("Invalid ID value for {} command. Must be 6-8 digits.", verb))
    })?;
    Ok(id)
}

fn parse_id(raw: &str) -> Result<StudentId> {
    if raw.is_empty() {
        return Err(Error::parse("No ID value provided."));
    }
    if !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::parse(format!("Invalid ID value: {}", raw)));
    }
    raw.parse::<u32>()
        .map(StudentId)
        .map_err(|_| Error::validation(format!("Invalid ID {}. Must be 6-8 digits.", raw)))
}

fn parse_mark(raw: &str) -> Result<f32> {
    if raw.is_empty() {
        return Err(Error::parse("No Mark value provided."));
    }
    raw.parse::<f32>()
        .map_err(|_| Error::parse(format!("Invalid Mark value: {}", raw)))
}

/// Convert raw key values into typed patch fields. Field legality is left to
/// the store so insert and update report it the same way.
fn build_patch(pairs: &KeyValues) -> Result<Patch> {
    let mut patch = Patch::new();
    if let Some(raw) = pairs.get(Field::Id) {
        patch.id = Some(parse_id(raw)?);
    }
    if let Some(raw) = pairs.get(Field::Name) {
        patch.name = Some(raw.to_string());
    }
    if let Some(raw) = pairs.get(Field::Programme) {
        patch.programme = Some(raw.to_string());
    }
    if let Some(raw) = pairs.get(Field::Mark) {
        patch.mark = Some(parse_mark(raw)?);
    }
    Ok(patch)
}

fn text_op(op: &str, column: &str) -> Result<TextOp> {
    match op.to_ascii_lowercase().as_str() {
        "=" => Ok(TextOp::Equals),
        "contains" => Ok(TextOp::Contains),
        _ => Err(Error::parse(format!(
            "Unsupported operator for {} column: {}",
            column, op
        ))),
    }
}

fn mark_op(op: &str) -> Result<MarkOp> {
    match op {
        "=" => Ok(MarkOp::Eq),
        ">" => Ok(MarkOp::Gt),
        "<" => Ok(MarkOp::Lt),
        ">=" => Ok(MarkOp::Ge),
        "<=" => Ok(MarkOp::Le),
        _ => Err(Error::parse(format!("Unsupported operator for Mark column: {}", op))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;
    use crate::core::types::Student;

    fn parse(line: &str) -> Result<Command> {
        CommandParser::new().parse(line)
    }

    #[test]
    fn insert_builds_full_record() {
        let cmd = parse(r#"insert ID=100001 Name="Jane Doe" Programme=CS Mark=85.5"#).unwrap();
        assert_eq!(cmd, Command::Insert(Student::new(100001, "Jane Doe", "CS", 85.5)));
    }

    #[test]
    fn insert_names_missing_field() {
        let err = parse("INSERT ID=100001 Name=Jane Mark=50").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Parse);
        assert!(err.context.contains("Programme"));
    }

    #[test]
    fn update_separates_target_id_from_changes() {
        let cmd = parse("UPDATE ID=100001 Mark=75.5").unwrap();
        assert_eq!(
            cmd,
            Command::Update { id: StudentId(100001), patch: Patch::new().with_mark(75.5) }
        );
    }

    #[test]
    fn update_without_id_is_rejected() {
        assert!(parse("UPDATE Mark=75.5").is_err());
    }

    #[test]
    fn delete_and_query_take_only_an_id() {
        assert_eq!(parse("DELETE ID=100001").unwrap(), Command::Delete(StudentId(100001)));
        assert_eq!(parse("query id=100001").unwrap(), Command::Query(StudentId(100001)));
        assert!(parse("DELETE").is_err());
        assert!(parse("DELETE ID=100001 extra").is_err());
        assert_eq!(parse("QUERY ID=99999").unwrap_err().kind, ErrorKind::Validation);
    }

    #[test]
    fn show_sort_clause() {
        assert_eq!(parse("SHOW").unwrap(), Command::Show(ShowMode::All(None)));
        assert_eq!(parse("show summary").unwrap(), Command::Show(ShowMode::Summary));
        assert_eq!(
            parse("SHOW ALL SORT BY MARK DESC").unwrap(),
            Command::Show(ShowMode::All(Some(SortClause {
                key: SortKey::Mark,
                order: SortOrder::Descending,
            })))
        );
        assert_eq!(
            parse("show all sort by id").unwrap(),
            Command::Show(ShowMode::All(Some(SortClause::default())))
        );
        assert!(parse("SHOW ALL SORT BY NAME").is_err());
    }

    #[test]
    fn find_requires_three_tokens() {
        assert_eq!(
            parse(r#"FIND Name CONTAINS "Jane Doe""#).unwrap(),
            Command::Find(FindFilter::Name(TextOp::Contains, "Jane Doe".into()))
        );
        assert_eq!(
            parse("find mark >= 85").unwrap(),
            Command::Find(FindFilter::Mark(MarkOp::Ge, 85.0))
        );
        assert!(parse("FIND Name CONTAINS Jane Doe").is_err());
        assert!(parse("FIND Mark CONTAINS 5").is_err());
        assert!(parse("FIND Age > 5").is_err());
    }

    #[test]
    fn argument_free_verbs_reject_arguments() {
        assert!(parse("SAVE now").is_err());
        assert_eq!(parse("open").unwrap(), Command::Open);
        assert_eq!(parse("QUIT").unwrap(), Command::Exit);
    }

    #[test]
    fn unknown_verb_is_not_an_error() {
        assert_eq!(parse("frobnicate x").unwrap(), Command::Unknown("frobnicate".into()));
    }
}
