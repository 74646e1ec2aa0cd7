use std::collections::BTreeMap;
use std::fmt;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{take_till, take_till1},
    character::complete::char,
    combinator::recognize,
    multi::many1,
    sequence::delimited,
};
use crate::core::error::{Error, Result};

/// A whitespace-delimited word. Quoted sections may contain whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word<'a> {
    pub text: &'a str,
    pub offset: usize,  // byte offset into the scanned input
}

fn quoted(input: &str) -> IResult<&str, &str> {
    recognize(delimited(char('"'), take_till(|c: char| c == '"'), char('"'))).parse(input)
}

fn bare(input: &str) -> IResult<&str, &str> {
    take_till1(|c: char| c.is_whitespace() || c == '"').parse(input)
}

fn word(input: &str) -> IResult<&str, &str> {
    recognize(many1(alt((quoted, bare)))).parse(input)
}

/// Split `input` into words, keeping quoted runs together.
pub fn words(input: &str) -> Result<Vec<Word<'_>>> {
    let mut words = Vec::new();
    let mut rest = input.trim_start();

    while !rest.is_empty() {
        let offset = input.len() - rest.len();
        match word(rest) {
            Ok((remaining, text)) => {
                words.push(Word { text, offset });
                rest = remaining.trim_start();
            }
            Err(_) => {
                return Err(Error::parse(format!(
                    "Unterminated quote starting at: {}",
                    rest
                )));
            }
        }
    }

    Ok(words)
}

/// Strip one pair of double quotes when they wrap the whole value.
pub fn unquote(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        let inner = &value[1..value.len() - 1];
        if !inner.contains('"') {
            return inner;
        }
    }
    value
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Id,
    Name,
    Programme,
    Mark,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Id, Field::Name, Field::Programme, Field::Mark];

    pub fn key(&self) -> &'static str {
        match self {
            Field::Id => "ID",
            Field::Name => "Name",
            Field::Programme => "Programme",
            Field::Mark => "Mark",
        }
    }

    fn from_key(text: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.key().eq_ignore_ascii_case(text))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Raw values found by [`scan_key_values`], trimmed and unquoted
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyValues {
    values: BTreeMap<Field, String>,
}

impl KeyValues {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.values.contains_key(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.values.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Where a key token starts and where its value begins
struct KeyToken {
    field: Field,
    start: usize,
    value_start: usize,
}

/// Classify the word at `i`. `Name=..` is a key; so is a bare `Name`
/// followed by a word starting with `=`.
fn key_token(words: &[Word], i: usize) -> Result<Option<KeyToken>> {
    let word = words[i];
    if word.text.starts_with('"') {
        return Ok(None);
    }

    match word.text.find('=') {
        Some(eq) => {
            let name = &word.text[..eq];
            if let Some(field) = Field::from_key(name) {
                return Ok(Some(KeyToken {
                    field,
                    start: word.offset,
                    value_start: word.offset + eq + 1,
                }));
            }
            if !name.is_empty() && name.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(Error::parse(format!(
                    "Unknown key '{}'. Expected ID, Name, Programme or Mark.",
                    name
                )));
            }
            Ok(None)
        }
        None => {
            let Some(field) = Field::from_key(word.text) else {
                return Ok(None);
            };
            match words.get(i + 1) {
                Some(next) if next.text.starts_with('=') => Ok(Some(KeyToken {
                    field,
                    start: word.offset,
                    value_start: next.offset + 1,
                })),
                _ => Err(Error::parse(format!(
                    "Malformed key-value pair: missing '=' after key {} \
                     (quote values that contain spaces).",
                    field
                ))),
            }
        }
    }
}

/// Scan `ID=`, `Name=`, `Programme=` and `Mark=` pairs out of `input`.
///
/// A value runs from its `=` to the next key or the end of input. Keys are
/// matched case-insensitively at word starts outside quotes, so
/// `Name="Mark Lee"` keeps its value intact.
pub fn scan_key_values(input: &str) -> Result<KeyValues> {
    let words = words(input)?;
    let mut keys: Vec<KeyToken> = Vec::new();

    for i in 0..words.len() {
        if let Some(last) = keys.last() {
            // the `=` word of a spaced-out key belongs to it
            if words[i].offset < last.value_start {
                continue;
            }
        }
        match key_token(&words, i)? {
            Some(token) => keys.push(token),
            None if keys.is_empty() => {
                return Err(Error::parse(format!(
                    "Unexpected '{}' before the first key. Use ID=, Name=, Programme= or Mark=.",
                    words[i].text
                )));
            }
            None => {}
        }
    }

    let mut values = BTreeMap::new();
    for (i, token) in keys.iter().enumerate() {
        let end = keys.get(i + 1).map_or(input.len(), |next| next.start);
        let raw = input[token.value_start..end].trim();
        let value = unquote(raw).to_string();
        if values.insert(token.field, value).is_some() {
            return Err(Error::parse(format!("Duplicate key {}.", token.field)));
        }
    }

    Ok(KeyValues { values })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;

    #[test]
    fn words_keep_quoted_runs_together() {
        let ws = words(r#"Name CONTAINS "Jane Doe""#).unwrap();
        let texts: Vec<&str> = ws.iter().map(|w| w.text).collect();
        assert_eq!(texts, vec!["Name", "CONTAINS", "\"Jane Doe\""]);
        assert_eq!(ws[2].offset, 14);
    }

    #[test]
    fn unterminated_quote_is_a_parse_error() {
        let err = words(r#"Name="Jane Doe"#).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Parse);
    }

    #[test]
    fn scans_all_four_keys() {
        let kv = scan_key_values(r#"ID=100001 Name="Jane Doe" Programme=CS Mark=85.5"#).unwrap();
        assert_eq!(kv.get(Field::Id), Some("100001"));
        assert_eq!(kv.get(Field::Name), Some("Jane Doe"));
        assert_eq!(kv.get(Field::Programme), Some("CS"));
        assert_eq!(kv.get(Field::Mark), Some("85.5"));
    }

    #[test]
    fn keys_are_case_insensitive_and_unquoted_values_may_span_words() {
        let kv = scan_key_values("id=100001 NAME=Jane Doe programme=Computer Science").unwrap();
        assert_eq!(kv.get(Field::Name), Some("Jane Doe"));
        assert_eq!(kv.get(Field::Programme), Some("Computer Science"));
    }

    #[test]
    fn key_text_inside_quotes_is_not_a_key() {
        let kv = scan_key_values(r#"ID=100001 Name="Mark Lee""#).unwrap();
        assert_eq!(kv.get(Field::Name), Some("Mark Lee"));
        assert!(!kv.contains(Field::Mark));
    }

    #[test]
    fn spaced_equals_is_accepted() {
        let kv = scan_key_values("ID = 100001 Mark =70").unwrap();
        assert_eq!(kv.get(Field::Id), Some("100001"));
        assert_eq!(kv.get(Field::Mark), Some("70"));
    }

    #[test]
    fn strict_policy_rejects_typos() {
        assert!(scan_key_values("ID=100001 Nmae=Jane").is_err());
        assert!(scan_key_values("junk ID=100001").is_err());
        assert!(scan_key_values("ID=100001 Name Jane").is_err());
        assert!(scan_key_values("ID=100001 ID=100002").is_err());
    }

    #[test]
    fn empty_input_has_no_pairs() {
        assert!(scan_key_values("   ").unwrap().is_empty());
    }
}
