use regex::{Regex, RegexBuilder};

use crate::model::Record;

/// Error from parsing a rule predicate
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PredicateError {
    #[error("expected '~' at offset {offset}, found '{found}'")]
    ExpectedTilde { offset: usize, found: char },
    #[error("'~' at end of predicate")]
    MissingClause,
    #[error("unknown clause '~{0}'")]
    UnknownClause(char),
    #[error("clause '~{0}' needs a quoted pattern")]
    MissingPattern(char),
    #[error("unterminated pattern in clause '~{0}'")]
    UnterminatedPattern(char),
    #[error("invalid pattern in clause '~{clause}': {message}")]
    InvalidPattern { clause: char, message: String },
}

#[derive(Debug, Clone)]
enum Test {
    Selected,
    Started,
    Tags(Regex),
    Project(Regex),
    Description(Regex),
    Priority(Regex),
}

#[derive(Debug, Clone)]
struct Clause {
    test: Test,
    negate: bool,
}

impl Clause {
    fn matches(&self, record: &Record, selected: bool) -> bool {
        let hit = match &self.test {
            Test::Selected => selected,
            Test::Started => record.is_started(),
            Test::Tags(re) => re.is_match(&record.tags_text()),
            Test::Project(re) => re.is_match(record.project.as_deref().unwrap_or("")),
            Test::Description(re) => re.is_match(&record.description),
            Test::Priority(re) => {
                let p = record.priority.map(|p| p.as_char().to_string());
                re.is_match(p.as_deref().unwrap_or(""))
            }
        };
        hit != self.negate
    }
}

/// A compiled rule predicate: a conjunction of `~x` / `~x 'pattern'`
/// clauses. An uppercase clause letter negates the clause.
///
/// | clause      | true when                              |
/// |-------------|----------------------------------------|
/// | `~s`        | the line is selected                   |
/// | `~t`        | the task is started                    |
/// | `~t 'rx'`   | the tags match `rx`                    |
/// | `~p 'rx'`   | the project matches `rx`               |
/// | `~d 'rx'`   | the description matches `rx`           |
/// | `~r 'rx'`   | the priority letter matches `rx`       |
///
/// Patterns are case-insensitive and unanchored. A quote cannot appear
/// inside a pattern.
#[derive(Debug, Clone)]
pub struct Predicate {
    clauses: Vec<Clause>,
}

impl Predicate {
    pub fn parse(source: &str) -> Result<Predicate, PredicateError> {
        let mut clauses = Vec::new();
        let mut chars = source.char_indices().peekable();

        loop {
            while chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
            let Some((offset, c)) = chars.next() else { break };
            if c != '~' {
                return Err(PredicateError::ExpectedTilde { offset, found: c });
            }
            let (_, letter) = chars.next().ok_or(PredicateError::MissingClause)?;
            let negate = letter.is_uppercase();
            let clause = letter.to_ascii_lowercase();

            if clause == 's' {
                clauses.push(Clause {
                    test: Test::Selected,
                    negate,
                });
                continue;
            }

            // Optional quoted pattern after the letter
            let mut lookahead = chars.clone();
            while lookahead.next_if(|(_, c)| c.is_whitespace()).is_some() {}
            let pattern = if lookahead.peek().is_some_and(|&(_, c)| c == '\'') {
                lookahead.next();
                let mut text = String::new();
                loop {
                    match lookahead.next() {
                        Some((_, '\'')) => break,
                        Some((_, c)) => text.push(c),
                        None => return Err(PredicateError::UnterminatedPattern(letter)),
                    }
                }
                chars = lookahead;
                Some(build_regex(&text, letter)?)
            } else {
                None
            };

            let test = match (clause, pattern) {
                ('t', None) => Test::Started,
                ('t', Some(re)) => Test::Tags(re),
                ('p', Some(re)) => Test::Project(re),
                ('d', Some(re)) => Test::Description(re),
                ('r', Some(re)) => Test::Priority(re),
                ('p' | 'd' | 'r', None) => return Err(PredicateError::MissingPattern(letter)),
                _ => return Err(PredicateError::UnknownClause(letter)),
            };
            clauses.push(Clause { test, negate });
        }

        Ok(Predicate { clauses })
    }

    /// Every clause must hold; stops at the first one that does not
    pub fn matches(&self, record: &Record, selected: bool) -> bool {
        self.clauses.iter().all(|c| c.matches(record, selected))
    }
}

fn build_regex(pattern: &str, clause: char) -> Result<Regex, PredicateError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| PredicateError::InvalidPattern {
            clause,
            message: e.to_string(),
        })
}
