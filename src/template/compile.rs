use super::vars::{VarKind, VariableTable};

/// Largest declared field width; wider declarations are cut down to it
pub const MAX_FIELD_WIDTH: usize = 1024;

/// Record attributes a template can reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attr {
    Project,
    Description,
    Due,
    Priority,
    Uuid,
    Index,
    Tags,
    Start,
    Entry,
}

impl Attr {
    /// Match order used by the compiler
    pub const ALL: [Attr; 9] = [
        Attr::Project,
        Attr::Description,
        Attr::Due,
        Attr::Priority,
        Attr::Uuid,
        Attr::Index,
        Attr::Tags,
        Attr::Start,
        Attr::Entry,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            Attr::Project => "project",
            Attr::Description => "description",
            Attr::Due => "due",
            Attr::Priority => "priority",
            Attr::Uuid => "uuid",
            Attr::Index => "index",
            Attr::Tags => "tags",
            Attr::Start => "start",
            Attr::Entry => "entry",
        }
    }
}

/// What a template field renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Literal(String),
    Attribute(Attr),
    DateNow,
    TimeNow,
    Variable {
        name: String,
        kind: VarKind,
    },
    Conditional {
        cond: Template,
        positive: Template,
        negative: Template,
    },
    /// `$>`: right-justify whatever follows against the line width
    Fill,
}

/// One compiled field with its layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub kind: FieldKind,
    /// Target width, 0 = natural width
    pub width: usize,
    pub right_align: bool,
}

impl Field {
    fn plain(kind: FieldKind) -> Self {
        Field {
            kind,
            width: 0,
            right_align: false,
        }
    }
}

/// A compiled format string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    fields: Vec<Field>,
}

impl Template {
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Compile a format string.
///
/// Never fails: anything that does not parse is kept as literal text.
/// `$[-][width]name` references a date, time, record attribute or variable
/// from `vars`; `?cond?pos?neg?` picks `pos` or `neg` depending on how
/// `cond` renders. None of the three conditional segments may contain `?`.
pub fn compile(source: &str, vars: &VariableTable) -> Template {
    let mut fields = Vec::new();
    let mut literal = String::new();
    let mut pos = 0;

    while pos < source.len() {
        let rest = &source[pos..];
        let Some(c) = rest.chars().next() else { break };

        match c {
            '?' => {
                match parse_conditional(rest, vars) {
                    Some((field, consumed)) => {
                        flush_literal(&mut literal, &mut fields);
                        fields.push(field);
                        pos += consumed;
                    }
                    None => {
                        literal.push('?');
                        pos += 1;
                    }
                }
            }
            '$' => {
                match parse_variable(rest, vars) {
                    Some((field, consumed)) => {
                        flush_literal(&mut literal, &mut fields);
                        fields.push(field);
                        pos += consumed;
                    }
                    None => {
                        // `$` plus the next character stay as they are
                        literal.push('$');
                        pos += 1;
                        if let Some(next) = source[pos..].chars().next() {
                            literal.push(next);
                            pos += next.len_utf8();
                        }
                    }
                }
            }
            _ => {
                literal.push(c);
                pos += c.len_utf8();
            }
        }
    }
    flush_literal(&mut literal, &mut fields);

    Template { fields }
}

fn flush_literal(literal: &mut String, fields: &mut Vec<Field>) {
    if !literal.is_empty() {
        fields.push(Field::plain(FieldKind::Literal(std::mem::take(literal))));
    }
}

/// Parse `?cond?pos?neg?` at the start of `rest`. Returns the field and the
/// number of bytes consumed.
fn parse_conditional(rest: &str, vars: &VariableTable) -> Option<(Field, usize)> {
    let body = &rest[1..];
    let mut segments = body.splitn(4, '?');
    let cond = segments.next()?;
    let positive = segments.next()?;
    let negative = segments.next()?;
    // The closing `?` must exist
    segments.next()?;

    let consumed = 1 + cond.len() + 1 + positive.len() + 1 + negative.len() + 1;
    let field = Field::plain(FieldKind::Conditional {
        cond: compile(cond, vars),
        positive: compile(positive, vars),
        negative: compile(negative, vars),
    });
    Some((field, consumed))
}

/// Parse `$[-][digits]keyword` at the start of `rest`
fn parse_variable(rest: &str, vars: &VariableTable) -> Option<(Field, usize)> {
    let mut pos = 1;

    if rest[pos..].starts_with('>') {
        return Some((Field::plain(FieldKind::Fill), pos + 1));
    }

    let right_align = rest[pos..].starts_with('-');
    if right_align {
        pos += 1;
    }

    let digits = rest[pos..]
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    let width = rest[pos..pos + digits]
        .bytes()
        .fold(0usize, |acc, b| {
            acc.saturating_mul(10).saturating_add(usize::from(b - b'0'))
        })
        .min(MAX_FIELD_WIDTH);
    pos += digits;

    let name = &rest[pos..];
    let (kind, len) = match_keyword(name, vars)?;
    Some((
        Field {
            kind,
            width,
            right_align,
        },
        pos + len,
    ))
}

fn match_keyword(name: &str, vars: &VariableTable) -> Option<(FieldKind, usize)> {
    if name.starts_with("date") {
        return Some((FieldKind::DateNow, 4));
    }
    if name.starts_with("time") {
        return Some((FieldKind::TimeNow, 4));
    }
    for attr in Attr::ALL {
        let kw = attr.keyword();
        if name.starts_with(kw) {
            return Some((FieldKind::Attribute(attr), kw.len()));
        }
    }
    for (var, kind) in vars.names() {
        if name.starts_with(var) {
            let field = FieldKind::Variable {
                name: var.to_string(),
                kind,
            };
            return Some((field, var.len()));
        }
    }
    None
}
