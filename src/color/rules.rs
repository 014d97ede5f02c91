use ratatui::style::{Color, Style};

use crate::model::Record;

use super::palette::{AttrHandle, Palette, parse_color};
use super::predicate::Predicate;
use super::{ColorError, ObjectKind};

/// One registered color rule
#[derive(Debug, Clone)]
pub struct ColorRule {
    pub kind: ObjectKind,
    /// Predicate source as written by the user
    pub predicate: Option<String>,
    pub attr: AttrHandle,
    /// Parsed predicate; `None` here with `predicate` set means it was
    /// malformed and never matches
    matcher: Option<Predicate>,
}

impl ColorRule {
    fn matches(&self, record: &Record, selected: bool) -> bool {
        match (&self.predicate, &self.matcher) {
            (None, _) => true,
            (Some(_), Some(p)) => p.matches(record, selected),
            (Some(_), None) => false,
        }
    }
}

/// Ordered color rules plus the palette their attributes come from.
///
/// Header and error objects take the first rule of their kind. Task lines
/// take the *last* rule whose predicate holds, so later rules refine earlier
/// ones. Task results are cached on the record; whoever owns the records
/// must clear those caches after [`add_rule`](Self::add_rule) or
/// [`remove_rule`](Self::remove_rule) succeeds.
#[derive(Debug, Clone, Default)]
pub struct ColorEngine {
    rules: Vec<ColorRule>,
    palette: Palette,
}

impl ColorEngine {
    pub fn new(palette_size: usize) -> Self {
        ColorEngine {
            rules: Vec::new(),
            palette: Palette::new(palette_size),
        }
    }

    pub fn rules(&self) -> &[ColorRule] {
        &self.rules
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Register a rule. A rule with the same kind and predicate text is
    /// updated in place instead of appended.
    pub fn add_rule(
        &mut self,
        kind: ObjectKind,
        predicate: Option<&str>,
        fg: Color,
        bg: Color,
    ) -> Result<(), ColorError> {
        let attr = self.palette.allocate(fg, bg)?;

        if let Some(rule) = self
            .rules
            .iter_mut()
            .find(|r| r.kind == kind && r.predicate.as_deref() == predicate)
        {
            tracing::debug!(%kind, ?predicate, ?attr, "updated color rule");
            rule.attr = attr;
            return Ok(());
        }

        let matcher = match (kind, predicate) {
            (ObjectKind::Task, Some(src)) => match Predicate::parse(src) {
                Ok(p) => Some(p),
                Err(e) => {
                    tracing::warn!(predicate = src, error = %e, "malformed color rule, it will never match");
                    None
                }
            },
            _ => None,
        };
        tracing::debug!(%kind, ?predicate, ?attr, "added color rule");
        self.rules.push(ColorRule {
            kind,
            predicate: predicate.map(String::from),
            attr,
            matcher,
        });
        Ok(())
    }

    /// Register a rule from color names as written in config files
    pub fn add_rule_named(
        &mut self,
        kind: ObjectKind,
        predicate: Option<&str>,
        fg: &str,
        bg: &str,
    ) -> Result<(), ColorError> {
        let fg = parse_color(fg)?;
        let bg = parse_color(bg)?;
        self.add_rule(kind, predicate, fg, bg)
    }

    /// Remove the rule with this kind and predicate text. Returns whether a
    /// rule was removed.
    pub fn remove_rule(&mut self, kind: ObjectKind, predicate: Option<&str>) -> bool {
        let before = self.rules.len();
        self.rules
            .retain(|r| !(r.kind == kind && r.predicate.as_deref() == predicate));
        self.rules.len() != before
    }

    /// Attribute for an object.
    ///
    /// For tasks the record's cache slot for `selected` is consulted first
    /// and filled on a miss. Without a record only predicate-less task rules
    /// can match and nothing is cached.
    pub fn resolve(&self, kind: ObjectKind, record: Option<&Record>, selected: bool) -> AttrHandle {
        match kind {
            ObjectKind::Header | ObjectKind::Error => self
                .rules
                .iter()
                .find(|r| r.kind == kind)
                .map_or(AttrHandle::DEFAULT, |r| r.attr),
            ObjectKind::Task => match record {
                Some(record) => {
                    if let Some(attr) = record.cached_attr(selected) {
                        return attr;
                    }
                    let attr = self
                        .task_rules()
                        .rev()
                        .find(|r| r.matches(record, selected))
                        .map_or(AttrHandle::DEFAULT, |r| r.attr);
                    record.cache_attr(selected, attr);
                    attr
                }
                None => self
                    .task_rules()
                    .rev()
                    .find(|r| r.predicate.is_none())
                    .map_or(AttrHandle::DEFAULT, |r| r.attr),
            },
        }
    }

    /// Style for an object, ready to draw
    pub fn style(&self, kind: ObjectKind, record: Option<&Record>, selected: bool) -> Style {
        self.palette.style(self.resolve(kind, record, selected))
    }

    fn task_rules(&self) -> impl DoubleEndedIterator<Item = &ColorRule> {
        self.rules.iter().filter(|r| r.kind == ObjectKind::Task)
    }
}
