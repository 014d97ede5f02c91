use chrono::{DateTime, Datelike, Local, Utc};

use crate::model::Record;

use super::compile::{Attr, Field, FieldKind, Template};
use super::vars::VariableTable;

/// Everything a template needs besides the record itself
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    pub vars: &'a VariableTable,
    /// Width used by `$project` fields that declare no width
    pub default_project_width: usize,
    /// Clock reading used for `$date`, `$time` and the current-year check
    pub now: DateTime<Local>,
}

impl<'a> RenderContext<'a> {
    pub fn new(vars: &'a VariableTable, default_project_width: usize) -> Self {
        RenderContext {
            vars,
            default_project_width,
            now: Local::now(),
        }
    }
}

/// Render a template against a record (or no record, for title lines).
///
/// A `$>` fill renders as nothing here; use [`evaluate_line`] when the
/// target line width is known.
pub fn evaluate(template: &Template, record: Option<&Record>, ctx: &RenderContext) -> String {
    render_fields(template.fields(), record, ctx)
}

/// Render a template into a line of at most `width` characters. Text after
/// the first top-level `$>` is pushed against the right edge.
pub fn evaluate_line(
    template: &Template,
    record: Option<&Record>,
    ctx: &RenderContext,
    width: usize,
) -> String {
    let fields = template.fields();
    let Some(fill) = fields.iter().position(|f| f.kind == FieldKind::Fill) else {
        return truncate_chars(&render_fields(fields, record, ctx), width);
    };

    let left = render_fields(&fields[..fill], record, ctx);
    let right = render_fields(&fields[fill + 1..], record, ctx);
    let used = left.chars().count() + right.chars().count();

    let mut line = left;
    if used < width {
        line.extend(std::iter::repeat_n(' ', width - used));
    }
    line.push_str(&right);
    truncate_chars(&line, width)
}

fn render_fields(fields: &[Field], record: Option<&Record>, ctx: &RenderContext) -> String {
    let mut out = String::new();
    for field in fields {
        let text = render_field(&field.kind, record, ctx);
        let width = if field.width != 0 {
            field.width
        } else if field.kind == FieldKind::Attribute(Attr::Project) {
            ctx.default_project_width
        } else {
            out.push_str(&text);
            continue;
        };
        push_aligned(&mut out, &text, width, field.right_align);
    }
    out
}

fn render_field(kind: &FieldKind, record: Option<&Record>, ctx: &RenderContext) -> String {
    match kind {
        FieldKind::Literal(text) => text.clone(),
        FieldKind::DateNow => format_date(Some(ctx.now.with_timezone(&Utc)), ctx),
        FieldKind::TimeNow => ctx.now.format("%H:%M").to_string(),
        FieldKind::Attribute(attr) => match record {
            Some(record) => render_attribute(*attr, record, ctx),
            None => String::new(),
        },
        FieldKind::Variable { name, .. } => ctx
            .vars
            .get(name)
            .map(|v| v.to_string())
            .unwrap_or_default(),
        FieldKind::Conditional {
            cond,
            positive,
            negative,
        } => {
            let test = evaluate(cond, record, ctx);
            if is_truthy(&test) {
                evaluate(positive, record, ctx)
            } else {
                evaluate(negative, record, ctx)
            }
        }
        FieldKind::Fill => String::new(),
    }
}

fn render_attribute(attr: Attr, record: &Record, ctx: &RenderContext) -> String {
    match attr {
        Attr::Project => record.project.clone().unwrap_or_default(),
        Attr::Description => record.description.clone(),
        Attr::Due => format_date(record.due, ctx),
        Attr::Start => format_date(record.start, ctx),
        Attr::Entry => format_date(record.entry, ctx),
        Attr::Priority => record
            .priority
            .map(|p| p.as_char().to_string())
            .unwrap_or_default(),
        Attr::Uuid => record.uuid.clone(),
        Attr::Index => record.index.to_string(),
        Attr::Tags => record.tags_text(),
    }
}

/// `Jan 05` within the current year, `2024-01-05` otherwise, a single space
/// when unset
fn format_date(date: Option<DateTime<Utc>>, ctx: &RenderContext) -> String {
    let Some(date) = date.filter(|d| d.timestamp() != 0) else {
        return " ".into();
    };
    let local = date.with_timezone(&Local);
    if local.year() == ctx.now.year() {
        local.format("%b %d").to_string()
    } else {
        local.format("%Y-%m-%d").to_string()
    }
}

/// Conditional test: empty, `(null)`, or starting with `0` or a space is false
fn is_truthy(text: &str) -> bool {
    if text.starts_with("(null)") {
        return false;
    }
    !matches!(text.chars().next(), None | Some('0') | Some('\0') | Some(' '))
}

/// Append `text` laid out in exactly `width` characters. Over-long text keeps
/// its first `width` characters regardless of alignment.
fn push_aligned(out: &mut String, text: &str, width: usize, right_align: bool) {
    let len = text.chars().count();
    let pad = width.saturating_sub(len);
    if right_align {
        out.extend(std::iter::repeat_n(' ', pad));
    }
    out.extend(text.chars().take(width));
    if !right_align {
        out.extend(std::iter::repeat_n(' ', pad));
    }
}

fn truncate_chars(s: &str, width: usize) -> String {
    s.chars().take(width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Priority;
    use crate::template::compile::{MAX_FIELD_WIDTH, compile};
    use crate::template::vars::VarValue;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn vars() -> VariableTable {
        let mut t = VariableTable::new();
        t.set("program_name", VarValue::Str("tasknc".into()));
        t.set("selected_line", VarValue::Int(2));
        t.set("task_count", VarValue::Int(7));
        t
    }

    fn ctx(vars: &VariableTable) -> RenderContext<'_> {
        RenderContext {
            vars,
            default_project_width: 8,
            now: Local.with_ymd_and_hms(2025, 6, 15, 12, 30, 0).unwrap(),
        }
    }

    fn record() -> Record {
        let mut r = Record::new("0f3c", "water plants");
        r.project = Some("home".into());
        r.index = 12;
        r.priority = Some(Priority::High);
        r.tags = vec!["garden".into(), "weekly".into()];
        r
    }

    fn render(src: &str, record: Option<&Record>) -> String {
        let vars = vars();
        let ctx = ctx(&vars);
        evaluate(&compile(src, &vars), record, &ctx)
    }

    #[test]
    fn literal_round_trip() {
        for s in ["", "plain", "  spaced  out  ", "ünïcødé – text"] {
            assert_eq!(render(s, None), s);
        }
    }

    #[test]
    fn unknown_names_pass_through() {
        let r = record();
        assert_eq!(render("$zzz", Some(&r)), "$zzz");
        assert_eq!(render("$-9nope", Some(&r)), "$-9nope");
    }

    #[test]
    fn attributes() {
        let r = record();
        assert_eq!(render("$description", Some(&r)), "water plants");
        assert_eq!(render("$index:$priority", Some(&r)), "12:H");
        assert_eq!(render("$uuid", Some(&r)), "0f3c");
        assert_eq!(render("$tags", Some(&r)), "garden weekly");
        // project without a width uses the default column width
        assert_eq!(render("[$project]", Some(&r)), "[home    ]");
        assert_eq!(render("[$2project]", Some(&r)), "[ho]");
    }

    #[test]
    fn no_record_renders_attributes_empty() {
        assert_eq!(render("<$description$index>", None), "<>");
        assert_eq!(render("$program_name", None), "tasknc");
    }

    #[test]
    fn variables_render_values() {
        assert_eq!(
            render(" $program_name ($selected_line/$task_count)", None),
            " tasknc (2/7)"
        );
    }

    #[test]
    fn width_is_exact() {
        let r = record();
        for w in 1..20 {
            let left = render(&format!("$-{}description", w), Some(&r));
            let right = render(&format!("${}description", w), Some(&r));
            assert_eq!(left.chars().count(), w);
            assert_eq!(right.chars().count(), w);
        }
    }

    #[test]
    fn oversized_width_renders_at_the_cap() {
        let r = record();
        let vars = vars();
        let ctx = ctx(&vars);
        let template = compile("$99999999999999description", &vars);

        let text = evaluate(&template, Some(&r), &ctx);
        assert_eq!(text.chars().count(), MAX_FIELD_WIDTH);
        assert!(text.starts_with("water plants "));

        let line = evaluate_line(&template, Some(&r), &ctx, 80);
        assert_eq!(line.chars().count(), 80);
    }

    #[test]
    fn right_align_pads_left_and_truncates_right() {
        let r = record();
        assert_eq!(render("$-6priority", Some(&r)), "     H");
        assert_eq!(render("$-5description", Some(&r)), "water");
        assert_eq!(render("$5description", Some(&r)), "water");
        assert_eq!(render("$14description|", Some(&r)), "water plants  |");
    }

    #[test]
    fn unset_priority_pads_to_width() {
        let r = Record::new("u", "d");
        assert_eq!(render("$priority", Some(&r)), "");
        assert_eq!(render("$-6priority", Some(&r)), "      ");
    }

    #[test]
    fn dates() {
        let mut r = record();
        assert_eq!(render("[$due]", Some(&r)), "[ ]");
        r.due = Some(Utc.with_ymd_and_hms(2025, 1, 5, 12, 0, 0).unwrap());
        assert_eq!(render("$due", Some(&r)), "Jan 05");
        r.due = Some(Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap());
        assert_eq!(render("$due", Some(&r)), "2024-01-05");
        assert_eq!(render("$date $time", None), "Jun 15 12:30");
    }

    #[test]
    fn conditional_falsy_set() {
        assert!(!is_truthy(""));
        assert!(!is_truthy("0"));
        assert!(!is_truthy("0abc"));
        assert!(!is_truthy(" Jan"));
        assert!(!is_truthy("(null)"));
        assert!(!is_truthy("(null) and more"));
        assert!(is_truthy("Jan 05"));
        assert!(is_truthy("(nul"));
        assert!(is_truthy("x0"));
    }

    #[test]
    fn conditional_picks_branch() {
        let mut r = record();
        let src = "?$due?$due?$-6priority?";
        assert_eq!(render(src, Some(&r)), "     H");
        r.due = Some(Utc.with_ymd_and_hms(2025, 3, 9, 12, 0, 0).unwrap());
        assert_eq!(render(src, Some(&r)), "Mar 09");
        assert_eq!(render("?$project?has?none?", None), "none");
        assert_eq!(render("?$project???", Some(&r)), "");
    }

    #[test]
    fn fill_right_justifies() {
        let vars = vars();
        let ctx = ctx(&vars);
        let t = compile(" $program_name $> $date", &vars);
        assert_eq!(evaluate(&t, None, &ctx), " tasknc  Jun 15");
        assert_eq!(
            evaluate_line(&t, None, &ctx, 24),
            format!(" tasknc {} Jun 15", " ".repeat(9))
        );
        // Too narrow: the line is cut at the width
        assert_eq!(evaluate_line(&t, None, &ctx, 10), " tasknc  J");
    }

    #[test]
    fn default_task_format() {
        let vars = vars();
        let ctx = ctx(&vars);
        let t = compile(crate::model::DEFAULT_TASK_FORMAT, &vars);
        let r = record();
        assert_eq!(
            evaluate_line(&t, Some(&r), &ctx, 40),
            format!(" home     water plants{}H", " ".repeat(17))
        );
    }

    #[test]
    fn template_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Template>();
    }
}
