// Template rendering: replace {Field} placeholders with song values
use crate::metadata::SongRecord;

/// Render `template` against `record`.
///
/// Each `{Name}` is replaced with `record.get(Name)`; rendered values are not
/// scanned again. Text outside braces passes through, including a lone `}`.
/// A malformed template (an unclosed `{`, or a `{` inside a placeholder)
/// renders as the empty string.
pub fn render(template: &str, record: &SongRecord) -> String {
    match try_render(template, record) {
        Some(out) => out,
        None => {
            tracing::debug!("Malformed template {:?}", template);
            String::new()
        }
    }
}

fn try_render(template: &str, record: &SongRecord) -> Option<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after.find('}')?;
        let name = &after[..close];
        if name.contains('{') {
            return None;
        }
        out.push_str(&record.get(name));
        rest = &after[close + 1..];
    }
    out.push_str(rest);

    Some(out)
}
