//! Plain-text rendering of structured pages and failures
//!
//! The engine hands over structured data (doc pages, term-based messages);
//! everything printable is assembled here so the binary stays the only place
//! that decides on layout.

use argot_parser::argot::docs::{usage_line, DocPage, UsageKind, UsageTerm};
use argot_parser::argot::error::Failure;

/// Render a full help page: usage, brief, then each section with its
/// entries aligned in two columns.
pub fn help_page(program: &str, page: &DocPage) -> String {
    let mut out = String::new();
    out.push_str(&usage_line(program, &page.usage));
    out.push('\n');
    if let Some(brief) = &page.brief {
        out.push('\n');
        out.push_str(&brief.to_string());
        out.push('\n');
    }
    if let Some(description) = &page.description {
        out.push('\n');
        out.push_str(&description.to_string());
        out.push('\n');
    }
    for section in &page.sections {
        let labeled: Vec<(String, String)> = section
            .entries
            .iter()
            .filter(|entry| !entry.term.hidden)
            .map(|entry| {
                let mut right = entry
                    .description
                    .as_ref()
                    .map(|d| d.to_string())
                    .unwrap_or_default();
                if let Some(default) = &entry.default {
                    if !right.is_empty() {
                        right.push(' ');
                    }
                    right.push_str(&format!("[default: {}]", default));
                }
                (entry_label(&entry.term), right)
            })
            .collect();
        if labeled.is_empty() {
            continue;
        }
        out.push('\n');
        out.push_str(section.title.as_deref().unwrap_or("Options"));
        out.push_str(":\n");
        let width = labeled.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
        for (label, description) in labeled {
            if description.is_empty() {
                out.push_str(&format!("  {}\n", label));
            } else {
                out.push_str(&format!("  {:<width$}  {}\n", label, description));
            }
        }
    }
    out
}

/// The left-column label for one documented term.
fn entry_label(term: &UsageTerm) -> String {
    match &term.kind {
        UsageKind::Argument { metavar } => metavar.clone(),
        UsageKind::Option { names, metavar } => {
            let names = names.join(", ");
            match metavar {
                Some(metavar) => format!("{} {}", names, metavar),
                None => names,
            }
        }
        UsageKind::Command { name } => name.clone(),
        UsageKind::Literal { text } => text.clone(),
        UsageKind::Passthrough => "-- ...".to_string(),
        UsageKind::Optional { terms } | UsageKind::Multiple { terms, .. } => terms
            .iter()
            .map(entry_label)
            .collect::<Vec<_>>()
            .join(" "),
        UsageKind::Exclusive { groups } => groups
            .iter()
            .map(|group| {
                group
                    .iter()
                    .map(entry_label)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join(" | "),
    }
}

/// Render a failure for stderr.
pub fn failure(program: &str, failure: &Failure, usage: &[UsageTerm]) -> String {
    format!("{}: error: {}\n{}\n", program, failure, usage_line(program, usage))
}
