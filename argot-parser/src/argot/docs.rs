//! Documentation extraction
//!
//! Usage terms and doc pages are derived by walking the combinator tree; the
//! walk consumes structural metadata only and never touches a token stream.
//! Renderers (help text, man pages) consume [`DocPage`] as data; the only
//! rendering done here is the plain usage line, which front ends are free to
//! ignore.

use crate::argot::message::Message;
use crate::argot::parser::Parser;
use serde::Serialize;

/// A structural usage term. `hidden` suppresses the term from rendered usage
/// while leaving it fully active for matching.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageTerm {
    #[serde(flatten)]
    pub kind: UsageKind,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "term", rename_all = "snake_case")]
pub enum UsageKind {
    Argument {
        metavar: String,
    },
    Option {
        names: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        metavar: Option<String>,
    },
    Command {
        name: String,
    },
    Optional {
        terms: Vec<UsageTerm>,
    },
    Multiple {
        terms: Vec<UsageTerm>,
        min: usize,
    },
    Exclusive {
        groups: Vec<Vec<UsageTerm>>,
    },
    Literal {
        text: String,
    },
    Passthrough,
}

impl UsageTerm {
    pub fn new(kind: UsageKind) -> Self {
        UsageTerm {
            kind,
            hidden: false,
        }
    }

    pub fn hide(mut self) -> Self {
        self.hidden = true;
        self
    }
}

/// One documented item: its usage shape, prose, and default if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocEntry {
    pub term: UsageTerm,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// An ordered group of entries under an optional heading.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct DocSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub entries: Vec<DocEntry>,
}

/// The structural metadata one parser contributes to a page.
#[derive(Debug, Clone, Default)]
pub struct DocFragments {
    pub brief: Option<Message>,
    pub description: Option<Message>,
    pub sections: Vec<DocSection>,
}

impl DocFragments {
    /// Append another parser's sections after this one's, keeping the first
    /// non-empty brief/description.
    pub fn merge(mut self, other: DocFragments) -> DocFragments {
        if self.brief.is_none() {
            self.brief = other.brief;
        }
        if self.description.is_none() {
            self.description = other.description;
        }
        self.sections.extend(other.sections);
        self
    }
}

/// A complete documentation page for one parser tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocPage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brief: Option<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Message>,
    pub usage: Vec<UsageTerm>,
    pub sections: Vec<DocSection>,
}

/// Derive the documentation page for a parser tree.
pub fn document<P: Parser>(parser: &P) -> DocPage {
    let fragments = parser.doc();
    DocPage {
        brief: fragments.brief,
        description: fragments.description,
        usage: parser.usage(),
        sections: fragments.sections,
    }
}

/// Render a plain usage line, skipping hidden terms.
pub fn usage_line(program: &str, terms: &[UsageTerm]) -> String {
    let mut parts = vec![program.to_string()];
    parts.extend(terms.iter().filter_map(render_term));
    format!("usage: {}", parts.join(" "))
}

fn render_term(term: &UsageTerm) -> Option<String> {
    if term.hidden {
        return None;
    }
    let rendered = match &term.kind {
        UsageKind::Argument { metavar } => metavar.clone(),
        UsageKind::Option { names, metavar } => {
            let name = names.first().cloned().unwrap_or_default();
            match metavar {
                Some(metavar) => format!("{} {}", name, metavar),
                None => name,
            }
        }
        UsageKind::Command { name } => name.clone(),
        UsageKind::Optional { terms } => {
            let inner = render_terms(terms)?;
            format!("[{}]", inner)
        }
        UsageKind::Multiple { terms, min } => {
            let inner = render_terms(terms)?;
            if *min == 0 {
                format!("[{}...]", inner)
            } else {
                format!("{}...", inner)
            }
        }
        UsageKind::Exclusive { groups } => {
            let rendered: Vec<String> = groups.iter().filter_map(|g| render_terms(g)).collect();
            if rendered.is_empty() {
                return None;
            }
            format!("({})", rendered.join(" | "))
        }
        UsageKind::Literal { text } => text.clone(),
        UsageKind::Passthrough => "[-- ...]".to_string(),
    };
    Some(rendered)
}

fn render_terms(terms: &[UsageTerm]) -> Option<String> {
    let parts: Vec<String> = terms.iter().filter_map(render_term).collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_terms_are_skipped() {
        let terms = vec![
            UsageTerm::new(UsageKind::Argument {
                metavar: "FILE".into(),
            }),
            UsageTerm::new(UsageKind::Option {
                names: vec!["--internal".into()],
                metavar: None,
            })
            .hide(),
        ];
        assert_eq!(usage_line("tool", &terms), "usage: tool FILE");
    }

    #[test]
    fn exclusive_groups_render_with_pipes() {
        let terms = vec![UsageTerm::new(UsageKind::Exclusive {
            groups: vec![
                vec![UsageTerm::new(UsageKind::Command { name: "serve".into() })],
                vec![UsageTerm::new(UsageKind::Command { name: "echo".into() })],
            ],
        })];
        assert_eq!(usage_line("tool", &terms), "usage: tool (serve | echo)");
    }

    #[test]
    fn optional_multiple_renders_with_brackets_and_ellipsis() {
        let terms = vec![UsageTerm::new(UsageKind::Multiple {
            terms: vec![UsageTerm::new(UsageKind::Argument {
                metavar: "TEXT".into(),
            })],
            min: 0,
        })];
        assert_eq!(usage_line("tool", &terms), "usage: tool [TEXT...]");
    }
}
