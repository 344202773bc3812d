//! Extraction of `source` directives from Hyprland config text.
//!
//! A directive is a line such as
//!
//! ```text
//! source = ~/.config/hypr/keybinds.conf
//! source = "./themes/my theme.conf"   # quoted paths may contain spaces
//! source=conf.d/*.conf
//! ```
//!
//! Only the path expression is extracted here. Expanding `~`, joining relative paths
//! and globbing happen in [`paths`](super::paths) and [`glob`](super::glob).

use crate::error::HyprError;
use regex::Regex;

/// A `source` directive found in config text, before any path resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceDirective<'a> {
    /// 1-based line number
    pub line: usize,

    /// Path expression with one layer of quotes removed
    pub raw: &'a str,

    /// Quote character the expression was wrapped in, if any
    pub quote: Option<char>,
}

/// Line scanner for `source` directives.
///
/// # Fields
///
/// - `directive_pattern`: keyword `source` (any ASCII case), then `=` with optional
///   whitespace around it or plain whitespace, then a double-quoted, single-quoted or
///   bare path. A bare path never starts with `=` and stops at whitespace or `#`;
///   quotes inside it (or an unbalanced opening quote) are kept as written.
/// - `keyword_pattern`: a line that starts with the `source` keyword at all; used to
///   report lines that look like directives but carry no usable path.
pub struct SourceDirectiveParser {
    directive_pattern: Regex,
    keyword_pattern: Regex,
}

impl SourceDirectiveParser {
    pub fn new() -> Self {
        Self {
            directive_pattern: Regex::new(
                r#"(?i)^source(?:\s*=\s*|\s+)(?:"([^"]+)"|'([^']+)'|([^\s#=][^\s#]*))"#,
            )
            .expect("Invalid source directive regex"),
            keyword_pattern: Regex::new(r"(?i)^source(?:\s|=|$)")
                .expect("Invalid source keyword regex"),
        }
    }

    /// Lazily yield every directive in `text`, in order of appearance.
    ///
    /// Blank lines and `#` comment lines are skipped. Duplicates are kept.
    pub fn extract<'a>(&'a self, text: &'a str) -> impl Iterator<Item = SourceDirective<'a>> + 'a {
        text.lines().enumerate().filter_map(move |(index, line)| {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                return None;
            }
            self.parse_line(index + 1, trimmed)
        })
    }

    /// Convenience wrapper returning owned path expressions.
    pub fn extract_paths(&self, text: &str) -> Vec<String> {
        self.extract(text).map(|d| d.raw.to_string()).collect()
    }

    fn parse_line<'a>(&self, line: usize, trimmed: &'a str) -> Option<SourceDirective<'a>> {
        let Some(caps) = self.directive_pattern.captures(trimmed) else {
            if self.keyword_pattern.is_match(trimmed) {
                let err = HyprError::ParseAmbiguous {
                    line,
                    text: trimmed.to_string(),
                };
                tracing::debug!("Skipping source line without a path: {}", err);
            }
            return None;
        };

        let (raw, quote) = if let Some(m) = caps.get(1) {
            (m.as_str(), Some('"'))
        } else if let Some(m) = caps.get(2) {
            (m.as_str(), Some('\''))
        } else {
            (caps.get(3)?.as_str(), None)
        };

        // `""` / `''` fall through to the bare branch
        if quote.is_none() && matches!(raw, "\"\"" | "''") {
            let err = HyprError::ParseAmbiguous {
                line,
                text: trimmed.to_string(),
            };
            tracing::debug!("Skipping source line with an empty path: {}", err);
            return None;
        }

        Some(SourceDirective { line, raw, quote })
    }
}

impl Default for SourceDirectiveParser {
    fn default() -> Self {
        Self::new()
    }
}
