//! Wildcard expansion for `source` paths.
//!
//! `source = ~/.config/hypr/conf.d/*.conf` includes every matching file. Expansion
//! walks the directory named by the pattern's literal prefix, only as deep as the
//! pattern has components, and matches each candidate with a [`globset`] matcher in
//! which `*` and `?` never cross a `/`.
//!
//! An expression without wildcards, an invalid pattern, or a pattern matching nothing
//! expands to the cleaned expression itself, so a file that does not exist yet still
//! shows up in the resolved config set.

use super::paths::clean_path;
use camino::{Utf8Path, Utf8PathBuf};
use globset::GlobBuilder;
use walkdir::WalkDir;

const GLOB_META: &[char] = &['*', '?', '['];

/// Whether `expr` contains glob metacharacters.
pub fn has_glob_meta(expr: &str) -> bool {
    expr.contains(GLOB_META)
}

/// Expand `expr` into concrete, cleaned paths.
///
/// Never returns an empty vector.
pub fn expand(expr: &str) -> Vec<Utf8PathBuf> {
    if !has_glob_meta(expr) {
        return vec![clean_path(expr)];
    }

    match expand_matches(expr) {
        Ok(matches) if !matches.is_empty() => {
            tracing::debug!("Glob {} matched {} entries", expr, matches.len());
            matches
        }
        Ok(_) => {
            tracing::debug!("Glob {} matched nothing, keeping literal path", expr);
            vec![clean_path(expr)]
        }
        Err(e) => {
            tracing::debug!("Invalid glob {}: {}, keeping literal path", expr, e);
            vec![clean_path(expr)]
        }
    }
}

fn expand_matches(expr: &str) -> Result<Vec<Utf8PathBuf>, globset::Error> {
    let cleaned = clean_path(expr);
    let components: Vec<&str> = cleaned.as_str().split('/').collect();

    let Some(first_meta) = components.iter().position(|c| has_glob_meta(c)) else {
        return Ok(Vec::new());
    };

    let base = match components[..first_meta].join("/") {
        prefix if !prefix.is_empty() => prefix,
        _ if cleaned.is_absolute() => "/".to_string(),
        _ => ".".to_string(),
    };
    let pattern = components[first_meta..].join("/");
    let depth = components.len() - first_meta;

    let matcher = GlobBuilder::new(&pattern)
        .literal_separator(true)
        .build()?
        .compile_matcher();

    let mut matches = Vec::new();
    let walker = WalkDir::new(&base)
        .min_depth(depth)
        .max_depth(depth)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!("Error while expanding {}: {} (skipping)", expr, e);
                continue;
            }
        };

        let Ok(relative) = entry.path().strip_prefix(&base) else {
            continue;
        };
        if !matcher.is_match(relative) {
            continue;
        }

        match Utf8Path::from_path(entry.path()) {
            Some(path) => matches.push(clean_path(path.as_str())),
            None => tracing::debug!("Skipping non UTF-8 glob match: {}", entry.path().display()),
        }
    }

    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn temp_root() -> (TempDir, Utf8PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        (temp_dir, root)
    }

    #[test]
    fn test_literal_path_is_cleaned() {
        assert_eq!(expand("/a/b/../c.conf"), vec![Utf8PathBuf::from("/a/c.conf")]);
    }

    #[test]
    fn test_star_matches_files_sorted() {
        let (_temp_dir, root) = temp_root();
        fs::write(root.join("b.conf"), "").unwrap();
        fs::write(root.join("a.conf"), "").unwrap();
        fs::write(root.join("notes.txt"), "").unwrap();

        let matches = expand(root.join("*.conf").as_str());
        assert_eq!(matches, vec![root.join("a.conf"), root.join("b.conf")]);
    }

    #[test]
    fn test_star_does_not_cross_directories() {
        let (_temp_dir, root) = temp_root();
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::write(root.join("sub/deep.conf"), "").unwrap();
        fs::write(root.join("top.conf"), "").unwrap();

        let matches = expand(root.join("*.conf").as_str());
        assert_eq!(matches, vec![root.join("top.conf")]);

        let nested = expand(root.join("*/*.conf").as_str());
        assert_eq!(nested, vec![root.join("sub/deep.conf")]);
    }

    #[test]
    fn test_no_match_falls_back_to_literal() {
        let (_temp_dir, root) = temp_root();
        let expr = root.join("missing/*.conf");
        assert_eq!(expand(expr.as_str()), vec![expr]);
    }

    #[test]
    fn test_invalid_pattern_falls_back_to_literal() {
        let (_temp_dir, root) = temp_root();
        let expr = root.join("[unclosed.conf");
        assert_eq!(expand(expr.as_str()), vec![expr]);
    }

    #[test]
    fn test_has_glob_meta() {
        assert!(has_glob_meta("conf.d/*.conf"));
        assert!(has_glob_meta("file?.conf"));
        assert!(has_glob_meta("[ab].conf"));
        assert!(!has_glob_meta("~/.config/hypr/a.conf"));
    }
}
