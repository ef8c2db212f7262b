use std::fmt;
use std::str::FromStr;

use crate::error::{PathError, Result};

/// One `name` or `name[index]` component of a field path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    /// Field name looked up in the current mapping.
    pub name: String,
    /// Optional sequence position or mapping key applied to the field.
    pub index: Option<String>,
}

/// A parsed dot-separated field path.
///
/// Parsing happens once, before any traversal, so a malformed path is always
/// reported as [`PathError::InvalidPathSyntax`] and never mistaken for an
/// absent field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    raw: String,
    segments: Vec<Segment>,
}

impl FieldPath {
    /// Parse a path such as `inventory[2].name` or `skills[stealth].rank`.
    ///
    /// Parsing does not decide lookup versus fan-out; that depends on the
    /// record. `stats.strength` fans out over the values of `stats` when
    /// `stats` is a mapping, while `stats[strength]` reads its key.
    pub fn parse(path: &str) -> Result<Self> {
        if path.is_empty() {
            return Err(syntax(path, "path is empty"));
        }

        let segments = path
            .split('.')
            .map(|part| parse_segment(path, part))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            raw: path.to_string(),
            segments,
        })
    }

    /// The path exactly as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

impl FromStr for FieldPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn parse_segment(path: &str, part: &str) -> Result<Segment> {
    let (name, index) = match part.find('[') {
        None => (part, None),
        Some(open) => {
            let inner = part[open + 1..].strip_suffix(']').ok_or_else(|| {
                syntax(path, format!("unterminated or trailing index in `{part}`"))
            })?;
            (&part[..open], Some(inner))
        }
    };

    if !is_word(name) {
        return Err(syntax(path, format!("invalid field name in segment `{part}`")));
    }
    if let Some(index) = index {
        if !is_word(index) {
            return Err(syntax(path, format!("invalid index in segment `{part}`")));
        }
    }

    Ok(Segment {
        name: name.to_string(),
        index: index.map(str::to_string),
    })
}

fn is_word(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_alphanumeric() || c == '_')
}

fn syntax(path: &str, reason: impl Into<String>) -> PathError {
    PathError::InvalidPathSyntax {
        path: path.to_string(),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_indexed_segments() {
        let path = FieldPath::parse("inventory[2].name").unwrap();
        assert_eq!(
            path.segments(),
            [
                Segment {
                    name: "inventory".into(),
                    index: Some("2".into()),
                },
                Segment {
                    name: "name".into(),
                    index: None,
                },
            ]
        );
        assert_eq!(path.to_string(), "inventory[2].name");
    }

    #[test]
    fn keyed_index_is_kept_as_text() {
        let path: FieldPath = "skills[stealth]".parse().unwrap();
        assert_eq!(path.segments()[0].index.as_deref(), Some("stealth"));
    }

    #[test]
    fn rejects_malformed_paths() {
        for bad in [
            "",
            ".",
            "a..b",
            "a.",
            ".a",
            "a[",
            "a[]",
            "a[1",
            "a[1]x",
            "a[1]]",
            "[1]",
            "a b",
            "a-b",
            "a[-1]",
        ] {
            assert!(
                matches!(
                    FieldPath::parse(bad),
                    Err(PathError::InvalidPathSyntax { .. })
                ),
                "expected syntax error for {bad:?}"
            );
        }
    }

    #[test]
    fn accepts_underscores_digits_and_unicode_names() {
        assert!(FieldPath::parse("hit_points.max_2").is_ok());
        assert!(FieldPath::parse("équipement[épée]").is_ok());
    }
}
