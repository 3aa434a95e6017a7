//! Field selectors parsed from config extraction tags.

use std::str::FromStr;

use crate::tag::{TagParseError, is_pair_syntax, parse_pairs};

/// Key selected by a tag whose name part is empty.
const UNNAMED_KEY: &str = "config";

/// Which field of a configuration document to extract.
///
/// Accepts either tag syntax, where each key names a format
/// (`json:"mysql" yaml:"database"`), or a bare dotted path (`mysql.primary`)
/// used for every format. A tag value names one literal key, dots included.
/// Options after a comma (`json:"s,omitempty"`) are ignored, and an empty
/// name selects the key `config`.
///
/// # Examples
///
/// ```
/// use fxx::FieldSelector;
///
/// let selector: FieldSelector = r#"json:"mysql" yaml:"database""#.parse()?;
/// assert_eq!(selector.path_for(Some("yaml")), "database");
/// assert_eq!(selector.path_for(Some("toml")), "mysql");
/// assert_eq!(selector.path_for(None), "mysql");
/// # Ok::<(), fxx::TagParseError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSelector {
    paths: Vec<(String, String)>,
    literal: bool,
}

impl FieldSelector {
    /// Parse a selector.
    ///
    /// # Errors
    ///
    /// Returns a [`TagParseError`] for malformed tag syntax.
    pub fn parse(tag: &str) -> Result<Self, TagParseError> {
        if !is_pair_syntax(tag) {
            return Ok(Self {
                paths: vec![(String::new(), tag.trim().to_owned())],
                literal: false,
            });
        }
        let paths = parse_pairs(tag)?
            .into_iter()
            .map(|(format, value)| {
                let name = value.split(',').next().unwrap_or_default();
                let key = if name.is_empty() { UNNAMED_KEY } else { name };
                (format, key.to_owned())
            })
            .collect();
        Ok(Self {
            paths,
            literal: true,
        })
    }

    /// Path for documents of `format`, falling back to the first path.
    #[must_use]
    pub fn path_for(&self, format: Option<&str>) -> &str {
        format
            .and_then(|format| self.paths.iter().find(|(key, _)| key == format))
            .or_else(|| self.paths.first())
            .map_or("", |(_, path)| path.as_str())
    }

    /// Whether paths name a single literal key rather than a dotted path.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        self.literal
    }
}

impl FromStr for FieldSelector {
    type Err = TagParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
