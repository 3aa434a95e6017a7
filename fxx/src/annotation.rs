//! Selection criteria attached to parameter bag slots.

use std::fmt;
use std::str::FromStr;

use crate::tag::{TagParseError, parse_pairs, write_pair};

/// How an annotated slot is looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationKind {
    /// A single provider registered under a name.
    Name,
    /// Every provider appended to a group, in registration order.
    Group,
}

impl AnnotationKind {
    /// Tag key used when rendering this kind.
    #[must_use]
    pub const fn tag_key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Group => "group",
        }
    }
}

/// Selection criterion for one slot of a parameter bag.
///
/// Annotations are immutable; [`Annotation::optional`] returns a new value.
///
/// # Examples
///
/// ```
/// use fxx::Annotation;
///
/// let ro = Annotation::by_name("ro").optional();
/// assert!(ro.is_optional());
/// assert_eq!(ro.to_string(), r#"name:"ro" optional:"true""#);
/// assert_eq!(ro.to_string().parse::<Annotation>(), Ok(ro));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Annotation {
    kind: AnnotationKind,
    value: String,
    optional: bool,
}

impl Annotation {
    /// Select the provider registered under `name`.
    #[must_use]
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            kind: AnnotationKind::Name,
            value: name.into(),
            optional: false,
        }
    }

    /// Select every provider appended to `group`.
    #[must_use]
    pub fn by_group(group: impl Into<String>) -> Self {
        Self {
            kind: AnnotationKind::Group,
            value: group.into(),
            optional: false,
        }
    }

    /// Mark the slot optional: an unsatisfied slot resolves to its empty value.
    #[must_use]
    pub fn optional(self) -> Self {
        Self {
            optional: true,
            ..self
        }
    }

    /// Lookup kind.
    #[must_use]
    pub const fn kind(&self) -> AnnotationKind {
        self.kind
    }

    /// Name or group this annotation selects.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether an unsatisfied slot falls back to its empty value.
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        self.optional
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_pair(f, self.kind.tag_key(), &self.value)?;
        if self.optional {
            f.write_str(" ")?;
            write_pair(f, "optional", "true")?;
        }
        Ok(())
    }
}

impl FromStr for Annotation {
    type Err = TagParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut selector = None;
        let mut optional = false;
        for (key, value) in parse_pairs(s)? {
            match key.as_str() {
                "name" if selector.is_none() => selector = Some(Self::by_name(value)),
                "group" if selector.is_none() => selector = Some(Self::by_group(value)),
                "optional" => {
                    optional = match value.as_str() {
                        "true" => true,
                        "false" => false,
                        _ => return Err(TagParseError::InvalidFlag { key, value }),
                    };
                }
                "name" | "group" => return Err(TagParseError::MissingSelector),
                _ => return Err(TagParseError::UnknownKey { key }),
            }
        }
        let annotation = selector.ok_or(TagParseError::MissingSelector)?;
        Ok(if optional {
            annotation.optional()
        } else {
            annotation
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn optional_returns_a_new_annotation() {
        let required = Annotation::by_group("handlers");
        let optional = required.clone().optional();
        assert!(!required.is_optional());
        assert!(optional.is_optional());
        assert_eq!(optional.kind(), AnnotationKind::Group);
        assert_eq!(optional.value(), "handlers");
    }

    #[rstest]
    #[case(Annotation::by_name("ro"), r#"name:"ro""#)]
    #[case(Annotation::by_group("g").optional(), r#"group:"g" optional:"true""#)]
    #[case(Annotation::by_name(r#"a"b"#), r#"name:"a\"b""#)]
    fn renders_tags(#[case] annotation: Annotation, #[case] expected: &str) {
        assert_eq!(annotation.to_string(), expected);
    }

    #[rstest]
    #[case(r#"name:"ro" optional:"false""#, Annotation::by_name("ro"))]
    #[case(r#"optional:"true" group:"g""#, Annotation::by_group("g").optional())]
    fn parses_tags(#[case] input: &str, #[case] expected: Annotation) {
        assert_eq!(input.parse::<Annotation>(), Ok(expected));
    }

    #[rstest]
    #[case(r#"optional:"true""#, TagParseError::MissingSelector)]
    #[case(r#"name:"a" group:"b""#, TagParseError::MissingSelector)]
    #[case(r#"json:"a""#, TagParseError::UnknownKey { key: "json".into() })]
    #[case(
        r#"name:"a" optional:"yes""#,
        TagParseError::InvalidFlag { key: "optional".into(), value: "yes".into() }
    )]
    fn rejects_invalid_tags(#[case] input: &str, #[case] expected: TagParseError) {
        assert_eq!(input.parse::<Annotation>(), Err(expected));
    }
}
