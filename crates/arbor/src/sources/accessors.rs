//! Accessor name validation and derivation from column headings.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;

use super::error::{Result, SourceError};

static NON_WORD: OnceLock<Result<Regex>> = OnceLock::new();
static WHITESPACE: OnceLock<Result<Regex>> = OnceLock::new();

fn compiled(cell: &'static OnceLock<Result<Regex>>, pattern: &str) -> Result<&'static Regex> {
    cell.get_or_init(|| {
        Regex::new(pattern).map_err(|e| SourceError::InvalidAccessors {
            accessor: pattern.to_owned(),
            reason: e.to_string(),
        })
    })
    .as_ref()
    .map_err(Clone::clone)
}

/// Convert a human-readable heading into an accessor name.
///
/// The heading is lower-cased, stripped of anything that is neither a word
/// character nor whitespace, and its words are joined with `_`.
///
/// ```
/// use arbor::sources::to_accessor;
///
/// assert_eq!(to_accessor("Hello World!").unwrap(), "hello_world");
/// assert_eq!(to_accessor("  Last   name ").unwrap(), "last_name");
/// assert!(to_accessor("42 things").is_err());
/// ```
pub fn to_accessor(heading: &str) -> Result<String> {
    let non_word = compiled(&NON_WORD, r"[^\w\s]")?;
    let whitespace = compiled(&WHITESPACE, r"\s+")?;

    let lowered = heading.to_lowercase();
    let stripped = non_word.replace_all(&lowered, "");
    let collapsed = whitespace.replace_all(stripped.trim(), "_");

    let starts_with_digit = collapsed.chars().next().is_some_and(|c| c.is_ascii_digit());
    if collapsed.is_empty() || starts_with_digit {
        return Err(SourceError::InvalidHeading {
            heading: heading.to_owned(),
        });
    }
    Ok(collapsed.into_owned())
}

/// How [`build_accessors`] should name each column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AccessorSpec {
    /// Derive every accessor from its heading.
    #[default]
    Derived,
    /// Use these accessors, one per heading.
    Explicit(Vec<String>),
    /// Override the derived accessor for the listed headings.
    Mapped(HashMap<String, String>),
}

/// Build the accessor list for a set of headings.
pub fn build_accessors<S: AsRef<str>>(headings: &[S], spec: &AccessorSpec) -> Result<Vec<String>> {
    let accessors = match spec {
        AccessorSpec::Explicit(accessors) => {
            if accessors.len() != headings.len() {
                return Err(SourceError::AccessorCountMismatch {
                    expected: headings.len(),
                    found: accessors.len(),
                });
            }
            accessors.clone()
        }
        AccessorSpec::Mapped(overrides) => headings
            .iter()
            .map(|heading| match overrides.get(heading.as_ref()) {
                Some(accessor) => Ok(accessor.clone()),
                None => to_accessor(heading.as_ref()),
            })
            .collect::<Result<Vec<_>>>()?,
        AccessorSpec::Derived => headings
            .iter()
            .map(|heading| to_accessor(heading.as_ref()))
            .collect::<Result<Vec<_>>>()?,
    };

    validate_accessors(&accessors)?;
    Ok(accessors)
}

/// Check that `accessors` is non-empty, and every name is non-blank and unique.
pub(crate) fn validate_accessors(accessors: &[String]) -> Result<()> {
    if accessors.is_empty() {
        return Err(SourceError::EmptyAccessors);
    }

    let mut seen = HashSet::with_capacity(accessors.len());
    for accessor in accessors {
        if accessor.trim().is_empty() {
            return Err(SourceError::InvalidAccessors {
                accessor: accessor.clone(),
                reason: "accessor names must not be empty".to_owned(),
            });
        }
        if !seen.insert(accessor.as_str()) {
            return Err(SourceError::DuplicateAccessor {
                accessor: accessor.clone(),
            });
        }
    }
    Ok(())
}

/// Collect accessor names into owned strings.
pub(crate) fn owned<S: AsRef<str>>(accessors: impl IntoIterator<Item = S>) -> Vec<String> {
    accessors
        .into_iter()
        .map(|accessor| accessor.as_ref().to_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_accessor() {
        assert_eq!(to_accessor("Name").unwrap(), "name");
        assert_eq!(to_accessor("Date of birth (UTC)").unwrap(), "date_of_birth_utc");
        assert_eq!(to_accessor("x\t\ty").unwrap(), "x_y");
    }

    #[test]
    fn test_to_accessor_rejects_unusable_headings() {
        assert_eq!(
            to_accessor("!!!"),
            Err(SourceError::InvalidHeading {
                heading: "!!!".to_string()
            })
        );
        assert!(to_accessor("1st").is_err());
    }

    #[test]
    fn test_build_accessors_explicit() {
        let accessors =
            build_accessors(&["A", "B"], &AccessorSpec::Explicit(owned(["x", "y"]))).unwrap();
        assert_eq!(accessors, vec!["x", "y"]);

        assert_eq!(
            build_accessors(&["A", "B"], &AccessorSpec::Explicit(owned(["x"]))),
            Err(SourceError::AccessorCountMismatch {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_build_accessors_mapped() {
        let overrides = HashMap::from([("First Name".to_string(), "given".to_string())]);
        let accessors =
            build_accessors(&["First Name", "Last Name"], &AccessorSpec::Mapped(overrides))
                .unwrap();
        assert_eq!(accessors, vec!["given", "last_name"]);
    }

    #[test]
    fn test_build_accessors_rejects_duplicates() {
        assert_eq!(
            build_accessors(&["Name", "name!"], &AccessorSpec::Derived),
            Err(SourceError::DuplicateAccessor {
                accessor: "name".to_string()
            })
        );
    }

    #[test]
    fn test_validate_accessors() {
        assert_eq!(validate_accessors(&[]), Err(SourceError::EmptyAccessors));
        assert!(matches!(
            validate_accessors(&owned([" "])),
            Err(SourceError::InvalidAccessors { .. })
        ));
        assert!(validate_accessors(&owned(["a", "b"])).is_ok());
    }
}
