//! Structured addressing for partnership form fields

use std::fmt;

/// Section of the partnership form a field belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Root,
    Director,
    Liaison,
}

/// Address of a single form field: section plus field name.
///
/// Kept as a structured pair instead of a dot-delimited string so a field
/// name containing a dot can never be misread as a nested path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldPath {
    pub section: Section,
    pub field: &'static str,
}

impl FieldPath {
    /// Field directly on the form root
    pub const fn root(field: &'static str) -> Self {
        Self {
            section: Section::Root,
            field,
        }
    }

    /// Field in the director contact section
    pub const fn director(field: &'static str) -> Self {
        Self {
            section: Section::Director,
            field,
        }
    }

    /// Field in the liaison contact section
    pub const fn liaison(field: &'static str) -> Self {
        Self {
            section: Section::Liaison,
            field,
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.section {
            Section::Root => write!(f, "{}", self.field),
            Section::Director => write!(f, "director.{}", self.field),
            Section::Liaison => write!(f, "liaison.{}", self.field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path_displays_bare_name() {
        assert_eq!(FieldPath::root("organizationName").to_string(), "organizationName");
    }

    #[test]
    fn test_nested_paths_display_with_section_prefix() {
        assert_eq!(FieldPath::director("phone").to_string(), "director.phone");
        assert_eq!(FieldPath::liaison("email").to_string(), "liaison.email");
    }

    #[test]
    fn test_same_field_name_in_different_sections_is_distinct() {
        assert_ne!(FieldPath::director("phone"), FieldPath::liaison("phone"));
        assert_eq!(FieldPath::director("phone"), FieldPath::director("phone"));
    }

    #[test]
    fn test_dot_in_field_name_stays_unambiguous() {
        // A literal dot in the name does not create a nested address
        let odd = FieldPath::root("a.b");
        assert_eq!(odd.section, Section::Root);
        assert_eq!(odd.field, "a.b");
        assert_ne!(odd, FieldPath::director("b"));
    }
}
