//! Component descriptor resolution.
//!
//! Maps a logical name such as `foo/bar` onto the identifiers and source
//! location an Angular CLI project would give that component:
//! `BarComponent`, `<app-bar>`, `/<sourceRoot>/app/foo/bar/bar.component`.

use crate::error::{Error, Result};
use crate::utils::path;
use crate::workspace::Project;
use heck::{ToKebabCase, ToUpperCamelCase};
use serde::Serialize;

/// Directory under the source root that holds application code.
pub const APP_DIR: &str = "app";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDescriptor {
    pub logical_name: String,
    pub class_name: String,
    pub tag_name: String,
    pub source_dir: String,
    /// Module path of the implementation, without extension.
    pub source_file: String,
}

impl ComponentDescriptor {
    /// Final segment of the logical name.
    pub fn base_name(&self) -> &str {
        self.logical_name
            .rsplit_once('/')
            .map_or(self.logical_name.as_str(), |(_, base)| base)
    }

    /// Directory portion of the logical name with its trailing slash, or `""`.
    pub fn directory(&self) -> &str {
        self.logical_name
            .rfind('/')
            .map_or("", |idx| &self.logical_name[..=idx])
    }
}

/// Trim and validate a logical name. Leading and trailing slashes are dropped.
pub fn normalize_name(name: &str, project: &str) -> Result<String> {
    let trimmed = name.trim().trim_matches('/');

    if trimmed.is_empty() {
        return Err(Error::component_unresolvable(
            name,
            project,
            "Component name cannot be empty",
        ));
    }

    for segment in trimmed.split('/') {
        let problem = match segment {
            "" => Some("Component name contains an empty path segment"),
            "." | ".." => Some("Component name cannot contain '.' or '..' segments"),
            s if s.chars().any(|c| c.is_control() || c == '\\') => {
                Some("Component name contains invalid characters")
            }
            s if s.to_kebab_case().is_empty() => {
                Some("Component name segments must contain a letter or number")
            }
            _ => None,
        };

        if let Some(problem) = problem {
            return Err(Error::component_unresolvable(name, project, problem));
        }
    }

    Ok(trimmed.to_string())
}

/// Derive the descriptor for `name` inside `project`.
///
/// With `flat`, the component file sits directly in the name's directory
/// instead of a folder of its own.
pub fn resolve_component_descriptor(
    name: &str,
    project: &Project,
    flat: bool,
) -> Result<ComponentDescriptor> {
    let logical_name = normalize_name(name, &project.id)?;

    let (directory, base) = match logical_name.rsplit_once('/') {
        Some((directory, base)) => (directory, base),
        None => ("", logical_name.as_str()),
    };
    let file_stem = base.to_kebab_case();

    let mut source_dir = path::join(&path::join(&project.source_root()?, APP_DIR), directory);
    if !flat {
        source_dir = path::join(&source_dir, &file_stem);
    }
    let source_file = path::join(&source_dir, &format!("{}.component", file_stem));

    Ok(ComponentDescriptor {
        class_name: format!("{}Component", base.to_upper_camel_case()),
        tag_name: format!("{}-{}", project.prefix(), file_stem),
        logical_name,
        source_dir,
        source_file,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> Project {
        Project {
            id: "baz".to_string(),
            root: "projects/baz".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn resolves_angular_conventions() {
        let descriptor = resolve_component_descriptor("foo/bar", &project(), false).unwrap();

        assert_eq!(descriptor.logical_name, "foo/bar");
        assert_eq!(descriptor.class_name, "BarComponent");
        assert_eq!(descriptor.tag_name, "app-bar");
        assert_eq!(descriptor.source_dir, "/projects/baz/src/app/foo/bar");
        assert_eq!(descriptor.source_file, "/projects/baz/src/app/foo/bar/bar.component");
    }

    #[test]
    fn multi_word_names_are_cased() {
        let descriptor =
            resolve_component_descriptor("shared/userCard", &project(), false).unwrap();

        assert_eq!(descriptor.class_name, "UserCardComponent");
        assert_eq!(descriptor.tag_name, "app-user-card");
        assert_eq!(
            descriptor.source_file,
            "/projects/baz/src/app/shared/user-card/user-card.component"
        );
    }

    #[test]
    fn flat_component_skips_own_folder() {
        let descriptor = resolve_component_descriptor("foo/bar", &project(), true).unwrap();
        assert_eq!(descriptor.source_dir, "/projects/baz/src/app/foo");
        assert_eq!(descriptor.source_file, "/projects/baz/src/app/foo/bar.component");
    }

    #[test]
    fn source_root_is_normalized_into_source_file() {
        let mut project = project();
        project.source_root = Some("projects/baz/../baz/src".to_string());
        let descriptor = resolve_component_descriptor("foo/bar", &project, false).unwrap();

        assert_eq!(descriptor.source_file, "/projects/baz/src/app/foo/bar/bar.component");
    }

    #[test]
    fn escaping_source_root_is_a_config_error() {
        let mut project = project();
        project.source_root = Some("../outside/src".to_string());
        let err = resolve_component_descriptor("foo/bar", &project, false).unwrap_err();

        assert_eq!(err.code.as_str(), "config.invalid_value");
    }

    #[test]
    fn custom_prefix_drives_tag_name() {
        let mut project = project();
        project.prefix = Some("acme".to_string());
        let descriptor = resolve_component_descriptor("bar", &project, false).unwrap();
        assert_eq!(descriptor.tag_name, "acme-bar");
    }

    #[test]
    fn base_name_and_directory() {
        let nested = resolve_component_descriptor("/foo/baz/bar/", &project(), false).unwrap();
        assert_eq!(nested.base_name(), "bar");
        assert_eq!(nested.directory(), "foo/baz/");

        let top = resolve_component_descriptor("bar", &project(), false).unwrap();
        assert_eq!(top.base_name(), "bar");
        assert_eq!(top.directory(), "");
    }

    #[test]
    fn rejects_unresolvable_names() {
        for name in ["", "  ", "/", "foo//bar", "../bar", "foo/./bar", "foo/!!"] {
            let err = resolve_component_descriptor(name, &project(), false).unwrap_err();
            assert_eq!(err.code.as_str(), "component.unresolvable", "name: {:?}", name);
        }
    }
}
