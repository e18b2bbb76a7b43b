use crate::component::ComponentDescriptor;
use crate::error::{Error, Result};
use crate::rewrite::{self, RewriteRule};
use crate::utils::path;

use super::types::{PathResolution, Placement, STORY_EXTENSION};

/// Directory portion of the logical name after the rewrite rules.
///
/// Also used as the story group prefix, which is rewritten in both placements.
pub fn group_directory(descriptor: &ComponentDescriptor, rules: &[RewriteRule]) -> String {
    rewrite::apply_all(rules, descriptor.directory())
}

/// Compute where the story goes and how it imports the component.
pub fn resolve(
    descriptor: &ComponentDescriptor,
    stories_root: &str,
    rules: &[RewriteRule],
    placement: Placement,
) -> Result<PathResolution> {
    let base_dir = match placement {
        Placement::ComponentDir => descriptor.source_dir.clone(),
        Placement::StoriesTree => {
            let rewritten = group_directory(descriptor, rules);
            path::join(stories_root, &rewritten)
        }
    };

    let file_name = format!("{}.stories.{}", descriptor.base_name(), STORY_EXTENSION);
    let output_path = path::normalize(&path::join(&base_dir, &file_name)).ok_or_else(|| {
        Error::rewrite_malformed_input(
            "Rewritten story path climbs above the workspace root",
            None,
            Some(base_dir.clone()),
        )
    })?;

    let import_path = import_path(path::dirname(&output_path), &descriptor.source_file);

    Ok(PathResolution {
        output_path,
        import_path,
    })
}

fn import_path(from_dir: &str, source_file: &str) -> String {
    let relative = path::relative(from_dir, source_file);

    if relative.starts_with('.') {
        relative
    } else {
        format!("./{}", relative)
    }
}
