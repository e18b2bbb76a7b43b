//! String template rendering utilities.

pub struct TemplateVars;

impl TemplateVars {
    pub const STORY_HELPER: &'static str = "storyHelper";
    pub const STORY_MODULE: &'static str = "storyModule";
    pub const CLASS_NAME: &'static str = "className";
    pub const IMPORT_PATH: &'static str = "importPath";
    pub const GROUP_NAME: &'static str = "groupName";
    pub const TAG_NAME: &'static str = "tagName";
}

/// Replace `{{key}}` placeholders in a single left-to-right pass.
///
/// Substituted values are never rescanned, so a value containing `{{..}}`
/// is emitted verbatim.
pub fn render(template: &str, variables: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        let Some(close) = rest[open + 2..].find("}}") else {
            break;
        };
        let key = &rest[open + 2..open + 2 + close];

        result.push_str(&rest[..open]);
        match variables.iter().find(|(k, _)| *k == key) {
            Some((_, value)) => result.push_str(value),
            None => result.push_str(&rest[open..open + 4 + close]),
        }
        rest = &rest[open + 4 + close..];
    }

    result.push_str(rest);
    result
}
