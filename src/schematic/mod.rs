pub mod generate;
pub mod paths;
pub mod templates;

use std::sync::OnceLock;

use camino::Utf8Path;
use regex::Regex;

use crate::error::GenerateError;
use crate::util::fs;

/// Closed set of boilerplate file kinds the generator can produce.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SchematicKind {
    Controller,
    Service,
    Model,
    Route,
    Interface,
    Validation,
}

impl SchematicKind {
    pub const ALL: [SchematicKind; 6] = [
        SchematicKind::Controller,
        SchematicKind::Model,
        SchematicKind::Route,
        SchematicKind::Service,
        SchematicKind::Interface,
        SchematicKind::Validation,
    ];

    pub const NAMES: [&'static str; 6] = [
        "controller",
        "service",
        "model",
        "route",
        "interface",
        "validation",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SchematicKind::Controller => "controller",
            SchematicKind::Service => "service",
            SchematicKind::Model => "model",
            SchematicKind::Route => "route",
            SchematicKind::Interface => "interface",
            SchematicKind::Validation => "validation",
        }
    }

    /// Parse a user-supplied kind string. Anything outside the closed set is
    /// an `UnknownSchematic` error, never a silent default.
    pub fn parse(kind: &str) -> Result<SchematicKind, GenerateError> {
        match kind {
            "controller" => Ok(SchematicKind::Controller),
            "service" => Ok(SchematicKind::Service),
            "model" => Ok(SchematicKind::Model),
            "route" => Ok(SchematicKind::Route),
            "interface" => Ok(SchematicKind::Interface),
            "validation" => Ok(SchematicKind::Validation),
            other => Err(GenerateError::UnknownSchematic {
                kind: other.to_owned(),
            }),
        }
    }
}

/// Name derivations shared by every template: the lowercased form drives
/// paths and imports, the capitalized form drives symbol names.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GenerationContext {
    pub name: String,
    pub type_name: String,
}

impl GenerationContext {
    pub fn new(name: &str) -> GenerationContext {
        let name = name.to_lowercase();
        let type_name = capitalize(&name);
        GenerationContext { name, type_name }
    }
}

pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

static MODULE_NAME_RE: OnceLock<Regex> = OnceLock::new();

/// Reject names that would produce broken file names, import paths, or
/// TypeScript symbols before any filesystem effect.
pub fn validate_name(name: &str) -> Result<(), GenerateError> {
    if name.is_empty() {
        return Err(GenerateError::validation("module name is required"));
    }
    if name.len() < 2 {
        return Err(GenerateError::validation(
            "module name must be at least 2 characters long",
        ));
    }
    let re = MODULE_NAME_RE.get_or_init(|| {
        Regex::new("^[a-zA-Z][a-zA-Z0-9_]*$").expect("module name pattern is valid")
    });
    if !re.is_match(name) {
        return Err(GenerateError::validation(format!(
            "module name `{name}` must start with a letter and contain only letters, numbers, and underscores"
        )));
    }
    Ok(())
}

/// Helper utilities the generated controller/service can integrate with,
/// detected once per invocation by probing the target project.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ProjectCapabilities {
    pub has_catch_async: bool,
    pub has_send_response: bool,
    pub has_models: bool,
}

impl ProjectCapabilities {
    pub fn detect(project_root: &Utf8Path) -> ProjectCapabilities {
        let utils = project_root.join("src").join("app").join("utils");
        let probe = |stem: &str| {
            fs::path_exists(&utils.join(format!("{stem}.ts")))
                || fs::path_exists(&utils.join(format!("{stem}.js")))
        };
        ProjectCapabilities {
            has_catch_async: probe("catchAsync"),
            has_send_response: probe("sendResponse"),
            has_models: fs::path_exists(&project_root.join("src").join("app")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_normalizes_case() {
        let ctx = GenerationContext::new("Blog");
        assert_eq!(ctx.name, "blog");
        assert_eq!(ctx.type_name, "Blog");

        let ctx = GenerationContext::new("user_profile");
        assert_eq!(ctx.name, "user_profile");
        assert_eq!(ctx.type_name, "User_profile");
    }

    #[test]
    fn parse_accepts_the_closed_set_only() {
        for name in SchematicKind::NAMES {
            assert!(SchematicKind::parse(name).is_ok());
        }
        assert!(matches!(
            SchematicKind::parse("frobnicate"),
            Err(GenerateError::UnknownSchematic { .. })
        ));
        // Case-sensitive on purpose: the CLI passes through what the user typed.
        assert!(SchematicKind::parse("Controller").is_err());
    }

    #[test]
    fn validate_name_accepts_identifiers() {
        for name in ["user", "blog_post", "a2", "UserProfile"] {
            assert!(validate_name(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn validate_name_rejects_bad_input() {
        for name in ["", "x", "2fast", "user-profile", "user name", "über"] {
            assert!(
                matches!(validate_name(name), Err(GenerateError::Validation { .. })),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn capability_detection_defaults_to_standalone() {
        let dir = tempfile::TempDir::new().unwrap();
        let root = camino::Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let caps = ProjectCapabilities::detect(&root);
        assert_eq!(caps, ProjectCapabilities::default());
    }

    #[test]
    fn capability_detection_finds_helpers() {
        let dir = tempfile::TempDir::new().unwrap();
        let root = camino::Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let utils = root.join("src").join("app").join("utils");
        std::fs::create_dir_all(&utils).unwrap();
        std::fs::write(utils.join("catchAsync.ts"), "export default 0;\n").unwrap();
        std::fs::write(utils.join("sendResponse.js"), "module.exports = 0;\n").unwrap();

        let caps = ProjectCapabilities::detect(&root);
        assert!(caps.has_catch_async);
        assert!(caps.has_send_response);
        assert!(caps.has_models);
    }
}
