//! Route registry upkeep.
//!
//! The registry is a generated TypeScript file holding one `moduleRoutes`
//! array literal plus an import per registered module. Edits are deliberate
//! text-region surgery rather than AST work: the file is machine-maintained
//! and marker-delimited, so locating the exact block and rewriting it in
//! place is enough, and any drift from the expected shape is an error rather
//! than something to repair by guesswork.

use camino::Utf8Path;

use crate::error::GenerateError;
use crate::schematic::GenerationContext;
use crate::util::fs;

const BLOCK_START: &str = "const moduleRoutes = [";
const BLOCK_END: &str = "];";

/// Import statement binding a module's route symbol, e.g.
/// `import {BlogRoutes} from "../modules/blog/blog.route";`.
pub fn import_line(ctx: &GenerationContext) -> String {
    format!(
        "import {{{type_name}Routes}} from \"../modules/{name}/{name}.route\";",
        type_name = ctx.type_name,
        name = ctx.name,
    )
}

/// Canonical array entry for a module. The trailing comma is part of the
/// entry text; duplicate detection compares this exact form.
pub fn registry_entry(ctx: &GenerationContext) -> String {
    format!(
        "{{ path: \"/{name}\", route: {type_name}Routes}},",
        type_name = ctx.type_name,
        name = ctx.name,
    )
}

/// Register a module in the route index: add its import line and its
/// `moduleRoutes` entry, both idempotently, preserving all unrelated content.
///
/// The rewritten document is computed fully in memory and persisted with a
/// single write, so a failed edit leaves the file untouched.
pub fn register_module_route(registry_path: &Utf8Path, name: &str) -> Result<(), GenerateError> {
    let ctx = GenerationContext::new(name);

    let content = fs::read_text(registry_path).map_err(|_| GenerateError::NotFound {
        path: registry_path.to_owned(),
    })?;

    let updated = apply_registration(&content, &ctx)?;

    fs::write_text(registry_path, &updated).map_err(|source| GenerateError::Write {
        path: registry_path.to_owned(),
        source,
    })?;

    tracing::info!("updated {}", registry_path);
    Ok(())
}

/// Pure document transformation behind `register_module_route`.
fn apply_registration(content: &str, ctx: &GenerationContext) -> Result<String, GenerateError> {
    // Import insertion goes first so the block search below runs on the
    // final line layout. Membership is exact string comparison per line,
    // which makes re-registration a no-op.
    let import = import_line(ctx);
    let mut lines: Vec<&str> = content.split('\n').collect();
    if !lines.iter().any(|line| *line == import) {
        let at = lines.len().min(1);
        lines.insert(at, import.as_str());
    }
    let updated = lines.join("\n");

    // First occurrence of the start marker is canonical; the terminator is
    // scanned forward from it, so a `];` appearing only earlier in the file
    // counts as missing.
    let start = updated
        .find(BLOCK_START)
        .ok_or_else(|| GenerateError::malformed(format!("missing `{BLOCK_START}` marker")))?;
    let end_rel = updated[start..]
        .find(BLOCK_END)
        .ok_or_else(|| GenerateError::malformed(format!("missing `{BLOCK_END}` terminator")))?;
    let end = start + end_rel + BLOCK_END.len();

    let block = &updated[start..end];

    // Existing entries stay opaque text; trimming only normalizes
    // indentation so membership checks are stable across edits.
    let inner = &block[BLOCK_START.len()..block.len() - BLOCK_END.len()];
    let mut entries: Vec<&str> = inner
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let entry = registry_entry(ctx);
    if !entries.contains(&entry.as_str()) {
        entries.push(entry.as_str());
    }

    let new_block = format!("{BLOCK_START}\n{}\n{BLOCK_END}", entries.join("\n"));

    // Splice over the exact original block; everything outside it is
    // preserved byte-for-byte.
    let mut result = String::with_capacity(updated.len() + new_block.len());
    result.push_str(&updated[..start]);
    result.push_str(&new_block);
    result.push_str(&updated[end..]);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    const EMPTY_REGISTRY: &str = "import express, { Router } from \"express\";\n\
const moduleRoutes = [\n\
];\n\
\n\
const router = Router();\n\
moduleRoutes.forEach((route) => router.use(route.path, route.route));\n\
\n\
export default router;\n";

    fn ctx(name: &str) -> GenerationContext {
        GenerationContext::new(name)
    }

    fn registry_file(dir: &TempDir, content: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::from_path_buf(dir.path().join("index.ts")).unwrap();
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn registers_a_module_into_an_empty_registry() {
        let updated = apply_registration(EMPTY_REGISTRY, &ctx("blog")).unwrap();

        let lines: Vec<&str> = updated.split('\n').collect();
        assert_eq!(
            lines[1],
            "import {BlogRoutes} from \"../modules/blog/blog.route\";"
        );
        assert!(updated.contains(
            "const moduleRoutes = [\n{ path: \"/blog\", route: BlogRoutes},\n];"
        ));
    }

    #[test]
    fn registration_is_idempotent() {
        let once = apply_registration(EMPTY_REGISTRY, &ctx("blog")).unwrap();
        let twice = apply_registration(&once, &ctx("blog")).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn registration_normalizes_case_from_the_cli_argument() {
        let upper = apply_registration(EMPTY_REGISTRY, &ctx("Blog")).unwrap();
        let lower = apply_registration(EMPTY_REGISTRY, &ctx("blog")).unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn unrelated_content_is_preserved() {
        let updated = apply_registration(EMPTY_REGISTRY, &ctx("user")).unwrap();
        assert!(updated.starts_with("import express, { Router } from \"express\";"));
        assert!(updated.contains("moduleRoutes.forEach((route) => router.use(route.path, route.route));"));
        assert!(updated.ends_with("export default router;\n"));
    }

    #[test]
    fn appends_after_existing_entries() {
        let first = apply_registration(EMPTY_REGISTRY, &ctx("user")).unwrap();
        let second = apply_registration(&first, &ctx("blog")).unwrap();
        assert!(second.contains(
            "const moduleRoutes = [\n\
{ path: \"/user\", route: UserRoutes},\n\
{ path: \"/blog\", route: BlogRoutes},\n\
];"
        ));
        // Both imports present, each exactly once.
        assert_eq!(second.matches("import {UserRoutes}").count(), 1);
        assert_eq!(second.matches("import {BlogRoutes}").count(), 1);
    }

    #[test]
    fn existing_entries_are_kept_as_opaque_text() {
        let registry = "import express from \"express\";\n\
const moduleRoutes = [\n\
  { path: \"/health\", route: HealthRoutes}, // keep me\n\
];\n";
        let updated = apply_registration(registry, &ctx("blog")).unwrap();
        assert!(updated.contains("{ path: \"/health\", route: HealthRoutes}, // keep me"));
        assert!(updated.contains("{ path: \"/blog\", route: BlogRoutes},"));
    }

    #[test]
    fn missing_start_marker_is_malformed() {
        let result = apply_registration("import express from \"express\";\n", &ctx("blog"));
        assert!(matches!(
            result,
            Err(GenerateError::MalformedRegistry { .. })
        ));
    }

    #[test]
    fn missing_terminator_is_malformed() {
        let registry = "import express from \"express\";\nconst moduleRoutes = [\n";
        let result = apply_registration(registry, &ctx("blog"));
        assert!(matches!(
            result,
            Err(GenerateError::MalformedRegistry { .. })
        ));
    }

    #[test]
    fn terminator_before_start_marker_is_malformed() {
        let registry = "const other = [\n];\nconst moduleRoutes = [\n";
        let result = apply_registration(registry, &ctx("blog"));
        assert!(matches!(
            result,
            Err(GenerateError::MalformedRegistry { .. })
        ));
    }

    #[test]
    fn missing_registry_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("absent.ts")).unwrap();
        let result = register_module_route(&path, "blog");
        assert!(matches!(result, Err(GenerateError::NotFound { .. })));
    }

    #[test]
    fn malformed_registry_is_left_untouched_on_disk() {
        let dir = TempDir::new().unwrap();
        let broken = "import express from \"express\";\nconst moduleRoutes = [\n";
        let path = registry_file(&dir, broken);

        let result = register_module_route(&path, "blog");
        assert!(matches!(
            result,
            Err(GenerateError::MalformedRegistry { .. })
        ));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), broken);
    }

    #[test]
    fn on_disk_edit_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = registry_file(&dir, EMPTY_REGISTRY);

        register_module_route(&path, "blog").unwrap();
        let once = std::fs::read_to_string(&path).unwrap();

        register_module_route(&path, "blog").unwrap();
        let twice = std::fs::read_to_string(&path).unwrap();

        assert_eq!(once, twice);
        assert!(once.contains("{ path: \"/blog\", route: BlogRoutes},"));
    }
}
