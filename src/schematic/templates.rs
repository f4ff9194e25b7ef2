use camino::Utf8PathBuf;
use rust_embed::RustEmbed;

use super::{GenerationContext, ProjectCapabilities, SchematicKind};
use crate::error::GenerateError;

#[derive(RustEmbed)]
#[folder = "templates"]
struct Templates;

/// Pick the embedded template body for a kind. Controller and service carry
/// two variants: an integrated one wired to the project's helper utilities,
/// and a standalone one that inlines minimal equivalents.
fn template_file(kind: SchematicKind, caps: ProjectCapabilities) -> &'static str {
    match kind {
        SchematicKind::Controller => {
            if caps.has_catch_async && caps.has_send_response {
                "controller.integrated.ts"
            } else {
                "controller.standalone.ts"
            }
        }
        SchematicKind::Service => {
            if caps.has_models {
                "service.integrated.ts"
            } else {
                "service.standalone.ts"
            }
        }
        SchematicKind::Model => "model.ts",
        SchematicKind::Route => "route.ts",
        SchematicKind::Interface => "interface.ts",
        SchematicKind::Validation => "validation.ts",
    }
}

fn get_string(path: &str) -> Result<String, GenerateError> {
    let file = Templates::get(path).ok_or_else(|| GenerateError::NotFound {
        path: Utf8PathBuf::from(format!("templates/{path}")),
    })?;
    // Template files are checked-in UTF-8 sources.
    Ok(String::from_utf8_lossy(file.data.as_ref()).into_owned())
}

/// Render the source text for one schematic. Pure given the context and the
/// detected capabilities; substitution is literal, no template engine.
pub fn render(
    kind: SchematicKind,
    ctx: &GenerationContext,
    caps: ProjectCapabilities,
) -> Result<String, GenerateError> {
    let body = get_string(template_file(kind, caps))?;
    Ok(body
        .replace("__Name__", &ctx.type_name)
        .replace("__name__", &ctx.name))
}
