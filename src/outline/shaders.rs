use crate::foundation::error::{OutlineError, OutlineResult};

/// Marker in the debug fragment template that is replaced by a generated body.
pub const DEBUG_SOURCE_PLACEHOLDER: &str = "//SOURCE_PLACEHOLDER";

/// Body spliced into the debug template to visualize the mask depth buffer.
///
/// Depth close to the far plane is stretched (`1 - (1 - z) * 100`) so nearby geometry
/// shows up as dark shapes on white.
pub const DEPTH_DEBUG_BODY: &str = r#"vec4 getFragmentColor() {
    float Zdb = texelFetch(depthMap, ivec2(gl_FragCoord.xy), 0).x;
    Zdb = 1.0 - (1.0 - Zdb) * 100.0;
    return vec4(Zdb, Zdb, Zdb, 1.0);
}
"#;

/// Shader sources for every outline pipeline, supplied by the caller.
///
/// Sources are opaque to this crate; only the debug fragment template is inspected for
/// [`DEBUG_SOURCE_PLACEHOLDER`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShaderAssets {
    /// Mask vertex stage for rigid items.
    pub mask_vertex: String,
    /// Mask vertex stage for skinned items.
    pub mask_skinned_vertex: String,
    /// Mask fragment stage shared by both variants.
    pub mask_fragment: String,
    /// Full-viewport quad vertex stage for compositing.
    pub viewport_quad_vertex: String,
    /// Edge-only composite fragment stage.
    pub outline_fragment: String,
    /// Filled composite fragment stage.
    pub outline_filled_fragment: String,
    /// Debug quad vertex stage.
    pub debug_vertex: String,
    /// Debug fragment template containing [`DEBUG_SOURCE_PLACEHOLDER`].
    pub debug_fragment_template: String,
}

/// Replace the first placeholder occurrence in `template` with `body`.
pub fn synthesize_debug_fragment(template: &str, body: &str) -> OutlineResult<String> {
    let Some(at) = template.find(DEBUG_SOURCE_PLACEHOLDER) else {
        return Err(OutlineError::shader_template(format!(
            "debug fragment template has no '{DEBUG_SOURCE_PLACEHOLDER}' marker"
        )));
    };
    let mut out = String::with_capacity(template.len() + body.len());
    out.push_str(&template[..at]);
    out.push_str(body);
    out.push_str(&template[at + DEBUG_SOURCE_PLACEHOLDER.len()..]);
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/outline/shaders.rs"]
mod tests;
