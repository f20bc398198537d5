use crate::{
    foundation::core::Rgb,
    foundation::error::{OutlineError, OutlineResult},
    outline::params::MAX_OUTLINE_COUNT,
};

/// Style of one outline group.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    /// Outline color.
    pub color: Rgb,
    /// Outline brightness multiplier.
    pub intensity: f32,
    /// Glowing outlines use a soft threshold and twice the intensity.
    pub glow: bool,
    /// Fill opacity where the outlined object is visible.
    pub unoccluded_fill_opacity: f32,
    /// Fill opacity where the outlined object is hidden behind scene geometry.
    pub occluded_fill_opacity: f32,
    /// Outline width in normalized screen-height units; `1.0` is 1/400 of the height.
    pub width: f32,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            color: Rgb::new(1.0, 0.7, 0.2),
            intensity: 0.9,
            glow: false,
            unoccluded_fill_opacity: 0.0,
            occluded_fill_opacity: 0.0,
            width: 2.0,
        }
    }
}

impl OutlineConfig {
    /// Reject non-finite or negative values and opacities outside `[0, 1]`.
    pub fn validate(&self) -> OutlineResult<()> {
        self.color.validate("OutlineConfig.color")?;
        if !self.intensity.is_finite() || self.intensity < 0.0 {
            return Err(OutlineError::validation(
                "OutlineConfig.intensity must be finite and >= 0",
            ));
        }
        if !self.width.is_finite() || self.width < 0.0 {
            return Err(OutlineError::validation(
                "OutlineConfig.width must be finite and >= 0",
            ));
        }
        for (name, v) in [
            ("unoccluded_fill_opacity", self.unoccluded_fill_opacity),
            ("occluded_fill_opacity", self.occluded_fill_opacity),
        ] {
            if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                return Err(OutlineError::validation(format!(
                    "OutlineConfig.{name} must be in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Debug visualization switches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DebugOutlineConfig {
    /// Draw the raw mask depth buffer over the frame.
    pub view_mask: bool,
}

/// Configuration for the whole outline task.
///
/// `groups[i]` styles outline group `i`; groups without an entry use
/// [`OutlineConfig::default`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OutlineTaskConfig {
    /// Per-group styles, indexed by group.
    pub groups: Vec<OutlineConfig>,
    /// Debug switches.
    pub debug: DebugOutlineConfig,
}

impl OutlineTaskConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(s: &str) -> OutlineResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| OutlineError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Pretty-printed JSON.
    pub fn to_json_string(&self) -> OutlineResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| OutlineError::serde(e.to_string()))
    }

    /// Validate every group and the group count.
    pub fn validate(&self) -> OutlineResult<()> {
        if self.groups.len() > MAX_OUTLINE_COUNT {
            return Err(OutlineError::validation(format!(
                "at most {MAX_OUTLINE_COUNT} outline groups are supported, got {}",
                self.groups.len()
            )));
        }
        for (i, g) in self.groups.iter().enumerate() {
            g.validate().map_err(|e| match e {
                OutlineError::Validation(msg) => {
                    OutlineError::validation(format!("group {i}: {msg}"))
                }
                other => other,
            })?;
        }
        Ok(())
    }

    /// Style for `index`, falling back to the default.
    pub fn group(&self, index: usize) -> OutlineConfig {
        self.groups.get(index).copied().unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/outline/config.rs"]
mod tests;
