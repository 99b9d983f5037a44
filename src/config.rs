use crate::layout::Size;
use crate::theme::Theme;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutShape {
    /// Every node on one circle, high-degree nodes spread apart.
    Circle,
    /// Best-connected node in the middle, the rest fanned out around it.
    #[default]
    Distributed,
}

/// How the distributed layout walks outwards from the ring around the hub.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArcTraversal {
    /// Place one neighbor, then descend into it before placing its siblings.
    /// Neighbor lists are taken before descending, so a node claimed deeper
    /// down can be placed again by an ancestor's list.
    DepthFirst,
    /// Place every neighbor of a node before descending into any of them.
    #[default]
    LevelOrder,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CircleConfig {
    pub min_size: i32,
    pub size_per_node: i32,
    pub margin: i32,
    pub radius_factor: f64,
}

impl Default for CircleConfig {
    fn default() -> Self {
        Self {
            min_size: 200,
            size_per_node: 20,
            margin: 40,
            radius_factor: 0.9,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DistributedConfig {
    pub min_radius: i32,
    pub radius_per_node: i32,
    pub circle_radius_factor: f64,
    pub arc_degrees: f64,
    pub width_margin: i32,
    pub height_margin: i32,
    pub traversal: ArcTraversal,
    pub place_disconnected: bool,
}

impl Default for DistributedConfig {
    fn default() -> Self {
        Self {
            min_radius: 90,
            radius_per_node: 10,
            circle_radius_factor: 0.75,
            arc_degrees: 120.0,
            width_margin: 100,
            height_margin: 100,
            traversal: ArcTraversal::default(),
            place_disconnected: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub shape: LayoutShape,
    pub circle: CircleConfig,
    pub distributed: DistributedConfig,
    /// Scale the finished layout to this size before it is handed out.
    pub fit: Option<Size>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub layout: LayoutConfig,
    pub theme: Theme,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<Theme>,
    layout: Option<LayoutConfig>,
}

/// Loads a JSON5 config file on top of the defaults.
///
/// `theme` picks a preset (`classic`, `muted`); `themeVariables` replaces
/// individual colors; `layout` overrides layout settings key by key.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let parsed: ConfigFile = json5::from_str(&contents)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;

    match parsed.theme.as_deref() {
        Some("muted") => config.theme = Theme::muted(),
        Some("classic") | Some("default") | None => {}
        Some(other) => log::warn!("unknown theme '{other}', keeping the default"),
    }
    if let Some(vars) = parsed.theme_variables {
        config.theme = vars;
    }
    if let Some(layout) = parsed.layout {
        config.layout = layout;
    }
    Ok(config)
}
