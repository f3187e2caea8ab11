use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::theme::Theme;

/// Tunables of the connector pipeline. The defaults are the empirically
/// chosen values of the built-in organogram; they are configuration, not
/// intrinsic constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorConfig {
    /// How far the sibling dual curve dips below its anchors, px.
    pub curve_depth: f32,
    /// The lowest point of a symmetric cubic with equal-height anchors sits
    /// at this fraction of the control-point offset below them. Exact only
    /// for the symmetric case; re-derive before making curves asymmetric.
    pub drop_point_fraction: f32,
    /// Vertical stub below a branch source before the fan-out starts, px.
    pub branch_drop: f32,
    /// Downward control offset at the drop-point end of a branch curve, px.
    pub branch_spread_down: f32,
    /// Upward control offset at the target end of a branch curve, px.
    pub branch_spread_up: f32,
    /// Wait after `ready` before the first measurement, to let late
    /// font/image layout shifts finish, ms.
    pub settle_delay_ms: f64,
    /// Coalescing window for resize-driven recomputation, ms.
    pub resize_debounce_ms: f64,
    /// Per-edge reveal delay step, ms.
    pub stagger_step_ms: f64,
    /// Dash-offset transition duration, ms.
    pub reveal_duration_ms: f64,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            curve_depth: 160.0,
            drop_point_fraction: 0.75,
            branch_drop: 80.0,
            branch_spread_down: 100.0,
            branch_spread_up: 80.0,
            settle_delay_ms: 100.0,
            resize_debounce_ms: 150.0,
            stagger_step_ms: 100.0,
            reveal_duration_ms: 800.0,
        }
    }
}

/// Raster export parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub connector: ConnectorConfig,
    pub theme: Theme,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConnectorOverrides {
    curve_depth: Option<f32>,
    drop_point_fraction: Option<f32>,
    branch_drop: Option<f32>,
    branch_spread_down: Option<f32>,
    branch_spread_up: Option<f32>,
    settle_delay_ms: Option<f64>,
    resize_debounce_ms: Option<f64>,
    stagger_step_ms: Option<f64>,
    reveal_duration_ms: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    stroke_color: Option<String>,
    stroke_width: Option<f32>,
    stroke_linecap: Option<String>,
    transition_easing: Option<String>,
    export_background: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderOverrides {
    width: Option<f32>,
    height: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    connector: Option<ConnectorOverrides>,
    theme_variables: Option<ThemeVariables>,
    render: Option<RenderOverrides>,
}

/// Loads defaults, then merges an optional JSON override file on top.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "ink" {
            config.theme = Theme::ink();
        } else if theme_name == "slate" || theme_name == "default" {
            config.theme = Theme::slate();
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.stroke_color {
            config.theme.stroke_color = v;
        }
        if let Some(v) = vars.stroke_width {
            config.theme.stroke_width = v;
        }
        if let Some(v) = vars.stroke_linecap {
            config.theme.stroke_linecap = v;
        }
        if let Some(v) = vars.transition_easing {
            config.theme.transition_easing = v;
        }
        if let Some(v) = vars.export_background {
            config.theme.export_background = v;
        }
    }

    if let Some(overrides) = parsed.connector {
        if let Some(v) = overrides.curve_depth {
            config.connector.curve_depth = v;
        }
        if let Some(v) = overrides.drop_point_fraction {
            config.connector.drop_point_fraction = v;
        }
        if let Some(v) = overrides.branch_drop {
            config.connector.branch_drop = v;
        }
        if let Some(v) = overrides.branch_spread_down {
            config.connector.branch_spread_down = v;
        }
        if let Some(v) = overrides.branch_spread_up {
            config.connector.branch_spread_up = v;
        }
        if let Some(v) = overrides.settle_delay_ms {
            config.connector.settle_delay_ms = v;
        }
        if let Some(v) = overrides.resize_debounce_ms {
            config.connector.resize_debounce_ms = v;
        }
        if let Some(v) = overrides.stagger_step_ms {
            config.connector.stagger_step_ms = v;
        }
        if let Some(v) = overrides.reveal_duration_ms {
            config.connector.reveal_duration_ms = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.width {
            config.render.width = v;
        }
        if let Some(v) = render.height {
            config.render.height = v;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_built_in_chart() {
        let config = ConnectorConfig::default();
        assert_eq!(config.curve_depth, 160.0);
        assert_eq!(config.drop_point_fraction, 0.75);
        assert_eq!(config.branch_drop, 80.0);
        assert_eq!(config.settle_delay_ms, 100.0);
    }

    #[test]
    fn override_file_merges_over_defaults() {
        let dir = std::env::temp_dir();
        let path = dir.join("orgconn-config-test.json");
        std::fs::write(
            &path,
            r#"{
                "theme": "ink",
                "connector": {"curveDepth": 120.0, "staggerStepMs": 50.0},
                "themeVariables": {"strokeWidth": 3.0},
                "render": {"width": 640.0}
            }"#,
        )
        .unwrap();
        let config = load_config(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.connector.curve_depth, 120.0);
        assert_eq!(config.connector.stagger_step_ms, 50.0);
        assert_eq!(config.connector.reveal_duration_ms, 800.0);
        assert_eq!(config.theme.stroke_color, Theme::ink().stroke_color);
        assert_eq!(config.theme.stroke_width, 3.0);
        assert_eq!(config.render.width, 640.0);
        assert_eq!(config.render.height, 800.0);
    }
}
