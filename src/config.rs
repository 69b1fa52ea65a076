use std::path::Path;

use serde::{Deserialize, Serialize};

/// Where undated people sort when age decides something (fallback roots).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndatedOrder {
    /// Undated sorts after every dated value (treated as infinitely young).
    #[default]
    Youngest,
    /// Undated sorts before every dated value.
    Oldest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Width of one person card; a couple occupies two cards plus the
    /// marriage gap.
    pub card_width: f32,
    pub card_height: f32,
    /// Vertical distance between generations.
    pub generation_spacing: f32,
    /// Y coordinate of generation 0.
    pub base_offset: f32,
    /// Horizontal gap between sibling subtrees.
    pub sibling_gap: f32,
    /// Horizontal gap between the two cards of a couple node.
    pub marriage_gap: f32,
    /// Horizontal gap between separate root trees.
    pub tree_gap: f32,
    /// Left margin before the first tree.
    pub margin: f32,
    /// Deterministic vertical stagger for siblings sharing a generation.
    /// Purely cosmetic; zero disables it and it never affects generations.
    pub sibling_jitter: f32,
    pub undated_order: UndatedOrder,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            card_width: 140.0,
            card_height: 100.0,
            generation_spacing: 150.0,
            base_offset: 100.0,
            sibling_gap: 60.0,
            marriage_gap: 20.0,
            tree_gap: 80.0,
            margin: 100.0,
            sibling_jitter: 0.0,
            undated_order: UndatedOrder::default(),
        }
    }
}

/// Load a layout config file (JSON5, all fields optional) merged over the
/// defaults. `None` yields the defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<LayoutConfig> {
    let Some(path) = path else {
        return Ok(LayoutConfig::default());
    };
    let contents = std::fs::read_to_string(path)?;
    let config: LayoutConfig = json5::from_str(&contents)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_jitter_is_disabled() {
        let config = LayoutConfig::default();
        assert_eq!(config.sibling_jitter, 0.0);
        assert_eq!(config.undated_order, UndatedOrder::Youngest);
    }

    #[test]
    fn partial_config_file_keeps_defaults() {
        let config: LayoutConfig =
            json5::from_str(r#"{ generationSpacing: 300, marriageGap: 40 }"#).expect("json5");
        assert_eq!(config.generation_spacing, 300.0);
        assert_eq!(config.marriage_gap, 40.0);
        assert_eq!(config.card_width, LayoutConfig::default().card_width);
    }
}
