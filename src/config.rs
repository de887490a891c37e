//! Visualization run configuration.

use crate::color::PaletteKind;
use crate::layout::LayoutKind;

/// Immutable configuration for one visualization run.
///
/// Built once from [`Default`] plus explicit `with_*` overrides; never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct VisConfig {
    /// Node attribute holding the node type. Default: `"ntype"`.
    pub ntype_key: String,
    /// Edge attribute holding the edge type. Default: `"etype"`.
    pub etype_key: String,
    /// Node attribute used as display label. Default: same as `ntype_key`.
    pub label_key: String,
    /// Layout algorithm. Default: spring.
    pub layout: LayoutKind,
    /// Palette the type colors are drawn from. Default: classic.
    pub palette: PaletteKind,
    /// Node marker size (area units). Default: 200.
    pub node_size: u32,
    /// Node label font size in points. Default: 8.
    pub node_label_font_size: u32,
    /// Edge label font size in points. Default: 4.
    pub edge_label_font_size: u32,
    /// Figure dimensions in inches. Default: (24, 24).
    pub figsize: (u32, u32),
    /// Output resolution in dots per inch. Default: 500.
    pub dpi: u32,
    /// Edge stroke width. Default: 1.0.
    pub edge_width: f64,
    /// Layout coordinate extent after rescaling. Default: 1.0.
    pub scale: f64,
    /// Label/legend font family. Default: sans-serif.
    pub font_family: String,
    /// Whether edge labels are drawn. Default: true.
    pub with_edge_label: bool,
    /// Hard cap on node label length. Default: 25.
    pub max_label_len: usize,
    /// Placeholder label for absent values. Default: `"NULL"`.
    pub null_label: String,
    /// Seed for color sampling and spring layout. `None` means a fresh
    /// entropy seed per run, so colors differ between runs.
    pub seed: Option<u64>,
    /// Optional chart title (HTML backend).
    pub title: Option<String>,
}

impl Default for VisConfig {
    fn default() -> Self {
        Self {
            ntype_key: "ntype".to_string(),
            etype_key: "etype".to_string(),
            label_key: "ntype".to_string(),
            layout: LayoutKind::Spring,
            palette: PaletteKind::Classic,
            node_size: 200,
            node_label_font_size: 8,
            edge_label_font_size: 4,
            figsize: (24, 24),
            dpi: 500,
            edge_width: 1.0,
            scale: 1.0,
            font_family: "sans-serif".to_string(),
            with_edge_label: true,
            max_label_len: 25,
            null_label: "NULL".to_string(),
            seed: None,
            title: None,
        }
    }
}

impl VisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ntype_key(mut self, key: impl Into<String>) -> Self {
        self.ntype_key = key.into();
        self
    }

    pub fn with_etype_key(mut self, key: impl Into<String>) -> Self {
        self.etype_key = key.into();
        self
    }

    pub fn with_label_key(mut self, key: impl Into<String>) -> Self {
        self.label_key = key.into();
        self
    }

    pub fn with_layout(mut self, layout: LayoutKind) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_palette(mut self, palette: PaletteKind) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_edge_label(mut self, with_edge_label: bool) -> Self {
        self.with_edge_label = with_edge_label;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_figsize(mut self, width: u32, height: u32) -> Self {
        self.figsize = (width, height);
        self
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let c = VisConfig::default();
        assert_eq!(c.ntype_key, "ntype");
        assert_eq!(c.etype_key, "etype");
        assert_eq!(c.node_size, 200);
        assert_eq!(c.figsize, (24, 24));
        assert_eq!(c.dpi, 500);
        assert_eq!(c.max_label_len, 25);
        assert_eq!(c.null_label, "NULL");
        assert!(c.with_edge_label);
        assert!(c.seed.is_none());
    }

    #[test]
    fn test_overrides_leave_other_fields_at_defaults() {
        let c = VisConfig::new()
            .with_layout(LayoutKind::Circular)
            .with_seed(7)
            .with_edge_label(false);
        assert_eq!(c.layout, LayoutKind::Circular);
        assert_eq!(c.seed, Some(7));
        assert!(!c.with_edge_label);
        assert_eq!(c.ntype_key, VisConfig::default().ntype_key);
        assert_eq!(c.dpi, VisConfig::default().dpi);
    }
}
