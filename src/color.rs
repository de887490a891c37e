//! Palette handling and type-to-color assignment.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, VisError};
use crate::group::TypeGroups;

/// The compact five-color palette used by the static backend.
const CLASSIC_COLORS: &[(&str, &str)] = &[
    ("blue_violet", "#8931EF"),
    ("jonquil", "#F2CA19"),
    ("shocking_pink", "#FF00BD"),
    ("ryb_blue", "#0057E9"),
    ("alien_armpit", "#87E911"),
];

/// The ten-color default web-chart palette.
const CHART_COLORS: &[(&str, &str)] = &[
    ("muted_blue", "#1F77B4"),
    ("safety_orange", "#FF7F0E"),
    ("cooked_asparagus", "#2CA02C"),
    ("brick_red", "#D62728"),
    ("muted_purple", "#9467BD"),
    ("chestnut_brown", "#8C564B"),
    ("raspberry_pink", "#E377C2"),
    ("middle_gray", "#7F7F7F"),
    ("curry_yellow", "#BCBD22"),
    ("blue_teal", "#17BECF"),
];

/// Which fixed palette to draw colors from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaletteKind {
    Classic,
    Chart,
}

/// An ordered, immutable set of named hex colors.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: &'static [(&'static str, &'static str)],
}

impl Palette {
    pub fn new(kind: PaletteKind) -> Self {
        match kind {
            PaletteKind::Classic => Self {
                colors: CLASSIC_COLORS,
            },
            PaletteKind::Chart => Self {
                colors: CHART_COLORS,
            },
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Hex codes in palette order.
    pub fn hex_codes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.colors.iter().map(|(_, hex)| *hex)
    }
}

/// Mapping from type name to assigned hex color.
pub type ColorMap = HashMap<String, String>;

/// Assign one palette color to each type name, without repetition.
///
/// Colors are drawn as a random permutation sample of the palette, so two
/// runs only agree when the caller seeds the generator identically. Fails
/// with [`VisError::PaletteExhausted`] when there are more type names than
/// palette entries; the palette never wraps.
pub fn assign_group_colors(
    type_names: &[String],
    palette: &Palette,
    rng: &mut StdRng,
) -> Result<ColorMap> {
    if type_names.len() > palette.len() {
        return Err(VisError::PaletteExhausted {
            needed: type_names.len(),
            available: palette.len(),
        });
    }

    let mut pool: Vec<&str> = palette.hex_codes().collect();
    pool.shuffle(rng);

    let assigned: ColorMap = type_names
        .iter()
        .zip(pool)
        .map(|(name, hex)| (name.clone(), hex.to_string()))
        .collect();

    info!(mapping = ?assigned, "assigned colors to type groups");

    Ok(assigned)
}

/// Broadcast a type-level color map over every grouped element.
///
/// Total over the elements in `groups`; elements outside the group map get
/// no entry.
pub fn expand_to_elements<K: Clone + Eq + Hash>(
    groups: &TypeGroups<K>,
    colors: &ColorMap,
) -> HashMap<K, String> {
    let mut element_colors = HashMap::with_capacity(groups.element_count());
    for (type_name, members) in groups.iter() {
        if let Some(hex) = colors.get(type_name) {
            for id in members {
                element_colors.insert(id.clone(), hex.clone());
            }
        }
    }

    debug!(elements = element_colors.len(), "expanded colors to elements");

    element_colors
}

/// Blend hex colors by weight, channel by channel.
///
/// Weights are relative; each channel is a weighted average truncated to an
/// integer, matching the documented fixed example:
/// `{"ffffff": 1.0, "0000ff": 0.5, "000000": 0.05}` blends to `"a4a4f6"`.
pub fn combine_hex_values(weighted: &BTreeMap<String, f64>) -> String {
    let total: f64 = weighted.values().sum();

    let channel = |offset: usize| -> u32 {
        let sum: f64 = weighted
            .iter()
            .map(|(hex, w)| {
                // Short or non-ASCII keys contribute zero instead of panicking.
                let byte = hex
                    .get(offset..offset + 2)
                    .and_then(|pair| u32::from_str_radix(pair, 16).ok())
                    .unwrap_or(0);
                byte as f64 * w
            })
            .sum();
        (sum / total) as u32
    };

    format!("{:02x}{:02x}{:02x}", channel(0), channel(2), channel(4))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("T{i}")).collect()
    }

    #[test]
    fn test_no_duplicate_colors_within_one_assignment() {
        let palette = Palette::new(PaletteKind::Classic);
        let mut rng = StdRng::seed_from_u64(7);
        let colors = assign_group_colors(&names(5), &palette, &mut rng).unwrap();
        let distinct: HashSet<_> = colors.values().collect();
        assert_eq!(distinct.len(), 5);
    }

    #[test]
    fn test_palette_exhaustion_fails() {
        let palette = Palette::new(PaletteKind::Classic);
        let mut rng = StdRng::seed_from_u64(7);
        let err = assign_group_colors(&names(6), &palette, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            VisError::PaletteExhausted {
                needed: 6,
                available: 5
            }
        ));
    }

    #[test]
    fn test_same_seed_same_assignment() {
        let palette = Palette::new(PaletteKind::Chart);
        let a = assign_group_colors(&names(4), &palette, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = assign_group_colors(&names(4), &palette, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_expand_covers_exactly_the_grouped_elements() {
        let mut groups: TypeGroups<i64> = TypeGroups::new();
        groups.insert("A", 0);
        groups.insert("A", 2);
        groups.insert("B", 1);

        let mut colors = ColorMap::new();
        colors.insert("A".into(), "#111111".into());
        colors.insert("B".into(), "#222222".into());

        let expanded = expand_to_elements(&groups, &colors);
        assert_eq!(expanded.len(), groups.element_count());
        assert_eq!(expanded[&0], "#111111");
        assert_eq!(expanded[&2], "#111111");
        assert_eq!(expanded[&1], "#222222");
    }

    #[test]
    fn test_combine_hex_values_fixed_examples() {
        let mut weighted = BTreeMap::new();
        weighted.insert("ffffff".to_string(), 1.0);
        weighted.insert("0000ff".to_string(), 0.5);
        weighted.insert("000000".to_string(), 0.05);
        assert_eq!(combine_hex_values(&weighted), "a4a4f6");

        let mut weighted = BTreeMap::new();
        weighted.insert("ffffff".to_string(), 1.0);
        weighted.insert("0000ff".to_string(), 0.5);
        weighted.insert("000000".to_string(), 0.5);
        assert_eq!(combine_hex_values(&weighted), "7f7fbf");

        let mut weighted = BTreeMap::new();
        weighted.insert("ffffff".to_string(), 0.05);
        weighted.insert("0000ff".to_string(), 1.0);
        weighted.insert("000000".to_string(), 0.05);
        assert_eq!(combine_hex_values(&weighted), "0b0bf3");
    }

    #[test]
    fn test_combine_hex_values_tolerates_malformed_keys() {
        // Keys too short for a channel (or with non-hex text) read as zero
        // for the missing channels instead of panicking.
        let mut weighted = BTreeMap::new();
        weighted.insert("ff".to_string(), 1.0);
        weighted.insert("ffffff".to_string(), 1.0);
        assert_eq!(combine_hex_values(&weighted), "ff7f7f");

        let mut weighted = BTreeMap::new();
        weighted.insert("zzzzzz".to_string(), 1.0);
        assert_eq!(combine_hex_values(&weighted), "000000");
    }
}
