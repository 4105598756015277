//! Presentation lookups for a material name: icon texture key, icon URL and
//! a fallback colour for when no icon is available.
//!
//! Nothing here can fail; an unknown material simply gets the default colour.

const ICON_BASE_URL: &str = "https://minecraft.wiki/images/Invicon_";

/// Known naming variants mapped onto their texture names.
const TEXTURE_ALIASES: &[(&str, &str)] = &[
    ("stone_brick", "stone_bricks"),
    ("stonebrick", "stone_bricks"),
    ("wood_plank", "oak_planks"),
    ("wooden_plank", "oak_planks"),
    ("iron_bar", "iron_bars"),
    ("nether_brick", "nether_bricks"),
    ("red_nether_brick", "red_nether_bricks"),
];

/// Name fragments and their colours, checked in order.
const FRAGMENT_COLORS: &[(&[&str], &str)] = &[
    (&["dark_oak", "dark oak"], "#4a3728"),
    (&["stone", "cobble", "andesite", "granite"], "#7f7f7f"),
    (&["oak", "spruce", "birch"], "#8b6f47"),
    (&["acacia"], "#ba5d3b"),
    (&["jungle"], "#b1805c"),
    (&["glass"], "#c0e8f0"),
    (&["sand"], "#e9d5b3"),
    (&["brick"], "#8e4a3d"),
    (&["wool", "carpet"], "#e9ecef"),
    (&["concrete"], "#6c757d"),
    (&["terracotta"], "#a85b3d"),
    (&["iron"], "#d8d8d8"),
    (&["gold"], "#fcee4d"),
    (&["diamond"], "#5dd9d9"),
    (&["emerald"], "#17dd62"),
    (&["redstone"], "#ff0000"),
    (&["lapis"], "#2450a3"),
    (&["coal"], "#353535"),
    (&["quartz"], "#e6ddd2"),
    (&["prismarine"], "#5b9a9f"),
    (&["obsidian"], "#100819"),
    (&["netherrack"], "#6b3636"),
    (&["leaves", "grass"], "#5c9e3c"),
    (&["dirt", "gravel"], "#876652"),
];

pub const DEFAULT_COLOR: &str = "#8b8b8b";

/// Texture name for a material: lowercase, whitespace runs as `_`,
/// parentheses dropped, then the alias table.
pub fn texture_key(name: &str) -> String {
    let key = name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .replace(['(', ')'], "");
    TEXTURE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, texture)| (*texture).to_string())
        .unwrap_or(key)
}

/// Wiki inventory icon for a material.
pub fn icon_url(name: &str) -> String {
    let title = texture_key(name)
        .split('_')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join("_");
    format!("{ICON_BASE_URL}{title}.png")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Colour shown when the icon cannot be used.
pub fn fallback_color(name: &str) -> &'static str {
    let lower = name.to_lowercase();
    FRAGMENT_COLORS
        .iter()
        .find(|(fragments, _)| fragments.iter().any(|f| lower.contains(f)))
        .map_or(DEFAULT_COLOR, |&(_, color)| color)
}
