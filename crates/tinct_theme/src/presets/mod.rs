//! Built-in override presets applied when the caller supplies no theme.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use tinct_core::Color;

use crate::error::ThemeError;
use crate::registry::Overrides;
use crate::variant::ThemeVariant;

/// Built-in theme preset catalog.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ThemePreset {
    /// VS Code "Dark Modern" style defaults.
    #[default]
    DefaultDark,
    /// VS Code "Light Modern" style defaults.
    DefaultLight,
}

impl ThemePreset {
    /// Stable preset id for config/serialization.
    pub fn id(self) -> &'static str {
        match self {
            Self::DefaultDark => "default-dark",
            Self::DefaultLight => "default-light",
        }
    }

    /// User-facing display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::DefaultDark => "Default Dark",
            Self::DefaultLight => "Default Light",
        }
    }

    /// Full preset list.
    pub fn all() -> &'static [ThemePreset] {
        const PRESETS: [ThemePreset; 2] = [ThemePreset::DefaultDark, ThemePreset::DefaultLight];
        &PRESETS
    }

    /// Variant this preset is meant to be resolved with.
    pub fn variant(self) -> ThemeVariant {
        match self {
            Self::DefaultDark => ThemeVariant::Dark,
            Self::DefaultLight => ThemeVariant::Light,
        }
    }

    /// Override table of this preset.
    pub fn overrides(self) -> Overrides {
        let colors = match self {
            Self::DefaultDark => default_dark(),
            Self::DefaultLight => default_light(),
        };
        Overrides::from_colors(colors)
    }
}

impl Display for ThemePreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ThemePreset {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|preset| preset.id() == s)
            .ok_or_else(|| ThemeError::UnknownPreset(s.to_string()))
    }
}

fn default_dark() -> Vec<(&'static str, Color)> {
    vec![
        ("checkbox.border", Color::from_hex(0x6B6B6B)),
        ("editor.background", Color::from_hex(0x1E1E1E)),
        ("editor.foreground", Color::from_hex(0xD4D4D4)),
        ("editor.inactiveSelectionBackground", Color::from_hex(0x3A3D41)),
        ("editorIndentGuide.background1", Color::from_hex(0x404040)),
        ("editorIndentGuide.activeBackground1", Color::from_hex(0x707070)),
        ("editor.selectionHighlightBackground", Color::from_rgba8(0xAD, 0xD6, 0xFF, 0x26)),
        ("list.dropBackground", Color::from_hex(0x383B3D)),
        ("activityBarBadge.background", Color::from_hex(0x007ACC)),
        ("sideBarTitle.foreground", Color::from_hex(0xBBBBBB)),
        ("input.placeholderForeground", Color::from_hex(0xA6A6A6)),
        ("menu.background", Color::from_hex(0x252526)),
        ("menu.foreground", Color::from_hex(0xCCCCCC)),
        ("menu.separatorBackground", Color::from_hex(0x454545)),
        ("menu.border", Color::from_hex(0x454545)),
        ("statusBarItem.remoteForeground", Color::WHITE),
        ("statusBarItem.remoteBackground", Color::from_hex(0x16825D)),
        ("ports.iconRunningProcessForeground", Color::from_hex(0x369432)),
        ("sideBarSectionHeader.background", Color::TRANSPARENT),
        ("sideBarSectionHeader.border", Color::from_rgba8(0xCC, 0xCC, 0xCC, 0x33)),
        ("tab.selectedBackground", Color::from_hex(0x222222)),
        ("tab.selectedForeground", Color::from_rgba8(0xFF, 0xFF, 0xFF, 0xA0)),
        ("tab.lastPinnedBorder", Color::from_rgba8(0xCC, 0xCC, 0xCC, 0x33)),
        ("list.activeSelectionIconForeground", Color::WHITE),
        ("terminal.inactiveSelectionBackground", Color::from_hex(0x3A3D41)),
        ("widget.border", Color::from_hex(0x303031)),
        ("actionBar.toggledBackground", Color::from_hex(0x383A49)),
    ]
}

fn default_light() -> Vec<(&'static str, Color)> {
    vec![
        ("checkbox.border", Color::from_hex(0x919191)),
        ("editor.background", Color::WHITE),
        ("editor.foreground", Color::BLACK),
        ("editor.inactiveSelectionBackground", Color::from_hex(0xE5EBF1)),
        ("editorIndentGuide.background1", Color::from_hex(0xD3D3D3)),
        ("editorIndentGuide.activeBackground1", Color::from_hex(0x939393)),
        ("editor.selectionHighlightBackground", Color::from_rgba8(0xAD, 0xD6, 0xFF, 0x80)),
        ("editorSuggestWidget.background", Color::from_hex(0xF3F3F3)),
        ("activityBarBadge.background", Color::from_hex(0x007ACC)),
        ("sideBarTitle.foreground", Color::from_hex(0x6F6F6F)),
        ("list.hoverBackground", Color::from_hex(0xE8E8E8)),
        ("menu.border", Color::from_hex(0xD4D4D4)),
        ("input.placeholderForeground", Color::from_hex(0x767676)),
        ("searchEditor.textInputBorder", Color::from_hex(0xCECECE)),
        ("settings.textInputBorder", Color::from_hex(0xCECECE)),
        ("settings.numberInputBorder", Color::from_hex(0xCECECE)),
        ("statusBarItem.remoteForeground", Color::WHITE),
        ("statusBarItem.remoteBackground", Color::from_hex(0x16825D)),
        ("ports.iconRunningProcessForeground", Color::from_hex(0x369432)),
        ("sideBarSectionHeader.background", Color::TRANSPARENT),
        ("sideBarSectionHeader.border", Color::from_rgba8(0x61, 0x61, 0x61, 0x30)),
        ("tab.selectedForeground", Color::from_rgba8(0x33, 0x33, 0x33, 0xB3)),
        ("tab.selectedBackground", Color::from_rgba8(0xFF, 0xFF, 0xFF, 0xA5)),
        ("tab.lastPinnedBorder", Color::from_rgba8(0x61, 0x61, 0x61, 0x30)),
        ("notebook.cellBorderColor", Color::from_hex(0xE8E8E8)),
        ("notebook.selectedCellBackground", Color::from_rgba8(0xC8, 0xDD, 0xF1, 0x50)),
        ("statusBarItem.errorBackground", Color::from_hex(0xC72E0F)),
        ("list.activeSelectionIconForeground", Color::WHITE),
        ("list.focusAndSelectionOutline", Color::from_hex(0x90C2F9)),
        ("terminal.inactiveSelectionBackground", Color::from_hex(0xE5EBF1)),
        ("widget.border", Color::from_hex(0xD4D4D4)),
        ("actionBar.toggledBackground", Color::from_hex(0xDDDDDD)),
        ("diffEditor.unchangedRegionBackground", Color::from_hex(0xF8F8F8)),
    ]
}
