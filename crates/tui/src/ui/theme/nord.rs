//! Nord palette mapped onto the picker's theme roles, in default and
//! high-contrast variants.

use ratatui::style::Color;

use super::{
    roles::{Theme, ThemeRoles},
    theme_helpers::lighten_rgb,
};

// Polar Night
pub const N0: Color = Color::Rgb(0x2E, 0x34, 0x40); // #2E3440
pub const N1: Color = Color::Rgb(0x3B, 0x42, 0x52); // #3B4252
pub const N2: Color = Color::Rgb(0x43, 0x4C, 0x5E); // #434C5E
pub const N3: Color = Color::Rgb(0x4C, 0x56, 0x6A); // #4C566A

// Snow Storm
pub const S0: Color = Color::Rgb(0xD8, 0xDE, 0xE9); // #D8DEE9
pub const S1: Color = Color::Rgb(0xE5, 0xE9, 0xF0); // #E5E9F0
pub const S2: Color = Color::Rgb(0xEC, 0xEF, 0xF4); // #ECEFF4

// Frost
pub const F1: Color = Color::Rgb(0x88, 0xC0, 0xD0); // #88C0D0
pub const F2: Color = Color::Rgb(0x81, 0xA1, 0xC1); // #81A1C1
pub const F3: Color = Color::Rgb(0x5E, 0x81, 0xAC); // #5E81AC

// Aurora
pub const A_RED: Color = Color::Rgb(0xBF, 0x61, 0x6A); // #BF616A
pub const A_ORANGE: Color = Color::Rgb(0xD0, 0x87, 0x70); // #D08770
pub const A_YELLOW: Color = Color::Rgb(0xEB, 0xCB, 0x8B); // #EBCB8B

pub const BG_MODAL_OVERLAY: Color = Color::Rgb(0x1A, 0x1E, 0x28);
pub const TEXT_MUTED: Color = Color::Rgb(0x61, 0x6E, 0x88); // #616E88

fn build_nord_roles() -> ThemeRoles {
    ThemeRoles {
        background: N0,
        surface: N1,
        surface_muted: N2,
        border: N3,

        text: S0,
        text_secondary: S1,
        text_muted: TEXT_MUTED,

        accent_primary: F1,
        accent_secondary: F2,

        warning: A_ORANGE,
        error: A_RED,

        selection_bg: N3,
        selection_fg: S2,
        focus: F1,
        modal_bg: BG_MODAL_OVERLAY,
    }
}

fn build_nord_high_contrast_roles() -> ThemeRoles {
    let mut roles = build_nord_roles();
    roles.surface_muted = lighten_rgb(roles.surface_muted, 0.15);
    roles.border = lighten_rgb(roles.border, 0.30);

    roles.text = S2;
    roles.text_secondary = S2;
    roles.text_muted = S1;

    roles.warning = A_YELLOW;
    roles.selection_bg = lighten_rgb(roles.selection_bg, 0.10);
    roles.focus = F3;
    roles
}

/// Default Nord theme tuned for dark terminals.
#[derive(Debug, Clone)]
pub struct NordTheme {
    roles: ThemeRoles,
}

impl Default for NordTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl NordTheme {
    pub fn new() -> Self {
        Self { roles: build_nord_roles() }
    }
}

impl Theme for NordTheme {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }
}

/// Brighter text and borders for low-contrast displays.
#[derive(Debug, Clone)]
pub struct NordThemeHighContrast {
    roles: ThemeRoles,
}

impl Default for NordThemeHighContrast {
    fn default() -> Self {
        Self::new()
    }
}

impl NordThemeHighContrast {
    pub fn new() -> Self {
        Self {
            roles: build_nord_high_contrast_roles(),
        }
    }
}

impl Theme for NordThemeHighContrast {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }
}
