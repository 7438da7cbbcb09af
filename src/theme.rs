use ratatui::style::Color;
use serde::Deserialize;

/// All semantic color slots for the atlas-diff UI.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // Chrome
    pub accent: Color,
    pub badge_fg: Color,
    pub text_muted: Color,
    pub divider: Color,

    // Diff
    pub diff_equal_fg: Color,
    pub diff_add_fg: Color,
    pub diff_del_fg: Color,
    pub placeholder: Color,

    // Status indicators
    pub success: Color,
}

pub const THEME_NAMES: &[&str] = &["atlas", "one-dark", "dracula", "solarized-dark"];

impl Theme {
    pub fn from_name(name: &str) -> Self {
        if !THEME_NAMES.contains(&name) {
            tracing::warn!(theme = name, "unknown theme, using atlas");
        }
        match name {
            "one-dark" => one_dark(),
            "dracula" => dracula(),
            "solarized-dark" => solarized_dark(),
            _ => atlas(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        atlas()
    }
}

pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

// ── Serde-compatible override struct ──────────────────────────────

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ThemeOverrides {
    pub accent: Option<String>,
    pub badge_fg: Option<String>,
    pub text_muted: Option<String>,
    pub divider: Option<String>,
    pub diff_equal_fg: Option<String>,
    pub diff_add_fg: Option<String>,
    pub diff_del_fg: Option<String>,
    pub placeholder: Option<String>,
    pub success: Option<String>,
}

pub fn apply_overrides(theme: &mut Theme, overrides: &ThemeOverrides) {
    macro_rules! apply {
        ($field:ident) => {
            if let Some(ref hex) = overrides.$field {
                match parse_hex_color(hex) {
                    Some(c) => theme.$field = c,
                    None => tracing::warn!(
                        slot = stringify!($field),
                        value = %hex,
                        "ignoring invalid color override"
                    ),
                }
            }
        };
    }
    apply!(accent);
    apply!(badge_fg);
    apply!(text_muted);
    apply!(divider);
    apply!(diff_equal_fg);
    apply!(diff_add_fg);
    apply!(diff_del_fg);
    apply!(placeholder);
    apply!(success);
}

// ── Built-in themes ──────────────────────────────────────────────

fn atlas() -> Theme {
    Theme {
        name: "atlas".to_string(),
        accent: Color::Rgb(255, 215, 0),
        badge_fg: Color::Rgb(0, 0, 0),
        text_muted: Color::Rgb(85, 85, 85),
        divider: Color::Rgb(255, 215, 0),
        diff_equal_fg: Color::Rgb(204, 204, 204),
        diff_add_fg: Color::Rgb(95, 255, 95),
        diff_del_fg: Color::Rgb(255, 95, 95),
        placeholder: Color::Rgb(51, 51, 51),
        success: Color::Rgb(95, 255, 95),
    }
}

fn one_dark() -> Theme {
    Theme {
        name: "one-dark".to_string(),
        accent: Color::Cyan,
        badge_fg: Color::Black,
        text_muted: Color::DarkGray,
        divider: Color::Cyan,
        diff_equal_fg: Color::White,
        diff_add_fg: Color::Green,
        diff_del_fg: Color::Red,
        placeholder: Color::Rgb(60, 60, 60),
        success: Color::Green,
    }
}

fn dracula() -> Theme {
    Theme {
        name: "dracula".to_string(),
        accent: Color::Rgb(139, 233, 253),
        badge_fg: Color::Rgb(40, 42, 54),
        text_muted: Color::Rgb(98, 114, 164),
        divider: Color::Rgb(189, 147, 249),
        diff_equal_fg: Color::Rgb(248, 248, 242),
        diff_add_fg: Color::Rgb(80, 250, 123),
        diff_del_fg: Color::Rgb(255, 85, 85),
        placeholder: Color::Rgb(68, 71, 90),
        success: Color::Rgb(80, 250, 123),
    }
}

fn solarized_dark() -> Theme {
    Theme {
        name: "solarized-dark".to_string(),
        accent: Color::Rgb(38, 139, 210),
        badge_fg: Color::Rgb(0, 43, 54),
        text_muted: Color::Rgb(88, 110, 117),
        divider: Color::Rgb(181, 137, 0),
        diff_equal_fg: Color::Rgb(147, 161, 161),
        diff_add_fg: Color::Rgb(133, 153, 0),
        diff_del_fg: Color::Rgb(220, 50, 47),
        placeholder: Color::Rgb(7, 54, 66),
        success: Color::Rgb(133, 153, 0),
    }
}
