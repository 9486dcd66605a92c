//! Display theme types
//!
//! The session's dark-mode flag selects one of two palettes. The palette is
//! applied to everything the view renders: message labels, bodies, the
//! typing indicator, and the notice banner.

use colored::{Color, Colorize};
use std::fmt;

/// Display theme for the whole view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Light palette (default)
    #[default]
    Light,

    /// Dark palette
    Dark,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => write!(f, "LIGHT"),
            Self::Dark => write!(f, "DARK"),
        }
    }
}

impl From<bool> for Theme {
    /// Map a dark-mode flag onto a theme
    fn from(dark_mode: bool) -> Self {
        if dark_mode {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

impl Theme {
    /// Colored tag used in the prompt, e.g. `[DARK]`
    pub fn colored_tag(&self) -> String {
        match self {
            Self::Light => format!("[{}]", "LIGHT".blue()),
            Self::Dark => format!("[{}]", "DARK".bright_magenta()),
        }
    }

    /// Palette for this theme
    pub fn palette(&self) -> Palette {
        match self {
            Self::Light => Palette {
                user: Color::Blue,
                bot: Color::Green,
                body: Color::Black,
                muted: Color::BrightBlack,
                error: Color::Red,
            },
            Self::Dark => Palette {
                user: Color::BrightCyan,
                bot: Color::BrightGreen,
                body: Color::BrightWhite,
                muted: Color::White,
                error: Color::BrightRed,
            },
        }
    }
}

/// Colors used by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// User label
    pub user: Color,
    /// Bot label
    pub bot: Color,
    /// Message body text
    pub body: Color,
    /// Secondary text (sources, confidence, hints, indicator)
    pub muted: Color,
    /// Notice banner
    pub error: Color,
}
