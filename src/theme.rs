/// Colour scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    /// Light scheme.
    #[default]
    Light,
    /// Dark scheme.
    Dark,
}

impl Theme {
    /// The other theme.
    pub fn opposite(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Accessible label for the toggle button.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Light => "Switch to dark mode",
            Self::Dark => "Switch to light mode",
        }
    }
}

/// Session-wide theme; changed only through [`ThemeState::toggle`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ThemeState {
    current: Theme,
}

impl ThemeState {
    /// Start in `theme`.
    pub fn new(theme: Theme) -> Self {
        Self { current: theme }
    }

    /// Active theme.
    pub fn current(&self) -> Theme {
        self.current
    }

    /// Flip and return the new theme.
    pub fn toggle(&mut self) -> Theme {
        self.current = self.current.opposite();
        tracing::debug!(theme = ?self.current, "theme toggled");
        self.current
    }
}
