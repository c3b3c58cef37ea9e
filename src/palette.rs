//! The fixed pulse palette, speed presets and viewer themes.
//!
//! Every table the stylesheet and the HTML viewer emit is derived from the enums in this module,
//! so adding a color means adding one variant here.

/// A color with a stylesheet rule. Edges may still use any other color name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PulseColor {
    Blue,
    Green,
    Red,
    Orange,
    Purple,
}

impl PulseColor {
    pub const ALL: [PulseColor; 5] = [
        PulseColor::Blue,
        PulseColor::Green,
        PulseColor::Red,
        PulseColor::Orange,
        PulseColor::Purple,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PulseColor::Blue => "blue",
            PulseColor::Green => "green",
            PulseColor::Red => "red",
            PulseColor::Orange => "orange",
            PulseColor::Purple => "purple",
        }
    }

    /// Exact, case-sensitive lookup. Class names are case-sensitive too.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    pub fn stroke_hex(self) -> &'static str {
        self.themed_hex(Theme::Default)
    }

    /// Pulse period used when no speed preset is active.
    pub fn default_speed(self) -> &'static str {
        match self {
            PulseColor::Blue => "3s",
            PulseColor::Green => "2.5s",
            PulseColor::Red => "2s",
            PulseColor::Orange => "4s",
            PulseColor::Purple => "5s",
        }
    }

    pub fn themed_hex(self, theme: Theme) -> &'static str {
        match (theme, self) {
            (Theme::Default, PulseColor::Blue) => "#0066cc",
            (Theme::Default, PulseColor::Green) => "#00cc66",
            (Theme::Default, PulseColor::Red) => "#cc3300",
            (Theme::Default, PulseColor::Orange) => "#ff9900",
            (Theme::Default, PulseColor::Purple) => "#9900cc",

            (Theme::Neon, PulseColor::Blue) => "#00ffff",
            (Theme::Neon, PulseColor::Green) => "#00ff00",
            (Theme::Neon, PulseColor::Red) => "#ff00ff",
            (Theme::Neon, PulseColor::Orange) => "#ffff00",
            (Theme::Neon, PulseColor::Purple) => "#9d00ff",

            (Theme::Pastel, PulseColor::Blue) => "#aaccff",
            (Theme::Pastel, PulseColor::Green) => "#aaffcc",
            (Theme::Pastel, PulseColor::Red) => "#ffaacc",
            (Theme::Pastel, PulseColor::Orange) => "#ffddaa",
            (Theme::Pastel, PulseColor::Purple) => "#ddaaff",
        }
    }

    pub fn css_class(self) -> String {
        format!("{}-pulse", self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpeedPreset {
    Normal,
    Slow,
    Fast,
}

impl SpeedPreset {
    pub const ALL: [SpeedPreset; 3] = [SpeedPreset::Normal, SpeedPreset::Slow, SpeedPreset::Fast];

    pub fn name(self) -> &'static str {
        match self {
            SpeedPreset::Normal => "normal",
            SpeedPreset::Slow => "slow",
            SpeedPreset::Fast => "fast",
        }
    }

    /// Factor applied to an edge's base pulse period.
    pub fn multiplier(self) -> f32 {
        match self {
            SpeedPreset::Normal => 1.0,
            SpeedPreset::Slow => 2.0,
            SpeedPreset::Fast => 0.5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SpeedPreset::Normal => "Normal Speed",
            SpeedPreset::Slow => "Slow",
            SpeedPreset::Fast => "Fast",
        }
    }

    pub fn css_class(self) -> String {
        format!("speed-{}", self.name())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    #[default]
    Default,
    Neon,
    Pastel,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Default, Theme::Neon, Theme::Pastel];

    pub fn name(self) -> &'static str {
        match self {
            Theme::Default => "default",
            Theme::Neon => "neon",
            Theme::Pastel => "pastel",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Default => "Default",
            Theme::Neon => "Neon",
            Theme::Pastel => "Pastel",
        }
    }

    pub fn css_class(self) -> String {
        format!("theme-{}", self.name())
    }
}
