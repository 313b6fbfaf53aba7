//! Lyric display theme
//!
//! The theme decides how lyrics are drawn on the projection canvas.
//! It is serialized to JSON and stored by `ThemeStore`.

use serde::{Deserialize, Serialize};

/// What sits behind the lyrics
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Background {
    /// Solid colour, as `#rrggbb`
    Color { color: String },
    /// Image identifier relative to the managed image directory
    Image { location: String },
}

impl Default for Background {
    fn default() -> Self {
        Background::Color {
            color: "#000000".to_string(),
        }
    }
}

/// Drop shadow behind the lyric text
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Shadow {
    /// Shadow colour, as `#rrggbb`
    pub color: String,
    /// Horizontal offset in pixels
    pub offset_x: f32,
    /// Vertical offset in pixels
    pub offset_y: f32,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            color: "#000000".to_string(),
            offset_x: 2.0,
            offset_y: 2.0,
        }
    }
}

/// All settings of a lyric theme
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ThemeSettings {
    // ========== Text ==========

    /// Font family name
    pub font: String,

    /// Text colour, as `#rrggbb`
    pub font_color: String,

    // ========== Canvas ==========

    /// Colour or image behind the text
    pub background: Background,

    /// Text shadow
    pub shadow: Shadow,
}

impl Default for ThemeSettings {
    /// White text on black
    fn default() -> Self {
        Self {
            font: "Noto Sans".to_string(),
            font_color: "#ffffff".to_string(),
            background: Background::default(),
            shadow: Shadow::default(),
        }
    }
}

impl ThemeSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert to JSON string for storage
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse from JSON string (missing fields fall back to defaults)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Same theme with an image background; font, colour and shadow are kept
    pub fn with_background_image(&self, location: &str) -> Self {
        Self {
            background: Background::Image {
                location: location.to_string(),
            },
            ..self.clone()
        }
    }

    /// Identifier of the background image, if the background is one
    pub fn background_image(&self) -> Option<&str> {
        match &self.background {
            Background::Image { location } => Some(location),
            Background::Color { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_colour_background() {
        let theme = ThemeSettings::default();
        assert_eq!(theme.background_image(), None);
        assert_eq!(theme.font_color, "#ffffff");
    }

    #[test]
    fn test_with_background_image_keeps_text_settings() {
        let mut theme = ThemeSettings::default();
        theme.font = "Cantarell".to_string();
        theme.font_color = "#ffee00".to_string();
        theme.shadow.offset_x = 4.0;

        let updated = theme.with_background_image("hills/sunrise.jpg");

        assert_eq!(updated.background_image(), Some("hills/sunrise.jpg"));
        assert_eq!(updated.font, theme.font);
        assert_eq!(updated.font_color, theme.font_color);
        assert_eq!(updated.shadow, theme.shadow);
    }

    #[test]
    fn test_serialization() {
        let theme = ThemeSettings::default().with_background_image("cross.png");

        let json = theme.to_json().unwrap();
        assert!(json.contains("\"kind\": \"image\""));

        let restored = ThemeSettings::from_json(&json).unwrap();
        assert_eq!(theme, restored);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let theme = ThemeSettings::from_json(r#"{ "font": "Ubuntu" }"#).unwrap();

        assert_eq!(theme.font, "Ubuntu");
        assert_eq!(theme.background, Background::default());
        assert_eq!(theme.shadow, Shadow::default());
    }
}
