use crate::config::Config;
use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub cursor: Color,
    pub placeholder: Color,
    pub copy_button: Color,
    pub dialog_border: Color,
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            background: Color::Reset,
            foreground: Color::White,
            cursor: Color::Cyan,
            placeholder: Color::Gray,
            copy_button: Color::Green,
            dialog_border: Color::Yellow,
            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::Black,
            foreground: Color::White,
            cursor: Color::Cyan,
            placeholder: Color::DarkGray,
            copy_button: Color::Green,
            dialog_border: Color::Yellow,
            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::White,
            foreground: Color::Black,
            cursor: Color::Blue,
            placeholder: Color::Gray,
            copy_button: Color::Green,
            dialog_border: Color::Magenta,
            status_bar_bg: Color::LightBlue,
            status_bar_fg: Color::Black,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        match config.theme.as_str() {
            "dark" => Self::dark(),
            "light" => Self::light(),
            _ => Self::default_theme(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config() {
        let mut config = Config::default();
        assert_eq!(Theme::from_config(&config).background, Color::Reset);

        config.theme = "light".to_string();
        assert_eq!(Theme::from_config(&config).background, Color::White);

        config.theme = "unknown".to_string();
        assert_eq!(Theme::from_config(&config).foreground, Color::White);
    }
}
