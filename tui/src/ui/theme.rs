use ratatui::style::{Color, Modifier, Style};

/// Steel-blue theme.
///
/// Base aesthetic:
/// - light foreground on the terminal's own background
/// - steel blue for the focused control and the predict button
/// - green for prices, red for failures
pub struct Theme;

impl Theme {
    // Core palette
    pub const FG: Color = Color::Rgb(230, 236, 240);
    pub const FG_DIM: Color = Color::Rgb(150, 160, 170);
    pub const FG_MUTED: Color = Color::Rgb(90, 98, 105);

    pub const BLUE: Color = Color::Rgb(46, 134, 193);
    pub const BLUE_DARK: Color = Color::Rgb(27, 79, 114);

    pub const GREEN: Color = Color::Rgb(88, 214, 141);
    pub const RED: Color = Color::Rgb(236, 112, 99);

    pub fn base() -> Style {
        Style::default().fg(Self::FG)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::FG_MUTED)
    }

    /// Border of the focused panel.
    pub fn border_focus() -> Style {
        Style::default().fg(Self::BLUE)
    }

    pub fn title() -> Style {
        Style::default().fg(Self::FG).add_modifier(Modifier::BOLD)
    }

    pub fn text() -> Style {
        Style::default().fg(Self::FG)
    }

    pub fn dim() -> Style {
        Style::default().fg(Self::FG_DIM)
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::FG_MUTED)
    }

    /// Filled part of a slider.
    pub fn slider(focused: bool) -> Style {
        let color = if focused { Self::BLUE } else { Self::BLUE_DARK };
        Style::default().fg(color).bg(Color::Rgb(40, 44, 48))
    }

    pub fn button() -> Style {
        Style::default()
            .fg(Color::White)
            .bg(Self::BLUE)
            .add_modifier(Modifier::BOLD)
    }

    pub fn price() -> Style {
        Style::default().fg(Self::GREEN).add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default().fg(Self::RED).add_modifier(Modifier::BOLD)
    }
}
