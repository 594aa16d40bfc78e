use crossterm::event::KeyCode;
use ratatui::{
    layout::Alignment,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::state::form::FormState;
use crate::ui::{draw, layout, theme::Theme};

use super::Action;

/// Larger jump for PgUp / PgDn.
const COARSE_STEPS: i32 = 10;

const HELP: &[(&str, &str)] = &[
    ("↑ ↓ / k j", "select a control"),
    ("← → / h l", "adjust by one step"),
    ("pgup / pgdn", "adjust by ten steps"),
    ("home / end", "jump to the minimum / maximum"),
    ("r", "reset every control to its default"),
    ("enter / p", "predict the house price"),
    ("?", "toggle this help"),
    ("q / esc", "quit"),
];

pub struct FormScreen {
    pub state: FormState,
    pub show_help: bool,
}

impl FormScreen {
    pub fn new(state: FormState) -> Self {
        Self {
            state,
            show_help: false,
        }
    }
}

pub fn handle_key(screen: &mut FormScreen, key: KeyCode) -> Action {
    if screen.show_help {
        // Any key closes the help, q still quits.
        screen.show_help = false;
        return match key {
            KeyCode::Char('q') => Action::Quit,
            _ => Action::None,
        };
    }

    let state = &mut screen.state;
    match key {
        KeyCode::Up | KeyCode::Char('k') => state.select_prev(),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => state.select_next(),
        KeyCode::Left | KeyCode::Char('h') => state.nudge(-1),
        KeyCode::Right | KeyCode::Char('l') => state.nudge(1),
        KeyCode::PageDown => state.nudge(-COARSE_STEPS),
        KeyCode::PageUp => state.nudge(COARSE_STEPS),
        KeyCode::Home => state.to_min(),
        KeyCode::End => state.to_max(),
        KeyCode::Char('r') => state.reset(),
        KeyCode::Enter | KeyCode::Char('p') => state.predict(),
        KeyCode::Char('?') => screen.show_help = true,
        KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
        _ => {}
    }

    Action::None
}

pub fn draw(f: &mut Frame, screen: &FormScreen) {
    draw::draw(f, &screen.state);

    if screen.show_help {
        draw_help(f);
    }
}

fn draw_help(f: &mut Frame) {
    let area = layout::centered_rect(60, 60, f.size());

    let lines = HELP
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(format!("{key:<14}"), Theme::title()),
                Span::styled(*desc, Theme::dim()),
            ])
        })
        .collect::<Vec<_>>();

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Left)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Theme::border_focus())
                    .title(" Keys ")
                    .title_style(Theme::title()),
            )
            .wrap(Wrap { trim: true }),
        area,
    );
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pricing::Field;
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::state::{
        form::tests::{state_with, FixedModel, FlakyModel},
        model::Outcome,
    };

    fn screen(score: f64) -> FormScreen {
        FormScreen::new(state_with(Arc::new(FixedModel(score))))
    }

    fn rendered(screen: &FormScreen) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| draw(f, screen)).unwrap();

        let buffer = terminal.backend().buffer();
        buffer.content.iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn arrows_move_and_adjust() {
        let mut s = screen(1.0);

        handle_key(&mut s, KeyCode::Down);
        handle_key(&mut s, KeyCode::Right);
        handle_key(&mut s, KeyCode::PageUp);

        assert_eq!(s.state.selected(), Field::HouseAge);
        assert_eq!(s.state.value(Field::HouseAge), 31.);
    }

    #[test]
    fn enter_predicts() {
        let mut s = screen(1.2345);

        assert!(matches!(handle_key(&mut s, KeyCode::Enter), Action::None));
        assert!(matches!(s.state.outcome(), Outcome::Priced { .. }));
    }

    #[test]
    fn help_swallows_next_key() {
        let mut s = screen(1.0);

        handle_key(&mut s, KeyCode::Char('?'));
        assert!(s.show_help);

        handle_key(&mut s, KeyCode::Enter);
        assert!(!s.show_help);
        assert_eq!(s.state.outcome(), &Outcome::Idle);
    }

    #[test]
    fn q_quits() {
        let mut s = screen(1.0);
        assert!(matches!(handle_key(&mut s, KeyCode::Char('q')), Action::Quit));
        assert!(matches!(handle_key(&mut s, KeyCode::Esc), Action::Quit));
    }

    #[test]
    fn renders_price_and_caption() {
        let mut s = screen(1.2345);
        handle_key(&mut s, KeyCode::Enter);

        let text = rendered(&s);
        assert!(text.contains("$123,450.00"));
        assert!(text.contains("Prices are estimated"));
        assert!(text.contains("Median Income (in $1000s)"));
        assert!(text.contains("[0.00 .. 100.00]"));
        assert!(!text.contains('\u{2013}'));
    }

    #[test]
    fn renders_without_price_before_predicting() {
        let text = rendered(&screen(1.2345));
        assert!(!text.contains("$123,450.00"));
        assert!(text.contains("Predict House Price"));
    }

    #[test]
    fn failure_clears_rendered_price() {
        let model = Arc::new(FlakyModel::new(1.2345));
        let mut s = FormScreen::new(state_with(model.clone()));

        handle_key(&mut s, KeyCode::Enter);
        assert!(rendered(&s).contains("$123,450.00"));

        model.break_down();
        handle_key(&mut s, KeyCode::Enter);

        let text = rendered(&s);
        assert!(text.contains("Prediction failed"));
        assert!(!text.contains("$123,450.00"));
        assert!(!text.contains("Estimated House Price"));
    }
}
