use ratatui::{widgets::Block, Frame};

use pricing::Field;

use crate::state::form::FormState;

use super::{layout, theme::Theme, widgets};

const KEYS: &[(&str, &str)] = &[
    ("↑↓", "select"),
    ("←→", "adjust"),
    ("pgup/pgdn", "x10"),
    ("enter", "predict"),
    ("r", "reset"),
    ("?", "help"),
    ("q", "quit"),
];

/// Draws the whole form page.
pub fn draw(f: &mut Frame, state: &FormState) {
    let area = f.size();
    f.render_widget(Block::default().style(Theme::base()), area);

    let (header, sliders, button, result, hint) = layout::vertical(area, Field::ALL.len());

    f.render_widget(widgets::header(), header);

    let rows = layout::slider_rows(sliders, Field::ALL.len());
    for (field, row) in Field::ALL.into_iter().zip(rows) {
        let focused = field == state.selected();
        f.render_widget(
            widgets::slider(state.spec(field), state.value(field), focused),
            row,
        );
    }

    f.render_widget(widgets::button(), button);
    f.render_widget(widgets::result(state.outcome()), result);
    f.render_widget(widgets::hint(KEYS), hint);
}
