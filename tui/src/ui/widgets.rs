use ratatui::{
    layout::Alignment,
    style::Modifier,
    symbols,
    text::{Line, Span},
    widgets::{Block, Borders, LineGauge, Paragraph, Wrap},
};

use pricing::{features::FEATURE_NAMES, FieldSpec};

use crate::state::model::{Outcome, CAPTION};
use crate::ui::theme::Theme;

pub fn header<'a>() -> Paragraph<'a> {
    let lines = vec![
        Line::from(Span::styled("California House Price Predictor", Theme::title())),
        Line::from(Span::styled(
            "Predict median house value based on location and demographics",
            Theme::dim(),
        )),
    ];

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Theme::border()))
}

pub fn slider<'a>(spec: &'a FieldSpec, value: f64, focused: bool) -> LineGauge<'a> {
    let (prefix, border) = if focused {
        ("▶ ", Theme::border_focus())
    } else {
        ("  ", Theme::border())
    };

    let label = Line::from(vec![
        Span::styled(format!("{:>8}", spec.display(value)), Theme::title()),
        Span::styled(
            format!("  [{} .. {}]", spec.display(spec.min), spec.display(spec.max)),
            Theme::muted(),
        ),
    ]);

    LineGauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(format!("{prefix}{}", spec.label))
                .title_style(if focused { Theme::title() } else { Theme::dim() }),
        )
        .gauge_style(Theme::slider(focused))
        .line_set(symbols::line::THICK)
        .label(label)
        .ratio(spec.ratio(value))
}

pub fn button<'a>() -> Paragraph<'a> {
    Paragraph::new(Line::from(Span::styled(
        "  Predict House Price  ",
        Theme::button(),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).border_style(Theme::border()))
}

pub fn result(outcome: &Outcome) -> Paragraph<'_> {
    let lines = match outcome {
        Outcome::Idle => vec![Line::from(Span::styled(
            "Adjust the inputs and press enter to estimate a price.",
            Theme::muted(),
        ))],
        Outcome::Priced {
            display,
            features,
            stale,
        } => {
            let price_style = if *stale { Theme::muted() } else { Theme::price() };

            let used = FEATURE_NAMES
                .iter()
                .zip(features.to_row())
                .map(|(name, v)| format!("{name}={v}"))
                .collect::<Vec<_>>()
                .join("  ");

            let mut lines = vec![
                Line::from(vec![
                    Span::styled("Estimated House Price: ", Theme::text()),
                    Span::styled(display.as_str(), price_style),
                ]),
                Line::from(""),
                Line::from(Span::styled(CAPTION, Theme::dim().add_modifier(Modifier::ITALIC))),
                Line::from(Span::styled(used, Theme::muted())),
            ];

            if *stale {
                lines.push(Line::from(Span::styled(
                    "inputs changed since this estimate, press enter to update",
                    Theme::error(),
                )));
            }

            lines
        }
        Outcome::Failed { message } => vec![
            Line::from(Span::styled("Prediction failed", Theme::error())),
            Line::from(Span::styled(message.as_str(), Theme::text())),
        ],
    };

    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border())
                .title(" Result ")
                .title_style(Theme::title()),
        )
        .wrap(Wrap { trim: true })
}

pub fn hint<'a>(keys: &[(&'a str, &'a str)]) -> Paragraph<'a> {
    let spans = keys
        .iter()
        .flat_map(|(key, desc)| {
            [
                Span::styled(*key, Theme::dim()),
                Span::styled(format!("  {desc}    "), Theme::muted()),
            ]
        })
        .collect::<Vec<_>>();

    Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
}
