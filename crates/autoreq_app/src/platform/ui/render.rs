use autoreq_core::{AppViewModel, ResultPanelView, ABOUT, BRANDS, HERO, SERVICES};
use ratatui::layout::{Alignment, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use super::constants::*;
use super::layout::{self, ScreenAreas};

pub fn render(frame: &mut Frame, view: &AppViewModel) {
    let areas: ScreenAreas = layout::split(frame.area(), view);

    render_hero(frame, areas.hero);
    render_form(frame, areas.form, view);
    match &view.result_panel {
        Some(panel) => render_result_panel(frame, areas.outcome, panel),
        None => render_messages(frame, areas.outcome, view),
    }
    render_brands(frame, areas.brands);
    render_services(frame, areas.services);
    render_about(frame, areas.about);
    render_footer(frame, areas.footer, view);
}

fn render_hero(frame: &mut Frame, area: Rect) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let text = Text::from(vec![
        Line::from(Span::styled(APP_TITLE, Style::default().fg(MUTED))),
        Line::from(vec![
            Span::styled(format!("{} ", HERO.headline), bold),
            Span::styled(HERO.highlight, bold.fg(HIGHLIGHT)),
            Span::styled(" from GitHub Repos", bold),
        ]),
        Line::from(HERO.tagline),
    ]);
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_form(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    let button = format!("[ {} ]", view.submit_label);
    let button_style = if view.busy {
        Style::default().fg(MUTED).add_modifier(Modifier::ITALIC)
    } else {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    };

    let input = if view.input.is_empty() {
        Span::styled(HERO.placeholder, Style::default().fg(MUTED))
    } else {
        Span::raw(view.input.as_str())
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(Line::from(Span::styled(button, button_style)).right_aligned());
    let inner = block.inner(area);
    frame.render_widget(Paragraph::new(Line::from(input)).block(block), area);

    if view.input_editable && inner.width > 0 {
        let typed = u16::try_from(view.input.chars().count()).unwrap_or(u16::MAX);
        let x = inner.x.saturating_add(typed.min(inner.width.saturating_sub(1)));
        frame.set_cursor_position(Position::new(x, inner.y));
    }
}

fn render_result_panel(frame: &mut Frame, area: Rect, panel: &ResultPanelView) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            panel.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .title(Line::from(Span::styled(COPY_HINT, Style::default().fg(ACCENT))).right_aligned());
    frame.render_widget(
        Paragraph::new(panel.manifest.as_str())
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn render_messages(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    let mut lines = Vec::new();
    if let Some(error) = &view.error {
        lines.push(Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(ERROR),
        )));
    }
    if let Some(hint) = &view.validation {
        lines.push(Line::from(Span::styled(
            hint.as_str(),
            Style::default().fg(HIGHLIGHT),
        )));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_brands(frame: &mut Frame, area: Rect) {
    let mut spans = Vec::with_capacity(BRANDS.len() * 2);
    for (i, brand) in BRANDS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  •  ", Style::default().fg(MUTED)));
        }
        spans.push(Span::raw(brand.name));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::TOP | Borders::BOTTOM)),
        area,
    );
}

fn render_services(frame: &mut Frame, area: Rect) {
    let mut lines = Vec::with_capacity(SERVICES.len() * 2);
    for service in SERVICES {
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", service.icon), Style::default().fg(ACCENT)),
            Span::styled(service.title, Style::default().add_modifier(Modifier::BOLD)),
        ]));
        lines.push(Line::from(format!("  {}", service.description)));
    }
    frame.render_widget(
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Services"))
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn render_about(frame: &mut Frame, area: Rect) {
    let mut lines: Vec<Line> = ABOUT
        .paragraphs
        .iter()
        .flat_map(|paragraph| [Line::from(*paragraph), Line::default()])
        .collect();
    for card in ABOUT.infos {
        lines.push(Line::from(vec![
            Span::styled("▸ ", Style::default().fg(ACCENT)),
            Span::styled(card.title, Style::default().add_modifier(Modifier::BOLD)),
        ]));
        lines.push(Line::from(format!("  {}", card.description)));
    }
    frame.render_widget(
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(ABOUT.title))
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn render_footer(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    let mut spans = vec![Span::styled(KEY_HELP, Style::default().fg(MUTED))];
    if let Some(notice) = &view.notice {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(notice.as_str(), Style::default().fg(ACCENT)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
