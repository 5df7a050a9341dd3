use autoreq_core::{AppViewModel, ABOUT, SERVICES};
use ratatui::layout::{Constraint, Layout, Rect};

/// Screen regions, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    pub hero: Rect,
    pub form: Rect,
    pub outcome: Rect,
    pub brands: Rect,
    pub services: Rect,
    pub about: Rect,
    pub footer: Rect,
}

const HERO_HEIGHT: u16 = 4;
const FORM_HEIGHT: u16 = 3;
const BRANDS_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 1;

pub fn split(area: Rect, view: &AppViewModel) -> ScreenAreas {
    // Spare rows go to the result panel when there is one, else below the sections.
    let (outcome, spacer) = if view.result_panel.is_some() {
        (Constraint::Fill(1), Constraint::Length(0))
    } else {
        (
            Constraint::Length(outcome_line_count(view)),
            Constraint::Fill(1),
        )
    };
    let [hero, form, outcome, brands, services, about, _spacer, footer] = Layout::vertical([
        Constraint::Length(HERO_HEIGHT),
        Constraint::Length(FORM_HEIGHT),
        outcome,
        Constraint::Length(BRANDS_HEIGHT),
        Constraint::Length(bordered_height(services_rows(area.width))),
        Constraint::Length(bordered_height(about_rows(area.width))),
        spacer,
        Constraint::Length(FOOTER_HEIGHT),
    ])
    .areas(area);

    ScreenAreas {
        hero,
        form,
        outcome,
        brands,
        services,
        about,
        footer,
    }
}

fn outcome_line_count(view: &AppViewModel) -> u16 {
    u16::from(view.error.is_some()) + u16::from(view.validation.is_some())
}

/// Each service is a title row plus its indented, wrapped description.
fn services_rows(width: u16) -> usize {
    let inner = inner_width(width);
    SERVICES
        .iter()
        .map(|service| 1 + wrapped_rows(service.description.chars().count() + 2, inner))
        .sum()
}

/// Paragraphs are followed by a blank row; info cards are a title row plus description.
fn about_rows(width: u16) -> usize {
    let inner = inner_width(width);
    let paragraphs: usize = ABOUT
        .paragraphs
        .iter()
        .map(|paragraph| wrapped_rows(paragraph.chars().count(), inner) + 1)
        .sum();
    let cards: usize = ABOUT
        .infos
        .iter()
        .map(|card| 1 + wrapped_rows(card.description.chars().count() + 2, inner))
        .sum();
    paragraphs + cards
}

fn inner_width(width: u16) -> usize {
    usize::from(width.saturating_sub(2)).max(1)
}

// Word wrapping can leave a short tail, so round up by a whole row.
fn wrapped_rows(chars: usize, inner: usize) -> usize {
    chars / inner + 1
}

fn bordered_height(lines: usize) -> u16 {
    u16::try_from(lines).unwrap_or(u16::MAX).saturating_add(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoreq_core::ResultPanelView;

    #[test]
    fn result_panel_takes_the_spare_rows() {
        let area = Rect::new(0, 0, 100, 60);
        let without = split(area, &AppViewModel::default());
        assert_eq!(without.outcome.height, 0);
        assert_eq!(without.footer.y, 59);

        let view = AppViewModel {
            result_panel: Some(ResultPanelView {
                title: "requirements.txt".into(),
                manifest: "flask\n".into(),
            }),
            ..AppViewModel::default()
        };
        let with = split(area, &view);
        assert!(with.outcome.height >= 4);
        assert_eq!(with.footer.y + with.footer.height, 60);
    }

    #[test]
    fn about_fits_paragraphs_and_info_cards() {
        let areas = split(Rect::new(0, 0, 160, 60), &AppViewModel::default());
        let minimum = ABOUT.paragraphs.len() * 2 + ABOUT.infos.len() * 2;
        assert!(usize::from(areas.about.height) >= minimum + 2);

        let narrow = split(Rect::new(0, 0, 60, 80), &AppViewModel::default());
        assert!(narrow.about.height > areas.about.height);
        assert!(narrow.services.height > areas.services.height);
    }

    #[test]
    fn error_line_gets_one_row() {
        let view = AppViewModel {
            error: Some("boom".into()),
            ..AppViewModel::default()
        };
        assert_eq!(split(Rect::new(0, 0, 80, 40), &view).outcome.height, 1);
    }
}
