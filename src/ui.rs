//! The UI renders the application state into something visible and clickable.
//!
//! The page view draws the laid-out rows at the current scroll offset with the fixed header on
//! top. While drawing, the position of every clickable element is recorded in `app.hits` so mouse
//! clicks can be dispatched against what is actually on screen.

use crate::app_state::{AppState, Hit, HitRegion, View};
use crate::form::FieldKind;
use crate::layout::{LayoutSurface, RowKind, HEADER_ROWS};
use crate::reveal::RevealTarget;
use crate::theme::Palette;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

const SCROLL_TOP_LABEL: &str = "[ ↑ Top ]";
const MENU_LABEL: &str = "≡ Menu";

/// Renders the active view based on current application state.
pub fn draw(f: &mut Frame, app: &mut AppState) {
    app.hits.clear();
    let palette = app.theme.palette();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());

    f.render_widget(
        Block::default().style(Style::default().bg(palette.background)),
        f.area(),
    );
    draw_page(f, app, chunks[0], &palette);
    if app.layout.header_height().is_some() {
        draw_header(f, app, chunks[0], &palette);
    }
    if app.scroll_top.visible {
        draw_scroll_top(f, app, chunks[0], &palette);
    }
    if app.current_view == View::Form {
        draw_form(f, app, chunks[0], &palette);
    }
    draw_footer(f, app, chunks[1], &palette);
}

fn draw_page(f: &mut Frame, app: &AppState, area: Rect, palette: &Palette) {
    let first = app.layout.row_at(app.viewport.offset());
    let lines: Vec<Line> = app
        .layout
        .rows()
        .iter()
        .skip(first)
        .take(usize::from(area.height))
        .map(|row| {
            let revealed = app.reveal.is_revealed(match row.section {
                Some(i) => RevealTarget::Section(i),
                None => RevealTarget::Hero,
            });
            let text_style = if revealed {
                Style::default().fg(palette.text)
            } else {
                Style::default().fg(palette.muted).add_modifier(Modifier::DIM)
            };
            match row.kind {
                RowKind::HeaderPadding | RowKind::Gap => Line::raw(""),
                RowKind::Heading => Line::from(vec![
                    Span::styled("§ ", Style::default().fg(palette.accent)),
                    Span::styled(
                        row.text.clone(),
                        Style::default()
                            .fg(palette.heading)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]),
                RowKind::Hero | RowKind::Body => Line::styled(row.text.clone(), text_style),
                RowKind::Image(index) => image_line(app, index, palette),
            }
        })
        .collect();

    f.render_widget(Paragraph::new(lines), area);
}

fn image_line(app: &AppState, index: usize, palette: &Palette) -> Line<'static> {
    match app.images.get(index) {
        Some(image) => match &image.src {
            Some(src) => Line::from(vec![
                Span::styled("▣ ", Style::default().fg(palette.accent)),
                Span::styled(image.alt.clone(), Style::default().fg(palette.text)),
                Span::styled(format!("  ({src})"), Style::default().fg(palette.muted)),
            ]),
            None => Line::styled(
                format!("░ {} (loading)", image.alt),
                Style::default().fg(palette.muted),
            ),
        },
        None => Line::raw(""),
    }
}

fn draw_header(f: &mut Frame, app: &mut AppState, page: Rect, palette: &Palette) {
    let area = Rect::new(page.x, page.y, page.width, HEADER_ROWS.min(page.height));
    let block = Block::default()
        .borders(Borders::ALL)
        .title(app.page.title.clone())
        .style(Style::default().bg(palette.background).fg(palette.text));
    let inner = block.inner(area);
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let mut spans = Vec::new();
    let mut x = inner.x;
    let collapsed = app.links_collapsed();

    if !collapsed {
        for (i, link) in app.links.iter().enumerate() {
            if i > 0 {
                let sep = Span::styled(" │ ", Style::default().fg(palette.muted));
                x = x.saturating_add(span_width(&sep));
                spans.push(sep);
            }
            let span = Span::styled(
                format!("{} {}", i + 1, link.label),
                link_style(link.active, app.menu.hovered() == Some(i), palette),
            );
            let width = span_width(&span);
            app.hits.push(HitRegion {
                area: Rect::new(x, inner.y, width, 1),
                hit: Hit::Link(i),
                in_menu: false,
            });
            x = x.saturating_add(width);
            spans.push(span);
        }
    }
    f.render_widget(Paragraph::new(Line::from(spans)), inner);

    let mut controls = vec![Span::styled(
        app.theme.icon(),
        Style::default().fg(palette.accent),
    )];
    if collapsed {
        let style = if app.menu.aria_expanded() {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::REVERSED)
        } else {
            Style::default().fg(palette.accent)
        };
        controls.push(Span::raw("  "));
        controls.push(Span::styled(MENU_LABEL, style));
    }
    let controls_width: u16 = controls.iter().map(span_width).sum();
    let controls_x = inner.right().saturating_sub(controls_width);
    let icon_width = span_width(&controls[0]);
    app.hits.push(HitRegion {
        area: Rect::new(controls_x, inner.y, icon_width, 1),
        hit: Hit::ThemeToggle,
        in_menu: false,
    });
    if collapsed {
        let menu_width = span_width(&controls[controls.len() - 1]);
        app.hits.push(HitRegion {
            area: Rect::new(inner.right().saturating_sub(menu_width), inner.y, menu_width, 1),
            hit: Hit::MenuButton,
            in_menu: false,
        });
    }
    f.render_widget(
        Paragraph::new(Line::from(controls)),
        Rect::new(controls_x, inner.y, controls_width.min(inner.width), 1),
    );

    if collapsed && app.menu.is_open() {
        draw_menu(f, app, page, palette);
    }
}

fn draw_menu(f: &mut Frame, app: &mut AppState, page: Rect, palette: &Palette) {
    let width = app
        .links
        .iter()
        .map(|l| u16::try_from(l.label.chars().count()).unwrap_or(u16::MAX))
        .max()
        .unwrap_or(0)
        .saturating_add(8)
        .min(page.width);
    let height = u16::try_from(app.links.len())
        .unwrap_or(u16::MAX)
        .saturating_add(2)
        .min(page.height.saturating_sub(HEADER_ROWS));
    let area = Rect::new(
        page.right().saturating_sub(width),
        page.y + HEADER_ROWS,
        width,
        height,
    );

    let items: Vec<ListItem> = app
        .links
        .iter()
        .enumerate()
        .map(|(i, link)| {
            ListItem::new(Line::styled(
                format!("{} {}", i + 1, link.label),
                link_style(link.active, app.menu.hovered() == Some(i), palette),
            ))
        })
        .collect();

    app.hits.push(HitRegion {
        area,
        hit: Hit::MenuPanel,
        in_menu: true,
    });
    let inner_y = area.y + 1;
    for i in 0..app.links.len() {
        let row = inner_y.saturating_add(u16::try_from(i).unwrap_or(u16::MAX));
        if row >= area.bottom().saturating_sub(1) {
            break;
        }
        app.hits.push(HitRegion {
            area: Rect::new(area.x + 1, row, width.saturating_sub(2), 1),
            hit: Hit::Link(i),
            in_menu: true,
        });
    }

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Menu")
            .style(Style::default().bg(palette.background).fg(palette.text)),
    );
    f.render_widget(Clear, area);
    f.render_widget(list, area);
}

fn draw_scroll_top(f: &mut Frame, app: &mut AppState, page: Rect, palette: &Palette) {
    let width = u16::try_from(SCROLL_TOP_LABEL.chars().count()).unwrap_or(u16::MAX);
    if page.width < width || page.height == 0 {
        return;
    }
    let area = Rect::new(page.right() - width, page.bottom() - 1, width, 1);
    app.hits.push(HitRegion {
        area,
        hit: Hit::ScrollTop,
        in_menu: false,
    });
    f.render_widget(
        Paragraph::new(Span::styled(
            SCROLL_TOP_LABEL,
            Style::default()
                .fg(palette.background)
                .bg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )),
        area,
    );
}

fn draw_form(f: &mut Frame, app: &AppState, page: Rect, palette: &Palette) {
    let width = page.width.saturating_sub(4).min(60);
    let height = page.height.saturating_sub(2).min(16);
    let area = Rect::new(
        page.x + (page.width - width) / 2,
        page.y + (page.height - height) / 2,
        width,
        height,
    );

    let mut lines = Vec::new();
    if let Some(notice) = app.form.success() {
        lines.push(Line::styled(
            notice.to_string(),
            Style::default()
                .fg(palette.success)
                .add_modifier(Modifier::BOLD),
        ));
        lines.push(Line::raw(""));
    }
    for (i, field) in app.form.fields().iter().enumerate() {
        if field.kind == FieldKind::Hidden {
            continue;
        }
        let focused = i == app.form.focus();
        let marker = if field.required { "*" } else { " " };
        let label_style = if focused {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.text)
        };
        let value_style = if field.error.is_some() {
            Style::default()
                .fg(palette.error)
                .add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default().fg(palette.text)
        };
        let cursor = if focused { "▏" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(format!("{}{marker} ", field.label), label_style),
            Span::styled(format!("{}{cursor}", field.value), value_style),
        ]));
        if let Some(error) = field.error {
            lines.push(Line::styled(
                format!("  {error}"),
                Style::default().fg(palette.error),
            ));
        }
        lines.push(Line::raw(""));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Contact")
        .style(Style::default().bg(palette.background).fg(palette.text));
    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_footer(f: &mut Frame, app: &AppState, area: Rect, palette: &Palette) {
    let help = if let Some(ref msg) = app.message {
        msg.clone()
    } else if app.current_view == View::Form {
        "Enter: Next/Send | Tab/Shift+Tab: Field | Ctrl+S: Send | Esc: Back".to_string()
    } else {
        let active = app
            .links
            .active()
            .map_or_else(|| "-".to_string(), |l| l.label.clone());
        format!(
            "↑/↓/PgUp/PgDn: Scroll | 1-9/Tab+Enter: Go | g: Top | t: Theme | m: Menu | c: Contact | q: Quit | [{active}]"
        )
    };
    f.render_widget(
        Paragraph::new(Line::styled(help, Style::default().fg(palette.muted))),
        area,
    );
}

fn link_style(active: bool, hovered: bool, palette: &Palette) -> Style {
    let mut style = if active {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.text)
    };
    if active || hovered {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    style
}

fn span_width(span: &Span) -> u16 {
    u16::try_from(span.width()).unwrap_or(u16::MAX)
}
