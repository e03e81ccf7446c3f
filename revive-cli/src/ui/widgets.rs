use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget, Wrap},
};

use crate::models::{Challenge, Member, Program};
use crate::session::LOADING_PLACEHOLDER;
use crate::sync::{GridCell, MonthGrid, StatusBanner};

fn panel(title: &str, is_selected: bool) -> Block<'_> {
    let border_style = if is_selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };

    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border_style)
}

/// Render profile header
pub fn render_profile(area: Rect, buf: &mut Buffer, member: &Member, date_format: &str) {
    let block = panel(" 👤 Profile ", false);
    let inner = block.inner(area);
    block.render(area, buf);

    let label = Style::default().fg(Color::Gray);
    let lines = vec![
        Line::from(Span::styled(
            format!("Welcome, {}", member.name),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("Email:  ", label),
            Span::raw(member.email.clone()),
        ]),
        Line::from(vec![
            Span::styled("Joined: ", label),
            Span::raw(member.join_date_label(date_format)),
        ]),
        Line::from(vec![
            Span::styled("Photo:  ", label),
            Span::raw(member.profile_photo_url.clone().unwrap_or_else(|| "-".to_string())),
        ]),
    ];

    Paragraph::new(lines).render(inner, buf);
}

/// Render attendance calendar
pub fn render_calendar(
    area: Rect,
    buf: &mut Buffer,
    grid: &MonthGrid,
    month_total: usize,
    is_selected: bool,
) {
    let title = format!(" 📅 {} ", grid.cursor.title());
    let block = panel(&title, is_selected);
    let inner = block.inner(area);
    block.render(area, buf);

    let mut lines = vec![Line::from(Span::styled(
        grid.header.iter().map(|d| format!("{:>4}", d)).collect::<String>(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ))];

    for week in grid.weeks() {
        let spans: Vec<Span> = week
            .iter()
            .map(|cell| match cell {
                GridCell::Blank => Span::raw("    "),
                GridCell::Day(day) => {
                    let mut style = Style::default().fg(Color::Gray);
                    if day.attended {
                        style = style.fg(Color::Black).bg(Color::Yellow);
                    }
                    if day.today {
                        style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
                    }
                    let marker = if day.attended { "•" } else { " " };
                    Span::styled(format!("{:>3}{}", day.day, marker), style)
                }
            })
            .collect();
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Total this month: ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{} days", month_total),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
    ]));

    Paragraph::new(lines).render(inner, buf);
}

/// Render a program list (enrolled or available)
pub fn render_programs(
    area: Rect,
    buf: &mut Buffer,
    title: &str,
    programs: &[&Program],
    selected_index: usize,
    is_selected: bool,
    empty_text: &str,
) {
    let block = panel(title, is_selected);
    let inner = block.inner(area);
    block.render(area, buf);

    if programs.is_empty() {
        Paragraph::new(empty_text)
            .style(Style::default().fg(Color::Gray))
            .render(inner, buf);
        return;
    }

    let items: Vec<ListItem> = programs
        .iter()
        .enumerate()
        .map(|(idx, program)| {
            let line_style = if is_selected && idx == selected_index {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let content = format!(
                "{}  ·  {}  ·  {}",
                program.name,
                program.price_label(),
                program.duration_label()
            );

            ListItem::new(Line::from(Span::styled(content, line_style)))
        })
        .collect();

    List::new(items).render(inner, buf);
}

/// Render current challenge panel
pub fn render_challenge(
    area: Rect,
    buf: &mut Buffer,
    challenge: Option<&Challenge>,
    joined: bool,
    is_selected: bool,
) {
    let block = panel(" 🏆 Current Challenge ", is_selected);
    let inner = block.inner(area);
    block.render(area, buf);

    let Some(challenge) = challenge else {
        Paragraph::new("No active challenges at the moment.")
            .style(Style::default().fg(Color::Gray))
            .render(inner, buf);
        return;
    };

    let (action, color) = if joined {
        ("[Enter] Leave Challenge", Color::Red)
    } else {
        ("[Enter] Join Challenge", Color::Green)
    };

    let lines = vec![
        Line::from(Span::styled(
            challenge.title.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(challenge.description.clone()),
        Line::from(""),
        Line::from(Span::styled(action, Style::default().fg(color))),
    ];

    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .render(inner, buf);
}

/// Full-screen message while loading or after a failed load
pub fn render_placeholder(area: Rect, buf: &mut Buffer, text: Option<&str>) {
    let (text, color) = match text {
        Some(error) => (error, Color::Red),
        None => (LOADING_PLACEHOLDER, Color::Gray),
    };

    Paragraph::new(text)
        .style(Style::default().fg(color))
        .block(Block::default().borders(Borders::ALL).title(" Membership "))
        .render(area, buf);
}

/// Render help overlay
pub fn render_help_overlay(area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" ❓ Help ")
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(area);
    block.render(area, buf);

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Calendar:", Style::default().fg(Color::Cyan))),
        Line::from("  ←/h      - Previous month"),
        Line::from("  →/l      - Next month"),
        Line::from("  t        - Back to today"),
        Line::from(""),
        Line::from(Span::styled("Navigation:", Style::default().fg(Color::Cyan))),
        Line::from("  Tab      - Next panel"),
        Line::from("  Shift+Tab - Previous panel"),
        Line::from("  ↑/k ↓/j  - Move selection"),
        Line::from(""),
        Line::from(Span::styled("Actions:", Style::default().fg(Color::Cyan))),
        Line::from("  Enter    - Join / leave the selected program or challenge"),
        Line::from("  r        - Reload"),
        Line::from(""),
        Line::from(Span::styled("Other:", Style::default().fg(Color::Cyan))),
        Line::from("  ?        - Toggle this help"),
        Line::from("  q        - Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press ? or ESC to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    Paragraph::new(help_text).render(inner, buf);
}

/// Render status bar at bottom
pub fn render_status_bar(area: Rect, buf: &mut Buffer, banner: Option<&StatusBanner>, in_flight: usize) {
    let activity = if in_flight > 0 {
        Span::styled(
            format!(" ⏳ {} pending ", in_flight),
            Style::default().fg(Color::Yellow).bg(Color::DarkGray),
        )
    } else {
        Span::styled(" ✓ Up to date ", Style::default().fg(Color::Green).bg(Color::DarkGray))
    };

    let mut spans = vec![activity];

    if let Some(banner) = banner {
        let color = if banner.is_error() { Color::Red } else { Color::Green };
        spans.push(Span::styled(
            format!(" {} ", banner.text),
            Style::default().fg(color).bg(Color::DarkGray),
        ));
    }

    spans.push(Span::styled(
        " Press ? for help ",
        Style::default().fg(Color::Gray).bg(Color::DarkGray),
    ));

    Paragraph::new(Line::from(spans)).render(area, buf);
}
