// File: src/tui/view.rs
use crate::model::display::{day_badge, format_date, format_date_time, format_time, initials, preview, rating};
use crate::model::{Booking, BookingStatus};
use crate::router::{Route, Screen};
use crate::session::{Account, Role};
use crate::tui::form::{FieldKind, Form};
use crate::tui::state::{AppState, InputMode};
use crate::views::bookings::actions_for;
use crate::views::dashboard::{AdminDashboard, Dashboard, TherapistDashboard, UserDashboard};
use crate::views::journals::LIST_PREVIEW;
use crate::views::motivation::CONTENT_PREVIEW;
use crate::views::therapists::BIO_PREVIEW;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

fn status_color(status: BookingStatus) -> Color {
    match status {
        BookingStatus::Scheduled => Color::Blue,
        BookingStatus::Completed => Color::Green,
        BookingStatus::Cancelled => Color::Red,
        BookingStatus::NoShow => Color::Yellow,
    }
}

fn bold(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn highlight() -> Style {
    Style::default().bg(Color::Blue).fg(Color::White)
}

pub fn draw(f: &mut Frame, state: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    draw_header(f, state, chunks[0]);

    match state.screen {
        Screen::Login | Screen::Register | Screen::JournalForm(_) | Screen::BookSession => {
            draw_form_screen(f, state, chunks[1])
        }
        Screen::Dashboard(_) => draw_dashboard(f, state, chunks[1]),
        Screen::JournalList => draw_journals(f, state, chunks[1]),
        Screen::SessionList => draw_sessions(f, state, chunks[1]),
        Screen::TherapistDirectory => draw_directory(f, state, chunks[1]),
        Screen::Motivation => draw_motivation(f, state, chunks[1]),
        Screen::Profile => draw_profile(f, state, chunks[1]),
    }

    draw_footer(f, state, chunks[2]);

    if let InputMode::ConfirmDelete(id) = state.mode {
        let area = centered_rect(50, 20, f.area());
        let title = state
            .journals
            .entries()
            .iter()
            .find(|j| j.id == id)
            .map(|j| j.title.clone())
            .unwrap_or_default();
        let p = Paragraph::new(vec![
            Line::from(""),
            Line::from(format!("Delete \"{}\"?", title)),
            Line::from(""),
            Line::from(vec![
                Span::styled(" [y] ", bold(Color::Red)),
                Span::raw("Delete    "),
                Span::styled(" [any] ", bold(Color::Yellow)),
                Span::raw("Keep"),
            ]),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::LightRed))
                .title(" Confirm "),
        );
        f.render_widget(Clear, area);
        f.render_widget(p, area);
    }

    if state.show_help {
        let area = centered_rect(70, 60, f.area());
        let p = Paragraph::new(help_text())
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(" Help "));
        f.render_widget(Clear, area);
        f.render_widget(p, area);
    }
}

fn help_text() -> Vec<Line<'static>> {
    let section = |name: &'static str, color: Color, keys: &'static str| {
        Line::from(vec![Span::styled(name, bold(color)), Span::raw(keys)])
    };
    vec![
        section(" GLOBAL ", Color::Cyan, " 1-9:Menu  r:Reload  ?:Help  O:Sign out  q:Quit"),
        section(" NAVIGATION ", Color::Yellow, " j/k:Up/Down  Enter:Open"),
        section(" FORMS ", Color::Green, " Tab/Shift-Tab:Field  Left/Right:Choice  Enter:Save  Esc:Cancel"),
        section("       ", Color::Green, " F2:Switch sign in / create account"),
        section(" JOURNALS ", Color::Magenta, " a:New  e:Edit  d:Delete  f:Mood filter"),
        section(" SESSIONS ", Color::Blue, " f:Status filter  b:Book  c:Complete  n:No show  x:Cancel"),
        section(" THERAPISTS ", Color::LightCyan, " /:Search  s:Specialization  b:Book"),
        section(" MOTIVATION ", Color::LightYellow, " /:Search  f:Type filter"),
        section(" PROFILE ", Color::LightGreen, " e:Edit  a:Toggle availability"),
    ]
}

fn draw_header(f: &mut Frame, state: &AppState, area: Rect) {
    let mut spans = vec![Span::styled(" MindConnect ", bold(Color::Cyan))];
    if let Some(identity) = state.session.identity() {
        for (i, (route, label)) in Route::menu(identity.role).iter().enumerate() {
            let current = *route == state.route
                || (matches!(route, Route::Journals)
                    && matches!(state.route, Route::JournalNew | Route::JournalEdit(_)));
            let style = if current {
                highlight()
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::raw(" "));
            spans.push(Span::styled(format!("{}:{}", i + 1, label), style));
        }
    }
    let title = match state.session.identity() {
        Some(identity) => format!(
            " {} ({}) {} ",
            identity.account.display_name(),
            identity.role,
            state.route.path()
        ),
        None => format!(" {} ", state.route.path()),
    };
    let p = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(p, area);
}

fn draw_footer(f: &mut Frame, state: &AppState, area: Rect) {
    let status = if let Some(err) = &state.error {
        Paragraph::new(Span::styled(err.clone(), bold(Color::Red)))
            .block(Block::default().borders(Borders::ALL).title(" Error "))
    } else {
        let text = if state.loading {
            "Loading...".to_string()
        } else {
            state.message.clone()
        };
        Paragraph::new(text).block(Block::default().borders(Borders::ALL).title(" Status "))
    };

    let hints = match (state.mode, state.screen) {
        (InputMode::Editing, Screen::Login | Screen::Register) => {
            "Tab:Next  Enter:Submit  F2:Switch  Ctrl-C:Quit"
        }
        (InputMode::Editing, _) => "Tab:Next  Left/Right:Choice  Enter:Save  Esc:Cancel",
        (InputMode::Searching, _) => "Type to search  Enter:Done  Esc:Clear",
        (InputMode::ConfirmDelete(_), _) => "y:Delete  any:Keep",
        (InputMode::Normal, Screen::JournalList) => "a:New  e:Edit  d:Delete  f:Filter  ?:Help",
        (InputMode::Normal, Screen::SessionList) => "f:Filter  b:Book  c/n/x:Status  ?:Help",
        (InputMode::Normal, Screen::TherapistDirectory) => "/:Search  s:Specialization  b:Book",
        (InputMode::Normal, Screen::Motivation) => "/:Search  f:Type  ?:Help",
        (InputMode::Normal, Screen::Profile) => "e:Edit  ?:Help  O:Sign out",
        _ => "1-9:Menu  r:Reload  ?:Help  q:Quit",
    };
    let help = Paragraph::new(hints)
        .alignment(Alignment::Right)
        .block(Block::default().borders(Borders::ALL).title(" Keys "));

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);
    f.render_widget(status, chunks[0]);
    f.render_widget(help, chunks[1]);
}

fn placeholder(f: &mut Frame, area: Rect, title: &str, text: &str) {
    let p = Paragraph::new(Span::styled(text.to_string(), Style::default().fg(Color::DarkGray)))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(format!(" {} ", title)));
    f.render_widget(p, area);
}

// --- Forms ---

fn draw_form(f: &mut Frame, form: &Form, area: Rect) {
    let label_width = form
        .fields
        .iter()
        .map(|field| field.label.width())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::new();
    let mut cursor = None;
    for (row, (idx, field)) in form.visible_fields().into_iter().enumerate() {
        let focused = idx == form.focus;
        let pad = " ".repeat(label_width.saturating_sub(field.label.width()));
        let label_style = if focused {
            bold(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        };
        let value_style = match field.kind {
            FieldKind::ReadOnly => Style::default().fg(Color::DarkGray),
            FieldKind::Choice(_) if focused => bold(Color::Cyan),
            _ if focused => Style::default().add_modifier(Modifier::UNDERLINED),
            _ => Style::default(),
        };
        let prefix = format!(" {}{} : ", field.label, pad);
        if focused && matches!(field.kind, FieldKind::Text | FieldKind::Secret) {
            let before: String = field.value.chars().take(form.cursor).collect();
            let typed = if field.kind == FieldKind::Secret {
                before.chars().count()
            } else {
                before.width()
            };
            cursor = Some((prefix.width() + typed, row));
        }
        lines.push(Line::from(vec![
            Span::styled(prefix, label_style),
            Span::styled(field.display(), value_style),
        ]));
    }

    let p = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(format!(" {} ", form.title)),
    );
    f.render_widget(p, area);

    if let Some(pos) = cursor.and_then(|(x, y)| cursor_cell(area, x, y)) {
        f.set_cursor_position(pos);
    }
}

/// Terminal cell for a cursor at column `x`, row `y` inside the bordered `area`.
/// `None` when it falls outside, however long the field is.
fn cursor_cell(area: Rect, x: usize, y: usize) -> Option<(u16, u16)> {
    let x = area.x.saturating_add(1).saturating_add(u16::try_from(x).ok()?);
    let y = area.y.saturating_add(1).saturating_add(u16::try_from(y).ok()?);
    (x < area.right() && y < area.bottom()).then_some((x, y))
}

fn draw_form_screen(f: &mut Frame, state: &AppState, area: Rect) {
    match &state.form {
        Some(form) => draw_form(f, form, area),
        None if state.loading => placeholder(f, area, "Please wait", "Loading..."),
        None => placeholder(f, area, "Form", "Nothing to edit. Press r to retry."),
    }
}

// --- Dashboards ---

fn stat_line(stats: &[(&str, usize)]) -> Line<'static> {
    let mut spans = Vec::new();
    for (label, n) in stats {
        spans.push(Span::styled(format!(" {} ", n), bold(Color::Cyan)));
        spans.push(Span::raw(format!("{}   ", label)));
    }
    Line::from(spans)
}

fn booking_lines(booking: &Booking, viewer: Option<Role>) -> Vec<Line<'static>> {
    let (day, month) = day_badge(&booking.session_date);
    let who = if viewer == Some(Role::Therapist) {
        booking.user.full_name()
    } else {
        booking.therapist.display_name()
    };
    let kind = booking
        .session_type
        .map(|k| k.to_string())
        .unwrap_or_default();
    let mut lines = vec![Line::from(vec![
        Span::styled(format!("[{:>2} {}] ", day, month), bold(Color::Magenta)),
        Span::raw(format!("{}  ", format_time(&booking.session_date))),
        Span::styled(who, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!("  {}  {} min  ", kind, booking.duration)),
        Span::styled(
            booking.status.to_string(),
            Style::default().fg(status_color(booking.status)),
        ),
    ])];
    if let Some(notes) = booking.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        lines.push(Line::from(Span::styled(
            format!("         {}", preview(notes, 80)),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}

fn booking_item(booking: &Booking, viewer: Option<Role>) -> ListItem<'static> {
    ListItem::new(booking_lines(booking, viewer))
}

fn draw_dashboard(f: &mut Frame, state: &mut AppState, area: Rect) {
    let Some(dashboard) = state.dashboard.clone() else {
        let text = if state.loading { "Loading..." } else { "No data. Press r to reload." };
        placeholder(f, area, "Dashboard", text);
        return;
    };
    match &dashboard {
        Dashboard::EndUser(d) => draw_user_dashboard(f, state, d, area),
        Dashboard::Therapist(d) => draw_therapist_dashboard(f, state, d, area),
        Dashboard::Admin(d) => draw_admin_dashboard(f, state, d, area),
    }
}

fn draw_user_dashboard(f: &mut Frame, state: &mut AppState, d: &UserDashboard, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(3),
        ])
        .split(area);

    let name = state
        .session
        .identity()
        .map(|i| i.account.first_name().to_string())
        .unwrap_or_default();
    let stats = Paragraph::new(stat_line(&[
        ("Journal entries", d.journal_count),
        ("Upcoming sessions", d.upcoming_count),
        ("Completed sessions", d.completed_count),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Welcome back, {} ", name)),
    );
    f.render_widget(stats, chunks[0]);

    let quote = match &d.motivation {
        Some(m) => {
            let mut lines = vec![Line::from(Span::styled(
                format!("{} {}", m.icon(), m.title),
                bold(Color::LightYellow),
            ))];
            lines.push(Line::from(preview(&m.content, CONTENT_PREVIEW)));
            if let Some(author) = &m.author {
                lines.push(Line::from(Span::styled(
                    format!("- {}", author),
                    Style::default().fg(Color::Gray),
                )));
            }
            Paragraph::new(lines)
        }
        None => Paragraph::new(Span::styled(
            "No motivational content yet.",
            Style::default().fg(Color::DarkGray),
        )),
    };
    f.render_widget(
        quote
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(" Daily Motivation ")),
        chunks[1],
    );

    let lists = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);

    let journals: Vec<ListItem> = if d.recent_journals.is_empty() {
        vec![ListItem::new(Span::styled(
            "No entries yet. Open Journals (2) and press a.",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        d.recent_journals
            .iter()
            .map(|j| {
                let date = j.created_at.as_ref().map(format_date).unwrap_or_default();
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{} ", j.mood_indicator())),
                    Span::styled(j.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(format!("  {}", date), Style::default().fg(Color::Gray)),
                ]))
            })
            .collect()
    };
    let list = List::new(journals)
        .block(Block::default().borders(Borders::ALL).title(" Recent Journals "))
        .highlight_style(highlight());
    f.render_stateful_widget(list, lists[0], &mut state.list_state);

    let upcoming: Vec<ListItem> = if d.upcoming.is_empty() {
        vec![ListItem::new(Span::styled(
            "No upcoming sessions.",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        d.upcoming
            .iter()
            .map(|b| booking_item(b, Some(Role::EndUser)))
            .collect()
    };
    f.render_widget(
        List::new(upcoming).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Upcoming Sessions "),
        ),
        lists[1],
    );
}

fn draw_therapist_dashboard(
    f: &mut Frame,
    state: &mut AppState,
    d: &TherapistDashboard,
    area: Rect,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let stats = Paragraph::new(stat_line(&[
        ("Total", d.total),
        ("Today", d.today_count),
        ("Upcoming", d.upcoming_count),
        ("Completed", d.completed_count),
    ]))
    .block(Block::default().borders(Borders::ALL).title(" Practice "));
    f.render_widget(stats, chunks[0]);

    let mut items = Vec::new();
    items.extend(d.today.iter().map(|b| booking_item(b, Some(Role::Therapist))));
    items.extend(d.upcoming.iter().map(|b| booking_item(b, Some(Role::Therapist))));
    let title = format!(
        " Today ({}) then Upcoming ({}) ",
        d.today.len(),
        d.upcoming.len()
    );
    if items.is_empty() {
        placeholder(f, chunks[1], title.trim(), "No sessions scheduled.");
        return;
    }
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(highlight());
    f.render_stateful_widget(list, chunks[1], &mut state.list_state);
}

fn draw_admin_dashboard(f: &mut Frame, state: &mut AppState, d: &AdminDashboard, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let stats = Paragraph::new(stat_line(&[
        ("Users", d.user_count),
        ("Therapists", d.therapist_count),
        ("Sessions", d.booking_count),
        ("Journal entries", d.journal_count),
    ]))
    .block(Block::default().borders(Borders::ALL).title(" Platform "));
    f.render_widget(stats, chunks[0]);

    let lists = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    let users: Vec<ListItem> = d
        .recent_users
        .iter()
        .map(|u| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("[{}] ", initials(&u.first_name, &u.last_name)),
                    bold(Color::Magenta),
                ),
                Span::raw(u.full_name()),
                Span::styled(format!("  {}", u.email), Style::default().fg(Color::Gray)),
            ]))
        })
        .collect();
    let list = List::new(users)
        .block(Block::default().borders(Borders::ALL).title(" Recent Users "))
        .highlight_style(highlight());
    f.render_stateful_widget(list, lists[0], &mut state.list_state);

    let bookings: Vec<ListItem> = d
        .recent_bookings
        .iter()
        .map(|b| {
            ListItem::new(Line::from(vec![
                Span::raw(format!(
                    "{} with {}  {}  ",
                    b.user.full_name(),
                    b.therapist.display_name(),
                    format_date(&b.session_date)
                )),
                Span::styled(b.status.to_string(), Style::default().fg(status_color(b.status))),
            ]))
        })
        .collect();
    f.render_widget(
        List::new(bookings).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Recent Sessions "),
        ),
        lists[1],
    );
}

// --- Lists ---

fn draw_journals(f: &mut Frame, state: &mut AppState, area: Rect) {
    let title = format!(
        " My Journal ({}) mood: {} ",
        state.journals.visible().len(),
        state.journals.filter
    );
    let visible = state.journals.visible();
    if visible.is_empty() {
        let text = if state.loading {
            "Loading..."
        } else if state.journals.entries().is_empty() {
            "No journal entries yet. Press a to write your first one."
        } else {
            "No entries match this mood. Press f to change the filter."
        };
        placeholder(f, area, title.trim(), text);
        return;
    }

    let items: Vec<ListItem> = visible
        .iter()
        .map(|j| {
            let date = j.created_at.as_ref().map(format_date).unwrap_or_default();
            let mut lines = vec![
                Line::from(vec![
                    Span::raw(format!("{} ", j.mood_indicator())),
                    Span::styled(j.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(format!("  {}", date), Style::default().fg(Color::Gray)),
                ]),
                Line::from(Span::raw(format!("   {}", preview(&j.content, LIST_PREVIEW)))),
            ];
            let tags = j.tag_list();
            if !tags.is_empty() {
                let tag_spans: Vec<Span> = tags
                    .into_iter()
                    .map(|t| Span::styled(format!(" #{}", t), Style::default().fg(Color::Cyan)))
                    .collect();
                let mut spans = vec![Span::raw("  ")];
                spans.extend(tag_spans);
                lines.push(Line::from(spans));
            }
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(highlight());
    f.render_stateful_widget(list, area, &mut state.list_state);
}

fn draw_sessions(f: &mut Frame, state: &mut AppState, area: Rect) {
    let identity = state.session.identity();
    let role = identity.map(|i| i.role);
    let title = format!(
        " {} ({}) status: {} ",
        if role == Some(Role::Therapist) { "My Sessions" } else { "Sessions" },
        state.sessions.visible().len(),
        state.sessions.filter
    );
    let visible = state.sessions.visible();
    if visible.is_empty() {
        let text = if state.loading {
            "Loading..."
        } else if role == Some(Role::EndUser) {
            "No sessions here. Press b to book one."
        } else {
            "No sessions here."
        };
        placeholder(f, area, title.trim(), text);
        return;
    }

    let items: Vec<ListItem> = visible
        .iter()
        .map(|b| {
            let mut lines = booking_lines(b, role);
            let keys: Vec<String> = identity
                .map(|who| actions_for(who, b))
                .unwrap_or_default()
                .into_iter()
                .map(|a| format!("{}:{}", a.key(), a))
                .collect();
            if !keys.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("         {}", keys.join("  ")),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(highlight());
    f.render_stateful_widget(list, area, &mut state.list_state);
}

fn draw_directory(f: &mut Frame, state: &mut AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let searching = state.mode == InputMode::Searching;
    let specialty = state
        .directory
        .specialization
        .clone()
        .unwrap_or_else(|| "All".to_string());
    let search = Paragraph::new(Line::from(vec![
        Span::raw(state.directory.search.clone()),
        Span::styled(if searching { "_" } else { "" }, bold(Color::Yellow)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(if searching {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            })
            .title(format!(" Search (specialization: {}) ", specialty)),
    );
    f.render_widget(search, chunks[0]);

    let visible = state.directory.visible();
    let title = format!(" Therapists ({}) ", visible.len());
    if visible.is_empty() {
        let text = if state.loading { "Loading..." } else { "No therapists match." };
        placeholder(f, chunks[1], title.trim(), text);
        return;
    }

    let items: Vec<ListItem> = visible
        .iter()
        .map(|t| {
            let availability = if t.is_available() {
                Span::styled("Available", Style::default().fg(Color::Green))
            } else {
                Span::styled("Unavailable", Style::default().fg(Color::Red))
            };
            let mut header = vec![
                Span::styled(
                    format!("[{}] ", initials(&t.first_name, &t.last_name)),
                    bold(Color::Magenta),
                ),
                Span::styled(t.display_name(), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!("  {}  ", rating(t.rating))),
                availability,
            ];
            if !t.specialization_or_empty().is_empty() {
                header.insert(
                    2,
                    Span::styled(
                        format!("  {}", t.specialization_or_empty()),
                        Style::default().fg(Color::Cyan),
                    ),
                );
            }
            let mut lines = vec![Line::from(header)];
            let mut details = Vec::new();
            if let Some(q) = &t.qualification {
                details.push(q.clone());
            }
            if let Some(years) = t.experience {
                details.push(format!("{} years experience", years));
            }
            if !details.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("     {}", details.join("  ")),
                    Style::default().fg(Color::Gray),
                )));
            }
            if let Some(bio) = t.bio.as_deref().filter(|b| !b.trim().is_empty()) {
                lines.push(Line::from(format!("     {}", preview(bio, BIO_PREVIEW))));
            }
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(highlight());
    f.render_stateful_widget(list, chunks[1], &mut state.list_state);
}

fn draw_motivation(f: &mut Frame, state: &mut AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let searching = state.mode == InputMode::Searching;
    let search = Paragraph::new(Line::from(vec![
        Span::raw(state.motivation.search.clone()),
        Span::styled(if searching { "_" } else { "" }, bold(Color::Yellow)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(if searching {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            })
            .title(format!(" Search (type: {}) ", state.motivation.filter)),
    );
    f.render_widget(search, chunks[0]);

    let visible = state.motivation.visible();
    let title = format!(" Motivation ({}) ", visible.len());
    if visible.is_empty() {
        let text = if state.loading { "Loading..." } else { "Nothing matches." };
        placeholder(f, chunks[1], title.trim(), text);
        return;
    }

    let items: Vec<ListItem> = visible
        .iter()
        .map(|m| {
            let mut lines = vec![Line::from(vec![
                Span::raw(format!("{} ", m.icon())),
                Span::styled(m.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
            ])];
            lines.push(Line::from(format!("   {}", preview(&m.content, CONTENT_PREVIEW))));
            let mut meta = Vec::new();
            if let Some(author) = &m.author {
                meta.push(format!("- {}", author));
            }
            if let Some(category) = &m.category {
                meta.push(format!("#{}", category));
            }
            if !meta.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("   {}", meta.join("  ")),
                    Style::default().fg(Color::Gray),
                )));
            }
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(highlight());
    f.render_stateful_widget(list, chunks[1], &mut state.list_state);
}

fn draw_profile(f: &mut Frame, state: &AppState, area: Rect) {
    if let Some(form) = &state.form {
        draw_form(f, form, area);
        return;
    }
    let Some(identity) = state.session.identity() else {
        placeholder(f, area, "Profile", "Not signed in.");
        return;
    };

    let row = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!(" {:<20}", label), Style::default().fg(Color::Gray)),
            Span::raw(value),
        ])
    };
    let mut lines = vec![
        Line::from(Span::styled(
            format!(
                " [{}] {}",
                initials(identity.account.first_name(), identity.account.last_name()),
                identity.account.display_name()
            ),
            bold(Color::Cyan),
        )),
        Line::from(""),
        row("Email", identity.account.email().to_string()),
        row("Role", identity.role.to_string()),
    ];
    match &identity.account {
        Account::Client(u) => {
            lines.push(row("Phone", u.phone.clone().unwrap_or_default()));
            lines.push(row("Age", u.age.map(|a| a.to_string()).unwrap_or_default()));
            lines.push(row(
                "Emergency contact",
                u.emergency_contact.clone().unwrap_or_default(),
            ));
            if let Some(since) = &u.created_at {
                lines.push(row("Member since", format_date(since)));
            }
        }
        Account::Therapist(t) => {
            lines.push(row("Phone", t.phone.clone().unwrap_or_default()));
            lines.push(row("Specialization", t.specialization_or_empty().to_string()));
            lines.push(row("Qualification", t.qualification.clone().unwrap_or_default()));
            lines.push(row(
                "Experience",
                t.experience
                    .map(|y| format!("{} years", y))
                    .unwrap_or_default(),
            ));
            lines.push(row("Rating", rating(t.rating)));
            lines.push(row(
                "Availability",
                if t.is_available() {
                    "Accepting sessions (a to pause)".to_string()
                } else {
                    "Not accepting sessions (a to resume)".to_string()
                },
            ));
            if let Some(bio) = &t.bio {
                lines.push(Line::from(""));
                lines.push(Line::from(format!(" {}", bio)));
            }
            if let Some(since) = &t.created_at {
                lines.push(row("Member since", format_date_time(since)));
            }
        }
    }

    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Profile "));
    f.render_widget(p, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_cell_stays_inside_the_box() {
        let area = Rect::new(2, 3, 20, 5);
        assert_eq!(cursor_cell(area, 0, 0), Some((3, 4)));
        assert_eq!(cursor_cell(area, 17, 2), Some((20, 6)));
        assert_eq!(cursor_cell(area, 18, 0), Some((21, 4)));
        assert_eq!(cursor_cell(area, 19, 0), None);
        assert_eq!(cursor_cell(area, 70_000, 0), None);
        assert_eq!(cursor_cell(area, usize::MAX, usize::MAX), None);

        let edge = Rect::new(u16::MAX - 4, 0, 4, 4);
        assert_eq!(cursor_cell(edge, 60_000, 1), None);
    }
}
