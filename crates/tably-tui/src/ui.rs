//! Rendering for the single-screen wizard.

use crate::app::{App, BasicsRow, BASICS_ROWS, CUISINES, OUTING_FILTERS};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use tably_core::sections::{self, SettingsKey};
use tably_core::steps::WizardStep;
use tably_core::wizard::AccessChoice;

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(3), // Header + breadcrumb
                Constraint::Min(0),    // Step body
                Constraint::Length(3), // Status line
            ]
            .as_ref(),
        )
        .split(f.area());

    // Header with breadcrumb and simulated address bar.
    let header = Paragraph::new(vec![Line::from(breadcrumb_spans(app))])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Tably · {}", app.location)),
        );
    f.render_widget(header, chunks[0]);

    // Step body.
    let body_lines = build_step_lines(app);
    let items = body_lines.into_iter().map(ListItem::new).collect::<Vec<_>>();
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(app.controller.current_step().title()),
    );
    f.render_widget(list, chunks[1]);

    // Status line.
    let status = Paragraph::new(status_message(app)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Status")
            .border_style(if app.error_message.is_some() {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            }),
    );
    f.render_widget(status, chunks[2]);
}

fn breadcrumb_spans(app: &App) -> Vec<Span<'static>> {
    let state = app.controller.state();
    let mut spans = Vec::new();
    for step in WizardStep::all() {
        let marker = if *step == state.current {
            "▶"
        } else if state.completed.contains(&step.ordinal()) {
            "✓"
        } else {
            "·"
        };
        let style = if *step == state.current {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else if state.completed.contains(&step.ordinal()) {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(
            format!(" {} {}. {} ", marker, step.ordinal(), step.title()),
            style,
        ));
    }
    spans
}

pub fn status_message(app: &App) -> String {
    if let Some(error) = &app.error_message {
        return format!("❌ {}", error);
    }
    if app.is_submitting {
        return "⏳ Creating your room...".to_string();
    }
    if app.controller.title_notice() {
        return "✍️ Give the room a name before moving on.".to_string();
    }
    app.status_message.clone()
}

/// Body lines for the current step; shared by the live UI and the text dump.
pub fn build_step_lines(app: &App) -> Vec<String> {
    match app.controller.current_step() {
        WizardStep::BasicInfo => basics_lines(app),
        WizardStep::Settings => settings_lines(app),
        WizardStep::Summary => summary_lines(app),
    }
}

fn basics_lines(app: &App) -> Vec<String> {
    let draft = &app.controller.draft;
    let mode = app.controller.mode();
    let title_set = !draft.title.trim().is_empty();
    let mut lines = Vec::new();

    for (row_idx, row) in BASICS_ROWS.iter().enumerate() {
        let cursor = if row_idx == app.cursor { "➤" } else { " " };
        match row {
            BasicsRow::Title => {
                lines.push(format!("{} 🏷️ Room name: {}_", cursor, draft.title));
            }
            BasicsRow::Mode => {
                let marker = section_marker(*row, app);
                let options = tably_core::MealMode::all()
                    .iter()
                    .enumerate()
                    .map(|(i, m)| option_label(m.label(), mode == Some(*m), row_idx == app.cursor && i == app.inner))
                    .collect::<Vec<_>>()
                    .join("  ");
                lines.push(format!("{} {} {}: {}", cursor, marker, sections::SectionKey::Mode.title(), options));
            }
            BasicsRow::OutingOptions => {
                lines.push(option_row_line(app, *row, row_idx, OUTING_FILTERS, &draft.outing_filters));
            }
            BasicsRow::CuisineChoice => {
                lines.push(option_row_line(app, *row, row_idx, CUISINES, &draft.cuisines));
            }
            BasicsRow::CookingIdeas => {
                let options: Vec<&str> = app.cooking_ideas.iter().map(String::as_str).collect();
                lines.push(option_row_line(app, *row, row_idx, &options, &draft.cooking_ideas));
            }
        }
    }

    if !title_set {
        lines.push(String::new());
        lines.push("✍️ Start by naming the room; everything else unlocks after.".to_string());
    }
    if app.suggestions_degraded {
        lines.push("⚠️ Suggestions are offline; showing the built-in list.".to_string());
    }
    lines.push(String::new());
    lines.push("⌨️ ↑/↓ row · ←/→ option · Space select · Enter next · Esc back".to_string());
    lines
}

/// Marker for a section's state: done, next actionable, locked, or pending.
fn section_marker(row: BasicsRow, app: &App) -> &'static str {
    let Some(key) = row.section_key() else {
        return " ";
    };
    let mode = app.controller.mode();
    let draft = &app.controller.draft;
    let title_set = !draft.title.trim().is_empty();
    if sections::is_disabled(key, mode, title_set) {
        "🔒"
    } else if draft.sections.get(key) {
        "✅"
    } else if sections::is_highlighted(key, mode, &draft.sections) {
        "👉"
    } else {
        "◻️"
    }
}

fn option_row_line(
    app: &App,
    row: BasicsRow,
    row_idx: usize,
    options: &[&str],
    selected: &[String],
) -> String {
    let marker = section_marker(row, app);
    let Some(key) = row.section_key() else {
        return String::new();
    };
    let rendered = options
        .iter()
        .enumerate()
        .map(|(i, opt)| {
            option_label(
                opt,
                selected.iter().any(|s| s == opt),
                row_idx == app.cursor && i == app.inner,
            )
        })
        .collect::<Vec<_>>()
        .join("  ");
    let cursor = if row_idx == app.cursor { "➤" } else { " " };
    format!("{} {} {}: {}", cursor, marker, key.title(), rendered)
}

fn option_label(label: &str, selected: bool, focused: bool) -> String {
    let check = if selected { "[x]" } else { "[ ]" };
    if focused {
        format!("{}«{}»", check, label)
    } else {
        format!("{} {}", check, label)
    }
}

fn settings_lines(app: &App) -> Vec<String> {
    let draft = &app.controller.draft;
    let mut lines = Vec::new();
    for (row_idx, key) in SettingsKey::all().iter().enumerate() {
        let cursor = if row_idx == app.cursor { "➤" } else { " " };
        let done = if draft.settings.get(*key) { "✅" } else { "◻️" };
        let value = match key {
            SettingsKey::Access => draft
                .access
                .map(AccessChoice::label)
                .unwrap_or("(choose)")
                .to_string(),
            SettingsKey::Timer => {
                if draft.settings.timer {
                    format!("{} minutes", draft.timer_minutes)
                } else {
                    "(set a limit)".to_string()
                }
            }
            SettingsKey::Reminders => {
                if draft.settings.reminders {
                    if draft.reminders { "On".to_string() } else { "Off".to_string() }
                } else {
                    "(decide)".to_string()
                }
            }
        };
        lines.push(format!("{} {} {}: {}", cursor, done, key.title(), value));
    }
    lines.push(String::new());
    lines.push("ℹ️ Touch all three settings to continue.".to_string());
    lines.push("⌨️ ↑/↓ row · ←/→ change · Enter next · Esc back".to_string());
    lines
}

fn summary_lines(app: &App) -> Vec<String> {
    let draft = &app.controller.draft;
    let mut lines = vec![
        format!("🏷️ Room: {}", draft.title),
        format!(
            "🍴 Mode: {}",
            app.controller
                .mode()
                .map(|m| m.label().to_string())
                .unwrap_or_else(|| "(none)".to_string())
        ),
    ];
    if !draft.outing_filters.is_empty() {
        lines.push(format!("📍 Filters: {}", draft.outing_filters.join(", ")));
    }
    if !draft.cuisines.is_empty() {
        lines.push(format!("🥡 Cuisines: {}", draft.cuisines.join(", ")));
    }
    if !draft.cooking_ideas.is_empty() {
        lines.push(format!("🍳 Dish ideas: {}", draft.cooking_ideas.join(", ")));
    }
    lines.push(format!("⏲️ Timer: {} minutes", draft.timer_minutes));

    lines.push(String::new());
    match &app.created {
        Some(room) => {
            lines.push(format!("🎉 Room created! Share code: {}", room.share_code));
            if app.show_share_hint {
                lines.push("💡 Tip: anyone with this code can join from the app.".to_string());
            }
        }
        None => {
            lines.push("⌨️ Press Enter to create the room and get a share code.".to_string());
        }
    }
    lines.push("⌨️ Esc back · q quit".to_string());
    lines
}

/// Plain-text render of one step, for `--dump-tui` inspection.
pub fn dump_step(app: &App) -> String {
    let lines = build_step_lines(app);
    format!(
        "STEP {}: {}\nLOCATION: {}\n{}\nSTATUS: {}\n",
        app.controller.current_step().ordinal(),
        app.controller.current_step().title(),
        app.location,
        lines.join("\n"),
        status_message(app),
    )
}
