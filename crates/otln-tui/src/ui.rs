//! UI rendering
//!
//! Items are drawn at their canvas positions, not as a flowed list: each
//! item's row comes straight from its `top_left().y`, so a half-finished
//! drag looks exactly like what the order query would see.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use otln_core::PositionalList;

use crate::app::{App, InputMode, View};

/// Main UI rendering function
///
/// Takes `&mut App` to record where the active canvas landed on screen;
/// mouse translation needs it.
pub fn draw(frame: &mut Frame, app: &mut App) {
    match app.view.clone() {
        View::Board => draw_board(frame, app),
        View::Topic(name) => draw_topic(frame, app, &name),
    }
}

fn draw_board(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.area());

    // Topic board
    let block = Block::default().title(" Topics ").borders(Borders::ALL);
    let inner = block.inner(chunks[0]);
    frame.render_widget(block, chunks[0]);
    app.canvas_area = inner;

    let selected = app.selected_topic();
    let dragging = app.dragging();
    let board = app.workspace.board();
    let labels: Vec<(otln_core::ItemId, f64, String)> = board
        .ordered()
        .iter()
        .map(|item| {
            let label = app
                .workspace
                .document()
                .topic(item.text())
                .map(|t| t.summary())
                .unwrap_or_else(|| item.text().to_string());
            (item.id(), item.top_left().y, label)
        })
        .collect();

    for (id, y, label) in labels {
        let style = if Some(id) == dragging {
            Style::default().add_modifier(Modifier::BOLD)
        } else if selected.as_deref() == app.workspace.board().get(id).map(|i| i.text()) {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        render_canvas_line(frame, inner, y, &label, style);
    }

    // Current note bar
    let note_text = match app.workspace.document().current_note() {
        Some(note) => note.to_string(),
        None => "No more notes.".to_string(),
    };
    let note = Paragraph::new(note_text)
        .wrap(Wrap { trim: false })
        .block(Block::default().title(" Current note ").borders(Borders::ALL));
    frame.render_widget(note, chunks[1]);

    draw_status(frame, app, chunks[2]);
}

fn draw_topic(frame: &mut Frame, app: &mut App, name: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    // Drop-to-remove strip above the canvas
    let strip_style = if app.removal_armed {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };
    let strip = Paragraph::new(" drop a note here to send it back to the queue ")
        .style(strip_style);
    frame.render_widget(strip, chunks[0]);

    let title = app
        .workspace
        .document()
        .topic(name)
        .map(|t| format!(" {} ", t.summary()))
        .unwrap_or_else(|| format!(" {} ", name));
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(chunks[1]);
    frame.render_widget(block, chunks[1]);
    app.canvas_area = inner;

    if let Some(list) = app.workspace.note_list(name) {
        let dragging = app.dragging();
        let lines: Vec<(bool, f64, String)> = ordered_lines(list, dragging);
        for (is_dragged, y, text) in lines {
            let style = if is_dragged {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            render_canvas_line(frame, inner, y, &text, style);
        }
    }

    draw_status(frame, app, chunks[2]);
}

fn ordered_lines(
    list: &PositionalList,
    dragging: Option<otln_core::ItemId>,
) -> Vec<(bool, f64, String)> {
    list.ordered()
        .iter()
        .map(|item| {
            (
                Some(item.id()) == dragging,
                item.top_left().y,
                item.text().to_string(),
            )
        })
        .collect()
}

/// Draw one canvas item as a single row inside `area`, clipped vertically
fn render_canvas_line(frame: &mut Frame, area: Rect, y: f64, text: &str, style: Style) {
    if y < 0.0 || area.height == 0 {
        return;
    }
    let row = y.round() as u16;
    if row >= area.height {
        return;
    }
    let line_area = Rect {
        x: area.x,
        y: area.y + row,
        width: area.width,
        height: 1,
    };
    frame.render_widget(Paragraph::new(Line::from(text.to_string())).style(style), line_area);
}

fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let text = match app.input_mode {
        InputMode::NewTopic => format!("New topic: {}_", app.input_buffer),
        InputMode::Normal => match (&app.status_message, &app.view) {
            (Some(msg), _) => msg.clone(),
            (None, View::Board) => {
                "j/k:select  Enter:open  a:file note  n/p:cycle  t:new topic  s:save  e:export  q:quit"
                    .to_string()
            }
            (None, View::Topic(_)) => {
                "drag notes with the mouse  Esc:back  s:save  q:quit".to_string()
            }
        },
    };
    frame.render_widget(Paragraph::new(text), area);
}
