//! ratatui rendering of the search view
//!
//! `draw` paints the whole screen from a [`SearchView`] and returns a
//! [`HitMap`] of the clickable regions it produced, so mouse dispatch can
//! work off the exact geometry of the last frame instead of re-deriving
//! layout rules.

use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::models::{bar_cells, decimal_percent, whole_percent, Document};
use crate::view::{Focus, SearchPhase, SearchView};

/// Terminal rows occupied by one result card (three content lines plus a
/// separator).
const CARD_HEIGHT: u16 = 4;
/// Cells in each score bar.
const BAR_WIDTH: u16 = 12;

pub const APP_TITLE: &str = "🧠 NeuralHybrid Search";
pub const APP_SUBTITLE: &str = "Advanced Information Retrieval System";
pub const INPUT_PLACEHOLDER: &str = "Search concepts (e.g., 'Economy', 'Deportes', 'अंतरिक्ष')...";
pub const NO_RESULTS_MESSAGE: &str = "No documents found matching your query.";
pub const LOADING_LABEL: &str = "Analyzing...";

/// Clickable regions of the detail modal.
#[derive(Debug, Clone, Copy)]
pub struct ModalHits {
    /// The modal body; pointer events inside it must not dismiss it.
    pub body: Rect,
    /// "Visit Original Article" action.
    pub visit: Rect,
    /// Explicit close action.
    pub close: Rect,
}

/// Clickable regions of the last rendered frame.
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    /// One rect per visible result card, with the card's result index.
    pub result_rows: Vec<(Rect, usize)>,
    /// Present while the modal is open.
    pub modal: Option<ModalHits>,
}

/// True if the cell at (`column`, `row`) lies inside `rect`.
pub fn hit(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

pub fn draw(frame: &mut Frame, view: &SearchView) -> HitMap {
    let mut hits = HitMap::default();

    let [header, input, meta, results, help] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_header(frame, header);
    draw_input(frame, input, view);
    draw_meta(frame, meta, view);
    draw_results(frame, results, view, &mut hits);
    draw_help(frame, help, view);

    if let Some(doc) = view.selected_document() {
        hits.modal = Some(draw_modal(frame, frame.area(), doc));
        // The modal captures the pointer; rows underneath are not targets.
        hits.result_rows.clear();
    }

    hits
}

fn draw_header(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::styled(APP_TITLE, Style::default().add_modifier(Modifier::BOLD)),
        Line::styled(APP_SUBTITLE, Style::default().fg(Color::DarkGray)),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_input(frame: &mut Frame, area: Rect, view: &SearchView) {
    let title = if view.is_loading() {
        Span::styled(
            format!(" {LOADING_LABEL} "),
            Style::default().fg(Color::Yellow),
        )
    } else {
        Span::raw(" Search ")
    };
    let block = Block::bordered().title(title);
    let inner = block.inner(area);

    let content = if view.input.is_empty() {
        Line::styled(INPUT_PLACEHOLDER, Style::default().fg(Color::DarkGray))
    } else {
        Line::raw(view.input.as_str())
    };
    frame.render_widget(Paragraph::new(content).block(block), area);

    if view.focus() == Focus::Input && view.selected_document().is_none() {
        let max_x = inner.width.saturating_sub(1) as usize;
        let cursor_x = inner.x + view.input.chars().count().min(max_x) as u16;
        frame.set_cursor_position(Position::new(cursor_x, inner.y));
    }
}

fn draw_meta(frame: &mut Frame, area: Rect, view: &SearchView) {
    let line = match view.phase() {
        SearchPhase::Idle => Line::styled(
            "Type a query and press Enter.",
            Style::default().fg(Color::DarkGray),
        ),
        SearchPhase::Loading { query } => Line::styled(
            format!("{LOADING_LABEL} \"{query}\""),
            Style::default().fg(Color::Yellow),
        ),
        SearchPhase::Failed { message } => {
            Line::styled(message.as_str(), Style::default().fg(Color::Red))
        }
        SearchPhase::Success(response) => {
            let lang = &response.query_detected_lang;
            Line::from(vec![
                Span::raw("Query Detected: "),
                Span::raw(lang.flag()),
                Span::styled(
                    format!(" {}", lang.name()),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  ·  Showing top {} results", response.results.len()),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        }
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_results(frame: &mut Frame, area: Rect, view: &SearchView, hits: &mut HitMap) {
    let results = view.results();
    match view.phase() {
        SearchPhase::Success(_) if results.is_empty() => {
            frame.render_widget(
                Paragraph::new(NO_RESULTS_MESSAGE).style(Style::default().fg(Color::DarkGray)),
                area,
            );
        }
        SearchPhase::Success(_) => {
            let visible = (area.height / CARD_HEIGHT) as usize;
            if visible == 0 {
                return;
            }
            let offset = view.cursor().saturating_sub(visible - 1);
            for (slot, index) in (offset..results.len()).take(visible).enumerate() {
                let card = Rect {
                    x: area.x,
                    y: area.y + slot as u16 * CARD_HEIGHT,
                    width: area.width,
                    height: CARD_HEIGHT.min(area.height - slot as u16 * CARD_HEIGHT),
                };
                draw_card(frame, card, &results[index], index == view.cursor(), view);
                hits.result_rows.push((card, index));
            }
        }
        _ => {}
    }
}

fn draw_card(frame: &mut Frame, area: Rect, doc: &Document, highlighted: bool, view: &SearchView) {
    let marker = if highlighted && view.focus() == Focus::Results {
        "▶ "
    } else {
        "  "
    };
    let title_style = if highlighted {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let lines = vec![
        Line::from(vec![
            Span::raw(marker),
            Span::raw(doc.lang.flag()),
            Span::raw(" "),
            Span::styled(doc.title.as_str(), title_style),
            Span::styled(
                format!("  {}% Match", whole_percent(doc.score)),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::styled(
            format!("  {}", doc.snippet()),
            Style::default().fg(Color::Gray),
        ),
        Line::from(vec![
            Span::raw("  Semantic (AI) "),
            bar_span(doc.semantic_score, Color::Magenta),
            Span::raw(format!(" {}%", whole_percent(doc.semantic_score))),
            Span::raw("   Keyword (BM25) "),
            bar_span(doc.bm25_score, Color::Blue),
            Span::raw(format!(" {}%", whole_percent(doc.bm25_score))),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn bar_span(score: f64, color: Color) -> Span<'static> {
    let filled = bar_cells(score, BAR_WIDTH) as usize;
    let empty = (BAR_WIDTH as usize).saturating_sub(filled);
    Span::styled(
        format!("{}{}", "█".repeat(filled), "░".repeat(empty)),
        Style::default().fg(color),
    )
}

fn draw_help(frame: &mut Frame, area: Rect, view: &SearchView) {
    let text = if view.selected_document().is_some() {
        "o open original · Esc close"
    } else {
        "Enter search · Tab switch pane · ↑/↓ select · Enter open · Esc quit"
    };
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn draw_modal(frame: &mut Frame, area: Rect, doc: &Document) -> ModalHits {
    let body = centered_rect(area, 70, 70);
    frame.render_widget(Clear, body);

    let block = Block::bordered().title(format!(" {} {} ", doc.lang.flag(), doc.title));
    let inner = block.inner(body);
    frame.render_widget(block, body);

    let [text_area, stats_area, footer_area] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(2),
        Constraint::Length(1),
    ])
    .areas(inner);

    let mut lines = vec![Line::styled(
        "Summary/Excerpt:",
        Style::default().add_modifier(Modifier::BOLD),
    )];
    lines.push(Line::raw(doc.display_text()));
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), text_area);

    let stats = Line::from(vec![
        Span::raw("AI Confidence: "),
        Span::styled(
            format!("{}%", decimal_percent(doc.semantic_score)),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   Keyword Match: "),
        Span::styled(
            format!("{}%", decimal_percent(doc.bm25_score)),
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(stats), stats_area);

    let [visit, _, close] = Layout::horizontal([
        Constraint::Length(30),
        Constraint::Min(0),
        Constraint::Length(11),
    ])
    .areas(footer_area);
    frame.render_widget(
        Paragraph::new("[ Visit Original Article ↗ ]")
            .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        visit,
    );
    frame.render_widget(
        Paragraph::new("[ Close ]").style(Style::default().add_modifier(Modifier::BOLD)),
        close,
    );

    ModalHits { body, visit, close }
}

fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(area);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(middle);
    center
}
