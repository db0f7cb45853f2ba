use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{App, AppState};
use typr::config::TestMode;
use typr::session::{CharState, Session, WordState};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

struct Styles {
    correct: Style,
    incorrect: Style,
    untyped: Style,
    cursor: Style,
    skipped: Style,
}

impl Styles {
    fn new() -> Self {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        Self {
            correct: bold.fg(Color::Green),
            incorrect: bold.fg(Color::Red),
            untyped: bold.add_modifier(Modifier::DIM),
            cursor: bold.add_modifier(Modifier::DIM | Modifier::UNDERLINED),
            skipped: bold.fg(Color::Red).add_modifier(Modifier::DIM),
        }
    }
}

/// Visible glyph for a mistyped character; spaces would vanish otherwise.
fn visible(c: char) -> String {
    match c {
        ' ' => "·".to_owned(),
        c => c.to_string(),
    }
}

/// Spans for one word: expected characters colored by their derived state,
/// mistyped positions showing what was actually typed, the cursor
/// underlined inside the active word.
fn word_spans(session: &Session, idx: usize, styles: &Styles) -> Vec<Span<'static>> {
    let word = &session.words()[idx];
    let state = session.word_states()[idx];

    match state {
        WordState::Pending => vec![Span::styled(word.clone(), styles.untyped)],
        WordState::Skipped => vec![Span::styled(word.clone(), styles.skipped)],
        _ => {
            let typed: Vec<char> = match state {
                WordState::Active => session.current_input().chars().collect(),
                _ => session.typed_text(idx).chars().collect(),
            };
            let expected: Vec<char> = word.chars().collect();
            let states = session.word_chars(idx);
            let cursor = (state == WordState::Active).then(|| session.cursor());

            let mut spans = Vec::with_capacity(states.len());
            for (i, char_state) in states.iter().enumerate() {
                let span = match char_state {
                    CharState::Correct => {
                        Span::styled(expected[i].to_string(), styles.correct)
                    }
                    CharState::Incorrect => Span::styled(visible(typed[i]), styles.incorrect),
                    CharState::Untyped => {
                        let style = if cursor == Some(i) {
                            styles.cursor
                        } else {
                            styles.untyped
                        };
                        Span::styled(expected[i].to_string(), style)
                    }
                };
                spans.push(span);
            }
            spans
        }
    }
}

fn prompt_line(session: &Session, styles: &Styles) -> Line<'static> {
    let mut spans = Vec::new();
    for idx in 0..session.words().len() {
        if idx > 0 {
            spans.push(Span::raw(" "));
        }
        spans.extend(word_spans(session, idx, styles));
    }
    Line::from(spans)
}

fn render_typing(app: &App, area: Rect, buf: &mut Buffer) {
    let styles = Styles::new();
    let session = app.trainer.session();

    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
    let prompt_width: usize = session
        .words()
        .iter()
        .map(|w| w.width() + 1)
        .sum::<usize>()
        .saturating_sub(1);
    let prompt_occupied_lines =
        ((prompt_width as f64 / max_chars_per_line as f64).ceil() as u16).max(1);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints(
            [
                Constraint::Length(
                    (area.height.saturating_sub(prompt_occupied_lines)) / 2,
                ),
                Constraint::Length(2),
                Constraint::Length(prompt_occupied_lines),
                Constraint::Min(1),
            ]
            .as_ref(),
        )
        .split(area);

    let timer = app.trainer.timer();
    let clock = match app.config.test_mode {
        TestMode::Time => format!("{:.1}", timer.display_secs()),
        TestMode::Words => format!(
            "{:.1}  ·  {}/{}",
            timer.display_secs(),
            session.correct_words(),
            app.config.target_word_count
        ),
    };
    Paragraph::new(Span::styled(clock, styles.untyped))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    Paragraph::new(prompt_line(session, &styles))
        .alignment(if prompt_occupied_lines == 1 {
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: true })
        .render(chunks[2], buf);
}

fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let italic = Style::default().add_modifier(Modifier::ITALIC);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints(
            [
                Constraint::Min(1),
                Constraint::Length(1), // stats
                Constraint::Length(1), // penalty
                Constraint::Length(2), // settings
                Constraint::Length(1), // legend
            ]
            .as_ref(),
        )
        .split(area);

    if let Some(summary) = app.trainer.summary() {
        let stats = Paragraph::new(Span::styled(
            format!(
                "{} wpm   {}% acc   {} errors",
                summary.wpm, summary.accuracy, summary.error_count
            ),
            bold,
        ))
        .alignment(Alignment::Center);
        stats.render(chunks[1], buf);

        if summary.total_penalty_secs > 0.0 {
            let penalty = Paragraph::new(Span::styled(
                format!("{:.1}s penalty time", summary.total_penalty_secs),
                Style::default().fg(Color::Red),
            ))
            .alignment(Alignment::Center);
            penalty.render(chunks[2], buf);
        }
    }

    let settings = Paragraph::new(format!(
        "difficulty: {} | mode: {} | {}s | {} words",
        app.config.difficulty,
        app.config.test_mode,
        app.config.time_limit_secs,
        app.config.target_word_count
    ))
    .style(Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    settings.render(chunks[3], buf);

    let legend = Paragraph::new(Span::styled(
        "(r)etry / (d)ifficulty / (m)ode / (esc)ape",
        italic,
    ));
    legend.render(chunks[4], buf);
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.state {
            AppState::Typing => render_typing(self, area, buf),
            AppState::Results => render_results(self, area, buf),
        }
    }
}
