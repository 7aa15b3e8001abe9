pub mod keyboard;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::App,
    clock::Clock,
    language::WordFetcher,
    session::{DisplayStats, TypingSession, SEPARATOR},
    word_store::WordSource,
};
use keyboard::{KeyboardWidget, KEYBOARD_HEIGHT};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

fn stats_line(stats: &DisplayStats) -> String {
    format!(
        "{} wpm   {} net   {}% acc   {:.1}s",
        stats.gross_wpm,
        stats.net_wpm,
        stats.accuracy,
        stats.elapsed_ms as f64 / 1000.0
    )
}

fn status_line<F: WordFetcher, C: Clock>(app: &App<F, C>) -> String {
    let progress = app.session().progress();
    let words = match (app.word_source(), app.is_degraded(), app.is_fetching()) {
        (WordSource::Remote, _, _) => format!("{} words", app.config().word_list.key()),
        (WordSource::Fallback, true, _) => "offline word list (ctrl+r to retry)".to_string(),
        (WordSource::Fallback, false, true) => "bundled words (fetching...)".to_string(),
        (WordSource::Fallback, false, false) => "bundled words".to_string(),
    };

    format!(
        "{}   {}/{} words   {}",
        app.mode(),
        progress.words_completed,
        progress.total_words,
        words
    )
}

/// One span per character of the text, styled by what happened there.
fn prompt_spans(session: &TypingSession) -> Vec<Span<'static>> {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let green_bold_style = bold_style.fg(Color::Green);
    let red_bold_style = bold_style.fg(Color::Red);
    let dim_bold_style = bold_style.add_modifier(Modifier::DIM);
    let underlined_dim_bold_style = dim_bold_style.add_modifier(Modifier::UNDERLINED);

    let chars = session.text().chars();
    let mut spans = session
        .log()
        .iter()
        .map(|(idx, is_correct)| {
            let expected = chars[idx];
            if is_correct {
                Span::styled(expected.to_string(), green_bold_style)
            } else {
                Span::styled(
                    match expected {
                        SEPARATOR => "·".to_owned(),
                        c => c.to_string(),
                    },
                    red_bold_style,
                )
            }
        })
        .collect::<Vec<Span>>();

    if let Some(expected) = session.expected_char() {
        spans.push(Span::styled(expected.to_string(), underlined_dim_bold_style));

        let rest = chars[session.cursor() + 1..].iter().collect::<String>();
        spans.push(Span::styled(rest, dim_bold_style));
    }

    spans
}

impl<F: WordFetcher, C: Clock> Widget for &App<F, C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = self.session();
        let stats = self.stats();
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let hint_style = Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::ITALIC);

        if session.is_complete() {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .horizontal_margin(HORIZONTAL_MARGIN)
                .vertical_margin(VERTICAL_MARGIN)
                .constraints([
                    Constraint::Min(1),
                    Constraint::Length(1), // final stats
                    Constraint::Length(1), // status
                    Constraint::Min(1),
                    Constraint::Length(1), // legend
                ])
                .split(area);

            Paragraph::new(Span::styled(stats_line(&stats), bold_style))
                .alignment(Alignment::Center)
                .render(chunks[1], buf);
            Paragraph::new(Span::styled(status_line(self), hint_style))
                .alignment(Alignment::Center)
                .render(chunks[2], buf);
            Paragraph::new(Span::styled(
                "(→) new words   (tab) change mode   (esc) quit",
                hint_style,
            ))
            .alignment(Alignment::Center)
            .render(chunks[4], buf);
            return;
        }

        let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
        let prompt_width = session.text().to_string().width();
        let prompt_occupied_lines = if prompt_width <= max_chars_per_line as usize {
            1
        } else {
            ((prompt_width as f64 / max_chars_per_line as f64).ceil() + 1.0) as u16
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // status
                Constraint::Min(1),
                Constraint::Length(prompt_occupied_lines),
                Constraint::Length(1), // padding
                Constraint::Length(1), // live stats
                Constraint::Length(1), // padding
                Constraint::Length(KEYBOARD_HEIGHT),
                Constraint::Min(1),
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(Span::styled(status_line(self), hint_style))
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        Paragraph::new(Line::from(prompt_spans(session)))
            .alignment(if prompt_occupied_lines == 1 {
                // when the prompt is small enough to fit on one line
                // centering the text gives a nice zen feeling
                Alignment::Center
            } else {
                Alignment::Left
            })
            .wrap(Wrap { trim: true })
            .render(chunks[2], buf);

        Paragraph::new(Span::styled(
            stats_line(&stats),
            bold_style.add_modifier(Modifier::DIM),
        ))
        .alignment(Alignment::Center)
        .render(chunks[4], buf);

        KeyboardWidget {
            next: session.next_key(),
            hand: self.mode().hand(),
        }
        .render(chunks[6], buf);

        Paragraph::new(Span::styled(
            "(tab) change mode   (→) new words   (ctrl+r) retry download   (esc) quit",
            hint_style,
        ))
        .alignment(Alignment::Center)
        .render(chunks[8], buf);
    }
}
