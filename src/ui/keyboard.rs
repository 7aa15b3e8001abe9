use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::{
    keyboard::{base_key, hand_for_key, placement_for_key, Finger, Hand, KeyPlacement, KEY_ROWS},
    session::NextKey,
};

/// Height the diagram needs: four key rows, the space bar and a caption.
pub const KEYBOARD_HEIGHT: u16 = 6;

pub fn finger_color(finger: Finger) -> Color {
    match finger {
        Finger::Pinky => Color::Magenta,
        Finger::Ring => Color::Blue,
        Finger::Middle => Color::Green,
        Finger::Index => Color::Yellow,
        Finger::Thumb => Color::Cyan,
    }
}

pub fn finger_label(placement: Option<KeyPlacement>) -> String {
    match placement {
        Some(KeyPlacement {
            hand: Some(hand),
            finger,
        }) => format!("{hand} {finger}"),
        Some(KeyPlacement { hand: None, finger }) => format!("either {finger}"),
        None => "no finger for this key".to_string(),
    }
}

/// QWERTY diagram coloured by finger, with the next key lit up.
pub struct KeyboardWidget {
    pub next: Option<NextKey>,
    /// Keys for the other hand are dimmed during single-hand drills.
    pub hand: Option<Hand>,
}

impl KeyboardWidget {
    fn key_style(&self, key: char) -> Style {
        let target = self.next.map(|n| base_key(n.key));
        let color = placement_for_key(key)
            .map(|p| finger_color(p.finger))
            .unwrap_or(Color::Gray);

        if target == Some(key) {
            return Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD);
        }

        let style = Style::default().fg(color);
        match (self.hand, hand_for_key(key)) {
            (Some(drill), Some(hand)) if drill != hand => style.add_modifier(Modifier::DIM),
            _ => style,
        }
    }
}

impl Widget for KeyboardWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = KEY_ROWS
            .iter()
            .enumerate()
            .map(|(row_idx, row)| {
                let mut spans = vec![Span::raw(" ".repeat(row_idx))];
                spans.extend(
                    row.chars()
                        .map(|key| Span::styled(format!(" {key} "), self.key_style(key))),
                );
                Line::from(spans)
            })
            .collect::<Vec<Line>>();

        lines.push(Line::from(Span::styled(
            format!("{:^21}", "space"),
            self.key_style(' '),
        )));

        let caption = match self.next {
            Some(next) => finger_label(next.placement),
            None => String::new(),
        };
        lines.push(Line::from(Span::styled(
            caption,
            Style::default().add_modifier(Modifier::ITALIC),
        )));

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}
