pub mod phrase;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::App,
    controller::SubmitOutcome,
    difficulty::Difficulty,
    ui::phrase::{phrase_spans, visible_input},
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let controller = &self.controller;
        let session = controller.session();

        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
        let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let max_chars_per_line = area
            .width
            .saturating_sub(HORIZONTAL_MARGIN * 2)
            .max(1);
        let prompt_width = session.target_phrase().width();
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
                Constraint::Length(1),                     // score + difficulty
                Constraint::Min(0),                        // padding
                Constraint::Length(prompt_occupied_lines), // target phrase
                Constraint::Length(1),                     // padding
                Constraint::Length(3),                     // input box
                Constraint::Length(1),                     // wpm / feedback
                Constraint::Length(1),                     // countdown
                Constraint::Min(0),                        // padding
                Constraint::Length(1),                     // legend
            ])
            .split(area);

        // header
        let score_text = format!("Score: {}", controller.score());
        let header = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(score_text.width() as u16 + 2),
                Constraint::Min(0),
            ])
            .split(chunks[0]);

        Paragraph::new(Span::styled(score_text, bold_style)).render(header[0], buf);
        Paragraph::new(difficulty_selector(controller.difficulty()))
            .alignment(Alignment::Right)
            .render(header[1], buf);

        // target phrase
        Paragraph::new(Line::from(phrase_spans(session)))
            .alignment(if prompt_occupied_lines == 1 {
                // when the prompt is small enough to fit on one line
                // centering the text gives a nice zen feeling
                Alignment::Center
            } else {
                Alignment::Left
            })
            .wrap(Wrap { trim: true })
            .render(chunks[2], buf);

        // input box
        let input_block = Block::default()
            .borders(Borders::ALL)
            .border_style(if session.is_active() {
                Style::default()
            } else {
                Style::default().fg(Color::Green)
            })
            .title(" type here, enter to submit ");
        let inner_width = chunks[4].width.saturating_sub(2) as usize;
        let input_line = Line::from(vec![
            Span::raw(visible_input(session.typed_input(), inner_width).to_string()),
            Span::styled(" ", Style::default().add_modifier(Modifier::REVERSED)),
        ]);
        Paragraph::new(input_line)
            .block(input_block)
            .render(chunks[4], buf);

        // wpm or miss feedback
        let feedback = match (session.wpm(), &self.last_outcome) {
            (Some(wpm), _) => {
                let mut spans = vec![Span::styled(
                    format!("Words Per Minute: {wpm}"),
                    green_bold_style,
                )];
                if let Some(best) = self.best_wpm {
                    spans.push(Span::styled(format!("   best {best}"), dim_style));
                }
                Line::from(spans)
            }
            (None, Some(SubmitOutcome::Incorrect { penalty, .. })) => Line::from(Span::styled(
                format!("Not quite: -{penalty} points"),
                red_bold_style,
            )),
            _ => Line::default(),
        };
        Paragraph::new(feedback)
            .alignment(Alignment::Center)
            .render(chunks[5], buf);

        if let Some(remaining_ms) = controller.reset_remaining_ms() {
            Paragraph::new(Span::styled(
                format!("next phrase in {:.1}s", remaining_ms as f64 / 1000.0),
                dim_style,
            ))
            .alignment(Alignment::Center)
            .render(chunks[6], buf);
        }

        Paragraph::new(Span::styled(
            "(enter) submit / (tab) difficulty / (f1-f4) pick / (ctrl+u) clear / (esc)ape",
            italic_style,
        ))
        .render(chunks[8], buf);
    }
}

/// All four levels, current one highlighted
fn difficulty_selector(current: Difficulty) -> Line<'static> {
    let mut spans = Vec::with_capacity(Difficulty::ALL.len() * 2);
    for (i, level) in Difficulty::ALL.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" | "));
        }
        let style = if level == current {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        spans.push(Span::styled(level.label(), style));
    }
    Line::from(spans)
}
