use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

use crate::session::{CharState, Session};

/// Pure presenter for the target phrase: one styled span per character
pub fn phrase_spans(session: &Session) -> Vec<Span<'static>> {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let green_bold_style = bold_style.fg(Color::Green);
    let red_bold_style = bold_style.fg(Color::Red);
    let dim_bold_style = bold_style.add_modifier(Modifier::DIM);

    session
        .target_phrase()
        .chars()
        .zip(session.char_states())
        .map(|(c, state)| match state {
            CharState::Correct => Span::styled(c.to_string(), green_bold_style),
            CharState::Incorrect => Span::styled(
                match c {
                    ' ' => "·".to_owned(),
                    c => c.to_string(),
                },
                red_bold_style,
            ),
            CharState::Pending => Span::styled(c.to_string(), dim_bold_style),
        })
        .collect()
}

/// Tail of `input` that fits in `width` columns, leaving one for the cursor
pub fn visible_input(input: &str, width: usize) -> &str {
    let room = width.saturating_sub(1);
    let count = input.chars().count();
    if count <= room {
        return input;
    }

    let skip = count - room;
    match input.char_indices().nth(skip) {
        Some((idx, _)) => &input[idx..],
        None => "",
    }
}
