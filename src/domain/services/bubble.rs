#[cfg(test)]
#[path = "bubble_test.rs"]
mod tests;

use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;

use crate::domain::models::Author;
use crate::domain::models::Entry;
use crate::domain::models::EntryType;

#[derive(PartialEq, Eq)]
pub enum BubbleAlignment {
    Left,
    Right,
}

pub struct Bubble<'a> {
    alignment: BubbleAlignment,
    entry: &'a Entry,
    window_max_width: usize,
}

pub struct BubbleConfig {
    pub bubble_padding: usize,
    pub border_elements_length: usize,
    pub outer_padding_percentage: f32,
}

impl<'a> Bubble<'a> {
    pub fn new(entry: &'a Entry, alignment: BubbleAlignment, window_max_width: usize) -> Bubble<'a> {
        return Bubble {
            alignment,
            entry,
            window_max_width,
        };
    }

    pub fn style_config() -> BubbleConfig {
        return BubbleConfig {
            // Unicode character border + padding.
            bubble_padding: 8,
            // left border + left padding + (text, not counted) + right padding + right border +
            // scrollbar.
            border_elements_length: 5,
            outer_padding_percentage: 0.04,
        };
    }

    pub fn as_lines(&self) -> Vec<Line<'static>> {
        let text_lines = self.entry.as_string_lines(self.available_width());
        let username = self.entry.author.to_string();

        let max_line_length = text_lines
            .iter()
            .map(|line| return line.chars().count())
            .chain([username.chars().count()])
            .max()
            .unwrap_or(0);

        let lines = text_lines
            .into_iter()
            .map(|line| return self.text_to_line(line, max_line_length))
            .collect();

        return self.wrap_lines_in_bubble(lines, max_line_length, &username);
    }

    fn available_width(&self) -> usize {
        let style_config = Bubble::style_config();
        // Add a minimum 4% of padding on the side.
        let min_bubble_padding_length = ((self.window_max_width as f32
            * style_config.outer_padding_percentage)
            .ceil()) as usize;

        return self
            .window_max_width
            .saturating_sub(style_config.border_elements_length + min_bubble_padding_length)
            .max(1);
    }

    fn text_to_line(&self, text: String, max_line_length: usize) -> Line<'static> {
        let line_len = text.chars().count();
        let fill = " ".repeat(max_line_length.saturating_sub(line_len));
        let outer_bubble_padding = " ".repeat(
            self.window_max_width
                .saturating_sub(line_len + fill.len() + Bubble::style_config().bubble_padding),
        );

        let mut spans = vec![
            self.highlight_span("│ ".to_string()),
            Span::styled(text, self.text_style()),
            self.highlight_span(format!("{fill} │")),
        ];

        if self.alignment == BubbleAlignment::Left {
            spans.push(Span::from(outer_bubble_padding));
            return Line::from(spans);
        }

        let mut line_spans = vec![Span::from(outer_bubble_padding)];
        line_spans.extend(spans);

        return Line::from(line_spans);
    }

    fn wrap_lines_in_bubble(
        &self,
        lines: Vec<Line<'static>>,
        max_line_length: usize,
        username: &str,
    ) -> Vec<Line<'static>> {
        // Add 2 for the vertical bars.
        let inner_width = max_line_length + 2;
        let name_width = username.chars().count();
        let top_bar = format!(
            "╭{username}{}╮",
            "─".repeat(inner_width.saturating_sub(name_width))
        );
        let bottom_bar = format!("╰{}╯", "─".repeat(inner_width));
        let bar_bubble_padding = " ".repeat(
            self.window_max_width
                .saturating_sub(max_line_length + Bubble::style_config().bubble_padding),
        );

        if self.alignment == BubbleAlignment::Left {
            let mut res = vec![self.highlight_line(format!("{top_bar}{bar_bubble_padding}"))];
            res.extend(lines);
            res.push(self.highlight_line(format!("{bottom_bar}{bar_bubble_padding}")));
            return res;
        }

        let mut res = vec![self.highlight_line(format!("{bar_bubble_padding}{top_bar}"))];
        res.extend(lines);
        res.push(self.highlight_line(format!("{bar_bubble_padding}{bottom_bar}")));
        return res;
    }

    fn border_colour(&self) -> Option<Color> {
        if self.entry.entry_type() == EntryType::Error {
            return Some(Color::Red);
        }

        match self.entry.author {
            Author::Palaver => return Some(Color::Rgb(138, 85, 63)), // Brown
            Author::User | Author::Model(_) => return None,
        }
    }

    fn text_style(&self) -> Style {
        if self.entry.entry_type() == EntryType::Error {
            return Style {
                fg: Some(Color::Red),
                ..Style::default()
            };
        }

        return Style::default();
    }

    fn highlight_span(&self, text: String) -> Span<'static> {
        if let Some(colour) = self.border_colour() {
            return Span::styled(
                text,
                Style {
                    fg: Some(colour),
                    ..Style::default()
                },
            );
        }

        return Span::from(text);
    }

    fn highlight_line(&self, text: String) -> Line<'static> {
        return Line::from(self.highlight_span(text));
    }
}
