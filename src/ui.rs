pub mod grid;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use target_sum::game::Status;

use crate::{
    ui::grid::{tile_rects, tile_width, GRID_COLUMNS},
    App,
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let game = self.session.game();
        let status = game.status();

        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
        let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);
        let cursor_style = Style::default().fg(Color::Yellow);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(3), // target
                Constraint::Length(1), // timer / outcome
                Constraint::Min(0),    // tiles
                Constraint::Length(1), // legend
            ])
            .split(area);

        let target = Paragraph::new(Span::styled(game.target().to_string(), bold_style))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" target "));
        target.render(chunks[0], buf);

        let outcome = match status {
            Status::Playing => Span::styled(
                format!(
                    "{}s left · sum {}",
                    game.seconds_remaining(),
                    game.selected_sum()
                ),
                dim_style,
            ),
            Status::Won => Span::styled(
                format!(
                    "You won! {} with {}s to spare",
                    game.target(),
                    game.seconds_remaining()
                ),
                green_bold_style,
            ),
            Status::GameOver if game.seconds_remaining() == 0 => {
                Span::styled("Time's up!".to_string(), red_bold_style)
            }
            Status::GameOver => Span::styled(
                format!("Too much! {} > {}", game.selected_sum(), game.target()),
                red_bold_style,
            ),
        };
        Paragraph::new(Line::from(outcome))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        let labels: Vec<String> = game.numbers().iter().map(|n| n.to_string()).collect();
        let rects = tile_rects(chunks[2], labels.len(), GRID_COLUMNS, tile_width(&labels));

        for (idx, (label, rect)) in labels.iter().zip(rects).enumerate() {
            let text_style = if game.is_selected(idx) {
                dim_style
            } else if status.is_terminal() {
                Style::default()
            } else {
                bold_style
            };

            let mut block = Block::default().borders(Borders::ALL);
            if idx < 9 {
                block = block.title(format!("{}", idx + 1));
            }
            if idx == self.cursor && !status.is_terminal() {
                block = block.border_style(cursor_style);
            } else if game.is_selected(idx) {
                block = block.border_style(dim_style);
            }

            Paragraph::new(Span::styled(label.clone(), text_style))
                .alignment(Alignment::Center)
                .block(block)
                .render(rect, buf);
        }

        let legend = if status.is_terminal() {
            "(n)ew round / (esc)ape"
        } else {
            "(1-9) pick / arrows + (enter) pick / (esc)ape"
        };
        Paragraph::new(Span::styled(legend, italic_style))
            .alignment(Alignment::Center)
            .render(chunks[3], buf);
    }
}
