use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;

use skullsweeper_core as game;

use crate::app::{App, MineEntry, Screen, Session, MAX_MINES, MIN_MINES};

pub(crate) const CELL_WIDTH: u16 = 2;
pub(crate) const LABEL_GUTTER: u16 = 3;

const BACKGROUND: Color = Color::Rgb(74, 87, 89);
const HIDDEN: Color = Color::Rgb(247, 225, 215);
const REVEALED_EMPTY: Color = Color::Rgb(222, 219, 210);
const REVEALED_NUMBER: Color = Color::Rgb(176, 196, 177);
const MINE_RED: Color = Color::Rgb(219, 110, 110);
const TITLE_TEXT: Color = Color::Rgb(240, 228, 220);
const GENERAL_TEXT: Color = Color::Rgb(176, 196, 177);
const LOSS_BAND: Color = Color::Rgb(255, 155, 155);
const WIN_BAND: Color = Color::Rgb(155, 255, 155);
const CURSOR_BG: Color = Color::LightBlue;

const GLYPH_MINE: &str = "\u{2620} ";
const GLYPH_FLAG: &str = "\u{2691} ";

pub(crate) fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::new().style(Style::new().bg(BACKGROUND)), area);

    if !fits(area, app.board_shape()) {
        draw_resize_hint(frame, area, app.board_shape());
        return;
    }

    match app.screen() {
        Screen::Title(entry) => draw_title(frame, area, entry),
        Screen::Playing(session) => draw_playing(frame, area, session),
    }
}

/// Space the playing screen needs: the cell grid, the label gutter and
/// header row, and two HUD rows at the bottom.
pub(crate) fn min_area(size: game::Pos) -> (u16, u16) {
    (
        u16::from(size.0) * CELL_WIDTH + LABEL_GUTTER + 2,
        u16::from(size.1) + 5,
    )
}

pub(crate) fn fits(area: Rect, size: game::Pos) -> bool {
    let (width, height) = min_area(size);
    area.width >= width && area.height >= height
}

/// Where the cell grid lands on screen, centered with room for labels.
pub(crate) fn grid_rect(area: Rect, size: game::Pos) -> Rect {
    let width = u16::from(size.0) * CELL_WIDTH;
    let height = u16::from(size.1);
    let x = area.x + area.width.saturating_sub(width + LABEL_GUTTER) / 2 + LABEL_GUTTER;
    let y = area.y + area.height.saturating_sub(height + 1) / 2 + 1;
    Rect::new(x, y, width, height)
}

/// Maps a terminal coordinate back to a board square, if it hits one.
pub(crate) fn cell_at(grid: Rect, column: u16, row: u16, size: game::Pos) -> Option<game::Pos> {
    if column < grid.x || row < grid.y {
        return None;
    }
    let x = (column - grid.x) / CELL_WIDTH;
    let y = row - grid.y;
    if x < u16::from(size.0) && y < u16::from(size.1) {
        Some((x as game::Axis, y as game::Axis))
    } else {
        None
    }
}

fn draw_resize_hint(frame: &mut Frame, area: Rect, size: game::Pos) {
    let (width, height) = min_area(size);
    let hint = Paragraph::new(Text::from(vec![
        Line::raw("Terminal size too small."),
        Line::raw(format!("Minimum required: {} x {}", width, height)),
    ]))
    .style(Style::new().fg(TITLE_TEXT))
    .alignment(Alignment::Center);
    let target = center_rect(40.min(area.width), 2.min(area.height), area);
    frame.render_widget(Clear, target);
    frame.render_widget(hint, target);
}

fn draw_title(frame: &mut Frame, area: Rect, entry: &MineEntry) {
    let rows = [
        (
            3,
            Line::styled("Welcome to Minesweeper", Style::new().fg(TITLE_TEXT)),
        ),
        (
            4,
            Line::styled(
                format!("Enter Mine Count ({MIN_MINES}-{MAX_MINES}): "),
                Style::new().fg(GENERAL_TEXT),
            ),
        ),
        (
            5,
            Line::styled(format!("{}_", entry.text()), Style::new().fg(Color::White)),
        ),
        (
            6,
            Line::styled("Press Enter to Start", Style::new().fg(GENERAL_TEXT)),
        ),
    ];

    for (tenths, line) in rows {
        let y = area.y + area.height * tenths / 10;
        let row = Rect::new(area.x, y, area.width, 1);
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), row);
    }
}

fn draw_playing(frame: &mut Frame, area: Rect, session: &Session) {
    let size = session.board().size();
    let grid = grid_rect(area, size);

    draw_labels(frame, grid, size);
    draw_grid(frame, grid, session);
    draw_hud(frame, area, session);

    match session.board().phase() {
        game::Phase::Lost => draw_band(frame, area, "Game Over", LOSS_BAND),
        game::Phase::Won => draw_band(frame, area, "You Win!", WIN_BAND),
        _ => {}
    }
}

fn draw_labels(frame: &mut Frame, grid: Rect, size: game::Pos) {
    let column_spans: Vec<Span> = (0..size.0)
        .map(|x| match column_label(x) {
            Some(letter) => Span::styled(format!("{letter} "), Style::new().fg(GENERAL_TEXT)),
            None => Span::raw("  "),
        })
        .collect();
    let columns = Rect::new(grid.x, grid.y - 1, grid.width, 1);
    frame.render_widget(Paragraph::new(Line::from(column_spans)), columns);

    let row_lines: Vec<Line> = (1..=u16::from(size.1))
        .map(|row| Line::styled(row.to_string(), Style::new().fg(GENERAL_TEXT)))
        .collect();
    let rows = Rect::new(grid.x - LABEL_GUTTER, grid.y, LABEL_GUTTER - 1, grid.height);
    frame.render_widget(
        Paragraph::new(Text::from(row_lines)).alignment(Alignment::Right),
        rows,
    );
}

fn draw_grid(frame: &mut Frame, grid: Rect, session: &Session) {
    let (width, height) = session.board().size();
    let snapshot = session.board().snapshot();

    let mut lines = Vec::with_capacity(usize::from(height));
    for y in 0..height {
        let mut spans = Vec::with_capacity(usize::from(width));
        for x in 0..width {
            let mut span = view_span(snapshot[[usize::from(x), usize::from(y)]]);
            if session.is_playable() && session.cursor() == (x, y) {
                span = span.bg(CURSOR_BG);
            }
            spans.push(span);
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(Text::from(lines)), grid);
}

fn view_span(view: game::SquareView) -> Span<'static> {
    use game::SquareView::*;
    match view {
        Hidden => Span::styled("  ", Style::new().bg(HIDDEN)),
        Flagged => Span::styled(GLYPH_FLAG, Style::new().fg(Color::Black).bg(HIDDEN)),
        Mine => Span::styled(GLYPH_MINE, Style::new().fg(Color::Black).bg(MINE_RED)),
        Open(0) => Span::styled("0 ", Style::new().fg(Color::White).bg(REVEALED_EMPTY)),
        Open(clue) => Span::styled(
            format!("{clue} "),
            Style::new().fg(Color::White).bg(REVEALED_NUMBER),
        ),
    }
}

fn draw_hud(frame: &mut Frame, area: Rect, session: &Session) {
    let flags = Paragraph::new(format!("Flags Remaining: {}", session.board().flags_remaining()))
        .style(Style::new().fg(Color::White))
        .alignment(Alignment::Center);
    frame.render_widget(flags, Rect::new(area.x, area.bottom() - 2, area.width, 1));

    let time = Paragraph::new(format!("TIME: {}", session.elapsed_secs()))
        .style(Style::new().fg(GENERAL_TEXT))
        .alignment(Alignment::Right);
    frame.render_widget(time, Rect::new(area.x, area.bottom() - 1, area.width, 1));
}

fn draw_band(frame: &mut Frame, area: Rect, message: &str, band: Color) {
    let rows = Rect::new(
        area.x,
        area.y + (area.height / 2).saturating_sub(1),
        area.width,
        3,
    );
    let overlay = Paragraph::new(Text::from(vec![
        Line::raw(""),
        Line::styled(message, Style::new().fg(Color::Black)),
        Line::raw(""),
    ]))
    .style(Style::new().bg(band))
    .alignment(Alignment::Center);
    frame.render_widget(Clear, rows);
    frame.render_widget(overlay, rows);
}

fn center_rect(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + r.width.saturating_sub(width) / 2;
    let y = r.y + r.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

fn column_label(x: game::Axis) -> Option<char> {
    (x < 26).then(|| char::from(b'A' + x))
}
