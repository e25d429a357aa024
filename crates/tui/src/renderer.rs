use std::io;

use algoviz_core::views::render_snapshot;
use algoviz_core::{FrameRef, Graph, PlaybackState, Renderer};
use algoviz_protocol::{Point, RenderCommand, Snapshot, TextAlign, ThemeToken, Viewport};
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Paragraph},
};

const HELP: &str = "space play/pause  \u{2190}/\u{2192} step  Home/End jump  +/- speed  \
                    g new data  Tab algorithm  s start  Enter run  r reset  q quit";

pub fn theme_to_color(token: ThemeToken) -> Color {
    match token {
        ThemeToken::ElementDefault => Color::Rgb(90, 140, 220),
        ThemeToken::ElementComparing => Color::Yellow,
        ThemeToken::ElementSwapping => Color::Red,
        ThemeToken::ElementSorted => Color::Green,
        ThemeToken::NodeFrontier => Color::Yellow,
        ThemeToken::NodeCurrent => Color::Red,
        ThemeToken::NodeVisited => Color::Green,
        ThemeToken::NodePath => Color::Magenta,
        ThemeToken::Edge => Color::DarkGray,
        ThemeToken::EdgeOnPath => Color::Magenta,
        ThemeToken::TextPrimary => Color::White,
        ThemeToken::TextSecondary => Color::Gray,
        ThemeToken::TextMuted => Color::DarkGray,
        ThemeToken::Background => Color::Black,
        ThemeToken::Border => Color::DarkGray,
        ThemeToken::StatusBackground => Color::DarkGray,
        ThemeToken::StatusText => Color::White,
        ThemeToken::StatusError => Color::LightRed,
    }
}

/// Screen furniture the playback controller knows nothing about.
#[derive(Debug, Default, Clone)]
pub struct Chrome {
    pub title: String,
    /// Present while the session holds a graph; switches the content view.
    pub graph: Option<Graph>,
    pub delay_ms: u128,
    /// One-shot error text, cleared on the next key press.
    pub message: Option<String>,
}

#[derive(Debug, Clone)]
struct Shown {
    snapshot: Snapshot,
    index: usize,
    total: usize,
    state: PlaybackState,
}

/// Draws every frame it is handed straight to the terminal.
///
/// `render` cannot fail, so a drawing error is parked and handed back by
/// [`TerminalRenderer::take_error`] on the next pass of the event loop.
pub struct TerminalRenderer<B: Backend> {
    terminal: Terminal<B>,
    chrome: Chrome,
    shown: Option<Shown>,
    error: Option<io::Error>,
}

impl<B: Backend> TerminalRenderer<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        Self {
            terminal,
            chrome: Chrome::default(),
            shown: None,
            error: None,
        }
    }

    pub fn chrome_mut(&mut self) -> &mut Chrome {
        &mut self.chrome
    }

    #[cfg(test)]
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Show data that has no Frame Store behind it yet.
    pub fn show_idle(&mut self, snapshot: Snapshot) {
        self.shown = Some(Shown {
            snapshot,
            index: 0,
            total: 0,
            state: PlaybackState::Stopped,
        });
        self.draw();
    }

    pub fn redraw(&mut self) {
        self.draw();
    }

    pub fn take_error(&mut self) -> io::Result<()> {
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn draw(&mut self) {
        let Some(shown) = &self.shown else {
            return;
        };
        let chrome = &self.chrome;
        if let Err(err) = self.terminal.draw(|frame| draw_screen(frame, chrome, shown)) {
            log::error!("terminal draw failed: {err}");
            self.error.get_or_insert(err);
        }
    }
}

impl<B: Backend> Renderer for TerminalRenderer<B> {
    fn render(&mut self, frame: FrameRef<'_>) {
        self.shown = Some(Shown {
            snapshot: frame.snapshot.clone(),
            index: frame.index,
            total: frame.total,
            state: frame.state,
        });
        self.draw();
    }
}

fn draw_screen(frame: &mut Frame<'_>, chrome: &Chrome, shown: &Shown) {
    let area = frame.area();
    if area.height < 5 {
        return;
    }

    let header_area = Rect::new(area.x, area.y, area.width, 1);
    let content_area = Rect::new(area.x, area.y + 1, area.width, area.height - 4);
    let status_y = content_area.y + content_area.height;

    let status_style = Style::default()
        .fg(theme_to_color(ThemeToken::StatusText))
        .bg(theme_to_color(ThemeToken::StatusBackground));
    frame.render_widget(
        Paragraph::new(chrome.title.as_str()).style(status_style),
        header_area,
    );

    frame.render_widget(
        Block::default().style(Style::default().bg(theme_to_color(ThemeToken::Background))),
        content_area,
    );
    let viewport = Viewport::new(
        f64::from(content_area.width),
        f64::from(content_area.height),
    );
    let commands = render_snapshot(&shown.snapshot, chrome.graph.as_ref(), &viewport);
    paint(frame.buffer_mut(), content_area, &commands);

    let progress = if shown.total == 0 {
        format!(" ready  {} ms/frame", chrome.delay_ms)
    } else {
        format!(
            " frame {}/{}  {}  {} ms/frame",
            shown.index + 1,
            shown.total,
            shown.state,
            chrome.delay_ms
        )
    };
    frame.render_widget(
        Paragraph::new(progress).style(status_style),
        Rect::new(area.x, status_y, area.width, 1),
    );
    frame.render_widget(
        Paragraph::new(format!(" {}", shown.snapshot.caption))
            .style(Style::default().fg(theme_to_color(ThemeToken::TextPrimary))),
        Rect::new(area.x, status_y + 1, area.width, 1),
    );

    let (text, token) = match &chrome.message {
        Some(message) => (format!(" {message}"), ThemeToken::StatusError),
        None => (format!(" {HELP}"), ThemeToken::TextMuted),
    };
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(theme_to_color(token))),
        Rect::new(area.x, status_y + 2, area.width, 1),
    );
}

/// Rasterise view commands into terminal cells. One viewport unit is one cell.
fn paint(buf: &mut Buffer, area: Rect, commands: &[RenderCommand]) {
    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect {
                rect, color, label, ..
            } => {
                let bg = theme_to_color(*color);
                let c0 = rect.x.round() as i64;
                let c1 = ((rect.x + rect.w).round() as i64).max(c0 + 1);
                let r1 = (rect.y + rect.h).round() as i64;
                let r0 = (rect.y.round() as i64).min(r1 - 1);
                for row in r0..r1 {
                    for col in c0..c1 {
                        if let Some(cell) = cell_at(buf, area, col, row) {
                            cell.set_char(' ').set_bg(bg);
                        }
                    }
                }
                if let Some(label) = label {
                    let width = (c1 - c0) as usize;
                    let len = label.chars().count();
                    if len <= width {
                        let x = c0 + ((width - len) / 2) as i64;
                        put_str(buf, area, x, r1 - 1, label, Style::default().fg(Color::Black).bg(bg));
                    }
                }
            }
            RenderCommand::DrawLine {
                from, to, color, ..
            } => {
                let style = Style::default().fg(theme_to_color(*color));
                for (col, row) in line_cells(*from, *to) {
                    if let Some(cell) = cell_at(buf, area, col, row) {
                        cell.set_char('\u{b7}').set_style(style);
                    }
                }
            }
            RenderCommand::DrawCircle {
                center,
                color,
                label,
                ..
            } => {
                let text = format!("({})", label.as_deref().unwrap_or(""));
                let len = text.chars().count() as i64;
                let x = center.x.round() as i64 - len / 2;
                let y = (center.y.round() as i64).min(i64::from(area.height) - 1);
                let style = Style::default().fg(Color::Black).bg(theme_to_color(*color));
                put_str(buf, area, x, y, &text, style);
            }
            RenderCommand::DrawText {
                position,
                text,
                color,
                align,
            } => {
                let len = text.chars().count() as i64;
                let x = position.x.round() as i64;
                let x = match align {
                    TextAlign::Left => x,
                    TextAlign::Center => x - len / 2,
                    TextAlign::Right => x - len,
                };
                let y = (position.y.round() as i64).min(i64::from(area.height) - 1);
                put_str(buf, area, x, y, text, Style::default().fg(theme_to_color(*color)));
            }
            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {}
        }
    }
}

fn cell_at(buf: &mut Buffer, area: Rect, col: i64, row: i64) -> Option<&mut ratatui::buffer::Cell> {
    if col < 0 || row < 0 || col >= i64::from(area.width) || row >= i64::from(area.height) {
        return None;
    }
    buf.cell_mut((area.x + col as u16, area.y + row as u16))
}

fn put_str(buf: &mut Buffer, area: Rect, x: i64, y: i64, text: &str, style: Style) {
    for (i, ch) in text.chars().enumerate() {
        if let Some(cell) = cell_at(buf, area, x + i as i64, y) {
            cell.set_char(ch).set_style(style);
        }
    }
}

/// Bresenham between two rounded points, endpoints included.
fn line_cells(from: Point, to: Point) -> Vec<(i64, i64)> {
    let (mut x, mut y) = (from.x.round() as i64, from.y.round() as i64);
    let (x1, y1) = (to.x.round() as i64, to.y.round() as i64);
    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let mut cells = Vec::with_capacity((dx - dy) as usize + 1);
    loop {
        cells.push((x, y));
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    cells
}
