//! Map rendering.
//!
//! The world map is drawn on a canvas in degree space. The canvas bounds are
//! the degrees the calibrated projection places at 0% and 100% of each axis,
//! so percentage offsets from the mapper land on the matching canvas point.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Map, MapResolution},
        Block, Borders, Clear, Paragraph, Wrap,
    },
    Frame,
};

use isslocator::coord::{AxisCalibration, MapCoordinate, LATITUDE_AXIS, LONGITUDE_AXIS};
use isslocator::presentation::PromptKind;
use isslocator::tracker::{TrackerPhase, TrackerStatus};

use super::state::MapViewState;

const MARKER_SYMBOL: &str = "◉";
const PROMPT_MAX_WIDTH: u16 = 60;

/// Axis input (degrees) that projects to `percent`. Inverse of `convert_axis`.
pub fn inverse_axis(percent: f64, axis: &AxisCalibration) -> f64 {
    if percent < axis.center {
        (percent - axis.center) * axis.negative_extent / (axis.center - axis.negative_edge)
    } else {
        (percent - axis.center) * axis.positive_extent / (axis.positive_edge - axis.center)
    }
}

/// Canvas extents in degrees: `(x_bounds, y_bounds)`.
pub fn canvas_bounds() -> ([f64; 2], [f64; 2]) {
    let x = [
        inverse_axis(0.0, &LONGITUDE_AXIS),
        inverse_axis(100.0, &LONGITUDE_AXIS),
    ];
    // The latitude axis is fed negated; top of the image is the northern bound
    let y = [
        -inverse_axis(100.0, &LATITUDE_AXIS),
        -inverse_axis(0.0, &LATITUDE_AXIS),
    ];
    (x, y)
}

/// Canvas point for a map coordinate.
pub fn canvas_point(coordinate: &MapCoordinate) -> (f64, f64) {
    let ([x_min, x_max], [y_min, y_max]) = canvas_bounds();
    let x = x_min + coordinate.left / 100.0 * (x_max - x_min);
    let y = y_max - coordinate.top / 100.0 * (y_max - y_min);
    (x, y)
}

/// Render one frame. Returns the screen area of the prompt button, if drawn.
pub fn render(frame: &mut Frame, view: &MapViewState, status: &TrackerStatus) -> Option<Rect> {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    render_map(frame, chunks[0], view);
    render_status_bar(frame, chunks[1], status);

    view.prompt
        .as_ref()
        .and_then(|prompt| render_prompt(frame, chunks[0], prompt.kind))
}

fn render_map(frame: &mut Frame, area: Rect, view: &MapViewState) {
    let (x_bounds, y_bounds) = canvas_bounds();
    let marker = view
        .marker
        .filter(|_| view.icon_visible)
        .map(|coordinate| canvas_point(&coordinate));

    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(Span::styled(
                    format!(" ISS Locator {} ", isslocator::VERSION),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )),
        )
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(move |ctx| {
            ctx.draw(&Map {
                resolution: MapResolution::High,
                color: Color::DarkGray,
            });
            if let Some((x, y)) = marker {
                ctx.layer();
                ctx.print(
                    x,
                    y,
                    Span::styled(
                        MARKER_SYMBOL,
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ),
                );
            }
        });

    frame.render_widget(canvas, area);
}

fn render_prompt(frame: &mut Frame, area: Rect, kind: PromptKind) -> Option<Rect> {
    let width = PROMPT_MAX_WIDTH.min(area.width.saturating_sub(4));
    if width < 10 {
        return None;
    }
    let text_width = width.saturating_sub(4).max(1) as usize;
    let message_lines = kind.message().chars().count().div_ceil(text_width) as u16 + 1;
    let button_lines = if kind.button().is_some() { 2 } else { 0 };
    let height = (message_lines + button_lines + 2).min(area.height);

    let prompt_area = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, prompt_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Span::styled(
            format!(" {} ", kind.title()),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(prompt_area);
    frame.render_widget(block, prompt_area);

    let text_area = Rect {
        x: inner.x + 1,
        width: inner.width.saturating_sub(2),
        ..inner
    };
    frame.render_widget(
        Paragraph::new(kind.message())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        text_area,
    );

    let label = format!("[ {} ]", kind.button()?);
    let label_width = (label.chars().count() as u16).min(inner.width);
    if inner.height == 0 {
        return None;
    }
    let button = Rect {
        x: inner.x + (inner.width - label_width) / 2,
        y: inner.y + inner.height - 1,
        width: label_width,
        height: 1,
    };
    frame.render_widget(Clear, button);
    frame.render_widget(
        Paragraph::new(Span::styled(
            label,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        button,
    );
    Some(button)
}

fn render_status_bar(frame: &mut Frame, area: Rect, status: &TrackerStatus) {
    let phase_color = match status.phase {
        TrackerPhase::Active => Color::Green,
        TrackerPhase::Stalled | TrackerPhase::TimedOut => Color::Yellow,
        TrackerPhase::Idle | TrackerPhase::Paused => Color::DarkGray,
    };

    let mut spans = vec![Span::styled(
        format!(" {} ", status.phase.display_status()),
        Style::default().fg(phase_color).add_modifier(Modifier::BOLD),
    )];
    if let Some(session) = status.session {
        spans.push(Span::raw(format!(
            "│ session {} │ {}s │ backlog {} ",
            session,
            status.elapsed_ticks / 10,
            status.backlog()
        )));
    }
    if let Some(fix) = status.last_fix {
        spans.push(Span::styled(
            format!("│ {} ", fix),
            Style::default().fg(Color::Cyan),
        ));
    }
    spans.push(Span::styled(
        "│ space: locate  q: quit",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
