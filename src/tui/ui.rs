//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::controller::TimerSnapshot;
use crate::core::format_mmss;
use crate::output::snapshot_label;
use crate::timer::TimerMode;

const KEY_HINTS: &str = "s:start | p:pause/resume | b:break | k:skip | x:stop | q:quit";

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, snapshot: &TimerSnapshot, status: Option<&str>) {
    // Header, countdown, gauge, spacer, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, snapshot, chunks[0]);
    render_countdown(frame, snapshot, chunks[1]);
    render_gauge(frame, snapshot, chunks[2]);
    render_status_bar(frame, status, chunks[4]);
}

fn mode_color(mode: TimerMode) -> Color {
    match mode {
        TimerMode::Idle => Color::White,
        TimerMode::Focus => Color::Green,
        TimerMode::Break => Color::Cyan,
    }
}

fn render_header(frame: &mut Frame<'_>, snapshot: &TimerSnapshot, area: Rect) {
    let mut title = format!(" {} ", snapshot_label(snapshot));
    if snapshot.paused {
        title.push_str("(paused) ");
    }
    title.push_str(&format!(
        "· {} completed ",
        snapshot.completed_focus_count
    ));

    let color = mode_color(snapshot.mode);
    let header = Paragraph::new(title)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );

    frame.render_widget(header, area);
}

fn render_countdown(frame: &mut Frame<'_>, snapshot: &TimerSnapshot, area: Rect) {
    let style = if snapshot.paused {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
            .fg(mode_color(snapshot.mode))
            .add_modifier(Modifier::BOLD)
    };

    let countdown = Paragraph::new(format!("\n{}", format_mmss(snapshot.remaining_seconds)))
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(countdown, area);
}

fn render_gauge(frame: &mut Frame<'_>, snapshot: &TimerSnapshot, area: Rect) {
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(mode_color(snapshot.mode)))
        .ratio(snapshot.progress.clamp(0.0, 1.0));

    frame.render_widget(gauge, area);
}

fn render_status_bar(frame: &mut Frame<'_>, status: Option<&str>, area: Rect) {
    let status = Paragraph::new(status.unwrap_or(KEY_HINTS))
        .style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn snapshot() -> TimerSnapshot {
        TimerSnapshot {
            mode: TimerMode::Focus,
            running: true,
            paused: false,
            remaining_seconds: 1199,
            total_seconds: 1500,
            progress: 0.2,
            session_id: Some(1),
            completed_focus_count: 2,
            focus_duration_minutes: 25,
            break_duration_minutes: 5,
            break_minutes: 5,
            long_break: false,
        }
    }

    #[test]
    fn test_render_shows_countdown() {
        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();

        terminal
            .draw(|frame| render(frame, &snapshot(), None))
            .unwrap();

        let buffer = terminal.backend().buffer().clone();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("19:59"));
        assert!(text.contains("Focus"));
        assert!(text.contains("q:quit"));
    }
}
