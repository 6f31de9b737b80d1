//! Ratatui-based terminal UI.
//!
//! The TUI provides a settings panel for choosing a grouping scheme and a
//! metric column, then renders the sentiment chart for the selection.
//! Changing a selector cancels any stale in-flight load, starts a fresh one
//! on a worker thread, and fully redraws the chart when it completes.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Terminal,
};

use crate::cli::RenderArgs;
use crate::data::DataSource;
use crate::domain::{ChartConfig, GroupLabel};
use crate::error::AppError;

mod controller;
mod plotters_chart;

use controller::{ChartState, FetchController, FetchOutcome};
use plotters_chart::SentimentChart;

/// Start the TUI.
pub fn run(args: RenderArgs) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::runtime(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(args)?;
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::runtime(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::runtime(format!(
                "Failed to enter alternate screen: {e}"
            )));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    config: ChartConfig,
    source: DataSource,
    svg_out: std::path::PathBuf,
    controller: FetchController,
    state: ChartState,
    selected_field: usize,
    editing_metric: bool,
    metric_input: String,
    status: String,
}

impl App {
    fn new(args: RenderArgs) -> Result<Self, AppError> {
        let source = crate::app::data_source_from_args(&args)?;
        let mut app = Self {
            config: ChartConfig {
                scheme: args.scheme,
                metric: args.metric,
            },
            source,
            svg_out: args.out,
            controller: FetchController::new(),
            state: ChartState::Idle,
            selected_field: 0,
            editing_metric: false,
            metric_input: String::new(),
            status: String::new(),
        };
        app.reload();
        Ok(app)
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            while let Some(outcome) = self.controller.poll() {
                self.apply_outcome(outcome);
                needs_redraw = true;
            }

            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::runtime(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::runtime(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::runtime(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Cancel whatever is in flight and load the current selection.
    fn reload(&mut self) {
        self.controller.cancel_in_flight();
        self.controller
            .request(self.source.clone(), self.config.clone());
        self.state = ChartState::Loading;
        self.status = format!("Loading {}…", self.source.describe(self.config.scheme));
    }

    fn apply_outcome(&mut self, outcome: FetchOutcome) {
        match outcome.result {
            Ok(Some(chart)) => {
                self.status = if chart.row_errors.is_empty() {
                    format!(
                        "{} / {}: {} rows.",
                        self.config.scheme.display_name(),
                        self.config.metric,
                        chart.rows_used
                    )
                } else {
                    format!(
                        "{} / {}: {} of {} rows ({} skipped).",
                        self.config.scheme.display_name(),
                        self.config.metric,
                        chart.rows_used,
                        chart.rows_read,
                        chart.row_errors.len()
                    )
                };
                self.state = ChartState::Drawn(chart);
            }
            Ok(None) => {
                self.state = ChartState::Empty;
                self.status = format!(
                    "No data rows in {}; chart left empty.",
                    self.source.describe(self.config.scheme)
                );
            }
            Err(err) => {
                // Non-fatal by contract: record and keep running.
                self.state = ChartState::Failed;
                self.status = format!("Load failed: {err}");
            }
        }
    }

    /// Returns `true` when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing_metric {
            self.handle_metric_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Up => {
                if self.selected_field > 0 {
                    self.selected_field -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected_field < 1 {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Enter => {
                if self.selected_field == 1 {
                    self.editing_metric = true;
                    self.metric_input = self.config.metric.clone();
                    self.status =
                        "Editing metric column. Enter to apply, Esc to cancel.".to_string();
                }
            }
            KeyCode::Char('r') => {
                if let DataSource::Sample { seed } = &mut self.source {
                    *seed = seed.wrapping_add(1);
                    self.status = format!("Resampled (seed {seed}).");
                }
                self.reload();
            }
            KeyCode::Char('s') => self.save_svg(),
            _ => {}
        }

        false
    }

    fn handle_metric_edit(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.editing_metric = false;
                self.status = "Metric edit canceled.".to_string();
            }
            KeyCode::Enter => {
                self.editing_metric = false;
                let trimmed = self.metric_input.trim();
                if trimmed.is_empty() {
                    self.status = "Metric unchanged (empty input).".to_string();
                } else if trimmed != self.config.metric {
                    self.config.metric = trimmed.to_string();
                    self.reload();
                } else {
                    self.status = "Metric unchanged.".to_string();
                }
            }
            KeyCode::Backspace => {
                self.metric_input.pop();
            }
            KeyCode::Char(c) => {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    self.metric_input.push(c);
                }
            }
            _ => {}
        }
    }

    fn adjust_field(&mut self, delta: i32) {
        match self.selected_field {
            0 => {
                self.config.scheme = if delta >= 0 {
                    self.config.scheme.next()
                } else {
                    self.config.scheme.prev()
                };
                self.reload();
            }
            1 => {
                self.status = "Press Enter to edit the metric column.".to_string();
            }
            _ => {}
        }
    }

    fn save_svg(&mut self) {
        let ChartState::Drawn(chart) = &self.state else {
            self.status = "Nothing drawn yet; nothing to save.".to_string();
            return;
        };
        match crate::plot::render::render_svg(chart, &self.svg_out) {
            Ok(()) => self.status = format!("Wrote {}.", self.svg_out.display()),
            Err(err) => self.status = format!("SVG write failed: {err}"),
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("sentiment", Style::default().fg(Color::Cyan)),
            Span::raw(" — yearly sentiment aggregates"),
        ]));

        // The legend: member names in their series colors.
        let mut legend: Vec<Span> = vec![Span::styled(
            format!("{} | {} | ", self.config.scheme.display_name(), self.config.metric),
            Style::default().fg(Color::Gray),
        )];
        for (i, &label) in self.config.scheme.members().iter().enumerate() {
            if i > 0 {
                legend.push(Span::raw("  "));
            }
            legend.push(Span::styled(
                label.display_name(),
                Style::default().fg(label_color(label)),
            ));
        }
        lines.push(Line::from(legend));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(6)])
            .split(area);

        self.draw_chart(frame, chunks[0]);
        self.draw_settings(frame, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Sentiment").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        match &self.state {
            ChartState::Drawn(chart) => {
                frame.render_widget(SentimentChart { data: chart }, inner);
            }
            ChartState::Loading => {
                let msg = Paragraph::new("Loading data…")
                    .style(Style::default().fg(Color::Yellow));
                frame.render_widget(msg, inner);
            }
            ChartState::Empty => {
                let msg = Paragraph::new("Dataset is empty; nothing to draw.")
                    .style(Style::default().fg(Color::Gray));
                frame.render_widget(msg, inner);
            }
            ChartState::Failed => {
                let msg = Paragraph::new(self.status.as_str())
                    .style(Style::default().fg(Color::Red));
                frame.render_widget(msg, inner);
            }
            ChartState::Idle => {}
        }
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items = vec![
            ListItem::new(format!("Scheme: {}", self.config.scheme.display_name())),
            ListItem::new(format!("Metric: {}", self.config.metric)),
            ListItem::new(format!(
                "Source: {}",
                self.source.describe(self.config.scheme)
            )),
        ];

        let list = List::new(items)
            .block(Block::default().title("Settings").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);

        if self.editing_metric {
            let hint = Paragraph::new(format!("metric: {}▏", self.metric_input)).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
            let rect = Rect {
                x: area.x + 2,
                y: area.y + area.height.saturating_sub(2),
                width: area.width.saturating_sub(4),
                height: 1,
            };
            frame.render_widget(hint, rect);
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ scheme  Enter edit metric  r reload  s save svg  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn label_color(label: GroupLabel) -> Color {
    let (r, g, b) = label.color();
    Color::Rgb(r, g, b)
}
