//! Ratatui-based terminal UI.
//!
//! The TUI provides a numeric Nspt input, the per-formula estimates and means for
//! both parameters, and one comparison chart per parameter. Every change to the
//! input re-runs the estimate pipeline synchronously.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use plotters::style::RGBColor;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::pipeline::{RunOutput, run_estimate};
use crate::domain::{EstimateConfig, NSPT_MAX, NSPT_MIN, NSPT_STEP, ParameterKind, clamp_nspt};
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::{ChartLine, ChartMarker, CorrelationChart};

const MEAN_COLOR: RGBColor = RGBColor(255, 255, 255);
const MEAN_POINT_COLOR: RGBColor = RGBColor(255, 0, 0);

/// Start the TUI.
pub fn run(nspt: f64, sweep_points: usize) -> Result<(), AppError> {
    // Validate the configuration before touching the terminal.
    let mut app = App::new(nspt, sweep_points)?;

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
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
    config: EstimateConfig,
    input: String,
    editing: bool,
    show_formulas: bool,
    status: String,
    run: Option<RunOutput>,
}

impl App {
    fn new(nspt: f64, sweep_points: usize) -> Result<Self, AppError> {
        let mut app = Self {
            config: EstimateConfig {
                nspt: round_to_step(nspt),
                sweep_points,
                ..EstimateConfig::default()
            },
            input: String::new(),
            editing: false,
            show_formulas: false,
            status: String::new(),
            run: None,
        };
        app.recompute()?;
        app.status = format!("Nspt range {NSPT_MIN:.0}–{NSPT_MAX:.0}, step {NSPT_STEP}");
        Ok(app)
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code)? {
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

    fn handle_key(&mut self, code: KeyCode) -> Result<bool, AppError> {
        if self.editing {
            return self.handle_input_edit(code);
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Left => self.adjust(-NSPT_STEP)?,
            KeyCode::Right => self.adjust(NSPT_STEP)?,
            KeyCode::Down => self.adjust(-1.0)?,
            KeyCode::Up => self.adjust(1.0)?,
            KeyCode::PageDown => self.adjust(-5.0)?,
            KeyCode::PageUp => self.adjust(5.0)?,
            KeyCode::Home => self.set_nspt(NSPT_MIN)?,
            KeyCode::End => self.set_nspt(NSPT_MAX)?,
            KeyCode::Enter => {
                self.editing = true;
                self.input.clear();
                self.status = "Type Nspt, Enter to apply, Esc to cancel.".to_string();
            }
            KeyCode::Char('f') => {
                self.show_formulas = !self.show_formulas;
            }
            _ => {}
        }

        Ok(false)
    }

    fn handle_input_edit(&mut self, code: KeyCode) -> Result<bool, AppError> {
        match code {
            KeyCode::Esc => {
                self.editing = false;
                self.status = "Edit canceled.".to_string();
            }
            KeyCode::Enter => {
                self.editing = false;
                self.apply_input()?;
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => {
                if c.is_ascii_digit() || c == '-' {
                    self.input.push(c);
                } else if c == '.' || c == ',' {
                    self.input.push('.');
                }
            }
            _ => {}
        }
        Ok(false)
    }

    fn apply_input(&mut self) -> Result<(), AppError> {
        let trimmed = self.input.trim();
        if trimmed.is_empty() {
            self.status = "Nspt unchanged.".to_string();
            return Ok(());
        }
        let value: f64 = match trimmed.parse() {
            Ok(v) => v,
            Err(e) => {
                self.status = format!("Invalid Nspt '{trimmed}': {e}");
                return Ok(());
            }
        };
        let clamped = clamp_nspt(value);
        self.set_nspt(value)?;
        if clamped != value {
            self.status = format!("Nspt {value} clamped to {clamped:.1}");
        }
        Ok(())
    }

    fn adjust(&mut self, delta: f64) -> Result<(), AppError> {
        self.set_nspt(self.config.nspt + delta)
    }

    fn set_nspt(&mut self, nspt: f64) -> Result<(), AppError> {
        self.config.nspt = round_to_step(nspt);
        self.recompute()?;
        self.status = format!("Nspt = {:.1}", self.config.nspt);
        Ok(())
    }

    fn recompute(&mut self) -> Result<(), AppError> {
        self.run = Some(run_estimate(&self.config)?);
        Ok(())
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let input = if self.editing {
            Span::styled(
                format!("Nspt: {}▏", self.input),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                format!("Nspt: {:.1}", self.config.nspt),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )
        };

        let line = Line::from(vec![
            Span::styled("nspt", Style::default().fg(Color::Cyan)),
            Span::raw(" — friction angle and cohesion from SPT blow count | "),
            input,
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(9), Constraint::Min(0)])
            .split(area);

        if self.show_formulas {
            self.draw_formulas(frame, rows[0]);
        } else {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(rows[0]);
            self.draw_results(frame, cols[0], ParameterKind::FrictionAngle);
            self.draw_results(frame, cols[1], ParameterKind::Cohesion);
        }

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);
        self.draw_chart(frame, cols[0], ParameterKind::FrictionAngle);
        self.draw_chart(frame, cols[1], ParameterKind::Cohesion);
    }

    fn draw_results(&self, frame: &mut ratatui::Frame<'_>, area: Rect, kind: ParameterKind) {
        let block = Block::default()
            .title(format!("{} at Nspt = {:.1}", kind.display_name(), self.config.nspt))
            .borders(Borders::ALL);

        let Some(run) = &self.run else {
            frame.render_widget(Paragraph::new("Waiting for data...").block(block), area);
            return;
        };

        let set = run.point(kind);
        let mut lines: Vec<Line> = Vec::with_capacity(set.estimates.len() + 1);
        for (i, e) in set.estimates.iter().enumerate() {
            let RGBColor(r, g, b) = formula_color(i);
            lines.push(Line::from(vec![
                Span::styled("■ ", Style::default().fg(Color::Rgb(r, g, b))),
                Span::raw(format!("{:<3} {:<28} ", e.id, e.label())),
                Span::styled(kind.format_value(e.value), Style::default().fg(Color::White)),
            ]));
        }
        lines.push(Line::from(vec![
            Span::styled("● ", Style::default().fg(Color::Red)),
            Span::styled(
                format!("{:<3} {:<28} {}", "", "Mean", kind.format_value(set.mean)),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]));

        frame.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
    }

    fn draw_formulas(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let text = crate::report::format_formula_catalog();
        let p = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: false })
            .block(Block::default().title("Formulas").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect, kind: ParameterKind) {
        let block = Block::default()
            .title(format!("{} vs Nspt", kind.display_name()))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(run) = &self.run else {
            let msg = Paragraph::new("Waiting for data...")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        };

        let data = chart_data(run, kind);
        let lines: Vec<ChartLine> = data
            .curves
            .iter()
            .map(|(points, color, stroke_width)| ChartLine {
                points,
                color: *color,
                stroke_width: *stroke_width,
            })
            .collect();

        let y_label = kind.axis_label();
        let (chart_rect, insets) = chart_layout(inner);
        let widget = CorrelationChart {
            lines: &lines,
            markers: &data.markers,
            x_bounds: data.x_bounds,
            y_bounds: data.y_bounds,
            x_label: "Nspt",
            y_label: y_label.clone(),
            fmt_x: fmt_axis_x,
            fmt_y: fmt_axis_y,
        };

        frame.render_widget(widget, chart_rect);
        if let Some(insets) = insets {
            draw_axis_ticks(frame, inner, chart_rect, insets, data.x_bounds, data.y_bounds, &y_label);
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "←/→ ±0.1  ↑/↓ ±1  PgUp/PgDn ±5  Home/End 0/30  Enter type  f formulas  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Chart series for one parameter, ready for the Plotters widget.
struct ChartData {
    /// `(points, color, stroke width)` per curve, formulas first, mean last.
    curves: Vec<(Vec<(f64, f64)>, RGBColor, u32)>,
    markers: Vec<ChartMarker>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

/// Build chart series for Plotters.
///
/// Friction angle charts also show the mean curve and the mean at the input
/// point; cohesion charts show the formula curves and their input points only.
fn chart_data(run: &RunOutput, kind: ParameterKind) -> ChartData {
    let sweep = run.sweep(kind);
    let point = run.point(kind);
    let show_mean = kind == ParameterKind::FrictionAngle;

    let mut curves = Vec::with_capacity(sweep.series.len() + 1);
    let mut markers = Vec::with_capacity(point.estimates.len() + 1);

    for (i, series) in sweep.series.iter().enumerate() {
        curves.push((series.points(&sweep.nspt), formula_color(i), 1));
    }
    for (i, e) in point.estimates.iter().enumerate() {
        markers.push(ChartMarker {
            at: (point.nspt, e.value),
            color: formula_color(i),
        });
    }
    if show_mean {
        curves.push((sweep.mean_points(), MEAN_COLOR, 2));
        markers.push(ChartMarker {
            at: (point.nspt, point.mean),
            color: MEAN_POINT_COLOR,
        });
    }

    let x_bounds = [NSPT_MIN, NSPT_MAX];

    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let ys = curves
        .iter()
        .flat_map(|(points, _, _)| points.iter().map(|&(_, y)| y))
        .chain(markers.iter().map(|m| m.at.1));
    for y in ys.filter(|y| y.is_finite()) {
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    if !y_min.is_finite() || !y_max.is_finite() || y_max <= y_min {
        y_min = 0.0;
        y_max = 1.0;
    }

    let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);
    let y_bounds = [y_min - pad, y_max + pad];

    ChartData {
        curves,
        markers,
        x_bounds,
        y_bounds,
    }
}

/// Series palette: blue, green, orange, purple, brown.
///
/// Both sets share the palette prefix, so c1 is blue and c2 is green.
fn formula_color(index: usize) -> RGBColor {
    const PALETTE: [RGBColor; 5] = [
        RGBColor(30, 144, 255),
        RGBColor(50, 205, 50),
        RGBColor(255, 165, 0),
        RGBColor(186, 85, 211),
        RGBColor(165, 95, 42),
    ];
    PALETTE[index % PALETTE.len()]
}

/// Snap to the input step, then re-clamp so rounding never leaves the range.
fn round_to_step(nspt: f64) -> f64 {
    clamp_nspt((nspt / NSPT_STEP).round() * NSPT_STEP)
}

fn fmt_axis_x(v: f64) -> String {
    format!("{v:.0}")
}

fn fmt_axis_y(v: f64) -> String {
    format!("{v:.1}")
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 8,
        right: 2,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10
        || inner.height <= insets.top + insets.bottom + 5
    {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    y_label: &str,
) {
    let ticks = 5usize;
    let style = Style::default().fg(Color::Gray);

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let x_val = x_bounds[0] + u * (x_bounds[1] - x_bounds[0]);
        let x = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
        let label = format!("{x_val:.1}");
        let label_len = label.len() as u16;
        let start = x.saturating_sub((label.len() / 2) as u16);
        let y = chart.y + chart.height;
        if y >= inner.y + inner.height - 1 {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let y_val = y_bounds[0] + u * (y_bounds[1] - y_bounds[0]);
        let y = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;
        let label = format!("{y_val:.0}");
        let label_len = label.len() as u16;
        let x = inner.x + insets.left.saturating_sub(1);
        let start = x.saturating_sub(label.len() as u16);
        if start < inner.x {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    let x_label = Paragraph::new("Nspt")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    let x_rect = Rect {
        x: chart.x,
        y: chart.y + chart.height + 1,
        width: chart.width,
        height: 1,
    };
    if x_rect.y < inner.y + inner.height {
        frame.render_widget(x_label, x_rect);
    }

    let y_label = Paragraph::new(y_label.to_string())
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));
    let y_rect = Rect {
        x: inner.x,
        y: inner.y,
        width: insets.left.saturating_sub(1),
        height: 1,
    };
    frame.render_widget(y_label, y_rect);
}
