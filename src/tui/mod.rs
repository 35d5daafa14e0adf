//! Ratatui-based terminal UI.
//!
//! The TUI keeps one `Selection` (period preset or custom window, composition
//! year, clicked slice) and re-runs the shared pipeline whenever it changes.
//! The left column shows the period chart and statistics; the right column
//! shows the composition for the selected year and the public/private split.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use crate::app::pipeline::{DashboardRun, run_dashboard};
use crate::domain::indicators::short_label;
use crate::domain::{DashboardConfig, PeriodPreset, PeriodSummary, Selection, YearBounds, YearRange};
use crate::error::AppError;
use crate::io::ingest::DebtTable;
use crate::io::snapshot::{DashboardSnapshot, write_timestamped_snapshot};

mod plotters_chart;

use plotters_chart::{DebtPlottersChart, SERIES_TERM_COLORS};

/// Directory the `e` key writes snapshots into.
const EXPORT_DIR: &str = "exports";

/// Start the TUI over an already-loaded table.
pub fn run(table: DebtTable, config: DashboardConfig) -> Result<(), AppError> {
    let mut app = App::new(table, config)?;

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
    table: DebtTable,
    config: DashboardConfig,
    bounds: YearBounds,
    selection: Selection,
    /// Custom window to restore when cycling back to the custom preset.
    last_custom: Option<YearRange>,
    run: DashboardRun,
    /// Highlighted row of the composition list.
    cursor: usize,
    export_dir: PathBuf,
    status: String,
}

impl App {
    fn new(table: DebtTable, config: DashboardConfig) -> Result<Self, AppError> {
        let bounds = table
            .bounds()
            .ok_or_else(|| AppError::new(3, "The table has no years."))?;
        let selection =
            Selection::initial(table.years()).ok_or_else(|| AppError::new(3, "The table has no years."))?;
        let run = run_dashboard(&table, &selection, &config);
        let status = format!("Loaded {} rows from {}", table.rows_used(), table.source().display());

        Ok(Self {
            table,
            config,
            bounds,
            selection,
            last_custom: None,
            run,
            cursor: 0,
            export_dir: PathBuf::from(EXPORT_DIR),
            status,
        })
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
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
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

    /// Apply one key press. Returns `true` when the session should end.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('p') => self.switch_preset(self.selection.preset.next()),
            KeyCode::Char('P') => self.switch_preset(self.selection.preset.prev()),
            KeyCode::Char('[') => self.shift_custom(-1, 0),
            KeyCode::Char(']') => self.shift_custom(1, 0),
            KeyCode::Char('{') => self.shift_custom(0, -1),
            KeyCode::Char('}') => self.shift_custom(0, 1),
            KeyCode::Left => self.step_year(-1),
            KeyCode::Right => self.step_year(1),
            KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.cursor + 1 < self.slice_count() {
                    self.cursor += 1;
                }
            }
            KeyCode::Enter => self.click_slice(),
            KeyCode::Esc => {
                if self.selection.clicked_slice.is_some() {
                    let mut selection = self.selection.clone();
                    selection.clicked_slice = None;
                    self.set_selection(selection);
                    self.status = "Slice cleared.".to_string();
                }
            }
            KeyCode::Char('e') => self.export_snapshot(),
            _ => {}
        }
        false
    }

    fn switch_preset(&mut self, preset: PeriodPreset) {
        if self.selection.preset == PeriodPreset::Custom {
            self.last_custom = Some(self.selection.range);
        }
        let selection = self
            .selection
            .clone()
            .with_preset(preset, self.bounds, self.last_custom);
        self.set_selection(selection);
        self.status = format!("period: {}", preset.display_name());
    }

    /// Move the custom window's start/end by the given deltas, switching to
    /// the custom preset. The window stays inside the data and never inverts.
    fn shift_custom(&mut self, start_delta: i32, end_delta: i32) {
        let current = self.bounds.clamp_range(self.selection.range);
        let start = self.bounds.clamp(current.start + start_delta).min(current.end);
        let end = self.bounds.clamp(current.end + end_delta).max(start);

        let mut selection = self.selection.clone();
        selection.preset = PeriodPreset::Custom;
        selection.range = YearRange::new(start, end);
        self.last_custom = Some(selection.range);
        self.set_selection(selection);
        self.status = format!("custom period: {start}-{end}");
    }

    /// Move to the previous/next year present in the table.
    fn step_year(&mut self, delta: i32) {
        let years = self.table.years();
        if years.is_empty() {
            return;
        }
        let idx = years
            .iter()
            .position(|&y| y == self.selection.year)
            .unwrap_or(0) as i64;
        let next = (idx + delta as i64).clamp(0, years.len() as i64 - 1) as usize;
        let Some(&year) = years.get(next) else {
            return;
        };
        if year == self.selection.year {
            return;
        }

        let mut selection = self.selection.clone();
        selection.year = year;
        self.set_selection(selection);
        self.status = format!("year: {year}");
    }

    fn click_slice(&mut self) {
        let Some(name) = self
            .run
            .composition
            .as_ref()
            .and_then(|c| c.entries.get(self.cursor))
            .map(|e| e.indicator.clone())
        else {
            return;
        };

        let mut selection = self.selection.clone();
        selection.clicked_slice = Some(name.clone());
        self.set_selection(selection);
        self.status = format!("selected: {}", short_label(&name));
    }

    fn export_snapshot(&mut self) {
        let snapshot = DashboardSnapshot::from_run(&self.run, self.table.source());
        self.status = match write_timestamped_snapshot(&self.export_dir, &snapshot) {
            Ok(path) => format!("Wrote snapshot: {}", path.display()),
            Err(err) => format!("Export failed: {err}"),
        };
    }

    /// Replace the selection and recompute both views.
    fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
        self.run = run_dashboard(&self.table, &self.selection, &self.config);
        self.cursor = self.cursor.min(self.slice_count().saturating_sub(1));
    }

    fn slice_count(&self) -> usize {
        self.run.composition.as_ref().map(|c| c.entries.len()).unwrap_or(0)
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let sel = &self.selection;
        let lines = vec![
            Line::from(vec![
                Span::styled("debtdash", Style::default().fg(Color::Cyan)),
                Span::raw(" · Lebanon external debt"),
            ]),
            Line::from(Span::styled(
                format!(
                    "period: {} ({}-{}) | year: {} | slice: {} | source: {}",
                    sel.preset.display_name(),
                    sel.range.start,
                    sel.range.end,
                    sel.year,
                    sel.clicked_slice.as_deref().map(short_label).unwrap_or("-"),
                    self.table.source().display(),
                ),
                Style::default().fg(Color::Gray),
            )),
        ];

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(9)])
            .split(columns[0]);
        self.draw_chart(frame, left[0]);
        self.draw_period_stats(frame, left[1]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(8)])
            .split(columns[1]);
        self.draw_composition(frame, right[0]);
        self.draw_split(frame, right[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Debt trends ($B)").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(period) = &self.run.period else {
            let msg = Paragraph::new("No data available for the selected time period.")
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        // Bottom line is the legend.
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner);

        let series = chart_series(period);
        let (x_bounds, y_bounds) = chart_bounds(period.range, &series);
        let (chart_rect, insets) = chart_layout(rows[0]);
        let widget = DebtPlottersChart {
            series: &series,
            x_bounds,
            y_bounds,
            x_label: "year",
            y_label: "US$ B",
        };
        frame.render_widget(widget, chart_rect);
        if let Some(insets) = insets {
            draw_axis_ticks(frame, rows[0], chart_rect, insets, x_bounds, y_bounds);
        }

        let legend: Vec<Span> = period
            .series
            .iter()
            .enumerate()
            .flat_map(|(idx, s)| {
                let color = SERIES_TERM_COLORS[idx % SERIES_TERM_COLORS.len()];
                [
                    Span::styled("── ", Style::default().fg(color)),
                    Span::raw(format!("{}  ", short_label(&s.indicator))),
                ]
            })
            .collect();
        frame.render_widget(Paragraph::new(Line::from(legend)), rows[1]);
    }

    fn draw_period_stats(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Period statistics").borders(Borders::ALL);
        let sel = &self.selection;

        let Some(period) = &self.run.period else {
            let p = Paragraph::new(sel.preset.context(sel.range)).block(block);
            frame.render_widget(p, area);
            return;
        };

        let mut lines = vec![Line::from(Span::styled(
            format!(
                "{} | {} years | {} data points",
                sel.preset.context(sel.range),
                period.duration_years,
                period.data_points
            ),
            Style::default().fg(Color::Gray),
        ))];

        for (idx, s) in period.indicators.iter().enumerate() {
            let color = SERIES_TERM_COLORS[idx % SERIES_TERM_COLORS.len()];
            let vol = s
                .stats
                .stddev
                .map(|v| format!("{v:.2}"))
                .unwrap_or_else(|| "-".to_string());
            lines.push(Line::from(vec![
                Span::styled(format!("{:<28}", truncate(short_label(&s.indicator), 28)), Style::default().fg(color)),
                Span::raw(format!(
                    " avg {:>7.2}  vol {:>6}  total {:>+7.1}%  annual {:>+6.1}%",
                    s.stats.mean, vol, s.stats.total_growth_pct, s.stats.annual_growth_pct
                )),
            ]));
        }

        if let Some(ext) = &period.extremes {
            lines.push(Line::from(Span::styled(
                format!(
                    "peak ${:.1}B ({}) | lowest ${:.1}B ({}) | range ${:.1}B",
                    ext.peak_value,
                    ext.peak_year,
                    ext.trough_value,
                    ext.trough_year,
                    ext.range()
                ),
                Style::default().fg(Color::Gray),
            )));
        }

        frame.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
    }

    fn draw_composition(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let title = format!("Composition {}", self.selection.year);
        let block = Block::default().title(title).borders(Borders::ALL);

        let Some(comp) = &self.run.composition else {
            let p = Paragraph::new("No debt composition data available for the selected year.")
                .style(Style::default().fg(Color::Yellow))
                .block(block);
            frame.render_widget(p, area);
            return;
        };

        let clicked = self.selection.clicked_slice.as_deref();
        let items: Vec<ListItem> = comp
            .entries
            .iter()
            .enumerate()
            .map(|(idx, e)| {
                let share = e.share_pct.map(|p| format!("{p:>5.1}%")).unwrap_or_else(|| "  n/a".to_string());
                let mut style = Style::default();
                if idx == comp.largest {
                    style = style.add_modifier(Modifier::BOLD);
                }
                if clicked == Some(e.indicator.as_str()) {
                    style = style.fg(Color::Green);
                }
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:<26}", truncate(short_label(&e.indicator), 26)), style),
                    Span::raw(format!(" {:>7.2} {share} ", e.value_billions)),
                    Span::styled(share_bar(e.share_pct, 12), Style::default().fg(Color::Cyan)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(self.cursor));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_split(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Public / private").borders(Borders::ALL);
        let Some(comp) = &self.run.composition else {
            frame.render_widget(block, area);
            return;
        };

        let mut lines = vec![
            Line::from(format!("Total debt: ${:.1}B", comp.total)),
            Line::from(vec![
                Span::raw(format!("Public  ${:>6.1}B {:>5.1}% ", comp.public_total, comp.public_pct)),
                Span::styled(share_bar(Some(comp.public_pct), 12), Style::default().fg(Color::Cyan)),
            ]),
            Line::from(vec![
                Span::raw(format!("Private ${:>6.1}B {:>5.1}% ", comp.private_total, comp.private_pct)),
                Span::styled(share_bar(Some(comp.private_pct), 12), Style::default().fg(Color::Magenta)),
            ]),
        ];

        if let Some(largest) = comp.largest_component() {
            lines.push(Line::from(Span::styled(
                format!("Largest: {}", short_label(&largest.indicator)),
                Style::default().fg(Color::Gray),
            )));
        }

        match (self.selection.clicked_slice.as_deref(), self.run.clicked_slice()) {
            (Some(_), Some(entry)) => lines.push(Line::from(Span::styled(
                format!("{}: ${:.2} Billion", short_label(&entry.indicator), entry.value_billions),
                Style::default().fg(Color::Green),
            ))),
            (Some(name), None) => lines.push(Line::from(Span::styled(
                format!("{}: not reported this year", short_label(name)),
                Style::default().fg(Color::Yellow),
            ))),
            _ => {}
        }

        frame.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "p/P period  [/] start  {/} end  ←/→ year  ↑/↓ slice  Enter select  Esc clear  e export  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// `(year, billions)` lines for Plotters, in the period's indicator order.
fn chart_series(period: &PeriodSummary) -> Vec<Vec<(f64, f64)>> {
    period
        .series
        .iter()
        .map(|s| s.points.iter().map(|&(year, v)| (year as f64, v)).collect())
        .collect()
}

/// Axis bounds: the selected window on x, the padded value range on y.
fn chart_bounds(range: YearRange, series: &[Vec<(f64, f64)>]) -> ([f64; 2], [f64; 2]) {
    let mut x_bounds = [range.start as f64, range.end as f64];
    if x_bounds[1] <= x_bounds[0] {
        x_bounds = [x_bounds[0] - 0.5, x_bounds[0] + 0.5];
    }

    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(_, y) in series.iter().flatten() {
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if !y_min.is_finite() || !y_max.is_finite() {
        return (x_bounds, [0.0, 1.0]);
    }
    if y_max <= y_min {
        y_min -= 0.5;
        y_max += 0.5;
    }

    let pad = (y_max - y_min) * 0.05;
    (x_bounds, [y_min - pad, y_max + pad])
}

/// Horizontal bar for a percentage share; empty when the share is undefined.
fn share_bar(pct: Option<f64>, width: usize) -> String {
    let Some(pct) = pct.filter(|p| p.is_finite()) else {
        return String::new();
    };
    let filled = ((pct.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    "█".repeat(filled)
}

fn truncate(s: &str, max: usize) -> String {
    crate::report::format::truncate(s, max)
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

    if inner.width <= insets.left + insets.right + 10 || inner.height <= insets.top + insets.bottom + 5 {
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
) {
    let ticks = 5usize;
    let style = Style::default().fg(Color::Gray);

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let x_val = x_bounds[0] + u * (x_bounds[1] - x_bounds[0]);
        let x = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
        let label = format!("{x_val:.0}");
        let label_len = label.len() as u16;
        let start = x.saturating_sub(label_len / 2);
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
        let label = format!("{y_val:.1}");
        let label_len = label.len() as u16;
        let x = inner.x + insets.left.saturating_sub(1);
        let start = x.saturating_sub(label_len);
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

    let x_label = Paragraph::new("year")
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

    let y_label = Paragraph::new("US$ B").style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));
    let y_rect = Rect {
        x: inner.x,
        y: inner.y,
        width: insets.left.saturating_sub(1),
        height: 1,
    };
    frame.render_widget(y_label, y_rect);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DebtRecord;

    fn record(code: &str, name: &str, year: i32, billions: f64) -> DebtRecord {
        DebtRecord {
            indicator_code: code.to_string(),
            indicator_name: name.to_string(),
            year,
            value: billions * 1e9,
        }
    }

    fn app() -> App {
        let mut records = Vec::new();
        for year in 2015..=2023 {
            let b = (year - 2014) as f64;
            records.push(record("DT.DOD.DECT.CD", "External debt stocks, total (US$)", year, 10.0 * b));
            records.push(record("DT.NFL.PRVT.CD", "Private debt (US$)", year, 4.0 * b));
            records.push(record("DT.DOD.DPPG.CD", "Public and publicly guaranteed debt (US$)", year, 6.0 * b));
        }
        let table = DebtTable::from_records("lebanon.csv", records);
        App::new(table, DashboardConfig::for_path("lebanon.csv")).unwrap()
    }

    #[test]
    fn starts_on_post_crisis_and_fifth_latest_year() {
        let app = app();
        assert_eq!(app.selection.preset, PeriodPreset::PostCrisis);
        assert_eq!(app.selection.range, YearRange::new(2019, 2023));
        assert_eq!(app.selection.year, 2019);
        assert!(app.run.period.is_some());
        assert!(app.run.composition.is_some());
    }

    #[test]
    fn preset_keys_cycle_and_recompute() {
        let mut app = app();
        assert!(!app.handle_key(KeyCode::Char('p')));
        assert_eq!(app.selection.preset, PeriodPreset::PreCrisis);
        assert_eq!(app.run.selection.preset, PeriodPreset::PreCrisis);

        app.handle_key(KeyCode::Char('P'));
        app.handle_key(KeyCode::Char('P'));
        // First entry into Custom starts at 2010, clamped to the data.
        assert_eq!(app.selection.preset, PeriodPreset::Custom);
        assert_eq!(app.selection.range, YearRange::new(2015, 2023));
    }

    #[test]
    fn custom_window_defaults_to_2010_and_is_restored() {
        let records = (1970..=2023)
            .map(|year| record("DT.DOD.DECT.CD", "External debt stocks, total (US$)", year, 1.0))
            .collect();
        let table = DebtTable::from_records("lebanon.csv", records);
        let mut app = App::new(table, DashboardConfig::for_path("lebanon.csv")).unwrap();

        app.handle_key(KeyCode::Char('P'));
        assert_eq!(app.selection.preset, PeriodPreset::Custom);
        assert_eq!(app.selection.range, YearRange::new(2010, 2023));

        app.handle_key(KeyCode::Char('['));
        assert_eq!(app.selection.range, YearRange::new(2009, 2023));

        // Leave Custom and come back: the edited window survives.
        app.handle_key(KeyCode::Char('p'));
        assert_eq!(app.selection.preset, PeriodPreset::PostCrisis);
        assert_eq!(app.selection.range, YearRange::new(2019, 2023));
        app.handle_key(KeyCode::Char('P'));
        assert_eq!(app.selection.range, YearRange::new(2009, 2023));
    }

    #[test]
    fn custom_window_keys_clamp_and_never_invert() {
        let mut app = app();
        app.handle_key(KeyCode::Char('}'));
        assert_eq!(app.selection.preset, PeriodPreset::Custom);
        assert_eq!(app.selection.range, YearRange::new(2019, 2023));

        for _ in 0..10 {
            app.handle_key(KeyCode::Char(']'));
        }
        assert_eq!(app.selection.range, YearRange::new(2023, 2023));

        for _ in 0..20 {
            app.handle_key(KeyCode::Char('['));
        }
        assert_eq!(app.selection.range, YearRange::new(2015, 2023));

        app.handle_key(KeyCode::Char('{'));
        assert_eq!(app.selection.range, YearRange::new(2015, 2022));
    }

    #[test]
    fn year_keys_stay_within_table_years() {
        let mut app = app();
        app.handle_key(KeyCode::Right);
        assert_eq!(app.selection.year, 2020);
        for _ in 0..20 {
            app.handle_key(KeyCode::Left);
        }
        assert_eq!(app.selection.year, 2015);
        assert_eq!(app.run.composition.as_ref().map(|c| c.year), Some(2015));
    }

    #[test]
    fn enter_clicks_slice_and_esc_clears_it() {
        let mut app = app();
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Enter);
        let clicked = app.run.clicked_slice().map(|e| e.indicator.clone());
        assert_eq!(clicked.as_deref(), app.selection.clicked_slice.as_deref());
        assert!(clicked.is_some());

        app.handle_key(KeyCode::Esc);
        assert_eq!(app.selection.clicked_slice, None);
        assert!(app.run.clicked_slice().is_none());
    }

    #[test]
    fn cursor_stays_on_a_slice() {
        let mut app = app();
        for _ in 0..50 {
            app.handle_key(KeyCode::Down);
        }
        assert_eq!(app.cursor, app.slice_count() - 1);
        for _ in 0..50 {
            app.handle_key(KeyCode::Up);
        }
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn export_key_writes_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app();
        app.export_dir = dir.path().join("exports");
        app.handle_key(KeyCode::Char('e'));
        assert!(app.status.starts_with("Wrote snapshot"), "{}", app.status);
        assert_eq!(std::fs::read_dir(&app.export_dir).unwrap().count(), 1);
    }

    #[test]
    fn q_quits() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn chart_bounds_pad_values_and_widen_single_year() {
        let series = vec![vec![(2019.0, 10.0), (2020.0, 20.0)]];
        let (x, y) = chart_bounds(YearRange::new(2019, 2020), &series);
        assert_eq!(x, [2019.0, 2020.0]);
        assert!((y[0] - 9.5).abs() < 1e-12);
        assert!((y[1] - 20.5).abs() < 1e-12);

        let (x, y) = chart_bounds(YearRange::new(2019, 2019), &[vec![(2019.0, 5.0)]]);
        assert_eq!(x, [2018.5, 2019.5]);
        assert!(y[0] < 5.0 && y[1] > 5.0);

        let (_, y) = chart_bounds(YearRange::new(2019, 2020), &[]);
        assert_eq!(y, [0.0, 1.0]);
    }

    #[test]
    fn share_bars() {
        assert_eq!(share_bar(Some(50.0), 10).chars().count(), 5);
        assert_eq!(share_bar(Some(150.0), 10).chars().count(), 10);
        assert_eq!(share_bar(None, 10), "");
    }
}
