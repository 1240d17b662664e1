use std::io;
use std::panic::{self, PanicHookInfo};
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Constraint,
    style::{Color, Modifier, Style},
    symbols,
    text::Line,
    widgets::{Axis, Block, Chart, Dataset, GraphType, LegendPosition},
    Terminal,
};
use tracing::{info, warn};

use crate::error::Result;
use crate::models::{DateBucketSeries, StarTimeline};

pub const CHART_TITLE: &str = "GitHub Repository Star History";
pub const SERIES_NAME: &str = "Stars Over Time";
const DATE_LABEL_FORMAT: &str = "%Y-%m-%d";

/// Cumulative star counts laid out as chart coordinates. x is days since
/// the common era so consecutive days are one unit apart.
pub struct StarChart {
    points: Vec<(f64, f64)>,
    first_date: NaiveDate,
    last_date: NaiveDate,
    total: u64,
}

impl StarChart {
    /// Returns `None` when there is nothing to plot.
    pub fn new(series: &DateBucketSeries) -> Option<Self> {
        let first_date = series.first_date()?;
        let last_date = series.last_date()?;

        let points = series
            .points()
            .iter()
            .map(|(date, count)| (day_number(*date), *count as f64))
            .collect();

        Some(Self {
            points,
            first_date,
            last_date,
            total: series.total(),
        })
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn widget(&self) -> Chart<'_> {
        let (x_min, x_max) = if self.first_date == self.last_date {
            let day = day_number(self.first_date);
            (day - 1.0, day + 1.0)
        } else {
            (day_number(self.first_date), day_number(self.last_date))
        };
        let y_max = (self.total as f64 * 1.05).max(1.0);

        let middle_date = self.first_date + (self.last_date - self.first_date) / 2;
        let x_labels: Vec<Line> = [self.first_date, middle_date, self.last_date]
            .iter()
            .map(|d| Line::from(d.format(DATE_LABEL_FORMAT).to_string()))
            .collect();
        let y_labels: Vec<Line> = [0, self.total / 2, self.total]
            .iter()
            .map(|n| Line::from(n.to_string()))
            .collect();

        let dataset = Dataset::default()
            .name(SERIES_NAME)
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Yellow))
            .data(&self.points);

        let axis_style = Style::default().fg(Color::Gray);

        Chart::new(vec![dataset])
            .block(
                Block::bordered().title(Line::from(CHART_TITLE).style(
                    Style::default().add_modifier(Modifier::BOLD),
                )),
            )
            .x_axis(
                Axis::default()
                    .title("Date")
                    .style(axis_style)
                    .bounds([x_min, x_max])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .title("Number of Stars")
                    .style(axis_style)
                    .bounds([0.0, y_max])
                    .labels(y_labels),
            )
            .legend_position(Some(LegendPosition::TopLeft))
            .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)))
    }
}

fn day_number(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce())
}

/// Restores the terminal when dropped, also on early return.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + Sync + Send + 'static>;

/// Leaves the alternate screen before a panic message is printed, and puts
/// the previous hook back when dropped.
struct PanicHookGuard {
    previous: Option<Arc<PanicHook>>,
}

impl PanicHookGuard {
    fn install() -> Self {
        let previous: Arc<PanicHook> = Arc::new(panic::take_hook());
        let chained = previous.clone();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            (**chained)(panic_info);
        }));
        Self {
            previous: Some(previous),
        }
    }
}

impl Drop for PanicHookGuard {
    fn drop(&mut self) {
        // Dropping our hook releases its clone of `previous`
        drop(panic::take_hook());
        let Some(previous) = self.previous.take() else {
            return;
        };
        match Arc::try_unwrap(previous) {
            Ok(hook) => panic::set_hook(hook),
            Err(shared) => panic::set_hook(Box::new(move |panic_info| (**shared)(panic_info))),
        }
    }
}

/// Shows the cumulative chart full-screen and blocks until the user presses
/// `q`, `Esc` or `Enter`.
pub fn plot_stars(timeline: &StarTimeline) -> Result<()> {
    info!("Processing star data...");
    let series = DateBucketSeries::from_timeline(timeline);

    let Some(chart) = StarChart::new(&series) else {
        warn!("No star data to chart");
        return Ok(());
    };

    info!("Generating chart...");
    show_chart(&chart)?;
    info!("Chart generated successfully!");
    Ok(())
}

fn show_chart(chart: &StarChart) -> Result<()> {
    let _hook = PanicHookGuard::install();
    enable_raw_mode()?;
    let _screen = TerminalGuard;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    loop {
        terminal.draw(|frame| frame.render_widget(chart.widget(), frame.area()))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press
                && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter)
            {
                return Ok(());
            }
        }
    }
}
