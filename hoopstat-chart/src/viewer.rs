//! Interactive terminal viewer.
//!
//! Full-screen ratatui view of a [`FigureLayout`]: title bar, the 2×3 panel
//! grid, and a key hint footer. `Tab`/arrows move focus, `q`/`Esc` quits.

use std::io::{self, stdout};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::{Frame, Terminal};
use tracing::debug;

use crate::box_plot::BoxPlotPanel;
use crate::error::ChartError;
use crate::layout::{FigureLayout, GRID};
use crate::theme::Theme;

/// Focus and lifecycle of the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerState {
    pub focus: usize,
    pub running: bool,
    panel_count: usize,
}

impl ViewerState {
    pub fn new(panel_count: usize) -> Self {
        Self {
            focus: 0,
            running: true,
            panel_count,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press || self.panel_count == 0 {
            return;
        }
        let n = self.panel_count;
        let cols = GRID.1;
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.running = false,
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => self.focus = (self.focus + 1) % n,
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => self.focus = (self.focus + n - 1) % n,
            KeyCode::Down | KeyCode::Char('j') if self.focus + cols < n => self.focus += cols,
            KeyCode::Up | KeyCode::Char('k') if self.focus >= cols => self.focus -= cols,
            _ => {}
        }
    }
}

/// Show the figure until the user quits. Restores the terminal on every exit path.
pub fn show_interactive(layout: &FigureLayout) -> Result<(), ChartError> {
    enable_raw_mode()?;
    let mut out = stdout();
    if let Err(e) = execute!(out, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e.into());
    }

    let result = Terminal::new(CrosstermBackend::new(out))
        .map_err(ChartError::from)
        .and_then(|mut terminal| {
            let outcome = run(&mut terminal, layout);
            let _ = terminal.show_cursor();
            outcome
        });

    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
    result
}

fn run<B: Backend>(terminal: &mut Terminal<B>, layout: &FigureLayout) -> Result<(), ChartError> {
    let theme = Theme::default();
    let mut state = ViewerState::new(layout.panels.len());
    terminal.clear()?;

    while state.running {
        terminal.draw(|f| draw(f, layout, &state, &theme))?;

        // 50ms poll keeps resize redraws responsive.
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                state.handle_key(key);
                debug!(focus = state.focus, "viewer key");
            }
        }
    }
    Ok(())
}

pub fn draw(f: &mut Frame, layout: &FigureLayout, state: &ViewerState, theme: &Theme) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(6), Constraint::Length(1)])
        .split(f.area());

    let title = Paragraph::new(Line::from(Span::styled(
        layout.title.clone(),
        Style::default().fg(theme.text_primary).add_modifier(Modifier::BOLD),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.muted))
            .style(Style::default().bg(theme.background)),
    );
    f.render_widget(title, outer[0]);

    let cells = grid_cells(outer[1]);
    for (i, panel) in layout.panels.iter().enumerate() {
        let (row, col) = panel.cell;
        if let Some(area) = cells.get(row * GRID.1 + col) {
            f.render_widget(BoxPlotPanel::new(panel, theme).focused(i == state.focus), *area);
        }
    }

    let footer = Paragraph::new(Line::from(vec![
        Span::styled(" Tab/\u{2190}\u{2192}\u{2191}\u{2193} ", Style::default().fg(theme.accent)),
        Span::styled("move focus   ", Style::default().fg(theme.text_secondary)),
        Span::styled("q/Esc ", Style::default().fg(theme.accent)),
        Span::styled("quit", Style::default().fg(theme.text_secondary)),
    ]));
    f.render_widget(footer, outer[2]);
}

fn grid_cells(area: Rect) -> Vec<Rect> {
    let (rows, cols) = GRID;
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
        .split(area);
    row_areas
        .iter()
        .flat_map(|row| {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, cols as u32); cols])
                .split(*row)
                .to_vec()
        })
        .collect()
}
