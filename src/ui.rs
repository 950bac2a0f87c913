// 🖥️ Planner UI - Terminal Front End
// Stepper form + live totals, rendered with ratatui

use crate::plan::CostPlan;
use crate::routing::FieldKind;
use crate::seed::SeedParams;
use crate::stepper::{Stepper, ValueChange};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;

/// Where a form row's committed value goes. Stepper rows carry a routing
/// tag and flow through the notification path; the two fee rows belong to
/// the planner itself and bypass routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowTarget {
    Routed,
    FeePercent,
    FixedFee,
}

pub struct FormRow {
    pub stepper: Stepper,
    pub target: RowTarget,
}

pub struct App {
    pub rows: Vec<FormRow>,
    pub plan: CostPlan,
    pub state: TableState,
    pub entry: Option<String>,
    pub status: String,
}

/// The default form: one stepper per routed field plus the planner-owned
/// fee rows. Bounds and steps are chosen so steps divide the ranges.
fn default_rows() -> Result<Vec<FormRow>> {
    let rows = vec![
        FormRow {
            stepper: Stepper::new("Ice Cost ($/hr)", 300.0, 0.0, 1000.0, 25.0)?
                .with_field(FieldKind::Ice),
            target: RowTarget::Routed,
        },
        FormRow {
            stepper: Stepper::new("Hours of Ice Time", 50.0, 0.0, 200.0, 5.0)?
                .with_field(FieldKind::Hours),
            target: RowTarget::Routed,
        },
        FormRow {
            stepper: Stepper::new("Coach Cost", 3000.0, 0.0, 20000.0, 250.0)?
                .with_field(FieldKind::Coach),
            target: RowTarget::Routed,
        },
        FormRow {
            stepper: Stepper::new("Jersey Cost", 88.0, 0.0, 500.0, 1.0)?
                .with_field(FieldKind::Jersey),
            target: RowTarget::Routed,
        },
        FormRow {
            stepper: Stepper::new("Number of Players", 1.0, 1.0, 50.0, 1.0)?
                .with_field(FieldKind::Players),
            target: RowTarget::Routed,
        },
        FormRow {
            stepper: Stepper::new("Fee Percent (%)", 2.0, 0.0, 100.0, 0.5)?,
            target: RowTarget::FeePercent,
        },
        FormRow {
            stepper: Stepper::new("Fixed Fee", 0.99, 0.0, 50.0, 0.01)?,
            target: RowTarget::FixedFee,
        },
    ];

    Ok(rows)
}

impl App {
    /// Build the form, apply seed overrides through the steppers' clamping
    /// path, and sync the plan to the (possibly clamped) stepper values.
    pub fn new(params: &SeedParams) -> Result<Self> {
        let mut rows = default_rows()?;

        for row in &mut rows {
            row.stepper.seed_from_params(params);
        }

        let mut plan = CostPlan::new();
        if let Some(name) = &params.team_name {
            plan.set_team_name(name.clone());
        }
        for row in &rows {
            let value = row.stepper.value();
            match row.target {
                RowTarget::Routed => {
                    if let Some(kind) = row.stepper.field() {
                        plan.set_field(kind, value);
                    }
                }
                RowTarget::FeePercent => plan.set_fee_percent(value),
                RowTarget::FixedFee => plan.set_fixed_fee(value),
            }
        }

        let mut state = TableState::default();
        state.select(Some(0));

        Ok(App {
            rows,
            plan,
            state,
            entry: None,
            status: String::new(),
        })
    }

    pub fn selected(&self) -> usize {
        self.state.selected().unwrap_or(0)
    }

    pub fn next(&mut self) {
        let len = self.rows.len();
        let i = match self.state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.rows.len();
        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn increment_selected(&mut self) {
        let i = self.selected();
        let target = self.rows[i].target;
        let change = self.rows[i].stepper.increment();
        self.route(target, change);
    }

    pub fn decrement_selected(&mut self) {
        let i = self.selected();
        let target = self.rows[i].target;
        let change = self.rows[i].stepper.decrement();
        self.route(target, change);
    }

    /// Open the direct-entry buffer with the first typed character.
    pub fn start_entry(&mut self, c: char) {
        self.entry = Some(c.to_string());
    }

    pub fn push_entry(&mut self, c: char) {
        if let Some(buffer) = &mut self.entry {
            buffer.push(c);
        }
    }

    pub fn backspace_entry(&mut self) {
        if let Some(buffer) = &mut self.entry {
            buffer.pop();
        }
    }

    pub fn cancel_entry(&mut self) {
        self.entry = None;
    }

    /// Commit the entry buffer through the stepper's parse-and-clamp path.
    /// Unparseable text is discarded and the row keeps its last valid value.
    pub fn commit_entry(&mut self) {
        let buffer = match self.entry.take() {
            Some(b) => b,
            None => return,
        };

        let i = self.selected();
        let target = self.rows[i].target;
        let before = self.rows[i].stepper.value();
        let change = self.rows[i].stepper.set_from_input(&buffer);

        if change.is_none() && buffer.trim().parse::<f64>().is_err() {
            self.status = format!("'{}' discarded, kept {}", buffer, format_value(before));
        }
        self.route(target, change);
    }

    fn route(&mut self, target: RowTarget, change: Option<ValueChange>) {
        let change = match change {
            Some(c) => c,
            None => return,
        };

        match target {
            RowTarget::Routed => match self.plan.apply(&change) {
                Some(kind) => {
                    self.status = format!("{} = {}", kind.name(), format_value(change.value));
                }
                None => {
                    self.status = format!("'{}' matched no field", change.label);
                }
            },
            RowTarget::FeePercent => {
                self.plan.set_fee_percent(change.value);
                self.status = format!("fee_percent = {}", format_value(change.value));
            }
            RowTarget::FixedFee => {
                self.plan.set_fixed_fee(change.value);
                self.status = format!("fixed_fee = {}", format_value(change.value));
            }
        }
    }
}

/// Whole numbers drop the decimals, everything else gets two places.
fn format_value(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{:.0}", v)
    } else {
        format!("{:.2}", v)
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if app.entry.is_some() {
                match key.code {
                    KeyCode::Enter => app.commit_entry(),
                    KeyCode::Esc => app.cancel_entry(),
                    KeyCode::Backspace => app.backspace_entry(),
                    KeyCode::Char(c) if c.is_ascii_digit() || c == '.' || c == '-' => {
                        app.push_entry(c);
                    }
                    _ => {}
                }
            } else {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Down | KeyCode::Char('j') => app.next(),
                    KeyCode::Up | KeyCode::Char('k') => app.previous(),
                    KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') => {
                        app.increment_selected();
                    }
                    KeyCode::Left | KeyCode::Char('-') => app.decrement_selected(),
                    KeyCode::Home => app.state.select(Some(0)),
                    KeyCode::End => app.state.select(Some(app.rows.len() - 1)),
                    KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => app.start_entry(c),
                    _ => {}
                }
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with team name
            Constraint::Min(0),    // Stepper form
            Constraint::Length(6), // Totals
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);
    render_form(f, chunks[1], app);
    render_totals(f, chunks[2], app);
    render_status_bar(f, chunks[3], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let header_text = vec![Line::from(vec![
        Span::styled(
            format!(" 🏒 {} ", app.plan.team_name),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ "),
        Span::styled("Season Cost Planner", Style::default().fg(Color::White)),
    ])];

    let header = Paragraph::new(header_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn render_form(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["Field", "Value", "Range", "Step"].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let selected = app.selected();
    let entry = app.entry.clone();

    let rows = app.rows.iter().enumerate().map(|(i, row)| {
        let s = &row.stepper;

        let value_cell = match (&entry, i == selected) {
            (Some(buffer), true) => Cell::from(format!("{}▏", buffer)).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            _ => Cell::from(format_value(s.value())).style(Style::default().fg(Color::Green)),
        };

        let bounds = format!(
            "{}..{}{}{}",
            format_value(s.min()),
            format_value(s.max()),
            if s.can_decrement() { "" } else { " ⊣" },
            if s.can_increment() { "" } else { " ⊢" },
        );

        let cells = vec![
            Cell::from(s.label().to_string()),
            value_cell,
            Cell::from(bounds).style(Style::default().fg(Color::DarkGray)),
            Cell::from(format_value(s.step())).style(Style::default().fg(Color::DarkGray)),
        ];

        Row::new(cells).height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(24),
            Constraint::Length(12),
            Constraint::Length(16),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Team Costs "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_totals(f: &mut Frame, area: Rect, app: &App) {
    let per_player_color = if app.plan.cost_per_player.is_finite() {
        Color::Yellow
    } else {
        Color::Red
    };

    let content = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "  Total Cost:      ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                app.plan.total_display(),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(
                "  Cost Per Player: ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                app.plan.cost_per_player_display(),
                Style::default()
                    .fg(per_player_color)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
    ];

    let totals = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Season Totals "),
    );

    f.render_widget(totals, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = vec![];

    if app.entry.is_some() {
        status_spans.push(Span::styled("Enter", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Commit | "));
        status_spans.push(Span::styled("Esc", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Cancel"));
    } else {
        status_spans.push(Span::styled("↑/↓", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Field | "));
        status_spans.push(Span::styled("←/→", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Step | "));
        status_spans.push(Span::styled("0-9", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Type value | "));
        status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
        status_spans.push(Span::raw(" Quit"));
    }

    if !app.status.is_empty() {
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled(
            app.status.clone(),
            Style::default().fg(Color::Green),
        ));
    }

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_starts_in_sync_with_plan() {
        let app = App::new(&SeedParams::default()).unwrap();

        assert_eq!(app.plan.ice_cost, 300.0);
        assert_eq!(app.plan.num_players, 1.0);
        assert!((app.plan.total_cost - 18450.75).abs() < 1e-9);
    }

    #[test]
    fn test_increment_flows_into_plan() {
        let mut app = App::new(&SeedParams::default()).unwrap();

        // First row is the ice cost stepper.
        app.state.select(Some(0));
        app.increment_selected();

        assert_eq!(app.rows[0].stepper.value(), 325.0);
        assert_eq!(app.plan.ice_cost, 325.0);
    }

    #[test]
    fn test_fee_rows_bypass_routing() {
        let mut app = App::new(&SeedParams::default()).unwrap();

        let fee_row = app
            .rows
            .iter()
            .position(|r| r.target == RowTarget::FeePercent)
            .unwrap();
        app.state.select(Some(fee_row));
        app.increment_selected();

        assert_eq!(app.plan.fee_percent, 2.5);
    }

    #[test]
    fn test_garbage_entry_keeps_value() {
        let mut app = App::new(&SeedParams::default()).unwrap();

        app.state.select(Some(0));
        app.start_entry('1');
        app.push_entry('.');
        app.push_entry('.');
        app.commit_entry();

        assert_eq!(app.rows[0].stepper.value(), 300.0);
        assert_eq!(app.plan.ice_cost, 300.0);
        assert_eq!(app.entry, None);
    }

    #[test]
    fn test_entry_commit_clamps_and_updates_plan() {
        let mut app = App::new(&SeedParams::default()).unwrap();

        app.state.select(Some(0));
        app.start_entry('9');
        for c in "9999".chars() {
            app.push_entry(c);
        }
        app.commit_entry();

        // 99999 clamps to the ice stepper's max.
        assert_eq!(app.rows[0].stepper.value(), 1000.0);
        assert_eq!(app.plan.ice_cost, 1000.0);
    }

    #[test]
    fn test_seeded_app_clamps_past_bounds() {
        let params = SeedParams::from_query("iceCost=5000&numPlayers=12");
        let app = App::new(&params).unwrap();

        assert_eq!(app.plan.ice_cost, 1000.0);
        assert_eq!(app.plan.num_players, 12.0);
    }

    #[test]
    fn test_selection_wraps() {
        let mut app = App::new(&SeedParams::default()).unwrap();
        let len = app.rows.len();

        app.state.select(Some(len - 1));
        app.next();
        assert_eq!(app.selected(), 0);

        app.previous();
        assert_eq!(app.selected(), len - 1);
    }
}
