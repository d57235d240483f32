use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
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

use dispatch_board::{
    aggregate_transactions, DateInterval, FinancialSummary, FinancialTransaction, JobSource,
    ListQuery, Technician, TechnicianStatus,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Technicians,
    JobSources,
    Finance,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Technicians => Page::JobSources,
            Page::JobSources => Page::Finance,
            Page::Finance => Page::Technicians,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Technicians => Page::Finance,
            Page::JobSources => Page::Technicians,
            Page::Finance => Page::JobSources,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Technicians => "Technicians",
            Page::JobSources => "Job Sources",
            Page::Finance => "Finance",
        }
    }
}

pub struct App {
    pub technicians: Vec<Technician>,
    pub job_sources: Vec<JobSource>,
    pub transactions: Vec<FinancialTransaction>,

    /// Current list query; both list pages share it so sort and search
    /// carry over when tabbing between them
    pub query: ListQuery,

    pub filtered_technicians: Vec<Technician>,
    pub filtered_sources: Vec<JobSource>,

    pub current_page: Page,
    pub tech_state: TableState,
    pub source_state: TableState,

    /// When true, typed characters edit the search query
    pub search_mode: bool,

    /// Technician status filter; None shows every status
    pub status_filter: Option<TechnicianStatus>,
}

impl App {
    pub fn new(
        technicians: Vec<Technician>,
        job_sources: Vec<JobSource>,
        transactions: Vec<FinancialTransaction>,
    ) -> Self {
        let mut tech_state = TableState::default();
        if !technicians.is_empty() {
            tech_state.select(Some(0));
        }
        let mut source_state = TableState::default();
        if !job_sources.is_empty() {
            source_state.select(Some(0));
        }

        let filtered_technicians = technicians.clone();
        let filtered_sources = job_sources.clone();

        Self {
            technicians,
            job_sources,
            transactions,
            query: ListQuery::new(),
            filtered_technicians,
            filtered_sources,
            current_page: Page::Technicians,
            tech_state,
            source_state,
            search_mode: false,
            status_filter: None,
        }
    }

    /// Re-run the pipeline after any query change and reset selection.
    pub fn refresh(&mut self) {
        self.filtered_technicians = self.query.apply(&self.technicians);
        if let Some(status) = self.status_filter {
            self.filtered_technicians
                .retain(|tech| tech.status == status);
        }
        self.filtered_sources = self.query.apply(&self.job_sources);

        self.tech_state.select(if self.filtered_technicians.is_empty() {
            None
        } else {
            Some(0)
        });
        self.source_state.select(if self.filtered_sources.is_empty() {
            None
        } else {
            Some(0)
        });
    }

    pub fn cycle_sort(&mut self) {
        self.query.sort = self.query.sort.next();
        self.refresh();
    }

    /// Cycle the technician status filter: All → Active → Inactive → OnLeave.
    pub fn cycle_status_filter(&mut self) {
        self.status_filter = match self.status_filter {
            None => Some(TechnicianStatus::Active),
            Some(TechnicianStatus::Active) => Some(TechnicianStatus::Inactive),
            Some(TechnicianStatus::Inactive) => Some(TechnicianStatus::OnLeave),
            Some(TechnicianStatus::OnLeave) => None,
        };
        self.refresh();
    }

    pub fn clear_query(&mut self) {
        self.query = ListQuery::new();
        self.search_mode = false;
        self.status_filter = None;
        self.refresh();
    }

    pub fn push_search_char(&mut self, c: char) {
        self.query.search.push(c);
        self.refresh();
    }

    pub fn pop_search_char(&mut self) {
        self.query.search.pop();
        self.refresh();
    }

    pub fn summary(&self) -> FinancialSummary {
        aggregate_transactions(&self.transactions, &DateInterval::all_time())
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
    }

    fn current_len(&self) -> usize {
        match self.current_page {
            Page::Technicians => self.filtered_technicians.len(),
            Page::JobSources => self.filtered_sources.len(),
            Page::Finance => 0,
        }
    }

    fn current_state(&mut self) -> &mut TableState {
        match self.current_page {
            Page::JobSources => &mut self.source_state,
            _ => &mut self.tech_state,
        }
    }

    pub fn next_row(&mut self) {
        let len = self.current_len();
        if len == 0 {
            return;
        }
        let state = self.current_state();
        let i = match state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        state.select(Some(i));
    }

    pub fn previous_row(&mut self) {
        let len = self.current_len();
        if len == 0 {
            return;
        }
        let state = self.current_state();
        let i = match state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        state.select(Some(i));
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
            if app.search_mode {
                match key.code {
                    KeyCode::Esc | KeyCode::Enter => app.search_mode = false,
                    KeyCode::Backspace => app.pop_search_char(),
                    KeyCode::Char(c) => app.push_search_char(c),
                    _ => {}
                }
                continue;
            }

            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Tab => {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        app.previous_page();
                    } else {
                        app.next_page();
                    }
                }
                KeyCode::Char('/') => app.search_mode = true,
                KeyCode::Char('s') => app.cycle_sort(),
                KeyCode::Char('a') => app.cycle_status_filter(),
                KeyCode::Char('c') => app.clear_query(),
                KeyCode::Down | KeyCode::Char('j') => app.next_row(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_row(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.current_page {
        Page::Technicians => render_technicians(f, chunks[1], app),
        Page::JobSources => render_job_sources(f, chunks[1], app),
        Page::Finance => render_finance(f, chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let pages = vec![Page::Technicians, Page::JobSources, Page::Finance];

    let mut tab_spans = vec![];
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Sort: {}", app.query.sort.as_key()),
        Style::default().fg(Color::White),
    ));

    if let Some(status) = app.status_filter {
        tab_spans.push(Span::raw("  |  "));
        tab_spans.push(Span::styled(
            format!("Status: {}", status.as_str()),
            Style::default().fg(Color::Magenta),
        ));
    }

    if !app.query.search.is_empty() || app.search_mode {
        tab_spans.push(Span::raw("  |  "));
        let search_style = if app.search_mode {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Green)
        };
        tab_spans.push(Span::styled(
            format!("Search: {}▏", app.query.search),
            search_style,
        ));
    }

    let header = Paragraph::new(vec![Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn render_technicians(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["Name", "Specialty", "Status", "Hired", "Jobs", "Revenue"]
        .iter()
        .map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app.filtered_technicians.iter().map(|tech| {
        let status_color = match tech.status {
            TechnicianStatus::Active => Color::Green,
            TechnicianStatus::OnLeave => Color::Yellow,
            TechnicianStatus::Inactive => Color::Red,
        };

        let cells = vec![
            Cell::from(truncate(&tech.name, 24)),
            Cell::from(truncate(&tech.specialty, 18)),
            Cell::from(tech.status.as_str()).style(Style::default().fg(status_color)),
            Cell::from(tech.hire_date.clone()),
            Cell::from(format!("{}", tech.completed_jobs)),
            Cell::from(format!("{:.2}", tech.total_revenue)),
        ];

        Row::new(cells).height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(26),
            Constraint::Length(20),
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Length(8),
            Constraint::Length(14),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Technicians "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.tech_state);
}

fn render_job_sources(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["Name", "Category", "Created", "Jobs", "Revenue", "Rev/Job"]
        .iter()
        .map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app.filtered_sources.iter().map(|source| {
        let cells = vec![
            Cell::from(truncate(&source.name, 24)),
            Cell::from(
                source
                    .category
                    .clone()
                    .unwrap_or_else(|| dispatch_board::OTHERS.to_string()),
            ),
            Cell::from(source.created_at.clone().unwrap_or_default()),
            Cell::from(format!("{}", source.total_jobs)),
            Cell::from(format!("{:.2}", source.total_revenue)),
            Cell::from(format!("{:.2}", source.revenue_per_job())),
        ];

        Row::new(cells).height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(26),
            Constraint::Length(16),
            Constraint::Length(12),
            Constraint::Length(8),
            Constraint::Length(14),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Job Sources "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.source_state);
}

fn render_finance(f: &mut Frame, area: Rect, app: &App) {
    let summary = app.summary();
    let completed = app
        .transactions
        .iter()
        .filter(|tx| tx.is_completed())
        .count();

    let profit_color = if summary.company_profit >= 0.0 {
        Color::Green
    } else {
        Color::Red
    };

    let content = vec![
        Line::from(""),
        Line::from(vec![Span::styled(
            "  Financial Summary (all time)",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from(vec![
            Span::raw("  Revenue:              "),
            Span::styled(
                format!("${:>12.2}", summary.total_revenue),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(vec![
            Span::raw("  Expenses:             "),
            Span::styled(
                format!("${:>12.2}", summary.total_expenses),
                Style::default().fg(Color::Red),
            ),
        ]),
        Line::from(vec![
            Span::raw("  Technician payments:  "),
            Span::styled(
                format!("${:>12.2}", summary.technician_payments),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(vec![
            Span::raw("  Company profit:       "),
            Span::styled(
                format!("${:>12.2}", summary.company_profit),
                Style::default()
                    .fg(profit_color)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled(
            format!("  {} completed transactions counted", completed),
            Style::default().fg(Color::DarkGray),
        )]),
    ];

    let panel = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Finance "),
    );

    f.render_widget(panel, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let (selected, total) = match app.current_page {
        Page::Technicians => (
            app.tech_state.selected().map(|i| i + 1).unwrap_or(0),
            app.filtered_technicians.len(),
        ),
        Page::JobSources => (
            app.source_state.selected().map(|i| i + 1).unwrap_or(0),
            app.filtered_sources.len(),
        ),
        Page::Finance => (0, 0),
    };

    let mut status_spans = vec![Span::styled(
        format!(" Row: {}/{} ", selected, total),
        Style::default().fg(Color::Cyan),
    )];

    status_spans.push(Span::raw(" | "));
    status_spans.push(Span::styled("/", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Search | "));
    status_spans.push(Span::styled("s", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Sort | "));
    status_spans.push(Span::styled("a", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Status | "));
    status_spans.push(Span::styled("c", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Clear | "));
    status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Page | "));
    status_spans.push(Span::styled("↑/↓", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Nav | "));
    status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    // Count chars, not bytes: slicing mid-codepoint panics on accented names
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

// ============================================================================
// TESTS
// ============================================================================
