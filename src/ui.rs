use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use expense_tracker::{
    charts::{ChartBoard, LineChart, PieChart, LINE_COLOR},
    expense::{today, ExpenseInput},
    storage::KeyValueStore,
    store::CategoryFilter,
    tracker::{Tracker, View},
    view::{
        expense_rows, filter_options, format_amount, format_money, validation_message, SummaryFields,
    },
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Axis, Block, Borders, Cell, Chart, Clear, Dataset, GraphType, Paragraph, Row, Table,
        TableState, Wrap,
    },
    Frame, Terminal,
};
use std::io;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Expenses,
    Charts,
    AddExpense,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Expenses => Page::Charts,
            Page::Charts => Page::AddExpense,
            Page::AddExpense => Page::Expenses,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Expenses => Page::AddExpense,
            Page::Charts => Page::Expenses,
            Page::AddExpense => Page::Charts,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Expenses => "Expenses",
            Page::Charts => "Charts",
            Page::AddExpense => "Add Expense",
        }
    }
}

// ============================================================================
// ADD FORM
// ============================================================================

const FORM_LABELS: [&str; 4] = ["Description", "Amount", "Category", "Date"];
const FORM_FIELDS: [&str; 4] = ["description", "amount", "category", "date"];

#[derive(Debug, Clone)]
pub struct FormState {
    pub fields: [String; 4],
    pub focused: usize,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            fields: [String::new(), String::new(), String::new(), today()],
            focused: 0,
        }
    }
}

impl FormState {
    pub fn input(&self) -> ExpenseInput {
        ExpenseInput::new(
            self.fields[0].clone(),
            self.fields[1].clone(),
            self.fields[2].clone(),
            self.fields[3].clone(),
        )
    }

    fn next_field(&mut self) {
        self.focused = (self.focused + 1) % self.fields.len();
    }

    fn previous_field(&mut self) {
        self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
    }

    fn push(&mut self, c: char) {
        self.fields[self.focused].push(c);
    }

    fn pop(&mut self) {
        self.fields[self.focused].pop();
    }
}

// ============================================================================
// APP STATE
// ============================================================================

pub struct App<S> {
    pub tracker: Tracker<S>,
    pub view: View,
    pub charts: ChartBoard,
    pub state: TableState,
    pub current_page: Page,
    pub show_detail: bool,
    pub form: FormState,
    /// Blocking notice; the next key press only dismisses it
    pub notice: Option<String>,
    pub should_quit: bool,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(tracker: Tracker<S>) -> Self {
        let view = tracker.view();
        let mut app = Self {
            tracker,
            view,
            charts: ChartBoard::default(),
            state: TableState::default(),
            current_page: Page::Expenses,
            show_detail: false,
            form: FormState::default(),
            notice: None,
            should_quit: false,
        };
        app.refresh();
        app
    }

    /// Recompute the view and replace both charts
    pub fn refresh(&mut self) {
        self.view = self.tracker.view();
        self.charts.update(&self.view);

        let len = self.view.expenses.len();
        match self.state.selected() {
            _ if len == 0 => self.state.select(None),
            Some(i) if i >= len => self.state.select(Some(len - 1)),
            None => self.state.select(Some(0)),
            Some(_) => {}
        }
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    pub fn selected_expense(&self) -> Option<&expense_tracker::Expense> {
        self.state.selected().and_then(|i| self.view.expenses.get(i))
    }

    pub fn apply_filter(&mut self, filter: CategoryFilter) {
        debug!(filter = %filter, "filter changed");
        self.tracker.set_filter(filter);
        self.state.select(None);
        self.refresh();
    }

    /// Step through "all" and each category; `forward = false` goes back
    pub fn cycle_filter(&mut self, forward: bool) {
        let options = filter_options(&self.view.categories);
        let current = options
            .iter()
            .position(|o| o.filter() == self.view.filter)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % options.len()
        } else {
            (current + options.len() - 1) % options.len()
        };
        self.apply_filter(options[next].filter());
    }

    pub fn clear_filter(&mut self) {
        self.apply_filter(CategoryFilter::All);
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_expense().map(|e| e.id) {
            self.tracker.delete_expense(id);
            self.refresh();
            self.report_save_error();
        }
    }

    pub fn submit_form(&mut self) {
        match self.tracker.add_expense(&self.form.input()) {
            Ok(_) => {
                self.form = FormState::default();
                self.current_page = Page::Expenses;
                self.refresh();
                self.report_save_error();
            }
            Err(e) => {
                if let Some(index) = FORM_FIELDS.iter().position(|name| *name == e.field()) {
                    self.form.focused = index;
                }
                self.notice = Some(validation_message(&e));
            }
        }
    }

    fn report_save_error(&mut self) {
        if let Some(error) = self.tracker.last_save_error() {
            self.notice = Some(format!("Could not save expenses: {}", error));
        }
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
    }

    pub fn next(&mut self) {
        let len = self.view.expenses.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i >= len - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.view.expenses.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) => len - 1,
            Some(i) => i - 1,
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn page_down(&mut self) {
        let len = self.view.expenses.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => (i + 20).min(len - 1),
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn page_up(&mut self) {
        let i = match self.state.selected() {
            Some(i) => i.saturating_sub(20),
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.notice.is_some() {
            self.notice = None;
            return;
        }

        if self.current_page == Page::AddExpense {
            self.handle_form_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Enter => self.toggle_detail(),
            KeyCode::Tab => self.next_page(),
            KeyCode::BackTab => self.previous_page(),
            KeyCode::Char('a') => self.current_page = Page::AddExpense,
            KeyCode::Char('f') => self.cycle_filter(true),
            KeyCode::Char('F') => self.cycle_filter(false),
            KeyCode::Char('c') => self.clear_filter(),
            KeyCode::Char('d') | KeyCode::Delete if self.current_page == Page::Expenses => {
                self.delete_selected()
            }
            KeyCode::Down | KeyCode::Char('j') => self.next(),
            KeyCode::Up | KeyCode::Char('k') => self.previous(),
            KeyCode::PageDown => self.page_down(),
            KeyCode::PageUp => self.page_up(),
            KeyCode::Home if !self.view.expenses.is_empty() => self.state.select(Some(0)),
            KeyCode::End if !self.view.expenses.is_empty() => {
                self.state.select(Some(self.view.expenses.len() - 1))
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.current_page = Page::Expenses,
            KeyCode::Enter => self.submit_form(),
            KeyCode::BackTab | KeyCode::Up => self.form.previous_field(),
            KeyCode::Tab | KeyCode::Down => self.form.next_field(),
            KeyCode::Backspace => self.form.pop(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.form.push(c)
            }
            _ => {}
        }
    }
}

pub fn run_ui<S: KeyValueStore>(app: &mut App<S>) -> Result<()> {
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

    res.map_err(Into::into)
}

fn run_app<B: ratatui::backend::Backend, S: KeyValueStore>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            app.handle_key(key);
            if app.should_quit {
                return Ok(());
            }
        }
    }
}

// ============================================================================
// RENDERING
// ============================================================================

fn ui<S: KeyValueStore>(f: &mut Frame, app: &mut App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Length(3), // Summary
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);
    render_summary(f, chunks[1], &app.view);

    if app.show_detail && app.current_page == Page::Expenses {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[2]);

        render_table(f, content_chunks[0], app);
        render_detail_panel(f, content_chunks[1], app);
    } else {
        match app.current_page {
            Page::Expenses => render_table(f, chunks[2], app),
            Page::Charts => render_charts(f, chunks[2], &app.charts),
            Page::AddExpense => render_form(f, chunks[2], &app.form),
        }
    }

    render_status_bar(f, chunks[3], app);

    if let Some(notice) = &app.notice {
        render_notice(f, notice);
    }
}

fn render_header<S>(f: &mut Frame, area: Rect, app: &App<S>) {
    let pages = [Page::Expenses, Page::Charts, Page::AddExpense];

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
    tab_spans.push(Span::styled("Category: ", Style::default().fg(Color::White)));
    for option in filter_options(&app.view.categories) {
        let style = if option.filter() == app.view.filter {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        tab_spans.push(Span::styled(format!("[{}]", option.label), style));
        tab_spans.push(Span::raw(" "));
    }

    let header = Paragraph::new(Line::from(tab_spans))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn render_summary(f: &mut Frame, area: Rect, view: &View) {
    let fields = SummaryFields::from(&view.summary);
    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);

    let line = Line::from(vec![
        Span::styled(" Total: ", label),
        Span::raw(fields.total),
        Span::raw("   "),
        Span::styled("Count: ", label),
        Span::raw(fields.count),
        Span::raw("   "),
        Span::styled("Average: ", label),
        Span::raw(fields.average),
    ]);

    let summary = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Summary "),
    );

    f.render_widget(summary, area);
}

fn render_table<S>(f: &mut Frame, area: Rect, app: &mut App<S>) {
    let header_cells = ["Date", "Description", "Category", "Amount"]
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

    let rows = expense_rows(&app.view.expenses).into_iter().map(|row| {
        let color = if row.amount.starts_with('-') {
            Color::Green
        } else {
            Color::Red
        };

        Row::new(vec![
            Cell::from(row.date),
            Cell::from(truncate(&row.description, 30)),
            Cell::from(truncate(&row.category, 20)),
            Cell::from(row.amount).style(Style::default().fg(color)),
        ])
        .height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(32),
            Constraint::Length(22),
            Constraint::Length(14),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Expenses "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_charts(f: &mut Frame, area: Rect, charts: &ChartBoard) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    if let Some(handle) = charts.by_category.current() {
        render_pie(f, chunks[0], handle.chart());
    }
    if let Some(handle) = charts.over_time.current() {
        render_line(f, chunks[1], handle.chart());
    }
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

fn render_pie(f: &mut Frame, area: Rect, pie: &PieChart) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(format!(" {} ", pie.title));

    if pie.is_empty() {
        f.render_widget(Paragraph::new("  No expenses to chart").block(block), area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),
            Constraint::Length(legend_height(pie.slices.len())),
        ])
        .split(area);

    // Sample the unit disc and bucket each point into the slice covering it
    let mut buckets: Vec<Vec<(f64, f64)>> = vec![Vec::new(); pie.slices.len()];
    let steps = 120;
    for xi in 0..=steps {
        for yi in 0..=steps {
            let x = -1.0 + 2.0 * xi as f64 / steps as f64;
            let y = -1.0 + 2.0 * yi as f64 / steps as f64;
            if x * x + y * y > 1.0 {
                continue;
            }
            if let Some(i) = pie.slice_at(y.atan2(x)) {
                buckets[i].push((x, y));
            }
        }
    }

    // Terminal cells are roughly twice as tall as they are wide
    let inner = block.inner(chunks[0]);
    let x_extent = (inner.width as f64 / (inner.height.max(1) as f64 * 2.0)).max(1.0);
    let y_extent = (inner.height as f64 * 2.0 / inner.width.max(1) as f64).max(1.0);

    let canvas = Canvas::default()
        .block(block)
        .marker(symbols::Marker::Braille)
        .x_bounds([-x_extent, x_extent])
        .y_bounds([-y_extent, y_extent])
        .paint(|ctx| {
            for (slice, coords) in pie.slices.iter().zip(&buckets) {
                ctx.draw(&Points {
                    coords,
                    color: rgb(slice.color),
                });
            }
        });
    f.render_widget(canvas, chunks[0]);

    let legend: Vec<Line> = pie
        .slices
        .iter()
        .map(|slice| {
            Line::from(vec![
                Span::styled("  ■ ", Style::default().fg(rgb(slice.color))),
                Span::raw(format!(
                    "{:<20} {:>11}  {:>5.1}%",
                    truncate(&slice.label, 20),
                    format_money(slice.value),
                    slice.share * 100.0
                )),
            ])
        })
        .collect();
    f.render_widget(
        Paragraph::new(legend).block(Block::default().borders(Borders::ALL).title(" Legend ")),
        chunks[1],
    );
}

/// Legend rows plus borders, saturating for absurd category counts
fn legend_height(slices: usize) -> u16 {
    u16::try_from(slices).unwrap_or(u16::MAX).saturating_add(2)
}

fn render_line(f: &mut Frame, area: Rect, line: &LineChart) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(format!(" {} ", line.title));

    if line.points.is_empty() {
        f.render_widget(Paragraph::new("  No expenses to chart").block(block), area);
        return;
    }

    let dataset = Dataset::default()
        .name("Spending Over Time")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(rgb(LINE_COLOR)))
        .data(&line.points);

    let x_labels = match (line.labels.first(), line.labels.last()) {
        (Some(first), Some(last)) if line.labels.len() > 1 => {
            vec![Span::raw(first.clone()), Span::raw(last.clone())]
        }
        (Some(only), _) => vec![Span::raw(only.clone())],
        _ => vec![],
    };

    let [y_min, y_max] = line.y_bounds();
    let y_labels = vec![
        Span::raw(format_amount(y_min)),
        Span::raw(format_amount((y_min + y_max) / 2.0)),
        Span::raw(format_amount(y_max)),
    ];

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .title(line.x_label.clone())
                .style(Style::default().fg(Color::Gray))
                .bounds(line.x_bounds())
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(line.y_label.clone())
                .style(Style::default().fg(Color::Gray))
                .bounds([y_min, y_max])
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}

fn render_form(f: &mut Frame, area: Rect, form: &FormState) {
    let mut content = vec![Line::from("")];

    for (i, (label, value)) in FORM_LABELS.iter().zip(form.fields.iter()).enumerate() {
        let focused = i == form.focused;
        let marker = if focused {
            Span::styled("→ ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        } else {
            Span::raw("  ")
        };
        let value_style = if focused {
            Style::default().fg(Color::White).add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::Gray)
        };

        content.push(Line::from(vec![
            Span::raw("  "),
            marker,
            Span::styled(
                format!("{:<12}", label),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("{}_", value), value_style),
        ]));
        content.push(Line::from(""));
    }

    content.push(Line::from(vec![
        Span::styled("  Hint: ", Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC)),
        Span::styled(
            "Tab/↑/↓ move between fields, Enter saves, Esc cancels",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ),
    ]));

    let form_widget = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Add Expense "),
    );

    f.render_widget(form_widget, area);
}

fn render_status_bar<S: KeyValueStore>(f: &mut Frame, area: Rect, app: &App<S>) {
    let selected = app.state.selected().map(|i| i + 1).unwrap_or(0);
    let total = app.view.expenses.len();

    let mut status_spans = vec![Span::styled(
        format!(" Row: {}/{} ", selected, total),
        Style::default().fg(Color::Cyan),
    )];

    if !app.view.filter.is_all() {
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled(
            format!("Filter: {}", app.view.filter),
            Style::default().fg(Color::Green),
        ));
        status_spans.push(Span::raw(" ("));
        status_spans.push(Span::styled("c", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" clear)"));
    }

    if app.tracker.last_save_error().is_some() {
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled("UNSAVED", Style::default().fg(Color::Red)));
    }

    for (key, label, color) in [
        ("a", " Add", Color::Yellow),
        ("d", " Delete", Color::Yellow),
        ("f/F", " Filter", Color::Yellow),
        ("Enter", " Details", Color::Yellow),
        ("Tab", " Page", Color::Yellow),
        ("q", " Quit", Color::Red),
    ] {
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled(key, Style::default().fg(color)));
        status_spans.push(Span::raw(label));
    }

    let status_bar = Paragraph::new(Line::from(status_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn render_detail_panel<S: KeyValueStore>(f: &mut Frame, area: Rect, app: &App<S>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Expense Details ");

    let expense = match app.selected_expense() {
        Some(e) => e,
        None => {
            f.render_widget(Paragraph::new("No expense selected").block(block), area);
            return;
        }
    };

    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let content = vec![
        Line::from(""),
        Line::from(vec![Span::styled("  Date: ", label), Span::raw(&expense.date)]),
        Line::from(""),
        Line::from(vec![Span::styled("  Description: ", label), Span::raw(&expense.description)]),
        Line::from(""),
        Line::from(vec![Span::styled("  Category: ", label), Span::raw(&expense.category)]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Amount: ", label),
            Span::raw(format_money(expense.amount)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Id: ", label),
            Span::styled(expense.id.to_string(), Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "  Press Enter to close, d to delete",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )]),
    ];

    f.render_widget(Paragraph::new(content).block(block), area);
}

fn render_notice(f: &mut Frame, notice: &str) {
    let area = centered_rect(60, 20, f.size());
    let popup = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(notice, Style::default().fg(Color::White))),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to continue",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Notice "),
    );

    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
