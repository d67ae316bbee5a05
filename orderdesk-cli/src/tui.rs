//! Interactive spreadsheet viewer: file list on the left, selected sheet on
//! the right, load errors on the status line.

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use orderdesk_core::Table;
use orderdesk_ingest::{list_spreadsheets, load_spreadsheet};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Row, Table as TableWidget},
    Frame, Terminal,
};
use std::io::{self, Stdout};
use std::path::PathBuf;

/// What the right-hand pane shows.
#[derive(Debug)]
pub enum Pane {
    Empty,
    Loaded { name: String, table: Table },
    Failed(String),
}

pub struct ViewerApp {
    pub dir: PathBuf,
    pub files: Vec<String>,
    pub list: ListState,
    pub pane: Pane,
    /// First data row shown in the table pane.
    pub offset: usize,
}

impl ViewerApp {
    pub fn new(dir: PathBuf) -> Self {
        let mut app = Self {
            dir,
            files: Vec::new(),
            list: ListState::default(),
            pane: Pane::Empty,
            offset: 0,
        };
        app.refresh();
        app
    }

    /// Re-list the folder. A listing failure is shown in the pane.
    pub fn refresh(&mut self) {
        match list_spreadsheets(&self.dir) {
            Ok(files) => {
                self.files = files;
                if matches!(self.pane, Pane::Failed(_)) {
                    self.pane = Pane::Empty;
                }
                self.list
                    .select(if self.files.is_empty() { None } else { Some(0) });
            }
            Err(e) => {
                self.files.clear();
                self.list.select(None);
                self.pane = Pane::Failed(e.to_string());
            }
        }
    }

    pub fn select_next(&mut self) {
        if self.files.is_empty() {
            return;
        }
        let i = self.list.selected().map_or(0, |i| (i + 1) % self.files.len());
        self.list.select(Some(i));
    }

    pub fn select_prev(&mut self) {
        if self.files.is_empty() {
            return;
        }
        let n = self.files.len();
        let i = self.list.selected().map_or(0, |i| (i + n - 1) % n);
        self.list.select(Some(i));
    }

    /// Load the highlighted file into the pane.
    pub fn open_selected(&mut self) {
        let Some(name) = self.list.selected().and_then(|i| self.files.get(i)).cloned() else {
            return;
        };
        self.offset = 0;
        self.pane = match load_spreadsheet(&self.dir, &name) {
            Ok(table) => Pane::Loaded { name, table },
            Err(e) => Pane::Failed(e.to_string()),
        };
    }

    pub fn scroll(&mut self, delta: isize) {
        if let Pane::Loaded { table, .. } = &self.pane {
            let max = table.len().saturating_sub(1);
            self.offset = self.offset.saturating_add_signed(delta).min(max);
        }
    }
}

pub fn run_viewer(dir: PathBuf) -> Result<()> {
    let mut app = ViewerApp::new(dir);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = viewer_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn viewer_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut ViewerApp) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Down | KeyCode::Char('j') => app.select_next(),
                    KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
                    KeyCode::Enter => app.open_selected(),
                    KeyCode::PageDown => app.scroll(10),
                    KeyCode::PageUp => app.scroll(-10),
                    KeyCode::Char('r') => app.refresh(),
                    _ => {}
                }
            }
        }
    }
    Ok(())
}

fn draw(f: &mut Frame, app: &mut ViewerApp) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(32), Constraint::Min(20)])
        .split(f.area());
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(columns[1]);

    let items: Vec<ListItem> = app.files.iter().map(|n| ListItem::new(n.as_str())).collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(app.dir.display().to_string()),
        )
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    f.render_stateful_widget(list, columns[0], &mut app.list);

    let status = match &app.pane {
        Pane::Empty => Line::from(Span::styled(
            "Enter=open  j/k=select  PgUp/PgDn=scroll  r=refresh  q=quit",
            Style::default().fg(Color::Gray),
        )),
        Pane::Loaded { name, table } => Line::from(format!(
            "Displaying data from {name} ({} rows)",
            table.len()
        )),
        Pane::Failed(msg) => Line::from(Span::styled(msg.clone(), Style::default().fg(Color::Red))),
    };
    f.render_widget(
        Paragraph::new(status).block(Block::default().borders(Borders::ALL)),
        right[1],
    );

    let block = Block::default().borders(Borders::ALL).title("sheet");
    match &app.pane {
        Pane::Loaded { table, .. } => {
            let header = Row::new(table.headers.clone())
                .style(Style::default().add_modifier(Modifier::BOLD));
            let rows = table.rows.iter().skip(app.offset).map(|r| {
                Row::new((0..table.headers.len()).map(|c| r.get(c).map(|v| v.as_text()).unwrap_or_default()))
            });
            let widths = vec![Constraint::Min(10); table.headers.len().max(1)];
            f.render_widget(TableWidget::new(rows, widths).header(header).block(block), right[0]);
        }
        _ => f.render_widget(block, right[0]),
    }
}
