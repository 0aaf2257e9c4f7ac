//! Full-screen portfolio explorer.
//!
//! Two tabs:
//! - Projects: facet pane on the left (statuses then technologies), filtered
//!   project table and detail card on the right
//! - Timeline: merged experiences and certifications with per-entry expansion
//!
//! Key bindings: Tab switch tab, h/l switch pane, j/k move, space/enter
//! toggle, s cycle status, r reset filters, c collapse all, q quit.

use crate::cmd::Portfolio;
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use folio_core::expand::ExpandRegistry;
use folio_core::facets::{Facets, get_facets};
use folio_core::filter::{FilterState, filter_projects};
use folio_core::model::ProjectEntry;
use folio_core::timeline::{TimelineItem, merge_timeline};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::border,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
};
use std::io;
use std::time::Duration;
use tracing::debug;

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Projects,
    Timeline,
}

impl Tab {
    const fn next(self) -> Self {
        match self {
            Self::Projects => Self::Timeline,
            Self::Timeline => Self::Projects,
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Projects => "Projets",
            Self::Timeline => "Parcours",
        }
    }
}

/// Which pane of the projects tab receives j/k.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Facets,
    Projects,
}

/// A row of the facet pane resolved to what it controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FacetRow<'f> {
    Status(&'f str),
    Tech(&'f str),
}

/// Interactive view state. Borrows the loaded content for its lifetime.
pub struct ExplorerView<'a> {
    projects: &'a [ProjectEntry],
    facets: Facets,
    tech_preview: usize,
    pub tab: Tab,
    pub focus: Focus,
    filter: FilterState,
    visible: Vec<&'a ProjectEntry>,
    facet_state: TableState,
    project_state: TableState,
    timeline: Vec<TimelineItem<'a>>,
    expanded: ExpandRegistry,
    timeline_state: TableState,
    pub should_quit: bool,
}

impl<'a> ExplorerView<'a> {
    pub fn new(portfolio: &'a Portfolio) -> Self {
        let projects = portfolio.content.projects.as_slice();
        let filter = FilterState::reset();
        let visible = filter_projects(projects, &filter);
        let timeline = merge_timeline(
            &portfolio.content.experiences,
            &portfolio.content.certifications,
        );
        Self {
            projects,
            facets: get_facets(projects, &portfolio.statuses),
            tech_preview: portfolio.tech_preview,
            tab: Tab::default(),
            focus: Focus::default(),
            filter,
            project_state: first_selected(visible.len()),
            visible,
            facet_state: TableState::default().with_selected(Some(0)),
            timeline_state: first_selected(timeline.len()),
            timeline,
            expanded: ExpandRegistry::new(),
            should_quit: false,
        }
    }

    pub const fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn visible_ids(&self) -> Vec<u32> {
        self.visible.iter().map(|p| p.id).collect()
    }

    pub const fn expanded(&self) -> &ExpandRegistry {
        &self.expanded
    }

    fn facet_row_count(&self) -> usize {
        self.facets.statuses.len() + self.facets.techs.len()
    }

    fn facet_row(&self, index: usize) -> Option<FacetRow<'_>> {
        let statuses = self.facets.statuses.len();
        if index < statuses {
            Some(FacetRow::Status(&self.facets.statuses[index].value))
        } else {
            self.facets
                .techs
                .get(index - statuses)
                .map(|t| FacetRow::Tech(t.as_str()))
        }
    }

    fn selected_project(&self) -> Option<&'a ProjectEntry> {
        self.project_state
            .selected()
            .and_then(|i| self.visible.get(i).copied())
    }

    /// Swap in a new filter, recomputing the visible list only on change.
    fn set_filter(&mut self, next: FilterState) {
        if next == self.filter {
            return;
        }
        self.filter = next;
        self.visible = filter_projects(self.projects, &self.filter);
        debug!(
            visible = self.visible.len(),
            total = self.projects.len(),
            "explorer filter changed"
        );
        clamp_selection(&mut self.project_state, self.visible.len());
    }

    fn activate_facet(&mut self) {
        let Some(index) = self.facet_state.selected() else {
            return;
        };
        let next = match self.facet_row(index) {
            Some(FacetRow::Status(value)) => self.filter.set_status(value),
            Some(FacetRow::Tech(tag)) => self.filter.toggle_tech(tag),
            None => return,
        };
        self.set_filter(next);
    }

    fn cycle_status(&mut self) {
        let statuses = &self.facets.statuses;
        if statuses.is_empty() {
            return;
        }
        let current = statuses
            .iter()
            .position(|s| self.filter.is_status_selected(&s.value))
            .unwrap_or(0);
        let next_value = statuses[(current + 1) % statuses.len()].value.clone();
        let next = self.filter.set_status(&next_value);
        self.set_filter(next);
    }

    fn toggle_selected_entry(&mut self) {
        let Some(item) = self.timeline_state.selected().and_then(|i| self.timeline.get(i)) else {
            return;
        };
        self.expanded = self.expanded.toggle_key(item.key());
    }

    /// Flip every open entry back to collapsed. Toggled keys stay in the
    /// registry.
    fn collapse_all(&mut self) {
        let open: Vec<_> = self.expanded.expanded_keys().collect();
        self.expanded = open
            .into_iter()
            .fold(self.expanded.clone(), |reg, key| reg.toggle_key(key));
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.tab = self.tab.next();
                return;
            }
            KeyCode::Char('1') => {
                self.tab = Tab::Projects;
                return;
            }
            KeyCode::Char('2') => {
                self.tab = Tab::Timeline;
                return;
            }
            _ => {}
        }

        match self.tab {
            Tab::Projects => self.handle_projects_key(key),
            Tab::Timeline => self.handle_timeline_key(key),
        }
    }

    fn handle_projects_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('h') | KeyCode::Left => self.focus = Focus::Facets,
            KeyCode::Char('l') | KeyCode::Right => self.focus = Focus::Projects,
            KeyCode::Char('j') | KeyCode::Down => match self.focus {
                Focus::Facets => {
                    let rows = self.facet_row_count();
                    select_next(&mut self.facet_state, rows);
                }
                Focus::Projects => select_next(&mut self.project_state, self.visible.len()),
            },
            KeyCode::Char('k') | KeyCode::Up => match self.focus {
                Focus::Facets => select_prev(&mut self.facet_state),
                Focus::Projects => select_prev(&mut self.project_state),
            },
            KeyCode::Char(' ') | KeyCode::Enter if self.focus == Focus::Facets => {
                self.activate_facet();
            }
            KeyCode::Char('s') => self.cycle_status(),
            KeyCode::Char('r') => self.set_filter(FilterState::reset()),
            _ => {}
        }
    }

    fn handle_timeline_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                select_next(&mut self.timeline_state, self.timeline.len());
            }
            KeyCode::Char('k') | KeyCode::Up => select_prev(&mut self.timeline_state),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_selected_entry(),
            KeyCode::Char('c') => self.collapse_all(),
            _ => {}
        }
    }

    pub fn render(&mut self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        render_into(frame, self, area);
    }
}

fn first_selected(len: usize) -> TableState {
    TableState::default().with_selected(if len == 0 { None } else { Some(0) })
}

fn select_next(state: &mut TableState, len: usize) {
    if len == 0 {
        state.select(None);
        return;
    }
    let next = state.selected().map_or(0, |i| (i + 1).min(len - 1));
    state.select(Some(next));
}

fn select_prev(state: &mut TableState) {
    if let Some(i) = state.selected() {
        state.select(Some(i.saturating_sub(1)));
    }
}

fn clamp_selection(state: &mut TableState, len: usize) {
    match (state.selected(), len) {
        (_, 0) => state.select(None),
        (None, _) => state.select(Some(0)),
        (Some(i), len) if i >= len => state.select(Some(len - 1)),
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn pane_block(title: String, focused: bool) -> Block<'static> {
    let border_style = if focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(border_style)
        .title(title)
        .title_style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
}

fn highlight_style() -> Style {
    Style::default()
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD)
}

fn render_into(frame: &mut ratatui::Frame<'_>, app: &mut ExplorerView<'_>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    match app.tab {
        Tab::Projects => render_projects_tab(frame, app, chunks[0]),
        Tab::Timeline => render_timeline_tab(frame, app, chunks[0]),
    }

    let status = Paragraph::new(build_status_bar(app)).alignment(Alignment::Left);
    frame.render_widget(status, chunks[1]);
}

fn render_projects_tab(frame: &mut ratatui::Frame<'_>, app: &mut ExplorerView<'_>, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(20)])
        .split(area);

    // Facet pane.
    let mut facet_rows: Vec<Row<'static>> = Vec::with_capacity(app.facet_row_count());
    for status in &app.facets.statuses {
        let mark = if app.filter.is_status_selected(&status.value) {
            "(•)"
        } else {
            "( )"
        };
        facet_rows.push(Row::new([Cell::from(format!("{mark} {}", status.label))]));
    }
    for tech in &app.facets.techs {
        let selected = app.filter.is_tech_selected(tech);
        let mark = if selected { "[x]" } else { "[ ]" };
        let style = if selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        facet_rows.push(Row::new([Cell::from(format!("{mark} {tech}"))]).style(style));
    }
    let facets = Table::new(facet_rows, [Constraint::Min(10)])
        .block(pane_block(" Filtres ".to_string(), app.focus == Focus::Facets))
        .row_highlight_style(highlight_style())
        .highlight_symbol(" ");
    frame.render_stateful_widget(facets, columns[0], &mut app.facet_state);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(columns[1]);

    // Project table.
    let rows: Vec<Row<'static>> = app
        .visible
        .iter()
        .map(|p| {
            let (shown, hidden) = p.tech_preview(app.tech_preview);
            let mut techs = shown.join(", ");
            if hidden > 0 {
                techs.push_str(&format!(" +{hidden}"));
            }
            Row::new([
                Cell::from(format!("#{}", p.id)),
                Cell::from(p.title.clone()),
                Cell::from(Span::styled(
                    p.status.clone(),
                    Style::default().fg(Color::Yellow),
                )),
                Cell::from(techs),
            ])
        })
        .collect();
    let title = format!(
        " {} ({} / {}) ",
        Tab::Projects.label(),
        app.visible.len(),
        app.projects.len()
    );
    let table = Table::new(
        rows,
        [
            Constraint::Length(5),
            Constraint::Length(14),
            Constraint::Length(16),
            Constraint::Fill(1),
        ],
    )
    .block(pane_block(title, app.focus == Focus::Projects))
    .row_highlight_style(highlight_style())
    .highlight_symbol(" ");
    frame.render_stateful_widget(table, right[0], &mut app.project_state);

    // Detail card.
    let detail = app.selected_project().map_or_else(
        || Text::from("Aucun projet ne correspond à ces filtres."),
        project_detail,
    );
    let card = Paragraph::new(detail)
        .wrap(Wrap { trim: true })
        .block(pane_block(" Détail ".to_string(), false));
    frame.render_widget(card, right[1]);
}

fn project_detail(project: &ProjectEntry) -> Text<'static> {
    let mut lines = vec![Line::from(Span::styled(
        project.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    if !project.description.is_empty() {
        lines.push(Line::from(project.description.clone()));
    }
    lines.push(Line::from(Span::styled(
        project.tech_stack.join(", "),
        Style::default().fg(Color::Cyan),
    )));
    for highlight in &project.highlights {
        lines.push(Line::from(format!("• {highlight}")));
    }
    if let Some(ref url) = project.links.github_url {
        lines.push(Line::from(format!("GitHub: {url}")));
    }
    if let Some(ref url) = project.links.live_url {
        lines.push(Line::from(format!("Live: {url}")));
    }
    Text::from(lines)
}

fn timeline_cell(item: &TimelineItem<'_>, expanded: bool) -> (Text<'static>, u16) {
    let marker = if expanded { "▾" } else { "▸" };
    let kind_style = match item {
        TimelineItem::Experience(_) => Style::default().fg(Color::Green),
        TimelineItem::Certification(_) => Style::default().fg(Color::Magenta),
    };
    let mut lines = vec![Line::from(vec![
        Span::raw(format!("{marker} ")),
        Span::styled(item.headline(), kind_style),
        Span::styled(
            format!("  {}", item.when()),
            Style::default().fg(Color::DarkGray),
        ),
    ])];
    if expanded {
        match item {
            TimelineItem::Experience(e) => {
                if !e.location.is_empty() {
                    lines.push(Line::from(format!("    {}", e.location)));
                }
                for point in &e.description_points {
                    lines.push(Line::from(format!("    - {point}")));
                }
                if !e.technologies.is_empty() {
                    lines.push(Line::from(Span::styled(
                        format!("    {}", e.technologies.join(", ")),
                        Style::default().fg(Color::Cyan),
                    )));
                }
            }
            TimelineItem::Certification(c) => {
                if let Some(ref url) = c.credential_url {
                    lines.push(Line::from(format!("    {url}")));
                }
            }
        }
    }
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    (Text::from(lines), height)
}

fn render_timeline_tab(frame: &mut ratatui::Frame<'_>, app: &mut ExplorerView<'_>, area: Rect) {
    let rows: Vec<Row<'static>> = app
        .timeline
        .iter()
        .map(|item| {
            let (text, height) = timeline_cell(item, app.expanded.is_key_expanded(item.key()));
            Row::new([Cell::from(text)]).height(height)
        })
        .collect();
    let title = format!(" {} ({}) ", Tab::Timeline.label(), app.timeline.len());
    let table = Table::new(rows, [Constraint::Min(10)])
        .block(pane_block(title, true))
        .row_highlight_style(highlight_style())
        .highlight_symbol(" ");
    frame.render_stateful_widget(table, area, &mut app.timeline_state);
}

/// Build the status bar line from the current tab and filter state.
fn build_status_bar(app: &ExplorerView<'_>) -> Line<'static> {
    let key_style = Style::default().fg(Color::Cyan);
    let label_style = Style::default().fg(Color::White);
    let val_style = Style::default().fg(Color::Cyan);
    let dim_style = Style::default().fg(Color::DarkGray);

    let mut spans: Vec<Span<'static>> = vec![Span::styled(
        format!("[{}] ", app.tab.label()),
        label_style,
    )];

    let hints: &[(&str, &str)] = match app.tab {
        Tab::Projects => {
            if app.filter.has_active_filters() {
                spans.push(Span::styled("FILTRES: ", label_style));
                for tech in app.filter.selected_techs() {
                    spans.push(Span::styled(format!("tech={tech} "), val_style));
                }
                if !app.filter.selected_status().is_all() {
                    spans.push(Span::styled(
                        format!("status={} ", app.filter.selected_status()),
                        val_style,
                    ));
                }
                spans.push(Span::styled("  ", dim_style));
            }
            &[
                ("h/l", "pane"),
                ("j/k", "move"),
                ("space", "toggle"),
                ("s", "status"),
                ("r", "reset"),
                ("tab", "timeline"),
                ("q", "quit"),
            ]
        }
        Tab::Timeline => &[
            ("j/k", "move"),
            ("enter", "expand"),
            ("c", "collapse all"),
            ("tab", "projects"),
            ("q", "quit"),
        ],
    };

    for (key, label) in hints {
        spans.push(Span::styled((*key).to_string(), key_style));
        spans.push(Span::styled(format!(" {label}  "), dim_style));
    }
    Line::from(spans)
}

// ---------------------------------------------------------------------------
// Terminal loop
// ---------------------------------------------------------------------------

/// Run the explorer until the user quits, restoring the terminal afterwards.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up, drawn or restored.
pub fn run_explorer(portfolio: &Portfolio) -> Result<()> {
    enable_raw_mode()?;
    let _guard = TerminalGuard;
    execute!(io::stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let mut app = ExplorerView::new(portfolio);
    let result = event_loop(&mut terminal, &mut app);
    terminal.show_cursor()?;
    result
}

/// Leaves the alternate screen and raw mode when dropped, on every exit path.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = execute!(io::stdout(), LeaveAlternateScreen) {
            debug!(%err, "failed to leave alternate screen");
        }
        if let Err(err) = disable_raw_mode() {
            debug!(%err, "failed to disable raw mode");
        }
    }
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut ExplorerView<'_>) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| {
            let area = frame.area();
            app.render(frame, area);
        })?;
        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key);
        }
    }
    Ok(())
}
