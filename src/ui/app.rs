use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use tracing::{debug, info, warn};

use crate::config::{AppConfig, AppKind};
use crate::db::{fetch_classes, fetch_students, DataStore};
use crate::menu::SectionCommand;
use crate::window::Window;

use super::helpers::{bar_line, dropdown_rect, section_offset, surface_error, window_area};
use super::navigation::{blank_menu, class_menu, profile_menu, student_menu, Action, MenuSpec};
use super::screens::{MenuCursor, Screen, ScreenView};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state: the store handle, the window with its menu bar
/// and the page currently shown.
pub struct App {
    store: DataStore,
    window: Window<Action>,
    screen: Screen,
    /// Last screen that installed the menu bar; Esc returns here.
    bar_owner: Screen,
    view: ScreenView,
    cursor: MenuCursor,
    status: Option<StatusMessage>,
}

impl App {
    /// Build the window and open the first screen for `config.kind`.
    pub fn new(store: DataStore, config: &AppConfig) -> Result<Self> {
        let mut app = Self {
            store,
            window: Window::new(config.title.as_str(), config.size),
            screen: Screen::Blank,
            bar_owner: Screen::Blank,
            view: ScreenView {
                heading: String::new(),
                lines: Vec::new(),
            },
            cursor: MenuCursor::default(),
            status: None,
        };

        let first = match config.kind {
            AppKind::ProfSimulator => Screen::Profile,
            AppKind::Blank => Screen::Blank,
        };
        app.open_screen(first)?;
        Ok(app)
    }

    pub fn window(&self) -> &Window<Action> {
        &self.window
    }

    /// Heading of the screen currently shown.
    pub fn heading(&self) -> &str {
        &self.view.heading
    }

    /// Process one key press. Returns `true` when the application should exit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(true),
            KeyCode::Left | KeyCode::BackTab => self.move_section(-1),
            KeyCode::Right | KeyCode::Tab => self.move_section(1),
            KeyCode::Up => self.move_item(-1),
            KeyCode::Down => {
                if self.cursor.open.is_some() {
                    self.move_item(1);
                } else if !self.current_section_is_leaf() {
                    return self.enter_section();
                }
            }
            KeyCode::Enter => {
                if self.cursor.open.is_some() {
                    return self.fire_item();
                }
                return self.enter_section();
            }
            KeyCode::Esc => {
                if self.cursor.open.is_some() {
                    self.cursor.close();
                } else if self.screen != self.bar_owner {
                    self.clear_status();
                    let owner = self.bar_owner.clone();
                    self.show(owner);
                }
            }
            _ => {}
        }
        Ok(false)
    }

    /// Run the action bound to a menu entry.
    pub fn perform(&mut self, action: Action) -> Result<bool> {
        debug!(?action, "menu action");
        self.clear_status();
        let next = match action {
            Action::Exit => return Ok(true),
            Action::OpenProfile => Screen::Profile,
            Action::OpenClass(class) => Screen::Class(class),
            Action::OpenStudent(student) => Screen::Student(student),
            Action::OpenHomework(class) => Screen::Homework(class),
            Action::OpenNotes(scope) => Screen::Notes(scope),
            Action::OpenGrades(student) => Screen::Grades(student),
        };
        self.show(next);
        Ok(false)
    }

    /// Open `screen`, keeping the current one and reporting in the footer when
    /// its data cannot be loaded.
    fn show(&mut self, screen: Screen) {
        if let Err(err) = self.open_screen(screen) {
            warn!(error = %err, "failed to open screen");
            self.set_status(surface_error(&err), StatusKind::Error);
        }
    }

    fn open_screen(&mut self, screen: Screen) -> Result<()> {
        let view = ScreenView::load(&self.store, &screen)?;
        if screen.owns_bar() {
            let spec = self.menu_for(&screen)?;
            self.window.build_bar(spec.sections.as_slice(), spec.commands);
            self.cursor.reset();
            self.bar_owner = screen.clone();
        }
        info!(heading = %view.heading, "opened screen");
        self.view = view;
        self.screen = screen;
        Ok(())
    }

    fn menu_for(&self, screen: &Screen) -> Result<MenuSpec> {
        Ok(match screen {
            Screen::Profile => profile_menu(&fetch_classes(&self.store)?),
            Screen::Class(class) => class_menu(class, &fetch_students(&self.store, class.id)?),
            Screen::Student(student) => student_menu(student),
            _ => blank_menu(),
        })
    }

    fn move_section(&mut self, offset: isize) {
        let bar = self.window.bar();
        if bar.is_empty() {
            return;
        }
        let next = (self.cursor.section as isize + offset).rem_euclid(bar.len() as isize) as usize;
        let open_next = bar
            .section(next)
            .map(|section| !section.items().is_empty())
            .unwrap_or(false);
        self.cursor.move_section(offset, bar.len(), open_next);
    }

    fn move_item(&mut self, offset: isize) {
        let items = self
            .window
            .bar()
            .section(self.cursor.section)
            .map(|section| section.items().len())
            .unwrap_or(0);
        self.cursor.move_item(offset, items);
    }

    fn current_section_is_leaf(&self) -> bool {
        self.window
            .bar()
            .section(self.cursor.section)
            .map(|section| section.is_leaf())
            .unwrap_or(false)
    }

    /// Fire a leaf section or drop down a group.
    fn enter_section(&mut self) -> Result<bool> {
        let Some(section) = self.window.bar().section(self.cursor.section) else {
            return Ok(false);
        };

        match section.command() {
            SectionCommand::Leaf(action) => {
                let action = action.clone();
                self.perform(action)
            }
            SectionCommand::Items(items) if items.is_empty() => {
                let message = format!("Nothing under {} yet.", section.label());
                self.set_status(message, StatusKind::Info);
                Ok(false)
            }
            SectionCommand::Items(_) => {
                self.cursor.open = Some(0);
                Ok(false)
            }
        }
    }

    fn fire_item(&mut self) -> Result<bool> {
        let action = self
            .cursor
            .open
            .and_then(|item| self.window.bar().activate(self.cursor.section, Some(item)))
            .cloned();
        self.cursor.close();
        match action {
            Some(action) => self.perform(action),
            None => Ok(false),
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = window_area(self.window.size(), frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.window.title().to_string());
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let footer_height = FOOTER_HEIGHT.min(inner.height.saturating_sub(1));
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(footer_height),
            ])
            .split(inner);

        let bar = Paragraph::new(bar_line(self.window.bar(), self.cursor.section));
        frame.render_widget(bar, chunks[0]);
        self.draw_body(frame, chunks[1]);
        if footer_height > 0 {
            self.draw_footer(frame, chunks[2]);
        }
        self.draw_dropdown(frame, chunks[0], inner);
    }

    fn draw_body(&self, frame: &mut Frame, area: Rect) {
        if area.height == 0 || matches!(self.screen, Screen::Blank) {
            return;
        }
        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.view.heading.clone());
        let lines: Vec<Line> = self
            .view
            .lines
            .iter()
            .map(|line| Line::from(line.clone()))
            .collect();
        let body = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
        frame.render_widget(body, area);
    }

    fn draw_dropdown(&self, frame: &mut Frame, bar_area: Rect, bounds: Rect) {
        let Some(selected) = self.cursor.open else {
            return;
        };
        let bar = self.window.bar();
        let Some(section) = bar.section(self.cursor.section) else {
            return;
        };
        let items = section.items();
        if items.is_empty() {
            return;
        }

        let rect = dropdown_rect(
            items.iter().map(|item| item.label.as_str()),
            section_offset(bar, self.cursor.section),
            bar_area.y + 1,
            bounds,
        );
        if rect.height == 0 {
            return;
        }

        let list = List::new(
            items
                .iter()
                .map(|item| ListItem::new(format!(" {} ", item.label)))
                .collect::<Vec<_>>(),
        )
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
        let mut state = ListState::default().with_selected(Some(selected));

        frame.render_widget(Clear, rect);
        frame.render_stateful_widget(list, rect, &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph =
            Paragraph::new(vec![status_line, self.footer_instructions()]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        if self.cursor.open.is_some() {
            Line::from(vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Navigate   "),
                Span::styled("[←→]", key_style),
                Span::raw(" Sections   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Open   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Close"),
            ])
        } else {
            Line::from(vec![
                Span::styled("[←→]", key_style),
                Span::raw(" Sections   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Select   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Back   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ])
        }
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}
