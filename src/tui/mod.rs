//! Ratatui-based terminal UI.
//!
//! The TUI provides a login/registration screen, then a course surface for
//! entering grades and running the four account actions: save grades,
//! calculate GPA, calculate remaining credit, calculate remaining CR/NCR.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Terminal,
};

use crate::cli::TuiArgs;
use crate::domain::{CourseId, CourseMap, CourseValue, PassFailMark};
use crate::error::AppError;
use crate::store::AccountStore;

/// Start the TUI.
pub fn run(args: TuiArgs) -> Result<(), AppError> {
    let store = crate::app::open_store(args.data_file.as_deref());

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(store);
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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Login,
    Courses,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoginField {
    Username,
    Password,
}

struct App {
    store: AccountStore,
    screen: Screen,
    username: String,
    password: String,
    login_field: LoginField,
    create_mode: bool,
    courses: CourseMap,
    selected: usize,
    entry: String,
    editing_entry: bool,
    report: String,
    status: String,
}

impl App {
    fn new(store: AccountStore) -> Self {
        Self {
            store,
            screen: Screen::Login,
            username: String::new(),
            password: String::new(),
            login_field: LoginField::Username,
            create_mode: false,
            courses: CourseMap::new(),
            selected: 0,
            entry: String::new(),
            editing_entry: false,
            report: String::new(),
            status: "Welcome to the GPA tracker! Please log in.".to_string(),
        }
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

    /// Returns `true` when the app should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match self.screen {
            Screen::Login => self.handle_login_key(code),
            Screen::Courses => self.handle_courses_key(code),
        }
    }

    fn handle_login_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Esc => return true,
            KeyCode::Tab | KeyCode::Up | KeyCode::Down => {
                self.login_field = match self.login_field {
                    LoginField::Username => LoginField::Password,
                    LoginField::Password => LoginField::Username,
                };
            }
            KeyCode::F(2) => {
                self.create_mode = !self.create_mode;
                self.status = if self.create_mode {
                    "Creating a new account. Enter a username and password.".to_string()
                } else {
                    "Logging in with an existing account.".to_string()
                };
            }
            KeyCode::Enter => self.submit_login(),
            KeyCode::Backspace => {
                self.active_login_field_mut().pop();
            }
            KeyCode::Char(c) => {
                if !c.is_control() {
                    self.active_login_field_mut().push(c);
                }
            }
            _ => {}
        }
        false
    }

    fn active_login_field_mut(&mut self) -> &mut String {
        match self.login_field {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }

    fn submit_login(&mut self) {
        let username = self.username.trim().to_string();
        let password = self.password.trim().to_string();
        if username.is_empty() || password.is_empty() {
            self.status = "Please enter your username and password.".to_string();
            return;
        }

        if self.create_mode {
            match self.store.create(&username, &password) {
                Ok(()) => {
                    self.create_mode = false;
                    self.status =
                        "Account created successfully! You can now log in.".to_string();
                }
                Err(err) => self.status = err.to_string(),
            }
            return;
        }

        match self.store.verify(&username, &password) {
            Ok(courses) => {
                self.courses = courses;
                self.selected = 0;
                self.report.clear();
                self.screen = Screen::Courses;
                self.status = format!("Logged in as {username}.");
            }
            Err(err) => self.status = err.to_string(),
        }
    }

    fn handle_courses_key(&mut self, code: KeyCode) -> bool {
        if self.editing_entry {
            self.handle_entry_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Esc => self.log_out(),
            KeyCode::Up => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected + 1 < self.courses.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Char('a') => {
                self.editing_entry = true;
                self.entry.clear();
                self.status =
                    "New course: ID=VALUE (e.g. MATH01Y=95 or MUS01H=CR). Enter to add, Esc to cancel."
                        .to_string();
            }
            KeyCode::Char('d') => self.delete_selected(),
            KeyCode::Char('s') => self.save_grades(),
            KeyCode::Char('g') => {
                self.report = crate::report::format_cgpa(&self.courses);
                self.status = "Calculated GPA.".to_string();
            }
            KeyCode::Char('c') => {
                self.report = crate::report::format_remaining_credit(&self.courses);
                self.status = "Calculated remaining credit.".to_string();
            }
            KeyCode::Char('n') => {
                self.report = crate::report::format_cr_ncr(&self.courses);
                self.status = "Calculated remaining CR/NCR.".to_string();
            }
            _ => {}
        }
        false
    }

    fn handle_entry_edit(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.editing_entry = false;
                self.status = "Course entry canceled.".to_string();
            }
            KeyCode::Enter => {
                self.editing_entry = false;
                match parse_course_entry(&self.entry) {
                    Ok((id, value)) => {
                        self.status = format!("Added {id}.");
                        self.courses.insert(id, value);
                        self.selected = self.courses.len().saturating_sub(1);
                    }
                    Err(message) => self.status = message,
                }
            }
            KeyCode::Backspace => {
                self.entry.pop();
            }
            KeyCode::Char(c) => {
                if !c.is_control() {
                    self.entry.push(c);
                }
            }
            _ => {}
        }
    }

    fn delete_selected(&mut self) {
        let Some((id, _)) = self.courses.shift_remove_index(self.selected) else {
            self.status = "No course selected.".to_string();
            return;
        };
        if self.selected >= self.courses.len() && self.selected > 0 {
            self.selected -= 1;
        }
        self.status = format!("Removed {id}. Press 's' to save.");
    }

    fn save_grades(&mut self) {
        let username = self.username.trim().to_string();
        let password = self.password.trim().to_string();
        match self.store.save(&username, &password, &self.courses) {
            Ok(()) => {
                self.status = format!("Saved {} course(s).", self.courses.len());
            }
            Err(err) => self.status = err.to_string(),
        }
    }

    fn log_out(&mut self) {
        self.screen = Screen::Login;
        self.password.clear();
        self.courses = CourseMap::new();
        self.report.clear();
        self.selected = 0;
        self.editing_entry = false;
        self.status = "Logged out.".to_string();
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        match self.screen {
            Screen::Login => self.draw_login(frame, chunks[1]),
            Screen::Courses => self.draw_courses(frame, chunks[1]),
        }
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("gpa", Style::default().fg(Color::Cyan)),
            Span::raw(" — GPA and credit tracker"),
        ]));

        let account = match self.screen {
            Screen::Login => {
                if self.create_mode {
                    "creating account".to_string()
                } else {
                    "not logged in".to_string()
                }
            }
            Screen::Courses => format!(
                "{} | {} course(s)",
                self.username.trim(),
                self.courses.len()
            ),
        };
        lines.push(Line::from(Span::styled(
            format!("{account} | file: {}", self.store.path().display()),
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_login(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let title = if self.create_mode { "Create Account" } else { "Log In" };

        let masked: String = "*".repeat(self.password.chars().count());
        let items = vec![
            ListItem::new(format!("Username: {}", self.username)),
            ListItem::new(format!("Password: {masked}")),
        ];

        let list = List::new(items)
            .block(Block::default().title(title).borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(match self.login_field {
            LoginField::Username => 0,
            LoginField::Password => 1,
        }));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_courses(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);

        self.draw_course_list(frame, chunks[0]);
        self.draw_results(frame, chunks[1]);
    }

    fn draw_course_list(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = self
            .courses
            .iter()
            .map(|(id, value)| ListItem::new(format!("{:<12} {value}", id.as_str())))
            .collect();

        let list = List::new(items)
            .block(Block::default().title("Courses").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        if !self.courses.is_empty() {
            state.select(Some(self.selected.min(self.courses.len() - 1)));
        }
        frame.render_stateful_widget(list, area, &mut state);

        if self.editing_entry {
            let hint = Paragraph::new(format!("New: {}_", self.entry))
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
            let rect = Rect {
                x: area.x + 2,
                y: area.y + area.height.saturating_sub(2),
                width: area.width.saturating_sub(4),
                height: 1,
            };
            frame.render_widget(hint, rect);
        }
    }

    fn draw_results(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let text = if self.report.is_empty() {
            "Press 'g', 'c', or 'n' to run a calculation.".to_string()
        } else {
            self.report.clone()
        };
        let p = Paragraph::new(text).block(Block::default().title("Results").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = match self.screen {
            Screen::Login => "Tab switch field  Enter submit  F2 create/log in  Esc quit",
            Screen::Courses => {
                "↑/↓ select  a add  d delete  s save  g GPA  c credits  n CR/NCR  Esc log out  q quit"
            }
        };
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Parse a single-line course entry of the form `ID=VALUE`.
///
/// The value is either an integer score (0–100) or `CR`/`NCR`
/// (case-insensitive). Identifiers are validated strictly here so malformed
/// course codes are rejected at entry time instead of silently dropping out of
/// every calculation later.
fn parse_course_entry(input: &str) -> Result<(CourseId, CourseValue), String> {
    let Some((id, value)) = input.split_once('=') else {
        return Err("Use ID=VALUE (e.g. MATH01Y=95 or MUS01H=CR).".to_string());
    };

    let id = CourseId::new(id.trim());
    id.validate().map_err(|err| err.to_string())?;

    let value = value.trim();
    if let Ok(score) = value.parse::<i64>() {
        if !(0..=100).contains(&score) {
            return Err(format!("Score must be between 0 and 100 (got {score})."));
        }
        return Ok((id, CourseValue::Score(score)));
    }

    match value.to_ascii_uppercase().as_str() {
        "CR" => Ok((id, CourseValue::PassFail(PassFailMark::Cr))),
        "NCR" => Ok((id, CourseValue::PassFail(PassFailMark::Ncr))),
        other => Err(format!("Expected a score or CR/NCR, got '{other}'.")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_score_entry() {
        let (id, value) = parse_course_entry("MATH01Y=95").unwrap();
        assert_eq!(id, CourseId::from("MATH01Y"));
        assert_eq!(value, CourseValue::Score(95));

        let (_, value) = parse_course_entry(" PHYS01H = 70 ").unwrap();
        assert_eq!(value, CourseValue::Score(70));
    }

    #[test]
    fn parse_pass_fail_entry() {
        let (_, value) = parse_course_entry("MUS01H=CR").unwrap();
        assert_eq!(value, CourseValue::PassFail(PassFailMark::Cr));

        let (_, value) = parse_course_entry("GYM01Y=ncr").unwrap();
        assert_eq!(value, CourseValue::PassFail(PassFailMark::Ncr));
    }

    #[test]
    fn parse_rejects_bad_entries() {
        assert!(parse_course_entry("MATH01Y").is_err());
        assert!(parse_course_entry("MATH01X=95").is_err());
        assert!(parse_course_entry("MATH01Y=120").is_err());
        assert!(parse_course_entry("MATH01Y=pass").is_err());
    }
}
