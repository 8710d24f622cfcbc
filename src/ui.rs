use std::cell::Cell;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossbeam_channel::{unbounded, Receiver, Sender};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use once_cell::sync::Lazy;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Padding, Paragraph, Wrap};
use ratatui::{Frame, Terminal};
use reqwest::blocking::Client as HttpClient;
use textwrap::wrap;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::catalog::{self, Card};
use crate::config;
use crate::data::SubmissionService;
use crate::download;
use crate::endpoint::{Submission, SubmitError};
use crate::filter::{FilterEngine, ALL_FILTER};
use crate::modal::{Modal, Player};
use crate::video;

const COLOR_BG: Color = Color::Rgb(30, 30, 46);
const COLOR_PANEL_BG: Color = Color::Rgb(24, 24, 36);
const COLOR_PANEL_FOCUSED_BG: Color = Color::Rgb(49, 50, 68);
const COLOR_PANEL_SELECTED_BG: Color = Color::Rgb(69, 71, 90);
const COLOR_BORDER_IDLE: Color = Color::Rgb(49, 50, 68);
const COLOR_BORDER_FOCUSED: Color = Color::Rgb(137, 180, 250);
const COLOR_TEXT_PRIMARY: Color = Color::Rgb(205, 214, 244);
const COLOR_TEXT_SECONDARY: Color = Color::Rgb(166, 173, 200);
const COLOR_ACCENT: Color = Color::Rgb(137, 180, 250);
const COLOR_SUCCESS: Color = Color::Rgb(166, 227, 161);
const COLOR_ERROR: Color = Color::Rgb(243, 139, 168);

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

static HTTP_CLIENT: Lazy<HttpClient> = Lazy::new(|| {
    HttpClient::builder()
        .timeout(Duration::from_secs(30))
        .user_agent("reel-tui/0.1 (downloads)")
        .build()
        .expect("create http client")
});

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let percent_x = percent_x.min(100);
    let percent_y = percent_y.min(100);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage(100 - percent_x - (100 - percent_x) / 2),
        ])
        .split(area);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage(100 - percent_y - (100 - percent_y) / 2),
        ])
        .split(horizontal[1]);
    vertical[1]
}

fn rect_contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

fn truncate_to_width(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if UnicodeWidthStr::width(text) <= max_width {
        return text.to_string();
    }
    let mut truncated = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let char_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + char_width + 1 > max_width {
            break;
        }
        used += char_width;
        truncated.push(ch);
    }
    truncated.push('…');
    truncated
}

fn filter_tags(cards: &[Card]) -> Vec<String> {
    let mut tags = vec![ALL_FILTER.to_string()];
    tags.extend(catalog::categories(cards));
    tags
}

fn filter_title(tag: &str) -> &str {
    if tag == ALL_FILTER {
        "all work"
    } else {
        tag
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Pane {
    Filters,
    Cards,
    Details,
}

impl Pane {
    fn title(self) -> &'static str {
        match self {
            Pane::Filters => "Filters",
            Pane::Cards => "Reels",
            Pane::Details => "Details",
        }
    }

    fn next(self) -> Self {
        match self {
            Pane::Filters => Pane::Cards,
            Pane::Cards => Pane::Details,
            Pane::Details => Pane::Details,
        }
    }

    fn previous(self) -> Self {
        match self {
            Pane::Filters => Pane::Filters,
            Pane::Cards => Pane::Filters,
            Pane::Details => Pane::Cards,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Default)]
enum SubscribeField {
    #[default]
    Email,
    Send,
}

impl SubscribeField {
    fn next(self) -> Self {
        match self {
            SubscribeField::Email => SubscribeField::Send,
            SubscribeField::Send => SubscribeField::Email,
        }
    }

    fn previous(self) -> Self {
        self.next()
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Default)]
enum ContactField {
    #[default]
    Name,
    Email,
    Phone,
    Message,
    Send,
}

impl ContactField {
    fn next(self) -> Self {
        match self {
            ContactField::Name => ContactField::Email,
            ContactField::Email => ContactField::Phone,
            ContactField::Phone => ContactField::Message,
            ContactField::Message => ContactField::Send,
            ContactField::Send => ContactField::Name,
        }
    }

    fn previous(self) -> Self {
        match self {
            ContactField::Name => ContactField::Send,
            ContactField::Email => ContactField::Name,
            ContactField::Phone => ContactField::Email,
            ContactField::Message => ContactField::Phone,
            ContactField::Send => ContactField::Message,
        }
    }

    fn title(self) -> &'static str {
        match self {
            ContactField::Name => "Name",
            ContactField::Email => "Email",
            ContactField::Phone => "Phone",
            ContactField::Message => "Message",
            ContactField::Send => "Send Message",
        }
    }
}

#[derive(Default)]
struct SubscribeForm {
    active: SubscribeField,
    email: String,
    status: Option<String>,
}

impl SubscribeForm {
    fn reset_status(&mut self) {
        self.status = None;
    }

    fn set_status<S: Into<String>>(&mut self, message: S) {
        self.status = Some(message.into());
    }

    fn next(&mut self) {
        self.active = self.active.next();
    }

    fn previous(&mut self) {
        self.active = self.active.previous();
    }

    fn active_value_mut(&mut self) -> Option<&mut String> {
        match self.active {
            SubscribeField::Email => Some(&mut self.email),
            SubscribeField::Send => None,
        }
    }

    fn insert_char(&mut self, ch: char) {
        if let Some(value) = self.active_value_mut() {
            value.push(ch);
        }
        self.reset_status();
    }

    fn backspace(&mut self) {
        if let Some(value) = self.active_value_mut() {
            value.pop();
        }
        self.reset_status();
    }

    fn clear_active(&mut self) {
        if let Some(value) = self.active_value_mut() {
            value.clear();
        }
        self.reset_status();
    }

    fn trimmed_email(&self) -> String {
        self.email.trim().to_string()
    }

    fn display_value(&self) -> String {
        if self.email.is_empty() {
            return "(not set)".to_string();
        }
        self.email.clone()
    }
}

// Status lines expire a few seconds after a submission settles, so the
// form tracks when its status was set.
#[derive(Default)]
struct ContactForm {
    active: ContactField,
    name: String,
    email: String,
    phone: String,
    message: String,
    status: Option<String>,
    status_set_at: Option<Instant>,
}

impl ContactForm {
    fn reset_status(&mut self) {
        self.status = None;
        self.status_set_at = None;
    }

    fn set_status<S: Into<String>>(&mut self, message: S) {
        self.status = Some(message.into());
        self.status_set_at = Some(Instant::now());
    }

    fn expire_status(&mut self, ttl: Duration) -> bool {
        let Some(set_at) = self.status_set_at else {
            return false;
        };
        if set_at.elapsed() < ttl {
            return false;
        }
        self.reset_status();
        true
    }

    fn next(&mut self) {
        self.active = self.active.next();
    }

    fn previous(&mut self) {
        self.active = self.active.previous();
    }

    fn active_value_mut(&mut self) -> Option<&mut String> {
        match self.active {
            ContactField::Name => Some(&mut self.name),
            ContactField::Email => Some(&mut self.email),
            ContactField::Phone => Some(&mut self.phone),
            ContactField::Message => Some(&mut self.message),
            ContactField::Send => None,
        }
    }

    fn insert_char(&mut self, ch: char) {
        if let Some(value) = self.active_value_mut() {
            value.push(ch);
        }
        self.reset_status();
    }

    fn backspace(&mut self) {
        if let Some(value) = self.active_value_mut() {
            value.pop();
        }
        self.reset_status();
    }

    fn clear_active(&mut self) {
        if let Some(value) = self.active_value_mut() {
            value.clear();
        }
        self.reset_status();
    }

    fn trimmed_values(&self) -> (String, String, String, String) {
        (
            self.name.trim().to_string(),
            self.email.trim().to_string(),
            self.phone.trim().to_string(),
            self.message.trim().to_string(),
        )
    }

    fn display_value(&self, field: ContactField) -> String {
        let raw = match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Phone => &self.phone,
            ContactField::Message => &self.message,
            ContactField::Send => return String::new(),
        };
        if raw.is_empty() {
            return "(not set)".to_string();
        }
        raw.clone()
    }

    fn reset(&mut self) {
        self.active = ContactField::Name;
        self.name.clear();
        self.email.clear();
        self.phone.clear();
        self.message.clear();
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Default)]
enum Overlay {
    #[default]
    None,
    Subscribe,
    Contact,
    SharePrompt,
}

struct PendingSubmit {
    request_id: u64,
}

struct PendingDownload {
    request_id: u64,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum SubmissionKind {
    Subscribe,
    Contact,
}

enum AsyncResponse {
    Submission {
        request_id: u64,
        kind: SubmissionKind,
        result: Result<(), SubmitError>,
    },
    Download {
        request_id: u64,
        result: Result<PathBuf>,
    },
    Playback {
        result: Result<()>,
    },
}

// The send also happens on drop, so the submit control comes back even
// when the worker dies before reporting.
struct SubmitReply {
    tx: Sender<AsyncResponse>,
    request_id: u64,
    kind: SubmissionKind,
    outcome: Option<Result<(), SubmitError>>,
}

impl SubmitReply {
    fn new(tx: Sender<AsyncResponse>, request_id: u64, kind: SubmissionKind) -> Self {
        Self {
            tx,
            request_id,
            kind,
            outcome: None,
        }
    }

    fn deliver(&mut self, result: Result<(), SubmitError>) {
        self.outcome = Some(result);
    }
}

impl Drop for SubmitReply {
    fn drop(&mut self) {
        let result = self.outcome.take().unwrap_or(Err(SubmitError::Interrupted));
        let _ = self.tx.send(AsyncResponse::Submission {
            request_id: self.request_id,
            kind: self.kind,
            result,
        });
    }
}

struct Spinner {
    index: usize,
    last_tick: Instant,
}

impl Spinner {
    fn new() -> Self {
        Self {
            index: 0,
            last_tick: Instant::now(),
        }
    }

    fn frame(&self) -> &'static str {
        SPINNER_FRAMES[self.index % SPINNER_FRAMES.len()]
    }

    fn advance(&mut self) -> bool {
        let now = Instant::now();
        if now.duration_since(self.last_tick) >= Duration::from_millis(120) {
            self.index = (self.index + 1) % SPINNER_FRAMES.len();
            self.last_tick = now;
            true
        } else {
            false
        }
    }

    fn reset(&mut self) {
        self.index = 0;
        self.last_tick = Instant::now();
    }
}

pub struct Options {
    pub status_message: String,
    pub cards: Vec<Card>,
    pub submission_service: Option<Arc<dyn SubmissionService + Send + Sync>>,
    pub config: config::Config,
    pub config_path: String,
}

pub struct Model {
    status_message: String,
    engine: FilterEngine,
    filters: Vec<String>,
    manifest_path: Option<PathBuf>,
    site_url: String,
    status_ttl: Duration,
    video_command: Vec<String>,
    video_detach: bool,
    download_dir: Option<PathBuf>,
    submission_service: Option<Arc<dyn SubmissionService + Send + Sync>>,
    config_path: String,
    modal: Modal,
    overlay: Overlay,
    subscribe_form: SubscribeForm,
    contact_form: ContactForm,
    share_link: Option<String>,
    search_active: bool,
    focused_pane: Pane,
    selected_filter: usize,
    selected_card: usize,
    card_offset: Cell<usize>,
    card_view_height: Cell<u16>,
    filters_area: Option<Rect>,
    cards_area: Option<Rect>,
    player_area: Option<Rect>,
    needs_redraw: bool,
    spinner: Spinner,
    response_tx: Sender<AsyncResponse>,
    response_rx: Receiver<AsyncResponse>,
    next_request_id: u64,
    pending_subscribe: Option<PendingSubmit>,
    pending_contact: Option<PendingSubmit>,
    pending_download: Option<PendingDownload>,
}

impl Model {
    pub fn new(opts: Options) -> Self {
        let (response_tx, response_rx) = unbounded();
        let engine = FilterEngine::new(opts.cards);
        let filters = filter_tags(engine.cards());
        Self {
            status_message: opts.status_message,
            engine,
            filters,
            manifest_path: opts.config.gallery.manifest.clone(),
            site_url: opts.config.gallery.site_url.clone(),
            status_ttl: opts.config.gallery.status_ttl,
            video_command: opts.config.player.video_command.clone(),
            video_detach: opts.config.player.video_detach,
            download_dir: opts.config.download.dir.clone(),
            submission_service: opts.submission_service,
            config_path: opts.config_path,
            modal: Modal::new(),
            overlay: Overlay::None,
            subscribe_form: SubscribeForm::default(),
            contact_form: ContactForm::default(),
            share_link: None,
            search_active: false,
            focused_pane: Pane::Cards,
            selected_filter: 0,
            selected_card: 0,
            card_offset: Cell::new(0),
            card_view_height: Cell::new(0),
            filters_area: None,
            cards_area: None,
            player_area: None,
            needs_redraw: true,
            spinner: Spinner::new(),
            response_tx,
            response_rx,
            next_request_id: 1,
            pending_subscribe: None,
            pending_contact: None,
            pending_download: None,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        enable_raw_mode()?;
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let result = self.event_loop(&mut terminal);

        disable_raw_mode()?;
        terminal.backend_mut().execute(DisableMouseCapture)?;
        terminal.backend_mut().execute(LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let mut last_tick = Instant::now();
        let tick_rate = Duration::from_millis(120);

        loop {
            if self.poll_async() {
                self.mark_dirty();
            }

            if self.needs_redraw {
                terminal.draw(|frame| self.draw(frame))?;
                self.needs_redraw = false;
            }

            let timeout = tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_millis(16));

            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        match self.handle_key(key.code) {
                            Ok(true) => break,
                            Ok(false) => {}
                            Err(err) => {
                                self.status_message = format!("Error: {}", err);
                                self.mark_dirty();
                            }
                        }
                    }
                    Event::Mouse(mouse) => {
                        if let Err(err) = self.handle_mouse(mouse) {
                            self.status_message = format!("Error: {}", err);
                            self.mark_dirty();
                        }
                    }
                    _ => {}
                }
            }

            if self.poll_async() {
                self.mark_dirty();
            }

            if last_tick.elapsed() >= tick_rate {
                last_tick = Instant::now();
                let mut ticked = false;
                if self.is_loading() && self.spinner.advance() {
                    ticked = true;
                } else if !self.is_loading() {
                    self.spinner.reset();
                }
                if self.contact_form.expire_status(self.status_ttl) {
                    ticked = true;
                }
                if ticked {
                    self.mark_dirty();
                }
            }
        }

        Ok(())
    }

    fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    fn is_loading(&self) -> bool {
        self.pending_subscribe.is_some()
            || self.pending_contact.is_some()
            || self.pending_download.is_some()
    }

    fn focus_status_for(pane: Pane) -> String {
        match pane {
            Pane::Filters => "Filters: Enter applies the highlighted tag.".to_string(),
            Pane::Cards => "Reels: Enter plays the highlighted reel.".to_string(),
            Pane::Details => "Details: Enter play · n subscribe · c contact.".to_string(),
        }
    }

    fn selected_card_index(&self) -> Option<usize> {
        self.engine.visible_indices().get(self.selected_card).copied()
    }

    fn restore_selection(&mut self, remembered: Option<usize>) {
        let visible = self.engine.visible_indices();
        self.selected_card = remembered
            .and_then(|card| visible.iter().position(|&index| index == card))
            .unwrap_or(0);
        self.ensure_card_visible();
    }

    fn ensure_card_visible(&self) {
        let height = (self.card_view_height.get() as usize).max(1);
        let mut offset = self.card_offset.get();
        if self.selected_card < offset {
            offset = self.selected_card;
        } else if self.selected_card >= offset + height {
            offset = self.selected_card + 1 - height;
        }
        self.card_offset.set(offset);
    }

    fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        if self.overlay == Overlay::SharePrompt {
            return self.handle_share_prompt_key(code);
        }
        if self.modal.is_open() {
            return self.handle_player_key(code);
        }
        match self.overlay {
            Overlay::Subscribe => return self.handle_subscribe_key(code),
            Overlay::Contact => return self.handle_contact_key(code),
            Overlay::SharePrompt | Overlay::None => {}
        }
        if self.search_active {
            return self.handle_search_key(code);
        }
        self.handle_browse_key(code)
    }

    fn handle_browse_key(&mut self, code: KeyCode) -> Result<bool> {
        match code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Tab | KeyCode::Char('l') | KeyCode::Right => {
                self.focused_pane = self.focused_pane.next();
                self.status_message = Self::focus_status_for(self.focused_pane);
                self.mark_dirty();
            }
            KeyCode::BackTab | KeyCode::Char('h') | KeyCode::Left => {
                self.focused_pane = self.focused_pane.previous();
                self.status_message = Self::focus_status_for(self.focused_pane);
                self.mark_dirty();
            }
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),
            KeyCode::Char('g') | KeyCode::Home => self.move_selection(i64::MIN),
            KeyCode::Char('G') | KeyCode::End => self.move_selection(i64::MAX),
            KeyCode::Enter => self.activate_selection()?,
            KeyCode::Char('/') => {
                self.search_active = true;
                self.focused_pane = Pane::Cards;
                self.status_message =
                    "Search: type to filter titles · Enter/Esc done".to_string();
                self.mark_dirty();
            }
            KeyCode::Char('n') => self.open_subscribe_form(),
            KeyCode::Char('c') => self.open_contact_form(),
            KeyCode::Char('r') => self.reload_catalog(),
            _ => {}
        }
        Ok(false)
    }

    fn handle_player_key(&mut self, code: KeyCode) -> Result<bool> {
        match code {
            KeyCode::Esc | KeyCode::Char('q') => self.close_player(),
            KeyCode::Enter => self.launch_playback(),
            KeyCode::Char('s') => self.share_current(),
            KeyCode::Char('d') => self.download_current(),
            _ => {}
        }
        Ok(false)
    }

    fn handle_share_prompt_key(&mut self, code: KeyCode) -> Result<bool> {
        match code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                self.overlay = Overlay::None;
                self.share_link = None;
                self.mark_dirty();
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_subscribe_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut dirty = false;
        match code {
            KeyCode::Esc => {
                self.overlay = Overlay::None;
                self.status_message = Self::focus_status_for(self.focused_pane);
                self.mark_dirty();
                return Ok(false);
            }
            KeyCode::Tab | KeyCode::Down => {
                self.subscribe_form.next();
                dirty = true;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.subscribe_form.previous();
                dirty = true;
            }
            KeyCode::Enter => match self.subscribe_form.active {
                SubscribeField::Send => {
                    self.submit_subscribe();
                    dirty = true;
                }
                SubscribeField::Email => {
                    self.subscribe_form.next();
                    dirty = true;
                }
            },
            KeyCode::Backspace => {
                self.subscribe_form.backspace();
                dirty = true;
            }
            KeyCode::Delete => {
                self.subscribe_form.clear_active();
                dirty = true;
            }
            KeyCode::Char(ch) => {
                if !ch.is_control() {
                    self.subscribe_form.insert_char(ch);
                    dirty = true;
                }
            }
            _ => {}
        }
        if dirty {
            self.mark_dirty();
        }
        Ok(false)
    }

    fn handle_contact_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut dirty = false;
        match code {
            KeyCode::Esc => {
                self.overlay = Overlay::None;
                self.status_message = Self::focus_status_for(self.focused_pane);
                self.mark_dirty();
                return Ok(false);
            }
            KeyCode::Tab | KeyCode::Down => {
                self.contact_form.next();
                dirty = true;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.contact_form.previous();
                dirty = true;
            }
            KeyCode::Enter => match self.contact_form.active {
                ContactField::Send => {
                    self.submit_contact();
                    dirty = true;
                }
                _ => {
                    self.contact_form.next();
                    dirty = true;
                }
            },
            KeyCode::Backspace => {
                self.contact_form.backspace();
                dirty = true;
            }
            KeyCode::Delete => {
                self.contact_form.clear_active();
                dirty = true;
            }
            KeyCode::Char(ch) => {
                if !ch.is_control() {
                    self.contact_form.insert_char(ch);
                    dirty = true;
                }
            }
            _ => {}
        }
        if dirty {
            self.mark_dirty();
        }
        Ok(false)
    }

    fn handle_search_key(&mut self, code: KeyCode) -> Result<bool> {
        match code {
            KeyCode::Esc | KeyCode::Enter => {
                self.search_active = false;
                self.status_message = Self::focus_status_for(self.focused_pane);
            }
            KeyCode::Backspace => {
                let remembered = self.selected_card_index();
                self.engine.pop_query_char();
                self.restore_selection(remembered);
            }
            KeyCode::Delete => {
                let remembered = self.selected_card_index();
                self.engine.clear_query();
                self.restore_selection(remembered);
            }
            KeyCode::Char(ch) => {
                if !ch.is_control() {
                    let remembered = self.selected_card_index();
                    self.engine.push_query_char(ch);
                    self.restore_selection(remembered);
                }
            }
            _ => {}
        }
        self.mark_dirty();
        Ok(false)
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        if matches!(
            self.overlay,
            Overlay::Subscribe | Overlay::Contact | Overlay::SharePrompt
        ) {
            return Ok(());
        }

        if self.modal.is_open() {
            if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                let inside = self
                    .player_area
                    .is_some_and(|area| rect_contains(area, mouse.column, mouse.row));
                if !inside {
                    self.close_player();
                }
            }
            return Ok(());
        }

        match mouse.kind {
            MouseEventKind::ScrollDown => self.move_selection(1),
            MouseEventKind::ScrollUp => self.move_selection(-1),
            MouseEventKind::Down(MouseButton::Left) => {
                self.handle_left_click(mouse.column, mouse.row)?;
            }
            _ => {}
        }

        Ok(())
    }

    fn handle_left_click(&mut self, column: u16, row: u16) -> Result<()> {
        if let Some(area) = self.filters_area {
            if rect_contains(area, column, row) {
                let index = (row - area.y) as usize;
                if index < self.filters.len() {
                    self.focused_pane = Pane::Filters;
                    self.selected_filter = index;
                    if let Some(tag) = self.filters.get(index).cloned() {
                        self.apply_filter(&tag);
                    }
                }
                return Ok(());
            }
        }
        if let Some(area) = self.cards_area {
            if rect_contains(area, column, row) {
                let index = self.card_offset.get() + (row - area.y) as usize;
                if index < self.engine.visible_count() {
                    self.focused_pane = Pane::Cards;
                    self.selected_card = index;
                    self.mark_dirty();
                    self.open_selected_card()?;
                }
                return Ok(());
            }
        }
        Ok(())
    }

    fn move_selection(&mut self, delta: i64) {
        match self.focused_pane {
            Pane::Filters => {
                if self.filters.is_empty() {
                    return;
                }
                let last = self.filters.len() as i64 - 1;
                let next = (self.selected_filter as i64).saturating_add(delta).clamp(0, last);
                if next as usize != self.selected_filter {
                    self.selected_filter = next as usize;
                    self.mark_dirty();
                }
            }
            Pane::Cards | Pane::Details => {
                let count = self.engine.visible_count();
                if count == 0 {
                    return;
                }
                let last = count as i64 - 1;
                let next = (self.selected_card as i64).saturating_add(delta).clamp(0, last);
                if next as usize != self.selected_card {
                    self.selected_card = next as usize;
                    self.ensure_card_visible();
                    self.mark_dirty();
                }
            }
        }
    }

    fn activate_selection(&mut self) -> Result<()> {
        match self.focused_pane {
            Pane::Filters => {
                if let Some(tag) = self.filters.get(self.selected_filter).cloned() {
                    self.apply_filter(&tag);
                }
                Ok(())
            }
            Pane::Cards | Pane::Details => self.open_selected_card(),
        }
    }

    fn apply_filter(&mut self, tag: &str) {
        let remembered = self.selected_card_index();
        self.engine.set_filter(tag);
        self.restore_selection(remembered);
        self.status_message = format!(
            "Showing {}: {} reels.",
            filter_title(tag),
            self.engine.visible_count()
        );
        self.mark_dirty();
    }

    fn open_selected_card(&mut self) -> Result<()> {
        let Some(index) = self.selected_card_index() else {
            self.status_message = "No reel selected.".to_string();
            self.mark_dirty();
            return Ok(());
        };
        let Some(card) = self.engine.card(index).cloned() else {
            return Ok(());
        };
        self.modal.open(&card.source, &card.title);
        self.launch_playback();
        self.mark_dirty();
        Ok(())
    }

    fn close_player(&mut self) {
        self.modal.close();
        self.player_area = None;
        self.status_message = Self::focus_status_for(self.focused_pane);
        self.mark_dirty();
    }

    fn launch_playback(&mut self) {
        let Some(open) = self.modal.current().cloned() else {
            return;
        };
        if cfg!(test) {
            self.status_message = format!("Now playing: {}", open.title);
            self.mark_dirty();
            return;
        }
        let result = match &open.player {
            Player::Embed(embed) => video::open_embed(&embed.url),
            Player::Native(native) => {
                let command = self.video_command.clone();
                let url = native.url.clone();
                let detach = self.video_detach;
                let tx = self.response_tx.clone();
                thread::spawn(move || {
                    let result = video::spawn_external_player(&command, &url, detach);
                    let _ = tx.send(AsyncResponse::Playback { result });
                });
                Ok(())
            }
        };
        match result {
            Ok(()) => {
                self.status_message = format!("Now playing: {}", open.title);
            }
            Err(err) => {
                self.status_message = format!("Failed to start playback: {err}");
            }
        }
        self.mark_dirty();
    }

    fn open_subscribe_form(&mut self) {
        self.overlay = Overlay::Subscribe;
        self.subscribe_form.active = SubscribeField::Email;
        self.status_message = "Subscribe for updates about new reels.".to_string();
        self.mark_dirty();
    }

    fn open_contact_form(&mut self) {
        self.overlay = Overlay::Contact;
        self.contact_form.active = ContactField::Name;
        self.status_message = "Start a project with the studio.".to_string();
        self.mark_dirty();
    }

    fn submit_subscribe(&mut self) {
        if self.pending_subscribe.is_some() {
            return;
        }
        let email = self.subscribe_form.trimmed_email();
        if email.is_empty() {
            self.subscribe_form.set_status("Please enter an email.");
            return;
        }
        let Some(service) = self.submission_service.clone() else {
            let message = format!(
                "Set endpoint.submit_url in {} to send submissions.",
                self.config_path
            );
            self.subscribe_form.set_status(message.clone());
            self.status_message = message;
            return;
        };
        let request_id = self.next_request_id;
        self.next_request_id = self.next_request_id.wrapping_add(1);
        self.pending_subscribe = Some(PendingSubmit { request_id });
        let tx = self.response_tx.clone();
        thread::spawn(move || {
            let mut reply = SubmitReply::new(tx, request_id, SubmissionKind::Subscribe);
            reply.deliver(service.submit(Submission::Subscription { email }));
        });
    }

    fn submit_contact(&mut self) {
        if self.pending_contact.is_some() {
            return;
        }
        let (name, email, phone, message) = self.contact_form.trimmed_values();
        if name.is_empty() || email.is_empty() || message.is_empty() {
            self.contact_form
                .set_status("Please fill in name, email, and message.");
            return;
        }
        let Some(service) = self.submission_service.clone() else {
            let status = format!(
                "Set endpoint.submit_url in {} to send submissions.",
                self.config_path
            );
            self.contact_form.set_status(status.clone());
            self.status_message = status;
            return;
        };
        let request_id = self.next_request_id;
        self.next_request_id = self.next_request_id.wrapping_add(1);
        self.pending_contact = Some(PendingSubmit { request_id });
        let tx = self.response_tx.clone();
        thread::spawn(move || {
            let mut reply = SubmitReply::new(tx, request_id, SubmissionKind::Contact);
            reply.deliver(service.submit(Submission::Contact {
                name,
                email,
                phone,
                message,
            }));
        });
    }

    fn share_current(&mut self) {
        let Some(payload) = self.modal.share(&self.site_url) else {
            return;
        };
        match copy_share_link(&payload.url) {
            Ok(()) => {
                self.status_message =
                    format!("Share link for {} copied to clipboard.", payload.title);
            }
            Err(err) => {
                log::warn!("clipboard unavailable: {err}");
                self.share_link = Some(payload.url);
                self.overlay = Overlay::SharePrompt;
                self.status_message =
                    "Clipboard unavailable. Copy the link from the prompt.".to_string();
            }
        }
        self.mark_dirty();
    }

    fn download_current(&mut self) {
        let Some(url) = self.modal.download_url().map(|url| url.to_string()) else {
            self.status_message = "Download not available for embedded players.".to_string();
            self.mark_dirty();
            return;
        };
        if self.pending_download.is_some() {
            self.status_message = "A download is already in progress...".to_string();
            self.mark_dirty();
            return;
        }
        let Some(dir) = self.download_dir.clone() else {
            self.status_message =
                format!("Set download.dir in {} to save reels.", self.config_path);
            self.mark_dirty();
            return;
        };
        let request_id = self.next_request_id;
        self.next_request_id = self.next_request_id.wrapping_add(1);
        self.pending_download = Some(PendingDownload { request_id });
        self.status_message = format!("Downloading {url}...");
        let tx = self.response_tx.clone();
        thread::spawn(move || {
            let result = download::fetch_to_dir(&HTTP_CLIENT, &url, &dir);
            let _ = tx.send(AsyncResponse::Download { request_id, result });
        });
        self.mark_dirty();
    }

    fn reload_catalog(&mut self) {
        let cards = match &self.manifest_path {
            Some(path) => match catalog::load_file(path) {
                Ok(cards) => cards,
                Err(err) => {
                    self.status_message = format!("Failed to reload catalog: {err}");
                    self.mark_dirty();
                    return;
                }
            },
            None => catalog::builtin(),
        };

        let remembered = self
            .selected_card_index()
            .and_then(|index| self.engine.card(index).cloned());
        let active = self.engine.active_filter().to_string();
        let query = self.engine.query().to_string();

        self.engine = FilterEngine::new(cards);
        self.filters = filter_tags(self.engine.cards());
        if self.filters.iter().any(|tag| tag == &active) {
            self.engine.set_filter(&active);
        } else {
            self.selected_filter = 0;
        }
        self.engine.set_query(&query);
        if self.selected_filter >= self.filters.len() {
            self.selected_filter = 0;
        }

        let visible = self.engine.visible_indices();
        self.selected_card = remembered
            .and_then(|card| {
                visible
                    .iter()
                    .position(|&index| self.engine.card(index) == Some(&card))
            })
            .unwrap_or(0);
        self.ensure_card_visible();
        self.status_message = format!("Catalog reloaded: {} reels.", self.engine.cards().len());
        self.mark_dirty();
    }

    fn poll_async(&mut self) -> bool {
        let mut changed = false;
        while let Ok(message) = self.response_rx.try_recv() {
            self.handle_async_response(message);
            changed = true;
        }
        changed
    }

    fn handle_async_response(&mut self, message: AsyncResponse) {
        match message {
            AsyncResponse::Submission {
                request_id,
                kind: SubmissionKind::Subscribe,
                result,
            } => {
                let Some(pending) = &self.pending_subscribe else {
                    return;
                };
                if pending.request_id != request_id {
                    return;
                }
                self.pending_subscribe = None;
                if let Err(err) = &result {
                    log::warn!("subscribe submission failed: {err}");
                }
                let status = match result {
                    Ok(()) => {
                        self.subscribe_form.email.clear();
                        "Thanks — you are subscribed!"
                    }
                    Err(SubmitError::Rejected { .. }) => "There was an error. Try again later.",
                    Err(_) => "Request failed. Check your script URL and CORS settings.",
                };
                self.subscribe_form.set_status(status);
                self.mark_dirty();
            }
            AsyncResponse::Submission {
                request_id,
                kind: SubmissionKind::Contact,
                result,
            } => {
                let Some(pending) = &self.pending_contact else {
                    return;
                };
                if pending.request_id != request_id {
                    return;
                }
                self.pending_contact = None;
                if let Err(err) = &result {
                    log::warn!("contact submission failed: {err}");
                }
                let status = match result {
                    Ok(()) => {
                        self.contact_form.reset();
                        "Message sent — we will contact you soon."
                    }
                    Err(SubmitError::Rejected { .. }) => "Submission failed. Try again later.",
                    Err(_) => "Request failed. Check your script URL.",
                };
                self.contact_form.set_status(status);
                self.mark_dirty();
            }
            AsyncResponse::Download { request_id, result } => {
                let Some(pending) = &self.pending_download else {
                    return;
                };
                if pending.request_id != request_id {
                    return;
                }
                self.pending_download = None;
                match result {
                    Ok(path) => {
                        self.status_message = format!("Saved reel to {}.", path.display());
                    }
                    Err(err) => {
                        self.status_message = format!("Download failed: {err}");
                    }
                }
                self.mark_dirty();
            }
            AsyncResponse::Playback { result } => {
                if let Err(err) = result {
                    self.status_message = format!("External player failed: {err}");
                    self.mark_dirty();
                }
            }
        }
    }

    fn draw(&mut self, frame: &mut Frame<'_>) {
        let full = frame.size();
        frame.render_widget(Block::default().style(Style::default().bg(COLOR_BG)), full);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(full);

        let status_text = if self.is_loading() {
            format!("{} {}", self.spinner.frame(), self.status_message)
        } else {
            self.status_message.clone()
        };
        let status_line = Paragraph::new(status_text).style(
            Style::default()
                .fg(COLOR_TEXT_PRIMARY)
                .bg(COLOR_PANEL_FOCUSED_BG)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(status_line, layout[0]);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(pane_constraints())
            .split(layout[1]);

        self.draw_filters(frame, chunks[0]);
        self.draw_cards(frame, chunks[1]);
        self.draw_details(frame, chunks[2]);

        let footer = Paragraph::new(self.footer_text())
            .style(
                Style::default()
                    .fg(COLOR_TEXT_SECONDARY)
                    .bg(COLOR_PANEL_BG)
                    .add_modifier(Modifier::ITALIC),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(footer, layout[2]);

        if self.modal.is_open() {
            self.draw_player(frame, layout[1]);
        } else {
            self.player_area = None;
        }

        match self.overlay {
            Overlay::Subscribe => self.draw_subscribe_form(frame, layout[1]),
            Overlay::Contact => self.draw_contact_form(frame, layout[1]),
            Overlay::SharePrompt => self.draw_share_prompt(frame, layout[1]),
            Overlay::None => {}
        }
    }

    fn pane_block(&self, pane: Pane) -> Block<'static> {
        let focused = self.focused_pane == pane;
        let border_style = if focused {
            Style::default().fg(COLOR_BORDER_FOCUSED)
        } else {
            Style::default().fg(COLOR_BORDER_IDLE)
        };
        let title_style = if focused {
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(COLOR_TEXT_SECONDARY)
        };
        Block::default()
            .title(Span::styled(pane.title(), title_style))
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(COLOR_PANEL_BG))
            .padding(Padding::uniform(1))
    }

    fn draw_filters(&mut self, frame: &mut Frame<'_>, area: Rect) {
        let block = self.pane_block(Pane::Filters);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.filters_area = Some(inner);
        let focused = self.focused_pane == Pane::Filters;

        let mut items: Vec<ListItem> = Vec::new();
        for (idx, tag) in self.filters.iter().enumerate() {
            let selected = idx == self.selected_filter;
            let active = tag.as_str() == self.engine.active_filter();
            let highlight = focused && selected;
            let background = if highlight {
                COLOR_PANEL_SELECTED_BG
            } else {
                COLOR_PANEL_BG
            };
            let color = if active {
                COLOR_ACCENT
            } else if focused || selected {
                COLOR_TEXT_PRIMARY
            } else {
                COLOR_TEXT_SECONDARY
            };
            let mut style = Style::default().fg(color).bg(background);
            if highlight || active {
                style = style.add_modifier(Modifier::BOLD);
            }
            let marker = if active { "●" } else { " " };
            let label = format!("{marker} {}", filter_title(tag));
            items.push(ListItem::new(Line::from(Span::styled(label, style))));
        }
        frame.render_widget(List::new(items), inner);
    }

    fn draw_cards(&mut self, frame: &mut Frame<'_>, area: Rect) {
        let block = self.pane_block(Pane::Cards);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let focused = self.focused_pane == Pane::Cards;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(inner);
        let search_area = chunks[0];
        let list_area = chunks[1];

        let query = self.engine.query();
        let search_text = if self.search_active {
            format!("Search: {query}▏")
        } else if query.is_empty() {
            "Search: (press / to type)".to_string()
        } else {
            format!("Search: {query}")
        };
        let search_style = if self.search_active {
            Style::default()
                .fg(COLOR_ACCENT)
                .bg(COLOR_PANEL_BG)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(COLOR_TEXT_SECONDARY).bg(COLOR_PANEL_BG)
        };
        frame.render_widget(Paragraph::new(search_text).style(search_style), search_area);

        self.cards_area = Some(list_area);
        self.card_view_height.set(list_area.height);
        self.ensure_card_visible();

        let visible = self.engine.visible_indices();
        let offset = self.card_offset.get().min(visible.len());
        let mut items: Vec<ListItem> = Vec::new();
        for (slot, card_index) in visible.iter().enumerate().skip(offset) {
            if items.len() >= list_area.height as usize {
                break;
            }
            let Some(card) = self.engine.card(*card_index) else {
                continue;
            };
            let selected = slot == self.selected_card;
            let highlight = focused && selected;
            let background = if highlight {
                COLOR_PANEL_SELECTED_BG
            } else {
                COLOR_PANEL_BG
            };
            let title_color = if highlight {
                COLOR_ACCENT
            } else if focused || selected {
                COLOR_TEXT_PRIMARY
            } else {
                COLOR_TEXT_SECONDARY
            };
            let mut title_style = Style::default().fg(title_color).bg(background);
            if highlight {
                title_style = title_style.add_modifier(Modifier::BOLD);
            }
            let width = list_area.width as usize;
            let tag_width = UnicodeWidthStr::width(card.category.as_str()) + 2;
            let title = truncate_to_width(&card.title, width.saturating_sub(tag_width).max(8));
            let spans = vec![
                Span::styled(title, title_style),
                Span::styled(
                    format!("  {}", card.category),
                    Style::default()
                        .fg(COLOR_TEXT_SECONDARY)
                        .bg(background)
                        .add_modifier(Modifier::ITALIC),
                ),
            ];
            items.push(ListItem::new(Line::from(spans)));
        }
        if visible.is_empty() {
            let message = if self.engine.cards().is_empty() {
                "No reels in the catalog"
            } else {
                "No reels match the current filter"
            };
            items.push(ListItem::new(Line::from(Span::styled(
                message,
                Style::default()
                    .fg(COLOR_TEXT_SECONDARY)
                    .bg(COLOR_PANEL_BG)
                    .add_modifier(Modifier::ITALIC),
            ))));
        }
        frame.render_widget(List::new(items), list_area);
    }

    fn draw_details(&mut self, frame: &mut Frame<'_>, area: Rect) {
        let block = self.pane_block(Pane::Details);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let width = (inner.width as usize).max(16);

        let secondary = Style::default().fg(COLOR_TEXT_SECONDARY).bg(COLOR_PANEL_BG);
        let mut lines: Vec<Line> = Vec::new();
        match self
            .selected_card_index()
            .and_then(|index| self.engine.card(index))
        {
            Some(card) => {
                let title_style = Style::default()
                    .fg(COLOR_TEXT_PRIMARY)
                    .bg(COLOR_PANEL_BG)
                    .add_modifier(Modifier::BOLD);
                for part in wrap(&card.title, width) {
                    lines.push(Line::from(Span::styled(part.into_owned(), title_style)));
                }
                lines.push(Line::default());
                lines.push(Line::from(vec![
                    Span::styled("Category: ", secondary),
                    Span::styled(
                        card.category.clone(),
                        Style::default().fg(COLOR_ACCENT).bg(COLOR_PANEL_BG),
                    ),
                ]));
                let kind = if Player::for_source(&card.source).is_embed() {
                    "YouTube embed"
                } else {
                    "Video file"
                };
                lines.push(Line::from(vec![
                    Span::styled("Plays as: ", secondary),
                    Span::styled(
                        kind,
                        Style::default().fg(COLOR_TEXT_PRIMARY).bg(COLOR_PANEL_BG),
                    ),
                ]));
                lines.push(Line::default());
                lines.push(Line::from(Span::styled("Source", secondary)));
                for part in wrap(&card.source, width) {
                    lines.push(Line::from(Span::styled(
                        part.into_owned(),
                        Style::default().fg(COLOR_ACCENT).bg(COLOR_PANEL_BG),
                    )));
                }
                lines.push(Line::default());
                lines.push(Line::from(Span::styled(
                    "Enter plays this reel.",
                    secondary.add_modifier(Modifier::ITALIC),
                )));
            }
            None => {
                lines.push(Line::from(Span::styled(
                    "Nothing selected",
                    secondary.add_modifier(Modifier::ITALIC),
                )));
                lines.push(Line::default());
                lines.push(Line::from(Span::styled(
                    "Adjust the filter or search to see reels.",
                    secondary,
                )));
            }
        }
        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, inner);
    }

    fn draw_player(&mut self, frame: &mut Frame<'_>, area: Rect) {
        let Some(open) = self.modal.current().cloned() else {
            return;
        };
        let popup_area = centered_rect(70, 70, area);
        frame.render_widget(Clear, popup_area);
        self.player_area = Some(popup_area);

        let width = (popup_area.width.saturating_sub(4) as usize).max(16);
        let secondary = Style::default().fg(COLOR_TEXT_SECONDARY);
        let mut lines: Vec<Line> = Vec::new();
        match &open.player {
            Player::Embed(embed) => {
                lines.push(Line::from(Span::styled(
                    "Embedded player",
                    secondary.add_modifier(Modifier::ITALIC),
                )));
                lines.push(Line::default());
                for part in wrap(&embed.url, width) {
                    lines.push(Line::from(Span::styled(
                        part.into_owned(),
                        Style::default().fg(COLOR_ACCENT),
                    )));
                }
                lines.push(Line::default());
                lines.push(Line::from(Span::styled(
                    format!("Allows: {}", embed.allow.join("; ")),
                    secondary,
                )));
                if embed.allow_fullscreen {
                    lines.push(Line::from(Span::styled("Fullscreen enabled", secondary)));
                }
                lines.push(Line::default());
                lines.push(Line::from(Span::styled(
                    "Playing in your browser.",
                    Style::default().fg(COLOR_TEXT_PRIMARY),
                )));
            }
            Player::Native(native) => {
                lines.push(Line::from(Span::styled(
                    "Direct video",
                    secondary.add_modifier(Modifier::ITALIC),
                )));
                lines.push(Line::default());
                for part in wrap(&native.url, width) {
                    lines.push(Line::from(Span::styled(
                        part.into_owned(),
                        Style::default().fg(COLOR_ACCENT),
                    )));
                }
                lines.push(Line::default());
                let mut flags: Vec<&str> = Vec::new();
                if native.controls {
                    flags.push("controls");
                }
                if native.autoplay {
                    flags.push("autoplay");
                }
                if native.plays_inline {
                    flags.push("inline");
                }
                lines.push(Line::from(Span::styled(
                    format!("Playback: {}", flags.join(", ")),
                    secondary,
                )));
                lines.push(Line::default());
                lines.push(Line::from(Span::styled(
                    "Playing in the external player.",
                    Style::default().fg(COLOR_TEXT_PRIMARY),
                )));
            }
        }

        let player = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(Span::styled(
                        open.title.clone(),
                        Style::default()
                            .fg(COLOR_ACCENT)
                            .add_modifier(Modifier::BOLD),
                    ))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(COLOR_ACCENT))
                    .style(Style::default().bg(COLOR_PANEL_BG))
                    .padding(Padding::uniform(1)),
            )
            .wrap(Wrap { trim: false });
        frame.render_widget(player, popup_area);
    }

    fn subscribe_field_line(&self, field: SubscribeField) -> Line<'static> {
        let is_active = self.subscribe_form.active == field;
        let mut spans = Vec::new();
        let indicator_style = if is_active {
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(COLOR_TEXT_SECONDARY)
        };
        spans.push(Span::styled(
            if is_active { ">" } else { " " }.to_string(),
            indicator_style,
        ));
        spans.push(Span::raw(" "));

        match field {
            SubscribeField::Send => {
                let pending = self.pending_subscribe.is_some();
                let label = if pending {
                    "[ Sending... ]"
                } else {
                    "[ Subscribe ]"
                };
                let button_style = if pending {
                    Style::default()
                        .fg(COLOR_TEXT_SECONDARY)
                        .add_modifier(Modifier::BOLD)
                } else if is_active {
                    Style::default()
                        .fg(COLOR_ACCENT)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default()
                        .fg(COLOR_TEXT_SECONDARY)
                        .add_modifier(Modifier::BOLD)
                };
                spans.push(Span::styled(label.to_string(), button_style));
            }
            SubscribeField::Email => {
                let label_style = if is_active {
                    Style::default()
                        .fg(COLOR_ACCENT)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                        .fg(COLOR_TEXT_SECONDARY)
                        .add_modifier(Modifier::BOLD)
                };
                spans.push(Span::styled("Email".to_string(), label_style));
                spans.push(Span::raw(": "));
                let display = self.subscribe_form.display_value();
                let value_style = if display == "(not set)" {
                    Style::default().fg(COLOR_TEXT_SECONDARY)
                } else if is_active {
                    Style::default().fg(COLOR_ACCENT)
                } else {
                    Style::default().fg(COLOR_TEXT_PRIMARY)
                };
                spans.push(Span::styled(display, value_style));
            }
        }

        Line::from(spans)
    }

    fn contact_field_line(&self, field: ContactField) -> Line<'static> {
        let is_active = self.contact_form.active == field;
        let mut spans = Vec::new();
        let indicator_style = if is_active {
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(COLOR_TEXT_SECONDARY)
        };
        spans.push(Span::styled(
            if is_active { ">" } else { " " }.to_string(),
            indicator_style,
        ));
        spans.push(Span::raw(" "));

        match field {
            ContactField::Send => {
                let pending = self.pending_contact.is_some();
                let button_style = if pending {
                    Style::default()
                        .fg(COLOR_TEXT_SECONDARY)
                        .add_modifier(Modifier::BOLD)
                } else if is_active {
                    Style::default()
                        .fg(COLOR_ACCENT)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default()
                        .fg(COLOR_TEXT_SECONDARY)
                        .add_modifier(Modifier::BOLD)
                };
                spans.push(Span::styled("[ Send Message ]".to_string(), button_style));
                if pending {
                    spans.push(Span::raw("  "));
                    spans.push(Span::styled(
                        "Sending...".to_string(),
                        Style::default().fg(COLOR_TEXT_SECONDARY),
                    ));
                }
            }
            _ => {
                let label_style = if is_active {
                    Style::default()
                        .fg(COLOR_ACCENT)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                        .fg(COLOR_TEXT_SECONDARY)
                        .add_modifier(Modifier::BOLD)
                };
                spans.push(Span::styled(field.title().to_string(), label_style));
                spans.push(Span::raw(": "));
                let display = self.contact_form.display_value(field);
                let value_style = if display == "(not set)" {
                    Style::default().fg(COLOR_TEXT_SECONDARY)
                } else if is_active {
                    Style::default().fg(COLOR_ACCENT)
                } else {
                    Style::default().fg(COLOR_TEXT_PRIMARY)
                };
                spans.push(Span::styled(display, value_style));
            }
        }

        Line::from(spans)
    }

    fn draw_subscribe_form(&self, frame: &mut Frame<'_>, area: Rect) {
        let popup_area = centered_rect(60, 40, area);
        frame.render_widget(Clear, popup_area);

        let mut lines = vec![Line::from(Span::styled(
            "Get notified about new showreels.",
            Style::default().fg(COLOR_TEXT_SECONDARY),
        ))];
        lines.push(Line::default());
        lines.push(self.subscribe_field_line(SubscribeField::Email));
        lines.push(Line::default());
        lines.push(self.subscribe_field_line(SubscribeField::Send));
        if let Some(status) = &self.subscribe_form.status {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                status.clone(),
                status_style(status),
            )));
        }

        let form = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(Span::styled(
                        "Subscribe",
                        Style::default()
                            .fg(COLOR_ACCENT)
                            .add_modifier(Modifier::BOLD),
                    ))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(COLOR_ACCENT))
                    .style(Style::default().bg(COLOR_PANEL_BG))
                    .padding(Padding::uniform(1)),
            )
            .wrap(Wrap { trim: false });
        frame.render_widget(form, popup_area);
    }

    fn draw_contact_form(&self, frame: &mut Frame<'_>, area: Rect) {
        let popup_area = centered_rect(60, 60, area);
        frame.render_widget(Clear, popup_area);

        let mut lines = vec![Line::from(Span::styled(
            "Tell the studio about your project.",
            Style::default().fg(COLOR_TEXT_SECONDARY),
        ))];
        lines.push(Line::default());
        for field in [
            ContactField::Name,
            ContactField::Email,
            ContactField::Phone,
            ContactField::Message,
        ] {
            lines.push(self.contact_field_line(field));
        }
        lines.push(Line::default());
        lines.push(self.contact_field_line(ContactField::Send));
        if let Some(status) = &self.contact_form.status {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                status.clone(),
                status_style(status),
            )));
        }

        let form = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(Span::styled(
                        "Contact",
                        Style::default()
                            .fg(COLOR_ACCENT)
                            .add_modifier(Modifier::BOLD),
                    ))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(COLOR_ACCENT))
                    .style(Style::default().bg(COLOR_PANEL_BG))
                    .padding(Padding::uniform(1)),
            )
            .wrap(Wrap { trim: false });
        frame.render_widget(form, popup_area);
    }

    fn draw_share_prompt(&self, frame: &mut Frame<'_>, area: Rect) {
        let Some(link) = &self.share_link else {
            return;
        };
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let mut lines = vec![Line::from(Span::styled(
            "Share this link",
            Style::default()
                .fg(COLOR_TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ))];
        lines.push(Line::default());
        let width = (popup_area.width.saturating_sub(4) as usize).max(16);
        for part in wrap(link, width) {
            lines.push(Line::from(Span::styled(
                part.into_owned(),
                Style::default().fg(COLOR_ACCENT),
            )));
        }
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Enter/Esc close",
            Style::default()
                .fg(COLOR_TEXT_SECONDARY)
                .add_modifier(Modifier::ITALIC),
        )));

        let prompt = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(Span::styled(
                        "Share",
                        Style::default()
                            .fg(COLOR_ACCENT)
                            .add_modifier(Modifier::BOLD),
                    ))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(COLOR_ACCENT))
                    .style(Style::default().bg(COLOR_PANEL_BG))
                    .padding(Padding::uniform(1)),
            )
            .wrap(Wrap { trim: false });
        frame.render_widget(prompt, popup_area);
    }

    fn footer_text(&self) -> String {
        if self.overlay == Overlay::SharePrompt {
            return "Share prompt: Enter/Esc close".to_string();
        }
        if self.modal.is_open() {
            let mut parts: Vec<String> = vec![
                "Esc/q close".to_string(),
                "Enter replay".to_string(),
                "s share".to_string(),
            ];
            if self.modal.download_url().is_some() {
                parts.push("d download".to_string());
            } else {
                parts.push("download n/a for embeds".to_string());
            }
            if self.pending_download.is_some() {
                parts.push("Downloading...".to_string());
            }
            return parts.join(" · ");
        }
        match self.overlay {
            Overlay::Subscribe => {
                return "Subscribe: Tab/Shift-Tab field · Enter send/advance · Esc closes"
                    .to_string()
            }
            Overlay::Contact => {
                return "Contact: Tab/Shift-Tab field · Enter send/advance · Esc closes"
                    .to_string()
            }
            Overlay::SharePrompt | Overlay::None => {}
        }
        if self.search_active {
            return "Search: type to filter · Backspace deletes · Delete clears · Enter/Esc done"
                .to_string();
        }

        let mut parts: Vec<String> = Vec::new();
        match self.focused_pane {
            Pane::Filters => parts.push("Filters: j/k move, Enter apply".to_string()),
            Pane::Cards => {
                if self.engine.visible_count() == 0 {
                    parts.push("No reels match".to_string());
                } else {
                    parts.push("Reels: j/k move, Enter play".to_string());
                }
            }
            Pane::Details => parts.push("Details: Enter play".to_string()),
        }
        parts.push("/ search".to_string());
        parts.push("n subscribe".to_string());
        parts.push("c contact".to_string());
        parts.push("r reload".to_string());
        parts.push("q quit".to_string());
        parts.join(" · ")
    }
}

fn status_style(status: &str) -> Style {
    let color = if status.starts_with("Thanks") || status.starts_with("Message sent") {
        COLOR_SUCCESS
    } else {
        COLOR_ERROR
    };
    Style::default().fg(color).bg(COLOR_PANEL_BG)
}

fn copy_share_link(link: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(link.to_string())?;
    Ok(())
}

fn pane_constraints() -> [Constraint; 3] {
    [
        Constraint::Percentage(22),
        Constraint::Percentage(44),
        Constraint::Percentage(34),
    ]
}
