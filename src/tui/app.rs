//! Main TUI application state and logic

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Duration;

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::core::config::Config;
use crate::core::credentials::{Credential, CredentialSource, CredentialSources};
use crate::core::stats::CommitSplit;
use crate::core::table::ExportTable;
use crate::error::{Result, StreamgitError};
use crate::github::{
    recent_repositories, ActivityHandler, ActivityRecord, CreateRepoParams, GitHubClient,
    RepoHandler, RepositorySummary,
};
use crate::render::{default_filename, render_chart, write_table, ChartKind, ExportFormat, ImageFormat};
use crate::tui::event::{is_force_quit_key, is_quit_key, AppEvent, EventHandler};
use crate::tui::ui;

/// Message type for async operation results
#[derive(Debug)]
pub enum AsyncMessage {
    /// Repositories fetched, with the token owner's login
    ReposLoaded {
        login: String,
        repos: Vec<RepositorySummary>,
    },
    /// Recent repositories and their latest commits
    ActivityLoaded {
        login: String,
        recent: Vec<RepositorySummary>,
        commits: Vec<ActivityRecord>,
    },
    /// Starred repositories fetched
    StarredLoaded {
        login: String,
        starred: Vec<RepositorySummary>,
    },
    /// Repository created
    RepoCreated(Box<RepositorySummary>),
    /// Repository deleted (full name)
    RepoDeleted(String),
    /// Any operation failed
    Failed { title: String, message: String },
}

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Token prompt
    Login,
    /// Tabbed dashboard
    Main,
}

/// Dashboard tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Statistics,
    Activity,
    Repositories,
    Visualizations,
    Starred,
    Create,
    Delete,
}

impl Tab {
    pub const ALL: [Tab; 7] = [
        Tab::Statistics,
        Tab::Activity,
        Tab::Repositories,
        Tab::Visualizations,
        Tab::Starred,
        Tab::Create,
        Tab::Delete,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Statistics => "Statistics",
            Tab::Activity => "Recent Activity",
            Tab::Repositories => "Repositories",
            Tab::Visualizations => "Visualizations",
            Tab::Starred => "Starred",
            Tab::Create => "Create",
            Tab::Delete => "Delete",
        }
    }

    pub fn index(&self) -> usize {
        Tab::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    fn next(&self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    fn previous(&self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }

    /// Tabs that take free text input
    fn is_form(&self) -> bool {
        matches!(self, Tab::Create | Tab::Delete)
    }
}

/// List selection state
#[derive(Debug, Default)]
pub struct ListState {
    /// Currently selected index
    pub selected: usize,
    /// Total items in the list
    pub total: usize,
}

impl ListState {
    pub fn new(total: usize) -> Self {
        Self { selected: 0, total }
    }

    pub fn next(&mut self) {
        if self.total > 0 {
            self.selected = (self.selected + 1) % self.total;
        }
    }

    pub fn previous(&mut self) {
        if self.total > 0 {
            self.selected = self.selected.checked_sub(1).unwrap_or(self.total - 1);
        }
    }
}

/// Error popup for displaying errors that require user acknowledgment
#[derive(Debug, Clone)]
pub struct ErrorPopup {
    pub title: String,
    pub message: String,
}

/// Fields of the repository creation form
#[derive(Debug, Default)]
pub struct CreateForm {
    pub name: String,
    pub description: String,
    pub private: bool,
    pub auto_init: bool,
    /// 0=name, 1=description, 2=private, 3=auto_init
    pub field: usize,
}

impl CreateForm {
    pub const FIELDS: usize = 4;
}

/// Main application state
pub struct App {
    /// Whether the app is running
    pub running: bool,
    pub config: Config,
    secrets_file: Option<PathBuf>,

    /// Token held for this session only
    credential: Option<Credential>,
    /// Login of the token owner once known
    pub login: Option<String>,

    pub screen: Screen,
    pub tab: Tab,

    /// Token being typed on the login screen
    pub token_input: String,

    // Async
    async_tx: mpsc::Sender<AsyncMessage>,
    async_rx: mpsc::Receiver<AsyncMessage>,
    /// A fetch or mutation is in flight
    pub loading: bool,
    /// Tab whose data the in-flight fetch will deliver
    pub fetching: Option<Tab>,
    /// A fetch was asked for while another was in flight
    pending_refresh: bool,
    pub tick_counter: usize,

    // Fetched data, replaced on every fetch
    pub repos: Vec<RepositorySummary>,
    pub recent: Vec<RepositorySummary>,
    pub commits: Vec<ActivityRecord>,
    pub starred: Vec<RepositorySummary>,
    /// Recent Activity shows only the viewer's commits
    pub only_mine: bool,

    pub selection: ListState,
    pub chart: ChartKind,

    pub create_form: CreateForm,
    /// Typed confirmation for the delete tab
    pub delete_confirm: String,

    pub status_message: Option<String>,
    pub error_popup: Option<ErrorPopup>,
    pub show_help: bool,
}

impl App {
    /// Create a new app instance
    ///
    /// Tries the non-interactive credential sources first; without a token
    /// the app opens on the login prompt.
    pub fn new(config: Config, token: Option<String>, secrets_file: Option<PathBuf>) -> Self {
        let (async_tx, async_rx) = mpsc::channel(32);
        let secrets_file = secrets_file.or_else(|| config.secrets_file.clone());

        let mut app = Self {
            running: true,
            config,
            secrets_file,
            credential: None,
            login: None,
            screen: Screen::Login,
            tab: Tab::Statistics,
            token_input: String::new(),
            async_tx,
            async_rx,
            loading: false,
            fetching: None,
            pending_refresh: false,
            tick_counter: 0,
            repos: Vec::new(),
            recent: Vec::new(),
            commits: Vec::new(),
            starred: Vec::new(),
            only_mine: false,
            selection: ListState::default(),
            chart: ChartKind::LanguageDistribution,
            create_form: CreateForm::default(),
            delete_confirm: String::new(),
            status_message: None,
            error_popup: None,
            show_help: false,
        };

        match CredentialSources::gather(token, app.secrets_file.clone()).resolve() {
            Ok(credential) => {
                app.status_message = Some(format!("Using token from {}", credential.source()));
                app.credential = Some(credential);
                app.screen = Screen::Main;
            }
            Err(StreamgitError::MissingCredential) => {}
            Err(e) => app.show_error("Credential Error", e.to_string()),
        }

        app
    }

    /// Setup terminal for TUI
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode().map_err(|e| StreamgitError::Terminal(e.to_string()))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)
            .map_err(|e| StreamgitError::Terminal(e.to_string()))?;
        let backend = CrosstermBackend::new(stdout);
        let terminal =
            Terminal::new(backend).map_err(|e| StreamgitError::Terminal(e.to_string()))?;
        Ok(terminal)
    }

    /// Restore terminal to normal state
    fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        disable_raw_mode().map_err(|e| StreamgitError::Terminal(e.to_string()))?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .map_err(|e| StreamgitError::Terminal(e.to_string()))?;
        terminal
            .show_cursor()
            .map_err(|e| StreamgitError::Terminal(e.to_string()))?;
        Ok(())
    }

    /// Run the TUI application
    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = Self::setup_terminal()?;
        let mut events = EventHandler::new(Duration::from_millis(250));

        if self.screen == Screen::Main {
            self.refresh();
        }

        while self.running {
            terminal
                .draw(|frame| ui::render(frame, self))
                .map_err(|e| StreamgitError::Terminal(e.to_string()))?;

            // Check for async messages (non-blocking)
            while let Ok(msg) = self.async_rx.try_recv() {
                self.handle_async_message(msg);
            }

            if let Some(event) = events.next().await {
                match event {
                    AppEvent::Key(key) => self.handle_key_event(key),
                    AppEvent::Resize(_, _) => {}
                    AppEvent::Tick => {
                        self.tick_counter = self.tick_counter.wrapping_add(1);
                    }
                }
            }
        }

        Self::restore_terminal(&mut terminal)?;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Async results
    // ─────────────────────────────────────────────────────────────────────────

    /// Handle async message from background tasks
    ///
    /// A fetch requested while this one was running is issued afterwards.
    pub fn handle_async_message(&mut self, msg: AsyncMessage) {
        self.loading = false;
        self.fetching = None;
        let pending = std::mem::take(&mut self.pending_refresh);

        match msg {
            AsyncMessage::ReposLoaded { login, repos } => {
                self.login = Some(login);
                self.status_message = Some(format!("Loaded {} repositories", repos.len()));
                self.repos = repos;
                self.selection = ListState::new(self.current_list_len());
            }
            AsyncMessage::ActivityLoaded {
                login,
                recent,
                commits,
            } => {
                self.login = Some(login);
                self.status_message = Some(format!(
                    "Loaded {} commits from {} repositories",
                    commits.len(),
                    recent.len()
                ));
                self.recent = recent;
                self.commits = commits;
                self.selection = ListState::new(self.current_list_len());
            }
            AsyncMessage::StarredLoaded { login, starred } => {
                self.login = Some(login);
                self.status_message =
                    Some(format!("Loaded {} starred repositories", starred.len()));
                self.starred = starred;
                self.selection = ListState::new(self.current_list_len());
            }
            AsyncMessage::RepoCreated(repo) => {
                self.status_message = Some(format!("✓ Created {}", repo.url));
                self.create_form = CreateForm::default();
            }
            AsyncMessage::RepoDeleted(full_name) => {
                self.status_message = Some(format!("✓ Deleted {}", full_name));
                self.delete_confirm.clear();
                self.refresh();
            }
            AsyncMessage::Failed { title, message } => {
                self.status_message = Some(format!("Error: {}", title));
                self.show_error(&title, message);
            }
        }

        if pending && !self.loading {
            self.refresh();
        }
    }

    fn show_error(&mut self, title: &str, message: String) {
        self.error_popup = Some(ErrorPopup {
            title: title.to_string(),
            message,
        });
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Key handling
    // ─────────────────────────────────────────────────────────────────────────

    /// Handle keyboard input
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if is_force_quit_key(&key) {
            self.running = false;
            return;
        }

        if self.error_popup.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.error_popup = None;
            }
            return;
        }

        if self.show_help {
            self.show_help = false;
            return;
        }

        match self.screen {
            Screen::Login => self.handle_login_key(key),
            Screen::Main => self.handle_main_key(key),
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.running = false,
            KeyCode::Enter => self.submit_token(),
            KeyCode::Backspace => {
                self.token_input.pop();
            }
            KeyCode::Char(c) => self.token_input.push(c),
            _ => {}
        }
    }

    /// Use the typed token for this session
    pub fn submit_token(&mut self) {
        let sources = CredentialSources {
            interactive: Some(std::mem::take(&mut self.token_input)),
            ..Default::default()
        };

        match sources.resolve() {
            Ok(credential) => {
                self.credential = Some(credential);
                self.screen = Screen::Main;
                self.tab = Tab::Statistics;
                self.refresh();
            }
            Err(_) => {
                self.status_message = Some("Enter a GitHub personal access token".to_string());
            }
        }
    }

    /// Drop the held token and return to the login prompt
    pub fn logout(&mut self) {
        self.credential = None;
        self.pending_refresh = false;
        self.login = None;
        self.repos.clear();
        self.recent.clear();
        self.commits.clear();
        self.starred.clear();
        self.selection = ListState::default();
        self.screen = Screen::Login;
        self.status_message = Some("Logged out".to_string());
    }

    fn handle_main_key(&mut self, key: KeyEvent) {
        // Navigation works on every tab
        match key.code {
            KeyCode::Tab | KeyCode::Right if !self.tab.is_form() || key.code == KeyCode::Tab => {
                self.switch_tab(self.tab.next());
                return;
            }
            KeyCode::BackTab => {
                self.switch_tab(self.tab.previous());
                return;
            }
            KeyCode::Left if !self.tab.is_form() => {
                self.switch_tab(self.tab.previous());
                return;
            }
            _ => {}
        }

        if self.tab.is_form() {
            match self.tab {
                Tab::Create => self.handle_create_key(key),
                Tab::Delete => self.handle_delete_key(key),
                _ => {}
            }
            return;
        }

        if is_quit_key(&key) {
            self.running = false;
            return;
        }

        match key.code {
            KeyCode::Char(c @ '1'..='7') => {
                let idx = c as usize - '1' as usize;
                self.switch_tab(Tab::ALL[idx]);
            }
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('r') => self.refresh(),
            KeyCode::Char('L') => self.logout(),
            KeyCode::Char('e') => self.export_current(),
            KeyCode::Char('p') if self.tab == Tab::Visualizations => self.save_chart(),
            KeyCode::Char('m') if self.tab == Tab::Activity => self.toggle_only_mine(),
            KeyCode::Char('j') | KeyCode::Down => {
                if self.tab == Tab::Visualizations {
                    self.cycle_chart(1);
                } else {
                    self.selection.next();
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if self.tab == Tab::Visualizations {
                    self.cycle_chart(ChartKind::all().len() - 1);
                } else {
                    self.selection.previous();
                }
            }
            _ => {}
        }
    }

    fn handle_create_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Enter {
            self.submit_create();
            return;
        }

        let form = &mut self.create_form;
        match key.code {
            KeyCode::Down => form.field = (form.field + 1) % CreateForm::FIELDS,
            KeyCode::Up => form.field = (form.field + CreateForm::FIELDS - 1) % CreateForm::FIELDS,
            KeyCode::Esc => *form = CreateForm::default(),
            KeyCode::Char(' ') if form.field == 2 => form.private = !form.private,
            KeyCode::Char(' ') if form.field == 3 => form.auto_init = !form.auto_init,
            KeyCode::Backspace => match form.field {
                0 => {
                    form.name.pop();
                }
                1 => {
                    form.description.pop();
                }
                _ => {}
            },
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                match form.field {
                    0 => form.name.push(c),
                    1 => form.description.push(c),
                    _ => {}
                }
            }
            _ => {}
        }
    }

    fn handle_delete_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down => self.selection.next(),
            KeyCode::Up => self.selection.previous(),
            KeyCode::Esc => self.delete_confirm.clear(),
            KeyCode::Enter => self.submit_delete(),
            KeyCode::Backspace => {
                self.delete_confirm.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.delete_confirm.push(c)
            }
            _ => {}
        }
    }

    fn switch_tab(&mut self, tab: Tab) {
        if self.tab == tab {
            return;
        }
        self.tab = tab;
        self.selection = ListState::new(self.current_list_len());
        self.refresh();
    }

    fn cycle_chart(&mut self, step: usize) {
        let all = ChartKind::all();
        let idx = all.iter().position(|k| *k == self.chart).unwrap_or(0);
        self.chart = all[(idx + step) % all.len()];
    }

    /// Repositories owned by the viewer, candidates for deletion
    pub fn owned_repos(&self) -> Vec<&RepositorySummary> {
        self.repos
            .iter()
            .filter(|r| Some(r.owner.as_str()) == self.login.as_deref())
            .collect()
    }

    /// Recent Activity commits after the "only mine" filter
    pub fn visible_commits(&self) -> Vec<&ActivityRecord> {
        match (self.only_mine, self.login.as_deref()) {
            (true, Some(login)) => self.commits.iter().filter(|c| c.is_by(login)).collect(),
            _ => self.commits.iter().collect(),
        }
    }

    /// The viewer's commits against everyone else's
    pub fn commit_split(&self) -> Option<CommitSplit> {
        self.login
            .as_deref()
            .map(|login| CommitSplit::compute(&self.commits, login))
    }

    pub fn toggle_only_mine(&mut self) {
        self.only_mine = !self.only_mine;
        self.selection = ListState::new(self.current_list_len());
        self.status_message = Some(if self.only_mine {
            "Showing only your commits".to_string()
        } else {
            "Showing all commits".to_string()
        });
    }

    fn current_list_len(&self) -> usize {
        match self.tab {
            Tab::Activity => self.visible_commits().len(),
            Tab::Repositories => self.repos.len(),
            Tab::Starred => self.starred.len(),
            Tab::Delete => self.owned_repos().len(),
            _ => 0,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Fetches and mutations
    // ─────────────────────────────────────────────────────────────────────────

    fn client(&self) -> Option<(Credential, String)> {
        self.credential
            .clone()
            .map(|c| (c, self.config.effective_api_url()))
    }

    /// Re-fetch the data behind the current tab
    pub fn refresh(&mut self) {
        let Some((credential, api_url)) = self.client() else {
            return;
        };
        if self.loading {
            self.pending_refresh = self.tab != Tab::Create;
            return;
        }

        let tx = self.async_tx.clone();
        let tab = self.tab;
        let recent_limit = self.config.recent_limit;
        let commit_limit = self.config.commit_limit;

        if tab == Tab::Create {
            return;
        }

        self.loading = true;
        self.fetching = Some(tab);
        self.status_message = Some(format!("Loading {}...", tab.title().to_lowercase()));

        tokio::spawn(async move {
            let result = async {
                let client = GitHubClient::new(&credential, Some(&api_url))?;
                let login = client.viewer_login().await?;
                let handler = RepoHandler::new(&client);

                let msg = match tab {
                    Tab::Starred => AsyncMessage::StarredLoaded {
                        login,
                        starred: handler.list_starred().await?,
                    },
                    Tab::Activity => {
                        let repos = handler.list().await?;
                        let recent = recent_repositories(&repos, recent_limit);
                        let activity = ActivityHandler::new(&client);

                        let mut commits = Vec::new();
                        for repo in &recent {
                            commits.extend(
                                activity
                                    .recent_commits(&repo.owner, &repo.name, commit_limit)
                                    .await?,
                            );
                        }
                        commits.sort_by(|a, b| b.date.cmp(&a.date));

                        AsyncMessage::ActivityLoaded {
                            login,
                            recent,
                            commits,
                        }
                    }
                    _ => AsyncMessage::ReposLoaded {
                        login,
                        repos: handler.list().await?,
                    },
                };
                Ok::<_, StreamgitError>(msg)
            }
            .await;

            let msg = result.unwrap_or_else(|e| AsyncMessage::Failed {
                title: "Fetch Failed".to_string(),
                message: e.to_string(),
            });
            let _ = tx.send(msg).await;
        });
    }

    fn submit_create(&mut self) {
        if self.loading {
            return;
        }
        let Some((credential, api_url)) = self.client() else {
            return;
        };

        let form = &self.create_form;
        let params = CreateRepoParams {
            name: form.name.trim().to_string(),
            description: Some(form.description.trim().to_string()).filter(|d| !d.is_empty()),
            private: form.private,
            auto_init: form.auto_init,
            ..Default::default()
        };

        self.loading = true;
        self.status_message = Some(format!("Creating {}...", params.name));
        let tx = self.async_tx.clone();

        tokio::spawn(async move {
            let result = async {
                let client = GitHubClient::new(&credential, Some(&api_url))?;
                RepoHandler::new(&client).create(&params).await
            }
            .await;

            let msg = match result {
                Ok(repo) => AsyncMessage::RepoCreated(Box::new(repo)),
                Err(e) => AsyncMessage::Failed {
                    title: "Create Failed".to_string(),
                    message: e.to_string(),
                },
            };
            let _ = tx.send(msg).await;
        });
    }

    fn submit_delete(&mut self) {
        if self.loading {
            return;
        }
        let Some((credential, api_url)) = self.client() else {
            return;
        };

        let target = match self.owned_repos().get(self.selection.selected) {
            Some(repo) => (*repo).clone(),
            None => return,
        };

        if self.delete_confirm.trim() != target.name {
            self.status_message = Some(format!(
                "Type '{}' and press Enter to delete it",
                target.name
            ));
            return;
        }

        self.loading = true;
        self.status_message = Some(format!("Deleting {}...", target.full_name));
        let tx = self.async_tx.clone();

        tokio::spawn(async move {
            let result = async {
                let client = GitHubClient::new(&credential, Some(&api_url))?;
                RepoHandler::new(&client)
                    .delete(&target.owner, &target.name)
                    .await
            }
            .await;

            let msg = match result {
                Ok(()) => AsyncMessage::RepoDeleted(target.full_name),
                Err(e) => AsyncMessage::Failed {
                    title: "Delete Failed".to_string(),
                    message: e.to_string(),
                },
            };
            let _ = tx.send(msg).await;
        });
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Exports
    // ─────────────────────────────────────────────────────────────────────────

    /// Table behind the current tab, with the kind used in file names
    pub fn current_table(&self) -> Option<(&'static str, ExportTable)> {
        let login = self.login.as_deref().unwrap_or_default();
        match self.tab {
            Tab::Statistics | Tab::Repositories | Tab::Visualizations => {
                Some(("repos", ExportTable::repositories(&self.repos, login)))
            }
            Tab::Activity => {
                let visible: Vec<ActivityRecord> =
                    self.visible_commits().into_iter().cloned().collect();
                Some(("commits", ExportTable::activity(&visible)))
            }
            Tab::Starred => Some(("starred_repos", ExportTable::starred(&self.starred))),
            Tab::Create | Tab::Delete => None,
        }
    }

    fn default_output(&self, kind: &str, ext: &str) -> PathBuf {
        let login = self.login.as_deref().unwrap_or("unknown");
        PathBuf::from(default_filename(kind, login, ext, Local::now().date_naive()))
    }

    fn export_current(&mut self) {
        let Some((kind, table)) = self.current_table() else {
            return;
        };
        let format = ExportFormat::Csv;
        let path = self.default_output(kind, format.extension());

        match write_table(&table, format, &path) {
            Ok(()) => {
                self.status_message = Some(format!(
                    "✓ Exported {} rows to {}",
                    table.len(),
                    path.display()
                ))
            }
            Err(e) => self.show_error("Export Failed", e.to_string()),
        }
    }

    fn save_chart(&mut self) {
        let login = self.login.as_deref().unwrap_or_default();
        let table = ExportTable::repositories(&self.repos, login);
        let format = ImageFormat::Png;
        let path = self.default_output(self.chart.as_str(), format.extension());

        match render_chart(&table, self.chart, &path, format) {
            Ok(written) => {
                self.status_message = Some(format!("✓ Chart saved to {}", written.display()))
            }
            Err(e) => self.show_error("Chart Failed", e.to_string()),
        }
    }

    /// Source of the held token, if any
    pub fn credential_source(&self) -> Option<CredentialSource> {
        self.credential.as_ref().map(|c| c.source())
    }

    /// Masked form of the held token
    pub fn masked_token(&self) -> Option<String> {
        self.credential.as_ref().map(|c| c.masked())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        }
    }

    fn logged_out_app() -> App {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            secrets_file: Some(dir.path().join("absent.toml")),
            ..Config::default()
        };
        let mut app = App::new(config, None, None);
        // GITHUB_TOKEN may be set where tests run
        app.logout();
        app
    }

    fn repo(name: &str, owner: &str) -> RepositorySummary {
        let ts = chrono::Utc::now();
        RepositorySummary {
            name: name.to_string(),
            full_name: format!("{}/{}", owner, name),
            owner: owner.to_string(),
            description: None,
            language: Some("Rust".into()),
            private: false,
            fork: false,
            archived: false,
            stars: 1,
            forks: 0,
            created_at: ts,
            updated_at: ts,
            url: String::new(),
        }
    }

    #[test]
    fn test_tab_cycle_wraps() {
        assert_eq!(Tab::Delete.next(), Tab::Statistics);
        assert_eq!(Tab::Statistics.previous(), Tab::Delete);
        assert_eq!(Tab::Visualizations.index(), 3);
    }

    #[test]
    fn test_list_state_wraps() {
        let mut state = ListState::new(3);
        state.previous();
        assert_eq!(state.selected, 2);
        state.next();
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_login_screen_collects_token_without_echoing_source() {
        let mut app = logged_out_app();
        assert_eq!(app.screen, Screen::Login);

        for c in "ghp_x".chars() {
            app.handle_key_event(key(KeyCode::Char(c)));
        }
        app.handle_key_event(key(KeyCode::Backspace));
        assert_eq!(app.token_input, "ghp_");
    }

    #[test]
    fn test_empty_token_stays_on_login() {
        let mut app = logged_out_app();
        app.handle_key_event(key(KeyCode::Char(' ')));
        app.handle_key_event(key(KeyCode::Enter));
        assert_eq!(app.screen, Screen::Login);
        assert!(app.credential_source().is_none());
    }

    #[test]
    fn test_error_popup_swallows_keys_until_dismissed() {
        let mut app = logged_out_app();
        app.handle_async_message(AsyncMessage::Failed {
            title: "Fetch Failed".into(),
            message: "boom".into(),
        });
        assert!(app.error_popup.is_some());

        app.handle_key_event(key(KeyCode::Char('x')));
        assert!(app.token_input.is_empty());

        app.handle_key_event(key(KeyCode::Esc));
        assert!(app.error_popup.is_none());
        assert!(app.running);
    }

    #[test]
    fn test_repos_loaded_updates_state() {
        let mut app = logged_out_app();
        app.handle_async_message(AsyncMessage::ReposLoaded {
            login: "octo".into(),
            repos: vec![repo("a", "octo"), repo("b", "acme")],
        });
        assert_eq!(app.login.as_deref(), Some("octo"));
        assert_eq!(app.repos.len(), 2);
        assert_eq!(app.owned_repos().len(), 1);

        let (kind, table) = app.current_table().unwrap();
        assert_eq!(kind, "repos");
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_logout_discards_data() {
        let mut app = logged_out_app();
        app.handle_async_message(AsyncMessage::ReposLoaded {
            login: "octo".into(),
            repos: vec![repo("a", "octo")],
        });
        app.logout();
        assert!(app.repos.is_empty());
        assert!(app.login.is_none());
        assert!(app.masked_token().is_none());
        assert_eq!(app.screen, Screen::Login);
    }

    #[test]
    fn test_create_form_editing() {
        let mut app = logged_out_app();
        app.screen = Screen::Main;
        app.tab = Tab::Create;

        for c in "demo".chars() {
            app.handle_key_event(key(KeyCode::Char(c)));
        }
        app.handle_key_event(key(KeyCode::Down));
        app.handle_key_event(key(KeyCode::Char('q')));
        app.handle_key_event(key(KeyCode::Down));
        app.handle_key_event(key(KeyCode::Char(' ')));

        assert!(app.running, "q must type into the form, not quit");
        assert_eq!(app.create_form.name, "demo");
        assert_eq!(app.create_form.description, "q");
        assert!(app.create_form.private);
    }

    fn signed_in_app() -> App {
        let mut app = logged_out_app();
        app.config.api_url = Some("http://127.0.0.1:9".to_string());
        app.credential = Some(Credential::new("ghp_test", CredentialSource::Interactive));
        app.screen = Screen::Main;
        app
    }

    fn commit(repository: &str, author: &str, login: Option<&str>) -> ActivityRecord {
        ActivityRecord {
            repository: repository.to_string(),
            sha: "0123456789".to_string(),
            author: author.to_string(),
            author_login: login.map(str::to_string),
            date: None,
            message: "change".to_string(),
        }
    }

    #[tokio::test]
    async fn test_tab_switch_during_fetch_fetches_new_tab_afterwards() {
        let mut app = signed_in_app();
        app.refresh();
        assert_eq!(app.fetching, Some(Tab::Statistics));

        app.handle_key_event(key(KeyCode::Char('5')));
        assert_eq!(app.tab, Tab::Starred);
        assert_eq!(app.fetching, Some(Tab::Statistics));

        app.handle_async_message(AsyncMessage::ReposLoaded {
            login: "octo".into(),
            repos: vec![repo("a", "octo")],
        });

        assert!(app.loading);
        assert_eq!(app.fetching, Some(Tab::Starred));
        assert_eq!(app.repos.len(), 1);
    }

    #[tokio::test]
    async fn test_finished_fetch_without_tab_change_stays_idle() {
        let mut app = signed_in_app();
        app.refresh();

        app.handle_async_message(AsyncMessage::ReposLoaded {
            login: "octo".into(),
            repos: Vec::new(),
        });

        assert!(!app.loading);
        assert_eq!(app.fetching, None);
    }

    #[test]
    fn test_only_mine_filters_activity() {
        let mut app = logged_out_app();
        app.screen = Screen::Main;
        app.tab = Tab::Activity;
        app.handle_async_message(AsyncMessage::ActivityLoaded {
            login: "octo".into(),
            recent: vec![repo("a", "octo"), repo("b", "octo")],
            commits: vec![
                commit("a", "Octo Person", Some("octo")),
                commit("a", "hubot", Some("hubot")),
                commit("b", "OCTO", None),
            ],
        });
        assert_eq!(app.visible_commits().len(), 3);

        app.handle_key_event(key(KeyCode::Char('m')));
        assert!(app.only_mine);
        assert_eq!(app.visible_commits().len(), 2);
        assert_eq!(app.selection.total, 2);

        let split = app.commit_split().unwrap();
        assert_eq!((split.mine, split.mine_repos), (2, 2));
        assert_eq!((split.others, split.others_repos), (1, 1));

        let (_, table) = app.current_table().unwrap();
        assert_eq!(table.len(), 2);

        app.handle_key_event(key(KeyCode::Char('m')));
        assert_eq!(app.visible_commits().len(), 3);
    }
}
