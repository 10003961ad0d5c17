use crate::view_model::{self, MenuViewModel};
use crate::{CrawlSettings, JobRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Start,
    Settings,
    Sites,
    Jobs,
}

/// A numeric value the settings screen is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    ThreadCount,
    CrawlDuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Crawling,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MenuState {
    screen: Screen,
    prompt: Option<Prompt>,
    session: SessionState,
    settings: CrawlSettings,
    jobs: Vec<JobRecord>,
    show_all_jobs: bool,
    status: Option<String>,
    quit: bool,
    dirty: bool,
}

impl MenuState {
    pub fn new(settings: CrawlSettings) -> Self {
        Self {
            settings,
            dirty: true,
            ..Self::default()
        }
    }

    pub fn view(&self) -> MenuViewModel {
        view_model::build(self)
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn prompt(&self) -> Option<Prompt> {
        self.prompt
    }

    pub fn session(&self) -> SessionState {
        self.session
    }

    pub fn settings(&self) -> &CrawlSettings {
        &self.settings
    }

    pub fn jobs(&self) -> &[JobRecord] {
        &self.jobs
    }

    pub fn show_all_jobs(&self) -> bool {
        self.show_all_jobs
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Returns whether the view changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn goto(&mut self, screen: Screen) {
        self.screen = screen;
        self.prompt = None;
        self.status = None;
        self.dirty = true;
    }

    pub(crate) fn set_prompt(&mut self, prompt: Option<Prompt>) {
        self.prompt = prompt;
        self.dirty = true;
    }

    pub(crate) fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
        self.dirty = true;
    }

    pub(crate) fn settings_mut(&mut self) -> &mut CrawlSettings {
        self.dirty = true;
        &mut self.settings
    }

    pub(crate) fn start_crawl(&mut self) {
        self.session = SessionState::Crawling;
        self.status = None;
        self.dirty = true;
    }

    pub(crate) fn finish_crawl(&mut self, jobs: Vec<JobRecord>) {
        self.session = SessionState::Finished;
        self.jobs = jobs;
        self.dirty = true;
    }

    pub(crate) fn fail_crawl(&mut self) {
        self.session = SessionState::Idle;
        self.dirty = true;
    }

    pub(crate) fn toggle_show_all_jobs(&mut self) {
        self.show_all_jobs = !self.show_all_jobs;
        self.dirty = true;
    }

    pub(crate) fn request_quit(&mut self) {
        self.quit = true;
        self.dirty = true;
    }
}
