//! Jobcrawl core: crawl data model, extraction rules and the menu state machine.
mod effect;
mod frontier;
mod job;
mod msg;
mod results;
mod rules;
mod settings;
mod site;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use frontier::Frontier;
pub use job::JobRecord;
pub use msg::Msg;
pub use results::ResultSet;
pub use rules::{rules_for, ExtractionRules, SiteId, UnknownSite};
pub use settings::{
    default_sites, CrawlSettings, DEFAULT_CRAWL_DURATION_SECONDS, DEFAULT_JITTER_MAX_MILLIS,
    DEFAULT_THREAD_COUNT,
};
pub use site::{SiteEntry, SiteKey};
pub use state::{MenuState, Prompt, Screen, SessionState};
pub use update::update;
pub use view_model::MenuViewModel;
