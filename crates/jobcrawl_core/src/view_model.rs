use crate::{MenuState, Prompt, Screen, SessionState};

/// Presentation-neutral description of the current menu screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MenuViewModel {
    pub title: String,
    /// Informational lines shown above the options.
    pub body: Vec<String>,
    /// `(key, label)` pairs.
    pub options: Vec<(String, String)>,
    pub prompt: Option<String>,
    pub status: Option<String>,
}

pub(crate) fn build(state: &MenuState) -> MenuViewModel {
    let mut view = match state.screen() {
        Screen::Start => MenuViewModel {
            title: "Crawler Menu".into(),
            body: match state.session() {
                SessionState::Idle => Vec::new(),
                SessionState::Crawling => vec!["Crawling, please wait...".to_string()],
                SessionState::Finished => {
                    vec![format!("Last crawl found {} job(s)", state.jobs().len())]
                }
            },
            options: options(&[
                ("1", "Start Crawler"),
                ("2", "View Settings"),
                ("3", "View Sites"),
                ("4", "View Jobs"),
                ("0", "Quit application"),
            ]),
            ..MenuViewModel::default()
        },
        Screen::Settings => {
            let settings = state.settings();
            MenuViewModel {
                title: "Settings".into(),
                body: vec![
                    format!("Number of threads to run = {}", settings.thread_count),
                    format!("Time for threads to run (s) = {}", settings.crawl_duration_seconds),
                ],
                options: options(&[
                    ("1", "Change number of threads"),
                    ("2", "Change how long to run"),
                    ("s", "Save settings"),
                    ("0", "Back to Start Menu"),
                ]),
                ..MenuViewModel::default()
            }
        }
        Screen::Sites => MenuViewModel {
            title: "Sites to search".into(),
            body: state
                .settings()
                .sites
                .iter()
                .enumerate()
                .map(|(i, site)| {
                    let mark = if site.pending { 'X' } else { ' ' };
                    format!("{} - [{}] - {}", i + 1, mark, site.name)
                })
                .collect(),
            options: options(&[
                ("n", "Switch searching on/off for site n"),
                ("0", "Back to Start Menu"),
            ]),
            ..MenuViewModel::default()
        },
        Screen::Jobs => {
            let jobs = state.jobs();
            let mut body = vec![format!("Number of jobs = {}", jobs.len())];
            if state.show_all_jobs() {
                body.extend(
                    jobs.iter()
                        .map(|job| format!("Title: {}, URL: {}", job.title, job.url)),
                );
            }
            let toggle = if state.show_all_jobs() {
                "Hide job listings"
            } else {
                "Show all job listings"
            };
            MenuViewModel {
                title: "Jobs found".into(),
                body,
                options: options(&[
                    ("1", toggle),
                    ("2", "Export job listings"),
                    ("0", "Back to Start Menu"),
                ]),
                ..MenuViewModel::default()
            }
        }
    };

    view.prompt = state.prompt().map(|prompt| match prompt {
        Prompt::ThreadCount => "ThreadCount = ".to_string(),
        Prompt::CrawlDuration => "CrawlDuration = ".to_string(),
    });
    view.status = state.status().map(ToOwned::to_owned);
    view
}

fn options(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(key, label)| (key.to_string(), label.to_string()))
        .collect()
}
