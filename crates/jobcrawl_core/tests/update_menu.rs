use jobcrawl_core::{
    update, CrawlSettings, Effect, JobRecord, MenuState, Msg, Prompt, Screen, SessionState,
    SiteEntry,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    crawl_logging::initialize_for_tests();
}

fn settings() -> CrawlSettings {
    CrawlSettings {
        thread_count: 1,
        crawl_duration_seconds: 10,
        jitter_max_millis: 0,
        sites: vec![
            SiteEntry::pending("OLX", "https://www.olx.bg/rabota/"),
            SiteEntry::new("Yox", "https://yox.bg/search", false),
        ],
    }
}

fn input(state: MenuState, line: &str) -> (MenuState, Vec<Effect>) {
    update(state, Msg::Input(line.to_string()))
}

fn inputs(mut state: MenuState, lines: &[&str]) -> MenuState {
    for line in lines {
        let (next, _) = input(state, line);
        state = next;
    }
    state
}

#[test]
fn start_option_emits_crawl_with_current_settings() {
    init_logging();
    let state = MenuState::new(settings());
    let (state, effects) = input(state, "1");
    assert_eq!(effects, vec![Effect::StartCrawl(settings())]);
    assert_eq!(state.session(), SessionState::Crawling);

    // A second start while crawling is ignored.
    let (_, effects) = input(state, "1");
    assert!(effects.is_empty());
}

#[test]
fn start_without_selected_sites_reports_status() {
    let mut config = settings();
    config.sites.iter_mut().for_each(|s| s.pending = false);
    let (state, effects) = input(MenuState::new(config), "1");
    assert!(effects.is_empty());
    assert_eq!(state.session(), SessionState::Idle);
    assert_eq!(state.status(), Some("No sites selected for searching."));
}

#[test]
fn settings_prompts_update_thread_count_and_duration() {
    let state = inputs(MenuState::new(settings()), &["2", "1"]);
    assert_eq!(state.screen(), Screen::Settings);
    assert_eq!(state.prompt(), Some(Prompt::ThreadCount));
    assert_eq!(state.view().prompt.as_deref(), Some("ThreadCount = "));

    let state = inputs(state, &["5", "2", "0"]);
    assert_eq!(state.settings().thread_count, 5);
    assert_eq!(state.settings().crawl_duration_seconds, 0);
    assert_eq!(state.prompt(), None);

    let state = inputs(state, &["0"]);
    assert_eq!(state.screen(), Screen::Start);
}

#[test]
fn invalid_prompt_values_are_rejected() {
    let state = inputs(MenuState::new(settings()), &["2", "1", "abc"]);
    assert_eq!(state.settings().thread_count, 1);
    assert_eq!(state.prompt(), None);
    assert!(state.status().unwrap().contains("not a number"));

    let state = inputs(state, &["1", "0"]);
    assert_eq!(state.settings().thread_count, 1);
    assert_eq!(state.status(), Some("At least one thread is required."));
}

#[test]
fn huge_thread_count_is_never_truncated() {
    let max = u64::MAX.to_string();
    let state = inputs(MenuState::new(settings()), &["2", "1", max.as_str()]);
    match usize::try_from(u64::MAX) {
        Ok(threads) => assert_eq!(state.settings().thread_count, threads),
        Err(_) => {
            assert_eq!(state.settings().thread_count, 1);
            assert!(state.status().unwrap().contains("more than this machine can run"));
        }
    }
}

#[test]
fn settings_save_emits_effect() {
    let state = inputs(MenuState::new(settings()), &["2"]);
    let (_, effects) = input(state, "s");
    assert_eq!(effects, vec![Effect::SaveConfig(settings())]);
}

#[test]
fn sites_screen_toggles_pending_flag() {
    let state = inputs(MenuState::new(settings()), &["3", "2"]);
    assert!(state.settings().sites[1].pending);
    assert_eq!(state.view().body[1], "2 - [X] - Yox");

    let state = inputs(state, &["1"]);
    assert!(!state.settings().sites[0].pending);
    assert_eq!(state.view().body[0], "1 - [ ] - OLX");

    let state = inputs(state, &["9"]);
    assert_eq!(state.status(), Some("No site numbered \"9\""));
}

#[test]
fn crawl_results_show_up_on_jobs_screen_and_export() {
    let (state, _) = input(MenuState::new(settings()), "1");
    let jobs = vec![
        JobRecord::new("Dev", "https://yox.bg/jobs/1"),
        JobRecord::new("QA", "https://yox.bg/jobs/2"),
    ];
    let (state, effects) = update(
        state,
        Msg::CrawlFinished {
            jobs: jobs.clone(),
            sites_visited: 2,
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.session(), SessionState::Finished);
    assert_eq!(state.status(), Some("Crawl finished: 2 job(s) from 2 page(s)."));

    let state = inputs(state, &["4"]);
    assert_eq!(state.view().body, vec!["Number of jobs = 2".to_string()]);

    let state = inputs(state, &["1"]);
    assert_eq!(
        state.view().body,
        vec![
            "Number of jobs = 2".to_string(),
            "Title: Dev, URL: https://yox.bg/jobs/1".to_string(),
            "Title: QA, URL: https://yox.bg/jobs/2".to_string(),
        ]
    );

    let (state, effects) = input(state, "2");
    assert_eq!(effects, vec![Effect::ExportJobs(jobs)]);

    let (state, _) = update(state, Msg::ExportFinished(Ok("out/jobOutput.txt".into())));
    assert_eq!(state.status(), Some("Jobs exported to out/jobOutput.txt"));
}

#[test]
fn quit_and_blank_input() {
    let mut state = MenuState::new(settings());
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());

    let (mut state, effects) = input(state, "   ");
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());

    let (state, effects) = input(state, "0");
    assert_eq!(effects, vec![Effect::Quit]);
    assert!(state.should_quit());
}

#[test]
fn failed_crawl_returns_to_idle() {
    let (state, _) = input(MenuState::new(settings()), "1");
    assert_eq!(state.view().body, vec!["Crawling, please wait...".to_string()]);

    let (state, effects) = update(state, Msg::CrawlFailed("no tls backend".into()));
    assert!(effects.is_empty());
    assert_eq!(state.session(), SessionState::Idle);
    assert_eq!(state.status(), Some("Crawl failed: no tls backend"));
}
