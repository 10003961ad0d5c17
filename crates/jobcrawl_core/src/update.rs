use crate::{Effect, MenuState, Msg, Prompt, Screen, SessionState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: MenuState, msg: Msg) -> (MenuState, Vec<Effect>) {
    let effects = match msg {
        Msg::Input(line) => {
            let input = line.trim();
            if input.is_empty() {
                return (state, Vec::new());
            }
            match state.prompt() {
                Some(prompt) => {
                    apply_prompt(&mut state, prompt, input);
                    Vec::new()
                }
                None => match state.screen() {
                    Screen::Start => start_screen(&mut state, input),
                    Screen::Settings => settings_screen(&mut state, input),
                    Screen::Sites => {
                        sites_screen(&mut state, input);
                        Vec::new()
                    }
                    Screen::Jobs => jobs_screen(&mut state, input),
                },
            }
        }
        Msg::CrawlFinished {
            jobs,
            sites_visited,
        } => {
            let status = format!(
                "Crawl finished: {} job(s) from {} page(s).",
                jobs.len(),
                sites_visited
            );
            state.finish_crawl(jobs);
            state.set_status(status);
            Vec::new()
        }
        Msg::CrawlFailed(err) => {
            state.fail_crawl();
            state.set_status(format!("Crawl failed: {err}"));
            Vec::new()
        }
        Msg::ExportFinished(result) => {
            match result {
                Ok(path) => state.set_status(format!("Jobs exported to {path}")),
                Err(err) => state.set_status(format!("Export failed: {err}")),
            }
            Vec::new()
        }
        Msg::ConfigSaved(result) => {
            match result {
                Ok(path) => state.set_status(format!("Settings saved to {path}")),
                Err(err) => state.set_status(format!("Saving settings failed: {err}")),
            }
            Vec::new()
        }
    };

    (state, effects)
}

fn start_screen(state: &mut MenuState, input: &str) -> Vec<Effect> {
    match input {
        "0" => {
            state.request_quit();
            vec![Effect::Quit]
        }
        "1" => {
            if state.session() == SessionState::Crawling {
                return Vec::new();
            }
            if state.settings().pending_seeds().next().is_none() {
                state.set_status("No sites selected for searching.");
                return Vec::new();
            }
            state.start_crawl();
            vec![Effect::StartCrawl(state.settings().clone())]
        }
        "2" => {
            state.goto(Screen::Settings);
            Vec::new()
        }
        "3" => {
            state.goto(Screen::Sites);
            Vec::new()
        }
        "4" => {
            state.goto(Screen::Jobs);
            Vec::new()
        }
        other => {
            state.set_status(format!("Unknown option {other:?}"));
            Vec::new()
        }
    }
}

fn settings_screen(state: &mut MenuState, input: &str) -> Vec<Effect> {
    match input {
        "0" => state.goto(Screen::Start),
        "1" => state.set_prompt(Some(Prompt::ThreadCount)),
        "2" => state.set_prompt(Some(Prompt::CrawlDuration)),
        "s" | "S" => return vec![Effect::SaveConfig(state.settings().clone())],
        other => state.set_status(format!("Unknown option {other:?}")),
    }
    Vec::new()
}

fn apply_prompt(state: &mut MenuState, prompt: Prompt, input: &str) {
    state.set_prompt(None);
    let value = match input.parse::<u64>() {
        Ok(value) => value,
        Err(_) => {
            state.set_status(format!("{input:?} is not a number."));
            return;
        }
    };
    match prompt {
        Prompt::ThreadCount => {
            if value == 0 {
                state.set_status("At least one thread is required.");
                return;
            }
            let Ok(threads) = usize::try_from(value) else {
                state.set_status(format!("{value} threads is more than this machine can run."));
                return;
            };
            state.settings_mut().thread_count = threads;
            state.set_status(format!("ThreadCount set to {value}"));
        }
        Prompt::CrawlDuration => {
            state.settings_mut().crawl_duration_seconds = value;
            state.set_status(format!("Crawl duration set to {value}s"));
        }
    }
}

fn sites_screen(state: &mut MenuState, input: &str) {
    if input == "0" {
        state.goto(Screen::Start);
        return;
    }
    let toggled = input
        .parse::<usize>()
        .ok()
        .and_then(|number| number.checked_sub(1))
        .is_some_and(|index| state.settings_mut().toggle_site(index));
    if !toggled {
        state.set_status(format!("No site numbered {input:?}"));
    }
}

fn jobs_screen(state: &mut MenuState, input: &str) -> Vec<Effect> {
    match input {
        "0" => state.goto(Screen::Start),
        "1" => state.toggle_show_all_jobs(),
        "2" => return vec![Effect::ExportJobs(state.jobs().to_vec())],
        other => state.set_status(format!("Unknown option {other:?}")),
    }
    Vec::new()
}
