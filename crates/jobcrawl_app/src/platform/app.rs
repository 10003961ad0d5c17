use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crawl_logging::{crawl_debug, crawl_info};
use jobcrawl_core::{update, CrawlSettings, MenuState, Msg};

use super::effects::EffectHandler;
use super::render::render;

/// Console loop: render when the state changed, read a line, run it through
/// `update` and execute the resulting effects until the menu quits or input
/// ends. Returns the final state.
pub fn run_menu<R, W, H>(
    settings: CrawlSettings,
    mut input: R,
    out: &mut W,
    handler: &mut H,
) -> io::Result<MenuState>
where
    R: BufRead,
    W: Write,
    H: EffectHandler,
{
    let mut state = MenuState::new(settings);
    loop {
        if state.consume_dirty() {
            render(&state.view(), out)?;
        }
        if state.should_quit() {
            break;
        }

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            crawl_info!("Input closed; leaving menu");
            break;
        }
        state = dispatch(state, Msg::Input(line), out, handler)?;
    }
    writeln!(out)?;
    Ok(state)
}

/// Applies `msg` and every message produced by the effects it triggers.
/// The screen is redrawn before each effect so long-running work shows its
/// progress state first.
fn dispatch<W: Write, H: EffectHandler>(
    mut state: MenuState,
    msg: Msg,
    out: &mut W,
    handler: &mut H,
) -> io::Result<MenuState> {
    let mut pending = VecDeque::from([msg]);
    while let Some(msg) = pending.pop_front() {
        let (next, effects) = update(state, msg);
        state = next;
        for effect in effects {
            if state.consume_dirty() {
                render(&state.view(), out)?;
            }
            crawl_debug!("Running effect {:?}", effect);
            if let Some(reply) = handler.handle(effect) {
                pending.push_back(reply);
            }
        }
    }
    Ok(state)
}
