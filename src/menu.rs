//! Interactive menu loop.

use anyhow::{Context, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use std::io::Write;
use tracing::error;

use crate::actions;
use crate::platform;
use crate::session::Session;

/// Source of menu selections.
pub trait Prompter {
    /// Show `items` under `prompt` and return the chosen index.
    fn select(&mut self, prompt: &str, items: &[String]) -> Result<usize>;
}

/// Terminal prompter.
#[derive(Default)]
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl Prompter for DialoguerPrompter {
    fn select(&mut self, prompt: &str, items: &[String]) -> Result<usize> {
        Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(0)
            .items(items)
            .interact()
            .context("read menu selection")
    }
}

/// Main menu entries, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Test,
    Add,
    Remove,
    List,
    Exit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 5] = [
        MenuAction::Test,
        MenuAction::Add,
        MenuAction::Remove,
        MenuAction::List,
        MenuAction::Exit,
    ];

    fn text(self, session: &Session) -> String {
        let label = session.target_set().label();
        match self {
            MenuAction::Test => format!("Test {label} redirection to NHLGames"),
            MenuAction::Add => format!("Add entry for {label} to NHLGames"),
            MenuAction::Remove => "Remove NHLGames entries".to_string(),
            MenuAction::List => "List hosts file entries".to_string(),
            MenuAction::Exit => "Exit".to_string(),
        }
    }

    fn needs_write(self) -> bool {
        matches!(self, MenuAction::Add | MenuAction::Remove)
    }
}

/// Actions that need a candidate domain picked first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainAction {
    Test,
    Add,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    MainMenu,
    DomainSelect(DomainAction),
    /// "Are you done?" prompt; going back is only offered when `can_go_back`.
    Done { can_go_back: bool },
}

fn print_header(out: &mut dyn Write, session: &Session) -> Result<()> {
    writeln!(
        out,
        "\n>> {} to NHLGames\n>> Hosts file manager ({})",
        session.target_set().label(),
        session.hosts().path().display()
    )?;
    Ok(())
}

/// Run the menu until the user exits.
pub fn run(
    session: &mut Session,
    prompter: &mut dyn Prompter,
    out: &mut dyn Write,
) -> Result<()> {
    let mut state = State::MainMenu;
    loop {
        state = match state {
            State::MainMenu => match main_menu(session, prompter, out)? {
                Some(next) => next,
                None => return Ok(()),
            },
            State::DomainSelect(action) => domain_select(session, prompter, out, action)?,
            State::Done { can_go_back } => {
                if !done_prompt(prompter, can_go_back)? {
                    return Ok(());
                }
                State::MainMenu
            }
        };
    }
}

/// Returns `None` when the user picks Exit.
fn main_menu(
    session: &mut Session,
    prompter: &mut dyn Prompter,
    out: &mut dyn Write,
) -> Result<Option<State>> {
    print_header(out, session)?;
    let items: Vec<String> = MenuAction::ALL.iter().map(|a| a.text(&*session)).collect();
    let idx = prompter.select("What do you want to do?", &items)?;
    let action = *MenuAction::ALL
        .get(idx)
        .with_context(|| format!("menu selection {idx} out of range"))?;

    if action.needs_write() && !session.hosts().is_writable() {
        writeln!(out, "\n>> {}", platform::elevation_hint())?;
        return Ok(Some(State::Done { can_go_back: true }));
    }

    let next = match action {
        MenuAction::Test => State::DomainSelect(DomainAction::Test),
        MenuAction::Add => State::DomainSelect(DomainAction::Add),
        MenuAction::Remove => {
            let result = actions::remove(session, out).map(drop);
            finish(session, result, false)
        }
        MenuAction::List => {
            let result = actions::list(session, out).map(drop);
            finish(session, result, true)
        }
        MenuAction::Exit => return Ok(None),
    };
    Ok(Some(next))
}

fn domain_select(
    session: &mut Session,
    prompter: &mut dyn Prompter,
    out: &mut dyn Write,
    action: DomainAction,
) -> Result<State> {
    let domains = session.domains().as_slice().to_vec();
    let idx = prompter.select("Which NHLGames domain?", &domains)?;
    let domain = domains
        .get(idx)
        .with_context(|| format!("domain selection {idx} out of range"))?;

    let ip = match session.resolver().lookup_first(domain) {
        Ok(ip) => ip,
        Err(e) => {
            let result = Err(anyhow::Error::new(e).context(format!("resolve {domain}")));
            return Ok(finish(session, result, false));
        }
    };

    let next = match action {
        DomainAction::Test => {
            let result = actions::test(session, ip, out).map(drop);
            finish(session, result, true)
        }
        DomainAction::Add => {
            let result = actions::add(session, ip, out).map(drop);
            finish(session, result, false)
        }
    };
    Ok(next)
}

/// Route an action's outcome to the "Are you done?" prompt. Failures are
/// logged and pending hosts changes flushed.
fn finish(session: &mut Session, result: Result<()>, can_go_back: bool) -> State {
    match result {
        Ok(()) => State::Done { can_go_back },
        Err(e) => {
            error!("{e:#}");
            session.recover();
            State::Done { can_go_back: false }
        }
    }
}

/// Returns true to go back to the main menu, false to exit.
fn done_prompt(prompter: &mut dyn Prompter, can_go_back: bool) -> Result<bool> {
    let mut items = Vec::new();
    if can_go_back {
        items.push("Go back to main menu".to_string());
    }
    items.push("Exit".to_string());
    let idx = prompter.select("Are you done?", &items)?;
    Ok(can_go_back && idx == 0)
}
