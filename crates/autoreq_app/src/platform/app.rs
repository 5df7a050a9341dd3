use std::io::{self, Stdout};
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use autoreq_core::{update, AppState, Msg};
use autoreq_logging::autoreq_info;
use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use super::config::Settings;
use super::effects::EffectRunner;
use super::ui;

type Term = Terminal<CrosstermBackend<Stdout>>;

/// How long one poll for keyboard input may block; also the render cadence.
const POLL_INTERVAL: Duration = Duration::from_millis(75);

pub fn run_app(settings: &Settings) -> Result<()> {
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(settings, msg_tx);

    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &runner, &msg_rx);
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Term> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
        .context("Failed to setup terminal")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
}

fn restore_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// What a key press asks the shell to do.
#[derive(Debug, Clone, PartialEq, Eq)]
enum KeyAction {
    Quit,
    Dispatch(Msg),
}

fn event_loop(
    terminal: &mut Term,
    runner: &EffectRunner,
    msg_rx: &mpsc::Receiver<Msg>,
) -> Result<()> {
    let mut state = AppState::new();
    draw(terminal, &state)?;

    loop {
        let mut inbox = Vec::new();
        if event::poll(POLL_INTERVAL).context("Failed to poll terminal events")? {
            match event::read().context("Failed to read terminal event")? {
                Event::Key(key) => match map_key(key) {
                    Some(KeyAction::Quit) => break,
                    Some(KeyAction::Dispatch(msg)) => inbox.push(msg),
                    None => {}
                },
                Event::Paste(text) => {
                    let pasted = text.trim_end_matches(['\r', '\n']);
                    inbox.push(Msg::InputChanged(format!("{}{}", state.input(), pasted)));
                }
                Event::Resize(..) => draw(terminal, &state)?,
                _ => {}
            }
        }
        inbox.extend(msg_rx.try_iter());

        for msg in inbox {
            let (next, effects) = update(std::mem::take(&mut state), msg);
            state = next;
            runner.enqueue(effects);
        }

        if state.consume_dirty() {
            draw(terminal, &state)?;
        }
    }

    autoreq_info!("Quit requested");
    Ok(())
}

fn draw(terminal: &mut Term, state: &AppState) -> Result<()> {
    let view = state.view();
    terminal
        .draw(|frame| ui::render::render(frame, &view))
        .context("Failed to draw terminal")?;
    Ok(())
}

fn map_key(key: KeyEvent) -> Option<KeyAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let action = match key.code {
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('c') if ctrl => KeyAction::Quit,
        KeyCode::Char('y') if ctrl => KeyAction::Dispatch(Msg::CopyClicked),
        KeyCode::Char('s') if ctrl => KeyAction::Dispatch(Msg::SaveClicked),
        KeyCode::Char(_) if ctrl => return None,
        KeyCode::Char(ch) => KeyAction::Dispatch(Msg::InputCharTyped(ch)),
        KeyCode::Backspace => KeyAction::Dispatch(Msg::InputBackspace),
        KeyCode::Enter => KeyAction::Dispatch(Msg::Submitted),
        _ => return None,
    };
    Some(action)
}
