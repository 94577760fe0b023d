//! Terminal runner for the quiz browser.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::api::QuizApi;
use crate::terminal::TerminalSession;

use super::pagination::PageControl;
use super::state::{BrowserEffect, BrowserEvent, PageRequest, QuizBrowser};
use super::ui;

/// Browser state shared with the background tasks.
pub type SharedBrowser = Arc<Mutex<QuizBrowser>>;

enum KeyAction {
    Quit,
    Dispatch(BrowserEvent),
    Ignore,
}

/// Run the browser until the user quits.
pub async fn run(api: Arc<dyn QuizApi>) -> std::io::Result<()> {
    let browser: SharedBrowser = Arc::new(Mutex::new(QuizBrowser::new()));
    let mut session = TerminalSession::enter()?;
    info!("browser started");

    let first = browser.lock().await.load_page(1);
    tokio::spawn(fetch_page(Arc::clone(&browser), Arc::clone(&api), first));

    loop {
        {
            let browser = browser.lock().await;
            session.terminal().draw(|frame| ui::render(frame, &browser))?;
        }

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let effect = {
            let mut guard = browser.lock().await;
            match map_key(&guard, key) {
                KeyAction::Quit => break,
                KeyAction::Dispatch(event) => guard.dispatch(event),
                KeyAction::Ignore => None,
            }
        };

        if let Some(effect) = effect {
            spawn_effect(Arc::clone(&browser), Arc::clone(&api), effect);
        }
    }

    info!("browser closed");
    Ok(())
}

fn map_key(browser: &QuizBrowser, key: KeyEvent) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let chord = key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
    let overlay = browser.pending_delete().is_some() || browser.notice().is_some();

    let event = match key.code {
        KeyCode::Char('c') if ctrl => return KeyAction::Quit,
        KeyCode::Esc if !overlay => return KeyAction::Quit,
        KeyCode::Esc => BrowserEvent::Cancel,
        KeyCode::Char('y') | KeyCode::Char('Y') if overlay => BrowserEvent::Confirm,
        KeyCode::Char('n') | KeyCode::Char('N') if overlay => BrowserEvent::Cancel,
        KeyCode::Enter => BrowserEvent::Confirm,
        KeyCode::Char(c) if !chord => BrowserEvent::SearchInput(c),
        KeyCode::Backspace => BrowserEvent::SearchErase,
        KeyCode::Tab => BrowserEvent::NextSort,
        KeyCode::BackTab => BrowserEvent::PreviousSort,
        KeyCode::Down => BrowserEvent::SelectNext,
        KeyCode::Up => BrowserEvent::SelectPrevious,
        KeyCode::Home => BrowserEvent::Page(PageControl::First),
        KeyCode::Left | KeyCode::PageUp => BrowserEvent::Page(PageControl::Previous),
        KeyCode::Right | KeyCode::PageDown => BrowserEvent::Page(PageControl::Next),
        KeyCode::End => BrowserEvent::Page(PageControl::Last),
        KeyCode::Delete => BrowserEvent::RequestDelete,
        _ => return KeyAction::Ignore,
    };
    KeyAction::Dispatch(event)
}

fn spawn_effect(browser: SharedBrowser, api: Arc<dyn QuizApi>, effect: BrowserEffect) {
    match effect {
        BrowserEffect::Fetch(request) => {
            tokio::spawn(fetch_page(browser, api, request));
        }
        BrowserEffect::Delete(quiz_id) => {
            tokio::spawn(delete_quiz(browser, api, quiz_id));
        }
    }
}

/// Fetch one listing page and apply it if it is still the latest request.
pub async fn fetch_page(browser: SharedBrowser, api: Arc<dyn QuizApi>, request: PageRequest) {
    let result = api.list_quizzes(&request.query).await.map_err(|e| {
        warn!(error = %e, page = request.query.page, "loading quizzes failed");
        e.to_string()
    });

    browser.lock().await.dispatch(BrowserEvent::PageLoaded {
        token: request.token,
        result,
    });
}

/// Delete a quiz, then reload the current page or surface the failure.
pub async fn delete_quiz(browser: SharedBrowser, api: Arc<dyn QuizApi>, quiz_id: String) {
    let result = api.delete_quiz(&quiz_id).await.map_err(|e| {
        warn!(error = %e, %quiz_id, "deleting quiz failed");
        e.to_string()
    });
    if result.is_ok() {
        info!(%quiz_id, "quiz deleted");
    }

    let reload = browser
        .lock()
        .await
        .dispatch(BrowserEvent::DeleteFinished(result));
    if let Some(BrowserEffect::Fetch(request)) = reload {
        fetch_page(browser, api, request).await;
    }
}
