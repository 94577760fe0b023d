//! Terminal runner for the quiz editor.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::api::QuizApi;
use crate::models::{CardId, ImagePreview};
use crate::protocol::QuizSubmission;
use crate::terminal::TerminalSession;

use super::state::{EditorEffect, EditorEvent, EditorForm};
use super::ui;

/// Editor state shared with the background tasks.
pub type SharedForm = Arc<Mutex<EditorForm>>;

enum KeyAction {
    Quit,
    Dispatch(EditorEvent),
    Ignore,
}

/// Run the editor until the user quits.
pub async fn run(api: Arc<dyn QuizApi>, form: EditorForm) -> std::io::Result<()> {
    let form: SharedForm = Arc::new(Mutex::new(form));
    let mut session = TerminalSession::enter()?;
    info!("editor started");

    loop {
        {
            let form = form.lock().await;
            session.terminal().draw(|frame| ui::render(frame, &form))?;
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
            let mut guard = form.lock().await;
            match map_key(&guard, key) {
                KeyAction::Quit => break,
                KeyAction::Dispatch(event) => guard.dispatch(event),
                KeyAction::Ignore => None,
            }
        };

        if let Some(effect) = effect {
            spawn_effect(Arc::clone(&form), Arc::clone(&api), effect);
        }
    }

    info!("editor closed");
    Ok(())
}

fn map_key(form: &EditorForm, key: KeyEvent) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let chord = key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
    let overlay = form.prompt().is_some() || form.notice().is_some();
    let typing = form.prompt().is_some() || form.focused().is_text();

    let event = match key.code {
        KeyCode::Char('c') if ctrl => return KeyAction::Quit,
        KeyCode::Char('s') if ctrl => EditorEvent::Save,
        KeyCode::Esc if !overlay => return KeyAction::Quit,
        KeyCode::Esc => EditorEvent::Cancel,
        KeyCode::Tab | KeyCode::Down => EditorEvent::FocusNext,
        KeyCode::BackTab | KeyCode::Up => EditorEvent::FocusPrevious,
        KeyCode::Enter => EditorEvent::Activate,
        KeyCode::Char(' ') if !typing => EditorEvent::Activate,
        KeyCode::Char(c) if !chord => EditorEvent::Input(c),
        KeyCode::Backspace => EditorEvent::Erase,
        KeyCode::Left => EditorEvent::Adjust(-1),
        KeyCode::Right => EditorEvent::Adjust(1),
        KeyCode::PageDown => EditorEvent::Adjust(5),
        KeyCode::PageUp => EditorEvent::Adjust(-5),
        KeyCode::Delete => EditorEvent::Remove,
        _ => return KeyAction::Ignore,
    };
    KeyAction::Dispatch(event)
}

fn spawn_effect(form: SharedForm, api: Arc<dyn QuizApi>, effect: EditorEffect) {
    match effect {
        EditorEffect::ReadImage {
            card,
            generation,
            path,
        } => {
            tokio::spawn(load_preview(form, card, generation, path));
        }
        EditorEffect::Submit(submission) => {
            tokio::spawn(submit(form, api, submission));
        }
    }
}

/// Read a chosen image and hand its preview back to the form.
pub async fn load_preview(form: SharedForm, card: CardId, generation: u64, path: PathBuf) {
    let result = read_preview(&path).await;
    if let Err(reason) = &result {
        warn!(path = %path.display(), %reason, "image read failed");
    }

    form.lock().await.dispatch(EditorEvent::PreviewLoaded {
        card,
        generation,
        result,
    });
}

pub async fn read_preview(path: &Path) -> Result<ImagePreview, String> {
    let bytes = tokio::fs::read(path).await.map_err(|e| e.to_string())?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(ImagePreview::from_file(&file_name, &bytes))
}

/// Send one save request and report the outcome to the form.
pub async fn submit(form: SharedForm, api: Arc<dyn QuizApi>, submission: QuizSubmission) {
    let result = api.save_quiz(&submission).await.map_err(|e| {
        warn!(error = %e, "saving quiz failed");
        e.to_string()
    });
    if result.is_ok() {
        info!(title = %submission.title, "quiz saved");
    }

    form.lock().await.dispatch(EditorEvent::SaveFinished(result));
}
