// src/tui/events.rs

use anyhow::{Context, Result};
use crossterm::event::{Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::Terminal;
use std::time::{Duration, Instant};

use super::app::{App, InputMode};
use super::ui::ui;

pub async fn run_app_loop<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    let mut last_tick = Instant::now();
    let mut event_receiver = app
        .event_receiver
        .take()
        .context("App event receiver already taken")?;
    let mut crossterm_events = EventStream::new();

    loop {
        app.drain_logs();
        app.drain_notices();
        terminal.draw(|f| ui(f, &mut app))?;

        let tick_duration = Duration::from_millis(app.config.interface.refresh_interval_ms);

        tokio::select! {
            Some(event) = event_receiver.recv() => {
                app.handle_app_event(event);
            }

            Some(Ok(event)) = crossterm_events.next() => {
                match event {
                    CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => on_key(&mut app, key),
                    CrosstermEvent::Mouse(mouse) => on_mouse_event(&mut app, mouse),
                    _ => {}
                }
            }

            _ = tokio::time::sleep(tick_duration) => {
                if last_tick.elapsed() >= tick_duration {
                    app.tick();
                    last_tick = Instant::now();
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

pub fn on_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    match (mouse_event.kind, app.show_logs) {
        (MouseEventKind::ScrollUp, true) => app.scroll_logs_up(),
        (MouseEventKind::ScrollDown, true) => app.scroll_logs_down(),
        (MouseEventKind::ScrollUp, false) => app.select_previous_row(),
        (MouseEventKind::ScrollDown, false) => app.select_next_row(),
        _ => {}
    }
}

// Uppercase letters arrive with SHIFT set; the binding names the letter itself.
fn key_matches(app: &App, action: &str, key_event: &KeyEvent) -> bool {
    let Some((code, mods)) = app.keybinding_map.get(action) else {
        return false;
    };
    let pressed = match key_event.code {
        KeyCode::Char(_) => key_event.modifiers.difference(KeyModifiers::SHIFT),
        _ => key_event.modifiers,
    };
    let wanted = match code {
        KeyCode::Char(_) => mods.difference(KeyModifiers::SHIFT),
        _ => *mods,
    };
    key_event.code == *code && pressed == wanted
}

pub fn on_key(app: &mut App, key_event: KeyEvent) {
    if app.show_keybindings_modal {
        if key_matches(app, "help", &key_event) || key_event.code == KeyCode::Esc {
            app.show_keybindings_modal = false;
        }
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode_key(app, key_event),
        InputMode::Searching => handle_search_mode_key(app, key_event),
        InputMode::PageJump => handle_page_jump_key(app, key_event),
        InputMode::ConfirmingDelete => handle_confirm_delete_key(app, key_event),
    }
}

fn handle_normal_mode_key(app: &mut App, key_event: KeyEvent) {
    if key_matches(app, "quit", &key_event)
        || (key_event.code == KeyCode::Char('c') && key_event.modifiers == KeyModifiers::CONTROL)
    {
        app.should_quit = true;
    } else if key_matches(app, "help", &key_event) {
        app.show_keybindings_modal = true;
    } else if key_matches(app, "logs", &key_event) {
        app.show_logs = !app.show_logs;
    } else if key_matches(app, "next_tab", &key_event) {
        app.next_tab();
    } else if key_matches(app, "prev_tab", &key_event) {
        app.previous_tab();
    } else if key_matches(app, "down", &key_event) || key_event.code == KeyCode::Char('j') {
        if app.show_logs {
            app.scroll_logs_down();
        } else {
            app.select_next_row();
        }
    } else if key_matches(app, "up", &key_event) || key_event.code == KeyCode::Char('k') {
        if app.show_logs {
            app.scroll_logs_up();
        } else {
            app.select_previous_row();
        }
    } else if key_matches(app, "next_page", &key_event) {
        app.next_page();
    } else if key_matches(app, "prev_page", &key_event) {
        app.previous_page();
    } else if key_matches(app, "jump_page", &key_event) {
        app.begin_page_jump();
    } else if key_matches(app, "search", &key_event) {
        app.begin_search();
    } else if key_matches(app, "next_axis", &key_event) {
        app.focus_next_axis();
    } else if key_matches(app, "filter", &key_event) {
        app.cycle_filter();
    } else if key_matches(app, "sort", &key_event) {
        app.cycle_sort();
    } else if key_matches(app, "page_size", &key_event) {
        app.cycle_page_size();
    } else if key_matches(app, "approve", &key_event) {
        app.request_approve();
    } else if key_matches(app, "delete", &key_event) {
        app.request_delete();
    }
}

fn handle_search_mode_key(app: &mut App, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Enter => app.input_mode = InputMode::Normal,
        KeyCode::Esc => app.cancel_search(),
        KeyCode::Char(c) => {
            app.current_input.push(c);
            app.update_search();
        }
        KeyCode::Backspace => {
            if app.current_input.pop().is_some() {
                app.update_search();
            }
        }
        _ => {}
    }
}

fn handle_page_jump_key(app: &mut App, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Enter => app.submit_page_jump(),
        KeyCode::Esc => {
            app.current_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char(c) if c.is_ascii_digit() => app.current_input.push(c),
        KeyCode::Backspace => {
            app.current_input.pop();
        }
        _ => {}
    }
}

fn handle_confirm_delete_key(app: &mut App, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.resolve_delete(true),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.resolve_delete(false),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::listview::{Record, RowSource, SnapshotTarget, ViewSpec, ListViewController};
    use crate::server::{CsrfTokenProvider, HttpMutationClient, Routes};
    use crate::tui::app::ViewTab;
    use std::sync::Arc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        let spec = ViewSpec::builder("agents")
            .search_fields(["name"])
            .standard_sorts()
            .build()
            .unwrap();
        let source = RowSource::new(vec![
            Record::new("1").with("name", "Asha").with("date", 1i64),
            Record::new("2").with("name", "Ravi").with("date", 2i64),
        ])
        .unwrap();
        let tab = ViewTab::new(
            "agents",
            "Agents",
            ListViewController::mount(spec, Some(source), SnapshotTarget::new()),
        );
        let csrf = Arc::new(CsrfTokenProvider::new("csrftoken", None));
        let client = HttpMutationClient::new("http://127.0.0.1:9", Duration::from_secs(1), Routes::new(), csrf).unwrap();
        App::with_tabs(Arc::new(Config::default()), vec![tab], Arc::new(client), None)
    }

    #[test]
    fn typing_in_search_mode_filters_live() {
        let mut app = app();
        on_key(&mut app, key(KeyCode::Char('/')));
        assert_eq!(app.input_mode, InputMode::Searching);
        for c in "rav".chars() {
            on_key(&mut app, key(KeyCode::Char(c)));
        }
        let controller = app.tabs[0].controller.as_ref().unwrap();
        assert_eq!(controller.filtered_len(), 1);
        // 'q' is text here, not quit.
        on_key(&mut app, key(KeyCode::Char('q')));
        assert!(!app.should_quit);
        on_key(&mut app, key(KeyCode::Backspace));
        on_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.current_input, "rav");
    }

    #[test]
    fn shifted_letters_match_uppercase_bindings() {
        let mut app = app();
        let shifted = KeyEvent::new(KeyCode::Char('F'), KeyModifiers::SHIFT);
        assert!(key_matches(&app, "next_axis", &shifted));
        assert!(!key_matches(&app, "filter", &shifted));
        on_key(&mut app, key(KeyCode::Char('?')));
        assert!(app.show_keybindings_modal);
        on_key(&mut app, key(KeyCode::Char('q')));
        assert!(!app.should_quit);
        on_key(&mut app, key(KeyCode::Esc));
        assert!(!app.show_keybindings_modal);
    }

    #[test]
    fn page_jump_only_takes_digits() {
        let mut app = app();
        on_key(&mut app, key(KeyCode::Char('g')));
        assert_eq!(app.input_mode, InputMode::PageJump);
        on_key(&mut app, key(KeyCode::Char('x')));
        on_key(&mut app, key(KeyCode::Char('1')));
        assert_eq!(app.current_input, "1");
        on_key(&mut app, key(KeyCode::Esc));
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn quit_and_logs_toggle() {
        let mut app = app();
        on_key(&mut app, key(KeyCode::Char('l')));
        assert!(app.show_logs);
        on_key(&mut app, key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }
}
