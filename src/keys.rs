use crate::app::{App, MenuItem};
use crate::state::messages::NetworkRequest;
use crate::state::scoreboard::PageRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    if key_event.kind == KeyEventKind::Release {
        return;
    }

    let mut guard = app.lock().await;

    let quit = match (key_event.code, key_event.modifiers) {
        (Char('c'), KeyModifiers::CONTROL) => true,
        (Char('q'), _) => !guard.is_filter_menu_open(),
        _ => false,
    };
    if quit {
        crate::cleanup_terminal();
        std::process::exit(0);
    }

    let request = if guard.is_filter_menu_open() {
        handle_filter_menu_keys(key_event, &mut guard)
    } else {
        handle_main_keys(key_event, &mut guard)
    };
    drop(guard);

    if let Some(request) = request {
        let _ = network_requests.send(NetworkRequest::LoadGames(request)).await;
    }
}

fn handle_filter_menu_keys(key_event: KeyEvent, app: &mut App) -> Option<PageRequest> {
    match key_event.code {
        Char('j') | KeyCode::Down | KeyCode::Tab => app.filter_menu_next(),
        Char('k') | KeyCode::Up | KeyCode::BackTab => app.filter_menu_prev(),
        Char('l') | KeyCode::Right | Char(' ') => app.filter_menu_step(true),
        Char('h') | KeyCode::Left => app.filter_menu_step(false),
        KeyCode::Enter => return app.filter_menu_apply(),
        KeyCode::Esc | Char('f') => app.close_filter_menu(),
        _ => {}
    }
    None
}

fn handle_main_keys(key_event: KeyEvent, app: &mut App) -> Option<PageRequest> {
    match (app.state.active_tab, key_event.code, key_event.modifiers) {
        // Tab switching
        (_, Char('1'), _) => app.update_tab(MenuItem::Ongoing),
        (_, Char('2'), _) => app.update_tab(MenuItem::Past),
        (_, Char('3'), _) => app.update_tab(MenuItem::Scrimmages),
        (_, Char('4'), _) => app.update_tab(MenuItem::PastScrimmages),
        (_, Char('?'), _) => app.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => {
            app.exit_help();
            None
        }

        // Global
        (_, Char('F'), _) => {
            app.toggle_full_screen();
            None
        }
        (_, Char('"'), _) => {
            app.toggle_show_logs();
            None
        }
        (MenuItem::Help, _, _) => None,

        // Scoreboard
        (_, Char('f'), _) => {
            app.open_filter_menu();
            None
        }
        (_, Char('l') | KeyCode::Right | KeyCode::PageDown, _) => app.next_page(),
        (_, Char('h') | KeyCode::Left | KeyCode::PageUp, _) => app.prev_page(),
        (_, KeyCode::Home | Char('g'), _) => app.first_page(),
        (_, KeyCode::End | Char('G'), _) => app.last_page(),
        (_, Char('+') | Char('='), _) => app.cycle_rows_per_page(true),
        (_, Char('-'), _) => app.cycle_rows_per_page(false),
        (_, Char('r'), _) => app.refresh(),
        (_, Char('j') | KeyCode::Down, _) => {
            app.select_next();
            None
        }
        (_, Char('k') | KeyCode::Up, _) => {
            app.select_prev();
            None
        }

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::app_settings::AppSettings;
    use cfb_api::GameCategory;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn number_keys_switch_and_mount_tabs() {
        let mut app = App::with_settings(AppSettings::default());
        app.on_season_loaded(None);

        let request = handle_main_keys(press(Char('4')), &mut app).unwrap();
        assert_eq!(request.category, GameCategory::PastScrimmage);
        assert_eq!(app.state.active_tab, MenuItem::PastScrimmages);
    }

    #[test]
    fn filter_menu_captures_navigation_keys() {
        let mut app = App::with_settings(AppSettings::default());
        app.on_season_loaded(None);
        handle_main_keys(press(Char('f')), &mut app);
        assert!(app.is_filter_menu_open());

        assert!(handle_filter_menu_keys(press(Char('l')), &mut app).is_none());
        assert_eq!(app.state.active_tab, MenuItem::Ongoing);

        let request = handle_filter_menu_keys(press(KeyCode::Enter), &mut app).unwrap();
        assert_eq!(request.query.conference.as_deref(), Some("ACC"));
        assert!(!app.is_filter_menu_open());
    }

    #[test]
    fn help_tab_ignores_scoreboard_keys() {
        let mut app = App::with_settings(AppSettings::default());
        app.on_season_loaded(None);
        handle_main_keys(press(Char('?')), &mut app);
        assert!(handle_main_keys(press(Char('r')), &mut app).is_none());
        handle_main_keys(press(KeyCode::Esc), &mut app);
        assert_eq!(app.state.active_tab, MenuItem::Ongoing);
    }
}
