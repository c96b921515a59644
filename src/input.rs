use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};

use crate::app::App;

/// Rows one wheel notch moves the scroll target.
pub const WHEEL_STEP: f64 = 3.0;

/// Routes one key press. Returns `false` when the app should exit.
///
/// Every scroll-producing key funnels into the controller as a delta, so
/// the whole keyboard goes quiet while the reveal still holds the input
/// lock. Menu selection by digit is not a scroll input and stays live.
pub fn handle_key(key: KeyCode, app: &mut App, now: f64) -> bool {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => return false,
        KeyCode::Down | KeyCode::Char('j') => app.wheel(1.0),
        KeyCode::Up | KeyCode::Char('k') => app.wheel(-1.0),
        KeyCode::PageDown | KeyCode::Char(' ') => app.wheel(app.controller.viewport_height()),
        KeyCode::PageUp => app.wheel(-app.controller.viewport_height()),
        KeyCode::Home | KeyCode::Char('g') => app.wheel(-app.controller.target()),
        KeyCode::End | KeyCode::Char('G') => {
            app.wheel(app.controller.limit() - app.controller.target());
        }
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            app.click_menu(index, now);
        }
        _ => {}
    }
    true
}

/// Wheel scrolling works anywhere on the screen; only a left press that
/// lands on a menu label counts as a click.
pub fn handle_mouse(mouse: MouseEvent, app: &mut App, now: f64) {
    match mouse.kind {
        MouseEventKind::ScrollDown => app.wheel(WHEEL_STEP),
        MouseEventKind::ScrollUp => app.wheel(-WHEEL_STEP),
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(index) = app.menu_hit(mouse.column, mouse.row) {
                app.click_menu(index, now);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::layout::Rect;

    use crate::config::Settings;
    use crate::data::Showcase;

    fn app() -> App {
        let mut app = App::new(Settings::default(), Showcase::builtin(), 0.0);
        app.set_viewport(20.0);
        // Past the reveal, so the input lock has lifted.
        app.tick(2.0);
        app
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn quit_keys_stop_the_loop() {
        let mut app = app();
        assert!(!handle_key(KeyCode::Char('q'), &mut app, 2.0));
        assert!(!handle_key(KeyCode::Esc, &mut app, 2.0));
        assert!(handle_key(KeyCode::Char('x'), &mut app, 2.0));
    }

    #[test]
    fn movement_keys_scale_with_their_stride() {
        let mut app = app();
        handle_key(KeyCode::Char('j'), &mut app, 2.0);
        assert_eq!(app.controller.target(), 1.0);
        handle_key(KeyCode::PageDown, &mut app, 2.0);
        assert_eq!(app.controller.target(), 21.0);
        handle_key(KeyCode::Up, &mut app, 2.0);
        assert_eq!(app.controller.target(), 20.0);
    }

    #[test]
    fn ends_jump_to_the_extremes() {
        let mut app = app();
        handle_key(KeyCode::Char('G'), &mut app, 2.0);
        assert_eq!(app.controller.target(), app.controller.limit());
        handle_key(KeyCode::Home, &mut app, 2.0);
        assert_eq!(app.controller.target(), 0.0);
    }

    #[test]
    fn digits_click_menu_items_by_position() {
        let mut app = app();
        handle_key(KeyCode::Char('2'), &mut app, 2.0);
        assert_eq!(app.menu.active_index(), Some(1));
    }

    #[test]
    fn wheel_input_stays_dead_during_the_reveal() {
        let mut app = App::new(Settings::default(), Showcase::builtin(), 0.0);
        app.set_viewport(20.0);
        app.tick(0.1);
        handle_mouse(mouse(MouseEventKind::ScrollDown, 0, 0), &mut app, 0.1);
        assert_eq!(app.controller.target(), 0.0);
        app.tick(2.0);
        handle_mouse(mouse(MouseEventKind::ScrollDown, 0, 0), &mut app, 2.0);
        assert_eq!(app.controller.target(), WHEEL_STEP);
    }

    #[test]
    fn clicks_resolve_through_the_menu_hit_map() {
        let mut app = app();
        app.set_menu_hits(vec![(2, Rect::new(3, 10, 8, 1))]);
        handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 5, 10), &mut app, 2.0);
        assert_eq!(app.menu.active_index(), Some(2));
        // A press off the labels changes nothing.
        handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 5, 11), &mut app, 2.1);
        assert_eq!(app.menu.active_index(), Some(2));
    }
}
