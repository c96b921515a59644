use std::cell::RefCell;
use std::rc::Rc;

use ratatui::layout::Rect;

use crate::anim::{Easing, Tween};
use crate::config::Settings;
use crate::data::Showcase;
use crate::list::ContentList;
use crate::menu::MenuState;
use crate::observer::{DEFAULT_THRESHOLD, ViewportObserver};
use crate::scroll::{Dial, ScrollController, Span};
use crate::theme::Theme;

const SIDE_DELAY: f64 = 1.0;
const SIDE_STAGGER: f64 = 0.15;
const SIDE_DUR: f64 = 0.5;
const SIDE_RISE: f64 = 2.0;

/// Sections of the side panel that rise into place one after another:
/// the title block and the dial. The menu fades on its own schedule.
pub const SIDE_SECTIONS: usize = 2;

#[derive(Debug)]
struct SideSection {
    y: Tween,
    alpha: Tween,
}

/// Top-level state: the content column, the cascade menu, the damped
/// scroll position, and the observer that keeps menu selection in step
/// with whatever card the viewport rests on.
pub struct App {
    pub theme: Theme,
    pub list: ContentList,
    pub menu: MenuState,
    pub controller: ScrollController,
    pub dial: Rc<RefCell<Dial>>,
    observer: ViewportObserver,
    side_sections: Vec<SideSection>,
    menu_hits: Vec<(usize, Rect)>,
}

impl App {
    pub fn new(settings: Settings, showcase: Showcase, now: f64) -> Self {
        let mut controller = ScrollController::new(settings.damping);
        controller.set_position(0.0);
        // Input stays dead until the menu reveal finishes.
        controller.set_suppressed(true);

        let dial = Rc::new(RefCell::new(Dial::default()));
        let sink = Rc::clone(&dial);
        controller.add_listener(move |update| sink.borrow_mut().observe(update));

        let list = ContentList::new(showcase.records, now);
        let mut observer = ViewportObserver::new(DEFAULT_THRESHOLD);
        observer.observe(list.spans());

        let side_sections = (0..SIDE_SECTIONS)
            .map(|i| {
                let start = now + SIDE_DELAY + SIDE_STAGGER * i as f64;
                SideSection {
                    y: Tween::new(SIDE_RISE, 0.0, start, SIDE_DUR, Easing::QuadOut),
                    alpha: Tween::new(0.0, 1.0, start, SIDE_DUR, Easing::QuadOut),
                }
            })
            .collect();

        Self {
            theme: Theme::default(),
            list,
            menu: MenuState::new(showcase.menu, now),
            controller,
            dial,
            observer,
            side_sections,
            menu_hits: Vec::new(),
        }
    }

    /// Reports the measured content viewport for this frame.
    pub fn set_viewport(&mut self, height: f64) {
        self.controller
            .set_extent(self.list.content_height(), height);
    }

    /// Advances one frame: glide the scroll offset, lift the input lock
    /// once the reveal is over, then let the observer move the selection
    /// to whichever card crossed the visibility threshold.
    pub fn tick(&mut self, now: f64) {
        self.controller.tick();

        if self.menu.take_unlock(now) {
            self.controller.set_suppressed(false);
        }

        let height = self.controller.viewport_height();
        if height <= 0.0 {
            return;
        }
        let viewport = Span::new(self.controller.offset(), height);
        for event in self.observer.process(viewport) {
            if !event.is_intersecting {
                continue;
            }
            let Some(nav) = self.list.nav_of(event.index) else {
                continue;
            };
            // Cards without a matching menu entry scroll by unremarked.
            if let Some(menu_index) = self.menu_index_of(nav) {
                self.menu.select(menu_index, now);
            }
        }
    }

    /// Selects a menu entry and glides its first linked card into view.
    /// An entry with no linked card still selects, it just cannot scroll.
    pub fn click_menu(&mut self, index: usize, now: f64) {
        let Some(entry) = self.menu.entry(index) else {
            return;
        };
        let nav = entry.id;
        self.menu.select(index, now);
        if let Some(card) = self.list.find_by_nav(nav) {
            self.controller.scroll_into_view(self.list.span(card), true);
        } else {
            tracing::debug!(id = nav, "no card linked to menu entry");
        }
    }

    pub fn wheel(&mut self, delta: f64) {
        self.controller.handle_delta(delta);
    }

    fn menu_index_of(&self, nav: u32) -> Option<usize> {
        (0..self.menu.len()).find(|&i| self.menu.entry(i).is_some_and(|e| e.id == nav))
    }

    /// Screen rectangles of the menu labels, refreshed on every draw.
    pub fn set_menu_hits(&mut self, hits: Vec<(usize, Rect)>) {
        self.menu_hits = hits;
    }

    pub fn menu_hit(&self, column: u16, row: u16) -> Option<usize> {
        self.menu_hits
            .iter()
            .find(|(_, rect)| {
                column >= rect.x
                    && column < rect.x + rect.width
                    && row >= rect.y
                    && row < rect.y + rect.height
            })
            .map(|(index, _)| *index)
    }

    pub fn side_offset(&self, section: usize, now: f64) -> f64 {
        self.side_sections[section].y.value_at(now)
    }

    pub fn side_alpha(&self, section: usize, now: f64) -> f64 {
        self.side_sections[section].alpha.value_at(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MenuEntry, Record};

    fn app() -> App {
        App::new(Settings::default(), Showcase::builtin(), 0.0)
    }

    #[test]
    fn starts_locked_at_the_top() {
        let mut app = app();
        assert!(app.controller.suppressed());
        assert_eq!(app.controller.offset(), 0.0);
        app.wheel(5.0);
        app.tick(0.1);
        assert_eq!(app.controller.offset(), 0.0);
    }

    #[test]
    fn reveal_end_unlocks_scrolling() {
        let mut app = app();
        app.set_viewport(20.0);
        app.tick(2.0);
        assert!(!app.controller.suppressed());
        app.wheel(5.0);
        assert_eq!(app.controller.target(), 5.0);
    }

    #[test]
    fn first_visible_card_selects_its_menu_entry() {
        let mut app = app();
        app.set_viewport(20.0);
        app.tick(0.0);
        assert_eq!(app.menu.active_index(), Some(0));
    }

    #[test]
    fn scrolling_moves_the_selection_with_the_viewport() {
        let mut app = app();
        app.set_viewport(20.0);
        app.tick(0.0);
        // Jump to the ridge cards (records 4 and 5, menu id 3).
        app.controller.set_position(32.0);
        app.tick(0.1);
        assert_eq!(app.menu.active_index(), Some(2));
    }

    #[test]
    fn unlinked_cards_scroll_by_without_moving_the_selection() {
        let showcase = Showcase {
            records: vec![
                Record {
                    id: 1,
                    title: "linked".into(),
                    image: "linked.jpg".into(),
                    nav_id: Some(1),
                },
                Record {
                    id: 2,
                    title: "orphan".into(),
                    image: "orphan.jpg".into(),
                    nav_id: Some(9),
                },
                Record {
                    id: 3,
                    title: "plain".into(),
                    image: "plain.jpg".into(),
                    nav_id: None,
                },
            ],
            menu: vec![MenuEntry { id: 1, label: "one".into() }],
        };
        let mut app = App::new(Settings::default(), showcase, 0.0);
        app.set_viewport(10.0);
        app.tick(0.0);
        assert_eq!(app.menu.active_index(), Some(0));
        // A nav id no menu entry carries, then a card with no nav id at all.
        app.controller.set_position(10.0);
        app.tick(0.1);
        app.controller.set_position(20.0);
        app.tick(0.2);
        assert_eq!(app.menu.active_index(), Some(0));
    }

    #[test]
    fn menu_click_scrolls_the_linked_card_into_view() {
        let mut app = app();
        app.set_viewport(20.0);
        app.tick(2.0);
        app.click_menu(3, 2.0);
        assert_eq!(app.menu.active_index(), Some(3));
        // Last card spans rows 50..59; minimal scroll puts its end at the
        // bottom edge.
        assert_eq!(app.controller.target(), 39.0);
    }

    #[test]
    fn menu_click_without_a_linked_card_only_selects() {
        let showcase = Showcase {
            records: vec![Record {
                id: 1,
                title: "only".into(),
                image: "only.jpg".into(),
                nav_id: Some(1),
            }],
            menu: vec![
                MenuEntry { id: 1, label: "linked".into() },
                MenuEntry { id: 9, label: "orphan".into() },
            ],
        };
        let mut app = App::new(Settings::default(), showcase, 0.0);
        app.set_viewport(5.0);
        app.tick(2.0);
        app.click_menu(1, 2.0);
        assert_eq!(app.menu.active_index(), Some(1));
        assert_eq!(app.controller.target(), 0.0);
    }

    #[test]
    fn click_scroll_works_while_still_locked() {
        let mut app = app();
        app.set_viewport(20.0);
        app.tick(0.0);
        app.click_menu(3, 0.5);
        assert_eq!(app.controller.target(), 39.0);
    }

    #[test]
    fn click_on_an_already_visible_card_scrolls_nothing() {
        let mut app = app();
        app.set_viewport(20.0);
        app.tick(2.0);
        // Cards 1 and 2 both fit the initial viewport.
        app.click_menu(0, 2.0);
        assert_eq!(app.controller.target(), 0.0);
    }

    #[test]
    fn clicking_the_second_entry_switches_the_active_item() {
        let showcase = Showcase {
            records: vec![
                Record {
                    id: 1,
                    title: "first".into(),
                    image: "first.jpg".into(),
                    nav_id: Some(1),
                },
                Record {
                    id: 2,
                    title: "second".into(),
                    image: "second.jpg".into(),
                    nav_id: Some(2),
                },
            ],
            menu: vec![
                MenuEntry { id: 1, label: "one".into() },
                MenuEntry { id: 2, label: "two".into() },
            ],
        };
        let mut app = App::new(Settings::default(), showcase, 0.0);
        app.set_viewport(10.0);
        app.tick(0.0);
        assert_eq!(app.menu.active_index(), Some(0));
        app.click_menu(1, 0.1);
        assert_eq!(app.menu.active_index(), Some(1));
        assert!(!app.menu.is_active(0));
        // The second card glides into view.
        assert_eq!(app.controller.target(), 9.0);
    }

    #[test]
    fn dial_rests_at_the_arc_start_before_any_scroll() {
        let mut app = app();
        app.set_viewport(20.0);
        app.tick(1.5);
        // Nothing has fired a scroll update yet; the needle still reads 225.
        assert_eq!(app.dial.borrow().progress_deg, 0);
        assert_eq!(app.dial.borrow().angle, 225);
    }

    #[test]
    fn dial_follows_the_glide() {
        let mut app = app();
        app.set_viewport(20.0);
        app.tick(2.0);
        app.controller.set_position(20.0);
        // Limit is 40: six cards of ten rows against a 20 row viewport.
        assert_eq!(app.dial.borrow().progress_deg, 180);
        assert_eq!(app.dial.borrow().angle, 279);
    }

    #[test]
    fn menu_hits_resolve_clicks() {
        let mut app = app();
        app.set_menu_hits(vec![
            (0, Rect::new(2, 3, 10, 1)),
            (1, Rect::new(2, 5, 10, 1)),
        ]);
        assert_eq!(app.menu_hit(4, 3), Some(0));
        assert_eq!(app.menu_hit(11, 5), Some(1));
        assert_eq!(app.menu_hit(12, 5), None);
        assert_eq!(app.menu_hit(4, 4), None);
    }
}
