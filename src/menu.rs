use crate::anim::{Easing, Tween};
use crate::models::MenuEntry;

/// Horizontal cells each step of the cascade shifts by.
pub const STEP_X: f64 = 2.0;
/// Vertical cells each step of the cascade drops by.
pub const STEP_Y: f64 = 1.0;

const REVEAL_DELAY: f64 = 0.8;
const REVEAL_STAGGER: f64 = 0.2;
const REVEAL_DUR: f64 = 0.5;
const SELECT_DUR: f64 = 0.8;

/// One navigation entry with its animated offsets. `x` and `y` are cell
/// offsets from the item's natural slot row; at rest the menu forms a
/// staircase, item `i` sitting at `(-STEP_X * i, STEP_Y * i)`.
#[derive(Debug)]
pub struct MenuItem {
    pub entry: MenuEntry,
    x: Tween,
    y: Tween,
    alpha: Tween,
    active: bool,
}

/// The side menu: cascade reveal on startup, fan transition on selection.
/// Scroll input stays locked until the reveal finishes; the app polls
/// `take_unlock` to lift the suppression exactly once.
#[derive(Debug)]
pub struct MenuState {
    items: Vec<MenuItem>,
    container_alpha: Tween,
    unlock_at: f64,
    unlocked: bool,
}

impl MenuState {
    pub fn new(entries: Vec<MenuEntry>, now: f64) -> Self {
        let count = entries.len();
        let items = entries
            .into_iter()
            .enumerate()
            .map(|(i, entry)| {
                let step = i as f64;
                MenuItem {
                    entry,
                    x: Tween::hold(-STEP_X * step),
                    y: Tween::hold(STEP_Y * step),
                    alpha: Tween::new(
                        0.0,
                        1.0,
                        now + REVEAL_DELAY + REVEAL_STAGGER * step,
                        REVEAL_DUR,
                        Easing::QuadOut,
                    ),
                    active: false,
                }
            })
            .collect();
        let last = count.saturating_sub(1) as f64;
        Self {
            items,
            container_alpha: Tween::new(0.0, 1.0, now + REVEAL_DELAY, REVEAL_DUR, Easing::QuadOut),
            unlock_at: now + REVEAL_DELAY + REVEAL_STAGGER * last + REVEAL_DUR,
            unlocked: false,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn entry(&self, index: usize) -> Option<&MenuEntry> {
        self.items.get(index).map(|item| &item.entry)
    }

    pub fn active_index(&self) -> Option<usize> {
        self.items.iter().position(|item| item.active)
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.items.get(index).is_some_and(|item| item.active)
    }

    /// Cell offset of item `index` from its natural slot.
    pub fn offset_at(&self, index: usize, now: f64) -> (f64, f64) {
        let item = &self.items[index];
        (item.x.value_at(now), item.y.value_at(now))
    }

    pub fn alpha_at(&self, index: usize, now: f64) -> f64 {
        self.items[index].alpha.value_at(now)
    }

    pub fn container_alpha_at(&self, now: f64) -> f64 {
        self.container_alpha.value_at(now)
    }

    /// True exactly once, when the cascade reveal has finished.
    pub fn take_unlock(&mut self, now: f64) -> bool {
        if !self.unlocked && now >= self.unlock_at {
            self.unlocked = true;
            true
        } else {
            false
        }
    }

    /// Marks `selected` active and fans every item around it: horizontal
    /// shift grows with the distance between an item's ordinal and the
    /// selected entry's id, and vertical offsets are rebased by the
    /// selected item's current y so it lands on its natural slot while
    /// the staircase keeps its spacing.
    pub fn select(&mut self, selected: usize, now: f64) {
        let Some(chosen) = self.items.get(selected) else {
            return;
        };
        let id = chosen.entry.id;
        let anchor_y = chosen.y.value_at(now);
        tracing::debug!(index = selected, id, "menu select");
        for (i, item) in self.items.iter_mut().enumerate() {
            item.active = i == selected;
            let ord = (i + 1) as u32;
            let x_target = if ord < id {
                -(STEP_X * f64::from(id - ord))
            } else {
                STEP_X * f64::from(ord - id)
            };
            let y_target = item.y.value_at(now) - anchor_y;
            item.x = Tween::new(item.x.value_at(now), x_target, now, SELECT_DUR, Easing::QuadOut);
            item.y = Tween::new(item.y.value_at(now), y_target, now, SELECT_DUR, Easing::QuadOut);
        }
    }
}
