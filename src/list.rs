use crate::anim::{Easing, Tween};
use crate::models::{Parity, Record};
use crate::scroll::Span;

/// Rows a card occupies on screen.
pub const CARD_ROWS: f64 = 9.0;
/// Blank rows between consecutive cards.
pub const CARD_GAP: f64 = 1.0;

const FADE_DELAY: f64 = 1.0;
const FADE_DUR: f64 = 0.5;

/// The scrollable content column: one card per record, in record order,
/// hidden until the whole column fades in shortly after startup.
#[derive(Debug)]
pub struct ContentList {
    records: Vec<Record>,
    parity: Parity,
    fade: Tween,
}

impl ContentList {
    pub fn new(records: Vec<Record>, now: f64) -> Self {
        let parity = Parity::of(records.len());
        Self {
            records,
            parity,
            fade: Tween::new(0.0, 1.0, now + FADE_DELAY, FADE_DUR, Easing::QuadOut),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn parity(&self) -> Parity {
        self.parity
    }

    /// Column opacity; cards stay invisible until this reaches past zero.
    pub fn alpha_at(&self, now: f64) -> f64 {
        self.fade.value_at(now)
    }

    /// Vertical extent of card `index` in content coordinates. The gap
    /// below a card does not belong to it.
    pub fn span(&self, index: usize) -> Span {
        Span::new(index as f64 * (CARD_ROWS + CARD_GAP), CARD_ROWS)
    }

    pub fn spans(&self) -> Vec<Span> {
        (0..self.records.len()).map(|i| self.span(i)).collect()
    }

    /// Total height of the column, one gap of breathing room at the end.
    pub fn content_height(&self) -> f64 {
        self.records.len() as f64 * (CARD_ROWS + CARD_GAP)
    }

    pub fn nav_of(&self, index: usize) -> Option<u32> {
        self.records.get(index).and_then(|rec| rec.nav_id)
    }

    /// First card linked to the given navigation id.
    pub fn find_by_nav(&self, nav_id: u32) -> Option<usize> {
        self.records.iter().position(|rec| rec.nav_id == Some(nav_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(navs: &[Option<u32>]) -> Vec<Record> {
        navs.iter()
            .enumerate()
            .map(|(i, nav)| Record {
                id: i as u32 + 1,
                title: format!("card {}", i + 1),
                image: format!("card-{}.jpg", i + 1),
                nav_id: *nav,
            })
            .collect()
    }

    #[test]
    fn one_card_per_record() {
        let list = ContentList::new(records(&[Some(1), None, Some(2)]), 0.0);
        assert_eq!(list.len(), 3);
        assert_eq!(list.spans().len(), 3);
        assert_eq!(list.parity(), Parity::Odd);
    }

    #[test]
    fn cards_stack_with_a_gap() {
        let list = ContentList::new(records(&[Some(1), Some(1)]), 0.0);
        assert_eq!(list.span(0), Span::new(0.0, CARD_ROWS));
        assert_eq!(list.span(1), Span::new(CARD_ROWS + CARD_GAP, CARD_ROWS));
        assert_eq!(list.content_height(), 2.0 * (CARD_ROWS + CARD_GAP));
    }

    #[test]
    fn fade_starts_after_the_delay() {
        let list = ContentList::new(records(&[Some(1)]), 0.0);
        assert_eq!(list.alpha_at(0.9), 0.0);
        assert!(list.alpha_at(1.2) > 0.0);
        assert_eq!(list.alpha_at(1.5), 1.0);
    }

    #[test]
    fn nav_lookup_finds_the_first_match() {
        let list = ContentList::new(records(&[None, Some(3), Some(3)]), 0.0);
        assert_eq!(list.find_by_nav(3), Some(1));
        assert_eq!(list.find_by_nav(9), None);
        assert_eq!(list.nav_of(0), None);
        assert_eq!(list.nav_of(2), Some(3));
    }
}
