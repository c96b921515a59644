use serde::Deserialize;

/// One showcase entry: immutable static data, defined once and never mutated.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Record {
    pub id: u32,
    pub title: String,
    pub image: String,
    /// Links the record to a navigation entry; records without one are
    /// shown but never drive menu selection.
    #[serde(default)]
    pub nav_id: Option<u32>,
}

/// One side-menu entry. Distinct ids; a group of records may share one.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct MenuEntry {
    pub id: u32,
    pub label: String,
}

/// Styling variant of the content column, chosen by record count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    pub fn of(count: usize) -> Self {
        if count % 2 == 0 { Parity::Even } else { Parity::Odd }
    }
}
