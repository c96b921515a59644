use std::fs;

use anyhow::{Context, Result, bail};
use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::models::{MenuEntry, Record};

/// The full static input of the app: ordered records plus the menu that
/// groups them. Menu entries may be listed explicitly in the showcase file;
/// otherwise they are derived from the records that carry a `nav_id`.
#[derive(Debug, Clone)]
pub struct Showcase {
    pub records: Vec<Record>,
    pub menu: Vec<MenuEntry>,
}

#[derive(Debug, Deserialize)]
struct ShowcaseFile {
    #[serde(default)]
    records: Vec<Record>,
    #[serde(default)]
    menu: Vec<MenuEntry>,
}

static BUILTIN: Lazy<Showcase> = Lazy::new(|| {
    let records = vec![
        record(1, "Aurora over Senja", "senja-aurora.jpg", Some(1)),
        record(2, "Mirror Fjord", "geiranger-still.jpg", Some(1)),
        record(3, "Rust Dunes at Dusk", "namib-dusk.jpg", Some(2)),
        record(4, "Knife-Edge Arete", "cuillin-arete.jpg", Some(3)),
        record(5, "Scree and Cloud", "scree-cloud.jpg", Some(3)),
        record(6, "Basalt Shore", "reynisfjara-basalt.jpg", Some(4)),
    ];
    let menu = vec![
        entry(1, "Fjords"),
        entry(2, "Dunes"),
        entry(3, "Ridges"),
        entry(4, "Shorelines"),
    ];
    Showcase { records, menu }
});

fn record(id: u32, title: &str, image: &str, nav_id: Option<u32>) -> Record {
    Record {
        id,
        title: title.to_string(),
        image: image.to_string(),
        nav_id,
    }
}

fn entry(id: u32, label: &str) -> MenuEntry {
    MenuEntry {
        id,
        label: label.to_string(),
    }
}

impl Showcase {
    /// The compiled-in demo showcase, used when no file is configured.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Loads a showcase from a TOML file (`[[records]]` tables, optional
    /// `[[menu]]` tables). `~` in the path is expanded.
    pub fn load(path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path);
        let text = fs::read_to_string(expanded.as_ref())
            .with_context(|| format!("could not read showcase file {}", expanded))?;
        let file: ShowcaseFile = toml::from_str(&text)
            .with_context(|| format!("invalid showcase file {}", expanded))?;
        Self::from_parts(file.records, file.menu)
    }

    fn from_parts(records: Vec<Record>, menu: Vec<MenuEntry>) -> Result<Self> {
        if records.is_empty() {
            bail!("showcase has no records");
        }
        let menu = if menu.is_empty() {
            derive_menu(&records)
        } else {
            menu
        };
        for (i, entry) in menu.iter().enumerate() {
            if menu[..i].iter().any(|other| other.id == entry.id) {
                bail!("duplicate menu id {}", entry.id);
            }
        }
        Ok(Showcase { records, menu })
    }
}

/// One menu entry per distinct `nav_id`, labelled by the first record that
/// carries it, ordered by id.
fn derive_menu(records: &[Record]) -> Vec<MenuEntry> {
    let mut menu: Vec<MenuEntry> = Vec::new();
    for rec in records {
        let Some(id) = rec.nav_id else { continue };
        if menu.iter().any(|entry| entry.id == id) {
            continue;
        }
        menu.push(MenuEntry {
            id,
            label: rec.title.clone(),
        });
    }
    menu.sort_by_key(|entry| entry.id);
    menu
}
