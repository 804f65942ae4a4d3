//! Display language shared by everything that renders progression labels.
//!
//! The store is an explicit handle: clone it into whatever needs labels and
//! call [`LocaleStore::subscribe`] to hear about language switches.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::info;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Swedish,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Swedish => "sv",
        }
    }

    /// Parse an ISO 639-1 code or English name, e.g. `sv`, `sv-SE`, `swedish`.
    pub fn from_code(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        let primary = normalized
            .split(['-', '_'])
            .next()
            .unwrap_or_default();

        match primary {
            "en" | "english" => Some(Language::English),
            "sv" | "swedish" | "svenska" => Some(Language::Swedish),
            _ => None,
        }
    }
}

/// Resolve a label key for a given language, echoing unknown keys back.
pub fn translate_in(language: Language, key: &str) -> &str {
    let translated = match (language, key) {
        (Language::English, "level") => "Level",
        (Language::English, "near_rank_up") => "Almost there! Rank up is close",
        (Language::English, "vip_level") => "VIP level",
        (Language::English, "sek_to_next") => "to next level",
        (Language::English, "season_rank") => "Season rank",
        (Language::English, "max_level") => "Max level reached",
        (Language::English, "member_since") => "Member for",
        (Language::Swedish, "level") => "Nivå",
        (Language::Swedish, "near_rank_up") => "Nästan där! Snart nästa rang",
        (Language::Swedish, "vip_level") => "VIP-nivå",
        (Language::Swedish, "sek_to_next") => "till nästa nivå",
        (Language::Swedish, "season_rank") => "Säsongsplacering",
        (Language::Swedish, "max_level") => "Högsta nivån uppnådd",
        (Language::Swedish, "member_since") => "Medlem i",
        _ => return key,
    };

    translated
}

#[derive(Clone, Debug)]
pub struct LocaleStore {
    sender: Arc<watch::Sender<Language>>,
}

impl Default for LocaleStore {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl LocaleStore {
    pub fn new(language: Language) -> Self {
        let (sender, _receiver) = watch::channel(language);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn language(&self) -> Language {
        *self.sender.borrow()
    }

    /// Switch language; subscribers are only woken when it actually changes.
    pub fn set_language(&self, language: Language) -> bool {
        let changed = self.sender.send_if_modified(|current| {
            if *current == language {
                return false;
            }
            *current = language;
            true
        });

        if changed {
            info!(language = language.code(), "display language changed");
        }

        changed
    }

    pub fn subscribe(&self) -> watch::Receiver<Language> {
        self.sender.subscribe()
    }

    pub fn translate<'a>(&self, key: &'a str) -> &'a str {
        translate_in(self.language(), key)
    }
}
