use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::DomainError;

/// Screen currently shown by the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppMode {
    #[default]
    Imagine,
    Gallery,
    About,
    Terms,
    Privacy,
    Contact,
}

impl AppMode {
    pub const ALL: [AppMode; 6] = [
        AppMode::Imagine,
        AppMode::Gallery,
        AppMode::About,
        AppMode::Terms,
        AppMode::Privacy,
        AppMode::Contact,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppMode::Imagine => "imagine",
            AppMode::Gallery => "gallery",
            AppMode::About => "about",
            AppMode::Terms => "terms",
            AppMode::Privacy => "privacy",
            AppMode::Contact => "contact",
        }
    }
}

impl std::fmt::Display for AppMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AppMode::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| DomainError::InvariantViolation(format!("Unknown view mode: {}", s)))
    }
}

/// Interface language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
    Fr,
    De,
    Zh,
    Ja,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::En,
        Language::Es,
        Language::Fr,
        Language::De,
        Language::Zh,
        Language::Ja,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::De => "de",
            Language::Zh => "zh",
            Language::Ja => "ja",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        Language::ALL
            .into_iter()
            .find(|l| l.code() == code)
            .ok_or_else(|| DomainError::InvariantViolation(format!("Unsupported language: {}", s)))
    }
}

/// What the generator writes for a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    #[default]
    Story,
    Song,
}

impl GenerationMode {
    pub const ALL: [GenerationMode; 2] = [GenerationMode::Story, GenerationMode::Song];

    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationMode::Story => "story",
            GenerationMode::Song => "song",
        }
    }
}

impl std::fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerationMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        GenerationMode::ALL
            .into_iter()
            .find(|m| m.as_str() == name)
            .ok_or_else(|| {
                DomainError::InvariantViolation(format!("Unknown generation mode: {}", s))
            })
    }
}

/// Explicit front-end state: which screen, which language, story or song,
/// and whether the mobile menu overlay is open. Owned by the application state and only
/// changed through these methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewState {
    pub mode: AppMode,
    pub language: Language,
    pub generation_mode: GenerationMode,
    pub mobile_menu_open: bool,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switching screens always dismisses the mobile menu
    pub fn select_mode(&mut self, mode: AppMode) {
        self.mode = mode;
        self.mobile_menu_open = false;
    }

    pub fn select_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn select_generation_mode(&mut self, generation_mode: GenerationMode) {
        self.generation_mode = generation_mode;
    }

    pub fn open_mobile_menu(&mut self) {
        self.mobile_menu_open = true;
    }

    pub fn close_mobile_menu(&mut self) {
        self.mobile_menu_open = false;
    }

    pub fn toggle_mobile_menu(&mut self) -> bool {
        self.mobile_menu_open = !self.mobile_menu_open;
        self.mobile_menu_open
    }
}
