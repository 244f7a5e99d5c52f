use std::fmt;

use crate::config::PANEL_KEYWORDS;

/// A panel named by its `data-go-tab` keyword, resolved to its tab index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PanelKey {
    index: usize,
}

impl PanelKey {
    pub fn parse(value: &str) -> Result<Self, PanelKeyError> {
        Self::parse_in(value, PANEL_KEYWORDS)
    }

    pub fn parse_in(value: &str, keywords: &[&str]) -> Result<Self, PanelKeyError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(PanelKeyError::Empty);
        }
        keywords
            .iter()
            .position(|keyword| *keyword == trimmed)
            .map(|index| Self { index })
            .ok_or_else(|| PanelKeyError::Unknown(trimmed.to_string()))
    }

    pub fn from_index(index: usize) -> Option<Self> {
        (index < PANEL_KEYWORDS.len()).then_some(Self { index })
    }

    pub fn index(self) -> usize {
        self.index
    }

    pub fn keyword(self) -> &'static str {
        PANEL_KEYWORDS[self.index]
    }
}

impl fmt::Display for PanelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match PANEL_KEYWORDS.get(self.index) {
            Some(keyword) => f.write_str(keyword),
            None => write!(f, "panel-{}", self.index),
        }
    }
}

impl std::str::FromStr for PanelKey {
    type Err = PanelKeyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelKeyError {
    Empty,
    Unknown(String),
}

impl fmt::Display for PanelKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelKeyError::Empty => write!(f, "panel keyword is empty"),
            PanelKeyError::Unknown(value) => write!(f, "unknown panel keyword '{value}'"),
        }
    }
}

impl std::error::Error for PanelKeyError {}
