use std::fmt;

use crate::config::{DEFAULT_LANG, LANG_STORAGE_KEY, TITLE_EN, TITLE_ES};
use crate::store::PrefStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lang {
    Es,
    En,
}

impl Default for Lang {
    fn default() -> Self {
        DEFAULT_LANG.parse().unwrap_or(Lang::Es)
    }
}

impl Lang {
    pub fn code(self) -> &'static str {
        match self {
            Lang::Es => "es",
            Lang::En => "en",
        }
    }

    /// Attribute carrying this language's text, e.g. `data-es`.
    pub fn attr(self) -> &'static str {
        match self {
            Lang::Es => "data-es",
            Lang::En => "data-en",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Lang::Es => Lang::En,
            Lang::En => Lang::Es,
        }
    }

    pub fn document_title(self) -> &'static str {
        match self {
            Lang::Es => TITLE_ES,
            Lang::En => TITLE_EN,
        }
    }

    /// Label shown on the contact button after a submit.
    pub fn sent_label(self) -> &'static str {
        match self {
            Lang::Es => "Enviado",
            Lang::En => "Sent",
        }
    }

    pub fn copied_label(self) -> &'static str {
        match self {
            Lang::Es => "Copiado",
            Lang::En => "Copied",
        }
    }

    /// Code shown on the toggle button: the language a click switches to.
    pub fn toggle_label(self) -> &'static str {
        self.toggled().code_upper()
    }

    fn code_upper(self) -> &'static str {
        match self {
            Lang::Es => "ES",
            Lang::En => "EN",
        }
    }

    pub fn load(store: &impl PrefStore) -> Self {
        store
            .get(LANG_STORAGE_KEY)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }

    pub fn save(self, store: &mut impl PrefStore) {
        store.set(LANG_STORAGE_KEY, self.code());
    }
}

/// Text to write into a bilingual element, or `None` to leave it alone.
/// Only leaf elements are swapped so nested markup survives.
pub fn leaf_text<'a>(child_elements: u32, value: Option<&'a str>) -> Option<&'a str> {
    if child_elements > 0 {
        return None;
    }
    value.filter(|text| !text.is_empty())
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Lang {
    type Err = ParseLangError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "es" => Ok(Lang::Es),
            "en" => Ok(Lang::En),
            other => Err(ParseLangError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLangError(String);

impl fmt::Display for ParseLangError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported language '{}'", self.0)
    }
}

impl std::error::Error for ParseLangError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn toggle_round_trips() {
        assert_eq!(Lang::Es.toggled(), Lang::En);
        assert_eq!(Lang::En.toggled().toggled(), Lang::En);
        assert_eq!(Lang::Es.toggle_label(), "EN");
    }

    #[test]
    fn invalid_stored_value_falls_back_to_default() {
        let mut store = MemoryStore::new();
        store.set(LANG_STORAGE_KEY, "fr");
        assert_eq!(Lang::load(&store), Lang::default());
        Lang::En.save(&mut store);
        assert_eq!(Lang::load(&store), Lang::En);
    }

    #[test]
    fn leaf_text_skips_elements_with_children() {
        assert_eq!(leaf_text(0, Some("Hola")), Some("Hola"));
        assert_eq!(leaf_text(2, Some("Hola")), None);
        assert_eq!(leaf_text(0, Some("")), None);
        assert_eq!(leaf_text(0, None), None);
    }
}
