//! UI / prompt language selection.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    #[default]
    Vi,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Vi => "vi",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        locale: Locale,
    }

    #[test]
    fn test_locale_deserializes_lowercase() {
        let w: Wrapper = toml::from_str(r#"locale = "en""#).unwrap();
        assert_eq!(w.locale, Locale::En);
        assert_eq!(Locale::default().as_str(), "vi");
    }
}
