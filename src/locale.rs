//! Display locales
//!
//! The finder is used by locals and visitors, so labels come in German
//! (default), Korean and English.

use crate::coord::distance::WalkingTime;
use serde::{Deserialize, Serialize};

/// Supported display locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    De,
    Ko,
    En,
}

impl Locale {
    /// Two-letter language code
    pub fn code(&self) -> &'static str {
        match self {
            Self::De => "de",
            Self::Ko => "ko",
            Self::En => "en",
        }
    }

    /// Name of the language in that language
    pub fn native_name(&self) -> &'static str {
        match self {
            Self::De => "Deutsch",
            Self::Ko => "한국어",
            Self::En => "English",
        }
    }

    /// Walking-time label in this locale
    pub fn walking_label(&self, time: WalkingTime) -> String {
        let (h, m) = (time.hours(), time.remaining_minutes());
        match (self, time.has_hours()) {
            (Self::Ko, false) => format!("도보 {}분", time.total_minutes),
            (Self::Ko, true) => format!("도보 {}시간 {}분", h, m),
            (Self::De, false) => format!("{} Min. zu Fuß", time.total_minutes),
            (Self::De, true) => format!("{} Std. {} Min. zu Fuß", h, m),
            (Self::En, false) => format!("{} min walk", time.total_minutes),
            (Self::En, true) => format!("{} h {} min walk", h, m),
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "de" | "de-de" | "german" => Ok(Self::De),
            "ko" | "ko-kr" | "korean" => Ok(Self::Ko),
            "en" | "en-us" | "en-gb" | "english" => Ok(Self::En),
            _ => Err(format!("Unknown locale: {}", s)),
        }
    }
}

/// List all supported locales, default first
pub fn available_locales() -> Vec<Locale> {
    vec![Locale::De, Locale::Ko, Locale::En]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_locale() {
        assert_eq!(Locale::default(), Locale::De);
        assert_eq!(available_locales()[0], Locale::default());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("ko".parse::<Locale>().unwrap(), Locale::Ko);
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("de-DE".parse::<Locale>().unwrap(), Locale::De);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_walking_labels() {
        let short = WalkingTime { total_minutes: 15 };
        let long = WalkingTime { total_minutes: 75 };

        assert_eq!(Locale::Ko.walking_label(short), "도보 15분");
        assert_eq!(Locale::Ko.walking_label(long), "도보 1시간 15분");
        assert_eq!(Locale::De.walking_label(short), "15 Min. zu Fuß");
        assert_eq!(Locale::De.walking_label(long), "1 Std. 15 Min. zu Fuß");
        assert_eq!(Locale::En.walking_label(short), "15 min walk");
        assert_eq!(Locale::En.walking_label(long), "1 h 15 min walk");
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Locale::Ko).unwrap(), "\"ko\"");
        let parsed: Locale = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(parsed, Locale::En);
    }
}
