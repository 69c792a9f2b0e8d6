//! Session-held viewer state: flash banners and app preferences.

use serde::{Deserialize, Serialize};

/// Severity of a flash banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashKind {
    Success,
    Error,
}

impl FlashKind {
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self {
            Self::Success => "toast toast-success",
            Self::Error => "toast toast-error",
        }
    }
}

/// One-shot message shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub title: String,
    pub message: String,
}

impl Flash {
    #[must_use]
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            title: "Erreur".to_string(),
            message: message.into(),
        }
    }
}

/// App preferences, kept per browser session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Preferences {
    pub notifications: bool,
    pub breaking_news: bool,
    pub live_alerts: bool,
    pub autoplay: bool,
    pub high_quality: bool,
    pub dark_mode: bool,
    pub data_saver: bool,
    pub analytics: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            notifications: true,
            breaking_news: true,
            live_alerts: false,
            autoplay: true,
            high_quality: false,
            dark_mode: false,
            data_saver: true,
            analytics: true,
        }
    }
}

/// One toggle on the settings screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preference {
    /// Form field name.
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub enabled: bool,
}

/// A titled group of toggles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceSection {
    pub title: &'static str,
    pub items: Vec<Preference>,
}

const fn toggle(
    key: &'static str,
    label: &'static str,
    description: &'static str,
    enabled: bool,
) -> Preference {
    Preference {
        key,
        label,
        description,
        enabled,
    }
}

impl Preferences {
    /// The settings screen, grouped as displayed.
    #[must_use]
    pub fn sections(&self) -> Vec<PreferenceSection> {
        vec![
            PreferenceSection {
                title: "Notifications",
                items: vec![
                    toggle(
                        "notifications",
                        "Notifications générales",
                        "Recevoir les notifications de l'app",
                        self.notifications,
                    ),
                    toggle(
                        "breaking_news",
                        "Breaking News",
                        "Alertes pour les actualités urgentes",
                        self.breaking_news,
                    ),
                    toggle(
                        "live_alerts",
                        "Alertes Live",
                        "Notifications lors des diffusions live",
                        self.live_alerts,
                    ),
                ],
            },
            PreferenceSection {
                title: "Lecture Vidéo",
                items: vec![
                    toggle(
                        "autoplay",
                        "Lecture automatique",
                        "Lancer automatiquement les vidéos",
                        self.autoplay,
                    ),
                    toggle(
                        "high_quality",
                        "Haute qualité",
                        "Privilégier la qualité HD",
                        self.high_quality,
                    ),
                ],
            },
            PreferenceSection {
                title: "Application",
                items: vec![
                    toggle(
                        "dark_mode",
                        "Mode sombre",
                        "Interface en mode sombre",
                        self.dark_mode,
                    ),
                    toggle(
                        "data_saver",
                        "Économie de données",
                        "Réduire la consommation de données",
                        self.data_saver,
                    ),
                    toggle(
                        "analytics",
                        "Données d'usage",
                        "Aider à améliorer l'app",
                        self.analytics,
                    ),
                ],
            },
        ]
    }
}

/// Session keys for viewer state.
pub mod keys {
    /// Key for the pending flash banner.
    pub const FLASH: &str = "flash";
    /// Key for the stored preferences.
    pub const PREFERENCES: &str = "preferences";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preferences_match_sections() {
        let sections = Preferences::default().sections();
        assert_eq!(
            sections.iter().map(|s| s.title).collect::<Vec<_>>(),
            ["Notifications", "Lecture Vidéo", "Application"]
        );
        let enabled: Vec<&str> = sections
            .iter()
            .flat_map(|s| s.items.iter())
            .filter(|p| p.enabled)
            .map(|p| p.key)
            .collect();
        assert_eq!(
            enabled,
            ["notifications", "breaking_news", "autoplay", "data_saver", "analytics"]
        );
    }
}
