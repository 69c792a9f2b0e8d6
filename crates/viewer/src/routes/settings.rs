//! Preference toggles, stored in the cookie session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, response::Redirect};
use serde::Deserialize;

use super::Page;
use crate::error::AppError;
use crate::filters;
use crate::middleware::{Visitor, push_flash, save_preferences};
use crate::models::{Flash, PreferenceSection, Preferences};

const SETTINGS_PATH: &str = "/settings";

#[derive(Template, WebTemplate)]
#[template(path = "settings.html")]
pub struct SettingsTemplate {
    pub page: Page,
    pub sections: Vec<PreferenceSection>,
}

/// Checkbox form: a box is present only when ticked.
#[derive(Debug, Default, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct SettingsForm {
    #[serde(default, deserialize_with = "checkbox")]
    pub notifications: bool,
    #[serde(default, deserialize_with = "checkbox")]
    pub breaking_news: bool,
    #[serde(default, deserialize_with = "checkbox")]
    pub live_alerts: bool,
    #[serde(default, deserialize_with = "checkbox")]
    pub autoplay: bool,
    #[serde(default, deserialize_with = "checkbox")]
    pub high_quality: bool,
    #[serde(default, deserialize_with = "checkbox")]
    pub dark_mode: bool,
    #[serde(default, deserialize_with = "checkbox")]
    pub data_saver: bool,
    #[serde(default, deserialize_with = "checkbox")]
    pub analytics: bool,
}

fn checkbox<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = String::deserialize(deserializer)?;
    Ok(matches!(value.as_str(), "on" | "true" | "1"))
}

impl From<SettingsForm> for Preferences {
    fn from(form: SettingsForm) -> Self {
        Self {
            notifications: form.notifications,
            breaking_news: form.breaking_news,
            live_alerts: form.live_alerts,
            autoplay: form.autoplay,
            high_quality: form.high_quality,
            dark_mode: form.dark_mode,
            data_saver: form.data_saver,
            analytics: form.analytics,
        }
    }
}

/// GET /settings
pub async fn index(visitor: Visitor) -> Result<SettingsTemplate, AppError> {
    let page = Page::load(&visitor, SETTINGS_PATH).await?;
    Ok(SettingsTemplate {
        sections: page.preferences.sections(),
        page,
    })
}

/// POST /settings
pub async fn save(visitor: Visitor, Form(form): Form<SettingsForm>) -> Result<Redirect, AppError> {
    let preferences = Preferences::from(form);
    save_preferences(&visitor.session, preferences).await?;
    tracing::debug!(?preferences, "Preferences saved");
    push_flash(
        &visitor.session,
        Flash::success("Paramètres enregistrés", "Vos préférences ont été mises à jour."),
    )
    .await?;
    Ok(Redirect::to(SETTINGS_PATH))
}

