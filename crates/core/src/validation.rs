//! Client-side form validation.
//!
//! Each form has an `*Input` struct holding the raw submitted strings. Its
//! `validate` method either produces the typed payload sent to the backend
//! or a [`FieldErrors`] map of French messages keyed by field name. Forms
//! that fail validation never reach the network.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::format::parse_timestamp;
use crate::models::{
    AdPackage, AdvertisementRequest, ContactMessage, Dimensions, LoginCredentials, NewAdOrder,
    NewAdSpace, NewAdminUser, NewClient, NewComment, Registration, ViewerUser,
};
use crate::types::{AdSpaceId, AdminRole, ClientId, ContentType, Email, Money, Phone, VideoId};

pub const REQUIRED: &str = "Ce champ est requis";
pub const INVALID_EMAIL: &str = "Adresse email invalide";
pub const INVALID_PHONE: &str = "Numéro de téléphone invalide (format: +226 XX XX XX XX)";
pub const INVALID_AMOUNT: &str = "Montant invalide";
pub const INVALID_NUMBER: &str = "Nombre invalide";
pub const INVALID_DATE: &str = "Date invalide";
pub const INVALID_CHOICE: &str = "Valeur non reconnue";
pub const END_BEFORE_START: &str = "La date de fin doit être après la date de début";
pub const PASSWORD_TOO_SHORT: &str = "Le mot de passe doit contenir au moins 6 caractères";
pub const PASSWORD_MISMATCH: &str = "Les mots de passe ne correspondent pas";
pub const USERNAME_REQUIRED: &str = "Le nom d'utilisateur est requis";
pub const PASSWORD_REQUIRED: &str = "Le mot de passe est requis";
pub const COMMENT_TOO_LONG: &str = "Le commentaire ne doit pas dépasser 500 caractères";
pub const NAME_TOO_LONG: &str = "Le nom ne doit pas dépasser 30 caractères";
/// Summary shown above the advertising request form.
pub const MISSING_MANDATORY_FIELDS: &str = "Veuillez remplir tous les champs obligatoires";
/// Summary shown above the registration form.
pub const MISSING_FIELDS: &str = "Veuillez remplir tous les champs";

/// Minimum password length for new accounts.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Longest accepted comment, in characters.
pub const MAX_COMMENT_LENGTH: usize = 500;
/// Longest accepted display name on a comment.
pub const MAX_COMMENTER_NAME_LENGTH: usize = 30;
/// Display name used when an anonymous viewer leaves it blank.
pub const ANONYMOUS_COMMENTER: &str = "Téléspectateur LCA TV";

/// Validation messages keyed by form field name.
///
/// Only the first message recorded for a field is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `field` unless it already has one.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    /// Message for a field, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Fields in alphabetical order with their messages.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// `Ok(build())` when no error was recorded.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one field failed.
    pub fn finish<T>(self, build: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() { Ok(build()) } else { Err(self) }
    }

    /// Record [`REQUIRED`] when `value` is blank; returns the trimmed value.
    fn required<'a>(&mut self, field: &'static str, value: &'a str) -> &'a str {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.add(field, REQUIRED);
        }
        trimmed
    }

    fn email(&mut self, field: &'static str, value: &str) -> String {
        let value = self.required(field, value);
        if !value.is_empty() && !Email::is_valid(value) {
            self.add(field, INVALID_EMAIL);
        }
        value.to_string()
    }

    fn phone(&mut self, field: &'static str, value: &str) -> String {
        let value = self.required(field, value);
        if !value.is_empty() && !Phone::is_valid(value) {
            self.add(field, INVALID_PHONE);
        }
        value.to_string()
    }

    fn amount(&mut self, field: &'static str, value: &str) -> Money {
        let value = self.required(field, value);
        if value.is_empty() {
            return Money::ZERO;
        }
        match parse_amount(value) {
            Some(amount) if amount > Decimal::ZERO => Money::new(amount),
            _ => {
                self.add(field, INVALID_AMOUNT);
                Money::ZERO
            }
        }
    }

    fn positive_int(&mut self, field: &'static str, value: &str) -> u32 {
        let value = self.required(field, value);
        if value.is_empty() {
            return 0;
        }
        match value.parse::<u32>() {
            Ok(n) if n > 0 => n,
            _ => {
                self.add(field, INVALID_NUMBER);
                0
            }
        }
    }

    fn date(&mut self, field: &'static str, value: &str) -> Option<DateTime<Utc>> {
        let value = self.required(field, value);
        if value.is_empty() {
            return None;
        }
        let parsed = parse_form_date(value);
        if parsed.is_none() {
            self.add(field, INVALID_DATE);
        }
        parsed
    }

    fn choice<T: std::str::FromStr>(&mut self, field: &'static str, value: &str) -> Option<T> {
        let value = self.required(field, value);
        if value.is_empty() {
            return None;
        }
        let parsed = value.parse().ok();
        if parsed.is_none() {
            self.add(field, INVALID_CHOICE);
        }
        parsed
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Parse an amount typed by a user: spaces as thousand separators and a
/// comma as decimal separator are accepted.
#[must_use]
pub fn parse_amount(value: &str) -> Option<Decimal> {
    let cleaned: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{202f}')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    cleaned.parse().ok()
}

/// Parse an HTML `date` or `datetime-local` input value.
#[must_use]
pub fn parse_form_date(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value.trim(), "%Y-%m-%dT%H:%M")
        .map(|naive| naive.and_utc())
        .ok()
        .or_else(|| parse_timestamp(value))
}

fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

// =============================================================================
// Dashboard forms
// =============================================================================

/// Raw dashboard login form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginInput {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl LoginInput {
    /// # Errors
    ///
    /// Returns the per-field messages when a field is blank.
    pub fn validate(&self) -> Result<LoginCredentials, FieldErrors> {
        let mut errors = FieldErrors::new();
        let username = self.username.trim();
        if username.is_empty() {
            errors.add("username", USERNAME_REQUIRED);
        }
        if self.password.is_empty() {
            errors.add("password", PASSWORD_REQUIRED);
        }
        errors.finish(|| LoginCredentials {
            username: username.to_string(),
            password: self.password.clone(),
        })
    }
}

/// Raw client form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientInput {
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub contact_person: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: Option<String>,
}

impl ClientInput {
    /// # Errors
    ///
    /// Returns the per-field messages for blank or malformed fields.
    pub fn validate(&self) -> Result<NewClient, FieldErrors> {
        let mut errors = FieldErrors::new();
        let company_name = errors.required("company_name", &self.company_name).to_string();
        let contact_person = errors
            .required("contact_person", &self.contact_person)
            .to_string();
        let email = errors.email("email", &self.email);
        let phone = errors.phone("phone", &self.phone);
        errors.finish(|| NewClient {
            company_name,
            contact_person,
            email,
            phone,
            address: optional(self.address.as_deref()),
        })
    }
}

/// Raw ad space form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdSpaceInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub width: String,
    #[serde(default)]
    pub height: String,
    #[serde(default)]
    pub price_per_day: String,
    #[serde(default)]
    pub price_per_week: String,
    #[serde(default)]
    pub price_per_month: String,
}

impl AdSpaceInput {
    /// # Errors
    ///
    /// Returns the per-field messages for blank or non-positive values.
    pub fn validate(&self) -> Result<NewAdSpace, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = errors.required("name", &self.name).to_string();
        let position = errors.required("position", &self.position).to_string();
        let width = errors.positive_int("width", &self.width);
        let height = errors.positive_int("height", &self.height);
        let price_per_day = errors.amount("price_per_day", &self.price_per_day);
        let price_per_week = errors.amount("price_per_week", &self.price_per_week);
        let price_per_month = errors.amount("price_per_month", &self.price_per_month);
        errors.finish(|| NewAdSpace {
            name,
            position,
            dimensions: Dimensions { width, height },
            price_per_day,
            price_per_week,
            price_per_month,
        })
    }
}

/// Raw order creation form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderInput {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub ad_space_id: String,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub content_url: Option<String>,
    #[serde(default)]
    pub content_html: Option<String>,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

impl OrderInput {
    /// Validate and build the order payload.
    ///
    /// Image and video orders need a content URL; HTML orders need markup.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages for every missing or invalid field.
    pub fn validate(&self) -> Result<NewAdOrder, FieldErrors> {
        let mut errors = FieldErrors::new();
        let client_id = errors.required("client_id", &self.client_id).to_string();
        let ad_space_id = errors.required("ad_space_id", &self.ad_space_id).to_string();
        let content_type: Option<ContentType> = errors.choice("content_type", &self.content_type);
        let start = errors.date("start_date", &self.start_date);
        let end = errors.date("end_date", &self.end_date);

        let content_url = optional(self.content_url.as_deref());
        let content_html = optional(self.content_html.as_deref());
        match content_type {
            Some(ContentType::Html) if content_html.is_none() => {
                errors.add("content_html", REQUIRED);
            }
            Some(ContentType::Image | ContentType::Video) if content_url.is_none() => {
                errors.add("content_url", REQUIRED);
            }
            _ => {}
        }

        if let (Some(start), Some(end)) = (start, end) {
            if end <= start {
                errors.add("end_date", END_BEFORE_START);
            }
        }

        match (content_type, start, end) {
            (Some(content_type), Some(start_date), Some(end_date)) => errors.finish(|| NewAdOrder {
                client_id: ClientId::new(client_id),
                ad_space_id: AdSpaceId::new(ad_space_id),
                content_type,
                content_url,
                content_html,
                start_date,
                end_date,
            }),
            _ => Err(errors),
        }
    }
}

/// Raw admin user creation form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminUserInput {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub role: String,
}

impl AdminUserInput {
    /// # Errors
    ///
    /// Returns the per-field messages for blank or malformed fields.
    pub fn validate(&self) -> Result<NewAdminUser, FieldErrors> {
        let mut errors = FieldErrors::new();
        let username = errors.required("username", &self.username).to_string();
        let email = errors.email("email", &self.email);
        let full_name = errors.required("full_name", &self.full_name).to_string();
        check_password(&mut errors, &self.password);
        let role: Option<AdminRole> = if self.role.trim().is_empty() {
            Some(AdminRole::default())
        } else {
            errors.choice("role", &self.role)
        };
        match role {
            Some(role) => errors.finish(|| NewAdminUser {
                username,
                email,
                password: self.password.clone(),
                full_name,
                role,
            }),
            None => Err(errors),
        }
    }
}

fn check_password(errors: &mut FieldErrors, password: &str) {
    if password.is_empty() {
        errors.add("password", REQUIRED);
    } else if password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.add("password", PASSWORD_TOO_SHORT);
    }
}

// =============================================================================
// Viewer forms
// =============================================================================

/// Raw contact form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl ContactInput {
    /// # Errors
    ///
    /// Returns the per-field messages; every field is required.
    pub fn validate(&self) -> Result<ContactMessage, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = errors.required("name", &self.name).to_string();
        let email = errors.email("email", &self.email);
        let subject = errors.required("subject", &self.subject).to_string();
        let message = errors.required("message", &self.message).to_string();
        errors.finish(|| ContactMessage {
            name,
            email,
            subject,
            message,
        })
    }
}

/// Raw advertising request form from the viewer app.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvertisingInput {
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub contact_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub ad_type: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub target_audience: String,
    #[serde(default)]
    pub start_date: String,
}

/// Duration assumed when the request form leaves it blank.
pub const DEFAULT_REQUEST_DAYS: u32 = 30;

impl AdvertisingInput {
    /// Validate the request and build the backend payload.
    ///
    /// Company, contact, email and ad type are mandatory. Duration and
    /// budget are optional; a blank budget defaults to the package price.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages for missing or malformed fields.
    pub fn validate(&self) -> Result<AdvertisementRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        let company = errors.required("company_name", &self.company_name).to_string();
        let contact = errors.required("contact_name", &self.contact_name).to_string();
        errors.email("email", &self.email);
        let package = errors.choice::<AdPackage>("ad_type", &self.ad_type);

        let phone = self.phone.trim();
        if !phone.is_empty() && !Phone::is_valid(phone) {
            errors.add("phone", INVALID_PHONE);
        }

        let duration_days = match self.duration.trim() {
            "" => DEFAULT_REQUEST_DAYS,
            raw => raw.parse::<u32>().ok().filter(|d| *d > 0).unwrap_or_else(|| {
                errors.add("duration", INVALID_NUMBER);
                0
            }),
        };
        let budget = match self.budget.trim() {
            "" => None,
            raw => parse_amount(raw)
                .filter(|b| *b > Decimal::ZERO)
                .map(Money::new)
                .or_else(|| {
                    errors.add("budget", INVALID_AMOUNT);
                    None
                }),
        };
        if !self.start_date.trim().is_empty() && parse_form_date(&self.start_date).is_none() {
            errors.add("start_date", INVALID_DATE);
        }

        let Some(ad_type) = package else {
            return Err(errors);
        };
        let mut description = self.description.trim().to_string();
        if !self.start_date.trim().is_empty() {
            description = format!("{description}\nDébut souhaité: {}", self.start_date.trim());
        }
        errors.finish(|| AdvertisementRequest {
            title: format!("{company} - {}", ad_type.label()),
            description: format!("{description}\nContact: {contact}").trim().to_string(),
            duration_days,
            budget: budget.unwrap_or_else(|| ad_type.price()),
            target_audience: self.target_audience.trim().to_string(),
            ad_type,
            content_url: None,
        })
    }

    /// Summary line for the form header when validation fails on a
    /// mandatory field.
    #[must_use]
    pub fn summary(errors: &FieldErrors) -> Option<&'static str> {
        ["company_name", "contact_name", "email", "ad_type"]
            .iter()
            .any(|f| errors.get(f) == Some(REQUIRED))
            .then_some(MISSING_MANDATORY_FIELDS)
    }
}

/// Raw comment form under a video.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentInput {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub user_name: String,
}

impl CommentInput {
    /// Validate a comment for `video_id`.
    ///
    /// A blank name falls back to the signed-in viewer's full name, then to
    /// [`ANONYMOUS_COMMENTER`]. The signed-in viewer's email is attached.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages for a blank or oversized comment and
    /// an oversized name.
    pub fn validate(
        &self,
        video_id: &VideoId,
        viewer: Option<&ViewerUser>,
    ) -> Result<NewComment, FieldErrors> {
        let mut errors = FieldErrors::new();
        let content = errors.required("content", &self.content).to_string();
        if content.chars().count() > MAX_COMMENT_LENGTH {
            errors.add("content", COMMENT_TOO_LONG);
        }
        let user_name = optional(Some(self.user_name.as_str()))
            .or_else(|| viewer.map(|v| v.full_name.trim().to_string()))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| ANONYMOUS_COMMENTER.to_string());
        if user_name.chars().count() > MAX_COMMENTER_NAME_LENGTH {
            errors.add("user_name", NAME_TOO_LONG);
        }
        errors.finish(|| NewComment {
            video_id: video_id.clone(),
            content,
            user_name,
            user_email: viewer.map(|v| v.email.clone()),
        })
    }
}

/// Raw viewer registration form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationInput {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl RegistrationInput {
    /// # Errors
    ///
    /// Returns the per-field messages for blank fields, a short password or
    /// a confirmation mismatch.
    pub fn validate(&self) -> Result<Registration, FieldErrors> {
        let mut errors = FieldErrors::new();
        let username = errors.required("username", &self.username).to_string();
        let email = errors.email("email", &self.email);
        let full_name = errors.required("full_name", &self.full_name).to_string();
        check_password(&mut errors, &self.password);
        if self.confirm_password.is_empty() {
            errors.add("confirm_password", REQUIRED);
        } else if self.confirm_password != self.password {
            errors.add("confirm_password", PASSWORD_MISMATCH);
        }
        let phone = optional(self.phone.as_deref());
        if phone.as_deref().is_some_and(|p| !Phone::is_valid(p)) {
            errors.add("phone", INVALID_PHONE);
        }
        errors.finish(|| Registration {
            username,
            email,
            password: self.password.clone(),
            full_name,
            phone,
        })
    }

    /// Summary line for the form header when a field was left blank.
    #[must_use]
    pub fn summary(errors: &FieldErrors) -> Option<&'static str> {
        errors
            .iter()
            .any(|(_, message)| message == REQUIRED)
            .then_some(MISSING_FIELDS)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_order_form_flags_every_required_field() {
        let errors = OrderInput::default().validate().unwrap_err();
        for field in ["client_id", "ad_space_id", "content_type", "start_date", "end_date"] {
            assert_eq!(errors.get(field), Some(REQUIRED), "{field}");
        }
    }

    #[test]
    fn test_order_end_must_follow_start() {
        let input = OrderInput {
            client_id: "c1".to_string(),
            ad_space_id: "s1".to_string(),
            content_type: "image".to_string(),
            content_url: Some("https://cdn.lcatv.bf/b.png".to_string()),
            content_html: None,
            start_date: "2024-05-10".to_string(),
            end_date: "2024-05-01".to_string(),
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.get("end_date"), Some(END_BEFORE_START));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_valid_order() {
        let input = OrderInput {
            client_id: "c1".to_string(),
            ad_space_id: "s1".to_string(),
            content_type: "html".to_string(),
            content_url: Some("  ".to_string()),
            content_html: Some("<b>Promo</b>".to_string()),
            start_date: "2024-05-01T08:00".to_string(),
            end_date: "2024-05-15".to_string(),
        };
        let order = input.validate().unwrap();
        assert_eq!(order.content_type, ContentType::Html);
        assert!(order.content_url.is_none());
        assert_eq!(order.duration_days(), 13);
    }

    #[test]
    fn test_order_requires_content_for_type() {
        let input = OrderInput {
            client_id: "c1".to_string(),
            ad_space_id: "s1".to_string(),
            content_type: "video".to_string(),
            start_date: "2024-05-01".to_string(),
            end_date: "2024-05-02".to_string(),
            ..Default::default()
        };
        assert_eq!(input.validate().unwrap_err().get("content_url"), Some(REQUIRED));
    }

    #[test]
    fn test_client_form_checks_email_and_phone() {
        let input = ClientInput {
            company_name: "SONABEL".to_string(),
            contact_person: "Mariam Sawadogo".to_string(),
            email: "mariam@sonabel".to_string(),
            phone: "50 12 34 56".to_string(),
            address: Some(String::new()),
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.get("email"), Some(INVALID_EMAIL));
        assert_eq!(errors.get("phone"), Some(INVALID_PHONE));

        let ok = ClientInput {
            email: "mariam@sonabel.bf".to_string(),
            phone: "+226 70 12 34 56".to_string(),
            ..input
        }
        .validate()
        .unwrap();
        assert!(ok.address.is_none());
    }

    #[test]
    fn test_ad_space_amounts() {
        let input = AdSpaceInput {
            name: "Pavé latéral".to_string(),
            position: "sidebar".to_string(),
            width: "300".to_string(),
            height: "250".to_string(),
            price_per_day: "15 000".to_string(),
            price_per_week: "90000,50".to_string(),
            price_per_month: "-1".to_string(),
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.get("price_per_month"), Some(INVALID_AMOUNT));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_login_messages() {
        let errors = LoginInput::default().validate().unwrap_err();
        assert_eq!(errors.get("username"), Some(USERNAME_REQUIRED));
        assert_eq!(errors.get("password"), Some(PASSWORD_REQUIRED));
    }

    #[test]
    fn test_admin_user_defaults_to_editor() {
        let user = AdminUserInput {
            username: "moussa".to_string(),
            email: "moussa@lcatv.bf".to_string(),
            password: "secret1".to_string(),
            full_name: "Moussa Traoré".to_string(),
            role: String::new(),
        }
        .validate()
        .unwrap();
        assert_eq!(user.role, AdminRole::Editor);
    }

    #[test]
    fn test_contact_all_required() {
        let errors = ContactInput::default().validate().unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_advertising_request() {
        let empty = AdvertisingInput::default().validate().unwrap_err();
        assert_eq!(AdvertisingInput::summary(&empty), Some(MISSING_MANDATORY_FIELDS));

        let request = AdvertisingInput {
            company_name: "Faso Café".to_string(),
            contact_name: "Ali Zongo".to_string(),
            email: "ali@fasocafe.bf".to_string(),
            ad_type: "banner".to_string(),
            start_date: "2025-01-06".to_string(),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(request.ad_type, AdPackage::Banner);
        assert_eq!(request.budget, AdPackage::Banner.price());
        assert_eq!(request.duration_days, DEFAULT_REQUEST_DAYS);
        assert_eq!(request.title, "Faso Café - Bannière TV");
        assert!(request.description.contains("2025-01-06"));
    }

    #[test]
    fn test_registration_passwords() {
        let mut input = RegistrationInput {
            username: "awa".to_string(),
            email: "awa@gmail.com".to_string(),
            password: "12345".to_string(),
            confirm_password: "54321".to_string(),
            full_name: "Awa Kaboré".to_string(),
            phone: None,
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.get("password"), Some(PASSWORD_TOO_SHORT));
        assert_eq!(errors.get("confirm_password"), Some(PASSWORD_MISMATCH));

        assert_eq!(RegistrationInput::summary(&errors), None);

        input.password = "motdepasse".to_string();
        input.confirm_password = "motdepasse".to_string();
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_comment_defaults_to_anonymous_name() {
        let video = VideoId::new("zjWu0nZyBCY");
        let comment = CommentInput {
            content: "  Très bon journal  ".to_string(),
            user_name: "   ".to_string(),
        }
        .validate(&video, None)
        .unwrap();
        assert_eq!(comment.content, "Très bon journal");
        assert_eq!(comment.user_name, ANONYMOUS_COMMENTER);
        assert!(comment.user_email.is_none());
        assert_eq!(comment.video_id, video);
    }

    #[test]
    fn test_comment_uses_signed_in_viewer() {
        let viewer = ViewerUser {
            id: crate::types::ViewerId::new("u-1"),
            username: "awa".to_string(),
            email: "awa@gmail.com".to_string(),
            full_name: "Awa Kaboré".to_string(),
            phone: None,
            profile_image: None,
            created_at: None,
            is_active: true,
        };
        let comment = CommentInput {
            content: "Merci".to_string(),
            user_name: String::new(),
        }
        .validate(&VideoId::new("v1"), Some(&viewer))
        .unwrap();
        assert_eq!(comment.user_name, "Awa Kaboré");
        assert_eq!(comment.user_email.as_deref(), Some("awa@gmail.com"));
    }

    #[test]
    fn test_comment_limits() {
        let video = VideoId::new("v1");
        let empty = CommentInput::default().validate(&video, None).unwrap_err();
        assert_eq!(empty.get("content"), Some(REQUIRED));

        let errors = CommentInput {
            content: "é".repeat(MAX_COMMENT_LENGTH + 1),
            user_name: "x".repeat(MAX_COMMENTER_NAME_LENGTH + 1),
        }
        .validate(&video, None)
        .unwrap_err();
        assert_eq!(errors.get("content"), Some(COMMENT_TOO_LONG));
        assert_eq!(errors.get("user_name"), Some(NAME_TOO_LONG));

        let at_limit = CommentInput {
            content: "é".repeat(MAX_COMMENT_LENGTH),
            user_name: "x".repeat(MAX_COMMENTER_NAME_LENGTH),
        };
        assert!(at_limit.validate(&video, None).is_ok());
    }

    #[test]
    fn test_field_errors_keep_first_message() {
        let mut errors = FieldErrors::new();
        errors.add("email", REQUIRED);
        errors.add("email", INVALID_EMAIL);
        assert_eq!(errors.get("email"), Some(REQUIRED));
        assert_eq!(errors.to_string(), "email: Ce champ est requis");
    }
}
