//! Contact screen.
//!
//! Messages are validated and acknowledged here; the backend has no contact
//! endpoint, so they go to the request log.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use lca_tv_core::validation::{ContactInput, FieldErrors, MISSING_FIELDS};
use tracing::instrument;

use super::Page;
use crate::error::AppError;
use crate::filters;
use crate::middleware::{Visitor, push_flash};
use crate::models::Flash;

const CONTACT_PATH: &str = "/contact";

/// Station address shown on the screen.
pub const ADDRESS: &str = "Secteur 4, Avenue Kwame Nkrumah, Ouagadougou";
/// Switchboard and mobile lines.
pub const PHONES: [&str; 2] = ["+226 25 XX XX XX", "+226 70 XX XX XX"];
pub const EMAILS: [&str; 2] = ["contact@lcatv.bf", "redaction@lcatv.bf"];

/// A team visitors can write to directly.
#[derive(Debug, Clone, Copy)]
pub struct Department {
    pub name: &'static str,
    pub hours: &'static str,
    pub email: &'static str,
}

pub const DEPARTMENTS: [Department; 3] = [
    Department {
        name: "Rédaction",
        hours: "24h/24, 7j/7",
        email: "redaction@lcatv.bf",
    },
    Department {
        name: "Publicité",
        hours: "Lun-Ven: 8h-17h",
        email: "pub@lcatv.bf",
    },
    Department {
        name: "Technique",
        hours: "Lun-Ven: 8h-17h",
        email: "technique@lcatv.bf",
    },
];

#[derive(Template, WebTemplate)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub page: Page,
    pub input: ContactInput,
    pub errors: FieldErrors,
    pub summary: Option<&'static str>,
    pub address: &'static str,
    pub phones: [&'static str; 2],
    pub emails: [&'static str; 2],
    pub departments: [Department; 3],
}

impl ContactTemplate {
    fn new(page: Page, input: ContactInput, errors: FieldErrors) -> Self {
        Self {
            summary: (!errors.is_empty()).then_some(MISSING_FIELDS),
            page,
            input,
            errors,
            address: ADDRESS,
            phones: PHONES,
            emails: EMAILS,
            departments: DEPARTMENTS,
        }
    }
}

/// GET /contact
pub async fn index(visitor: Visitor) -> Result<ContactTemplate, AppError> {
    Ok(ContactTemplate::new(
        Page::load(&visitor, CONTACT_PATH).await?,
        ContactInput::default(),
        FieldErrors::new(),
    ))
}

/// POST /contact
#[instrument(skip(visitor, input))]
pub async fn submit(visitor: Visitor, Form(input): Form<ContactInput>) -> Result<Response, AppError> {
    let message = match input.validate() {
        Ok(message) => message,
        Err(errors) => {
            let page = Page::load(&visitor, CONTACT_PATH).await?;
            return Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                ContactTemplate::new(page, input, errors),
            )
                .into_response());
        }
    };

    tracing::info!(
        from = %message.email,
        subject = %message.subject,
        "Contact message received"
    );
    push_flash(
        &visitor.session,
        Flash::success(
            "Message envoyé !",
            "Merci pour votre message. Notre équipe vous répondra dans les plus brefs délais.",
        ),
    )
    .await?;
    Ok(Redirect::to(CONTACT_PATH).into_response())
}
