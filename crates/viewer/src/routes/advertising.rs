//! Advertising request form.
//!
//! Requests go to `POST /advertisements`, which needs a viewer token;
//! signed-out visitors are asked to log in first.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use lca_tv_client::ApiError;
use lca_tv_core::models::AdPackage;
use lca_tv_core::validation::{AdvertisingInput, FieldErrors};
use tracing::instrument;

use super::Page;
use crate::error::AppError;
use crate::filters;
use crate::middleware::auth::LOGIN_PATH;
use crate::middleware::{Visitor, push_flash};
use crate::models::Flash;

const FORM_PATH: &str = "/advertising/create";

pub const SEND_FAILED: &str = "Impossible d'envoyer la demande. Veuillez réessayer.";
pub const LOGIN_REQUIRED: &str = "Connectez-vous pour envoyer une demande de publicité.";

/// A package radio button.
#[derive(Debug, Clone)]
pub struct PackageOption {
    pub value: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub price: String,
    pub selected: bool,
}

#[derive(Template, WebTemplate)]
#[template(path = "advertising.html")]
pub struct AdvertisingTemplate {
    pub page: Page,
    pub input: AdvertisingInput,
    pub errors: FieldErrors,
    pub packages: Vec<PackageOption>,
    pub error: Option<String>,
    pub login_path: &'static str,
}

impl AdvertisingTemplate {
    fn new(page: Page, input: AdvertisingInput, errors: FieldErrors) -> Self {
        let packages = AdPackage::ALL
            .iter()
            .map(|p| PackageOption {
                value: p.as_str(),
                label: p.label(),
                description: p.description(),
                price: format!("À partir de {}", p.price()),
                selected: input.ad_type == p.as_str(),
            })
            .collect();
        Self {
            error: AdvertisingInput::summary(&errors).map(str::to_string),
            page,
            input,
            errors,
            packages,
            login_path: LOGIN_PATH,
        }
    }

    fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    #[must_use]
    pub fn signed_in(&self) -> bool {
        self.page.user.is_some()
    }
}

/// GET /advertising/create
pub async fn index(visitor: Visitor) -> Result<AdvertisingTemplate, AppError> {
    Ok(AdvertisingTemplate::new(
        Page::load(&visitor, FORM_PATH).await?,
        AdvertisingInput::default(),
        FieldErrors::new(),
    ))
}

/// POST /advertising/create
///
/// Invalid forms never reach the backend.
#[instrument(skip(visitor, input), fields(company = %input.company_name))]
pub async fn submit(
    visitor: Visitor,
    Form(input): Form<AdvertisingInput>,
) -> Result<Response, AppError> {
    let request = match input.validate() {
        Ok(request) => request,
        Err(errors) => {
            let page = Page::load(&visitor, FORM_PATH).await?;
            return Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                AdvertisingTemplate::new(page, input, errors),
            )
                .into_response());
        }
    };

    if !visitor.is_signed_in() {
        let page = Page::load(&visitor, FORM_PATH).await?;
        let form = AdvertisingTemplate::new(page, input, FieldErrors::new()).with_error(LOGIN_REQUIRED);
        return Ok((StatusCode::UNAUTHORIZED, form).into_response());
    }

    match visitor.api.advertising().create(&request).await {
        Ok(reply) => {
            tracing::info!(ad_type = %request.ad_type, reply = %reply.message, "Advertising request sent");
            push_flash(
                &visitor.session,
                Flash::success(
                    "Demande envoyée !",
                    "Votre demande de publicité a été envoyée avec succès. Notre équipe commerciale vous contactera dans les 24h.",
                ),
            )
            .await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(e @ ApiError::Unauthorized(_)) => {
            // The client already dropped the stored credential.
            tracing::info!(error = %e, "Viewer session expired");
            push_flash(&visitor.session, Flash::error(e.user_message())).await?;
            Ok(Redirect::to(LOGIN_PATH).into_response())
        }
        Err(e) => {
            tracing::warn!(error = %e, "Advertising request failed");
            let page = Page::load(&visitor, FORM_PATH).await?;
            let form = AdvertisingTemplate::new(page, input, FieldErrors::new()).with_error(SEND_FAILED);
            Ok((StatusCode::BAD_GATEWAY, form).into_response())
        }
    }
}
