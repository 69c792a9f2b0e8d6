//! Session commands: login, logout, whoami.

use lca_tv_core::format::format_date_time;
use lca_tv_core::validation::LoginInput;
use secrecy::{ExposeSecret, SecretString};

use super::Context;
use crate::error::CliError;
use crate::output::print_pairs;

/// Sign in against the backend and persist the session file.
///
/// # Errors
///
/// Returns an error for blank credentials, a rejected login, or an
/// unwritable session file.
pub async fn login(ctx: &Context, username: String, password: &SecretString) -> Result<(), CliError> {
    let credentials = LoginInput {
        username,
        password: password.expose_secret().to_owned(),
    }
    .validate()
    .map_err(|errors| CliError::InvalidArgument("credentials", errors.to_string()))?;

    let response = ctx.api.auth().login(&credentials).await?;
    tracing::info!(
        "Connexion réussie ! {} ({})",
        response.user.display_name(),
        response.user.role_label()
    );
    Ok(())
}

/// Remove the session file.
///
/// # Errors
///
/// Returns an error if the file cannot be removed.
pub async fn logout(ctx: &Context) -> Result<(), CliError> {
    ctx.api.auth().logout().await?;
    tracing::info!("Déconnecté");
    Ok(())
}

/// Show the account behind the stored token, as the backend sees it.
///
/// # Errors
///
/// Returns `CliError::NotLoggedIn` without a session, or the backend error.
pub async fn whoami(ctx: &Context) -> Result<(), CliError> {
    ctx.require_login().await?;
    let user = ctx.api.auth().me().await?;

    let mut pairs = vec![
        ("Nom", user.display_name().to_string()),
        ("Utilisateur", user.username().to_string()),
        ("Email", user.email().to_string()),
    ];
    let operator = user.into_operator();
    pairs.push(("Rôle", operator.role_label().to_string()));
    if let Some(last_login) = &operator.last_login {
        pairs.push(("Dernière connexion", format_date_time(last_login)));
    }
    print_pairs(&pairs)?;
    Ok(())
}
