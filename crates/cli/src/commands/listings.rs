//! Client, order and ad space listings.

use lca_tv_core::format::{format_currency, format_date, format_number, format_phone};
use lca_tv_core::models::{AdOrder, AdSpace, Client};
use lca_tv_core::OrderStatus;

use super::Context;
use crate::error::CliError;
use crate::output::Table;

const fn active_label(active: bool) -> &'static str {
    if active { "Actif" } else { "Inactif" }
}

fn client_table(clients: &[Client]) -> Table {
    let mut table = Table::new(&["Entreprise", "Contact", "Email", "Téléphone", "Total dépensé", "Statut"]);
    for client in clients {
        table.row(vec![
            client.company_name.clone(),
            client.contact_person.clone(),
            client.email.clone(),
            format_phone(&client.phone),
            format_currency(client.total_spent),
            active_label(client.is_active).to_string(),
        ]);
    }
    table
}

fn order_table<'a>(orders: impl IntoIterator<Item = &'a AdOrder>) -> Table {
    let mut table = Table::new(&[
        "Commande", "Type", "Période", "Montant", "Statut", "Paiement", "Impressions", "CTR",
    ]);
    for order in orders {
        table.row(vec![
            order.id.to_string(),
            order.content_type.label().to_string(),
            format!(
                "{} → {} ({} j)",
                format_date(&order.start_date),
                format_date(&order.end_date),
                order.duration_days
            ),
            format_currency(order.total_amount),
            order.status.label().to_string(),
            order.payment_status.label().to_string(),
            format_number(i64::try_from(order.impressions).unwrap_or(i64::MAX)),
            format!("{:.2}%", order.ctr()),
        ]);
    }
    table
}

fn ad_space_table(spaces: &[AdSpace]) -> Table {
    let mut table = Table::new(&[
        "Nom", "Position", "Dimensions", "Jour", "Semaine", "Mois", "Statut",
    ]);
    for space in spaces {
        table.row(vec![
            space.name.clone(),
            space.position.clone(),
            space.dimensions.to_string(),
            format_currency(space.price_per_day),
            format_currency(space.price_per_week),
            format_currency(space.price_per_month),
            active_label(space.is_active).to_string(),
        ]);
    }
    table
}

/// # Errors
///
/// Returns `CliError::NotLoggedIn` without a session, or the backend error.
pub async fn clients(ctx: &Context) -> Result<(), CliError> {
    ctx.require_login().await?;
    let clients = ctx.api.clients().list().await?;
    client_table(&clients).print("Aucun client")?;
    Ok(())
}

/// List orders, optionally only those with `status`.
///
/// # Errors
///
/// Returns `CliError::InvalidArgument` for an unknown status, before any
/// request is made.
pub async fn orders(ctx: &Context, status: Option<&str>) -> Result<(), CliError> {
    let status = status
        .map(str::parse::<OrderStatus>)
        .transpose()
        .map_err(|e| CliError::InvalidArgument("status", e.to_string()))?;
    ctx.require_login().await?;

    let orders = ctx.api.orders().list().await?;
    let table = order_table(
        orders
            .iter()
            .filter(|order| status.is_none_or(|s| order.status == s)),
    );
    table.print("Aucune commande")?;
    Ok(())
}

/// # Errors
///
/// Returns `CliError::NotLoggedIn` without a session, or the backend error.
pub async fn ad_spaces(ctx: &Context) -> Result<(), CliError> {
    ctx.require_login().await?;
    let spaces = ctx.api.ad_spaces().list().await?;
    ad_space_table(&spaces).print("Aucun espace publicitaire")?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use lca_tv_core::models::Dimensions;
    use lca_tv_core::{AdSpaceId, Money};

    use super::*;

    fn render(table: &Table) -> String {
        let mut out = Vec::new();
        table.write_to(&mut out, "vide").unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_ad_space_rows_show_dimensions_and_prices() {
        let space = AdSpace {
            id: AdSpaceId::new("space-1"),
            name: "Bannière Accueil".to_string(),
            position: "header".to_string(),
            dimensions: Dimensions {
                width: 728,
                height: 90,
            },
            price_per_day: Money::from_francs(25_000),
            price_per_week: Money::from_francs(150_000),
            price_per_month: Money::from_francs(500_000),
            is_active: false,
            created_at: None,
        };
        let text = render(&ad_space_table(&[space]));

        assert!(text.contains("728×90"));
        assert!(text.contains("25 000 FCFA"));
        assert!(text.contains("500 000 FCFA"));
        assert!(text.contains("Inactif"));
    }

    #[tokio::test]
    async fn test_unknown_status_is_rejected_before_any_request() {
        let config = lca_tv_client::ClientConfig::new("http://127.0.0.1:9/api").unwrap();
        let ctx = Context::new(config, lca_tv_client::SessionContext::in_memory()).unwrap();

        let err = orders(&ctx, Some("archived")).await.unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument("status", _)));
    }
}
