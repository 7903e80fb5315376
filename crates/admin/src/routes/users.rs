//! User management route handlers.

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::Html,
};
use serde::Deserialize;
use tracing::instrument;

use cartloom_core::AccountEid;

use crate::{
    db::{AccountRepository, AddressRepository, OrderRepository},
    error::{AppError, Result},
    filters,
    middleware::auth::RequireAdminAuth,
    models::{Account, Address},
    pagination::{PAGE_SIZE, Page},
    state::AppState,
};

use super::{
    dashboard::AdminUserView,
    format_date, render,
    vendors::OrderView,
};

/// User row for list and detail views.
#[derive(Debug, Clone)]
pub struct UserView {
    pub eid: String,
    pub name: String,
    pub email: String,
    pub joined: String,
}

impl From<&Account> for UserView {
    fn from(account: &Account) -> Self {
        Self {
            eid: account.eid.to_string(),
            name: account.name.clone(),
            email: account.email.to_string(),
            joined: format_date(account.created_at),
        }
    }
}

/// Address row for the user detail view.
#[derive(Debug, Clone)]
pub struct AddressView {
    pub line1: String,
    pub line2: String,
    pub city: String,
    pub region: String,
    pub postal_code: String,
    pub country: String,
    pub phone: String,
}

impl From<&Address> for AddressView {
    fn from(address: &Address) -> Self {
        Self {
            line1: address.line1.clone(),
            line2: address.line2.clone().unwrap_or_default(),
            city: address.city.clone(),
            region: address.region.clone(),
            postal_code: address.postal_code.clone(),
            country: address.country.clone(),
            phone: address.phone.clone().unwrap_or_default(),
        }
    }
}

/// Users list template.
#[derive(Template)]
#[template(path = "users/index.html")]
pub struct UsersIndexTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub users: Vec<UserView>,
    pub page: i64,
    pub has_next_page: bool,
}

/// User detail template.
#[derive(Template)]
#[template(path = "users/show.html")]
pub struct UserShowTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub user: UserView,
    pub active: Vec<OrderView>,
    pub history: Vec<OrderView>,
    pub addresses: Vec<AddressView>,
}

/// Single-list pagination query.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// Users list handler.
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>> {
    let page = Page::normalize(query.page.as_deref());

    let users = AccountRepository::new(state.pool()).list_users(page).await?;

    let template = UsersIndexTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/admin/user-management".to_owned(),
        has_next_page: users.len() as i64 == PAGE_SIZE,
        users: users.iter().map(UserView::from).collect(),
        page: page.number(),
    };

    render(&template)
}

/// User detail handler.
///
/// Shows the account, its complete order history split into pending and
/// settled facets, and its saved addresses.
#[instrument(skip(admin, state))]
pub async fn show(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Html<String>> {
    let user_eid = AccountEid::new(user_id);

    let accounts = AccountRepository::new(state.pool());
    let orders = OrderRepository::new(state.pool());
    let addresses = AddressRepository::new(state.pool());

    let (user, facets, address_list) = tokio::try_join!(
        accounts.get_by_eid(&user_eid),
        orders.facets_for_user(&user_eid, state.storefront()),
        addresses.list_for_user(&user_eid),
    )?;

    let user = user.ok_or_else(|| AppError::NotFound("User not found!".to_owned()))?;

    let template = UserShowTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/admin/user-management".to_owned(),
        user: UserView::from(&user),
        active: facets.active.iter().map(OrderView::from).collect(),
        history: facets.history.iter().map(OrderView::from).collect(),
        addresses: address_list.iter().map(AddressView::from).collect(),
    };

    render(&template)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn address_view_blanks_missing_optionals() {
        let address = Address {
            user_eid: AccountEid::new("u1"),
            line1: "12 Mill Lane".to_owned(),
            line2: None,
            city: "Leeds".to_owned(),
            region: "West Yorkshire".to_owned(),
            postal_code: "LS1 4AB".to_owned(),
            country: "GB".to_owned(),
            phone: None,
        };
        let view = AddressView::from(&address);
        assert_eq!(view.line2, "");
        assert_eq!(view.phone, "");
        assert_eq!(view.city, "Leeds");
    }
}
