//! HTTP route handlers for the admin panel.
//!
//! # Route Structure
//!
//! ```text
//! # Views (session-protected except login)
//! GET  /admin/login                                    - Login page (public)
//! GET  /admin/logout                                   - Clear session, redirect
//! GET  /admin/home                                     - Dashboard aggregates
//! GET  /admin/vendors-management                       - Accepted vendors (paginated)
//! GET  /admin/vendors-management/verification-requests - Pending vendors (paginated)
//! GET  /admin/vendors-management/{vendorId}            - Vendor detail (?forw= flips context)
//! GET  /admin/vendors-management/order-details/{vendorId}  - Faceted vendor orders (?apage=&cpage=)
//! GET  /admin/vendors-management/products/{vendorId}   - Vendor products (paginated)
//! GET  /admin/vendors-management/products/details/{vendorId}/{productId} - Product detail
//! GET  /admin/user-management                          - Users (paginated)
//! GET  /admin/user-management/{userId}                 - User detail + faceted orders + addresses
//! GET  /admin/reports-management                       - Reports (paginated)
//! GET  /admin/category-management                      - Categories (paginated, name asc)
//!
//! # Mutations (JSON envelope)
//! PATCH  /admin-api/vendor-management/{status}/{vendorId} - Verification decision
//! POST   /admin-api/category                              - Create category (multipart)
//! DELETE /admin-api/category/{categorieId}                - Delete category
//! ```

pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod reports;
pub mod users;
pub mod vendors;

use askama::Template;
use axum::{
    Json, Router,
    response::Html,
    routing::{delete, get, patch, post},
};
use chrono::{DateTime, Utc};
use serde_json::{Value, json};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Create the view routes router, nested under `/admin`.
pub fn view_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page))
        .route("/logout", get(auth::logout))
        .route("/home", get(dashboard::home))
        .route("/vendors-management", get(vendors::index))
        .route(
            "/vendors-management/verification-requests",
            get(vendors::verification_requests),
        )
        .route(
            "/vendors-management/order-details/{vendor_id}",
            get(vendors::order_details),
        )
        .route(
            "/vendors-management/products/{vendor_id}",
            get(vendors::products),
        )
        .route(
            "/vendors-management/products/details/{vendor_id}/{product_id}",
            get(vendors::product_details),
        )
        .route("/vendors-management/{vendor_id}", get(vendors::show))
        .route("/user-management", get(users::index))
        .route("/user-management/{user_id}", get(users::show))
        .route("/reports-management", get(reports::index))
        .route("/category-management", get(categories::index))
}

/// Create the mutation API router, nested under `/admin-api`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/vendor-management/{status}/{vendor_id}",
            patch(vendors::decide_verification),
        )
        .route("/category", post(categories::create))
        .route("/category/{categorie_id}", delete(categories::remove))
}

/// Create all routes for the admin panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/admin", view_routes())
        .nest("/admin-api", api_routes())
}

/// Render a template, mapping render failure to an internal error.
pub(crate) fn render<T: Template>(template: &T) -> Result<Html<String>> {
    template
        .render()
        .map(Html)
        .map_err(|e| AppError::Internal(format!("template render: {e}")))
}

/// The JSON acknowledgement every mutation endpoint returns.
pub(crate) fn success() -> Json<Value> {
    Json(json!({ "status": "Success" }))
}

/// Format a timestamp for list and detail views.
pub(crate) fn format_date(at: DateTime<Utc>) -> String {
    at.format("%b %d, %Y").to_string()
}

/// Format a monetary amount for display.
pub(crate) fn format_price(amount: rust_decimal::Decimal) -> String {
    format!("${amount:.2}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn success_envelope_shape() {
        let Json(body) = success();
        assert_eq!(body, json!({ "status": "Success" }));
    }

    #[test]
    fn dates_format_for_display() {
        let at = Utc.with_ymd_and_hms(2025, 3, 7, 12, 30, 0).unwrap();
        assert_eq!(format_date(at), "Mar 07, 2025");
    }

    #[test]
    fn prices_format_with_two_decimals() {
        assert_eq!(format_price(Decimal::new(1999, 2)), "$19.99");
        assert_eq!(format_price(Decimal::new(5, 0)), "$5.00");
    }
}
