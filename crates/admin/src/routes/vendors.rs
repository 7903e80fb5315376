//! Vendor management route handlers.
//!
//! Covers the accepted-vendor list, the verification queue, vendor detail,
//! the faceted order view, the vendor product list and product detail, and
//! the verification decision endpoint.

use askama::Template;
use axum::{
    Json,
    extract::{Path, Query, State},
    response::Html,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use cartloom_core::{AccountEid, ProductEid, VerificationDecision, VerificationStatus};

use crate::{
    db::{
        AccountRepository, OrderRepository, ProductRepository, ReviewRepository,
        VerificationOutcome,
    },
    error::{AppError, Result},
    filters,
    middleware::auth::RequireAdminAuth,
    models::{Account, Order, Product, Review},
    pagination::{PAGE_SIZE, Page},
    state::AppState,
};

use super::{dashboard::AdminUserView, format_date, format_price, render, success};

// =============================================================================
// View Models
// =============================================================================

/// Vendor row for list and detail views.
#[derive(Debug, Clone)]
pub struct VendorView {
    pub eid: String,
    pub name: String,
    pub email: String,
    pub verification: String,
    pub verified_at: String,
    pub joined: String,
}

impl From<&Account> for VendorView {
    fn from(account: &Account) -> Self {
        Self {
            eid: account.eid.to_string(),
            name: account.name.clone(),
            email: account.email.to_string(),
            verification: account.verification.to_string(),
            verified_at: account.verification_at.map(format_date).unwrap_or_default(),
            joined: format_date(account.created_at),
        }
    }
}

/// Order row for the faceted order view.
#[derive(Debug, Clone)]
pub struct OrderView {
    pub eid: String,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: String,
    pub status: String,
    pub placed: String,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        Self {
            eid: order.eid.to_string(),
            product_name: order.product_name.clone(),
            quantity: order.quantity,
            unit_price: format_price(order.unit_price),
            status: order.status.to_string(),
            placed: format_date(order.created_at),
        }
    }
}

/// Product row for the vendor product list and detail views.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub eid: String,
    pub name: String,
    pub price: String,
    pub image_url: String,
    pub verified: bool,
    pub listed: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            eid: product.eid.to_string(),
            name: product.name.clone(),
            price: format_price(product.price),
            image_url: product.image_url.clone().unwrap_or_default(),
            verified: product.verified,
            listed: format_date(product.created_at),
        }
    }
}

/// Review row for the product detail view.
#[derive(Debug, Clone)]
pub struct ReviewView {
    pub reviewer: String,
    pub rating: i16,
    pub comment: String,
    pub left_at: String,
}

impl From<&Review> for ReviewView {
    fn from(review: &Review) -> Self {
        Self {
            reviewer: review
                .reviewer_name
                .clone()
                .unwrap_or_else(|| "Deleted account".to_owned()),
            rating: review.rating,
            comment: review.comment.clone(),
            left_at: format_date(review.created_at),
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Accepted vendors list template.
#[derive(Template)]
#[template(path = "vendors/index.html")]
pub struct VendorsIndexTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub vendor_count: i64,
    pub product_count: i64,
    pub order_count: i64,
    pub vendors: Vec<VendorView>,
    pub page: i64,
    pub has_next_page: bool,
}

/// Verification requests list template.
#[derive(Template)]
#[template(path = "vendors/requests.html")]
pub struct VerificationRequestsTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub vendors: Vec<VendorView>,
    pub page: i64,
    pub has_next_page: bool,
}

/// Vendor detail template.
#[derive(Template)]
#[template(path = "vendors/show.html")]
pub struct VendorShowTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub vendor: VendorView,
    /// Whether this view was reached from the verification queue.
    pub reviewing: bool,
    pub verify_documents: String,
}

/// Faceted vendor orders template.
#[derive(Template)]
#[template(path = "vendors/orders.html")]
pub struct VendorOrdersTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub vendor: VendorView,
    pub active: Vec<OrderView>,
    pub history: Vec<OrderView>,
    pub active_page: i64,
    pub history_page: i64,
    pub active_has_next: bool,
    pub history_has_next: bool,
}

/// Vendor products list template.
#[derive(Template)]
#[template(path = "vendors/products.html")]
pub struct VendorProductsTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub vendor: VendorView,
    pub products: Vec<ProductView>,
    pub page: i64,
    pub has_next_page: bool,
}

/// Product detail template.
#[derive(Template)]
#[template(path = "vendors/product_detail.html")]
pub struct ProductDetailTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub vendor: VendorView,
    pub product: ProductView,
    pub reviews: Vec<ReviewView>,
}

// =============================================================================
// Query Parameters
// =============================================================================

/// Single-list pagination query.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// Vendor detail query.
#[derive(Debug, Deserialize)]
pub struct VendorShowQuery {
    /// Present when the detail view is reached from the verification queue.
    pub forw: Option<String>,
}

/// Per-facet pagination for the order detail view.
#[derive(Debug, Deserialize)]
pub struct FacetPageQuery {
    pub apage: Option<String>,
    pub cpage: Option<String>,
}

fn page_is_full<T>(items: &[T]) -> bool {
    items.len() as i64 == PAGE_SIZE
}

// =============================================================================
// Handlers
// =============================================================================

/// Accepted vendors list handler.
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>> {
    let page = Page::normalize(query.page.as_deref());

    let accounts = AccountRepository::new(state.pool());
    let products = ProductRepository::new(state.pool());
    let orders = OrderRepository::new(state.pool());

    let (vendor_count, product_count, order_count, vendors) = tokio::try_join!(
        accounts.count_accepted_vendors(),
        products.count_verified(state.storefront()),
        orders.count_for_storefront(state.storefront()),
        accounts.list_vendors_by_verification(VerificationStatus::Accepted, page),
    )?;

    let template = VendorsIndexTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/admin/vendors-management".to_owned(),
        vendor_count,
        product_count,
        order_count,
        has_next_page: page_is_full(&vendors),
        vendors: vendors.iter().map(VendorView::from).collect(),
        page: page.number(),
    };

    render(&template)
}

/// Pending verification requests handler.
#[instrument(skip(admin, state))]
pub async fn verification_requests(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>> {
    let page = Page::normalize(query.page.as_deref());

    let vendors = AccountRepository::new(state.pool())
        .list_vendors_by_verification(VerificationStatus::Requested, page)
        .await?;

    let template = VerificationRequestsTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/admin/vendors-management/verification-requests".to_owned(),
        has_next_page: page_is_full(&vendors),
        vendors: vendors.iter().map(VendorView::from).collect(),
        page: page.number(),
    };

    render(&template)
}

/// Vendor detail handler.
///
/// `?forw=` marks arrival from the verification queue: the view switches to
/// its review context and surfaces the submitted verification documents.
#[instrument(skip(admin, state))]
pub async fn show(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(vendor_id): Path<String>,
    Query(query): Query<VendorShowQuery>,
) -> Result<Html<String>> {
    let vendor_eid = AccountEid::new(vendor_id);
    let vendor = AccountRepository::new(state.pool())
        .get_vendor(&vendor_eid)
        .await?
        .ok_or_else(|| AppError::NotFound("Vendor not found!".to_owned()))?;

    let reviewing = query.forw.is_some();
    let current_path = if reviewing {
        "/admin/vendors-management/verification-requests"
    } else {
        "/admin/vendors-management"
    };

    let template = VendorShowTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: current_path.to_owned(),
        verify_documents: vendor.verify_documents.clone().unwrap_or_default(),
        vendor: VendorView::from(&vendor),
        reviewing,
    };

    render(&template)
}

/// Faceted vendor orders handler.
///
/// `apage` pages the pending facet, `cpage` the history facet; each facet
/// paginates independently over the same vendor+storefront base filter.
#[instrument(skip(admin, state))]
pub async fn order_details(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(vendor_id): Path<String>,
    Query(query): Query<FacetPageQuery>,
) -> Result<Html<String>> {
    let vendor_eid = AccountEid::new(vendor_id);
    let active_page = Page::normalize(query.apage.as_deref());
    let history_page = Page::normalize(query.cpage.as_deref());

    let accounts = AccountRepository::new(state.pool());
    let orders = OrderRepository::new(state.pool());

    let (vendor, facets) = tokio::try_join!(
        accounts.get_vendor(&vendor_eid),
        orders.facets_for_vendor(&vendor_eid, state.storefront(), active_page, history_page),
    )?;

    let vendor = vendor.ok_or_else(|| AppError::NotFound("Vendor not found!".to_owned()))?;

    let template = VendorOrdersTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/admin/vendors-management".to_owned(),
        vendor: VendorView::from(&vendor),
        active_has_next: page_is_full(&facets.active),
        history_has_next: page_is_full(&facets.history),
        active: facets.active.iter().map(OrderView::from).collect(),
        history: facets.history.iter().map(OrderView::from).collect(),
        active_page: active_page.number(),
        history_page: history_page.number(),
    };

    render(&template)
}

/// Vendor products list handler.
#[instrument(skip(admin, state))]
pub async fn products(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(vendor_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>> {
    let vendor_eid = AccountEid::new(vendor_id);
    let page = Page::normalize(query.page.as_deref());

    let accounts = AccountRepository::new(state.pool());
    let product_repo = ProductRepository::new(state.pool());

    let (vendor, product_list) = tokio::try_join!(
        accounts.get_vendor(&vendor_eid),
        product_repo.list_for_vendor(&vendor_eid, state.storefront(), page),
    )?;

    let vendor = vendor.ok_or_else(|| AppError::NotFound("Vendor not found.".to_owned()))?;

    let template = VendorProductsTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/admin/vendors-management".to_owned(),
        vendor: VendorView::from(&vendor),
        has_next_page: page_is_full(&product_list),
        products: product_list.iter().map(ProductView::from).collect(),
        page: page.number(),
    };

    render(&template)
}

/// Product detail handler.
#[instrument(skip(admin, state))]
pub async fn product_details(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path((vendor_id, product_id)): Path<(String, String)>,
) -> Result<Html<String>> {
    let vendor_eid = AccountEid::new(vendor_id);
    let product_eid = ProductEid::new(product_id);

    let accounts = AccountRepository::new(state.pool());
    let product_repo = ProductRepository::new(state.pool());
    let review_repo = ReviewRepository::new(state.pool());

    let (vendor, product, reviews) = tokio::try_join!(
        accounts.get_vendor(&vendor_eid),
        product_repo.get_for_vendor(&vendor_eid, &product_eid, state.storefront()),
        review_repo.list_for_product(&product_eid),
    )?;

    let vendor = vendor.ok_or_else(|| AppError::NotFound("Vendor not found.".to_owned()))?;
    let product = product.ok_or_else(|| AppError::NotFound("Product not found.".to_owned()))?;

    let template = ProductDetailTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/admin/vendors-management".to_owned(),
        vendor: VendorView::from(&vendor),
        product: ProductView::from(&product),
        reviews: reviews.iter().map(ReviewView::from).collect(),
    };

    render(&template)
}

/// Verification decision handler.
///
/// The path status must be one of the two terminal values; a vendor not in
/// `requested` is left untouched and still acknowledged with Success.
#[instrument(skip(state))]
pub async fn decide_verification(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path((status, vendor_id)): Path<(String, String)>,
) -> Result<Json<Value>> {
    let decision = status
        .parse::<VerificationDecision>()
        .map_err(AppError::BadRequest)?;

    let vendor_eid = AccountEid::new(vendor_id);
    let accounts = AccountRepository::new(state.pool());

    accounts
        .get_vendor(&vendor_eid)
        .await?
        .ok_or_else(|| AppError::NotFound("Vendor not found!".to_owned()))?;

    match accounts.decide_verification(&vendor_eid, decision).await? {
        VerificationOutcome::Applied { products_updated } => {
            tracing::info!(
                vendor = %vendor_eid,
                decision = %decision,
                products_updated,
                "vendor verification decided"
            );
        }
        VerificationOutcome::NotRequested => {
            tracing::warn!(
                vendor = %vendor_eid,
                decision = %decision,
                "verification decision ignored: vendor not in requested state"
            );
        }
    }

    Ok(success())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    use cartloom_core::{Email, OrderStatus, Role};

    use super::*;

    fn vendor() -> Account {
        Account {
            eid: AccountEid::new("v1"),
            role: Role::Vendor,
            name: "Loom & Co".to_owned(),
            email: Email::parse("loom@example.com").unwrap(),
            verification: VerificationStatus::Accepted,
            verification_at: Some(Utc.with_ymd_and_hms(2025, 2, 3, 9, 0, 0).unwrap()),
            verify_documents: Some("https://example.com/docs.pdf".to_owned()),
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn vendor_view_formats_both_timestamps() {
        let view = VendorView::from(&vendor());
        assert_eq!(view.verification, "accepted");
        assert_eq!(view.verified_at, "Feb 03, 2025");
        assert_eq!(view.joined, "Jan 01, 2025");
    }

    #[test]
    fn vendor_view_blank_when_never_verified() {
        let mut account = vendor();
        account.verification_at = None;
        let view = VendorView::from(&account);
        assert_eq!(view.verified_at, "");
    }

    #[test]
    fn order_view_formats_price_and_status() {
        let order = Order {
            eid: cartloom_core::OrderEid::new("o1"),
            user_eid: AccountEid::new("u1"),
            vendor_eid: AccountEid::new("v1"),
            product_name: "Wool throw".to_owned(),
            product_image: None,
            unit_price: Decimal::new(4550, 2),
            quantity: 2,
            status: OrderStatus::Pending,
            storefront: "loom-home".to_owned(),
            created_at: Utc.with_ymd_and_hms(2025, 4, 10, 9, 0, 0).unwrap(),
        };
        let view = OrderView::from(&order);
        assert_eq!(view.unit_price, "$45.50");
        assert_eq!(view.status, "pending");
        assert_eq!(view.placed, "Apr 10, 2025");
    }

    #[test]
    fn full_pages_predict_a_next_page() {
        let empty: Vec<i32> = vec![];
        assert!(!page_is_full(&empty));
        assert!(!page_is_full(&[0; 24]));
        assert!(page_is_full(&[0; 25]));
    }
}
