//! Category management route handlers.
//!
//! Creation is the staged ingestion sequence: mint the category id, push the
//! banner to object storage, resolve the signed read URL, and only then
//! insert the row. A failure at any stage leaves the database untouched.

use askama::Template;
use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    response::Html,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use cartloom_core::CategoryEid;

use crate::{
    db::{CategoryRepository, NewCategory},
    error::{AppError, Result},
    filters,
    middleware::auth::RequireAdminAuth,
    models::Category,
    pagination::{PAGE_SIZE, Page},
    state::AppState,
};

use super::{dashboard::AdminUserView, format_date, render, success};

/// Category row for the list view.
#[derive(Debug, Clone)]
pub struct CategoryView {
    pub eid: String,
    pub name: String,
    pub banner_image: String,
    pub created: String,
}

impl From<&Category> for CategoryView {
    fn from(category: &Category) -> Self {
        Self {
            eid: category.eid.to_string(),
            name: category.name.clone(),
            banner_image: category.banner_image.clone(),
            created: format_date(category.created_at),
        }
    }
}

/// Categories list template.
#[derive(Template)]
#[template(path = "categories/index.html")]
pub struct CategoriesIndexTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub categories: Vec<CategoryView>,
    pub page: i64,
    pub has_next_page: bool,
}

/// Pagination query parameters.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// Fields collected from the multipart category form.
#[derive(Debug, Default)]
struct CategoryForm {
    name: Option<String>,
    website: Option<String>,
    image: Option<(String, Vec<u8>)>,
}

impl CategoryForm {
    /// Read the multipart body into the form fields.
    async fn read(mut multipart: Multipart) -> Result<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("multipart: {e}")))?
        {
            let field_name = field.name().map(ToOwned::to_owned);
            match field_name.as_deref() {
                Some("name") => {
                    form.name = Some(
                        field
                            .text()
                            .await
                            .map_err(|e| AppError::BadRequest(format!("name field: {e}")))?,
                    );
                }
                Some("website") => {
                    form.website = Some(
                        field
                            .text()
                            .await
                            .map_err(|e| AppError::BadRequest(format!("website field: {e}")))?,
                    );
                }
                Some("image") => {
                    let content_type = field
                        .content_type()
                        .map(ToOwned::to_owned)
                        .ok_or_else(|| {
                            AppError::BadRequest("image field missing a content type".to_owned())
                        })?;
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::BadRequest(format!("image field: {e}")))?;
                    form.image = Some((content_type, bytes.to_vec()));
                }
                _ => {}
            }
        }

        Ok(form)
    }
}

/// Categories list handler.
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>> {
    let page = Page::normalize(query.page.as_deref());

    let categories = CategoryRepository::new(state.pool())
        .list(state.storefront(), page)
        .await?;

    let template = CategoriesIndexTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/admin/category-management".to_owned(),
        has_next_page: categories.len() as i64 == PAGE_SIZE,
        categories: categories.iter().map(CategoryView::from).collect(),
        page: page.number(),
    };

    render(&template)
}

/// Category creation handler (multipart: `name`, `website`, `image`).
#[instrument(skip(state, multipart))]
pub async fn create(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Value>> {
    let form = CategoryForm::read(multipart).await?;

    let name = form
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("category name is required".to_owned()))?;
    let website = form
        .website
        .ok_or_else(|| AppError::BadRequest("website flag is required".to_owned()))?;
    let (content_type, image) = form
        .image
        .ok_or_else(|| AppError::BadRequest("banner image is required".to_owned()))?;

    if !content_type.starts_with("image/") {
        return Err(AppError::BadRequest(
            "Not a image type please upload the image".to_owned(),
        ));
    }

    let eid = CategoryEid::generate();
    let storefront = state.catalog().storefront_for_website(&website).to_owned();

    // Upload and URL resolution both precede the insert; either failure
    // surfaces before any row exists.
    let banner = state.images().store_banner(&eid, &content_type, image).await?;

    let category = CategoryRepository::new(state.pool())
        .create(NewCategory {
            eid,
            name: name.trim().to_owned(),
            banner_image: banner.url,
            storefront,
        })
        .await?;

    tracing::info!(
        category = %category.eid,
        storefront = %category.storefront,
        "category created"
    );

    Ok(success())
}

/// Category deletion handler.
#[instrument(skip(state))]
pub async fn remove(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(categorie_id): Path<String>,
) -> Result<Json<Value>> {
    let eid = CategoryEid::new(categorie_id);

    CategoryRepository::new(state.pool())
        .delete(state.storefront(), &eid)
        .await
        .map_err(|e| match e {
            crate::db::RepositoryError::NotFound => {
                AppError::NotFound("Categorie not found!".to_owned())
            }
            other => AppError::Database(other),
        })?;

    tracing::info!(category = %eid, "category deleted");

    Ok(success())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn category_view_carries_banner_url() {
        let category = Category {
            eid: CategoryEid::new("c1"),
            name: "Throws".to_owned(),
            banner_image: "https://cdn.example.com/banners/c1?sig=abc".to_owned(),
            storefront: "loom-home".to_owned(),
            created_at: Utc.with_ymd_and_hms(2025, 5, 5, 5, 0, 0).unwrap(),
        };
        let view = CategoryView::from(&category);
        assert!(view.banner_image.contains("banners/c1"));
        assert_eq!(view.created, "May 05, 2025");
    }
}
