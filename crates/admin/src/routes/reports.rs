//! Reports list route handler.

use askama::Template;
use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    db::ReportRepository,
    error::Result,
    filters,
    middleware::auth::RequireAdminAuth,
    models::Report,
    pagination::{PAGE_SIZE, Page},
    state::AppState,
};

use super::{dashboard::AdminUserView, format_date, render};

/// Report row for the reports list.
#[derive(Debug, Clone)]
pub struct ReportView {
    pub reporter: String,
    pub reporter_email: String,
    pub subject: String,
    pub message: String,
    pub filed: String,
}

impl From<&Report> for ReportView {
    fn from(report: &Report) -> Self {
        Self {
            reporter: report
                .reporter_name
                .clone()
                .unwrap_or_else(|| "Deleted account".to_owned()),
            reporter_email: report.reporter_email.clone().unwrap_or_default(),
            subject: report.subject.clone(),
            message: report.message.clone(),
            filed: format_date(report.created_at),
        }
    }
}

/// Reports list template.
#[derive(Template)]
#[template(path = "reports/index.html")]
pub struct ReportsIndexTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub reports: Vec<ReportView>,
    pub page: i64,
    pub has_next_page: bool,
}

/// Pagination query parameters.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// Reports list handler.
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>> {
    let page = Page::normalize(query.page.as_deref());

    let reports = ReportRepository::new(state.pool()).list(page).await?;

    let template = ReportsIndexTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/admin/reports-management".to_owned(),
        has_next_page: reports.len() as i64 == PAGE_SIZE,
        reports: reports.iter().map(ReportView::from).collect(),
        page: page.number(),
    };

    render(&template)
}
