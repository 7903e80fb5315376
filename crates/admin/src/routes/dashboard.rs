//! Dashboard route handler.

use askama::Template;
use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;
use tracing::instrument;

use cartloom_core::Role;

use crate::{
    db::{AccountRepository, OrderRepository, ReportRepository},
    filters,
    middleware::auth::RequireAdminAuth,
    models::{Account, CurrentAdmin, Report},
    state::AppState,
    stats::{MonthPoint, MonthlyBuckets, YearWindow},
};

use super::{format_date, render};

/// How many rows the dashboard side lists show.
const RECENT_LIMIT: i64 = 5;

/// Dashboard query parameters.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Calendar year for the monthly series; defaults to the current year.
    pub year: Option<String>,
}

/// Admin user view for templates.
#[derive(Debug, Clone)]
pub struct AdminUserView {
    pub name: String,
    pub email: String,
}

impl From<&CurrentAdmin> for AdminUserView {
    fn from(admin: &CurrentAdmin) -> Self {
        Self {
            name: admin.name.clone(),
            email: admin.email.to_string(),
        }
    }
}

/// Account row for the dashboard side lists.
#[derive(Debug, Clone)]
pub struct AccountSummaryView {
    pub eid: String,
    pub name: String,
    pub email: String,
    pub joined: String,
}

impl From<&Account> for AccountSummaryView {
    fn from(account: &Account) -> Self {
        Self {
            eid: account.eid.to_string(),
            name: account.name.clone(),
            email: account.email.to_string(),
            joined: format_date(account.created_at),
        }
    }
}

/// Report row for the dashboard side list.
#[derive(Debug, Clone)]
pub struct ReportSummaryView {
    pub reporter: String,
    pub subject: String,
    pub filed: String,
}

impl From<&Report> for ReportSummaryView {
    fn from(report: &Report) -> Self {
        Self {
            reporter: report
                .reporter_name
                .clone()
                .unwrap_or_else(|| "Deleted account".to_owned()),
            subject: report.subject.clone(),
            filed: format_date(report.created_at),
        }
    }
}

/// Dashboard template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub year: i32,
    pub user_count: i64,
    pub vendor_count: i64,
    pub pending_verifications: i64,
    pub order_count: i64,
    pub user_signups: Vec<MonthPoint>,
    pub order_volume: Vec<MonthPoint>,
    pub recent_users: Vec<AccountSummaryView>,
    pub recent_vendors: Vec<AccountSummaryView>,
    pub recent_reports: Vec<ReportSummaryView>,
}

/// Dashboard page handler.
#[instrument(skip(admin, state))]
pub async fn home(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> crate::error::Result<Html<String>> {
    let window = YearWindow::for_year(query.year.as_deref().and_then(|y| y.trim().parse().ok()));

    let accounts = AccountRepository::new(state.pool());
    let orders = OrderRepository::new(state.pool());
    let reports = ReportRepository::new(state.pool());

    let (
        user_count,
        vendor_count,
        pending_verifications,
        order_count,
        signup_rows,
        order_rows,
        recent_users,
        recent_vendors,
        recent_reports,
    ) = tokio::try_join!(
        accounts.count_by_role(Role::User),
        accounts.count_by_role(Role::Vendor),
        accounts.count_pending_verifications(),
        orders.count_for_storefront(state.storefront()),
        accounts.monthly_user_signups(window),
        orders.monthly_orders(state.storefront(), window),
        accounts.recent_by_role(Role::User, RECENT_LIMIT),
        accounts.recent_by_role(Role::Vendor, RECENT_LIMIT),
        reports.recent(RECENT_LIMIT),
    )?;

    let template = DashboardTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/admin/home".to_owned(),
        year: window.year(),
        user_count,
        vendor_count,
        pending_verifications,
        order_count,
        user_signups: MonthlyBuckets::from_rows(signup_rows).series(),
        order_volume: MonthlyBuckets::from_rows(order_rows).series(),
        recent_users: recent_users.iter().map(AccountSummaryView::from).collect(),
        recent_vendors: recent_vendors
            .iter()
            .map(AccountSummaryView::from)
            .collect(),
        recent_reports: recent_reports
            .iter()
            .map(ReportSummaryView::from)
            .collect(),
    };

    render(&template)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};

    use cartloom_core::{AccountEid, Email, VerificationStatus};

    use super::*;

    #[test]
    fn account_summary_formats_join_date() {
        let account = Account {
            eid: AccountEid::new("u1"),
            role: Role::User,
            name: "Mina".to_owned(),
            email: Email::parse("mina@example.com").unwrap(),
            verification: VerificationStatus::None,
            verification_at: None,
            verify_documents: None,
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap(),
        };
        let view = AccountSummaryView::from(&account);
        assert_eq!(view.joined, "Jun 01, 2025");
        assert_eq!(view.email, "mina@example.com");
    }

    #[test]
    fn report_summary_falls_back_for_deleted_reporter() {
        let report = Report {
            user_eid: AccountEid::new("gone"),
            reporter_name: None,
            reporter_email: None,
            subject: "Broken listing".to_owned(),
            message: "The page 404s".to_owned(),
            created_at: Utc.with_ymd_and_hms(2025, 6, 2, 8, 0, 0).unwrap(),
        };
        let view = ReportSummaryView::from(&report);
        assert_eq!(view.reporter, "Deleted account");
    }
}
