use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{Contribution, ContributionStatus, CreateContributionRequest},
    error::{AppError, Result},
    repository::ContributionRepository,
};

#[derive(FromRow)]
struct ContributionRow {
    id: String,
    member_id: String,
    amount: i64,
    month: i32,
    year: i32,
    status: String,
    paid_date: NaiveDateTime,
    created_at: NaiveDateTime,
}

pub struct SqliteContributionRepository {
    pool: SqlitePool,
}

impl SqliteContributionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_contribution(row: ContributionRow) -> Result<Contribution> {
        Ok(Contribution {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            member_id: Uuid::parse_str(&row.member_id)
                .map_err(|e| AppError::Database(e.to_string()))?,
            amount: row.amount,
            month: row.month,
            year: row.year,
            status: Self::parse_contribution_status(&row.status)?,
            paid_date: DateTime::from_naive_utc_and_offset(row.paid_date, Utc),
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
        })
    }

    fn parse_contribution_status(s: &str) -> Result<ContributionStatus> {
        match s {
            "paid" => Ok(ContributionStatus::Paid),
            "unpaid" => Ok(ContributionStatus::Unpaid),
            _ => Err(AppError::Database(format!("Invalid contribution status: {}", s))),
        }
    }

    fn contribution_status_to_str(status: &ContributionStatus) -> &'static str {
        match status {
            ContributionStatus::Paid => "paid",
            ContributionStatus::Unpaid => "unpaid",
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Contribution>> {
        let id_str = id.to_string();
        let row = sqlx::query_as::<_, ContributionRow>(
            r#"
            SELECT id, member_id, amount, month, year, status, paid_date, created_at
            FROM contributions
            WHERE id = ?
            "#,
        )
        .bind(id_str)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_contribution(r)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl ContributionRepository for SqliteContributionRepository {
    async fn create(&self, request: CreateContributionRequest) -> Result<Contribution> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let member_id_str = request.member_id.to_string();
        let status_str = Self::contribution_status_to_str(&request.status);
        let now = Utc::now();
        let paid_date_naive = request.paid_date.unwrap_or(now).naive_utc();
        let now_naive = now.naive_utc();

        sqlx::query(
            r#"
            INSERT INTO contributions (
                id, member_id, amount, month, year, status, paid_date, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id_str)
        .bind(&member_id_str)
        .bind(request.amount)
        .bind(request.month)
        .bind(request.year)
        .bind(status_str)
        .bind(paid_date_naive)
        .bind(now_naive)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created contribution".to_string())
        })
    }

    async fn list(&self) -> Result<Vec<Contribution>> {
        let rows = sqlx::query_as::<_, ContributionRow>(
            r#"
            SELECT id, member_id, amount, month, year, status, paid_date, created_at
            FROM contributions
            ORDER BY paid_date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_contribution).collect()
    }

    async fn list_by_member(&self, member_id: Uuid) -> Result<Vec<Contribution>> {
        let member_id_str = member_id.to_string();
        let rows = sqlx::query_as::<_, ContributionRow>(
            r#"
            SELECT id, member_id, amount, month, year, status, paid_date, created_at
            FROM contributions
            WHERE member_id = ?
            ORDER BY paid_date DESC
            "#,
        )
        .bind(&member_id_str)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_contribution).collect()
    }

    async fn sum_all(&self) -> Result<i64> {
        let row: (i64,) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(amount), 0) as total
            FROM contributions
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(row.0)
    }

    async fn sum_for_period(&self, month: i32, year: i32) -> Result<i64> {
        let row: (i64,) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(amount), 0) as total
            FROM contributions
            WHERE month = ? AND year = ?
            "#,
        )
        .bind(month)
        .bind(year)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(row.0)
    }

    async fn count_paid_members(&self, month: i32, year: i32) -> Result<i64> {
        let paid_status = Self::contribution_status_to_str(&ContributionStatus::Paid);

        let row: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(DISTINCT member_id) as count
            FROM contributions
            WHERE month = ? AND year = ? AND status = ?
            "#,
        )
        .bind(month)
        .bind(year)
        .bind(paid_status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(row.0)
    }

    async fn monthly_totals(&self, year: i32) -> Result<Vec<(i64, i64)>> {
        let rows: Vec<(i64, i64)> = sqlx::query_as(
            r#"
            SELECT month, COALESCE(SUM(amount), 0) as total
            FROM contributions
            WHERE year = ?
            GROUP BY month
            ORDER BY month
            "#,
        )
        .bind(year)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows)
    }
}
