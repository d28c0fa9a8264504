use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{CreateMemberRequest, Member, MemberRef, MemberStatus, UpdateMemberRequest},
    error::{AppError, Result},
    repository::MemberRepository,
};

// Database row struct that matches the SQLite schema
#[derive(FromRow)]
struct MemberRow {
    id: String,
    first_name: String,
    last_name: String,
    date_of_birth: Option<NaiveDate>,
    photo_url: Option<String>,
    church_role: Option<String>,
    external_role: Option<String>,
    neighborhood: Option<String>,
    phone: Option<String>,
    is_leader: i32,
    status: String,
    created_at: NaiveDateTime,
}

pub struct SqliteMemberRepository {
    pool: SqlitePool,
}

impl SqliteMemberRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_member(row: MemberRow) -> Result<Member> {
        Ok(Member {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            first_name: row.first_name,
            last_name: row.last_name,
            date_of_birth: row.date_of_birth,
            photo_url: row.photo_url,
            church_role: row.church_role,
            external_role: row.external_role,
            neighborhood: row.neighborhood,
            phone: row.phone,
            is_leader: row.is_leader != 0,
            status: Self::parse_member_status(&row.status)?,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
        })
    }

    fn parse_member_status(s: &str) -> Result<MemberStatus> {
        match s {
            "active" => Ok(MemberStatus::Active),
            "inactive" => Ok(MemberStatus::Inactive),
            _ => Err(AppError::Database(format!("Invalid member status: {}", s))),
        }
    }

    fn member_status_to_str(status: &MemberStatus) -> &'static str {
        match status {
            MemberStatus::Active => "active",
            MemberStatus::Inactive => "inactive",
        }
    }
}

#[async_trait]
impl MemberRepository for SqliteMemberRepository {
    async fn create(&self, request: CreateMemberRequest) -> Result<Member> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let status_str = Self::member_status_to_str(&request.status);
        let is_leader_int = if request.is_leader { 1i32 } else { 0i32 };
        let now_naive = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO members (
                id, first_name, last_name, date_of_birth, photo_url,
                church_role, external_role, neighborhood, phone,
                is_leader, status, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id_str)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(request.date_of_birth)
        .bind(&request.photo_url)
        .bind(&request.church_role)
        .bind(&request.external_role)
        .bind(&request.neighborhood)
        .bind(&request.phone)
        .bind(is_leader_int)
        .bind(status_str)
        .bind(now_naive)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created member".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Member>> {
        let id_str = id.to_string();
        let row = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT id, first_name, last_name, date_of_birth, photo_url,
                   church_role, external_role, neighborhood, phone,
                   is_leader, status, created_at
            FROM members
            WHERE id = ?
            "#,
        )
        .bind(id_str)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_member(r)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Member>> {
        let rows = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT id, first_name, last_name, date_of_birth, photo_url,
                   church_role, external_role, neighborhood, phone,
                   is_leader, status, created_at
            FROM members
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_member).collect()
    }

    async fn count_active(&self) -> Result<i64> {
        let active_status = Self::member_status_to_str(&MemberStatus::Active);

        let row: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) as count
            FROM members
            WHERE status = ?
            "#,
        )
        .bind(active_status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(row.0)
    }

    async fn name_index(&self) -> Result<Vec<MemberRef>> {
        let rows: Vec<(String, String, String, Option<String>)> = sqlx::query_as(
            r#"
            SELECT id, first_name, last_name, photo_url
            FROM members
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter()
            .map(|(id, first_name, last_name, photo_url)| {
                Ok(MemberRef {
                    id: Uuid::parse_str(&id).map_err(|e| AppError::Database(e.to_string()))?,
                    first_name,
                    last_name,
                    photo_url,
                })
            })
            .collect()
    }

    async fn update(&self, id: Uuid, update: UpdateMemberRequest) -> Result<Option<Member>> {
        let id_str = id.to_string();
        let status_str = update.status.as_ref().map(Self::member_status_to_str);
        let is_leader_int = update.is_leader.map(|b| if b { 1i32 } else { 0i32 });

        let result = sqlx::query(
            r#"
            UPDATE members
            SET first_name = COALESCE(?, first_name),
                last_name = COALESCE(?, last_name),
                date_of_birth = COALESCE(?, date_of_birth),
                photo_url = COALESCE(?, photo_url),
                church_role = COALESCE(?, church_role),
                external_role = COALESCE(?, external_role),
                neighborhood = COALESCE(?, neighborhood),
                phone = COALESCE(?, phone),
                is_leader = COALESCE(?, is_leader),
                status = COALESCE(?, status)
            WHERE id = ?
            "#,
        )
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(update.date_of_birth)
        .bind(&update.photo_url)
        .bind(&update.church_role)
        .bind(&update.external_role)
        .bind(&update.neighborhood)
        .bind(&update.phone)
        .bind(is_leader_int)
        .bind(status_str)
        .bind(&id_str)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let id_str = id.to_string();
        let result = sqlx::query("DELETE FROM members WHERE id = ?")
            .bind(&id_str)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
