use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{
        Activity, ActivityParticipant, ActivityStatus, CreateActivityRequest,
        UpdateActivityRequest,
    },
    error::{AppError, Result},
    repository::ActivityRepository,
};

#[derive(FromRow)]
struct ActivityRow {
    id: String,
    title: String,
    description: Option<String>,
    date: NaiveDateTime,
    responsible_id: Option<String>,
    status: String,
    created_at: NaiveDateTime,
}

#[derive(FromRow)]
struct ParticipantRow {
    id: String,
    activity_id: String,
    member_id: String,
    created_at: NaiveDateTime,
}

pub struct SqliteActivityRepository {
    pool: SqlitePool,
}

impl SqliteActivityRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_activity(row: ActivityRow) -> Result<Activity> {
        let responsible_id = row
            .responsible_id
            .as_ref()
            .map(|id| Uuid::parse_str(id))
            .transpose()
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(Activity {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            title: row.title,
            description: row.description,
            date: DateTime::from_naive_utc_and_offset(row.date, Utc),
            responsible_id,
            status: Self::parse_activity_status(&row.status)?,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
        })
    }

    fn row_to_participant(row: ParticipantRow) -> Result<ActivityParticipant> {
        Ok(ActivityParticipant {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            activity_id: Uuid::parse_str(&row.activity_id)
                .map_err(|e| AppError::Database(e.to_string()))?,
            member_id: Uuid::parse_str(&row.member_id)
                .map_err(|e| AppError::Database(e.to_string()))?,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
        })
    }

    fn parse_activity_status(s: &str) -> Result<ActivityStatus> {
        match s {
            "upcoming" => Ok(ActivityStatus::Upcoming),
            "past" => Ok(ActivityStatus::Past),
            _ => Err(AppError::Database(format!("Invalid activity status: {}", s))),
        }
    }

    fn activity_status_to_str(status: &ActivityStatus) -> &'static str {
        match status {
            ActivityStatus::Upcoming => "upcoming",
            ActivityStatus::Past => "past",
        }
    }

    async fn find_participant(&self, id: Uuid) -> Result<Option<ActivityParticipant>> {
        let id_str = id.to_string();
        let row = sqlx::query_as::<_, ParticipantRow>(
            r#"
            SELECT id, activity_id, member_id, created_at
            FROM activity_participants
            WHERE id = ?
            "#,
        )
        .bind(id_str)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_participant(r)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl ActivityRepository for SqliteActivityRepository {
    async fn create(&self, request: CreateActivityRequest) -> Result<Activity> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let date_naive = request.date.naive_utc();
        let responsible_id_str = request.responsible_id.map(|id| id.to_string());
        let status_str = Self::activity_status_to_str(&request.status);
        let now_naive = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO activities (
                id, title, description, date, responsible_id, status, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id_str)
        .bind(&request.title)
        .bind(&request.description)
        .bind(date_naive)
        .bind(&responsible_id_str)
        .bind(status_str)
        .bind(now_naive)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created activity".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Activity>> {
        let id_str = id.to_string();
        let row = sqlx::query_as::<_, ActivityRow>(
            r#"
            SELECT id, title, description, date, responsible_id, status, created_at
            FROM activities
            WHERE id = ?
            "#,
        )
        .bind(id_str)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_activity(r)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Activity>> {
        let rows = sqlx::query_as::<_, ActivityRow>(
            r#"
            SELECT id, title, description, date, responsible_id, status, created_at
            FROM activities
            ORDER BY date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_activity).collect()
    }

    async fn list_upcoming(&self, now: DateTime<Utc>, limit: i64) -> Result<Vec<Activity>> {
        let now_naive = now.naive_utc();

        let rows = sqlx::query_as::<_, ActivityRow>(
            r#"
            SELECT id, title, description, date, responsible_id, status, created_at
            FROM activities
            WHERE date >= ?
            ORDER BY date ASC
            LIMIT ?
            "#,
        )
        .bind(now_naive)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_activity).collect()
    }

    async fn count_upcoming(&self, now: DateTime<Utc>) -> Result<i64> {
        let now_naive = now.naive_utc();

        let row: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) as count
            FROM activities
            WHERE date >= ?
            "#,
        )
        .bind(now_naive)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(row.0)
    }

    async fn update(&self, id: Uuid, update: UpdateActivityRequest) -> Result<Option<Activity>> {
        let id_str = id.to_string();
        let date_naive = update.date.map(|dt| dt.naive_utc());
        let responsible_id_str = update.responsible_id.map(|id| id.to_string());
        let status_str = update.status.as_ref().map(Self::activity_status_to_str);

        let result = sqlx::query(
            r#"
            UPDATE activities
            SET title = COALESCE(?, title),
                description = COALESCE(?, description),
                date = COALESCE(?, date),
                responsible_id = COALESCE(?, responsible_id),
                status = COALESCE(?, status)
            WHERE id = ?
            "#,
        )
        .bind(&update.title)
        .bind(&update.description)
        .bind(date_naive)
        .bind(&responsible_id_str)
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
        let result = sqlx::query("DELETE FROM activities WHERE id = ?")
            .bind(&id_str)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn add_participant(
        &self,
        activity_id: Uuid,
        member_id: Uuid,
    ) -> Result<ActivityParticipant> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let activity_id_str = activity_id.to_string();
        let member_id_str = member_id.to_string();
        let now_naive = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO activity_participants (id, activity_id, member_id, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&id_str)
        .bind(&activity_id_str)
        .bind(&member_id_str)
        .bind(now_naive)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_participant(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created participant".to_string())
        })
    }

    async fn remove_participant(&self, activity_id: Uuid, member_id: Uuid) -> Result<bool> {
        let activity_id_str = activity_id.to_string();
        let member_id_str = member_id.to_string();

        let result = sqlx::query(
            r#"
            DELETE FROM activity_participants
            WHERE activity_id = ? AND member_id = ?
            "#,
        )
        .bind(&activity_id_str)
        .bind(&member_id_str)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_participants(&self, activity_id: Uuid) -> Result<Vec<ActivityParticipant>> {
        let activity_id_str = activity_id.to_string();
        let rows = sqlx::query_as::<_, ParticipantRow>(
            r#"
            SELECT id, activity_id, member_id, created_at
            FROM activity_participants
            WHERE activity_id = ?
            ORDER BY created_at ASC
            "#,
        )
        .bind(&activity_id_str)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_participant).collect()
    }
}
