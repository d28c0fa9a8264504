use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{Attendance, CreateAttendanceRequest, ServiceType},
    error::{AppError, Result},
    repository::AttendanceRepository,
};

#[derive(FromRow)]
struct AttendanceRow {
    id: String,
    member_id: String,
    service_type: String,
    date: NaiveDate,
    present: i32,
    created_at: NaiveDateTime,
}

pub struct SqliteAttendanceRepository {
    pool: SqlitePool,
}

impl SqliteAttendanceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_attendance(row: AttendanceRow) -> Result<Attendance> {
        Ok(Attendance {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            member_id: Uuid::parse_str(&row.member_id)
                .map_err(|e| AppError::Database(e.to_string()))?,
            service_type: Self::parse_service_type(&row.service_type)?,
            date: row.date,
            present: row.present != 0,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
        })
    }

    fn parse_service_type(s: &str) -> Result<ServiceType> {
        match s {
            "Mardi - Méditation" => Ok(ServiceType::TuesdayMeditation),
            "Jeudi - Exhortation" => Ok(ServiceType::ThursdayExhortation),
            "Dimanche - Louange et Adoration" => Ok(ServiceType::SundayWorship),
            "Activités" => Ok(ServiceType::Activities),
            _ => Err(AppError::Database(format!("Invalid service type: {}", s))),
        }
    }

    fn service_type_to_str(service_type: &ServiceType) -> &'static str {
        match service_type {
            ServiceType::TuesdayMeditation => "Mardi - Méditation",
            ServiceType::ThursdayExhortation => "Jeudi - Exhortation",
            ServiceType::SundayWorship => "Dimanche - Louange et Adoration",
            ServiceType::Activities => "Activités",
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Attendance>> {
        let id_str = id.to_string();
        let row = sqlx::query_as::<_, AttendanceRow>(
            r#"
            SELECT id, member_id, service_type, date, present, created_at
            FROM attendances
            WHERE id = ?
            "#,
        )
        .bind(id_str)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_attendance(r)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl AttendanceRepository for SqliteAttendanceRepository {
    async fn create(&self, request: CreateAttendanceRequest) -> Result<Attendance> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let member_id_str = request.member_id.to_string();
        let service_type_str = Self::service_type_to_str(&request.service_type);
        let present_int = if request.present { 1i32 } else { 0i32 };
        let now_naive = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO attendances (id, member_id, service_type, date, present, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id_str)
        .bind(&member_id_str)
        .bind(service_type_str)
        .bind(request.date)
        .bind(present_int)
        .bind(now_naive)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created attendance".to_string())
        })
    }

    async fn create_bulk(&self, requests: Vec<CreateAttendanceRequest>) -> Result<Vec<Attendance>> {
        if requests.is_empty() {
            return Err(AppError::BadRequest("No attendance rows to record".to_string()));
        }

        let now_naive = Utc::now().naive_utc();
        let mut ids = Vec::with_capacity(requests.len());

        // All rows land or none do.
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        for request in &requests {
            let id = Uuid::new_v4();
            let id_str = id.to_string();
            let member_id_str = request.member_id.to_string();
            let service_type_str = Self::service_type_to_str(&request.service_type);
            let present_int = if request.present { 1i32 } else { 0i32 };

            sqlx::query(
                r#"
                INSERT INTO attendances (id, member_id, service_type, date, present, created_at)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&id_str)
            .bind(&member_id_str)
            .bind(service_type_str)
            .bind(request.date)
            .bind(present_int)
            .bind(now_naive)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

            ids.push(id);
        }

        tx.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut created = Vec::with_capacity(ids.len());
        for id in ids {
            let attendance = self.find_by_id(id).await?.ok_or_else(|| {
                AppError::Database("Failed to retrieve created attendance".to_string())
            })?;
            created.push(attendance);
        }

        Ok(created)
    }

    async fn list(&self) -> Result<Vec<Attendance>> {
        let rows = sqlx::query_as::<_, AttendanceRow>(
            r#"
            SELECT id, member_id, service_type, date, present, created_at
            FROM attendances
            ORDER BY date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_attendance).collect()
    }

    async fn list_by_member(&self, member_id: Uuid) -> Result<Vec<Attendance>> {
        let member_id_str = member_id.to_string();
        let rows = sqlx::query_as::<_, AttendanceRow>(
            r#"
            SELECT id, member_id, service_type, date, present, created_at
            FROM attendances
            WHERE member_id = ?
            ORDER BY date DESC
            "#,
        )
        .bind(&member_id_str)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_attendance).collect()
    }

    async fn count_all(&self) -> Result<i64> {
        let row: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) as count
            FROM attendances
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(row.0)
    }

    async fn count_present(&self) -> Result<i64> {
        let row: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) as count
            FROM attendances
            WHERE present = 1
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(row.0)
    }
}
