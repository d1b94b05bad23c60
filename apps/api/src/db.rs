use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::job::JobRow;
use crate::models::resume::ResumeRow;
use crate::models::screening::NewScreening;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

pub async fn find_resume(pool: &PgPool, resume_id: Uuid) -> Result<Option<ResumeRow>, sqlx::Error> {
    sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
        .bind(resume_id)
        .fetch_optional(pool)
        .await
}

pub async fn find_job(pool: &PgPool, job_id: Uuid) -> Result<Option<JobRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(pool)
        .await
}

/// Every known job posting, oldest first. Status is not filtered.
pub async fn list_jobs(pool: &PgPool) -> Result<Vec<JobRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRow>("SELECT * FROM jobs ORDER BY created_at, id")
        .fetch_all(pool)
        .await
}

/// Inserts a screening record and returns its id.
pub async fn insert_screening(pool: &PgPool, screening: &NewScreening) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO screenings
            (id, resume_id, job_id, owner_name, job_description_text, matched_skills, match_score)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(id)
    .bind(screening.resume_id)
    .bind(screening.job_id)
    .bind(&screening.owner_name)
    .bind(&screening.job_description_text)
    .bind(&screening.matched_skills)
    .bind(screening.match_score)
    .execute(pool)
    .await?;

    Ok(id)
}
