use crate::config::DbSettings;
use crate::database::connection::connect;
use crate::error::Result;
use crate::models::employer::Employer;
use crate::models::vacancy::NormalizedVacancy;
use sqlx::Connection;
use tracing::{info, instrument};

#[derive(Clone)]
pub struct PersistenceService {
    settings: DbSettings,
}

impl PersistenceService {
    pub fn new(settings: DbSettings) -> Self {
        Self { settings }
    }

    /// Inserts all employers and commits, then inserts all vacancies and commits.
    ///
    /// There is no conflict handling: a duplicate key or a vacancy pointing at an
    /// unknown employer aborts the current transaction and is returned as an error.
    #[instrument(skip_all, fields(employers = employers.len(), vacancies = vacancies.len()))]
    pub async fn save(&self, employers: &[Employer], vacancies: &[NormalizedVacancy]) -> Result<()> {
        let mut conn = connect(&self.settings).await?;

        let mut tx = conn.begin().await?;
        for employer in employers {
            sqlx::query(
                r#"INSERT INTO employers (employer_id, employer_name, employer_url)
                   VALUES ($1, $2, $3)"#,
            )
            .bind(employer.id)
            .bind(&employer.name)
            .bind(&employer.url)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        let mut tx = conn.begin().await?;
        for vacancy in vacancies {
            sqlx::query(
                r#"
                INSERT INTO vacancies (
                    vacancy_id, employer_id, vacancy_name, vacancy_url, city,
                    publish_date, schedule, salary_from, salary_to
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(vacancy.vacancy_id)
            .bind(vacancy.employer_id)
            .bind(&vacancy.vacancy_name)
            .bind(&vacancy.vacancy_url)
            .bind(&vacancy.city)
            .bind(vacancy.publish_date)
            .bind(&vacancy.schedule)
            .bind(vacancy.salary_from)
            .bind(vacancy.salary_to)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        conn.close().await?;
        info!("Employers and vacancies saved");
        Ok(())
    }
}
