use crate::config::DbSettings;
use crate::database::connection::connect;
use crate::error::Result;
use crate::models::employer::EmployerVacancyCount;
use crate::models::vacancy::{StoredVacancy, VacancyListing};
use sqlx::Connection;
use tracing::instrument;

const VACANCY_COLUMNS: &str = "vacancy_id, employer_id, vacancy_name, vacancy_url, city, \
                               publish_date, schedule, salary_from, salary_to";

/// Read-only reports over the ingested data. Every query uses its own connection.
#[derive(Clone)]
pub struct ReportService {
    settings: DbSettings,
}

impl ReportService {
    pub fn new(settings: DbSettings) -> Self {
        Self { settings }
    }

    #[instrument(skip(self))]
    pub async fn companies_and_vacancies_count(&self) -> Result<Vec<EmployerVacancyCount>> {
        let mut conn = connect(&self.settings).await?;
        let rows = sqlx::query_as::<_, EmployerVacancyCount>(
            r#"
            SELECT employers.employer_name, COUNT(*) AS vacancy_count
            FROM vacancies
            INNER JOIN employers USING (employer_id)
            GROUP BY employers.employer_name
            ORDER BY employers.employer_name
            "#,
        )
        .fetch_all(&mut conn)
        .await?;
        conn.close().await?;
        Ok(rows)
    }

    #[instrument(skip(self))]
    pub async fn all_vacancies(&self) -> Result<Vec<VacancyListing>> {
        let mut conn = connect(&self.settings).await?;
        let rows = sqlx::query_as::<_, VacancyListing>(
            r#"
            SELECT employers.employer_name, vacancy_name, salary_from, salary_to, vacancy_url
            FROM vacancies
            INNER JOIN employers USING (employer_id)
            ORDER BY vacancy_id
            "#,
        )
        .fetch_all(&mut conn)
        .await?;
        conn.close().await?;
        Ok(rows)
    }

    /// Mean of the `salary_from` column and the `salary_to` column, averaged.
    ///
    /// This is not the mean of per-row midpoints: each column skips its own NULLs.
    /// `None` when no vacancy carries a salary.
    #[instrument(skip(self))]
    pub async fn avg_salary(&self) -> Result<Option<i64>> {
        let mut conn = connect(&self.settings).await?;
        let avg: Option<f64> = sqlx::query_scalar(
            "SELECT ((AVG(salary_from) + AVG(salary_to)) / 2)::DOUBLE PRECISION FROM vacancies",
        )
        .fetch_one(&mut conn)
        .await?;
        conn.close().await?;
        Ok(avg.map(round_salary))
    }

    /// Vacancies whose integer midpoint `(salary_from + salary_to) / 2` reaches the average.
    /// The sum is taken in `BIGINT` so two large `INT` bounds cannot overflow it.
    #[instrument(skip(self))]
    pub async fn vacancies_with_higher_salary(&self) -> Result<Vec<StoredVacancy>> {
        let Some(avg) = self.avg_salary().await? else {
            return Ok(Vec::new());
        };

        let mut conn = connect(&self.settings).await?;
        let rows = sqlx::query_as::<_, StoredVacancy>(&format!(
            "SELECT {VACANCY_COLUMNS} FROM vacancies \
             WHERE (salary_from::BIGINT + salary_to) / 2 >= $1 ORDER BY vacancy_id"
        ))
        .bind(avg)
        .fetch_all(&mut conn)
        .await?;
        conn.close().await?;
        Ok(rows)
    }

    /// Vacancies whose name contains `keyword` verbatim (case-sensitive).
    #[instrument(skip(self))]
    pub async fn vacancies_with_keyword(&self, keyword: &str) -> Result<Vec<StoredVacancy>> {
        let mut conn = connect(&self.settings).await?;
        let rows = sqlx::query_as::<_, StoredVacancy>(&format!(
            "SELECT {VACANCY_COLUMNS} FROM vacancies \
             WHERE POSITION($1 IN vacancy_name) > 0 ORDER BY vacancy_id"
        ))
        .bind(keyword)
        .fetch_all(&mut conn)
        .await?;
        conn.close().await?;
        Ok(rows)
    }
}

/// Rounds half to even, so 250.5 becomes 250 and 251.5 becomes 252.
pub fn round_salary(value: f64) -> i64 {
    value.round_ties_even() as i64
}
