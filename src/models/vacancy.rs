use chrono::NaiveDate;
use sqlx::FromRow;

/// A vacancy ready to be written to the `vacancies` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedVacancy {
    pub vacancy_id: i64,
    pub employer_id: i64,
    pub vacancy_name: String,
    pub vacancy_url: String,
    pub city: String,
    pub publish_date: NaiveDate,
    pub schedule: String,
    pub salary_from: Option<i32>,
    pub salary_to: Option<i32>,
}

/// A full `vacancies` row as read back by the filter reports.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct StoredVacancy {
    pub vacancy_id: i64,
    pub employer_id: i64,
    pub vacancy_name: String,
    pub vacancy_url: Option<String>,
    pub city: Option<String>,
    pub publish_date: Option<NaiveDate>,
    pub schedule: Option<String>,
    pub salary_from: Option<i32>,
    pub salary_to: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct VacancyListing {
    pub employer_name: String,
    pub vacancy_name: String,
    pub salary_from: Option<i32>,
    pub salary_to: Option<i32>,
    pub vacancy_url: Option<String>,
}
