use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employer {
    pub id: i64,
    pub name: String,
    pub url: Option<String>,
}

/// Row of the per-employer vacancy count report.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct EmployerVacancyCount {
    pub employer_name: String,
    pub vacancy_count: i64,
}
