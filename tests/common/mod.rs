use std::env;

use chrono::NaiveDate;
use vacancy_ingest::config::DbSettings;
use vacancy_ingest::database::schema::create_database;
use vacancy_ingest::models::employer::Employer;
use vacancy_ingest::models::vacancy::NormalizedVacancy;

/// Settings for a throwaway database named after the calling test.
pub fn test_settings(database: &str) -> DbSettings {
    dotenvy::dotenv().ok();
    DbSettings {
        host: env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
        port: env::var("DB_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5432),
        user: env::var("DB_USER").unwrap_or_else(|_| "postgres".to_string()),
        password: env::var("DB_PASSWORD").unwrap_or_else(|_| "password".to_string()),
        database: format!("vacancy_ingest_{}", database),
        maintenance_database: "postgres".to_string(),
    }
}

pub async fn fresh_database(name: &str) -> DbSettings {
    let settings = test_settings(name);
    create_database(&settings).await.expect("create database");
    settings
}

pub fn employer(id: i64, name: &str) -> Employer {
    Employer {
        id,
        name: name.to_string(),
        url: Some(format!("https://api.hh.ru/employers/{}", id)),
    }
}

pub fn vacancy(
    vacancy_id: i64,
    employer_id: i64,
    name: &str,
    salary: Option<(i32, i32)>,
) -> NormalizedVacancy {
    NormalizedVacancy {
        vacancy_id,
        employer_id,
        vacancy_name: name.to_string(),
        vacancy_url: format!("https://hh.ru/vacancy/{}", vacancy_id),
        city: "Москва".to_string(),
        publish_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        schedule: "Полный день".to_string(),
        salary_from: salary.map(|(from, _)| from),
        salary_to: salary.map(|(_, to)| to),
    }
}
