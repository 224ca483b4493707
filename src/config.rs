use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;
use std::time::Duration;
use validator::Validate;

const DEFAULT_DB_NAME: &str = "head_hunters";
const DEFAULT_MAINTENANCE_DB: &str = "postgres";
const DEFAULT_API_URL: &str = "https://api.hh.ru";
const DEFAULT_USER_AGENT: &str = "vacancy-ingest/0.1 (vacancy-ingest@localhost)";

/// Connection parameters shared by every database operation. Each operation
/// opens its own connection against `database`.
#[derive(Debug, Clone)]
pub struct DbSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub maintenance_database: String,
}

/// Paging and throttling knobs for the two fetch passes.
#[derive(Debug, Clone, Validate)]
pub struct FetchSettings {
    pub area: u32,
    #[validate(range(min = 1))]
    pub search_pages: u32,
    #[validate(range(min = 1))]
    pub employer_pages: u32,
    #[validate(range(min = 1, max = 100))]
    pub per_page: u32,
    pub min_vacancies: usize,
    pub employer_delay: Duration,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            area: 113,
            search_pages: 20,
            employer_pages: 10,
            per_page: 100,
            min_vacancies: 3,
            employer_delay: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub db: DbSettings,
    pub api_url: String,
    pub user_agent: String,
    pub fetch: FetchSettings,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let defaults = FetchSettings::default();
        let fetch = FetchSettings {
            area: get_env_parse_or("HH_AREA", defaults.area)?,
            search_pages: get_env_parse_or("SEARCH_PAGES", defaults.search_pages)?,
            employer_pages: get_env_parse_or("EMPLOYER_PAGES", defaults.employer_pages)?,
            per_page: get_env_parse_or("PER_PAGE", defaults.per_page)?,
            min_vacancies: get_env_parse_or("MIN_VACANCIES", defaults.min_vacancies)?,
            employer_delay: Duration::from_secs(get_env_parse_or(
                "EMPLOYER_DELAY_SECS",
                defaults.employer_delay.as_secs(),
            )?),
        };
        fetch.validate()?;

        Ok(Self {
            db: DbSettings {
                host: get_env("DB_HOST")?,
                port: get_env_parse("DB_PORT")?,
                user: get_env("DB_USER")?,
                password: get_env("DB_PASSWORD")?,
                database: env::var("DB_NAME").unwrap_or_else(|_| DEFAULT_DB_NAME.to_string()),
                maintenance_database: env::var("DB_MAINTENANCE_NAME")
                    .unwrap_or_else(|_| DEFAULT_MAINTENANCE_DB.to_string()),
            },
            api_url: env::var("HH_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            user_agent: env::var("HH_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
            fetch,
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse<T>(name: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = get_env(name)?;
    raw.parse()
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(_) => get_env_parse(name),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> Result<&'static Config> {
    CONFIG
        .get()
        .ok_or_else(|| Error::Config("Configuration has not been initialized".to_string()))
}
