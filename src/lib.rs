pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

use crate::config::{Config, DbSettings};
use crate::error::Result;
use crate::services::{
    employer_service::EmployerService, hh_client::HhClient,
    persistence_service::PersistenceService, report_service::ReportService,
    vacancy_collector::VacancyCollector,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: DbSettings,
    pub employer_service: EmployerService,
    pub vacancy_collector: VacancyCollector,
    pub persistence_service: PersistenceService,
    pub report_service: ReportService,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        let source = Arc::new(HhClient::new(config.api_url.clone(), &config.user_agent)?);

        let employer_service = EmployerService::new(source.clone(), config.fetch.clone());
        let vacancy_collector = VacancyCollector::new(source, config.fetch.clone());
        let persistence_service = PersistenceService::new(config.db.clone());
        let report_service = ReportService::new(config.db.clone());

        Ok(Self {
            db: config.db.clone(),
            employer_service,
            vacancy_collector,
            persistence_service,
            report_service,
        })
    }
}
