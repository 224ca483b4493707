pub mod employer_service;
pub mod hh_client;
pub mod paging;
pub mod persistence_service;
pub mod report_service;
pub mod vacancy_collector;
