use crate::config::FetchSettings;
use crate::dto::hh_dto::RawEmployer;
use crate::error::Result;
use crate::models::employer::Employer;
use crate::services::hh_client::{PageQuery, VacancySource};
use crate::services::paging::fetch_pages;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};

#[derive(Clone)]
pub struct EmployerService {
    source: Arc<dyn VacancySource>,
    settings: FetchSettings,
}

impl EmployerService {
    pub fn new(source: Arc<dyn VacancySource>, settings: FetchSettings) -> Self {
        Self { source, settings }
    }

    /// Employers with more than `min_vacancies` postings among the keyword search results.
    #[instrument(skip(self))]
    pub async fn discover(&self, keyword: &str) -> Result<Vec<Employer>> {
        let query = PageQuery::Search {
            text: keyword.to_string(),
            area: self.settings.area,
        };
        let mut items = Vec::new();
        fetch_pages(
            self.source.as_ref(),
            &query,
            self.settings.search_pages,
            self.settings.per_page,
            &mut items,
        )
        .await?;

        let employers = top_employers(&items, self.settings.min_vacancies);
        info!(
            fetched = items.len(),
            employers = employers.len(),
            "Employer discovery finished"
        );
        Ok(employers)
    }
}

/// Tallies employers across raw search items and keeps those seen more than `threshold` times.
///
/// Items lacking an employer id, name or url key are ignored. For repeated employers the
/// last seen name and url win; output order is first appearance.
pub fn top_employers(items: &[JsonValue], threshold: usize) -> Vec<Employer> {
    let mut order: Vec<i64> = Vec::new();
    let mut counts: HashMap<i64, usize> = HashMap::new();
    let mut latest: HashMap<i64, Employer> = HashMap::new();

    for employer in items.iter().filter_map(employer_of) {
        let count = counts.entry(employer.id).or_insert(0);
        if *count == 0 {
            order.push(employer.id);
        }
        *count += 1;
        latest.insert(employer.id, employer);
    }

    order
        .into_iter()
        .filter(|id| counts.get(id).copied().unwrap_or(0) > threshold)
        .filter_map(|id| latest.remove(&id))
        .collect()
}

/// Only the `employer` object is decoded, so unrelated fields never cost an item its tally.
fn employer_of(value: &JsonValue) -> Option<Employer> {
    let raw = RawEmployer::deserialize(value.get("employer")?).ok()?;
    let id = raw.id?.trim().parse().ok()?;
    let name = raw.name?;
    let url = raw.url?;
    Some(Employer { id, name, url })
}
