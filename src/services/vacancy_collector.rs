use crate::config::FetchSettings;
use crate::dto::hh_dto::{RawSalary, RawVacancyItem};
use crate::error::Result;
use crate::models::employer::Employer;
use crate::models::vacancy::NormalizedVacancy;
use crate::services::hh_client::{PageQuery, VacancySource};
use crate::services::paging::fetch_pages;
use crate::utils::time::publish_date;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::{debug, info, instrument};

#[derive(Clone)]
pub struct VacancyCollector {
    source: Arc<dyn VacancySource>,
    settings: FetchSettings,
}

impl VacancyCollector {
    pub fn new(source: Arc<dyn VacancySource>, settings: FetchSettings) -> Self {
        Self { source, settings }
    }

    /// Fetches every employer's vacancies, then normalizes the pooled items in one go.
    #[instrument(skip(self, employers), fields(employers = employers.len()))]
    pub async fn collect(&self, employers: &[Employer]) -> Result<Vec<NormalizedVacancy>> {
        let mut items: Vec<JsonValue> = Vec::new();

        for employer in employers {
            tokio::time::sleep(self.settings.employer_delay).await;
            debug!(employer_id = employer.id, "Fetching employer vacancies");
            fetch_pages(
                self.source.as_ref(),
                &PageQuery::Employer {
                    employer_id: employer.id,
                },
                self.settings.employer_pages,
                self.settings.per_page,
                &mut items,
            )
            .await?;
        }

        let vacancies: Vec<NormalizedVacancy> = items.iter().filter_map(normalize).collect();
        info!(
            fetched = items.len(),
            normalized = vacancies.len(),
            "Vacancy collection finished"
        );
        Ok(vacancies)
    }
}

/// Maps a raw salary object onto a `(from, to)` pair.
///
/// - no salary object: `(None, None)`
/// - only one bound: that bound is used for both ends
/// - both bounds: taken as-is
///
/// Returns `None` for a salary object with neither bound; such vacancies are dropped.
/// Zero and values outside the `INT` column range count as a missing bound.
pub fn normalize_salary(salary: Option<&RawSalary>) -> Option<(Option<i32>, Option<i32>)> {
    let Some(salary) = salary else {
        return Some((None, None));
    };
    let bound = |value: Option<i64>| {
        let value = value.filter(|v| *v != 0)?;
        match i32::try_from(value) {
            Ok(v) => Some(v),
            Err(_) => {
                debug!(value, "Ignoring salary bound outside the INT range");
                None
            }
        }
    };

    match (bound(salary.from), bound(salary.to)) {
        (Some(from), None) => Some((Some(from), Some(from))),
        (None, Some(to)) => Some((Some(to), Some(to))),
        (Some(from), Some(to)) => Some((Some(from), Some(to))),
        (None, None) => None,
    }
}

/// Converts one raw item into a persistable vacancy, or `None` when a required field is missing.
pub fn normalize(value: &JsonValue) -> Option<NormalizedVacancy> {
    let item = RawVacancyItem::from_value(value)?;
    let normalized = normalize_item(&item);
    if normalized.is_none() {
        debug!(vacancy_id = ?item.id, "Skipping vacancy with missing fields");
    }
    normalized
}

fn normalize_item(item: &RawVacancyItem) -> Option<NormalizedVacancy> {
    let (salary_from, salary_to) = normalize_salary(item.salary.as_ref())?;

    Some(NormalizedVacancy {
        vacancy_id: item.id.as_deref()?.trim().parse().ok()?,
        employer_id: item.employer.as_ref()?.id.as_deref()?.trim().parse().ok()?,
        vacancy_name: item.name.clone()?,
        vacancy_url: item.alternate_url.clone()?,
        city: item.area.as_ref()?.name.clone()?,
        publish_date: publish_date(item.created_at.as_deref()?)?,
        schedule: item.schedule.as_ref()?.name.clone()?,
        salary_from,
        salary_to,
    })
}
