use crate::dto::hh_dto::VacancyPage;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Query for one page of the vacancy search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageQuery {
    /// Keyword search restricted to an area.
    Search { text: String, area: u32 },
    /// All vacancies published by one employer.
    Employer { employer_id: i64 },
}

impl PageQuery {
    fn params(&self, page: u32, per_page: u32) -> Vec<(&'static str, String)> {
        let mut params = match self {
            PageQuery::Search { text, area } => {
                vec![("text", text.clone()), ("area", area.to_string())]
            }
            PageQuery::Employer { employer_id } => vec![("employer_id", employer_id.to_string())],
        };
        params.push(("page", page.to_string()));
        params.push(("per_page", per_page.to_string()));
        params
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VacancySource: Send + Sync {
    async fn fetch_page(&self, query: &PageQuery, page: u32, per_page: u32)
        -> Result<VacancyPage>;
}

#[derive(Clone)]
pub struct HhClient {
    client: Client,
    base_url: String,
}

impl HhClient {
    pub fn new(base_url: impl Into<String>, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl VacancySource for HhClient {
    async fn fetch_page(
        &self,
        query: &PageQuery,
        page: u32,
        per_page: u32,
    ) -> Result<VacancyPage> {
        let url = format!("{}/vacancies", self.base_url);
        tracing::debug!(?query, page, per_page, "Fetching vacancy page");

        let response = self
            .client
            .get(&url)
            .query(&query.params(page, per_page))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::UpstreamStatus {
                status: status.as_u16(),
                message,
            });
        }

        // Failing to read a 2xx body means the peer went away mid-response.
        let body = response.text().await.map_err(|err| {
            if err.is_timeout() {
                Error::Reqwest(err)
            } else {
                Error::Connection(err.to_string())
            }
        })?;
        Ok(serde_json::from_str(&body)?)
    }
}
