use serde::{Deserialize, Deserializer};

/// Distinguishes a key that is present with `null` (`Some(None)`) from a missing
/// key (`None`, via `#[serde(default)]`).
fn deserialize_present<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// hh.ru sends identifiers as strings, but older payloads and fixtures use numbers.
fn deserialize_id_flexible<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrInt {
        Int(i64),
        String(String),
    }

    Ok(Option::<StringOrInt>::deserialize(deserializer)?.map(|value| match value {
        StringOrInt::Int(i) => i.to_string(),
        StringOrInt::String(s) => s,
    }))
}

/// Salary bounds occasionally arrive as floats or numeric strings. Anything that is not
/// a number is treated as an absent bound.
fn deserialize_amount_flexible<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.round() as i64)),
        Some(serde_json::Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.round() as i64))
        }
        _ => None,
    })
}

/// One page of `GET /vacancies`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VacancyPage {
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub pages: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub found: Option<u64>,
}

impl VacancyPage {
    /// Whether the upstream reported that `page` was the last one available.
    pub fn is_last(&self, page: u32) -> bool {
        matches!(self.pages, Some(pages) if page + 1 >= pages)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEmployer {
    #[serde(default, deserialize_with = "deserialize_id_flexible")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub url: Option<Option<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSalary {
    #[serde(default, deserialize_with = "deserialize_amount_flexible")]
    pub from: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_amount_flexible")]
    pub to: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawNamed {
    #[serde(default)]
    pub name: Option<String>,
}

/// A vacancy item exactly as the API returned it. Nothing is guaranteed to be present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawVacancyItem {
    #[serde(default, deserialize_with = "deserialize_id_flexible")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub alternate_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub employer: Option<RawEmployer>,
    #[serde(default)]
    pub salary: Option<RawSalary>,
    #[serde(default)]
    pub area: Option<RawNamed>,
    #[serde(default)]
    pub schedule: Option<RawNamed>,
}

impl RawVacancyItem {
    /// Decodes a single item, returning `None` for items whose shape does not match at all.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        match serde_json::from_value(value.clone()) {
            Ok(item) => Some(item),
            Err(err) => {
                tracing::debug!(error = %err, "Skipping undecodable vacancy item");
                None
            }
        }
    }
}
