use crate::error::Result;
use crate::services::hh_client::{PageQuery, VacancySource};
use serde_json::Value as JsonValue;

/// Pages through `query` and appends every item to `items`.
///
/// A connection failure on any page clears `items` entirely, including items gathered
/// by earlier calls sharing the same accumulator, and paging resumes at the next index.
/// Any other error ends the pass.
pub(crate) async fn fetch_pages(
    source: &dyn VacancySource,
    query: &PageQuery,
    max_pages: u32,
    per_page: u32,
    items: &mut Vec<JsonValue>,
) -> Result<()> {
    for page in 0..max_pages {
        match source.fetch_page(query, page, per_page).await {
            Ok(result) => {
                let last = result.is_last(page);
                items.extend(result.items);
                if last {
                    break;
                }
            }
            Err(err) if err.is_connection() => {
                tracing::warn!(
                    error = %err,
                    page,
                    discarded = items.len(),
                    "Connection error, discarding items collected in this pass"
                );
                items.clear();
            }
            Err(err) => return Err(err),
        }
    }
    Ok(())
}
