use crate::domain::model::DrugRecord;
use crate::domain::ports::DrugApi;
use crate::router::Route;
use crate::utils::error::Result;
use crate::utils::validation::require_input;
use crate::views::{or_na, wrong_input, Rendered, View, ViewInput};
use async_trait::async_trait;

const SIDE_EFFECTS_PREVIEW: usize = 100;

/// Search by (partial) name, then show the full record when the search
/// settles on a single drug.
pub struct DrugDetailsView;

impl DrugDetailsView {
    fn pick<'a>(query: &str, candidates: &'a [String]) -> Option<&'a str> {
        candidates
            .iter()
            .find(|c| c.eq_ignore_ascii_case(query))
            .or_else(|| match candidates {
                [only] => Some(only),
                _ => None,
            })
            .map(String::as_str)
    }

    fn describe(name: &str, record: &DrugRecord) -> Vec<String> {
        let side_effects = match &record.side_effects {
            Some(text) if text.chars().count() > SIDE_EFFECTS_PREVIEW => {
                format!("{}...", text.chars().take(SIDE_EFFECTS_PREVIEW).collect::<String>())
            }
            Some(text) => text.clone(),
            None => "N/A".to_string(),
        };

        vec![
            format!("--- {} ---", name),
            format!(" Medical condition: {}", or_na(&record.medical_condition)),
            format!(" Drug classes: {}", or_na(&record.drug_classes)),
            format!(" Generic name: {}", or_na(&record.generic_name)),
            format!(" Access (Rx/OTC): {}", or_na(&record.rx_otc)),
            format!(" Pregnancy category: {}", or_na(&record.pregnancy_category)),
            format!(" CSA: {}", or_na(&record.csa)),
            format!(" Side effects: {}", side_effects),
        ]
    }
}

#[async_trait]
impl View for DrugDetailsView {
    fn route(&self) -> Route {
        Route::Details
    }

    async fn render(&self, api: &dyn DrugApi, input: &ViewInput) -> Result<Rendered> {
        let ViewInput::Details { query } = input else {
            return Err(wrong_input(self.route(), input));
        };
        let query = require_input("query", query)?;

        let candidates = api.search_drugs(query).await?;
        tracing::debug!("Search '{}' returned {} names", query, candidates.len());

        let Some(name) = Self::pick(query, &candidates) else {
            let mut lines = Vec::new();
            if candidates.is_empty() {
                lines.push(format!("'{}' not found.", query));
            } else {
                lines.push(format!("'{}' matches several drugs:", query));
                lines.extend(candidates.iter().map(|c| format!("- {}", c)));
            }
            return Ok(Rendered {
                route: self.route(),
                text: lines.join("\n"),
                payload: serde_json::to_value(&candidates)?,
            });
        };

        let record = api.get_drug_details(name).await?;
        Ok(Rendered {
            route: self.route(),
            text: Self::describe(name, &record).join("\n"),
            payload: serde_json::to_value(&record)?,
        })
    }
}
