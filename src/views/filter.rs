use crate::domain::ports::DrugApi;
use crate::router::Route;
use crate::utils::error::Result;
use crate::views::{or_na, wrong_input, Rendered, View, ViewInput};
use async_trait::async_trait;

/// Columns shown per match; the payload keeps every column.
const COLUMNS: [&str; 5] = [
    "drug_name",
    "medical_condition",
    "rx_otc",
    "pregnancy_category",
    "csa",
];

pub struct FilterDrugsView;

#[async_trait]
impl View for FilterDrugsView {
    fn route(&self) -> Route {
        Route::Filter
    }

    async fn render(&self, api: &dyn DrugApi, input: &ViewInput) -> Result<Rendered> {
        let ViewInput::Filter { criteria } = input else {
            return Err(wrong_input(self.route(), input));
        };
        let criteria = criteria.without_blanks();
        if criteria.is_empty() {
            tracing::warn!("⚠️ No filters given, the backend will return its first rows unfiltered");
        }

        let records = api.filter_drugs(&criteria).await?;
        tracing::info!("🔍 Filter matched {} drugs", records.len());

        let mut lines = Vec::new();
        if records.is_empty() {
            lines.push("No drugs found.".to_string());
        } else {
            lines.push(format!("--- {} drugs found ---", records.len()));
            lines.push(COLUMNS.join("\t"));
            for record in &records {
                lines.push(
                    [
                        or_na(&record.drug_name),
                        or_na(&record.medical_condition),
                        or_na(&record.rx_otc),
                        or_na(&record.pregnancy_category),
                        or_na(&record.csa),
                    ]
                    .join("\t"),
                );
            }
        }

        Ok(Rendered {
            route: self.route(),
            text: lines.join("\n"),
            payload: serde_json::to_value(&records)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::FilterCriteria;
    use crate::views::testing::{record, MockApi};

    #[tokio::test]
    async fn test_lists_matches() {
        let mut doxy = record("doxycycline", "Acne");
        doxy.rx_otc = Some("Rx".to_string());
        doxy.pregnancy_category = Some("D".to_string());
        doxy.csa = Some("N".to_string());
        let api = MockApi {
            records: vec![doxy, record("benzoyl peroxide", "Acne")],
            ..Default::default()
        };
        let input = ViewInput::Filter {
            criteria: FilterCriteria {
                condition: Some("acne".to_string()),
                ..Default::default()
            },
        };

        let rendered = FilterDrugsView.render(&api, &input).await.unwrap();

        let lines: Vec<&str> = rendered.text.lines().collect();
        assert_eq!(lines[0], "--- 2 drugs found ---");
        assert_eq!(lines[1], "drug_name\tmedical_condition\trx_otc\tpregnancy_category\tcsa");
        assert_eq!(lines[2], "doxycycline\tAcne\tRx\tD\tN");
        assert_eq!(lines[3], "benzoyl peroxide\tAcne\tN/A\tN/A\tN/A");
        assert_eq!(api.calls(), vec![r#"filter_drugs({"condition":"acne"})"#]);
    }

    #[tokio::test]
    async fn test_no_matches() {
        let api = MockApi::default();
        let input = ViewInput::Filter {
            criteria: FilterCriteria::default(),
        };

        let rendered = FilterDrugsView.render(&api, &input).await.unwrap();

        assert_eq!(rendered.text, "No drugs found.");
        assert_eq!(api.calls(), vec!["filter_drugs({})"]);
    }

    #[tokio::test]
    async fn test_blank_criteria_are_not_sent() {
        let api = MockApi::default();
        let input = ViewInput::Filter {
            criteria: FilterCriteria {
                condition: Some("   ".to_string()),
                rx_otc: Some(String::new()),
                pregnancy_category: Some(" D ".to_string()),
                ..Default::default()
            },
        };

        FilterDrugsView.render(&api, &input).await.unwrap();

        assert_eq!(api.calls(), vec![r#"filter_drugs({"pregnancy_category":"D"})"#]);
    }
}
