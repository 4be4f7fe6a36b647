use crate::domain::ports::DrugApi;
use crate::router::Route;
use crate::utils::error::Result;
use crate::utils::validation::require_input;
use crate::views::{or_na, wrong_input, Rendered, View, ViewInput};
use async_trait::async_trait;

pub struct AlternativesView;

#[async_trait]
impl View for AlternativesView {
    fn route(&self) -> Route {
        Route::Alternatives
    }

    async fn render(&self, api: &dyn DrugApi, input: &ViewInput) -> Result<Rendered> {
        let ViewInput::Alternatives { name, top_n } = input else {
            return Err(wrong_input(self.route(), input));
        };
        let name = require_input("name", name)?;

        let alternatives = api.get_alternatives(name, *top_n).await?;
        tracing::info!("💊 {} alternatives for {}", alternatives.len(), name);

        let mut lines = vec![format!("--- Alternatives for: {} ---", name)];
        if alternatives.is_empty() {
            lines.push(format!("'{}' has no alternatives.", name));
        }
        for (i, alternative) in alternatives.iter().enumerate() {
            lines.push(format!(
                " {}. {} (similarity: {:.1})",
                i + 1,
                alternative.name,
                alternative.similarity
            ));
            lines.push(format!("    treats: {}", or_na(&alternative.medical_condition)));
        }

        Ok(Rendered {
            route: self.route(),
            text: lines.join("\n"),
            payload: serde_json::to_value(&alternatives)?,
        })
    }
}
