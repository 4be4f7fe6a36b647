use crate::domain::ports::DrugApi;
use crate::router::Route;
use crate::utils::error::{DrugNetError, Result};
use crate::utils::validation::require_input;
use crate::views::{wrong_input, Rendered, View, ViewInput};
use async_trait::async_trait;

/// Shortest path between two drugs, one line per hop.
pub struct PathFinderView;

#[async_trait]
impl View for PathFinderView {
    fn route(&self) -> Route {
        Route::Path
    }

    async fn render(&self, api: &dyn DrugApi, input: &ViewInput) -> Result<Rendered> {
        let ViewInput::Path { start, end } = input else {
            return Err(wrong_input(self.route(), input));
        };
        let start = require_input("start", start)?;
        let end = require_input("end", end)?;
        if start.to_lowercase() == end.to_lowercase() {
            return Err(DrugNetError::InvalidInput {
                field: "end".to_string(),
                reason: "start and end must be different drugs".to_string(),
            });
        }

        tracing::info!("🔎 Looking for a path {} -> {}", start, end);
        let result = api.get_shortest_path(start, end).await?;

        let first = result.path.first().map_or(start, |s| s.name.as_str());
        let last = result.path.last().map_or(end, |s| s.name.as_str());

        let mut lines = vec![format!("Route: {} -> {}", first, last)];
        for pair in result.path.windows(2) {
            let (current, next) = (&pair[0], &pair[1]);
            lines.push(format!(
                " {}. [ {} ] ---> [ {} ]",
                current.step, current.name, next.name
            ));
            let similarity = current
                .similarity_to_next
                .map_or_else(|| "N/A".to_string(), |s| format!("{:.1}", s));
            lines.push(format!(
                "     similarity {} | shared: {}",
                similarity,
                current.reason.as_deref().unwrap_or("N/A")
            ));
        }
        lines.push(format!(" Arrival: [ {} ]", last));
        lines.push(format!(
            "Total similarity: {:.2} over {} steps",
            result.total_similarity, result.steps
        ));

        Ok(Rendered {
            route: self.route(),
            text: lines.join("\n"),
            payload: serde_json::to_value(&result)?,
        })
    }
}
