use crate::domain::ports::DrugApi;
use crate::router::Route;
use crate::utils::error::Result;
use crate::views::{wrong_input, Rendered, View, ViewInput};
use async_trait::async_trait;

pub const DISCLAIMER: &str =
    "This tool is an academic project and does not replace the advice of a health professional.";

/// Landing view: service status and graph size.
pub struct HomeView;

#[async_trait]
impl View for HomeView {
    fn route(&self) -> Route {
        Route::Home
    }

    async fn render(&self, api: &dyn DrugApi, input: &ViewInput) -> Result<Rendered> {
        if !matches!(input, ViewInput::Home) {
            return Err(wrong_input(self.route(), input));
        }

        let stats = api.get_stats().await?;
        tracing::info!("📊 Drug service status: {}", stats.status);

        let mut lines = vec![format!("Drug service: {}", stats.status)];
        if let Some(nodes) = stats.nodes {
            lines.push(format!("Drugs in graph: {}", nodes));
        }
        if let Some(detail) = &stats.detail {
            lines.push(format!("Detail: {}", detail));
        }
        lines.push(String::new());
        lines.push(DISCLAIMER.to_string());

        Ok(Rendered {
            route: self.route(),
            text: lines.join("\n"),
            payload: serde_json::to_value(&stats)?,
        })
    }
}
