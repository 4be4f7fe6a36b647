pub mod alternatives;
pub mod details;
pub mod filter;
pub mod home;
pub mod path_finder;

use crate::domain::model::FilterCriteria;
use crate::domain::ports::DrugApi;
use crate::router::Route;
use crate::utils::error::{DrugNetError, Result};
use async_trait::async_trait;

pub use alternatives::AlternativesView;
pub use details::DrugDetailsView;
pub use filter::FilterDrugsView;
pub use home::HomeView;
pub use path_finder::PathFinderView;

/// What a view needs from the user before it can call the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewInput {
    Home,
    Path { start: String, end: String },
    Alternatives { name: String, top_n: Option<u32> },
    Filter { criteria: FilterCriteria },
    Details { query: String },
}

impl ViewInput {
    pub fn route(&self) -> Route {
        match self {
            ViewInput::Home => Route::Home,
            ViewInput::Path { .. } => Route::Path,
            ViewInput::Alternatives { .. } => Route::Alternatives,
            ViewInput::Filter { .. } => Route::Filter,
            ViewInput::Details { .. } => Route::Details,
        }
    }

    /// 從 `?key=value` 形式的參數組出 view 的輸入
    pub fn from_params(route: Route, params: &[(String, String)]) -> Result<Self> {
        let get = |key: &str| {
            params
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        };
        let require = |key: &str| {
            get(key).ok_or_else(|| DrugNetError::InvalidInput {
                field: key.to_string(),
                reason: format!("'{}' requires the '{}' parameter", route.path(), key),
            })
        };

        match route {
            Route::Home => Ok(ViewInput::Home),
            Route::Path => Ok(ViewInput::Path {
                start: require("start")?,
                end: require("end")?,
            }),
            Route::Alternatives => {
                let top_n = match get("top_n") {
                    Some(raw) => Some(raw.parse::<u32>().map_err(|e| {
                        DrugNetError::InvalidInput {
                            field: "top_n".to_string(),
                            reason: format!("'{}' is not a valid count: {}", raw, e),
                        }
                    })?),
                    None => None,
                };
                Ok(ViewInput::Alternatives {
                    name: require("name")?,
                    top_n,
                })
            }
            Route::Filter => {
                let mut criteria = FilterCriteria::default();
                for (key, value) in params {
                    let value = value.trim();
                    if value.is_empty() {
                        continue;
                    }
                    match key.as_str() {
                        "condition" => criteria.condition = Some(value.to_string()),
                        "pregnancy_category" => {
                            criteria.pregnancy_category = Some(value.to_string())
                        }
                        "rx_otc" => criteria.rx_otc = Some(value.to_string()),
                        "csa" => criteria.csa = Some(value.to_string()),
                        other => {
                            criteria.extra.insert(
                                other.to_string(),
                                serde_json::Value::String(value.to_string()),
                            );
                        }
                    }
                }
                Ok(ViewInput::Filter { criteria })
            }
            Route::Details => {
                let query = get("query")
                    .or_else(|| get("name"))
                    .ok_or_else(|| DrugNetError::InvalidInput {
                        field: "query".to_string(),
                        reason: "'/details' requires the 'query' parameter".to_string(),
                    })?;
                Ok(ViewInput::Details { query })
            }
        }
    }
}

/// Output of one view: human-readable text plus the raw backend payload.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub route: Route,
    pub text: String,
    pub payload: serde_json::Value,
}

#[async_trait]
pub trait View: Send + Sync {
    fn route(&self) -> Route;

    async fn render(&self, api: &dyn DrugApi, input: &ViewInput) -> Result<Rendered>;
}

pub(crate) fn wrong_input(route: Route, input: &ViewInput) -> DrugNetError {
    DrugNetError::InvalidInput {
        field: "route".to_string(),
        reason: format!(
            "view '{}' cannot render input meant for '{}'",
            route.path(),
            input.route().path()
        ),
    }
}

pub(crate) fn or_na(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("N/A")
}
