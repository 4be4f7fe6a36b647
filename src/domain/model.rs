use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// GET `/` 的回應
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Stats {
    pub fn is_online(&self) -> bool {
        self.status == "online"
    }
}

/// One row of the backend's drug table. Every column is nullable and
/// columns the client does not know about are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrugRecord {
    #[serde(default)]
    pub drug_name: Option<String>,
    #[serde(default)]
    pub medical_condition: Option<String>,
    #[serde(default)]
    pub drug_classes: Option<String>,
    #[serde(default)]
    pub generic_name: Option<String>,
    #[serde(default)]
    pub rx_otc: Option<String>,
    #[serde(default)]
    pub pregnancy_category: Option<String>,
    #[serde(default)]
    pub csa: Option<String>,
    #[serde(default)]
    pub side_effects: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathStep {
    pub name: String,
    /// 1-based position in the path
    pub step: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity_to_next: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    pub path: Vec<PathStep>,
    pub total_similarity: f64,
    pub steps: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathRequest {
    pub start_drug: String,
    pub end_drug: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    pub name: String,
    pub similarity: f64,
    #[serde(default)]
    pub medical_condition: Option<String>,
}

/// POST `/drugs/filter` 的請求內容。未設定的欄位不會送出，
/// 額外的鍵值原樣轉送給後端。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pregnancy_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rx_otc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csa: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.condition.is_none()
            && self.pregnancy_category.is_none()
            && self.rx_otc.is_none()
            && self.csa.is_none()
            && self.extra.is_empty()
    }

    /// Trimmed copy with blank fields (and blank string extras) removed.
    pub fn without_blanks(&self) -> Self {
        fn keep(value: &Option<String>) -> Option<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        }

        let extra = self
            .extra
            .iter()
            .filter_map(|(key, value)| match value {
                serde_json::Value::String(s) if s.trim().is_empty() => None,
                serde_json::Value::String(s) => {
                    Some((key.clone(), serde_json::Value::String(s.trim().to_string())))
                }
                other => Some((key.clone(), other.clone())),
            })
            .collect();

        Self {
            condition: keep(&self.condition),
            pregnancy_category: keep(&self.pregnancy_category),
            rx_otc: keep(&self.rx_otc),
            csa: keep(&self.csa),
            extra,
        }
    }
}

/// `{"detail": "..."}` body the backend sends with 4xx/5xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}
