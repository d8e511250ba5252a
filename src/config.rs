use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

fn default_sla_prazo_dias() -> i64 {
    5
}

fn default_acao_indevida() -> String {
    "INDEVIDO".to_string()
}

/// Analysis thresholds. Loaded from an optional JSON file; every field has
/// a hard default so a partial (or absent) file is fine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnaliseConfig {
    /// SLA target: a ticket resolved in at most this many days is on time.
    #[serde(default = "default_sla_prazo_dias")]
    pub sla_prazo_dias: i64,
    /// Outcome tag marking a ticket as improperly opened.
    #[serde(default = "default_acao_indevida")]
    pub acao_indevida: String,
}

impl Default for AnaliseConfig {
    fn default() -> Self {
        AnaliseConfig {
            sla_prazo_dias: default_sla_prazo_dias(),
            acao_indevida: default_acao_indevida(),
        }
    }
}

impl AnaliseConfig {
    /// Load from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
