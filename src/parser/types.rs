use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One raw row of the SMAP export, straight from the CSV cells.
#[derive(Debug, Clone, Deserialize)]
pub struct SmapTicketRaw {
    pub cod_evento: Option<String>,
    pub usuario_criador: Option<String>,
    pub dat_entrega: Option<String>,
    pub dat_resolucao: Option<String>,
    pub acao: Option<String>,
    pub tipo_reclamacao: Option<String>,
    pub detalhe_reclamacao: Option<String>,
    pub subdetalhe_reclamacao: Option<String>,
    pub num_cliente: Option<String>,
}

/// A retained ticket after normalization: delivery date is always valid,
/// resolution date is None while the ticket is still open.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmapTicketNormalized {
    pub cod_evento: String,
    pub criador: String,
    /// Filled by the entity resolver; None when the creator has no
    /// directory match.
    pub gerente: Option<String>,
    pub dat_entrega: NaiveDateTime,
    pub dat_resolucao: Option<NaiveDateTime>,
    pub acao: String,
    pub tipo_reclamacao: String,
    pub detalhe_reclamacao: Option<String>,
    pub subdetalhe_reclamacao: Option<String>,
    pub num_cliente: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseWarning {
    pub line: usize,
    pub message: String,
}
