pub mod annotator;
pub mod dashboard;
pub mod filter;
pub mod resolver;
pub mod stats;
pub mod temporal;

use serde::Serialize;

use crate::config::AnaliseConfig;
use crate::parser::types::SmapTicketNormalized;

pub use annotator::{anotar, SlaStatus, TicketAnotado};
pub use dashboard::{build_painel, IndicadorMensal, PainelIndicadores, ResumoVigente};
pub use filter::{filtrar_por_gerentes, gerentes_disponiveis};
pub use resolver::{atribuir_gerentes, DiretorioColaboradores};
pub use temporal::{dias_uteis, MesAno};

/// Complete output of one pipeline invocation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analise {
    /// Menu of selectable managers, derived from the full resolved set.
    pub gerentes_disponiveis: Vec<String>,
    pub painel: PainelIndicadores,
    pub detalhe: Vec<TicketAnotado>,
}

/// Run the whole pipeline: resolve managers, filter, annotate, aggregate.
/// Pure function of its inputs — recomputed in full on every invocation.
pub fn analisar(
    mut tickets: Vec<SmapTicketNormalized>,
    diretorio: &DiretorioColaboradores,
    gerentes_selecionados: &[String],
    config: &AnaliseConfig,
) -> Analise {
    atribuir_gerentes(&mut tickets, diretorio);
    let gerentes = gerentes_disponiveis(&tickets);
    let filtrados = filtrar_por_gerentes(tickets, gerentes_selecionados);
    let detalhe = anotar(filtrados, config.sla_prazo_dias);
    let painel = build_painel(&detalhe, &config.acao_indevida);
    Analise {
        gerentes_disponiveis: gerentes,
        painel,
        detalhe,
    }
}
