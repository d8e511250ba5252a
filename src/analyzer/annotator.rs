use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::analyzer::temporal::MesAno;
use crate::parser::types::SmapTicketNormalized;

/// Three-state SLA classification. Unresolved tickets are `Pendente`, an
/// explicit state rather than a fallthrough of an undefined comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SlaStatus {
    #[serde(rename = "Dentro do Prazo")]
    DentroPrazo,
    #[serde(rename = "Fora do Prazo")]
    ForaPrazo,
    #[serde(rename = "Pendente")]
    Pendente,
}

impl fmt::Display for SlaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SlaStatus::DentroPrazo => "Dentro do Prazo",
            SlaStatus::ForaPrazo => "Fora do Prazo",
            SlaStatus::Pendente => "Pendente",
        };
        f.write_str(s)
    }
}

/// A retained ticket with its derived fields, ready for detail display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketAnotado {
    #[serde(flatten)]
    pub ticket: SmapTicketNormalized,
    pub mes: MesAno,
    pub dias_para_resolucao: Option<i64>,
    pub sla_status: SlaStatus,
    pub reincidencia: bool,
}

/// Row annotator: attaches month bucket, days-to-resolution, SLA status and
/// the recurrence flag to every ticket of the (already filtered) set.
///
/// Recurrence is scoped to (month, customer, complaint type): a ticket is
/// recurrent iff at least one other ticket shares the same triple. Tickets
/// with an empty customer identifier are never marked recurrent.
pub fn anotar(
    tickets: Vec<SmapTicketNormalized>,
    sla_prazo_dias: i64,
) -> Vec<TicketAnotado> {
    let mut grupos: HashMap<(MesAno, String, String), u32> = HashMap::new();
    for t in &tickets {
        if t.num_cliente.is_empty() {
            continue;
        }
        let chave = (
            MesAno::from_date(t.dat_entrega.date()),
            t.num_cliente.clone(),
            t.tipo_reclamacao.clone(),
        );
        *grupos.entry(chave).or_insert(0) += 1;
    }

    tickets
        .into_iter()
        .map(|t| {
            let mes = MesAno::from_date(t.dat_entrega.date());
            // Whole days; may be negative when the data is inconsistent.
            let dias_para_resolucao = t
                .dat_resolucao
                .map(|resolucao| (resolucao - t.dat_entrega).num_days());
            let sla_status = match dias_para_resolucao {
                Some(d) if d <= sla_prazo_dias => SlaStatus::DentroPrazo,
                Some(_) => SlaStatus::ForaPrazo,
                None => SlaStatus::Pendente,
            };
            let reincidencia = if t.num_cliente.is_empty() {
                false
            } else {
                grupos
                    .get(&(mes, t.num_cliente.clone(), t.tipo_reclamacao.clone()))
                    .map(|&n| n > 1)
                    .unwrap_or(false)
            };
            TicketAnotado {
                ticket: t,
                mes,
                dias_para_resolucao,
                sla_status,
                reincidencia,
            }
        })
        .collect()
}
