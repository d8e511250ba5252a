/// Indicator engine — computes the monthly SMAP indicator table and the
/// current-month headline snapshot from the filtered, annotated ticket set.
use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use super::annotator::{SlaStatus, TicketAnotado};
use super::stats::{media, percentil};
use super::temporal::{dias_uteis, MesAno};

// ─── Data Structures ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PainelIndicadores {
    pub resumo: ResumoVigente,
    pub indicadores: BTreeMap<MesAno, IndicadorMensal>,
}

/// Headline values for the latest month present in the filtered set.
/// All zeros when the filtered set is empty.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumoVigente {
    pub mes_vigente: Option<MesAno>,
    pub sla_pct: f64,
    pub backlog_total: i64,
    pub share_indevidos_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicadorMensal {
    pub entrada: i64,
    pub entrada_por_du: f64,
    pub total_indevidos: i64,
    pub share_indevidos_pct: f64,
    pub sla_pct: f64,
    pub backlog: i64,
    pub reincidencia_pct: f64,
    pub tmr_dias: f64,
    pub mediana_dias: f64,
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn pct(count: i64, total: i64) -> f64 {
    if total == 0 {
        0.0
    } else {
        round1(count as f64 / total as f64 * 100.0)
    }
}

#[derive(Default)]
struct AcumuladorMensal {
    entrada: i64,
    backlog: i64,
    indevidos: i64,
    dentro_prazo: i64,
    reincidentes: i64,
    dias_resolucao: Vec<f64>,
}

// ─── Builder ─────────────────────────────────────────────────────────────────

/// Build the monthly indicator table and headline snapshot.
/// `acao_indevida` is the outcome tag marking an undue ticket.
pub fn build_painel(tickets: &[TicketAnotado], acao_indevida: &str) -> PainelIndicadores {
    let mut meses: BTreeMap<MesAno, AcumuladorMensal> = BTreeMap::new();

    for t in tickets {
        let acc = meses.entry(t.mes).or_default();
        acc.entrada += 1;
        if t.ticket.dat_resolucao.is_none() {
            acc.backlog += 1;
        }
        if t.ticket.acao == acao_indevida {
            acc.indevidos += 1;
        }
        // Unresolved tickets stay in the denominator only.
        if t.sla_status == SlaStatus::DentroPrazo {
            acc.dentro_prazo += 1;
        }
        if t.reincidencia {
            acc.reincidentes += 1;
        }
        if let Some(dias) = t.dias_para_resolucao {
            acc.dias_resolucao.push(dias as f64);
        }
    }

    let mut indicadores: BTreeMap<MesAno, IndicadorMensal> = BTreeMap::new();
    let mut backlog_total = 0i64;

    for (mes, acc) in meses {
        let du = dias_uteis(mes);
        let entrada_por_du = if du == 0 {
            0.0
        } else {
            round1(acc.entrada as f64 / du as f64)
        };
        backlog_total += acc.backlog;
        indicadores.insert(
            mes,
            IndicadorMensal {
                entrada: acc.entrada,
                entrada_por_du,
                total_indevidos: acc.indevidos,
                share_indevidos_pct: pct(acc.indevidos, acc.entrada),
                sla_pct: pct(acc.dentro_prazo, acc.entrada),
                backlog: acc.backlog,
                reincidencia_pct: pct(acc.reincidentes, acc.entrada),
                tmr_dias: round1(media(&acc.dias_resolucao)),
                mediana_dias: round1(percentil(&acc.dias_resolucao, 50.0)),
            },
        );
    }

    let mes_vigente = indicadores.keys().next_back().copied();
    let resumo = match mes_vigente.and_then(|m| indicadores.get(&m)) {
        Some(row) => ResumoVigente {
            mes_vigente,
            sla_pct: row.sla_pct,
            backlog_total,
            share_indevidos_pct: row.share_indevidos_pct,
        },
        None => ResumoVigente {
            mes_vigente: None,
            sla_pct: 0.0,
            backlog_total: 0,
            share_indevidos_pct: 0.0,
        },
    };

    debug!(
        meses = indicadores.len(),
        backlog_total, "painel de indicadores calculado"
    );

    PainelIndicadores {
        resumo,
        indicadores,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::annotator::anotar;
    use crate::parser::types::SmapTicketNormalized;
    use chrono::NaiveDate;

    const INDEVIDO: &str = "INDEVIDO";

    fn ticket(
        cod: &str,
        entrega: (i32, u32, u32),
        resolucao: Option<(i32, u32, u32)>,
        acao: &str,
        cliente: &str,
    ) -> SmapTicketNormalized {
        let d = |(y, m, d): (i32, u32, u32)| {
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        };
        SmapTicketNormalized {
            cod_evento: cod.into(),
            criador: "A".into(),
            gerente: None,
            dat_entrega: d(entrega),
            dat_resolucao: resolucao.map(d),
            acao: acao.into(),
            tipo_reclamacao: "COBRANCA".into(),
            detalhe_reclamacao: None,
            subdetalhe_reclamacao: None,
            num_cliente: cliente.into(),
        }
    }

    fn painel(tickets: Vec<SmapTicketNormalized>) -> PainelIndicadores {
        build_painel(&anotar(tickets, 5), INDEVIDO)
    }

    #[test]
    fn test_empty_set_yields_empty_painel() {
        let p = painel(vec![]);
        assert!(p.indicadores.is_empty());
        assert!(p.resumo.mes_vigente.is_none());
        assert_eq!(p.resumo.sla_pct, 0.0);
        assert_eq!(p.resumo.backlog_total, 0);
        assert_eq!(p.resumo.share_indevidos_pct, 0.0);
    }

    #[test]
    fn test_entrada_e_backlog() {
        let p = painel(vec![
            ticket("E-1", (2024, 1, 5), Some((2024, 1, 8)), "OK", "C-1"),
            ticket("E-2", (2024, 1, 10), None, "OK", "C-2"),
            ticket("E-3", (2024, 2, 3), None, "OK", "C-3"),
        ]);
        let jan = &p.indicadores[&MesAno::new(2024, 1)];
        assert_eq!(jan.entrada, 2);
        assert_eq!(jan.backlog, 1);
        let fev = &p.indicadores[&MesAno::new(2024, 2)];
        assert_eq!(fev.entrada, 1);
        assert_eq!(fev.backlog, 1);
        assert_eq!(p.resumo.backlog_total, 2);
    }

    #[test]
    fn test_backlog_total_consistente_com_mensal() {
        let p = painel(vec![
            ticket("E-1", (2024, 1, 5), None, "OK", "C-1"),
            ticket("E-2", (2024, 2, 5), None, "OK", "C-2"),
            ticket("E-3", (2024, 2, 6), Some((2024, 2, 7)), "OK", "C-3"),
        ]);
        let soma: i64 = p.indicadores.values().map(|i| i.backlog).sum();
        assert_eq!(soma, p.resumo.backlog_total);
    }

    #[test]
    fn test_backlog_nunca_excede_entrada() {
        let p = painel(vec![
            ticket("E-1", (2024, 1, 5), None, "OK", "C-1"),
            ticket("E-2", (2024, 1, 6), Some((2024, 1, 9)), "OK", "C-2"),
        ]);
        for row in p.indicadores.values() {
            assert!(row.backlog <= row.entrada);
        }
    }

    #[test]
    fn test_entrada_por_du() {
        // Janeiro 2024 tem 23 dias úteis → 46 chamados = 2.0/DU
        let tickets: Vec<_> = (0..46)
            .map(|i| ticket(&format!("E-{i}"), (2024, 1, 1 + (i % 28)), None, "OK", &format!("C-{i}")))
            .collect();
        let p = painel(tickets);
        let jan = &p.indicadores[&MesAno::new(2024, 1)];
        assert!((jan.entrada_por_du - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_share_indevidos() {
        let p = painel(vec![
            ticket("E-1", (2024, 1, 5), None, "INDEVIDO", "C-1"),
            ticket("E-2", (2024, 1, 6), None, "OK", "C-2"),
            ticket("E-3", (2024, 1, 7), None, "OK", "C-3"),
            ticket("E-4", (2024, 1, 8), None, "OK", "C-4"),
        ]);
        let jan = &p.indicadores[&MesAno::new(2024, 1)];
        assert_eq!(jan.total_indevidos, 1);
        assert!((jan.share_indevidos_pct - 25.0).abs() < 1e-10);
    }

    #[test]
    fn test_sla_pendente_conta_no_denominador() {
        // 1 resolvido em 3 dias, 1 pendente → SLA 50%
        let p = painel(vec![
            ticket("E-1", (2024, 1, 5), Some((2024, 1, 8)), "OK", "C-1"),
            ticket("E-2", (2024, 1, 6), None, "OK", "C-2"),
        ]);
        let jan = &p.indicadores[&MesAno::new(2024, 1)];
        assert!((jan.sla_pct - 50.0).abs() < 1e-10);
    }

    #[test]
    fn test_sla_fora_do_prazo_nao_conta() {
        let p = painel(vec![
            ticket("E-1", (2024, 1, 5), Some((2024, 1, 20)), "OK", "C-1"),
        ]);
        let jan = &p.indicadores[&MesAno::new(2024, 1)];
        assert_eq!(jan.sla_pct, 0.0);
    }

    #[test]
    fn test_reincidencia_pct() {
        // 2 reincidentes + 2 não → 50%
        let p = painel(vec![
            ticket("E-1", (2024, 1, 5), None, "OK", "C-1"),
            ticket("E-2", (2024, 1, 9), None, "OK", "C-1"),
            ticket("E-3", (2024, 1, 10), None, "OK", "C-2"),
            ticket("E-4", (2024, 1, 11), None, "OK", "C-3"),
        ]);
        let jan = &p.indicadores[&MesAno::new(2024, 1)];
        assert!((jan.reincidencia_pct - 50.0).abs() < 1e-10);
    }

    #[test]
    fn test_tmr_e_mediana() {
        // Dias para resolução: 2, 4, 9 → média 5.0, mediana 4.0
        let p = painel(vec![
            ticket("E-1", (2024, 1, 1), Some((2024, 1, 3)), "OK", "C-1"),
            ticket("E-2", (2024, 1, 1), Some((2024, 1, 5)), "OK", "C-2"),
            ticket("E-3", (2024, 1, 1), Some((2024, 1, 10)), "OK", "C-3"),
            ticket("E-4", (2024, 1, 2), None, "OK", "C-4"),
        ]);
        let jan = &p.indicadores[&MesAno::new(2024, 1)];
        assert!((jan.tmr_dias - 5.0).abs() < 1e-10);
        assert!((jan.mediana_dias - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_mes_vigente_e_resumo() {
        let p = painel(vec![
            ticket("E-1", (2024, 1, 5), None, "OK", "C-1"),
            ticket("E-2", (2024, 3, 5), Some((2024, 3, 6)), "INDEVIDO", "C-2"),
        ]);
        assert_eq!(p.resumo.mes_vigente, Some(MesAno::new(2024, 3)));
        assert!((p.resumo.sla_pct - 100.0).abs() < 1e-10);
        assert!((p.resumo.share_indevidos_pct - 100.0).abs() < 1e-10);
        // backlog total cobre todos os meses, não só o vigente
        assert_eq!(p.resumo.backlog_total, 1);
    }

    #[test]
    fn test_idempotencia() {
        let tickets = vec![
            ticket("E-1", (2024, 1, 5), Some((2024, 1, 8)), "OK", "C-1"),
            ticket("E-2", (2024, 1, 10), None, "INDEVIDO", "C-1"),
        ];
        let a = serde_json::to_string(&painel(tickets.clone())).unwrap();
        let b = serde_json::to_string(&painel(tickets)).unwrap();
        assert_eq!(a, b);
    }
}
