use std::collections::HashSet;

use crate::parser::types::SmapTicketNormalized;

/// Menu of selectable managers: distinct non-null `gerente` values over the
/// FULL resolved set, sorted. Always derived before filtering so the menu
/// is complete regardless of the current selection.
pub fn gerentes_disponiveis(tickets: &[SmapTicketNormalized]) -> Vec<String> {
    let mut set: HashSet<&str> = HashSet::new();
    for t in tickets {
        if let Some(g) = t.gerente.as_deref() {
            set.insert(g);
        }
    }
    let mut gerentes: Vec<String> = set.into_iter().map(str::to_string).collect();
    gerentes.sort();
    gerentes
}

/// Filter stage: empty selection returns the full set unchanged; otherwise
/// only tickets whose manager is in the selection (unattributed tickets are
/// excluded by any non-empty selection).
pub fn filtrar_por_gerentes(
    tickets: Vec<SmapTicketNormalized>,
    selecionados: &[String],
) -> Vec<SmapTicketNormalized> {
    if selecionados.is_empty() {
        return tickets;
    }
    let selecao: HashSet<&str> = selecionados.iter().map(String::as_str).collect();
    tickets
        .into_iter()
        .filter(|t| {
            t.gerente
                .as_deref()
                .map(|g| selecao.contains(g))
                .unwrap_or(false)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ticket(gerente: Option<&str>) -> SmapTicketNormalized {
        SmapTicketNormalized {
            cod_evento: "E-1".into(),
            criador: "A".into(),
            gerente: gerente.map(str::to_string),
            dat_entrega: NaiveDate::from_ymd_opt(2024, 1, 5)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            dat_resolucao: None,
            acao: "OK".into(),
            tipo_reclamacao: "COBRANCA".into(),
            detalhe_reclamacao: None,
            subdetalhe_reclamacao: None,
            num_cliente: "C-1".into(),
        }
    }

    #[test]
    fn test_gerentes_disponiveis_sorted_distinct() {
        let tickets = vec![
            ticket(Some("MARIA")),
            ticket(Some("ANA")),
            ticket(Some("MARIA")),
            ticket(None),
        ];
        assert_eq!(gerentes_disponiveis(&tickets), vec!["ANA", "MARIA"]);
    }

    #[test]
    fn test_empty_selection_returns_all() {
        let tickets = vec![ticket(Some("MARIA")), ticket(None)];
        let out = filtrar_por_gerentes(tickets, &[]);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_selection_filters_and_drops_unattributed() {
        let tickets = vec![
            ticket(Some("MARIA")),
            ticket(Some("ANA")),
            ticket(None),
        ];
        let out = filtrar_por_gerentes(tickets, &["MARIA".to_string()]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].gerente.as_deref(), Some("MARIA"));
    }
}
