use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

use crate::analyzer::{Analise, TicketAnotado};
use crate::error::AppError;
use crate::export::{
    create_header_format, create_integer_format, create_number_format,
    create_percent_format,
};

fn xlsx_err(e: XlsxError) -> AppError {
    AppError::Custom(e.to_string())
}

/// Generate the Excel report: Resumo + Indicadores + Detalhe.
/// Returns the XLSX bytes via `workbook.save_to_buffer()`.
pub fn generate_indicators_report(analise: &Analise) -> Result<Vec<u8>, AppError> {
    let mut wb = Workbook::new();
    write_resumo(&mut wb, analise).map_err(xlsx_err)?;
    write_indicadores(&mut wb, analise).map_err(xlsx_err)?;
    write_detalhe(&mut wb, &analise.detalhe).map_err(xlsx_err)?;
    wb.save_to_buffer().map_err(xlsx_err)
}

// ── Aba 1 : Resumo ───────────────────────────────────────────────────────────

fn write_resumo(wb: &mut Workbook, analise: &Analise) -> Result<(), XlsxError> {
    let ws = wb.add_worksheet();
    ws.set_name("Resumo")?;

    let hdr = create_header_format();
    let num = create_number_format();
    let int = create_integer_format();

    ws.write_with_format(0, 0, "Indicador", &hdr)?;
    ws.write_with_format(0, 1, "Valor", &hdr)?;

    let resumo = &analise.painel.resumo;
    let mes = resumo
        .mes_vigente
        .map(|m| m.to_string())
        .unwrap_or_else(|| "-".to_string());

    ws.write(1, 0, "Mês vigente")?;
    ws.write(1, 1, mes)?;
    ws.write(2, 0, "SLA (%)")?;
    ws.write_with_format(2, 1, resumo.sla_pct, &num)?;
    ws.write(3, 0, "Backlog total")?;
    ws.write_with_format(3, 1, resumo.backlog_total as f64, &int)?;
    ws.write(4, 0, "Share indevidos (%)")?;
    ws.write_with_format(4, 1, resumo.share_indevidos_pct, &num)?;

    ws.set_column_width(0, 22)?;
    ws.set_column_width(1, 14)?;

    Ok(())
}

// ── Aba 2 : Indicadores mensais ──────────────────────────────────────────────

fn write_indicadores(wb: &mut Workbook, analise: &Analise) -> Result<(), XlsxError> {
    let ws = wb.add_worksheet();
    ws.set_name("Indicadores")?;

    let hdr = create_header_format();
    let int = create_integer_format();
    let num = create_number_format();
    let pct = create_percent_format();

    let headers = [
        "Mês",
        "Entrada",
        "Entrada DU",
        "Indevidos",
        "Share Indevidos (%)",
        "SLA (%)",
        "Backlog",
        "Reincidência (%)",
        "TMR (dias)",
        "Mediana (dias)",
    ];
    for (col, h) in headers.iter().enumerate() {
        ws.write_with_format(0, col as u16, *h, &hdr)?;
    }

    for (i, (mes, row)) in analise.painel.indicadores.iter().enumerate() {
        let r = (i + 1) as u32;
        ws.write(r, 0, mes.to_string())?;
        ws.write_with_format(r, 1, row.entrada as f64, &int)?;
        ws.write_with_format(r, 2, row.entrada_por_du, &num)?;
        ws.write_with_format(r, 3, row.total_indevidos as f64, &int)?;
        ws.write_with_format(r, 4, row.share_indevidos_pct / 100.0, &pct)?;
        ws.write_with_format(r, 5, row.sla_pct / 100.0, &pct)?;
        ws.write_with_format(r, 6, row.backlog as f64, &int)?;
        ws.write_with_format(r, 7, row.reincidencia_pct / 100.0, &pct)?;
        ws.write_with_format(r, 8, row.tmr_dias, &num)?;
        ws.write_with_format(r, 9, row.mediana_dias, &num)?;
    }

    ws.set_column_width(0, 10)?;
    for col in 1u16..headers.len() as u16 {
        ws.set_column_width(col, 16)?;
    }

    Ok(())
}

// ── Aba 3 : Detalhe ──────────────────────────────────────────────────────────

fn write_detalhe(wb: &mut Workbook, detalhe: &[TicketAnotado]) -> Result<(), XlsxError> {
    let ws: &mut Worksheet = wb.add_worksheet();
    ws.set_name("Detalhe")?;

    let hdr = create_header_format();
    let int = create_integer_format();

    let headers = [
        "Cod Evento",
        "Entrega",
        "Resolução",
        "Dias p/ Resolução",
        "SLA Status",
        "Gerente",
        "Criador",
        "Ação",
        "Tipo Reclamação",
        "Detalhe",
        "Subdetalhe",
        "Cliente",
        "Reincidência",
    ];
    for (col, h) in headers.iter().enumerate() {
        ws.write_with_format(0, col as u16, *h, &hdr)?;
    }

    const DT_FMT: &str = "%d/%m/%Y %H:%M";
    for (i, row) in detalhe.iter().enumerate() {
        let r = (i + 1) as u32;
        let t = &row.ticket;
        ws.write(r, 0, t.cod_evento.as_str())?;
        ws.write(r, 1, t.dat_entrega.format(DT_FMT).to_string())?;
        ws.write(
            r,
            2,
            t.dat_resolucao
                .map(|d| d.format(DT_FMT).to_string())
                .unwrap_or_default(),
        )?;
        if let Some(dias) = row.dias_para_resolucao {
            ws.write_with_format(r, 3, dias as f64, &int)?;
        }
        ws.write(r, 4, row.sla_status.to_string())?;
        ws.write(r, 5, t.gerente.as_deref().unwrap_or(""))?;
        ws.write(r, 6, t.criador.as_str())?;
        ws.write(r, 7, t.acao.as_str())?;
        ws.write(r, 8, t.tipo_reclamacao.as_str())?;
        ws.write(r, 9, t.detalhe_reclamacao.as_deref().unwrap_or(""))?;
        ws.write(r, 10, t.subdetalhe_reclamacao.as_deref().unwrap_or(""))?;
        ws.write(r, 11, t.num_cliente.as_str())?;
        ws.write(r, 12, if row.reincidencia { "Sim" } else { "Não" })?;
    }

    if !detalhe.is_empty() {
        let last_row = detalhe.len() as u32;
        ws.set_freeze_panes(1, 0)?;
        ws.autofilter(0, 0, last_row, (headers.len() - 1) as u16)?;
    }

    ws.set_column_width(0, 12)?;
    ws.set_column_width(1, 16)?;
    ws.set_column_width(2, 16)?;
    for col in 3u16..headers.len() as u16 {
        ws.set_column_width(col, 14)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{analisar, DiretorioColaboradores};
    use crate::config::AnaliseConfig;
    use crate::parser::types::SmapTicketNormalized;
    use chrono::NaiveDate;

    fn analise() -> Analise {
        let tickets = vec![SmapTicketNormalized {
            cod_evento: "E-1".into(),
            criador: "JOAO".into(),
            gerente: None,
            dat_entrega: NaiveDate::from_ymd_opt(2024, 1, 5)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            dat_resolucao: None,
            acao: "OK".into(),
            tipo_reclamacao: "COBRANCA".into(),
            detalhe_reclamacao: None,
            subdetalhe_reclamacao: None,
            num_cliente: "C-1".into(),
        }];
        let dir = DiretorioColaboradores::from_pairs(vec![(
            "JOAO".to_string(),
            "MARIA".to_string(),
        )]);
        analisar(tickets, &dir, &[], &AnaliseConfig::default())
    }

    #[test]
    fn test_report_bytes_are_xlsx() {
        let bytes = generate_indicators_report(&analise()).unwrap();
        // XLSX é um zip: assinatura PK\x03\x04
        assert!(bytes.len() > 4);
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_report_empty_analise() {
        let vazio = analisar(
            vec![],
            &DiretorioColaboradores::default(),
            &[],
            &AnaliseConfig::default(),
        );
        let bytes = generate_indicators_report(&vazio).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
