use std::collections::HashSet;
use std::io::Read;
use std::time::Instant;

use tracing::debug;

use crate::error::AppError;
use crate::parser::columns::{
    validate_colab_columns, validate_columns, ColumnMap,
};
use crate::parser::deserializers::{non_empty, parse_smap_datetime};
use crate::parser::types::{ParseWarning, SmapTicketNormalized, SmapTicketRaw};

/// Output of `parse_tickets` — carries normalized tickets and load metadata.
#[derive(Debug)]
pub struct ParseOutput {
    pub tickets: Vec<SmapTicketNormalized>,
    pub warnings: Vec<ParseWarning>,
    pub total_rows_processed: usize,
    pub skipped_rows: usize,
    pub detected_columns: Vec<String>,
    pub missing_optional_columns: Vec<String>,
    pub unique_acoes: Vec<String>,
    pub unique_tipos: Vec<String>,
    pub parse_duration_ms: u64,
}

/// Parse the SMAP ticket export from `path`.
pub fn parse_tickets(path: &str) -> Result<ParseOutput, AppError> {
    let file = std::fs::File::open(path)?;
    parse_tickets_reader(std::io::BufReader::new(file))
}

/// Core ticket parsing logic — accepts any `Read` source, useful for tests.
pub fn parse_tickets_reader<R: Read>(reader: R) -> Result<ParseOutput, AppError> {
    let start = Instant::now();

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .double_quote(true)
        .quoting(true)
        .from_reader(reader);

    // Phase 1: validate columns
    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(AppError::EmptyFile);
    }
    let col_map = ColumnMap::from_headers(&headers);
    let col_validation = validate_columns(&col_map)?;

    // Phase 2: parse and normalize records
    let mut tickets: Vec<SmapTicketNormalized> = Vec::with_capacity(10_000);
    let mut warnings: Vec<ParseWarning> = Vec::new();
    let mut skipped = 0usize;
    let mut row_idx = 0usize;

    let mut unique_acoes: HashSet<String> = HashSet::new();
    let mut unique_tipos: HashSet<String> = HashSet::new();

    for result in rdr.records() {
        row_idx += 1;

        match result {
            Ok(record) => {
                let raw = record_to_raw(&col_map, &record);
                match normalize_ticket(&raw) {
                    Ok(normalized) => {
                        unique_acoes.insert(normalized.acao.clone());
                        unique_tipos.insert(normalized.tipo_reclamacao.clone());
                        tickets.push(normalized);
                    }
                    Err(msg) => {
                        warnings.push(ParseWarning {
                            line: row_idx + 1, // +1 for the header row
                            message: msg,
                        });
                        skipped += 1;
                    }
                }
            }
            Err(err) => {
                warnings.push(ParseWarning {
                    line: row_idx + 1,
                    message: err.to_string(),
                });
                skipped += 1;
            }
        }
    }

    if row_idx == 0 {
        return Err(AppError::EmptyFile);
    }

    let mut unique_acoes: Vec<String> = unique_acoes.into_iter().collect();
    unique_acoes.sort();
    let mut unique_tipos: Vec<String> = unique_tipos.into_iter().collect();
    unique_tipos.sort();

    debug!(
        total = row_idx,
        retidos = tickets.len(),
        descartados = skipped,
        "parse de chamados concluído"
    );

    Ok(ParseOutput {
        tickets,
        warnings,
        total_rows_processed: row_idx,
        skipped_rows: skipped,
        detected_columns: col_validation.present,
        missing_optional_columns: col_validation.missing_optional,
        unique_acoes,
        unique_tipos,
        parse_duration_ms: start.elapsed().as_millis() as u64,
    })
}

/// Parse the collaborator directory (COLABORADOR;GERENTE) from `path`.
/// Returns raw (collaborator, manager) pairs in file order — duplicate
/// handling is the resolver's concern.
pub fn parse_colaboradores(path: &str) -> Result<Vec<(String, String)>, AppError> {
    let file = std::fs::File::open(path)?;
    parse_colaboradores_reader(std::io::BufReader::new(file))
}

/// Core directory parsing logic — accepts any `Read` source.
pub fn parse_colaboradores_reader<R: Read>(
    reader: R,
) -> Result<Vec<(String, String)>, AppError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(AppError::EmptyFile);
    }
    let col_map = ColumnMap::from_headers(&headers);
    validate_colab_columns(&col_map)?;

    let mut pairs = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let colaborador = col_map.get(&record, "COLABORADOR").and_then(non_empty);
        let gerente = col_map.get(&record, "GERENTE").and_then(non_empty);
        if let (Some(c), Some(g)) = (colaborador, gerente) {
            pairs.push((c, g));
        }
    }

    Ok(pairs)
}

fn record_to_raw(col_map: &ColumnMap, record: &csv::StringRecord) -> SmapTicketRaw {
    SmapTicketRaw {
        cod_evento: col_map.get(record, "COD_EVENTO").map(str::to_string),
        usuario_criador: col_map
            .get(record, "USUARIO_CRIADOR")
            .map(str::to_string),
        dat_entrega: col_map.get(record, "DAT_ENTREGA").map(str::to_string),
        dat_resolucao: col_map.get(record, "DAT_RESOLUCAO").map(str::to_string),
        acao: col_map.get(record, "AÇÃO").map(str::to_string),
        tipo_reclamacao: col_map
            .get(record, "DES_TIPO_RECLAMACAO")
            .map(str::to_string),
        detalhe_reclamacao: col_map
            .get(record, "DES_DETALHE_RECLAMACAO")
            .map(str::to_string),
        subdetalhe_reclamacao: col_map
            .get(record, "DES_SUBDETALHE_RECLAMACAO")
            .map(str::to_string),
        num_cliente: col_map.get(record, "DES_NUM_CLIENTE").map(str::to_string),
    }
}

fn normalize_ticket(raw: &SmapTicketRaw) -> Result<SmapTicketNormalized, String> {
    // COD_EVENTO (required)
    let cod_evento = raw
        .cod_evento
        .as_deref()
        .and_then(non_empty)
        .ok_or_else(|| "COD_EVENTO vazio".to_string())?;

    // DAT_ENTREGA (required) — rows without a valid delivery date are
    // excluded from the working set entirely.
    let entrega_str = raw.dat_entrega.as_deref().unwrap_or("");
    let dat_entrega = parse_smap_datetime(entrega_str)
        .ok_or_else(|| format!("DAT_ENTREGA inválida: {:?}", entrega_str))?;

    // DAT_RESOLUCAO (optional) — unparseable values leave the ticket open.
    let dat_resolucao = raw
        .dat_resolucao
        .as_deref()
        .and_then(parse_smap_datetime);

    Ok(SmapTicketNormalized {
        cod_evento,
        criador: raw.usuario_criador.as_deref().unwrap_or("").trim().to_string(),
        gerente: None,
        dat_entrega,
        dat_resolucao,
        acao: raw.acao.as_deref().unwrap_or("").trim().to_string(),
        tipo_reclamacao: raw
            .tipo_reclamacao
            .as_deref()
            .unwrap_or("")
            .trim()
            .to_string(),
        detalhe_reclamacao: raw.detalhe_reclamacao.as_deref().and_then(non_empty),
        subdetalhe_reclamacao: raw.subdetalhe_reclamacao.as_deref().and_then(non_empty),
        num_cliente: raw.num_cliente.as_deref().unwrap_or("").trim().to_string(),
    })
}

// ─── Tests ────────────────────────────────────────────────────────────────────
