use std::collections::HashMap;

use crate::error::AppError;

/// Colunas obrigatórias do export SMAP — a carga falha se alguma faltar.
const REQUIRED: &[&str] = &[
    "COD_EVENTO",
    "USUARIO_CRIADOR",
    "DAT_ENTREGA",
    "DAT_RESOLUCAO",
    "AÇÃO",
    "DES_TIPO_RECLAMACAO",
    "DES_NUM_CLIENTE",
];

/// Colunas opcionais — ausentes = valor vazio, sinalizadas no resultado.
const OPTIONAL: &[&str] = &["DES_DETALHE_RECLAMACAO", "DES_SUBDETALHE_RECLAMACAO"];

/// Colunas obrigatórias da base de colaboradores.
pub const COLAB_REQUIRED: &[&str] = &["COLABORADOR", "GERENTE"];

/// Maps column names to their index in a CSV record.
pub struct ColumnMap {
    indices: HashMap<String, usize>,
    headers: Vec<String>,
}

impl ColumnMap {
    /// Build a ColumnMap from the CSV header record.
    /// Header fields are trimmed of surrounding whitespace.
    pub fn from_headers(headers: &csv::StringRecord) -> Self {
        let mut indices = HashMap::new();
        let mut header_list = Vec::new();
        for (i, field) in headers.iter().enumerate() {
            let name = field.trim().to_string();
            indices.insert(name.clone(), i);
            header_list.push(name);
        }
        ColumnMap {
            indices,
            headers: header_list,
        }
    }

    /// Get the value of a named column from a record.
    pub fn get<'a>(&self, record: &'a csv::StringRecord, col: &str) -> Option<&'a str> {
        self.indices.get(col).and_then(|&i| record.get(i))
    }

    /// Returns true if the column is present in the CSV headers.
    pub fn has(&self, col: &str) -> bool {
        self.indices.contains_key(col)
    }

    /// All header names in order.
    pub fn all_headers(&self) -> &[String] {
        &self.headers
    }
}

/// Result of column validation.
#[derive(Debug)]
pub struct ColumnValidation {
    /// All column names present in the CSV.
    pub present: Vec<String>,
    /// Optional columns that are absent from the CSV.
    pub missing_optional: Vec<String>,
}

/// Validate that all required ticket columns are present.
/// Returns `AppError::MissingColumns` if any required column is absent.
pub fn validate_columns(col_map: &ColumnMap) -> Result<ColumnValidation, AppError> {
    validate_against(col_map, REQUIRED, OPTIONAL)
}

/// Validate the collaborator directory headers.
pub fn validate_colab_columns(col_map: &ColumnMap) -> Result<ColumnValidation, AppError> {
    validate_against(col_map, COLAB_REQUIRED, &[])
}

fn validate_against(
    col_map: &ColumnMap,
    required: &[&str],
    optional: &[&str],
) -> Result<ColumnValidation, AppError> {
    let missing_required: Vec<String> = required
        .iter()
        .filter(|&&c| !col_map.has(c))
        .map(|c| c.to_string())
        .collect();

    if !missing_required.is_empty() {
        return Err(AppError::MissingColumns(missing_required));
    }

    let missing_optional = optional
        .iter()
        .filter(|&&c| !col_map.has(c))
        .map(|c| c.to_string())
        .collect();

    Ok(ColumnValidation {
        present: col_map.all_headers().to_vec(),
        missing_optional,
    })
}
