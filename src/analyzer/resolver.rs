use std::collections::HashMap;

use tracing::debug;

use crate::parser::deserializers::normalize_name;
use crate::parser::types::SmapTicketNormalized;

/// Directory mapping normalized collaborator name → manager display name.
///
/// Keys are normalized with trim + uppercase; the same normalization is
/// applied to ticket creators at lookup time. Duplicate collaborator rows
/// are resolved last-write-wins (the final occurrence in the source file).
#[derive(Debug, Default, Clone)]
pub struct DiretorioColaboradores {
    map: HashMap<String, String>,
}

impl DiretorioColaboradores {
    /// Build the directory from raw (collaborator, manager) pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut map = HashMap::new();
        for (colaborador, gerente) in pairs {
            map.insert(normalize_name(&colaborador), gerente.trim().to_string());
        }
        DiretorioColaboradores { map }
    }

    /// Manager for a creator name, or None when the directory has no match.
    pub fn resolve(&self, criador: &str) -> Option<&str> {
        self.map.get(&normalize_name(criador)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Entity resolver: left-outer join of tickets onto the directory.
/// Unmatched creators keep their ticket with `gerente = None`.
pub fn atribuir_gerentes(
    tickets: &mut [SmapTicketNormalized],
    diretorio: &DiretorioColaboradores,
) {
    let mut sem_gerente = 0usize;
    for ticket in tickets.iter_mut() {
        ticket.gerente = diretorio.resolve(&ticket.criador).map(str::to_string);
        if ticket.gerente.is_none() {
            sem_gerente += 1;
        }
    }
    if sem_gerente > 0 {
        debug!(sem_gerente, "chamados sem gerente atribuído");
    }
}
