// Categorical code maps for labelled microdata columns
// Author: Gabriel Demetrios Lafis

/// A fixed mapping from a human-readable label to the stored integer code
#[derive(Debug, Clone)]
pub struct CodeMap {
    name: &'static str,
    entries: &'static [(&'static str, i64)],
}

/// Race/ethnicity codes of `TP_COR_RACA`
pub const RACE_CODES: CodeMap = CodeMap::new(
    "TP_COR_RACA",
    &[
        ("NAO_DECLARADO", 0),
        ("NÃO_DECLARADO", 0),
        ("BRANCA", 1),
        ("PRETA", 2),
        ("PARDA", 3),
        ("AMARELA", 4),
        ("INDIGENA", 5),
        ("INDÍGENA", 5),
    ],
);

/// School type codes of `TP_ESCOLA`
pub const SCHOOL_TYPE_CODES: CodeMap = CodeMap::new(
    "TP_ESCOLA",
    &[
        ("NAO_RESPONDEU", 1),
        ("NÃO_RESPONDEU", 1),
        ("PUBLICA", 2),
        ("PÚBLICA", 2),
        ("PRIVADA", 3),
        ("EXTERIOR", 4),
    ],
);

impl CodeMap {
    pub const fn new(name: &'static str, entries: &'static [(&'static str, i64)]) -> Self {
        CodeMap { name, entries }
    }

    /// Name of the column the codes belong to
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Look up the code for a label, ignoring case and surrounding whitespace
    pub fn lookup(&self, label: &str) -> Option<i64> {
        let label = label.trim().to_uppercase();
        self.entries
            .iter()
            .find(|(known, _)| *known == label)
            .map(|(_, code)| *code)
    }
}

/// The code maps a query engine resolves labels with
#[derive(Debug, Clone)]
pub struct CodeMaps {
    pub race: CodeMap,
    pub school_type: CodeMap,
}

impl Default for CodeMaps {
    fn default() -> Self {
        CodeMaps {
            race: RACE_CODES,
            school_type: SCHOOL_TYPE_CODES,
        }
    }
}
