// API request and response models
// Author: Gabriel Demetrios Lafis

use serde::Deserialize;
use serde_json::{json, Map, Value as JsonValue};

use crate::processing::{ColumnSummary, GroupMean, SearchCriteria, ValueCount};

/// Query string of `/dados_gerais`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralDataQuery {
    pub ano: Option<i64>,
}

/// Query string of `/participantes`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    pub idade: Option<i64>,
    pub sexo: Option<String>,
    pub uf: Option<String>,
    pub cor: Option<String>,
    pub tipo_escola: Option<String>,
    pub nota_mt_min: Option<f64>,
    pub nota_mt_max: Option<f64>,
    pub limite: Option<usize>,
}

impl SearchQuery {
    /// Engine criteria for this query string
    pub fn criteria(&self) -> SearchCriteria {
        SearchCriteria {
            age: self.idade,
            sex: self.sexo.clone(),
            state: self.uf.clone(),
            race: self.cor.clone(),
            school_type: self.tipo_escola.clone(),
            math_min: self.nota_mt_min,
            math_max: self.nota_mt_max,
        }
    }
}

/// `{column: {mean, median, std}}` in score column order
pub fn statistics_body(summaries: &[ColumnSummary]) -> Map<String, JsonValue> {
    summaries
        .iter()
        .map(|s| (s.column.to_string(), json!(s.summary)))
        .collect()
}

/// `{value: count}` in descending count order.
///
/// Missing values are keyed `null`; a cell holding the text `null` shares
/// that key, and the two counts are added.
pub fn distribution_body(counts: &[ValueCount]) -> Map<String, JsonValue> {
    let mut body = Map::new();

    for c in counts {
        let previous = body.get(c.label()).and_then(JsonValue::as_u64).unwrap_or(0);
        body.insert(c.label().to_string(), json!(previous + c.count as u64));
    }

    body
}

/// `{state: mean}` in descending mean order
pub fn ranking_body(ranking: &[GroupMean]) -> Map<String, JsonValue> {
    ranking
        .iter()
        .map(|g| (g.group.clone(), json!(g.mean)))
        .collect()
}
