// Participant schema and column lookup
// Author: Gabriel Demetrios Lafis

use serde::Serialize;

use super::Value;

/// A named column of the microdata table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Registration,
    Year,
    Age,
    Sex,
    Race,
    SchoolType,
    State,
    NaturalSciences,
    HumanSciences,
    Languages,
    Math,
    Essay,
}

impl Column {
    /// Every column, in table order
    pub const ALL: [Column; 12] = [
        Column::Registration,
        Column::Year,
        Column::Age,
        Column::Sex,
        Column::Race,
        Column::SchoolType,
        Column::State,
        Column::NaturalSciences,
        Column::HumanSciences,
        Column::Languages,
        Column::Math,
        Column::Essay,
    ];

    /// The five subject score columns
    pub const SCORES: [Column; 5] = [
        Column::NaturalSciences,
        Column::HumanSciences,
        Column::Languages,
        Column::Math,
        Column::Essay,
    ];

    /// Column name as it appears in the microdata files
    pub fn name(&self) -> &'static str {
        match self {
            Column::Registration => "NU_INSCRICAO",
            Column::Year => "NU_ANO",
            Column::Age => "NU_IDADE",
            Column::Sex => "TP_SEXO",
            Column::Race => "TP_COR_RACA",
            Column::SchoolType => "TP_ESCOLA",
            Column::State => "SG_UF_RESIDENCIA",
            Column::NaturalSciences => "NU_NOTA_CN",
            Column::HumanSciences => "NU_NOTA_CH",
            Column::Languages => "NU_NOTA_LC",
            Column::Math => "NU_NOTA_MT",
            Column::Essay => "NU_NOTA_REDACAO",
        }
    }

    /// Resolve an external column name, ignoring case
    pub fn from_name(name: &str) -> Option<Column> {
        let name = name.trim();
        Column::ALL
            .iter()
            .copied()
            .find(|column| column.name().eq_ignore_ascii_case(name))
    }
}

/// Subject scores of a participant.
///
/// Always finite: rows with a missing or invalid score never make it into a
/// table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Scores {
    #[serde(rename = "NU_NOTA_CN")]
    pub natural_sciences: f64,
    #[serde(rename = "NU_NOTA_CH")]
    pub human_sciences: f64,
    #[serde(rename = "NU_NOTA_LC")]
    pub languages: f64,
    #[serde(rename = "NU_NOTA_MT")]
    pub math: f64,
    #[serde(rename = "NU_NOTA_REDACAO")]
    pub essay: f64,
}

impl Scores {
    /// Get a score by column, `None` for non-score columns
    pub fn get(&self, column: Column) -> Option<f64> {
        match column {
            Column::NaturalSciences => Some(self.natural_sciences),
            Column::HumanSciences => Some(self.human_sciences),
            Column::Languages => Some(self.languages),
            Column::Math => Some(self.math),
            Column::Essay => Some(self.essay),
            _ => None,
        }
    }
}

/// One exam participant
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Participant {
    #[serde(rename = "NU_INSCRICAO")]
    pub registration: Option<String>,
    #[serde(rename = "NU_ANO")]
    pub year: Option<i64>,
    #[serde(rename = "NU_IDADE")]
    pub age: Option<i64>,
    #[serde(rename = "TP_SEXO")]
    pub sex: Option<String>,
    #[serde(rename = "TP_COR_RACA")]
    pub race: Option<i64>,
    #[serde(rename = "TP_ESCOLA")]
    pub school_type: Option<i64>,
    #[serde(rename = "SG_UF_RESIDENCIA")]
    pub state: Option<String>,
    #[serde(flatten)]
    pub scores: Scores,
}

impl Participant {
    /// Get the value of a column by its typed name
    pub fn value(&self, column: Column) -> Value {
        match column {
            Column::Registration => self.registration.as_ref().into(),
            Column::Year => self.year.into(),
            Column::Age => self.age.into(),
            Column::Sex => self.sex.as_ref().into(),
            Column::Race => self.race.into(),
            Column::SchoolType => self.school_type.into(),
            Column::State => self.state.as_ref().into(),
            score => self.scores.get(score).map_or(Value::Null, Value::Float),
        }
    }
}
