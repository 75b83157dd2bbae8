// CSV data source for the microdata files
// Author: Gabriel Demetrios Lafis

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::ByteRecord;

use super::{Column, DataError, DataSource, Participant, Scores, Table};

/// CSV data source
pub struct CsvSource {
    path: String,
    delimiter: char,
}

impl CsvSource {
    /// Create a new CSV data source
    pub fn new<P: AsRef<Path>>(path: P, delimiter: char) -> Self {
        CsvSource {
            path: path.as_ref().to_string_lossy().to_string(),
            delimiter,
        }
    }
}

impl DataSource for CsvSource {
    fn read(&self) -> Result<Table, DataError> {
        let file = File::open(&self.path)?;
        let mut table = read_table(BufReader::new(file), self.delimiter)?;
        table.metadata.add("path", &self.path);
        Ok(table)
    }

    fn name(&self) -> &str {
        &self.path
    }
}

/// Read and clean a participant table from any CSV stream.
///
/// The stream must start with a header row. Rows with a missing or
/// non-numeric value in any score column are dropped.
pub fn read_table<R: Read>(reader: R, delimiter: char) -> Result<Table, DataError> {
    if !delimiter.is_ascii() {
        return Err(DataError::Parse(format!(
            "delimiter '{}' is not an ASCII character",
            delimiter
        )));
    }

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let layout = ColumnLayout::from_headers(csv_reader.byte_headers()?)?;

    let mut rows = Vec::new();
    let mut rows_read = 0usize;

    for result in csv_reader.byte_records() {
        let record = result?;
        rows_read += 1;

        if let Some(participant) = layout.participant(&record) {
            rows.push(participant);
        }
    }

    let mut table = Table::new(rows);
    table.metadata.add("source", "csv");
    table.metadata.add("rows_read", rows_read);
    table.metadata.add("rows_dropped", rows_read - table.len());

    Ok(table)
}

/// Coerce a raw score cell; empty, unparsable and non-finite cells are missing
pub fn coerce_score(cell: &str) -> Option<f64> {
    cell.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Coerce a raw integer cell, accepting integral floats such as `17.0`
pub fn coerce_integer(cell: &str) -> Option<i64> {
    let cell = cell.trim();
    if let Ok(value) = cell.parse::<i64>() {
        return Some(value);
    }

    cell.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && value.fract() == 0.0)
        .filter(|value| *value >= i64::MIN as f64 && *value <= i64::MAX as f64)
        .map(|value| value as i64)
}

/// Position of each known column in the file header
struct ColumnLayout {
    indices: Vec<(Column, usize)>,
}

impl ColumnLayout {
    fn from_headers(headers: &ByteRecord) -> Result<Self, DataError> {
        let mut indices = Vec::new();

        for (i, raw) in headers.iter().enumerate() {
            let name = String::from_utf8_lossy(raw);
            let name = name.trim_start_matches('\u{feff}');

            if let Some(column) = Column::from_name(name) {
                if !indices.iter().any(|(known, _)| *known == column) {
                    indices.push((column, i));
                }
            }
        }

        for score in Column::SCORES {
            if !indices.iter().any(|(known, _)| *known == score) {
                return Err(DataError::MissingColumn(score.name().to_string()));
            }
        }

        Ok(ColumnLayout { indices })
    }

    fn cell<'r>(&self, record: &'r ByteRecord, column: Column) -> Option<Cow<'r, str>> {
        let index = self
            .indices
            .iter()
            .find(|(known, _)| *known == column)
            .map(|(_, i)| *i)?;

        let raw = record.get(index)?;
        match String::from_utf8_lossy(raw) {
            Cow::Borrowed(s) if s.trim().is_empty() => None,
            Cow::Borrowed(s) => Some(Cow::Borrowed(s.trim())),
            Cow::Owned(s) if s.trim().is_empty() => None,
            Cow::Owned(s) => Some(Cow::Owned(s.trim().to_string())),
        }
    }

    fn score(&self, record: &ByteRecord, column: Column) -> Option<f64> {
        self.cell(record, column).and_then(|cell| coerce_score(&cell))
    }

    fn integer(&self, record: &ByteRecord, column: Column) -> Option<i64> {
        self.cell(record, column).and_then(|cell| coerce_integer(&cell))
    }

    fn text(&self, record: &ByteRecord, column: Column) -> Option<String> {
        self.cell(record, column).map(Cow::into_owned)
    }

    /// Build a participant, or `None` when any score is missing
    fn participant(&self, record: &ByteRecord) -> Option<Participant> {
        let scores = Scores {
            natural_sciences: self.score(record, Column::NaturalSciences)?,
            human_sciences: self.score(record, Column::HumanSciences)?,
            languages: self.score(record, Column::Languages)?,
            math: self.score(record, Column::Math)?,
            essay: self.score(record, Column::Essay)?,
        };

        Some(Participant {
            registration: self.text(record, Column::Registration),
            year: self.integer(record, Column::Year),
            age: self.integer(record, Column::Age),
            sex: self.text(record, Column::Sex),
            race: self.integer(record, Column::Race),
            school_type: self.integer(record, Column::SchoolType),
            state: self.text(record, Column::State),
            scores,
        })
    }
}
