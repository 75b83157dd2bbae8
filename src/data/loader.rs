// Startup loading of the participant table
// Author: Gabriel Demetrios Lafis

use std::path::Path;

use log::{error, info, warn};

use super::{CsvSource, DataSource, TableHandle};

/// Options for reading the microdata file
#[derive(Debug, Clone)]
pub struct CsvOptions {
    pub delimiter: char,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions { delimiter: ',' }
    }
}

/// Load the microdata CSV at `path`.
///
/// Never fails: a source that cannot be read produces
/// [`TableHandle::Unavailable`] carrying the reason.
pub fn load<P: AsRef<Path>>(path: P, options: &CsvOptions) -> TableHandle {
    load_from(&CsvSource::new(path, options.delimiter))
}

/// Load a table from any data source
pub fn load_from<S: DataSource + ?Sized>(source: &S) -> TableHandle {
    match source.read() {
        Ok(table) => {
            let dropped = table
                .metadata
                .get("rows_dropped")
                .cloned()
                .unwrap_or_else(|| "0".to_string());

            info!(
                "Loaded {} participants from {} ({} rows dropped)",
                table.len(),
                source.name(),
                dropped
            );

            if table.is_empty() {
                warn!("Dataset {} has no valid rows", source.name());
            }

            TableHandle::Ready(table)
        }
        Err(err) => {
            error!("Failed to load dataset {}: {}", source.name(), err);
            TableHandle::unavailable(format!("{}: {}", source.name(), err))
        }
    }
}
