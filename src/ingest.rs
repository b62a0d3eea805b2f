//! Gazetteer loading from delimited files.
//!
//! Reads worldcities-shaped CSV input: a header row naming at least one of
//! the columns `city_ascii` (or `city`), `country`, and `admin_name`.
//! Columns are located by header position, so extra columns and arbitrary
//! ordering are fine. Blank cells become `None` and exclude the row from
//! that category only.

use std::path::Path;

use crate::error::{Error, Result};
use crate::gazetteer::{GazetteerIndex, GazetteerRow};

/// Read gazetteer rows from a CSV file.
///
/// # Errors
///
/// Returns [`Error::DataUnavailable`] when the file does not exist, and
/// [`Error::Csv`] on malformed content.
pub fn read_gazetteer_csv<P: AsRef<Path>>(path: P) -> Result<Vec<GazetteerRow>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::data_unavailable(format!(
            "gazetteer file not found: {}",
            path.display()
        )));
    }

    let mut reader = csv::ReaderBuilder::new().from_path(path)?;
    let headers = reader.headers()?.clone();

    let idx_city = headers
        .iter()
        .position(|h| h == "city_ascii")
        .or_else(|| headers.iter().position(|h| h == "city"));
    let idx_country = headers.iter().position(|h| h == "country");
    let idx_admin = headers.iter().position(|h| h == "admin_name");

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(GazetteerRow {
            city: field(&record, idx_city),
            country: field(&record, idx_country),
            admin_region: field(&record, idx_admin),
        });
    }
    log::debug!("read {} gazetteer rows from {}", rows.len(), path.display());
    Ok(rows)
}

fn field(record: &csv::StringRecord, index: Option<usize>) -> Option<String> {
    let value = record.get(index?)?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl GazetteerIndex {
    /// Build an index directly from a CSV gazetteer file.
    ///
    /// # Errors
    ///
    /// Propagates [`read_gazetteer_csv`] errors; additionally returns
    /// [`Error::DataUnavailable`] when the file parses but yields no
    /// usable rows.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_rows(read_gazetteer_csv(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Category;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn reads_worldcities_columns() {
        let file = write_csv(
            "city,city_ascii,lat,lng,country,admin_name\n\
             São Paulo,Sao Paulo,-23.55,-46.63,Brazil,São Paulo\n\
             Mumbai,Mumbai,19.07,72.87,India,Maharashtra\n",
        );
        let rows = read_gazetteer_csv(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].city.as_deref(), Some("Sao Paulo"));
        assert_eq!(rows[0].country.as_deref(), Some("Brazil"));
        assert_eq!(rows[1].admin_region.as_deref(), Some("Maharashtra"));
    }

    #[test]
    fn blank_cells_become_none() {
        let file = write_csv("city_ascii,country,admin_name\nSingapore,Singapore,\n");
        let rows = read_gazetteer_csv(file.path()).unwrap();
        assert_eq!(rows[0].admin_region, None);
    }

    #[test]
    fn missing_file_is_data_unavailable() {
        let err = read_gazetteer_csv("/nonexistent/worldcities.csv").unwrap_err();
        assert!(matches!(err, Error::DataUnavailable(_)));
    }

    #[test]
    fn from_csv_path_builds_index() {
        let file = write_csv(
            "city_ascii,country,admin_name\n\
             Delhi,India,Delhi\n\
             Chennai,India,Tamil Nadu\n",
        );
        let index = GazetteerIndex::from_csv_path(file.path()).unwrap();
        assert_eq!(index.len(Category::City), 2);
        assert_eq!(index.len(Category::Country), 1);
    }

    #[test]
    fn header_only_file_is_data_unavailable() {
        let file = write_csv("city_ascii,country,admin_name\n");
        let err = GazetteerIndex::from_csv_path(file.path()).unwrap_err();
        assert!(matches!(err, Error::DataUnavailable(_)));
    }
}
