//! Reading the raw trip log into an untyped, column-preserving table.

use std::path::Path;

use tracing::{debug, info};

use crate::error::LoadError;
use crate::fetch::{BasicClient, HttpClient, fetch_bytes};

/// The trip log exactly as it appears on disk: header names plus rows of raw
/// string cells, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Position of the column named `name`, if present.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Like [`RawTable::column`] but fails for absent columns.
    pub fn require_column(&self, name: &str) -> Result<usize, LoadError> {
        self.column(name)
            .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Parses CSV bytes into a [`RawTable`].
///
/// # Errors
///
/// Returns [`LoadError::Empty`] when there is no header row and
/// [`LoadError::Csv`] when a row's width differs from the header's or a cell
/// is not valid UTF-8.
pub fn parse_table(bytes: &[u8]) -> Result<RawTable, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() {
        return Err(LoadError::Empty);
    }

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    debug!(columns = headers.len(), rows = rows.len(), "CSV parsed");
    Ok(RawTable { headers, rows })
}

/// Reads a local CSV file into a [`RawTable`].
pub fn load_path(path: impl AsRef<Path>) -> Result<RawTable, LoadError> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_table(&bytes)
}

/// Loads the trip log from a local file path or fetches it over HTTP.
#[tracing::instrument(skip_all, fields(source = %source))]
pub async fn load_source(source: &str) -> Result<RawTable, LoadError> {
    let table = if source.starts_with("http://") || source.starts_with("https://") {
        load_remote(&BasicClient::new(), source).await?
    } else {
        load_path(source)?
    };

    info!(
        columns = table.headers.len(),
        rows = table.len(),
        "Trip log loaded"
    );
    Ok(table)
}

/// Fetches and parses a remote CSV through `client`.
pub async fn load_remote<C: HttpClient>(client: &C, url: &str) -> Result<RawTable, LoadError> {
    let bytes = fetch_bytes(client, url).await?;
    debug!(bytes = bytes.len(), "Trip log bytes received, parsing");
    parse_table(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::stub::StubClient;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    #[test]
    fn test_parse_preserves_columns_and_order() {
        let csv = "Product Type,Fare Amount\nUberX,10\nPOOL,4.5\n";
        let table = parse_table(csv.as_bytes()).unwrap();

        assert_eq!(table.headers, vec!["Product Type", "Fare Amount"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0], vec!["UberX", "10"]);
        assert_eq!(table.rows[1], vec!["POOL", "4.5"]);
    }

    #[test]
    fn test_parse_keeps_empty_cells() {
        let table = parse_table(b"a,b\n1,\n").unwrap();
        assert_eq!(table.rows[0], vec!["1", ""]);
    }

    #[test]
    fn test_parse_inconsistent_width_fails() {
        let result = parse_table(b"a,b\n1,2,3\n");
        assert!(matches!(result, Err(LoadError::Csv(_))));
    }

    #[test]
    fn test_parse_empty_input_fails() {
        assert!(matches!(parse_table(b""), Err(LoadError::Empty)));
    }

    #[test]
    fn test_column_lookup() {
        let table = parse_table(b"x,y\n").unwrap();
        assert_eq!(table.column("y"), Some(1));
        assert!(table.is_empty());
        assert!(matches!(
            table.require_column("z"),
            Err(LoadError::MissingColumn(ref c)) if c == "z"
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_path(temp_path("ride_report_does_not_exist.csv"));
        assert!(matches!(result, Err(LoadError::Io(_))));
    }

    #[test]
    fn test_load_path_reads_file() {
        let path = temp_path("ride_report_loader_test.csv");
        fs::write(&path, "Trip or Order Status\nCOMPLETED\n").unwrap();

        let table = load_path(&path).unwrap();
        assert_eq!(table.rows, vec![vec!["COMPLETED".to_string()]]);

        fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_load_remote_parses_body() {
        let client = StubClient {
            status: 200,
            body: "a,b\n1,2\n",
        };
        let table = load_remote(&client, "https://localhost/rides.csv")
            .await
            .unwrap();
        assert_eq!(
            table,
            RawTable {
                headers: vec!["a".to_string(), "b".to_string()],
                rows: vec![vec!["1".to_string(), "2".to_string()]],
            }
        );
    }

    #[tokio::test]
    async fn test_load_remote_error_status() {
        let client = StubClient {
            status: 404,
            body: "",
        };
        let result = load_remote(&client, "https://localhost/rides.csv").await;
        assert!(matches!(
            result,
            Err(LoadError::HttpStatus { status: 404, .. })
        ));
    }
}
