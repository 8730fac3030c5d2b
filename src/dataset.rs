//! Dataset types for resenha.
//!
//! Provides the typed [`Review`] record and the [`ReviewDataset`] collection
//! for working with the tab-separated review archive in memory.

use std::{io::Read, path::Path};

use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};

/// The column names of the review archive, in file order.
///
/// Parsing fails when the header row does not cover all of these.
pub const COLUMNS: [&str; 15] = [
    "marketplace",
    "customer_id",
    "review_id",
    "product_id",
    "product_parent",
    "product_title",
    "product_category",
    "star_rating",
    "helpful_votes",
    "total_votes",
    "vine",
    "verified_purchase",
    "review_headline",
    "review_body",
    "review_date",
];

/// Deserializes the archive's single-character `Y`/`N` flag into a bool.
fn yn_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let flag = String::deserialize(deserializer)?;
    Ok(flag == "Y")
}

/// One review row, typed as given in the source archive.
///
/// The two flag columns (`vine`, `verified_purchase`) are derived from the
/// archive's `Y` sentinel character; everything else keeps its source type.
/// Records are immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Review {
    /// Marketplace country code (e.g. `US`).
    pub marketplace: String,
    /// Numeric customer identifier.
    pub customer_id: u64,
    /// Unique review identifier.
    pub review_id: String,
    /// Product identifier; many reviews share one product.
    pub product_id: String,
    /// Identifier grouping product variants.
    pub product_parent: u64,
    /// Product title.
    pub product_title: String,
    /// Product category label.
    pub product_category: String,
    /// Star rating, expected range 1-5.
    pub star_rating: u8,
    /// Number of helpful votes on the review.
    pub helpful_votes: u64,
    /// Total number of votes on the review.
    pub total_votes: u64,
    /// Whether the review was written through the Vine program.
    #[serde(deserialize_with = "yn_flag")]
    pub vine: bool,
    /// Whether the purchase was verified.
    #[serde(deserialize_with = "yn_flag")]
    pub verified_purchase: bool,
    /// Review headline.
    pub review_headline: String,
    /// Review body text.
    pub review_body: String,
    /// Review date as given in the archive (`YYYY-MM-DD`).
    pub review_date: String,
}

/// Options for TSV parsing.
#[derive(Debug, Clone)]
pub struct TsvOptions {
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Delimiter character (default is tab).
    pub delimiter: u8,
    /// Whether quote characters are interpreted (the archive is unquoted).
    pub quoting: bool,
}

impl Default for TsvOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: b'\t',
            quoting: false,
        }
    }
}

impl TsvOptions {
    /// Creates new TSV options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether the file has a header row.
    #[must_use]
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Sets the delimiter character.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether quote characters are interpreted.
    #[must_use]
    pub fn with_quoting(mut self, quoting: bool) -> Self {
        self.quoting = quoting;
        self
    }
}

/// An ordered, in-memory collection of [`Review`] records.
///
/// This is the primary dataset type for resenha. It is constructed once by
/// the loader, read-only afterward, and passed by shared reference to every
/// computation.
///
/// # Example
///
/// ```
/// use resenha::ReviewDataset;
///
/// let tsv = "marketplace\tcustomer_id\treview_id\tproduct_id\tproduct_parent\t\
///            product_title\tproduct_category\tstar_rating\thelpful_votes\t\
///            total_votes\tvine\tverified_purchase\treview_headline\t\
///            review_body\treview_date\n\
///            US\t1\tR1\tB001\t10\tCard\tGift Card\t5\t0\t0\tN\tY\tGreat\tLoved it\t2015-08-01\n";
/// let dataset = ReviewDataset::from_tsv_bytes(tsv.as_bytes()).unwrap();
/// assert_eq!(dataset.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReviewDataset {
    records: Vec<Review>,
}

impl ReviewDataset {
    /// Creates a dataset from already-parsed records.
    pub fn from_records(records: Vec<Review>) -> Self {
        Self { records }
    }

    /// Parses a dataset from a TSV reader.
    ///
    /// # Errors
    ///
    /// Returns a parse error if the header does not cover the expected
    /// columns or any row fails to decode.
    pub fn from_tsv(reader: impl Read, options: &TsvOptions) -> Result<Self> {
        let mut tsv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .has_headers(options.has_header)
            .quoting(options.quoting)
            .from_reader(reader);

        if options.has_header {
            let headers = tsv_reader
                .headers()
                .map_err(|e| Error::parse(format!("failed to read header row: {e}")))?;
            for required in COLUMNS {
                if !headers.iter().any(|h| h == required) {
                    return Err(Error::parse(format!(
                        "missing required column '{required}' in header"
                    )));
                }
            }
        }

        let mut records = Vec::new();
        for (line, record) in tsv_reader.deserialize::<Review>().enumerate() {
            let record =
                record.map_err(|e| Error::parse(format!("invalid record at row {line}: {e}")))?;
            records.push(record);
        }

        Ok(Self { records })
    }

    /// Parses a dataset from raw TSV bytes with default options.
    ///
    /// # Errors
    ///
    /// Returns a parse error if the content is not header-prefixed TSV.
    pub fn from_tsv_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_tsv(bytes, &TsvOptions::default())
    }

    /// Parses a dataset from a TSV file on disk.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be opened, or a parse error
    /// if the content is not header-prefixed TSV.
    pub fn from_tsv_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| Error::io(e, path))?;
        Self::from_tsv(std::io::BufReader::new(file), &TsvOptions::default())
    }

    /// Returns the total number of records in the dataset.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the dataset contains no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns a single record by index.
    ///
    /// Returns `None` if the index is out of bounds.
    pub fn get(&self, index: usize) -> Option<&Review> {
        self.records.get(index)
    }

    /// Returns an iterator over all records.
    pub fn iter(&self) -> std::slice::Iter<'_, Review> {
        self.records.iter()
    }

    /// Returns the records as a slice.
    pub fn records(&self) -> &[Review] {
        &self.records
    }

    /// Consumes the dataset and returns the owned records.
    #[must_use]
    pub fn into_records(self) -> Vec<Review> {
        self.records
    }
}

impl<'a> IntoIterator for &'a ReviewDataset {
    type Item = &'a Review;
    type IntoIter = std::slice::Iter<'a, Review>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "marketplace\tcustomer_id\treview_id\tproduct_id\tproduct_parent\tproduct_title\tproduct_category\tstar_rating\thelpful_votes\ttotal_votes\tvine\tverified_purchase\treview_headline\treview_body\treview_date";

    fn row(review_id: &str, product_id: &str, rating: u8, verified: &str) -> String {
        format!(
            "US\t42\t{review_id}\t{product_id}\t100\tSome Product\tGift Card\t{rating}\t0\t1\tN\t{verified}\tHeadline\tBody text\t2015-08-01"
        )
    }

    fn tsv(rows: &[String]) -> String {
        let mut out = String::from(HEADER);
        for r in rows {
            out.push('\n');
            out.push_str(r);
        }
        out.push('\n');
        out
    }

    #[test]
    fn test_parse_single_row() {
        let data = tsv(&[row("R1", "B001", 5, "Y")]);
        let dataset = ReviewDataset::from_tsv_bytes(data.as_bytes()).unwrap();

        assert_eq!(dataset.len(), 1);
        let review = dataset.get(0).unwrap();
        assert_eq!(review.marketplace, "US");
        assert_eq!(review.customer_id, 42);
        assert_eq!(review.product_id, "B001");
        assert_eq!(review.star_rating, 5);
        assert_eq!(review.review_date, "2015-08-01");
    }

    #[test]
    fn test_flag_derivation() {
        let data = tsv(&[row("R1", "B001", 5, "Y"), row("R2", "B001", 1, "N")]);
        let dataset = ReviewDataset::from_tsv_bytes(data.as_bytes()).unwrap();

        assert!(dataset.get(0).unwrap().verified_purchase);
        assert!(!dataset.get(1).unwrap().verified_purchase);
        // vine is "N" in every fixture row
        assert!(!dataset.get(0).unwrap().vine);
    }

    #[test]
    fn test_empty_file_with_header() {
        let data = tsv(&[]);
        let dataset = ReviewDataset::from_tsv_bytes(data.as_bytes()).unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.len(), 0);
    }

    #[test]
    fn test_missing_column_is_parse_error() {
        let data = "marketplace\tcustomer_id\nUS\t42\n";
        let err = ReviewDataset::from_tsv_bytes(data.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
        assert!(err.to_string().contains("missing required column"));
    }

    #[test]
    fn test_non_numeric_rating_is_parse_error() {
        let mut bad = row("R1", "B001", 5, "Y");
        bad = bad.replace("\t5\t", "\tfive\t");
        let data = tsv(&[bad]);
        let err = ReviewDataset::from_tsv_bytes(data.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn test_short_row_is_parse_error() {
        let data = format!("{HEADER}\nUS\t42\tR1\n");
        let err = ReviewDataset::from_tsv_bytes(data.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn test_from_records() {
        let review = Review {
            product_id: "B001".to_string(),
            star_rating: 4,
            ..Review::default()
        };
        let dataset = ReviewDataset::from_records(vec![review.clone()]);
        assert_eq!(dataset.records(), &[review]);
    }

    #[test]
    fn test_iteration_order_is_file_order() {
        let data = tsv(&[
            row("R1", "B001", 5, "Y"),
            row("R2", "B002", 3, "N"),
            row("R3", "B003", 1, "Y"),
        ]);
        let dataset = ReviewDataset::from_tsv_bytes(data.as_bytes()).unwrap();

        let ids: Vec<&str> = dataset.iter().map(|r| r.review_id.as_str()).collect();
        assert_eq!(ids, ["R1", "R2", "R3"]);
    }

    #[test]
    fn test_tsv_options_builder() {
        let options = TsvOptions::new()
            .with_header(false)
            .with_delimiter(b',')
            .with_quoting(true);

        assert!(!options.has_header);
        assert_eq!(options.delimiter, b',');
        assert!(options.quoting);
    }

    #[test]
    fn test_tsv_options_default() {
        let options = TsvOptions::default();
        assert!(options.has_header);
        assert_eq!(options.delimiter, b'\t');
        assert!(!options.quoting);
    }

    #[test]
    fn test_from_tsv_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("reviews.tsv");
        std::fs::write(&path, tsv(&[row("R1", "B001", 5, "Y")])).unwrap();

        let dataset = ReviewDataset::from_tsv_path(&path).unwrap();
        assert_eq!(dataset.len(), 1);
    }
}
