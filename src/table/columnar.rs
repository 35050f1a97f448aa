use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use unicode_general_category::{get_general_category, GeneralCategory};

use crate::error::{Error, Result};

const DELIMITER: char = '\t';
const PLACEHOLDER: char = '_';

/// One row of a table, one cell per column in declaration order
pub type Row<'a> = Vec<&'a str>;

/// A tab-delimited table held as columns.
///
/// Every column has exactly `row_count` cells. Tables are immutable after
/// loading except through [`Table::replace_column`], which commits a whole
/// transformed column back in one step.
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    path: PathBuf,
    columns: IndexMap<String, Vec<String>>,
    row_count: usize,
}

impl Table {
    /// Load a table from disk.
    ///
    /// When `required` is set the header must contain that column. When
    /// `sanitize` is set every character of every cell that is not a letter
    /// or decimal digit is replaced with `_`.
    pub fn load(path: &Path, required: Option<&str>, sanitize: bool) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::NotFound {
                path: path.to_path_buf(),
            });
        }

        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let table = Self::parse(path, &text, required, sanitize)?;
        info!(
            "{} loaded: {} rows, {} columns",
            path.display(),
            table.row_count,
            table.column_count()
        );
        Ok(table)
    }

    /// Parse table text. `path` is only used for naming and error messages.
    pub fn parse(path: &Path, text: &str, required: Option<&str>, sanitize: bool) -> Result<Self> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let lines: Vec<&str> = text.lines().collect();

        let header_line = lines
            .first()
            .ok_or_else(|| Error::malformed(path, "file is empty"))?;

        let headers: Vec<&str> = header_line
            .split(DELIMITER)
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .collect();

        let mut columns: IndexMap<String, Vec<String>> = IndexMap::with_capacity(headers.len());
        for header in &headers {
            if columns.insert(header.to_string(), Vec::new()).is_some() {
                return Err(Error::DuplicateDefinition {
                    path: path.to_path_buf(),
                    column: header.to_string(),
                });
            }
        }

        if let Some(required) = required {
            if !columns.contains_key(required) {
                return Err(Error::MissingColumn {
                    path: path.to_path_buf(),
                    column: required.to_string(),
                });
            }
        }

        if lines.len() < 2 {
            return Err(Error::malformed(path, "expected a header line and data lines"));
        }

        let mut row_count = 0;
        for (line_no, line) in lines.iter().enumerate().skip(1) {
            if line.trim().is_empty() {
                continue;
            }

            let cells: Vec<&str> = line.split(DELIMITER).collect();
            if cells.len() < headers.len() {
                return Err(Error::malformed(
                    path,
                    format!(
                        "line {} has {} cells, header declares {}",
                        line_no + 1,
                        cells.len(),
                        headers.len()
                    ),
                ));
            }

            for (values, cell) in columns.values_mut().zip(cells) {
                values.push(if sanitize {
                    sanitize_cell(cell)
                } else {
                    cell.to_string()
                });
            }
            row_count += 1;
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            name,
            path: path.to_path_buf(),
            columns,
            row_count,
        })
    }

    /// File name of the table
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Column names in declaration order
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Declaration index of a column
    pub fn column_position(&self, name: &str) -> Result<usize> {
        self.columns
            .get_index_of(name)
            .ok_or_else(|| self.unknown_column(name))
    }

    /// All cells of a column, in row order
    pub fn column(&self, name: &str) -> Result<&[String]> {
        self.columns
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| self.unknown_column(name))
    }

    /// All cells of the column at a declaration index
    pub fn column_at(&self, position: usize) -> Result<&[String]> {
        self.columns
            .get_index(position)
            .map(|(_, values)| values.as_slice())
            .ok_or_else(|| self.unknown_column(&format!("#{}", position)))
    }

    /// Replace a column with a transformed copy of the same length
    pub fn replace_column(&mut self, name: &str, values: Vec<String>) -> Result<()> {
        if values.len() != self.row_count {
            return Err(Error::malformed(
                &self.path,
                format!(
                    "replacement for column '{}' has {} cells, table has {} rows",
                    name,
                    values.len(),
                    self.row_count
                ),
            ));
        }

        match self.columns.get_mut(name) {
            Some(slot) => {
                *slot = values;
                Ok(())
            }
            None => Err(self.unknown_column(name)),
        }
    }

    /// One cell per column for the row at `index`
    pub fn row(&self, index: usize) -> Result<Row<'_>> {
        if index >= self.row_count {
            return Err(Error::RowOutOfRange {
                table: self.name.clone(),
                index,
                rows: self.row_count,
            });
        }

        Ok(self.columns.values().map(|c| c[index].as_str()).collect())
    }

    fn unknown_column(&self, column: &str) -> Error {
        Error::UnknownColumn {
            table: self.name.clone(),
            column: column.to_string(),
        }
    }
}

/// Replace every character that is not a letter or a decimal digit with `_`
pub fn sanitize_cell(cell: &str) -> String {
    cell.chars()
        .map(|c| if is_letter_or_digit(c) { c } else { PLACEHOLDER })
        .collect()
}

/// Letter categories plus `Nd`. Other numerals such as `Ⅱ` or `²` and
/// combining marks do not count.
fn is_letter_or_digit(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::DecimalNumber
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Table> {
        Table::parse(Path::new("Test.tab"), text, None, true)
    }

    #[test]
    fn test_parse_columns_and_rows() {
        let table = parse("Id\tLogName\n1001\tAlice\n1002\tBob\n").unwrap();
        assert_eq!(table.name(), "Test.tab");
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column("Id").unwrap(), ["1001", "1002"]);
        assert_eq!(table.column("LogName").unwrap(), ["Alice", "Bob"]);
        assert_eq!(table.row(1).unwrap(), vec!["1002", "Bob"]);
    }

    #[test]
    fn test_headers_trimmed_and_empty_dropped() {
        let table = parse(" Id \t Name\t\n1\tx\n").unwrap();
        let headers: Vec<_> = table.headers().collect();
        assert_eq!(headers, ["Id", "Name"]);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let table = parse("Id\tName\n\n1\ta\n   \n2\tb\n").unwrap();
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_crlf_and_bom() {
        let table = parse("\u{feff}Id\tName\r\n1\ta\r\n").unwrap();
        assert!(table.has_column("Id"));
        assert_eq!(table.column("Name").unwrap(), ["a"]);
    }

    #[test]
    fn test_sanitize_replaces_punctuation() {
        let table = parse("Id\tName\n1\tMr. Fox-3 &co\n2\t剑·圣\n").unwrap();
        assert_eq!(table.column("Name").unwrap(), ["Mr__Fox_3__co", "剑_圣"]);
    }

    #[test]
    fn test_sanitize_keeps_only_letters_and_decimal_digits() {
        assert_eq!(sanitize_cell("剑圣Ⅱ²①"), "剑圣___");
        assert_eq!(sanitize_cell("Ab9٣"), "Ab9٣");
        assert_eq!(sanitize_cell("e\u{0301}"), "e_");
    }

    #[test]
    fn test_unsanitized_keeps_cells() {
        let table =
            Table::parse(Path::new("Model.tab"), "Id\tPath\nA\tAssets/a.prefab\n", None, false)
                .unwrap();
        assert_eq!(table.column("Path").unwrap(), ["Assets/a.prefab"]);
    }

    #[test]
    fn test_duplicate_header_without_data() {
        let err = parse("Id\tName\tId\n").unwrap_err();
        assert!(matches!(err, Error::DuplicateDefinition { ref column, .. } if column == "Id"));
    }

    #[test]
    fn test_missing_required_column() {
        let err = Table::parse(Path::new("t"), "Id\tName\n1\ta\n", Some("Series"), true).unwrap_err();
        assert!(matches!(err, Error::MissingColumn { ref column, .. } if column == "Series"));
    }

    #[test]
    fn test_too_few_lines() {
        assert!(matches!(parse("").unwrap_err(), Error::MalformedTable { .. }));
        assert!(matches!(parse("Id\tName").unwrap_err(), Error::MalformedTable { .. }));
    }

    #[test]
    fn test_header_only_with_blank_line_is_empty_table() {
        let table = parse("Id\tName\n\n").unwrap();
        assert_eq!(table.row_count(), 0);
        assert!(table.column("Id").unwrap().is_empty());
    }

    #[test]
    fn test_short_row_rejected() {
        let err = parse("Id\tName\tLevel\n1\ta\n").unwrap_err();
        match err {
            Error::MalformedTable { reason, .. } => assert!(reason.contains("line 2")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_extra_cells_ignored() {
        let table = parse("Id\tName\n1\ta\textra\n").unwrap();
        assert_eq!(table.row(0).unwrap(), vec!["1", "a"]);
    }

    #[test]
    fn test_unknown_column_and_row() {
        let table = parse("Id\n1\n").unwrap();
        assert!(matches!(table.column("Nope"), Err(Error::UnknownColumn { .. })));
        assert!(matches!(
            table.row(1),
            Err(Error::RowOutOfRange { index: 1, rows: 1, .. })
        ));
    }

    #[test]
    fn test_replace_column() {
        let mut table = parse("Id\tName\n1\ta\n2\tb\n").unwrap();
        table
            .replace_column("Name", vec!["x".to_string(), "y".to_string()])
            .unwrap();
        assert_eq!(table.column("Name").unwrap(), ["x", "y"]);

        assert!(table.replace_column("Name", vec![]).is_err());
        assert!(matches!(
            table.replace_column("Nope", vec!["x".into(), "y".into()]),
            Err(Error::UnknownColumn { .. })
        ));
    }

    #[test]
    fn test_column_position() {
        let table = parse("Id\tName\tModelId\n1\ta\tm\n").unwrap();
        assert_eq!(table.column_position("ModelId").unwrap(), 2);
        assert_eq!(table.column_at(2).unwrap(), ["m"]);
        assert!(table.column_at(3).is_err());
    }
}
