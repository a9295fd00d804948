use std::collections::HashSet;
use std::io::{Read, Seek, SeekFrom};

use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use thiserror::Error;

use crate::dto::certificates::CertificateDto;

/// Canonical column names of a certificate CSV, in DTO field order.
const CERTIFICATE_HEADERS: [&str; 5] = [
    "certificateId",
    "holderName",
    "category",
    "instituteName",
    "issueDate",
];

#[derive(MultipartForm)]
pub struct UploadCertificatesForm {
    #[multipart(limit = "10MB")]
    pub file: TempFile,
    pub passkey: Text<String>,
}

#[derive(Debug, Error)]
pub enum UploadParseError {
    #[error("uploaded file is missing")]
    MissingFile,
    #[error("uploaded file must be a .csv file")]
    ExtensionMismatch,
    #[error("uploaded file content type is not CSV")]
    ContentTypeMismatch,
    #[error("failed to read uploaded file")]
    ReadFailed,
    #[error("failed to parse CSV")]
    CsvParseFailed,
    #[error("header validation failed: {0}")]
    HeaderValidation(String),
}

impl From<std::io::Error> for UploadParseError {
    fn from(_: std::io::Error) -> Self {
        Self::ReadFailed
    }
}

impl From<csv::Error> for UploadParseError {
    fn from(_: csv::Error) -> Self {
        Self::CsvParseFailed
    }
}

/// Read the uploaded CSV into certificate DTOs.
///
/// Columns may appear in any order and header matching is
/// case-insensitive; every canonical column must be present exactly once.
pub fn parse_upload(
    form: &mut UploadCertificatesForm,
) -> Result<Vec<CertificateDto>, UploadParseError> {
    validate_file_meta(form)?;

    let file = form.file.file.as_file_mut();
    file.seek(SeekFrom::Start(0))?;

    let mut content = String::new();
    file.read_to_string(&mut content)?;

    parse_certificate_rows(content.as_bytes())
}

fn validate_file_meta(form: &UploadCertificatesForm) -> Result<(), UploadParseError> {
    let Some(file_name) = form.file.file_name.as_ref() else {
        return Err(UploadParseError::MissingFile);
    };

    if !file_name.to_ascii_lowercase().ends_with(".csv") {
        return Err(UploadParseError::ExtensionMismatch);
    }

    if let Some(content_type) = form.file.content_type.as_ref() {
        let mime = content_type.essence_str();
        if !matches!(
            mime,
            "text/csv" | "application/csv" | "application/vnd.ms-excel"
        ) {
            return Err(UploadParseError::ContentTypeMismatch);
        }
    }

    Ok(())
}

fn parse_certificate_rows(data: &[u8]) -> Result<Vec<CertificateDto>, UploadParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::None)
        .from_reader(data);

    let headers = reader
        .headers()?
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>();
    let columns = column_indexes(&headers)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let value =
            |slot: usize| record.get(columns[slot]).unwrap_or_default().trim().to_string();
        rows.push(CertificateDto {
            certificate_id: value(0),
            holder_name: value(1),
            category: value(2),
            institute_name: value(3),
            issue_date: value(4),
        });
    }

    Ok(rows)
}

/// Map each canonical column to its position in the uploaded header row.
fn column_indexes(headers: &[String]) -> Result<[usize; 5], UploadParseError> {
    let normalized = headers
        .iter()
        .map(|header| header.trim().to_ascii_lowercase())
        .collect::<Vec<_>>();

    if normalized.is_empty() {
        return Err(UploadParseError::HeaderValidation(
            "missing header row".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for header in &normalized {
        if header.is_empty() {
            return Err(UploadParseError::HeaderValidation(
                "header contains empty column name".to_string(),
            ));
        }
        if !seen.insert(header.clone()) {
            return Err(UploadParseError::HeaderValidation(format!(
                "duplicate header column: {header}"
            )));
        }
    }

    for header in &normalized {
        if !CERTIFICATE_HEADERS
            .iter()
            .any(|expected| expected.eq_ignore_ascii_case(header))
        {
            return Err(UploadParseError::HeaderValidation(format!(
                "unsupported column: {header}"
            )));
        }
    }

    let mut indexes = [0usize; 5];
    for (slot, expected) in CERTIFICATE_HEADERS.iter().enumerate() {
        match normalized
            .iter()
            .position(|header| expected.eq_ignore_ascii_case(header))
        {
            Some(index) => indexes[slot] = index,
            None => {
                return Err(UploadParseError::HeaderValidation(format!(
                    "missing column: {expected}"
                )));
            }
        }
    }

    Ok(indexes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_in_canonical_order() {
        let data = b"certificateId,holderName,category,instituteName,issueDate\n\
            C1,Alice,Rust,Acme,2024-05-01\n\
            C2,Bob,Go,Acme,2024-06-01\n";

        let rows = parse_certificate_rows(data).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].certificate_id, "C1");
        assert_eq!(rows[0].holder_name, "Alice");
        assert_eq!(rows[1].certificate_id, "C2");
        assert_eq!(rows[1].issue_date, "2024-06-01");
    }

    #[test]
    fn parses_rows_with_reordered_columns() {
        let data = b"holderName,issueDate,certificateId,instituteName,category\n\
            Alice,2024-05-01,C1,Acme,Rust\n";

        let rows = parse_certificate_rows(data).unwrap();

        assert_eq!(rows[0].certificate_id, "C1");
        assert_eq!(rows[0].holder_name, "Alice");
        assert_eq!(rows[0].category, "Rust");
        assert_eq!(rows[0].institute_name, "Acme");
        assert_eq!(rows[0].issue_date, "2024-05-01");
    }

    #[test]
    fn matches_headers_case_insensitively() {
        let data = b"CERTIFICATEID,HOLDERNAME,CATEGORY,INSTITUTENAME,ISSUEDATE\n\
            C1,Alice,Rust,Acme,2024-05-01\n";

        let rows = parse_certificate_rows(data).unwrap();
        assert_eq!(rows[0].certificate_id, "C1");
    }

    #[test]
    fn trims_cell_values() {
        let data = b"certificateId,holderName,category,instituteName,issueDate\n\
            \" C1 \", Alice ,Rust,Acme,2024-05-01\n";

        let rows = parse_certificate_rows(data).unwrap();
        assert_eq!(rows[0].certificate_id, "C1");
        assert_eq!(rows[0].holder_name, "Alice");
    }

    #[test]
    fn rejects_missing_column() {
        let data = b"certificateId,holderName,category,instituteName\n";

        let err = parse_certificate_rows(data).unwrap_err().to_string();
        assert!(err.contains("missing column: issueDate"));
    }

    #[test]
    fn rejects_unknown_column() {
        let data = b"certificateId,holderName,category,instituteName,issueDate,extra\n";

        let err = parse_certificate_rows(data).unwrap_err().to_string();
        assert!(err.contains("unsupported column: extra"));
    }

    #[test]
    fn rejects_duplicate_column() {
        let data = b"certificateId,certificateId,holderName,category,instituteName,issueDate\n";

        let err = parse_certificate_rows(data).unwrap_err().to_string();
        assert!(err.contains("duplicate header column"));
    }

    #[test]
    fn rejects_short_rows() {
        let data = b"certificateId,holderName,category,instituteName,issueDate\n\
            C1,Alice\n";

        let result = parse_certificate_rows(data);
        assert!(matches!(result, Err(UploadParseError::CsvParseFailed)));
    }

    #[test]
    fn rejects_empty_input() {
        assert!(parse_certificate_rows(b"").is_err());
    }
}
