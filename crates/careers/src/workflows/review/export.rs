use std::io;

use chrono::{DateTime, SecondsFormat, Utc};
use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::workflows::applications::{ApplicationRecord, Locale};
use crate::workflows::vacancies::{VacancyDirectory, MISSING_LABEL};

/// Attachment name used by the export endpoint and the CLI default.
pub const EXPORT_FILE_NAME: &str = "applications.csv";

/// Encode `records` as CSV with every field quoted.
///
/// Returns an empty string for an empty set; there is never a header-only file.
pub fn encode_csv(
    records: &[ApplicationRecord],
    vacancies: &VacancyDirectory,
    locale: Locale,
) -> Result<String, csv::Error> {
    if records.is_empty() {
        return Ok(String::new());
    }

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(locale.export_headers())?;
    for record in records {
        let vacancy = vacancies.label_for(record.vacancy_id.as_deref());
        let date = format_export_date(record.created_at);
        writer.write_record([
            record.name.as_str(),
            record.email.as_str(),
            vacancy.as_str(),
            date.as_str(),
            record.resume.as_deref().unwrap_or_default(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|err| csv::Error::from(io::Error::new(io::ErrorKind::InvalidData, err)))
}

/// UTC instant with millisecond precision, or the placeholder when unknown.
pub fn format_export_date(created_at: Option<DateTime<Utc>>) -> String {
    created_at
        .map(|at| at.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| MISSING_LABEL.to_string())
}
