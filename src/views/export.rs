use itertools::Itertools;

pub const DELIMITER: char = ',';
pub const QUOTE: char = '"';

/// Quote a field, doubling any quote inside it.
pub fn quote_field(value: &str) -> String {
    let escaped = value.replace(QUOTE, "\"\"");
    format!("{QUOTE}{escaped}{QUOTE}")
}

/// Serialize rows as comma-separated text.
///
/// Every field is quoted; rows are joined with `\n`, without a
/// trailing newline.
pub fn to_delimited<R, F>(rows: impl IntoIterator<Item = R>) -> String
where
    R: IntoIterator<Item = F>,
    F: AsRef<str>,
{
    rows.into_iter()
        .map(|row| {
            row.into_iter()
                .map(|field| quote_field(field.as_ref()))
                .join(&DELIMITER.to_string())
        })
        .join("\n")
}
