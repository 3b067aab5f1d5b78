//! Record builder: one raw row plus the reference lookups into an
//! insert-ready business, or a row error
//!
//! Construction never fails the batch. Anything that goes wrong while
//! building a row is caught here and becomes a [`RowError`].

use super::resolver::ReferenceLookup;
use super::types::{
    CandidateRecord, DEFAULT_STATUS, REQUIRED_COLUMN, RawRow, ReferenceKind, RowError,
};
use once_cell::sync::Lazy;
use regex::Regex;

static NON_ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("slug pattern is valid"));

/// Accepted columns, `name` first. Anything else in the table is ignored.
pub const KNOWN_COLUMNS: &[&str] = &[
    REQUIRED_COLUMN,
    "slug",
    "description",
    "address",
    "phone",
    "email",
    "website",
    "category_slug",
    "category",
    "neighbourhood_slug",
    "neighbourhood",
    "latitude",
    "longitude",
    "status",
];

/// Statuses a row may set explicitly
pub const ALLOWED_STATUSES: &[&str] = &["pending", "active", "inactive"];

/// Lowercase, collapse every run of non-alphanumerics into one hyphen,
/// strip hyphens at either end.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    NON_ALPHANUMERIC
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Build the candidate record for the row at `row` (1-based, header = 1).
pub fn build_record(
    raw: &RawRow,
    lookup: &ReferenceLookup,
    row: usize,
) -> Result<CandidateRecord, RowError> {
    construct(raw, lookup, row).map_err(|message| RowError::new(row, message, raw.clone()))
}

fn construct(
    raw: &RawRow,
    lookup: &ReferenceLookup,
    row: usize,
) -> Result<CandidateRecord, String> {
    let name = raw
        .non_blank(REQUIRED_COLUMN)
        .ok_or_else(|| format!("'{}' is required", REQUIRED_COLUMN))?
        .to_string();

    let slug = match raw.non_blank("slug") {
        Some(explicit) => explicit.to_string(),
        None => slugify(&name),
    };
    if slug.is_empty() {
        return Err(format!("cannot derive a slug from name '{}'", name));
    }

    let category_id = first_non_blank(raw, &["category_slug", "category"])
        .and_then(|text| lookup.resolve(ReferenceKind::Category, text));
    let neighbourhood_id = first_non_blank(raw, &["neighbourhood_slug", "neighbourhood"])
        .and_then(|text| lookup.resolve(ReferenceKind::Neighbourhood, text));

    Ok(CandidateRecord {
        row,
        name,
        slug,
        description: optional(raw, "description"),
        address: optional(raw, "address"),
        phone: optional(raw, "phone"),
        email: raw.non_blank("email").map(parse_email).transpose()?,
        website: raw.non_blank("website").map(normalize_website),
        latitude: raw
            .non_blank("latitude")
            .map(|v| parse_coordinate("latitude", v, 90.0))
            .transpose()?,
        longitude: raw
            .non_blank("longitude")
            .map(|v| parse_coordinate("longitude", v, 180.0))
            .transpose()?,
        category_id,
        neighbourhood_id,
        status: raw
            .non_blank("status")
            .map(parse_status)
            .transpose()?
            .unwrap_or_else(|| DEFAULT_STATUS.to_string()),
    })
}

fn optional(raw: &RawRow, column: &str) -> Option<String> {
    raw.non_blank(column).map(str::to_string)
}

fn first_non_blank<'a>(raw: &'a RawRow, columns: &[&str]) -> Option<&'a str> {
    columns.iter().find_map(|column| raw.non_blank(column))
}

fn parse_coordinate(column: &str, value: &str, bound: f64) -> Result<f64, String> {
    let parsed: f64 = value
        .parse()
        .map_err(|_| format!("{} '{}' is not a number", column, value))?;

    if !parsed.is_finite() || parsed.abs() > bound {
        return Err(format!(
            "{} {} is out of range [-{}, {}]",
            column, value, bound, bound
        ));
    }
    Ok(parsed)
}

fn parse_email(value: &str) -> Result<String, String> {
    match value.split_once('@') {
        Some((local, domain))
            if !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !value.contains(char::is_whitespace) =>
        {
            Ok(value.to_string())
        }
        _ => Err(format!("email '{}' is not a valid address", value)),
    }
}

fn normalize_website(value: &str) -> String {
    let lower = value.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        value.to_string()
    } else {
        format!("https://{}", value)
    }
}

fn parse_status(value: &str) -> Result<String, String> {
    let status = value.to_lowercase();
    if ALLOWED_STATUSES.contains(&status.as_str()) {
        Ok(status)
    } else {
        Err(format!(
            "status '{}' must be one of: {}",
            value,
            ALLOWED_STATUSES.join(", ")
        ))
    }
}
