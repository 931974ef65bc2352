//! Per-kind coercion and validation rules.
//!
//! One exhaustive dispatch on [`FieldKind`] keeps every rule in one place;
//! adding a kind extends the match and nothing else.

use std::ops::RangeInclusive;

use jiff::civil;
use url::Url;

use super::issue::{Issue, IssueCode, PathSegment};
use crate::TRACING_TARGET;
use crate::field::FieldKind;
use crate::value::{FieldValue, RawValue};

const LATITUDE_RANGE: RangeInclusive<f64> = -90.0..=90.0;
const LONGITUDE_RANGE: RangeInclusive<f64> = -180.0..=180.0;

/// Checks one present value against its field's kind.
pub(super) fn check(kind: FieldKind, key: &str, raw: &RawValue) -> Result<FieldValue, Vec<Issue>> {
    match kind {
        FieldKind::Text => check_text(key, raw),
        FieldKind::Number => check_number(key, raw),
        FieldKind::Date => check_date(key, raw),
        FieldKind::Time => check_time(key, raw),
        FieldKind::Link => check_link(key, raw),
        FieldKind::Image | FieldKind::Document => check_attachment(key, raw),
        FieldKind::Place => check_place(key, raw),
        FieldKind::Unknown => check_passthrough(key, raw),
    }
}

fn fail(code: IssueCode, key: &str, message: &str) -> Vec<Issue> {
    vec![Issue::new(code, [PathSegment::key(key)], message)]
}

fn expect_text<'raw>(
    key: &str,
    raw: &'raw RawValue,
    code: IssueCode,
    message: &str,
) -> Result<&'raw str, Vec<Issue>> {
    match raw {
        RawValue::Text(text) => Ok(text),
        _ => Err(fail(code, key, message)),
    }
}

fn parse_finite(text: &str) -> Option<f64> {
    // "NaN" parses, so finiteness is checked explicitly
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

fn check_text(key: &str, raw: &RawValue) -> Result<FieldValue, Vec<Issue>> {
    let text = expect_text(key, raw, IssueCode::InvalidType, "Expected text")?;
    Ok(FieldValue::Text(text.to_owned()))
}

fn check_number(key: &str, raw: &RawValue) -> Result<FieldValue, Vec<Issue>> {
    let text = expect_text(key, raw, IssueCode::InvalidNumber, "Expected a number")?;
    let number = parse_finite(text)
        .ok_or_else(|| fail(IssueCode::InvalidNumber, key, "Expected a number"))?;
    Ok(FieldValue::Number(number))
}

fn check_date(key: &str, raw: &RawValue) -> Result<FieldValue, Vec<Issue>> {
    let message = "Expected an ISO date (YYYY-MM-DD)";
    let text = expect_text(key, raw, IssueCode::InvalidDate, message)?;
    let date = text
        .parse::<civil::Date>()
        .map_err(|_| fail(IssueCode::InvalidDate, key, message))?;
    Ok(FieldValue::Date(date))
}

fn check_time(key: &str, raw: &RawValue) -> Result<FieldValue, Vec<Issue>> {
    let message = "Expected an ISO time (HH:MM)";
    let text = expect_text(key, raw, IssueCode::InvalidTime, message)?;
    let time = text
        .parse::<civil::Time>()
        .map_err(|_| fail(IssueCode::InvalidTime, key, message))?;
    Ok(FieldValue::Time(time))
}

fn check_link(key: &str, raw: &RawValue) -> Result<FieldValue, Vec<Issue>> {
    let message = "Expected an absolute URL";
    let text = expect_text(key, raw, IssueCode::InvalidUrl, message)?;
    let url = Url::parse(text).map_err(|_| fail(IssueCode::InvalidUrl, key, message))?;
    Ok(FieldValue::Link(url))
}

fn check_attachment(key: &str, raw: &RawValue) -> Result<FieldValue, Vec<Issue>> {
    match raw {
        RawValue::Upload(upload) => Ok(FieldValue::Upload(upload.clone())),
        // an existing storage handle survives a resubmission untouched
        RawValue::Text(handle) => Ok(FieldValue::FileRef(handle.clone())),
        RawValue::Object(_) => Err(fail(IssueCode::InvalidType, key, "Expected a file upload")),
    }
}

fn check_place(key: &str, raw: &RawValue) -> Result<FieldValue, Vec<Issue>> {
    let RawValue::Object(object) = raw else {
        return Err(fail(
            IssueCode::InvalidType,
            key,
            "Expected an object with lat and lng",
        ));
    };

    let mut issues = Vec::new();
    let lat = check_coordinate(
        object.get("lat"),
        key,
        "lat",
        "Latitude",
        LATITUDE_RANGE,
        &mut issues,
    );
    let lng = check_coordinate(
        object.get("lng"),
        key,
        "lng",
        "Longitude",
        LONGITUDE_RANGE,
        &mut issues,
    );

    match (lat, lng) {
        (Some(lat), Some(lng)) => Ok(FieldValue::Place { lat, lng }),
        _ => Err(issues),
    }
}

fn check_coordinate(
    raw: Option<&RawValue>,
    key: &str,
    axis: &str,
    label: &str,
    range: RangeInclusive<f64>,
    issues: &mut Vec<Issue>,
) -> Option<f64> {
    let path = || [PathSegment::key(key), PathSegment::key(axis)];

    let Some(raw) = raw else {
        issues.push(Issue::missing(path()));
        return None;
    };
    let RawValue::Text(text) = raw else {
        issues.push(Issue::new(
            IssueCode::InvalidNumber,
            path(),
            format!("{label} must be a number"),
        ));
        return None;
    };
    let Some(value) = parse_finite(text) else {
        issues.push(Issue::new(
            IssueCode::InvalidNumber,
            path(),
            format!("{label} must be a number"),
        ));
        return None;
    };
    if value < *range.start() {
        issues.push(Issue::new(
            IssueCode::OutOfRange,
            path(),
            format!("{label} must be >= {}", range.start()),
        ));
        return None;
    }
    if value > *range.end() {
        issues.push(Issue::new(
            IssueCode::OutOfRange,
            path(),
            format!("{label} must be <= {}", range.end()),
        ));
        return None;
    }
    Some(value)
}

fn check_passthrough(key: &str, raw: &RawValue) -> Result<FieldValue, Vec<Issue>> {
    tracing::warn!(
        target: TRACING_TARGET,
        field = %key,
        "field kind not recognized, passing value through",
    );
    match raw {
        RawValue::Upload(upload) => Ok(FieldValue::Upload(upload.clone())),
        other => match other.to_json() {
            Some(value) => Ok(FieldValue::Other(value)),
            None => Err(fail(IssueCode::InvalidType, key, "Unexpected file upload")),
        },
    }
}
