//! Row- and request-level validation for allowance submissions.
//!
//! Validation is row-local and side-effect-free so bulk ingestion can
//! validate every candidate row before committing any of them, which is
//! what makes precise partial-failure reporting possible. The same semantic
//! rules apply to interactively built submissions via
//! [`validate_submission`].

use crate::domain::commands::allowance::SubmitAllowanceCommand;
use crate::domain::commands::bulk::RawRow;
use crate::domain::errors::ValidationError;
use crate::domain::models::allowance::{normalize_month, ProgramCategory};

/// A non-empty, trimmed field value from a row.
fn field<'a>(row: &'a RawRow, name: &str) -> Option<&'a str> {
    row.get(name)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}

/// Parse a monetary field. The bulk template is filled by hand, so grouping
/// commas are tolerated.
fn parse_amount(field_name: &'static str, raw: &str) -> Result<f64, ValidationError> {
    let value: f64 = raw
        .replace(',', "")
        .parse()
        .map_err(|_| ValidationError::InvalidAmount {
            field: field_name,
            reason: format!("'{}' is not a number", raw),
        })?;
    check_amount(field_name, value)?;
    Ok(value)
}

/// An optional component amount: absent means zero, present must parse.
fn optional_amount(row: &RawRow, field_name: &'static str) -> Result<f64, ValidationError> {
    match field(row, field_name) {
        Some(raw) => parse_amount(field_name, raw),
        None => Ok(0.0),
    }
}

fn check_amount(field_name: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::InvalidAmount {
            field: field_name,
            reason: "must be a non-negative amount".to_string(),
        });
    }
    Ok(())
}

/// Validate one bulk-import candidate row and build its submission command.
///
/// Checks run in correction order: identifiers, required fields, year,
/// category, month, then amounts. Bulk rows may omit the program level;
/// university is the documented default. Component columns are only
/// validated for categories that use them.
pub fn validate_row(row: &RawRow) -> Result<SubmitAllowanceCommand, ValidationError> {
    let student_id = field(row, "student_id").map(str::to_string);
    let chl_number = field(row, "chl_number").map(str::to_string);
    if student_id.is_none() && chl_number.is_none() {
        return Err(ValidationError::MissingIdentifier);
    }

    let student_name = field(row, "student_name")
        .ok_or(ValidationError::MissingField("student_name"))?
        .to_string();
    let month_raw = field(row, "month").ok_or(ValidationError::MissingField("month"))?;
    let year_raw = field(row, "year").ok_or(ValidationError::MissingField("year"))?;

    let year: i32 = year_raw
        .parse()
        .ok()
        .filter(|year| *year > 0)
        .ok_or_else(|| ValidationError::InvalidYear(year_raw.to_string()))?;

    let category = match field(row, "program_level") {
        Some(raw) => ProgramCategory::parse(raw)
            .ok_or_else(|| ValidationError::InvalidCategory(raw.to_string()))?,
        None => ProgramCategory::University,
    };

    let month = normalize_month(month_raw)
        .ok_or_else(|| ValidationError::InvalidMonth(month_raw.to_string()))?;

    let stipend_raw = field(row, "stipend").ok_or(ValidationError::InvalidAmount {
        field: "stipend",
        reason: "missing".to_string(),
    })?;
    let stipend = parse_amount("stipend", stipend_raw)?;

    // Launch-year students receive a stipend only; whatever is in the other
    // component columns is ignored, not rejected.
    let (medical, transportation, school_supplies, accommodation) =
        if category == ProgramCategory::LaunchYear {
            (0.0, 0.0, 0.0, 0.0)
        } else {
            (
                optional_amount(row, "medical")?,
                optional_amount(row, "transportation")?,
                optional_amount(row, "school_supplies")?,
                optional_amount(row, "accommodation")?,
            )
        };

    Ok(SubmitAllowanceCommand {
        student_id,
        chl_number,
        student_name,
        month,
        year,
        category,
        stipend,
        medical,
        transportation,
        school_supplies,
        accommodation,
    })
}

/// Validate an interactively built submission before it reaches the state
/// machine. A missing decision comment is the approval step's concern, not
/// validation's.
pub fn validate_submission(command: &SubmitAllowanceCommand) -> Result<(), ValidationError> {
    if command.student_id.is_none() && command.chl_number.is_none() {
        return Err(ValidationError::MissingIdentifier);
    }
    if command.student_name.trim().is_empty() {
        return Err(ValidationError::MissingField("student_name"));
    }
    if command.year <= 0 {
        return Err(ValidationError::InvalidYear(command.year.to_string()));
    }
    if normalize_month(&command.month).is_none() {
        return Err(ValidationError::InvalidMonth(command.month.clone()));
    }
    check_amount("stipend", command.stipend)?;
    if command.category != ProgramCategory::LaunchYear {
        check_amount("medical", command.medical)?;
        check_amount("transportation", command.transportation)?;
        check_amount("school_supplies", command.school_supplies)?;
        check_amount("accommodation", command.accommodation)?;
    }
    Ok(())
}
