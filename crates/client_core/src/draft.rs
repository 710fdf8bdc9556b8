use std::fmt;

use shared::protocol::{CompanyMetrics, DiagnosticSubmission};
use thiserror::Error;

/// Fields of the intake form. `Display` yields the user-facing label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntakeField {
    CompanyName,
    Industry,
    CurrentArr,
    TargetArr,
    SalesTeamSize,
    AverageDealSize,
    SalesCycleLength,
    WinRate,
    Context,
}

impl IntakeField {
    pub const ALL: [IntakeField; 9] = [
        IntakeField::CompanyName,
        IntakeField::Industry,
        IntakeField::CurrentArr,
        IntakeField::TargetArr,
        IntakeField::SalesTeamSize,
        IntakeField::AverageDealSize,
        IntakeField::SalesCycleLength,
        IntakeField::WinRate,
        IntakeField::Context,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::CompanyName => "Company name",
            Self::Industry => "Industry",
            Self::CurrentArr => "Current ARR ($)",
            Self::TargetArr => "Target ARR ($)",
            Self::SalesTeamSize => "Sales team size (# of AEs)",
            Self::AverageDealSize => "Average deal size ($)",
            Self::SalesCycleLength => "Sales cycle (days)",
            Self::WinRate => "Win rate (%)",
            Self::Context => "Problem description",
        }
    }
}

impl fmt::Display for IntakeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(IntakeField),
    #[error("{0} must be a number")]
    NotNumeric(IntakeField),
    #[error("{0} must be a whole number")]
    NotInteger(IntakeField),
    #[error("{0} must be greater than zero")]
    NotPositive(IntakeField),
    #[error("{0} must be between 0 and 100")]
    OutsidePercentRange(IntakeField),
}

/// Raw-text mirror of the intake form. Numeric fields stay text until
/// validation, since form inputs are text-based even for numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntakeDraft {
    pub company_name: String,
    pub industry: String,
    pub current_arr: String,
    pub target_arr: String,
    pub sales_team_size: String,
    pub average_deal_size: String,
    pub sales_cycle_length: String,
    pub win_rate: String,
    pub context: String,
}

impl IntakeDraft {
    /// Mutable access to exactly one field; all others stay untouched.
    pub fn field_mut(&mut self, field: IntakeField) -> &mut String {
        match field {
            IntakeField::CompanyName => &mut self.company_name,
            IntakeField::Industry => &mut self.industry,
            IntakeField::CurrentArr => &mut self.current_arr,
            IntakeField::TargetArr => &mut self.target_arr,
            IntakeField::SalesTeamSize => &mut self.sales_team_size,
            IntakeField::AverageDealSize => &mut self.average_deal_size,
            IntakeField::SalesCycleLength => &mut self.sales_cycle_length,
            IntakeField::WinRate => &mut self.win_rate,
            IntakeField::Context => &mut self.context,
        }
    }

    pub fn field(&self, field: IntakeField) -> &str {
        match field {
            IntakeField::CompanyName => &self.company_name,
            IntakeField::Industry => &self.industry,
            IntakeField::CurrentArr => &self.current_arr,
            IntakeField::TargetArr => &self.target_arr,
            IntakeField::SalesTeamSize => &self.sales_team_size,
            IntakeField::AverageDealSize => &self.average_deal_size,
            IntakeField::SalesCycleLength => &self.sales_cycle_length,
            IntakeField::WinRate => &self.win_rate,
            IntakeField::Context => &self.context,
        }
    }

    /// Replaces one field's text. No validation happens at update time.
    pub fn set(&mut self, field: IntakeField, value: impl Into<String>) {
        *self.field_mut(field) = value.into();
    }

    /// Coerces the draft into a validated request. Text that fails numeric
    /// coercion is rejected here; it must never become zero or NaN on the
    /// wire. The draft itself is never mutated, so a failed attempt loses
    /// nothing the user typed.
    pub fn validate(&self) -> Result<DiagnosticRequest, ValidationError> {
        Ok(DiagnosticRequest {
            company_name: required_text(&self.company_name, IntakeField::CompanyName)?,
            industry: required_text(&self.industry, IntakeField::Industry)?,
            current_arr: positive_number(&self.current_arr, IntakeField::CurrentArr)?,
            target_arr: positive_number(&self.target_arr, IntakeField::TargetArr)?,
            sales_team_size: whole_number(&self.sales_team_size, IntakeField::SalesTeamSize)?,
            average_deal_size: positive_number(
                &self.average_deal_size,
                IntakeField::AverageDealSize,
            )?,
            sales_cycle_length: whole_number(
                &self.sales_cycle_length,
                IntakeField::SalesCycleLength,
            )?,
            win_rate: percent(&self.win_rate, IntakeField::WinRate)?,
            context: required_text(&self.context, IntakeField::Context)?,
        })
    }
}

/// Validated form data for one submission attempt. Lives only between a
/// successful validation and the HTTP call built from it.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticRequest {
    pub company_name: String,
    pub industry: String,
    pub current_arr: f64,
    pub target_arr: f64,
    pub sales_team_size: u32,
    pub average_deal_size: f64,
    pub sales_cycle_length: u32,
    pub win_rate: f64,
    pub context: String,
}

impl DiagnosticRequest {
    /// Wire shaping: `context` becomes the top-level `userQuery` and is
    /// excluded from `metrics`.
    pub fn into_submission(self) -> DiagnosticSubmission {
        DiagnosticSubmission {
            user_query: self.context,
            metrics: CompanyMetrics {
                company_name: self.company_name,
                industry: self.industry,
                current_arr: self.current_arr,
                target_arr: self.target_arr,
                sales_team_size: self.sales_team_size,
                average_deal_size: self.average_deal_size,
                sales_cycle_length: self.sales_cycle_length,
                win_rate: self.win_rate,
            },
        }
    }
}

fn required_text(raw: &str, field: IntakeField) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Missing(field));
    }
    Ok(trimmed.to_string())
}

fn finite_number(raw: &str, field: IntakeField) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Missing(field));
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| ValidationError::NotNumeric(field))?;
    // The float parser admits "NaN" and "inf"; neither is a usable metric.
    if !value.is_finite() {
        return Err(ValidationError::NotNumeric(field));
    }
    Ok(value)
}

fn positive_number(raw: &str, field: IntakeField) -> Result<f64, ValidationError> {
    let value = finite_number(raw, field)?;
    if value <= 0.0 {
        return Err(ValidationError::NotPositive(field));
    }
    Ok(value)
}

fn whole_number(raw: &str, field: IntakeField) -> Result<u32, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Missing(field));
    }
    trimmed.parse::<u32>().map_err(|_| {
        if trimmed.parse::<f64>().is_ok() {
            ValidationError::NotInteger(field)
        } else {
            ValidationError::NotNumeric(field)
        }
    })
}

fn percent(raw: &str, field: IntakeField) -> Result<f64, ValidationError> {
    let value = finite_number(raw, field)?;
    if !(0.0..=100.0).contains(&value) {
        return Err(ValidationError::OutsidePercentRange(field));
    }
    Ok(value)
}

#[cfg(test)]
#[path = "tests/draft_tests.rs"]
mod tests;
