//! Mappers for converting between allowance domain models and shared DTOs.

use crate::domain::commands::allowance::{
    AllowanceListQuery, ReviewDecision, SubmitAllowanceCommand,
};
use crate::domain::errors::ValidationError;
use crate::domain::models::allowance::{
    AllowanceRequest as DomainAllowanceRequest, ProgramCategory, RejectionDetails, ReviewStage,
    StageReview,
};

pub struct AllowanceMapper;

impl AllowanceMapper {
    pub fn to_dto(domain: DomainAllowanceRequest) -> shared::AllowanceRequest {
        shared::AllowanceRequest {
            id: domain.id,
            student_id: domain.student_id,
            chl_number: domain.chl_number,
            student_name: domain.student_name,
            month: domain.month,
            year: domain.year,
            program_level: domain.category.as_str().to_string(),
            stipend: domain.stipend,
            medical: domain.medical,
            transportation: domain.transportation,
            school_supplies: domain.school_supplies,
            accommodation: domain.accommodation,
            total: domain.total,
            stage: domain.stage.as_str().to_string(),
            dpm_review: domain.dpm_review.map(Self::review_to_dto),
            flmi_review: domain.flmi_review.map(Self::review_to_dto),
            pm_review: domain.pm_review.map(Self::review_to_dto),
            rejection: domain.rejection.map(Self::rejection_to_dto),
            submitted_by: domain.submitted_by,
            submitted_by_name: domain.submitted_by_name,
            submitted_at: domain.submitted_at,
            updated_at: domain.updated_at,
        }
    }

    fn review_to_dto(review: StageReview) -> shared::StageReview {
        shared::StageReview {
            status: review.status.as_str().to_string(),
            comment: review.comment,
            reviewer_id: review.reviewer_id,
            reviewer_name: review.reviewer_name,
            decided_at: review.decided_at,
        }
    }

    fn rejection_to_dto(rejection: RejectionDetails) -> shared::RejectionDetails {
        shared::RejectionDetails {
            stage: rejection.stage.label().to_string(),
            rejected_by: rejection.rejected_by,
            rejected_by_name: rejection.rejected_by_name,
            reason: rejection.reason,
            rejected_at: rejection.rejected_at,
        }
    }

    /// Build the domain command for an interactive submission.
    ///
    /// Unlike bulk rows, interactive submissions must name their program
    /// level explicitly; an absent or unrecognized value is rejected here,
    /// there is no default.
    pub fn submit_to_command(
        dto: shared::SubmitAllowanceRequest,
    ) -> Result<SubmitAllowanceCommand, ValidationError> {
        let category = ProgramCategory::parse(&dto.program_level)
            .ok_or_else(|| ValidationError::InvalidCategory(dto.program_level.clone()))?;

        Ok(SubmitAllowanceCommand {
            student_id: dto.student_id,
            chl_number: dto.chl_number,
            student_name: dto.student_name,
            month: dto.month,
            year: dto.year,
            category,
            stipend: dto.stipend,
            medical: dto.medical.unwrap_or(0.0),
            transportation: dto.transportation.unwrap_or(0.0),
            school_supplies: dto.school_supplies.unwrap_or(0.0),
            accommodation: dto.accommodation.unwrap_or(0.0),
        })
    }

    /// Translate list query parameters, rejecting unrecognized filter values.
    pub fn list_to_query(dto: shared::AllowanceListRequest) -> Result<AllowanceListQuery, String> {
        let stage = match dto.stage {
            Some(raw) => Some(
                ReviewStage::parse(&raw).ok_or_else(|| format!("unrecognized stage '{}'", raw))?,
            ),
            None => None,
        };
        let category = match dto.program_level {
            Some(raw) => Some(
                ProgramCategory::parse(&raw)
                    .ok_or_else(|| format!("unrecognized program category '{}'", raw))?,
            ),
            None => None,
        };

        Ok(AllowanceListQuery {
            stage,
            category,
            year: dto.year,
            month: dto.month,
        })
    }

    pub fn parse_decision(raw: &str) -> Option<ReviewDecision> {
        match raw.trim().to_lowercase().as_str() {
            "approve" => Some(ReviewDecision::Approve),
            "deny" => Some(ReviewDecision::Deny),
            _ => None,
        }
    }
}
