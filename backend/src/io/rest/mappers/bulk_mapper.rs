//! Mappers for converting bulk import outcomes to shared DTOs.

use crate::domain::commands::bulk::BulkImportResult;

pub struct BulkMapper;

impl BulkMapper {
    pub fn to_dto(domain: BulkImportResult) -> shared::BulkImportResponse {
        shared::BulkImportResponse {
            success_count: domain.success_count,
            failure_count: domain.failure_count,
            errors: domain
                .errors
                .into_iter()
                .map(|failure| shared::BulkRowError {
                    row_number: failure.row_number,
                    message: failure.message,
                    row: failure.row,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::bulk::{RawRow, RowFailure};

    #[test]
    fn test_to_dto_preserves_row_numbers_and_rows() {
        let mut row = RawRow::new();
        row.insert("student_name".to_string(), "Daniel Okello".to_string());

        let result = BulkImportResult {
            success_count: 2,
            failure_count: 1,
            errors: vec![RowFailure {
                row_number: 4,
                message: "missing required field 'year'".to_string(),
                row: row.clone(),
            }],
        };

        let dto = BulkMapper::to_dto(result);
        assert_eq!(dto.success_count, 2);
        assert_eq!(dto.failure_count, 1);
        assert_eq!(dto.errors[0].row_number, 4);
        assert_eq!(dto.errors[0].row, row);
    }
}
