//! Mappers for converting audit domain models to shared DTOs.

use crate::domain::models::audit::AuditEntry as DomainAuditEntry;

pub struct AuditMapper;

impl AuditMapper {
    pub fn to_dto(domain: DomainAuditEntry) -> shared::AuditEntry {
        shared::AuditEntry {
            id: domain.id,
            allowance_id: domain.allowance_id,
            actor_id: domain.actor_id,
            actor_name: domain.actor_name,
            actor_role: domain.actor_role,
            action: domain.action.as_str().to_string(),
            stage: domain.stage,
            comment: domain.comment,
            timestamp: domain.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::actor::{Actor, Role};
    use crate::domain::models::audit::AuditAction;

    #[test]
    fn test_to_dto() {
        let actor = Actor::new("staff-1", "Grace Achieng", Role::DeputyManager);
        let entry = DomainAuditEntry::new("alw-1", &actor, AuditAction::Approved, "dpm_review", "ok");

        let dto = AuditMapper::to_dto(entry.clone());
        assert_eq!(dto.id, entry.id);
        assert_eq!(dto.action, "approved");
        assert_eq!(dto.stage, "dpm_review");
        assert_eq!(dto.actor_role, "deputy_manager");
    }
}
