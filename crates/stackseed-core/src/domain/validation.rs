use crate::domain::{
    entities::{ProjectStructure, TemplateTree},
    error::DomainError,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across callers.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_template(tree: &TemplateTree) -> Result<(), DomainError> {
        tree.validate()
    }

    pub fn validate_project_structure(structure: &ProjectStructure) -> Result<(), DomainError> {
        structure.validate()
    }
}
