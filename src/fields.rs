//! # Standard Metadata Fields
//!
//! The Standard Field Template is the closed set of dataset-level metadata
//! terms recognized by the assembler. Terms are namespaced with `dct.`
//! (Dublin Core) or `opi.` (publisher extensions), and every metadata table
//! carries exactly one row per term, in the order fixed here.
//!
//! The key set never changes at runtime. Callers supply values for a subset
//! of these terms; names outside the set are dropped with a warning during
//! assembly.

/// Term names as constants for type safety
pub mod terms {
    pub const ACCESS_RIGHTS: &str = "dct.accessRights";
    pub const ACCRUAL_METHOD: &str = "dct.accrualMethod";
    pub const ACCRUAL_PERIODICITY: &str = "dct.accrualPeriodicity";
    pub const AUDIENCE: &str = "dct.audience";
    pub const MEDIATOR: &str = "dct.mediator";
    pub const CREATED: &str = "dct.created";
    pub const DESCRIPTION: &str = "dct.description";
    pub const FORMAT: &str = "dct.format";
    pub const IDENTIFIER: &str = "dct.identifier";
    pub const LANGUAGE: &str = "dct.language";
    pub const LICENCE: &str = "dct.licence";
    pub const RELATION: &str = "dct.relation";
    pub const SPATIAL: &str = "dct.spatial";
    pub const SUBJECT: &str = "dct.subject";
    pub const TEMPORAL: &str = "dct.temporal";
    pub const TITLE: &str = "dct.title";
    pub const MEDIATOR_CONTACT: &str = "opi.mediatorContact";
    pub const DATA_FILE_PATH: &str = "opi.dataFilePath";
    pub const DATA_DICTIONARY_PATH: &str = "opi.dataDictionaryPath";
    pub const PUBLISHER: &str = "dct.publisher";
    pub const PUBLISHER_CONTACT: &str = "opi.publisherContact";
}

/// The Standard Field Template, in canonical metadata-table row order.
///
/// All values default to the empty string; the assembler materializes a
/// fresh template on every call, so no template state is shared across
/// invocations.
pub const STANDARD_FIELDS: [&str; 21] = [
    terms::ACCESS_RIGHTS,
    terms::ACCRUAL_METHOD,
    terms::ACCRUAL_PERIODICITY,
    terms::AUDIENCE,
    terms::MEDIATOR,
    terms::CREATED,
    terms::DESCRIPTION,
    terms::FORMAT,
    terms::IDENTIFIER,
    terms::LANGUAGE,
    terms::LICENCE,
    terms::RELATION,
    terms::SPATIAL,
    terms::SUBJECT,
    terms::TEMPORAL,
    terms::TITLE,
    terms::MEDIATOR_CONTACT,
    terms::DATA_FILE_PATH,
    terms::DATA_DICTIONARY_PATH,
    terms::PUBLISHER,
    terms::PUBLISHER_CONTACT,
];

/// Fields that must be present in the caller's defined fields.
///
/// `dct.format` is mandatory because it selects the schema source when
/// dtype inference is requested.
pub const REQUIRED_FIELDS: [&str; 1] = [terms::FORMAT];

/// Returns true when `name` is a member of the Standard Field Template.
pub fn is_standard_field(name: &str) -> bool {
    STANDARD_FIELDS.contains(&name)
}
