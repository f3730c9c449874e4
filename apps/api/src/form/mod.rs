// Application form model: record editing, section validation and the
// orchestrator that owns one application while it is being filled in.
// Everything below `handlers` and `sessions` is synchronous and HTTP-free.

pub mod applicant;
pub mod career;
pub mod certificate;
pub mod education;
pub mod handlers;
pub mod notices;
pub mod orchestrator;
pub mod section;
pub mod sessions;
pub mod validation;
