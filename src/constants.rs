//! Constants used throughout the function

/// Annotation overriding the name a desired resource is recorded under
pub const ANNOTATION_KEY_COMPOSITION_RESOURCE_NAME: &str =
    "gotemplating.fn.crossplane.io/composition-resource-name";

/// Annotation overriding the readiness of a desired resource
pub const ANNOTATION_KEY_READY: &str = "gotemplating.fn.crossplane.io/ready";

/// API version reserved for function metadata documents
pub const META_API_VERSION: &str = "meta.gotemplating.fn.crossplane.io/v1alpha1";

/// Context key holding the environment the Environment source reads from
pub const ENVIRONMENT_CONTEXT_KEY: &str = "apiextensions.crossplane.io/environment";

/// Default response time-to-live in seconds
pub const DEFAULT_TTL_SECONDS: u64 = 60;

/// Literal document separator line
pub const DOCUMENT_SEPARATOR: &str = "---";

/// Name the rendered template is registered under
pub const TEMPLATE_NAME: &str = "manifests";

/// Request context keys
pub mod context_keys {
    pub const EXTRA_RESOURCES: &str = "extraResources";
    pub const REQUIRED_RESOURCES: &str = "requiredResources";
}

/// Readiness annotation values
pub mod ready {
    pub const TRUE: &str = "True";
    pub const FALSE: &str = "False";
    pub const UNSPECIFIED: &str = "Unspecified";
}

/// STDIN indicator for CLI arguments
pub const STDIN_INDICATOR: &str = "-";

/// Exit codes
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
