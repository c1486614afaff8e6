use std::error::Error;
use std::sync::Arc;
use thiserror::Error;

/// Shared pointer to an error returned by user code, e.g. initializers or injected functions.
pub type ErrorPtr = Arc<dyn Error + Send + Sync>;

/// Owned error type accepted from user callables before conversion into an [ErrorPtr].
pub type BoxError = Box<dyn Error + Send + Sync>;

/// Converts a boxed error into an [ErrorPtr], unwrapping it if it already is one.
pub fn into_error_ptr(error: BoxError) -> ErrorPtr {
    match error.downcast::<ErrorPtr>() {
        Ok(error) => *error,
        Err(error) => ErrorPtr::from(error),
    }
}

/// Errors related to looking up services in the registry.
#[derive(Error, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum ResolutionError {
    #[error("Unable to find a service that fulfills the requirements for: {0}")]
    MissingCapability(String),
    #[error("Unable to find a service named: {0}")]
    MissingName(String),
    #[error("Service {service} declared capability {capability}, but cast to an incompatible type")]
    IncompatibleService {
        service: String,
        capability: String,
    },
}

/// Reasons for a failed call of an injected function.
#[derive(Error, Clone, Debug)]
pub enum InvocationFailure {
    #[error("Cannot resolve parameter {index} ({parameter}): {source}")]
    UnresolvedParameter {
        index: usize,
        parameter: &'static str,
        #[source]
        source: ResolutionError,
    },
    #[error("Function returned an error: {0}")]
    Returned(#[source] ErrorPtr),
}

/// Coarse classification of [InjectorError]s.
#[derive(Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum ErrorKind {
    Validation,
    Access,
    Resolution,
    Initialization,
    Invocation,
}

/// Errors related to registering services and injecting dependencies.
#[derive(Error, Clone, Debug)]
pub enum InjectorError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("The field '{field}' is not accessible: {reason}")]
    Access { field: String, reason: String },
    #[error("Cannot resolve field '{field}': {source}")]
    Resolution {
        field: String,
        #[source]
        source: ResolutionError,
    },
    #[error("Unable to initialize service '{service}': {source}")]
    Initialization {
        service: String,
        #[source]
        source: ErrorPtr,
    },
    #[error("Cannot invoke {signature}: {source}")]
    Invocation {
        signature: String,
        #[source]
        source: InvocationFailure,
    },
    #[error("Unable to register service '{service}': {source}")]
    Registration {
        service: String,
        #[source]
        source: Box<InjectorError>,
    },
}

impl InjectorError {
    /// Returns the kind of the underlying error, looking through registration context.
    pub fn kind(&self) -> ErrorKind {
        match self {
            InjectorError::Validation(_) => ErrorKind::Validation,
            InjectorError::Access { .. } => ErrorKind::Access,
            InjectorError::Resolution { .. } => ErrorKind::Resolution,
            InjectorError::Initialization { .. } => ErrorKind::Initialization,
            InjectorError::Invocation { .. } => ErrorKind::Invocation,
            InjectorError::Registration { source, .. } => source.kind(),
        }
    }

    /// Strips registration context, returning the error which caused the failure.
    pub fn root(&self) -> &InjectorError {
        match self {
            InjectorError::Registration { source, .. } => source.root(),
            error => error,
        }
    }
}
