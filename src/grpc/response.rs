use crate::delay::DelayDistribution;
use crate::response::{ok, Fault, ResponseSpec};
use crate::{Error, Result};
use serde::Serialize;
use tonic::Code;

const RESPONSE_STATUS_NAME: &str = "grpc-status-name";
const RESPONSE_STATUS_REASON: &str = "grpc-status-reason";

/// Builds the HTTP response the gRPC extension turns into a gRPC reply.
///
/// The outcome is carried in headers: `grpc-status-name` always, plus
/// `grpc-status-reason` for errors.
#[derive(Debug, Clone)]
pub struct ResponseBuilder {
    code: Code,
    reason: Option<String>,
    fault: Option<Fault>,
    body: String,
    delay: Option<DelayDistribution>,
}

impl ResponseBuilder {
    fn with_code(code: Code) -> Self {
        Self {
            code,
            reason: None,
            fault: None,
            body: String::new(),
            delay: None,
        }
    }

    /// Fails the call with `code` and a human readable `reason`.
    pub fn error(code: Code, reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
            ..Self::with_code(code)
        }
    }

    /// Replies `OK` with a message given as its JSON encoding.
    pub fn json(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Self::with_code(Code::Ok)
        }
    }

    /// Replies `OK` with `message` serialized to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerializationFailed`] if `message` cannot be serialized.
    pub fn message<T: Serialize + ?Sized>(message: &T) -> Result<Self> {
        let body = serde_json::to_string(message)
            .map_err(|e| Error::SerializationFailed(format!("gRPC message: {}", e)))?;
        Ok(Self::json(body))
    }

    /// Breaks the connection instead of replying.
    pub fn fault(fault: Fault) -> Self {
        Self {
            fault: Some(fault),
            ..Self::with_code(Code::Ok)
        }
    }

    pub fn with_delay(mut self, delay: DelayDistribution) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Produces the stub response.
    ///
    /// Errors carry no body and no delay; faults carry no delay.
    pub fn build(self) -> ResponseSpec {
        let response = ok().with_header(RESPONSE_STATUS_NAME, status_name(self.code));

        if let Some(reason) = self.reason {
            return response.with_header(RESPONSE_STATUS_REASON, reason);
        }

        if let Some(fault) = self.fault {
            return response.with_fault(fault);
        }

        let response = match self.delay {
            Some(delay) => response.with_delay(delay),
            None => response,
        };

        response.with_body(self.body)
    }
}

/// Status name understood by the mock server's gRPC extension.
pub fn status_name(code: Code) -> &'static str {
    match code {
        Code::Ok => "OK",
        Code::Cancelled => "CANCELLED",
        Code::Unknown => "UNKNOWN",
        Code::InvalidArgument => "INVALID_ARGUMENT",
        Code::DeadlineExceeded => "DEADLINE_EXCEEDED",
        Code::NotFound => "NOT_FOUND",
        Code::AlreadyExists => "ALREADY_EXISTS",
        Code::PermissionDenied => "PERMISSION_DENIED",
        Code::ResourceExhausted => "RESOURCE_EXHAUSTED",
        Code::FailedPrecondition => "FAILED_PRECONDITION",
        Code::Aborted => "ABORTED",
        Code::OutOfRange => "OUT_OF_RANGE",
        Code::Unimplemented => "UNIMPLEMENTED",
        Code::Internal => "INTERNAL",
        Code::Unavailable => "UNAVAILABLE",
        Code::DataLoss => "DATA_LOSS",
        Code::Unauthenticated => "UNAUTHENTICATED",
    }
}
