//! Handler contract for generated serverless functions
//!
//! A handler is invoked once with an event and an invocation context and yields
//! either a result or an error. The generated unit tests check the result with
//! a fixed sequence of assertions; [`verify_hello_world`] runs the same
//! sequence so a handler stub can be checked without a JavaScript runtime.

use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

/// Expected `statusCode` of a successful response
pub const STATUS_OK: i64 = 200;

/// Expected `message` in the response body
pub const HELLO_WORLD_MESSAGE: &str = "hello world";

/// Metadata passed alongside the event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationContext {
    pub function_name: String,
    pub request_id: String,
}

impl Default for InvocationContext {
    fn default() -> Self {
        Self {
            function_name: "HelloWorldFunction".to_string(),
            request_id: "00000000-0000-0000-0000-000000000000".to_string(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandlerError {
    #[error("HANDLER_FAILED: {0}")]
    Failed(String),
}

/// Single invocation contract: result or error, exactly once
pub trait Handler {
    fn invoke(&self, event: &Value, context: &InvocationContext) -> Result<Value, HandlerError>;
}

impl<F> Handler for F
where
    F: Fn(&Value, &InvocationContext) -> Result<Value, HandlerError>,
{
    fn invoke(&self, event: &Value, context: &InvocationContext) -> Result<Value, HandlerError> {
        self(event, context)
    }
}

/// Reference implementation of the generated hello world function
#[derive(Debug, Clone, Copy, Default)]
pub struct HelloWorldHandler;

impl Handler for HelloWorldHandler {
    fn invoke(&self, _event: &Value, _context: &InvocationContext) -> Result<Value, HandlerError> {
        Ok(hello_world_response())
    }
}

/// `{statusCode: 200, body: '{"message":"hello world"}'}`
pub fn hello_world_response() -> Value {
    json!({
        "statusCode": STATUS_OK,
        "body": json!({ "message": HELLO_WORLD_MESSAGE }).to_string(),
    })
}

/// The checks the generated unit test performs, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Assertion {
    ResultIsObject,
    StatusCodeIsOk,
    BodyIsString,
    BodyIsObject,
    MessageIsHelloWorld,
}

impl Assertion {
    pub const ALL: [Assertion; 5] = [
        Assertion::ResultIsObject,
        Assertion::StatusCodeIsOk,
        Assertion::BodyIsString,
        Assertion::BodyIsObject,
        Assertion::MessageIsHelloWorld,
    ];

    /// 1-based position in the test
    pub fn number(self) -> usize {
        match self {
            Assertion::ResultIsObject => 1,
            Assertion::StatusCodeIsOk => 2,
            Assertion::BodyIsString => 3,
            Assertion::BodyIsObject => 4,
            Assertion::MessageIsHelloWorld => 5,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Assertion::ResultIsObject => "result is an object",
            Assertion::StatusCodeIsOk => "statusCode equals 200",
            Assertion::BodyIsString => "body is a string",
            Assertion::BodyIsObject => "parsed body is an object",
            Assertion::MessageIsHelloWorld => "message equals \"hello world\"",
        }
    }
}

/// First assertion a result failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("assertion {} failed ({}): {detail}", .assertion.number(), .assertion.description())]
pub struct ContractViolation {
    pub assertion: Assertion,
    pub detail: String,
}

impl ContractViolation {
    fn new(assertion: Assertion, detail: impl Into<String>) -> Self {
        Self {
            assertion,
            detail: detail.into(),
        }
    }
}

/// Why a contract run did not pass
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractFailure {
    #[error("handler returned an error: {0}")]
    Handler(#[from] HandlerError),

    #[error("{0}")]
    Violation(#[from] ContractViolation),
}

/// Check a handler result against the hello world response contract
///
/// Assertions run in order and the first failure is reported.
pub fn verify_hello_world(result: &Value) -> Result<(), ContractViolation> {
    let object = result.as_object().ok_or_else(|| {
        ContractViolation::new(
            Assertion::ResultIsObject,
            format!("expected an object, got {}", result),
        )
    })?;

    let status = object.get("statusCode").unwrap_or(&Value::Null);
    if status.as_f64() != Some(STATUS_OK as f64) {
        return Err(ContractViolation::new(
            Assertion::StatusCodeIsOk,
            format!("expected {}, got {}", STATUS_OK, status),
        ));
    }

    let body = object.get("body").unwrap_or(&Value::Null);
    let body = body.as_str().ok_or_else(|| {
        ContractViolation::new(
            Assertion::BodyIsString,
            format!("expected a string, got {}", body),
        )
    })?;

    let parsed: Value = serde_json::from_str(body).map_err(|e| {
        ContractViolation::new(Assertion::BodyIsObject, format!("body is not JSON: {}", e))
    })?;
    let parsed = parsed.as_object().ok_or_else(|| {
        ContractViolation::new(
            Assertion::BodyIsObject,
            format!("expected an object, got {}", parsed),
        )
    })?;

    let message = parsed.get("message").unwrap_or(&Value::Null);
    if message.as_str() != Some(HELLO_WORLD_MESSAGE) {
        return Err(ContractViolation::new(
            Assertion::MessageIsHelloWorld,
            format!("expected \"{}\", got {}", HELLO_WORLD_MESSAGE, message),
        ));
    }

    Ok(())
}

/// Invoke a handler once and verify its result
pub fn run_contract<H: Handler + ?Sized>(
    handler: &H,
    event: &Value,
    context: &InvocationContext,
) -> Result<Value, ContractFailure> {
    let result = handler.invoke(event, context)?;
    verify_hello_world(&result)?;
    Ok(result)
}
