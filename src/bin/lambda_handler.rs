//! AWS Lambda handler for time-value-of-money calculations
//!
//! Accepts either a direct invocation payload (the calculation request
//! itself) or a Lambda Function URL event whose `body` carries the request.
//! Responses use the Function URL shape: `{statusCode, headers, body}`.

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::{json, Value};
use tvm_calc::request::{evaluate, CalcRequest};
use tvm_calc::{CalcConfig, FinanceError};

fn cors_headers() -> Value {
    json!({
        "Content-Type": "application/json",
        "Access-Control-Allow-Origin": "*",
        "Access-Control-Allow-Methods": "POST, OPTIONS",
        "Access-Control-Allow-Headers": "Content-Type",
    })
}

fn error_response(status: u16, message: &str) -> Value {
    json!({
        "statusCode": status,
        "headers": cors_headers(),
        "body": json!({ "error": message }).to_string(),
    })
}

fn json_response(body: &Value) -> Value {
    json!({
        "statusCode": 200,
        "headers": cors_headers(),
        "body": body.to_string(),
    })
}

fn http_method(payload: &Value) -> Option<&str> {
    payload
        .pointer("/requestContext/http/method")
        .and_then(Value::as_str)
}

/// Caller mistakes (bad types, undefined arithmetic) are 400s; anything else is ours
fn status_for(error: &FinanceError) -> u16 {
    if error.is_calculation_error() {
        400
    } else {
        500
    }
}

/// Extract the calculation request from either event shape
fn request_body(payload: Value) -> Result<Value, String> {
    if payload.get("isBase64Encoded").and_then(Value::as_bool) == Some(true) {
        return Err("Base64-encoded bodies are not supported".to_string());
    }

    match payload.get("body") {
        Some(Value::String(body)) => {
            serde_json::from_str(body).map_err(|e| format!("Invalid JSON: {}", e))
        }
        Some(Value::Null) => Ok(json!({})),
        Some(_) => Err("Request body must be a JSON string".to_string()),
        None => Ok(payload),
    }
}

/// Lambda handler function
async fn handler(event: LambdaEvent<Value>, config: &CalcConfig) -> Result<Value, Error> {
    let payload = event.payload;

    // Handle CORS preflight
    if http_method(&payload) == Some("OPTIONS") {
        return Ok(json!({ "statusCode": 200, "headers": cors_headers() }));
    }

    let body = match request_body(payload) {
        Ok(b) => b,
        Err(message) => return Ok(error_response(400, &message)),
    };

    let request: CalcRequest = match serde_json::from_value(body) {
        Ok(r) => r,
        Err(e) => return Ok(error_response(400, &format!("Invalid request: {}", e))),
    };

    match evaluate(&request, config) {
        Ok(response) => {
            log::debug!("{:?} -> {}", request.operation, response.value);
            Ok(json_response(&serde_json::to_value(&response)?))
        }
        Err(e) => {
            log::warn!("Calculation failed: {}", e);
            Ok(error_response(status_for(&e), &e.to_string()))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let config = CalcConfig::from_env();
    log::info!("Starting TVM Lambda handler with {:?}", config);

    let config = &config;
    run(service_fn(move |event: LambdaEvent<Value>| async move {
        handler(event, config).await
    }))
    .await
}
