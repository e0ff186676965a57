//! Response normalization.
//!
//! [`normalize`] turns the raw [`Response`] of a completed exchange into the
//! result of the call: a [`Reply`] for 2xx statuses, an [`Error::Http`] for
//! everything else. Redirections are not followed and count as failures.

use crate::{Error, Method, Payload, Reply, Response, Result, decode_payload};

/// Classify a raw response.
///
/// The body is decoded with [`decode_payload`], which never fails. HEAD
/// responses and `204`/`304` statuses carry no payload.
///
/// # Errors
///
/// Returns [`Error::Http`] with the exact status and the decoded payload
/// for any non-2xx status.
pub fn normalize(method: Method, response: Response) -> Result<Reply> {
    let success = response.is_success();
    let (status, headers, body) = response.into_parts();

    let data = if method == Method::Head || matches!(status, 204 | 304) {
        None
    } else {
        decode_payload(headers.get("content-type").map(String::as_str), &body)
    };

    if success {
        return Ok(Reply::new(status, data, headers));
    }

    let message = error_message(status, data.as_ref());
    Err(Error::Http {
        status,
        message,
        data,
    })
}

/// Pick the most useful message for a failed exchange.
///
/// A text payload, or the string `message` field of an object payload, wins
/// over the canonical reason phrase of the status.
fn error_message(status: u16, data: Option<&Payload>) -> String {
    let from_payload = match data {
        Some(Payload::Text(text)) if !text.trim().is_empty() => Some(text.clone()),
        Some(payload) => payload
            .get("message")
            .and_then(serde_json::Value::as_str)
            .map(ToString::to_string),
        None => None,
    };

    from_payload.unwrap_or_else(|| {
        http::StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or("Unknown Status")
            .to_string()
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert2::{check, let_assert};
    use bytes::Bytes;
    use serde_json::json;

    use super::*;

    fn response(status: u16, content_type: Option<&str>, body: &'static str) -> Response {
        let headers = content_type
            .map(|ct| HashMap::from([("Content-Type".to_string(), ct.to_string())]))
            .unwrap_or_default();
        Response::new(status, headers, Bytes::from(body))
    }

    #[test]
    fn success_with_json_body() {
        let raw = response(
            200,
            Some("application/json"),
            r#"{"reqMethod":"GET","reqPath":"/foo/bar","reqQueryString":{"awesome":"true"},"reqBody":{}}"#,
        );
        let_assert!(Ok(reply) = normalize(Method::Get, raw));
        check!(reply.status() == 200);
        let_assert!(Some(data) = reply.data());
        check!(data.get("reqMethod") == Some(&json!("GET")));
        check!(data.get("reqQueryString") == Some(&json!({"awesome": "true"})));
        check!(data.get("reqBody") == Some(&json!({})));
        check!(reply.header("Content-Type") == Some("application/json"));
    }

    #[test]
    fn success_with_text_body() {
        let raw = response(201, Some("text/plain"), "created");
        let_assert!(Ok(reply) = normalize(Method::Post, raw));
        check!(reply.status() == 201);
        check!(reply.data() == Some(&Payload::Text("created".to_string())));
    }

    #[test]
    fn success_with_malformed_json_is_text() {
        let raw = response(200, Some("application/json"), "{oops");
        let_assert!(Ok(reply) = normalize(Method::Get, raw));
        check!(reply.data() == Some(&Payload::Text("{oops".to_string())));
    }

    #[test]
    fn head_has_no_data() {
        let raw = response(200, Some("application/json"), r#"{"ignored":true}"#);
        let_assert!(Ok(reply) = normalize(Method::Head, raw));
        check!(reply.status() == 200);
        check!(reply.data().is_none());
    }

    #[test]
    fn no_content_has_no_data() {
        let_assert!(Ok(reply) = normalize(Method::Delete, response(204, None, "")));
        check!(reply.status() == 204);
        check!(reply.data().is_none());
    }

    #[test]
    fn empty_options_body_is_not_an_error() {
        let_assert!(Ok(reply) = normalize(Method::Options, response(200, None, "")));
        check!(reply.data().is_none());
    }

    #[test]
    fn not_found() {
        let_assert!(Err(err) = normalize(Method::Get, response(404, None, "")));
        check!(err.status() == Some(404));
        check!(err.data().is_none());
        check!(err.message() == "Not Found");
    }

    #[test]
    fn string_error_payload() {
        let raw = response(400, Some("text/html; charset=utf-8"), "Custom string error");
        let_assert!(Err(err) = normalize(Method::Get, raw));
        check!(err.status() == Some(400));
        check!(err.data().and_then(Payload::as_text) == Some("Custom string error"));
        check!(err.message() == "Custom string error");
    }

    #[test]
    fn json_string_error_payload() {
        let raw = response(400, Some("application/json"), r#""Custom string error""#);
        let_assert!(Err(err) = normalize(Method::Get, raw));
        check!(err.data() == Some(&Payload::Text("Custom string error".to_string())));
    }

    #[test]
    fn object_error_payload_is_preserved() {
        let raw = response(
            400,
            Some("application/json; charset=utf-8"),
            r#"{"name":"CustomError","message":"something went wrong","extra":{"retry":false}}"#,
        );
        let_assert!(Err(err) = normalize(Method::Get, raw));
        check!(err.status() == Some(400));
        let_assert!(Some(data) = err.data());
        check!(data.get("name") == Some(&json!("CustomError")));
        check!(data.get("extra") == Some(&json!({"retry": false})));
        check!(err.message() == "something went wrong");
    }

    #[test]
    fn object_error_without_message_uses_reason() {
        let raw = response(400, Some("application/json"), r#"{"name":"CustomError"}"#);
        let_assert!(Err(err) = normalize(Method::Get, raw));
        check!(err.message() == "Bad Request");
    }

    #[test]
    fn redirection_is_an_error() {
        let mut headers = HashMap::new();
        headers.insert("Location".to_string(), "/elsewhere".to_string());
        let raw = Response::new(302, headers, Bytes::new());

        let_assert!(Err(err) = normalize(Method::Get, raw));
        check!(err.status() == Some(302));
        check!(err.is_redirection());
        check!(err.message() == "Found");
    }

    #[test]
    fn server_errors() {
        for status in [500, 502, 503, 599] {
            let_assert!(Err(err) = normalize(Method::Put, response(status, None, "")));
            check!(err.status() == Some(status));
            check!(err.is_server_error());
        }
    }

    #[test]
    fn unknown_status_message() {
        let_assert!(Err(err) = normalize(Method::Get, response(599, None, "")));
        check!(err.message() == "Unknown Status");
    }

    #[test]
    fn informational_status_is_an_error() {
        let_assert!(Err(err) = normalize(Method::Get, response(101, None, "")));
        check!(err.status() == Some(101));
    }
}
