//! Request tracking middleware
//!
//! Every request gets an `x-request-id` (generated if the client did not
//! send one) which is echoed on the response; credential-bearing headers
//! are masked in trace output.

use axum::http::header::{AUTHORIZATION, COOKIE, SET_COOKIE};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    sensitive_headers::SetSensitiveRequestHeadersLayer,
};

/// Create a request ID layer generating UUID request ids
pub fn request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::x_request_id(MakeRequestUuid)
}

/// Create a request ID propagation layer
pub fn request_id_propagation_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::x_request_id()
}

/// Create a sensitive headers layer
pub fn sensitive_headers_layer() -> SetSensitiveRequestHeadersLayer {
    SetSensitiveRequestHeadersLayer::new([AUTHORIZATION, COOKIE, SET_COOKIE])
}
