use crate::pipeline::tests::{base, StubTransport};
use crate::pipeline::Pipeline;
use astra::{Body, Request, Response};
use std::io::Read;

/// Pipeline serving `page` for every location.
pub fn pipeline_with(page: &str) -> Pipeline {
    Pipeline::new(Box::new(StubTransport::ok(page)), base())
}

pub fn failing_pipeline() -> Pipeline {
    Pipeline::new(Box::new(StubTransport::failing()), base())
}

pub fn get(uri: &str) -> Request {
    http::Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn body_bytes(mut resp: Response) -> Vec<u8> {
    let mut bytes = Vec::new();
    resp.body_mut().reader().read_to_end(&mut bytes).unwrap();
    bytes
}

pub fn body_string(resp: Response) -> String {
    String::from_utf8(body_bytes(resp)).unwrap()
}
