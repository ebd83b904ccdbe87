// Errors raised at the browser boundary. The simulation itself never fails.

use std::fmt;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    // e.g. running inside a worker
    NoWindow,
    NoDocument,
    ContextUnavailable,
    Js(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NoWindow => write!(f, "no global window available"),
            Error::NoDocument => write!(f, "window has no document body"),
            Error::ContextUnavailable => write!(f, "canvas 2d context unavailable"),
            Error::Js(msg) => write!(f, "javascript error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<JsValue> for Error {
    fn from(value: JsValue) -> Self {
        Error::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<Error> for JsValue {
    fn from(e: Error) -> Self {
        JsValue::from_str(&e.to_string())
    }
}
