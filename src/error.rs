use thiserror::Error;

/// Everything that can keep an effect from activating.
///
/// None of these reach the page: the browser layer logs them and leaves the
/// static content in place.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackdropError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("2d canvas context unavailable")]
    ContextUnavailable,
    #[error("{0} not supported by this host")]
    Unsupported(&'static str),
    #[error("javascript error: {0}")]
    Js(String),
    #[error("invalid color {0:?}")]
    InvalidColor(String),
    #[error("invalid particle count {0:?}")]
    InvalidCount(String),
}

pub type Result<T, E = BackdropError> = std::result::Result<T, E>;

#[cfg(target_arch = "wasm32")]
mod js {
    use wasm_bindgen::{JsCast, JsValue};

    use super::BackdropError;

    impl From<JsValue> for BackdropError {
        fn from(value: JsValue) -> Self {
            let message = value
                .as_string()
                .or_else(|| {
                    value
                        .dyn_ref::<js_sys::Error>()
                        .map(|e| String::from(e.message()))
                })
                .unwrap_or_else(|| format!("{value:?}"));
            BackdropError::Js(message)
        }
    }

    impl From<BackdropError> for JsValue {
        fn from(err: BackdropError) -> Self {
            js_sys::Error::new(&err.to_string()).into()
        }
    }
}
