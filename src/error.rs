use thiserror::Error;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("window is unavailable")]
    MissingWindow,
    #[error("document is unavailable")]
    MissingDocument,
    #[error("{operation} failed: {detail}")]
    Dom {
        operation: &'static str,
        detail: String,
    },
}

impl BehaviorError {
    pub fn dom(operation: &'static str, detail: impl Into<String>) -> Self {
        Self::Dom {
            operation,
            detail: detail.into(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn js_detail(value: &wasm_bindgen::JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_error_names_operation() {
        let error = BehaviorError::dom("IntersectionObserver::new", "unsupported");
        assert_eq!(error.to_string(), "IntersectionObserver::new failed: unsupported");
    }
}
