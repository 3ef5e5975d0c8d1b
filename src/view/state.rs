//! Page data state

use crate::store::StoreError;

/// State of the data behind one page section
#[derive(Debug)]
pub enum ViewState<T> {
    /// The read has not resolved yet
    Loading,
    /// The read resolved with data
    Ready(T),
    /// The read failed
    Error(StoreError),
    /// A keyed read resolved with no record
    NotFound,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::Loading
    }
}

impl<T> ViewState<T> {
    /// Status tag used by templates
    pub fn status(&self) -> &'static str {
        match self {
            ViewState::Loading => "loading",
            ViewState::Ready(_) => "ready",
            ViewState::Error(_) => "error",
            ViewState::NotFound => "not_found",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&StoreError> {
        match self {
            ViewState::Error(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_tags() {
        assert_eq!(ViewState::<()>::default().status(), "loading");
        assert_eq!(ViewState::Ready(1).status(), "ready");
        assert_eq!(
            ViewState::<()>::Error(StoreError::Unavailable("down".into())).status(),
            "error"
        );
        assert_eq!(ViewState::<()>::NotFound.status(), "not_found");
    }

    #[test]
    fn test_accessors() {
        let state = ViewState::Ready(vec![1, 2]);
        assert_eq!(state.ready(), Some(&vec![1, 2]));
        assert!(state.error().is_none());
        assert!(!state.is_loading());
    }
}
