use crate::RequestId;

/// Work the platform must perform after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// `POST /analyze` with `{"url": url}`.
    SubmitUrl { request_id: RequestId, url: String },
    /// `POST /analyze-text` with `{"text": text}`.
    SubmitText { request_id: RequestId, text: String },
}

impl Effect {
    pub fn request_id(&self) -> RequestId {
        match self {
            Effect::SubmitUrl { request_id, .. } | Effect::SubmitText { request_id, .. } => {
                *request_id
            }
        }
    }
}
