//! Verdict classification.
//!
//! Both "bad" outcomes are recognised by exact, case-sensitive string equality
//! with the value the analysis server documents. Anything else, including an
//! empty or differently cased string, is displayed as safe.

/// User-visible message for any failed URL request.
pub const URL_FAILURE_MESSAGE: &str = "Could not connect. Check the server terminal for errors.";
/// User-visible message for any failed text request.
pub const TEXT_FAILURE_MESSAGE: &str = "Could not connect. Is the server running and API key set?";

const PHISHING: &str = "Phishing";
const LEGITIMATE: &str = "Legitimate";
const HIGH_RISK: &str = "High Risk";

/// Which of the two analysis flows is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Url,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualClass {
    Safe,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlStatus {
    Legitimate,
    Phishing,
    /// Any value the server sends besides the two documented ones.
    Other(String),
}

impl UrlStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            PHISHING => UrlStatus::Phishing,
            LEGITIMATE => UrlStatus::Legitimate,
            other => UrlStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            UrlStatus::Legitimate => LEGITIMATE,
            UrlStatus::Phishing => PHISHING,
            UrlStatus::Other(raw) => raw,
        }
    }

    pub fn visual_class(&self) -> VisualClass {
        match self {
            UrlStatus::Phishing => VisualClass::Danger,
            UrlStatus::Legitimate | UrlStatus::Other(_) => VisualClass::Safe,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextVerdict {
    HighRisk,
    Other(String),
}

impl TextVerdict {
    pub fn parse(raw: &str) -> Self {
        if raw == HIGH_RISK {
            TextVerdict::HighRisk
        } else {
            TextVerdict::Other(raw.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TextVerdict::HighRisk => HIGH_RISK,
            TextVerdict::Other(raw) => raw,
        }
    }

    pub fn visual_class(&self) -> VisualClass {
        match self {
            TextVerdict::HighRisk => VisualClass::Danger,
            TextVerdict::Other(_) => VisualClass::Safe,
        }
    }
}

/// Result of `POST /analyze`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    pub status: UrlStatus,
    pub message: String,
    /// Supporting signals in server order; may be empty.
    pub reasons: Vec<String>,
    pub phishing_score: Option<String>,
}

/// Result of `POST /analyze-text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextAnalysisResult {
    pub verdict: TextVerdict,
    pub explanation: String,
}

/// A request ended without a usable result. The platform logs the cause; the
/// state machine only needs to know that it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisFailed;
