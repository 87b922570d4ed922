//! Response envelope handed back to the agent layer.

use serde::{Deserialize, Serialize};

use crate::generator::CandidateSlot;

/// Tool name the agent layer dispatches on.
pub const TOOL_NAME: &str = "recommend_meeting_time";

/// Message returned in place of an empty recommendation list.
pub const NO_AVAILABILITY_MESSAGE: &str = "No time slot found when all members are available.";

/// `{"tool": ..., "data": ...}` wrapper around a recommendation result, or
/// `{"tool": ..., "error": ...}` when the request could not be served.
///
/// Exactly one of `data` and `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationReport {
    pub tool: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ReportData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportData {
    Recommendations {
        recommendations: Vec<CandidateSlot>,
        group_id: Option<i64>,
    },
    NoAvailability {
        message: String,
    },
}

impl RecommendationReport {
    /// Wrap `slots` for `group_id`. An empty list becomes the no-availability
    /// message rather than an empty array.
    pub fn new(slots: Vec<CandidateSlot>, group_id: Option<i64>) -> Self {
        let data = if slots.is_empty() {
            ReportData::NoAvailability {
                message: NO_AVAILABILITY_MESSAGE.to_string(),
            }
        } else {
            ReportData::Recommendations {
                recommendations: slots,
                group_id,
            }
        };
        Self {
            tool: TOOL_NAME.to_string(),
            data: Some(data),
            error: None,
        }
    }

    /// Report a request-level failure (bad parameters, undecodable bundle).
    pub fn error(message: impl std::fmt::Display) -> Self {
        Self {
            tool: TOOL_NAME.to_string(),
            data: None,
            error: Some(message.to_string()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// The recommended slots; empty when nothing was found or on error.
    pub fn slots(&self) -> &[CandidateSlot] {
        match &self.data {
            Some(ReportData::Recommendations {
                recommendations, ..
            }) => recommendations,
            Some(ReportData::NoAvailability { .. }) | None => &[],
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
