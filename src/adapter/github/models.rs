//! GitHub REST Models
//!
//! リクエスト・レスポンスのJSON表現

use serde::{Deserialize, Serialize};

use crate::domain::entities::issue::{CreatedIssue, NewIssue};
use crate::domain::entities::milestone::Milestone;

#[derive(Debug, Serialize)]
pub struct CreateMilestoneRequest<'a> {
    pub title: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CreateIssueRequest<'a> {
    pub title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<&'a str>,
    pub labels: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<u64>,
}

impl<'a> From<&'a NewIssue> for CreateIssueRequest<'a> {
    fn from(issue: &'a NewIssue) -> Self {
        Self {
            title: &issue.title,
            body: issue.body.as_deref(),
            labels: &issue.labels,
            milestone: issue.milestone,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateCommentRequest<'a> {
    pub body: &'a str,
}

#[derive(Debug, Serialize)]
pub struct UpdateIssueStateRequest {
    pub state: IssueState,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

/// Subset of the milestone object the importer reads
#[derive(Debug, Deserialize)]
pub struct MilestoneResponse {
    pub number: u64,
    pub title: String,
}

impl From<MilestoneResponse> for Milestone {
    fn from(response: MilestoneResponse) -> Self {
        Milestone::new(response.number, response.title)
    }
}

/// Subset of the issue object the importer reads
#[derive(Debug, Deserialize)]
pub struct IssueResponse {
    pub number: u64,
    pub title: String,
}

impl From<IssueResponse> for CreatedIssue {
    fn from(response: IssueResponse) -> Self {
        CreatedIssue {
            number: response.number,
            title: response.title,
        }
    }
}
