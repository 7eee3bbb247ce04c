//! GitHub Tracker Repository Implementation
//!
//! IssueTrackerRepositoryのGitHub REST実装

use async_trait::async_trait;
use reqwest::{Method, StatusCode};

use crate::adapter::github::client::GitHubClient;
use crate::adapter::github::models::{
    CreateCommentRequest, CreateIssueRequest, CreateMilestoneRequest, IssueResponse, IssueState,
    MilestoneResponse, UpdateIssueStateRequest,
};
use crate::domain::entities::issue::{CreatedIssue, NewIssue};
use crate::domain::repositories::tracker_repository::{
    IssueTrackerRepository, MilestonePage, TrackerResult,
};

pub const MILESTONES_PER_PAGE: u32 = 100;

/// GitHub Issueトラッカーリポジトリ
pub struct GitHubTrackerRepository {
    client: GitHubClient,
}

impl GitHubTrackerRepository {
    /// 新しいリポジトリを作成
    pub fn new(client: GitHubClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IssueTrackerRepository for GitHubTrackerRepository {
    async fn list_milestones(&self, page: u32) -> TrackerResult<MilestonePage> {
        // Closed milestones still own their title
        let query = [
            ("state", "all".to_string()),
            ("per_page", MILESTONES_PER_PAGE.to_string()),
            ("page", page.to_string()),
        ];
        let response = self
            .client
            .get("milestones", &query, StatusCode::OK)
            .await?;

        let milestones: Vec<MilestoneResponse> = response.json()?;
        Ok(MilestonePage {
            milestones: milestones.into_iter().map(Into::into).collect(),
            has_next: response.has_next_page(),
        })
    }

    async fn create_milestone(&self, title: &str) -> TrackerResult<()> {
        self.client
            .send_json(
                Method::POST,
                "milestones",
                &CreateMilestoneRequest { title },
                StatusCode::CREATED,
            )
            .await?;
        Ok(())
    }

    async fn create_issue(&self, issue: &NewIssue) -> TrackerResult<CreatedIssue> {
        let response = self
            .client
            .send_json(
                Method::POST,
                "issues",
                &CreateIssueRequest::from(issue),
                StatusCode::CREATED,
            )
            .await?;

        let created: IssueResponse = response.json()?;
        Ok(created.into())
    }

    async fn create_comment(&self, issue_number: u64, body: &str) -> TrackerResult<()> {
        self.client
            .send_json(
                Method::POST,
                &format!("issues/{}/comments", issue_number),
                &CreateCommentRequest { body },
                StatusCode::CREATED,
            )
            .await?;
        Ok(())
    }

    async fn close_issue(&self, issue_number: u64) -> TrackerResult<()> {
        self.client
            .send_json(
                Method::PATCH,
                &format!("issues/{}", issue_number),
                &UpdateIssueStateRequest {
                    state: IssueState::Closed,
                },
                StatusCode::OK,
            )
            .await?;
        Ok(())
    }
}
