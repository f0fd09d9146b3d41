use super::response::{classify_edit_response, RATE_LIMIT_WAIT_HEADER};
use super::ApiError;
use crate::config::{ApiConfig, Credentials};
use crate::parser::parse_asset_group_title;
use crate::uploader::{BatchSubmitter, SubmitStatus};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, instrument};

pub const ASSET_GROUP_PATH: &str = "/api/2.0/fo/asset/group/";
pub const OPTION_PROFILE_PATH: &str = "/api/2.0/fo/subscription/option_profile/";

/// The API refuses requests without an `X-Requested-With` header
const REQUESTED_WITH: &str = "qualys-bulk";

/// Blocking client for the asset-group and option-profile endpoints
pub struct QualysClient {
    http: Client,
    base_url: String,
    credentials: Credentials,
}

impl QualysClient {
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, credentials, None)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        credentials: Credentials,
        timeout: Option<Duration>,
    ) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// Build a client from configuration, resolving credentials once
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let credentials = config.credential_provider.credentials()?;
        Self::with_timeout(&config.endpoint_url, credentials, config.timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn asset_group_url(&self) -> String {
        format!("{}{}", self.base_url, ASSET_GROUP_PATH)
    }

    pub fn option_profile_url(&self) -> String {
        format!("{}{}", self.base_url, OPTION_PROFILE_PATH)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("X-Requested-With", REQUESTED_WITH)
            .basic_auth(&self.credentials.username, Some(self.credentials.password()))
    }

    fn post_asset_group(&self, form: &[(&str, &str)]) -> Result<Response, ApiError> {
        let url = self.asset_group_url();
        debug!(%url, action = form.first().map(|(_, v)| *v), "POST asset group");
        Ok(self.authorized(self.http.post(url)).form(form).send()?)
    }

    /// Fetch only the TITLE of an asset group, used to confirm the target
    #[instrument(skip(self))]
    pub fn asset_group_title(&self, group_id: &str) -> Result<String, ApiError> {
        let response = self.post_asset_group(&[
            ("action", "list"),
            ("ids", group_id),
            ("show_attributes", "TITLE"),
        ])?;

        let body = Self::success_body(response, || {
            ApiError::AssetGroupNotFound(group_id.to_string())
        })?;

        parse_asset_group_title(&body)?.ok_or_else(|| {
            ApiError::MalformedResponse(
                "no TITLE element in the asset group listing".to_string(),
            )
        })
    }

    /// Full asset group listing (`show_attributes=ALL`) as raw XML
    #[instrument(skip(self))]
    pub fn asset_group_details(&self, group_id: &str) -> Result<String, ApiError> {
        let response = self.post_asset_group(&[
            ("action", "list"),
            ("ids", group_id),
            ("show_attributes", "ALL"),
        ])?;

        Self::success_body(response, || ApiError::AssetGroupNotFound(group_id.to_string()))
    }

    /// Export every option profile, system profiles included, as raw XML
    #[instrument(skip(self))]
    pub fn export_option_profiles(&self) -> Result<String, ApiError> {
        let url = self.option_profile_url();
        debug!(%url, "GET option profiles");

        let response = self
            .authorized(self.http.get(&url))
            .query(&[
                ("action", "export"),
                ("output_format", "XML"),
                ("include_system_option_profiles", "1"),
            ])
            .send()?;

        Self::success_body(response, || ApiError::EndpointNotFound(url.clone()))
    }

    /// Add one batch of DNS names to an asset group.
    ///
    /// Rate limiting and rejections come back as [`SubmitStatus`]; only
    /// transport failures are errors.
    #[instrument(skip(self, batch), fields(batch_len = batch.len()))]
    pub fn add_dns_names(&self, group_id: &str, batch: &[String]) -> Result<SubmitStatus, ApiError> {
        let names = batch.join(",");
        let response = self.post_asset_group(&[
            ("action", "edit"),
            ("id", group_id),
            ("add_dns_names", &names),
        ])?;

        let status = response.status().as_u16();
        let wait = response
            .headers()
            .get(RATE_LIMIT_WAIT_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response.text()?;

        debug!(status, wait = ?wait, "Edit response received");
        Ok(classify_edit_response(status, wait.as_deref(), body))
    }

    fn success_body(
        response: Response,
        not_found: impl FnOnce() -> ApiError,
    ) -> Result<String, ApiError> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(not_found());
        }

        let body = response.text()?;
        if !status.is_success() {
            return Err(ApiError::ServerError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}

impl BatchSubmitter for QualysClient {
    fn submit(&mut self, target_id: &str, batch: &[String]) -> Result<SubmitStatus, ApiError> {
        self.add_dns_names(target_id, batch)
    }
}
