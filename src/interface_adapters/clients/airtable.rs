use crate::domain::{
    AirtableError, Bases, CreateBaseRequest, CreateBaseResponse, MetaApi, QueryParams, Tables,
};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.airtable.com/v0";

// Thin wrapper around reqwest for the Airtable metadata endpoints.
#[derive(Clone)]
pub struct AirtableClient {
    http: Client,
    base_url: Url,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

// Airtable answers errors either as a bare code or as a typed object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Code(String),
    Detailed {
        #[serde(rename = "type")]
        kind: Option<String>,
        message: Option<String>,
    },
}

impl ErrorBody {
    fn into_parts(self) -> (Option<String>, Option<String>) {
        match self {
            ErrorBody::Code(code) => (Some(code), None),
            ErrorBody::Detailed { kind, message } => (kind, message),
        }
    }
}

impl AirtableClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, AirtableError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(AirtableError::Transport)?;
        Self::with_http_client(http, api_key, base_url)
    }

    // Reuse a caller-configured reqwest client (proxies, TLS, pools).
    pub fn with_http_client(
        http: Client,
        api_key: impl Into<String>,
        base_url: &str,
    ) -> Result<Self, AirtableError> {
        let parsed = Url::parse(base_url)
            .map_err(|err| AirtableError::InvalidBaseUrl(format!("{base_url}: {err}")))?;
        if parsed.cannot_be_a_base() {
            return Err(AirtableError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            http,
            base_url: parsed,
            api_key: api_key.into(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Lists the bases visible to the token.
    ///
    /// Pass `("offset", ..)` from a previous page to continue listing.
    /// The client-wide timeout applies; for a tighter deadline wrap the call
    /// in `tokio::time::timeout`, which cancels the request when it elapses.
    /// <https://airtable.com/developers/web/api/list-bases>
    #[tracing::instrument(name = "airtable.list_bases", skip_all, fields(params = params.len()))]
    pub async fn get_bases_with_params(
        &self,
        params: &QueryParams,
    ) -> Result<Bases, AirtableError> {
        self.get(&["meta", "bases"], params, None).await
    }

    /// Prepares a schema request for one base; nothing is sent until
    /// [`BaseSchemaRequest::send`] or [`BaseSchemaRequest::get_tables`].
    pub fn get_base_schema(&self, base_id: impl Into<String>) -> BaseSchemaRequest<'_> {
        BaseSchemaRequest {
            client: self,
            base_id: base_id.into(),
            timeout: None,
        }
    }

    /// Creates a base from table schemas.
    ///
    /// Like [`Self::get_bases_with_params`], a per-call deadline is a
    /// `tokio::time::timeout` around this future.
    /// <https://airtable.com/developers/web/api/create-base>
    #[tracing::instrument(
        name = "airtable.create_base",
        skip_all,
        fields(name = %req.name, workspace_id = %req.workspace_id)
    )]
    pub async fn create_base(
        &self,
        req: &CreateBaseRequest,
    ) -> Result<CreateBaseResponse, AirtableError> {
        tracing::debug!(request = ?req, "sending create base request.");
        let created: CreateBaseResponse = self.post(&["meta", "bases"], req).await?;
        tracing::info!(base_id = %created.base_id, "base created.");
        Ok(created)
    }

    // Appends non-empty path segments (percent-encoded) and query params in order.
    pub(crate) fn endpoint(
        &self,
        segments: &[&str],
        params: &QueryParams,
    ) -> Result<Url, AirtableError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| AirtableError::InvalidBaseUrl(self.base_url.to_string()))?;
            path.pop_if_empty();
            path.extend(segments.iter().filter(|segment| !segment.is_empty()));
        }
        if !params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(params.iter().map(|(key, value)| (key.as_str(), value.as_str())));
        }
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        params: &QueryParams,
        timeout: Option<Duration>,
    ) -> Result<T, AirtableError> {
        let url = self.endpoint(segments, params)?;
        tracing::debug!(%url, "GET");

        let mut request = self.http.get(url).bearer_auth(&self.api_key);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }
        let res = request.send().await.map_err(AirtableError::Transport)?;
        decode_response(res).await
    }

    async fn post<B, T>(&self, segments: &[&str], body: &B) -> Result<T, AirtableError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments, &[])?;
        tracing::debug!(%url, "POST");

        let res = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(AirtableError::Transport)?;
        decode_response(res).await
    }
}

async fn decode_response<T: DeserializeOwned>(res: Response) -> Result<T, AirtableError> {
    let status = res.status();

    // Keep upstream status and Airtable's error type for the caller.
    if !status.is_success() {
        let (kind, message) = res
            .json::<ErrorEnvelope>()
            .await
            .ok()
            .map(|payload| payload.error.into_parts())
            .unwrap_or((None, None));
        tracing::warn!(%status, kind = ?kind, "airtable request failed.");
        return Err(AirtableError::Upstream {
            status,
            kind,
            message,
        });
    }

    res.json::<T>().await.map_err(AirtableError::Decode)
}

// A schema request bound to one base.
pub struct BaseSchemaRequest<'a> {
    client: &'a AirtableClient,
    base_id: String,
    timeout: Option<Duration>,
}

impl BaseSchemaRequest<'_> {
    pub fn base_id(&self) -> &str {
        &self.base_id
    }

    // Overrides the client-wide timeout for this request only.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub async fn send(&self) -> Result<Tables, AirtableError> {
        self.get_tables().await
    }

    /// Fetches the tables of the bound base.
    /// <https://airtable.com/developers/web/api/get-base-schema>
    #[tracing::instrument(name = "airtable.get_tables", skip_all, fields(base_id = %self.base_id))]
    pub async fn get_tables(&self) -> Result<Tables, AirtableError> {
        self.client
            .get(
                &["meta", "bases", self.base_id.as_str(), "tables"],
                &[],
                self.timeout,
            )
            .await
    }
}

#[async_trait]
impl MetaApi for AirtableClient {
    async fn get_bases_with_params(&self, params: &QueryParams) -> Result<Bases, AirtableError> {
        AirtableClient::get_bases_with_params(self, params).await
    }

    async fn get_tables(&self, base_id: &str) -> Result<Tables, AirtableError> {
        self.get_base_schema(base_id).get_tables().await
    }

    async fn create_base(
        &self,
        req: &CreateBaseRequest,
    ) -> Result<CreateBaseResponse, AirtableError> {
        AirtableClient::create_base(self, req).await
    }
}
