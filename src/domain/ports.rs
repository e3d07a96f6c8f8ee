use async_trait::async_trait;

use crate::domain::errors::AirtableError;
use crate::domain::schema::{Bases, CreateBaseRequest, CreateBaseResponse, Tables};

// Query parameters in the order they are sent.
pub type QueryParams = [(String, String)];

// Port for the Airtable metadata endpoints. Use cases depend on this trait,
// not on the concrete HTTP client.
#[async_trait]
pub trait MetaApi: Send + Sync {
    async fn get_bases_with_params(&self, params: &QueryParams) -> Result<Bases, AirtableError>;
    async fn get_tables(&self, base_id: &str) -> Result<Tables, AirtableError>;
    async fn create_base(
        &self,
        req: &CreateBaseRequest,
    ) -> Result<CreateBaseResponse, AirtableError>;
}
