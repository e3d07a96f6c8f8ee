use crate::domain::{AirtableError, CreateBaseRequest, CreateBaseResponse, MetaApi};

// Creates a base. Validation is left to Airtable.
pub struct CreateBaseUseCase<A> {
    pub api: A,
}

impl<A> CreateBaseUseCase<A>
where
    A: MetaApi,
{
    pub async fn execute(
        &self,
        request: &CreateBaseRequest,
    ) -> Result<CreateBaseResponse, AirtableError> {
        let created = self.api.create_base(request).await?;
        tracing::info!(
            base_id = %created.base_id,
            tables = created.tables.len(),
            "create base finished."
        );
        Ok(created)
    }
}
