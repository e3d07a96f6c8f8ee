use std::fmt;

use crate::domain::{AirtableError, MetaApi, Tables};

#[derive(Debug)]
pub enum DescribeBaseError {
    Api(AirtableError),
    TableNotFound(String),
}

impl fmt::Display for DescribeBaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DescribeBaseError::Api(err) => write!(f, "{err}"),
            DescribeBaseError::TableNotFound(table) => write!(f, "table not found: {table}"),
        }
    }
}

impl std::error::Error for DescribeBaseError {}

// Fetches a base schema, optionally narrowed to one table.
pub struct DescribeBaseUseCase<A> {
    pub api: A,
}

impl<A> DescribeBaseUseCase<A>
where
    A: MetaApi,
{
    pub async fn execute(
        &self,
        base_id: &str,
        table: Option<&str>,
    ) -> Result<Tables, DescribeBaseError> {
        let tables = self
            .api
            .get_tables(base_id)
            .await
            .map_err(DescribeBaseError::Api)?;

        let Some(wanted) = table else {
            return Ok(tables);
        };

        let found = tables
            .find(wanted)
            .cloned()
            .ok_or_else(|| DescribeBaseError::TableNotFound(wanted.to_string()))?;
        Ok(Tables {
            tables: vec![found],
        })
    }
}
