use std::collections::HashSet;
use std::fmt;

use crate::domain::{AirtableError, Bases, MetaApi};

#[derive(Debug)]
pub enum ListBasesError {
    Api(AirtableError),
    // The server handed back an offset it already gave us.
    OffsetLoop(String),
}

impl fmt::Display for ListBasesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListBasesError::Api(err) => write!(f, "{err}"),
            ListBasesError::OffsetLoop(offset) => {
                write!(f, "pagination offset repeated: {offset}")
            }
        }
    }
}

impl std::error::Error for ListBasesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ListBasesError::Api(err) => Some(err),
            ListBasesError::OffsetLoop(_) => None,
        }
    }
}

impl From<AirtableError> for ListBasesError {
    fn from(err: AirtableError) -> Self {
        ListBasesError::Api(err)
    }
}

// Lists bases, either one page at a time or by following offsets to the end.
pub struct ListBasesUseCase<A> {
    pub api: A,
}

impl<A> ListBasesUseCase<A>
where
    A: MetaApi,
{
    pub async fn execute(
        &self,
        offset: Option<String>,
        follow_offsets: bool,
    ) -> Result<Bases, ListBasesError> {
        let first = self.api.get_bases_with_params(&offset_params(offset.as_deref())).await?;
        if !follow_offsets {
            return Ok(first);
        }

        let mut seen: HashSet<String> = offset.into_iter().collect();
        let mut bases = first.bases;
        let mut next = first.offset;

        while let Some(offset) = next {
            if !seen.insert(offset.clone()) {
                return Err(ListBasesError::OffsetLoop(offset));
            }
            tracing::debug!(%offset, fetched = bases.len(), "fetching next bases page.");

            let page = self.api.get_bases_with_params(&offset_params(Some(&offset))).await?;
            bases.extend(page.bases);
            next = page.offset;
        }

        Ok(Bases {
            bases,
            offset: None,
        })
    }
}

fn offset_params(offset: Option<&str>) -> Vec<(String, String)> {
    offset
        .map(|offset| vec![("offset".to_string(), offset.to_string())])
        .unwrap_or_default()
}
