pub mod airtable;

pub use airtable::{AirtableClient, BaseSchemaRequest, DEFAULT_BASE_URL};
