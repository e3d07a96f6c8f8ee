mod errors;
mod ports;
mod schema;

// Re-export the domain boundary types and ports.
pub use errors::AirtableError;
pub use ports::{MetaApi, QueryParams};
pub use schema::{
    Base, Bases, CreateBaseRequest, CreateBaseResponse, Field, TableSchema, Tables, View,
};
