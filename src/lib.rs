pub mod domain;
pub mod frameworks;
pub mod interface_adapters;
pub mod use_cases;

pub use domain::{
    AirtableError, Base, Bases, CreateBaseRequest, CreateBaseResponse, Field, MetaApi,
    TableSchema, Tables, View,
};
pub use frameworks::cli::run;
pub use interface_adapters::clients::{AirtableClient, BaseSchemaRequest, DEFAULT_BASE_URL};
