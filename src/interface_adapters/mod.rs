// Interface adapters: HTTP clients for external services.

pub mod clients;
