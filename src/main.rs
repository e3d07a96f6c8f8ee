use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    airtable_meta::run().await
}
