mod cli;
mod compare;
mod demo;
mod infra;
mod routes;
mod server;

use rfp_advisor::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
