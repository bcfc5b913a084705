use library_catalog::catalog::server::serve_from_env;
use library_catalog::utils::logs::setup_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();
    serve_from_env("main").await
}
