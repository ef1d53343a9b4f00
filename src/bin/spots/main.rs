use spots::StoreConfig;
use tikv_jemallocator::Jemalloc;
use tracing::{error, info};

#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

const DEFAULT_HTTP_PORT: &str = "8080";

#[tokio::main]
async fn main() {
    let guards = common_telemetry::init_logging();

    let http_addr = format!(
        "{}:{}",
        "0.0.0.0",
        std::env::var("SPOTS_HTTP_PORT").unwrap_or(DEFAULT_HTTP_PORT.to_owned())
    );
    let store_config = StoreConfig::from_env();
    info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %http_addr,
        store = ?store_config,
        "starting spots server"
    );

    if let Err(e) = server::http::server(http_addr, store_config).await {
        error!("{e:#}");
        // flush the non-blocking writer before exiting
        drop(guards);
        std::process::exit(1);
    }
}
