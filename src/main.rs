use anyhow::Result;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    slotwise::init_logger();

    let config = slotwise::Config::load()?;
    let port = std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(config.server.port);
    let addr = format!("0.0.0.0:{}", port);

    info!("Starting slotwise scheduling service");
    slotwise::api_server::start_api_server(config, &addr).await
}
