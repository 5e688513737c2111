// This main function is the entry point when running `cargo run -p web-server`.
// It loads the settings, installs logging, and hands over to `run_server`.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let settings = configuration::load_settings()?;
    let _log_guard = configuration::init_tracing(&settings.logging)?;

    let addr = settings.server.addr();
    web_server::run_server(settings, addr).await
}
