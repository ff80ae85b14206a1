use dashboard::Dashboard;

// This main function is the entry point when running `cargo run -p web-server`.
// It loads `config.toml`, installs tracing and serves the dashboard API.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = configuration::load_config(None)?;
    let _guard = configuration::init_tracing(&config.logging)?;

    let addr = config.server.socket_addr()?;
    let dashboard = Dashboard::new(&config)?;
    web_server::run_server(addr, dashboard).await
}
