use deskdrop_server::{Server, config::ServerConfig, init_sentry, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // reqwest is built without a bundled crypto provider; the sentry transport needs one.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let config = ServerConfig::from_env()?;

    init_sentry(config.sentry_dsn.as_deref());
    init_tracing();

    Server::run(config).await
}
