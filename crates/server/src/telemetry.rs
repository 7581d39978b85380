use std::{env, sync::OnceLock};

use api_types::SessionUser;
use sentry_tracing::{EventFilter, SentryLayer};
use tracing::Level;
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::{Layer as _, SubscriberExt},
    registry::LookupSpan,
    util::SubscriberInitExt,
};

static SENTRY_GUARD: OnceLock<sentry::ClientInitGuard> = OnceLock::new();

pub fn init_tracing() {
    if tracing::dispatcher::has_been_set() {
        return;
    }

    let env_filter = env::var("RUST_LOG").unwrap_or_else(|_| "info,sqlx=warn".to_string());
    let fmt_layer = fmt::layer()
        .json()
        .with_target(false)
        .with_span_events(FmtSpan::CLOSE)
        .boxed();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(ErrorLayer::default())
        .with(fmt_layer)
        .with(sentry_layer())
        .init();
}

/// Starts the Sentry client once; a missing DSN leaves error reporting off.
pub fn init_sentry(dsn: Option<&str>) {
    let Some(dsn) = dsn else {
        return;
    };

    SENTRY_GUARD.get_or_init(|| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                environment: Some(environment().into()),
                ..Default::default()
            },
        ))
    });
}

pub fn configure_user_scope(user: &SessionUser) {
    let sentry_user = sentry::User {
        id: Some(user.id.to_string()),
        username: user.name.clone(),
        email: user.email.clone(),
        ..Default::default()
    };

    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry_user));
    });
}

fn environment() -> &'static str {
    if cfg!(debug_assertions) {
        "dev"
    } else {
        "production"
    }
}

fn sentry_layer<S>() -> SentryLayer<S>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    SentryLayer::default().event_filter(|meta| match *meta.level() {
        Level::ERROR => EventFilter::Event,
        Level::DEBUG | Level::INFO | Level::WARN => EventFilter::Breadcrumb,
        Level::TRACE => EventFilter::Ignore,
    })
}
