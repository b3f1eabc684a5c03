//! `leadboard` entry point: seeds the data directory, optionally opens a
//! session, and keeps the lead feed refreshed until Ctrl-C.

use std::sync::Arc;

use camino::Utf8PathBuf;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use leadboard::config::{LeadboardSettings, LogFormat};
use leadboard::domain::ports::{KeyValueStore, SeedSource};
use leadboard::domain::views::LeadFilter;
use leadboard::domain::{Actor, LeadDataService, LoginCredentials, RecordStore};
use leadboard::inbound::{FeedRefresh, spawn_feed_refresh};
use leadboard::outbound::{FileStore, RandomSeedSource};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let settings = LeadboardSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load settings: {err}"))?;
    install_tracing(settings.log_format()?);

    let data_dir = Utf8PathBuf::from_path_buf(settings.data_dir())
        .map_err(|path| eyre!("data directory {} is not valid UTF-8", path.display()))?;
    let store = FileStore::open(&data_dir)?;
    let service = LeadDataService::new(
        RecordStore::new(Arc::new(store), settings.payload_policy()),
        Arc::new(RandomSeedSource::new(settings.seed)),
    );

    let outcome = service
        .initialize_data()
        .wrap_err("failed to initialise lead data")?;
    info!(data_dir = %data_dir, ?outcome, "lead data ready");

    let viewer = open_session(&service, &settings)?;
    run_feed(service, viewer, &settings).await
}

fn install_tracing(format: LogFormat) {
    let builder = fmt().with_env_filter(EnvFilter::from_default_env());
    let result = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}

fn open_session<S, G>(
    service: &LeadDataService<S, G>,
    settings: &LeadboardSettings,
) -> Result<Option<Actor>>
where
    S: KeyValueStore,
    G: SeedSource,
{
    let Some((username, password)) = settings.credentials() else {
        return Ok(None);
    };
    let credentials = LoginCredentials::try_from_parts(username, password)
        .wrap_err("invalid startup credentials")?;
    let actor = service
        .login(&credentials)
        .wrap_err("startup login failed")?;
    info!(user = %actor.name, organization = %actor.organization, "session opened");
    Ok(Some(actor))
}

async fn run_feed<S, G>(
    service: LeadDataService<S, G>,
    viewer: Option<Actor>,
    settings: &LeadboardSettings,
) -> Result<()>
where
    S: KeyValueStore + 'static,
    G: SeedSource + 'static,
{
    let (_filter_tx, filter_rx) = watch::channel(LeadFilter::default());
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let FeedRefresh {
        handle,
        mut snapshots,
    } = spawn_feed_refresh(
        service,
        viewer,
        filter_rx,
        settings.refresh_interval(),
        shutdown_rx,
    );

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    loop {
        tokio::select! {
            signal = &mut ctrl_c => {
                signal.wrap_err("failed to listen for Ctrl-C")?;
                break;
            }
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let stats = snapshots.borrow_and_update().stats;
                info!(
                    total = stats.total,
                    unlocked = stats.unlocked,
                    assigned = stats.assigned,
                    liked = stats.liked,
                    disliked = stats.disliked,
                    "feed snapshot"
                );
            }
        }
    }

    info!("shutting down");
    shutdown_tx.send_replace(true);
    handle.await.wrap_err("feed refresh task panicked")?;
    Ok(())
}
