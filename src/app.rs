use std::io;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use chrono::Local;

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::error::AppError;
use crate::ledger::Store;
use crate::schedule::next_rollover;
use crate::service::{Inbound, Service, ServiceOptions};
use crate::transport::{SharedTransport, StdoutTransport};

pub(crate) fn run(cli: Cli, config: Config) -> Result<(), AppError> {
    let store_path = cli
        .store
        .or_else(|| config.store.clone())
        .unwrap_or_else(Store::default_path);
    let store = Store::new(store_path);
    let service = Arc::new(Service::new(store.clone(), ServiceOptions::from(&config)));
    let transport: SharedTransport = Arc::new(StdoutTransport);

    match cli.command {
        Commands::Apply {
            group,
            user,
            name,
            message,
        } => {
            let text = match message {
                Some(text) => text,
                None => io::read_to_string(io::stdin()).map_err(AppError::Stdin)?,
            };
            let result = service.handle_message(
                &Inbound {
                    group_id: &group,
                    user_id: &user,
                    display_name: name.as_deref(),
                    text: text.trim(),
                },
                &transport,
            );
            // Join any repeater the message may have started; a one-shot
            // process cannot host it past exit anyway.
            service.stop_debug();
            result
        }
        Commands::Rollover => service.rollover_now(transport.as_ref()),
        Commands::Watch { interval } => watch(&service, &transport, &config, interval),
        Commands::Show { group } => show(&store, group.as_deref()),
    }
}

/// Foreground scheduler loop: fixed ticks, or the monthly day/hour from
/// config when no interval is given.
fn watch(
    service: &Arc<Service>,
    transport: &SharedTransport,
    config: &Config,
    interval: Option<u64>,
) -> Result<(), AppError> {
    match interval {
        Some(0) => Err(AppError::InvalidInterval {
            input: "0".to_string(),
        }),
        Some(secs) => loop {
            thread::sleep(Duration::from_secs(secs));
            service.rollover_now(transport.as_ref())?;
        },
        None => loop {
            let now = Local::now().naive_local();
            let next = next_rollover(now, config.rollover_day(), config.rollover_hour());
            eprintln!("Next close-out at {next}");
            let wait = (next - now).to_std().unwrap_or_default();
            thread::sleep(wait);
            service.rollover_now(transport.as_ref())?;
        },
    }
}

fn show(store: &Store, group: Option<&str>) -> Result<(), AppError> {
    let ledger = store.load().map_err(AppError::Store)?;
    let json = match group {
        Some(group_id) => {
            let group = ledger
                .groups
                .get(group_id)
                .ok_or_else(|| AppError::UnknownGroup {
                    group: group_id.to_string(),
                })?;
            serde_json::to_string_pretty(group)
        }
        None => serde_json::to_string_pretty(&ledger),
    }
    .map_err(crate::error::StoreError::Encode)?;
    println!("{json}");
    Ok(())
}
