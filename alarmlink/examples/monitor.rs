//! Print every panel change until Ctrl-C
//!
//! ```text
//! PANEL_HOST=192.168.1.50 RUST_LOG=alarmlink=debug cargo run --example monitor
//! ```

use alarmlink::{Entity, Panel, PanelConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = PanelConfig::from_env()?;
    let panel = Panel::new(config)?;

    panel.add_state_listener(|id, entity| match entity {
        Entity::Zone(zone) => println!(
            "{id}: triggered={} enabled={}",
            zone.triggered, zone.enabled
        ),
        Entity::Area(area) => println!("{id}: {}", area.mode),
        Entity::Output(output) => println!("{id}: {}", if output.on { "on" } else { "off" }),
        Entity::Siren(siren) => println!("{id}: {}", if siren.on { "sounding" } else { "quiet" }),
        Entity::Time(time) => println!("panel clock: {time}"),
    });

    panel.add_raw_data_listener(|data| {
        println!("other data: {}", hex::encode(&data));
    });

    panel.start().await?;
    println!("Monitoring, press Ctrl-C to exit");

    tokio::signal::ctrl_c().await?;
    panel.stop();

    Ok(())
}
