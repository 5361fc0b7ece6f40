//! Type a key sequence on the panel keypad, then print the resulting state
//!
//! ```text
//! PANEL_HOST=192.168.1.50 cargo run --example keypad -- 1234#
//! ```

use alarmlink::{Panel, PanelConfig};
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let keys = std::env::args().nth(1).unwrap_or_else(|| "*".to_string());

    // One-shot: no background polling
    let config = PanelConfig::from_env()?.with_poll_interval(Duration::ZERO);
    let panel = Panel::new(config)?;
    panel.start().await?;

    println!("Sending {keys}...");
    panel.send_keys(&keys, true).await?;

    let snapshot = panel.snapshot();
    for area in snapshot.areas() {
        println!("area {}: {}", area.id, area.mode);
    }
    for zone in snapshot.zones().filter(|z| z.triggered) {
        println!("zone {} triggered", zone.id);
    }
    println!("panel clock: {}", snapshot.time());

    Ok(())
}
