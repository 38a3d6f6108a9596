//! Looks up a part, backing off for as long as the service asks whenever the
//! request is throttled.
//!
//! ```sh
//! SWARM_API_KEY=... cargo run --example part_lookup -- LM358
//! ```

use swarm_client::observability::{init_tracing, LogConfig};
use swarm_client::SwarmClient;

const MAX_ATTEMPTS: usize = 20;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing(&LogConfig::default())?;

    let part_number = std::env::args().nth(1).unwrap_or_else(|| "LM358".to_string());

    println!("Swarm Api Test Console");
    println!("======================");

    let client = SwarmClient::from_env()?;

    for attempt in 1..=MAX_ATTEMPTS {
        let response = client.get_part_information(part_number.as_str()).await?;

        println!("Response:");
        println!("---------------");
        println!("IsSuccessful: {}", response.is_successful);
        println!("IsThrottled: {}", response.is_throttled);

        if response.is_throttled {
            println!("RetryAfter: {:?}", response.retry_after);
            tokio::time::sleep(response.retry_after).await;
            println!("-------------------");
            println!("Retrying... (attempt {})", attempt);
            continue;
        }

        if response.is_successful {
            let mut parts = response.payload.map(|r| r.parts).unwrap_or_default();
            parts.sort_by(|a, b| b.quantity_available.cmp(&a.quantity_available));

            println!("\nData\n-------------------");
            for part in parts.iter().take(5) {
                println!(
                    "{}: {}",
                    part.base_part_number.as_deref().unwrap_or_default(),
                    part.part_type.as_deref().unwrap_or_default()
                );
                println!("  Cost: {}", part.cost);
                println!("  Supplier: {}", part.supplier.as_deref().unwrap_or_default());
                println!(
                    "  Description: {}",
                    part.description.as_deref().unwrap_or_default()
                );
                println!(
                    "  Mfr: {} = {}",
                    part.manufacturer.as_deref().unwrap_or_default(),
                    part.manufacturer_part_number.as_deref().unwrap_or_default()
                );
                println!("  Keywords: {}", part.keywords.join(", "));
                println!("  Datasheets: {}", part.datasheet_urls.join(", "));
                println!("  QuantityAvailable: {}", part.quantity_available);
                println!();
            }
        } else {
            for (i, error) in response.errors.iter().enumerate() {
                println!(" [{}] {}", i + 1, error);
            }
        }
        break;
    }

    Ok(())
}
