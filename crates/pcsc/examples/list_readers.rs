//! Example showing how to enumerate connected card readers

use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Connect to the PC/SC service
    let ctx = scard_transport_pcsc::establish()?;

    // List available readers along with their card status
    let readers = match ctx.service().reader_status() {
        Ok(readers) => readers,
        Err(e) if e.is_no_readers() => {
            println!("No readers found");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("Found {} readers:", readers.len());

    for (i, reader) in readers.iter().enumerate() {
        println!("{}. Reader: {}", i + 1, reader.name());

        if reader.has_card() {
            if let Some(atr) = reader.atr() {
                println!("   Card present, ATR: {}", hex::encode_upper(atr));
            } else {
                println!("   Card present, ATR: Unknown");
            }
        } else {
            println!("   No card present");
        }
    }

    ctx.close()?;
    Ok(())
}
