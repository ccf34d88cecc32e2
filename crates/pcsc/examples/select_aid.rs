//! Example showing how to select an application by AID
//!
//! Usage: `cargo run --example select_aid -- [AID hex]`

use scard_core::{Error, Transaction};
use scard_transport_pcsc::{PcscCard, PcscConfig, Scope};
use tracing_subscriber::EnvFilter;

/// PIV card application, used when no AID is given
const PIV: &str = "A000000308";

/// GET RESPONSE instruction
const INS_GET_RESPONSE: u8 = 0xC0;

/// Longest AID allowed by ISO 7816-4
const MAX_AID_LEN: usize = 16;

/// Decode a hex AID, rejecting anything that is not 1 to 16 bytes long
fn parse_aid(aid_hex: &str) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let aid = hex::decode(aid_hex)?;
    if aid.is_empty() || aid.len() > MAX_AID_LEN {
        return Err(format!("AID must be 1 to {MAX_AID_LEN} bytes, got {}", aid.len()).into());
    }
    Ok(aid)
}

/// Select an application by AID, following `61 xx` continuations with
/// GET RESPONSE until the card has returned everything.
///
/// `aid` must already be validated by [`parse_aid`].
fn select_aid(tx: &mut Transaction<'_, PcscCard>, aid: &[u8]) -> Result<Vec<u8>, Error> {
    let mut command = vec![0x00, 0xA4, 0x04, 0x00, aid.len() as u8];
    command.extend_from_slice(aid);
    command.push(0x00);

    let mut reply = tx.transmit(&command)?;
    let mut data = reply.data().to_vec();

    while let Some(remaining) = reply.remaining() {
        reply = tx.transmit(&[0x00, INS_GET_RESPONSE, 0x00, 0x00, remaining])?;
        data.extend_from_slice(reply.data());
    }

    Ok(data)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let aid_hex = std::env::args().nth(1).unwrap_or_else(|| PIV.to_string());
    let aid = parse_aid(&aid_hex)?;

    // Use a user-scope context, like most desktop tools do
    let ctx =
        scard_transport_pcsc::establish_with_config(PcscConfig::new().with_scope(Scope::User))?;

    // Use the first reader with a card
    let readers = ctx.service().reader_status()?;
    let Some(reader) = readers.iter().find(|r| r.has_card()) else {
        println!("No card present in any reader!");
        return Ok(());
    };
    println!("Using reader: {}", reader.name());

    let mut card = ctx.connect(reader.name())?;
    if let Ok(atr) = card.atr() {
        println!("ATR: {}", hex::encode_upper(&atr));
    }

    let mut tx = card.begin()?;
    println!("Selecting AID: {}", aid_hex);

    match select_aid(&mut tx, &aid) {
        Ok(data) => println!(
            "Selected successfully, {} data bytes returned: {}",
            data.len(),
            hex::encode_upper(&data)
        ),
        Err(Error::Apdu(e)) => println!("Selection failed: {}", e),
        Err(e) => return Err(e.into()),
    }

    tx.close()?;
    ctx.close()?;
    Ok(())
}
