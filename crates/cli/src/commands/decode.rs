use crate::input::read_message;
use ferrous_wire_codec::{decode, hex_dump};
use ferrous_wire_domain::Config;
use tracing::{debug, info};

pub fn run(config: &Config, file: Option<&str>, hex: bool) -> anyhow::Result<()> {
    let bytes = read_message(file, hex, config.codec.max_message_size)?;
    debug!("Input:\n{}", hex_dump(&bytes));

    let message = decode(&bytes)?;
    info!(
        id = message.header.id,
        questions = message.questions.len(),
        records = message.resources.len(),
        "Decoded message"
    );

    print!("{}", message);
    Ok(())
}
