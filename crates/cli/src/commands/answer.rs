use super::count_policy;
use crate::hosts::HostsTable;
use crate::input::{emit, read_message};
use anyhow::Context;
use ferrous_wire_codec::{decode, encode_with, hex_dump};
use ferrous_wire_domain::Config;
use tracing::{debug, info, warn};

pub fn run(config: &Config, query: Option<&str>, hex: bool, raw: bool) -> anyhow::Result<()> {
    let hosts_path = config
        .hosts
        .path
        .as_deref()
        .context("No hosts file given (use --hosts or [hosts] path)")?;
    let table = HostsTable::load(hosts_path)?;
    if table.is_empty() {
        warn!(path = hosts_path, "Hosts file has no usable entries");
    }

    let bytes = read_message(query, hex, config.codec.max_message_size)?;
    let query = decode(&bytes)?;
    debug!("Query:\n{}{}", hex_dump(&bytes), query);

    if query.questions.is_empty() {
        info!(id = query.header.id, "Skipping query without questions");
        return Ok(());
    }

    let Some(reply) = table.answer(&query, config.hosts.ttl) else {
        info!(id = query.header.id, "No matching hosts entry, no reply");
        return Ok(());
    };

    let encoded = encode_with(&reply, count_policy(config))?;
    info!(
        id = reply.header.id,
        answers = reply.answers().len(),
        len = encoded.len(),
        "Answered query"
    );
    debug!("Reply:\n{}", reply);

    emit(&encoded, raw)
}
