use super::count_policy;
use crate::input::emit;
use anyhow::{bail, Context};
use ferrous_wire_codec::{encode_with, Message, QueryIds};
use ferrous_wire_domain::{Config, RecordType};
use tracing::debug;

/// Parses a query type given by mnemonic (`AAAA`), generic form
/// (`TYPE65280`) or plain number.
pub fn parse_qtype(value: &str) -> Result<u16, String> {
    if let Ok(rtype) = value.parse::<RecordType>() {
        return Ok(rtype.to_u16());
    }

    let digits = value
        .get(..4)
        .filter(|prefix| prefix.eq_ignore_ascii_case("TYPE"))
        .map_or(value, |_| &value[4..]);

    digits
        .parse::<u16>()
        .map_err(|_| format!("Unknown record type '{}'", value))
}

/// Names listed one per line; blank lines are skipped.
pub fn parse_names(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub struct QueryArgs {
    pub names: Vec<String>,
    pub names_file: Option<String>,
    pub qtype: u16,
    pub id: Option<u16>,
    pub raw: bool,
}

/// Encodes one query per name. IDs run sequentially from `--id`, or from a
/// random starting point.
pub fn run(config: &Config, args: QueryArgs) -> anyhow::Result<()> {
    let mut names = args.names;
    if let Some(path) = &args.names_file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read names file {}", path))?;
        names.extend(parse_names(&text));
    }
    if names.is_empty() {
        bail!("No names to query (give NAME arguments or --names FILE)");
    }

    let mut ids = args.id.map(QueryIds::seeded).unwrap_or_default();
    let policy = count_policy(config);

    for name in &names {
        let id = ids.next_id();
        let message = Message::query(id, name.as_str(), args.qtype);
        let bytes = encode_with(&message, policy)?;

        debug!(id, name = %name, qtype = args.qtype, len = bytes.len(), "Built query");
        emit(&bytes, args.raw)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_qtype() {
        assert_eq!(parse_qtype("A"), Ok(1));
        assert_eq!(parse_qtype("aaaa"), Ok(28));
        assert_eq!(parse_qtype("TYPE65280"), Ok(65280));
        assert_eq!(parse_qtype("type99"), Ok(99));
        assert_eq!(parse_qtype("15"), Ok(15));
        assert!(parse_qtype("TYPE").is_err());
        assert!(parse_qtype("bogus").is_err());
        assert!(parse_qtype("70000").is_err());
    }

    #[test]
    fn test_parse_names() {
        let names = parse_names("  example.com \n\n\twww.example.org\n   \nlast.test");
        assert_eq!(names, vec!["example.com", "www.example.org", "last.test"]);
    }
}
