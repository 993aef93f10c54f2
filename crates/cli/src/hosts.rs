use anyhow::Context;
use ferrous_wire_codec::{Header, Message, Question, ResourceRecord};
use ferrous_wire_domain::{RecordType, CLASS_IN};
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct HostAddrs {
    v4: Option<Ipv4Addr>,
    v6: Option<Ipv6Addr>,
}

/// Name-to-address table read from hosts-file text.
///
/// Each name keeps at most one IPv4 and one IPv6 address; a later line for
/// the same name and family replaces the earlier one.
#[derive(Debug, Clone, Default)]
pub struct HostsTable {
    entries: HashMap<String, HostAddrs>,
}

/// Parses one hosts line into its address and names.
///
/// Returns `None` for blank and comment-only lines, lines with no names and
/// lines whose first field is not an IP address.
pub fn parse_hosts_line(line: &str) -> Option<(IpAddr, Vec<String>)> {
    let line = match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    };

    let mut fields = line.split_whitespace();
    let addr = fields.next()?;
    let names: Vec<String> = fields.map(normalise).filter(|n| !n.is_empty()).collect();
    if names.is_empty() {
        return None;
    }

    match addr.parse::<IpAddr>() {
        Ok(ip) => Some((ip, names)),
        Err(_) => {
            warn!(address = addr, "Skipping hosts line with invalid address");
            None
        }
    }
}

fn normalise(name: &str) -> String {
    name.trim_end_matches('.').to_ascii_lowercase()
}

impl HostsTable {
    pub fn parse(text: &str) -> Self {
        let mut table = Self::default();

        for (ip, names) in text.lines().filter_map(parse_hosts_line) {
            for name in names {
                debug!(name = %name, address = %ip, "Adding hosts record");
                table.insert(name, ip);
            }
        }

        table
    }

    pub fn load(path: &str) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read hosts file {}", path))?;
        let table = Self::parse(&text);
        info!(path, names = table.len(), "Loaded hosts file");
        Ok(table)
    }

    pub fn insert(&mut self, name: impl AsRef<str>, ip: IpAddr) {
        let entry = self.entries.entry(normalise(name.as_ref())).or_default();
        match ip {
            IpAddr::V4(v4) => entry.v4 = Some(v4),
            IpAddr::V6(v6) => entry.v6 = Some(v6),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Address data for `question`, if the table can answer it.
    ///
    /// Only class IN questions of type A or AAAA are answered; the name is
    /// matched case-insensitively.
    pub fn lookup(&self, question: &Question) -> Option<Vec<u8>> {
        if question.qclass != CLASS_IN {
            return None;
        }
        let entry = self.entries.get(&normalise(&question.name))?;

        match RecordType::from_u16(question.qtype)? {
            RecordType::A => entry.v4.map(|ip| ip.octets().to_vec()),
            RecordType::AAAA => entry.v6.map(|ip| ip.octets().to_vec()),
            _ => None,
        }
    }

    /// Builds the reply to `query`.
    ///
    /// The reply echoes the query's ID, opcode, RD flag and questions, and
    /// carries one answer for every question the table can answer. Returns
    /// `None` when no question matches.
    pub fn answer(&self, query: &Message, ttl: u32) -> Option<Message> {
        let mut reply = Message::new(Header {
            id: query.header.id,
            qr: true,
            opcode: query.header.opcode,
            rd: query.header.rd,
            ..Default::default()
        });

        for question in &query.questions {
            reply.push_question(question.clone());
        }

        for question in &query.questions {
            if let Some(rdata) = self.lookup(question) {
                reply.push_answer(ResourceRecord::new(
                    question.name.clone(),
                    question.qtype,
                    question.qclass,
                    ttl,
                    rdata,
                ));
            }
        }

        if reply.answers().is_empty() {
            None
        } else {
            Some(reply)
        }
    }
}
