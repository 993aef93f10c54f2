pub mod answer;
pub mod decode;
pub mod query;

use ferrous_wire_codec::CountPolicy;
use ferrous_wire_domain::Config;

pub fn count_policy(config: &Config) -> CountPolicy {
    if config.codec.strict_counts {
        CountPolicy::Strict
    } else {
        CountPolicy::Derive
    }
}
