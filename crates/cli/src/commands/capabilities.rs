//! Family capability table

use anyhow::Result;

use crate::commands::profile::parse_family;
use crate::output;

pub fn execute(family: &str, json: bool) -> Result<()> {
    let family = parse_family(family)?;
    output::print_capabilities(family, json)
}
