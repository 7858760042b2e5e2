use std::io::{self, BufRead};

use anyhow::Context;
use colored::*;
use rangr_core::config::ParseOptions;
use rangr_core::network::address_string::AddressString;
use rangr_core::network::order::{AddressComparator, Bucket};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::commands::OrderArg;
use crate::terminal::{colors, format, print};

pub fn sort(inputs: Vec<String>, order: OrderArg, options: &ParseOptions) -> anyhow::Result<()> {
    let inputs = if inputs.is_empty() { read_stdin()? } else { inputs };
    debug!(count = inputs.len(), "parsing inputs");

    let mut strings: Vec<AddressString> = inputs
        .par_iter()
        .map(|text| AddressString::new(text, options))
        .collect();

    let comparator = AddressComparator::new(order.into());
    strings.par_sort_by(|a, b| comparator.compare_strings(a, b));

    let invalid = strings.iter().filter(|s| s.bucket() == Bucket::Invalid).count();
    if invalid > 0 {
        warn!("{invalid} of {} inputs did not parse", strings.len());
    }

    let rows = strings.iter().map(row).collect();
    print::as_tree_one_level(rows);
    Ok(())
}

fn row(string: &AddressString) -> (String, ColoredString) {
    let key = format::bucket_name(string.bucket()).to_string();
    let value = match (string.address(), string.error()) {
        (Some(range), _) => format::colored_range(range),
        (None, Some(err)) => format!("{} ({})", string.text(), err.reason).color(colors::INVALID),
        (None, None) => format!("'{}'", string.text()).color(colors::MUTED),
    };
    (key, value)
}

fn read_stdin() -> anyhow::Result<Vec<String>> {
    io::stdin()
        .lock()
        .lines()
        .map(|line| line.context("failed to read stdin"))
        .filter(|line| !matches!(line, Ok(l) if l.trim().is_empty()))
        .collect()
}
