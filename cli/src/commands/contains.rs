use rangr_core::config::ParseOptions;

use crate::commands::parse_range;
use crate::terminal::{format, print};

pub fn contains(container: &str, addresses: &[String], options: &ParseOptions) -> anyhow::Result<()> {
    let outer = parse_range(container, options)?;
    let inner = addresses
        .iter()
        .map(|text| parse_range(text, options))
        .collect::<anyhow::Result<Vec<_>>>()?;

    print::tree_head(0, &outer.to_string());
    let rows = inner
        .iter()
        .map(|range| (range.to_string(), format::yes_no(outer.contains(range))))
        .collect();
    print::as_tree_one_level(rows);
    Ok(())
}
