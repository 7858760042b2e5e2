use anyhow::{Context, bail};
use colored::*;
use rangr_core::config::ParseOptions;
use tracing::warn;

use crate::commands::parse_range;
use crate::terminal::{colors, format, print};

pub fn mask(address: &str, mask: &str, or: bool, strict: bool, options: &ParseOptions) -> anyhow::Result<()> {
    let range = parse_range(address, options)?;
    let mask = parse_range(mask, options)?;

    let result = if or {
        range.bitwise_or(&mask)
    } else {
        range.mask(&mask)
    }
    .with_context(|| format!("cannot apply {mask} to {range}"))?;

    if strict && !result.sequential {
        bail!("masking {range} with {mask} does not give a contiguous range");
    }

    print::set_key_width(["input", "mask", "operation", "result", "sequential", "count"]);
    print::aligned_line("input", format::colored_range(&range));
    print::aligned_line("mask", format::colored_range(&mask));
    let operation = if or { "or" } else { "and" };
    print::aligned_line("operation", operation.color(colors::ACCENT));
    print::aligned_line("result", format::colored_range(&result.range));
    print::aligned_line("sequential", format::yes_no(result.sequential));
    if result.sequential {
        print::aligned_line("count", result.range.count().to_string().color(colors::ACCENT));
    } else {
        warn!("the result bounds enclose values the mask never produces");
    }
    Ok(())
}
