//! Custom assertions for chatsweep JSON output.
//!
//! Every JSON response is an envelope `{ badge?, content, suggestions? }`;
//! these helpers look inside `content`.

use anyhow::{Context, Result};
use serde_json::Value;

/// Assert that a paged listing holds the expected number of items.
pub fn assert_item_count(json: &Value, expected: usize) -> Result<()> {
    let items = json["content"]["items"]
        .as_array()
        .context("Expected 'content.items' array in JSON")?;

    if items.len() != expected {
        anyhow::bail!("Expected {} items, got {}", expected, items.len());
    }

    Ok(())
}

/// Ids of the items of a paged listing, in output order.
pub fn item_ids(json: &Value, id_field: &str) -> Result<Vec<String>> {
    let items = json["content"]["items"]
        .as_array()
        .context("Expected 'content.items' array in JSON")?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item[id_field]
                .as_str()
                .map(String::from)
                .with_context(|| format!("Item {} missing '{}'", i, id_field))
        })
        .collect()
}

/// Assert the batch summary counters of a delete response.
pub fn assert_batch_summary(json: &Value, succeeded: u64, failed: u64) -> Result<()> {
    let summary = &json["content"]["summary"];
    let got = (
        summary["succeeded"]
            .as_u64()
            .context("Expected 'content.summary.succeeded'")?,
        summary["failed"]
            .as_u64()
            .context("Expected 'content.summary.failed'")?,
    );

    if got != (succeeded, failed) {
        anyhow::bail!(
            "Expected {} succeeded / {} failed, got {} / {}",
            succeeded,
            failed,
            got.0,
            got.1
        );
    }

    Ok(())
}
