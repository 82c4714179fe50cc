//! Human-readable chain dumps for the `print-chain` and `demo` commands.

use std::fmt::Write;

use serde_json::Value;
use shared_types::{Block, BlockHeader};

/// Render every block header followed by its decoded transactions.
pub fn render_chain(blocks: &[Block]) -> String {
    let mut out = String::new();
    for block in blocks {
        let header = BlockHeader::from(block);
        let _ = writeln!(
            out,
            "Block #{} ({} transactions)\n  timestamp:    {}\n  hash:         {}\n  previousHash: {}\n  merkleRoot:   {}",
            header.index,
            header.transaction_count,
            header.timestamp.to_rfc3339(),
            header.hash,
            header.previous_block_hash,
            header.merkle_root,
        );
        for (position, payload) in block.transactions.iter().enumerate() {
            let rendered = serde_json::from_slice::<Value>(payload.as_bytes())
                .ok()
                .and_then(|value| serde_json::to_string_pretty(&value).ok())
                .unwrap_or_else(|| format!("<{} undecodable bytes>", payload.len()));
            let _ = writeln!(out, "  tx {position}:");
            for line in rendered.lines() {
                let _ = writeln!(out, "    {line}");
            }
        }
    }
    out
}
