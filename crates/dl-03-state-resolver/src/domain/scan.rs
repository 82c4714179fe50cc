//! Decoding iterators over pool and chain.

use dl_02_pending_pool::LedgerState;
use shared_types::{codec, Document, Payload};
use tracing::warn;

/// Where a scanned document was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Pending,
    Sealed { block: u64 },
}

impl Location {
    pub fn is_pending(self) -> bool {
        self == Self::Pending
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScannedDocument {
    pub location: Location,
    pub document: Document,
}

/// Pool newest first, then blocks from the tip down, last transaction first.
pub fn newest_first(state: &LedgerState) -> impl Iterator<Item = ScannedDocument> + '_ {
    let pending = state
        .pool()
        .iter_newest_first()
        .map(|payload| (Location::Pending, payload));
    let sealed = state.chain().iter_newest_first().flat_map(|block| {
        block
            .transactions
            .iter()
            .rev()
            .map(move |payload| (Location::Sealed { block: block.index }, payload))
    });

    pending.chain(sealed).filter_map(decode_or_skip)
}

/// Genesis first, then every block in order, then the pool in admission order.
pub fn oldest_first(state: &LedgerState) -> impl Iterator<Item = ScannedDocument> + '_ {
    let sealed = state.chain().blocks().iter().flat_map(|block| {
        block
            .transactions
            .iter()
            .map(move |payload| (Location::Sealed { block: block.index }, payload))
    });
    let pending = state
        .pool()
        .entries()
        .iter()
        .map(|payload| (Location::Pending, payload));

    sealed.chain(pending).filter_map(decode_or_skip)
}

fn decode_or_skip((location, payload): (Location, &Payload)) -> Option<ScannedDocument> {
    match codec::decode(payload) {
        Ok(document) => Some(ScannedDocument { location, document }),
        Err(e) => {
            warn!("[dl-03] Skipping undecodable payload at {:?}: {}", location, e);
            None
        }
    }
}
