//! # Chain
//!
//! The append-only sequence of sealed blocks. Always holds a genesis block.

use shared_types::{Block, LedgerError, Payload, Result, Timestamp};

use super::block::seal_block;
use super::validation::{verify_block, verify_chain, verify_link};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    blocks: Vec<Block>,
}

impl Chain {
    /// Start a chain from its genesis block.
    pub fn new(genesis: Block) -> Self {
        Self {
            blocks: vec![genesis],
        }
    }

    /// Adopt a loaded chain after full validation.
    pub fn from_blocks(blocks: Vec<Block>) -> Result<Self> {
        verify_chain(&blocks)?;
        Ok(Self { blocks })
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// False for every constructed chain: `new` seeds the genesis block and
    /// `from_blocks` rejects an empty sequence.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get_block(&self, index: u64) -> Result<&Block> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.blocks.get(i))
            .ok_or_else(|| LedgerError::not_found("block", index.to_string()))
    }

    pub fn last_block(&self) -> &Block {
        // Constructors guarantee at least the genesis block.
        &self.blocks[self.blocks.len() - 1]
    }

    /// Seal `pending` on top of the current tip. The tip is re-verified first
    /// so a corrupted tip is never extended.
    pub fn seal_next(&self, pending: Vec<Payload>, now: Timestamp) -> Result<Block> {
        let tip = self.last_block();
        verify_block(tip)?;
        seal_block(tip, pending, now)
    }

    /// Append a block that must link to the current tip.
    pub fn append(&mut self, block: Block) -> Result<()> {
        verify_block(&block)?;
        verify_link(self.last_block(), &block)?;
        self.blocks.push(block);
        Ok(())
    }

    /// Blocks from newest to oldest.
    pub fn iter_newest_first(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().rev()
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }
}
