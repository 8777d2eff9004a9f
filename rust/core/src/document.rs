// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decoded document with a block-name index

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::model::{Block, RawLine, Record};
use crate::segmenter::segment;

/// A fully decoded INP file
///
/// Blocks keep their encounter order. The same block name may appear more
/// than once (eQUEST repeats headers such as `Chillers`); lookups by name
/// return every occurrence.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InpDocument {
    blocks: Vec<Block>,
    #[cfg_attr(feature = "serde", serde(skip))]
    index: FxHashMap<String, SmallVec<[usize; 2]>>,
}

impl InpDocument {
    /// Decode file content. Carriage returns are stripped.
    pub fn parse(content: &str) -> Result<Self> {
        let lines: Vec<RawLine> = content
            .split('\n')
            .enumerate()
            .map(|(i, line)| RawLine::new(i + 1, line.trim_end_matches('\r')))
            .collect();
        Self::from_lines(&lines)
    }

    /// Decode pre-split lines
    pub fn from_lines(lines: &[RawLine]) -> Result<Self> {
        Ok(Self::from_blocks(segment(lines)?))
    }

    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        let mut index: FxHashMap<String, SmallVec<[usize; 2]>> = FxHashMap::default();
        for (i, block) in blocks.iter().enumerate() {
            index.entry(block.name.clone()).or_default().push(i);
        }
        Self { blocks, index }
    }

    #[inline]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// All blocks with this name, in encounter order
    pub fn blocks_named<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Block> + 'a {
        self.index
            .get(name)
            .into_iter()
            .flat_map(|ids| ids.iter())
            .map(move |&i| &self.blocks[i])
    }

    /// Records of every block with this name
    pub fn records_in<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Record> + 'a {
        self.blocks_named(name).flat_map(|b| b.records.iter())
    }

    #[inline]
    pub fn has_block(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl std::str::FromStr for InpDocument {
    type Err = Error;

    fn from_str(content: &str) -> Result<Self> {
        Self::parse(content)
    }
}
