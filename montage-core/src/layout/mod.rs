//! Grid placement for small (1x1) and large (2x2) tiles.
//!
//! Entries are laid out row-major in input order. A large tile occupies two
//! adjacent columns of two row-adjacent rows and never wraps past the last
//! column. When the current row has no adjacent pair of open columns left,
//! the packer pulls the last small entry still waiting ahead of the large
//! one; if no small entry remains, one open column is blanked permanently
//! and the large entry retries, landing on a later row.

use std::collections::VecDeque;

use anyhow::Result;
use log::debug;

use crate::error::MontageError;
use crate::manifest::Entry;

/// One cell of a row still being built. `Open` is eligible for placement;
/// `Blank` is permanently unfillable.
#[derive(Debug, Clone)]
enum Slot<A> {
    Open,
    Filled(A),
    Blank,
}

impl<A> Slot<A> {
    fn is_open(&self) -> bool {
        matches!(self, Slot::Open)
    }

    /// Any slot still open when its row is flushed pads out as a blank cell.
    fn into_tile(self) -> Tile<A> {
        match self {
            Slot::Filled(a) => Tile::Art(a),
            Slot::Open | Slot::Blank => Tile::Blank,
        }
    }
}

/// One cell of the finished sheet, row-major. `Blank` renders as a
/// transparent cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tile<A> {
    Art(A),
    Blank,
}

/// The four tiles of a rendered large entry.
#[derive(Debug, Clone)]
pub struct Quad<A> {
    pub tl: A,
    pub tr: A,
    pub bl: A,
    pub br: A,
}

/// Rendering collaborator: turns an entry into cell-sized artifacts.
///
/// `pack` calls these exactly once per entry, at the moment the entry
/// actually lands in the grid; a large entry deferred by the edge-fit rule
/// is not rendered until its retry succeeds.
pub trait TileSource {
    type Artifact;

    fn small(&mut self, entry: &Entry) -> Result<Self::Artifact>;
    fn large(&mut self, entry: &Entry) -> Result<Quad<Self::Artifact>>;
}

/// Row buffers plus the flushed output accumulator.
///
/// `current` is the row being filled; `next` is the row directly below it,
/// pre-filled by the bottom halves of large tiles. Both always have length
/// `width`.
struct Grid<A> {
    width: usize,
    current: Vec<Slot<A>>,
    next: Vec<Slot<A>>,
    flushed: Vec<Tile<A>>,
}

fn fresh_row<A>(width: usize) -> Vec<Slot<A>> {
    (0..width).map(|_| Slot::Open).collect()
}

impl<A> Grid<A> {
    fn new(width: usize) -> Self {
        Self {
            width,
            current: fresh_row(width),
            next: fresh_row(width),
            flushed: Vec::new(),
        }
    }

    /// Flush full rows and rotate `next` up until the current row has an
    /// open slot again; returns the leftmost open column.
    fn open_column(&mut self) -> usize {
        loop {
            if let Some(idx) = self.current.iter().position(Slot::is_open) {
                return idx;
            }
            let row = std::mem::replace(&mut self.next, fresh_row(self.width));
            let done = std::mem::replace(&mut self.current, row);
            self.flushed.extend(done.into_iter().map(Slot::into_tile));
        }
    }

    /// Leftmost column `c` with both `c` and `c+1` open in the current row.
    /// A column below an open slot is always open too, so the pair is also
    /// free in `next`.
    fn open_pair(&self) -> Option<usize> {
        self.current
            .windows(2)
            .position(|w| w[0].is_open() && w[1].is_open())
    }

    fn place_small(&mut self, idx: usize, art: A) {
        self.current[idx] = Slot::Filled(art);
    }

    fn place_large(&mut self, idx: usize, quad: Quad<A>) {
        self.current[idx] = Slot::Filled(quad.tl);
        self.current[idx + 1] = Slot::Filled(quad.tr);
        self.next[idx] = Slot::Filled(quad.bl);
        self.next[idx + 1] = Slot::Filled(quad.br);
    }

    fn blank(&mut self, idx: usize) {
        self.current[idx] = Slot::Blank;
    }

    /// Flush the current row (open slots pad out blank), then the prefix of
    /// `next` up to its highest filled column. A wholly empty tail of the
    /// final partial row is dropped.
    fn finish(self) -> Vec<Tile<A>> {
        let Grid { current, next, mut flushed, .. } = self;
        flushed.extend(current.into_iter().map(Slot::into_tile));
        if let Some(last) = next.iter().rposition(|s| matches!(s, Slot::Filled(_))) {
            flushed.extend(next.into_iter().take(last + 1).map(Slot::into_tile));
        }
        flushed
    }
}

/// Arrange `entries` into a `width`-column grid, rendering each through
/// `source`, and return the flushed row-major cell sequence.
///
/// Relative input order is preserved except for one rule: a large entry
/// that cannot fit in the current row swaps processing order with the last
/// small entry still queued. No entry is ever dropped.
pub fn pack<S: TileSource>(
    entries: Vec<Entry>,
    width: usize,
    source: &mut S,
) -> Result<Vec<Tile<S::Artifact>>> {
    if width < 2 {
        return Err(MontageError::TileWidthTooSmall { width }.into());
    }
    let mut queue: VecDeque<Entry> = entries.into();
    let mut grid = Grid::new(width);

    while let Some(entry) = queue.pop_front() {
        let idx = grid.open_column();
        if !entry.is_large() {
            let art = source.small(&entry)?;
            grid.place_small(idx, art);
            continue;
        }
        match grid.open_pair() {
            Some(pair) => {
                let quad = source.large(&entry)?;
                grid.place_large(pair, quad);
            }
            // No room for a 2-wide block in this row. Pull the last queued
            // small entry ahead of this one; failing that, give up one open
            // column for good and retry on a later row.
            None => match last_small(&mut queue) {
                Some(small) => {
                    debug!("promoting '{}' ahead of large '{}'", small.title, entry.title);
                    queue.push_front(entry);
                    queue.push_front(small);
                }
                None => {
                    debug!("no small entry left to promote; blanking column {idx}");
                    grid.blank(idx);
                    queue.push_front(entry);
                }
            },
        }
    }
    Ok(grid.finish())
}

/// Remove and return the last small entry in the queue, searching from the
/// back so the relative order of everything else is disturbed as little as
/// possible.
fn last_small(queue: &mut VecDeque<Entry>) -> Option<Entry> {
    queue
        .iter()
        .rposition(|e| !e.is_large())
        .and_then(|idx| queue.remove(idx))
}
