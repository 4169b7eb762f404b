// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tree-style reports written through the logger.
//!
//! A report is a bold title followed by blocks of lines. The first line of
//! each block hangs off the tree; continuation lines sit under a vertical bar.

use std::{borrow::Cow, sync::Mutex};

use log::Level;

type Block = Vec<Cow<'static, str>>;

lazy_static::lazy_static! {
    /// Warnings gathered while arguments are parsed, shown together later.
    static ref PENDING_WARNINGS: Mutex<Vec<Block>> = Mutex::new(vec![]);
}

/// Lay out the blocks of a report, one string per output line (the title is
/// not included).
pub(super) fn render(blocks: &[Block]) -> Vec<String> {
    let mut lines = vec![];
    for (i_block, block) in blocks.iter().enumerate() {
        let branch = if i_block + 1 == blocks.len() && block.len() == 1 {
            '└'
        } else {
            '├'
        };
        for (i_line, line) in block.iter().enumerate() {
            let glyph = if i_line == 0 { branch } else { '│' };
            lines.push(format!("{glyph} {line}"));
        }
    }
    lines
}

fn emit(level: Level, title: &str, blocks: &[Block]) {
    log::log!(level, "{}", console::style(title).bold());
    for line in render(blocks) {
        log::log!(level, "{line}");
    }
    log::log!(level, "");
}

/// A titled report printed at info level.
pub(crate) struct InfoPrinter {
    title: Cow<'static, str>,
    blocks: Vec<Block>,
}

impl InfoPrinter {
    pub(crate) fn new(title: Cow<'static, str>) -> Self {
        Self {
            title,
            blocks: vec![],
        }
    }

    pub(crate) fn push_line(&mut self, line: Cow<'static, str>) {
        self.push_block(vec![line]);
    }

    pub(crate) fn push_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub(crate) fn display(self) {
        emit(Level::Info, &self.title, &self.blocks);
    }
}

fn pending_warnings() -> std::sync::MutexGuard<'static, Vec<Block>> {
    PENDING_WARNINGS
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Queue a message for [`display_warnings`].
pub(crate) trait Warn {
    fn warn(self);
}

impl<T: Into<Cow<'static, str>>> Warn for T {
    fn warn(self) {
        pending_warnings().push(vec![self.into()]);
    }
}

/// Print (and forget) the queued warnings. Nothing is printed when there are
/// none.
pub(crate) fn display_warnings() {
    let blocks = std::mem::take(&mut *pending_warnings());
    log::debug!("{} warning(s) queued", blocks.len());
    if !blocks.is_empty() {
        emit(Level::Warn, "Warnings", &blocks);
    }
}
