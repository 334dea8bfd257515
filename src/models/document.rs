//! 文档模型
//!
//! 职责：
//! - 文本存储（Rope）
//! - 光标、选区、滚动位置（字符偏移）
//! - 文件路径与光标处的词法作用域
//! - 可选的求值绑定（REPL 文档保存即提交）

use crate::kernel::repl::EvalBinding;
use ropey::{Rope, RopeSlice};
use std::borrow::Cow;
use std::io::{self, Write};
use std::ops::Range;
use std::path::{Path, PathBuf};

/// 从 RopeSlice 获取字符串，优先零拷贝
pub fn slice_to_cow(slice: RopeSlice<'_>) -> Cow<'_, str> {
    match slice.as_str() {
        Some(s) => Cow::Borrowed(s),
        None => Cow::Owned(slice.to_string()),
    }
}

pub struct Document {
    rope: Rope,
    cursor: usize,
    selection: Option<Range<usize>>,
    path: Option<PathBuf>,
    scope: Option<String>,
    scroll_line: usize,
    dirty: bool,
    binding: Option<EvalBinding>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::from_text("")
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: 0,
            selection: None,
            path: None,
            scope: None,
            scroll_line: 0,
            dirty: false,
            binding: None,
        }
    }

    pub fn open(path: &Path) -> io::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let mut doc = Self::from_text(&text);
        doc.path = Some(path.to_path_buf());
        Ok(doc)
    }

    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Replaces the whole text. Cursor and selection are clamped to the new length.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.cursor = self.cursor.min(self.rope.len_chars());
        self.selection = None;
        self.scroll_line = self.scroll_line.min(self.last_line());
        self.dirty = true;
    }

    pub fn insert(&mut self, char_offset: usize, text: &str) {
        let at = char_offset.min(self.rope.len_chars());
        self.rope.insert(at, text);
        if self.cursor >= at {
            self.cursor += text.chars().count();
        }
        self.dirty = true;
    }

    /// Inserts at the cursor and leaves the cursor after the inserted text.
    pub fn insert_at_cursor(&mut self, text: &str) {
        self.insert(self.cursor, text);
    }

    pub fn cursor_offset(&self) -> usize {
        self.cursor
    }

    pub fn set_cursor_offset(&mut self, offset: usize) {
        self.cursor = offset.min(self.rope.len_chars());
    }

    /// Zero-based line of the cursor.
    pub fn cursor_line(&self) -> usize {
        self.rope.char_to_line(self.cursor)
    }

    /// Zero-based column of the cursor within its line, in chars.
    pub fn cursor_line_offset(&self) -> usize {
        self.cursor - self.rope.line_to_char(self.cursor_line())
    }

    /// The cursor's line, including its trailing newline if there is one.
    pub fn current_line(&self) -> Cow<'_, str> {
        slice_to_cow(self.rope.line(self.cursor_line()))
    }

    pub fn selection_range(&self) -> Option<Range<usize>> {
        self.selection.clone()
    }

    pub fn set_selection(&mut self, range: Option<Range<usize>>) {
        let len = self.rope.len_chars();
        self.selection = range
            .map(|r| r.start.min(len)..r.end.min(len))
            .filter(|r| r.start < r.end);
    }

    pub fn has_selection(&self) -> bool {
        self.selection.is_some()
    }

    pub fn selection(&self) -> Option<String> {
        self.selection
            .as_ref()
            .map(|r| self.rope.slice(r.clone()).to_string())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn set_path(&mut self, path: Option<PathBuf>) {
        self.path = path;
    }

    /// Scope hierarchy at the cursor, e.g. `source.rust meta.function`.
    pub fn cursor_scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    pub fn set_cursor_scope(&mut self, scope: Option<String>) {
        self.scope = scope;
    }

    pub fn scroll_line(&self) -> usize {
        self.scroll_line
    }

    pub fn scroll_to_line(&mut self, line: usize) {
        self.scroll_line = line.min(self.last_line());
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn eval_binding(&self) -> Option<&EvalBinding> {
        self.binding.as_ref()
    }

    pub fn eval_binding_mut(&mut self) -> Option<&mut EvalBinding> {
        self.binding.as_mut()
    }

    pub fn set_eval_binding(&mut self, binding: Option<EvalBinding>) {
        self.binding = binding;
    }

    /// Persists the document.
    ///
    /// A document carrying an eval binding has no file behind it: saving
    /// submits the text to the binding and replaces it with the transcript.
    /// Otherwise the text is written to its path, if it has one.
    pub fn save(&mut self) -> io::Result<()> {
        if let Some(binding) = self.binding.as_mut() {
            let source = self.rope.to_string();
            let transcript = binding.submit(&source);
            self.rope = Rope::from_str(&transcript);
            self.cursor = self.cursor.min(self.rope.len_chars());
            self.selection = None;
        } else if let Some(path) = self.path.as_deref() {
            let mut file = io::BufWriter::new(std::fs::File::create(path)?);
            self.write_to(&mut file)?;
            file.flush()?;
        }
        self.dirty = false;
        Ok(())
    }

    /// 流式写入到 Writer，避免大文件 OOM
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for chunk in self.rope.chunks() {
            writer.write_all(chunk.as_bytes())?;
        }
        Ok(())
    }

    fn last_line(&self) -> usize {
        self.rope.len_lines().saturating_sub(1)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/document.rs"]
mod tests;
