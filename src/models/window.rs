//! 窗口模型：Window → Pane → Tab
//!
//! 聚焦的 tab 只记录 id（查找用，不持有所有权），tab 被关闭后查找返回 None。

use super::document::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabId(pub u64);

pub enum TabKind {
    Edit(Document),
    Other,
}

pub struct Tab {
    id: TabId,
    title: String,
    kind: TabKind,
}

impl Tab {
    pub fn id(&self) -> TabId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn kind(&self) -> &TabKind {
        &self.kind
    }

    pub fn document(&self) -> Option<&Document> {
        match &self.kind {
            TabKind::Edit(doc) => Some(doc),
            TabKind::Other => None,
        }
    }

    pub fn document_mut(&mut self) -> Option<&mut Document> {
        match &mut self.kind {
            TabKind::Edit(doc) => Some(doc),
            TabKind::Other => None,
        }
    }
}

#[derive(Default)]
pub struct Pane {
    tabs: Vec<Tab>,
}

impl Pane {
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}

pub struct Window {
    id: WindowId,
    panes: Vec<Pane>,
    focussed_pane: usize,
    focussed_tab: Option<TabId>,
    next_tab_id: u64,
}

impl Window {
    pub fn new(id: WindowId) -> Self {
        Self {
            id,
            panes: vec![Pane::default()],
            focussed_pane: 0,
            focussed_tab: None,
            next_tab_id: 1,
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn panes(&self) -> &[Pane] {
        &self.panes
    }

    /// Opens a tab in the focussed pane. Focus is not moved; that goes
    /// through the application so sensitivities are refreshed.
    pub fn new_tab(&mut self, title: impl Into<String>, kind: TabKind) -> TabId {
        let id = TabId(self.next_tab_id);
        self.next_tab_id += 1;
        let pane = self.focussed_pane.min(self.panes.len() - 1);
        self.panes[pane].tabs.push(Tab {
            id,
            title: title.into(),
            kind,
        });
        id
    }

    pub fn split(&mut self) -> usize {
        self.panes.push(Pane::default());
        self.focussed_pane = self.panes.len() - 1;
        self.focussed_pane
    }

    pub fn tabs(&self) -> impl Iterator<Item = &Tab> {
        self.panes.iter().flat_map(|pane| pane.tabs.iter())
    }

    pub fn tab_ids(&self) -> Vec<TabId> {
        self.tabs().map(Tab::id).collect()
    }

    pub fn tab(&self, id: TabId) -> Option<&Tab> {
        self.tabs().find(|tab| tab.id == id)
    }

    pub fn tab_mut(&mut self, id: TabId) -> Option<&mut Tab> {
        self.panes
            .iter_mut()
            .flat_map(|pane| pane.tabs.iter_mut())
            .find(|tab| tab.id == id)
    }

    pub fn remove_tab(&mut self, id: TabId) -> Option<Tab> {
        for pane in &mut self.panes {
            if let Some(ix) = pane.tabs.iter().position(|tab| tab.id == id) {
                if self.focussed_tab == Some(id) {
                    self.focussed_tab = None;
                }
                return Some(pane.tabs.remove(ix));
            }
        }
        None
    }

    pub fn focussed_tab_id(&self) -> Option<TabId> {
        self.focussed_tab
    }

    pub fn focussed_tab(&self) -> Option<&Tab> {
        self.focussed_tab.and_then(|id| self.tab(id))
    }

    pub fn focussed_tab_mut(&mut self) -> Option<&mut Tab> {
        let id = self.focussed_tab?;
        self.tab_mut(id)
    }

    /// Returns false when `id` is not a tab of this window.
    pub(crate) fn set_focussed_tab(&mut self, id: TabId) -> bool {
        let pane = self
            .panes
            .iter()
            .position(|pane| pane.tabs.iter().any(|tab| tab.id == id));
        match pane {
            Some(pane) => {
                self.focussed_pane = pane;
                self.focussed_tab = Some(id);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/window.rs"]
mod tests;
