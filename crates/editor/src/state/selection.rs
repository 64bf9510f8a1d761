use serde::Serialize;
use shared::{GroupId, ObjectId};

/// Object or group selection (the two modes are mutually exclusive)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    /// Object the gizmo and properties panel act on
    primary: Option<ObjectId>,
    /// Selected object IDs (in order of selection)
    selected: Vec<ObjectId>,
    /// Selected group; set only while no object is selected
    group: Option<GroupId>,
    /// Version counter for selection changes
    #[serde(skip)]
    version: u64,
}

impl SelectionState {
    /// Primary selected object
    pub fn primary(&self) -> Option<&ObjectId> {
        self.primary.as_ref()
    }

    /// All selected objects
    pub fn all(&self) -> &[ObjectId] {
        &self.selected
    }

    /// Selected group, if in group mode
    pub fn group(&self) -> Option<&GroupId> {
        self.group.as_ref()
    }

    /// Check if an object is selected
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    /// Number of selected objects
    pub fn count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty() && self.group.is_none()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Click behavior: plain click replaces the selection, multi-select
    /// (Ctrl/Shift click) toggles membership. Any object selection change
    /// leaves group mode.
    pub fn select_object(&mut self, id: Option<&str>, multi: bool) {
        match (id, multi) {
            (None, true) => return,
            (None, false) => {
                self.selected.clear();
                self.primary = None;
            }
            (Some(id), false) => {
                self.selected = vec![id.to_string()];
                self.primary = Some(id.to_string());
            }
            (Some(id), true) => {
                if let Some(pos) = self.selected.iter().position(|s| s == id) {
                    self.selected.remove(pos);
                    self.primary = self.selected.last().cloned();
                } else {
                    self.selected.push(id.to_string());
                    self.primary = Some(id.to_string());
                }
            }
        }
        self.group = None;
        self.version += 1;
    }

    /// Select a single object (clears previous selection)
    pub fn select(&mut self, id: ObjectId) {
        self.select_object(Some(&id), false);
    }

    /// Toggle selection (Ctrl+click behavior)
    pub fn toggle(&mut self, id: ObjectId) {
        self.select_object(Some(&id), true);
    }

    /// Enter group mode; `None` only leaves group mode
    pub fn select_group(&mut self, id: Option<&str>) {
        match id {
            Some(gid) => {
                self.selected.clear();
                self.primary = None;
                self.group = Some(gid.to_string());
            }
            None => self.group = None,
        }
        self.version += 1;
    }

    /// Clear all selection
    pub fn clear(&mut self) {
        if self.is_empty() && self.primary.is_none() {
            return;
        }
        self.selected.clear();
        self.primary = None;
        self.group = None;
        self.version += 1;
    }

    /// Drop a deleted object from the selection
    pub fn forget(&mut self, id: &str) {
        self.retain(|oid| oid != id, |_| true);
    }

    /// Keep only objects and groups that still exist. The primary falls back
    /// to the last remaining object.
    pub fn retain(&mut self, keep_object: impl Fn(&str) -> bool, keep_group: impl Fn(&str) -> bool) {
        let before = (self.selected.len(), self.group.is_some(), self.primary.clone());
        self.selected.retain(|id| keep_object(id));
        if self.primary.as_deref().is_some_and(|p| !self.is_selected(p)) {
            self.primary = self.selected.last().cloned();
        }
        if self.group.as_deref().is_some_and(|g| !keep_group(g)) {
            self.group = None;
        }
        if before != (self.selected.len(), self.group.is_some(), self.primary.clone()) {
            self.version += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(id: &str) -> String {
        id.to_string()
    }

    #[test]
    fn test_initial_empty() {
        let sel = SelectionState::default();
        assert!(sel.primary().is_none());
        assert!(sel.all().is_empty());
        assert!(sel.group().is_none());
        assert_eq!(sel.count(), 0);
    }

    #[test]
    fn test_select_single() {
        let mut sel = SelectionState::default();
        sel.select(s("a"));
        assert_eq!(sel.primary(), Some(&s("a")));
        assert_eq!(sel.count(), 1);
        assert!(sel.is_selected("a"));
    }

    #[test]
    fn test_select_clears_previous() {
        let mut sel = SelectionState::default();
        sel.select(s("a"));
        sel.select(s("b"));
        assert_eq!(sel.count(), 1);
        assert!(!sel.is_selected("a"));
        assert!(sel.is_selected("b"));
    }

    #[test]
    fn test_toggle_add_makes_newest_primary() {
        let mut sel = SelectionState::default();
        sel.select(s("a"));
        sel.toggle(s("b"));
        assert_eq!(sel.count(), 2);
        assert_eq!(sel.primary(), Some(&s("b")));
        assert_eq!(sel.all(), &[s("a"), s("b")]);
    }

    #[test]
    fn test_toggle_remove_falls_back_to_last() {
        let mut sel = SelectionState::default();
        sel.toggle(s("a"));
        sel.toggle(s("b"));
        sel.toggle(s("c"));
        sel.toggle(s("c"));
        assert_eq!(sel.primary(), Some(&s("b")));
        sel.toggle(s("a"));
        assert_eq!(sel.primary(), Some(&s("b")));
        sel.toggle(s("b"));
        assert!(sel.primary().is_none());
        assert_eq!(sel.count(), 0);
    }

    #[test]
    fn test_select_none_clears() {
        let mut sel = SelectionState::default();
        sel.toggle(s("a"));
        sel.toggle(s("b"));
        sel.select_object(None, false);
        assert_eq!(sel.count(), 0);
        assert!(sel.primary().is_none());
    }

    #[test]
    fn test_multi_select_none_is_noop() {
        let mut sel = SelectionState::default();
        sel.select(s("a"));
        let v = sel.version();
        sel.select_object(None, true);
        assert_eq!(sel.version(), v);
        assert!(sel.is_selected("a"));
    }

    #[test]
    fn test_group_mode_is_exclusive() {
        let mut sel = SelectionState::default();
        sel.toggle(s("a"));
        sel.toggle(s("b"));
        sel.select_group(Some("g"));
        assert_eq!(sel.group(), Some(&s("g")));
        assert_eq!(sel.count(), 0);
        assert!(sel.primary().is_none());

        sel.select(s("c"));
        assert!(sel.group().is_none());
        assert_eq!(sel.primary(), Some(&s("c")));
    }

    #[test]
    fn test_select_group_none_keeps_objects() {
        let mut sel = SelectionState::default();
        sel.select(s("a"));
        sel.select_group(None);
        assert!(sel.is_selected("a"));
    }

    #[test]
    fn test_clear() {
        let mut sel = SelectionState::default();
        sel.select(s("a"));
        sel.toggle(s("b"));
        sel.clear();
        assert_eq!(sel.count(), 0);
        assert!(sel.primary().is_none());
        let v = sel.version();
        sel.clear();
        assert_eq!(sel.version(), v);
    }

    #[test]
    fn test_forget_primary() {
        let mut sel = SelectionState::default();
        sel.toggle(s("a"));
        sel.toggle(s("b"));
        sel.forget("b");
        assert_eq!(sel.all(), &[s("a")]);
        assert_eq!(sel.primary(), Some(&s("a")));
    }

    #[test]
    fn test_retain_drops_vanished_group() {
        let mut sel = SelectionState::default();
        sel.select_group(Some("g"));
        let v = sel.version();
        sel.retain(|_| true, |g| g != "g");
        assert!(sel.group().is_none());
        assert!(sel.version() > v);
    }

    #[test]
    fn test_version_bumps_on_change() {
        let mut sel = SelectionState::default();
        sel.select(s("a"));
        sel.toggle(s("b"));
        assert_eq!(sel.version(), 2);
    }
}
