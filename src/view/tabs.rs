//! Open result tabs and the single active selection.

/// A named, closable view of one analysis result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub id: String,
    pub label: String,
}

/// Ordered set of open tabs. The active tab, when set, is always a member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabSet {
    open: Vec<Tab>,
    active: Option<String>,
}

impl TabSet {
    /// Opens `id` if absent and marks it active. Existing tabs keep their position.
    pub fn open(&mut self, id: &str, label: &str) {
        if !self.is_open(id) {
            self.open.push(Tab {
                id: id.to_string(),
                label: label.to_string(),
            });
        }
        self.active = Some(id.to_string());
    }

    /// Closes `id`. Returns false if it was not open.
    ///
    /// When the active tab is closed, activation moves to the most recently
    /// opened tab that remains, or to none.
    pub fn close(&mut self, id: &str) -> bool {
        let Some(position) = self.position(id) else {
            return false;
        };
        self.open.remove(position);

        if self.active.as_deref() == Some(id) {
            self.active = self.open.last().map(|tab| tab.id.clone());
        }
        true
    }

    /// Activates an already open tab. Returns false if `id` is not open.
    pub fn activate(&mut self, id: &str) -> bool {
        if self.is_open(id) {
            self.active = Some(id.to_string());
            true
        } else {
            false
        }
    }

    /// Moves activation one tab to the right, wrapping around.
    pub fn select_next(&mut self) {
        self.step(1);
    }

    /// Moves activation one tab to the left, wrapping around.
    pub fn select_previous(&mut self) {
        self.step(-1);
    }

    fn step(&mut self, delta: isize) {
        if self.open.is_empty() {
            return;
        }
        let len = self.open.len() as isize;
        let current = self
            .active
            .as_deref()
            .and_then(|id| self.position(id))
            .unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.active = Some(self.open[next].id.clone());
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Index of the active tab within [`TabSet::tabs`].
    pub fn active_index(&self) -> Option<usize> {
        self.active.as_deref().and_then(|id| self.position(id))
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.open
    }

    pub fn ids(&self) -> Vec<&str> {
        self.open.iter().map(|tab| tab.id.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.open.iter().position(|tab| tab.id == id)
    }
}
