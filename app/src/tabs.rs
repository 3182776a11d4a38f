//! Sheet tabs along the bottom of the workspace.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetTab {
    pub id: String,
    pub name: String,
}

impl SheetTab {
    fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

/// Ordered tabs with exactly one active.
#[derive(Debug, Clone)]
pub struct SheetTabs {
    tabs: Vec<SheetTab>,
    active: usize,
    /// Number for the next "Spreadsheet N"
    next_number: u32,
}

impl Default for SheetTabs {
    fn default() -> Self {
        Self {
            tabs: vec![
                SheetTab::new("financial-overview", "Q3 Financial Overview"),
                SheetTab::new("abc", "ABC"),
                SheetTab::new("answer-question", "Answer a question"),
                SheetTab::new("extract", "Extract"),
                SheetTab::new("spreadsheet-3", "Spreadsheet 3"),
            ],
            active: 4,
            next_number: 4,
        }
    }
}

impl SheetTabs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tabs(&self) -> &[SheetTab] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn active(&self) -> &SheetTab {
        &self.tabs[self.active]
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Make the tab with `id` active. Unknown ids leave the active tab alone.
    pub fn activate(&mut self, id: &str) -> bool {
        match self.tabs.iter().position(|t| t.id == id) {
            Some(idx) => {
                self.active = idx;
                true
            }
            None => false,
        }
    }

    /// Append a new "Spreadsheet N" tab and make it active.
    pub fn add_tab(&mut self) -> &SheetTab {
        let n = self.next_number;
        self.next_number += 1;

        self.tabs.push(SheetTab {
            id: format!("spreadsheet-{}", n),
            name: format!("Spreadsheet {}", n),
        });
        self.active = self.tabs.len() - 1;
        &self.tabs[self.active]
    }
}
