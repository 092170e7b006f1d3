//! Collapsible sidebar sections and the actions they expose.

use super::kind::AnalysisKind;

/// What an action entry triggers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Operation {
    Run(AnalysisKind),
    HealthCheck,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionEntry {
    pub label: &'static str,
    pub operation: Operation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: &'static str,
    pub title: &'static str,
    pub expanded: bool,
    pub actions: Vec<ActionEntry>,
}

/// A row of the flattened sidebar, as seen by the cursor.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SidebarRow<'a> {
    Header(&'a Section),
    Action(&'a ActionEntry),
}

/// The static set of sidebar sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sidebar {
    sections: Vec<Section>,
}

impl Default for Sidebar {
    fn default() -> Self {
        Self::new(default_sections())
    }
}

impl Sidebar {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// Flips the expanded flag of section `id`, returning the new state.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let section = self.sections.iter_mut().find(|s| s.id == id)?;
        section.expanded = !section.expanded;
        Some(section.expanded)
    }

    pub fn is_expanded(&self, id: &str) -> Option<bool> {
        self.sections.iter().find(|s| s.id == id).map(|s| s.expanded)
    }

    /// Section headers plus the actions of expanded sections, in display order.
    pub fn rows(&self) -> Vec<SidebarRow<'_>> {
        let mut rows = Vec::new();
        for section in &self.sections {
            rows.push(SidebarRow::Header(section));
            if section.expanded {
                rows.extend(section.actions.iter().map(SidebarRow::Action));
            }
        }
        rows
    }
}

pub fn default_sections() -> Vec<Section> {
    vec![
        Section {
            id: "signal",
            title: "Signal Analysis",
            expanded: true,
            actions: vec![ActionEntry {
                label: "FFT Features",
                operation: Operation::Run(AnalysisKind::Signals),
            }],
        },
        Section {
            id: "optimization",
            title: "Portfolio Optimization",
            expanded: true,
            actions: vec![
                ActionEntry {
                    label: "Classical Allocation",
                    operation: Operation::Run(AnalysisKind::Classical),
                },
                ActionEntry {
                    label: "Quantum Allocation (QAOA)",
                    operation: Operation::Run(AnalysisKind::Quantum),
                },
            ],
        },
        Section {
            id: "market",
            title: "Market Data",
            expanded: false,
            actions: vec![
                ActionEntry {
                    label: "Stock Prediction",
                    operation: Operation::Run(AnalysisKind::Stock),
                },
                ActionEntry {
                    label: "Portfolio Simulation",
                    operation: Operation::Run(AnalysisKind::Simulation),
                },
            ],
        },
        Section {
            id: "system",
            title: "System",
            expanded: false,
            actions: vec![ActionEntry {
                label: "Backend Health",
                operation: Operation::HealthCheck,
            }],
        },
    ]
}
