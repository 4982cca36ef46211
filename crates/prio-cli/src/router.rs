use std::fmt;

use prio_core::{Category, WorkStream};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewName {
    Add,
    Browse,
    Master,
}

impl ViewName {
    pub const ALL: [ViewName; 3] = [Self::Add, Self::Browse, Self::Master];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Browse => "browse",
            Self::Master => "master",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }
}

impl fmt::Display for ViewName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A view together with the scope it renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Add,
    Browse(WorkStream),
    Master,
}

impl View {
    pub fn name(&self) -> ViewName {
        match self {
            Self::Add => ViewName::Add,
            Self::Browse(_) => ViewName::Browse,
            Self::Master => ViewName::Master,
        }
    }

    pub fn title(&self) -> String {
        match self {
            Self::Add => "Add initiative".to_string(),
            Self::Browse(ws) => format!("{ws} initiatives"),
            Self::Master => "Prioritization matrix (all work streams)".to_string(),
        }
    }
}

/// Navigation request as typed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    To(ViewName),
    /// Jump to the browse view of one work stream.
    Browse(WorkStream),
}

impl Navigation {
    /// `add`, `master`, `browse`, or `browse <work stream>`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let (head, rest) = s.split_once(char::is_whitespace).unwrap_or((s, ""));
        let name = ViewName::parse(head)?;
        match (name, rest.trim()) {
            (ViewName::Browse, "") => Some(Self::To(ViewName::Browse)),
            (ViewName::Browse, ws) => WorkStream::from_label(ws).map(Self::Browse),
            (_, "") => Some(Self::To(name)),
            _ => None,
        }
    }
}

/// Which view is active. Browse remembers the last work stream it was scoped
/// to; nothing else carries over between views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    current: View,
    browse_scope: WorkStream,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    pub fn new() -> Self {
        Self::starting_at(View::Add)
    }

    pub fn starting_at(view: View) -> Self {
        let browse_scope = match view {
            View::Browse(ws) => ws,
            _ => WorkStream::ALL[0],
        };
        Self {
            current: view,
            browse_scope,
        }
    }

    pub fn current(&self) -> View {
        self.current
    }

    pub fn navigate(&mut self, nav: Navigation) -> View {
        self.current = match nav {
            Navigation::To(ViewName::Add) => View::Add,
            Navigation::To(ViewName::Master) => View::Master,
            Navigation::To(ViewName::Browse) => View::Browse(self.browse_scope),
            Navigation::Browse(ws) => {
                self.browse_scope = ws;
                View::Browse(ws)
            }
        };
        tracing::debug!(view = %self.current.name(), "navigated");
        self.current
    }
}
