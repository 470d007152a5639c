//! Host collaborators: picker, status line and editor launchers.
//!
//! Commands only talk to these traits; the CLI wires up terminal
//! implementations and tests substitute scripted ones.

pub mod editor;
pub mod picker;
pub mod status;

pub use editor::{CommandLauncher, EditorLauncher, ExtensionLauncherSelector, LauncherSelector};
pub use picker::{Pick, Picker, TerminalPicker};
pub use status::{StatusLine, TerminalStatus};

/// The set of host services a command runs against.
pub struct Host {
    pub picker: Box<dyn Picker>,
    pub status: Box<dyn StatusLine>,
    pub launchers: Box<dyn LauncherSelector>,
}

impl Host {
    pub fn terminal(launchers: ExtensionLauncherSelector, color: bool) -> Self {
        Self {
            picker: Box::new(TerminalPicker::new(color)),
            status: Box::new(TerminalStatus::new(color)),
            launchers: Box::new(launchers),
        }
    }
}
