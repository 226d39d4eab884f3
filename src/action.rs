#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit following the configured export policy.
    RequestQuit,
    /// Answer to the export prompt shown on quit.
    ConfirmExport(bool),
    /// Leave immediately, skipping any export.
    ForceQuit,
    ExportNow,
    CycleSortMode,
    CycleTheme,
    ToggleHelp,
    Refresh,
    None,
}
