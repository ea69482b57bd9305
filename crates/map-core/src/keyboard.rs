/// Global keyboard shortcuts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shortcut {
    /// Step through the key-cycle basemaps.
    CycleStyle,
    /// Back to polygon drawing.
    PolygonMode,
    /// Remove the selected drawings (select mode only).
    DeleteSelected,
}

#[inline]
pub fn shortcut_for_key(key: &str, shift: bool) -> Option<Shortcut> {
    match key {
        "A" | "a" if shift => Some(Shortcut::PolygonMode),
        "s" | "S" => Some(Shortcut::CycleStyle),
        "Delete" => Some(Shortcut::DeleteSelected),
        _ => None,
    }
}
