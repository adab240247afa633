#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutKey {
    Character(char),
    Enter,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShortcutModifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl ShortcutModifiers {
    pub const fn new(ctrl: bool, shift: bool, alt: bool) -> Self {
        Self { ctrl, shift, alt }
    }

    pub const fn alt_only() -> Self {
        Self::new(false, false, true)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputContext {
    pub dialog_open: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    DialogConfirm,
    DialogCancel,
    CanvasSave,
    CanvasChooseColor,
}

fn resolve_dialog_shortcut(key: ShortcutKey) -> Option<ShortcutAction> {
    match key {
        ShortcutKey::Enter => Some(ShortcutAction::DialogConfirm),
        ShortcutKey::Escape => Some(ShortcutAction::DialogCancel),
        _ => None,
    }
}

fn resolve_canvas_shortcut(
    key: ShortcutKey,
    modifiers: ShortcutModifiers,
) -> Option<ShortcutAction> {
    match (key, modifiers.alt, modifiers.ctrl, modifiers.shift) {
        (ShortcutKey::Character('s'), true, false, false) => Some(ShortcutAction::CanvasSave),
        (ShortcutKey::Character('c'), true, false, false) => {
            Some(ShortcutAction::CanvasChooseColor)
        }
        _ => None,
    }
}

pub fn resolve_shortcut(
    key: ShortcutKey,
    modifiers: ShortcutModifiers,
    context: InputContext,
) -> Option<ShortcutAction> {
    if context.dialog_open {
        return resolve_dialog_shortcut(key);
    }

    resolve_canvas_shortcut(key, modifiers)
}
