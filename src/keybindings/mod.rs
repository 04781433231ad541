use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// All bindable actions in the popup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,
    MoveTop,
    MoveBottom,

    // History
    Capture,
    CopySelected,
    ClearHistory,

    // UI
    ToggleHelp,
    CloseHelp,
    Quit,

    // Dialog
    DismissDialog,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::MoveUp => "move_up",
            Action::MoveDown => "move_down",
            Action::MoveTop => "move_top",
            Action::MoveBottom => "move_bottom",
            Action::Capture => "capture",
            Action::CopySelected => "copy_selected",
            Action::ClearHistory => "clear_history",
            Action::ToggleHelp => "toggle_help",
            Action::CloseHelp => "close_help",
            Action::Quit => "quit",
            Action::DismissDialog => "dismiss_dialog",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "move_up" => Ok(Action::MoveUp),
            "move_down" => Ok(Action::MoveDown),
            "move_top" => Ok(Action::MoveTop),
            "move_bottom" => Ok(Action::MoveBottom),
            "capture" => Ok(Action::Capture),
            "copy_selected" => Ok(Action::CopySelected),
            "clear_history" => Ok(Action::ClearHistory),
            "toggle_help" => Ok(Action::ToggleHelp),
            "close_help" => Ok(Action::CloseHelp),
            "quit" => Ok(Action::Quit),
            "dismiss_dialog" => Ok(Action::DismissDialog),
            _ => Err(format!("Unknown action: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Shift is folded into the character for printable keys, so `G` matches
    /// whether or not the terminal reports the modifier.
    pub fn from_event(event: &KeyEvent) -> Self {
        let modifiers = match event.code {
            KeyCode::Char(_) => event.modifiers - KeyModifiers::SHIFT,
            _ => event.modifiers,
        };
        Self {
            code: event.code,
            modifiers,
        }
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();

        if self.modifiers.contains(KeyModifiers::CONTROL) {
            parts.push("C");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            parts.push("A");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            parts.push("S");
        }

        let key_str = match self.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
            KeyCode::Delete => "Del".to_string(),
            KeyCode::F(n) => format!("F{}", n),
            _ => format!("{:?}", self.code),
        };

        parts.push(&key_str);

        if parts.len() > 1 || key_str.len() > 1 {
            write!(f, "<{}>", parts.join("-"))
        } else {
            write!(f, "{}", key_str)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySequence(pub Vec<KeyBinding>);

impl KeySequence {
    pub fn is_single(&self) -> bool {
        self.0.len() == 1
    }
}

/// Parse key sequence: "c", "gg", "<C-l>", "g g", etc.
impl FromStr for KeySequence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut keys = Vec::new();
        let mut chars = s.trim().chars();

        while let Some(c) = chars.next() {
            if c == ' ' {
                continue;
            }

            if c == '<' {
                let mut bracket_content = String::from('<');
                for next in chars.by_ref() {
                    bracket_content.push(next);
                    if next == '>' {
                        break;
                    }
                }
                keys.push(bracket_content.parse::<KeyBinding>()?);
            } else {
                keys.push(KeyBinding::new(KeyCode::Char(c), KeyModifiers::NONE));
            }
        }

        if keys.is_empty() {
            return Err("Empty key sequence".to_string());
        }

        if keys.len() > 2 {
            return Err("Key sequences longer than 2 are not supported".to_string());
        }

        Ok(KeySequence(keys))
    }
}

impl FromStr for KeyBinding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Some(inner) = s.strip_prefix('<').and_then(|rest| rest.strip_suffix('>')) {
            return parse_bracket_notation(inner);
        }

        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(KeyBinding::new(KeyCode::Char(c), KeyModifiers::NONE)),
            _ => Err(format!("Invalid key binding: {}", s)),
        }
    }
}

fn parse_bracket_notation(s: &str) -> Result<KeyBinding, String> {
    let parts: Vec<&str> = s.split('-').collect();

    let mut modifiers = KeyModifiers::NONE;
    let mut key_part = "";

    for (i, part) in parts.iter().enumerate() {
        if i == parts.len() - 1 {
            key_part = part;
        } else {
            match part.to_uppercase().as_str() {
                "C" | "CTRL" | "CONTROL" => modifiers |= KeyModifiers::CONTROL,
                "A" | "ALT" | "M" | "META" => modifiers |= KeyModifiers::ALT,
                "S" | "SHIFT" => modifiers |= KeyModifiers::SHIFT,
                _ => return Err(format!("Unknown modifier: {}", part)),
            }
        }
    }

    let mut code = parse_key_code(key_part)?;

    // Events for printable keys arrive with shift already folded into the
    // character, so `<S-x>` has to match `X`.
    if let KeyCode::Char(c) = code
        && modifiers.contains(KeyModifiers::SHIFT)
    {
        modifiers -= KeyModifiers::SHIFT;
        code = KeyCode::Char(c.to_ascii_uppercase());
    }

    Ok(KeyBinding::new(code, modifiers))
}

fn parse_key_code(s: &str) -> Result<KeyCode, String> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    match s.to_lowercase().as_str() {
        "space" => Ok(KeyCode::Char(' ')),
        "tab" => Ok(KeyCode::Tab),
        "enter" | "return" | "cr" => Ok(KeyCode::Enter),
        "esc" | "escape" => Ok(KeyCode::Esc),
        "up" => Ok(KeyCode::Up),
        "down" => Ok(KeyCode::Down),
        "left" => Ok(KeyCode::Left),
        "right" => Ok(KeyCode::Right),
        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),
        "del" | "delete" => Ok(KeyCode::Delete),
        "pageup" | "pgup" => Ok(KeyCode::PageUp),
        "pagedown" | "pgdn" => Ok(KeyCode::PageDown),
        lower if lower.starts_with('f') => {
            let n: u8 = lower[1..]
                .parse()
                .map_err(|_| format!("Invalid F key: {}", s))?;
            Ok(KeyCode::F(n))
        }
        _ => Err(format!("Unknown key: {}", s)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyLookupResult {
    Action(Action),
    Pending,
    None,
}

#[derive(Debug, Clone)]
pub struct KeybindingCache {
    browse_single: HashMap<KeyBinding, Action>,
    browse_sequences: HashMap<KeyBinding, HashMap<KeyBinding, Action>>,
    browse_sequence_starters: HashSet<KeyBinding>,

    dialog_single: HashMap<KeyBinding, Action>,
}

impl KeybindingCache {
    pub fn from_config(config: &KeybindingsConfig) -> Self {
        let mut browse_single = HashMap::new();
        let mut browse_sequences: HashMap<KeyBinding, HashMap<KeyBinding, Action>> =
            HashMap::new();
        let mut browse_sequence_starters = HashSet::new();

        for (key_str, action_str) in &config.browse {
            if let (Ok(seq), Ok(action)) =
                (key_str.parse::<KeySequence>(), action_str.parse::<Action>())
            {
                if seq.is_single() {
                    browse_single.insert(seq.0[0], action);
                } else {
                    let first = seq.0[0];
                    let second = seq.0[1];
                    browse_sequence_starters.insert(first);
                    browse_sequences
                        .entry(first)
                        .or_default()
                        .insert(second, action);
                }
            }
        }

        let mut dialog_single = HashMap::new();
        for (key_str, action_str) in &config.dialog {
            if let (Ok(seq), Ok(action)) =
                (key_str.parse::<KeySequence>(), action_str.parse::<Action>())
                && seq.is_single()
            {
                dialog_single.insert(seq.0[0], action);
            }
        }

        Self {
            browse_single,
            browse_sequences,
            browse_sequence_starters,
            dialog_single,
        }
    }

    pub fn lookup_browse(&self, event: &KeyEvent, pending: Option<KeyBinding>) -> KeyLookupResult {
        let binding = KeyBinding::from_event(event);

        if let Some(first_key) = pending {
            if let Some(&action) = self
                .browse_sequences
                .get(&first_key)
                .and_then(|second_map| second_map.get(&binding))
            {
                return KeyLookupResult::Action(action);
            }
            return KeyLookupResult::None;
        }

        if self.browse_sequence_starters.contains(&binding) {
            return KeyLookupResult::Pending;
        }

        if let Some(&action) = self.browse_single.get(&binding) {
            return KeyLookupResult::Action(action);
        }

        KeyLookupResult::None
    }

    pub fn get_dialog_action(&self, event: &KeyEvent) -> Option<Action> {
        let binding = KeyBinding::from_event(event);
        self.dialog_single.get(&binding).copied()
    }

    /// Preferred key bound to `action` in browse mode, for hints in the UI.
    pub fn key_for(&self, action: Action) -> Option<KeyBinding> {
        let mut keys: Vec<KeyBinding> = self
            .browse_single
            .iter()
            .filter(|(_, bound)| **bound == action)
            .map(|(key, _)| *key)
            .collect();
        keys.sort_by_key(|key| (!matches!(key.code, KeyCode::Char(_)), key.to_string()));
        keys.into_iter().next()
    }
}

impl Default for KeybindingCache {
    fn default() -> Self {
        Self::from_config(&KeybindingsConfig::default())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeybindingsConfig {
    #[serde(default = "default_browse_bindings")]
    pub browse: HashMap<String, String>,

    #[serde(default = "default_dialog_bindings")]
    pub dialog: HashMap<String, String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            browse: default_browse_bindings(),
            dialog: default_dialog_bindings(),
        }
    }
}

impl KeybindingsConfig {
    /// Layers user bindings over the defaults, so a config only has to name
    /// the keys it changes.
    pub fn merge_with_defaults(self) -> Self {
        let mut browse = default_browse_bindings();
        browse.extend(self.browse);
        let mut dialog = default_dialog_bindings();
        dialog.extend(self.dialog);
        Self { browse, dialog }
    }
}

fn default_browse_bindings() -> HashMap<String, String> {
    let mut m = HashMap::new();

    m.insert("k".to_string(), "move_up".to_string());
    m.insert("j".to_string(), "move_down".to_string());
    m.insert("<Up>".to_string(), "move_up".to_string());
    m.insert("<Down>".to_string(), "move_down".to_string());
    m.insert("gg".to_string(), "move_top".to_string());
    m.insert("G".to_string(), "move_bottom".to_string());
    m.insert("<Home>".to_string(), "move_top".to_string());
    m.insert("<End>".to_string(), "move_bottom".to_string());
    m.insert("c".to_string(), "capture".to_string());
    m.insert("y".to_string(), "copy_selected".to_string());
    m.insert("<Enter>".to_string(), "copy_selected".to_string());
    m.insert("D".to_string(), "clear_history".to_string());
    m.insert("?".to_string(), "toggle_help".to_string());
    m.insert("<Esc>".to_string(), "close_help".to_string());
    m.insert("q".to_string(), "quit".to_string());

    m
}

fn default_dialog_bindings() -> HashMap<String, String> {
    let mut m = HashMap::new();

    m.insert("<Enter>".to_string(), "dismiss_dialog".to_string());
    m.insert("<Esc>".to_string(), "dismiss_dialog".to_string());
    m.insert("<Space>".to_string(), "dismiss_dialog".to_string());
    m.insert("y".to_string(), "dismiss_dialog".to_string());

    m
}
