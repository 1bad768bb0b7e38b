use anyhow::{Context, Result};
use serde::Deserialize;
use slotgrid_core::{Command, Direction};
use std::{collections::VecDeque, fs, path::Path, time::Duration};

#[derive(Debug, Deserialize)]
struct CommandScriptFile {
    steps: Vec<CommandScriptStepDef>,
}

#[derive(Debug, Clone, Deserialize)]
struct CommandScriptStepDef {
    command: String,
}

/// One host-level input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostStep {
    /// Direct core command (clicks, save, navigation, ...).
    Command(Command),
    /// Key press routed through the bindings.
    Key(String),
    /// Viewport resize.
    Resize(u32),
    /// Clear request; `confirmed` is the user's answer to the confirmation prompt.
    Clear { confirmed: bool },
    /// Let host time pass (notification expiry).
    Wait(Duration),
}

/// Deterministic host input script.
///
/// Scripts are a JSON list of `{"command": "..."}` steps, executed in file order.
#[derive(Debug)]
pub struct CommandScriptPlayer {
    pending: VecDeque<HostStep>,
}

impl CommandScriptPlayer {
    /// Load a command script from a JSON file on disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read command script {}", path.display()))?;
        Self::from_str(&contents)
    }

    /// Load a command script from an in-memory JSON string.
    pub fn from_str(contents: &str) -> Result<Self> {
        let file: CommandScriptFile = serde_json::from_str(contents)?;
        if file.steps.is_empty() {
            anyhow::bail!("command script contains no steps");
        }

        let mut pending = VecDeque::with_capacity(file.steps.len());
        for (index, step) in file.steps.into_iter().enumerate() {
            let parsed = parse_step(&step.command)
                .with_context(|| format!("step {index}: `{}`", step.command))?;
            pending.push_back(parsed);
        }

        Ok(Self { pending })
    }

    pub fn next_step(&mut self) -> Option<HostStep> {
        self.pending.pop_front()
    }
}

/// Parse a single textual step such as `click 3` or `resize 320`.
pub fn parse_step(text: &str) -> Result<HostStep> {
    let mut parts = text.split_whitespace();
    let Some(verb) = parts.next() else {
        anyhow::bail!("empty command");
    };
    let arg = parts.next();
    if parts.next().is_some() {
        anyhow::bail!("too many arguments");
    }

    let step = match (verb.to_ascii_lowercase().as_str(), arg) {
        ("click", Some(slot)) => HostStep::Command(Command::PrimaryActivate(parse_num(slot)?)),
        ("right-click", Some(slot)) => {
            HostStep::Command(Command::SecondaryActivate(parse_num(slot)?))
        }
        ("hotbar", Some(digit)) => HostStep::Command(Command::HotbarDigit(parse_num(digit)?)),
        ("key", Some(name)) => HostStep::Key(name.to_string()),
        ("resize", Some(width)) => HostStep::Resize(parse_num(width)?),
        ("wait", Some(ms)) => HostStep::Wait(Duration::from_millis(parse_num(ms)?)),
        ("clear", None) => HostStep::Clear { confirmed: true },
        ("clear", Some("cancel")) => HostStep::Clear { confirmed: false },
        ("close", None) => HostStep::Command(Command::Close),
        ("enter", None) => HostStep::Command(Command::ActivateFocused),
        ("save", None) => HostStep::Command(Command::Save),
        ("load", None) => HostStep::Command(Command::Load),
        ("reload", None) => HostStep::Command(Command::Reload),
        ("exit", None) => HostStep::Command(Command::Exit),
        (word, None) => match Direction::parse(word) {
            Some(direction) => HostStep::Command(Command::Directional(direction)),
            None => anyhow::bail!("unknown command `{verb}`"),
        },
        _ => anyhow::bail!("unexpected argument for `{verb}`"),
    };
    Ok(step)
}

fn parse_num<T: std::str::FromStr>(raw: &str) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse::<T>()
        .with_context(|| format!("`{raw}` is not a valid number"))
}
