//! Command flags and the driver options derived from them.

use thiserror::Error;

/// Flags in the order they were given, each with an optional value.
///
/// Setting a flag twice keeps its first position and the last value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Flags {
    entries: Vec<(String, Option<String>)>,
}

impl Flags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: Option<String>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// The value of `name`, if it was given with one.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_deref()))
    }
}

impl<N: Into<String>> FromIterator<(N, Option<String>)> for Flags {
    fn from_iter<I: IntoIterator<Item = (N, Option<String>)>>(iter: I) -> Self {
        let mut flags = Flags::new();
        for (name, value) in iter {
            flags.set(name, value);
        }
        flags
    }
}

/// Assembly dialects the generator can produce.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum Target {
    #[default]
    ProgCom,
}

impl Target {
    /// Look a target up by name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        name.eq_ignore_ascii_case("progcom").then_some(Target::ProgCom)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Unknown target assembly '{0}'")]
    UnknownTarget(String),
}

/// Configuration for a compilation run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompileConfig {
    pub target: Target,
    /// Output path; defaults to the initial file name plus `.txt`.
    pub out: Option<String>,
}

impl CompileConfig {
    /// Read `target` and `out`. Other flags belong to the caller.
    pub fn from_flags(flags: &Flags) -> Result<Self, ConfigError> {
        let target = match flags.value("target") {
            Some(name) => {
                Target::from_name(name).ok_or_else(|| ConfigError::UnknownTarget(name.to_string()))?
            }
            None => Target::default(),
        };
        Ok(CompileConfig {
            target,
            out: flags.value("out").map(str::to_string),
        })
    }

    pub fn output_path(&self, initial_file: &str) -> String {
        match &self.out {
            Some(out) => out.clone(),
            None => format!("{initial_file}.txt"),
        }
    }
}
