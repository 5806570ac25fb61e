//! `/name[:value]` switches followed by the input file.

use pcc_compiler::Flags;

use crate::CliError;

/// Flags that are meaningless without a value.
const VALUE_FLAGS: &[&str] = &["target", "out"];

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Invocation {
    pub flags: Flags,
    /// The remaining arguments joined by spaces, if there are any.
    pub file: Option<String>,
}

impl Invocation {
    /// Leading arguments that look like switches are flags; everything
    /// after the first one that does not is the file name. An absolute
    /// Unix path is not a switch because its name part contains `/`.
    pub fn parse(args: &[String]) -> Result<Self, CliError> {
        let mut invocation = Invocation::default();
        let mut rest = args.iter();
        let mut file_parts = Vec::new();
        for arg in rest.by_ref() {
            match parse_switch(arg) {
                Some((name, value)) => {
                    if value.is_none() && VALUE_FLAGS.contains(&name) {
                        return Err(CliError::MissingValue(name.to_string()));
                    }
                    invocation.flags.set(name, value.map(str::to_string));
                }
                None => {
                    file_parts.push(arg.as_str());
                    break;
                }
            }
        }
        file_parts.extend(rest.map(String::as_str));
        if !file_parts.is_empty() {
            invocation.file = Some(file_parts.join(" "));
        }
        Ok(invocation)
    }
}

fn parse_switch(arg: &str) -> Option<(&str, Option<&str>)> {
    let body = arg.strip_prefix('/')?;
    let (name, value) = match body.split_once(':') {
        Some((name, value)) => (name, Some(value)),
        None => (body, None),
    };
    let is_name = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    is_name.then_some((name, value))
}
