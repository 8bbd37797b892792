use std::path::PathBuf;

use clap::{builder::TypedValueParser, error::ErrorKind, Arg, Command, Error};

/// Parses a path argument, expanding a leading `~` and any `$VAR` references.
#[derive(Clone)]
pub struct ExpandedPathbufParser;

impl TypedValueParser for ExpandedPathbufParser {
    type Value = PathBuf;

    fn parse_ref(
        &self,
        cmd: &Command,
        _arg: Option<&Arg>,
        value: &std::ffi::OsStr,
    ) -> Result<Self::Value, Error> {
        if value.is_empty() {
            return Err(cmd.clone().error(ErrorKind::InvalidValue, "empty path"));
        }

        match value.to_str() {
            Some(value) => shellexpand::full(value)
                .map(|expanded| PathBuf::from(expanded.into_owned()))
                .map_err(|err| cmd.clone().error(ErrorKind::InvalidValue, err)),
            None => Ok(PathBuf::from(value)),
        }
    }
}
