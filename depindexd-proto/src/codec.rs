//! Line framing and command grammar.
//!
//! A command is a single line, `\n`-terminated, split on `|` into exactly
//! three fields: `VERB|PACKAGE|DEPS`. This module only parses a single,
//! already-delimited line; splitting a byte stream into lines is the session
//! handler's job (see `depindexd-net`).

use depindexd_base::PackageName;

/// A well-formed, parsed command line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Command {
    Index {
        package: PackageName,
        deps: Vec<PackageName>,
    },
    Remove {
        package: PackageName,
    },
    Query {
        package: PackageName,
    },
}

/// Why a line failed to parse. Every variant maps to `ERROR\n`; the
/// distinction only matters for logging and tests.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseError {
    MissingTerminator,
    WrongFieldCount,
    UnknownVerb,
    BadPackageName,
    BadDepList,
}

/// Parse one line, including its trailing `\n` if present. A line handed in
/// without a trailing `\n` (the session handler hit EOF mid-line) always
/// fails with `MissingTerminator`.
pub fn parse_command(line: &[u8]) -> Result<Command, ParseError> {
    let body = match line.split_last() {
        Some((b'\n', rest)) => rest,
        _ => return Err(ParseError::MissingTerminator),
    };

    let (verb, package, deps) = split_fields(body).ok_or(ParseError::WrongFieldCount)?;

    let package_str = std::str::from_utf8(package).map_err(|_| ParseError::BadPackageName)?;
    let package = PackageName::parse(package_str).map_err(|_| ParseError::BadPackageName)?;

    match verb {
        b"INDEX" => {
            let deps = parse_dep_list(deps)?;
            Ok(Command::Index { package, deps })
        }
        b"REMOVE" => Ok(Command::Remove { package }),
        b"QUERY" => Ok(Command::Query { package }),
        _ => Err(ParseError::UnknownVerb),
    }
}

/// Splits on `|` into exactly three byte-slice fields without assuming the
/// whole line is valid UTF-8 — the `DEPS` field of a REMOVE/QUERY command is
/// never even looked at, so it's allowed to contain arbitrary bytes.
fn split_fields(body: &[u8]) -> Option<(&[u8], &[u8], &[u8])> {
    let first = body.iter().position(|&b| b == b'|')?;
    let after_first = &body[first + 1..];
    let second = after_first.iter().position(|&b| b == b'|')?;
    let verb = &body[..first];
    let package = &after_first[..second];
    let deps = &after_first[second + 1..];
    if deps.contains(&b'|') {
        return None;
    }
    Some((verb, package, deps))
}

/// Dependency list grammar, INDEX only: empty, or comma-separated names with
/// a tolerated trailing comma and discarded empty segments.
fn parse_dep_list(deps: &[u8]) -> Result<Vec<PackageName>, ParseError> {
    if deps.is_empty() {
        return Ok(Vec::new());
    }
    let deps_str = std::str::from_utf8(deps).map_err(|_| ParseError::BadDepList)?;
    deps_str
        .split(',')
        .filter(|segment| !segment.is_empty())
        .map(|segment| PackageName::parse(segment).map_err(|_| ParseError::BadDepList))
        .collect()
}
