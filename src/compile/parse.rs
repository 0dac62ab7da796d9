use std::collections::HashSet;

use crate::compile::table::MappingTable;
use crate::foundation::core::{INVALID_FACE, NUMBER_FACES};
use crate::foundation::error::{FacemapError, FacemapResult};

const TABLE_PREFIX: &str = "const int8_t nextFaces[][";

/// Read a mapping header produced by [`crate::emit_mapping_header`] back into a table.
///
/// Lines outside the defines and the `nextFaces` initializer (other tables, comments) are
/// skipped, so combined headers parse too.
pub fn parse_mapping_header(text: &str) -> FacemapResult<MappingTable> {
    let mut count: Option<usize> = None;
    let mut defines: Vec<(usize, String)> = Vec::new();
    let mut width: Option<usize> = None;
    let mut rows: Vec<(Vec<String>, Option<String>)> = Vec::new();
    let mut in_table = false;
    let mut closed = false;

    for (lineno, raw) in text.lines().enumerate() {
        let line = raw.trim();
        let at = |msg: String| FacemapError::validation(format!("line {}: {msg}", lineno + 1));

        if in_table {
            if line == "};" {
                in_table = false;
                closed = true;
                continue;
            }
            let Some(rest) = line.strip_prefix('{') else {
                return Err(at(format!("expected table row, got '{line}'")));
            };
            let Some((body, tail)) = rest.split_once('}') else {
                return Err(at("unterminated table row".to_string()));
            };
            let tokens: Vec<String> = body
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect();
            let label = tail
                .split_once("//")
                .map(|(_, c)| c.trim().to_string())
                .filter(|c| !c.is_empty());
            rows.push((tokens, label));
            continue;
        }

        if let Some(def) = line.strip_prefix("#define") {
            let mut parts = def.split_whitespace();
            let (Some(name), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
                return Err(at(format!("malformed define '{line}'")));
            };
            match name {
                NUMBER_FACES => {
                    count = Some(
                        value
                            .parse()
                            .map_err(|_| at(format!("bad face count '{value}'")))?,
                    );
                }
                INVALID_FACE => {
                    if value != "-1" {
                        return Err(at(format!("{INVALID_FACE} must be -1, got '{value}'")));
                    }
                }
                _ => {
                    let index = value
                        .parse()
                        .map_err(|_| at(format!("bad index '{value}' for '{name}'")))?;
                    defines.push((index, name.to_string()));
                }
            }
        } else if let Some(rest) = line.strip_prefix(TABLE_PREFIX) {
            let Some((w, _)) = rest.split_once(']') else {
                return Err(at("malformed nextFaces declaration".to_string()));
            };
            width = Some(
                w.trim()
                    .parse()
                    .map_err(|_| at(format!("bad table width '{w}'")))?,
            );
            in_table = true;
        }
    }

    let count = count.ok_or_else(|| FacemapError::validation("missing NUMBER_FACES define"))?;
    let width = width.ok_or_else(|| FacemapError::validation("missing nextFaces table"))?;
    if !closed {
        return Err(FacemapError::validation("nextFaces table is not closed"));
    }

    let mut symbols: Vec<Option<String>> = vec![None; count];
    for (index, name) in defines {
        let slot = symbols.get_mut(index).ok_or_else(|| {
            FacemapError::validation(format!("face '{name}' has index {index} >= {count}"))
        })?;
        if slot.is_some() {
            return Err(FacemapError::validation(format!(
                "index {index} defined more than once"
            )));
        }
        *slot = Some(name);
    }
    let symbols: Vec<String> = symbols
        .into_iter()
        .enumerate()
        .map(|(i, s)| s.ok_or_else(|| FacemapError::validation(format!("no face for index {i}"))))
        .collect::<FacemapResult<_>>()?;

    if rows.len() != count {
        return Err(FacemapError::validation(format!(
            "expected {count} table rows, found {}",
            rows.len()
        )));
    }

    let known: HashSet<&str> = symbols.iter().map(String::as_str).collect();
    let mut out_rows = Vec::with_capacity(count);
    for (i, (tokens, label)) in rows.into_iter().enumerate() {
        if let Some(label) = &label
            && label != &symbols[i]
        {
            return Err(FacemapError::validation(format!(
                "row {i} is labelled '{label}' but index {i} is '{}'",
                symbols[i]
            )));
        }
        if tokens.len() != width {
            return Err(FacemapError::validation(format!(
                "row {i} has {} tokens, table width is {width}",
                tokens.len()
            )));
        }
        let padding_start = tokens
            .iter()
            .position(|t| t == INVALID_FACE)
            .unwrap_or(tokens.len());
        for (j, token) in tokens.iter().enumerate() {
            let ok = if j < padding_start {
                known.contains(token.as_str())
            } else {
                token == INVALID_FACE
            };
            if !ok {
                return Err(FacemapError::validation(format!(
                    "row {i} has unexpected token '{token}'"
                )));
            }
        }
        out_rows.push(tokens);
    }

    Ok(MappingTable::from_parts(symbols, out_rows, width))
}

#[cfg(test)]
#[path = "../../tests/unit/compile/parse.rs"]
mod tests;
