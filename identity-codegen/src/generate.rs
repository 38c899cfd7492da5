use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use proc_macro2::TokenStream;
use quote::{quote, ToTokens};
use tracing::{info, warn};

use crate::schema::Schema;
use crate::{expand, Context, Error, Rejection, Result};

const HEADER: &str = "// @generated by identity-gen. Do not edit by hand.\n\n";

/// Renders every identifier of `schema` into one Rust source file.
///
/// All entries are validated before failing, so a single run reports the
/// diagnostics of every malformed entry. With `format`, a missing or
/// failing `rustfmt` is an error rather than a silent fallback.
pub fn render(schema: &Schema, format: bool) -> Result<String> {
    let options = schema.options()?;
    let mut items = TokenStream::new();
    for import in &schema.imports {
        let tree: syn::UseTree = syn::parse_str(import)
            .map_err(|e| Error::Schema(format!("import `{}`: {}", import, e)))?;
        items.extend(quote!(use #tree;));
    }

    let mut rejections = Vec::new();
    for entry in &schema.identifiers {
        let request = entry.request()?;
        match expand(request, &options) {
            Ok(expansion) => {
                info!(signature = %expansion.signature, "generated identifier");
                items.extend(expansion.rust);
            }
            Err(diagnostics) => {
                warn!(
                    declaration = %entry,
                    diagnostics = diagnostics.len(),
                    "declaration rejected"
                );
                rejections.push(Rejection {
                    declaration: entry.declaration(),
                    diagnostics,
                });
            }
        }
    }
    if !rejections.is_empty() {
        return Err(Error::Rejected(rejections));
    }

    let file: syn::File = syn::parse2(items)
        .map_err(|e| Error::Schema(format!("generated code does not parse: {}", e)))?;
    let source = file.into_token_stream().to_string();
    let source = if format { rustfmt(&source)? } else { source };
    Ok(format!("{}{}\n", HEADER, source.trim_end()))
}

/// Writes the rendered schema to `output`, or with `check` only verifies
/// that `output` is up to date.
pub fn generate(schema: &Schema, output: &Path, check: bool, format: bool) -> Result<()> {
    let rendered = render(schema, format)?;
    if check {
        let existing = std::fs::read_to_string(output)
            .with_context(|| format!("Unable to read {}", output.display()))?;
        if existing != rendered {
            return Err(Error::Stale(output.to_path_buf()));
        }
        info!(output = %output.display(), "generated file is up to date");
        return Ok(());
    }
    std::fs::write(output, rendered)
        .with_context(|| format!("Unable to write {}", output.display()))?;
    info!(output = %output.display(), "wrote identifiers");
    Ok(())
}

/// Pipes `source` through `rustfmt`.
pub fn rustfmt(source: &str) -> Result<String> {
    format_with("rustfmt", source)
}

fn format_with(formatter: &str, source: &str) -> Result<String> {
    let mut child = Command::new(formatter)
        .args(["--edition", "2021", "--emit", "stdout"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| {
            Error::Format(format!(
                "unable to run `{}` ({}), pass --no-format to skip formatting",
                formatter, e
            ))
        })?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(source.as_bytes())
            .with_context(|| format!("Unable to write to {}", formatter))?;
    }
    let output = child
        .wait_with_output()
        .with_context(|| format!("Unable to wait for {}", formatter))?;
    if !output.status.success() {
        return Err(Error::Format(format!(
            "`{}` exited with {}",
            formatter, output.status
        )));
    }
    String::from_utf8(output.stdout)
        .with_context(|| format!("{} produced invalid UTF-8", formatter))
}
