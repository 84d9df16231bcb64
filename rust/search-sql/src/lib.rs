pub mod config;
pub mod dialect;
pub mod error;
pub mod operator;
pub mod query;
pub mod request;
pub mod resolver;
pub mod schema;
pub mod telemetry;
pub mod value;

use crate::{
    config::ResolverConfig, request::SearchRequest, resolver::SqlResolver, schema::SearchSchema,
};
use anyhow::Context;
use clap::Parser;
use serde::Deserialize;
use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};
use tracing::error;

pub use crate::{
    dialect::{Dialect, DialectKind},
    error::{Result, SearchSqlError},
    operator::FieldOp,
    query::{ResolvedQuery, SqlParam},
    request::{FilterParam, OrderDirection},
    schema::{FieldMeta, FieldType},
};

/// Input document accepted by the `search-sql` binary.
#[derive(Debug, Deserialize)]
pub struct ResolveInput {
    pub schema: SearchSchema,
    #[serde(default)]
    pub request: SearchRequest,
    /// Emit `$n` placeholders instead of `?`.
    #[serde(default)]
    pub numbered: bool,
}

/// Resolves one JSON input document into its pretty-printed JSON result.
pub fn resolve_json(resolver: &SqlResolver, input: &str) -> anyhow::Result<String> {
    let input: ResolveInput =
        serde_json::from_str(input).context("failed to decode resolve input")?;
    let resolved = resolver
        .resolve(&input.schema, &input.request)
        .map_err(|err| {
            if !err.is_request_error() {
                error!(error = %err, "search resolution failed");
            }
            err
        })?;
    let resolved = if input.numbered {
        resolved.numbered()
    } else {
        resolved
    };
    serde_json::to_string_pretty(&resolved).context("failed to encode resolved query")
}

#[derive(Debug, Parser)]
#[command(name = "search-sql")]
#[command(about = "Resolve a search request into listing and count SQL")]
pub struct Cli {
    /// JSON input document; stdin when omitted or `-`
    pub input: Option<PathBuf>,
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = ResolverConfig::from_env()?;
    let resolver = SqlResolver::new(config);

    let input = match cli.input {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    println!("{}", resolve_json(&resolver, &input)?);
    Ok(())
}
