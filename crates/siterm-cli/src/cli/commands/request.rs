//! `siterm get|post|put|delete` – send one request and print the reply.

use anyhow::{Context, Result};
use serde_json::Value;
use siterm_core::config::SitermConfig;
use siterm_core::{CallOptions, CurlTransport, ParamValue, Params, RequestBuilder, Verb};

use crate::cli::RequestArgs;

pub fn run_request(cfg: &SitermConfig, verb: Verb, args: &RequestArgs) -> Result<()> {
    let transport = CurlTransport::new(cfg.transport.clone());
    let client = RequestBuilder::with_transport(&args.url, cfg.client.overrides(), transport)?;
    let options = call_options(args)?;

    let uri = args.uri.as_deref().unwrap_or("");
    let reply = client
        .make_request(verb, uri, options)
        .with_context(|| format!("{} {}{}", verb, client.host(), uri))?;

    println!("{} {}", reply.status, reply.reason);
    println!("{:#}", reply.body);
    Ok(())
}

/// Translates command-line arguments into call options.
pub fn call_options(args: &RequestArgs) -> Result<CallOptions> {
    let mut options = CallOptions::new()
        .encode(!args.no_encode)
        .decode(!args.raw);

    if let Some(ct) = &args.content_type {
        options = options.content_type(ct.clone());
    }

    if let Some(data) = &args.data {
        options = options.text(data.clone());
    } else if !args.form.is_empty() || args.params_json.is_some() {
        options = options.form(form_params(args)?, args.list_fields.iter().cloned());
    }

    let mut headers = match &args.headers_json {
        Some(raw) => serde_json::from_str::<Value>(raw).context("parse --headers JSON")?,
        None => Value::Null,
    };
    // Keep a non-mapping --headers value as-is so the request layer rejects it.
    if headers.is_null() && !args.headers.is_empty() {
        headers = Value::Object(Default::default());
    }
    if let Value::Object(map) = &mut headers {
        for (name, value) in &args.headers {
            map.insert(name.clone(), Value::String(value.clone()));
        }
    }
    Ok(options.headers(headers))
}

/// Starts from `--params` JSON, then groups `--form` pairs by key on top.
/// List fields and repeated keys become lists.
fn form_params(args: &RequestArgs) -> Result<Params> {
    let mut params: Params = match &args.params_json {
        Some(raw) => serde_json::from_str(raw).context("parse --params JSON")?,
        None => Params::new(),
    };

    let mut grouped: std::collections::BTreeMap<String, Vec<String>> = Default::default();
    for (key, value) in &args.form {
        grouped.entry(key.clone()).or_default().push(value.clone());
    }
    params.extend(grouped.into_iter().map(|(key, mut values)| {
        let value = if values.len() == 1 && !args.list_fields.contains(&key) {
            ParamValue::Scalar(values.remove(0))
        } else {
            ParamValue::List(values)
        };
        (key, value)
    }));
    Ok(params)
}
