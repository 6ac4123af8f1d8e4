//! `docli generate cdn` command implementation.
//!
//! Reads the CDN data file, resolves every package to its latest version on
//! jsDelivr and renders one include snippet per package from the matching
//! template.

use std::collections::HashMap;

use anyhow::{bail, Context};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::CommandContext;
use docli_config::{load_data_file, ConfigLoader};
use docli_core::error::{DocliError, DocliResult};
use docli_core::types::{PackageSpec, ResolvedPackage};
use docli_registry::RegistryClient;
use docli_resolver::Resolver;

/// Extension of the primary template for a package
pub const TEMPLATE_EXTENSION: &str = ".mdx.tmpl";
/// Extension of generated snippets
pub const OUTPUT_EXTENSION: &str = ".mdx";

/// Options of `docli generate cdn`
#[derive(Debug, Clone, Args)]
pub struct CdnArgs {
    /// Data file with package information
    #[arg(short, long, default_value = "cdn.yml")]
    pub data: Utf8PathBuf,

    /// Directory with template files for interpolation
    #[arg(short, long, default_value = "templates")]
    pub templates: Utf8PathBuf,

    /// Output directory for generated files
    #[arg(short, long, default_value = "out")]
    pub output: Utf8PathBuf,

    /// Override the npm registry URL
    #[arg(long, value_name = "URL")]
    pub registry_url: Option<String>,

    /// Override the jsDelivr data API URL
    #[arg(long, value_name = "URL")]
    pub cdn_data_url: Option<String>,

    /// Override the base URL of generated links
    #[arg(long, value_name = "URL")]
    pub cdn_asset_url: Option<String>,

    /// Override the per-request timeout
    #[arg(long, value_name = "SECONDS")]
    pub timeout_secs: Option<u64>,
}

impl CdnArgs {
    /// Args with the given paths and no overrides
    #[cfg(test)]
    pub fn new(
        data: impl Into<Utf8PathBuf>,
        templates: impl Into<Utf8PathBuf>,
        output: impl Into<Utf8PathBuf>,
    ) -> Self {
        Self {
            data: data.into(),
            templates: templates.into(),
            output: output.into(),
            registry_url: None,
            cdn_data_url: None,
            cdn_asset_url: None,
            timeout_secs: None,
        }
    }

    /// Settings overrides keyed the way the config layering expects
    fn config_overrides(&self) -> HashMap<String, String> {
        [
            ("registry-url", self.registry_url.clone()),
            ("cdn-data-url", self.cdn_data_url.clone()),
            ("cdn-asset-url", self.cdn_asset_url.clone()),
            ("timeout-secs", self.timeout_secs.map(|secs| secs.to_string())),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key.to_string(), value)))
        .collect()
    }
}

/// Execute the `docli generate cdn` command
pub async fn execute(
    args: CdnArgs,
    ctx: &CommandContext,
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    let data = ctx.resolve_path(&args.data);
    let templates = ctx.resolve_path(&args.templates);
    let output = ctx.resolve_path(&args.output);

    validate_options(&data, &templates, &output)?;

    let specs = load_data_file(&data)
        .await
        .with_context(|| format!("read CDN data file {}", args.data))?;

    if !ctx.output.is_dry_run() {
        tokio::fs::create_dir_all(&output)
            .await
            .with_context(|| format!("create output directory {}", args.output))?;
    }

    let (settings, source) = ConfigLoader::new(ctx.cwd.clone())
        .load_settings(args.config_overrides())
        .await?;
    debug!(?source, ?settings, "loaded resolver settings");

    let client = RegistryClient::with_config(settings.endpoints(), settings.timeout())?;
    let generator = SnippetGenerator {
        resolver: Resolver::from_client(client),
        parser: liquid::ParserBuilder::with_stdlib()
            .build()
            .context("Failed to create template parser")?,
        templates,
        output,
    };

    for spec in &specs {
        generator.write_package(spec, ctx, cancel).await?;
    }

    let stats = generator.resolver.cache().stats();
    debug!(
        metadata = stats.metadata_entries,
        listings = stats.listing_entries,
        "resolver cache"
    );

    Ok(())
}

/// Resolves packages and renders their snippets
struct SnippetGenerator {
    resolver: Resolver,
    parser: liquid::Parser,
    templates: Utf8PathBuf,
    output: Utf8PathBuf,
}

impl SnippetGenerator {
    async fn write_package(
        &self,
        spec: &PackageSpec,
        ctx: &CommandContext,
        cancel: &CancellationToken,
    ) -> anyhow::Result<()> {
        let resolved = self
            .resolver
            .resolve(spec, cancel)
            .await
            .with_context(|| format!("resolve package {}", spec.name))?;

        let rendered = self
            .load_and_render(&resolved)
            .await
            .with_context(|| format!("load template for {}", resolved.name))?;

        let out = self
            .output
            .join(format!("{}{}", resolved.name, OUTPUT_EXTENSION));

        if ctx.output.is_dry_run() {
            ctx.output.info(&format!("Dry run: would write {}", out));
            return Ok(());
        }

        tokio::fs::write(&out, rendered)
            .await
            .map_err(|e| DocliError::io(format!("Failed to write {}", out), e))
            .with_context(|| format!("write output for {}", resolved.name))?;

        ctx.output.info(&format!(
            "Writing include snippets for `{}` ({}) version {}",
            resolved.name, resolved.package_name, resolved.version
        ));

        Ok(())
    }

    async fn load_and_render(&self, resolved: &ResolvedPackage) -> DocliResult<String> {
        let path = find_template(&self.templates, &resolved.name)?;
        debug!(name = %resolved.name, template = %path, "rendering template");

        let source = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| DocliError::io(format!("Failed to read template {}", path), e))?;

        self.render(resolved, &path, &source)
    }

    fn render(
        &self,
        resolved: &ResolvedPackage,
        path: &Utf8Path,
        source: &str,
    ) -> DocliResult<String> {
        let template_error = |message: String| DocliError::Template {
            name: resolved.name.clone(),
            message,
        };

        let template = self
            .parser
            .parse(source)
            .map_err(|e| template_error(format!("{}: {}", path, e)))?;
        let globals = liquid::to_object(resolved).map_err(|e| template_error(e.to_string()))?;

        template
            .render(&globals)
            .map_err(|e| template_error(format!("{}: {}", path, e)))
    }
}

/// Template for a package: `<name>.mdx.tmpl`, or the single file matching `<name>*`
pub fn find_template(dir: &Utf8Path, name: &str) -> DocliResult<Utf8PathBuf> {
    let template_error = |message: String| DocliError::Template {
        name: name.to_string(),
        message,
    };

    let primary = dir.join(format!("{}{}", name, TEMPLATE_EXTENSION));
    if primary.is_file() {
        return Ok(primary);
    }

    let pattern = format!(
        "{}/{}*",
        glob::Pattern::escape(dir.as_str()),
        glob::Pattern::escape(name)
    );
    let entries = glob::glob(&pattern).map_err(|e| template_error(e.to_string()))?;

    let mut matches = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| template_error(e.to_string()))?;
        let path = Utf8PathBuf::try_from(path).map_err(|e| template_error(e.to_string()))?;
        matches.push(path);
    }
    matches.sort();

    match matches.len() {
        0 => Err(template_error(format!("no template files matched {}", pattern))),
        1 => Ok(matches.remove(0)),
        _ => Err(template_error(format!(
            "multiple template files matched: {}",
            matches
                .iter()
                .map(|path| path.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ))),
    }
}

/// Data file must exist, template directory must exist, output may not be a file
fn validate_options(data: &Utf8Path, templates: &Utf8Path, output: &Utf8Path) -> anyhow::Result<()> {
    if !data.exists() {
        bail!("data file {:?} not found", data.as_str());
    }
    if data.is_dir() {
        bail!("data file {:?} is a directory", data.as_str());
    }

    if !templates.exists() {
        bail!("template directory {:?} not found", templates.as_str());
    }
    if !templates.is_dir() {
        bail!("template directory {:?} is not a directory", templates.as_str());
    }

    if output.exists() && !output.is_dir() {
        bail!("output directory {:?} is not a directory", output.as_str());
    }

    Ok(())
}
