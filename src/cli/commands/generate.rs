//! Default command: collect modules and write their usage blocks.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::{
    cli::{args::GenerateArgs, exit_status::ExitStatus, report::Reporter},
    config::{Config, ConfigLoadResult, load_config},
    core::{
        backend::MetadataBackend,
        discover::{ModuleDir, discover_modules},
        pipeline::{ModuleCollector, ModuleError},
    },
    usage::UsageFormatter,
};

pub fn generate(args: &GenerateArgs) -> Result<ExitStatus> {
    let root = args.path.as_path();
    if !root.is_dir() {
        anyhow::bail!("Module path is not a directory: {}", root.display());
    }

    let ConfigLoadResult { mut config, path } = load_config(root)?;
    match path {
        Some(path) => debug!(config = %path.display(), "loaded config"),
        None => debug!("no config file found, using defaults"),
    }
    apply_overrides(&mut config, args);

    let backend = select_backend(&config);
    let mut collector = ModuleCollector::new();
    if let Some(backend) = &backend {
        collector = collector.with_backend(backend);
    }

    let generator = Generator {
        args,
        collector,
        formatter: UsageFormatter::new(&config.type_formatting),
        reporter: Reporter::new(args.quiet),
    };

    if args.recursive {
        generator.recursive(root, &config)
    } else {
        generator.single(root)
    }
}

/// Command-line flags win over the config file.
fn apply_overrides(config: &mut Config, args: &GenerateArgs) {
    let formatting = &mut config.type_formatting;
    if let Some(level) = args.detail_level {
        formatting.detail_level = level;
    }
    if let Some(max) = args.max_fields {
        formatting.max_fields_to_show = max;
    }
    if args.no_field_names {
        formatting.show_field_names = false;
    }
    if args.no_backend {
        config.backend.enabled = false;
    }
}

fn select_backend(config: &Config) -> Option<MetadataBackend> {
    if !config.backend.enabled {
        debug!("metadata backend disabled");
        return None;
    }

    let backend = MetadataBackend::new(&config.backend.command);
    if backend.is_available() {
        debug!(command = backend.command(), version = ?backend.version(), "using metadata backend");
        Some(backend)
    } else {
        warn!(
            "`{}` is not available; using declarations from source only",
            backend.command()
        );
        None
    }
}

struct Generator<'a> {
    args: &'a GenerateArgs,
    collector: ModuleCollector<'a>,
    formatter: UsageFormatter<'a>,
    reporter: Reporter,
}

impl Generator<'_> {
    fn single(&self, root: &Path) -> Result<ExitStatus> {
        let text = self.render(root, &self.args.name)?;

        match &self.args.out {
            Some(out) => {
                fs::write(out, text)
                    .with_context(|| format!("Failed to write output file: {}", out.display()))?;
                self.reporter.written(root, out);
            }
            None => {
                let mut stdout = io::stdout().lock();
                stdout
                    .write_all(text.as_bytes())
                    .and_then(|()| stdout.flush())
                    .context("Failed to write to stdout")?;
            }
        }

        Ok(ExitStatus::Success)
    }

    fn recursive(&self, root: &Path, config: &Config) -> Result<ExitStatus> {
        let discovery = discover_modules(root, &self.args.name, &config.ignore_patterns());
        if discovery.skipped_count > 0 {
            self.reporter.warning(&format!(
                "{} path(s) could not be read (use -v for details)",
                discovery.skipped_count
            ));
        }

        let modules = discovery.modules;
        if modules.is_empty() {
            self.reporter
                .warning(&format!("No Terraform modules found under {}", root.display()));
            return Ok(ExitStatus::Success);
        }
        info!(count = modules.len(), "processing modules");

        let file_name = self.output_file_name();

        if self.args.keep_going {
            let outcomes: Vec<_> = modules
                .par_iter()
                .map(|module| (module, self.write_module(module, &file_name)))
                .collect();

            let mut failed = 0;
            for (module, outcome) in &outcomes {
                match outcome {
                    Ok(target) => self.reporter.written(&module.path, target),
                    Err(err) => {
                        failed += 1;
                        self.reporter.failed(err);
                    }
                }
            }
            self.reporter.summary(outcomes.len(), failed);

            return Ok(if failed > 0 {
                ExitStatus::Failure
            } else {
                ExitStatus::Success
            });
        }

        let written = modules
            .par_iter()
            .map(|module| self.write_module(module, &file_name))
            .collect::<Result<Vec<_>, _>>()?;

        for (module, target) in modules.iter().zip(&written) {
            self.reporter.written(&module.path, target);
        }
        self.reporter.summary(written.len(), 0);

        Ok(ExitStatus::Success)
    }

    /// File name written into each module directory.
    fn output_file_name(&self) -> PathBuf {
        self.args
            .out
            .as_deref()
            .and_then(Path::file_name)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(self.args.format.default_file_name()))
    }

    fn write_module(&self, module: &ModuleDir, file_name: &Path) -> Result<PathBuf, ModuleError> {
        let text = self.render(&module.path, &module.name)?;
        let target = module.path.join(file_name);
        fs::write(&target, text).map_err(|source| ModuleError::Write {
            path: target.clone(),
            source,
        })?;
        Ok(target)
    }

    fn render(&self, path: &Path, name: &str) -> Result<String, ModuleError> {
        let module = self.collector.collect(path, name)?;
        debug!(
            module = %path.display(),
            required = module.required().count(),
            optional = module.optional().count(),
            "collected module"
        );

        self.formatter
            .render(&module.variables, &module.name, &self.args.source, self.args.format)
            .to_text()
            .map_err(|source| ModuleError::Render {
                path: path.to_path_buf(),
                source,
            })
    }
}
