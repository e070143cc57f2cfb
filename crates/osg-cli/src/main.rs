mod config;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clap_complete::Shell;

use osg_core::{ApiToHar, Document, HttpMethod, parse};
use osg_targets::{
    CodeConverter, HttpSnippet, SnippetGenerateError, TargetInfo, all_snippets,
    endpoint_snippets, normalize_endpoints, resolve_targets,
};

use config::{CONFIG_FILE_NAME, OsgConfig, OutputFormat};

#[derive(Parser)]
#[command(name = "osg", about = "OpenAPI code snippet generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate snippets for every operation of an OpenAPI document
    Generate {
        /// Path to the OpenAPI document (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Target language or language_library, repeatable
        #[arg(short, long = "language")]
        languages: Vec<String>,

        /// Output format
        #[arg(long)]
        format: Option<OutputFormat>,

        /// Write the result to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate snippets for a single operation
    Endpoint {
        /// Path to the OpenAPI document
        #[arg(short, long)]
        input: PathBuf,

        /// Path template as declared, e.g. /api/users/{id}
        #[arg(long)]
        path: String,

        /// HTTP method, case-insensitive
        #[arg(long)]
        method: HttpMethod,

        /// Target language or language_library, repeatable
        #[arg(short, long = "language")]
        languages: Vec<String>,
    },

    /// Print the request descriptors built for a document
    Har {
        /// Path to the OpenAPI document
        #[arg(short, long)]
        input: PathBuf,

        /// Only this path
        #[arg(long)]
        path: Option<String>,

        /// Only this method; requires --path
        #[arg(long, requires = "path")]
        method: Option<HttpMethod>,
    },

    /// List the available target languages and clients
    Targets,

    /// Initialize a new osg configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            languages,
            format,
            output,
        } => cmd_generate(input, languages, format, output),

        Commands::Endpoint {
            input,
            path,
            method,
            languages,
        } => cmd_endpoint(input, path, method, languages),

        Commands::Har {
            input,
            path,
            method,
        } => cmd_har(input, path, method),

        Commands::Targets => cmd_targets(),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "osg", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn load_project_config() -> Result<OsgConfig> {
    Ok(config::load_config(Path::new(CONFIG_FILE_NAME))?.unwrap_or_default())
}

fn load_document(path: &Path) -> Result<Document> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");

    let doc = match ext {
        "json" => parse::from_json(&content),
        _ => parse::from_yaml(&content),
    }
    .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(doc)
}

fn report(err: SnippetGenerateError) -> anyhow::Error {
    anyhow::anyhow!(err.report())
}

/// Flag values win over the config file; an empty flag list keeps the config's.
fn pick_languages(flags: Vec<String>, cfg: &OsgConfig) -> Vec<String> {
    if flags.is_empty() {
        cfg.languages.clone()
    } else {
        flags
    }
}

fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("  wrote {}", path.display());
        }
        None => print!("{content}"),
    }
    Ok(())
}

fn cmd_generate(
    input: Option<PathBuf>,
    languages: Vec<String>,
    format: Option<OutputFormat>,
    output: Option<PathBuf>,
) -> Result<()> {
    let cfg = load_project_config()?;
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let output = output.or_else(|| cfg.output.as_ref().map(PathBuf::from));
    let format = format.unwrap_or(cfg.format);
    let languages = pick_languages(languages, &cfg);

    let doc = load_document(&input)?;
    let converter = HttpSnippet::new();
    let targets = resolve_targets(&converter, &languages)?;
    let har = ApiToHar::new(&doc);

    let mut results = all_snippets(&converter, &har, &targets).map_err(report)?;
    if cfg.normalize_paths {
        normalize_endpoints(&mut results);
    }

    let snippet_count: usize = results.iter().map(|r| r.snippets.len()).sum();
    eprintln!(
        "Generated {} snippets for {} operations",
        snippet_count,
        results.len()
    );
    write_output(output.as_deref(), &format.render(&results)?)
}

fn cmd_endpoint(
    input: PathBuf,
    path: String,
    method: HttpMethod,
    languages: Vec<String>,
) -> Result<()> {
    let cfg = load_project_config()?;
    let languages = pick_languages(languages, &cfg);

    let doc = load_document(&input)?;
    let converter = HttpSnippet::new();
    let targets = resolve_targets(&converter, &languages)?;
    let har = ApiToHar::new(&doc);

    let mut result =
        endpoint_snippets(&converter, &har, &path, method, &targets).map_err(report)?;
    if cfg.normalize_paths {
        normalize_endpoints(std::slice::from_mut(&mut result));
    }
    write_output(None, &cfg.format.render(&result)?)
}

fn cmd_har(input: PathBuf, path: Option<String>, method: Option<HttpMethod>) -> Result<()> {
    let cfg = load_project_config()?;
    let doc = load_document(&input)?;
    let har = ApiToHar::new(&doc);

    let endpoints = match (path.as_deref(), method) {
        (Some(path), Some(method)) => vec![har.endpoint(path, method)?],
        (Some(path), None) => har.path(path)?,
        (None, _) => har.to_vec()?,
    };
    write_output(None, &cfg.format.render(&endpoints)?)
}

fn cmd_targets() -> Result<()> {
    let converter = HttpSnippet::new();
    print!("{}", describe_targets(converter.available_targets()));
    Ok(())
}

/// Listing of every target and client. `*` marks the default client.
fn describe_targets(targets: &[TargetInfo]) -> String {
    let mut out = String::new();
    for target in targets {
        let extname = if target.extname.is_empty() {
            "-"
        } else {
            target.extname
        };
        out.push_str(&format!("{} ({}, {extname})\n", target.key, target.title));
        for client in target.clients {
            let marker = if client.key == target.default_client {
                "*"
            } else {
                " "
            };
            let id = format!("{}_{}", target.key, client.key);
            out.push_str(&format!(
                "  {marker} {id:<20} {}: {}\n      {}\n",
                client.title, client.description, client.link
            ));
        }
    }
    out
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_targets() {
        let converter = HttpSnippet::new();
        let listing = describe_targets(converter.available_targets());
        assert!(listing.starts_with("shell (Shell, .sh)\n"));
        assert!(listing.contains(
            "  * shell_curl           cURL: cURL is a command line tool and library for transferring data with URL syntax\n      http://curl.haxx.se/\n"
        ));
        assert!(listing.contains("http (HTTP, -)\n"));
        assert!(listing.contains("    node_fetch "));
    }
}
