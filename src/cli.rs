use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;
use std::path::PathBuf;

use crate::auth::Credentials;
use crate::config::{Config, OutputFormat};
use crate::output::{self, Spinner};
use crate::providers::jenkins::{job_query, search_query, JenkinsProvider, Limits};

#[derive(Parser)]
#[command(name = "jobscope")]
#[command(author, version, about = "Jenkins job tree explorer", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./jobscope.toml and friends)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Jenkins base URL
    #[arg(long, global = true, env = "JENKINS_URL")]
    url: Option<String>,

    /// Jenkins user name
    #[arg(long, global = true, env = "JENKINS_USER")]
    user: Option<String>,

    /// Jenkins API token
    #[arg(long, global = true, env = "JENKINS_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Nested folder levels requested when searching
    #[arg(long, global = true, allow_negative_numbers = true)]
    max_depth: Option<i64>,

    /// Maximum number of branches shown for a job
    #[arg(long, global = true)]
    max_branches: Option<usize>,

    #[arg(short, long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Write JSON output to this file
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[arg(short, long, global = true, default_value_t = false)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search jobs by id, display name or description
    Search {
        criteria: String,

        /// Search the template jobs view instead
        #[arg(short, long)]
        templates: bool,
    },
    /// Show a job and its most recently built branches
    Job {
        /// Full job name, folders separated by '/'
        id: String,
    },
    /// Print the Jenkins server version
    Version,
    /// Print the tree query sent to Jenkins
    Query {
        /// Query used to resolve a single job
        #[arg(short, long)]
        single: bool,
    },
    /// Print the effective configuration, or save it to a file
    Config {
        #[arg(short, long)]
        save: Option<PathBuf>,
    },
}

impl Cli {
    /// Loads the configuration file and applies command line overrides.
    fn settings(&self) -> Result<Config> {
        let config = Config::load(self.config.as_deref())?;
        Ok(self.apply_overrides(config))
    }

    fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(url) = &self.url {
            config.jenkins.url = Some(url.clone());
        }
        if let Some(user) = &self.user {
            config.jenkins.user = Some(user.clone());
        }
        if let Some(token) = &self.token {
            config.jenkins.api_token = Some(token.clone());
        }
        if let Some(max_depth) = self.max_depth {
            config.jenkins.max_depth = max_depth;
        }
        if let Some(max_branches) = self.max_branches {
            config.jenkins.max_branches = max_branches;
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        config.output.pretty |= self.pretty;
        config
    }

    fn provider(config: &Config) -> Result<JenkinsProvider> {
        let Some(url) = config.jenkins.url.as_deref() else {
            bail!("Jenkins URL is required (--url, JENKINS_URL or the configuration file)");
        };

        let credentials = Credentials::from_parts(
            config.jenkins.user.as_deref(),
            config.jenkins.api_token.as_deref(),
        );
        let limits = Limits {
            max_depth: config.jenkins.search_depth(),
            max_branches: config.jenkins.max_branches,
        };

        info!("Using Jenkins at {url}");
        JenkinsProvider::new(url, credentials, limits).context("Failed to create Jenkins provider")
    }

    fn write_json<T: Serialize>(&self, value: &T, pretty: bool) -> Result<()> {
        let json_output = if pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };

        if let Some(output_path) = &self.output {
            std::fs::write(output_path, json_output)
                .with_context(|| format!("Failed to write {}", output_path.display()))?;
            info!("Output written to: {}", output_path.display());
        } else {
            println!("{json_output}");
        }

        Ok(())
    }

    /// JSON goes to `--output` when given, whatever the display format.
    fn wants_json(&self, config: &Config) -> bool {
        self.output.is_some() || config.output.format == OutputFormat::Json
    }

    async fn execute_search(&self, config: &Config, criteria: &str, templates: bool) -> Result<()> {
        let provider = Self::provider(config)?;

        let spinner = Spinner::start("Searching jobs");
        let jobs = if templates {
            provider.search_templates(criteria).await?
        } else {
            provider.search_jobs(criteria).await?
        };
        spinner.finish(&format!("Found {} jobs", jobs.len()));

        if self.wants_json(config) {
            self.write_json(&jobs, config.output.pretty)
        } else {
            output::print_jobs(&jobs, provider.base_url());
            Ok(())
        }
    }

    async fn execute_job(&self, config: &Config, id: &str) -> Result<()> {
        let provider = Self::provider(config)?;

        let spinner = Spinner::start("Resolving job");
        let job = provider.find_job(id).await?;
        spinner.finish("Resolved job");

        let Some(job) = job else {
            bail!("Job '{id}' not found");
        };

        if self.wants_json(config) {
            self.write_json(&job, config.output.pretty)
        } else {
            output::print_job(&job, provider.base_url());
            Ok(())
        }
    }

    async fn execute_version(config: &Config) -> Result<()> {
        let provider = Self::provider(config)?;
        match provider.version().await {
            Some(version) => {
                println!("{version}");
                Ok(())
            }
            None => bail!("Unable to read the Jenkins version"),
        }
    }

    fn execute_config(mut config: Config, save: Option<&std::path::Path>) -> Result<()> {
        if let Some(path) = save {
            config.save(path)?;
            info!("Configuration written to: {}", path.display());
            return Ok(());
        }

        if config.jenkins.api_token.is_some() {
            config.jenkins.api_token = Some("***".to_string());
        }
        print!("{}", toml::to_string_pretty(&config)?);
        Ok(())
    }

    pub async fn execute(&self) -> Result<()> {
        let config = self.settings()?;

        match &self.command {
            Commands::Search {
                criteria,
                templates,
            } => self.execute_search(&config, criteria, *templates).await,
            Commands::Job { id } => self.execute_job(&config, id).await,
            Commands::Version => Self::execute_version(&config).await,
            Commands::Query { single } => {
                if *single {
                    println!("{}", job_query());
                } else {
                    println!("{}", search_query(config.jenkins.search_depth()));
                }
                Ok(())
            }
            Commands::Config { save } => Self::execute_config(config, save.as_deref()),
        }
    }
}
