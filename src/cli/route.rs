//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::bulk::{write_results_csv, BatchEvent, BulkJobRunner};
use crate::cli::help::{command_name, uses_provider};
use crate::cli::parse::{Commands, SenderArgs};
use crate::cli::presentation::{
    format_batch_event_line, format_bulk_report_json, format_bulk_report_text, format_email_json,
    format_email_text, format_leads_json, format_leads_text,
};
use crate::config::{ConfigLoader, OutreachConfig};
use crate::error::{ApiError, GenerationError, ParseError};
use crate::generation::{EmailGenerator, GenerationClient};
use crate::ingest::{write_template, SpreadsheetIngestor, DEFAULT_TEMPLATE_NAME};
use crate::single::{SingleOrchestrator, SingleState};
use crate::types::{non_blank, PitchRequest, Tone};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Runtime context for CLI execution: workspace, loaded configuration.
/// Built from workspace path and optional config path using ConfigLoader only.
pub struct RunContext {
    workspace_root: PathBuf,
    config: OutreachConfig,
}

/// Recipient fields of the `generate` command.
struct RecipientFields<'a> {
    name: Option<&'a str>,
    email: Option<&'a str>,
    company: Option<&'a str>,
    website: Option<&'a str>,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        Ok(Self::with_config(workspace_root, config))
    }

    pub fn with_config(workspace_root: PathBuf, config: OutreachConfig) -> Self {
        Self {
            workspace_root,
            config,
        }
    }

    pub fn config(&self) -> &OutreachConfig {
        &self.config
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let started = Instant::now();
        if uses_provider(command) {
            self.config.ensure_valid()?;
        }
        let result = self.execute_inner(command);
        debug!(
            command = command_name(command),
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Generate {
                name,
                email,
                company,
                website,
                sender,
                interactive,
                format,
            } => {
                let recipient = RecipientFields {
                    name: name.as_deref(),
                    email: email.as_deref(),
                    company: company.as_deref(),
                    website: website.as_deref(),
                };
                let request = if *interactive {
                    self.prompt_pitch_request(&recipient, sender)?
                } else {
                    self.pitch_request_from_args(&recipient, sender)
                };
                self.handle_generate(request, format)
            }
            Commands::Bulk {
                file,
                sender,
                export,
                delay_ms,
                format,
            } => self.handle_bulk(file, sender, export.as_deref(), *delay_ms, format),
            Commands::Leads { file, format } => self.handle_leads(file, format),
            Commands::Template { output } => self.handle_template(output.as_deref()),
        }
    }

    fn generator(&self) -> Result<Arc<dyn EmailGenerator>, ApiError> {
        let client = GenerationClient::from_config(&self.config.provider)?;
        info!(
            provider = client.provider_name(),
            model = client.model_name(),
            api_key = self.config.provider.api_key_status(),
            "Generation client ready"
        );
        Ok(Arc::new(client))
    }

    fn pitch_request_from_args(
        &self,
        recipient: &RecipientFields<'_>,
        sender: &SenderArgs,
    ) -> PitchRequest {
        let strategy = self.config.sender.strategy_with(
            sender.sender_name.clone(),
            sender.portfolio.clone(),
            sender.tone,
            sender.focus.clone(),
        );
        PitchRequest {
            recipient_name: recipient.name.unwrap_or_default().trim().to_string(),
            recipient_email: non_blank(recipient.email),
            recipient_company: recipient.company.unwrap_or_default().trim().to_string(),
            recipient_website: non_blank(recipient.website),
            sender_name: strategy.sender_name.trim().to_string(),
            sender_portfolio: strategy.sender_portfolio,
            tone: strategy.tone,
            specific_focus: strategy.specific_focus,
        }
    }

    /// Fill the request interactively, offering flag and config values as defaults.
    fn prompt_pitch_request(
        &self,
        recipient: &RecipientFields<'_>,
        sender: &SenderArgs,
    ) -> Result<PitchRequest, ApiError> {
        use dialoguer::{Input, Select};

        let seed = self.pitch_request_from_args(recipient, sender);

        let required = |prompt: &str, current: &str| -> Result<String, ApiError> {
            let mut input = Input::<String>::new().with_prompt(prompt);
            if !current.is_empty() {
                input = input.default(current.to_string());
            }
            Ok(input.interact_text()?.trim().to_string())
        };
        let optional = |prompt: &str, current: Option<&str>| -> Result<Option<String>, ApiError> {
            let value: String = Input::new()
                .with_prompt(prompt)
                .default(current.unwrap_or_default().to_string())
                .allow_empty(true)
                .interact_text()?;
            Ok(non_blank(Some(value.as_str())))
        };

        let recipient_name = required("Recipient name", &seed.recipient_name)?;
        let recipient_email = optional("Recipient email (optional)", seed.recipient_email.as_deref())?;
        let recipient_company = required("Company name", &seed.recipient_company)?;
        let recipient_website = optional("Website (optional)", seed.recipient_website.as_deref())?;
        let sender_name = required("Your name", &seed.sender_name)?;
        let sender_portfolio =
            optional("Portfolio or agency (optional)", seed.sender_portfolio.as_deref())?;

        let tone_labels: Vec<&str> = Tone::ALL.iter().map(Tone::as_str).collect();
        let current_tone = Tone::ALL
            .iter()
            .position(|t| *t == seed.tone)
            .unwrap_or_default();
        let tone_index = Select::new()
            .with_prompt("Tone")
            .items(&tone_labels)
            .default(current_tone)
            .interact()?;
        let tone = Tone::ALL.get(tone_index).copied().unwrap_or_default();

        let specific_focus: String = Input::new()
            .with_prompt("Specific focus")
            .default(seed.specific_focus.clone())
            .interact_text()?;

        Ok(PitchRequest {
            recipient_name,
            recipient_email,
            recipient_company,
            recipient_website,
            sender_name,
            sender_portfolio,
            tone,
            specific_focus,
        })
    }

    fn handle_generate(&self, request: PitchRequest, format: &str) -> Result<String, ApiError> {
        request.validate()?;
        let mut single = SingleOrchestrator::new(self.generator()?);
        let runtime = current_thread_runtime()?;
        let state = runtime.block_on(single.submit(request)).clone();

        match state {
            SingleState::Success(email) => {
                let mail_uri = single.mail_uri().unwrap_or_default();
                if format == "json" {
                    Ok(format_email_json(&email, &mail_uri))
                } else {
                    Ok(format_email_text(&email, &mail_uri))
                }
            }
            SingleState::Failed(message) => Err(GenerationError::new(message).into()),
            SingleState::Idle | SingleState::Loading => Err(GenerationError::failed().into()),
        }
    }

    fn handle_bulk(
        &self,
        file: &Path,
        sender: &SenderArgs,
        export: Option<&Path>,
        delay_ms: Option<u64>,
        format: &str,
    ) -> Result<String, ApiError> {
        let leads = SpreadsheetIngestor::ingest_path(file)?;
        if leads.is_empty() {
            return Err(ParseError::NoValidLeads.into());
        }

        let strategy = self.config.sender.strategy_with(
            sender.sender_name.clone(),
            sender.portfolio.clone(),
            sender.tone,
            sender.focus.clone(),
        );
        strategy.validate()?;

        let delay = match delay_ms {
            Some(ms) => Some(Duration::from_millis(ms)),
            None => self.config.bulk.delay(),
        };
        let generator = self.generator()?;
        let show_progress = format != "json";

        let runtime = current_thread_runtime()?;
        let report = runtime.block_on(async move {
            let (tx, mut rx) = mpsc::unbounded_channel::<BatchEvent>();
            let cancel = CancellationToken::new();

            let interrupt = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("Interrupt received; cancelling bulk run");
                    interrupt.cancel();
                }
            });

            let runner = BulkJobRunner::new(generator, Some(tx)).with_delay(delay);
            // The runner owns the only sender, so the render loop ends once it is dropped.
            let run = async move { runner.run(&strategy, leads, cancel).await };
            let render = async move {
                while let Some(event) = rx.recv().await {
                    if show_progress {
                        eprintln!("{}", format_batch_event_line(&event));
                    }
                }
            };

            let (report, ()) = futures::join!(run, render);
            report
        })?;

        if let Some(path) = export {
            write_results_csv(path, &report.batch)?;
        }

        let mut output = if format == "json" {
            format_bulk_report_json(&report)
        } else {
            format_bulk_report_text(&report)
        };
        if let (Some(path), false) = (export, format == "json") {
            output.push_str(&format!("\nResults exported to {}", path.display()));
        }
        Ok(output)
    }

    fn handle_leads(&self, file: &Path, format: &str) -> Result<String, ApiError> {
        let leads = SpreadsheetIngestor::ingest_path(file)?;
        if format == "json" {
            Ok(format_leads_json(&leads))
        } else {
            Ok(format_leads_text(&leads))
        }
    }

    fn handle_template(&self, output: Option<&Path>) -> Result<String, ApiError> {
        let target = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.workspace_root.join(DEFAULT_TEMPLATE_NAME));
        let written = write_template(&target)?;
        Ok(format!("Template written to {}", written.display()))
    }
}

fn current_thread_runtime() -> Result<tokio::runtime::Runtime, ApiError> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}
