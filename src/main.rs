// Copyright 2024 The indic-pos Authors
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//     http://www.apache.org/licenses/LICENSE-2.0
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use anyhow::{Context, Result};
use clap::Parser;
use indic_pos::pipelines::language_detection::FixedLanguageDetector;
use indic_pos::pipelines::pos_tagging::{POSTaggingConfig, POSTaggingPipeline, TaggingResponse};
use indic_pos::pipelines::strategy::{FailureReason, StrategyOutcome};
use indic_pos::render::{render_json, TextRendering};
use indic_pos::Config;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Detect the language of a sentence and tag its parts of speech
#[derive(Debug, Parser)]
#[command(name = "indic-pos", version)]
struct Cli {
    /// Sentence to tag (reads one sentence per line from stdin when absent)
    text: Option<String>,

    /// Skip detection and use this language code (e.g. hi, mr, gu, ta, te)
    #[arg(short, long, value_name = "CODE")]
    language: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// JSON configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory holding the tagged corpora (hindi.pos, marathi.pos...)
    #[arg(long, value_name = "DIR")]
    corpus_dir: Option<PathBuf>,

    /// Do not load the transformer fallback model
    #[arg(long)]
    no_fallback_model: bool,

    /// Suppress log output
    #[arg(short, long)]
    quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Detected language, strategy and one `token<TAB>tag` line per token
    Text,
    /// One JSON object per input
    Json,
}

impl Cli {
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
                .init();
        }
    }

    fn pipeline_config(&self) -> Result<POSTaggingConfig> {
        let mut config = match &self.config {
            Some(path) => POSTaggingConfig::from_file(path)
                .with_context(|| format!("loading configuration from {}", path.display()))?,
            None => POSTaggingConfig::default(),
        };
        if let Some(corpus_dir) = &self.corpus_dir {
            config.corpus_dir = Some(corpus_dir.clone());
        }
        if self.no_fallback_model {
            config.use_fallback_model = false;
        }
        Ok(config)
    }

    fn print(&self, response: &TaggingResponse, out: &mut impl Write) -> Result<()> {
        match self.format {
            OutputFormat::Text => write!(out, "{}", TextRendering(response))?,
            OutputFormat::Json => writeln!(out, "{}", render_json(response)?)?,
        }
        out.flush()?;
        Ok(())
    }

    fn execute(&self) -> Result<ExitCode> {
        self.init_logging();
        let config = self.pipeline_config()?;
        log::debug!("configuration: {config:?}");

        let mut pipeline = POSTaggingPipeline::new(config).context("building pipeline")?;
        if let Some(code) = &self.language {
            pipeline = pipeline.with_detector(FixedLanguageDetector::new(code));
        }

        let stdout = io::stdout();
        let mut out = stdout.lock();

        if let Some(text) = &self.text {
            let response = pipeline.tag(text);
            self.print(&response, &mut out)?;
            return Ok(match response.outcome {
                StrategyOutcome::Success(_) => ExitCode::SUCCESS,
                StrategyOutcome::Failure {
                    reason: FailureReason::TotalFailure,
                } => ExitCode::from(1),
                StrategyOutcome::Failure {
                    reason: FailureReason::InvalidInput,
                } => ExitCode::from(2),
            });
        }

        let stdin = io::stdin();
        let interactive = stdin.is_terminal();
        let mut input = stdin.lock();
        let mut buffer = Vec::new();
        loop {
            if interactive {
                eprint!("> ");
                io::stderr().flush()?;
            }
            buffer.clear();
            if input
                .read_until(b'\n', &mut buffer)
                .context("reading standard input")?
                == 0
            {
                break;
            }
            let response = match std::str::from_utf8(trim_line_ending(&buffer)) {
                Ok(line) => pipeline.tag(line),
                Err(error) => {
                    log::warn!("skipping input line that is not valid UTF-8: {error}");
                    let line = String::from_utf8_lossy(trim_line_ending(&buffer));
                    TaggingResponse::invalid_input(&line)
                }
            };
            self.print(&response, &mut out)?;
            if interactive && matches!(self.format, OutputFormat::Text) {
                writeln!(out)?;
            }
        }
        Ok(ExitCode::SUCCESS)
    }
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn main() -> Result<ExitCode> {
    Cli::parse().execute()
}
