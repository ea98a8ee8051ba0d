//! CLI route: single route table and run context. Dispatches to the exchange.

use crate::cli::parse::Commands;
use crate::config::ExchangeConfig;
use crate::container::Upsert;
use crate::error::ExchangeError;
use crate::exchange::Exchange;
use crate::macro_path::ModulePath;
use crate::resolver::DocumentName;
use serde_json::Value;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Runtime context for CLI execution: one exchange against one office instance.
pub struct RunContext {
    exchange: Exchange,
}

impl RunContext {
    /// Create run context from loaded configuration. No remote call is made yet.
    pub fn new(config: &ExchangeConfig) -> Result<Self, ExchangeError> {
        Ok(Self::with_exchange(Exchange::connect(&config.connection)?))
    }

    pub fn with_exchange(exchange: Exchange) -> Self {
        Self { exchange }
    }

    /// Execute a command against standard in and standard out.
    pub fn execute(&self, command: &Commands) -> Result<String, ExchangeError> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut input = stdin.lock();
        let mut output = stdout.lock();
        self.execute_with_io(command, &mut input, &mut output)
    }

    /// Execute a command. `input` is read when a push names no source file, `output` is
    /// written when a pull names none. The returned text is a summary for the user.
    pub fn execute_with_io(
        &self,
        command: &Commands,
        input: &mut dyn BufRead,
        output: &mut dyn Write,
    ) -> Result<String, ExchangeError> {
        match command {
            Commands::Push {
                document,
                macro_path,
                source_file,
                save,
                run,
            } => self.handle_push(
                document,
                macro_path,
                source_file.as_deref(),
                PushOptions {
                    save: *save,
                    run: *run,
                },
                input,
            ),
            Commands::Pull {
                document,
                macro_path,
                source_file,
            } => self.handle_pull(document, macro_path, source_file.as_deref(), output),
            Commands::Invoke {
                document,
                macro_name,
            } => self.handle_invoke(document, macro_name),
        }
    }

    fn handle_push(
        &self,
        document: &str,
        macro_path: &ModulePath,
        source_file: Option<&Path>,
        options: PushOptions,
        input: &mut dyn BufRead,
    ) -> Result<String, ExchangeError> {
        let lines = match source_file {
            Some(path) => {
                debug!(source = %path.display(), "Reading module source");
                read_lines(&mut BufReader::new(File::open(path)?))?
            }
            None => read_lines(input)?,
        };

        let document = DocumentName::parse(document);
        let (pushed, result) = if options.run {
            let (pushed, result) = self
                .exchange
                .push_and_run(&document, macro_path, lines, options.save)?;
            (pushed, Some(result))
        } else {
            let pushed = self.exchange.push(
                &document,
                macro_path.library(),
                macro_path.module(),
                lines,
                options.save,
            )?;
            (pushed, None)
        };

        let action = match pushed.upsert {
            Upsert::Inserted => "inserted",
            Upsert::Replaced => "replaced",
        };
        let saved = if pushed.saved { ", saved" } else { "" };
        let mut message = format!(
            "Pushed {}.{} to '{}' ({}{})",
            macro_path.library(),
            macro_path.module(),
            document,
            action,
            saved
        );
        if let Some(rendered) = result.map(render_result).filter(|r| !r.is_empty()) {
            message.push('\n');
            message.push_str(&rendered);
        }
        Ok(message)
    }

    fn handle_pull(
        &self,
        document: &str,
        macro_path: &ModulePath,
        source_file: Option<&Path>,
        output: &mut dyn Write,
    ) -> Result<String, ExchangeError> {
        let document = DocumentName::parse(document);
        let source = self
            .exchange
            .pull(&document, macro_path.library(), macro_path.module())?;

        match source_file {
            Some(path) => {
                let mut file = BufWriter::new(File::create(path)?);
                for line in &source {
                    file.write_all(line.as_bytes())?;
                }
                file.flush()?;
                Ok(format!(
                    "Pulled {}.{} from '{}' to {}",
                    macro_path.library(),
                    macro_path.module(),
                    document,
                    path.display()
                ))
            }
            None => {
                for line in &source {
                    output.write_all(line.as_bytes())?;
                }
                output.flush()?;
                Ok(String::new())
            }
        }
    }

    fn handle_invoke(&self, document: &str, macro_name: &str) -> Result<String, ExchangeError> {
        let document = DocumentName::parse(document);
        let result = self.exchange.invoke(&document, macro_name)?;
        Ok(render_result(result))
    }
}

#[derive(Debug, Clone, Copy)]
struct PushOptions {
    save: bool,
    run: bool,
}

/// Text for a macro result: nothing for null, strings as is, JSON otherwise.
fn render_result(result: Value) -> String {
    match result {
        Value::Null => String::new(),
        Value::String(text) => text,
        other => other.to_string(),
    }
}

fn read_lines(reader: &mut dyn BufRead) -> Result<Vec<String>, ExchangeError> {
    let lines = reader.lines().collect::<Result<Vec<_>, io::Error>>()?;
    Ok(lines)
}
