//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `agenda_core` linkage against the configured agenda file.
//! - Dispatch one tool call: `agenda_cli <ToolName> '<json arguments>'`.

use agenda_core::{
    core_version, init_logging_from_config, tool_specs, AgendaConfig, AgendaService, AgendaTools,
    CsvAgendaRepository,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = AgendaConfig::from_env();
    if let Err(err) = init_logging_from_config(&config) {
        eprintln!("logging disabled: {err}");
    }

    let repo = match CsvAgendaRepository::try_new(&config.file_path) {
        Ok(repo) => repo,
        Err(err) => {
            eprintln!("cannot open agenda `{}`: {err}", config.file_path.display());
            return ExitCode::FAILURE;
        }
    };
    let service = AgendaService::new(repo);
    let tools = AgendaTools::new(&service);

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let Some(tool_name) = args.first() else {
        println!("agenda_core version={}", core_version());
        println!("agenda file={}", config.file_path.display());
        for spec in tool_specs() {
            println!("tool {}: {}", spec.name, spec.description);
        }
        println!("{}", tools.list_agenda_events(None));
        return ExitCode::SUCCESS;
    };

    let arguments = args.get(1).map(String::as_str).unwrap_or("{}");
    match tools.invoke_json(tool_name, arguments) {
        Ok(reply) => {
            println!("{reply}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::warn!("event=cli_invoke module=cli status=error error={err}");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
