//! Line-oriented operator console over a [`GameService`].
use std::io::{BufRead, Write};

use anyhow::Result;
use hunt_content::{DirectoryLoader, LevelLoader, SurveyLoader};
use hunt_core::{PlayerId, PlayerState};
use hunt_runtime::{
    ActionLogEntry, ConfigKey, ConfigUpdate, GameService, RuntimeError, ScanReport,
};

use crate::command::{self, Command, HELP};

/// Whether the read loop keeps going after a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Console {
    service: GameService,
}

impl Console {
    pub fn new(service: GameService) -> Self {
        Self { service }
    }

    /// Reads commands until end of input or `quit`.
    ///
    /// Only I/O failures on `output` end the loop early. Bad commands and
    /// game errors are reported and the next line is read.
    pub fn run(&self, input: impl BufRead, mut output: impl Write) -> Result<()> {
        for line in input.lines() {
            let line = line?;
            let command = match command::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    writeln!(output, "error: {e}")?;
                    continue;
                }
            };

            if self.execute(command, &mut output)? == Flow::Quit {
                break;
            }
        }
        output.flush()?;
        Ok(())
    }

    pub fn execute(&self, command: Command, out: &mut impl Write) -> Result<Flow> {
        match self.dispatch(command, out) {
            Ok(flow) => Ok(flow),
            Err(Failure::Game(e)) => {
                tracing::info!("Command failed: {}", e);
                writeln!(out, "{}", e.user_message())?;
                Ok(Flow::Continue)
            }
            Err(Failure::Content(e)) => {
                tracing::warn!("Import failed: {:#}", e);
                writeln!(out, "error: {e:#}")?;
                Ok(Flow::Continue)
            }
            Err(Failure::Output(e)) => Err(e.into()),
        }
    }

    fn dispatch(&self, command: Command, out: &mut impl Write) -> Result<Flow, Failure> {
        let service = &self.service;
        match command {
            Command::Badge { code } => {
                let entry = service.check_badge(&code)?;
                writeln!(
                    out,
                    "{} ({}) {} of {}",
                    entry.display_name, entry.player_id, entry.rank, entry.suit
                )?;
            }
            Command::Register {
                token,
                code,
                answers,
            } => {
                let registration = service.register(&token, &code, &answers)?;
                let record = &registration.record;
                writeln!(
                    out,
                    "{}: {} as {}, {}",
                    registration.kind,
                    record.profile.display_name,
                    record.player_id(),
                    describe(&record.state)
                )?;
                writeln!(out, "clue: {}", service.current_clue(&token)?)?;
            }
            Command::Scan { token, code } => {
                let report = service.scan(&token, &code)?;
                print_report(out, &report)?;
            }
            Command::Clue { token } => {
                writeln!(out, "clue: {}", service.current_clue(&token)?)?;
            }
            Command::History { player_id } => {
                let entries = service.history(&PlayerId::new(player_id))?;
                if entries.is_empty() {
                    writeln!(out, "no scans yet")?;
                }
                for entry in &entries {
                    print_entry(out, entry)?;
                }
            }
            Command::Recent { limit } => {
                for entry in &service.recent_actions(limit)? {
                    print_entry(out, entry)?;
                }
            }
            Command::Board => {
                for (rank, record) in service.leaderboard()?.iter().enumerate() {
                    writeln!(
                        out,
                        "{:>3}. {:<16} {}",
                        rank + 1,
                        record.profile.display_name,
                        describe(&record.state)
                    )?;
                }
            }
            Command::Logout { token } => {
                service.logout(&token)?;
                writeln!(out, "signed out")?;
            }
            Command::Import { key, path } => {
                let update = match key {
                    ConfigKey::Questions => LevelLoader::load(&path).map(ConfigUpdate::Levels),
                    ConfigKey::Survey => SurveyLoader::load(&path).map(ConfigUpdate::Survey),
                    ConfigKey::Directory => {
                        DirectoryLoader::load(&path).map(ConfigUpdate::Directory)
                    }
                }
                .map_err(Failure::Content)?;
                service.replace_config(update)?;
                writeln!(out, "imported {} from {}", key, path.display())?;
            }
            Command::Reload => {
                service.config().invalidate()?;
                writeln!(out, "configuration will be re-read")?;
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }
}

enum Failure {
    Game(RuntimeError),
    Content(anyhow::Error),
    Output(std::io::Error),
}

impl From<RuntimeError> for Failure {
    fn from(e: RuntimeError) -> Self {
        Failure::Game(e)
    }
}

impl From<std::io::Error> for Failure {
    fn from(e: std::io::Error) -> Self {
        Failure::Output(e)
    }
}

fn describe(state: &PlayerState) -> String {
    format!(
        "level {} lives {} metals [{}]",
        state.level, state.lives, state.metals
    )
}

fn print_report(out: &mut impl Write, report: &ScanReport) -> std::io::Result<()> {
    let target = report.target_name.as_deref().unwrap_or("unknown badge");
    writeln!(out, "{} ({})", report.message(), target)?;
    if let Some(metal) = report.step.gained {
        writeln!(out, "gained {metal}")?;
    }
    writeln!(out, "{}", describe(report.state()))?;
    writeln!(out, "clue: {}", report.step.clue)?;
    if !report.logged {
        writeln!(out, "(scan saved but not logged)")?;
    }
    Ok(())
}

fn print_entry(out: &mut impl Write, entry: &ActionLogEntry) -> std::io::Result<()> {
    writeln!(
        out,
        "{} {:<8} {:<20} {:<18} {} -> {}",
        entry.timestamp_micros,
        entry.player_id,
        entry.scanned_code,
        entry.outcome,
        describe(&entry.prior_state),
        describe(&entry.new_state)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use hunt_bootstrap::{HuntConfig, ServiceBuilder, StorageBackend};
    use std::io::Cursor;
    use tempfile::TempDir;

    fn console() -> Console {
        let config = HuntConfig {
            storage: StorageBackend::Memory,
            ..HuntConfig::default()
        };
        Console::new(ServiceBuilder::new(config).build().unwrap().service)
    }

    fn run(console: &Console, script: &str) -> String {
        let mut output = Vec::new();
        console.run(Cursor::new(script), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn registration_and_scans() {
        let console = console();
        let output = run(
            &console,
            "register tok qr-07919-ada 1=yes\nscan tok qr-07919-ada\nscan tok nowhere\n",
        );

        assert!(output.contains("created: Ada as p01"), "{output}");
        assert!(output.contains("Correct! (Ada)"), "{output}");
        assert!(output.contains("level 2 lives 5"), "{output}");
        assert!(output.contains("Scan <b>anyone</b>"), "{output}");
    }

    #[test]
    fn errors_are_reported_and_the_loop_continues() {
        let console = console();
        let output = run(&console, "scan ghost qr-07919-ada\nfly\nbadge qr-cauldron\n");

        assert!(output.contains("You are not signed in"), "{output}");
        assert!(output.contains("unknown command 'fly'"), "{output}");
        assert!(output.contains("The Cauldron (cauldron)"), "{output}");
    }

    #[test]
    fn quit_stops_reading() {
        let console = console();
        let output = run(&console, "quit\nbadge qr-cauldron\n");
        assert!(output.is_empty(), "{output}");
    }

    #[test]
    fn import_replaces_the_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("directory.ron");
        std::fs::write(
            &path,
            r#"(entries: [(player_id: "solo", scan_code: "qr-solo", display_name: "Solo", suit: Clubs, rank: 3)])"#,
        )
        .unwrap();

        let console = console();
        let output = run(
            &console,
            &format!(
                "import directory {}\nbadge qr-solo\nbadge qr-cauldron\nimport survey {}\n",
                path.display(),
                dir.path().join("missing.ron").display()
            ),
        );

        assert!(output.contains("imported directory"), "{output}");
        assert!(output.contains("Solo (solo) 3 of"), "{output}");
        assert!(output.contains("Unregistered QR"), "{output}");
        assert!(output.contains("error: "), "{output}");
    }
}
