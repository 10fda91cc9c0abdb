//! The triage desk session: one queue driven by command lines.
//!
//! A [`Session`] turns each line into a [`Command`], applies it to its [`PatientQueue`] and
//! writes the outcome for the user to any `io::Write` sink. Every queue or file fault is
//! reported in the transcript and the session carries on; only a failure to write the
//! transcript itself is returned to the caller.

use crate::command::Command;
use crate::config::TriageConfig;
use crate::constants::{
    GOODBYE, HELP, INVALID_UTF8_LINE, LIST_HEADER, LIST_RULE, NO_PATIENTS_WAITING, PROMPT,
    WELCOME,
};
use crate::error::{TriageError, TriageResult};
use crate::queue::PatientQueue;
use crate::snapshot;
use std::io::{BufRead, Write};
use std::path::Path;

/// Whether the session should keep reading commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct Session {
    queue: PatientQueue,
    cfg: TriageConfig,
    load_depth: usize,
}

impl Session {
    pub fn new(cfg: TriageConfig) -> Self {
        Self {
            queue: PatientQueue::new(),
            cfg,
            load_depth: 0,
        }
    }

    pub fn queue(&self) -> &PatientQueue {
        &self.queue
    }

    pub fn into_queue(self) -> PatientQueue {
        self.queue
    }

    /// Parse and run one command line.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::Output`] only when `out` cannot be written to.
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> TriageResult<Flow> {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(err) => {
                tracing::debug!(%err, line, "rejected command line");
                writeln!(out, "Error: {err}")?;
                return Ok(Flow::Continue);
            }
        };

        match self.apply(command, out) {
            Err(TriageError::Output(err)) => Err(TriageError::Output(err)),
            Err(err) => {
                tracing::warn!(%err, "command failed");
                writeln!(out, "Error: {err}")?;
                Ok(Flow::Continue)
            }
            ok => ok,
        }
    }

    /// Execute every line of a command file, echoing each one after the prompt.
    ///
    /// A `quit` inside the file ends the file, not the session.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::SnapshotRead`] if the file cannot be read,
    /// [`TriageError::LoadDepthExceeded`] if loads are nested too deeply, and
    /// [`TriageError::Output`] if the transcript cannot be written.
    pub fn replay<W: Write>(&mut self, path: &Path, out: &mut W) -> TriageResult<()> {
        if self.load_depth >= self.cfg.max_load_depth() {
            return Err(TriageError::LoadDepthExceeded {
                path: path.to_path_buf(),
                limit: self.cfg.max_load_depth(),
            });
        }

        let lines = snapshot::read_lines(path)?;
        tracing::info!(path = %path.display(), lines = lines.len(), "replaying command file");

        self.load_depth += 1;
        let result = self.run_lines(&lines, out);
        self.load_depth -= 1;
        result
    }

    /// Drive an interactive session until `quit` or end of input.
    ///
    /// Prints the welcome banner first and the goodbye banner last. A line that is not valid
    /// UTF-8 is reported and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::Output`] if `input` cannot be read or `out` cannot be written.
    pub fn run_interactive<R: BufRead, W: Write>(
        &mut self,
        mut input: R,
        out: &mut W,
    ) -> TriageResult<()> {
        writeln!(out, "{WELCOME}")?;

        let mut buf = Vec::new();
        loop {
            write!(out, "\n{PROMPT}")?;
            out.flush()?;

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                writeln!(out)?;
                break;
            }
            while matches!(buf.last(), Some(b'\n' | b'\r')) {
                buf.pop();
            }

            let Ok(line) = std::str::from_utf8(&buf) else {
                tracing::warn!(bytes = buf.len(), "input line is not valid UTF-8");
                writeln!(out, "Error: {INVALID_UTF8_LINE}")?;
                continue;
            };
            if self.execute(line, out)? == Flow::Quit {
                break;
            }
        }

        writeln!(out, "{GOODBYE}")?;
        Ok(())
    }

    fn run_lines<W: Write>(&mut self, lines: &[String], out: &mut W) -> TriageResult<()> {
        for line in lines {
            writeln!(out, "{PROMPT}{line}")?;
            if self.execute(line, out)? == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    fn apply<W: Write>(&mut self, command: Command, out: &mut W) -> TriageResult<Flow> {
        match command {
            Command::Add { severity, name } => {
                self.queue.add(name.clone(), severity);
                writeln!(out, "Added patient \"{name}\" to the priority system")?;
            }
            Command::Peek => match self.queue.peek() {
                Ok(patient) => writeln!(
                    out,
                    "Highest priority patient to be called next: {}",
                    patient.name()
                )?,
                Err(TriageError::EmptyQueue) => writeln!(out, "{NO_PATIENTS_WAITING}")?,
                Err(err) => return Err(err),
            },
            Command::Next => match self.queue.remove() {
                Ok(patient) => {
                    writeln!(out, "This patient will now be seen: {}", patient.name())?
                }
                Err(TriageError::EmptyQueue) => writeln!(out, "{NO_PATIENTS_WAITING}")?,
                Err(err) => return Err(err),
            },
            Command::List => {
                writeln!(out, "# patients waiting: {}", self.queue.size())?;
                writeln!(out, "{LIST_HEADER}")?;
                writeln!(out, "{LIST_RULE}")?;
                write!(out, "{}", self.queue.render())?;
            }
            Command::Change { arrival, severity } => {
                match self.queue.change_priority(arrival, severity.clone()) {
                    Ok(name) => {
                        writeln!(out, "Changed patient \"{name}\"'s priority to {severity}")?
                    }
                    Err(err @ TriageError::PatientNotFound(_)) => {
                        tracing::warn!(%err, "change rejected");
                        writeln!(out, "Error: {err}. Try again.")?
                    }
                    Err(err) => return Err(err),
                }
            }
            Command::Save { file } => {
                let path = self.cfg.resolve_path(&file);
                let saved = self.queue.export_to(&path)?;
                writeln!(out, "Saved {saved} patients to file {file}")?;
            }
            Command::Load { file } => {
                let path = self.cfg.resolve_path(&file);
                match self.replay(&path, out) {
                    Err(TriageError::SnapshotRead { source, .. }) => {
                        tracing::warn!(path = %path.display(), error = %source, "load failed");
                        writeln!(out, "Error: could not open file {file}.")?;
                    }
                    other => other?,
                }
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn run(session: &mut Session, lines: &[&str]) -> String {
        let mut out = Vec::new();
        for line in lines {
            session.execute(line, &mut out).unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn add_peek_next_transcript() {
        let mut session = Session::new(TriageConfig::default());

        let transcript = run(
            &mut session,
            &["add urgent A", "add immediate B", "peek", "next", "next"],
        );

        assert_eq!(
            transcript,
            "Added patient \"A\" to the priority system\n\
             Added patient \"B\" to the priority system\n\
             Highest priority patient to be called next: B\n\
             This patient will now be seen: B\n\
             This patient will now be seen: A\n"
        );
    }

    #[test]
    fn empty_queue_is_reported_not_fatal() {
        let mut session = Session::new(TriageConfig::default());

        let transcript = run(&mut session, &["peek", "next"]);

        assert_eq!(
            transcript,
            format!("{NO_PATIENTS_WAITING}\n{NO_PATIENTS_WAITING}\n")
        );
    }

    #[test]
    fn bad_lines_are_explained() {
        let mut session = Session::new(TriageConfig::default());

        let transcript = run(
            &mut session,
            &["", "triage", "add bogus Zed", "change 9 urgent"],
        );

        assert_eq!(
            transcript,
            "Error: no command given.\n\
             Error: unrecognized command: triage\n\
             Error: unrecognized priority code: bogus\n\
             Error: no patient with arrival id 9 was found. Try again.\n"
        );
        assert!(session.queue().is_empty());
    }

    #[test]
    fn change_reports_canonical_code() {
        let mut session = Session::new(TriageConfig::default());

        let transcript = run(&mut session, &["add urgent Ann", "change 1 minimal"]);

        assert!(transcript.ends_with("Changed patient \"Ann\"'s priority to routine\n"));
    }

    #[test]
    fn list_prints_header_and_rows() {
        let mut session = Session::new(TriageConfig::default());
        run(&mut session, &["add routine Zoe"]);

        let transcript = run(&mut session, &["list"]);

        assert_eq!(
            transcript,
            format!(
                "# patients waiting: 1\n{LIST_HEADER}\n{LIST_RULE}\n{:<14}{:<15}{:<20}\n",
                1, "routine", "Zoe"
            )
        );
    }

    #[test]
    fn quit_stops_the_session() {
        let mut session = Session::new(TriageConfig::default());
        let mut out = Vec::new();
        assert_eq!(session.execute("quit", &mut out).unwrap(), Flow::Quit);
        assert!(out.is_empty());
    }

    #[test]
    fn save_then_load_uses_data_dir() {
        let temp = TempDir::new().unwrap();
        let cfg = TriageConfig::new(temp.path().to_path_buf(), 4).unwrap();
        let mut first = Session::new(cfg.clone());
        run(&mut first, &["add urgent A", "add emergency B"]);

        let saved = run(&mut first, &["save waiting.txt"]);
        assert_eq!(saved, "Saved 2 patients to file waiting.txt\n");
        assert!(temp.path().join("waiting.txt").is_file());

        let mut second = Session::new(cfg);
        let loaded = run(&mut second, &["load waiting.txt"]);
        assert_eq!(
            loaded,
            "triage> add urgent A\n\
             Added patient \"A\" to the priority system\n\
             triage> add emergency B\n\
             Added patient \"B\" to the priority system\n"
        );
        assert_eq!(second.queue().size(), 2);
    }

    #[test]
    fn missing_load_file_is_reported() {
        let temp = TempDir::new().unwrap();
        let cfg = TriageConfig::new(temp.path().to_path_buf(), 4).unwrap();
        let mut session = Session::new(cfg);

        let transcript = run(&mut session, &["load nowhere.txt"]);

        assert_eq!(transcript, "Error: could not open file nowhere.txt.\n");
    }

    #[test]
    fn self_loading_file_stops_at_depth_limit() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("loop.txt"), "add routine Echo\nload loop.txt\n").unwrap();
        let cfg = TriageConfig::new(temp.path().to_path_buf(), 3).unwrap();
        let mut session = Session::new(cfg);

        let transcript = run(&mut session, &["load loop.txt"]);

        assert_eq!(session.queue().size(), 3);
        assert_eq!(transcript.matches("Error: load of").count(), 1);
    }

    #[test]
    fn quit_inside_file_only_ends_the_file() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("short.txt"),
            "add urgent A\nquit\nadd urgent B\n",
        )
        .unwrap();
        let cfg = TriageConfig::new(temp.path().to_path_buf(), 4).unwrap();
        let mut session = Session::new(cfg);
        let mut out = Vec::new();

        let flow = session.execute("load short.txt", &mut out).unwrap();

        assert_eq!(flow, Flow::Continue);
        assert_eq!(session.queue().size(), 1);
    }

    #[test]
    fn interactive_run_ends_at_end_of_input() {
        let mut session = Session::new(TriageConfig::default());
        let mut out = Vec::new();

        session
            .run_interactive("add urgent A\npeek\n".as_bytes(), &mut out)
            .unwrap();

        let transcript = String::from_utf8(out).unwrap();
        assert!(transcript.starts_with(WELCOME));
        assert!(transcript.contains("triage> Highest priority patient to be called next: A"));
        assert!(transcript.trim_end().ends_with("Bye!"));
    }

    #[test]
    fn non_utf8_line_is_reported_and_session_continues() {
        let mut session = Session::new(TriageConfig::default());
        let mut out = Vec::new();
        let input: &[u8] = b"add urgent A\nadd urgent \xff\xfe\npeek\nquit\n";

        session.run_interactive(input, &mut out).unwrap();

        let transcript = String::from_utf8(out).unwrap();
        assert!(transcript.contains(&format!("triage> Error: {INVALID_UTF8_LINE}")));
        assert!(transcript.contains("triage> Highest priority patient to be called next: A"));
        assert!(transcript.trim_end().ends_with("Bye!"));
        assert_eq!(session.queue().size(), 1);
    }
}
