//! Interactive session: one line per user action.

use crate::terminal::{TerminalNotifier, TerminalView};
use pex_core::{Code, ExpertApi, ExpertSession};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

pub const HELP: &str = "\
Perintah:
  filter [teks]     saring daftar gejala (kosong = semua)
  toggle <kode>     pilih / batalkan gejala
  diagnose          diagnosa gejala terpilih
  backward [kode]   tampilkan gejala & pengendalian hama (kosong = sembunyikan)
  lookup <kata>     cari gejala di server
  reload            muat ulang katalog
  help              tampilkan bantuan
  quit              keluar";

#[derive(Debug, PartialEq, Eq)]
pub enum ShellCommand {
    Filter(String),
    Toggle(Code),
    Diagnose,
    Backward(String),
    Lookup(String),
    Reload,
    Help,
    Quit,
}

/// Parse one input line. Blank lines parse to `None`.
pub fn parse(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "filter" | "f" => ShellCommand::Filter(rest.to_string()),
        "toggle" | "t" => {
            let code = Code::new(rest).map_err(|_| "toggle membutuhkan kode gejala".to_string())?;
            ShellCommand::Toggle(code)
        }
        "diagnose" | "d" => ShellCommand::Diagnose,
        "backward" | "b" => ShellCommand::Backward(rest.to_string()),
        "lookup" | "l" => ShellCommand::Lookup(rest.to_string()),
        "reload" => ShellCommand::Reload,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("perintah tidak dikenal: {other} (ketik 'help')")),
    };
    Ok(Some(command))
}

/// Drive `session` from stdin until `quit` or end of input.
pub async fn run<A, W>(
    session: &mut ExpertSession<A, TerminalView<W>, TerminalNotifier>,
) -> anyhow::Result<()>
where
    A: ExpertApi,
    W: Write,
{
    // Errors are already reported through the notifier.
    let _ = session.init().await;
    session.view_mut().flush();
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("pex> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let command = match parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };

        match command {
            ShellCommand::Filter(query) => session.filter_symptoms(&query),
            ShellCommand::Toggle(code) => {
                let known = session.symptoms().find(code.as_str()).is_some();
                if known || session.selection().contains(code.as_str()) {
                    session.toggle_symptom(code);
                } else {
                    eprintln!("kode gejala tidak dikenal: {code}");
                }
            }
            ShellCommand::Diagnose => {
                if session.selection().is_empty() {
                    eprintln!("pilih minimal satu gejala terlebih dahulu");
                } else {
                    let _ = session.diagnose().await;
                }
            }
            ShellCommand::Backward(value) => {
                let _ = session.select_disease(&value).await;
            }
            ShellCommand::Lookup(keyword) => {
                if let Ok(found) = session.lookup_symptoms(&keyword).await {
                    for symptom in found {
                        println!("  {:<5} {}", symptom.code, symptom.description);
                    }
                }
            }
            ShellCommand::Reload => {
                let _ = session.init().await;
            }
            ShellCommand::Help => println!("{HELP}"),
            ShellCommand::Quit => break,
        }
        session.view_mut().flush();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_and_aliases() {
        assert_eq!(parse("  "), Ok(None));
        assert_eq!(parse("d"), Ok(Some(ShellCommand::Diagnose)));
        assert_eq!(
            parse("toggle  G01 "),
            Ok(Some(ShellCommand::Toggle(Code::new("G01").expect("valid code"))))
        );
        assert_eq!(
            parse("filter daun kuning"),
            Ok(Some(ShellCommand::Filter("daun kuning".into())))
        );
        assert_eq!(parse("QUIT"), Ok(Some(ShellCommand::Quit)));
    }

    #[test]
    fn backward_without_code_means_hide() {
        assert_eq!(parse("backward"), Ok(Some(ShellCommand::Backward(String::new()))));
    }

    #[test]
    fn toggle_requires_code() {
        assert!(parse("toggle").is_err());
    }

    #[test]
    fn rejects_unknown_command() {
        let err = parse("hapus G01").expect_err("unknown command");
        assert!(err.contains("hapus"));
    }
}
