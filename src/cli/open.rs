//! CLI `open` command: a line-based session page.
//!
//! Plain lines are typed into the focused field and submitted. Lines starting
//! with `:` are keys: `:up`, `:down`, `:e`, `:del`, `:esc`, `:optimize`, `:q`.

use std::time::Duration;

use anyhow::{bail, Result};
use rusqlite::Connection;
use tokio::io::{AsyncBufReadExt, BufReader};

use scribe::config::ScribeConfig;
use scribe::optimize::{HealthMonitor, OptimizerClient};
use scribe::view::{
    format_date, format_time, ApiKeyPrompt, Focus, Key, OptimizedPanel, PageAction, PanelState,
    SessionPage,
};

use super::{open_db, print_summary};

/// What one input line asks for.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Key(Key),
    Text(String),
    Quit,
    Unknown(String),
}

fn parse_line(line: &str) -> Command {
    let trimmed = line.trim();
    match trimmed {
        ":q" | ":quit" => Command::Quit,
        ":up" => Command::Key(Key::Up),
        ":down" => Command::Key(Key::Down),
        ":e" | ":edit" => Command::Key(Key::Char('e')),
        ":del" | ":delete" => Command::Key(Key::Delete),
        ":esc" => Command::Key(Key::Escape),
        ":optimize" => Command::Key(Key::CtrlEnter),
        other if other.starts_with(':') => Command::Unknown(other.to_string()),
        _ => Command::Text(line.to_string()),
    }
}

/// Run the interactive session page until `:q` or end of input.
pub async fn open(config: &ScribeConfig, session_id: &str) -> Result<()> {
    let mut conn = open_db(config)?;
    let Some(mut page) = SessionPage::load(&conn, session_id)? else {
        bail!("session not found: {session_id}");
    };

    let client = OptimizerClient::new(&config.optimizer)?;
    let monitor = HealthMonitor::spawn(
        client.clone(),
        Duration::from_secs(config.optimizer.health_interval_secs),
    );
    if ApiKeyPrompt::is_needed(&conn) {
        println!("No OpenAI API key stored. Run `scribe setup` before optimizing.");
    }

    let mut panel = summary_panel(&mut conn, &client, &page).await;
    render(&page, &panel, &monitor);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let action = match parse_line(&line) {
            Command::Quit => break,
            Command::Unknown(cmd) => {
                println!("unknown command {cmd} (try :up :down :e :del :esc :optimize :q)");
                continue;
            }
            Command::Key(key) => page.handle_key(&conn, key),
            Command::Text(text) => {
                if *page.focus() == Focus::Editing {
                    page.set_edit_text(text);
                } else {
                    page.set_draft(text);
                }
                page.handle_key(&conn, Key::Enter)
            }
        };

        if action == PageAction::Optimize {
            println!("Optimizing...");
            panel.optimize(&mut conn, &client).await;
        }
        render(&page, &panel, &monitor);
    }

    Ok(())
}

/// Panel for the page: the stored summary, or a fresh one when the session
/// has notes but no summary yet.
async fn summary_panel(
    conn: &mut Connection,
    client: &OptimizerClient,
    page: &SessionPage,
) -> OptimizedPanel {
    let mut panel = OptimizedPanel::new(page.session().id.clone());
    panel.open(conn, client, !page.notes().is_empty()).await;
    panel
}

fn render(page: &SessionPage, panel: &OptimizedPanel, monitor: &HealthMonitor) {
    let session = page.session();
    println!();
    println!(
        "== {} ({}) ==  server: {}",
        page.heading(),
        format_date(&session.date),
        monitor.status()
    );

    match panel.state() {
        PanelState::Idle => {}
        PanelState::Loading => println!("Optimizing..."),
        PanelState::Ready(content) => {
            println!("-- Optimized Notes --");
            print_summary(content);
        }
        PanelState::Failed(message) => println!("{message}"),
    }

    if page.notes().is_empty() {
        println!("(no notes yet)");
    }
    for note in page.notes() {
        let marker = if page.selected() == Some(note.id.as_str()) { ">" } else { " " };
        let text = if page.editing() == Some(note.id.as_str()) {
            format!("{} (editing)", page.edit_buffer())
        } else {
            note.text.clone()
        };
        println!("{marker} [{}] {text}", format_time(note.timestamp));
    }

    let prompt = match page.focus() {
        Focus::Input => "note",
        Focus::Notes => "select",
        Focus::Editing => "edit",
    };
    println!("{prompt}>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe::store::types::NewSession;
    use scribe::store::{notes, optimized, sessions, settings};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn session_with_notes(conn: &Connection, texts: &[&str]) -> SessionPage {
        let session = sessions::create_session(
            conn,
            &NewSession {
                date: "2024-06-01".into(),
                patient_name: "Quinn".into(),
                title: None,
            },
        )
        .unwrap();
        for text in texts {
            notes::record_note(conn, &session.id, text).unwrap();
        }
        SessionPage::load(conn, &session.id).unwrap().unwrap()
    }

    async fn optimizer(expected_calls: u64) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/optimize"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"optimized": "Progress Made:\n- 4/5"})),
            )
            .expect(expected_calls)
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn opening_without_summary_optimizes() {
        let mut conn = scribe::db::open_memory_database().unwrap();
        settings::set_api_key(&conn, "sk-test").unwrap();
        let page = session_with_notes(&conn, &["mand 4/5"]);

        let server = optimizer(1).await;
        let client = OptimizerClient::with_base_url(server.uri()).unwrap();
        let panel = summary_panel(&mut conn, &client, &page).await;

        assert_eq!(panel.state(), &PanelState::Ready("Progress Made:\n- 4/5".into()));
        let stored = optimized::get_optimized_note(&conn, &page.session().id).unwrap();
        assert!(stored.is_some());
    }

    #[tokio::test]
    async fn opening_without_notes_stays_idle() {
        let mut conn = scribe::db::open_memory_database().unwrap();
        settings::set_api_key(&conn, "sk-test").unwrap();
        let page = session_with_notes(&conn, &[]);

        let server = optimizer(0).await;
        let client = OptimizerClient::with_base_url(server.uri()).unwrap();
        let panel = summary_panel(&mut conn, &client, &page).await;

        assert_eq!(panel.state(), &PanelState::Idle);
    }

    #[test]
    fn parses_commands_and_text() {
        assert_eq!(parse_line(":q"), Command::Quit);
        assert_eq!(parse_line(" :up "), Command::Key(Key::Up));
        assert_eq!(parse_line(":e"), Command::Key(Key::Char('e')));
        assert_eq!(parse_line(":optimize"), Command::Key(Key::CtrlEnter));
        assert_eq!(parse_line(":nope"), Command::Unknown(":nope".into()));
        assert_eq!(parse_line("ate lunch"), Command::Text("ate lunch".into()));
    }
}
