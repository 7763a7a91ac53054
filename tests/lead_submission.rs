use std::collections::BTreeMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::process::{Command, Output};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use tempfile::tempdir;

struct CapturedRequest {
    request_line: String,
    headers: BTreeMap<String, String>,
    body: String,
}

fn run_with_env(home: &Path, args: &[&str], envs: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_quizfunnel"));
    cmd.args(args)
        .env("HOME", home)
        .env_remove("QUIZFUNNEL_SCRIPT_KEYS");
    for (key, value) in envs {
        cmd.env(key, value);
    }
    cmd.output().expect("run quizfunnel")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn assert_ok(output: &Output) {
    assert!(
        output.status.success(),
        "stdout:\n{}\nstderr:\n{}",
        stdout(output),
        stderr(output)
    );
}

fn kv_lines(output: &Output) -> BTreeMap<String, String> {
    stdout(output)
        .lines()
        .filter_map(|line| line.split_once('='))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn spawn_webhook(status_line: &str) -> (String, mpsc::Receiver<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind test server");
    let addr = listener.local_addr().expect("local addr");
    let status_line = status_line.to_string();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

        let mut request_line = String::new();
        reader
            .read_line(&mut request_line)
            .expect("read request line");

        let mut headers = BTreeMap::new();
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).expect("read header line");
            if line == "\r\n" || line.is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
            }
        }

        let length = headers
            .get("content-length")
            .and_then(|value| value.parse::<usize>().ok())
            .unwrap_or(0);
        let mut body = vec![0u8; length];
        reader.read_exact(&mut body).expect("read body");

        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: text/plain\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok"
        );
        stream
            .write_all(response.as_bytes())
            .expect("write response");
        tx.send(CapturedRequest {
            request_line: request_line.trim().to_string(),
            headers,
            body: String::from_utf8_lossy(&body).to_string(),
        })
        .expect("send capture");
    });

    (format!("http://{addr}/webhook/electi"), rx)
}

#[test]
fn completed_walk_posts_lead_and_redirects() {
    let dir = tempdir().expect("tempdir");
    let (url, captured) = spawn_webhook("200 OK");
    let output = run_with_env(
        dir.path(),
        &[
            "walk", "learn", "zero", "ads", "--name", "Ana Souza", "--phone", "11987654321",
        ],
        &[("QUIZFUNNEL_WEBHOOK_URL", url.as_str())],
    );
    assert_ok(&output);
    let kv = kv_lines(&output);
    assert_eq!(kv.get("current_step").map(String::as_str), Some("RESULT_ELECTI"));
    assert_eq!(kv.get("lead_phone").map(String::as_str), Some("(11) 98765-4321"));
    assert_eq!(kv.get("lead_delivered").map(String::as_str), Some("true"));
    assert_eq!(kv.get("redirect").map(String::as_str), Some("https://wa.link/3ddvr0"));

    let request = captured
        .recv_timeout(Duration::from_secs(5))
        .expect("webhook called");
    assert_eq!(request.request_line, "POST /webhook/electi HTTP/1.1");
    assert_eq!(
        request.headers.get("content-type").map(String::as_str),
        Some("application/json")
    );
    let payload: serde_json::Value = serde_json::from_str(&request.body).expect("json body");
    assert_eq!(payload["name"], "Ana Souza");
    assert_eq!(payload["phone"], "(11) 98765-4321");
    assert_eq!(payload["finalStep"], "RESULT_ELECTI");
    assert_eq!(payload["quizData"]["START"], "learn");
    assert_eq!(payload["quizData"]["PATH_A_LEVEL"], "zero");
    assert_eq!(payload["quizData"]["PATH_A_INTEREST"], "ads");
}

#[test]
fn server_error_still_redirects() {
    let dir = tempdir().expect("tempdir");
    let (url, captured) = spawn_webhook("500 Internal Server Error");
    let output = run_with_env(
        dir.path(),
        &[
            "walk", "scale", "service", "0-5", "clients", "--name", "Bia", "--phone",
            "(21) 99876-5432",
        ],
        &[
            ("QUIZFUNNEL_WEBHOOK_URL", url.as_str()),
            ("QUIZFUNNEL_REDIRECT_URL", "https://example.com/thanks"),
        ],
    );
    assert_ok(&output);
    let kv = kv_lines(&output);
    assert_eq!(kv.get("lead_delivered").map(String::as_str), Some("false"));
    assert_eq!(kv.get("redirect").map(String::as_str), Some("https://example.com/thanks"));
    captured
        .recv_timeout(Duration::from_secs(5))
        .expect("webhook called");

    let log = std::fs::read_to_string(dir.path().join(".quizfunnel/logs/quizfunnel.log"))
        .expect("log file");
    assert!(log.contains("lead delivery failed"));
}

#[test]
fn unreachable_webhook_still_redirects() {
    let dir = tempdir().expect("tempdir");
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let url = format!("http://{}/hook", listener.local_addr().expect("addr"));
    drop(listener);

    let output = run_with_env(
        dir.path(),
        &[
            "walk", "hire", "local", "Loja", "0-10k", "--name", "Caio", "--phone", "11987654321",
        ],
        &[("QUIZFUNNEL_WEBHOOK_URL", url.as_str())],
    );
    assert_ok(&output);
    let kv = kv_lines(&output);
    assert_eq!(kv.get("lead_delivered").map(String::as_str), Some("false"));
    assert_eq!(kv.get("redirect").map(String::as_str), Some("https://wa.link/3ddvr0"));
}

#[test]
fn incomplete_form_is_not_sent() {
    let dir = tempdir().expect("tempdir");
    let output = run_with_env(
        dir.path(),
        &["walk", "learn", "zero", "ads", "--name", "Ana", "--phone", "1198765"],
        &[("QUIZFUNNEL_WEBHOOK_URL", "http://127.0.0.1:9/never")],
    );
    assert!(!output.status.success());
    assert!(stderr(&output).contains("lead form incomplete: phone number is incomplete"));

    let output = run_with_env(
        dir.path(),
        &["walk", "learn", "zero", "ads", "--phone", "11987654321"],
        &[("QUIZFUNNEL_WEBHOOK_URL", "http://127.0.0.1:9/never")],
    );
    assert!(!output.status.success());
    assert!(stderr(&output).contains("lead form incomplete: name is required"));
}
