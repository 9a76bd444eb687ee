// Floodnet: Static Layer-2 Flow Provisioning for Emulated Networks
// Copyright (C) 2026  The Floodnet Developers
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! # Mininet Session
//!
//! A handle to a running `mn` process, driven over its command prompt. Booting mininet creates
//! the network namespaces, interfaces and switch datapaths; exiting the prompt tears all of
//! them down again.

use crate::spec::TopologySpec;
use crate::{Error, Result};

use log::*;
use regex::Regex;
use std::io::{self, Read, Write};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;

const PROMPT: &str = "mininet> ";
const STARTUP_TIMEOUT_S: u64 = 120;
const COMMAND_TIMEOUT_S: u64 = 60;

/// Handle to a running mininet CLI
#[derive(Debug)]
pub struct MininetSession {
    child: Child,
    stdin: ChildStdin,
    output: Receiver<Vec<u8>>,
    prompt_re: Regex,
    hosts: Vec<String>,
    // keeps the rendered topology script alive for the lifetime of the session
    _script: NamedTempFile,
}

impl MininetSession {
    /// Boot mininet with the given topology: Open vSwitch switches, no controller, and
    /// automatically assigned sequential hardware addresses. Returns once the prompt appeared,
    /// i.e. once the network is up.
    pub fn start(spec: &TopologySpec) -> Result<Self> {
        let prompt_re = Regex::new(r"(?m)mininet> \z").unwrap();

        let mut script = NamedTempFile::new()?;
        script.write_all(spec.render_script().as_bytes())?;
        script.flush()?;

        debug!("Booting mn with the topology script at {:?}", script.path());
        let mut child = Command::new("mn")
            .arg("--custom")
            .arg(script.path())
            .arg("--topo")
            .arg("custom")
            .arg("--switch")
            .arg("ovs")
            .arg("--controller")
            .arg("none")
            .arg("--mac")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let stdin = child.stdin.take().ok_or(Error::SessionClosed)?;
        let stdout = child.stdout.take().ok_or(Error::SessionClosed)?;
        let stderr = child.stderr.take().ok_or(Error::SessionClosed)?;

        // mininet logs on stderr and prompts on stdout; both feed the same channel
        let (tx, rx) = mpsc::channel();
        spawn_reader(stdout, tx.clone());
        spawn_reader(stderr, tx);

        let mut session = Self {
            child,
            stdin,
            output: rx,
            prompt_re,
            hosts: spec.hosts.iter().map(|(name, _)| name.clone()).collect(),
            _script: script,
        };
        session.read_until_prompt(Duration::from_secs(STARTUP_TIMEOUT_S))?;
        info!("Mininet is up ({} hosts)", session.hosts.len());
        Ok(session)
    }

    /// The hosts of the running network, in the order the platform reports them
    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    /// Send a CLI command and return its output, with the trailing prompt stripped
    pub fn command(&mut self, cmd: impl AsRef<str>) -> Result<String> {
        let cmd = cmd.as_ref();
        trace!("mininet> {}", cmd);
        self.stdin.write_all(cmd.as_bytes())?;
        self.stdin.write_all(b"\n")?;
        self.stdin.flush()?;
        let out = self.read_until_prompt(Duration::from_secs(COMMAND_TIMEOUT_S))?;
        Ok(self.prompt_re.replace(&out, "").into_owned())
    }

    /// Query the hardware address assigned to a host's first interface
    pub fn host_mac(&mut self, host: impl AsRef<str>) -> Result<String> {
        let host = host.as_ref();
        let out = self.command(format!("{} ip link show {}-eth0", host, host))?;
        let re = Regex::new(r"link/ether ([0-9a-fA-F:]{17})").unwrap();
        match re.captures(&out) {
            Some(cap) => Ok(cap[1].to_string()),
            None => Err(Error::ParseError(format!(
                "no hardware address for {} in: {}",
                host,
                out.trim()
            ))),
        }
    }

    /// Delete all flow rules installed on a switch
    pub fn del_flows(&mut self, switch: impl AsRef<str>) -> Result<()> {
        let switch = switch.as_ref();
        self.ofctl(format!("del-flows {}", switch))
    }

    /// Install one flow rule on a switch. `flow` is the `ovs-ofctl` match/action string, e.g.
    /// `dl_type=0x0806,actions=flood`.
    pub fn add_flow(&mut self, switch: impl AsRef<str>, flow: impl AsRef<str>) -> Result<()> {
        self.ofctl(format!("add-flow {} {}", switch.as_ref(), flow.as_ref()))
    }

    fn ofctl(&mut self, cmd: String) -> Result<()> {
        let command = format!("sh ovs-ofctl {}", cmd);
        let out = self.command(&command)?;
        // ovs-ofctl is silent on success
        if out.trim().is_empty() {
            Ok(())
        } else {
            Err(Error::CommandError { command, output: out.trim().to_string() })
        }
    }

    /// Run the platform's all-pairs probe and parse the per-pair outcome
    pub fn ping_all(&mut self) -> Result<PingAllResult> {
        let out = self.command("pingall")?;
        parse_pingall(&out, &self.hosts)
    }

    /// Hand the prompt to the operator. Lines read from stdin are forwarded to mininet and the
    /// output is printed, until the operator types `exit` or `quit` (or closes stdin). The
    /// network keeps running; call [`MininetSession::stop`] to tear it down.
    pub fn interact(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let mut line = String::new();
        loop {
            print!("{}", PROMPT);
            io::stdout().flush()?;
            line.clear();
            if stdin.read_line(&mut line)? == 0 {
                break;
            }
            let cmd = line.trim();
            if cmd.is_empty() {
                continue;
            }
            if cmd == "exit" || cmd == "quit" {
                break;
            }
            match self.command(cmd) {
                Ok(out) => print!("{}", out),
                Err(Error::PromptTimeout(out)) => {
                    print!("{}", out);
                    warn!("Command did not finish within the timeout");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Shut the emulated network down and reap the process
    pub fn stop(mut self) -> Result<()> {
        self.stdin.write_all(b"exit\n")?;
        self.stdin.flush()?;
        let status = self.child.wait()?;
        if status.success() {
            Ok(())
        } else {
            Err(Error::CommandError {
                command: "exit".to_string(),
                output: format!("mininet exited with {}", status),
            })
        }
    }

    fn read_until_prompt(&mut self, timeout: Duration) -> Result<String> {
        let deadline = Instant::now() + timeout;
        let mut out = String::new();
        loop {
            let remaining = match deadline.checked_duration_since(Instant::now()) {
                Some(d) => d,
                None => return Err(Error::PromptTimeout(out)),
            };
            match self.output.recv_timeout(remaining) {
                Ok(chunk) => {
                    out.push_str(&String::from_utf8_lossy(&chunk));
                    if self.prompt_re.is_match(&out) {
                        return Ok(out.replace("\r\n", "\n"));
                    }
                }
                Err(RecvTimeoutError::Timeout) => return Err(Error::PromptTimeout(out)),
                Err(RecvTimeoutError::Disconnected) => return Err(Error::SessionClosed),
            }
        }
    }
}

impl Drop for MininetSession {
    /// A session that goes out of scope without [`MininetSession::stop`] must not leave the
    /// emulator (and its network namespaces) behind. Ask it to exit so it cleans up after
    /// itself, kill it if the prompt is gone, and reap the process either way.
    fn drop(&mut self) {
        let graceful = self.stdin.write_all(b"exit\n").and_then(|_| self.stdin.flush()).is_ok();
        if !graceful {
            let _ = self.child.kill();
        }
        let _ = self.child.wait();
    }
}

fn spawn_reader<R: Read + Send + 'static>(mut reader: R, tx: Sender<Vec<u8>>) {
    thread::spawn(move || {
        let mut buf = [0u8; 4096];
        loop {
            match reader.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => {
                    if tx.send(buf[..n].to_vec()).is_err() {
                        break;
                    }
                }
            }
        }
    });
}

/// Outcome of the all-pairs probe
#[derive(Debug, Clone, PartialEq)]
pub struct PingAllResult {
    /// Per ordered pair `(src, dst, received)` outcomes
    pub pairs: Vec<(String, String, bool)>,
    /// Percentage of dropped probes, as reported by the platform itself
    pub percent_dropped: f64,
}

/// Parse the `pingall` output. Every reachability line has the shape
/// `h1 -> h2 X h4 h5`, with one token per other host (in host order): the host name on
/// success, `X` on failure. The aggregate line is `*** Results: 0% dropped (20/20 received)`.
fn parse_pingall(out: &str, hosts: &[String]) -> Result<PingAllResult> {
    let line_re = Regex::new(r"(?m)^(\S+) -> (.+)$").unwrap();
    let results_re = Regex::new(r"Results: ([0-9.]+)% dropped").unwrap();

    let mut pairs = Vec::new();
    for cap in line_re.captures_iter(out) {
        let src = cap[1].to_string();
        if !hosts.contains(&src) {
            continue;
        }
        let targets: Vec<&String> = hosts.iter().filter(|h| **h != src).collect();
        let tokens: Vec<&str> = cap[2].split_whitespace().collect();
        if tokens.len() != targets.len() {
            return Err(Error::ParseError(format!(
                "unexpected reachability line for {}: {}",
                src, &cap[2]
            )));
        }
        for (dst, token) in targets.into_iter().zip(tokens) {
            pairs.push((src.clone(), dst.clone(), token != "X"));
        }
    }

    let percent_dropped = match results_re.captures(out) {
        Some(cap) => cap[1]
            .parse()
            .map_err(|_| Error::ParseError(format!("invalid loss percentage: {}", &cap[1])))?,
        None => return Err(Error::ParseError("no results line in pingall output".to_string())),
    };

    Ok(PingAllResult { pairs, percent_dropped })
}

#[cfg(test)]
mod test {
    use super::*;

    fn hosts(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn parse_pingall_all_received() {
        let out = "*** Ping: testing ping reachability\n\
                   h1 -> h2 h3 \n\
                   h2 -> h1 h3 \n\
                   h3 -> h1 h2 \n\
                   *** Results: 0% dropped (6/6 received)\n";
        let result = parse_pingall(out, &hosts(&["h1", "h2", "h3"])).unwrap();
        assert_eq!(result.percent_dropped, 0.0);
        assert_eq!(result.pairs.len(), 6);
        assert!(result.pairs.iter().all(|(_, _, received)| *received));
    }

    #[test]
    fn parse_pingall_with_losses() {
        let out = "*** Ping: testing ping reachability\n\
                   h1 -> X h3 \n\
                   h2 -> X X \n\
                   h3 -> h1 X \n\
                   *** Results: 66% dropped (2/6 received)\n";
        let result = parse_pingall(out, &hosts(&["h1", "h2", "h3"])).unwrap();
        assert_eq!(result.percent_dropped, 66.0);
        let received: Vec<bool> = result.pairs.iter().map(|(_, _, r)| *r).collect();
        assert_eq!(received, vec![false, true, false, false, true, false]);
        assert_eq!(
            result.pairs[0],
            ("h1".to_string(), "h2".to_string(), false)
        );
        assert_eq!(result.pairs[1], ("h1".to_string(), "h3".to_string(), true));
    }

    #[test]
    fn parse_pingall_rejects_garbage() {
        assert!(matches!(
            parse_pingall("nothing useful here", &hosts(&["h1", "h2"])),
            Err(Error::ParseError(_))
        ));
        let short_line = "h1 -> h2 \n*** Results: 0% dropped (2/2 received)\n";
        assert!(matches!(
            parse_pingall(short_line, &hosts(&["h1", "h2", "h3"])),
            Err(Error::ParseError(_))
        ));
    }

    #[test]
    fn live_session_roundtrip() {
        // skip the test when mininet is not installed or we lack the privileges to run it
        if !have_mininet() {
            return;
        }

        let spec = TopologySpec {
            switches: vec!["s1".to_string()],
            hosts: vec![
                ("h1".to_string(), "10.0.0.1/24".to_string()),
                ("h2".to_string(), "10.0.0.2/24".to_string()),
            ],
            links: vec![
                ("h1".to_string(), "s1".to_string()),
                ("h2".to_string(), "s1".to_string()),
            ],
        };

        let mut session = MininetSession::start(&spec).unwrap();
        let mac = session.host_mac("h1").unwrap();
        assert_eq!(mac, "00:00:00:00:00:01");

        session.del_flows("s1").unwrap();
        session.add_flow("s1", "dl_type=0x0806,actions=flood").unwrap();

        session.stop().unwrap();
    }

    #[test]
    fn dropped_session_reaps_the_emulator() {
        // skip the test when mininet is not installed or we lack the privileges to run it
        if !have_mininet() {
            return;
        }

        let spec = TopologySpec {
            switches: vec!["s1".to_string()],
            hosts: vec![
                ("h1".to_string(), "10.0.0.1/24".to_string()),
                ("h2".to_string(), "10.0.0.2/24".to_string()),
            ],
            links: vec![
                ("h1".to_string(), "s1".to_string()),
                ("h2".to_string(), "s1".to_string()),
            ],
        };

        let session = MininetSession::start(&spec).unwrap();
        let pid = session.child.id().to_string();
        drop(session);

        // signal 0 only probes whether the process still exists
        let alive = Command::new("kill")
            .args(&["-0", &pid])
            .status()
            .map(|s| s.success())
            .unwrap_or(false);
        assert!(!alive);
    }

    fn have_mininet() -> bool {
        let is_root = Command::new("id")
            .arg("-u")
            .output()
            .map(|o| String::from_utf8_lossy(&o.stdout).trim() == "0")
            .unwrap_or(false);
        let has_mn = Command::new("mn")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false);
        is_root && has_mn
    }
}
