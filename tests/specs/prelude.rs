// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for CLI specs.

use std::process::Output;

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
pub use serde_json::json;

/// Environment the specs never inherit from the developer's shell
const SCRUBBED_ENV: &[&str] = &[
    "TAT_API_BASE_URL",
    "TAT_API_TOKEN",
    "TAT_HTTP_TIMEOUT_MS",
    "TAT_TICK_MS",
    "TAT_RESYNC_SECS",
    "TAT_GOLDEN_FREEZE_ON_HOLD",
    "TAT_LOG",
    "TAT_LOG_FILE",
];

/// Start building a `tat` invocation.
pub fn cli() -> CliBuilder {
    CliBuilder { args: Vec::new(), envs: Vec::new() }
}

pub struct CliBuilder {
    args: Vec<String>,
    envs: Vec<(String, String)>,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|a| a.to_string()));
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    /// Point networked commands at `base_url`.
    pub fn backend(self, base_url: &str) -> Self {
        self.env("TAT_API_BASE_URL", base_url)
    }

    fn output(&self) -> Output {
        let mut cmd = Command::new(cargo_bin("tat"));
        for key in SCRUBBED_ENV {
            cmd.env_remove(key);
        }
        cmd.env("NO_COLOR", "1");
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        cmd.args(&self.args).output().expect("failed to run tat")
    }

    /// Run and assert a zero exit code.
    pub fn passes(self) -> RunAssert {
        let run = RunAssert::from(self.output());
        assert_eq!(run.code, Some(0), "expected success, stderr:\n{}", run.stderr);
        run
    }

    /// Run and assert a non-zero exit code.
    pub fn fails(self) -> RunAssert {
        let run = RunAssert::from(self.output());
        assert_ne!(run.code, Some(0), "expected failure, stdout:\n{}", run.stdout);
        run
    }
}

pub struct RunAssert {
    pub stdout: String,
    pub stderr: String,
    pub code: Option<i32>,
}

impl From<Output> for RunAssert {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            code: output.status.code(),
        }
    }
}

impl RunAssert {
    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout.contains(needle), "stdout missing {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(!self.stdout.contains(needle), "stdout has {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr.contains(needle), "stderr missing {needle:?}:\n{}", self.stderr);
        self
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout, expected);
        self
    }

    pub fn code(self, expected: i32) -> Self {
        assert_eq!(self.code, Some(expected), "stderr:\n{}", self.stderr);
        self
    }

    pub fn stdout_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout).expect("stdout is not JSON")
    }
}

/// A mock ticket backend serving one ticket and its ladders.
pub mod backend {
    use serde_json::Value;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub struct Backend {
        pub server: MockServer,
    }

    impl Backend {
        pub async fn start() -> Self {
            Self { server: MockServer::start().await }
        }

        pub fn uri(&self) -> String {
            self.server.uri()
        }

        pub async fn ticket(&self, id: &str, body: Value) -> &Self {
            Mock::given(method("GET"))
                .and(path(format!("/pms/admin/complaints/{id}.json")))
                .respond_with(ResponseTemplate::new(200).set_body_json(body))
                .mount(&self.server)
                .await;
            self
        }

        pub async fn timings(&self, endpoint: &str, id: &str, body: Value) -> &Self {
            Mock::given(method("GET"))
                .and(path(format!("/{endpoint}")))
                .and(query_param("id", id))
                .respond_with(ResponseTemplate::new(200).set_body_json(body))
                .mount(&self.server)
                .await;
            self
        }

        pub async fn task_data(&self, id: &str, body: Value) -> &Self {
            Mock::given(method("GET"))
                .and(path(format!("/pms/admin/complaints/{id}/create_task.json")))
                .respond_with(ResponseTemplate::new(200).set_body_json(body))
                .mount(&self.server)
                .await;
            self
        }
    }
}
