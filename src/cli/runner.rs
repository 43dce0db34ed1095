use crate::{
    cli::Args,
    config::FunctionConfig,
    function::Function,
    ioutils::read_input,
    protocol::{RunFunctionRequest, RunFunctionResponse},
};
use anyhow::Context;

/// Runs one request read from the location named in `args`.
pub struct Runner {
    args: Args,
}

impl Runner {
    pub fn new(args: Args) -> Self {
        Self { args }
    }

    /// Loads configuration and the request, then runs the function.
    pub fn run(self) -> anyhow::Result<RunFunctionResponse> {
        let config = self.load_config()?;
        let request = self.read_request()?;
        let function = Function::new(config);
        Ok(function.run_function(&request))
    }

    fn load_config(&self) -> anyhow::Result<FunctionConfig> {
        match &self.args.config {
            Some(path) => FunctionConfig::load(path)
                .with_context(|| format!("cannot load configuration '{}'", path.display())),
            None => Ok(FunctionConfig::default()),
        }
    }

    fn read_request(&self) -> anyhow::Result<RunFunctionRequest> {
        let raw = read_input(&self.args.request)
            .with_context(|| format!("cannot read request from '{}'", self.args.request))?;
        serde_json::from_str(&raw).context("cannot parse request as JSON")
    }
}

/// Main entry point for CLI execution; prints the response as JSON.
pub fn run(args: Args) -> anyhow::Result<()> {
    let response = Runner::new(args).run()?;
    let output = serde_json::to_string_pretty(&response).context("cannot serialize response")?;
    println!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Severity;
    use serde_json::json;
    use std::fs;

    fn args_for(request: serde_json::Value) -> (tempfile::TempDir, Args) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request.json");
        fs::write(&path, request.to_string()).unwrap();
        let args = Args { request: path.display().to_string(), config: None, verbose: 0 };
        (dir, args)
    }

    #[test]
    fn runs_request_from_file() {
        let (_dir, args) = args_for(json!({
            "input": {
                "source": "Inline",
                "inline": {"template": "kind: {{ meta.tag }}\nmetadata:\n  name: x\n"}
            },
            "meta": {"tag": "Widget"}
        }));

        let response = Runner::new(args).run().unwrap();
        assert!(response.results.is_empty());
        assert_eq!(response.desired.resources["x"].resource["kind"], json!("Widget"));
    }

    #[test]
    fn pipeline_failures_are_reported_in_the_response() {
        let (_dir, args) = args_for(json!({"input": {"source": "Inline"}}));

        let response = Runner::new(args).run().unwrap();
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].severity, Severity::Fatal);
    }

    #[test]
    fn malformed_request_fails_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request.json");
        fs::write(&path, "not json").unwrap();
        let args = Args { request: path.display().to_string(), config: None, verbose: 0 };

        assert!(Runner::new(args).run().is_err());
    }
}
