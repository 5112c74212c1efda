//! Prerequisite checks run before any remote state is created.

use tracing::{debug, info, instrument, warn};

use infographic_shared::{
    InfographicError, RENDERER_HOME_ENV, Result, RunConfig, renderer_api_key_present,
};

use crate::runner::CommandRunner;
use crate::visuals::Renderer;

/// What the checks resolved.
#[derive(Debug, Clone)]
pub struct Prerequisites {
    /// Present only when visual rendering was requested.
    pub renderer: Option<Renderer>,
}

/// Verify the notebook tool, the source document and, when requested, the
/// renderer installation.
///
/// Every error returned here is fatal for the run. A missing renderer API key
/// only produces a warning.
#[instrument(skip_all, fields(program = %config.tool.program))]
pub async fn check_prerequisites<R: CommandRunner>(
    config: &RunConfig,
    runner: &R,
) -> Result<Prerequisites> {
    if !runner.probe(&config.tool.program).await {
        return Err(InfographicError::MissingTool {
            program: config.tool.program.clone(),
            hint: config.tool.install_hint.clone(),
        });
    }

    if !config.source_path.is_file() {
        return Err(InfographicError::MissingSource {
            path: config.source_path.clone(),
        });
    }

    let renderer = if config.render_visuals {
        Some(check_renderer(config)?)
    } else {
        None
    };

    info!(source = %config.source_path.display(), "prerequisites satisfied");
    Ok(Prerequisites { renderer })
}

fn check_renderer(config: &RunConfig) -> Result<Renderer> {
    let home = config.renderer_dir.as_deref().ok_or_else(|| {
        InfographicError::renderer(format!(
            "renderer directory not set. Pass --renderer-dir or set {RENDERER_HOME_ENV}."
        ))
    })?;

    let renderer = Renderer::locate(home, &config.renderer)?;

    if !renderer_api_key_present(&config.renderer) {
        warn!(
            var = %config.renderer.api_key_env,
            "renderer API key is not set; rendering will likely fail"
        );
    }
    debug!(
        var = %config.renderer.api_base_env,
        set = std::env::var_os(&config.renderer.api_base_env).is_some(),
        "renderer API endpoint"
    );

    Ok(renderer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Scratch, StubRunner};

    #[tokio::test]
    async fn missing_tool_is_fatal() {
        let scratch = Scratch::new("prereq");
        let err = check_prerequisites(&scratch.run_config(), &StubRunner::new().unavailable())
            .await
            .unwrap_err();
        assert!(matches!(err, InfographicError::MissingTool { .. }));
        assert!(err.to_string().contains("go install"));
    }

    #[tokio::test]
    async fn missing_source_is_fatal() {
        let scratch = Scratch::new("prereq");
        let mut config = scratch.run_config();
        config.source_path = scratch.root.join("nope.md");

        let err = check_prerequisites(&config, &StubRunner::new())
            .await
            .unwrap_err();
        assert!(matches!(err, InfographicError::MissingSource { .. }));
    }

    #[tokio::test]
    async fn renderer_only_checked_when_requested() {
        let scratch = Scratch::new("prereq");
        let config = scratch.run_config();
        let prereqs = check_prerequisites(&config, &StubRunner::new()).await.unwrap();
        assert!(prereqs.renderer.is_none());
    }

    #[tokio::test]
    async fn unresolved_renderer_dir_is_fatal() {
        let scratch = Scratch::new("prereq");
        let mut config = scratch.run_config();
        config.render_visuals = true;

        let err = check_prerequisites(&config, &StubRunner::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains(RENDERER_HOME_ENV));
    }

    #[tokio::test]
    async fn configured_renderer_resolves_without_api_key() {
        let scratch = Scratch::new("prereq");
        let mut config = scratch.run_config();
        config.render_visuals = true;
        config.renderer.api_key_env = "INFOGRAPHIC_TEST_NONEXISTENT_KEY_67890".into();
        config.renderer_dir = Some(scratch.renderer_dir(&config));

        let prereqs = check_prerequisites(&config, &StubRunner::new()).await.unwrap();
        let renderer = prereqs.renderer.expect("renderer resolved");
        assert!(renderer.slides_script.is_file());
    }
}
